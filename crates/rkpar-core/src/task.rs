//! Unit of parallel work: a run of fine steps with its own starting state.

use crate::derivative::Derivative;
use crate::stepper::{rk4_step_into, StepScratch};
use crate::trajectory::TrajectorySegment;

/// Plain-data description of a task's coverage.
///
/// Fine steps `start_index..end_index` advance the state from `t_start`
/// and land in trajectory slots `start_index + 1..=end_index`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaskSpan {
    /// Index of the slot the task starts from (not written by the task).
    pub start_index: usize,
    /// Index of the last slot the task writes.
    pub end_index: usize,
    /// Time at `start_index`.
    pub t_start: f64,
    /// Nominal end time of the coarse segment (clamped at the interval end).
    pub t_end: f64,
    /// Fine step size.
    pub step: f64,
}

impl TaskSpan {
    /// Number of fine steps the task executes.
    pub fn steps(&self) -> usize {
        self.end_index - self.start_index
    }
}

/// A contiguous run of fine steps, anchored at a possibly approximate
/// starting state, with exclusive access to the slots it writes.
///
/// Created once by a generator and consumed exactly once by
/// [`execute()`](Self::execute), which takes the task by value.
#[derive(Debug)]
pub struct Task<'a> {
    span: TaskSpan,
    y_start: Vec<f64>,
    out: TrajectorySegment<'a>,
}

impl<'a> Task<'a> {
    /// Bundle a span, its starting state and its output segment.
    ///
    /// # Panics
    ///
    /// Panics if `out` does not cover exactly slots
    /// `span.start_index + 1..=span.end_index`, or if `y_start` does not
    /// match the segment's state dimension.
    pub fn new(span: TaskSpan, y_start: Vec<f64>, out: TrajectorySegment<'a>) -> Self {
        assert!(
            span.end_index >= span.start_index,
            "task end index {} precedes start index {}",
            span.end_index,
            span.start_index
        );
        assert_eq!(
            out.index_range(),
            span.start_index + 1..span.end_index + 1,
            "task segment does not match its span"
        );
        assert_eq!(
            y_start.len(),
            out.dimension(),
            "task starting state has the wrong dimension"
        );
        Self { span, y_start, out }
    }

    /// Coverage of this task.
    pub fn span(&self) -> TaskSpan {
        self.span
    }

    /// Starting state the fine steps advance from.
    pub fn y_start(&self) -> &[f64] {
        &self.y_start
    }

    /// Run the fine RK4 sub-steps and write every result into the task's
    /// segment. Returns the span for bookkeeping.
    pub fn execute<D: Derivative + ?Sized>(self, f: &D, scratch: &mut StepScratch) -> TaskSpan {
        let Task {
            span,
            y_start,
            out: mut segment,
        } = self;

        let mut t = span.t_start;
        for k in 0..segment.len() {
            let (previous, slot) = segment.previous_and_slot(k);
            let y = previous.unwrap_or(y_start.as_slice());
            rk4_step_into(f, t, y, span.step, slot, scratch);
            t += span.step;
            segment.set_time(k, t);
        }
        span
    }
}
