//! Coarse/fine decomposition of the integration interval into tasks.
//!
//! The generator walks `[start, end]` in coarse steps of
//! `coarse_ratio * step`, clamped at `end`. Each coarse segment becomes one
//! [`Task`] anchored at the running coarse state; one RK4 call of the
//! coarse step size then advances that state to anchor the next segment.
//!
//! Segment `k + 1` therefore starts from the coarse approximation produced
//! by segment `k`, not from the fine state at the boundary. That relaxation
//! is what lets segments run in parallel. The resulting boundary error
//! shrinks with the coarse ratio and disappears at ratio 1, where every
//! coarse step is exactly the fine step the sequential driver would take.
//!
//! Fine-step counts are computed in index space (`min(coarse_ratio,
//! remaining)`), so the emitted tasks partition `1..=total_steps` exactly
//! regardless of rounding in the accumulated time.

use rkpar_core::{
    rk4_step_into, Derivative, IntegrationConfig, SegmentCarver, StepScratch, Task, TaskSpan,
};
use tracing::trace;

/// Number of tasks a run over `total_steps` fine steps produces.
pub fn task_count(total_steps: usize, coarse_ratio: usize) -> usize {
    total_steps.div_ceil(coarse_ratio.max(1))
}

/// Iterator producing the tasks of one integration run in index order.
pub struct Decomposer<'a, 'f, D: ?Sized> {
    f: &'f D,
    carver: SegmentCarver<'a>,
    coarse_ratio: usize,
    step: f64,
    end: f64,
    t: f64,
    index: usize,
    total: usize,
    coarse_state: Vec<f64>,
    next_state: Vec<f64>,
    scratch: StepScratch,
}

impl<'a, 'f, D: Derivative + ?Sized> Decomposer<'a, 'f, D> {
    /// Start a decomposition of `config`'s interval from `initial`.
    ///
    /// `carver` must come from a trajectory built for the same `config`;
    /// tasks take their output segments from it in order. A `coarse_ratio`
    /// of zero is treated as one.
    pub fn new(
        f: &'f D,
        config: &IntegrationConfig,
        initial: &[f64],
        coarse_ratio: usize,
        carver: SegmentCarver<'a>,
    ) -> Self {
        Self {
            f,
            carver,
            coarse_ratio: coarse_ratio.max(1),
            step: config.step(),
            end: config.end(),
            t: config.start(),
            index: 0,
            total: config.total_steps(),
            coarse_state: initial.to_vec(),
            next_state: vec![0.0; initial.len()],
            scratch: StepScratch::with_dimension(initial.len()),
        }
    }

    /// Fine steps not yet assigned to a task.
    pub fn remaining_steps(&self) -> usize {
        self.total - self.index
    }
}

impl<'a, D: Derivative + ?Sized> Iterator for Decomposer<'a, '_, D> {
    type Item = Task<'a>;

    fn next(&mut self) -> Option<Task<'a>> {
        if self.index >= self.total {
            return None;
        }

        let count = self.coarse_ratio.min(self.total - self.index);
        let coarse_step = self.coarse_ratio as f64 * self.step;
        let (next_t, coarse_step) = if self.t + coarse_step < self.end {
            (self.t + coarse_step, coarse_step)
        } else {
            (self.end, self.end - self.t)
        };

        let span = TaskSpan {
            start_index: self.index,
            end_index: self.index + count,
            t_start: self.t,
            t_end: next_t,
            step: self.step,
        };
        let task = Task::new(span, self.coarse_state.clone(), self.carver.take(count));
        trace!(
            start_index = span.start_index,
            end_index = span.end_index,
            t_start = span.t_start,
            "emitted task"
        );

        self.index += count;
        if self.index < self.total {
            rk4_step_into(
                self.f,
                self.t,
                &self.coarse_state,
                coarse_step,
                &mut self.next_state,
                &mut self.scratch,
            );
            std::mem::swap(&mut self.coarse_state, &mut self.next_state);
        }
        self.t = next_t;
        Some(task)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = task_count(self.remaining_steps(), self.coarse_ratio);
        (n, Some(n))
    }
}
