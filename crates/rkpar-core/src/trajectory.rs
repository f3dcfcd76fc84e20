//! Pre-sized trajectory arena with disjoint write segments.
//!
//! A [`Trajectory`] holds `total_steps + 1` slots of `(time, state)`. Slot 0
//! is seeded with the initial condition at construction; the remaining
//! slots are handed out as exclusive [`TrajectorySegment`]s by a
//! [`SegmentCarver`].
//!
//! # Ownership model
//!
//! The carver splits the backing buffers with `split_at_mut`, so each
//! segment is a `&mut` borrow of its own index range. Workers write into
//! their segments concurrently without locks, and the borrow checker rules
//! out overlapping ranges. The carver hands out ranges strictly in index
//! order, which makes the written set exactly `1..=total_steps` once every
//! step has been carved.

use std::ops::Range;

use crate::config::IntegrationConfig;

/// Times and states of an integrated trajectory.
///
/// States are stored flat, [`dimension()`](Self::dimension) values per slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    dim: usize,
    times: Vec<f64>,
    states: Vec<f64>,
}

impl Trajectory {
    /// Allocate `config.slots()` slots and seed slot 0 with
    /// `(config.start(), initial)`.
    ///
    /// Unwritten slots hold zeros until a driver fills them.
    pub fn new(config: &IntegrationConfig, initial: &[f64]) -> Self {
        Self::with_slots(config.slots(), config.start(), initial)
    }

    /// Allocate `slots` slots (at least one) seeded at slot 0.
    pub fn with_slots(slots: usize, t0: f64, initial: &[f64]) -> Self {
        let slots = slots.max(1);
        let dim = initial.len();
        let mut times = vec![0.0; slots];
        let mut states = vec![0.0; slots * dim];
        times[0] = t0;
        states[..dim].copy_from_slice(initial);
        Self { dim, times, states }
    }

    /// Number of slots, including the initial condition.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`: slot 0 exists from construction.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of fine steps recorded after the initial condition.
    pub fn steps(&self) -> usize {
        self.len() - 1
    }

    /// Length of each state vector.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// All slot times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Time of slot `index`.
    pub fn time(&self, index: usize) -> f64 {
        self.times[index]
    }

    /// State of slot `index`.
    pub fn state(&self, index: usize) -> &[f64] {
        &self.states[index * self.dim..(index + 1) * self.dim]
    }

    /// Iterator over all states in slot order.
    pub fn states(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        (0..self.len()).map(move |i| self.state(i))
    }

    /// State of the last slot.
    pub fn final_state(&self) -> &[f64] {
        self.state(self.len() - 1)
    }

    /// Flat view of every state, slot-major.
    pub fn flat_states(&self) -> &[f64] {
        &self.states
    }

    /// Largest absolute componentwise difference between two trajectories'
    /// states, or `None` when their shapes differ.
    pub fn max_state_deviation(&self, other: &Trajectory) -> Option<f64> {
        if self.dim != other.dim || self.len() != other.len() {
            return None;
        }
        Some(
            self.states
                .iter()
                .zip(&other.states)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }

    /// Largest absolute difference between the two trajectories' times, or
    /// `None` when their lengths differ.
    pub fn max_time_deviation(&self, other: &Trajectory) -> Option<f64> {
        if self.len() != other.len() {
            return None;
        }
        Some(
            self.times
                .iter()
                .zip(&other.times)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }

    /// Begin handing out segments for slots `1..len()`.
    pub fn carver(&mut self) -> SegmentCarver<'_> {
        let dim = self.dim;
        let (_, times) = self.times.split_at_mut(1);
        let (_, states) = self.states.split_at_mut(dim);
        SegmentCarver {
            next_index: 1,
            dim,
            times,
            states,
        }
    }

    /// Split into `(times, states)` with one `Vec` per state.
    pub fn into_parts(self) -> (Vec<f64>, Vec<Vec<f64>>) {
        let states = (0..self.len()).map(|i| self.state(i).to_vec()).collect();
        (self.times, states)
    }
}

/// Hands out consecutive, non-overlapping [`TrajectorySegment`]s.
///
/// Created by [`Trajectory::carver()`]. The first segment starts at slot 1.
#[derive(Debug)]
pub struct SegmentCarver<'a> {
    next_index: usize,
    dim: usize,
    times: &'a mut [f64],
    states: &'a mut [f64],
}

impl<'a> SegmentCarver<'a> {
    /// Slot index the next segment will start at.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Slots not yet handed out.
    pub fn remaining(&self) -> usize {
        self.times.len()
    }

    /// Carve the next `steps` slots.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `steps` slots remain. Over-carving means the
    /// decomposition disagrees with the buffer length, which is a
    /// structural failure rather than a recoverable condition.
    pub fn take(&mut self, steps: usize) -> TrajectorySegment<'a> {
        assert!(
            steps <= self.remaining(),
            "segment of {steps} steps overruns trajectory ({} slots remain at index {})",
            self.remaining(),
            self.next_index
        );
        let all_times = std::mem::take(&mut self.times);
        let all_states = std::mem::take(&mut self.states);
        let (times, times_rest) = all_times.split_at_mut(steps);
        let (states, states_rest) = all_states.split_at_mut(steps * self.dim);
        self.times = times_rest;
        self.states = states_rest;

        let first_index = self.next_index;
        self.next_index += steps;
        TrajectorySegment {
            first_index,
            dim: self.dim,
            times,
            states,
        }
    }
}

/// Exclusive write access to a contiguous run of trajectory slots.
#[derive(Debug)]
pub struct TrajectorySegment<'a> {
    first_index: usize,
    dim: usize,
    times: &'a mut [f64],
    states: &'a mut [f64],
}

impl TrajectorySegment<'_> {
    /// Number of slots in the segment.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the segment covers no slots.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Global slot indices covered by this segment.
    pub fn index_range(&self) -> Range<usize> {
        self.first_index..self.first_index + self.len()
    }

    /// State length.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Write `(t, state)` into local slot `k`.
    pub fn write(&mut self, k: usize, t: f64, state: &[f64]) {
        self.times[k] = t;
        self.states[k * self.dim..(k + 1) * self.dim].copy_from_slice(state);
    }

    /// Set the time of local slot `k`.
    pub fn set_time(&mut self, k: usize, t: f64) {
        self.times[k] = t;
    }

    /// The state already written to local slot `k - 1` (`None` for `k == 0`)
    /// alongside mutable access to slot `k`.
    pub fn previous_and_slot(&mut self, k: usize) -> (Option<&[f64]>, &mut [f64]) {
        let dim = self.dim;
        let (done, rest) = self.states.split_at_mut(k * dim);
        let done: &[f64] = done;
        let previous = if k == 0 {
            None
        } else {
            Some(&done[(k - 1) * dim..])
        };
        (previous, &mut rest[..dim])
    }
}
