// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Time Limit Monitor
//!
//! Bounds the wall-clock time of the cross-floor pass. Each run gets a
//! deadline of `now + budget`, fixed when the search is entered. Evaluating a
//! candidate costs only a few comparisons, so the clock is read only on
//! candidates where `(candidates & clock_check_mask) == 0`.
//!
//! ```rust
//! use concierge_search::monitor::time_limit::TimeLimitMonitor;
//! use concierge_search::monitor::search_monitor::{SearchCommand, SearchMonitor};
//! use std::time::Duration;
//!
//! let mut mon = TimeLimitMonitor::new(Duration::from_secs(5));
//! SearchMonitor::<i64>::on_step(&mut mon);
//! assert_eq!(SearchMonitor::<i64>::search_command(&mon), SearchCommand::Continue);
//! assert!(mon.remaining() <= Duration::from_secs(5));
//! ```

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stats::AllocationStatistics,
};
use concierge_model::{
    allocation::Allocation, count::RoomCount, inventory::Inventory, num::Coordinate,
};
use std::time::{Duration, Instant};

/// Stops the search once its time budget is spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    budget: Duration,
    /// `None` if `now + budget` is not representable; the run never expires.
    deadline: Option<Instant>,
    candidates: u64,
    clock_check_mask: u64,
}

impl TimeLimitMonitor {
    /// Reads the clock on every 16,384th candidate.
    pub const DEFAULT_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    #[inline]
    pub fn new(budget: Duration) -> Self {
        Self::with_clock_check_mask(budget, Self::DEFAULT_CLOCK_CHECK_MASK)
    }

    /// Creates a monitor that reads the clock whenever
    /// `candidates & clock_check_mask == 0`. A mask of `0` reads it on every poll.
    #[inline]
    pub fn with_clock_check_mask(budget: Duration, clock_check_mask: u64) -> Self {
        Self {
            budget,
            deadline: Instant::now().checked_add(budget),
            candidates: 0,
            clock_check_mask,
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.budget
    }

    /// Time left until the deadline of the current run.
    #[inline]
    pub fn remaining(&self) -> Duration {
        self.deadline
            .map_or(Duration::MAX, |deadline| deadline.saturating_duration_since(Instant::now()))
    }

    #[inline]
    fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

impl<T> SearchMonitor<T> for TimeLimitMonitor
where
    T: Coordinate,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _inventory: &Inventory<T>, _count: RoomCount) {
        self.deadline = Instant::now().checked_add(self.budget);
        self.candidates = 0;
    }

    #[inline(always)]
    fn on_step(&mut self) {
        self.candidates = self.candidates.wrapping_add(1);
    }

    fn on_improvement(&mut self, _allocation: &Allocation<T>) {}

    fn on_exit_search(&mut self, _statistics: &AllocationStatistics) {}

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if self.candidates & self.clock_check_mask == 0 && self.is_expired() {
            SearchCommand::Terminate("time limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}
