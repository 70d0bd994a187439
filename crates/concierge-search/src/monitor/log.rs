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

//! # Log Monitor
//!
//! Reports search progress through the `log` facade. The start and end of
//! every run are logged at `info`, improvements at `debug`, and while the
//! cross-floor search runs a progress line is emitted at `info` at most once
//! per `log_interval`. Like the time limit, the clock is only read on steps
//! where `(steps & clock_check_mask) == 0`.
//!
//! The library never installs a logger; without one these calls are no-ops.

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stats::AllocationStatistics,
};
use concierge_model::{
    allocation::Allocation, count::RoomCount, inventory::Inventory, num::Coordinate,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    steps: u64,
    improvements: u64,
    best_cost: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: Coordinate,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            steps: 0,
            improvements: 0,
            best_cost: None,
        }
    }

    /// The total cost of the best allocation seen in the current run.
    #[inline]
    pub fn best_cost(&self) -> Option<T> {
        self.best_cost
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn log_progress(&mut self) {
        let now = Instant::now();
        let best = match self.best_cost {
            Some(cost) => cost.to_string(),
            None => "none".to_string(),
        };
        log::info!(
            "{:.1}s elapsed, {} candidates evaluated, {} improvements, best cost {}",
            now.duration_since(self.start_time).as_secs_f32(),
            self.steps,
            self.improvements,
            best
        );
        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: Coordinate,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: Coordinate,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, inventory: &Inventory<T>, count: RoomCount) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.steps = 0;
        self.improvements = 0;
        self.best_cost = None;
        log::info!(
            "allocating {} rooms, {} of {} available",
            count,
            inventory.available_count(),
            inventory.num_rooms()
        );
    }

    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
        if (self.steps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_progress();
        }
    }

    fn on_improvement(&mut self, allocation: &Allocation<T>) {
        self.improvements += 1;
        self.best_cost = Some(allocation.cost().total());
        log::debug!(
            "new best {} allocation with cost {}",
            allocation.kind(),
            allocation.cost()
        );
    }

    fn on_exit_search(&mut self, statistics: &AllocationStatistics) {
        log::info!(
            "search finished in {:.3}s: {} windows, {} subsets evaluated, {} prefixes pruned",
            statistics.duration.as_secs_f64(),
            statistics.windows_evaluated,
            statistics.subsets_evaluated,
            statistics.prefixes_pruned
        );
    }

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
