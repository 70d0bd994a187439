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

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stats::AllocationStatistics,
};
use concierge_model::{
    allocation::Allocation, count::RoomCount, inventory::Inventory, num::Coordinate,
};

/// A monitor that terminates the search after a fixed number of steps, that
/// is, evaluated cross-floor candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationLimitMonitor<T> {
    steps: u64,
    iteration_limit: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> IterationLimitMonitor<T> {
    #[inline]
    pub fn new(iteration_limit: u64) -> Self {
        Self {
            steps: 0,
            iteration_limit,
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn iteration_limit(&self) -> u64 {
        self.iteration_limit
    }

    #[inline]
    fn reached_limit(&self) -> bool {
        self.steps >= self.iteration_limit
    }
}

impl<T> SearchMonitor<T> for IterationLimitMonitor<T>
where
    T: Coordinate,
{
    fn name(&self) -> &str {
        "IterationLimitMonitor"
    }

    fn on_enter_search(&mut self, _inventory: &Inventory<T>, _count: RoomCount) {
        self.steps = 0;
    }

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    fn on_improvement(&mut self, _allocation: &Allocation<T>) {}

    fn on_exit_search(&mut self, _statistics: &AllocationStatistics) {}

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if self.reached_limit() {
            SearchCommand::Terminate("iteration limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}
