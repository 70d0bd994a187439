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

use crate::stats::AllocationStatistics;
use concierge_model::{
    allocation::Allocation, count::RoomCount, inventory::Inventory, num::Coordinate,
};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Observes one allocation run.
///
/// `on_enter_search` and `on_exit_search` bracket every run. `on_step` fires
/// once per evaluated cross-floor candidate, and `search_command` is polled
/// right after it. `on_improvement` fires whenever a better allocation
/// replaces the incumbent, in either phase.
pub trait SearchMonitor<T>
where
    T: Coordinate,
{
    fn name(&self) -> &str;
    fn on_enter_search(&mut self, inventory: &Inventory<T>, count: RoomCount);
    fn on_step(&mut self);
    fn on_improvement(&mut self, allocation: &Allocation<T>);
    fn on_exit_search(&mut self, statistics: &AllocationStatistics);
    fn search_command(&self) -> SearchCommand;
}

impl<T, M> SearchMonitor<T> for &mut M
where
    T: Coordinate,
    M: SearchMonitor<T> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, inventory: &Inventory<T>, count: RoomCount) {
        (**self).on_enter_search(inventory, count);
    }

    #[inline(always)]
    fn on_step(&mut self) {
        (**self).on_step();
    }

    fn on_improvement(&mut self, allocation: &Allocation<T>) {
        (**self).on_improvement(allocation);
    }

    fn on_exit_search(&mut self, statistics: &AllocationStatistics) {
        (**self).on_exit_search(statistics);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        (**self).search_command()
    }
}

impl<T> std::fmt::Debug for dyn SearchMonitor<T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SearchMonitor<T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
