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

/// A monitor that forwards every event to a list of monitors.
/// The first monitor asking to terminate decides the command.
pub struct CompositeMonitor<'a, T> {
    monitors: Vec<Box<dyn SearchMonitor<T> + 'a>>,
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: Coordinate,
{
    fn names(&self) -> String {
        self.monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

impl<'a, T> std::fmt::Debug for CompositeMonitor<'a, T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("monitors", &self.names())
            .finish()
    }
}

impl<'a, T> std::fmt::Display for CompositeMonitor<'a, T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeMonitor([{}])", self.names())
    }
}

impl<'a, T> Default for CompositeMonitor<'a, T>
where
    T: Coordinate,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: Coordinate,
{
    #[inline]
    pub fn new() -> CompositeMonitor<'a, T> {
        CompositeMonitor {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> CompositeMonitor<'a, T> {
        CompositeMonitor {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor. Events reach monitors in insertion order.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn SearchMonitor<T> + 'a>> for CompositeMonitor<'a, T>
where
    T: Coordinate,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SearchMonitor<T> + 'a>>,
    {
        CompositeMonitor {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> SearchMonitor<T> for CompositeMonitor<'a, T>
where
    T: Coordinate,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, inventory: &Inventory<T>, count: RoomCount) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(inventory, count);
        }
    }

    fn on_step(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_step();
        }
    }

    fn on_improvement(&mut self, allocation: &Allocation<T>) {
        for monitor in &mut self.monitors {
            monitor.on_improvement(allocation);
        }
    }

    fn on_exit_search(&mut self, statistics: &AllocationStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(&self) -> SearchCommand {
        // Polled after every step; a plain loop keeps this allocation free.
        for monitor in &self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        monitor::{iteration_limit::IterationLimitMonitor, no_op::NoOpMonitor},
        stats::AllocationStatisticsBuilder,
    };
    use concierge_model::layout::StandardLayout;
    use std::{cell::RefCell, rc::Rc};

    /// Records the events it sees into a shared log.
    struct Recorder {
        tag: &'static str,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl SearchMonitor<i64> for Recorder {
        fn name(&self) -> &str {
            self.tag
        }

        fn on_enter_search(&mut self, _inventory: &Inventory<i64>, count: RoomCount) {
            self.events
                .borrow_mut()
                .push(format!("{}:enter:{}", self.tag, count));
        }

        fn on_step(&mut self) {
            self.events.borrow_mut().push(format!("{}:step", self.tag));
        }

        fn on_improvement(&mut self, allocation: &Allocation<i64>) {
            self.events
                .borrow_mut()
                .push(format!("{}:improve:{}", self.tag, allocation.len()));
        }

        fn on_exit_search(&mut self, _statistics: &AllocationStatistics) {
            self.events.borrow_mut().push(format!("{}:exit", self.tag));
        }

        fn search_command(&self) -> SearchCommand {
            SearchCommand::Continue
        }
    }

    #[test]
    fn test_forwards_events_in_insertion_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut composite: CompositeMonitor<'_, i64> = CompositeMonitor::with_capacity(2);
        composite.add_monitor(Recorder {
            tag: "a",
            events: Rc::clone(&events),
        });
        composite.add_monitor_boxed(Box::new(Recorder {
            tag: "b",
            events: Rc::clone(&events),
        }));
        assert_eq!(composite.len(), 2);

        let inventory = StandardLayout::new(1, 2)
            .build::<i64>()
            .expect("valid layout");
        let count = RoomCount::new(2).expect("valid count");
        composite.on_enter_search(&inventory, count);
        composite.on_step();
        composite.on_exit_search(&AllocationStatisticsBuilder::new().build());

        assert_eq!(
            *events.borrow(),
            vec![
                "a:enter:2", "b:enter:2", "a:step", "b:step", "a:exit", "b:exit"
            ]
        );
    }

    #[test]
    fn test_first_terminate_wins() {
        let mut composite: CompositeMonitor<'_, i64> = vec![
            Box::new(NoOpMonitor) as Box<dyn SearchMonitor<i64>>,
            Box::new(IterationLimitMonitor::<i64>::new(1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(composite.search_command(), SearchCommand::Continue);
        composite.on_step();
        match composite.search_command() {
            SearchCommand::Terminate(reason) => assert!(reason.contains("iteration limit")),
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_composite_continues() {
        let composite: CompositeMonitor<'_, i64> = CompositeMonitor::default();
        assert!(composite.is_empty());
        assert_eq!(composite.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_display_lists_monitor_names() {
        let mut composite: CompositeMonitor<'_, i64> = CompositeMonitor::new();
        composite.add_monitor(NoOpMonitor);
        composite.add_monitor(IterationLimitMonitor::<i64>::new(10));
        assert_eq!(
            composite.to_string(),
            "CompositeMonitor([NoOpMonitor, IterationLimitMonitor])"
        );
        assert!(format!("{:?}", composite).contains("NoOpMonitor, IterationLimitMonitor"));
    }
}
