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

//! # Room Allocator
//!
//! `Allocator` answers a booking request for `k` rooms against an
//! `Inventory` snapshot in two phases:
//!
//! 1. **Same floor**: the tightest window of `k` available rooms on one
//!    floor (see `same_floor`). If any floor can host the group, this result
//!    is final, even if a cross-floor group would be cheaper.
//! 2. **Cross floor**: otherwise, the cheapest `k`-subset of all available
//!    rooms under the bounding-box travel cost (see `cross_floor`).
//!
//! The inventory is only read. Booking the returned rooms is up to the caller.
//!
//! ## Configuration
//!
//! `AllocatorBuilder` sets the cross-floor tie-break policy and optional
//! search limits. Without limits every result is proven optimal. With a
//! limit the search may return the best allocation found so far, reported
//! as `AllocationResult::Feasible` with a `TerminationReason::Aborted`.
//!
//! ## Usage
//!
//! ```rust
//! use concierge_alloc::allocator::Allocator;
//! use concierge_model::{layout::StandardLayout, room::RoomId};
//!
//! let mut inventory = StandardLayout::default().build::<i64>().unwrap();
//! inventory.book(&[RoomId::new(102)]).unwrap();
//!
//! let allocation = Allocator::new().try_allocate(&inventory, 3).unwrap();
//! assert_eq!(
//!     allocation.room_ids(),
//!     &[RoomId::new(103), RoomId::new(104), RoomId::new(105)]
//! );
//! ```

use crate::{cross_floor::CrossFloorSearch, same_floor};
use concierge_model::{
    allocation::Allocation,
    count::RoomCount,
    index::RoomIndex,
    inventory::Inventory,
    num::Coordinate,
    room::RoomId,
};
use concierge_search::{
    monitor::{
        composite::CompositeMonitor, iteration_limit::IterationLimitMonitor, log::LogMonitor,
        search_monitor::SearchMonitor, time_limit::TimeLimitMonitor,
    },
    result::{AllocationError, AllocationOutcome},
    stats::AllocationStatisticsBuilder,
    tie_break::CrossFloorTieBreak,
};
use std::time::{Duration, Instant};

/// Progress lines read the clock every 4,096 candidates.
const LOG_CLOCK_CHECK_MASK: u64 = 0xFFF;

/// The same-floor first, travel-minimizing room allocator.
///
/// An `Allocator` only holds configuration. It can be shared between threads
/// and reused for any number of requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocator<T> {
    tie_break: CrossFloorTieBreak,
    iteration_limit: Option<u64>,
    time_limit: Option<Duration>,
    log_interval: Option<Duration>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Allocator<T>
where
    T: Coordinate,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Allocator<T>
where
    T: Coordinate,
{
    /// Creates an allocator with the default tie-break and no limits.
    #[inline]
    pub fn new() -> Self {
        AllocatorBuilder::new().build()
    }

    #[inline]
    pub fn builder() -> AllocatorBuilder<T> {
        AllocatorBuilder::new()
    }

    #[inline]
    pub fn tie_break(&self) -> CrossFloorTieBreak {
        self.tie_break
    }

    #[inline]
    pub fn iteration_limit(&self) -> Option<u64> {
        self.iteration_limit
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn has_limits(&self) -> bool {
        self.iteration_limit.is_some() || self.time_limit.is_some()
    }

    /// Allocates `count` rooms and reports how the search ended.
    pub fn allocate(&self, inventory: &Inventory<T>, count: RoomCount) -> AllocationOutcome<T> {
        let mut monitor = self.build_monitor();
        self.run(inventory, count, &mut monitor)
    }

    /// Like `allocate`, additionally reporting every search event to `monitor`.
    /// A `Terminate` command from `monitor` stops the search like a limit.
    pub fn allocate_with_monitor<M>(
        &self,
        inventory: &Inventory<T>,
        count: RoomCount,
        monitor: &mut M,
    ) -> AllocationOutcome<T>
    where
        M: SearchMonitor<T> + ?Sized,
    {
        let mut composite = self.build_monitor();
        composite.add_monitor(monitor);
        self.run(inventory, count, &mut composite)
    }

    /// Allocates `requested` rooms.
    ///
    /// Returns the allocation, which is the best one found so far if a limit
    /// stopped the search, or the reason why there is none.
    pub fn try_allocate(
        &self,
        inventory: &Inventory<T>,
        requested: usize,
    ) -> Result<Allocation<T>, AllocationError> {
        let count = RoomCount::try_from(requested)?;
        self.allocate(inventory, count).into_result(count)
    }

    fn build_monitor<'a>(&self) -> CompositeMonitor<'a, T>
    where
        T: 'a,
    {
        let mut monitor = CompositeMonitor::with_capacity(3);
        if let Some(limit) = self.iteration_limit {
            monitor.add_monitor(IterationLimitMonitor::new(limit));
        }
        if let Some(limit) = self.time_limit {
            monitor.add_monitor(TimeLimitMonitor::new(limit));
        }
        if let Some(interval) = self.log_interval {
            monitor.add_monitor(LogMonitor::new(interval, LOG_CLOCK_CHECK_MASK));
        }
        monitor
    }

    fn run<M>(&self, inventory: &Inventory<T>, count: RoomCount, monitor: &mut M) -> AllocationOutcome<T>
    where
        M: SearchMonitor<T> + ?Sized,
    {
        let start_time = Instant::now();
        let k = count.get();
        monitor.on_enter_search(inventory, count);

        let available: Vec<RoomIndex> = inventory.available_indices().collect();
        let stats = AllocationStatisticsBuilder::new().available_rooms(available.len());

        if available.len() < k {
            log::debug!(
                "cannot allocate {} rooms: {} of {} rooms are available",
                k,
                available.len(),
                inventory.num_rooms()
            );
            let statistics = stats.duration(start_time.elapsed()).build();
            monitor.on_exit_search(&statistics);
            return AllocationOutcome::infeasible(statistics);
        }

        // 1. Same floor
        let same_floor = same_floor::search(inventory, &available, k);
        let stats = stats.windows_evaluated(same_floor.windows_evaluated);
        if let Some(allocation) = same_floor.allocation {
            log::debug!(
                "allocated {} rooms on one floor with span {}: {:?}",
                k,
                allocation.cost().horizontal(),
                allocation.room_ids()
            );
            monitor.on_improvement(&allocation);
            let statistics = stats
                .improvements(1)
                .duration(start_time.elapsed())
                .build();
            monitor.on_exit_search(&statistics);
            return AllocationOutcome::optimal(allocation, statistics);
        }

        // 2. Cross floor
        log::debug!(
            "no floor has {} available rooms, searching {} rooms across floors",
            k,
            available.len()
        );
        let cross_floor = CrossFloorSearch::new(inventory, &available, self.tie_break).run(k, monitor);
        let statistics = stats
            .subsets_evaluated(cross_floor.subsets_evaluated)
            .prefixes_pruned(cross_floor.prefixes_pruned)
            .improvements(cross_floor.improvements)
            .search_space(cross_floor.search_space)
            .duration(start_time.elapsed())
            .build();
        monitor.on_exit_search(&statistics);

        match (cross_floor.allocation, cross_floor.aborted) {
            (Some(allocation), None) => {
                log::debug!(
                    "allocated {} rooms across floors with cost {}: {:?}",
                    k,
                    allocation.cost(),
                    allocation.room_ids()
                );
                AllocationOutcome::optimal(allocation, statistics)
            }
            (Some(allocation), Some(reason)) => {
                log::debug!(
                    "cross-floor search stopped ({}), keeping allocation with cost {}",
                    reason,
                    allocation.cost()
                );
                AllocationOutcome::feasible(allocation, reason, statistics)
            }
            (None, Some(reason)) => {
                log::debug!("cross-floor search stopped ({}) before any candidate", reason);
                AllocationOutcome::unknown(reason, statistics)
            }
            (None, None) => {
                debug_assert!(
                    false,
                    "exhaustive cross-floor search over {} rooms found no group of {}",
                    available.len(),
                    k
                );
                AllocationOutcome::infeasible(statistics)
            }
        }
    }
}

/// Builder for `Allocator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorBuilder<T> {
    tie_break: CrossFloorTieBreak,
    iteration_limit: Option<u64>,
    time_limit: Option<Duration>,
    log_interval: Option<Duration>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for AllocatorBuilder<T>
where
    T: Coordinate,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AllocatorBuilder<T>
where
    T: Coordinate,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            tie_break: CrossFloorTieBreak::default(),
            iteration_limit: None,
            time_limit: None,
            log_interval: None,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the policy for cross-floor candidates of equal cost.
    #[inline]
    pub fn tie_break(mut self, tie_break: CrossFloorTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Stops the cross-floor search after `limit` evaluated candidates.
    #[inline]
    pub fn with_iteration_limit(mut self, limit: u64) -> Self {
        self.iteration_limit = Some(limit);
        self
    }

    /// Stops the cross-floor search once `limit` has elapsed.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Logs search progress at `info` level at most once per `interval`.
    #[inline]
    pub fn with_progress_logging(mut self, interval: Duration) -> Self {
        self.log_interval = Some(interval);
        self
    }

    #[inline]
    pub fn build(self) -> Allocator<T> {
        Allocator {
            tie_break: self.tie_break,
            iteration_limit: self.iteration_limit,
            time_limit: self.time_limit,
            log_interval: self.log_interval,
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Allocates `requested_count` rooms with the default allocator.
///
/// Returns the ids of the selected rooms, or an empty list if the count is
/// outside `1..=5` or too few rooms are available.
///
/// # Examples
///
/// ```rust
/// use concierge_alloc::allocator::allocate;
/// use concierge_model::{layout::StandardLayout, room::RoomId};
///
/// let inventory = StandardLayout::default().build::<i64>().unwrap();
/// assert_eq!(allocate(&inventory, 2), vec![RoomId::new(101), RoomId::new(102)]);
/// assert!(allocate(&inventory, 6).is_empty());
/// ```
pub fn allocate<T>(inventory: &Inventory<T>, requested_count: usize) -> Vec<RoomId>
where
    T: Coordinate,
{
    match Allocator::new().try_allocate(inventory, requested_count) {
        Ok(allocation) => allocation.into_room_ids(),
        Err(err) => {
            log::debug!("no allocation: {}", err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::travel_cost;
    use concierge_model::{
        allocation::AllocationKind,
        inventory::InventoryBuilder,
        layout::StandardLayout,
    };
    use concierge_search::{
        monitor::search_monitor::SearchCommand,
        result::{AllocationResult, TerminationReason},
        stats::AllocationStatistics,
    };
    use rand::{Rng, SeedableRng, rngs::StdRng};

    type IntegerType = i64;

    fn inventory(rooms: &[(u64, IntegerType, IntegerType, bool)]) -> Inventory<IntegerType> {
        let mut builder = InventoryBuilder::new();
        for &(id, floor, position, occupied) in rooms {
            if occupied {
                builder.add_occupied_room(RoomId::new(id), floor, position);
            } else {
                builder.add_room(RoomId::new(id), floor, position);
            }
        }
        builder.build().expect("valid inventory")
    }

    fn ids(v: &[u64]) -> Vec<RoomId> {
        v.iter().copied().map(RoomId::new).collect()
    }

    fn count(k: usize) -> RoomCount {
        RoomCount::new(k).expect("valid count")
    }

    /// A layout with `floors` floors of `rooms` rooms where each floor keeps
    /// fewer than `k` rooms available, so every request goes cross-floor.
    fn sparse_inventory(rng: &mut StdRng, floors: u64, rooms: u64, k: usize) -> Inventory<IntegerType> {
        let mut inv = StandardLayout::new(floors, rooms)
            .build::<IntegerType>()
            .unwrap();
        let rooms = rooms as usize;
        for floor in 0..floors as usize {
            let keep = rng.random_range(0..k);
            let vacant = rand::seq::index::sample(rng, rooms, keep);
            for position in 0..rooms {
                let occupied = !vacant.iter().any(|v| v == position);
                inv.set_occupied(RoomIndex::new(floor * rooms + position), occupied);
            }
        }
        inv
    }

    /// Independent exhaustive reference: all k-subsets of the available rooms
    /// in id order, keeping the cheapest under `tie_break`.
    fn brute_force(
        inv: &Inventory<IntegerType>,
        k: usize,
        tie_break: CrossFloorTieBreak,
    ) -> Option<(Vec<RoomId>, IntegerType)> {
        fn recurse(
            inv: &Inventory<IntegerType>,
            rooms: &[RoomIndex],
            k: usize,
            start: usize,
            chosen: &mut Vec<RoomIndex>,
            tie_break: CrossFloorTieBreak,
            best: &mut Option<(Vec<RoomIndex>, IntegerType, IntegerType)>,
        ) {
            if chosen.len() == k {
                let total = travel_cost(inv, chosen).unwrap().total();
                let floor_sum: IntegerType = chosen.iter().map(|&r| inv.room_floor(r)).sum();
                let better = match best {
                    None => true,
                    Some((_, best_total, best_sum)) => {
                        total < *best_total
                            || (total == *best_total && tie_break.prefers(floor_sum, *best_sum))
                    }
                };
                if better {
                    *best = Some((chosen.clone(), total, floor_sum));
                }
                return;
            }
            for i in start..rooms.len() {
                chosen.push(rooms[i]);
                recurse(inv, rooms, k, i + 1, chosen, tie_break, best);
                chosen.pop();
            }
        }

        let mut rooms: Vec<RoomIndex> = inv.available_indices().collect();
        rooms.sort_by_key(|&r| inv.room_id(r));
        let mut best = None;
        recurse(inv, &rooms, k, 0, &mut Vec::new(), tie_break, &mut best);
        best.map(|(chosen, total, _)| (chosen.iter().map(|&r| inv.room_id(r)).collect(), total))
    }

    #[test]
    fn test_sliding_window_minimality() {
        let inv = inventory(&[
            (101, 1, 1, false),
            (102, 1, 2, false),
            (105, 1, 5, false),
            (106, 1, 6, false),
        ]);
        for _ in 0..3 {
            assert_eq!(allocate(&inv, 3), ids(&[101, 102, 105]));
        }
    }

    #[test]
    fn test_leftmost_block_on_vacant_floor() {
        let rooms: Vec<_> = (0..10).map(|p| (100 + p as u64, 1, p, false)).collect();
        let inv = inventory(&rooms);
        assert_eq!(allocate(&inv, 3), ids(&[100, 101, 102]));
    }

    #[test]
    fn test_cross_floor_cost_formula() {
        let inv = inventory(&[(100, 1, 0, false), (305, 3, 5, false)]);
        let allocation = Allocator::new().try_allocate(&inv, 2).unwrap();
        assert_eq!(allocation.room_ids(), &ids(&[100, 305])[..]);
        assert_eq!(allocation.kind(), AllocationKind::CrossFloor);
        assert_eq!(allocation.cost().vertical(), 4);
        assert_eq!(allocation.cost().horizontal(), 5);
        assert_eq!(allocation.cost().total(), 9);
    }

    #[test]
    fn test_three_room_block_beats_rooms_on_other_floor() {
        let inv = inventory(&[
            (200, 2, 0, false),
            (201, 2, 1, false),
            (202, 2, 2, false),
            (203, 2, 3, true),
            (503, 5, 3, false),
            (507, 5, 7, false),
        ]);
        let outcome = Allocator::new().allocate(&inv, count(3));
        assert!(outcome.is_optimal());
        let allocation = outcome.allocation().expect("floor 2 has three rooms");
        assert_eq!(allocation.room_ids(), &ids(&[200, 201, 202])[..]);
        assert_eq!(allocation.kind(), AllocationKind::SameFloor);
        assert_eq!(allocation.cost().total(), 2);
        assert_eq!(outcome.statistics.subsets_evaluated, 0);
    }

    #[test]
    fn test_narrow_coordinates_saturate_instead_of_panicking() {
        let mut builder = InventoryBuilder::<i8>::new();
        builder
            .add_room(RoomId::new(1), 1, 1)
            .add_room(RoomId::new(2), 100, 1);
        let inv = builder.build().unwrap();
        let allocation = Allocator::new().try_allocate(&inv, 2).unwrap();
        assert_eq!(allocation.room_ids(), &ids(&[1, 2])[..]);
        assert_eq!(allocation.cost().vertical(), i8::MAX);
        assert_eq!(allocation.cost().total(), i8::MAX);

        let mut builder = InventoryBuilder::<i8>::new();
        builder
            .add_room(RoomId::new(1), 1, -100)
            .add_room(RoomId::new(2), 1, 100);
        let inv = builder.build().unwrap();
        let allocation = Allocator::new().try_allocate(&inv, 2).unwrap();
        assert_eq!(allocation.kind(), AllocationKind::SameFloor);
        assert_eq!(allocation.cost().horizontal(), i8::MAX);
    }

    #[test]
    fn test_representable_cost_beats_saturated_ones() {
        let mut builder = InventoryBuilder::<i8>::new();
        builder
            .add_room(RoomId::new(1), 1, 1)
            .add_room(RoomId::new(2), 100, 1)
            .add_room(RoomId::new(3), 2, 1);
        let inv = builder.build().unwrap();
        assert_eq!(allocate(&inv, 2), ids(&[1, 3]));

        let inv = inventory(&[
            (1, IntegerType::MIN, 0, false),
            (2, IntegerType::MAX, IntegerType::MAX, false),
        ]);
        let allocation = Allocator::new().try_allocate(&inv, 2).unwrap();
        assert_eq!(allocation.cost().total(), IntegerType::MAX);
    }

    #[test]
    fn test_same_floor_takes_priority_over_cheaper_cross_floor() {
        // Same floor spans 9; {101, 201} would only cost 2.
        let inv = inventory(&[(101, 1, 1, false), (110, 1, 10, false), (201, 2, 1, false)]);
        let allocation = Allocator::new().try_allocate(&inv, 2).unwrap();
        assert_eq!(allocation.room_ids(), &ids(&[101, 110])[..]);
        assert_eq!(allocation.kind(), AllocationKind::SameFloor);
        assert_eq!(allocation.cost().total(), 9);
    }

    #[test]
    fn test_exactly_five_scattered_rooms() {
        let inv = inventory(&[
            (101, 1, 1, false),
            (102, 1, 2, true),
            (203, 2, 3, false),
            (304, 3, 4, true),
            (405, 4, 5, false),
            (506, 5, 6, false),
            (607, 6, 7, false),
            (608, 6, 8, true),
        ]);
        assert_eq!(allocate(&inv, 5), ids(&[101, 203, 405, 506, 607]));
    }

    #[test]
    fn test_occupied_rooms_are_never_returned() {
        let mut inv = StandardLayout::default().build::<IntegerType>().unwrap();
        inv.book(&ids(&[102, 103])).unwrap();
        // 101 and 104..107 remain; the tightest triple is 104, 105, 106.
        assert_eq!(allocate(&inv, 3), ids(&[104, 105, 106]));
    }

    #[test]
    fn test_invalid_counts() {
        let inv = StandardLayout::default().build::<IntegerType>().unwrap();
        assert!(allocate(&inv, 0).is_empty());
        assert!(allocate(&inv, 6).is_empty());
        assert_eq!(
            Allocator::new().try_allocate(&inv, 0),
            Err(AllocationError::InvalidCount { requested: 0 })
        );
        assert_eq!(
            Allocator::new().try_allocate(&inv, 6),
            Err(AllocationError::InvalidCount { requested: 6 })
        );
    }

    #[test]
    fn test_not_enough_available_rooms() {
        let inv = inventory(&[(101, 1, 1, false), (102, 1, 2, true), (201, 2, 1, false)]);
        assert!(allocate(&inv, 3).is_empty());
        assert_eq!(
            Allocator::new().try_allocate(&inv, 3),
            Err(AllocationError::Infeasible {
                requested: 3,
                available: 2
            })
        );

        let outcome = Allocator::new().allocate(&inv, count(3));
        assert!(outcome.is_infeasible());
        assert_eq!(outcome.reason, TerminationReason::InfeasibilityProven);
    }

    #[test]
    fn test_empty_inventory() {
        let inv = InventoryBuilder::<IntegerType>::new().build().unwrap();
        assert!(allocate(&inv, 1).is_empty());
    }

    #[test]
    fn test_allocation_does_not_mutate_inventory() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut inv = StandardLayout::default().build::<IntegerType>().unwrap();
        inv.randomize_occupancy(&mut rng);
        let before: Vec<_> = inv.rooms().collect();

        for k in 1..=5 {
            let _ = allocate(&inv, k);
        }
        let after: Vec<_> = inv.rooms().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_results_are_feasible_and_deterministic() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut inv = StandardLayout::default().build::<IntegerType>().unwrap();
        let allocator = Allocator::new();

        for _ in 0..20 {
            inv.randomize_occupancy(&mut rng);
            for k in 1..=5 {
                let first = allocator.try_allocate(&inv, k).unwrap();
                let second = allocator.try_allocate(&inv, k).unwrap();
                assert_eq!(first, second);
                assert_eq!(first.len(), k);

                let mut seen = first.room_ids().to_vec();
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len(), k, "rooms must be distinct");
                for &index in first.room_indices() {
                    assert!(!inv.is_occupied(index));
                }
            }
        }
    }

    #[test]
    fn test_booking_flow_fills_the_building() {
        let mut inv = StandardLayout::new(2, 3).build::<IntegerType>().unwrap();
        let allocator = Allocator::new();

        let first = allocator.try_allocate(&inv, 2).unwrap();
        assert_eq!(first.room_ids(), &ids(&[101, 102])[..]);
        inv.book(first.room_ids()).unwrap();

        let second = allocator.try_allocate(&inv, 3).unwrap();
        assert_eq!(second.room_ids(), &ids(&[201, 202, 203])[..]);
        inv.book(second.room_ids()).unwrap();

        let last = allocator.try_allocate(&inv, 1).unwrap();
        assert_eq!(last.room_ids(), &ids(&[103])[..]);
        inv.book(last.room_ids()).unwrap();

        assert!(matches!(
            allocator.try_allocate(&inv, 1),
            Err(AllocationError::Infeasible { available: 0, .. })
        ));
    }

    #[test]
    fn test_pruned_search_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        for tie_break in [CrossFloorTieBreak::LowerAverageFloor, CrossFloorTieBreak::FirstFound] {
            let allocator = Allocator::builder().tie_break(tie_break).build();
            for _ in 0..40 {
                let k = rng.random_range(2..=5);
                let inv = sparse_inventory(&mut rng, 6, 6, k);
                let expected = brute_force(&inv, k, tie_break);

                match allocator.try_allocate(&inv, k) {
                    Ok(allocation) => {
                        let (expected_ids, expected_total) =
                            expected.expect("brute force finds a group too");
                        assert_eq!(allocation.kind(), AllocationKind::CrossFloor);
                        assert_eq!(allocation.room_ids(), &expected_ids[..]);
                        assert_eq!(allocation.cost().total(), expected_total);
                    }
                    Err(AllocationError::Infeasible { .. }) => assert!(expected.is_none()),
                    Err(other) => panic!("unexpected error: {}", other),
                }
            }
        }
    }

    #[test]
    fn test_statistics_for_cross_floor_search() {
        let inv = inventory(&[
            (101, 1, 1, false),
            (201, 2, 2, false),
            (301, 3, 1, false),
            (401, 4, 9, false),
        ]);
        let outcome = Allocator::new().allocate(&inv, count(2));
        assert!(outcome.is_optimal());
        assert_eq!(outcome.statistics.available_rooms, 4);
        assert_eq!(outcome.statistics.windows_evaluated, 0);
        assert_eq!(outcome.statistics.search_space, Some(6));
        assert_eq!(outcome.statistics.subsets_evaluated, 6);
        assert!(outcome.statistics.improvements >= 1);
        assert_eq!(
            outcome.allocation().unwrap().room_ids(),
            &ids(&[101, 201])[..]
        );
    }

    #[test]
    fn test_iteration_limit_returns_best_so_far() {
        let inv = inventory(&[
            (101, 1, 1, false),
            (201, 2, 5, false),
            (301, 3, 1, false),
            (401, 4, 1, false),
        ]);
        let allocator = Allocator::builder().with_iteration_limit(1).build();
        assert!(allocator.has_limits());
        assert_eq!(allocator.iteration_limit(), Some(1));

        let outcome = allocator.allocate(&inv, count(2));
        assert!(outcome.is_feasible());
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("iteration limit reached".to_string())
        );
        // {101, 201} is the first candidate; {301, 401} would be cheaper.
        assert_eq!(
            outcome.allocation().unwrap().room_ids(),
            &ids(&[101, 201])[..]
        );
        assert_eq!(
            allocator.try_allocate(&inv, 2).unwrap().room_ids(),
            &ids(&[101, 201])[..]
        );
    }

    #[test]
    fn test_limits_do_not_affect_same_floor_pass() {
        let inv = StandardLayout::default().build::<IntegerType>().unwrap();
        let allocator = Allocator::builder().with_iteration_limit(0).build();
        let outcome = allocator.allocate(&inv, count(4));
        assert!(outcome.is_optimal());
    }

    #[test]
    fn test_limit_before_first_candidate_is_aborted() {
        let inv = inventory(&[(101, 1, 1, false), (201, 2, 1, false)]);
        let allocator = Allocator::builder()
            .with_time_limit(Duration::ZERO)
            .build();
        assert_eq!(allocator.time_limit(), Some(Duration::ZERO));

        let outcome = allocator.allocate(&inv, count(2));
        assert!(matches!(outcome.result, AllocationResult::Unknown));
        assert!(matches!(
            allocator.try_allocate(&inv, 2),
            Err(AllocationError::Aborted { .. })
        ));
        // An iteration limit of zero stops the search just as early.
        assert!(
            Allocator::builder()
                .with_iteration_limit(0)
                .build()
                .try_allocate(&inv, 2)
                .is_err()
        );
    }

    #[test]
    fn test_progress_logging_does_not_change_results() {
        let mut rng = StdRng::seed_from_u64(5);
        let inv = sparse_inventory(&mut rng, 8, 5, 4);
        let plain = Allocator::new().try_allocate(&inv, 4);
        let logged = Allocator::builder()
            .with_progress_logging(Duration::from_millis(1))
            .build()
            .try_allocate(&inv, 4);
        assert_eq!(plain, logged);
    }

    #[derive(Default)]
    struct Counting {
        entered: usize,
        steps: u64,
        improvements: Vec<IntegerType>,
        exited: Option<AllocationStatistics>,
        stop_after: Option<u64>,
    }

    impl SearchMonitor<IntegerType> for Counting {
        fn name(&self) -> &str {
            "Counting"
        }

        fn on_enter_search(&mut self, _inventory: &Inventory<IntegerType>, _count: RoomCount) {
            self.entered += 1;
        }

        fn on_step(&mut self) {
            self.steps += 1;
        }

        fn on_improvement(&mut self, allocation: &Allocation<IntegerType>) {
            self.improvements.push(allocation.cost().total());
        }

        fn on_exit_search(&mut self, statistics: &AllocationStatistics) {
            self.exited = Some(statistics.clone());
        }

        fn search_command(&self) -> SearchCommand {
            match self.stop_after {
                Some(limit) if self.steps >= limit => SearchCommand::Terminate("enough".into()),
                _ => SearchCommand::Continue,
            }
        }
    }

    #[test]
    fn test_external_monitor_sees_every_event() {
        let inv = inventory(&[
            (101, 1, 1, false),
            (201, 2, 9, false),
            (301, 3, 1, false),
            (401, 4, 2, false),
        ]);
        let mut monitor = Counting::default();
        let outcome = Allocator::new().allocate_with_monitor(&inv, count(2), &mut monitor);

        assert!(outcome.is_optimal());
        assert_eq!(monitor.entered, 1);
        assert_eq!(monitor.steps, outcome.statistics.subsets_evaluated);
        assert_eq!(
            monitor.improvements.len() as u64,
            outcome.statistics.improvements
        );
        // Improvements strictly decrease the cost.
        assert!(monitor.improvements.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(monitor.exited, Some(outcome.statistics.clone()));
    }

    #[test]
    fn test_external_monitor_can_stop_the_search() {
        let inv = inventory(&[
            (101, 1, 1, false),
            (201, 2, 9, false),
            (301, 3, 1, false),
            (401, 4, 2, false),
        ]);
        let mut monitor = Counting {
            stop_after: Some(2),
            ..Counting::default()
        };
        let outcome = Allocator::new().allocate_with_monitor(&inv, count(2), &mut monitor);
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("enough".to_string())
        );
        assert_eq!(outcome.statistics.subsets_evaluated, 2);
    }
}
