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

//! # Cross-Floor Search
//!
//! When no floor can host the whole group, every `k`-subset of the available
//! rooms is a candidate and the one with the smallest travel cost wins.
//!
//! ## Enumeration
//!
//! Candidates are the `k`-combinations of the available rooms sorted by room
//! id, visited in lexicographic order. That order is the canonical order
//! ties are resolved in, and the returned rooms are listed by ascending id.
//!
//! ## Pruning
//!
//! The cost of a subset never drops when rooms are added. While the
//! bounding box of a candidate is built room by room, a prefix whose cost
//! already exceeds the incumbent (or matches it, if ties cannot replace the
//! incumbent under the tie-break policy) is dominated along with every
//! candidate that starts with it. The whole block is skipped with
//! `Combinations::skip_prefix`. The result is exactly the one an unpruned
//! scan would return.
//!
//! ## Monitoring
//!
//! The monitor is polled before each candidate is evaluated and notified
//! after it. Improvements are reported as full allocations.

use crate::cost::BoundingBox;
use concierge_core::algorithm::combinations::Combinations;
use concierge_model::{
    allocation::{Allocation, AllocationKind, TravelCost},
    count::RoomCount,
    index::RoomIndex,
    inventory::Inventory,
    num::Coordinate,
};
use concierge_search::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    tie_break::CrossFloorTieBreak,
};
use smallvec::SmallVec;

type Subset = SmallVec<[usize; RoomCount::MAX]>;

/// What the cross-floor pass found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossFloorOutcome<T> {
    /// The best candidate seen, rooms ordered by id.
    pub allocation: Option<Allocation<T>>,
    /// The number of candidates taken from the generator.
    pub subsets_evaluated: u64,
    /// The number of prefixes skipped as dominated.
    pub prefixes_pruned: u64,
    /// The number of times the incumbent was replaced.
    pub improvements: u64,
    /// `C(available, k)`, if it fits into a `u64`.
    pub search_space: Option<u64>,
    /// Set if a monitor stopped the search before it was exhausted.
    pub aborted: Option<String>,
}

#[derive(Debug, Clone)]
struct Incumbent<T> {
    members: Subset,
    cost: TravelCost<T>,
    floor_sum: T,
}

/// The cross-floor search over a fixed set of available rooms.
#[derive(Clone)]
pub struct CrossFloorSearch<'a, T> {
    inventory: &'a Inventory<T>,
    tie_break: CrossFloorTieBreak,
    /// Available rooms, sorted by id.
    rooms: Vec<RoomIndex>,
    floors: Vec<T>,
    positions: Vec<T>,
}

impl<'a, T> std::fmt::Debug for CrossFloorSearch<'a, T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossFloorSearch")
            .field("tie_break", &self.tie_break)
            .field("rooms", &self.rooms)
            .finish_non_exhaustive()
    }
}

impl<'a, T> CrossFloorSearch<'a, T>
where
    T: Coordinate,
{
    /// Prepares a search over the `available` rooms of `inventory`.
    pub fn new(
        inventory: &'a Inventory<T>,
        available: &[RoomIndex],
        tie_break: CrossFloorTieBreak,
    ) -> Self {
        let mut rooms = available.to_vec();
        rooms.sort_unstable_by_key(|&r| inventory.room_id(r));
        let floors = rooms.iter().map(|&r| inventory.room_floor(r)).collect();
        let positions = rooms.iter().map(|&r| inventory.room_position(r)).collect();

        Self {
            inventory,
            tie_break,
            rooms,
            floors,
            positions,
        }
    }

    /// Returns the number of candidate rooms.
    #[inline]
    pub fn num_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// Searches for the cheapest group of `k` rooms.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `k` is outside `1..=RoomCount::MAX`.
    pub fn run<M>(&self, k: usize, monitor: &mut M) -> CrossFloorOutcome<T>
    where
        M: SearchMonitor<T> + ?Sized,
    {
        debug_assert!(
            (1..=RoomCount::MAX).contains(&k),
            "called `CrossFloorSearch::run` with an invalid group size: {}",
            k
        );

        let mut combos = Combinations::new(self.rooms.len(), k);
        let search_space = combos.total();

        let mut best: Option<Incumbent<T>> = None;
        let mut subset = Subset::new();
        let mut subsets_evaluated = 0u64;
        let mut prefixes_pruned = 0u64;
        let mut improvements = 0u64;
        let mut aborted = None;

        while let Some(combination) = combos.next_combination() {
            subset.clear();
            subset.extend_from_slice(combination);

            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                aborted = Some(reason);
                break;
            }
            subsets_evaluated += 1;

            let mut bbox = BoundingBox::new(self.floors[subset[0]], self.positions[subset[0]]);
            let mut dominated = false;
            for depth in 1..k {
                let member = subset[depth];
                bbox.extend(self.floors[member], self.positions[member]);

                let is_prefix = depth + 1 < k;
                if is_prefix
                    && best
                        .as_ref()
                        .is_some_and(|inc| self.is_dominated(bbox.cost().total(), inc.cost.total()))
                {
                    combos.skip_prefix(depth + 1);
                    prefixes_pruned += 1;
                    dominated = true;
                    break;
                }
            }

            if !dominated && self.improves(&bbox, best.as_ref()) {
                let incumbent = Incumbent {
                    members: subset.clone(),
                    cost: bbox.cost(),
                    floor_sum: bbox.floor_sum(),
                };
                improvements += 1;
                monitor.on_improvement(&self.allocation(&incumbent));
                best = Some(incumbent);
            }

            monitor.on_step();
        }

        CrossFloorOutcome {
            allocation: best.map(|incumbent| self.allocation(&incumbent)),
            subsets_evaluated,
            prefixes_pruned,
            improvements,
            search_space,
            aborted,
        }
    }

    /// A prefix is dominated if no extension of it can replace the incumbent.
    #[inline(always)]
    fn is_dominated(&self, prefix_total: T, incumbent_total: T) -> bool {
        prefix_total > incumbent_total
            || (prefix_total == incumbent_total && !self.tie_break.ties_can_replace())
    }

    #[inline(always)]
    fn improves(&self, candidate: &BoundingBox<T>, incumbent: Option<&Incumbent<T>>) -> bool {
        let Some(incumbent) = incumbent else {
            return true;
        };
        let total = candidate.cost().total();
        let best_total = incumbent.cost.total();
        total < best_total
            || (total == best_total
                && self
                    .tie_break
                    .prefers(candidate.floor_sum(), incumbent.floor_sum))
    }

    fn allocation(&self, incumbent: &Incumbent<T>) -> Allocation<T> {
        let indices: Vec<RoomIndex> = incumbent.members.iter().map(|&m| self.rooms[m]).collect();
        let ids = indices.iter().map(|&r| self.inventory.room_id(r)).collect();
        Allocation::new(ids, indices, AllocationKind::CrossFloor, incumbent.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_model::{inventory::InventoryBuilder, room::RoomId};
    use concierge_search::monitor::{
        iteration_limit::IterationLimitMonitor, no_op::NoOpMonitor,
    };

    fn ids(allocation: &Allocation<i64>) -> Vec<u64> {
        allocation.room_ids().iter().map(|id| id.value()).collect()
    }

    fn inventory(rooms: &[(u64, i64, i64)]) -> Inventory<i64> {
        let mut builder = InventoryBuilder::new();
        for &(id, floor, position) in rooms {
            builder.add_room(RoomId::new(id), floor, position);
        }
        builder.build().unwrap()
    }

    fn run(
        inventory: &Inventory<i64>,
        k: usize,
        tie_break: CrossFloorTieBreak,
    ) -> CrossFloorOutcome<i64> {
        let available: Vec<RoomIndex> = inventory.available_indices().collect();
        CrossFloorSearch::new(inventory, &available, tie_break)
            .run(k, &mut NoOpMonitor)
    }

    #[test]
    fn test_debug_lists_candidate_rooms() {
        let inv = inventory(&[(305, 3, 5), (100, 1, 0)]);
        let available: Vec<RoomIndex> = inv.available_indices().collect();
        let search = CrossFloorSearch::new(&inv, &available, CrossFloorTieBreak::FirstFound);
        let rendered = format!("{:?}", search);
        assert!(rendered.starts_with("CrossFloorSearch"));
        assert!(rendered.contains("FirstFound"));
        assert_eq!(search.num_rooms(), 2);
    }

    #[test]
    fn test_cost_formula_two_rooms() {
        let inv = inventory(&[(100, 1, 0), (305, 3, 5)]);
        let outcome = run(&inv, 2, CrossFloorTieBreak::default());
        let allocation = outcome.allocation.unwrap();
        assert_eq!(ids(&allocation), vec![100, 305]);
        assert_eq!(allocation.cost(), TravelCost::new(4, 5));
        assert_eq!(allocation.kind(), AllocationKind::CrossFloor);
        assert_eq!(outcome.search_space, Some(1));
        assert!(outcome.aborted.is_none());
    }

    #[test]
    fn test_prefers_adjacent_floors_and_aligned_positions() {
        let inv = inventory(&[
            (101, 1, 1),
            (205, 2, 5),
            (301, 3, 1),
            (502, 5, 2),
            (601, 6, 1),
        ]);
        // 101 + 301 costs 4, 502 + 601 costs 2 + 1 = 3.
        let allocation = run(&inv, 2, CrossFloorTieBreak::default())
            .allocation
            .unwrap();
        assert_eq!(ids(&allocation), vec![502, 601]);
        assert_eq!(allocation.cost().total(), 3);
    }

    #[test]
    fn test_lower_average_floor_breaks_ties() {
        // {11, 12} (floors 3 and 4) and {21, 22} (floors 1 and 2) both cost 2.
        // The higher pair comes first in id order.
        let inv = inventory(&[(11, 3, 1), (12, 4, 1), (21, 1, 5), (22, 2, 5)]);
        let lower = run(&inv, 2, CrossFloorTieBreak::LowerAverageFloor)
            .allocation
            .unwrap();
        assert_eq!(ids(&lower), vec![21, 22]);

        let first = run(&inv, 2, CrossFloorTieBreak::FirstFound)
            .allocation
            .unwrap();
        assert_eq!(ids(&first), vec![11, 12]);
        assert_eq!(lower.cost(), first.cost());
    }

    #[test]
    fn test_exactly_k_rooms_returns_them_in_id_order() {
        let inv = inventory(&[
            (901, 9, 1),
            (105, 1, 5),
            (310, 3, 10),
            (502, 5, 2),
            (707, 7, 7),
        ]);
        let outcome = run(&inv, 5, CrossFloorTieBreak::default());
        assert_eq!(
            ids(&outcome.allocation.unwrap()),
            vec![105, 310, 502, 707, 901]
        );
        assert_eq!(outcome.subsets_evaluated, 1);
    }

    #[test]
    fn test_pruning_skips_dominated_prefixes() {
        // Four tight rooms on floors 1 and 2, then far away rooms with higher ids.
        // Every prefix pairing a near room with a far one is dominated.
        let inv = inventory(&[
            (101, 1, 1),
            (102, 1, 2),
            (201, 2, 1),
            (202, 2, 2),
            (703, 7, 11),
            (802, 8, 10),
            (901, 9, 9),
        ]);
        let outcome = run(&inv, 3, CrossFloorTieBreak::default());
        assert_eq!(outcome.allocation.unwrap().cost().total(), 3);
        assert!(outcome.prefixes_pruned > 0);
        assert!(outcome.subsets_evaluated < outcome.search_space.unwrap());
    }

    #[test]
    fn test_iteration_limit_returns_best_so_far() {
        let inv = inventory(&[(101, 1, 1), (901, 9, 9), (102, 1, 2), (202, 2, 2)]);
        let available: Vec<RoomIndex> = inv.available_indices().collect();
        let search = CrossFloorSearch::new(&inv, &available, CrossFloorTieBreak::default());
        assert_eq!(search.num_rooms(), 4);

        let mut limit = IterationLimitMonitor::<i64>::new(1);
        let outcome = search.run(2, &mut limit);
        // Only {101, 102} was evaluated.
        assert_eq!(outcome.subsets_evaluated, 1);
        assert_eq!(ids(&outcome.allocation.unwrap()), vec![101, 102]);
        assert_eq!(outcome.aborted.as_deref(), Some("iteration limit reached"));
    }

    #[test]
    fn test_zero_iteration_limit_finds_nothing() {
        let inv = inventory(&[(101, 1, 1), (201, 2, 1)]);
        let available: Vec<RoomIndex> = inv.available_indices().collect();
        let mut limit = IterationLimitMonitor::<i64>::new(0);
        let outcome = CrossFloorSearch::new(&inv, &available, CrossFloorTieBreak::default())
            .run(2, &mut limit);
        assert!(outcome.allocation.is_none());
        assert_eq!(outcome.subsets_evaluated, 0);
        assert!(outcome.aborted.is_some());
    }

    #[test]
    fn test_limit_equal_to_search_space_completes() {
        let inv = inventory(&[(101, 1, 1), (201, 2, 1), (301, 3, 1)]);
        let available: Vec<RoomIndex> = inv.available_indices().collect();
        let mut limit = IterationLimitMonitor::<i64>::new(3);
        let outcome = CrossFloorSearch::new(&inv, &available, CrossFloorTieBreak::FirstFound)
            .run(2, &mut limit);
        assert!(outcome.aborted.is_none());
        assert_eq!(ids(&outcome.allocation.unwrap()), vec![101, 201]);
    }
}
