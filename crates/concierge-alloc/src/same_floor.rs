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

//! # Same-Floor Search
//!
//! Finds the tightest group of `k` available rooms on a single floor. On each
//! floor the available rooms are sorted by position and a window of `k`
//! consecutive rooms slides over them; the window's cost is the distance
//! between its outer rooms. Any `k` rooms on a floor span at least as much
//! as the window between the outermost of them, so only contiguous windows
//! need to be considered.
//!
//! Floors are visited in ascending order and windows from left to right. A
//! window only replaces the best one when it is strictly tighter, so ties go
//! to the lowest floor and then to the leftmost window.

use concierge_model::{
    allocation::{Allocation, AllocationKind, TravelCost},
    index::RoomIndex,
    inventory::Inventory,
    num::Coordinate,
};

/// What the same-floor pass found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SameFloorOutcome<T> {
    /// The tightest window, rooms ordered by position. `None` if no floor has
    /// `k` available rooms.
    pub allocation: Option<Allocation<T>>,
    /// The number of windows compared.
    pub windows_evaluated: u64,
}

/// Runs the same-floor pass over the `available` rooms of `inventory`.
///
/// # Panics
///
/// In debug builds, panics if `k == 0`.
pub fn search<T>(inventory: &Inventory<T>, available: &[RoomIndex], k: usize) -> SameFloorOutcome<T>
where
    T: Coordinate,
{
    debug_assert!(k > 0, "called `same_floor::search` with an empty request");

    let mut rooms = available.to_vec();
    rooms.sort_unstable_by_key(|&r| (inventory.room_floor(r), inventory.room_position(r)));

    let mut windows_evaluated = 0u64;
    // Offset of the best window's first room in `rooms` and its span.
    let mut best: Option<(usize, T)> = None;

    let mut floor_start = 0;
    for floor_rooms in rooms.chunk_by(|&a, &b| inventory.room_floor(a) == inventory.room_floor(b)) {
        if floor_rooms.len() >= k {
            for (offset, window) in floor_rooms.windows(k).enumerate() {
                windows_evaluated += 1;
                let span = inventory
                    .room_position(window[k - 1])
                    .saturating_sub(inventory.room_position(window[0]));
                if best.is_none_or(|(_, best_span)| span < best_span) {
                    best = Some((floor_start + offset, span));
                }
            }
        }
        floor_start += floor_rooms.len();
    }

    let allocation = best.map(|(start, span)| {
        let indices = rooms[start..start + k].to_vec();
        let ids = indices.iter().map(|&r| inventory.room_id(r)).collect();
        Allocation::new(
            ids,
            indices,
            AllocationKind::SameFloor,
            TravelCost::new(T::zero(), span),
        )
    });

    SameFloorOutcome {
        allocation,
        windows_evaluated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_model::{inventory::InventoryBuilder, room::RoomId};

    fn ids(allocation: &Allocation<i64>) -> Vec<u64> {
        allocation.room_ids().iter().map(|id| id.value()).collect()
    }

    fn all_available(inventory: &Inventory<i64>) -> Vec<RoomIndex> {
        inventory.available_indices().collect()
    }

    #[test]
    fn test_picks_tightest_window_leftmost_on_tie() {
        // Positions 1, 2, 5, 6: windows [1,2,5] and [2,5,6] both span 4.
        let mut builder = InventoryBuilder::<i64>::new();
        for p in [6, 1, 5, 2] {
            builder.add_room(RoomId::new(100 + p as u64), 1, p);
        }
        let inventory = builder.build().unwrap();

        let outcome = search(&inventory, &all_available(&inventory), 3);
        let allocation = outcome.allocation.expect("floor has three rooms");
        assert_eq!(ids(&allocation), vec![101, 102, 105]);
        assert_eq!(allocation.cost().total(), 4);
        assert_eq!(allocation.kind(), AllocationKind::SameFloor);
        assert_eq!(outcome.windows_evaluated, 2);
    }

    #[test]
    fn test_lower_floor_wins_ties_across_floors() {
        let mut builder = InventoryBuilder::<i64>::new();
        builder
            .add_room(RoomId::new(301), 3, 1)
            .add_room(RoomId::new(302), 3, 2)
            .add_room(RoomId::new(205), 2, 5)
            .add_room(RoomId::new(206), 2, 6);
        let inventory = builder.build().unwrap();

        let allocation = search(&inventory, &all_available(&inventory), 2)
            .allocation
            .unwrap();
        assert_eq!(ids(&allocation), vec![205, 206]);
    }

    #[test]
    fn test_tighter_window_on_higher_floor_wins() {
        let mut builder = InventoryBuilder::<i64>::new();
        builder
            .add_room(RoomId::new(101), 1, 1)
            .add_room(RoomId::new(104), 1, 4)
            .add_room(RoomId::new(907), 9, 7)
            .add_room(RoomId::new(908), 9, 8);
        let inventory = builder.build().unwrap();

        let allocation = search(&inventory, &all_available(&inventory), 2)
            .allocation
            .unwrap();
        assert_eq!(ids(&allocation), vec![907, 908]);
        assert_eq!(allocation.cost().total(), 1);
    }

    #[test]
    fn test_only_given_rooms_are_considered() {
        let mut builder = InventoryBuilder::<i64>::new();
        builder
            .add_room(RoomId::new(101), 1, 1)
            .add_room(RoomId::new(102), 1, 2)
            .add_room(RoomId::new(110), 1, 10);
        let inventory = builder.build().unwrap();

        let available = [RoomIndex::new(0), RoomIndex::new(2)];
        let allocation = search(&inventory, &available, 2).allocation.unwrap();
        assert_eq!(ids(&allocation), vec![101, 110]);
        assert_eq!(allocation.cost().horizontal(), 9);
    }

    #[test]
    fn test_no_floor_with_enough_rooms() {
        let mut builder = InventoryBuilder::<i64>::new();
        builder
            .add_room(RoomId::new(101), 1, 1)
            .add_room(RoomId::new(201), 2, 1);
        let inventory = builder.build().unwrap();

        let outcome = search(&inventory, &all_available(&inventory), 2);
        assert!(outcome.allocation.is_none());
        assert_eq!(outcome.windows_evaluated, 0);
    }

    #[test]
    fn test_single_room_request_takes_first_room_of_lowest_floor() {
        let mut builder = InventoryBuilder::<i64>::new();
        builder
            .add_room(RoomId::new(203), 2, 3)
            .add_room(RoomId::new(105), 1, 5)
            .add_room(RoomId::new(102), 1, 2);
        let inventory = builder.build().unwrap();

        let allocation = search(&inventory, &all_available(&inventory), 1)
            .allocation
            .unwrap();
        assert_eq!(ids(&allocation), vec![102]);
        assert_eq!(allocation.cost().total(), 0);
    }
}
