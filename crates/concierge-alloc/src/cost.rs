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

//! # Travel Cost
//!
//! The cost of a group of rooms is the size of its bounding box, with floors
//! weighted higher than positions because moving between floors is slower:
//!
//! ```text
//! vertical   = (max floor - min floor) * VERTICAL_WEIGHT
//! horizontal =  max position - min position
//! total      =  vertical + horizontal
//! ```
//!
//! The horizontal part is the width of the box across all floors, not the sum
//! of per-floor widths. Adding a room to a group can only grow its box, so the
//! cost of a group is never smaller than the cost of any of its subsets. The
//! cross-floor search relies on this to prune prefixes.
//!
//! All terms saturate at `T::max_value()`, so a box too large for `T` costs
//! the maximum instead of overflowing. Saturation keeps the cost monotone.

use concierge_model::{
    allocation::TravelCost, index::RoomIndex, inventory::Inventory, num::Coordinate,
};

/// The weight of one floor of vertical travel, in positions.
pub const VERTICAL_WEIGHT: u8 = 2;

#[inline(always)]
fn vertical_weight<T: Coordinate>() -> T {
    T::one() + T::one()
}

/// The running bounding box of a group of rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox<T> {
    min_floor: T,
    max_floor: T,
    min_position: T,
    max_position: T,
    floor_sum: T,
}

impl<T> BoundingBox<T>
where
    T: Coordinate,
{
    /// Creates the box of a single room.
    #[inline]
    pub fn new(floor: T, position: T) -> Self {
        Self {
            min_floor: floor,
            max_floor: floor,
            min_position: position,
            max_position: position,
            floor_sum: floor,
        }
    }

    /// Grows the box to contain another room.
    #[inline(always)]
    pub fn extend(&mut self, floor: T, position: T) {
        self.min_floor = self.min_floor.min(floor);
        self.max_floor = self.max_floor.max(floor);
        self.min_position = self.min_position.min(position);
        self.max_position = self.max_position.max(position);
        self.floor_sum = self.floor_sum.saturating_add(floor);
    }

    #[inline]
    pub fn floor_span(&self) -> T {
        self.max_floor.saturating_sub(self.min_floor)
    }

    #[inline]
    pub fn position_span(&self) -> T {
        self.max_position.saturating_sub(self.min_position)
    }

    /// The sum of the floors of all rooms added so far, counting duplicates.
    #[inline]
    pub fn floor_sum(&self) -> T {
        self.floor_sum
    }

    #[inline(always)]
    pub fn cost(&self) -> TravelCost<T> {
        let vertical = self
            .floor_span()
            .checked_mul(&vertical_weight::<T>())
            .unwrap_or_else(T::max_value);
        TravelCost::new(vertical, self.position_span())
    }
}

/// Computes the travel cost of the given rooms, or `None` if `rooms` is empty.
///
/// # Examples
///
/// ```rust
/// use concierge_alloc::cost::travel_cost;
/// use concierge_model::{index::RoomIndex, inventory::InventoryBuilder, room::RoomId};
///
/// let mut builder = InventoryBuilder::<i64>::new();
/// builder
///     .add_room(RoomId::new(100), 1, 0)
///     .add_room(RoomId::new(305), 3, 5);
/// let inventory = builder.build().unwrap();
///
/// let cost = travel_cost(&inventory, &[RoomIndex::new(0), RoomIndex::new(1)]).unwrap();
/// assert_eq!(cost.vertical(), 4);
/// assert_eq!(cost.horizontal(), 5);
/// assert_eq!(cost.total(), 9);
/// ```
pub fn travel_cost<T>(inventory: &Inventory<T>, rooms: &[RoomIndex]) -> Option<TravelCost<T>>
where
    T: Coordinate,
{
    let (&first, rest) = rooms.split_first()?;
    let mut bbox = BoundingBox::new(inventory.room_floor(first), inventory.room_position(first));
    for &room in rest {
        bbox.extend(inventory.room_floor(room), inventory.room_position(room));
    }
    Some(bbox.cost())
}
