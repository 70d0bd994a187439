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

//! # Standard Building Layout
//!
//! Generates the inventory of a regular building: every floor has the same
//! number of rooms, except for an optional top floor with a different count.
//! Positions are 1-based and a room's id is `floor * id_stride + position`,
//! which yields the familiar room numbers `101..=110` on floor one.
//!
//! The default layout is ten floors where floors 1 through 9 hold ten rooms
//! each and floor 10 holds seven rooms (ids `1001..=1007`), 97 rooms in total.

use crate::{
    inventory::{Inventory, InventoryBuilder, InventoryError},
    num::Coordinate,
    room::RoomId,
};

/// Configuration of a regular building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardLayout {
    floors: u64,
    rooms_per_floor: u64,
    top_floor_rooms: Option<u64>,
    id_stride: u64,
}

impl Default for StandardLayout {
    fn default() -> Self {
        Self {
            floors: 10,
            rooms_per_floor: 10,
            top_floor_rooms: Some(7),
            id_stride: 100,
        }
    }
}

impl StandardLayout {
    /// Creates a layout of `floors` floors with `rooms_per_floor` rooms each
    /// and the default id stride of `100`.
    #[inline]
    pub fn new(floors: u64, rooms_per_floor: u64) -> Self {
        Self {
            floors,
            rooms_per_floor,
            top_floor_rooms: None,
            id_stride: 100,
        }
    }

    /// Gives the top floor a different number of rooms.
    #[inline]
    pub fn top_floor_rooms(mut self, rooms: u64) -> Self {
        self.top_floor_rooms = Some(rooms);
        self
    }

    /// Sets the multiplier that encodes the floor into the room id.
    #[inline]
    pub fn id_stride(mut self, stride: u64) -> Self {
        self.id_stride = stride;
        self
    }

    /// Returns the number of floors.
    #[inline]
    pub fn num_floors(&self) -> u64 {
        self.floors
    }

    /// Returns the number of rooms on `floor` (1-based), or `0` outside the building.
    #[inline]
    pub fn rooms_on_floor(&self, floor: u64) -> u64 {
        match floor {
            0 => 0,
            f if f > self.floors => 0,
            f if f == self.floors => self.top_floor_rooms.unwrap_or(self.rooms_per_floor),
            _ => self.rooms_per_floor,
        }
    }

    /// Returns the total number of rooms in the building.
    #[inline]
    pub fn num_rooms(&self) -> u64 {
        (1..=self.floors).map(|f| self.rooms_on_floor(f)).sum()
    }

    /// Builds a fully vacant inventory, floor by floor and left to right.
    ///
    /// # Errors
    ///
    /// - `InventoryError::CoordinateOutOfRange` if a floor or position does not fit into `T`.
    /// - `InventoryError::DuplicateRoomId` if `rooms_per_floor >= id_stride`
    ///   makes ids of neighboring floors collide.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concierge_model::layout::StandardLayout;
    /// use concierge_model::room::RoomId;
    ///
    /// let inventory = StandardLayout::default().build::<i64>().unwrap();
    /// assert_eq!(inventory.num_rooms(), 97);
    /// assert_eq!(inventory.room_ids()[0], RoomId::new(101));
    /// assert_eq!(*inventory.room_ids().last().unwrap(), RoomId::new(1007));
    /// ```
    pub fn build<T>(&self) -> Result<Inventory<T>, InventoryError>
    where
        T: Coordinate,
    {
        let coordinate = |value: u64| {
            <T as num_traits::NumCast>::from(value)
                .ok_or(InventoryError::CoordinateOutOfRange { value })
        };

        let mut builder = InventoryBuilder::with_capacity(self.num_rooms() as usize);
        for floor in 1..=self.floors {
            let floor_coordinate = coordinate(floor)?;
            for position in 1..=self.rooms_on_floor(floor) {
                let id = floor
                    .checked_mul(self.id_stride)
                    .and_then(|v| v.checked_add(position))
                    .ok_or(InventoryError::CoordinateOutOfRange { value: floor })?;
                builder.add_room(RoomId::new(id), floor_coordinate, coordinate(position)?);
            }
        }
        builder.build()
    }
}

impl std::fmt::Display for StandardLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StandardLayout(floors: {}, rooms_per_floor: {}, top_floor_rooms: {}, rooms: {})",
            self.floors,
            self.rooms_per_floor,
            self.rooms_on_floor(self.floors),
            self.num_rooms()
        )
    }
}
