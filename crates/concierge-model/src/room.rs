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

use crate::num::Coordinate;

/// The globally unique identifier of a room.
///
/// Hotels usually encode floor and position in the room number (room `305`
/// is the fifth room on floor three). The allocator never decodes that; it
/// relies on ids only for uniqueness and for a canonical enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(u64);

impl RoomId {
    /// Creates a new `RoomId`.
    ///
    /// # Examples
    ///
    /// ```
    /// use concierge_model::room::RoomId;
    ///
    /// let id = RoomId::new(305);
    /// assert_eq!(id.value(), 305);
    /// ```
    #[inline]
    pub const fn new(id: u64) -> Self {
        RoomId(id)
    }

    /// Returns the underlying `u64` value of the id.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RoomId {
    /// Formats the id as the bare room number, e.g. `305`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RoomId {
    #[inline]
    fn from(id: u64) -> Self {
        RoomId(id)
    }
}

impl From<RoomId> for u64 {
    #[inline]
    fn from(id: RoomId) -> Self {
        id.0
    }
}

/// A single room as seen at one point in time.
///
/// `Room` is a value object. Changing its occupancy inside an `Inventory`
/// goes through the inventory's mutation methods; a `Room` obtained from an
/// inventory is a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Room<T> {
    id: RoomId,
    floor: T,
    position: T,
    occupied: bool,
}

impl<T> Room<T>
where
    T: Coordinate,
{
    /// Creates a vacant room.
    ///
    /// # Examples
    ///
    /// ```
    /// use concierge_model::room::{Room, RoomId};
    ///
    /// let room = Room::new(RoomId::new(101), 1i64, 1);
    /// assert!(!room.is_occupied());
    /// assert!(room.with_occupied(true).is_occupied());
    /// ```
    #[inline]
    pub fn new(id: RoomId, floor: T, position: T) -> Self {
        Self {
            id,
            floor,
            position,
            occupied: false,
        }
    }

    /// Returns a copy of this room with the given occupancy.
    #[inline]
    pub fn with_occupied(mut self, occupied: bool) -> Self {
        self.occupied = occupied;
        self
    }

    #[inline]
    pub fn id(&self) -> RoomId {
        self.id
    }

    #[inline]
    pub fn floor(&self) -> T {
        self.floor
    }

    #[inline]
    pub fn position(&self) -> T {
        self.position
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Returns `true` if the room can be booked.
    #[inline]
    pub fn is_available(&self) -> bool {
        !self.occupied
    }
}

impl<T> std::fmt::Display for Room<T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Room {} (floor {}, position {}, {})",
            self.id,
            self.floor,
            self.position,
            if self.occupied { "occupied" } else { "vacant" }
        )
    }
}
