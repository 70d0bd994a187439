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

//! Allocation results.
//!
//! An `Allocation` is the set of rooms the allocator picked for one booking,
//! together with the strategy that produced it and the travel cost of the
//! group. Rooms are stored twice, once by `RoomId` for the caller and once by
//! `RoomIndex` for follow-up lookups in the `Inventory` the allocation was
//! computed on.

use crate::{index::RoomIndex, num::Coordinate, room::RoomId};

/// Which phase of the allocator produced an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationKind {
    /// All rooms lie on one floor, picked as the tightest horizontal window.
    SameFloor,
    /// The rooms span several floors, picked by exhaustive combination search.
    CrossFloor,
}

impl std::fmt::Display for AllocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationKind::SameFloor => write!(f, "same floor"),
            AllocationKind::CrossFloor => write!(f, "cross floor"),
        }
    }
}

/// The travel cost of a group of rooms.
///
/// The vertical part is the already weighted floor span, the horizontal part
/// the position span. The total is their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TravelCost<T> {
    vertical: T,
    horizontal: T,
}

impl<T> TravelCost<T>
where
    T: Coordinate,
{
    /// Creates a cost from its weighted vertical and horizontal parts.
    #[inline]
    pub fn new(vertical: T, horizontal: T) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// The cost of a group that needs no travel at all.
    #[inline]
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    #[inline]
    pub fn vertical(&self) -> T {
        self.vertical
    }

    #[inline]
    pub fn horizontal(&self) -> T {
        self.horizontal
    }

    /// Returns `vertical + horizontal`, saturating at `T::max_value()`.
    #[inline]
    pub fn total(&self) -> T {
        self.vertical.saturating_add(self.horizontal)
    }
}

impl<T> std::fmt::Display for TravelCost<T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (vertical {}, horizontal {})",
            self.total(),
            self.vertical,
            self.horizontal
        )
    }
}

/// The rooms selected for one booking.
///
/// `room_ids[i]` and `room_indices[i]` describe the same room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation<T> {
    room_ids: Vec<RoomId>,
    room_indices: Vec<RoomIndex>,
    kind: AllocationKind,
    cost: TravelCost<T>,
}

impl<T> Allocation<T>
where
    T: Coordinate,
{
    /// Constructs a new `Allocation`.
    ///
    /// # Panics
    ///
    /// Panics if `room_ids` and `room_indices` have different lengths.
    pub fn new(
        room_ids: Vec<RoomId>,
        room_indices: Vec<RoomIndex>,
        kind: AllocationKind,
        cost: TravelCost<T>,
    ) -> Self {
        assert_eq!(
            room_ids.len(),
            room_indices.len(),
            "called Allocation::new with inconsistent vector lengths: room_ids.len() = {}, room_indices.len() = {}",
            room_ids.len(),
            room_indices.len()
        );

        Self {
            room_ids,
            room_indices,
            kind,
            cost,
        }
    }

    /// Returns the number of allocated rooms.
    #[inline]
    pub fn len(&self) -> usize {
        self.room_ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.room_ids.is_empty()
    }

    /// Returns the ids of the allocated rooms.
    #[inline]
    pub fn room_ids(&self) -> &[RoomId] {
        &self.room_ids
    }

    /// Returns the inventory indices of the allocated rooms.
    #[inline]
    pub fn room_indices(&self) -> &[RoomIndex] {
        &self.room_indices
    }

    #[inline]
    pub fn kind(&self) -> AllocationKind {
        self.kind
    }

    #[inline]
    pub fn cost(&self) -> TravelCost<T> {
        self.cost
    }

    /// Returns `true` if the room with the given id is part of this allocation.
    #[inline]
    pub fn contains(&self, id: RoomId) -> bool {
        self.room_ids.contains(&id)
    }

    /// Consumes the allocation and returns the room ids.
    #[inline]
    pub fn into_room_ids(self) -> Vec<RoomId> {
        self.room_ids
    }
}

impl<T> std::fmt::Display for Allocation<T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allocation Summary")?;
        writeln!(f, "   Strategy:    {}", self.kind)?;
        writeln!(f, "   Travel Cost: {}", self.cost)?;
        writeln!(f)?;

        if self.is_empty() {
            writeln!(f, "   (No rooms allocated)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10}", "Room", "Index")?;
        writeln!(f, "   {:-<10}-+-{:-<10}", "", "")?;
        for (id, index) in self.room_ids.iter().zip(&self.room_indices) {
            writeln!(f, "   {:<10} | {:<10}", id.value(), index.get())?;
        }

        Ok(())
    }
}
