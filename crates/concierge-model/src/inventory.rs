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

//! # Room Inventory
//!
//! The `Inventory` is the snapshot the allocator works on: every room's id,
//! floor and position, and which rooms are currently occupied.
//!
//! Construction goes through `InventoryBuilder`, which validates the two
//! structural invariants eagerly:
//!
//! - no two rooms share a `RoomId`,
//! - no two rooms share a position on the same floor.
//!
//! After construction the structure is fixed. Only occupancy changes, through
//! `book`, `release`, `reset` and `randomize_occupancy`. These are the
//! operations a hosting service performs between allocation calls; they take
//! `&mut self`, so the borrow checker already enforces a single writer while
//! any number of allocations may read the same snapshot concurrently.

use crate::{
    index::RoomIndex,
    num::Coordinate,
    room::{Room, RoomId},
};
use fixedbitset::FixedBitSet;
use rand::Rng;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Lower bound of the fraction of rooms `randomize_occupancy` marks occupied.
pub const RANDOM_OCCUPANCY_MIN: f64 = 0.3;
/// Upper bound (exclusive) of the fraction of rooms `randomize_occupancy` marks occupied.
pub const RANDOM_OCCUPANCY_MAX: f64 = 0.5;

/// Structural problems detected while building an `Inventory`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// Two rooms were registered with the same id.
    #[error("room id {id} is used by more than one room")]
    DuplicateRoomId { id: RoomId },
    /// Two rooms were registered on the same floor at the same position.
    #[error("rooms {first} and {second} share the same position on the same floor")]
    DuplicatePosition { first: RoomId, second: RoomId },
    /// A generated coordinate does not fit into the coordinate type.
    #[error("coordinate {value} does not fit into the coordinate type")]
    CoordinateOutOfRange { value: u64 },
}

/// Failures of occupancy mutations. A failed mutation leaves the inventory unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OccupancyError {
    /// The id does not belong to any room of the inventory.
    #[error("room {id} does not exist")]
    UnknownRoom { id: RoomId },
    /// The room is already occupied (or listed twice in the same booking).
    #[error("room {id} is already occupied")]
    AlreadyOccupied { id: RoomId },
}

/// The immutable structure and current occupancy of every room in a building.
///
/// Data is stored as a structure of arrays indexed by `RoomIndex`:
/// - `ids[r]`: the room's id,
/// - `floors[r]`: the room's floor,
/// - `positions[r]`: the room's horizontal position on its floor,
/// - `occupied[r]`: the occupancy bit.
///
/// Use `InventoryBuilder` (or `Inventory::from_rooms`) to obtain a validated instance.
#[derive(Clone)]
pub struct Inventory<T> {
    ids: Vec<RoomId>,
    floors: Vec<T>,
    positions: Vec<T>,
    occupied: FixedBitSet,
    lookup: FxHashMap<RoomId, RoomIndex>,
}

impl<T> Inventory<T>
where
    T: Coordinate,
{
    /// Builds an inventory from a slice of rooms, keeping their order and occupancy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concierge_model::inventory::Inventory;
    /// use concierge_model::room::{Room, RoomId};
    ///
    /// let rooms = [
    ///     Room::new(RoomId::new(101), 1i64, 1),
    ///     Room::new(RoomId::new(102), 1, 2).with_occupied(true),
    /// ];
    /// let inventory = Inventory::from_rooms(&rooms).unwrap();
    /// assert_eq!(inventory.num_rooms(), 2);
    /// assert_eq!(inventory.available_count(), 1);
    /// ```
    pub fn from_rooms(rooms: &[Room<T>]) -> Result<Self, InventoryError> {
        let mut builder = InventoryBuilder::with_capacity(rooms.len());
        for room in rooms {
            builder.add(*room);
        }
        builder.build()
    }

    /// Returns the number of rooms.
    #[inline]
    pub fn num_rooms(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the inventory contains no rooms.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of occupied rooms.
    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.occupied.count_ones(..)
    }

    /// Returns the number of rooms that can be booked.
    #[inline]
    pub fn available_count(&self) -> usize {
        self.num_rooms() - self.occupied_count()
    }

    /// Returns the indices of all vacant rooms in inventory order.
    #[inline]
    pub fn available_indices(&self) -> impl Iterator<Item = RoomIndex> + '_ {
        RoomIndex::range(self.num_rooms()).filter(|&r| !self.occupied.contains(r.get()))
    }

    /// Returns the index of the room with the given id.
    #[inline]
    pub fn index_of(&self, id: RoomId) -> Option<RoomIndex> {
        self.lookup.get(&id).copied()
    }

    /// Returns the room at `room_index` as a value.
    ///
    /// # Panics
    ///
    /// Panics if `room_index` is out of bounds.
    #[inline]
    pub fn room(&self, room_index: RoomIndex) -> Room<T> {
        let index = room_index.get();
        Room::new(self.ids[index], self.floors[index], self.positions[index])
            .with_occupied(self.occupied.contains(index))
    }

    /// Returns every room in inventory order.
    #[inline]
    pub fn rooms(&self) -> impl ExactSizeIterator<Item = Room<T>> + '_ {
        RoomIndex::range(self.num_rooms()).map(|r| self.room(r))
    }

    /// Returns the id of the room at `room_index`.
    ///
    /// # Panics
    ///
    /// Panics if `room_index` is out of bounds.
    #[inline]
    pub fn room_id(&self, room_index: RoomIndex) -> RoomId {
        let index = room_index.get();
        debug_assert!(
            index < self.num_rooms(),
            "called `Inventory::room_id` with room index out of bounds: the len is {} but the index is {}",
            self.num_rooms(),
            index
        );

        self.ids[index]
    }

    /// Returns the floor of the room at `room_index`.
    ///
    /// # Panics
    ///
    /// Panics if `room_index` is out of bounds.
    #[inline]
    pub fn room_floor(&self, room_index: RoomIndex) -> T {
        let index = room_index.get();
        debug_assert!(
            index < self.num_rooms(),
            "called `Inventory::room_floor` with room index out of bounds: the len is {} but the index is {}",
            self.num_rooms(),
            index
        );

        self.floors[index]
    }

    /// Returns the horizontal position of the room at `room_index`.
    ///
    /// # Panics
    ///
    /// Panics if `room_index` is out of bounds.
    #[inline]
    pub fn room_position(&self, room_index: RoomIndex) -> T {
        let index = room_index.get();
        debug_assert!(
            index < self.num_rooms(),
            "called `Inventory::room_position` with room index out of bounds: the len is {} but the index is {}",
            self.num_rooms(),
            index
        );

        self.positions[index]
    }

    /// Returns `true` if the room at `room_index` is occupied.
    #[inline]
    pub fn is_occupied(&self, room_index: RoomIndex) -> bool {
        self.occupied.contains(room_index.get())
    }

    /// Returns a slice of all room ids in inventory order.
    #[inline]
    pub fn room_ids(&self) -> &[RoomId] {
        &self.ids
    }

    /// Returns the distinct floors of the building in ascending order.
    pub fn floors(&self) -> Vec<T> {
        let mut floors = self.floors.clone();
        floors.sort_unstable();
        floors.dedup();
        floors
    }

    /// Sets the occupancy of a single room.
    ///
    /// # Panics
    ///
    /// Panics if `room_index` is out of bounds.
    #[inline]
    pub fn set_occupied(&mut self, room_index: RoomIndex, occupied: bool) {
        self.occupied.set(room_index.get(), occupied);
    }

    /// Marks the given rooms as occupied.
    ///
    /// The operation is all-or-nothing: if any id is unknown, already
    /// occupied or listed twice, nothing changes and the first offending id
    /// is reported.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concierge_model::inventory::{Inventory, OccupancyError};
    /// use concierge_model::layout::StandardLayout;
    /// use concierge_model::room::RoomId;
    ///
    /// let mut inventory: Inventory<i64> = StandardLayout::default().build().unwrap();
    /// inventory.book(&[RoomId::new(101), RoomId::new(102)]).unwrap();
    /// assert_eq!(inventory.occupied_count(), 2);
    ///
    /// let err = inventory.book(&[RoomId::new(103), RoomId::new(101)]).unwrap_err();
    /// assert_eq!(err, OccupancyError::AlreadyOccupied { id: RoomId::new(101) });
    /// assert_eq!(inventory.occupied_count(), 2);
    /// ```
    pub fn book(&mut self, ids: &[RoomId]) -> Result<(), OccupancyError> {
        let indices = self.resolve(ids)?;
        for (pos, (&id, &index)) in ids.iter().zip(indices.iter()).enumerate() {
            if self.is_occupied(index) || indices[..pos].contains(&index) {
                return Err(OccupancyError::AlreadyOccupied { id });
            }
        }
        for index in indices {
            self.occupied.insert(index.get());
        }
        Ok(())
    }

    /// Marks the given rooms as vacant.
    ///
    /// Releasing an already vacant room is a no-op. If any id is unknown,
    /// nothing changes.
    pub fn release(&mut self, ids: &[RoomId]) -> Result<(), OccupancyError> {
        let indices = self.resolve(ids)?;
        for index in indices {
            self.occupied.set(index.get(), false);
        }
        Ok(())
    }

    /// Marks every room as vacant.
    #[inline]
    pub fn reset(&mut self) {
        self.occupied.clear();
    }

    /// Replaces the current occupancy with a random one.
    ///
    /// A fraction `p` is drawn uniformly from
    /// `[RANDOM_OCCUPANCY_MIN, RANDOM_OCCUPANCY_MAX)` and exactly
    /// `floor(num_rooms * p)` distinct rooms, chosen uniformly, are marked
    /// occupied. Every other room becomes vacant. Returns the number of
    /// occupied rooms.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concierge_model::inventory::Inventory;
    /// use concierge_model::layout::StandardLayout;
    /// use rand::{SeedableRng, rngs::StdRng};
    ///
    /// let mut inventory: Inventory<i64> = StandardLayout::default().build().unwrap();
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let occupied = inventory.randomize_occupancy(&mut rng);
    /// assert!((29..=48).contains(&occupied));
    /// assert_eq!(inventory.occupied_count(), occupied);
    /// ```
    pub fn randomize_occupancy<R>(&mut self, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        let n = self.num_rooms();
        let fraction = rng.random_range(RANDOM_OCCUPANCY_MIN..RANDOM_OCCUPANCY_MAX);
        let amount = ((n as f64) * fraction).floor() as usize;

        self.occupied.clear();
        for index in rand::seq::index::sample(rng, n, amount) {
            self.occupied.insert(index);
        }
        amount
    }

    fn resolve(&self, ids: &[RoomId]) -> Result<SmallVec<[RoomIndex; 8]>, OccupancyError> {
        ids.iter()
            .map(|&id| self.index_of(id).ok_or(OccupancyError::UnknownRoom { id }))
            .collect()
    }
}

impl<T> std::fmt::Debug for Inventory<T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inventory")
            .field("ids", &self.ids)
            .field("floors", &self.floors)
            .field("positions", &self.positions)
            .field("occupied", &self.occupied.ones().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> std::fmt::Display for Inventory<T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Inventory(rooms: {}, floors: {}, available: {})",
            self.num_rooms(),
            self.floors().len(),
            self.available_count()
        )
    }
}

/// Collects rooms and validates them into an `Inventory`.
///
/// Rooms keep the order in which they were added. Validation happens in
/// `build`, so rooms can be added in any order.
#[derive(Clone, Debug)]
pub struct InventoryBuilder<T> {
    rooms: Vec<Room<T>>,
}

impl<T> Default for InventoryBuilder<T>
where
    T: Coordinate,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InventoryBuilder<T>
where
    T: Coordinate,
{
    /// Creates an empty builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concierge_model::inventory::InventoryBuilder;
    /// use concierge_model::room::RoomId;
    ///
    /// let mut builder = InventoryBuilder::<i64>::new();
    /// builder
    ///     .add_room(RoomId::new(101), 1, 1)
    ///     .add_room(RoomId::new(102), 1, 2)
    ///     .add_occupied_room(RoomId::new(201), 2, 1);
    /// let inventory = builder.build().unwrap();
    /// assert_eq!(inventory.num_rooms(), 3);
    /// assert_eq!(inventory.available_count(), 2);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self { rooms: Vec::new() }
    }

    /// Creates an empty builder with room for `capacity` rooms.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rooms: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of rooms added so far.
    #[inline]
    pub fn num_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// Adds a room value, including its occupancy.
    #[inline]
    pub fn add(&mut self, room: Room<T>) -> &mut Self {
        self.rooms.push(room);
        self
    }

    /// Adds a vacant room.
    #[inline]
    pub fn add_room(&mut self, id: RoomId, floor: T, position: T) -> &mut Self {
        self.add(Room::new(id, floor, position))
    }

    /// Adds an occupied room.
    #[inline]
    pub fn add_occupied_room(&mut self, id: RoomId, floor: T, position: T) -> &mut Self {
        self.add(Room::new(id, floor, position).with_occupied(true))
    }

    /// Validates the collected rooms and builds the `Inventory`.
    ///
    /// # Errors
    ///
    /// - `InventoryError::DuplicateRoomId` if two rooms share an id.
    /// - `InventoryError::DuplicatePosition` if two rooms share a position on one floor.
    pub fn build(self) -> Result<Inventory<T>, InventoryError> {
        let n = self.rooms.len();
        let mut lookup = FxHashMap::with_capacity_and_hasher(n, Default::default());
        let mut slots: FxHashMap<(T, T), RoomId> =
            FxHashMap::with_capacity_and_hasher(n, Default::default());

        let mut ids = Vec::with_capacity(n);
        let mut floors = Vec::with_capacity(n);
        let mut positions = Vec::with_capacity(n);
        let mut occupied = FixedBitSet::with_capacity(n);

        for (index, room) in self.rooms.iter().enumerate() {
            if lookup.insert(room.id(), RoomIndex::new(index)).is_some() {
                return Err(InventoryError::DuplicateRoomId { id: room.id() });
            }
            if let Some(&first) = slots.get(&(room.floor(), room.position())) {
                return Err(InventoryError::DuplicatePosition {
                    first,
                    second: room.id(),
                });
            }
            slots.insert((room.floor(), room.position()), room.id());

            ids.push(room.id());
            floors.push(room.floor());
            positions.push(room.position());
            occupied.set(index, room.is_occupied());
        }

        Ok(Inventory {
            ids,
            floors,
            positions,
            occupied,
            lookup,
        })
    }
}
