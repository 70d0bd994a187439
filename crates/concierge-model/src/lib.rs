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

//! # Concierge Model
//!
//! **The room inventory model for the Concierge room allocator.**
//!
//! This crate describes the building (which rooms exist, on which floor and
//! at which horizontal position), which of those rooms are currently
//! occupied, what a booking request asks for and what an allocation returns.
//! It is the data interchange layer between the hosting service and the
//! allocator in `concierge_alloc`.
//!
//! ## Architecture
//!
//! * **`num`**: The `Coordinate` trait alias for floor and position types.
//! * **`index`**: `RoomIndex`, the strongly typed position of a room inside an `Inventory`.
//! * **`room`**: `RoomId` and the `Room` value object.
//! * **`inventory`**: `Inventory` (validated, SoA layout, bitset occupancy) and
//!   `InventoryBuilder`, plus the occupancy mutations a hosting service needs
//!   (book, release, reset, randomize).
//! * **`layout`**: `StandardLayout`, a configurable generator for regular buildings.
//! * **`loading`**: `InventoryLoader`, a text format reader.
//! * **`count`**: `RoomCount`, a validated number of requested rooms.
//! * **`allocation`**: `Allocation` and its `TravelCost`.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Room indices, room ids and coordinates are distinct types.
//! 2.  **Memory Layout**: Room attributes are stored as a structure of arrays so
//!     the allocator's hot loops touch only the columns they need.
//! 3.  **Fail-Fast**: Inventories are validated when built. An allocator never
//!     sees duplicate ids or two rooms sharing a position on one floor.

pub mod allocation;
pub mod count;
pub mod index;
pub mod inventory;
pub mod layout;
pub mod loading;
pub mod num;
pub mod room;
