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

//! # Concierge Allocator
//!
//! **Same-floor first, travel-minimizing hotel room allocation.**
//!
//! Given a snapshot of a building's rooms and a request for one to five
//! rooms, the allocator picks the group of available rooms that keeps the
//! guests closest together:
//!
//! * If some floor has enough available rooms, the tightest run of rooms on
//!   a single floor wins (lowest floor, then leftmost run, on ties).
//! * Otherwise every combination of available rooms is a candidate, and the
//!   one with the smallest bounding box wins, where each floor of vertical
//!   travel counts twice as much as one position of horizontal travel.
//!
//! ## Modules
//!
//! * **`allocator`**: `Allocator`, its builder and the `allocate` function.
//! * **`same_floor`**: The single-floor sliding window pass.
//! * **`cross_floor`**: The exhaustive, pruned combination search.
//! * **`cost`**: The travel cost model.
//!
//! ## Usage
//!
//! ```rust
//! use concierge_alloc::allocator::allocate;
//! use concierge_model::{layout::StandardLayout, room::RoomId};
//!
//! let mut inventory = StandardLayout::default().build::<i64>().unwrap();
//! let rooms = allocate(&inventory, 4);
//! assert_eq!(rooms.len(), 4);
//! inventory.book(&rooms).unwrap();
//! assert_eq!(inventory.available_count(), 93);
//! ```

pub mod allocator;
pub mod cost;
pub mod cross_floor;
pub mod same_floor;
