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

//! # Concierge Core
//!
//! Foundational building blocks shared by the Concierge room allocation
//! crates. Nothing in here knows about hotels; the crate only provides the
//! primitives that the model and the allocator are written against.
//!
//! ## Modules
//!
//! - `algorithm`: Combinatorial helpers, most notably the streaming,
//!   prefix-skippable k-combination generator `Combinations` and the
//!   checked `binomial` used to size a search space up front.
//! - `utils`: Phantom-tagged indices (`TypedIndex<T>`) that keep room
//!   indices from being confused with positions, floors or ids.

pub mod algorithm;
pub mod utils;
