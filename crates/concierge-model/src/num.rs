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

//! # Coordinate Trait
//!
//! Floors and positions are generic over signed primitive integers, the same
//! way the rest of the workspace stays generic over its numeric types.
//! `Coordinate` collects the required bounds into a single alias.

use num_traits::{PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for the integer type used for floors and positions.
///
/// This is implemented for every signed primitive integer (`i8` to `i128`
/// and `isize`).
pub trait Coordinate:
    PrimInt + Signed + Hash + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}

impl<T> Coordinate for T where
    T: PrimInt + Signed + Hash + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}
