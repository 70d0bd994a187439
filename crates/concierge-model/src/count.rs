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

//! # Requested Room Count
//!
//! A booking request asks for between `RoomCount::MIN` and `RoomCount::MAX`
//! rooms. `RoomCount` can only be constructed inside that range, so code that
//! holds one never has to re-check it.

/// The number of rooms a booking request asks for, validated to `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomCount(usize);

/// The error returned when a requested count falls outside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "invalid room count {requested}: a booking must request between {min} and {max} rooms",
    min = RoomCount::MIN,
    max = RoomCount::MAX
)]
pub struct RoomCountError {
    pub requested: usize,
}

impl RoomCount {
    /// The smallest number of rooms a booking may request.
    pub const MIN: usize = 1;
    /// The largest number of rooms a booking may request.
    pub const MAX: usize = 5;

    /// Creates a new `RoomCount` if `count` lies within `MIN..=MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use concierge_model::count::RoomCount;
    ///
    /// assert_eq!(RoomCount::new(3).map(|c| c.get()), Some(3));
    /// assert!(RoomCount::new(0).is_none());
    /// assert!(RoomCount::new(6).is_none());
    /// ```
    #[inline]
    pub const fn new(count: usize) -> Option<Self> {
        if count >= Self::MIN && count <= Self::MAX {
            Some(RoomCount(count))
        } else {
            None
        }
    }

    /// Returns the number of rooms.
    #[inline]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for RoomCount {
    type Error = RoomCountError;

    #[inline]
    fn try_from(requested: usize) -> Result<Self, Self::Error> {
        RoomCount::new(requested).ok_or(RoomCountError { requested })
    }
}

impl From<RoomCount> for usize {
    #[inline]
    fn from(count: RoomCount) -> Self {
        count.0
    }
}

impl std::fmt::Display for RoomCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
