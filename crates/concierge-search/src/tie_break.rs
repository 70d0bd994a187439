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

//! # Cross-Floor Tie-Breaking
//!
//! Several cross-floor candidates can share the minimal travel cost. The
//! `CrossFloorTieBreak` policy decides which of them is kept.
//!
//! Candidates are always visited in the same canonical order, so every
//! policy is deterministic. Because all candidates of one search have the
//! same size, comparing floor sums is exactly comparing average floors, and
//! stays in integer arithmetic.

/// Decides between two cross-floor candidates of equal total cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrossFloorTieBreak {
    /// Prefer the candidate with the lower average floor. Remaining ties keep
    /// the candidate found first.
    #[default]
    LowerAverageFloor,
    /// Keep the candidate found first.
    FirstFound,
}

impl CrossFloorTieBreak {
    /// Returns `true` if a candidate with floor sum `candidate_floor_sum`
    /// should replace an incumbent of equal cost with floor sum
    /// `incumbent_floor_sum`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concierge_search::tie_break::CrossFloorTieBreak;
    ///
    /// assert!(CrossFloorTieBreak::LowerAverageFloor.prefers(4i64, 6i64));
    /// assert!(!CrossFloorTieBreak::LowerAverageFloor.prefers(6i64, 6i64));
    /// assert!(!CrossFloorTieBreak::FirstFound.prefers(4i64, 6i64));
    /// ```
    #[inline]
    pub fn prefers<S>(&self, candidate_floor_sum: S, incumbent_floor_sum: S) -> bool
    where
        S: PartialOrd,
    {
        match self {
            CrossFloorTieBreak::LowerAverageFloor => candidate_floor_sum < incumbent_floor_sum,
            CrossFloorTieBreak::FirstFound => false,
        }
    }

    /// Returns `true` if a candidate whose cost equals the incumbent's can
    /// still replace it. When this is `false`, a search may discard every
    /// candidate that merely ties the incumbent.
    #[inline]
    pub fn ties_can_replace(&self) -> bool {
        match self {
            CrossFloorTieBreak::LowerAverageFloor => true,
            CrossFloorTieBreak::FirstFound => false,
        }
    }
}

impl std::fmt::Display for CrossFloorTieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrossFloorTieBreak::LowerAverageFloor => write!(f, "LowerAverageFloor"),
            CrossFloorTieBreak::FirstFound => write!(f, "FirstFound"),
        }
    }
}
