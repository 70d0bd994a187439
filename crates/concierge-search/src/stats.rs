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

/// Statistics collected during one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationStatistics {
    /// Number of rooms that were available when the allocation started.
    pub available_rooms: usize,
    /// Number of same-floor windows whose span was compared.
    pub windows_evaluated: u64,
    /// Number of cross-floor subsets whose cost was computed.
    pub subsets_evaluated: u64,
    /// Number of times a prefix was cut because it could not beat the incumbent.
    pub prefixes_pruned: u64,
    /// Number of times a better allocation replaced the incumbent.
    pub improvements: u64,
    /// Number of cross-floor subsets an unpruned search would visit.
    /// `None` if the search did not reach the cross-floor phase or the count
    /// does not fit into a `u64`.
    pub search_space: Option<u64>,
    /// Total duration of the allocation.
    pub duration: std::time::Duration,
}

impl std::fmt::Display for AllocationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allocation Statistics:")?;
        writeln!(f, "  Available Rooms: {}", self.available_rooms)?;
        writeln!(f, "  Windows Evaluated: {}", self.windows_evaluated)?;
        writeln!(f, "  Subsets Evaluated: {}", self.subsets_evaluated)?;
        writeln!(f, "  Prefixes Pruned: {}", self.prefixes_pruned)?;
        writeln!(f, "  Improvements: {}", self.improvements)?;
        match self.search_space {
            Some(size) => writeln!(f, "  Search Space: {}", size)?,
            None => writeln!(f, "  Search Space: n/a")?,
        }
        writeln!(
            f,
            "  Duration (secs): {:.3}",
            self.duration.as_secs_f64()
        )
    }
}

/// Builder for `AllocationStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationStatisticsBuilder {
    available_rooms: usize,
    windows_evaluated: u64,
    subsets_evaluated: u64,
    prefixes_pruned: u64,
    improvements: u64,
    search_space: Option<u64>,
    duration: std::time::Duration,
}

impl Default for AllocationStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationStatisticsBuilder {
    /// Creates a new builder with every counter at zero.
    #[inline]
    pub fn new() -> Self {
        Self {
            available_rooms: 0,
            windows_evaluated: 0,
            subsets_evaluated: 0,
            prefixes_pruned: 0,
            improvements: 0,
            search_space: None,
            duration: std::time::Duration::ZERO,
        }
    }

    #[inline]
    pub fn available_rooms(mut self, available_rooms: usize) -> Self {
        self.available_rooms = available_rooms;
        self
    }

    #[inline]
    pub fn windows_evaluated(mut self, windows_evaluated: u64) -> Self {
        self.windows_evaluated = windows_evaluated;
        self
    }

    #[inline]
    pub fn subsets_evaluated(mut self, subsets_evaluated: u64) -> Self {
        self.subsets_evaluated = subsets_evaluated;
        self
    }

    #[inline]
    pub fn prefixes_pruned(mut self, prefixes_pruned: u64) -> Self {
        self.prefixes_pruned = prefixes_pruned;
        self
    }

    #[inline]
    pub fn improvements(mut self, improvements: u64) -> Self {
        self.improvements = improvements;
        self
    }

    #[inline]
    pub fn search_space(mut self, search_space: Option<u64>) -> Self {
        self.search_space = search_space;
        self
    }

    #[inline]
    pub fn duration(mut self, duration: std::time::Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Builds the `AllocationStatistics` instance.
    #[inline]
    pub fn build(self) -> AllocationStatistics {
        AllocationStatistics {
            available_rooms: self.available_rooms,
            windows_evaluated: self.windows_evaluated,
            subsets_evaluated: self.subsets_evaluated,
            prefixes_pruned: self.prefixes_pruned,
            improvements: self.improvements,
            search_space: self.search_space,
            duration: self.duration,
        }
    }
}
