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

use crate::stats::AllocationStatistics;
use concierge_model::{
    allocation::Allocation,
    count::{RoomCount, RoomCountError},
    num::Coordinate,
};

/// What an allocation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationResult<T> {
    /// Fewer rooms are available than were requested.
    Infeasible,
    /// An allocation was found and proven to be the best one.
    Optimal(Allocation<T>),
    /// An allocation was found, but the search stopped before proving it best.
    Feasible(Allocation<T>),
    /// The search stopped before evaluating any candidate.
    Unknown,
}

impl<T> AllocationResult<T> {
    /// Returns the allocation, if any.
    #[inline]
    pub fn allocation(&self) -> Option<&Allocation<T>> {
        match self {
            AllocationResult::Optimal(allocation) | AllocationResult::Feasible(allocation) => {
                Some(allocation)
            }
            AllocationResult::Infeasible | AllocationResult::Unknown => None,
        }
    }

    /// Consumes the result and returns the allocation, if any.
    #[inline]
    pub fn into_allocation(self) -> Option<Allocation<T>> {
        match self {
            AllocationResult::Optimal(allocation) | AllocationResult::Feasible(allocation) => {
                Some(allocation)
            }
            AllocationResult::Infeasible | AllocationResult::Unknown => None,
        }
    }
}

impl<T> std::fmt::Display for AllocationResult<T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationResult::Infeasible => write!(f, "Infeasible"),
            AllocationResult::Optimal(allocation) => {
                write!(f, "Optimal(cost={})", allocation.cost().total())
            }
            AllocationResult::Feasible(allocation) => {
                write!(f, "Feasible(cost={})", allocation.cost().total())
            }
            AllocationResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search completed and the allocation is the best one.
    OptimalityProven,
    /// There are not enough available rooms.
    InfeasibilityProven,
    /// A search limit (time, iterations) stopped the search.
    /// The string names the limit.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The complete outcome of one allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome<T> {
    pub result: AllocationResult<T>,
    pub reason: TerminationReason,
    pub statistics: AllocationStatistics,
}

impl<T> AllocationOutcome<T>
where
    T: Coordinate,
{
    #[inline]
    pub fn new(
        result: AllocationResult<T>,
        reason: TerminationReason,
        statistics: AllocationStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn optimal(allocation: Allocation<T>, statistics: AllocationStatistics) -> Self {
        Self::new(
            AllocationResult::Optimal(allocation),
            TerminationReason::OptimalityProven,
            statistics,
        )
    }

    #[inline]
    pub fn feasible(
        allocation: Allocation<T>,
        reason: String,
        statistics: AllocationStatistics,
    ) -> Self {
        Self::new(
            AllocationResult::Feasible(allocation),
            TerminationReason::Aborted(reason),
            statistics,
        )
    }

    #[inline]
    pub fn infeasible(statistics: AllocationStatistics) -> Self {
        Self::new(
            AllocationResult::Infeasible,
            TerminationReason::InfeasibilityProven,
            statistics,
        )
    }

    #[inline]
    pub fn unknown(reason: String, statistics: AllocationStatistics) -> Self {
        Self::new(
            AllocationResult::Unknown,
            TerminationReason::Aborted(reason),
            statistics,
        )
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, AllocationResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, AllocationResult::Feasible(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, AllocationResult::Infeasible)
    }

    #[inline]
    pub fn has_allocation(&self) -> bool {
        self.result.allocation().is_some()
    }

    #[inline]
    pub fn allocation(&self) -> Option<&Allocation<T>> {
        self.result.allocation()
    }

    /// Converts the outcome into the tagged result of a request for
    /// `requested` rooms. A best-so-far allocation of an aborted search is
    /// returned as `Ok`.
    pub fn into_result(self, requested: RoomCount) -> Result<Allocation<T>, AllocationError> {
        match self.result {
            AllocationResult::Optimal(allocation) | AllocationResult::Feasible(allocation) => {
                Ok(allocation)
            }
            AllocationResult::Infeasible => Err(AllocationError::Infeasible {
                requested: requested.get(),
                available: self.statistics.available_rooms,
            }),
            AllocationResult::Unknown => Err(AllocationError::Aborted {
                reason: match self.reason {
                    TerminationReason::Aborted(reason) => reason,
                    other => other.to_string(),
                },
            }),
        }
    }
}

impl<T> std::fmt::Display for AllocationOutcome<T>
where
    T: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)
    }
}

/// Why no allocation could be returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    /// The requested number of rooms is outside the bookable range.
    #[error(
        "invalid room count {requested}: a booking must request between {min} and {max} rooms",
        min = RoomCount::MIN,
        max = RoomCount::MAX
    )]
    InvalidCount { requested: usize },
    /// Fewer rooms are available than were requested.
    #[error("cannot allocate {requested} rooms: only {available} are available")]
    Infeasible { requested: usize, available: usize },
    /// A search limit stopped the search before any candidate was evaluated.
    #[error("allocation aborted before any candidate was found: {reason}")]
    Aborted { reason: String },
}

impl From<RoomCountError> for AllocationError {
    fn from(err: RoomCountError) -> Self {
        AllocationError::InvalidCount {
            requested: err.requested,
        }
    }
}
