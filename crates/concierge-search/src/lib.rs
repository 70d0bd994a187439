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

//! # Concierge Search
//!
//! Search infrastructure shared by the Concierge allocator: the monitors that
//! observe and steer the cross-floor search, the statistics it collects, the
//! tie-break policy for equal-cost candidates and the outcome types returned
//! to callers.
//!
//! ## Modules
//!
//! - `monitor`: The `SearchMonitor` trait with composite, limit and logging
//!   implementations.
//! - `result`: `AllocationResult`, `TerminationReason`, `AllocationOutcome`
//!   and the `AllocationError` of the tagged API.
//! - `stats`: `AllocationStatistics` and its builder.
//! - `tie_break`: `CrossFloorTieBreak`, the policy for cross-floor ties.

pub mod monitor;
pub mod result;
pub mod stats;
pub mod tie_break;
