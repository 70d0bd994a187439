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

//! # Streaming k-Combinations
//!
//! `Combinations` walks every k-subset of `0..n` in lexicographic order while
//! keeping exactly one subset alive. It hands out the current subset as a
//! borrowed slice instead of allocating a `Vec` per subset, which keeps the
//! memory footprint constant no matter how large `C(n, k)` grows.
//!
//! Lexicographic order has a useful property for branch-and-bound style
//! searches: all subsets that share a prefix are contiguous. Once a caller has
//! established that no extension of the prefix `c[..len]` can improve its
//! incumbent, `skip_prefix(len)` jumps over that whole block in one step.
//!
//! ## Usage
//!
//! ```rust
//! use concierge_core::algorithm::combinations::Combinations;
//!
//! let mut combos = Combinations::new(4, 2);
//! let mut seen = Vec::new();
//! while let Some(c) = combos.next_combination() {
//!     seen.push(c.to_vec());
//! }
//! assert_eq!(
//!     seen,
//!     vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]]
//! );
//! ```

use smallvec::SmallVec;

/// Returns `C(n, k)`, or `None` if it does not fit into a `u64`.
///
/// # Examples
///
/// ```rust
/// # use concierge_core::algorithm::combinations::binomial;
/// assert_eq!(binomial(97, 5), Some(64_446_024));
/// assert_eq!(binomial(3, 4), Some(0));
/// ```
pub fn binomial(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) is always divisible by (i + 1) at this point.
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    u64::try_from(acc).ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Fresh,
    Active,
    Exhausted,
}

/// Lexicographic generator over the k-subsets of `0..n`.
///
/// This is a streaming generator rather than an `Iterator`: each call to
/// `next_combination` overwrites the previous subset in place and returns a
/// slice borrowed from the generator.
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    k: usize,
    indices: SmallVec<[usize; 8]>,
    /// Only positions `< advance_limit` may be bumped on the next advance.
    advance_limit: usize,
    state: State,
}

impl Combinations {
    /// Creates a generator over the `k`-subsets of `0..n`.
    ///
    /// If `k > n` the generator is empty. For `k == 0` it yields the empty
    /// subset exactly once.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: SmallVec::with_capacity(k),
            advance_limit: k,
            state: if k > n { State::Exhausted } else { State::Fresh },
        }
    }

    /// Returns the total number of subsets this generator walks, if it fits into a `u64`.
    #[inline]
    pub fn total(&self) -> Option<u64> {
        binomial(self.n, self.k)
    }

    /// Advances to the next subset in lexicographic order and returns it.
    pub fn next_combination(&mut self) -> Option<&[usize]> {
        match self.state {
            State::Exhausted => None,
            State::Fresh => {
                self.indices.clear();
                self.indices.extend(0..self.k);
                self.state = State::Active;
                Some(&self.indices)
            }
            State::Active => {
                if self.advance() {
                    Some(&self.indices)
                } else {
                    self.state = State::Exhausted;
                    None
                }
            }
        }
    }

    /// Skips every remaining subset that starts with the current prefix of
    /// length `len`.
    ///
    /// After this call, the next call to `next_combination` returns the first
    /// subset whose first `len` elements differ from the current ones.
    /// `skip_prefix(0)` exhausts the generator.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `len > k`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use concierge_core::algorithm::combinations::Combinations;
    /// let mut combos = Combinations::new(4, 2);
    /// assert_eq!(combos.next_combination(), Some(&[0, 1][..]));
    /// // Nothing starting with 0 is interesting any more.
    /// combos.skip_prefix(1);
    /// assert_eq!(combos.next_combination(), Some(&[1, 2][..]));
    /// ```
    pub fn skip_prefix(&mut self, len: usize) {
        debug_assert!(
            len <= self.k,
            "called `Combinations::skip_prefix` with a prefix longer than the subset: the k is {} but the len is {}",
            self.k,
            len
        );

        if self.state != State::Active {
            return;
        }
        if len == 0 {
            self.state = State::Exhausted;
            return;
        }
        self.advance_limit = self.advance_limit.min(len);
    }

    fn advance(&mut self) -> bool {
        let (n, k) = (self.n, self.k);
        let limit = std::mem::replace(&mut self.advance_limit, k);

        // Rightmost position below the limit that has not reached its maximum.
        let Some(pivot) = (0..limit).rev().find(|&i| self.indices[i] < n - k + i) else {
            return false;
        };

        self.indices[pivot] += 1;
        for j in pivot + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_all(mut c: Combinations) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        while let Some(s) = c.next_combination() {
            out.push(s.to_vec());
        }
        out
    }

    #[test]
    fn test_binomial_small_values() {
        assert_eq!(binomial(0, 0), Some(1));
        assert_eq!(binomial(5, 0), Some(1));
        assert_eq!(binomial(5, 5), Some(1));
        assert_eq!(binomial(5, 2), Some(10));
        assert_eq!(binomial(10, 3), Some(120));
        assert_eq!(binomial(2, 3), Some(0));
    }

    #[test]
    fn test_binomial_overflow_is_none() {
        assert_eq!(binomial(200, 100), None);
        assert!(binomial(62, 31).is_some());
    }

    #[test]
    fn test_lexicographic_order_and_count() {
        let all = collect_all(Combinations::new(5, 3));
        assert_eq!(all.len(), 10);
        assert_eq!(all.first().unwrap(), &vec![0, 1, 2]);
        assert_eq!(all.last().unwrap(), &vec![2, 3, 4]);

        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(all, sorted, "subsets must come out in lexicographic order");
        for s in &all {
            assert!(s.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_count_matches_binomial_for_grid() {
        for n in 0..9 {
            for k in 0..=n + 1 {
                let c = Combinations::new(n, k);
                let expected = c.total().unwrap() as usize;
                assert_eq!(collect_all(c).len(), expected, "n = {}, k = {}", n, k);
            }
        }
    }

    #[test]
    fn test_k_greater_than_n_is_empty() {
        let mut c = Combinations::new(2, 3);
        assert_eq!(c.total(), Some(0));
        assert!(c.next_combination().is_none());
    }

    #[test]
    fn test_k_zero_yields_single_empty_subset() {
        let all = collect_all(Combinations::new(4, 0));
        assert_eq!(all, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_k_equals_n_yields_everything_once() {
        assert_eq!(collect_all(Combinations::new(3, 3)), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_skip_prefix_jumps_over_block() {
        let mut c = Combinations::new(5, 3);
        assert_eq!(c.next_combination(), Some(&[0, 1, 2][..]));
        // Drop everything starting with [0, 1].
        c.skip_prefix(2);
        assert_eq!(c.next_combination(), Some(&[0, 2, 3][..]));
        // Drop everything starting with [0].
        c.skip_prefix(1);
        assert_eq!(c.next_combination(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn test_skip_full_prefix_is_plain_advance() {
        let mut c = Combinations::new(4, 2);
        c.next_combination();
        c.skip_prefix(2);
        assert_eq!(c.next_combination(), Some(&[0, 2][..]));
    }

    #[test]
    fn test_skip_prefix_zero_exhausts() {
        let mut c = Combinations::new(6, 2);
        c.next_combination();
        c.skip_prefix(0);
        assert!(c.next_combination().is_none());
        assert!(c.next_combination().is_none());
    }

    #[test]
    fn test_skip_prefix_on_last_block_exhausts() {
        let mut c = Combinations::new(4, 2);
        let mut last = None;
        while let Some(s) = c.next_combination() {
            if s[0] == 2 {
                last = Some(s.to_vec());
                c.skip_prefix(1);
                break;
            }
        }
        assert_eq!(last, Some(vec![2, 3]));
        assert!(c.next_combination().is_none());
    }

    #[test]
    fn test_skip_prefix_matches_filtered_enumeration() {
        // Skip every block whose first element is odd; compare with filtering.
        let mut c = Combinations::new(7, 3);
        let mut kept = Vec::new();
        while let Some(s) = c.next_combination() {
            if s[0] % 2 == 1 {
                c.skip_prefix(1);
                continue;
            }
            kept.push(s.to_vec());
        }

        let expected: Vec<Vec<usize>> = collect_all(Combinations::new(7, 3))
            .into_iter()
            .filter(|s| s[0] % 2 == 0)
            .collect();
        assert_eq!(kept, expected);
    }
}
