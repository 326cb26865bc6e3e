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

//! The closed-interval type reported at the public surface.
//!
//! Storage is half-open throughout the crate, but the textual convention
//! and the [`intervals`](crate::ProcSet::intervals) view speak in closed
//! intervals: `0-3` means processors 0, 1, 2 and 3. [`ProcRange`] is that
//! closed interval.

use crate::Boundary;
use crate::err::InvalidIntervalError;
use std::fmt;
use std::ops::RangeInclusive;

/// A non-empty closed interval `[lower, upper]` of processor indices.
///
/// Both bounds are inclusive; a singleton has `lower == upper`. The upper
/// bound is capped so that the corresponding half-open upper boundary
/// (`upper + 1`) stays strictly below the reserved sentinel value
/// `B::max_value()`.
///
/// # Examples
///
/// ```
/// use procset_core::ProcRange;
///
/// let range = ProcRange::new(2u32, 5).unwrap();
/// assert_eq!(range.lower(), 2);
/// assert_eq!(range.upper(), 5);
/// assert_eq!(range.element_count(), 4);
/// assert_eq!(range.to_string(), "2-5");
///
/// let single = ProcRange::singleton(7u32).unwrap();
/// assert_eq!(single.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcRange<B: Boundary> {
    lower: B,
    upper: B,
}

impl<B: Boundary> ProcRange<B> {
    /// Creates the closed interval `[lower, upper]`.
    ///
    /// Fails if `lower > upper`, or if `upper` reaches the reserved top of
    /// the boundary domain (the two largest values of `B` cannot be
    /// elements; see the crate documentation).
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcRange;
    ///
    /// assert!(ProcRange::new(2u32, 5).is_ok());
    /// assert!(ProcRange::new(5u32, 2).is_err());
    /// assert!(ProcRange::new(0u32, u32::MAX - 1).is_err());
    /// ```
    #[inline]
    pub fn new(lower: B, upper: B) -> Result<Self, InvalidIntervalError<B>> {
        if lower > upper || upper >= B::max_value() - B::one() {
            return Err(InvalidIntervalError::new(lower, upper));
        }
        Ok(Self { lower, upper })
    }

    /// Creates the single-element interval `[value, value]`.
    #[inline]
    pub fn singleton(value: B) -> Result<Self, InvalidIntervalError<B>> {
        Self::new(value, value)
    }

    /// Builds a range from a stored half-open pair.
    ///
    /// The pair comes from a canonical buffer, so `lo < hi < max` holds.
    #[inline]
    pub(crate) fn from_half_open(lo: B, hi: B) -> Self {
        debug_assert!(lo < hi && hi < B::max_value());
        Self {
            lower: lo,
            upper: hi - B::one(),
        }
    }

    /// The inclusive lower bound.
    #[inline]
    pub fn lower(&self) -> B {
        self.lower
    }

    /// The inclusive upper bound.
    #[inline]
    pub fn upper(&self) -> B {
        self.upper
    }

    /// The half-open pair stored for this range.
    #[inline]
    pub(crate) fn half_open(&self) -> (B, B) {
        (self.lower, self.upper + B::one())
    }

    /// Number of elements covered, always at least one.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcRange;
    ///
    /// assert_eq!(ProcRange::singleton(3u32).unwrap().element_count(), 1);
    /// assert_eq!(ProcRange::new(0u32, 9).unwrap().element_count(), 10);
    /// ```
    #[inline]
    pub fn element_count(&self) -> usize {
        (self.upper - self.lower)
            .to_usize()
            .expect("interval width fits usize")
            + 1
    }

    /// Returns `true` if `value` lies within the closed bounds.
    #[inline]
    pub fn contains(&self, value: B) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Converts to the equivalent inclusive standard-library range.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcRange;
    ///
    /// let range = ProcRange::new(2u32, 5).unwrap();
    /// assert_eq!(range.to_range_inclusive(), 2..=5);
    /// ```
    #[inline]
    pub fn to_range_inclusive(&self) -> RangeInclusive<B> {
        self.lower..=self.upper
    }
}

impl<B: Boundary> fmt::Display for ProcRange<B> {
    /// Renders `lo-hi`; a singleton renders as the bare value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lower == self.upper {
            write!(f, "{}", self.lower)
        } else {
            write!(f, "{}-{}", self.lower, self.upper)
        }
    }
}

impl<B: Boundary> TryFrom<RangeInclusive<B>> for ProcRange<B> {
    type Error = InvalidIntervalError<B>;

    #[inline]
    fn try_from(range: RangeInclusive<B>) -> Result<Self, Self::Error> {
        Self::new(*range.start(), *range.end())
    }
}
