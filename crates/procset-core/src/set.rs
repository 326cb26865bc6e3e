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

//! The processor-set value type.
//!
//! A [`ProcSet`] is an ordered set of non-negative processor indices,
//! stored compactly as a canonical boundary buffer (see
//! [`BoundBuf`](crate::BoundBuf)). Pairwise combination goes through the
//! merge engine; combining more than two operands reduces the operand
//! list first. "In-place" mutators compute a fresh buffer and swap it in
//! whole, so a set is canonical at every observable point and a failed
//! operation never leaves a receiver half-updated.
//!
//! A `ProcSet` owns its buffer exclusively; it is a plain value type with
//! no internal synchronization. Distinct instances may be used freely
//! from distinct threads, but sharing one instance across writers
//! requires external locking.

use crate::Boundary;
use crate::bounds::BoundBuf;
use crate::err::{EmptySetError, IndexOutOfRangeError, InvalidIntervalError, ZeroStepError};
use crate::iter::{ElementIter, IntervalIter};
use crate::merge::{MergeOp, merge, reduce_union};
use crate::span::ProcRange;
use std::cmp::Ordering;
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Range, RangeInclusive, Sub,
    SubAssign,
};

/// An ordered set of processor indices, stored as disjoint intervals.
///
/// The default boundary scalar is `u32`; any unsigned primitive
/// implementing [`Boundary`] works. The largest two values of the scalar
/// are reserved (see the crate documentation), so with `u32` the valid
/// element domain is `0..=u32::MAX - 2`.
///
/// # Examples
///
/// ```
/// use procset_core::ProcSet;
///
/// let busy: ProcSet = "0-3 8-11".parse().unwrap();
/// let reserved: ProcSet = "2-9".parse().unwrap();
///
/// assert_eq!((&busy | &reserved).to_string(), "0-11");
/// assert_eq!((&busy & &reserved).to_string(), "2-3 8-9");
/// assert_eq!((&busy - &reserved).to_string(), "0-1 10-11");
/// assert_eq!((&busy ^ &reserved).to_string(), "0-1 4-7 10-11");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcSet<B: Boundary = u32> {
    bounds: BoundBuf<B>,
}

impl<B: Boundary> ProcSet<B> {
    /// Creates an empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = ProcSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.len(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            bounds: BoundBuf::new(),
        }
    }

    /// Creates the single-element set `{value}`.
    ///
    /// Fails if `value` lies in the reserved top of the boundary domain.
    #[inline]
    pub fn singleton(value: B) -> Result<Self, InvalidIntervalError<B>> {
        ProcRange::singleton(value).map(Self::from)
    }

    /// Wraps an already canonical boundary buffer.
    #[inline]
    pub fn from_bounds(bounds: BoundBuf<B>) -> Self {
        Self { bounds }
    }

    /// Read access to the underlying boundary buffer.
    #[inline]
    pub fn as_bounds(&self) -> &BoundBuf<B> {
        &self.bounds
    }

    /// Number of individual elements in the set.
    ///
    /// An empty set has length zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = "0-3 5 7-9".parse().unwrap();
    /// assert_eq!(set.len(), 7);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.bounds.element_count()
    }

    /// Returns `true` if the set has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Number of disjoint intervals in the canonical representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = "0-3 5 7-9".parse().unwrap();
    /// assert_eq!(set.interval_count(), 3);
    /// ```
    #[inline]
    pub fn interval_count(&self) -> usize {
        self.bounds.interval_count()
    }

    /// Returns `true` if the set is empty or a single unbroken interval.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.bounds.interval_count() <= 1
    }

    /// Membership test.
    ///
    /// A value below the first lower bound or at/above the last upper
    /// bound short-circuits to `false`; otherwise the containing interval
    /// candidate is located by binary search. In the canonical encoding a
    /// value is a member exactly when an odd number of boundaries lie at
    /// or below it.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = "0-3 8".parse().unwrap();
    /// assert!(set.contains(2));
    /// assert!(set.contains(8));
    /// assert!(!set.contains(4));
    /// assert!(!set.contains(9));
    /// ```
    #[inline]
    pub fn contains(&self, value: B) -> bool {
        let bounds = self.bounds.as_slice();
        match (bounds.first(), bounds.last()) {
            (Some(&first), Some(&last)) if first <= value && value < last => {
                bounds.partition_point(|&b| b <= value) % 2 == 1
            }
            _ => false,
        }
    }

    /// Smallest element of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = "4-7 12".parse().unwrap();
    /// assert_eq!(set.min().unwrap(), 4);
    /// assert!(ProcSet::<u32>::new().min().is_err());
    /// ```
    #[inline]
    pub fn min(&self) -> Result<B, EmptySetError> {
        self.bounds
            .first_lower()
            .ok_or_else(|| EmptySetError::new("min"))
    }

    /// Largest element of the set.
    #[inline]
    pub fn max(&self) -> Result<B, EmptySetError> {
        self.bounds
            .last_upper()
            .map(|upper| upper - B::one())
            .ok_or_else(|| EmptySetError::new("max"))
    }

    /// Convex-hull bounds `(min, max)` without building a new set.
    #[inline]
    pub fn span(&self) -> Option<ProcRange<B>> {
        match (self.bounds.first_lower(), self.bounds.last_upper()) {
            (Some(lo), Some(hi)) => Some(ProcRange::from_half_open(lo, hi)),
            _ => None,
        }
    }

    /// Convex hull of the set: the smallest single interval spanning all
    /// elements. The hull of the empty set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = "1-2 7 9".parse().unwrap();
    /// assert_eq!(set.aggregate().to_string(), "1-9");
    /// ```
    #[inline]
    pub fn aggregate(&self) -> Self {
        match (self.bounds.first_lower(), self.bounds.last_upper()) {
            (Some(lo), Some(hi)) => Self {
                bounds: BoundBuf::from_half_open(lo, hi),
            },
            _ => Self::new(),
        }
    }

    /// Removes every element, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.bounds.clear();
    }

    /// Iterates over the disjoint intervals as closed ranges.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = "0-3 5".parse().unwrap();
    /// let pairs: Vec<(u32, u32)> = set.intervals().map(|r| (r.lower(), r.upper())).collect();
    /// assert_eq!(pairs, vec![(0, 3), (5, 5)]);
    /// ```
    #[inline]
    pub fn intervals(&self) -> IntervalIter<'_, B> {
        IntervalIter::new(self.bounds.as_slice())
    }

    /// Iterates over the individual elements in increasing order.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = "0-2 5".parse().unwrap();
    /// let elements: Vec<u32> = set.iter().collect();
    /// assert_eq!(elements, vec![0, 1, 2, 5]);
    /// ```
    #[inline]
    pub fn iter(&self) -> ElementIter<'_, B> {
        ElementIter::new(self.bounds.as_slice(), self.len())
    }

    /// Element at `position` in the increasing element sequence.
    ///
    /// A negative position counts from the end (`-1` is the largest
    /// element). Out-of-range positions fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = "0-3 8".parse().unwrap();
    /// assert_eq!(set.element_at(0).unwrap(), 0);
    /// assert_eq!(set.element_at(4).unwrap(), 8);
    /// assert_eq!(set.element_at(-1).unwrap(), 8);
    /// assert!(set.element_at(5).is_err());
    /// ```
    pub fn element_at(&self, position: isize) -> Result<B, IndexOutOfRangeError> {
        let len = self.len();
        let normalized = if position < 0 {
            position + len as isize
        } else {
            position
        };
        if normalized < 0 || normalized as usize >= len {
            return Err(IndexOutOfRangeError::new(position, len));
        }
        Ok(self.nth_element(normalized as usize))
    }

    /// Elements selected by slice bounds, with clamping semantics.
    ///
    /// `start`/`stop` default to the ends of the sequence (respecting the
    /// step direction), negative positions count from the end, and
    /// out-of-range bounds are clamped rather than rejected. A step of
    /// zero fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = "0-9".parse().unwrap();
    /// assert_eq!(set.slice(Some(2), Some(8), 2).unwrap(), vec![2, 4, 6]);
    /// assert_eq!(set.slice(None, None, -3).unwrap(), vec![9, 6, 3, 0]);
    /// assert!(set.slice(None, None, 0).is_err());
    /// ```
    pub fn slice(
        &self,
        start: Option<isize>,
        stop: Option<isize>,
        step: isize,
    ) -> Result<Vec<B>, ZeroStepError> {
        if step == 0 {
            return Err(ZeroStepError);
        }
        let len = self.len() as isize;
        let (mut pos, stop) = slice_bounds(len, start, stop, step);
        let mut out = Vec::new();
        if step > 0 {
            while pos < stop {
                out.push(self.nth_element(pos as usize));
                pos += step;
            }
        } else {
            while pos > stop {
                out.push(self.nth_element(pos as usize));
                pos += step;
            }
        }
        Ok(out)
    }

    /// Walks the interval pairs to the element at a validated position.
    fn nth_element(&self, position: usize) -> B {
        debug_assert!(position < self.len());
        let mut remaining = position;
        for (lo, hi) in self.bounds.pairs() {
            let width = (hi - lo).to_usize().expect("interval width fits usize");
            if remaining < width {
                return lo + B::from_usize(remaining).expect("offset fits the boundary type");
            }
            remaining -= width;
        }
        unreachable!("position validated against the element count")
    }

    /// Union with one other set.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let a: ProcSet = "0-3".parse().unwrap();
    /// let b: ProcSet = "2-5".parse().unwrap();
    /// let joined = a.union(&b);
    /// assert_eq!(joined.to_string(), "0-5");
    /// assert_eq!(joined.interval_count(), 1);
    /// ```
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            bounds: merge(&self.bounds, &other.bounds, MergeOp::Union),
        }
    }

    /// Intersection with one other set.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            bounds: merge(&self.bounds, &other.bounds, MergeOp::Intersection),
        }
    }

    /// Elements of `self` not in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let a: ProcSet = "0-9".parse().unwrap();
    /// let b: ProcSet = "5".parse().unwrap();
    /// assert_eq!(a.difference(&b).to_string(), "0-4 6-9");
    /// ```
    #[inline]
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            bounds: merge(&self.bounds, &other.bounds, MergeOp::Difference),
        }
    }

    /// Elements in exactly one of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let a: ProcSet = "0-5".parse().unwrap();
    /// let b: ProcSet = "3-8".parse().unwrap();
    /// assert_eq!(a.symmetric_difference(&b).to_string(), "0-2 6-8");
    /// ```
    #[inline]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        Self {
            bounds: merge(&self.bounds, &other.bounds, MergeOp::SymmetricDifference),
        }
    }

    /// Union with any number of other sets, reduced pairwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let a: ProcSet = "0-1".parse().unwrap();
    /// let b: ProcSet = "2-3".parse().unwrap();
    /// let c: ProcSet = "8".parse().unwrap();
    /// assert_eq!(a.union_all([&b, &c]).to_string(), "0-3 8");
    /// ```
    #[inline]
    pub fn union_all<'a, I>(&self, others: I) -> Self
    where
        B: 'a,
        I: IntoIterator<Item = &'a ProcSet<B>>,
    {
        Self {
            bounds: self.combined(others, MergeOp::Union),
        }
    }

    /// Intersection with the union of the supplied operands.
    ///
    /// The operands are united first and the intersection applied once;
    /// chain pairwise [`intersection`](Self::intersection) calls to
    /// intersect with every operand individually.
    #[inline]
    pub fn intersection_all<'a, I>(&self, others: I) -> Self
    where
        B: 'a,
        I: IntoIterator<Item = &'a ProcSet<B>>,
    {
        Self {
            bounds: self.combined(others, MergeOp::Intersection),
        }
    }

    /// Elements of `self` not in any of the supplied operands.
    #[inline]
    pub fn difference_all<'a, I>(&self, others: I) -> Self
    where
        B: 'a,
        I: IntoIterator<Item = &'a ProcSet<B>>,
    {
        Self {
            bounds: self.combined(others, MergeOp::Difference),
        }
    }

    /// Symmetric difference against the union of the supplied operands.
    #[inline]
    pub fn symmetric_difference_all<'a, I>(&self, others: I) -> Self
    where
        B: 'a,
        I: IntoIterator<Item = &'a ProcSet<B>>,
    {
        Self {
            bounds: self.combined(others, MergeOp::SymmetricDifference),
        }
    }

    /// Adds the elements of all supplied sets, returning the receiver.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let mut set: ProcSet = "0-1".parse().unwrap();
    /// let more: ProcSet = "2-4".parse().unwrap();
    /// set.update([&more]);
    /// assert_eq!(set.to_string(), "0-4");
    /// ```
    #[inline]
    pub fn update<'a, I>(&mut self, others: I) -> &mut Self
    where
        B: 'a,
        I: IntoIterator<Item = &'a ProcSet<B>>,
    {
        let merged = self.combined(others, MergeOp::Union);
        self.bounds = merged;
        self
    }

    /// Keeps only elements also present in the union of the operands.
    #[inline]
    pub fn intersection_update<'a, I>(&mut self, others: I) -> &mut Self
    where
        B: 'a,
        I: IntoIterator<Item = &'a ProcSet<B>>,
    {
        let merged = self.combined(others, MergeOp::Intersection);
        self.bounds = merged;
        self
    }

    /// Removes the elements of all supplied sets, returning the receiver.
    #[inline]
    pub fn difference_update<'a, I>(&mut self, others: I) -> &mut Self
    where
        B: 'a,
        I: IntoIterator<Item = &'a ProcSet<B>>,
    {
        let merged = self.combined(others, MergeOp::Difference);
        self.bounds = merged;
        self
    }

    /// Alias for [`difference_update`](Self::difference_update).
    #[inline]
    pub fn discard<'a, I>(&mut self, others: I) -> &mut Self
    where
        B: 'a,
        I: IntoIterator<Item = &'a ProcSet<B>>,
    {
        self.difference_update(others)
    }

    /// Symmetric difference against the union of the operands, in place.
    #[inline]
    pub fn symmetric_difference_update<'a, I>(&mut self, others: I) -> &mut Self
    where
        B: 'a,
        I: IntoIterator<Item = &'a ProcSet<B>>,
    {
        let merged = self.combined(others, MergeOp::SymmetricDifference);
        self.bounds = merged;
        self
    }

    /// Inserts one closed interval of elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::{ProcRange, ProcSet};
    ///
    /// let mut set: ProcSet = "0-1".parse().unwrap();
    /// set.insert(ProcRange::new(3, 5).unwrap());
    /// assert_eq!(set.to_string(), "0-1 3-5");
    /// ```
    #[inline]
    pub fn insert(&mut self, range: ProcRange<B>) -> &mut Self {
        let addition = Self::from(range);
        self.update([&addition])
    }

    /// Removes one closed interval of elements.
    #[inline]
    pub fn discard_range(&mut self, range: ProcRange<B>) -> &mut Self {
        let removal = Self::from(range);
        self.difference_update([&removal])
    }

    /// Non-strict subset test: every element of `self` is in `other`.
    ///
    /// Use the comparison operators for the strict forms; see the
    /// [`PartialOrd`] impl.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let small: ProcSet = "2".parse().unwrap();
    /// let big: ProcSet = "0-5".parse().unwrap();
    /// assert!(small.is_subset(&big));
    /// assert!(big.is_subset(&big));
    /// assert!(!big.is_subset(&small));
    /// ```
    #[inline]
    pub fn is_subset(&self, other: &Self) -> bool {
        merge(&self.bounds, &other.bounds, MergeOp::Intersection) == self.bounds
    }

    /// Non-strict superset test: every element of `other` is in `self`.
    #[inline]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if the sets share no element.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let a: ProcSet = "0-3".parse().unwrap();
    /// let b: ProcSet = "4-7".parse().unwrap();
    /// assert!(a.is_disjoint(&b));
    /// assert!(!a.is_disjoint(&a));
    /// ```
    #[inline]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        merge(&self.bounds, &other.bounds, MergeOp::Intersection).is_empty()
    }

    /// One merge against the union of `others`, or a plain copy/union
    /// reduction when the operand list degenerates.
    fn combined<'a, I>(&self, others: I, op: MergeOp) -> BoundBuf<B>
    where
        B: 'a,
        I: IntoIterator<Item = &'a ProcSet<B>>,
    {
        if op == MergeOp::Union {
            let mut bufs: Vec<&BoundBuf<B>> = vec![&self.bounds];
            bufs.extend(others.into_iter().map(|set| &set.bounds));
            reduce_union(&bufs)
        } else {
            let other_bufs: Vec<&BoundBuf<B>> =
                others.into_iter().map(|set| &set.bounds).collect();
            if other_bufs.is_empty() {
                return self.bounds.clone();
            }
            let rhs = reduce_union(&other_bufs);
            merge(&self.bounds, &rhs, op)
        }
    }
}

/// Normalizes and clamps slice bounds against `len`, honoring the step
/// direction. Negative positions count from the end; positions beyond
/// either end clamp to the nearest reachable bound.
fn slice_bounds(
    len: isize,
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
) -> (isize, isize) {
    #[inline]
    fn adjust(position: isize, len: isize, lo: isize, hi: isize) -> isize {
        let position = if position < 0 { position + len } else { position };
        position.clamp(lo, hi)
    }

    if step > 0 {
        (
            start.map_or(0, |s| adjust(s, len, 0, len)),
            stop.map_or(len, |s| adjust(s, len, 0, len)),
        )
    } else {
        (
            start.map_or(len - 1, |s| adjust(s, len, -1, len - 1)),
            stop.map_or(-1, |s| adjust(s, len, -1, len - 1)),
        )
    }
}

impl<B: Boundary> Default for ProcSet<B> {
    /// The empty set.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Set-inclusion partial order.
///
/// `a < b` holds when `a` is a proper subset of `b`; `a <= b` when `a` is
/// a subset of (or equal to) `b`; `>`/`>=` mirror the superset direction.
/// Two sets that include neither each other are incomparable:
/// `partial_cmp` returns `None` and every ordering operator except
/// `==`/`!=` yields `false` for them.
impl<B: Boundary> PartialOrd for ProcSet<B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.is_subset(other) {
            Some(Ordering::Less)
        } else if other.is_subset(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl<B: Boundary> From<ProcRange<B>> for ProcSet<B> {
    /// A set holding exactly the elements of the closed range.
    #[inline]
    fn from(range: ProcRange<B>) -> Self {
        let (lo, hi) = range.half_open();
        Self {
            bounds: BoundBuf::from_half_open(lo, hi),
        }
    }
}

impl<B: Boundary> TryFrom<(B, B)> for ProcSet<B> {
    type Error = InvalidIntervalError<B>;

    /// A set from the closed interval `[pair.0, pair.1]`.
    #[inline]
    fn try_from(pair: (B, B)) -> Result<Self, Self::Error> {
        ProcRange::new(pair.0, pair.1).map(Self::from)
    }
}

impl<B: Boundary> TryFrom<RangeInclusive<B>> for ProcSet<B> {
    type Error = InvalidIntervalError<B>;

    #[inline]
    fn try_from(range: RangeInclusive<B>) -> Result<Self, Self::Error> {
        ProcRange::try_from(range).map(Self::from)
    }
}

impl<B: Boundary> TryFrom<Range<B>> for ProcSet<B> {
    type Error = InvalidIntervalError<B>;

    /// A set from a half-open standard range; an empty range yields the
    /// empty set.
    #[inline]
    fn try_from(range: Range<B>) -> Result<Self, Self::Error> {
        if range.start >= range.end {
            return Ok(Self::new());
        }
        ProcRange::new(range.start, range.end - B::one()).map(Self::from)
    }
}

macro_rules! impl_try_from_scalar {
    ($($t:ty),+) => {
        $(
            impl TryFrom<$t> for ProcSet<$t> {
                type Error = InvalidIntervalError<$t>;

                /// The single-element set `{value}`.
                #[inline]
                fn try_from(value: $t) -> Result<Self, Self::Error> {
                    Self::singleton(value)
                }
            }
        )+
    };
}

impl_try_from_scalar!(u8, u16, u32, u64, usize);

impl<B: Boundary> FromIterator<ProcRange<B>> for ProcSet<B> {
    /// Unions all ranges via balanced pairwise reduction.
    fn from_iter<I: IntoIterator<Item = ProcRange<B>>>(iter: I) -> Self {
        let singles: Vec<BoundBuf<B>> = iter
            .into_iter()
            .map(|range| {
                let (lo, hi) = range.half_open();
                BoundBuf::from_half_open(lo, hi)
            })
            .collect();
        let refs: Vec<&BoundBuf<B>> = singles.iter().collect();
        Self {
            bounds: reduce_union(&refs),
        }
    }
}

impl<B: Boundary> FromIterator<ProcSet<B>> for ProcSet<B> {
    /// Unions all sets via balanced pairwise reduction.
    fn from_iter<I: IntoIterator<Item = ProcSet<B>>>(iter: I) -> Self {
        let sets: Vec<ProcSet<B>> = iter.into_iter().collect();
        let refs: Vec<&BoundBuf<B>> = sets.iter().map(|set| &set.bounds).collect();
        Self {
            bounds: reduce_union(&refs),
        }
    }
}

impl<'a, B: Boundary> FromIterator<&'a ProcSet<B>> for ProcSet<B> {
    fn from_iter<I: IntoIterator<Item = &'a ProcSet<B>>>(iter: I) -> Self {
        let refs: Vec<&BoundBuf<B>> = iter.into_iter().map(|set| &set.bounds).collect();
        Self {
            bounds: reduce_union(&refs),
        }
    }
}

impl<B: Boundary> Extend<ProcRange<B>> for ProcSet<B> {
    fn extend<T: IntoIterator<Item = ProcRange<B>>>(&mut self, iter: T) {
        let addition: ProcSet<B> = iter.into_iter().collect();
        self.update([&addition]);
    }
}

impl<B: Boundary> Extend<ProcSet<B>> for ProcSet<B> {
    fn extend<T: IntoIterator<Item = ProcSet<B>>>(&mut self, iter: T) {
        let addition: ProcSet<B> = iter.into_iter().collect();
        self.update([&addition]);
    }
}

impl<'a, B: Boundary> IntoIterator for &'a ProcSet<B> {
    type Item = B;
    type IntoIter = ElementIter<'a, B>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<B: Boundary> BitOr for &ProcSet<B> {
    type Output = ProcSet<B>;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl<B: Boundary> BitOr for ProcSet<B> {
    type Output = ProcSet<B>;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(&rhs)
    }
}

impl<B: Boundary> BitAnd for &ProcSet<B> {
    type Output = ProcSet<B>;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl<B: Boundary> BitAnd for ProcSet<B> {
    type Output = ProcSet<B>;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(&rhs)
    }
}

impl<B: Boundary> Sub for &ProcSet<B> {
    type Output = ProcSet<B>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl<B: Boundary> Sub for ProcSet<B> {
    type Output = ProcSet<B>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(&rhs)
    }
}

impl<B: Boundary> BitXor for &ProcSet<B> {
    type Output = ProcSet<B>;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.symmetric_difference(rhs)
    }
}

impl<B: Boundary> BitXor for ProcSet<B> {
    type Output = ProcSet<B>;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.symmetric_difference(&rhs)
    }
}

impl<B: Boundary> BitOrAssign<&ProcSet<B>> for ProcSet<B> {
    #[inline]
    fn bitor_assign(&mut self, rhs: &ProcSet<B>) {
        self.update([rhs]);
    }
}

impl<B: Boundary> BitOrAssign for ProcSet<B> {
    #[inline]
    fn bitor_assign(&mut self, rhs: ProcSet<B>) {
        self.update([&rhs]);
    }
}

impl<B: Boundary> BitAndAssign<&ProcSet<B>> for ProcSet<B> {
    #[inline]
    fn bitand_assign(&mut self, rhs: &ProcSet<B>) {
        self.intersection_update([rhs]);
    }
}

impl<B: Boundary> BitAndAssign for ProcSet<B> {
    #[inline]
    fn bitand_assign(&mut self, rhs: ProcSet<B>) {
        self.intersection_update([&rhs]);
    }
}

impl<B: Boundary> SubAssign<&ProcSet<B>> for ProcSet<B> {
    #[inline]
    fn sub_assign(&mut self, rhs: &ProcSet<B>) {
        self.difference_update([rhs]);
    }
}

impl<B: Boundary> SubAssign for ProcSet<B> {
    #[inline]
    fn sub_assign(&mut self, rhs: ProcSet<B>) {
        self.difference_update([&rhs]);
    }
}

impl<B: Boundary> BitXorAssign<&ProcSet<B>> for ProcSet<B> {
    #[inline]
    fn bitxor_assign(&mut self, rhs: &ProcSet<B>) {
        self.symmetric_difference_update([rhs]);
    }
}

impl<B: Boundary> BitXorAssign for ProcSet<B> {
    #[inline]
    fn bitxor_assign(&mut self, rhs: ProcSet<B>) {
        self.symmetric_difference_update([&rhs]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(text: &str) -> ProcSet {
        text.parse().expect("test literal parses")
    }

    #[test]
    fn new_and_default_are_empty() {
        assert!(ProcSet::<u32>::new().is_empty());
        assert!(ProcSet::<u32>::default().is_empty());
        assert_eq!(ProcSet::<u32>::new(), ProcSet::<u32>::default());
    }

    #[test]
    fn singleton_holds_one_element() {
        let s = ProcSet::singleton(7u32).unwrap();
        assert_eq!(s.len(), 1);
        assert!(s.contains(7));
        assert_eq!(s.to_string(), "7");
    }

    #[test]
    fn singleton_rejects_the_reserved_top() {
        assert!(ProcSet::singleton(u32::MAX).is_err());
        assert!(ProcSet::singleton(u32::MAX - 1).is_err());
        assert!(ProcSet::singleton(u32::MAX - 2).is_ok());
    }

    #[test]
    fn try_from_closed_pair() {
        let s = ProcSet::try_from((2u32, 5)).unwrap();
        assert_eq!(s.to_string(), "2-5");
        assert!(ProcSet::try_from((5u32, 2)).is_err());
    }

    #[test]
    fn try_from_ranges() {
        assert_eq!(ProcSet::try_from(2u32..=5).unwrap().to_string(), "2-5");
        assert_eq!(ProcSet::try_from(2u32..6).unwrap().to_string(), "2-5");
        // empty std ranges give the empty set
        assert!(ProcSet::try_from(5u32..5).unwrap().is_empty());
        assert!(ProcSet::try_from(6u32..5).unwrap().is_empty());
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let mut original = set("0-3");
        let copy = original.clone();
        original.clear();
        assert!(original.is_empty());
        assert_eq!(copy.to_string(), "0-3");
    }

    #[test]
    fn union_coalesces_touching_ranges() {
        let a = ProcSet::try_from((0u32, 3)).unwrap();
        let b = ProcSet::try_from((2u32, 5)).unwrap();
        let joined = a.union(&b);
        assert_eq!(joined.interval_count(), 1);
        assert_eq!(joined.to_string(), "0-5");
    }

    #[test]
    fn difference_carves_out_a_scalar() {
        let a = ProcSet::try_from((0u32, 9)).unwrap();
        let b = ProcSet::singleton(5u32).unwrap();
        let carved = a.difference(&b);
        let pairs: Vec<_> = carved.intervals().map(|r| (r.lower(), r.upper())).collect();
        assert_eq!(pairs, vec![(0, 4), (6, 9)]);
    }

    #[test]
    fn symmetric_difference_drops_the_overlap() {
        let a = ProcSet::try_from((0u32, 5)).unwrap();
        let b = ProcSet::try_from((3u32, 8)).unwrap();
        let sym = a.symmetric_difference(&b);
        let pairs: Vec<_> = sym.intervals().map(|r| (r.lower(), r.upper())).collect();
        assert_eq!(pairs, vec![(0, 2), (6, 8)]);
    }

    #[test]
    fn union_all_reduces_many_operands() {
        let a = set("0-1");
        let b = set("4-5");
        let c = set("2-3");
        let d = set("9");
        assert_eq!(a.union_all([&b, &c, &d]).to_string(), "0-5 9");
        // no operands: plain copy
        assert_eq!(a.union_all([]), a);
    }

    #[test]
    fn non_union_all_forms_merge_against_the_operand_union() {
        let a = set("0-9");
        let b = set("0-2");
        let c = set("7-9");
        assert_eq!(a.intersection_all([&b, &c]).to_string(), "0-2 7-9");
        assert_eq!(a.difference_all([&b, &c]).to_string(), "3-6");
        assert_eq!(set("0-4").symmetric_difference_all([&b, &c]).to_string(), "3-4 7-9");
        // no operands: receiver unchanged
        assert_eq!(a.intersection_all([]), a);
        assert_eq!(a.difference_all([]), a);
    }

    #[test]
    fn algebraic_laws_hold() {
        let a = set("0-4 9-12");
        let b = set("3-10");
        let c = set("1 5 20-22");

        assert_eq!(a.union(&b), b.union(&a));
        assert_eq!(a.intersection(&b), b.intersection(&a));
        assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
        assert_eq!(
            a.intersection(&b).intersection(&c),
            a.intersection(&b.intersection(&c))
        );
        assert_eq!(a.union(&a), a);
        assert_eq!(a.intersection(&a), a);
        assert!(a.difference(&a).is_empty());
        assert_eq!(
            a.symmetric_difference(&b),
            a.difference(&b).union(&b.difference(&a))
        );
    }

    #[test]
    fn operators_agree_with_methods() {
        let a = set("0-4 9-12");
        let b = set("3-10");
        assert_eq!(&a | &b, a.union(&b));
        assert_eq!(&a & &b, a.intersection(&b));
        assert_eq!(&a - &b, a.difference(&b));
        assert_eq!(&a ^ &b, a.symmetric_difference(&b));
        assert_eq!(a.clone() | b.clone(), a.union(&b));
        assert_eq!(a.clone() & b.clone(), a.intersection(&b));
        assert_eq!(a.clone() - b.clone(), a.difference(&b));
        assert_eq!(a.clone() ^ b.clone(), a.symmetric_difference(&b));
    }

    #[test]
    fn assign_operators_mutate_in_place() {
        let b = set("3-10");

        let mut s = set("0-4");
        s |= &b;
        assert_eq!(s.to_string(), "0-10");

        let mut s = set("0-4");
        s &= &b;
        assert_eq!(s.to_string(), "3-4");

        let mut s = set("0-4");
        s -= &b;
        assert_eq!(s.to_string(), "0-2");

        let mut s = set("0-4");
        s ^= b;
        assert_eq!(s.to_string(), "0-2 5-10");
    }

    #[test]
    fn update_variants_swap_whole_buffers_and_chain() {
        let extra = set("8-9");
        let cut = set("0");
        let mut s = set("0-3");
        s.update([&extra]).difference_update([&cut]);
        assert_eq!(s.to_string(), "1-3 8-9");

        let mut t = set("0-5");
        t.intersection_update([&set("2-8")]);
        assert_eq!(t.to_string(), "2-5");

        let mut u = set("0-5");
        u.symmetric_difference_update([&set("4-8")]);
        assert_eq!(u.to_string(), "0-3 6-8");

        let mut v = set("0-5");
        v.discard([&set("2-3")]);
        assert_eq!(v.to_string(), "0-1 4-5");
    }

    #[test]
    fn insert_and_discard_range() {
        let mut s = set("0-1");
        s.insert(ProcRange::new(5u32, 7).unwrap());
        assert_eq!(s.to_string(), "0-1 5-7");
        s.discard_range(ProcRange::singleton(6u32).unwrap());
        assert_eq!(s.to_string(), "0-1 5 7");
    }

    #[test]
    fn extend_with_ranges_and_sets() {
        let mut s = set("0");
        s.extend([
            ProcRange::new(2u32, 3).unwrap(),
            ProcRange::singleton(1u32).unwrap(),
        ]);
        assert_eq!(s.to_string(), "0-3");

        let mut t = set("0");
        t.extend([set("4-5"), set("2")]);
        assert_eq!(t.to_string(), "0 2 4-5");
    }

    #[test]
    fn from_iterator_of_sets_and_refs() {
        let parts = vec![set("0-1"), set("1-4"), set("8")];
        let owned: ProcSet = parts.clone().into_iter().collect();
        assert_eq!(owned.to_string(), "0-4 8");
        let borrowed: ProcSet = parts.iter().collect();
        assert_eq!(borrowed, owned);
    }

    #[test]
    fn contains_checks_every_edge() {
        let s = set("2-4 8");
        assert!(!s.contains(1));
        assert!(s.contains(2));
        assert!(s.contains(4));
        assert!(!s.contains(5));
        assert!(s.contains(8));
        assert!(!s.contains(9));
        assert!(!ProcSet::<u32>::new().contains(0));
    }

    #[test]
    fn contains_agrees_with_element_iteration() {
        let s = set("0-3 7 11-13");
        for x in 0..20u32 {
            assert_eq!(s.contains(x), s.iter().any(|e| e == x), "element {x}");
        }
    }

    #[test]
    fn min_max_and_empty_failures() {
        let s = set("4-7 12");
        assert_eq!(s.min().unwrap(), 4);
        assert_eq!(s.max().unwrap(), 12);

        let empty = ProcSet::<u32>::new();
        assert_eq!(empty.min().unwrap_err().operation(), "min");
        assert_eq!(empty.max().unwrap_err().operation(), "max");
    }

    #[test]
    fn aggregate_spans_min_to_max() {
        assert_eq!(set("1-2 7 9").aggregate().to_string(), "1-9");
        assert!(ProcSet::<u32>::new().aggregate().is_empty());
        let span = set("1-2 7 9").span().unwrap();
        assert_eq!((span.lower(), span.upper()), (1, 9));
    }

    #[test]
    fn contiguity_and_interval_count() {
        assert!(ProcSet::<u32>::new().is_contiguous());
        assert!(set("3-9").is_contiguous());
        assert!(!set("3-9 11").is_contiguous());
        assert_eq!(set("0-3 5 7-9").interval_count(), 3);
        assert_eq!(set("0-3 5 7-9").len(), 7);
    }

    #[test]
    fn element_at_walks_intervals() {
        let s = set("0-3 8");
        assert_eq!(s.element_at(0).unwrap(), 0);
        assert_eq!(s.element_at(3).unwrap(), 3);
        assert_eq!(s.element_at(4).unwrap(), 8);
    }

    #[test]
    fn element_at_normalizes_negative_positions() {
        let s = set("0-3 8");
        assert_eq!(s.element_at(-1).unwrap(), 8);
        assert_eq!(s.element_at(-5).unwrap(), 0);
        assert!(s.element_at(-6).is_err());
    }

    #[test]
    fn element_at_rejects_out_of_range() {
        let s = set("0-3 8");
        let err = s.element_at(5).unwrap_err();
        assert_eq!(err.index(), 5);
        assert_eq!(err.len(), 5);
        assert!(ProcSet::<u32>::new().element_at(0).is_err());
    }

    #[test]
    fn element_at_is_strictly_increasing_and_contained() {
        let s = set("0-3 5 7-9 20");
        let mut previous = None;
        for i in 0..s.len() {
            let element = s.element_at(i as isize).unwrap();
            assert!(s.contains(element));
            if let Some(prev) = previous {
                assert!(element > prev);
            }
            previous = Some(element);
        }
    }

    #[test]
    fn slice_with_positive_step() {
        let s = set("0-9");
        assert_eq!(s.slice(Some(2), Some(8), 2).unwrap(), vec![2, 4, 6]);
        assert_eq!(s.slice(None, None, 1).unwrap().len(), 10);
        assert_eq!(s.slice(None, Some(3), 1).unwrap(), vec![0, 1, 2]);
        assert_eq!(s.slice(Some(-3), None, 1).unwrap(), vec![7, 8, 9]);
    }

    #[test]
    fn slice_with_negative_step() {
        let s = set("0-9");
        assert_eq!(s.slice(None, None, -3).unwrap(), vec![9, 6, 3, 0]);
        assert_eq!(s.slice(Some(4), Some(1), -1).unwrap(), vec![4, 3, 2]);
    }

    #[test]
    fn slice_clamps_out_of_range_bounds() {
        let s = set("0-4");
        assert_eq!(s.slice(Some(-100), Some(100), 2).unwrap(), vec![0, 2, 4]);
        assert_eq!(s.slice(Some(100), Some(-100), -2).unwrap(), vec![4, 2, 0]);
        assert!(s.slice(Some(3), Some(1), 1).unwrap().is_empty());
    }

    #[test]
    fn slice_of_empty_set_is_empty() {
        let empty = ProcSet::<u32>::new();
        assert!(empty.slice(None, None, 1).unwrap().is_empty());
        assert!(empty.slice(None, None, -1).unwrap().is_empty());
    }

    #[test]
    fn slice_rejects_zero_step() {
        assert!(set("0-4").slice(None, None, 0).is_err());
    }

    #[test]
    fn subset_and_superset_tests() {
        let small = ProcSet::singleton(2u32).unwrap();
        let big = ProcSet::try_from((0u32, 5)).unwrap();
        assert!(small.is_subset(&big));
        assert!(big.is_superset(&small));
        assert!(big.is_subset(&big));
        assert!(!big.is_subset(&small));
    }

    #[test]
    fn strict_subset_is_the_less_than_operator() {
        let small = ProcSet::singleton(2u32).unwrap();
        let big = ProcSet::try_from((0u32, 5)).unwrap();
        assert!(small < big);
        // equal sets are not strict subsets
        assert!(!(big < big.clone()));
        assert!(big <= big.clone());
    }

    #[test]
    fn incomparable_sets_compare_false_everywhere() {
        let a = set("0-3");
        let b = set("2-5");
        assert_eq!(a.partial_cmp(&b), None);
        assert!(!(a < b));
        assert!(!(a > b));
        assert!(!(a <= b));
        assert!(!(a >= b));
        assert!(a != b);
    }

    #[test]
    fn mutual_inclusion_is_equality() {
        let a = set("0-3 5");
        let b = set("0-3 5");
        assert!(a.is_subset(&b) && b.is_subset(&a));
        assert_eq!(a, b);
    }

    #[test]
    fn disjointness_matches_empty_intersection() {
        let a = set("0-3");
        let b = set("4-7");
        let c = set("3-5");
        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&c));
        assert!(a.intersection(&b).is_empty());
        assert!(ProcSet::<u32>::new().is_disjoint(&a));
    }

    #[test]
    fn clear_keeps_the_value_usable() {
        let mut s = set("0-3");
        s.clear();
        assert!(s.is_empty());
        s.update([&set("5")]);
        assert_eq!(s.to_string(), "5");
    }

    #[test]
    fn iteration_over_reference_yields_elements() {
        let s = set("1-3 9");
        let collected: Vec<u32> = (&s).into_iter().collect();
        assert_eq!(collected, vec![1, 2, 3, 9]);
    }

    #[test]
    fn macro_builds_heterogeneous_literals() {
        let other = set("20-21");
        let s: ProcSet = crate::procset![1u32, (3, 5), 8..=9, other];
        assert_eq!(s.to_string(), "1 3-5 8-9 20-21");
        let empty: ProcSet = crate::procset![];
        assert!(empty.is_empty());
    }

    #[test]
    fn works_with_narrow_boundary_types() {
        let a = ProcSet::<u8>::try_from((0u8, 9)).unwrap();
        let b = ProcSet::<u8>::try_from((5u8, 12)).unwrap();
        assert_eq!(a.union(&b).len(), 13);
        assert!(ProcSet::<u8>::singleton(u8::MAX - 1).is_err());
        assert!(ProcSet::<u8>::singleton(u8::MAX - 2).is_ok());
    }
}
