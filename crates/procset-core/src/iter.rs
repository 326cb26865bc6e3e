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

//! Iterators over the interval-compressed representation.
//!
//! Both iterators borrow the set's boundary buffer and never materialize
//! the element sequence; re-calling the owning view method restarts them.

use crate::Boundary;
use crate::span::ProcRange;
use std::iter::FusedIterator;
use std::slice::ChunksExact;

/// Iterates over a set's disjoint intervals as closed [`ProcRange`]s.
///
/// Yielded in increasing order; the upper bound of each range is reported
/// inclusively, matching the textual convention.
#[derive(Debug, Clone)]
pub struct IntervalIter<'a, B: Boundary> {
    pairs: ChunksExact<'a, B>,
}

impl<'a, B: Boundary> IntervalIter<'a, B> {
    #[inline]
    pub(crate) fn new(bounds: &'a [B]) -> Self {
        debug_assert!(bounds.len() % 2 == 0);
        Self {
            pairs: bounds.chunks_exact(2),
        }
    }
}

impl<B: Boundary> Iterator for IntervalIter<'_, B> {
    type Item = ProcRange<B>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.pairs
            .next()
            .map(|pair| ProcRange::from_half_open(pair[0], pair[1]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl<B: Boundary> DoubleEndedIterator for IntervalIter<'_, B> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.pairs
            .next_back()
            .map(|pair| ProcRange::from_half_open(pair[0], pair[1]))
    }
}

impl<B: Boundary> ExactSizeIterator for IntervalIter<'_, B> {
    #[inline]
    fn len(&self) -> usize {
        self.pairs.len()
    }
}

impl<B: Boundary> FusedIterator for IntervalIter<'_, B> {}

/// Iterates over a set's individual elements in increasing order.
///
/// The sequence is enumerated straight from the interval pairs; no
/// per-element storage is allocated. The iterator is double-ended and
/// knows its exact remaining length.
#[derive(Debug, Clone)]
pub struct ElementIter<'a, B: Boundary> {
    bounds: &'a [B],
    /// even index of the interval the front cursor sits in
    front_idx: usize,
    /// next element the front will yield (valid while `remaining > 0`)
    front_next: B,
    /// even index of the interval the back cursor sits in
    back_idx: usize,
    /// next element the back will yield (valid while `remaining > 0`)
    back_next: B,
    remaining: usize,
}

impl<'a, B: Boundary> ElementIter<'a, B> {
    #[inline]
    pub(crate) fn new(bounds: &'a [B], element_count: usize) -> Self {
        if bounds.is_empty() {
            Self {
                bounds,
                front_idx: 0,
                front_next: B::zero(),
                back_idx: 0,
                back_next: B::zero(),
                remaining: 0,
            }
        } else {
            Self {
                bounds,
                front_idx: 0,
                front_next: bounds[0],
                back_idx: bounds.len() - 2,
                back_next: bounds[bounds.len() - 1] - B::one(),
                remaining: element_count,
            }
        }
    }
}

impl<B: Boundary> Iterator for ElementIter<'_, B> {
    type Item = B;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.front_next;
        self.remaining -= 1;
        if self.remaining > 0 {
            let upper = self.bounds[self.front_idx + 1];
            let succ = value + B::one();
            if succ < upper {
                self.front_next = succ;
            } else {
                self.front_idx += 2;
                self.front_next = self.bounds[self.front_idx];
            }
        }
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<B: Boundary> DoubleEndedIterator for ElementIter<'_, B> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.back_next;
        self.remaining -= 1;
        if self.remaining > 0 {
            let lower = self.bounds[self.back_idx];
            if value > lower {
                self.back_next = value - B::one();
            } else {
                self.back_idx -= 2;
                self.back_next = self.bounds[self.back_idx + 1] - B::one();
            }
        }
        Some(value)
    }
}

impl<B: Boundary> ExactSizeIterator for ElementIter<'_, B> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<B: Boundary> FusedIterator for ElementIter<'_, B> {}
