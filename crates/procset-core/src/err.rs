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

//! Error types for the interval-set operations.
//!
//! Every fallible operation in this crate reports one of the types below.
//! Helper routines propagate these errors unchanged rather than translating
//! them, so the kind a caller observes always identifies the original
//! failure.

use crate::Boundary;
use std::fmt::Display;

/// Rejected interval bounds.
///
/// Produced when a closed interval `[lower, upper]` either has its bounds
/// in the wrong order, or reaches into the reserved top of the boundary
/// domain (the maximum value of `B` is an internal sentinel and the value
/// just below it is the largest storable exclusive bound, so no element may
/// exceed `B::max_value() - 2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidIntervalError<B: Boundary> {
    lower: B,
    upper: B,
}

impl<B: Boundary> InvalidIntervalError<B> {
    #[inline]
    pub fn new(lower: B, upper: B) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn lower(&self) -> B {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> B {
        self.upper
    }
}

impl<B: Boundary> Display for InvalidIntervalError<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.lower > self.upper {
            write!(
                f,
                "interval lower bound {} exceeds upper bound {}",
                self.lower, self.upper
            )
        } else {
            write!(
                f,
                "interval upper bound {} reaches the reserved top of the boundary domain (max element is {})",
                self.upper,
                B::max_value() - B::one() - B::one()
            )
        }
    }
}

impl<B: Boundary> std::error::Error for InvalidIntervalError<B> {}

/// Positional access outside `[0, len())`.
///
/// The stored index is the caller's original (possibly negative) position,
/// before normalization against the set length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexOutOfRangeError {
    index: isize,
    len: usize,
}

impl IndexOutOfRangeError {
    #[inline]
    pub fn new(index: isize, len: usize) -> Self {
        Self { index, len }
    }

    #[inline]
    pub fn index(&self) -> isize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
}

impl Display for IndexOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "position {} is out of range for a set of {} elements",
            self.index, self.len
        )
    }
}

impl std::error::Error for IndexOutOfRangeError {}

/// `min`/`max` (or another aggregate) requested on an empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptySetError {
    operation: &'static str,
}

impl EmptySetError {
    #[inline]
    pub fn new(operation: &'static str) -> Self {
        Self { operation }
    }

    #[inline]
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl Display for EmptySetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot take the {} of an empty set", self.operation)
    }
}

impl std::error::Error for EmptySetError {}

/// Slice step of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZeroStepError;

impl Display for ZeroStepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slice step cannot be zero")
    }
}

impl std::error::Error for ZeroStepError {}

/// Failure while parsing the textual interval-set representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseProcSetError<B: Boundary> {
    /// An outer separator produced an empty token.
    EmptyToken,
    /// A token component is not an unsigned decimal number.
    InvalidBound(String),
    /// A token has more than one inner separator.
    MalformedToken(String),
    /// A token parsed into numbers that do not form a valid interval.
    InvalidInterval(InvalidIntervalError<B>),
}

impl<B: Boundary> Display for ParseProcSetError<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseProcSetError::EmptyToken => write!(f, "empty interval token"),
            ParseProcSetError::InvalidBound(token) => {
                write!(f, "invalid interval bound: {token:?}")
            }
            ParseProcSetError::MalformedToken(token) => {
                write!(f, "malformed interval token: {token:?}")
            }
            ParseProcSetError::InvalidInterval(e) => write!(f, "{e}"),
        }
    }
}

impl<B: Boundary> std::error::Error for ParseProcSetError<B> {}

impl<B: Boundary> From<InvalidIntervalError<B>> for ParseProcSetError<B> {
    #[inline]
    fn from(e: InvalidIntervalError<B>) -> Self {
        ParseProcSetError::InvalidInterval(e)
    }
}
