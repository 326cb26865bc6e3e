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

//! Compact disjoint-interval sets of processor indices.
//!
//! Scheduling systems juggle sets of resource indices that are combined,
//! compared and enumerated constantly. A dense bitmap is too large for
//! sparse index spaces and a generic integer set too slow; a [`ProcSet`]
//! stores such a set as a sorted sequence of non-overlapping,
//! non-adjacent half-open intervals instead, packed into a flat boundary
//! array. All four set operations run in one linear sweep over two
//! boundary arrays, and n-way combinations reduce pairwise in balanced
//! halves.
//!
//! # Reserved values
//!
//! The boundary scalar's maximum value (`B::max_value()`) is an internal
//! sentinel used to terminate the merge sweep; it is never stored. Since
//! upper bounds are stored exclusively, the largest valid element is
//! `B::max_value() - 2` (for the default `u32`: `4294967293`).
//!
//! # Examples
//!
//! ```
//! use procset_core::{ProcSet, procset};
//!
//! let busy: ProcSet = "0-3 8-11".parse().unwrap();
//! let wanted = procset![1u32, (9, 10), 16..=17];
//!
//! assert_eq!((&wanted & &busy).to_string(), "1 9-10");
//! assert_eq!((&wanted - &busy).to_string(), "16-17");
//! assert!(wanted.intersection(&busy).is_subset(&busy));
//! ```

use num_traits::{FromPrimitive, PrimInt, Unsigned};
use std::fmt::{Debug, Display};
use std::hash::Hash;

pub mod bounds;
pub mod err;
pub mod iter;
pub mod merge;
mod parse;
pub mod set;
pub mod span;

pub use bounds::BoundBuf;
pub use err::{
    EmptySetError, IndexOutOfRangeError, InvalidIntervalError, ParseProcSetError, ZeroStepError,
};
pub use iter::{ElementIter, IntervalIter};
pub use merge::{MergeOp, merge, reduce_union};
pub use set::ProcSet;
pub use span::ProcRange;

/// The unsigned scalar a set's interval boundaries are made of.
///
/// Blanket-implemented for every unsigned primitive integer; `u32` is the
/// default and matches the index width schedulers typically use.
pub trait Boundary:
    PrimInt + Unsigned + FromPrimitive + Hash + Send + Sync + Debug + Display
{
}
impl<T> Boundary for T where
    T: PrimInt + Unsigned + FromPrimitive + Hash + Send + Sync + Debug + Display
{
}

/// Builds a [`ProcSet`] from a list of heterogeneous interval literals.
///
/// Every item is converted through its `TryFrom` impl for `ProcSet`:
/// scalars, closed `(lo, hi)` pairs, `lo..hi` / `lo..=hi` ranges and
/// other sets all work. The parts are united via balanced pairwise
/// reduction.
///
/// # Panics
///
/// Panics if a literal is invalid (reversed bounds, or bounds in the
/// reserved top of the boundary domain).
///
/// # Examples
///
/// ```
/// use procset_core::{ProcSet, procset};
///
/// let set = procset![1u32, (3, 5), 8..=9];
/// assert_eq!(set.to_string(), "1 3-5 8-9");
///
/// let empty: ProcSet = procset![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! procset {
    () => {
        $crate::ProcSet::new()
    };
    ($($item:expr),+ $(,)?) => {{
        let parts: ::std::vec::Vec<$crate::ProcSet<_>> = ::std::vec![
            $($crate::ProcSet::try_from($item).expect("invalid interval literal")),+
        ];
        parts.into_iter().collect::<$crate::ProcSet<_>>()
    }};
}
