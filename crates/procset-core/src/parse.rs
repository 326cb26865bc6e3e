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

//! Textual representation of processor sets.
//!
//! The wire format is a list of closed intervals: tokens separated by an
//! outer separator (default `" "`), each token either a bare index or
//! `lo-hi` with an inner separator (default `"-"`). `"0-3 5 7-9"` is the
//! set containing 0..=3, 5 and 7..=9. The empty set renders as the empty
//! string and the empty string parses back to the empty set.

use crate::Boundary;
use crate::err::ParseProcSetError;
use crate::set::ProcSet;
use crate::span::ProcRange;
use std::fmt;
use std::str::FromStr;

impl<B: Boundary> ProcSet<B> {
    /// Parses a processor-set string with custom separators.
    ///
    /// Overlapping or unsorted tokens are legal and are coalesced into
    /// canonical form.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set = ProcSet::<u32>::parse_with("0:3,7", ":", ",").unwrap();
    /// assert_eq!(set.to_string(), "0-3 7");
    /// assert!(ProcSet::<u32>::parse_with("0;x", ";", ",").is_err());
    /// ```
    pub fn parse_with(
        text: &str,
        in_sep: &str,
        out_sep: &str,
    ) -> Result<Self, ParseProcSetError<B>> {
        if text.is_empty() {
            return Ok(Self::new());
        }
        let ranges = text
            .split(out_sep)
            .map(|token| parse_token(token, in_sep))
            .collect::<Result<Vec<ProcRange<B>>, _>>()?;
        Ok(ranges.into_iter().collect())
    }

    /// Renders the set with custom separators.
    ///
    /// Each interval renders as `lo<in_sep>hi`, a singleton as the bare
    /// index, and intervals are joined with `out_sep`.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = "0-3 5".parse().unwrap();
    /// assert_eq!(set.format_with("..", ", "), "0..3, 5");
    /// ```
    pub fn format_with(&self, in_sep: &str, out_sep: &str) -> String {
        let mut out = String::new();
        for (i, range) in self.intervals().enumerate() {
            if i > 0 {
                out.push_str(out_sep);
            }
            out.push_str(&range.lower().to_string());
            if range.lower() != range.upper() {
                out.push_str(in_sep);
                out.push_str(&range.upper().to_string());
            }
        }
        out
    }
}

/// One token: a bare index or `lo<in_sep>hi`.
fn parse_token<B: Boundary>(
    token: &str,
    in_sep: &str,
) -> Result<ProcRange<B>, ParseProcSetError<B>> {
    if token.is_empty() {
        return Err(ParseProcSetError::EmptyToken);
    }
    let mut parts = token.split(in_sep);
    let lower = parse_bound(parts.next().unwrap_or_default())?;
    match (parts.next(), parts.next()) {
        (None, _) => Ok(ProcRange::singleton(lower)?),
        (Some(second), None) => {
            let upper = parse_bound(second)?;
            Ok(ProcRange::new(lower, upper)?)
        }
        (Some(_), Some(_)) => Err(ParseProcSetError::MalformedToken(token.to_string())),
    }
}

/// One unsigned decimal bound.
fn parse_bound<B: Boundary>(text: &str) -> Result<B, ParseProcSetError<B>> {
    B::from_str_radix(text, 10).map_err(|_| ParseProcSetError::InvalidBound(text.to_string()))
}

impl<B: Boundary> FromStr for ProcSet<B> {
    type Err = ParseProcSetError<B>;

    /// Parses with the default separators: `-` inside a token, a single
    /// space between tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use procset_core::ProcSet;
    ///
    /// let set: ProcSet = "0-3 5 7-9".parse().unwrap();
    /// assert_eq!(set.interval_count(), 3);
    /// assert_eq!(set.len(), 7);
    /// ```
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, "-", " ")
    }
}

impl<B: Boundary> fmt::Display for ProcSet<B> {
    /// Renders with the default separators; the empty set renders empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.intervals().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_tokens() {
        let set: ProcSet = "0-3 5 7-9".parse().unwrap();
        let pairs: Vec<_> = set.intervals().map(|r| (r.lower(), r.upper())).collect();
        assert_eq!(pairs, vec![(0, 3), (5, 5), (7, 9)]);
        assert_eq!(set.interval_count(), 3);
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn empty_string_is_the_empty_set() {
        let set: ProcSet = "".parse().unwrap();
        assert!(set.is_empty());
        assert_eq!(set.to_string(), "");
    }

    #[test]
    fn unsorted_and_overlapping_tokens_coalesce() {
        let set: ProcSet = "7-9 0-5 4-8".parse().unwrap();
        assert_eq!(set.to_string(), "0-9");
    }

    #[test]
    fn singleton_renders_bare() {
        let set: ProcSet = "3-3".parse().unwrap();
        assert_eq!(set.to_string(), "3");
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        assert!(matches!(
            "0-x".parse::<ProcSet>(),
            Err(ParseProcSetError::InvalidBound(t)) if t == "x"
        ));
        assert!(matches!(
            "abc".parse::<ProcSet>(),
            Err(ParseProcSetError::InvalidBound(t)) if t == "abc"
        ));
    }

    #[test]
    fn rejects_structural_noise() {
        assert!(matches!(
            "1-2-3".parse::<ProcSet>(),
            Err(ParseProcSetError::MalformedToken(t)) if t == "1-2-3"
        ));
        assert!(matches!(
            "0-3  5".parse::<ProcSet>(),
            Err(ParseProcSetError::EmptyToken)
        ));
        // a leading separator leaves an empty bound component
        assert!(matches!(
            "-3".parse::<ProcSet>(),
            Err(ParseProcSetError::InvalidBound(t)) if t.is_empty()
        ));
    }

    #[test]
    fn rejects_reversed_interval_bounds() {
        assert!(matches!(
            "9-3".parse::<ProcSet>(),
            Err(ParseProcSetError::InvalidInterval(_))
        ));
    }

    #[test]
    fn rejects_bounds_in_the_reserved_top() {
        let text = format!("0-{}", u32::MAX - 1);
        assert!(matches!(
            text.parse::<ProcSet>(),
            Err(ParseProcSetError::InvalidInterval(_))
        ));
    }

    #[test]
    fn custom_separators_round_trip() {
        let set = ProcSet::<u32>::parse_with("0..3|5|7..9", "..", "|").unwrap();
        assert_eq!(set.format_with("..", "|"), "0..3|5|7..9");
        assert_eq!(set.to_string(), "0-3 5 7-9");
    }

    #[test]
    fn default_round_trip_for_non_empty_sets() {
        for text in ["0", "0-3", "0-3 5", "0-3 5 7-9", "1 3 5 7 9"] {
            let set: ProcSet = text.parse().unwrap();
            assert_eq!(set.to_string(), text);
            let reparsed: ProcSet = set.to_string().parse().unwrap();
            assert_eq!(reparsed, set);
        }
    }

    #[test]
    fn parse_accepts_narrow_boundary_types() {
        let set: ProcSet<u8> = "0-3 9".parse().unwrap();
        assert_eq!(set.len(), 5);
        assert!("260".parse::<ProcSet<u8>>().is_err());
    }
}
