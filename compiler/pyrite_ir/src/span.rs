//! Source location spans and line/column positions.
//!
//! Two coordinate systems coexist:
//! - [`Span`]: byte offsets into the source buffer (what the tokenizer sees)
//! - [`Pos`] / [`Location`]: 1-based line plus 0-based *byte* column, the
//!   shape syntax tree nodes carry. Conversion to character columns happens
//!   only when an error is reported.

use std::fmt;

/// Byte range in a source buffer.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from buffer start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create a point span (zero-length).
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Convert to a `std::ops::Range` for slicing the source buffer.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A line/column position. Lines are 1-based, columns are 0-based byte offsets
/// from the start of the line.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
}

impl Pos {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Pos { line, col }
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Start and end position of a syntax tree node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Location {
    pub start: Pos,
    pub end: Pos,
}

impl Location {
    #[inline]
    pub const fn new(start: Pos, end: Pos) -> Self {
        Location { start, end }
    }

    /// Location covering `self` through the end of `other`.
    #[inline]
    #[must_use]
    pub fn to(self, other: Location) -> Location {
        Location {
            start: self.start,
            end: other.end,
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.start, self.end)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Location, Span};
    crate::static_assert_size!(Span, 8);
    crate::static_assert_size!(Location, 16);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic() {
        let span = Span::new(10, 20);
        assert_eq!(span.to_range(), 10..20);
        assert_eq!(format!("{span}"), "10..20");
    }

    #[test]
    fn test_span_point() {
        let point = Span::point(42);
        assert_eq!(point.to_range(), 42..42);
        assert_eq!(format!("{point:?}"), "42..42");
    }

    #[test]
    fn test_location_to() {
        let a = Location::new(Pos::new(1, 0), Pos::new(1, 3));
        let b = Location::new(Pos::new(2, 4), Pos::new(2, 9));
        let joined = a.to(b);
        assert_eq!(joined.start, Pos::new(1, 0));
        assert_eq!(joined.end, Pos::new(2, 9));
        assert_eq!(format!("{joined:?}"), "1:0-2:9");
    }

    #[test]
    fn test_pos_ordering() {
        assert!(Pos::new(1, 9) < Pos::new(2, 0));
        assert!(Pos::new(3, 1) > Pos::new(3, 0));
    }
}
