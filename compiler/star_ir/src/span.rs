//! Source location spans.
//!
//! Byte offsets into the template source. Tooling (completion, highlighting)
//! slices the source with these, so they always land on UTF-8
//! boundaries: every delimiter the lexer splits on is ASCII.

use std::fmt;

/// Half-open byte range `[start, end)` into the template source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized nodes (e.g. variable replacement).
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create from a `usize` byte range, saturating at `u32::MAX`.
    ///
    /// Templates are short host strings; saturation only matters for
    /// pathological multi-gigabyte inputs, where spans stop being exact
    /// but lexing stays correct.
    #[inline]
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        let clamp = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        Span {
            start: clamp(range.start),
            end: clamp(range.end),
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Inclusive on both ends: a cursor sitting right after the last
    /// character of a name still counts as "inside" it.
    #[inline]
    pub fn touches(&self, offset: u32) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let merged = Span::new(10, 20).merge(Span::new(15, 30));
        assert_eq!(merged, Span::new(10, 30));
        assert_eq!(merged.len(), 20);
    }

    #[test]
    fn test_span_touches_end() {
        let span = Span::new(3, 7);
        assert!(span.touches(3));
        assert!(span.touches(7));
        assert!(!span.touches(8));
        assert!(!span.touches(2));
    }

    #[test]
    fn test_from_range() {
        assert_eq!(Span::from_range(2..5), Span::new(2, 5));
        assert_eq!(Span::new(2, 5).to_range(), 2..5);
        assert!(Span::DUMMY.is_empty());
    }
}
