//! Source positions.
//!
//! Tokens carry a byte-based [`TextSpan`]. Only when a diagnostic is
//! rendered is a span resolved to a one-based line and column, through a
//! [`LineMap`] borrowed over the same source buffer.

use std::fmt;

/// Byte offset into a source buffer.
pub type TextPos = u32;

/// A half-open byte range `[start, start + length)`.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start, "span bounds reversed: {}..{}", start, end);
        Self::new(start, end.saturating_sub(start))
    }

    /// Zero-width span, used for end of input.
    #[inline]
    pub fn empty(at: TextPos) -> Self {
        Self::new(at, 0)
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// Zero-based line and character column. Columns count `char`s, so a
/// multi-byte rune advances the column by one.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    pub line: u32,
    pub character: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// `(line, column)` as shown to users.
    pub fn one_based(&self) -> (u32, u32) {
        (self.line + 1, self.character + 1)
    }
}

impl fmt::Display for LineAndColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.one_based();
        write!(f, "{}:{}", line, column)
    }
}

/// Line starts of a source buffer, found with `memchr`.
#[derive(Debug, Clone)]
pub struct LineMap<'src> {
    source: &'src str,
    line_starts: Vec<TextPos>,
}

impl<'src> LineMap<'src> {
    pub fn new(source: &'src str) -> Self {
        let breaks = memchr::memchr_iter(b'\n', source.as_bytes()).map(|at| (at + 1) as TextPos);
        Self {
            source,
            line_starts: std::iter::once(0).chain(breaks).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based line holding `pos`. A line feed belongs to the line it ends.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        let after = self.line_starts.partition_point(|&start| start <= pos);
        after.saturating_sub(1) as u32
    }

    /// Resolve `pos`, clamped to the end of the source.
    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let pos = pos.min(self.source.len() as TextPos);
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize] as usize;
        let prefix = &self.source.as_bytes()[line_start..pos as usize];
        // Continuation bytes never start a char.
        let character = prefix.iter().filter(|&&byte| byte & 0xC0 != 0x80).count();
        LineAndColumn::new(line, character as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_bounds() {
        let span = TextSpan::from_bounds(5, 15);
        assert_eq!(span, TextSpan::new(5, 10));
        assert_eq!(span.end(), 15);
        assert_eq!(format!("{:?}", span), "5..15");
        assert!(TextSpan::empty(3).is_empty());
        assert!(!span.is_empty());
    }

    #[test]
    fn test_line_of() {
        let map = LineMap::new("puts 1\nputs 2\n\nend");
        assert_eq!(map.line_count(), 4);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(6), 0);
        assert_eq!(map.line_of(7), 1);
        assert_eq!(map.line_of(14), 2);
        assert_eq!(map.line_of(15), 3);
    }

    #[test]
    fn test_columns_count_chars() {
        let map = LineMap::new("x = 1\né = :ü");
        // `é` is two bytes but one column.
        assert_eq!(map.line_and_column_of(8), LineAndColumn::new(1, 1));
        assert_eq!(map.line_and_column_of(11), LineAndColumn::new(1, 4));
        assert_eq!(map.line_and_column_of(99), LineAndColumn::new(1, 6));
        assert_eq!(map.line_and_column_of(8).to_string(), "2:2");
    }
}
