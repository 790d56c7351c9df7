//! Line and column utilities for error reporting.
//!
//! Token positions carry byte columns. Reported error columns are character
//! columns, so conversion happens here, once, when an error is raised.
//!
//! ## Performance
//!
//! [`LineOffsetTable`] pre-computes line start offsets for O(log L) lookup
//! instead of O(n) scanning per query.

use pyrite_ir::Pos;

/// Pre-computed line offset table for line/column lookup.
///
/// # Example
///
/// ```
/// use pyrite_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.line_from_offset(0), 1);
/// assert_eq!(table.line_from_offset(6), 2);
/// assert_eq!(table.line_text(source, 3), Some("line3"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start (0-indexed lines internally).
    /// offsets[0] = 0 (line 1 starts at byte 0)
    /// offsets[1] = byte after first \n (line 2 start)
    /// etc.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// Get 1-based line number from a byte offset using binary search.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// Get the byte offset of a line start (1-based line number).
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Line/byte-column position of a byte offset.
    pub fn position(&self, offset: u32) -> Pos {
        let line = self.line_from_offset(offset);
        let start = self.line_start_offset(line).unwrap_or(0);
        Pos::new(line, offset.saturating_sub(start))
    }

    /// Text of a 1-based line, without its line terminator.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> Option<&'s str> {
        let start = self.line_start_offset(line)? as usize;
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| next as usize);
        let text = source.get(start..end)?;
        let text = text.strip_suffix('\n').unwrap_or(text);
        Some(text.strip_suffix('\r').unwrap_or(text))
    }
}

/// Convert a byte column within `line` to a 0-based character column.
///
/// The offset is clamped to the line length. An offset that falls inside a
/// multi-byte character counts the partial sequence as one (replacement)
/// character, matching a lossy decode of the prefix.
pub fn byte_offset_to_char_offset(line: &str, byte_offset: usize) -> usize {
    let byte_offset = byte_offset.min(line.len());
    if line.is_char_boundary(byte_offset) {
        return line[..byte_offset].chars().count();
    }
    String::from_utf8_lossy(&line.as_bytes()[..byte_offset])
        .chars()
        .count()
}

#[cfg(test)]
mod tests;
