//! Source text positions.
//!
//! Positions inside a compilation unit are byte offsets ([`TextSize`]).
//! They order comments against the package clause and locate identifier
//! occurrences; [`LineIndex`] turns them into 1-based `line:col` text when
//! the file contents are available.

use std::fmt;

pub use text_size::TextSize;

/// A line and column position in source text.
///
/// Both are 0-indexed internally and displayed 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineCol {
    pub line: u32,
    /// Column in UTF-8 bytes.
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// Index for converting byte offsets into line/column positions.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Returns `None` for offsets past the end of the text.
    pub fn line_col(&self, offset: TextSize) -> Option<LineCol> {
        if offset > self.len {
            return None;
        }
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        Some(LineCol {
            line: line as u32,
            col: col.into(),
        })
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.line_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }
}
