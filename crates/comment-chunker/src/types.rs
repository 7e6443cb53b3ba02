use serde::{Deserialize, Serialize};

/// Byte offset into a document's UTF-8 text
pub type Position = usize;

/// A half-open byte range `[start, end)` into a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Starting byte offset (inclusive)
    pub start: Position,

    /// Ending byte offset (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create an empty span at `at`
    #[must_use]
    pub const fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Length in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span covers nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if the span contains a byte offset
    #[must_use]
    pub const fn contains(&self, offset: Position) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if `other` lies entirely inside this span
    #[must_use]
    pub const fn encloses(&self, other: Self) -> bool {
        other.start >= self.start && other.end <= self.end && other.start <= other.end
    }

    /// Borrow the text covered by this span
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// Number of line terminators inside this span
    #[must_use]
    pub fn line_count(&self, text: &str) -> usize {
        line_count(self.slice(text))
    }
}

/// Count line terminators in `text`
#[must_use]
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Boundaries of one comment: `outer` includes delimiters, `inner` is the prose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSpan {
    /// Comment including delimiters (and the line terminator it owns)
    pub outer: Span,

    /// Documentation text proper
    pub inner: Span,
}

/// One contiguous piece of a document: code followed by an optional comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Code between the previous comment (or document start) and the next comment
    pub code: Span,

    /// Comment that follows the code; absent only for the final chunk
    pub comment: Option<CommentSpan>,
}

impl Chunk {
    /// Create a chunk ending in a comment
    #[must_use]
    pub const fn new(code: Span, comment: CommentSpan) -> Self {
        Self {
            code,
            comment: Some(comment),
        }
    }

    /// Create the trailing code-only chunk
    #[must_use]
    pub const fn trailing(code: Span) -> Self {
        Self {
            code,
            comment: None,
        }
    }

    /// Byte range covered by the whole chunk
    #[must_use]
    pub fn span(&self) -> Span {
        let end = self.comment.map_or(self.code.end, |c| c.outer.end);
        Span::new(self.code.start, end)
    }

    /// Inner comment span, if any
    #[must_use]
    pub fn comment_inner(&self) -> Option<Span> {
        self.comment.map(|c| c.inner)
    }

    /// Outer comment span, if any
    #[must_use]
    pub fn comment_outer(&self) -> Option<Span> {
        self.comment.map(|c| c.outer)
    }
}
