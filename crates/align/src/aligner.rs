//! Padding computation for side-by-side comment/code panes.
//!
//! The aligner regroups chunks into units. A unit is the blank lead-in
//! before a comment, the comment itself, and the code body that follows it:
//!
//! ```text
//! chunk 0: [ body_0 | lead_0 ] comment_0
//! chunk 1: [ body_1 | lead_1 ] comment_1
//! chunk 2: [ body_2 ]
//!
//! unit 0:                      body_0
//! unit 1: lead_0  comment_0    body_1
//! unit 2: lead_1  comment_1    body_2
//! ```
//!
//! For each unit it decides how many of the body's placeholder lines the
//! comment pane shows, how many lead-in line breaks the comment pane
//! collapses, and how many blank lines the hidden comment leaves in the code
//! pane, so that both panes have the same visible height at the end of every
//! unit (plus the outstanding carry under
//! [`DeficitStrategy::BorrowForward`]).

use crate::config::{AlignConfig, DeficitStrategy};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use sidedoc_chunker::{Chunk, CommentSpan, Span};

/// Running imbalance between the panes, in rows the comment pane is ahead
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddingState {
    pub carry: usize,
}

/// Decisions taken for one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitAlignment {
    /// Whitespace-only lead-in copied verbatim into the mirror
    pub lead: Option<Span>,

    /// The comment this unit renders
    pub comment: Option<CommentSpan>,

    /// Span hidden in the code pane: the outer comment plus its indentation
    pub hidden: Option<Span>,

    /// Code documented by the comment
    pub body: Span,

    /// Line breaks in the lead-in
    pub lead_lines: usize,

    /// Lines the comment occupies in the mirror
    pub comment_lines: usize,

    /// Lines of the code body, counting an unterminated final line
    pub code_lines: usize,

    /// `code_lines - comment_lines`
    pub padding: isize,

    /// Lead-in line breaks collapsed to pay off incoming carry
    pub absorbed: usize,

    /// Lead-in line breaks collapsed to make room for this comment
    pub reclaimed: usize,

    /// Blank lines shown in place of the hidden comment
    pub hidden_lines: usize,

    /// Visible placeholder lines for the body in the mirror
    pub body_visible_lines: usize,

    /// Carry after this unit
    pub carry: usize,
}

impl UnitAlignment {
    /// Total lead-in line breaks collapsed in the mirror
    pub fn collapsed_lead_lines(&self) -> usize {
        self.absorbed + self.reclaimed
    }
}

/// Split a code span that precedes a comment into `(body, lead)`.
///
/// The lead starts at the line after the last non-blank character, or covers
/// the whole span when it is blank.
pub fn split_lead(text: &str, code: Span) -> (Span, Span) {
    let slice = code.slice(text);
    let Some(last) = slice.rfind(|c: char| !c.is_whitespace()) else {
        return (Span::empty(code.start), code);
    };

    let lead_start = slice[last..]
        .find('\n')
        .map_or(code.end, |nl| code.start + last + nl + 1);
    (
        Span::new(code.start, lead_start),
        Span::new(lead_start, code.end),
    )
}

/// Extend a comment's outer span back over indentation, stopping at `floor`
fn hidden_span(text: &str, outer: Span, floor: usize) -> Span {
    let bytes = text.as_bytes();
    let mut start = outer.start;
    while start > floor && (bytes[start - 1] == b' ' || bytes[start - 1] == b'\t') {
        start -= 1;
    }
    Span::new(start, outer.end)
}

/// Lazy sequence of [`UnitAlignment`]s over a chunk stream
pub struct Aligner<'a, I> {
    text: &'a str,
    chunks: I,
    config: AlignConfig,
    padding: PaddingState,
    pending: Option<(Span, CommentSpan)>,
    done: bool,
}

impl<'a, I> Aligner<'a, I>
where
    I: Iterator<Item = sidedoc_chunker::Result<Chunk>>,
{
    /// Start a pass with a fresh padding state
    pub fn new(text: &'a str, chunks: I, config: AlignConfig) -> Self {
        Self {
            text,
            chunks,
            config,
            padding: PaddingState::default(),
            pending: None,
            done: false,
        }
    }

    /// Padding state after the units consumed so far
    pub fn padding(&self) -> PaddingState {
        self.padding
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Whether `body` ends the document on a line with no terminator
    fn ends_unterminated(&self, body: Span) -> bool {
        !body.is_empty() && body.end == self.text.len() && !self.text.ends_with('\n')
    }

    fn align(
        &mut self,
        lead: Option<Span>,
        comment: Option<CommentSpan>,
        body: Span,
    ) -> UnitAlignment {
        let lead_lines = lead.map_or(0, |l| l.line_count(self.text));
        let comment_lines = comment.map_or(0, |c| {
            let terminator = usize::from(self.config.comment_ends_with_terminator);
            c.inner.line_count(self.text) + terminator
        });
        let code_lines = body.line_count(self.text) + usize::from(self.ends_unterminated(body));
        let mut hidden_lines = 0;

        let mut carry = self.padding.carry;
        let absorbed = carry.min(lead_lines);
        carry -= absorbed;
        if comment.is_some() && carry > 0 {
            hidden_lines += carry;
            carry = 0;
        }

        let padding = code_lines as isize - comment_lines as isize;
        let (reclaimed, body_visible_lines) = if padding >= 0 {
            (0, padding.unsigned_abs())
        } else {
            let need = padding.unsigned_abs();
            let reclaimed = need.min(lead_lines - absorbed);
            let deficit = need - reclaimed;
            match self.config.deficit {
                DeficitStrategy::HideInPlace => hidden_lines += deficit,
                DeficitStrategy::BorrowForward => carry += deficit,
            }
            (reclaimed, 0)
        };

        self.padding.carry = carry;
        let hidden = comment.map(|c| {
            let floor = lead.map_or(c.outer.start, |l| l.start);
            hidden_span(self.text, c.outer, floor)
        });

        log::trace!(
            "unit body={body:?} code={code_lines} comment={comment_lines} padding={padding} \
             reclaimed={reclaimed} hidden={hidden_lines} carry={carry}"
        );

        UnitAlignment {
            lead,
            comment,
            hidden,
            body,
            lead_lines,
            comment_lines,
            code_lines,
            padding,
            absorbed,
            reclaimed,
            hidden_lines,
            body_visible_lines,
            carry,
        }
    }
}

impl<I> Iterator for Aligner<'_, I>
where
    I: Iterator<Item = sidedoc_chunker::Result<Chunk>>,
{
    type Item = Result<UnitAlignment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let chunk = match self.chunks.next() {
            Some(Ok(chunk)) => chunk,
            Some(Err(e)) => {
                self.done = true;
                return Some(Err(e.into()));
            }
            None => {
                self.done = true;
                // A well-formed chunk stream always ends with a code-only chunk
                return self.pending.take().map(|(lead, comment)| {
                    let body = Span::empty(comment.outer.end);
                    Ok(self.align(Some(lead), Some(comment), body))
                });
            }
        };

        let (body, next_lead) = match chunk.comment {
            Some(_) => {
                let (body, lead) = split_lead(self.text, chunk.code);
                (body, Some(lead))
            }
            None => (chunk.code, None),
        };

        let (lead, comment) = match self.pending.take() {
            Some((lead, comment)) => (Some(lead), Some(comment)),
            None => (None, None),
        };
        self.pending = next_lead.zip(chunk.comment);

        if chunk.comment.is_none() {
            self.done = true;
        }
        Some(Ok(self.align(lead, comment, body)))
    }
}
