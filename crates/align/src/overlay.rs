//! Render overlay: annotate-without-mutate display layer.
//!
//! An overlay records, for spans of a document, how many visual lines the
//! span should occupy when rendered. The authoritative text is never
//! touched; [`RenderOverlay::render`] produces the displayed text by
//! substituting each annotated span with that many blank lines.
//!
//! ```text
//! Text:                         Rendered (span 1..3 -> 1 line, span 4..5 -> 0):
//! Row 0: a                      Row 0: a
//! Row 1: // hidden              Row 1:
//! Row 2: // hidden              Row 2: b
//! Row 3: b
//! ```
//!
//! Annotations carry an [`OwnerId`] so that everything a session applied can
//! be removed in one call without touching annotations owned by others.

use serde::{Deserialize, Serialize};
use sidedoc_chunker::{line_count, Position, Span};

/// Identity of whoever applied an annotation (one per session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId(pub u64);

/// A single display substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Who applied it
    pub owner: OwnerId,

    /// Span of the underlying text that is not rendered
    pub span: Span,

    /// Number of blank lines rendered in its place
    pub visual_lines: usize,
}

/// Ordered list of display substitutions over one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOverlay {
    annotations: Vec<Annotation>,
}

impl RenderOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an annotation, keeping the list ordered by span start
    pub fn insert(&mut self, annotation: Annotation) {
        let idx = self
            .annotations
            .partition_point(|a| a.span.start <= annotation.span.start);
        self.annotations.insert(idx, annotation);
    }

    /// Remove every annotation applied by `owner`, returning how many were removed
    pub fn remove_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.annotations.len();
        self.annotations.retain(|a| a.owner != owner);
        before - self.annotations.len()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Annotations applied by `owner`
    pub fn owned_by(&self, owner: OwnerId) -> impl Iterator<Item = &Annotation> + '_ {
        self.annotations.iter().filter(move |a| a.owner == owner)
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Produce the displayed text of `text` with every annotation applied
    pub fn render(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for annotation in &self.annotations {
            let span = annotation.span;
            if span.start < cursor {
                log::debug!("skipping overlapping annotation {span:?}");
                continue;
            }
            out.push_str(&text[cursor..span.start]);
            out.extend(std::iter::repeat('\n').take(annotation.visual_lines));
            cursor = span.end;
        }
        out.push_str(&text[cursor..]);
        out
    }

    /// Visible line count of the rendered text up to `upto`.
    ///
    /// Annotations that straddle `upto` contribute nothing.
    pub fn visible_lines(&self, text: &str, upto: Position) -> usize {
        self.walk(text, upto).0
    }

    /// Displayed rows up to `upto`: visible lines plus one for an
    /// unterminated last line
    pub fn visible_rows(&self, text: &str, upto: Position) -> usize {
        let (lines, last) = self.walk(text, upto);
        lines + usize::from(last.is_some_and(|c| c != '\n'))
    }

    /// Line breaks and last displayed char of the rendered prefix
    fn walk(&self, text: &str, upto: Position) -> (usize, Option<char>) {
        let mut lines = 0;
        let mut last = None;
        let mut cursor = 0;
        for annotation in &self.annotations {
            let span = annotation.span;
            if span.start < cursor {
                continue;
            }
            if span.start >= upto {
                break;
            }
            let shown = &text[cursor..span.start];
            lines += line_count(shown);
            last = shown.chars().next_back().or(last);
            cursor = span.end.min(upto);
            if span.end <= upto && annotation.visual_lines > 0 {
                lines += annotation.visual_lines;
                last = Some('\n');
            }
        }
        if cursor < upto {
            let shown = &text[cursor..upto];
            lines += line_count(shown);
            last = shown.chars().next_back().or(last);
        }
        (lines, last)
    }
}
