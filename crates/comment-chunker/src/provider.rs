//! Comment boundary providers.
//!
//! A provider answers two questions about one document: where the next
//! standalone comment starts (at or after a cursor), and which part of that
//! comment is prose rather than delimiters. Everything else is left to the
//! [`Chunker`](crate::Chunker).

use crate::ast_provider::AstBoundaryProvider;
use crate::config::{ChunkerConfig, CommentFilter};
use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::types::{Position, Span};
use regex::Regex;

/// Locates comment spans inside a single document
pub trait BoundaryProvider {
    /// Next comment whose outer span starts at or after `from`, or `None` when exhausted
    fn next_comment(&mut self, from: Position) -> Option<Span>;

    /// Refine an outer span (as returned by `next_comment`) to its delimiter-free text
    fn inner_text_of(&self, outer: Span) -> Span;
}

impl<P: BoundaryProvider + ?Sized> BoundaryProvider for Box<P> {
    fn next_comment(&mut self, from: Position) -> Option<Span> {
        (**self).next_comment(from)
    }

    fn inner_text_of(&self, outer: Span) -> Span {
        (**self).inner_text_of(outer)
    }
}

/// Pick the best provider for `language`, falling back to prefix scanning
pub fn provider_for<'a>(
    language: Language,
    text: &'a str,
    config: &ChunkerConfig,
) -> Result<Box<dyn BoundaryProvider + 'a>> {
    config.validate().map_err(ChunkerError::invalid_config)?;
    if !config.allows_language(language.as_str()) {
        return Err(ChunkerError::unsupported_language(language.as_str()));
    }

    if language.supports_ast() {
        match AstBoundaryProvider::new(language, text, config.comment_filter) {
            Ok(provider) => return Ok(Box::new(provider)),
            Err(e) => {
                log::warn!("AST comment detection failed, falling back to prefix scan: {e}");
            }
        }
    }

    if language.line_comment_prefixes().is_empty() {
        log::warn!(
            "no comment syntax known for {}, document will have no comments",
            language.as_str()
        );
    }

    Ok(Box::new(PrefixBoundaryProvider::new(
        language,
        text,
        config.comment_filter,
    )?))
}

/// Sorted list of outer comment spans with cursor lookup
#[derive(Debug, Default)]
pub(crate) struct CommentIndex {
    spans: Vec<Span>,
}

impl CommentIndex {
    pub(crate) fn new(mut spans: Vec<Span>) -> Self {
        spans.sort_by_key(|span| span.start);
        spans.dedup_by_key(|span| span.start);
        Self { spans }
    }

    pub(crate) fn next_from(&self, from: Position) -> Option<Span> {
        let idx = self.spans.partition_point(|span| span.start < from);
        self.spans.get(idx).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.spans.len()
    }
}

/// Check that only blanks precede `pos` on its line
pub(crate) fn starts_line(text: &str, pos: Position) -> bool {
    text[..pos]
        .bytes()
        .rev()
        .take_while(|&b| b != b'\n')
        .all(|b| b == b' ' || b == b'\t')
}

/// Extend a comment end over trailing blanks and one line terminator.
///
/// Only extends when nothing but blanks follows on the same line.
pub(crate) fn own_line_end(text: &str, end: Position) -> Position {
    if text[..end].ends_with('\n') {
        return end;
    }

    let bytes = text.as_bytes();
    let mut idx = end;
    while idx < bytes.len() && (bytes[idx] == b' ' || bytes[idx] == b'\t') {
        idx += 1;
    }
    if idx < bytes.len() && bytes[idx] == b'\r' {
        idx += 1;
    }
    match bytes.get(idx) {
        Some(b'\n') => idx + 1,
        None => idx,
        Some(_) => end,
    }
}

/// Delimiter-free text of a comment, using the language's comment syntax
pub(crate) fn inner_span(text: &str, language: Language, outer: Span) -> Span {
    let body = outer.slice(text);
    let bytes = text.as_bytes();

    if let Some(opener) = language
        .block_comment_openers()
        .iter()
        .find(|opener| body.starts_with(**opener))
    {
        if let Some(close) = body.rfind("*/") {
            let mut start = outer.start + opener.len();
            let end_limit = outer.start + close;
            while start < end_limit && (bytes[start] == b' ' || bytes[start] == b'\t') {
                start += 1;
            }
            if text[start..end_limit].starts_with("\r\n") {
                start += 2;
            } else if text[start..end_limit].starts_with('\n') {
                start += 1;
            }
            let mut end = end_limit;
            while end > start && bytes[end - 1].is_ascii_whitespace() {
                end -= 1;
            }
            return Span::new(start.min(end), end);
        }
    }

    let mut start = outer.start;
    if let Some(prefix) = language
        .line_comment_prefixes()
        .iter()
        .find(|prefix| body.starts_with(**prefix))
    {
        start += prefix.len();
        if bytes.get(start) == Some(&b' ') && start < outer.end {
            start += 1;
        }
    }

    let mut end = body
        .find('\n')
        .map_or(outer.end, |nl| outer.start + nl)
        .max(start);
    while end > start && (bytes[end - 1] == b'\r' || bytes[end - 1] == b' ') {
        end -= 1;
    }
    Span::new(start, end)
}

/// Regex-driven provider for languages without a tree-sitter grammar.
///
/// Recognizes line comments that open a line and, for C-like languages,
/// block comments that open a line.
pub struct PrefixBoundaryProvider<'a> {
    text: &'a str,
    language: Language,
    comments: CommentIndex,
}

impl<'a> PrefixBoundaryProvider<'a> {
    /// Scan `text` for standalone comments
    pub fn new(language: Language, text: &'a str, filter: CommentFilter) -> Result<Self> {
        let openers: Vec<String> = language
            .block_comment_openers()
            .iter()
            .chain(language.line_comment_prefixes())
            .map(|delim| regex::escape(delim))
            .collect();

        let mut spans = Vec::new();
        if !openers.is_empty() {
            let pattern = format!(r"(?m)^[ \t]*({})", openers.join("|"));
            let re = Regex::new(&pattern).map_err(|e| ChunkerError::parse(e.to_string()))?;

            let mut resume = 0;
            for caps in re.captures_iter(text) {
                let Some(delim) = caps.get(1) else {
                    continue;
                };
                if delim.start() < resume {
                    continue;
                }

                let is_block = language
                    .block_comment_openers()
                    .contains(&delim.as_str());
                let raw_end = if is_block {
                    match text[delim.end()..].find("*/") {
                        Some(close) => delim.end() + close + 2,
                        // Unterminated block comments stay code
                        None => continue,
                    }
                } else {
                    text[delim.start()..]
                        .find('\n')
                        .map_or(text.len(), |nl| delim.start() + nl)
                };

                let outer = Span::new(delim.start(), own_line_end(text, raw_end));
                resume = outer.end;

                if filter == CommentFilter::DocOnly
                    && !language.is_doc_comment(&text[delim.start()..raw_end])
                {
                    continue;
                }
                spans.push(outer);
            }
        }

        log::debug!(
            "prefix scan found {} {} comments",
            spans.len(),
            language.as_str()
        );

        Ok(Self {
            text,
            language,
            comments: CommentIndex::new(spans),
        })
    }

    /// Number of comments found
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

impl BoundaryProvider for PrefixBoundaryProvider<'_> {
    fn next_comment(&mut self, from: Position) -> Option<Span> {
        self.comments.next_from(from)
    }

    fn inner_text_of(&self, outer: Span) -> Span {
        inner_span(self.text, self.language, outer)
    }
}
