use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::provider::{provider_for, BoundaryProvider};
use crate::types::{Chunk, CommentSpan, Position, Span};
use std::path::Path;

/// Main chunker interface for splitting documents into code/comment chunks
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a new chunker with configuration
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::invalid_config)?;
        Ok(Self { config })
    }

    /// Lazily walk `text` with `provider`, yielding chunks in offset order
    pub fn chunks<'a, P>(&self, text: &'a str, provider: &'a mut P) -> Chunks<'a, P>
    where
        P: BoundaryProvider + ?Sized,
    {
        Chunks {
            text,
            provider,
            cursor: 0,
            done: false,
        }
    }

    /// Walk the whole document eagerly
    pub fn collect_chunks<P>(&self, text: &str, provider: &mut P) -> Result<Vec<Chunk>>
    where
        P: BoundaryProvider + ?Sized,
    {
        self.chunks(text, provider).collect()
    }

    /// Chunk a string, detecting the language from `file_path`
    pub fn chunk_str(&self, text: &str, file_path: Option<&str>) -> Result<Vec<Chunk>> {
        let language = file_path.map_or(Language::Unknown, Language::from_path);
        self.chunk_with_language(text, language)
    }

    /// Chunk a file from disk
    pub fn chunk_file(&self, path: impl AsRef<Path>) -> Result<Vec<Chunk>> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        self.chunk_with_language(&text, Language::from_path(path))
    }

    /// Chunk with an explicit language
    pub fn chunk_with_language(&self, text: &str, language: Language) -> Result<Vec<Chunk>> {
        let mut provider = provider_for(language, text, &self.config)?;
        self.collect_chunks(text, &mut provider)
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Get statistics about chunking
    #[must_use]
    pub fn get_stats(text: &str, chunks: &[Chunk]) -> ChunkingStats {
        let comments: Vec<CommentSpan> = chunks.iter().filter_map(|c| c.comment).collect();
        ChunkingStats {
            total_chunks: chunks.len(),
            comments: comments.len(),
            code_lines: chunks.iter().map(|c| c.code.line_count(text)).sum(),
            comment_lines: comments.iter().map(|c| c.outer.line_count(text)).sum(),
            empty_code_spans: chunks
                .iter()
                .filter(|c| c.code.is_empty() && c.comment.is_some())
                .count(),
        }
    }
}

/// Lazy chunk sequence produced by [`Chunker::chunks`]
pub struct Chunks<'a, P: ?Sized> {
    text: &'a str,
    provider: &'a mut P,
    cursor: Position,
    done: bool,
}

impl<P: BoundaryProvider + ?Sized> Chunks<'_, P> {
    fn validate(&self, outer: Span) -> Result<CommentSpan> {
        let from = self.cursor;
        if outer.start > outer.end
            || outer.start < from
            || outer.end > self.text.len()
            || outer.is_empty()
            || !self.on_char_boundaries(outer)
        {
            return Err(ChunkerError::malformed(outer.start, outer.end, from));
        }

        let inner = self.provider.inner_text_of(outer);
        if !outer.encloses(inner) || !self.on_char_boundaries(inner) {
            return Err(ChunkerError::malformed(inner.start, inner.end, outer.start));
        }

        Ok(CommentSpan { outer, inner })
    }

    fn on_char_boundaries(&self, span: Span) -> bool {
        self.text.is_char_boundary(span.start) && self.text.is_char_boundary(span.end)
    }
}

impl<P: BoundaryProvider + ?Sized> Iterator for Chunks<'_, P> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some(outer) = self.provider.next_comment(self.cursor) else {
            self.done = true;
            return Some(Ok(Chunk::trailing(Span::new(
                self.cursor,
                self.text.len(),
            ))));
        };

        match self.validate(outer) {
            Ok(comment) => {
                let chunk = Chunk::new(Span::new(self.cursor, outer.start), comment);
                self.cursor = outer.end;
                Some(Ok(chunk))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Statistics about chunking results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub comments: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub empty_code_spans: usize,
}

impl std::fmt::Display for ChunkingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunks: {} | Comments: {} | Code lines: {} | Comment lines: {} | Adjacent: {}",
            self.total_chunks,
            self.comments,
            self.code_lines,
            self.comment_lines,
            self.empty_code_spans
        )
    }
}
