//! # sidedoc chunker
//!
//! Splits a source document into an ordered sequence of chunks, each pairing
//! a code span with the comment that follows it.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     │
//!     ├──> Language Detection (from extension/name)
//!     │
//!     ├──> BoundaryProvider
//!     │    ├─> Tree-sitter comment nodes (rust, python, js, ts)
//!     │    └─> Line-prefix scan (everything else)
//!     │
//!     └──> Chunker (lazy, validated)
//!          └─> Chunk { code, comment: Option<{ outer, inner }> }
//! ```
//!
//! Chunks never copy text: they are spans over the original document, and
//! together they cover it exactly once.
//!
//! ## Example
//!
//! ```rust
//! use sidedoc_chunker::Chunker;
//!
//! let code = "/// Doubles a number\nfn double(x: i32) -> i32 {\n    x * 2\n}\n";
//! let chunks = Chunker::default().chunk_str(code, Some("lib.rs")).unwrap();
//!
//! assert_eq!(chunks.len(), 2);
//! let doc = chunks[0].comment_inner().unwrap();
//! assert_eq!(doc.slice(code), "Doubles a number");
//! ```

mod ast_provider;
mod chunker;
mod config;
mod error;
mod language;
mod provider;
mod types;

pub use ast_provider::AstBoundaryProvider;
pub use chunker::{Chunker, Chunks, ChunkingStats};
pub use config::{ChunkerConfig, CommentFilter};
pub use error::{ChunkerError, Result};
pub use language::Language;
pub use provider::{provider_for, BoundaryProvider, PrefixBoundaryProvider};
pub use types::{line_count, Chunk, CommentSpan, Position, Span};
