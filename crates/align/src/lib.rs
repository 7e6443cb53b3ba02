//! # sidedoc align
//!
//! Turns a chunked source document into two line-aligned views: the code
//! with comments hidden, and a mirror document holding only comment text.
//!
//! ## Architecture
//!
//! ```text
//! SourceDocument ──> Chunker ──> Aligner ──> Renderer ──> RenderPlan
//!                                   │                        │
//!                              PaddingState            ┌─────┴──────┐
//!                              (carry)                 │            │
//!                                               MirrorDocument   SourceHide*
//!                                                                   │
//!                                                      VisibilityController
//! ```
//!
//! A [`Session`] owns one plan end to end: it applies the hides, presents
//! both panes through a [`LayoutCollaborator`], and reverts everything on
//! close. [`SessionRegistry`] keeps one session per document.
//!
//! Neither document's text is ever modified. Hiding and padding are render
//! overlay annotations, so a comment's displayed height can differ from its
//! source height while offsets stay stable.
//!
//! ## Example
//!
//! ```rust
//! use sidedoc_align::{build_plan, AlignConfig, OwnerId};
//! use sidedoc_chunker::{provider_for, Chunker, ChunkerConfig, Language};
//!
//! let text = "# add one\nx += 1\ny = x\n";
//! let mut provider = provider_for(Language::Python, text, &ChunkerConfig::default()).unwrap();
//! let plan = build_plan(text, &mut provider, &Chunker::default(), AlignConfig::default(), OwnerId(1))
//!     .unwrap();
//!
//! assert_eq!(plan.mirror.render(), "add one\n\n");
//! ```

mod aligner;
mod config;
mod document;
mod error;
mod overlay;
mod registry;
mod renderer;
mod session;
mod visibility;

pub use aligner::{split_lead, Aligner, PaddingState, UnitAlignment};
pub use config::{AlignConfig, DeficitStrategy};
pub use document::{DocumentId, MirrorDocument, SourceDocument};
pub use error::{AlignError, Result};
pub use overlay::{Annotation, OwnerId, RenderOverlay};
pub use registry::{SessionRegistry, Toggled};
pub use renderer::{build_plan, Checkpoint, RenderPlan, Renderer, SourceHide};
pub use session::{LayoutCollaborator, LayoutHandle, Pane, Session, SessionState};
pub use visibility::VisibilityController;
