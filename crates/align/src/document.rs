use crate::overlay::{OwnerId, RenderOverlay};
use serde::{Deserialize, Serialize};
use sidedoc_chunker::{line_count, Language, Position};
use std::fmt;

/// Host-assigned identity of a source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An in-memory source document plus its render overlay.
///
/// The text is immutable once loaded; sessions only ever add and remove
/// overlay annotations.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    id: DocumentId,
    name: String,
    language: Language,
    text: String,
    overlay: RenderOverlay,
}

impl SourceDocument {
    /// Create a document, detecting its language from `name`
    pub fn new(id: DocumentId, name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        let language = Language::from_path(&name);
        Self {
            id,
            name,
            language,
            text: text.into(),
            overlay: RenderOverlay::new(),
        }
    }

    /// Override the detected language
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn overlay(&self) -> &RenderOverlay {
        &self.overlay
    }

    pub(crate) fn overlay_mut(&mut self) -> &mut RenderOverlay {
        &mut self.overlay
    }

    /// Text as currently displayed
    pub fn render(&self) -> String {
        self.overlay.render(&self.text)
    }

    /// Displayed line count up to `upto`
    pub fn visible_lines(&self, upto: Position) -> usize {
        self.overlay.visible_lines(&self.text, upto)
    }

    /// Displayed rows up to `upto`, counting an unterminated last line
    pub fn visible_rows(&self, upto: Position) -> usize {
        self.overlay.visible_rows(&self.text, upto)
    }

    /// Raw line count of the text
    pub fn line_count(&self) -> usize {
        line_count(&self.text)
    }

    /// Whether any annotation of `owner` is still applied
    pub fn has_annotations_from(&self, owner: OwnerId) -> bool {
        self.overlay.owned_by(owner).next().is_some()
    }
}

/// Comment-only document built and owned by a session.
///
/// Append-only: text is pushed during the alignment pass and never edited.
#[derive(Debug, Clone, Default)]
pub struct MirrorDocument {
    text: String,
    overlay: RenderOverlay,
}

impl MirrorDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_str(&mut self, text: &str) -> Position {
        let start = self.text.len();
        self.text.push_str(text);
        start
    }

    pub(crate) fn push_newlines(&mut self, count: usize) -> Position {
        let start = self.text.len();
        self.text.extend(std::iter::repeat('\n').take(count));
        start
    }

    pub(crate) fn overlay_mut(&mut self) -> &mut RenderOverlay {
        &mut self.overlay
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn overlay(&self) -> &RenderOverlay {
        &self.overlay
    }

    /// Text as displayed in the comment pane
    pub fn render(&self) -> String {
        self.overlay.render(&self.text)
    }

    /// Displayed line count up to `upto`
    pub fn visible_lines(&self, upto: Position) -> usize {
        self.overlay.visible_lines(&self.text, upto)
    }

    /// Displayed rows up to `upto`, counting an unterminated last line
    pub fn visible_rows(&self, upto: Position) -> usize {
        self.overlay.visible_rows(&self.text, upto)
    }
}
