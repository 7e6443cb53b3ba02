use crate::document::SourceDocument;
use crate::overlay::{Annotation, OwnerId};
use sidedoc_chunker::Span;

/// Applies and reverts one session's hide annotations on a source document
#[derive(Debug, Clone)]
pub struct VisibilityController {
    owner: OwnerId,
    hidden: Vec<Span>,
}

impl VisibilityController {
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            hidden: Vec::new(),
        }
    }

    /// Stop rendering `span`, showing `visual_lines` blank lines in its place
    pub fn hide(&mut self, doc: &mut SourceDocument, span: Span, visual_lines: usize) {
        doc.overlay_mut().insert(Annotation {
            owner: self.owner,
            span,
            visual_lines,
        });
        self.hidden.push(span);
    }

    /// Remove every annotation this controller applied. Idempotent.
    pub fn restore_all(&mut self, doc: &mut SourceDocument) -> usize {
        let removed = doc.overlay_mut().remove_owner(self.owner);
        if removed > 0 {
            log::debug!("restored {removed} hidden ranges on {}", doc.id());
        }
        self.hidden.clear();
        removed
    }

    /// Spans hidden so far, in application order
    pub fn hidden_ranges(&self) -> &[Span] {
        &self.hidden
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }
}
