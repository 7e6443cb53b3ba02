use crate::aligner::{PaddingState, UnitAlignment};
use crate::config::AlignConfig;
use crate::document::{DocumentId, MirrorDocument, SourceDocument};
use crate::error::{AlignError, Result};
use crate::overlay::OwnerId;
use crate::renderer::{build_plan, Checkpoint, RenderPlan};
use crate::visibility::VisibilityController;
use serde::{Deserialize, Serialize};
use sidedoc_chunker::{BoundaryProvider, Chunker};

/// Opaque token for a pane arrangement the layout collaborator can restore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutHandle(pub u64);

/// One rendered pane handed to the layout collaborator
#[derive(Debug, Clone, Copy)]
pub struct Pane<'a> {
    pub title: &'a str,
    pub rendered: &'a str,
}

/// Host-side window management
pub trait LayoutCollaborator {
    /// Show the code pane and the comment pane next to each other
    fn present_side_by_side(&mut self, code: Pane<'_>, comments: Pane<'_>) -> Result<LayoutHandle>;

    /// Put back whatever arrangement was active before `handle` was created
    fn restore(&mut self, handle: LayoutHandle) -> Result<()>;
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Building,
    Displayed,
    Closed,
}

/// One side-by-side view of one source document.
///
/// Owns the mirror document and the hide annotations it applied; nothing
/// else writes to either.
#[derive(Debug)]
pub struct Session {
    id: OwnerId,
    document: DocumentId,
    config: AlignConfig,
    state: SessionState,
    mirror: Option<MirrorDocument>,
    padding: PaddingState,
    visibility: VisibilityController,
    layout: Option<LayoutHandle>,
    units: Vec<UnitAlignment>,
    checkpoints: Vec<Checkpoint>,
}

impl Session {
    pub fn new(id: OwnerId, document: DocumentId, config: AlignConfig) -> Self {
        Self {
            id,
            document,
            config,
            state: SessionState::Idle,
            mirror: None,
            padding: PaddingState::default(),
            visibility: VisibilityController::new(id),
            layout: None,
            units: Vec::new(),
            checkpoints: Vec::new(),
        }
    }

    /// Build the mirror, hide comments in `doc`, and present both panes.
    ///
    /// All-or-nothing: a chunking failure leaves `doc` untouched, and a
    /// layout failure reverts every hide before the error is returned.
    pub fn open<P, L>(
        &mut self,
        doc: &mut SourceDocument,
        provider: &mut P,
        chunker: &Chunker,
        layout: &mut L,
    ) -> Result<()>
    where
        P: BoundaryProvider + ?Sized,
        L: LayoutCollaborator + ?Sized,
    {
        self.check_document(doc)?;
        if self.state != SessionState::Idle {
            return Err(AlignError::invalid_state(format!(
                "cannot open a session in state {:?}",
                self.state
            )));
        }

        self.state = SessionState::Building;
        self.padding = PaddingState::default();
        log::debug!("building side-by-side view for {}", doc.id());

        let plan = match build_plan(doc.text(), provider, chunker, self.config, self.id) {
            Ok(plan) => plan,
            Err(e) => {
                self.state = SessionState::Closed;
                return Err(e);
            }
        };

        let RenderPlan {
            mirror,
            hides,
            units,
            checkpoints,
            padding,
        } = plan;
        for hide in &hides {
            self.visibility.hide(doc, hide.span, hide.visual_lines);
        }

        let code_view = doc.render();
        let comment_view = mirror.render();
        let presented = layout.present_side_by_side(
            Pane {
                title: doc.name(),
                rendered: &code_view,
            },
            Pane {
                title: "comments",
                rendered: &comment_view,
            },
        );

        match presented {
            Ok(handle) => {
                self.layout = Some(handle);
                self.mirror = Some(mirror);
                self.padding = padding;
                self.units = units;
                self.checkpoints = checkpoints;
                self.state = SessionState::Displayed;
                log::debug!(
                    "displayed {} with {} hidden comments",
                    doc.id(),
                    self.visibility.hidden_ranges().len()
                );
                Ok(())
            }
            Err(e) => {
                log::warn!("layout failed for {}, reverting hides: {e}", doc.id());
                self.visibility.restore_all(doc);
                self.state = SessionState::Closed;
                Err(e)
            }
        }
    }

    /// Tear the session down: drop the mirror, un-hide everything, restore
    /// the layout. Closing twice is a no-op.
    pub fn close<L>(&mut self, doc: &mut SourceDocument, layout: &mut L) -> Result<()>
    where
        L: LayoutCollaborator + ?Sized,
    {
        self.check_document(doc)?;
        if self.state == SessionState::Closed && self.layout.is_none() {
            self.visibility.restore_all(doc);
            return Ok(());
        }

        self.mirror = None;
        self.visibility.restore_all(doc);
        self.state = SessionState::Closed;
        log::debug!("closed side-by-side view for {}", doc.id());

        match self.layout.take() {
            Some(handle) => layout.restore(handle),
            None => Ok(()),
        }
    }

    fn check_document(&self, doc: &SourceDocument) -> Result<()> {
        if doc.id() == self.document {
            Ok(())
        } else {
            Err(AlignError::UnknownDocument(doc.id()))
        }
    }

    pub fn id(&self) -> OwnerId {
        self.id
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_displayed(&self) -> bool {
        self.state == SessionState::Displayed
    }

    /// Mirror document; `None` before display and after close
    pub fn mirror(&self) -> Option<&MirrorDocument> {
        self.mirror.as_ref()
    }

    pub fn padding(&self) -> PaddingState {
        self.padding
    }

    pub fn units(&self) -> &[UnitAlignment] {
        &self.units
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    pub fn layout(&self) -> Option<LayoutHandle> {
        self.layout
    }
}
