use crate::config::AlignConfig;
use crate::document::{DocumentId, SourceDocument};
use crate::error::{AlignError, Result};
use crate::overlay::OwnerId;
use crate::session::{LayoutCollaborator, Session};
use serde::{Deserialize, Serialize};
use sidedoc_chunker::{provider_for, BoundaryProvider, Chunker, ChunkerConfig};
use std::collections::HashMap;

/// Result of [`SessionRegistry::toggle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Toggled {
    Opened,
    Closed,
}

/// At most one displayed session per document.
///
/// Hosts talk to this rather than to [`Session`] directly; it picks the
/// boundary provider for the document's language and hands out owner ids.
pub struct SessionRegistry {
    config: AlignConfig,
    chunker: Chunker,
    sessions: HashMap<DocumentId, Session>,
    next_owner: u64,
}

impl SessionRegistry {
    pub fn new(config: AlignConfig, chunker_config: ChunkerConfig) -> Result<Self> {
        Ok(Self {
            config,
            chunker: Chunker::new(chunker_config)?,
            sessions: HashMap::new(),
            next_owner: 1,
        })
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Open a side-by-side view of `doc`, picking a provider for its language
    pub fn open<L>(&mut self, doc: &mut SourceDocument, layout: &mut L) -> Result<&Session>
    where
        L: LayoutCollaborator + ?Sized,
    {
        let text = doc.text().to_string();
        let mut provider = provider_for(doc.language(), &text, self.chunker.config())?;
        self.open_with(doc, &mut provider, layout)
    }

    /// Open a side-by-side view of `doc` using the host's own provider
    pub fn open_with<P, L>(
        &mut self,
        doc: &mut SourceDocument,
        provider: &mut P,
        layout: &mut L,
    ) -> Result<&Session>
    where
        P: BoundaryProvider + ?Sized,
        L: LayoutCollaborator + ?Sized,
    {
        if self.is_active(doc.id()) {
            return Err(AlignError::SessionAlreadyActive(doc.id()));
        }

        let owner = OwnerId(self.next_owner);
        self.next_owner += 1;

        let mut session = Session::new(owner, doc.id(), self.config);
        session.open(doc, provider, &self.chunker, layout)?;

        log::info!(
            "opened side-by-side view of {} ({})",
            doc.name(),
            doc.language().as_str()
        );
        self.sessions.insert(doc.id(), session);
        self.sessions
            .get(&doc.id())
            .ok_or_else(|| AlignError::invalid_state("session vanished after open"))
    }

    /// Close the view of `doc`; returns whether a session existed
    pub fn close<L>(&mut self, doc: &mut SourceDocument, layout: &mut L) -> Result<bool>
    where
        L: LayoutCollaborator + ?Sized,
    {
        match self.sessions.remove(&doc.id()) {
            Some(mut session) => {
                session.close(doc, layout)?;
                log::info!("closed side-by-side view of {}", doc.name());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Close the view if one is displayed, otherwise open one
    pub fn toggle<L>(&mut self, doc: &mut SourceDocument, layout: &mut L) -> Result<Toggled>
    where
        L: LayoutCollaborator + ?Sized,
    {
        if self.is_active(doc.id()) {
            self.close(doc, layout)?;
            Ok(Toggled::Closed)
        } else {
            self.open(doc, layout)?;
            Ok(Toggled::Opened)
        }
    }

    pub fn is_active(&self, id: DocumentId) -> bool {
        self.sessions
            .get(&id)
            .is_some_and(|session| session.is_displayed())
    }

    pub fn session(&self, id: DocumentId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self {
            config: AlignConfig::default(),
            chunker: Chunker::default(),
            sessions: HashMap::new(),
            next_owner: 1,
        }
    }
}
