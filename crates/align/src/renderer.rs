use crate::aligner::{Aligner, PaddingState, UnitAlignment};
use crate::config::AlignConfig;
use crate::document::MirrorDocument;
use crate::error::Result;
use crate::overlay::{Annotation, OwnerId};
use serde::{Deserialize, Serialize};
use sidedoc_chunker::{BoundaryProvider, Chunk, Chunker, Position, Span};

/// A hide the session must apply to the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHide {
    pub span: Span,
    pub visual_lines: usize,
}

/// End of one unit in both documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub source: Position,
    pub mirror: Position,
    pub carry: usize,
}

/// Everything one alignment pass produced; applying it is the session's job
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub mirror: MirrorDocument,
    pub hides: Vec<SourceHide>,
    pub units: Vec<UnitAlignment>,
    pub checkpoints: Vec<Checkpoint>,
    pub padding: PaddingState,
}

/// Builds the mirror document from unit decisions
pub struct Renderer<'a> {
    text: &'a str,
    config: AlignConfig,
    owner: OwnerId,
}

impl<'a> Renderer<'a> {
    pub fn new(text: &'a str, config: AlignConfig, owner: OwnerId) -> Self {
        Self {
            text,
            config,
            owner,
        }
    }

    /// Drain `aligner`, failing on the first error before anything is applied
    pub fn render<I>(&self, aligner: &mut Aligner<'_, I>) -> Result<RenderPlan>
    where
        I: Iterator<Item = sidedoc_chunker::Result<Chunk>>,
    {
        let mut mirror = MirrorDocument::new();
        let mut hides = Vec::new();
        let mut units = Vec::new();
        let mut checkpoints = Vec::new();

        for unit in aligner.by_ref() {
            let unit = unit?;
            self.render_unit(&mut mirror, &unit);

            if let Some(span) = unit.hidden {
                hides.push(SourceHide {
                    span,
                    visual_lines: unit.hidden_lines,
                });
            }
            checkpoints.push(Checkpoint {
                source: unit.body.end,
                mirror: mirror.len(),
                carry: unit.carry,
            });
            units.push(unit);
        }

        Ok(RenderPlan {
            mirror,
            hides,
            units,
            checkpoints,
            padding: aligner.padding(),
        })
    }

    fn render_unit(&self, mirror: &mut MirrorDocument, unit: &UnitAlignment) {
        if let Some(lead) = unit.lead {
            let lead_text = lead.slice(self.text);
            let start = mirror.push_str(lead_text);
            if let Some(span) = collapse_span(lead_text, unit.collapsed_lead_lines()) {
                self.annotate(mirror, span.start + start, span.end + start, 0);
            }
        }

        if let Some(comment) = unit.comment {
            mirror.push_str(comment.inner.slice(self.text));
            if self.config.comment_ends_with_terminator {
                mirror.push_str("\n");
            }
        }

        let start = mirror.push_newlines(unit.code_lines);
        if unit.body_visible_lines != unit.code_lines {
            self.annotate(
                mirror,
                start,
                start + unit.code_lines,
                unit.body_visible_lines,
            );
        }
    }

    fn annotate(&self, mirror: &mut MirrorDocument, start: Position, end: Position, lines: usize) {
        mirror.overlay_mut().insert(Annotation {
            owner: self.owner,
            span: Span::new(start, end),
            visual_lines: lines,
        });
    }
}

/// Span (relative to `lead`) covering its last `count` line breaks.
///
/// Never reaches past the lead's first byte or its final line break. A
/// `\r` before the first collapsed `\n` is collapsed with it.
fn collapse_span(lead: &str, count: usize) -> Option<Span> {
    if count == 0 {
        return None;
    }
    let mut breaks = lead.match_indices('\n').map(|(idx, _)| idx).rev();
    let last = breaks.next()?;
    let mut first = if count == 1 {
        last
    } else {
        breaks.nth(count - 2).unwrap_or(0)
    };
    if first > 0 && lead.as_bytes()[first - 1] == b'\r' {
        first -= 1;
    }
    Some(Span::new(first, last + 1))
}

/// Chunk, align and render `text` in one pass
pub fn build_plan<P>(
    text: &str,
    provider: &mut P,
    chunker: &Chunker,
    config: AlignConfig,
    owner: OwnerId,
) -> Result<RenderPlan>
where
    P: BoundaryProvider + ?Sized,
{
    let mut aligner = Aligner::new(text, chunker.chunks(text, provider), config);
    Renderer::new(text, config, owner).render(&mut aligner)
}
