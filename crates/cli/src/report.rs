use serde::Serialize;
use sidedoc_align::{AlignConfig, Session, SourceDocument, UnitAlignment};

/// Machine-readable description of one alignment pass
#[derive(Debug, Serialize)]
pub struct AlignmentReport {
    pub file: String,
    pub language: &'static str,
    pub config: AlignConfig,
    pub source_lines: usize,
    pub mirror_lines: usize,
    pub carry: usize,
    pub units: Vec<UnitReport>,
}

#[derive(Debug, Serialize)]
pub struct UnitReport {
    /// 1-based line of the first body line in the source
    pub line: usize,
    pub comment: Option<String>,
    pub lead_lines: usize,
    pub comment_lines: usize,
    pub code_lines: usize,
    pub padding: isize,
    pub absorbed: usize,
    pub reclaimed: usize,
    pub hidden_lines: usize,
    pub body_visible_lines: usize,
    pub carry: usize,
}

impl AlignmentReport {
    pub fn new(doc: &SourceDocument, session: &Session, config: AlignConfig) -> Self {
        let text = doc.text();
        let units = session
            .units()
            .iter()
            .map(|unit| UnitReport::new(text, unit))
            .collect();

        Self {
            file: doc.name().to_string(),
            language: doc.language().as_str(),
            config,
            source_lines: doc.visible_rows(text.len()),
            mirror_lines: session
                .mirror()
                .map_or(0, |mirror| mirror.visible_rows(mirror.len())),
            carry: session.padding().carry,
            units,
        }
    }
}

impl UnitReport {
    fn new(text: &str, unit: &UnitAlignment) -> Self {
        Self {
            line: text[..unit.body.start].matches('\n').count() + 1,
            comment: unit
                .comment
                .map(|comment| comment.inner.slice(text).to_string()),
            lead_lines: unit.lead_lines,
            comment_lines: unit.comment_lines,
            code_lines: unit.code_lines,
            padding: unit.padding,
            absorbed: unit.absorbed,
            reclaimed: unit.reclaimed,
            hidden_lines: unit.hidden_lines,
            body_visible_lines: unit.body_visible_lines,
            carry: unit.carry,
        }
    }
}
