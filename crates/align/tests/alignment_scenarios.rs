use pretty_assertions::assert_eq;
use sidedoc_align::{
    AlignConfig, AlignError, DeficitStrategy, DocumentId, LayoutCollaborator, LayoutHandle, Pane,
    Result, SessionRegistry, SourceDocument,
};
use sidedoc_chunker::ChunkerConfig;

#[derive(Default)]
struct RecordingLayout {
    frames: Vec<(String, String)>,
    restored: usize,
    refuse: bool,
}

impl LayoutCollaborator for RecordingLayout {
    fn present_side_by_side(&mut self, code: Pane<'_>, comments: Pane<'_>) -> Result<LayoutHandle> {
        if self.refuse {
            return Err(AlignError::layout("split refused"));
        }
        self.frames
            .push((code.rendered.to_string(), comments.rendered.to_string()));
        Ok(LayoutHandle(self.frames.len() as u64))
    }

    fn restore(&mut self, _handle: LayoutHandle) -> Result<()> {
        self.restored += 1;
        Ok(())
    }
}

const LINES: &[&str] = &[
    "x = 1;",
    "",
    "    y();",
    "// note",
    "    // indented note",
    "/*\n * block\n * more\n */",
    "/* one-line block */",
    "z();",
    "",
];

/// Deterministic pseudo-random C-like document; odd seeds drop the final newline
fn generate(seed: u64) -> String {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    let count = 1 + next() % 30;
    let mut out = String::new();
    for _ in 0..count {
        out.push_str(LINES[next() % LINES.len()]);
        out.push('\n');
    }
    if seed % 2 == 1 {
        out.pop();
    }
    out
}

fn assert_aligned(text: &str, config: AlignConfig) {
    let mut doc = SourceDocument::new(DocumentId(1), "gen.c", text);
    let mut layout = RecordingLayout::default();
    let mut registry = SessionRegistry::new(config, ChunkerConfig::default()).unwrap();
    registry.open(&mut doc, &mut layout).unwrap();

    let session = registry.session(doc.id()).unwrap();
    let mirror = session.mirror().unwrap();
    for checkpoint in session.checkpoints() {
        let (source, comments) = if config.comment_ends_with_terminator {
            (
                doc.visible_rows(checkpoint.source),
                mirror.visible_rows(checkpoint.mirror),
            )
        } else {
            (
                doc.visible_lines(checkpoint.source),
                mirror.visible_lines(checkpoint.mirror),
            )
        };
        assert_eq!(
            source + checkpoint.carry,
            comments,
            "misaligned at {checkpoint:?} in {text:?}"
        );
        if config.deficit == DeficitStrategy::HideInPlace {
            assert_eq!(checkpoint.carry, 0);
        }
    }

    if config.comment_ends_with_terminator && session.padding().carry == 0 {
        let (code, comments) = &layout.frames[0];
        assert_eq!(
            code.lines().count(),
            comments.lines().count(),
            "pane heights differ for {text:?}"
        );
    }
}

#[test]
fn panes_stay_aligned_with_hide_in_place() {
    for seed in 0..64 {
        assert_aligned(&generate(seed), AlignConfig::default());
    }
}

#[test]
fn panes_stay_aligned_with_borrow_forward() {
    for seed in 0..64 {
        assert_aligned(&generate(seed), AlignConfig::borrow_forward());
    }
}

#[test]
fn panes_stay_aligned_in_compact_mode() {
    for seed in (0..128).step_by(2) {
        assert_aligned(&generate(seed), AlignConfig::compact());
    }
}

#[test]
fn close_restores_the_original_rendering() {
    for seed in 0..16 {
        let text = generate(seed);
        let mut doc = SourceDocument::new(DocumentId(seed), "gen.c", text.clone());
        let mut layout = RecordingLayout::default();
        let mut registry = SessionRegistry::default();

        registry.open(&mut doc, &mut layout).unwrap();
        assert!(registry.close(&mut doc, &mut layout).unwrap());
        assert!(!registry.close(&mut doc, &mut layout).unwrap());

        assert_eq!(doc.text(), text);
        assert_eq!(doc.render(), text);
        assert!(doc.overlay().is_empty());
        assert_eq!(layout.restored, 1);
    }
}

#[test]
fn no_comments_mirrors_blank_lines() {
    let text = "a = 1\nb = 2\nc = 3\n";
    let mut doc = SourceDocument::new(DocumentId(1), "plain.py", text);
    let mut layout = RecordingLayout::default();
    let mut registry = SessionRegistry::default();

    let session = registry.open(&mut doc, &mut layout).unwrap();
    assert_eq!(session.units().len(), 1);
    assert!(session.units()[0].comment.is_none());
    assert_eq!(layout.frames, vec![(text.to_string(), "\n\n\n".to_string())]);
}

#[test]
fn short_comment_gets_blank_padding() {
    let text = "# one\na\nb\nc\nd\ne\n";
    let mut doc = SourceDocument::new(DocumentId(1), "short.py", text);
    let mut layout = RecordingLayout::default();
    let mut registry = SessionRegistry::default();

    let session = registry.open(&mut doc, &mut layout).unwrap();
    let unit = session.units()[1];
    assert_eq!((unit.code_lines, unit.comment_lines, unit.padding), (5, 1, 4));
    assert_eq!(unit.hidden_lines, 0);
    assert_eq!(
        layout.frames[0],
        ("a\nb\nc\nd\ne\n".to_string(), "one\n\n\n\n\n".to_string())
    );
}

#[test]
fn long_comment_reclaims_blank_lines_then_pads_the_code() {
    let text = "x\n\n\n/*\n * one\n * two\n * three\n * four\n * five\n */\ny\n";
    let mut doc = SourceDocument::new(DocumentId(1), "long.c", text);
    let mut layout = RecordingLayout::default();
    let mut registry = SessionRegistry::default();

    let session = registry.open(&mut doc, &mut layout).unwrap();
    let unit = session.units()[1];
    assert_eq!(unit.padding, -4);
    assert_eq!(unit.reclaimed, 2);
    assert_eq!(unit.hidden_lines, 2);

    let (code, comments) = &layout.frames[0];
    assert_eq!(code, "x\n\n\n\n\ny\n");
    assert_eq!(comments, "\n * one\n * two\n * three\n * four\n * five\n");
    assert_eq!(comments.lines().count(), code.lines().count());
}

#[test]
fn missing_final_newline_keeps_panes_level() {
    let text = "# note\nx = 1";
    let mut doc = SourceDocument::new(DocumentId(1), "tail.py", text);
    let mut layout = RecordingLayout::default();
    let mut registry = SessionRegistry::default();

    let session = registry.open(&mut doc, &mut layout).unwrap();
    let unit = session.units()[1];
    assert_eq!((unit.code_lines, unit.padding, unit.hidden_lines), (1, 0, 0));

    let (code, comments) = &layout.frames[0];
    assert_eq!(code.lines().collect::<Vec<_>>(), vec!["x = 1"]);
    assert_eq!(comments.lines().collect::<Vec<_>>(), vec!["note"]);
}

#[test]
fn adjacent_comments_have_empty_code_between_them() {
    let text = "/// first\n/// second\nfn f() {}\n";
    let mut doc = SourceDocument::new(DocumentId(1), "adjacent.rs", text);
    let mut layout = RecordingLayout::default();
    let mut registry = SessionRegistry::default();

    let session = registry.open(&mut doc, &mut layout).unwrap();
    let first = session.units()[1];
    assert_eq!(first.code_lines, 0);
    assert_eq!(first.padding, -(first.comment_lines as isize));
}

#[test]
fn second_open_reports_an_active_session() {
    let mut doc = SourceDocument::new(DocumentId(4), "a.py", "# c\nx\n");
    let mut layout = RecordingLayout::default();
    let mut registry = SessionRegistry::default();

    registry.open(&mut doc, &mut layout).unwrap();
    let err = registry.open(&mut doc, &mut layout).unwrap_err();
    assert!(matches!(err, AlignError::SessionAlreadyActive(DocumentId(4))));
    assert_eq!(layout.frames.len(), 1);
}

#[test]
fn refused_layout_leaves_document_untouched() {
    let mut doc = SourceDocument::new(DocumentId(1), "a.py", "# c\nx\n");
    let mut layout = RecordingLayout {
        refuse: true,
        ..Default::default()
    };
    let mut registry = SessionRegistry::default();

    assert!(registry.open(&mut doc, &mut layout).is_err());
    assert!(doc.overlay().is_empty());
    assert!(!registry.is_active(doc.id()));
    assert!(registry.is_empty());

    layout.refuse = false;
    registry.open(&mut doc, &mut layout).unwrap();
    assert!(registry.is_active(doc.id()));
}
