use sidedoc_align::{LayoutCollaborator, LayoutHandle, Pane, Result};
use unicode_segmentation::UnicodeSegmentation;

const SEPARATOR: &str = " │ ";
const TAB: &str = "    ";
const MIN_COLUMN: usize = 8;

/// Lays both panes out as two fixed-width terminal columns
#[derive(Debug)]
pub struct TerminalLayout {
    width: usize,
    frame: Option<String>,
    presented: u64,
}

impl TerminalLayout {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            frame: None,
            presented: 0,
        }
    }

    /// Frame composed by the last successful presentation, if still shown
    pub fn frame(&self) -> Option<&str> {
        self.frame.as_deref()
    }

    fn column_width(&self) -> usize {
        (self.width.saturating_sub(SEPARATOR.chars().count()) / 2).max(MIN_COLUMN)
    }

    fn compose(&self, code: Pane<'_>, comments: Pane<'_>) -> String {
        let column = self.column_width();
        let mut out = String::new();

        push_row(&mut out, code.title, comments.title, column);
        out.push_str(&"─".repeat(column));
        out.push_str("─┼─");
        out.push_str(&"─".repeat(column));
        out.push('\n');

        let mut left = code.rendered.lines();
        let mut right = comments.rendered.lines();
        loop {
            let (l, r) = (left.next(), right.next());
            if l.is_none() && r.is_none() {
                break;
            }
            push_row(&mut out, l.unwrap_or_default(), r.unwrap_or_default(), column);
        }
        out
    }
}

impl LayoutCollaborator for TerminalLayout {
    fn present_side_by_side(&mut self, code: Pane<'_>, comments: Pane<'_>) -> Result<LayoutHandle> {
        self.frame = Some(self.compose(code, comments));
        self.presented += 1;
        Ok(LayoutHandle(self.presented))
    }

    fn restore(&mut self, handle: LayoutHandle) -> Result<()> {
        log::debug!("restoring single-pane layout after {handle:?}");
        self.frame = None;
        Ok(())
    }
}

fn push_row(out: &mut String, left: &str, right: &str, column: usize) {
    let row = format!("{}{SEPARATOR}{}", fit(left, column), fit(right, column));
    out.push_str(row.trim_end());
    out.push('\n');
}

/// Expand tabs, then truncate or pad `line` to exactly `width` graphemes
fn fit(line: &str, width: usize) -> String {
    let expanded = line.replace('\t', TAB);
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for grapheme in expanded.graphemes(true) {
        if used == width {
            break;
        }
        out.push_str(grapheme);
        used += 1;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}
