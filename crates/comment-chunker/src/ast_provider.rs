use crate::config::CommentFilter;
use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::provider::{inner_span, own_line_end, starts_line, BoundaryProvider, CommentIndex};
use crate::types::{Position, Span};
use tree_sitter::{Node, Parser, TreeCursor};

/// Tree-sitter backed comment boundary provider
pub struct AstBoundaryProvider<'a> {
    text: &'a str,
    language: Language,
    comments: CommentIndex,
}

impl<'a> AstBoundaryProvider<'a> {
    /// Parse `text` and index its standalone comments
    pub fn new(language: Language, text: &'a str, filter: CommentFilter) -> Result<Self> {
        if !language.supports_ast() {
            return Err(ChunkerError::unsupported_language(language.as_str()));
        }

        let ts_language = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| ChunkerError::tree_sitter(format!("Failed to set language: {e}")))?;

        let tree = parser
            .parse(text, None)
            .ok_or_else(|| ChunkerError::parse("Failed to parse source code"))?;

        let root = tree.root_node();
        if root.has_error() {
            log::debug!(
                "{} source has syntax errors, comment boundaries may be partial",
                language.as_str()
            );
        }

        let mut collector = Collector {
            text,
            language,
            filter,
            spans: Vec::new(),
        };
        collector.walk(root.walk());

        log::debug!(
            "tree-sitter found {} {} comments",
            collector.spans.len(),
            language.as_str()
        );

        Ok(Self {
            text,
            language,
            comments: CommentIndex::new(collector.spans),
        })
    }

    /// Number of comments found
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

impl BoundaryProvider for AstBoundaryProvider<'_> {
    fn next_comment(&mut self, from: Position) -> Option<Span> {
        self.comments.next_from(from)
    }

    fn inner_text_of(&self, outer: Span) -> Span {
        inner_span(self.text, self.language, outer)
    }
}

struct Collector<'a> {
    text: &'a str,
    language: Language,
    filter: CommentFilter,
    spans: Vec<Span>,
}

impl Collector<'_> {
    /// Pre-order walk that never descends into comment nodes
    fn walk(&mut self, mut cursor: TreeCursor<'_>) {
        let kinds = self.language.comment_node_kinds();
        loop {
            let node = cursor.node();
            let is_comment = kinds.contains(&node.kind());
            if is_comment {
                self.consider(node);
            } else if cursor.goto_first_child() {
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }

    fn consider(&mut self, node: Node<'_>) {
        let start = node.start_byte();
        let end = node.end_byte();
        if start >= end || !starts_line(self.text, start) {
            return;
        }

        if self.filter == CommentFilter::DocOnly
            && !self.language.is_doc_comment(&self.text[start..end])
        {
            return;
        }

        self.spans
            .push(Span::new(start, own_line_end(self.text, end)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn comment_texts(language: Language, text: &str, filter: CommentFilter) -> Vec<String> {
        let mut provider = AstBoundaryProvider::new(language, text, filter).unwrap();
        let mut out = Vec::new();
        let mut from = 0;
        while let Some(outer) = provider.next_comment(from) {
            out.push(provider.inner_text_of(outer).slice(text).to_string());
            from = outer.end;
        }
        out
    }

    #[test]
    fn finds_rust_comments_in_order() {
        let code = "/// Adds one\nfn inc(x: i32) -> i32 {\n    // bump it\n    x + 1 // trailing\n}\n";
        let found = comment_texts(Language::Rust, code, CommentFilter::All);
        assert_eq!(found, vec!["Adds one", "bump it"]);
    }

    #[test]
    fn doc_only_skips_plain_rust_comments() {
        let code = "// license\n/// Adds one\nfn inc() {}\n";
        let found = comment_texts(Language::Rust, code, CommentFilter::DocOnly);
        assert_eq!(found, vec!["Adds one"]);
    }

    #[test]
    fn rust_outer_span_owns_its_line() {
        let code = "/// first\n/// second\nfn f() {}\n";
        let mut provider = AstBoundaryProvider::new(Language::Rust, code, CommentFilter::All).unwrap();
        let first = provider.next_comment(0).unwrap();
        assert_eq!(first.slice(code), "/// first\n");
        let second = provider.next_comment(first.end).unwrap();
        assert_eq!(second.start, first.end);
        assert_eq!(second.slice(code), "/// second\n");
        assert!(provider.next_comment(second.end).is_none());
    }

    #[test]
    fn finds_python_comments() {
        let code = "# Module notes\nimport os\n\ndef f():\n    # inside\n    return 1\n";
        let found = comment_texts(Language::Python, code, CommentFilter::All);
        assert_eq!(found, vec!["Module notes", "inside"]);
    }

    #[test]
    fn finds_typescript_block_comments() {
        let code = "/**\n * Greets.\n */\nexport function greet(): void {}\n";
        let found = comment_texts(Language::TypeScript, code, CommentFilter::All);
        assert_eq!(found, vec![" * Greets."]);
    }

    #[test]
    fn rejects_languages_without_grammar() {
        let result = AstBoundaryProvider::new(Language::Go, "", CommentFilter::All);
        assert!(result.is_err());
    }
}
