use crate::error::{ChunkerError, Result};
use std::path::Path;

/// Supported programming language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    Swift,
    Kotlin,
    Shell,
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "rs" => Language::Rust,
            "py" | "pyw" => Language::Python,
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "go" => Language::Go,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "cs" => Language::CSharp,
            "rb" => Language::Ruby,
            "swift" => Language::Swift,
            "kt" | "kts" => Language::Kotlin,
            "sh" | "bash" | "zsh" => Language::Shell,
            _ => Language::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Parse a language name as printed by [`Language::as_str`]
    pub fn from_name(name: &str) -> Option<Self> {
        let lang = match name.to_lowercase().as_str() {
            "rust" => Language::Rust,
            "python" => Language::Python,
            "javascript" => Language::JavaScript,
            "typescript" => Language::TypeScript,
            "go" => Language::Go,
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" => Language::Cpp,
            "csharp" => Language::CSharp,
            "ruby" => Language::Ruby,
            "swift" => Language::Swift,
            "kotlin" => Language::Kotlin,
            "shell" => Language::Shell,
            _ => return None,
        };
        Some(lang)
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Ruby => "ruby",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Shell => "shell",
            Language::Unknown => "unknown",
        }
    }

    /// Check if this language is supported for AST parsing
    pub fn supports_ast(self) -> bool {
        matches!(
            self,
            Language::Rust | Language::Python | Language::JavaScript | Language::TypeScript
        )
    }

    /// Get Tree-sitter language instance
    pub fn tree_sitter_language(self) -> Result<tree_sitter::Language> {
        match self {
            Language::Rust => Ok(tree_sitter_rust::LANGUAGE.into()),
            Language::Python => Ok(tree_sitter_python::LANGUAGE.into()),
            Language::JavaScript => Ok(tree_sitter_javascript::LANGUAGE.into()),
            Language::TypeScript => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            _ => Err(ChunkerError::unsupported_language(self.as_str())),
        }
    }

    /// Tree-sitter node kinds that represent comments
    pub fn comment_node_kinds(self) -> &'static [&'static str] {
        match self {
            Language::Rust => &["line_comment", "block_comment"],
            Language::Python | Language::JavaScript | Language::TypeScript => &["comment"],
            _ => &[],
        }
    }

    /// Line comment prefixes, longest first so `///` wins over `//`
    pub fn line_comment_prefixes(self) -> &'static [&'static str] {
        match self {
            Language::Rust => &["//!", "///", "//"],
            Language::JavaScript
            | Language::TypeScript
            | Language::Go
            | Language::Java
            | Language::C
            | Language::Cpp
            | Language::CSharp
            | Language::Swift
            | Language::Kotlin => &["///", "//"],
            Language::Python | Language::Ruby | Language::Shell => &["#"],
            Language::Unknown => &[],
        }
    }

    /// Block comment openers, longest first
    pub fn block_comment_openers(self) -> &'static [&'static str] {
        match self {
            Language::Python | Language::Ruby | Language::Shell | Language::Unknown => &[],
            _ => &["/**", "/*!", "/*"],
        }
    }

    /// Check whether comment text (delimiters included) is documentation
    pub fn is_doc_comment(self, comment: &str) -> bool {
        match self {
            Language::Rust => {
                (comment.starts_with("///") && !comment.starts_with("////"))
                    || comment.starts_with("//!")
                    || (comment.starts_with("/**") && !comment.starts_with("/**/"))
                    || comment.starts_with("/*!")
            }
            Language::Python | Language::Ruby | Language::Shell => comment.starts_with('#'),
            Language::Unknown => false,
            _ => {
                comment.starts_with("///")
                    || (comment.starts_with("/**") && !comment.starts_with("/**/"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("rs"), Language::Rust);
        assert_eq!(Language::from_extension("RS"), Language::Rust);
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("js"), Language::JavaScript);
        assert_eq!(Language::from_extension("ts"), Language::TypeScript);
        assert_eq!(Language::from_extension("sh"), Language::Shell);
        assert_eq!(Language::from_extension("unknown"), Language::Unknown);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path("test.rs"), Language::Rust);
        assert_eq!(Language::from_path("src/main.py"), Language::Python);
        assert_eq!(Language::from_path("index.ts"), Language::TypeScript);
        assert_eq!(Language::from_path("no_extension"), Language::Unknown);
    }

    #[test]
    fn test_from_name_round_trips() {
        for lang in [Language::Rust, Language::Go, Language::Shell] {
            assert_eq!(Language::from_name(lang.as_str()), Some(lang));
        }
        assert_eq!(Language::from_name("cobol"), None);
    }

    #[test]
    fn test_tree_sitter_language() {
        assert!(Language::Rust.tree_sitter_language().is_ok());
        assert!(Language::Python.tree_sitter_language().is_ok());
        assert!(Language::JavaScript.tree_sitter_language().is_ok());
        assert!(Language::TypeScript.tree_sitter_language().is_ok());
        assert!(Language::Go.tree_sitter_language().is_err());
    }

    #[test]
    fn test_comment_prefixes() {
        assert!(Language::Rust.line_comment_prefixes().contains(&"//"));
        assert_eq!(Language::Rust.line_comment_prefixes()[0], "//!");
        assert!(Language::Python.line_comment_prefixes().contains(&"#"));
        assert!(Language::Python.block_comment_openers().is_empty());
        assert!(Language::Unknown.line_comment_prefixes().is_empty());
    }

    #[test]
    fn test_doc_comment_detection() {
        assert!(Language::Rust.is_doc_comment("/// docs"));
        assert!(Language::Rust.is_doc_comment("//! crate docs"));
        assert!(Language::Rust.is_doc_comment("/** block */"));
        assert!(!Language::Rust.is_doc_comment("// plain"));
        assert!(!Language::Rust.is_doc_comment("//// banner"));
        assert!(!Language::Rust.is_doc_comment("/**/"));
        assert!(Language::TypeScript.is_doc_comment("/** jsdoc */"));
        assert!(!Language::TypeScript.is_doc_comment("// plain"));
        assert!(Language::Python.is_doc_comment("# note"));
    }
}
