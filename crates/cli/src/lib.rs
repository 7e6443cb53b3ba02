use anyhow::{anyhow, Context as AnyhowContext, Result};
use clap::Parser;
use sidedoc_align::{AlignConfig, DeficitStrategy, DocumentId, SessionRegistry, SourceDocument};
use sidedoc_chunker::{ChunkerConfig, CommentFilter, Language};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

mod layout;
mod report;

pub use layout::TerminalLayout;
pub use report::{AlignmentReport, UnitReport};

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "sidedoc")]
#[command(about = "Show a source file's comments beside its code", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Source file to display
    file: PathBuf,

    /// Language override (rust, python, c, ...); detected from the extension otherwise
    #[arg(long)]
    language: Option<String>,

    /// Do not end each comment with a line break in the comment pane
    #[arg(long)]
    no_terminator: bool,

    /// Let long comments borrow blank lines from the code that follows
    #[arg(long)]
    borrow_forward: bool,

    /// Only split out documentation comments
    #[arg(long)]
    doc_only: bool,

    /// Total output width in columns
    #[arg(long, default_value_t = 120)]
    width: usize,

    /// Print the alignment report as JSON instead of the panes
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn align_config(&self) -> AlignConfig {
        AlignConfig {
            comment_ends_with_terminator: !self.no_terminator,
            deficit: if self.borrow_forward {
                DeficitStrategy::BorrowForward
            } else {
                DeficitStrategy::HideInPlace
            },
        }
    }

    fn chunker_config(&self) -> ChunkerConfig {
        ChunkerConfig {
            comment_filter: if self.doc_only {
                CommentFilter::DocOnly
            } else {
                CommentFilter::All
            },
            ..Default::default()
        }
    }

    fn language(&self) -> Result<Option<Language>> {
        self.language
            .as_deref()
            .map(|name| Language::from_name(name).ok_or_else(|| anyhow!("Unknown language '{name}'")))
            .transpose()
    }
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // stdout is reserved for the report in JSON mode
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let output = run(&cli)?;
    print_stdout(&output)
}

/// Render `cli.file` side by side, returning what should be printed
pub fn run(cli: &Cli) -> Result<String> {
    let text = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let mut doc = SourceDocument::new(DocumentId(0), cli.file.display().to_string(), text);
    if let Some(language) = cli.language()? {
        doc = doc.with_language(language);
    }
    log::debug!("{} detected as {}", doc.name(), doc.language().as_str());

    let config = cli.align_config();
    let mut registry = SessionRegistry::new(config, cli.chunker_config())
        .context("Invalid chunker configuration")?;
    let mut layout = TerminalLayout::new(cli.width);

    let session = registry
        .open(&mut doc, &mut layout)
        .with_context(|| format!("Failed to align {}", doc.name()))?;

    let output = if cli.json {
        let report = AlignmentReport::new(&doc, session, config);
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        json
    } else {
        layout.frame().unwrap_or_default().to_string()
    };

    registry.close(&mut doc, &mut layout)?;
    Ok(output)
}
