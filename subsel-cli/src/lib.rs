//! subsel CLI

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use subsel_core::export::{export_rows, parse_indices};
use subsel_core::output::{write_anki_csv, write_csv, write_json_pretty};
use subsel_core::query::{Query, QueryPattern, WordRange};
use subsel_core::rank::limit_from;
use subsel_core::record::SentenceRecord;
use subsel_core::search::{search, SearchOptions, SearchResults, DEFAULT_LIMIT};
use subsel_core::shows::ShowLanguageTable;

/// Show names wider than this are cut in text output.
const SHOW_WIDTH: usize = 17;
/// Translations wider than this are cut in text output.
const TRANSLATION_WIDTH: usize = 129;

/// CLI entrypoint for subsel.
#[derive(Debug, Parser)]
#[command(
    name = "subsel",
    version,
    about = "Select example sentences from bilingual subtitle TSV corpora"
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search the corpus and print matching sentences
    Find(FindArgs),
    /// Search the corpus, then write selected result rows to a new TSV file
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Text the sentence must contain (a regex with --regex)
    #[arg(short = 'q', long = "query", default_value = "")]
    query: String,

    /// Treat --query as a regular expression
    #[arg(long = "regex", action = ArgAction::SetTrue)]
    regex: bool,

    /// Term that must be contained (repeatable)
    #[arg(short = 'c', long = "contains", value_hint = ValueHint::Other)]
    contains: Vec<String>,

    /// Term that rejects a sentence if found in either language (repeatable)
    #[arg(short = 'x', long = "exclude", value_hint = ValueHint::Other)]
    exclude: Vec<String>,

    /// Only native-language shows
    #[arg(long = "native-only", action = ArgAction::SetTrue)]
    native_only: bool,

    /// Only sentences with an audio reference
    #[arg(long = "has-audio", action = ArgAction::SetTrue)]
    has_audio: bool,

    /// Minimum word count (0 = no limit)
    #[arg(long = "word-count-min", default_value_t = 0)]
    word_count_min: usize,

    /// Maximum word count (0 = no limit)
    #[arg(long = "word-count-max", default_value_t = 0)]
    word_count_max: usize,

    /// Maximum number of results (0 or negative = no limit)
    #[arg(short = 'l', long = "limit", default_value_t = DEFAULT_LIMIT as i64, allow_negative_numbers = true)]
    limit: i64,

    /// Drop sentences whose text was already returned
    #[arg(long = "unique-only", default_value_t = true, action = ArgAction::Set)]
    unique_only: bool,

    /// Corpus root directory
    #[arg(long = "root", env = "SUBSEL_ROOT", value_hint = ValueHint::DirPath)]
    root: PathBuf,

    /// Show language table (TOML) to use instead of the built-in one
    #[arg(long = "shows", value_hint = ValueHint::FilePath)]
    shows: Option<PathBuf>,

    /// Follow symlinks while walking the corpus
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,
}

#[derive(Debug, Args)]
struct FindArgs {
    #[command(flatten)]
    search: SearchArgs,

    /// Output format
    #[arg(short = 'o', long = "output", default_value_t = OutputFormat::Text, value_enum)]
    output: OutputFormat,

    /// Also print the other language on a second line
    #[arg(long = "full", action = ArgAction::SetTrue)]
    full: bool,

    /// Print the translation instead of the primary text
    #[arg(long = "english", action = ArgAction::SetTrue)]
    english: bool,

    /// Prefix lines with the difficulty score
    #[arg(long = "show-difficulty", action = ArgAction::SetTrue)]
    show_difficulty: bool,

    /// Prefix lines with the show name
    #[arg(long = "show-show", action = ArgAction::SetTrue)]
    show_show: bool,
}

#[derive(Debug, Args)]
struct ExportArgs {
    #[command(flatten)]
    search: SearchArgs,

    /// Comma-separated result positions to export, e.g. 0,3,5
    #[arg(long = "indices", visible_alias = "export-indices")]
    indices: String,

    /// Existing working directory for the exported file
    #[arg(long = "output-dir", value_hint = ValueHint::DirPath)]
    output_dir: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
    #[value(name = "anki-csv")]
    AnkiCsv,
}

#[derive(Debug, Clone, Copy, Default)]
struct TextStyle {
    full: bool,
    english: bool,
    show_difficulty: bool,
    show_show: bool,
}

impl From<&FindArgs> for TextStyle {
    fn from(args: &FindArgs) -> Self {
        Self {
            full: args.full,
            english: args.english,
            show_difficulty: args.show_difficulty,
            show_show: args.show_show,
        }
    }
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Find(args) => run_find(args),
        Command::Export(args) => run_export(args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_find(args: FindArgs) -> Result<()> {
    let found = run_search(&args.search)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match args.output {
        OutputFormat::Text => write_text(&found.results, TextStyle::from(&args), &mut handle)?,
        OutputFormat::Json => write_json_pretty(&found, &mut handle)?,
        OutputFormat::Csv => write_csv(&found.results, &mut handle)?,
        OutputFormat::AnkiCsv => write_anki_csv(&found.results, &mut handle)?,
    }

    handle.flush()?;
    Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
    let indices = parse_indices(&args.indices)?;
    let found = run_search(&args.search)?;

    let path = export_rows(&found.results, &indices, args.output_dir.as_deref())?;
    println!("{}", path.display());
    Ok(())
}

fn run_search(args: &SearchArgs) -> Result<SearchResults> {
    let query = build_query(args)?;
    let table = load_table(args.shows.as_deref())?;
    let opts = build_options(args);

    debug!(
        query = %args.query,
        contains = ?args.contains,
        native_only = opts.native_only,
        limit = args.limit,
        root = %args.root.display(),
        "starting search"
    );

    search(&args.root, &query, &table, &opts)
        .with_context(|| format!("searching corpus at {}", args.root.display()))
}

fn build_query(args: &SearchArgs) -> Result<Query> {
    let pattern = QueryPattern::compile(&args.query, args.regex)?;

    let query = Query::new()
        .with_pattern(pattern)
        .with_contains(args.contains.clone())
        .with_excludes(args.exclude.clone())
        .with_word_range(WordRange::new(args.word_count_min, args.word_count_max))
        .require_audio(args.has_audio);

    query.ensure_selective()?;
    Ok(query)
}

fn build_options(args: &SearchArgs) -> SearchOptions {
    SearchOptions {
        native_only: args.native_only,
        unique_only: args.unique_only,
        limit: limit_from(args.limit),
        follow_symlinks: args.follow_symlinks,
    }
}

fn load_table(path: Option<&Path>) -> Result<ShowLanguageTable> {
    match path {
        Some(path) => ShowLanguageTable::from_path(path)
            .with_context(|| format!("loading show table {}", path.display())),
        None => ShowLanguageTable::embedded().context("loading built-in show table"),
    }
}

/// `[difficulty\t][show\t]index\ttext`, optionally followed by the other
/// language on an indented line.
fn write_text(results: &[SentenceRecord], style: TextStyle, mut w: impl Write) -> Result<()> {
    for (i, r) in results.iter().enumerate() {
        let mut line = String::new();

        if style.show_difficulty {
            line.push_str(&format!("{}\t", r.difficulty));
        }
        if style.show_show {
            line.push_str(&format!("{}\t", truncate(&r.source_show, SHOW_WIDTH)));
        }
        line.push_str(&format!("{i}\t"));

        if style.english {
            line.push_str(&truncate(&r.translated_text, TRANSLATION_WIDTH));
        } else {
            line.push_str(&r.primary_text);
        }
        writeln!(w, "{line}")?;

        if style.full {
            let other = if style.english {
                r.primary_text.clone()
            } else {
                truncate(&r.translated_text, TRANSLATION_WIDTH)
            };
            writeln!(w, "\t\t\t{other}")?;
        }
    }
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
