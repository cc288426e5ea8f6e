use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use symdex::config::load_config;
use symdex::index::{index_files, query};
use symdex::scanner::{scan_go_files, ScanOptions};
use symdex::{parse_selector, FileSummary, GoExtractor, IgnoreMatcher, LanguageAdapter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "symdex")]
#[command(version)]
#[command(about = "Go symbol indexer with a selector query language")]
struct Cli {
    /// Log debug events to stderr (SYMDEX_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract imports and symbols from a single file and print them as JSON
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Index every Go file under ROOT and print the summaries as JSON
    Index {
        #[arg(value_name = "ROOT", default_value = ".")]
        root: PathBuf,
    },

    /// Print the symbols under ROOT matching SELECTOR
    /// Example: 'method_definition[receiver=/\*Server/, start>=100]'
    Query {
        #[arg(value_name = "SELECTOR")]
        selector: String,

        #[arg(value_name = "ROOT", default_value = ".")]
        root: PathBuf,

        /// Emit a JSON array instead of one line per symbol
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SYMDEX_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn index_root(root: &Path, extractor: &GoExtractor) -> Result<Vec<FileSummary>> {
    let cfg = load_config(root);

    let ignore_path = root.join(&cfg.scan.ignore_file);
    let ignore = if ignore_path.is_file() {
        Some(IgnoreMatcher::load(&ignore_path)?)
    } else {
        None
    };

    let opts = ScanOptions {
        root: root.to_path_buf(),
        max_file_bytes: cfg.effective_max_file_bytes(),
        exclude_dir_names: cfg.scan.exclude_dir_names.clone(),
        ignore,
    };
    let entries = scan_go_files(&opts)?;
    tracing::debug!(root = %root.display(), files = entries.len(), "scanned");

    index_files(&entries, extractor, cfg.jobs)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let extractor = GoExtractor::default();

    match cli.cmd {
        Command::Inspect { file } => {
            let bytes = std::fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;
            let summary = extractor.extract(&file, &bytes)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Index { root } => {
            let summaries = index_root(&root, &extractor)?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Command::Query { selector, root, json } => {
            let selector = parse_selector(&selector)?;
            let summaries = index_root(&root, &extractor)?;
            let hits: Vec<_> = query(&summaries, &selector).collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for s in hits {
                    println!("{}:{}-{} {} {} {}", s.file, s.start_line, s.end_line, s.kind, s.name, s.signature);
                }
            }
        }
    }

    Ok(())
}
