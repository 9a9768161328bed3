use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dewikt::server::SearchBody;
use dewikt::{Assembler, Assembly, Labels, Lookup, Settings, WikiClient};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "dewikt", about = "German Wiktionary entry extractor")]
struct Cli {
    /// Settings file (default: ./dewikt.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve {
        /// Address to bind (host:port), overrides server.bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// List candidate pages for a word
    Search { word: String },
    /// Assemble the entry for a page id
    Page { id: u64 },
    /// Search a word and assemble its best match
    Lookup { word: String },
    /// Assemble entries from saved page markup, no network
    Parse {
        /// HTML files of rendered page sections
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Markup of the matching Flexion: page, merged into every entry
        #[arg(long)]
        inflection: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.as_str().into()),
        )
        .init();

    let t0 = Instant::now();
    let settings = Settings::load(cli.config.as_deref())?;
    let labels = Labels::load(settings.labels_path.as_deref())?;
    let assembler = Assembler::new(labels);

    let result = match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.server.bind.clone());
            let lookup = Arc::new(lookup(&settings, assembler)?);
            dewikt::server::serve(&bind, lookup).await
        }
        Commands::Search { word } => {
            let pages = lookup(&settings, assembler)?.search(&word).await?;
            info!("{} page(s) for {:?}", pages.len(), word);
            println!("{}", serde_json::to_string_pretty(&SearchBody { pages })?);
            Ok(())
        }
        Commands::Page { id } => {
            let assembly = lookup(&settings, assembler)?.page(id).await?;
            print_assembly(&assembly)
        }
        Commands::Lookup { word } => match lookup(&settings, assembler)?.word(&word).await? {
            Some(assembly) => print_assembly(&assembly),
            None => {
                println!("No pages found for {:?}.", word);
                Ok(())
            }
        },
        Commands::Parse { files, inflection } => {
            let secondary = match inflection {
                Some(path) => Some(
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {:?}", path))?,
                ),
                None => None,
            };
            let counts = parse_files(&assembler, &files, secondary.as_deref())?;
            counts.print();
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {}", format_duration(elapsed));
    }

    result
}

fn lookup(settings: &Settings, assembler: Assembler) -> anyhow::Result<Lookup<WikiClient>> {
    let upstream = &settings.upstream;
    let client = WikiClient::new(
        &upstream.api_url,
        upstream.search_limit,
        &upstream.inflection_prefix,
        &upstream.client,
    )?;
    Ok(Lookup::new(client, assembler, upstream.section))
}

fn print_assembly(assembly: &Assembly) -> anyhow::Result<()> {
    for d in &assembly.diagnostics {
        warn!("Section {} skipped: {}", d.section, d.message);
    }
    println!("{}", serde_json::to_string_pretty(&assembly.entry)?);
    Ok(())
}

struct ParseCounts {
    files: usize,
    entries: usize,
    failed_sections: usize,
    unreadable: usize,
}

impl ParseCounts {
    fn print(&self) {
        eprintln!(
            "Parsed {} files: {} entries, {} failed sections, {} unreadable.",
            self.files, self.entries, self.failed_sections, self.unreadable,
        );
    }
}

/// Assemble every file in parallel and print one JSON entry per line, in input order.
fn parse_files(assembler: &Assembler, files: &[PathBuf], secondary: Option<&str>) -> anyhow::Result<ParseCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let result = parse_file(assembler, path, secondary);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_and_clear();

    let mut counts = ParseCounts {
        files: files.len(),
        entries: 0,
        failed_sections: 0,
        unreadable: 0,
    };
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(assembly) => {
                counts.entries += 1;
                counts.failed_sections += assembly.diagnostics.len();
                println!("{}", serde_json::to_string(&assembly.entry)?);
            }
            Err(e) => {
                counts.unreadable += 1;
                warn!("Skipping {:?}: {:#}", path, e);
            }
        }
    }
    Ok(counts)
}

fn parse_file(assembler: &Assembler, path: &Path, secondary: Option<&str>) -> anyhow::Result<Assembly> {
    let markup = std::fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(assembler.assemble_markup(0, &title, &markup, secondary))
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
