use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use docdex::index::{DocIndex, Inventory, ObjectLocation, find_search_index, reader, stats, validate};
use docdex::output;
use docdex::query::{QueryExecutor, parse_query};
use docdex::session::SearchSession;
use docdex::utils::{AppConfig, PorterStemmer, init_logging};
use regex::Regex;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docdex", version)]
#[command(about = "Query and check documentation search indexes")]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search pages, section titles and API objects
    Search {
        /// Query words and filters (page:, type:, top:); `-word` exclusions
        /// go after `--`
        #[arg(required = true)]
        query: Vec<String>,

        /// Drop pages containing this word (repeatable)
        #[arg(short = 'x', long = "exclude", value_name = "WORD")]
        exclude: Vec<String>,

        /// Index file or documentation build directory
        #[arg(short, long, default_value = ".")]
        index: PathBuf,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Disable colours
        #[arg(long)]
        no_color: bool,
    },
    /// List pages containing an index term
    Lookup {
        term: String,

        #[arg(short, long, default_value = ".")]
        index: PathBuf,
    },
    /// List documented objects
    Objects {
        /// Regex matched against full object names
        pattern: Option<String>,

        #[arg(short, long, default_value = ".")]
        index: PathBuf,

        /// Object role, e.g. `method` or `py:class`
        #[arg(short = 't', long = "type")]
        role: Option<String>,
    },
    /// Print the link target of an object
    Resolve {
        name: String,

        #[arg(short, long, default_value = ".")]
        index: PathBuf,

        /// Suffix appended to the docname (defaults to the configured one)
        #[arg(long)]
        suffix: Option<String>,
    },
    /// Show index statistics
    Stats {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Check structural invariants (exit status 1 on violations)
    Validate {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Read queries from stdin, one per line, until EOF or `:q`
    Shell {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load()?;

    match cli.command {
        Commands::Search {
            query,
            exclude,
            index,
            limit,
            json,
            no_color,
        } => {
            let input = search_input(&query, &exclude);
            run_search(&config, &input, &index, limit, json, no_color)?;
        }
        Commands::Lookup { term, index } => {
            run_lookup(&config, &term, &index)?;
        }
        Commands::Objects {
            pattern,
            index,
            role,
        } => {
            run_objects(&config, pattern.as_deref(), &index, role.as_deref())?;
        }
        Commands::Resolve {
            name,
            index,
            suffix,
        } => {
            let suffix = suffix.unwrap_or_else(|| config.html_suffix.clone());
            if !run_resolve(&config, &name, &index, &suffix)? {
                std::process::exit(1);
            }
        }
        Commands::Stats { path } => {
            stats::show_stats(&path)?;
        }
        Commands::Validate { path } => {
            if !run_validate(&config, &path)? {
                std::process::exit(1);
            }
        }
        Commands::Shell { path } => {
            run_shell(&config, &path)?;
        }
    }

    Ok(())
}

/// Query text with `--exclude` words appended as `-word` chunks
fn search_input(query: &[String], exclude: &[String]) -> String {
    query
        .iter()
        .cloned()
        .chain(exclude.iter().map(|w| format!("-{}", w.trim_start_matches('-'))))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Locate and load an index, logging any structural problems
fn load_index(path: &Path) -> Result<DocIndex> {
    let index_path = find_search_index(path)?;
    let index = reader::open(&index_path)
        .with_context(|| format!("Failed to load {}", index_path.display()))?;

    for violation in validate::validate(&index) {
        tracing::warn!(%violation, "index violation");
    }

    Ok(index)
}

fn run_search(
    config: &AppConfig,
    input: &str,
    path: &Path,
    limit: Option<usize>,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let index = load_index(path)?;

    let mut query = parse_query(input);
    query.options.limit = limit.or(query.options.limit).or(Some(config.default_limit));

    let executor = QueryExecutor::with_scoring_weights(&index, config.scoring_weights.clone());
    let results = executor.execute(&query)?;
    tracing::debug!(query = %input, results = results.len(), "search complete");

    if json {
        output::print_json(&mut io::stdout().lock(), &results)?;
    } else {
        let mut out = output::stdout(config.color && !no_color);
        output::print_results(&mut out, &results)?;
    }
    Ok(())
}

fn run_lookup(config: &AppConfig, term: &str, path: &Path) -> Result<()> {
    let index = load_index(path)?;

    let mut hits = index.lookup(term);
    if hits.is_empty() {
        // Index keys are stemmed; retry with the stemmed form
        let stemmed = PorterStemmer::new().stem(term);
        tracing::debug!(term, stemmed = %stemmed, "retrying with stemmed term");
        hits = index.lookup(&stemmed);
    }

    let mut out = output::stdout(config.color);
    output::print_lookup(&mut out, &index, term, &hits)?;
    Ok(())
}

fn run_objects(config: &AppConfig, pattern: Option<&str>, path: &Path, role: Option<&str>) -> Result<()> {
    let index = load_index(path)?;
    let inventory = Inventory::new(&index);

    let regex = Regex::new(pattern.unwrap_or("")).context("Invalid object pattern")?;
    let objects: Vec<&ObjectLocation> = inventory.matching(&regex, role).collect();

    let mut out = output::stdout(config.color);
    output::print_objects(&mut out, &objects)?;
    Ok(())
}

/// Returns false when the name does not resolve
fn run_resolve(config: &AppConfig, name: &str, path: &Path, suffix: &str) -> Result<bool> {
    let index = load_index(path)?;
    let inventory = Inventory::new(&index);

    match inventory.resolve(name) {
        Some(location) => {
            let mut out = output::stdout(config.color);
            output::print_resolved(&mut out, location, suffix)?;
            Ok(true)
        }
        None => {
            eprintln!("No object named {:?}", name);
            Ok(false)
        }
    }
}

/// Returns false when violations were found
fn run_validate(config: &AppConfig, path: &Path) -> Result<bool> {
    let index_path = find_search_index(path)?;
    let index = reader::open(&index_path)
        .with_context(|| format!("Failed to load {}", index_path.display()))?;
    let violations = validate::validate(&index);

    let mut out = output::stdout(config.color);
    output::print_violations(&mut out, &violations)?;
    Ok(violations.is_empty())
}

fn run_shell(config: &AppConfig, path: &Path) -> Result<()> {
    let index = load_index(path)?;
    let mut session = SearchSession::with_scoring_weights(Arc::new(index), config.scoring_weights.clone())
        .with_default_limit(config.default_limit);
    let mut out = output::stdout(config.color);

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read query")?;
        let input = line.trim();
        if input == ":q" {
            break;
        }
        if input.is_empty() {
            continue;
        }

        match session.search(input) {
            Ok(results) => {
                output::print_results(&mut out, &results)?;
                writeln!(out)?;
                out.flush()?;
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    tracing::debug!(cached = session.cached(), "shell closed");
    Ok(())
}
