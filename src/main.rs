//! Binary entry point for kbindex.
//!
//! This binary provides the CLI interface over a knowledge directory.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow unnecessary_wraps for consistent command function signatures
#![allow(clippy::unnecessary_wraps)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow option_if_let_else for environment variable fallback chains
#![allow(clippy::option_if_let_else)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand, ValueEnum};
use kbindex::config::KbConfig;
use kbindex::models::is_canonical_slug;
use kbindex::observability::{self, InitOptions};
use kbindex::search::snippet;
use kbindex::{
    Corpus, Difficulty, DirectorySource, Document, Error, KeywordIndex, KnowledgeBase,
    QueryEngine, RelationGraph, parse_search_query, tokenize,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// kbindex - keyword lookup over Markdown troubleshooting articles.
#[derive(Parser)]
#[command(name = "kbindex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Knowledge directory (overrides the configured one).
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for commands that print documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Search articles.
    ///
    /// The query may contain `category:<slug>` and `difficulty:<tier>` tokens.
    Search {
        /// The search query.
        query: String,

        /// Filter by category.
        #[arg(long)]
        category: Option<String>,

        /// Filter by difficulty: beginner, intermediate or advanced.
        #[arg(long)]
        difficulty: Option<String>,

        /// Maximum number of results (default from config).
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show one article.
    Get {
        /// Article slug.
        slug: String,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// List articles by category or difficulty.
    List {
        /// Only this category (ordered by title).
        #[arg(long)]
        category: Option<String>,

        /// Only this difficulty (ordered by category, then title).
        #[arg(long)]
        difficulty: Option<String>,
    },

    /// Show articles related to a slug.
    Related {
        /// Article slug.
        slug: String,

        /// Maximum number of hops to follow.
        #[arg(long, default_value = "1")]
        depth: usize,
    },

    /// List related links pointing at missing articles.
    Dangling,

    /// List categories with document counts.
    Categories,

    /// List keywords, most used first.
    Keywords {
        /// Maximum number of keywords.
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Load the knowledge directory and report problems.
    Check,

    /// Show configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };
    let config = match &cli.dir {
        Some(dir) => config.with_knowledge_dir(dir),
        None => config,
    };

    if let Err(e) = observability::init_from_config(
        &config.logging,
        InitOptions {
            verbose: cli.verbose,
        },
    ) {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: KbConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Search {
            query,
            category,
            difficulty,
            limit,
            format,
        } => cmd_search(&config, &query, category, difficulty, limit, format),

        Commands::Get { slug, format } => cmd_get(&config, &slug, format),

        Commands::List {
            category,
            difficulty,
        } => cmd_list(&config, category, difficulty),

        Commands::Related { slug, depth } => cmd_related(&config, &slug, depth),

        Commands::Dangling => cmd_dangling(&config),

        Commands::Categories => cmd_categories(&config),

        Commands::Keywords { limit } => cmd_keywords(&config, limit),

        Commands::Check => cmd_check(&config),

        Commands::Config { show } => cmd_config(config, show),
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<KbConfig, Box<dyn std::error::Error>> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return KbConfig::load_from_file(Path::new(config_path)).map_err(Into::into);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("KBINDEX_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return KbConfig::load_from_file(Path::new(&config_path)).map_err(Into::into);
        }
    }

    // Otherwise, load from default location
    Ok(KbConfig::load_default())
}

/// Loads the corpus from the knowledge directory.
///
/// Load errors are reported with the offending file paths.
fn load_corpus(config: &KbConfig) -> Result<Arc<Corpus>, Box<dyn std::error::Error>> {
    let source = DirectorySource::new(&config.knowledge_dir);
    let kb = KnowledgeBase::from_source(&source).map_err(|e| locate_error(&source, e))?;
    Ok(kb.snapshot()?)
}

/// Rewrites load-input positions in `error` as file paths.
fn locate_error(source: &DirectorySource, error: Error) -> Box<dyn std::error::Error> {
    let paths = source.article_paths().unwrap_or_default();
    let path_of = |index: usize| {
        paths
            .get(index)
            .map_or_else(|| format!("#{index}"), |p| p.display().to_string())
    };

    match error {
        Error::MalformedDocument {
            reason,
            source_index: Some(index),
        } => format!("malformed document {}: {reason}", path_of(index)).into(),
        Error::DuplicateSlug {
            slug,
            first_index,
            second_index,
        } => format!(
            "duplicate slug '{slug}' ({} and {})",
            path_of(first_index),
            path_of(second_index)
        )
        .into(),
        other => other.into(),
    }
}

/// Parses an optional difficulty flag.
fn parse_difficulty_flag(value: Option<&str>) -> Result<Option<Difficulty>, Error> {
    value
        .map(|v| {
            Difficulty::parse(v).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "unknown difficulty '{v}' (expected beginner, intermediate or advanced)"
                ))
            })
        })
        .transpose()
}

/// One search hit as printed by `search --format json`.
#[derive(Serialize)]
struct SearchOutput<'a> {
    slug: &'a str,
    title: &'a str,
    category: &'a str,
    difficulty: Difficulty,
    score: u32,
    summary: &'a str,
    snippet: Option<String>,
}

/// Search command.
fn cmd_search(
    config: &KbConfig,
    query: &str,
    category: Option<String>,
    difficulty: Option<String>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = parse_search_query(query);
    let mut filter = parsed.filter;
    if let Some(category) = category {
        filter = filter.with_category(category);
    }
    if let Some(difficulty) = parse_difficulty_flag(difficulty.as_deref())? {
        filter = filter.with_difficulty(difficulty);
    }
    let limit = limit.unwrap_or(config.max_results);

    let corpus = load_corpus(config)?;
    let engine = QueryEngine::new(&corpus);
    let hits = engine.search_limited(&parsed.text, &filter, limit);
    let tokens = tokenize(&parsed.text);

    match format {
        OutputFormat::Json => {
            let output: Vec<SearchOutput<'_>> = hits
                .iter()
                .map(|hit| SearchOutput {
                    slug: &hit.document.slug,
                    title: &hit.document.title,
                    category: &hit.document.category,
                    difficulty: hit.document.difficulty,
                    score: hit.score,
                    summary: &hit.document.summary,
                    snippet: snippet(&hit.document.body, &tokens, config.snippet_width),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        },
        OutputFormat::Text => {
            if hits.is_empty() {
                println!("No articles found.");
                return Ok(());
            }
            println!("Found {} articles:", hits.len());
            println!();
            for (i, hit) in hits.iter().enumerate() {
                let doc = hit.document;
                println!(
                    "{}. {} [{}] ({}, {}) score {}",
                    i + 1,
                    doc.title,
                    doc.slug,
                    doc.category,
                    doc.difficulty,
                    hit.score
                );
                if let Some(excerpt) = snippet(&doc.body, &tokens, config.snippet_width) {
                    println!("   {excerpt}");
                }
            }
        },
    }

    Ok(())
}

/// Get command.
fn cmd_get(
    config: &KbConfig,
    slug: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let corpus = load_corpus(config)?;
    let doc = corpus.get(slug)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(doc)?),
        OutputFormat::Text => print_document(doc, &RelationGraph::new(&corpus)),
    }

    Ok(())
}

/// Prints a document in human-readable form.
fn print_document(doc: &Document, graph: &RelationGraph<'_>) {
    println!("{}", doc.title);
    println!("{}", "=".repeat(doc.title.chars().count()));
    println!();
    println!("Slug:       {}", doc.slug);
    println!("Category:   {}", doc.category);
    println!("Difficulty: {}", doc.difficulty);
    if !doc.keywords.is_empty() {
        println!("Keywords:   {}", doc.keywords.join(", "));
    }
    if !doc.commands.is_empty() {
        println!("Commands:");
        for command in &doc.commands {
            println!("  {command}");
        }
    }
    let related = graph.related_documents(&doc.slug);
    if !related.is_empty() {
        println!("Related:");
        for other in related {
            println!("  {} [{}]", other.title, other.slug);
        }
    }
    println!();
    println!("{}", doc.body.trim_end());
}

/// List command.
fn cmd_list(
    config: &KbConfig,
    category: Option<String>,
    difficulty: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let difficulty = parse_difficulty_flag(difficulty.as_deref())?;
    let corpus = load_corpus(config)?;

    let docs: Vec<&Document> = match (category, difficulty) {
        (Some(category), difficulty) => corpus
            .by_category(&category)
            .into_iter()
            .filter(|d| difficulty.is_none_or(|level| d.difficulty == level))
            .collect(),
        (None, Some(difficulty)) => corpus.by_difficulty(difficulty),
        (None, None) => corpus.all().collect(),
    };

    for doc in &docs {
        println!(
            "{:<40} {:<20} {:<12} {}",
            doc.slug, doc.category, doc.difficulty, doc.title
        );
    }
    println!();
    println!("{} articles", docs.len());

    Ok(())
}

/// Related command.
fn cmd_related(
    config: &KbConfig,
    slug: &str,
    depth: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let corpus = load_corpus(config)?;
    let doc = corpus.get(slug)?;
    let graph = RelationGraph::new(&corpus);

    let reachable = graph.reachable_from(slug, Some(depth));
    println!("Reachable from '{slug}' within {depth} hops:");
    for other in reachable.iter().filter(|s| **s != doc.slug) {
        if let Ok(found) = corpus.get(other) {
            println!("  {} [{}]", found.title, found.slug);
        }
    }

    let missing: Vec<&String> = graph
        .neighbors(slug)
        .iter()
        .filter(|target| !corpus.contains(target))
        .collect();
    if !missing.is_empty() {
        println!();
        println!("Missing related articles:");
        for target in missing {
            println!("  {target}");
        }
    }

    let backlinks = graph.backlinks(slug);
    if !backlinks.is_empty() {
        println!();
        println!("Referenced by:");
        for other in backlinks {
            println!("  {} [{}]", other.title, other.slug);
        }
    }

    Ok(())
}

/// Dangling command.
fn cmd_dangling(config: &KbConfig) -> Result<(), Box<dyn std::error::Error>> {
    let corpus = load_corpus(config)?;
    let dangling = RelationGraph::new(&corpus).dangling_references();

    if dangling.is_empty() {
        println!("No dangling references.");
        return Ok(());
    }
    for reference in &dangling {
        println!("{} -> {}", reference.source, reference.target);
    }

    Ok(())
}

/// Categories command.
fn cmd_categories(config: &KbConfig) -> Result<(), Box<dyn std::error::Error>> {
    let corpus = load_corpus(config)?;

    for category in corpus.categories() {
        println!(
            "{:<24} {:>4}  {}",
            category.slug, category.document_count, category.name
        );
        if !category.description.is_empty() {
            println!("{:<30}{}", "", category.description);
        }
    }

    Ok(())
}

/// Keywords command.
fn cmd_keywords(config: &KbConfig, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let corpus = load_corpus(config)?;
    let index = KeywordIndex::build(&corpus);

    for info in index.list().into_iter().take(limit) {
        println!("{:<30} {:>4}  {}", info.keyword, info.document_count, info.slugs.join(", "));
    }
    println!();
    println!(
        "{} distinct keywords, {} keyword-article links",
        index.len(),
        index.association_count()
    );

    Ok(())
}

/// Check command.
fn cmd_check(config: &KbConfig) -> Result<(), Box<dyn std::error::Error>> {
    let corpus = load_corpus(config)?;
    let graph = RelationGraph::new(&corpus);
    let dangling = graph.dangling_references();
    let categories = corpus
        .categories()
        .into_iter()
        .filter(|c| c.document_count > 0)
        .count();

    println!("Knowledge directory: {}", config.knowledge_dir.display());
    println!("Articles:            {}", corpus.len());
    println!("Categories in use:   {categories}");
    println!("Related links:       {}", graph.edge_count());
    println!("Dangling links:      {}", dangling.len());

    for reference in &dangling {
        println!("  {} -> {} (missing)", reference.source, reference.target);
    }
    for doc in corpus.all().filter(|d| !is_canonical_slug(&d.slug)) {
        println!("  {} (non-canonical slug)", doc.slug);
    }

    Ok(())
}

/// Config command.
fn cmd_config(config: KbConfig, show: bool) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("Current Configuration");
        println!("=====================");
        println!();
        println!("Knowledge Directory: {}", config.knowledge_dir.display());
        println!("Max Results: {}", config.max_results);
        println!("Snippet Width: {}", config.snippet_width);
        println!();
        println!("Logging:");
        println!(
            "  Format: {}",
            config.logging.format.as_deref().unwrap_or("(default)")
        );
        println!(
            "  Filter: {}",
            config.logging.filter.as_deref().unwrap_or("(default)")
        );
        println!(
            "  File: {}",
            config.logging.file.as_deref().unwrap_or("(stderr)")
        );
    } else {
        println!("Use --show to display configuration");
    }

    Ok(())
}
