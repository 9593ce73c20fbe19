//! Hitdash CLI
//!
//! Command-line interface for the hit dashboard:
//! - Record hits
//! - Show the hit log and its aggregates
//! - Export/Import CSV
//! - Clear the store

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use hitdash::config::{generate_default_config, Config};
use hitdash::storage::HitStore;
use hitdash::tracker::{self, CountEntry, FilterChoices, HitFilter, Summary, EXPORT_FILE_NAME};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hitdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Record page hits and see who visits what")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/hitdash/config.toml or ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory, overrides the config file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Filter selection shared by the read commands
#[derive(Args, Clone, Default)]
pub struct FilterArgs {
    /// Only hits with exactly this name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Only hits with exactly this URL
    #[arg(short, long)]
    pub url: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> HitFilter {
        HitFilter::from_selection(self.name.clone(), self.url.clone())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a hit
    Record {
        /// Who visited
        name: String,
        /// What was visited
        url: String,
    },

    /// Show the hit log
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show per-user, per-URL and per-day counts and the leaderboard
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
        /// Leaderboard size (default: from config)
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// List the distinct names and URLs that can be filtered on
    Filters,

    /// Export hits as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file, `-` for stdout
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },

    /// Append hits from a previously exported CSV file
    Import {
        /// Path to CSV file
        path: PathBuf,
        /// Parse only, do not store anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove every recorded hit
    Clear,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    hitdash::telemetry::init_tracing(&config.logging);

    let store_config = config.store_config();
    let mut store = HitStore::load(store_config.clone())
        .with_context(|| format!("Failed to load hits from {:?}", store_config.hits_path()))?;

    match cli.command {
        Commands::Record { name, url } => match store.record(&name, &url)? {
            Some(hit) => match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(hit)?),
                OutputFormat::Table => {
                    println!("Recorded {} -> {} at {}", hit.name(), hit.url(), hit.time())
                }
            },
            None => println!("Nothing recorded: name and URL are both required"),
        },

        Commands::List { filter } => {
            let hits = filter.to_filter().apply(store.hits());
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hits)?),
                OutputFormat::Table => print_hit_log(&hits),
            }
        }

        Commands::Stats { filter, top } => {
            let hits = filter.to_filter().apply(store.hits());
            let summary = Summary::compute(&hits, top.unwrap_or(config.dashboard.leaderboard_size));
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                OutputFormat::Table => print_summary(&summary),
            }
        }

        Commands::Filters => {
            let choices = FilterChoices::from_hits(store.hits());
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&choices)?),
                OutputFormat::Table => print_choices(&choices),
            }
        }

        Commands::Export { filter, output } => {
            let hits = filter.to_filter().apply(store.hits());
            if output.as_os_str() == "-" {
                print!("{}", tracker::to_csv(hits));
            } else {
                let rows = tracker::write_csv(&output, hits)?;
                println!("Exported {} hits to {:?}", rows, output);
            }
        }

        Commands::Import { path, dry_run } => {
            let result = tracker::import_file(&path)
                .with_context(|| format!("Failed to read {:?}", path))?;

            println!("Import results:");
            println!("  Rows processed: {}", result.rows_processed);
            println!("  Rows failed: {}", result.rows_failed);

            if !result.errors.is_empty() {
                println!();
                println!("Errors (first 10):");
                for error in result.errors.iter().take(10) {
                    println!("  {}", error);
                }
            }

            if dry_run {
                println!();
                println!("(Dry run - no hits were stored)");
            } else {
                let added = store.extend(result.hits)?;
                println!("  Hits added: {}", added);
            }
        }

        Commands::Clear => {
            let removed = store.clear()?;
            println!("Removed {} hits", removed);
        }

        Commands::Config { .. } => unreachable!("handled before loading the store"),
    }

    Ok(())
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }
    Ok(())
}

fn print_hit_log(hits: &[&hitdash::Hit]) {
    if hits.is_empty() {
        println!("No hits recorded");
        return;
    }

    let name_width = column_width("Name", hits.iter().map(|h| h.name()));
    let url_width = column_width("URL", hits.iter().map(|h| h.url()));

    println!(
        "{:>4}  {:<name_width$}  {:<url_width$}  {}",
        "#", "Name", "URL", "Timestamp"
    );
    println!("{}", "-".repeat(4 + name_width + url_width + 6 + 24));

    for (i, hit) in hits.iter().enumerate() {
        println!(
            "{:>4}  {:<name_width$}  {:<url_width$}  {}",
            i + 1,
            hit.name(),
            hit.url(),
            hit.time()
        );
    }
}

fn print_summary(summary: &Summary) {
    println!("Total hits: {}", summary.total);

    print_counts("Hits per user", &summary.per_user);
    print_counts("Hits per URL", &summary.per_url);
    print_counts("Hits over time", &summary.per_day);
    print_counts("Leaderboard", &summary.leaderboard);

    println!();
    match (&summary.most_visited, &summary.least_visited) {
        (Some(most), Some(least)) => {
            println!("Most visited:  {} ({})", most.key, most.count);
            println!("Least visited: {} ({})", least.key, least.count);
        }
        _ => {
            println!("Most visited:  No data");
            println!("Least visited: No data");
        }
    }
}

fn print_counts(title: &str, entries: &[CountEntry]) {
    println!();
    println!("{}:", title);

    if entries.is_empty() {
        println!("  No data");
        return;
    }

    let width = column_width("", entries.iter().map(|e| e.key.as_str()));
    for entry in entries {
        println!("  {:<width$}  {}", entry.key, entry.count);
    }
}

fn print_choices(choices: &FilterChoices) {
    println!("Names:");
    for name in &choices.names {
        println!("  {}", name);
    }
    println!();
    println!("URLs:");
    for url in &choices.urls {
        println!("  {}", url);
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_stats_with_filter() {
        let cli = Cli::parse_from(["hitdash", "stats", "--name", "A", "--top", "3"]);
        match cli.command {
            Commands::Stats { filter, top } => {
                assert_eq!(filter.name.as_deref(), Some("A"));
                assert_eq!(filter.url, None);
                assert_eq!(top, Some(3));
            }
            _ => panic!("expected stats"),
        }
    }

    #[test]
    fn test_export_defaults_to_hits_csv() {
        let cli = Cli::parse_from(["hitdash", "export"]);
        match cli.command {
            Commands::Export { output, .. } => assert_eq!(output, PathBuf::from("hits.csv")),
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width("Name", ["A", "Bobby"].into_iter()), 5);
        assert_eq!(column_width("Name", std::iter::empty()), 4);
    }
}
