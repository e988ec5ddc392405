use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use reelrank_core::{RankingEngine, RecordFilter, TieBreak, read_export_path};
use reelrankctl::{ConfigLoader, ConfigOverrides, OutputFormat, render};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "reelrankctl",
    version,
    about = "Summarize a personal movie ratings export"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank the movies in a ratings export and print the summary
    Report {
        /// Ratings export (CSV)
        export: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write the report to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Decode and filter an export without ranking it
    Check {
        /// Ratings export (CSV)
        export: PathBuf,
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(clap::Args)]
struct SettingsArgs {
    /// Config file (TOML); defaults to $REELRANK_CONFIG_PATH or ./reelrank.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Env file to load before reading REELRANK_* variables
    #[arg(long)]
    env_file: Option<PathBuf>,
    /// Entries per ranked list
    #[arg(long)]
    limit: Option<usize>,
    /// Ordering of movies with equal scores
    #[arg(long, value_enum)]
    tie_break: Option<TieBreakArg>,
    /// Skip rows that cannot be decoded instead of failing
    #[arg(long)]
    skip_malformed: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TieBreakArg {
    InputOrder,
    Title,
}

impl From<TieBreakArg> for TieBreak {
    fn from(value: TieBreakArg) -> Self {
        match value {
            TieBreakArg::InputOrder => TieBreak::InputOrder,
            TieBreakArg::Title => TieBreak::Title,
        }
    }
}

impl SettingsArgs {
    fn load(&self) -> Result<reelrankctl::ConfigLoad> {
        let overrides = ConfigOverrides {
            list_size: self.limit,
            tie_break: self.tie_break.map(Into::into),
            skip_malformed: self.skip_malformed.then_some(true),
        };
        ConfigLoader::new()
            .with_path(self.config.clone())
            .with_env_file(self.env_file.clone())
            .load(&overrides)
            .context("failed to load configuration")
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Report {
            export,
            format,
            output,
            settings,
        } => {
            let load = settings.load()?;
            let (_, summary) =
                reelrank_core::summarize_export_path(&export, &load.config)
                    .with_context(|| {
                        format!("failed to summarize {}", export.display())
                    })?;

            let rendered = render(&summary, format)
                .context("failed to render summary")?;

            match output {
                Some(path) => {
                    fs::write(&path, rendered).with_context(|| {
                        format!("failed to write {}", path.display())
                    })?;
                    info!(path = %path.display(), "report written");
                }
                None => print!("{rendered}"),
            }
        }
        Command::Check { export, settings } => {
            let load = settings.load()?;
            // Validates the ranking settings the same way `report` would
            RankingEngine::new(load.config.ranking.clone())
                .context("invalid ranking configuration")?;

            let report = read_export_path(&export, &load.config.ingest)
                .with_context(|| format!("failed to read {}", export.display()))?;
            let eligible = RecordFilter::new().apply(report.records.iter().cloned());

            println!("Export:          {}", export.display());
            println!("Rows read:       {}", report.rows_read);
            println!("Rows skipped:    {}", report.rows_skipped);
            println!("Rows excluded:   {}", report.rows_excluded);
            println!("Eligible movies: {}", eligible.len());
            println!("Configuration:   {}", load.source);
        }
    }

    Ok(())
}
