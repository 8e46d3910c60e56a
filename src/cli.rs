//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use serpsheet::config::HarvestConfig;
use serpsheet::error::ConfigError;
use serpsheet::harvest::PacingPolicy;
use serpsheet::utils::constants::DEFAULT_LOG_POLL_SECS;

/// Run a web search in a real browser and collect page text and PDF tables
/// from every result into a spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "serpsheet")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search, visit every result link and write the workbook
    Run(RunArgs),
    /// Print lines appended to the run log, polling on an interval
    WatchLog(WatchLogArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Search term; several words may be given unquoted
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Directory for the workbook, the PDF archive and the log
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// JSON settings file; flags given here take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum number of result pages to read
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=50))]
    pub max_pages: Option<u64>,

    /// Search engine home page
    #[arg(long)]
    pub search_url: Option<String>,

    /// CSS selector of one result block
    #[arg(long)]
    pub result_selector: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Skip the randomized pauses between search interactions
    #[arg(long)]
    pub no_pacing: bool,

    /// Seconds a navigation may take
    #[arg(long)]
    pub page_load_timeout: Option<u64>,

    /// Seconds a content-type probe or PDF download may take
    #[arg(long)]
    pub http_timeout: Option<u64>,
}

impl RunArgs {
    /// Settings file (if any) overlaid with the flags
    pub fn to_config(&self) -> Result<HarvestConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => HarvestConfig::load_json(path)?,
            None => HarvestConfig::default(),
        };
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| base.output_dir().to_path_buf());

        let mut builder = HarvestConfig::builder_from(base)
            .output_dir(output_dir)
            .query(self.query.join(" "));

        if let Some(pages) = self.max_pages {
            builder = builder.max_pages(usize::try_from(pages).unwrap_or(usize::MAX));
        }
        if let Some(url) = &self.search_url {
            builder = builder.search_url(url.clone());
        }
        if let Some(selector) = &self.result_selector {
            builder = builder.result_selector(selector.clone());
        }
        if self.headed {
            builder = builder.headless(false);
        }
        if self.no_pacing {
            builder = builder.pacing(PacingPolicy::none());
        }
        if let Some(secs) = self.page_load_timeout {
            builder = builder.page_load_timeout_secs(secs);
        }
        if let Some(secs) = self.http_timeout {
            builder = builder.http_timeout_secs(secs);
        }

        builder.build()
    }
}

#[derive(Args, Debug)]
pub struct WatchLogArgs {
    /// Directory holding the run log
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Log file path, overriding the one in the output directory
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Seconds between polls
    #[arg(long, default_value_t = DEFAULT_LOG_POLL_SECS)]
    pub interval: u64,

    /// Print the existing contents first
    #[arg(long)]
    pub from_start: bool,
}
