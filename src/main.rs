//! CLI entry point for serpsheet.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use serpsheet::logging::{self, LogTail};
use serpsheet::utils::constants::LOG_FILE_NAME;
use serpsheet::{CancelFlag, pipeline};

mod cli;

use cli::{Cli, Command, RunArgs, WatchLogArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    match cli.command {
        Command::Run(args) => run(args, default_level).await,
        Command::WatchLog(args) => watch_log(args, default_level).await,
    }
}

async fn run(args: RunArgs, default_level: &str) -> Result<()> {
    let config = args.to_config()?;
    logging::init(&config.log_path(), default_level)?;
    debug!(?config, "Configuration resolved");

    let cancel = CancelFlag::new();
    cancel.cancel_on_ctrl_c();

    let report = pipeline::run(&config, &cancel).await?;
    if report.is_empty() {
        info!("Workbook {} left empty", report.path.display());
    } else {
        info!(
            links = report.links.len(),
            tables = report.table_sheets,
            failures = report.failures(),
            "Workbook written to {}",
            report.path.display()
        );
    }
    Ok(())
}

async fn watch_log(args: WatchLogArgs, default_level: &str) -> Result<()> {
    logging::init_stderr(default_level)?;

    let path = args
        .log_file
        .unwrap_or_else(|| args.output_dir.join(LOG_FILE_NAME));
    let mut tail = if args.from_start {
        LogTail::new(&path)
    } else {
        LogTail::from_end(&path).await?
    };
    info!("Watching {} (Ctrl-C to stop)", tail.path().display());

    let cancel = CancelFlag::new();
    cancel.cancel_on_ctrl_c();

    tail.follow(Duration::from_secs(args.interval.max(1)), &cancel, |line| {
        println!("{line}");
    })
    .await?;
    Ok(())
}
