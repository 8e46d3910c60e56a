//! Run orchestration
//!
//! One run: initialize the workbook, harvest result links, then process the
//! links strictly one after another. Every harvested link ends up with
//! exactly one [`LinkOutcome`]; per-link failures are recorded, never
//! propagated.

use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::browser::{BrowserSession, PageDriver};
use crate::cancel::CancelFlag;
use crate::classify::{LinkKind, classify};
use crate::config::HarvestConfig;
use crate::content::extract_text;
use crate::error::{PdfError, PipelineError, PipelineResult};
use crate::harvest::{SearchPlan, harvest};
use crate::http::build_client;
use crate::pdf::{ExtractedTable, PdfArchive, extract_table};
use crate::report::{FailureReason, LinkOutcome, ProcessedLink, Report, ReportAssembler};

const FINISHED_BANNER: &str = "--------- PROCESS FINISHED ---------";

/// Run the whole workflow with a freshly launched browser
///
/// The browser is shut down before returning, whether the run succeeded or
/// not.
pub async fn run(config: &HarvestConfig, cancel: &CancelFlag) -> PipelineResult<Report> {
    let assembler = start(config)?;
    let client = build_client(config.http_timeout()).map_err(PipelineError::HttpClient)?;

    let session = BrowserSession::launch(config)
        .await
        .map_err(|e| PipelineError::browser(&e))?;

    let result = drive(&session, &client, config, assembler, cancel).await;
    session.shutdown().await;
    result
}

/// Run the workflow against an already available page driver
pub async fn run_with_driver<D: PageDriver + ?Sized>(
    driver: &D,
    client: &Client,
    config: &HarvestConfig,
    cancel: &CancelFlag,
) -> PipelineResult<Report> {
    let assembler = start(config)?;
    drive(driver, client, config, assembler, cancel).await
}

fn start(config: &HarvestConfig) -> PipelineResult<ReportAssembler> {
    info!(
        "Searching for --{}-- in {}",
        config.query(),
        config.search_engine_name()
    );
    Ok(ReportAssembler::create(config.output_path())?)
}

async fn drive<D: PageDriver + ?Sized>(
    driver: &D,
    client: &Client,
    config: &HarvestConfig,
    mut assembler: ReportAssembler,
    cancel: &CancelFlag,
) -> PipelineResult<Report> {
    let plan = SearchPlan::from_config(config)?;
    let archive = PdfArchive::new(config.pdf_dir());

    let links = harvest(driver, config.query(), &plan, config.pacing(), cancel).await;

    if links.is_empty() {
        info!("No search results found.");
        let report = assembler.finish(Vec::new())?;
        info!("{}", FINISHED_BANNER);
        return Ok(report);
    }

    let total = links.len();
    info!("{} links to process", total);

    let mut processed = Vec::with_capacity(total);
    let mut stop_logged = false;
    for (i, url) in links.into_iter().enumerate() {
        let position = i + 1;

        if cancel.is_cancelled() {
            if !stop_logged {
                stop_logged = true;
                warn!(
                    "Stop requested, {} of {} links left unprocessed",
                    total - i,
                    total
                );
            }
            processed.push(ProcessedLink::new(
                url,
                LinkOutcome::Failure(FailureReason::Cancelled),
            ));
            continue;
        }

        info!("Opening link {}", url);
        let outcome =
            process_link(driver, client, config, &archive, &mut assembler, position, &url).await;
        debug!(position, ?outcome, "Link processed");
        processed.push(ProcessedLink::new(url, outcome));
    }

    let report = assembler.finish(processed)?;
    info!("{}", FINISHED_BANNER);
    Ok(report)
}

async fn process_link<D: PageDriver + ?Sized>(
    driver: &D,
    client: &Client,
    config: &HarvestConfig,
    archive: &PdfArchive,
    assembler: &mut ReportAssembler,
    position: usize,
    url: &str,
) -> LinkOutcome {
    let kind = match classify(client, url).await {
        Ok(kind) => kind,
        Err(e) => return failure(FailureReason::CannotClassify, &e),
    };

    match kind {
        LinkKind::Pdf => {
            info!("Link is a PDF file, downloading");
            match extract_table(client, url, archive).await {
                Ok(table) => record_table(assembler, position, &table),
                Err(PdfError::Fetch(e)) => failure(FailureReason::CannotFetch, &e),
                Err(e @ PdfError::NoTable) => failure(FailureReason::NoTable, &e),
            }
        }
        LinkKind::Page => match extract_text(driver, url, config.title_wait()).await {
            Ok(text) => LinkOutcome::TextExtracted(text),
            Err(e) => failure(FailureReason::Timeout, &e),
        },
    }
}

/// A table that cannot be written to its sheet counts as no table
fn record_table(
    assembler: &mut ReportAssembler,
    position: usize,
    table: &ExtractedTable,
) -> LinkOutcome {
    match assembler.add_table_sheet(position, table) {
        Ok(sheet) => LinkOutcome::TableFound(sheet),
        Err(e) => failure(FailureReason::NoTable, &e),
    }
}

fn failure(reason: FailureReason, cause: &dyn std::error::Error) -> LinkOutcome {
    error!("{}", reason.describe());
    debug!(cause = %cause, "Link failure detail");
    LinkOutcome::Failure(reason)
}
