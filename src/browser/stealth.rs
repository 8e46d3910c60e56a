//! Automation-fingerprint evasions injected before any document script runs

use chromiumoxide::{Page, cdp};
use tracing::debug;

use crate::utils::constants::CHROME_USER_AGENT;

// Order matters: later scripts assume `window.chrome` exists
const EVASIONS: &[(&str, &str)] = &[
    (
        "navigator.webdriver",
        r"Object.defineProperty(Navigator.prototype, 'webdriver', { get: () => undefined });",
    ),
    (
        "window.chrome",
        r"if (!window.chrome) { window.chrome = {}; }
if (!window.chrome.runtime) { window.chrome.runtime = {}; }",
    ),
    (
        "navigator.languages",
        r"Object.defineProperty(Navigator.prototype, 'languages', { get: () => ['en-US', 'en'] });",
    ),
    (
        "navigator.plugins",
        r"Object.defineProperty(Navigator.prototype, 'plugins', { get: () => [1, 2, 3, 4, 5] });",
    ),
];

/// Register the evasion scripts and the user agent override on `page`
pub(crate) async fn apply(page: &Page) -> Result<(), chromiumoxide::error::CdpError> {
    for (name, source) in EVASIONS {
        debug!("Injecting evasion: {}", name);
        page.execute(
            cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams {
                source: (*source).to_string(),
                include_command_line_api: None,
                world_name: None,
                run_immediately: None,
            },
        )
        .await?;
    }

    page.execute(cdp::browser_protocol::network::SetUserAgentOverrideParams {
        user_agent: CHROME_USER_AGENT.to_string(),
        accept_language: Some("en-US,en;q=0.9".to_string()),
        platform: None,
        user_agent_metadata: None,
    })
    .await?;

    Ok(())
}
