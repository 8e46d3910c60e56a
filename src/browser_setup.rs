use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::handler::Handler;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, trace, warn};

use crate::utils::constants::CHROME_USER_AGENT;

/// Environment variable naming an explicit Chrome/Chromium binary
pub const CHROME_PATH_ENV: &str = "CHROMIUM_PATH";

/// Flags that hide the automation banner and keep a search session quiet
const HARVEST_FLAGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--disable-infobars",
    "--disable-notifications",
    "--disable-popup-blocking",
    "--disable-extensions",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--disable-sync",
    "--disable-default-apps",
    "--disable-background-networking",
    "--disable-renderer-backgrounding",
    "--disable-component-update",
    "--no-first-run",
    "--no-default-browser-check",
    "--no-sandbox",
    "--password-store=basic",
    "--use-mock-keychain",
    "--mute-audio",
];

/// How the harvesting browser should be started
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    /// DevTools request budget; also bounds page loads
    pub request_timeout: Duration,
    /// Profile directory. A per-process temp directory when `None`.
    pub chrome_data_dir: Option<PathBuf>,
}

impl LaunchOptions {
    fn profile_dir(&self) -> PathBuf {
        self.chrome_data_dir.clone().unwrap_or_else(|| {
            std::env::temp_dir().join(format!("serpsheet_chrome_{}", std::process::id()))
        })
    }
}

fn install_locations() -> Vec<PathBuf> {
    let fixed: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "~/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome-stable",
            "/usr/bin/google-chrome",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ]
    };

    fixed
        .iter()
        .filter_map(|raw| match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(raw)),
        })
        .collect()
}

fn lookup_on_path() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return None;
    }
    ["chromium", "chromium-browser", "google-chrome", "chrome"]
        .iter()
        .find_map(|name| {
            let output = Command::new("which").arg(name).output().ok()?;
            if !output.status.success() {
                return None;
            }
            let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
            (!found.is_empty()).then(|| PathBuf::from(found))
        })
}

/// Locate an installed Chrome/Chromium
///
/// `CHROMIUM_PATH` wins when it points at an existing file, then the usual
/// install locations for the platform, then whatever `which` finds.
pub async fn find_browser_executable() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CHROME_PATH_ENV).map(PathBuf::from) {
        if path.exists() {
            info!("Using browser from {}: {}", CHROME_PATH_ENV, path.display());
            return Ok(path);
        }
        warn!("{} points to a missing file: {}", CHROME_PATH_ENV, path.display());
    }

    if let Some(path) = install_locations().into_iter().find(|p| p.exists()) {
        info!("Found browser at: {}", path.display());
        return Ok(path);
    }

    if let Some(path) = lookup_on_path() {
        info!("Found browser on PATH: {}", path.display());
        return Ok(path);
    }

    Err(anyhow::anyhow!("Chrome/Chromium executable not found"))
}

/// Fetch a Chromium build into `<cache>/serpsheet/chromium` and return its binary
pub async fn download_managed_browser() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("serpsheet")
        .join("chromium");
    std::fs::create_dir_all(&cache_dir)
        .with_context(|| format!("Failed to create {}", cache_dir.display()))?;

    info!("No local browser, downloading Chromium into {}", cache_dir.display());
    let options = BrowserFetcherOptions::builder()
        .with_path(&cache_dir)
        .build()
        .context("Failed to build fetcher options")?;
    let installed = BrowserFetcher::new(options)
        .fetch()
        .await
        .context("Failed to fetch browser")?;

    debug!("Chromium installed in {}", installed.folder_path.display());
    Ok(installed.executable_path)
}

/// Launch Chromium for a harvesting session
///
/// Returns the browser, its CDP handler task, and the profile directory that
/// must be removed once the browser has exited.
pub async fn launch_browser(options: &LaunchOptions) -> Result<(Browser, JoinHandle<()>, PathBuf)> {
    let executable = match find_browser_executable().await {
        Ok(path) => path,
        Err(e) => {
            warn!("{e}; falling back to a managed download");
            download_managed_browser().await?
        }
    };

    let profile = options.profile_dir();
    std::fs::create_dir_all(&profile)
        .with_context(|| format!("Failed to create profile directory {}", profile.display()))?;

    let config = browser_config(options, &executable, &profile)?;

    info!("Launching browser (headless: {})", options.headless);
    let (browser, handler) = Browser::launch(config)
        .await
        .context("Failed to launch browser")?;

    Ok((browser, task::spawn(drain_events(handler)), profile))
}

fn browser_config(
    options: &LaunchOptions,
    executable: &Path,
    profile: &Path,
) -> Result<chromiumoxide::browser::BrowserConfig> {
    let mut builder = BrowserConfigBuilder::default()
        .request_timeout(options.request_timeout)
        .window_size(1366, 900)
        .user_data_dir(profile)
        .chrome_executable(executable)
        .arg(format!("--user-agent={CHROME_USER_AGENT}"));

    builder = if options.headless {
        builder.headless_mode(HeadlessMode::default())
    } else {
        builder.with_head()
    };

    HARVEST_FLAGS
        .iter()
        .fold(builder, |b, flag| b.arg(*flag))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))
}

async fn drain_events(mut handler: Handler) {
    while let Some(event) = handler.next().await {
        let Err(e) = event else { continue };
        let message = e.to_string();
        // Chrome emits some CDP events chromiumoxide cannot deserialize
        if message.contains("data did not match any variant of untagged enum Message")
            || message.contains("Failed to deserialize WS response")
        {
            trace!("Ignoring CDP deserialization error: {message}");
        } else {
            error!("Browser handler error: {e:?}");
        }
    }
    debug!("Browser handler task finished");
}
