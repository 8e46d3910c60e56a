//! Type-safe builder for `HarvestConfig` using the typestate pattern
//!
//! `build()` only exists once both the output directory and the query have
//! been supplied.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use url::Url;

use super::types::HarvestConfig;
use crate::error::ConfigError;
use crate::harvest::{PacingPolicy, parse_selector};

// Type states for the builder
pub struct WithOutputDir;
pub struct WithQuery;

pub struct HarvestConfigBuilder<State = ()> {
    pub(crate) config: HarvestConfig,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for HarvestConfigBuilder<()> {
    fn default() -> Self {
        Self::from_config(HarvestConfig::default())
    }
}

impl<State> HarvestConfigBuilder<State> {
    fn from_config(config: HarvestConfig) -> Self {
        Self {
            config,
            _phantom: PhantomData,
        }
    }

    fn transition<Next>(self) -> HarvestConfigBuilder<Next> {
        HarvestConfigBuilder {
            config: self.config,
            _phantom: PhantomData,
        }
    }
}

impl HarvestConfig {
    /// Create a builder for configuring a `HarvestConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> HarvestConfigBuilder<()> {
        HarvestConfigBuilder::default()
    }

    /// Start a builder from previously loaded settings (e.g. a JSON file)
    #[must_use]
    pub fn builder_from(base: HarvestConfig) -> HarvestConfigBuilder<()> {
        HarvestConfigBuilder::from_config(base)
    }

    /// Read settings from a JSON file; omitted fields keep their defaults
    pub fn load_json(path: &Path) -> Result<HarvestConfig, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl HarvestConfigBuilder<()> {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> HarvestConfigBuilder<WithOutputDir> {
        self.config.output_dir = dir.into();
        self.transition()
    }
}

impl HarvestConfigBuilder<WithOutputDir> {
    /// Surrounding whitespace is trimmed
    pub fn query(mut self, query: impl AsRef<str>) -> HarvestConfigBuilder<WithQuery> {
        self.config.query = query.as_ref().trim().to_string();
        self.transition()
    }
}

// Build method only available when all required fields are set
impl HarvestConfigBuilder<WithQuery> {
    pub fn build(self) -> Result<HarvestConfig, ConfigError> {
        let config = self.config;

        if config.query.is_empty() {
            return Err(ConfigError::EmptyQuery);
        }
        if config.max_pages == 0 {
            return Err(ConfigError::ZeroPages);
        }
        for (field, secs) in [
            ("page_load_timeout_secs", config.page_load_timeout_secs),
            ("title_wait_secs", config.title_wait_secs),
            ("http_timeout_secs", config.http_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::ZeroTimeout { field });
            }
        }
        config.pacing.validate()?;

        Url::parse(&config.search_url).map_err(|source| ConfigError::InvalidUrl {
            url: config.search_url.clone(),
            source,
        })?;

        parse_selector("search_input_selector", &config.search_input_selector)?;
        parse_selector("result_selector", &config.result_selector)?;
        parse_selector("link_selector", &config.link_selector)?;
        parse_selector("next_page_selector", &config.next_page_selector)?;

        Ok(config)
    }
}

// Optional settings, available in any state
impl<State> HarvestConfigBuilder<State> {
    #[must_use]
    pub fn search_url(mut self, url: impl Into<String>) -> Self {
        self.config.search_url = url.into();
        self
    }

    #[must_use]
    pub fn search_input_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.search_input_selector = selector.into();
        self
    }

    #[must_use]
    pub fn result_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.result_selector = selector.into();
        self
    }

    #[must_use]
    pub fn link_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.link_selector = selector.into();
        self
    }

    #[must_use]
    pub fn next_page_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.next_page_selector = selector.into();
        self
    }

    /// Upper bound on result pages read
    ///
    /// # Example
    /// ```rust
    /// # use serpsheet::config::HarvestConfig;
    /// let config = HarvestConfig::builder()
    ///     .output_dir("./out")
    ///     .query("annual report filetype:pdf")
    ///     .max_pages(3)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.max_pages(), 3);
    /// ```
    #[must_use]
    pub fn max_pages(mut self, pages: usize) -> Self {
        self.config.max_pages = pages;
        self
    }

    #[must_use]
    pub fn pacing(mut self, pacing: PacingPolicy) -> Self {
        self.config.pacing = pacing;
        self
    }

    #[must_use]
    pub fn page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.config.page_load_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn title_wait_secs(mut self, secs: u64) -> Self {
        self.config.title_wait_secs = secs;
        self
    }

    #[must_use]
    pub fn http_timeout_secs(mut self, secs: u64) -> Self {
        self.config.http_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    #[must_use]
    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_file_name = name.into();
        self
    }

    #[must_use]
    pub fn pdf_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.pdf_dir_name = name.into();
        self
    }

    #[must_use]
    pub fn log_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.log_file_name = name.into();
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.chrome_data_dir = Some(dir.into());
        self
    }
}
