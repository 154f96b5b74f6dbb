//! Title resolution: an ordered cascade of fetch strategies.
//!
//! [`TitlePipeline::resolve`] never fails. Each source catches its own
//! network and parsing errors; a failing stage logs and yields to the next,
//! and when every stage comes up empty the caller gets a literal fallback.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;

pub mod link_preview;
pub mod pull_request;
pub mod scrape;

pub use link_preview::LinkPreviewClient;
pub use pull_request::PullRequestResolver;
pub use scrape::{DomScraper, LegacyScraper};

/// What the document gets when no stage can produce a title.
pub const FALLBACK_TITLE: &str = "Title Unavailable | Site Unreachable";

/// One strategy for turning a URL into a raw title string.
#[async_trait]
pub trait TitleSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this source should be consulted for the URL at all.
    fn applies(&self, _url: &str) -> bool {
        true
    }

    async fn fetch_title(&self, url: &str) -> anyhow::Result<String>;
}

/// Ordered cascade of title sources, first non-empty result wins.
pub struct TitlePipeline {
    sources: Vec<Box<dyn TitleSource>>,
}

impl TitlePipeline {
    pub fn new(sources: Vec<Box<dyn TitleSource>>) -> Self {
        Self { sources }
    }

    /// Assemble the configured cascade: pull-request resolver, then the
    /// LinkPreview API when a usable key exists, then one of the two
    /// scraping backends.
    pub fn from_config(cfg: &Config) -> Self {
        let mut sources: Vec<Box<dyn TitleSource>> = vec![Box::new(PullRequestResolver)];

        match LinkPreviewClient::from_config(cfg) {
            Ok(client) => sources.push(Box::new(client)),
            Err(err) => debug!("link preview API not configured: {err}"),
        }

        if cfg.use_new_scraper() {
            match DomScraper::from_config(cfg) {
                Ok(s) => sources.push(Box::new(s)),
                Err(err) => warn!("dom scraper unavailable: {err}"),
            }
        } else {
            match LegacyScraper::from_config(cfg) {
                Ok(s) => sources.push(Box::new(s)),
                Err(err) => warn!("legacy scraper unavailable: {err}"),
            }
        }

        Self { sources }
    }

    /// Resolve a best-effort title for `url`. Infallible by contract: stage
    /// errors are logged and swallowed, total failure yields
    /// [`FALLBACK_TITLE`].
    pub async fn resolve(&self, url: &str) -> String {
        for source in &self.sources {
            if !source.applies(url) {
                continue;
            }
            match source.fetch_title(url).await {
                Ok(raw) => {
                    let title = normalize(&raw);
                    if !title.is_empty() {
                        debug!(source = source.name(), "resolved title for {url}");
                        return title;
                    }
                    debug!(source = source.name(), "empty title for {url}, falling through");
                }
                Err(err) => {
                    warn!(source = source.name(), "title fetch failed for {url}: {err}");
                }
            }
        }
        FALLBACK_TITLE.to_string()
    }
}

/// Strip line breaks and surrounding whitespace from a raw title.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
        .collect::<String>()
        .trim()
        .to_string()
}
