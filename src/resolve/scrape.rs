//! Scraping fallbacks: pull a title straight out of the page HTML.
//!
//! Two interchangeable backends, selected by the `USE_NEW_SCRAPER` setting.
//! [`DomScraper`] parses the document properly and can read `og:title`
//! metadata; [`LegacyScraper`] is a plain regex over the body, kept for
//! pages whose markup chokes the DOM parser.

use anyhow::{bail, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};

use super::TitleSource;
use crate::config::Config;

const USER_AGENT: &str = concat!("linktitle/", env!("CARGO_PKG_VERSION"));

fn http_client(cfg: &Config) -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(cfg.request_timeout_secs()))
        .build()?;
    Ok(client)
}

async fn fetch_body(client: &Client, url: &str) -> Result<String> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        bail!("fetch of {url} failed with status {status}");
    }
    Ok(resp.text().await?)
}

/// DOM-parsing scraper. Prefers `og:title`, falls back to the `<title>`
/// element text.
pub struct DomScraper {
    client: Client,
}

impl DomScraper {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self { client: http_client(cfg)? })
    }
}

pub fn extract_title_dom(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    if let Ok(selector) = Selector::parse(r#"meta[property="og:title"]"#) {
        if let Some(element) = document.select(&selector).next() {
            if let Some(content) = element.value().attr("content") {
                if !content.trim().is_empty() {
                    return Some(content.to_string());
                }
            }
        }
    }

    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .filter(|t| !t.trim().is_empty())
}

#[async_trait]
impl TitleSource for DomScraper {
    fn name(&self) -> &'static str {
        "dom-scraper"
    }

    async fn fetch_title(&self, url: &str) -> Result<String> {
        let body = fetch_body(&self.client, url).await?;
        match extract_title_dom(&body) {
            Some(title) => Ok(title),
            None => bail!("no title element in {url}"),
        }
    }
}

/// Regex scraper: first `<title>` tag wins, common entities decoded.
pub struct LegacyScraper {
    client: Client,
}

impl LegacyScraper {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self { client: http_client(cfg)? })
    }
}

pub fn extract_title_legacy(html: &str) -> Option<String> {
    let re = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok()?;
    let caps = re.captures(html)?;
    let raw = caps.get(1)?.as_str();
    if raw.trim().is_empty() {
        return None;
    }
    Some(decode_entities(raw))
}

fn decode_entities(text: &str) -> String {
    // `&amp;` last, so "&amp;lt;" decodes once rather than twice
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[async_trait]
impl TitleSource for LegacyScraper {
    fn name(&self) -> &'static str {
        "legacy-scraper"
    }

    async fn fetch_title(&self, url: &str) -> Result<String> {
        let body = fetch_body(&self.client, url).await?;
        match extract_title_legacy(&body) {
            Some(title) => Ok(title),
            None => bail!("no <title> tag in {url}"),
        }
    }
}
