//! Generic page metadata via the LinkPreview API.

use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::TitleSource;
use crate::config::Config;

const DEFAULT_LINK_PREVIEW_BASE: &str = "https://api.linkpreview.net";

/// Valid LinkPreview keys are exactly this long; anything else is treated
/// as unconfigured rather than sent to the API.
const API_KEY_LEN: usize = 32;

#[derive(Debug, Deserialize)]
struct PreviewResponse {
    title: Option<String>,
}

pub struct LinkPreviewClient {
    client: Client,
    base: String,
    api_key: String,
}

impl LinkPreviewClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let api_key = cfg
            .link_preview_api_key()
            .ok_or_else(|| anyhow::anyhow!("LINK_PREVIEW_API_KEY is not set"))?;
        if api_key.len() != API_KEY_LEN {
            bail!(
                "LINK_PREVIEW_API_KEY must be {} characters, got {}",
                API_KEY_LEN,
                api_key.len()
            );
        }

        // Optional override for self-hosted proxies
        let base = cfg
            .get("LINK_PREVIEW_API_BASE")
            .unwrap_or_else(|| DEFAULT_LINK_PREVIEW_BASE.to_string());

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.request_timeout_secs()))
            .build()?;

        Ok(Self { client, base, api_key })
    }
}

#[async_trait]
impl TitleSource for LinkPreviewClient {
    fn name(&self) -> &'static str {
        "link-preview"
    }

    async fn fetch_title(&self, url: &str) -> Result<String> {
        let endpoint = format!("{}/", self.base.trim_end_matches('/'));
        let resp = self
            .client
            .get(&endpoint)
            .header("X-Linkpreview-Api-Key", &self.api_key)
            .query(&[("q", url)])
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => {
                let preview = resp.json::<PreviewResponse>().await?;
                match preview.title {
                    Some(title) => Ok(title),
                    None => bail!("link preview response carried no title"),
                }
            }
            status => {
                let text = resp.text().await.unwrap_or_default();
                bail!("link preview request failed: {} - {}", status, text)
            }
        }
    }
}
