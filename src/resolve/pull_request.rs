//! Pull-request titles via the `gh` CLI.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tokio::process::Command;

use super::TitleSource;

const PR_URL_PATTERN: &str = r"^https?://(?:www\.)?github\.com/([^/\s]+)/([^/\s]+)/pull/(\d+)";

/// The `--json title` slice of `gh pr view` output.
#[derive(Debug, Deserialize)]
struct PrView {
    title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

/// Parse `github.com/<owner>/<repo>/pull/<n>` URLs.
pub fn parse_pr_url(url: &str) -> Option<PullRequestRef> {
    let re = Regex::new(PR_URL_PATTERN).ok()?;
    let caps = re.captures(url.trim())?;
    Some(PullRequestRef {
        owner: caps[1].to_string(),
        repo: caps[2].to_string(),
        number: caps[3].parse().ok()?,
    })
}

/// Resolves pull-request URLs to `"<title> · <owner>/<repo>#<number>"` by
/// shelling out to `gh pr view`. Only consulted for matching URLs; any
/// spawn or parse failure makes the pipeline fall through to the next
/// source instead of aborting.
pub struct PullRequestResolver;

impl PullRequestResolver {
    pub fn format_title(title: &str, pr: &PullRequestRef) -> String {
        format!("{} · {}/{}#{}", title, pr.owner, pr.repo, pr.number)
    }
}

#[async_trait]
impl TitleSource for PullRequestResolver {
    fn name(&self) -> &'static str {
        "pull-request"
    }

    fn applies(&self, url: &str) -> bool {
        parse_pr_url(url).is_some()
    }

    async fn fetch_title(&self, url: &str) -> Result<String> {
        let pr = parse_pr_url(url).context("not a pull request URL")?;

        let output = Command::new("gh")
            .args(["pr", "view", url, "--json", "title"])
            .output()
            .await
            .context("failed to spawn gh")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("gh pr view exited with {}: {}", output.status, stderr.trim());
        }

        let view: PrView =
            serde_json::from_slice(&output.stdout).context("gh returned invalid JSON")?;
        let title = view.title.trim();
        if title.is_empty() {
            bail!("gh returned no title for {url}");
        }

        Ok(Self::format_title(title, &pr))
    }
}
