//! Website blacklist: URLs matching any configured entry skip title fetching.

use crate::config::Config;

/// Split the configured blacklist on commas and newlines, trimming each
/// entry and dropping empties.
pub fn parse_entries(raw: &str) -> Vec<String> {
    raw.split(|c| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

/// True iff any configured entry is a substring of `url`. Takes the current
/// config explicitly; callers reload it per event so blacklist edits apply
/// immediately.
pub fn is_blacklisted(cfg: &Config, url: &str) -> bool {
    parse_entries(&cfg.website_blacklist())
        .iter()
        .any(|entry| url.contains(entry.as_str()))
}
