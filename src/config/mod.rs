use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use directories::BaseDirs;

/// Runtime settings, loaded fresh for each user action so edits to the rc
/// file take effect without a restart.
#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let mut map = default_map();
        let config_path = default_config_path();

        // Read .linktitlerc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().flatten() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    /// Build a config from explicit key/value pairs. Embedding hosts that
    /// keep their own settings store hand their current values in through
    /// this; tests do too. Unset keys fall back to defaults.
    pub fn from_map(pairs: HashMap<String, String>) -> Self {
        let mut map = default_map();
        map.extend(pairs);
        Self { inner: map, config_path: default_config_path() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.parse::<usize>().ok())
    }

    pub fn maximum_title_length(&self) -> usize {
        self.get_usize("MAXIMUM_TITLE_LENGTH").unwrap_or(0)
    }

    pub fn preserve_selection_as_title(&self) -> bool {
        self.get_bool("PRESERVE_SELECTION_AS_TITLE")
    }

    pub fn enhance_default_paste(&self) -> bool {
        self.get_bool("ENHANCE_DEFAULT_PASTE")
    }

    pub fn enhance_drop_events(&self) -> bool {
        self.get_bool("ENHANCE_DROP_EVENTS")
    }

    pub fn website_blacklist(&self) -> String {
        self.get("WEBSITE_BLACKLIST").unwrap_or_default()
    }

    pub fn use_better_paste_id(&self) -> bool {
        self.get_bool("USE_BETTER_PASTE_ID")
    }

    pub fn use_new_scraper(&self) -> bool {
        self.get_bool("USE_NEW_SCRAPER")
    }

    pub fn link_preview_api_key(&self) -> Option<String> {
        self.get("LINK_PREVIEW_API_KEY").filter(|s| !s.trim().is_empty())
    }

    pub fn link_regex(&self) -> String {
        self.get("LINK_REGEX").unwrap_or_default()
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.get("REQUEST_TIMEOUT")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60)
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "MAXIMUM_TITLE_LENGTH",
        "PRESERVE_SELECTION_AS_TITLE",
        "ENHANCE_DEFAULT_PASTE",
        "ENHANCE_DROP_EVENTS",
        "WEBSITE_BLACKLIST",
        "USE_BETTER_PASTE_ID",
        "USE_NEW_SCRAPER",
        "LINK_PREVIEW_API_KEY",
        "LINK_REGEX",
        "REQUEST_TIMEOUT",
    ];

    KEYS.contains(&k) || k.starts_with("LINKTITLE_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("linktitle").join(".linktitlerc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    // Numbers
    m.insert("MAXIMUM_TITLE_LENGTH".into(), "0".into());
    m.insert("REQUEST_TIMEOUT".into(), "60".into());

    // Bools as strings
    m.insert("PRESERVE_SELECTION_AS_TITLE".into(), "true".into());
    m.insert("ENHANCE_DEFAULT_PASTE".into(), "true".into());
    m.insert("ENHANCE_DROP_EVENTS".into(), "true".into());
    m.insert("USE_BETTER_PASTE_ID".into(), "false".into());
    m.insert("USE_NEW_SCRAPER".into(), "false".into());

    // Strings
    m.insert("WEBSITE_BLACKLIST".into(), String::new());
    m.insert(
        "LINK_REGEX".into(),
        r"^\[([^\[\]]*)\]\((https?://[^()]+)\)$".into(),
    );

    m
}
