use crate::constants::{BASE_URL_ENV, CONFIG_DIR, CONFIG_FILE, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::feedback::Timings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Client settings, read from `~/.rowtree/config.yaml`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub timings: Timings,
    /// When false, superseded fade timers keep running and only skip stale transitions
    pub cancel_superseded_timers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::from(DEFAULT_BASE_URL),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            timings: Timings::default(),
            cancel_superseded_timers: true,
        }
    }
}

impl Config {
    /// Default config location
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::default_path())?;
        Ok(config.with_base_url_override(std::env::var(BASE_URL_ENV).ok()))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Parsed base address, always ending in `/` so endpoint segments join under it
    pub fn base_url(&self) -> Result<reqwest::Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        reqwest::Url::parse(&raw).with_context(|| format!("invalid base url '{}'", self.base_url))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp_dir.path().join("none.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timings.success_hold_ms, 2000);
        assert_eq!(config.timings.upload_hold_ms, 3000);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let yaml = r#"
base_url: http://rows.internal:9000/api/rows
timings:
  error_hold_ms: 4000
"#;
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, yaml).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.timings.error_hold_ms, 4000);
        assert_eq!(config.timings.fade_ms, 500);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.cancel_superseded_timers);
        assert_eq!(
            config.base_url().unwrap().join("add").unwrap().as_str(),
            "http://rows.internal:9000/api/rows/add"
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "timings: [not, a, map]").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_loose_timers_can_be_configured() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "cancel_superseded_timers: false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.cancel_superseded_timers);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_override() {
        let config = Config::default().with_base_url_override(Some("http://127.0.0.1:1/x/".into()));
        assert_eq!(config.base_url, "http://127.0.0.1:1/x/");
        let config = Config::default().with_base_url_override(Some("  ".into()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
