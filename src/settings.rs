//! Runtime settings: built-in defaults, then an optional `dewikt.toml`, then
//! `DEWIKT_*` environment variables (`__` separates nested keys, e.g.
//! `DEWIKT_UPSTREAM__CLIENT__TIMEOUT_MS=5000`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::upstream::{ClientConfig, DEFAULT_API_URL, DEFAULT_USER_AGENT, INFLECTION_PREFIX};

const DEFAULT_FILE: &str = "dewikt";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    /// Label override file layered over the built-in labels.
    #[serde(default)]
    pub labels_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    pub api_url: String,
    pub search_limit: u32,
    /// Section index fetched from every page.
    pub section: u32,
    pub inflection_prefix: String,
    pub client: ClientConfig,
}

impl Settings {
    /// Load settings. An explicit `path` must exist; the default file may not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = ClientConfig::default();
        let mut builder = Config::builder()
            .set_default("server.bind", "127.0.0.1:3000")?
            .set_default("upstream.api_url", DEFAULT_API_URL)?
            .set_default("upstream.search_limit", 6_i64)?
            .set_default("upstream.section", 1_i64)?
            .set_default("upstream.inflection_prefix", INFLECTION_PREFIX)?
            .set_default("upstream.client.user_agent", DEFAULT_USER_AGENT)?
            .set_default("upstream.client.accept_header", defaults.accept_header)?
            .set_default("upstream.client.timeout_ms", defaults.timeout_ms as i64)?;

        builder = match path {
            Some(path) => {
                info!("Loading settings from {:?}", path);
                builder.add_source(File::from(path).required(true))
            }
            None => builder.add_source(File::with_name(DEFAULT_FILE).required(false)),
        };

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("DEWIKT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let s = Settings::load(None).unwrap();
        assert_eq!(s.upstream.api_url, DEFAULT_API_URL);
        assert_eq!(s.upstream.search_limit, 6);
        assert_eq!(s.upstream.section, 1);
        assert_eq!(s.upstream.inflection_prefix, "Flexion:");
        assert_eq!(s.upstream.client.accept_header, "application/json");
        assert!(s.upstream.client.user_agent.starts_with("dewikt/"));
        assert!(s.labels_path.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("dewikt-settings-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "labels_path = \"labels.toml\"\n\
             [server]\nbind = \"0.0.0.0:8080\"\n\
             [upstream.client]\ntimeout_ms = 2500\n",
        )
        .unwrap();
        let s = Settings::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(s.server.bind, "0.0.0.0:8080");
        assert_eq!(s.upstream.client.timeout_ms, 2500);
        assert_eq!(s.upstream.search_limit, 6);
        assert_eq!(s.labels_path.unwrap(), PathBuf::from("labels.toml"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("dewikt-does-not-exist.toml");
        assert!(Settings::load(Some(&path)).is_err());
    }
}
