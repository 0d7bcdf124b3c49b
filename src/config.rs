//! Where the two datasets come from.
//!
//! Each source is either an `http(s)://` URL or a local file path. Values are
//! layered: built-in defaults, then an optional JSON file, then the
//! `WPOP_STATS_SOURCE` / `WPOP_GEO_SOURCE` environment variables, then
//! whatever the caller (usually the CLI) sets explicitly.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STATS_URL: &str = "https://raw.githubusercontent.com/tommyscodebase/12_Days_Geospatial_Python_Bootcamp/refs/heads/main/13_final_project_data/world_population.csv";
pub const DEFAULT_GEO_URL: &str = "https://raw.githubusercontent.com/tommyscodebase/12_Days_Geospatial_Python_Bootcamp/refs/heads/main/13_final_project_data/world.geojson";

pub const STATS_ENV: &str = "WPOP_STATS_SOURCE";
pub const GEO_ENV: &str = "WPOP_GEO_SOURCE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// CSV with one row per country.
    pub stats: String,
    /// GeoJSON FeatureCollection with a `name` property per feature.
    pub geometry: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            stats: DEFAULT_STATS_URL.into(),
            geometry: DEFAULT_GEO_URL.into(),
        }
    }
}

impl SourceConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("parse {}: {}", path.display(), e)))
    }

    /// Apply the environment overrides on top of `self`.
    pub fn with_env(self) -> Self {
        self.with_overrides(std::env::var(STATS_ENV).ok(), std::env::var(GEO_ENV).ok())
    }

    /// Replace each source that has a non-blank override.
    pub fn with_overrides(mut self, stats: Option<String>, geometry: Option<String>) -> Self {
        if let Some(s) = stats.filter(|s| !s.trim().is_empty()) {
            self.stats = s;
        }
        if let Some(g) = geometry.filter(|g| !g.trim().is_empty()) {
            self.geometry = g;
        }
        self
    }
}

/// `true` for `http://` and `https://` locations; everything else is a path.
pub fn is_remote(location: &str) -> bool {
    let l = location.trim_start();
    l.starts_with("http://") || l.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_file_keeps_defaults_for_missing_keys() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("sources.json");
        std::fs::write(&p, r#"{"stats":"data/pop.csv"}"#).unwrap();
        let cfg = SourceConfig::from_json_file(&p).unwrap();
        assert_eq!(cfg.stats, "data/pop.csv");
        assert_eq!(cfg.geometry, DEFAULT_GEO_URL);
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let cfg = SourceConfig::default().with_overrides(Some("  ".into()), Some("w.geojson".into()));
        assert_eq!(cfg.stats, DEFAULT_STATS_URL);
        assert_eq!(cfg.geometry, "w.geojson");
    }

    #[test]
    fn remote_detection() {
        assert!(is_remote(DEFAULT_STATS_URL));
        assert!(!is_remote("./world.geojson"));
    }
}
