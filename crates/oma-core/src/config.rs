use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How the two lookups of a submission are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Metadata and analysis requests run side by side.
    #[default]
    Concurrent,
    /// Metadata first; the analysis request is skipped if it fails.
    Sequential,
}

/// Global configuration loaded from `~/.config/oma/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmaConfig {
    /// Origin of the analysis backend (serves `/api/beatmaps/...`).
    pub backend_url: String,
    /// Connect timeout for each lookup, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout for each lookup, in seconds.
    pub timeout_secs: u64,
    /// "concurrent" (default) or "sequential".
    #[serde(default)]
    pub fetch_mode: FetchMode,
}

impl Default for OmaConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8080".to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
            fetch_mode: FetchMode::Concurrent,
        }
    }
}

impl OmaConfig {
    /// Check that `backend_url` is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.backend_url)
            .with_context(|| format!("invalid backend_url {:?}", self.backend_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!(
                "backend_url must use http or https, got {:?}",
                parsed.scheme()
            );
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("oma")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<OmaConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] with an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<OmaConfig> {
    if !path.exists() {
        let default_cfg = OmaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: OmaConfig =
        toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
