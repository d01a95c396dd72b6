use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use shoebox_core::index::{DEFAULT_BUCKETS, DEFAULT_MAX_LOAD};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub index: IndexConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    #[serde(default = "default_buckets")]
    pub buckets: usize,
    #[serde(default = "default_max_load")]
    pub max_load: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            buckets: default_buckets(),
            max_load: default_max_load(),
        }
    }
}

fn default_buckets() -> usize {
    DEFAULT_BUCKETS
}

fn default_max_load() -> f64 {
    DEFAULT_MAX_LOAD
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.index.buckets == 0 {
        anyhow::bail!("index.buckets must be > 0");
    }

    if config.index.max_load <= 0.0 {
        anyhow::bail!("index.max_load must be > 0");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.store.data_dir, PathBuf::from("."));
        assert_eq!(config.index.buckets, DEFAULT_BUCKETS);
        assert_eq!(config.index.max_load, DEFAULT_MAX_LOAD);
    }

    #[test]
    fn test_full_config_parses() {
        let config: Config = toml::from_str(
            r#"
            [store]
            data_dir = "data"

            [index]
            buckets = 64
            max_load = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(config.store.data_dir, PathBuf::from("data"));
        assert_eq!(config.index.buckets, 64);
        assert_eq!(config.index.max_load, 2.5);
    }

    #[test]
    fn test_load_config_rejects_zero_buckets() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("shoebox.toml");
        std::fs::write(&path, "[index]\nbuckets = 0\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("index.buckets"));
    }

    #[test]
    fn test_load_config_missing_file_has_context() {
        let err = load_config(Path::new("/nonexistent/shoebox.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
