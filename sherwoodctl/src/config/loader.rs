use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};

use super::SherwoodConfig;

pub const CONFIG_PATH_ENV: &str = "SHERWOOD_CONFIG_PATH";
pub const CONFIG_JSON_ENV: &str = "SHERWOOD_CONFIG_JSON";

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl SherwoodConfig {
    /// Evaluation order:
    /// 1) `$SHERWOOD_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$SHERWOOD_CONFIG_JSON` (inline JSON),
    /// 3) the first default file found in the working directory,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        if let Ok(path_str) = env::var(CONFIG_PATH_ENV)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var(CONFIG_JSON_ENV)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_ENV}"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read sherwood config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid sherwood config {}", path.display())
            }),
            Some("toml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid sherwood config {}: {}", path.display(), err)
            }),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    /// TOML first, then JSON.
    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse sherwood config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid sherwood config json: {err}"))
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] =
            &["sherwood.toml", "sherwood.json", "config/sherwood.toml"];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use tempfile::tempdir;

    #[test]
    fn empty_document_is_all_defaults() {
        let config = SherwoodConfig::parse_from_str("", "inline").expect("parse");
        assert_eq!(config, SherwoodConfig::default());
    }

    #[test]
    fn toml_sections_override_defaults() {
        let config = SherwoodConfig::parse_from_str(
            r#"
log_filter = "sherwood_core=debug"

[storage]
backend = "memory"
item_quota_bytes = 8192

[messaging]
status_channel_capacity = 4
"#,
            "inline",
        )
        .expect("parse");

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.item_quota_bytes, Some(8192));
        assert_eq!(config.messaging.status_channel_capacity, 4);
        assert_eq!(config.favicon.icon_size, 32);
        assert_eq!(config.log_filter, "sherwood_core=debug");
    }

    #[test]
    fn json_is_accepted_without_an_extension() {
        let config = SherwoodConfig::parse_from_str(
            r#"{ "favicon": { "icon_size": 64 } }"#,
            "inline",
        )
        .expect("parse");
        assert_eq!(config.favicon.icon_size, 64);
    }

    #[test]
    fn file_extension_selects_the_format() {
        let dir = tempdir().expect("tempdir");
        let toml_path = dir.path().join("sherwood.toml");
        fs::write(&toml_path, "[storage]\npath = \"state/store.json\"\n")
            .expect("write toml");
        let config = SherwoodConfig::load_from_file(&toml_path).expect("toml");
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("state/store.json"))
        );

        let json_path = dir.path().join("sherwood.json");
        fs::write(&json_path, "[storage]\n").expect("write bad json");
        assert!(SherwoodConfig::load_from_file(&json_path).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = SherwoodConfig::load_from_file(Path::new("/nowhere/sherwood.toml"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nowhere/sherwood.toml"));
    }
}
