use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use virtual_queue::Resort;

/// Config is the stored configuration of a `vqctl` profile.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Resort whose service is used, if not overridden by `origin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resort: Option<Resort>,
    /// Alternative origin of the service, used for development.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<url::Url>,
    // Secret access token of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Config {
    /// Load the Config of `profile`. A profile which has never been written
    /// loads as the default Config.
    pub fn load(profile: &str) -> anyhow::Result<Self> {
        Self::load_from(&Self::file_path(profile)?)
    }

    pub fn write(&self, profile: &str) -> anyhow::Result<()> {
        self.write_to(&Self::file_path(profile)?)
    }

    pub fn file_path(profile: &str) -> anyhow::Result<PathBuf> {
        let dir = dirs::config_dir().context("couldn't determine the user config directory")?;
        Ok(dir.join("vqctl").join(format!("{profile}.json")))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file doesn't exist (using defaults)");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        serde_json::from_slice(&bytes).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let bytes = serde_json::to_vec_pretty(self)?;

        std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote config");

        Ok(())
    }

    /// Origin of the configured service, defaulting to Walt Disney World.
    pub fn origin(&self) -> url::Url {
        match (&self.origin, self.resort) {
            (Some(origin), _) => origin.clone(),
            (None, Some(resort)) => resort.origin().clone(),
            (None, None) => Resort::Wdw.origin().clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.origin(), *Resort::Wdw.origin());
    }

    #[test]
    fn test_write_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vqctl").join("default.json");

        let config = Config {
            resort: Some(Resort::Dl),
            origin: None,
            access_token: Some("secret".to_string()),
        };
        config.write_to(&path).unwrap();

        insta::assert_snapshot!(std::fs::read_to_string(&path).unwrap(), @r###"
        {
          "resort": "DL",
          "accessToken": "secret"
        }
        "###);

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.origin(), *Resort::Dl.origin());
    }

    #[test]
    fn test_origin_overrides_resort() {
        let config = Config {
            resort: Some(Resort::Dl),
            origin: Some(url::Url::parse("http://localhost:8080/").unwrap()),
            access_token: None,
        };
        assert_eq!(config.origin().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse "));
    }
}
