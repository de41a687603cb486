//! Config resolution: CLI path → environment → user config dir → defaults.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::settings::RValueConfig;
use crate::validate::{ValidationError, ValidationResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "RVALUE_CONFIG";

/// File names probed inside the user config directory, in order.
pub const USER_CONFIG_FILES: [&str; 2] = ["config.json", "config.toml"];

/// Where the resolved configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigSource {
    Explicit { path: PathBuf },
    Environment { path: PathBuf },
    UserConfig { path: PathBuf },
    Defaults,
}

/// Candidate locations for the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path given on the command line.
    pub explicit: Option<PathBuf>,
    /// Path taken from `RVALUE_CONFIG`.
    pub env: Option<PathBuf>,
    /// Per-user config directory (`$XDG_CONFIG_HOME/rvalue` on Linux).
    pub user_dir: Option<PathBuf>,
}

impl ConfigPaths {
    /// Candidate paths from the process environment.
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            env: std::env::var_os(CONFIG_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            user_dir: dirs::config_dir().map(|d| d.join("rvalue")),
        }
    }

    fn user_file(&self) -> Option<PathBuf> {
        let dir = self.user_dir.as_deref()?;
        USER_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
    }
}

/// A loaded config and its origin.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub config: RValueConfig,
    pub source: ConfigSource,
}

fn load(path: &Path) -> ValidationResult<RValueConfig> {
    RValueConfig::from_file(path)
}

/// Resolve the active configuration.
///
/// An explicit or environment path that cannot be loaded is an error; a
/// missing user config file silently falls back to defaults.
pub fn resolve_config(paths: &ConfigPaths) -> Result<ResolvedConfig, ValidationError> {
    if let Some(path) = &paths.explicit {
        debug!(path = %path.display(), "using explicit config");
        return Ok(ResolvedConfig {
            config: load(path)?,
            source: ConfigSource::Explicit { path: path.clone() },
        });
    }
    if let Some(path) = &paths.env {
        debug!(path = %path.display(), env = CONFIG_ENV, "using config from environment");
        return Ok(ResolvedConfig {
            config: load(path)?,
            source: ConfigSource::Environment { path: path.clone() },
        });
    }
    if let Some(path) = paths.user_file() {
        debug!(path = %path.display(), "using user config");
        return Ok(ResolvedConfig {
            config: load(&path)?,
            source: ConfigSource::UserConfig { path },
        });
    }
    debug!("no config file found, using defaults");
    Ok(ResolvedConfig {
        config: RValueConfig::default(),
        source: ConfigSource::Defaults,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn no_paths_gives_defaults() {
        let resolved = resolve_config(&ConfigPaths::default()).unwrap();
        assert_eq!(resolved.source, ConfigSource::Defaults);
        assert_eq!(resolved.config, RValueConfig::default());
    }

    #[test]
    fn explicit_beats_env_and_user() {
        let dir = tempdir().unwrap();
        let explicit = write(
            dir.path(),
            "a.json",
            r#"{"schema_version":"1.0.0","params":{"c2":0.1}}"#,
        );
        let env = write(
            dir.path(),
            "b.json",
            r#"{"schema_version":"1.0.0","params":{"c2":0.2}}"#,
        );
        write(
            dir.path(),
            "config.json",
            r#"{"schema_version":"1.0.0","params":{"c2":0.3}}"#,
        );
        let paths = ConfigPaths {
            explicit: Some(explicit.clone()),
            env: Some(env),
            user_dir: Some(dir.path().to_path_buf()),
        };
        let resolved = resolve_config(&paths).unwrap();
        assert_eq!(resolved.config.params.c2, 0.1);
        assert_eq!(resolved.source, ConfigSource::Explicit { path: explicit });
    }

    #[test]
    fn env_beats_user() {
        let dir = tempdir().unwrap();
        let env = write(
            dir.path(),
            "b.json",
            r#"{"schema_version":"1.0.0","params":{"c2":0.2}}"#,
        );
        write(
            dir.path(),
            "config.json",
            r#"{"schema_version":"1.0.0","params":{"c2":0.3}}"#,
        );
        let paths = ConfigPaths {
            explicit: None,
            env: Some(env),
            user_dir: Some(dir.path().to_path_buf()),
        };
        assert_eq!(resolve_config(&paths).unwrap().config.params.c2, 0.2);
    }

    #[test]
    fn user_toml_found() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "config.toml",
            "schema_version = \"1.0.0\"\n[params]\nl00 = 0.6\n",
        );
        let paths = ConfigPaths {
            user_dir: Some(dir.path().to_path_buf()),
            ..ConfigPaths::default()
        };
        let resolved = resolve_config(&paths).unwrap();
        assert_eq!(resolved.config.params.l00, 0.6);
        assert!(matches!(resolved.source, ConfigSource::UserConfig { .. }));
    }

    #[test]
    fn empty_user_dir_falls_back() {
        let dir = tempdir().unwrap();
        let paths = ConfigPaths {
            user_dir: Some(dir.path().to_path_buf()),
            ..ConfigPaths::default()
        };
        assert_eq!(resolve_config(&paths).unwrap().source, ConfigSource::Defaults);
    }

    #[test]
    fn missing_explicit_is_error() {
        let paths = ConfigPaths {
            explicit: Some(PathBuf::from("/nonexistent/rvalue/config.json")),
            ..ConfigPaths::default()
        };
        assert!(matches!(
            resolve_config(&paths),
            Err(ValidationError::IoError(_))
        ));
    }

    #[test]
    fn invalid_user_config_is_error() {
        let dir = tempdir().unwrap();
        write(dir.path(), "config.json", "{ broken");
        let paths = ConfigPaths {
            user_dir: Some(dir.path().to_path_buf()),
            ..ConfigPaths::default()
        };
        assert!(matches!(
            resolve_config(&paths),
            Err(ValidationError::ParseError(_))
        ));
    }

    #[test]
    fn source_serializes_with_kind_tag() {
        let json = serde_json::to_value(ConfigSource::Defaults).unwrap();
        assert_eq!(json["kind"], "defaults");
    }
}
