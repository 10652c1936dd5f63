//! Application-level configuration: listening port and on-disk locations.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "RIVAL_SNAKE_CONFIG_PATH";
const PORT_ENV: &str = "PORT";
const LEADERBOARD_PATH_ENV: &str = "LEADERBOARD_PATH";
const STATIC_DIR_ENV: &str = "STATIC_DIR";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LEADERBOARD_PATH: &str = "leaderboard.json";
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration resolved once at startup.
pub struct AppConfig {
    /// TCP port the HTTP server listens on.
    pub port: u16,
    /// JSON file holding the persisted leaderboard.
    pub leaderboard_path: PathBuf,
    /// Directory served as the game client.
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Resolve the configuration from the optional config file, the environment and the
    /// first command-line argument.
    ///
    /// The port follows `PORT`, then the command-line argument, then the config file.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let raw = read_config_file(&path).unwrap_or_default();
        Self::resolve(raw, |key| env::var(key).ok(), env::args().nth(1))
    }

    fn resolve(
        raw: RawConfig,
        lookup_env: impl Fn(&str) -> Option<String>,
        port_arg: Option<String>,
    ) -> Self {
        let mut config = Self::from(raw);

        let port_override = lookup_env(PORT_ENV)
            .and_then(|value| parse_port(PORT_ENV, &value))
            .or_else(|| {
                port_arg
                    .as_deref()
                    .and_then(|value| parse_port("argument", value))
            });
        if let Some(port) = port_override {
            config.port = port;
        }

        if let Some(path) = lookup_env(LEADERBOARD_PATH_ENV).filter(|v| !v.is_empty()) {
            config.leaderboard_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup_env(STATIC_DIR_ENV).filter(|v| !v.is_empty()) {
            config.static_dir = PathBuf::from(dir);
        }

        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            leaderboard_path: PathBuf::from(DEFAULT_LEADERBOARD_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    port: Option<u16>,
    leaderboard_path: Option<PathBuf>,
    static_dir: Option<PathBuf>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            port: value.port.unwrap_or(defaults.port),
            leaderboard_path: value.leaderboard_path.unwrap_or(defaults.leaderboard_path),
            static_dir: value.static_dir.unwrap_or(defaults.static_dir),
        }
    }
}

/// Read the config file, logging and returning `None` when it is absent or unusable.
fn read_config_file(path: &Path) -> Option<RawConfig> {
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
            Ok(raw) => {
                info!(path = %path.display(), "loaded config file");
                Some(raw)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse config; falling back to defaults"
                );
                None
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                path = %path.display(),
                "config file not found; using built-in defaults"
            );
            None
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to read config; falling back to defaults"
            );
            None
        }
    }
}

fn parse_port(source: &str, value: &str) -> Option<u16> {
    match value.trim().parse::<u16>() {
        Ok(port) => Some(port),
        Err(err) => {
            warn!(source, value, error = %err, "ignoring invalid port");
            None
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = AppConfig::resolve(RawConfig::default(), env_of(&[]), None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.leaderboard_path, PathBuf::from("leaderboard.json"));
    }

    #[test]
    fn port_env_wins_over_argument() {
        let config = AppConfig::resolve(
            RawConfig::default(),
            env_of(&[("PORT", "9000")]),
            Some("9100".into()),
        );
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn argument_wins_over_config_file() {
        let raw = RawConfig {
            port: Some(7000),
            ..RawConfig::default()
        };
        let config = AppConfig::resolve(raw, env_of(&[]), Some("9100".into()));
        assert_eq!(config.port, 9100);
    }

    #[test]
    fn invalid_port_values_are_ignored() {
        let raw = RawConfig {
            port: Some(7000),
            ..RawConfig::default()
        };
        let config = AppConfig::resolve(raw, env_of(&[("PORT", "http")]), Some("-1".into()));
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn path_overrides_come_from_env() {
        let config = AppConfig::resolve(
            RawConfig::default(),
            env_of(&[("LEADERBOARD_PATH", "/data/board.json"), ("STATIC_DIR", "")]),
            None,
        );
        assert_eq!(config.leaderboard_path, PathBuf::from("/data/board.json"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn config_file_fields_are_optional() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.json");
        fs::write(&path, r#"{ "static_dir": "public" }"#).unwrap();

        let config = AppConfig::from(read_config_file(&path).unwrap());
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn unusable_config_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        assert!(read_config_file(&dir.path().join("missing.json")).is_none());

        let path = dir.path().join("app.json");
        fs::write(&path, "port = 1").unwrap();
        assert!(read_config_file(&path).is_none());
    }
}
