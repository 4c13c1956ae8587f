use std::{fs, path::Path, path::PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "catalog_admin.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleSettings {
    pub api_base: String,
    pub api_path: String,
    pub token_path: PathBuf,
    /// Prefix placed before the token in the `Authorization` header. `None` sends the raw token.
    pub auth_scheme: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:3000".into(),
            api_path: "catalog".into(),
            token_path: default_token_path(),
            auth_scheme: None,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base: Option<String>,
    api_path: Option<String>,
    token_path: Option<PathBuf>,
    auth_scheme: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ConsoleSettings {
    /// Layers defaults, an optional TOML document and environment lookups, in that order.
    /// The result is not yet validated; callers apply their own overrides and then
    /// [`ConsoleSettings::normalize`].
    pub fn resolve(
        file_contents: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(raw) = file_contents {
            let file_cfg: FileSettings = toml::from_str(raw)
                .map_err(|e| ClientError::Config(format!("malformed settings file: {e}")))?;
            if let Some(v) = file_cfg.api_base {
                settings.api_base = v;
            }
            if let Some(v) = file_cfg.api_path {
                settings.api_path = v;
            }
            if let Some(v) = file_cfg.token_path {
                settings.token_path = v;
            }
            if file_cfg.auth_scheme.is_some() {
                settings.auth_scheme = file_cfg.auth_scheme;
            }
            if file_cfg.request_timeout_secs.is_some() {
                settings.request_timeout_secs = file_cfg.request_timeout_secs;
            }
        }

        if let Some(v) = first_env(&env, &["API_BASE", "APP__API_BASE"]) {
            settings.api_base = v;
        }
        if let Some(v) = first_env(&env, &["API_PATH", "APP__API_PATH"]) {
            settings.api_path = v;
        }
        if let Some(v) = first_env(&env, &["APP__TOKEN_PATH"]) {
            settings.token_path = PathBuf::from(v);
        }
        if let Some(v) = first_env(&env, &["APP__AUTH_SCHEME"]) {
            settings.auth_scheme = Some(v);
        }
        if let Some(v) = first_env(&env, &["APP__REQUEST_TIMEOUT_SECS"]) {
            let parsed = v
                .parse::<u64>()
                .map_err(|_| ClientError::Config(format!("request timeout '{v}' is not a number")))?;
            settings.request_timeout_secs = Some(parsed);
        }

        Ok(settings)
    }

    pub fn normalize(mut self) -> Result<Self> {
        self.api_base = normalize_api_base(&self.api_base)?;
        self.api_path = self.api_path.trim().trim_matches('/').to_string();
        if self.api_path.is_empty() {
            return Err(ClientError::Config("api_path must not be empty".into()));
        }
        self.auth_scheme = self
            .auth_scheme
            .map(|scheme| scheme.trim().to_string())
            .filter(|scheme| !scheme.is_empty());
        if self.request_timeout_secs == Some(0) {
            self.request_timeout_secs = None;
        }
        Ok(self)
    }
}

/// Reads `path` (or `catalog_admin.toml` in the working directory when present)
/// and applies process environment overrides. Call `normalize()` on the result
/// once any command-line values are in place.
pub fn load_settings(path: Option<&Path>) -> Result<ConsoleSettings> {
    let raw = match path {
        Some(path) => Some(fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read '{}': {e}", path.display()))
        })?),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };
    ConsoleSettings::resolve(raw.as_deref(), |key| std::env::var(key).ok())
}

pub fn default_token_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("catalog_admin")
        .join("session.json")
}

fn first_env(env: &impl Fn(&str) -> Option<String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .rev()
        .filter_map(|key| env(key))
        .find(|value| !value.trim().is_empty())
}

fn normalize_api_base(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let parsed =
        Url::parse(raw).map_err(|e| ClientError::Config(format!("api_base '{raw}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::Config(format!(
            "api_base '{raw}' must use http or https"
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
