use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use toml;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    pub github_token: Option<String>,
    /// Path to a file holding the token, `~` allowed. Used when
    /// `github_token` is unset.
    pub token_file: Option<String>,
    pub default_repo: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let user_config_path = get_user_config_path();

        let s = Config::builder()
            // 1. User's global config, if present.
            .add_source(File::from(user_config_path).required(false))
            // 2. Local commitlens.toml from CWD. Optional override.
            .add_source(File::with_name("commitlens.toml").required(false))
            .build()?;

        s.try_deserialize()
    }

    /// Token resolution order: inline config value, then `token_file`.
    pub fn resolve_token(&self) -> Option<String> {
        if let Some(token) = &self.github_token {
            if !token.is_empty() {
                return Some(token.clone());
            }
        }
        let path = self.token_file.as_deref()?;
        let expanded = shellexpand::tilde(path);
        fs::read_to_string(expanded.as_ref())
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

pub fn get_user_config_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("commitlens");
    path.push("commitlens.toml");
    path
}

pub fn save_token(token: &str) -> Result<(), anyhow::Error> {
    let user_config_path = get_user_config_path();

    if let Some(parent) = user_config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config_str = fs::read_to_string(&user_config_path).unwrap_or_else(|_| "".to_string());
    let mut doc = config_str.parse::<toml::Table>()?;

    doc.insert("github_token".to_string(), toml::Value::String(token.to_string()));

    fs::write(&user_config_path, doc.to_string())?;

    Ok(())
}
