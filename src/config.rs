use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::domain::entities::page::DEFAULT_PER_PAGE;

pub const ENV_WEB_NAME: &str = "ADMIN_CONSOLE_WEB_NAME";
pub const ENV_PER_PAGE: &str = "ADMIN_CONSOLE_PER_PAGE";
pub const ENV_STORE: &str = "ADMIN_CONSOLE_STORE";
pub const ENV_LOG: &str = "RUST_LOG";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub web_name: String,
    pub per_page: u32,
    /// `None` keeps the store in memory.
    pub store_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            web_name: "Admin Console".to_string(),
            per_page: DEFAULT_PER_PAGE,
            store_path: None,
            log_filter: "info".to_string(),
        }
    }
}

/// Optional keys of `config.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    web_name: Option<String>,
    per_page: Option<u32>,
    store_path: Option<PathBuf>,
    log_filter: Option<String>,
}

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "admin-console", "admin-console")
        .ok_or_else(|| anyhow!("unable to resolve project directories"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    let webview_data_dir = project_dirs()?.data_local_dir().join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

impl AppConfig {
    /// Defaults, then the config file in the platform config dir, then the environment.
    pub fn load() -> Result<Self> {
        let path = default_config_path()?;
        Self::load_from(&path, |key| std::env::var(key).ok())
    }

    pub fn load_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let file = match std::fs::read_to_string(path) {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read config: {}", path.display()))
            }
        };
        Self::from_sources(file.as_deref(), env)
            .with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn from_sources(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = file {
            let file: FileConfig =
                serde_json::from_str(raw).context("failed to parse config file")?;
            if let Some(web_name) = file.web_name {
                config.web_name = web_name;
            }
            if let Some(per_page) = file.per_page {
                config.per_page = per_page;
            }
            if file.store_path.is_some() {
                config.store_path = file.store_path;
            }
            if let Some(log_filter) = file.log_filter {
                config.log_filter = log_filter;
            }
        }

        if let Some(web_name) = env(ENV_WEB_NAME).filter(|v| !v.trim().is_empty()) {
            config.web_name = web_name;
        }
        if let Some(raw) = env(ENV_PER_PAGE) {
            config.per_page = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_PER_PAGE} must be a positive integer, got `{raw}`"))?;
        }
        if let Some(store) = env(ENV_STORE) {
            let store = store.trim();
            config.store_path = match store {
                "" | ":memory:" => None,
                path => Some(PathBuf::from(path)),
            };
        }
        if let Some(filter) = env(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }

        if config.per_page == 0 {
            anyhow::bail!("per_page must be greater than zero");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_without_sources() {
        let config = AppConfig::from_sources(None, no_env).expect("defaults");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.per_page, 20);
        assert!(config.store_path.is_none());
    }

    #[test]
    fn env_overrides_file() {
        let file = r#"{ "web_name": "Shop", "per_page": 50, "store_path": "/tmp/a.sqlite" }"#;
        let config = AppConfig::from_sources(Some(file), |key| match key {
            ENV_PER_PAGE => Some("10".to_string()),
            ENV_STORE => Some(":memory:".to_string()),
            _ => None,
        })
        .expect("config");

        assert_eq!(config.web_name, "Shop");
        assert_eq!(config.per_page, 10);
        assert!(config.store_path.is_none());
    }

    #[test]
    fn invalid_per_page_is_reported() {
        let err = AppConfig::from_sources(None, |key| {
            (key == ENV_PER_PAGE).then(|| "lots".to_string())
        })
        .expect_err("non-numeric per_page");
        assert!(err.to_string().contains(ENV_PER_PAGE));

        assert!(AppConfig::from_sources(Some(r#"{ "per_page": 0 }"#), no_env).is_err());
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(AppConfig::from_sources(Some(r#"{ "colour": "red" }"#), no_env).is_err());
    }
}
