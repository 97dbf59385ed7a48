//! Configuration handling for the console

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default back-office API address
const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3008";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ROWS_PER_PAGE: usize = 10;

const API_URL_ENV: &str = "SELLER_CONSOLE_API_URL";
const TOKEN_ENV: &str = "SELLER_CONSOLE_TOKEN";

/// User configuration for the console
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConsoleConfig {
    /// Back-office API address
    pub api_base_url: Option<String>,
    /// Bearer token sent with every request
    pub auth_token: Option<String>,
    /// Initial page size of the return orders table
    pub rows_per_page: Option<usize>,
    /// Regex overriding the default mobile number pattern
    pub phone_pattern: Option<String>,
    /// HTTP request timeout
    pub request_timeout_secs: Option<u64>,
    /// File to save to instead of the per-user config location
    #[serde(skip)]
    pub file: Option<PathBuf>,
}

impl ConsoleConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "seller-console", "seller-console")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: ConsoleConfig = serde_json::from_str(&content)?;
                tracing::debug!("loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = self.file.clone().or_else(Self::config_path) {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// API address: environment, then file, then default
    pub fn api_base_url(&self) -> String {
        resolve(std::env::var(API_URL_ENV).ok(), self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn auth_token(&self) -> Option<String> {
        resolve(std::env::var(TOKEN_ENV).ok(), self.auth_token.clone())
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page.unwrap_or(DEFAULT_ROWS_PER_PAGE)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

/// First non-blank value wins
fn resolve(env: Option<String>, file: Option<String>) -> Option<String> {
    env.into_iter()
        .chain(file)
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.auth_token.is_none());
        assert!(config.rows_per_page.is_none());
        assert!(config.phone_pattern.is_none());
        assert!(config.request_timeout_secs.is_none());
        assert_eq!(config.rows_per_page(), 10);
        assert_eq!(config.request_timeout_secs(), 30);
    }

    #[test]
    fn test_serialization() {
        let config = ConsoleConfig {
            api_base_url: Some("https://seller.example.com".to_string()),
            auth_token: Some("secret".to_string()),
            rows_per_page: Some(25),
            phone_pattern: Some(r"^\d{10}$".to_string()),
            request_timeout_secs: Some(5),
            file: None,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: ConsoleConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.api_base_url,
            Some("https://seller.example.com".to_string())
        );
        assert_eq!(parsed.auth_token, Some("secret".to_string()));
        assert_eq!(parsed.rows_per_page(), 25);
        assert_eq!(parsed.phone_pattern, Some(r"^\d{10}$".to_string()));
        assert_eq!(parsed.request_timeout_secs(), 5);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: ConsoleConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"rows_per_page": 100, "theme": "dark"}"#;
        let parsed: ConsoleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.rows_per_page, Some(100));
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let config = ConsoleConfig {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(config.request_timeout_secs(), 30);
    }

    #[test]
    fn test_env_value_wins_over_file() {
        assert_eq!(
            resolve(Some("http://env".into()), Some("http://file".into())),
            Some("http://env".to_string())
        );
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        assert_eq!(
            resolve(Some("  ".into()), Some("http://file".into())),
            Some("http://file".to_string())
        );
        assert_eq!(resolve(None, None), None);
    }

    #[test]
    fn test_save_writes_to_override_file() {
        let dir = std::env::temp_dir().join(format!("seller-console-{}", uuid::Uuid::new_v4()));
        let file = dir.join("config.json");
        let config = ConsoleConfig {
            rows_per_page: Some(25),
            file: Some(file.clone()),
            ..Default::default()
        };

        config.save().unwrap();
        let saved: ConsoleConfig =
            serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(saved.rows_per_page, Some(25));
        assert!(saved.file.is_none());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_into_unusable_directory_fails() {
        let blocker = std::env::temp_dir().join(format!("seller-console-{}", uuid::Uuid::new_v4()));
        fs::write(&blocker, "not a directory").unwrap();
        let config = ConsoleConfig {
            file: Some(blocker.join("config.json")),
            ..Default::default()
        };

        assert!(config.save().is_err());

        fs::remove_file(&blocker).unwrap();
    }

    #[test]
    fn test_load_returns_ok_when_no_file() {
        // Load should return default config when file doesn't exist
        let result = ConsoleConfig::load();
        assert!(result.is_ok());
    }
}
