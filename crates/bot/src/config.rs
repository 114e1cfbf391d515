//! Startup configuration, read once from the environment.

use std::path::PathBuf;

use thiserror::Error;

use stockbot_auth::AdminList;
use stockbot_inventory::DEFAULT_LOW_STOCK_THRESHOLD;

pub const DEFAULT_DATABASE_PATH: &str = "inventory.db";
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone)]
pub struct Settings {
    pub bot_token: String,
    pub admin_ids: AdminList,
    pub database_path: PathBuf,
    pub low_stock_threshold: i64,
    pub poll_timeout_secs: u64,
    pub api_base_url: String,
}

impl core::fmt::Debug for Settings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Settings")
            .field("bot_token", &"<redacted>")
            .field("admin_ids", &self.admin_ids)
            .field("database_path", &self.database_path)
            .field("low_stock_threshold", &self.low_stock_threshold)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl Settings {
    /// Load settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// | key | required | default |
    /// |---|---|---|
    /// | `BOT_TOKEN` (or `API_TOKEN`) | yes | |
    /// | `ADMIN_IDS` | yes | |
    /// | `DATABASE_PATH` | no | `inventory.db` |
    /// | `LOW_STOCK_THRESHOLD` | no | `4` |
    /// | `POLL_TIMEOUT_SECS` | no | `30` |
    /// | `TELEGRAM_API_URL` | no | `https://api.telegram.org` |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = non_empty("BOT_TOKEN")
            .or_else(|| non_empty("API_TOKEN"))
            .ok_or(ConfigError::Missing("BOT_TOKEN"))?
            .trim()
            .to_string();

        let admin_ids = lookup("ADMIN_IDS").ok_or(ConfigError::Missing("ADMIN_IDS"))?;
        let admin_ids = AdminList::parse(&admin_ids).map_err(|e| ConfigError::Invalid {
            key: "ADMIN_IDS",
            reason: e.to_string(),
        })?;
        if admin_ids.is_empty() {
            tracing::warn!("ADMIN_IDS is empty; inventory will be read-only for everyone");
        }

        let database_path = non_empty("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let low_stock_threshold = match non_empty("LOW_STOCK_THRESHOLD") {
            Some(raw) => parse_number::<i64>("LOW_STOCK_THRESHOLD", &raw)?,
            None => DEFAULT_LOW_STOCK_THRESHOLD,
        };
        if low_stock_threshold < 0 {
            return Err(ConfigError::Invalid {
                key: "LOW_STOCK_THRESHOLD",
                reason: "must not be negative".to_string(),
            });
        }

        let poll_timeout_secs = match non_empty("POLL_TIMEOUT_SECS") {
            Some(raw) => parse_number::<u64>("POLL_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        let api_base_url = non_empty("TELEGRAM_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            bot_token,
            admin_ids,
            database_path,
            low_stock_threshold,
            poll_timeout_secs,
            api_base_url,
        })
    }
}

fn parse_number<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use stockbot_core::ChatUserId;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn minimal_settings_use_defaults() {
        let settings = load(&[("BOT_TOKEN", "123:abc"), ("ADMIN_IDS", "1,2")]).unwrap();
        assert_eq!(settings.bot_token, "123:abc");
        assert!(settings.admin_ids.is_admin(ChatUserId::new(2)));
        assert_eq!(settings.database_path, PathBuf::from("inventory.db"));
        assert_eq!(settings.low_stock_threshold, 4);
        assert_eq!(settings.poll_timeout_secs, 30);
        assert_eq!(settings.api_base_url, "https://api.telegram.org");
    }

    #[test]
    fn api_token_is_accepted_as_fallback() {
        let settings = load(&[("API_TOKEN", "t"), ("ADMIN_IDS", "")]).unwrap();
        assert_eq!(settings.bot_token, "t");
        assert!(settings.admin_ids.is_empty());
    }

    #[test]
    fn missing_token_and_admins_are_reported() {
        assert_eq!(
            load(&[("ADMIN_IDS", "1")]).unwrap_err(),
            ConfigError::Missing("BOT_TOKEN")
        );
        assert_eq!(
            load(&[("BOT_TOKEN", "t")]).unwrap_err(),
            ConfigError::Missing("ADMIN_IDS")
        );
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = load(&[("BOT_TOKEN", "t"), ("ADMIN_IDS", "1,x")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ADMIN_IDS", .. }));

        let err = load(&[
            ("BOT_TOKEN", "t"),
            ("ADMIN_IDS", "1"),
            ("LOW_STOCK_THRESHOLD", "few"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "LOW_STOCK_THRESHOLD", .. }));
    }

    #[test]
    fn overrides_are_applied() {
        let settings = load(&[
            ("BOT_TOKEN", "t"),
            ("ADMIN_IDS", "1"),
            ("DATABASE_PATH", "/var/lib/stockbot/db.sqlite"),
            ("LOW_STOCK_THRESHOLD", "10"),
            ("POLL_TIMEOUT_SECS", "5"),
            ("TELEGRAM_API_URL", "http://localhost:8081/"),
        ])
        .unwrap();
        assert_eq!(settings.database_path, PathBuf::from("/var/lib/stockbot/db.sqlite"));
        assert_eq!(settings.low_stock_threshold, 10);
        assert_eq!(settings.poll_timeout_secs, 5);
        assert_eq!(settings.api_base_url, "http://localhost:8081");
    }

    #[test]
    fn debug_output_hides_token() {
        let settings = load(&[("BOT_TOKEN", "secret-token"), ("ADMIN_IDS", "1")]).unwrap();
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("secret-token"));
    }
}
