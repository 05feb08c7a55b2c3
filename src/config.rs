use log::LevelFilter;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::ConfigError;

const SITE_JSON: &str = include_str!("../content/site.json");

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    pub brand: String,
    pub menu_label: String,
    pub theme: String,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            brand: "Notes".to_string(),
            menu_label: "Documents".to_string(),
            theme: "tomorrow-night".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            file: "site.json",
            message: e.to_string(),
        })
    }

    /// The embedded site configuration, parsed on first use.
    ///
    /// A malformed `site.json` is logged and replaced by the defaults.
    pub fn shared() -> &'static SiteConfig {
        static SITE: OnceLock<SiteConfig> = OnceLock::new();
        SITE.get_or_init(|| match Self::from_json(SITE_JSON) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default site config");
                SiteConfig::default()
            }
        })
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level.trim()).map_err(|_| ConfigError::InvalidLogLevel {
            value: self.log_level.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = SiteConfig::from_json(r#"{ "brand": "Team Notes" }"#).unwrap();
        assert_eq!(config.brand, "Team Notes");
        assert_eq!(config.menu_label, "Documents");
        assert_eq!(config.theme, "tomorrow-night");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            SiteConfig::from_json("{ brand"),
            Err(ConfigError::Parse { file: "site.json", .. })
        ));
    }

    #[test]
    fn parses_log_levels() {
        let mut config = SiteConfig::default();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);

        config.log_level = "DEBUG".to_string();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);

        config.log_level = "loud".to_string();
        assert!(matches!(
            config.level_filter(),
            Err(ConfigError::InvalidLogLevel { .. })
        ));
    }

    #[test]
    fn embedded_site_config_parses() {
        let config = SiteConfig::from_json(SITE_JSON).unwrap();
        assert!(!config.brand.is_empty());
        assert!(config.level_filter().is_ok());
    }
}
