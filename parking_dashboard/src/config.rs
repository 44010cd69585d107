use crate::{
    render::{RenderOptions, DEFAULT_CURRENCY, DEFAULT_TIME_FORMAT},
    view::View,
};
use anyhow::Context;
use chrono::format::{Item, StrftimeItems};
use parking_codecs::PUSH_PATH;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the backend API and the `/ws` push endpoint live.
    pub base_url: String,
    pub view: View,
    #[serde(with = "humantime_serde")]
    pub stats_interval: Duration,
    /// Cadence of the tables and the activity feed.
    #[serde(with = "humantime_serde")]
    pub table_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub reconnect_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    pub currency: String,
    pub time_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            view: View::default(),
            stats_interval: Duration::from_secs(5),
            table_interval: Duration::from_secs(10),
            reconnect_delay: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            currency: DEFAULT_CURRENCY.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&config).context("Failed to parse config toml file")
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.base_url()?;
        anyhow::ensure!(
            !self.stats_interval.is_zero() && !self.table_interval.is_zero(),
            "Poll intervals must be non-zero"
        );
        anyhow::ensure!(
            !StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)),
            "Invalid time format {:?}",
            self.time_format
        );
        Ok(())
    }

    pub fn base_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base url {:?}", self.base_url))?;
        anyhow::ensure!(
            matches!(url.scheme(), "http" | "https"),
            "Base url must be http or https, got {:?}",
            url.scheme()
        );
        Ok(url)
    }

    /// `ws://<host>/ws`, or `wss://` when the backend is served over https.
    pub fn push_url(&self) -> anyhow::Result<Url> {
        let mut url = self.base_url()?;
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|()| anyhow::anyhow!("Cannot derive a {scheme} url from {url}"))?;
        url.set_path(PUSH_PATH);
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            currency: self.currency.clone(),
            time_format: self.time_format.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn push_url_follows_host() {
        let config = Config {
            base_url: "http://parking.local:8080/dashboard?x=1".to_string(),
            ..Config::default()
        };
        assert_eq!(config.push_url().unwrap().as_str(), "ws://parking.local:8080/ws");

        let config = Config {
            base_url: "https://parking.example".to_string(),
            ..Config::default()
        };
        assert_eq!(config.push_url().unwrap().as_str(), "wss://parking.example/ws");
    }

    #[test]
    fn partial_toml() {
        let config: Config = toml::from_str(
            r#"
            base_url = "http://10.0.0.7:5000"
            view = "main"
            stats_interval = "2s"
            reconnect_delay = "1m"
            "#,
        )
        .unwrap();
        assert_eq!(config.view, View::Main);
        assert_eq!(config.stats_interval, Duration::from_secs(2));
        assert_eq!(config.table_interval, Duration::from_secs(10));
        assert_eq!(config.reconnect_delay, Duration::from_secs(60));
        assert_eq!(config.currency, "RWF");
        config.validate().unwrap();
    }

    #[test]
    fn rejects_bad_values() {
        assert!(toml::from_str::<Config>("colour = \"red\"").is_err());

        let config = Config {
            base_url: "ftp://parking.local".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            time_format: "%Y-%m-%d %".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            table_interval: Duration::ZERO,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_missing_file() {
        let err = Config::from_file("/nonexistent/parking.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/parking.toml"));
    }
}
