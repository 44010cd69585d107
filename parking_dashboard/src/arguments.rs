use clap::Parser;
use parking_dashboard::{Config, View};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "Keeps a parking dashboard in sync with its backend")]
pub struct Arguments {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base url, e.g. http://127.0.0.1:5000
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Page to keep in sync
    #[arg(short, long, value_enum)]
    pub view: Option<View>,

    /// Statistics poll interval
    #[arg(long)]
    pub stats_interval: Option<humantime::Duration>,

    /// Table and activity feed poll interval
    #[arg(long)]
    pub table_interval: Option<humantime::Duration>,

    /// Wait before reopening a closed live-update connection
    #[arg(long)]
    pub reconnect_delay: Option<humantime::Duration>,

    /// Rewrite this HTML file after every page change
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,
}

impl Arguments {
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(view) = self.view {
            config.view = view;
        }
        if let Some(interval) = &self.stats_interval {
            config.stats_interval = **interval;
        }
        if let Some(interval) = &self.table_interval {
            config.table_interval = **interval;
        }
        if let Some(delay) = &self.reconnect_delay {
            config.reconnect_delay = **delay;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    #[test]
    fn defaults() {
        let args = Arguments::try_parse_from(["parking_dashboard"]).unwrap();
        assert_eq!(args.config().unwrap(), Config::default());
    }

    #[test]
    fn flags_override() {
        let args = Arguments::try_parse_from([
            "parking_dashboard",
            "--base-url",
            "http://10.0.0.7:8000",
            "--view",
            "main",
            "--stats-interval",
            "2s",
            "--reconnect-delay",
            "500ms",
        ])
        .unwrap();
        let config = args.config().unwrap();
        assert_eq!(config.base_url, "http://10.0.0.7:8000");
        assert_eq!(config.view, View::Main);
        assert_eq!(config.stats_interval, Duration::from_secs(2));
        assert_eq!(config.table_interval, Duration::from_secs(10));
        assert_eq!(config.reconnect_delay, Duration::from_millis(500));
    }

    #[test]
    fn invalid_base_url() {
        let args =
            Arguments::try_parse_from(["parking_dashboard", "--base-url", "not a url"]).unwrap();
        assert!(args.config().is_err());
    }
}
