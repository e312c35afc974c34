//! Server settings.
//!
//! Every flag can also come from the environment (`WALLHUNT_*`), and a
//! `.env` file is loaded before parsing.

use std::time::Duration;

use clap::Parser;
use wallhunt_core::ClientConfig;
use wallhunt_core::url::DEFAULT_BASE_URL;

/// Wallpaper search API server.
#[derive(Debug, Clone, Parser)]
#[command(name = "wallhunt", version, about)]
pub struct Settings {
    /// Address to bind.
    #[arg(long, env = "WALLHUNT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "WALLHUNT_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Root URL of the scraped site.
    #[arg(long, env = "WALLHUNT_SITE_URL", default_value = DEFAULT_BASE_URL)]
    pub site_url: String,

    /// Lower bound of the pause before the listing request, in milliseconds.
    #[arg(long, env = "WALLHUNT_MIN_DELAY_MS", default_value_t = 1000)]
    pub min_delay_ms: u64,

    /// Upper bound of the pause before the listing request, in milliseconds.
    #[arg(long, env = "WALLHUNT_MAX_DELAY_MS", default_value_t = 6000)]
    pub max_delay_ms: u64,

    /// Candidates taken from one listing page.
    #[arg(long, env = "WALLHUNT_MAX_CANDIDATES", default_value_t = 12)]
    pub max_candidates: usize,

    /// Detail pages fetched at once.
    #[arg(long, env = "WALLHUNT_DETAIL_CONCURRENCY", default_value_t = 1)]
    pub detail_concurrency: usize,

    /// Per-request timeout, in seconds.
    #[arg(long, env = "WALLHUNT_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Overall budget for one search, in seconds. Unlimited when unset.
    #[arg(long, env = "WALLHUNT_DEADLINE_SECS")]
    pub deadline_secs: Option<u64>,

    /// Access key for the Unsplash search API.
    #[arg(long, env = "UNSPLASH_ACCESS_KEY", hide_env_values = true)]
    pub unsplash_access_key: Option<String>,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Settings {
    /// Scraper configuration derived from these settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.site_url.clone(),
            timeout_secs: self.timeout_secs,
            min_delay: Duration::from_millis(self.min_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms.max(self.min_delay_ms)),
            max_candidates: self.max_candidates,
            detail_concurrency: self.detail_concurrency,
            ..ClientConfig::default()
        }
    }

    /// Budget for one search, if any.
    pub fn search_deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }

    /// Unsplash key, ignoring blank values.
    pub fn unsplash_key(&self) -> Option<&str> {
        self.unsplash_access_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["wallhunt"]).unwrap();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.site_url, "https://www.freepik.com");

        let config = settings.client_config();
        assert_eq!(config.min_delay, Duration::from_secs(1));
        assert_eq!(config.max_delay, Duration::from_secs(6));
        assert_eq!(config.max_candidates, 12);
        assert_eq!(config.detail_concurrency, 1);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::try_parse_from([
            "wallhunt",
            "--min-delay-ms",
            "0",
            "--max-delay-ms",
            "0",
            "--detail-concurrency",
            "3",
            "--deadline-secs",
            "20",
        ])
        .unwrap();

        let config = settings.client_config();
        assert_eq!(config.min_delay, Duration::ZERO);
        assert_eq!(config.max_delay, Duration::ZERO);
        assert_eq!(config.detail_concurrency, 3);
        assert_eq!(settings.search_deadline(), Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_inverted_delay_range_is_raised() {
        let settings =
            Settings::try_parse_from(["wallhunt", "--min-delay-ms", "5000", "--max-delay-ms", "10"])
                .unwrap();
        let config = settings.client_config();
        assert_eq!(config.max_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_unsplash_key_is_ignored() {
        let settings =
            Settings::try_parse_from(["wallhunt", "--unsplash-access-key", "  "]).unwrap();
        assert_eq!(settings.unsplash_key(), None);
    }
}
