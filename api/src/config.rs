use std::env;
use std::str::FromStr;

use chrono::Duration;

/// Posts per feed page unless `FEED_PAGE_SIZE` says otherwise
pub const DEFAULT_FEED_PAGE_SIZE: u64 = 70;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Number of regular posts on one feed page
    pub feed_page_size: u64,
    /// A user's last activity is only rewritten when older than this
    pub activity_throttle: Duration,
    /// Sustained requests per second allowed from one IP
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        Ok(Self {
            database_url,
            port: var_or("PORT", 8080),
            feed_page_size: var_or("FEED_PAGE_SIZE", DEFAULT_FEED_PAGE_SIZE).max(1),
            activity_throttle: Duration::seconds(var_or("ACTIVITY_THROTTLE_SECS", 300)),
            rate_limit_per_second: var_or("RATE_LIMIT_PER_SECOND", 10),
            rate_limit_burst: var_or("RATE_LIMIT_BURST", 30),
        })
    }
}

/// Parse an env var, falling back to `default` when unset or malformed
fn var_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring malformed config value");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_or_uses_default_when_unset() {
        assert_eq!(var_or("CLUBFEED_TEST_UNSET_VAR", 42u64), 42);
    }

    #[test]
    fn var_or_parses_and_falls_back_on_garbage() {
        env::set_var("CLUBFEED_TEST_PAGE_SIZE", "25");
        assert_eq!(var_or("CLUBFEED_TEST_PAGE_SIZE", 70u64), 25);

        env::set_var("CLUBFEED_TEST_PAGE_SIZE_BAD", "lots");
        assert_eq!(var_or("CLUBFEED_TEST_PAGE_SIZE_BAD", 70u64), 70);
    }
}
