use std::str::FromStr;
use std::time::Duration;

/// Runtime settings, read from the environment (after `dotenvy` has loaded
/// any `.env` file).
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerConfig {
    /// Per-HTTP-request timeout handed to the provider client
    pub request_timeout: Duration,
    /// Upper bound on fetching everything for one ticker
    pub ticker_timeout: Duration,
    /// Result cache lifetime; zero disables caching
    pub cache_ttl: Duration,
    pub max_headlines: usize,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            ticker_timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(3600),
            max_headlines: 5,
        }
    }
}

impl ScreenerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing or unparsable values keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            Duration::from_secs(parse_or(&lookup, key, default.as_secs()))
        };

        Self {
            request_timeout: secs("AHP_REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            ticker_timeout: secs("AHP_TICKER_TIMEOUT_SECS", defaults.ticker_timeout),
            cache_ttl: secs("AHP_CACHE_TTL_SECS", defaults.cache_ttl),
            max_headlines: parse_or(&lookup, "AHP_MAX_HEADLINES", defaults.max_headlines),
        }
    }

    pub fn caching_enabled(&self) -> bool {
        !self.cache_ttl.is_zero()
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ScreenerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ScreenerConfig::default());
        assert!(config.caching_enabled());
    }

    #[test]
    fn test_overrides() {
        let config = ScreenerConfig::from_lookup(lookup(&[
            ("AHP_REQUEST_TIMEOUT_SECS", "3"),
            ("AHP_CACHE_TTL_SECS", "0"),
            ("AHP_MAX_HEADLINES", " 8 "),
        ]));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.ticker_timeout, Duration::from_secs(30));
        assert_eq!(config.max_headlines, 8);
        assert!(!config.caching_enabled());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ScreenerConfig::from_lookup(lookup(&[
            ("AHP_REQUEST_TIMEOUT_SECS", "soon"),
            ("AHP_MAX_HEADLINES", "-1"),
        ]));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.max_headlines, 5);
    }
}
