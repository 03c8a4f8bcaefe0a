//! Runtime configuration.
//!
//! Defaults reproduce the plain "query predictions and schedules, cache
//! routes in the working directory forever" behavior. Each setting can be
//! overridden from the environment:
//!
//! | Variable                      | Default                   |
//! |-------------------------------|---------------------------|
//! | `NEXT_STOP_BASE_URL`          | `https://api-v3.mbta.com` |
//! | `NEXT_STOP_TIMEOUT_SECS`      | `30`                      |
//! | `NEXT_STOP_PAGE_LIMIT`        | `3`                       |
//! | `NEXT_STOP_INCLUDE_SCHEDULED` | `true`                    |
//! | `NEXT_STOP_CACHE_DIR`         | `.`                       |
//! | `NEXT_STOP_CACHE_TTL_SECS`    | unset (never expire)      |

use std::str::FromStr;
use std::time::Duration;

use crate::cache::FileCacheConfig;
use crate::mbta::MbtaConfig;

/// Default number of results requested per source per route.
pub const DEFAULT_PAGE_LIMIT: u8 = 3;

/// An environment variable held a value we couldn't parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {name}: expected {expected}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Settings for the arrival fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Results requested per source per route (`page[limit]`).
    pub page_limit: u8,

    /// Also query timetabled schedules. Predictions are always queried.
    /// Scheduled entries are not deduplicated against predictions.
    pub include_scheduled: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            include_scheduled: true,
        }
    }
}

/// Complete configuration for one run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub mbta: MbtaConfig,
    pub fetch: FetchConfig,
    pub cache: FileCacheConfig,
}

impl Config {
    /// Build from defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from defaults overridden by whatever `lookup` returns.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("NEXT_STOP_BASE_URL") {
            config.mbta = config.mbta.with_base_url(url);
        }
        if let Some(secs) = parse_var(&lookup, "NEXT_STOP_TIMEOUT_SECS", "whole seconds")? {
            config.mbta = config.mbta.with_timeout(secs);
        }
        if let Some(limit) =
            parse_var::<_, u8>(&lookup, "NEXT_STOP_PAGE_LIMIT", "an integer 1-255")?
        {
            if limit == 0 {
                return Err(ConfigError {
                    name: "NEXT_STOP_PAGE_LIMIT",
                    value: limit.to_string(),
                    expected: "an integer 1-255",
                });
            }
            config.fetch.page_limit = limit;
        }
        if let Some(value) = lookup("NEXT_STOP_INCLUDE_SCHEDULED") {
            config.fetch.include_scheduled = parse_bool(&value).ok_or(ConfigError {
                name: "NEXT_STOP_INCLUDE_SCHEDULED",
                value,
                expected: "true or false",
            })?;
        }
        if let Some(dir) = lookup("NEXT_STOP_CACHE_DIR") {
            config.cache.dir = dir.into();
        }
        if let Some(secs) = parse_var(&lookup, "NEXT_STOP_CACHE_TTL_SECS", "whole seconds")? {
            config.cache = config.cache.with_ttl(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Use timetabled schedules in addition to predictions.
    pub fn with_include_scheduled(mut self, include: bool) -> Self {
        self.fetch.include_scheduled = include;
        self
    }

    /// Set the per-source result limit.
    pub fn with_page_limit(mut self, limit: u8) -> Self {
        self.fetch.page_limit = limit;
        self
    }
}

fn parse_var<F, T>(
    lookup: &F,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(name)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError {
                name,
                value,
                expected,
            })
        })
        .transpose()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
