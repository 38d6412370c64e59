//! Driver resolution.
//!
//! Maps a `(platform, transport)` pair to a concrete [`Driver`] through a
//! registry of named factories: try `"{platform}.{transport}"`, fall back
//! to `"default.{transport}"`, fail listing every path tried. An explicit
//! override key is the escape hatch and gets no fallback.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::driver::{ApiDriver, CliDriver, Driver};
use crate::error::ResolutionError;

/// Transport family used to reach a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    /// CLI session backend (SSH screen-scraping style).
    Cli,

    /// Structured API backend.
    Api,
}

impl Transport {
    /// Stable lowercase token used in registry keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Cli => "cli",
            Transport::Api => "api",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Factory materializing a driver for a platform name.
pub type DriverFactory = fn(&str) -> Arc<dyn Driver>;

/// Global registry seeded with the builtin entries.
static REGISTRY: Lazy<DriverRegistry> = Lazy::new(DriverRegistry::builtin);

/// Registry of driver factories keyed by `"{platform}.{transport}"`.
#[derive(Default)]
pub struct DriverRegistry {
    drivers: HashMap<String, DriverFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the builtin entries: generic CLI and API
    /// defaults plus the API-only platforms.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("default.cli", |platform| {
            Arc::new(CliDriver::for_platform(platform))
        });
        registry.register("default.api", |platform| {
            Arc::new(ApiDriver::for_platform(platform))
        });
        registry.register("mikrotik_routeros_api.api", |platform| {
            Arc::new(ApiDriver::for_platform(platform))
        });
        registry.register("ruckus_smartzone_api.api", |platform| {
            Arc::new(ApiDriver::for_platform(platform))
        });
        registry
    }

    /// Get the global registry.
    pub fn global() -> &'static DriverRegistry {
        &REGISTRY
    }

    /// Register a driver factory under a lookup key.
    pub fn register(&mut self, key: impl Into<String>, factory: DriverFactory) {
        self.drivers.insert(key.into(), factory);
    }

    /// Resolve a driver for a platform and transport.
    ///
    /// Resolution is a pure map lookup with ordered fallback; no I/O, no
    /// side effects, same result every time. An empty platform key never
    /// resolves, not even to the transport default.
    pub fn resolve(
        &self,
        platform: &str,
        transport: Transport,
        override_key: Option<&str>,
    ) -> Result<Arc<dyn Driver>, ResolutionError> {
        log::debug!("Driver resolution started for {platform} ({transport})");

        if let Some(key) = override_key {
            return match self.drivers.get(key) {
                Some(factory) => Ok(factory(platform)),
                None => Err(ResolutionError {
                    checked_paths: vec![key.to_string()],
                }),
            };
        }

        let platform_key = format!("{platform}.{transport}");
        let default_key = format!("default.{transport}");
        if !platform.is_empty() {
            if let Some(factory) = self.drivers.get(&platform_key) {
                return Ok(factory(platform));
            }
            if let Some(factory) = self.drivers.get(&default_key) {
                return Ok(factory(platform));
            }
        }
        Err(ResolutionError {
            checked_paths: vec![platform_key, default_key],
        })
    }
}

/// Resolve a driver from the global registry.
pub fn resolve(
    platform: &str,
    transport: Transport,
    override_key: Option<&str>,
) -> Result<Arc<dyn Driver>, ResolutionError> {
    DriverRegistry::global().resolve(platform, transport, override_key)
}
