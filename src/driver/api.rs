//! Generic driver for structured-API transports.

use async_trait::async_trait;
use futures_util::future::try_join_all;
use indexmap::IndexMap;
use serde_json::Value;

use super::{fetch_output, Driver, GetConfigOptions};
use crate::device::DeviceContext;
use crate::error::{ClassifiedError, Result};
use crate::platform::{profile_for, PlatformProfile};
use crate::text;
use crate::transport::{CommandRunner, PushResult};

/// Driver for platforms reached through a structured-API backend.
///
/// There is no single "show running config" on these platforms; instead
/// the profile lists the endpoints whose aggregated state stands in for
/// the configuration snapshot.
#[derive(Debug, Clone)]
pub struct ApiDriver {
    profile: PlatformProfile,
}

impl ApiDriver {
    /// Create a driver bound to a profile.
    pub fn new(profile: PlatformProfile) -> Self {
        Self { profile }
    }

    /// Create a driver for a platform name, using its registered profile
    /// or generic defaults.
    pub fn for_platform(platform: &str) -> Self {
        Self::new(profile_for(platform))
    }
}

#[async_trait]
impl Driver for ApiDriver {
    fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    async fn get_command(
        &self,
        device: &DeviceContext,
        runner: &dyn CommandRunner,
        command: &str,
    ) -> Result<String> {
        fetch_output(&self.profile, device, runner, command).await
    }

    /// Aggregate every configured endpoint concurrently and render the
    /// joined state as one JSON document. Any failing endpoint fails the
    /// whole retrieval; a partially aggregated snapshot would compare as
    /// a config change that never happened.
    async fn get_config(
        &self,
        device: &DeviceContext,
        runner: &dyn CommandRunner,
        options: &GetConfigOptions,
    ) -> Result<String> {
        log::debug!(
            "Executing get_config for {} on {}",
            device.hostname,
            device.platform
        );
        let endpoints = &self.profile.api_endpoints;
        if endpoints.is_empty() {
            return Err(
                ClassifiedError::new("E1025", &[("platform", &self.profile.name)]).log(device),
            );
        }

        let fetches = endpoints.iter().map(|endpoint| async move {
            self.get_command(device, runner, endpoint)
                .await
                .map(|output| (endpoint.clone(), output))
                .map_err(|err| {
                    ClassifiedError::new(
                        "E1024",
                        &[("endpoint", endpoint.as_str()), ("error", &err.message)],
                    )
                })
        });
        let outputs = try_join_all(fetches).await.map_err(|err| err.log(device))?;

        let mut aggregated: IndexMap<String, Value> = IndexMap::with_capacity(outputs.len());
        for (endpoint, output) in outputs {
            let value = serde_json::from_str(&output).unwrap_or(Value::String(output));
            aggregated.insert(endpoint, value);
        }
        let running_config = serde_json::to_string_pretty(&aggregated)
            .map_err(|err| ClassifiedError::new("E1021", &[("error", &err.to_string())]).log(device))?;

        text::process(
            &running_config,
            &options.remove_lines,
            &options.substitute_lines,
            options.backup_file.as_deref(),
        )
        .map_err(|err| err.log(device))
    }

    async fn merge_config(
        &self,
        device: &DeviceContext,
        _runner: &dyn CommandRunner,
        _config: &str,
    ) -> Result<PushResult> {
        Err(ClassifiedError::new("E1002", &[("method", "merge_config")]).log(device))
    }

    async fn replace_config(
        &self,
        device: &DeviceContext,
        _runner: &dyn CommandRunner,
        _config: &str,
    ) -> Result<PushResult> {
        Err(ClassifiedError::new("E1002", &[("method", "replace_config")]).log(device))
    }
}
