//! Driver capability surface.
//!
//! A [`Driver`] is the platform/transport-specific implementation of the
//! device operation set. Drivers are stateless values parameterized by a
//! [`PlatformProfile`]; the same driver instance is safely reusable across
//! concurrent invocations on different devices. Session handling lives
//! behind the [`CommandRunner`] collaborator passed per invocation.

mod api;
mod cli;
mod connectivity;

pub use api::ApiDriver;
pub use cli::CliDriver;

use std::path::PathBuf;

use async_trait::async_trait;
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use crate::device::DeviceContext;
use crate::error::Result;
use crate::platform::PlatformProfile;
use crate::template;
use crate::text::{self, SubstituteRule};
use crate::transport::{offline, CommandRunner, PushResult};

/// Post-processing and persistence options for configuration retrieval.
#[derive(Debug, Default)]
pub struct GetConfigOptions {
    /// Where to persist the processed configuration, if anywhere.
    pub backup_file: Option<PathBuf>,

    /// Regexes whose matching lines are removed.
    pub remove_lines: Vec<Regex>,

    /// Substitution rules applied after removal (secret redaction).
    pub substitute_lines: Vec<SubstituteRule>,
}

impl GetConfigOptions {
    /// Persist the processed configuration to this path.
    pub fn with_backup_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.backup_file = Some(path.into());
        self
    }

    /// Add a removal pattern.
    pub fn with_remove_line(mut self, pattern: Regex) -> Self {
        self.remove_lines.push(pattern);
        self
    }

    /// Add a substitution rule.
    pub fn with_substitute_line(mut self, rule: SubstituteRule) -> Self {
        self.substitute_lines.push(rule);
        self
    }
}

/// A templated configuration generation request.
#[derive(Debug, Clone)]
pub struct GenerateConfigRequest {
    /// Template name under the search path.
    pub template: String,

    /// Directory the templating engine loads templates from.
    pub search_path: PathBuf,

    /// Destination for the rendered configuration.
    pub output_file: PathBuf,

    /// Variables exposed to the template.
    pub context: Value,
}

impl GenerateConfigRequest {
    /// Build a generation request.
    pub fn new(
        template: impl Into<String>,
        search_path: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
        context: Value,
    ) -> Self {
        Self {
            template: template.into(),
            search_path: search_path.into(),
            output_file: output_file.into(),
            context,
        }
    }
}

/// The device operation capability set.
#[async_trait]
pub trait Driver: Send + Sync + std::fmt::Debug {
    /// The platform profile this driver is bound to.
    fn profile(&self) -> &PlatformProfile;

    /// Preemptive reachability and credential check: address resolution,
    /// TCP probe on the platform's (overridable) port, and presence of
    /// username and password. Each check surfaces its own error code.
    async fn check_connectivity(&self, device: &DeviceContext) -> Result<()> {
        connectivity::check(device, self.profile()).await
    }

    /// Execute one command and return its output, after hidden vendor
    /// error classification.
    async fn get_command(
        &self,
        device: &DeviceContext,
        runner: &dyn CommandRunner,
        command: &str,
    ) -> Result<String>;

    /// Execute several commands sequentially, keyed by command in order.
    async fn get_commands(
        &self,
        device: &DeviceContext,
        runner: &dyn CommandRunner,
        commands: &[&str],
    ) -> Result<IndexMap<String, String>> {
        let mut outputs = IndexMap::with_capacity(commands.len());
        for command in commands {
            let output = self.get_command(device, runner, command).await?;
            outputs.insert(command.to_string(), output);
        }
        Ok(outputs)
    }

    /// Retrieve, post-process, and optionally persist the running
    /// configuration.
    async fn get_config(
        &self,
        device: &DeviceContext,
        runner: &dyn CommandRunner,
        options: &GetConfigOptions,
    ) -> Result<String>;

    /// Send configuration to merge on the device.
    async fn merge_config(
        &self,
        device: &DeviceContext,
        runner: &dyn CommandRunner,
        config: &str,
    ) -> Result<PushResult>;

    /// Push a full candidate configuration to the device.
    async fn replace_config(
        &self,
        device: &DeviceContext,
        runner: &dyn CommandRunner,
        config: &str,
    ) -> Result<PushResult>;

    /// Render a device configuration from a template and write it to the
    /// requested destination.
    async fn generate_config(
        &self,
        device: &DeviceContext,
        request: &GenerateConfigRequest,
    ) -> Result<String> {
        let rendered =
            template::render_template(&request.template, &request.search_path, &request.context)
                .map_err(|err| err.log(device))?;
        text::save_file(&request.output_file, &rendered).map_err(|err| err.log(device))?;
        Ok(rendered)
    }
}

/// Fetch one command's output from the live backend or, when the device
/// selects it, the offline catalog. Both sources feed the same hidden
/// error classification so they stay interchangeable to callers.
pub(crate) async fn fetch_output(
    profile: &PlatformProfile,
    device: &DeviceContext,
    runner: &dyn CommandRunner,
    command: &str,
) -> Result<String> {
    let output = if device.offline_enabled(profile.offline_default) {
        offline::read_command_output(device, command)?
    } else {
        runner
            .run_command(device, command)
            .await
            .map_err(|err| err.classify().log(device))?
    };

    if let Some(err) = text::scan_vendor_errors(&output, &profile.failed_when_contains) {
        return Err(err.log(device));
    }
    Ok(output)
}
