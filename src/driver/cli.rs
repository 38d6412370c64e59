//! Generic driver for CLI-session transports.

use async_trait::async_trait;

use super::{fetch_output, Driver, GetConfigOptions};
use crate::device::DeviceContext;
use crate::error::{ClassifiedError, Result};
use crate::platform::{profile_for, PlatformProfile};
use crate::text;
use crate::transport::{CommandRunner, PushResult};

/// Driver for platforms reached through a CLI session backend.
///
/// One instance per platform profile covers every CLI vendor; the profile
/// supplies the show command, probe port, and vendor rejection markers.
#[derive(Debug, Clone)]
pub struct CliDriver {
    profile: PlatformProfile,
}

impl CliDriver {
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
impl Driver for CliDriver {
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
        let command = device.config_command(&self.profile.config_command);

        let running_config = self.get_command(device, runner, &command).await?;
        if running_config.trim().is_empty() {
            return Err(ClassifiedError::new("E1033", &[("command", &command)]).log(device));
        }

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
        runner: &dyn CommandRunner,
        config: &str,
    ) -> Result<PushResult> {
        log::info!("{device} | Config merge starting");
        let push = runner
            .apply_config(device, config, false)
            .await
            .map_err(|err| err.classify().log(device))?;

        // The device can reject individual lines while the backend still
        // reports a successful push; that rejection is fatal.
        if let Some(err) =
            text::scan_vendor_errors(&push.result, &self.profile.failed_when_contains)
        {
            return Err(err.log(device));
        }

        log::info!("{device} | result: {}, changed: {}", push.result, push.changed);
        if let Some(diff) = &push.diff {
            log::info!("{device} | Diff:\n{diff}");
        }
        log::info!("{device} | Config merge ended");
        Ok(push)
    }

    async fn replace_config(
        &self,
        device: &DeviceContext,
        runner: &dyn CommandRunner,
        config: &str,
    ) -> Result<PushResult> {
        log::info!("{device} | Config provision starting");
        let push = runner
            .apply_config(device, config, true)
            .await
            .map_err(|err| err.classify().log(device))?;

        log::info!("{device} | result: {}, changed: {}", push.result, push.changed);
        log::info!("{device} | Config provision ended");
        Ok(push)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testing::ScriptedRunner;
    use crate::text::SubstituteRule;
    use crate::transport::TransportError;
    use regex::Regex;
    use serde_json::json;

    fn device() -> DeviceContext {
        DeviceContext::new("edge-router-01", "edge-router-01.example.net", "cisco_ios")
            .with_username("admin")
            .with_password("hunter2")
    }

    fn driver() -> CliDriver {
        CliDriver::for_platform("cisco_ios")
    }

    #[tokio::test]
    async fn test_get_command_returns_output() {
        let runner = ScriptedRunner::default().with_output("show version", "IOS XE 17.9");
        let output = driver()
            .get_command(&device(), &runner, "show version")
            .await
            .unwrap();
        assert_eq!(output, "IOS XE 17.9");
    }

    #[tokio::test]
    async fn test_hidden_error_wins_over_transport_success() {
        let runner = ScriptedRunner::default()
            .with_output("show run", "show run\n% Invalid input detected at '^' marker.");
        let err = driver()
            .get_command(&device(), &runner, "show run")
            .await
            .unwrap_err();
        assert_eq!(err.code, "E1019");
    }

    #[tokio::test]
    async fn test_transport_failures_stay_classified() {
        let auth = ScriptedRunner::default()
            .failing(TransportError::AuthenticationFailed("denied".to_string()));
        let err = driver()
            .get_command(&device(), &auth, "show run")
            .await
            .unwrap_err();
        assert_eq!(err.code, "E1017");

        let timeout =
            ScriptedRunner::default().failing(TransportError::Timeout("no prompt".to_string()));
        let err = driver()
            .get_command(&device(), &timeout, "show run")
            .await
            .unwrap_err();
        assert_eq!(err.code, "E1018");
    }

    #[tokio::test]
    async fn test_get_commands_preserves_order() {
        let runner = ScriptedRunner::default()
            .with_output("show version", "version output")
            .with_output("show inventory", "inventory output");
        let outputs = driver()
            .get_commands(&device(), &runner, &["show version", "show inventory"])
            .await
            .unwrap();
        let commands: Vec<&String> = outputs.keys().collect();
        assert_eq!(commands, vec!["show version", "show inventory"]);
    }

    #[tokio::test]
    async fn test_get_config_empty_output_fails() {
        let runner = ScriptedRunner::default().with_output("show run", "");
        let err = driver()
            .get_config(&device(), &runner, &GetConfigOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, "E1033");
    }

    #[tokio::test]
    async fn test_get_config_processes_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let backup = dir.path().join("backups/edge-router-01.cfg");
        let runner = ScriptedRunner::default().with_output(
            "show run",
            "hostname edge-router-01\nenable secret 5 $1$abc\nntp clock-period 17180",
        );
        let options = GetConfigOptions::default()
            .with_backup_file(&backup)
            .with_remove_line(Regex::new(r"^ntp clock-period").unwrap())
            .with_substitute_line(
                SubstituteRule::new(r"^(enable secret \d) .+$", "$1 <removed>").unwrap(),
            );

        let config = driver()
            .get_config(&device(), &runner, &options)
            .await
            .unwrap();
        assert_eq!(config, "hostname edge-router-01\nenable secret 5 <removed>");
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), config);
    }

    #[tokio::test]
    async fn test_get_config_honors_device_command_override() {
        let device = device().with_custom_field("config_command", json!("show running-config all"));
        let runner = ScriptedRunner::default()
            .with_output("show running-config all", "hostname edge-router-01");
        let config = driver()
            .get_config(&device, &runner, &GetConfigOptions::default())
            .await
            .unwrap();
        assert_eq!(config, "hostname edge-router-01");
    }

    #[tokio::test]
    async fn test_offline_get_command_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let device = device()
            .with_custom_field("offline", json!(true))
            .with_offline_catalog(dir.path());
        let runner = ScriptedRunner::default();

        let err = driver()
            .get_command(&device, &runner, "show run")
            .await
            .unwrap_err();
        assert_eq!(err.code, "E1032");
        assert!(err.message.contains("could not be found"));
    }

    #[tokio::test]
    async fn test_offline_get_config_reads_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let device_dir = dir.path().join("edge-router-01.example.net");
        std::fs::create_dir_all(&device_dir).unwrap();
        std::fs::write(device_dir.join("show_run.txt"), "hostname edge-router-01").unwrap();

        let device = device()
            .with_custom_field("offline", json!(true))
            .with_offline_catalog(dir.path());
        let runner = ScriptedRunner::default();

        let config = driver()
            .get_config(&device, &runner, &GetConfigOptions::default())
            .await
            .unwrap();
        assert_eq!(config, "hostname edge-router-01");
    }

    #[tokio::test]
    async fn test_merge_config_reports_push_result() {
        let runner = ScriptedRunner::default().with_push(PushResult {
            changed: true,
            diff: Some("+ntp server 10.0.0.1".to_string()),
            result: "configured".to_string(),
        });
        let push = driver()
            .merge_config(&device(), &runner, "ntp server 10.0.0.1")
            .await
            .unwrap();
        assert!(push.changed);
        assert_eq!(push.result, "configured");
    }

    #[tokio::test]
    async fn test_merge_config_rechecks_hidden_errors() {
        let runner = ScriptedRunner::default().with_push(PushResult {
            changed: false,
            diff: None,
            result: "% Invalid input detected at '^' marker.".to_string(),
        });
        let err = driver()
            .merge_config(&device(), &runner, "bogus command")
            .await
            .unwrap_err();
        assert_eq!(err.code, "E1019");
    }

    #[tokio::test]
    async fn test_push_transport_failure_is_fatal() {
        let runner =
            ScriptedRunner::default().failing(TransportError::Unknown("session died".to_string()));
        let err = driver()
            .replace_config(&device(), &runner, "hostname sw1")
            .await
            .unwrap_err();
        assert_eq!(err.code, "E1016");
    }

    #[tokio::test]
    async fn test_generate_config_renders_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.j2"), "hostname {{ hostname }}").unwrap();
        let output = dir.path().join("intended/edge-router-01.cfg");
        let request = crate::driver::GenerateConfigRequest::new(
            "base.j2",
            dir.path(),
            &output,
            json!({"hostname": "edge-router-01"}),
        );

        let rendered = driver()
            .generate_config(&device(), &request)
            .await
            .unwrap();
        assert_eq!(rendered, "hostname edge-router-01");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), rendered);
    }

    #[tokio::test]
    async fn test_generate_config_missing_variable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.j2"), "hostname {{ hostname }}").unwrap();
        let request = crate::driver::GenerateConfigRequest::new(
            "base.j2",
            dir.path(),
            dir.path().join("out.cfg"),
            json!({}),
        );

        let err = driver()
            .generate_config(&device(), &request)
            .await
            .unwrap_err();
        assert_eq!(err.code, "E1010");
    }
}
