//! Platform profile definition.

use super::{DEFAULT_CONFIG_COMMAND, DEFAULT_TCP_PORT};

/// Platform-specific configuration as a plain data value.
///
/// Everything a driver varies by platform lives here, so one generic
/// driver per transport covers every vendor.
#[derive(Debug, Clone)]
pub struct PlatformProfile {
    /// Platform name (e.g. "cisco_ios", "juniper_junos").
    pub name: String,

    /// Command that retrieves the running configuration.
    pub config_command: String,

    /// Default TCP port for the reachability probe.
    pub tcp_port: u16,

    /// Extra vendor rejection markers checked after the builtin set,
    /// each mapped to the registry code it raises.
    pub failed_when_contains: Vec<(String, &'static str)>,

    /// Endpoints aggregated by structured-API platforms.
    pub api_endpoints: Vec<String>,

    /// Whether command output defaults to the offline catalog when no
    /// device layer says otherwise.
    pub offline_default: bool,
}

impl PlatformProfile {
    /// Create a profile with generic defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_command: DEFAULT_CONFIG_COMMAND.to_string(),
            tcp_port: DEFAULT_TCP_PORT,
            failed_when_contains: vec![],
            api_endpoints: vec![],
            offline_default: false,
        }
    }

    /// Set the running-config retrieval command.
    pub fn with_config_command(mut self, command: impl Into<String>) -> Self {
        self.config_command = command.into();
        self
    }

    /// Set the probe port.
    pub fn with_tcp_port(mut self, port: u16) -> Self {
        self.tcp_port = port;
        self
    }

    /// Add a vendor rejection marker and the code it classifies to.
    pub fn with_failure_marker(mut self, marker: impl Into<String>, code: &'static str) -> Self {
        self.failed_when_contains.push((marker.into(), code));
        self
    }

    /// Add an API endpoint to aggregate.
    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoints.push(endpoint.into());
        self
    }

    /// Set the offline-mode default.
    pub fn with_offline_default(mut self, offline: bool) -> Self {
        self.offline_default = offline;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_defaults() {
        let profile = PlatformProfile::new("cisco_ios");
        assert_eq!(profile.name, "cisco_ios");
        assert_eq!(profile.config_command, DEFAULT_CONFIG_COMMAND);
        assert_eq!(profile.tcp_port, DEFAULT_TCP_PORT);
        assert!(profile.failed_when_contains.is_empty());
        assert!(!profile.offline_default);
    }

    #[test]
    fn test_builder_methods() {
        let profile = PlatformProfile::new("ruckus_smartzone_api")
            .with_tcp_port(8443)
            .with_api_endpoint("/cluster/state")
            .with_failure_marker("% Cannot commit", "E1009");
        assert_eq!(profile.tcp_port, 8443);
        assert_eq!(profile.api_endpoints, vec!["/cluster/state".to_string()]);
        assert_eq!(
            profile.failed_when_contains,
            vec![("% Cannot commit".to_string(), "E1009")]
        );
    }
}
