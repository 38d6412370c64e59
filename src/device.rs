//! Device context shared by every driver operation.
//!
//! A [`DeviceContext`] carries the inventory facts a driver needs: address,
//! platform key, credentials, and the per-device configuration layers that
//! can override platform defaults (custom fields first, then config
//! context, then the platform profile).

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use secrecy::SecretString;
use serde_json::Value;

/// Per-device invocation context.
///
/// Cheap to clone-by-reference across concurrent operations; drivers never
/// mutate it.
#[derive(Debug, Clone)]
pub struct DeviceContext {
    /// Inventory display name, used as logging context.
    pub name: String,

    /// Target host (hostname, FQDN, or IP address).
    pub hostname: String,

    /// Platform key (normalized vendor/OS token, e.g. "cisco_ios").
    pub platform: String,

    /// Username for device authentication.
    pub username: Option<String>,

    /// Password for device authentication.
    pub password: Option<SecretString>,

    /// Per-device custom fields; the highest-priority settings layer.
    pub custom_fields: IndexMap<String, Value>,

    /// Rendered config context; the middle settings layer.
    pub config_context: IndexMap<String, Value>,

    /// Root of the pre-recorded command output catalog for offline mode.
    pub offline_catalog: Option<PathBuf>,
}

impl DeviceContext {
    /// Create a context with the minimum required facts.
    pub fn new(
        name: impl Into<String>,
        hostname: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            hostname: hostname.into(),
            platform: platform.into(),
            username: None,
            password: None,
            custom_fields: IndexMap::new(),
            config_context: IndexMap::new(),
            offline_catalog: None,
        }
    }

    /// Set the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Set a custom field.
    pub fn with_custom_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom_fields.insert(key.into(), value);
        self
    }

    /// Set a config context entry.
    pub fn with_config_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config_context.insert(key.into(), value);
        self
    }

    /// Set the offline command output catalog root.
    pub fn with_offline_catalog(mut self, root: impl Into<PathBuf>) -> Self {
        self.offline_catalog = Some(root.into());
        self
    }

    /// Look up a setting through the device layers: custom field first,
    /// then config context. Platform defaults are the caller's fallback.
    fn setting(&self, key: &str) -> Option<&Value> {
        self.custom_fields
            .get(key)
            .or_else(|| self.config_context.get(key))
    }

    /// TCP port for the reachability probe, falling back to the platform
    /// default when no device layer overrides it.
    pub fn tcp_port(&self, platform_default: u16) -> u16 {
        self.setting("tcp_port")
            .and_then(Value::as_u64)
            .and_then(|port| u16::try_from(port).ok())
            .unwrap_or(platform_default)
    }

    /// Show-running-config command, falling back to the platform default.
    pub fn config_command(&self, platform_default: &str) -> String {
        self.setting("config_command")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| platform_default.to_string())
    }

    /// Whether command output should come from the offline catalog instead
    /// of a live session. The driver's static default is the last fallback.
    pub fn offline_enabled(&self, platform_default: bool) -> bool {
        self.setting("offline")
            .and_then(as_truthy)
            .unwrap_or(platform_default)
    }

    /// Offline catalog directory for this device's recorded outputs.
    pub fn offline_device_dir(&self) -> Option<PathBuf> {
        self.offline_catalog
            .as_deref()
            .map(|root: &Path| root.join(&self.hostname))
    }
}

impl fmt::Display for DeviceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Coerce a settings value into a boolean, accepting "truthy" strings.
///
/// True values are y, yes, t, true, on and 1; false values are n, no, f,
/// false, off and 0. Any other string is treated as true.
fn as_truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => Some(number.as_f64() != Some(0.0)),
        Value::String(text) => match text.to_lowercase().as_str() {
            "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
            _ => Some(true),
        },
        _ => None,
    }
}
