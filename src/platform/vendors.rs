//! Builtin platform profiles.
//!
//! Each function returns the profile for one operating-system family.
//! CLI platforms differ mostly in their show command; the API-only
//! platforms replace the show command with an endpoint list and a
//! non-SSH probe port.

use super::profile::PlatformProfile;

/// All builtin profiles, in registration order.
pub fn builtin_profiles() -> Vec<PlatformProfile> {
    vec![
        cisco_ios(),
        cisco_nxos(),
        cisco_xr(),
        arista_eos(),
        juniper_junos(),
        mikrotik_routeros(),
        ruckus_fastiron(),
        mikrotik_routeros_api(),
        ruckus_smartzone_api(),
    ]
}

/// Cisco IOS / IOS-XE.
pub fn cisco_ios() -> PlatformProfile {
    PlatformProfile::new("cisco_ios").with_config_command("show run")
}

/// Cisco NX-OS.
pub fn cisco_nxos() -> PlatformProfile {
    PlatformProfile::new("cisco_nxos").with_config_command("show run")
}

/// Cisco IOS-XR.
pub fn cisco_xr() -> PlatformProfile {
    PlatformProfile::new("cisco_xr").with_config_command("show run")
}

/// Arista EOS.
pub fn arista_eos() -> PlatformProfile {
    PlatformProfile::new("arista_eos")
        .with_config_command("show run")
        .with_failure_marker("% Cannot commit", "E1009")
}

/// Juniper Junos, retrieved in display-set form.
pub fn juniper_junos() -> PlatformProfile {
    PlatformProfile::new("juniper_junos").with_config_command("show configuration | display set")
}

/// Mikrotik RouterOS over the CLI.
pub fn mikrotik_routeros() -> PlatformProfile {
    PlatformProfile::new("mikrotik_routeros").with_config_command("export terse")
}

/// Ruckus FastIron ICX.
pub fn ruckus_fastiron() -> PlatformProfile {
    PlatformProfile::new("ruckus_fastiron").with_config_command("show running-config")
}

/// Mikrotik RouterOS over the REST API.
pub fn mikrotik_routeros_api() -> PlatformProfile {
    PlatformProfile::new("mikrotik_routeros_api")
        .with_tcp_port(8729)
        .with_api_endpoint("/system/identity")
        .with_api_endpoint("/interface")
        .with_api_endpoint("/ip/address")
        .with_api_endpoint("/system/ntp/client")
        .with_api_endpoint("/ip/dns")
        .with_api_endpoint("/snmp/community")
        .with_api_endpoint("/system/logging/action")
}

/// Ruckus SmartZone wireless controller over the public API.
pub fn ruckus_smartzone_api() -> PlatformProfile {
    PlatformProfile::new("ruckus_smartzone_api")
        .with_tcp_port(8443)
        .with_api_endpoint("/cluster/state")
        .with_api_endpoint("/controller")
        .with_api_endpoint("/system/snmpAgent")
        .with_api_endpoint("/system/syslog")
        .with_api_endpoint("/system/systemTime")
        .with_api_endpoint("/profiles/dnsserver")
        .with_api_endpoint("/apRules")
}
