//! Preemptive device reachability checks.

use std::net::IpAddr;
use std::time::Duration;

use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;

use crate::device::DeviceContext;
use crate::error::{ClassifiedError, Result};
use crate::platform::PlatformProfile;

/// Probe timeout; a port that does not answer within this is unreachable.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run the three independent connectivity checks: address resolution, TCP
/// reachability, and credential presence. The checks run in this order
/// and the first failure surfaces its own code.
pub(crate) async fn check(device: &DeviceContext, profile: &PlatformProfile) -> Result<()> {
    let port = device.tcp_port(profile.tcp_port);
    let ip_addr = resolve_address(device, port).await?;

    if !tcp_ping(ip_addr, port).await {
        return Err(ClassifiedError::new(
            "E1004",
            &[("ip_addr", &ip_addr.to_string()), ("port", &port.to_string())],
        )
        .log(device));
    }
    if device.username.as_deref().is_none_or(str::is_empty) {
        return Err(ClassifiedError::new("E1005", &[]).log(device));
    }
    if device.password.is_none() {
        return Err(ClassifiedError::new("E1006", &[]).log(device));
    }
    Ok(())
}

/// Use the hostname directly when it is already an address; otherwise it
/// must resolve via DNS.
async fn resolve_address(device: &DeviceContext, port: u16) -> Result<IpAddr> {
    if let Ok(addr) = device.hostname.parse::<IpAddr>() {
        return Ok(addr);
    }
    lookup_host((device.hostname.as_str(), port))
        .await
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| addr.ip())
        .ok_or_else(|| {
            ClassifiedError::new("E1003", &[("hostname", &device.hostname)]).log(device)
        })
}

async fn tcp_ping(ip_addr: IpAddr, port: u16) -> bool {
    matches!(
        timeout(PROBE_TIMEOUT, TcpStream::connect((ip_addr, port))).await,
        Ok(Ok(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::vendors;
    use tokio::net::TcpListener;

    fn device(hostname: &str) -> DeviceContext {
        DeviceContext::new("sw1", hostname, "cisco_ios")
            .with_username("admin")
            .with_password("hunter2")
    }

    #[tokio::test]
    async fn test_unresolvable_hostname() {
        let err = check(&device("not-a-real-host.invalid"), &vendors::cisco_ios())
            .await
            .unwrap_err();
        assert_eq!(err.code, "E1003");
    }

    #[tokio::test]
    async fn test_reachable_port_with_credentials() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let device = device("127.0.0.1")
            .with_custom_field("tcp_port", serde_json::json!(port));

        check(&device, &vendors::cisco_ios()).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_username() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let device = DeviceContext::new("sw1", "127.0.0.1", "cisco_ios")
            .with_custom_field("tcp_port", serde_json::json!(port));

        let err = check(&device, &vendors::cisco_ios()).await.unwrap_err();
        assert_eq!(err.code, "E1005");
    }

    #[tokio::test]
    async fn test_missing_password() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let device = DeviceContext::new("sw1", "127.0.0.1", "cisco_ios")
            .with_username("admin")
            .with_custom_field("tcp_port", serde_json::json!(port));

        let err = check(&device, &vendors::cisco_ios()).await.unwrap_err();
        assert_eq!(err.code, "E1006");
    }
}
