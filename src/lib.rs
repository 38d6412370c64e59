//! # Netconform
//!
//! Async driver dispatch and configuration compliance engine for network
//! device automation.
//!
//! Netconform automates retrieval, normalization, and compliance-checking
//! of network-device configuration text across heterogeneous vendor
//! platforms. Device sessions themselves stay behind a caller-supplied
//! [`CommandRunner`] backend; this crate owns everything around them:
//! resolving the right driver for a platform/transport pair, classifying
//! vendor errors hidden inside "successful" output, post-processing
//! retrieved configuration, rendering intended configuration from
//! templates, and computing per-feature compliance verdicts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netconform::{dispatch, DeviceContext, Driver, GetConfigOptions, Transport};
//! # use netconform::transport::CommandRunner;
//!
//! # async fn example(backend: &dyn CommandRunner) -> Result<(), netconform::ClassifiedError> {
//! let device = DeviceContext::new("edge-router-01", "198.51.100.7", "cisco_ios")
//!     .with_username("admin")
//!     .with_password("secret");
//!
//! let driver = dispatch::resolve(&device.platform, Transport::Cli, None)?;
//! driver.check_connectivity(&device).await?;
//!
//! let options = GetConfigOptions::default().with_backup_file("backups/edge-router-01.cfg");
//! let running = driver.get_config(&device, backend, &options).await?;
//! println!("{running}");
//! # Ok(())
//! # }
//! ```

pub mod codes;
pub mod compliance;
pub mod device;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod platform;
pub mod template;
pub mod text;
pub mod transport;

// Re-export main types for convenience
pub use compliance::{compliance, compliance_config, ComplianceResult, FeatureSpec};
pub use device::DeviceContext;
pub use dispatch::{resolve, DriverRegistry, Transport};
pub use driver::{ApiDriver, CliDriver, Driver, GenerateConfigRequest, GetConfigOptions};
pub use error::{ClassifiedError, ResolutionError};
pub use platform::PlatformProfile;
