//! Configuration compliance engine.
//!
//! Compares an intended configuration against an actual (backup) one,
//! per named feature, under strict-order or order-independent semantics.
//! Parsing is delegated to the OS-aware parser registry; when the parser
//! for a platform is unavailable, every feature degrades to a
//! `cannot_parse` verdict instead of failing the whole request.

mod diff;
pub mod parser;

pub use diff::{config_difference, find_unordered_lines, section_config};
pub use parser::{parser_for, ConfigLine, OsParser};

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::device::DeviceContext;
use crate::error::{ClassifiedError, Result};

/// Which configuration lines belong to a named compliance feature.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureSpec {
    /// Feature name, the key in the compliance report.
    pub name: String,

    /// Section prefixes selecting the feature's lines; empty selects the
    /// whole configuration.
    #[serde(default)]
    pub section: Vec<String>,

    /// Whether exact ordering matters. Leaving this unset is a caller
    /// error and fails the whole request fast.
    #[serde(default)]
    pub ordered: Option<bool>,
}

impl FeatureSpec {
    /// Build a feature spec with `ordered` declared.
    pub fn new(name: impl Into<String>, section: Vec<String>, ordered: bool) -> Self {
        Self {
            name: name.into(),
            section,
            ordered: Some(ordered),
        }
    }
}

/// Per-feature compliance verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceResult {
    /// The feature's section extracted from the actual configuration.
    pub actual: Option<String>,

    /// The feature's section extracted from the intended configuration.
    pub intended: Option<String>,

    /// Exact string equality between the two sections.
    pub ordered_compliant: Option<bool>,

    /// Set equality ignoring line order.
    pub unordered_compliant: Option<bool>,

    /// The verdict selected by the feature's `ordered` flag.
    pub compliant: Option<bool>,

    /// Intended lines absent from actual, parents preserved.
    pub missing: Option<String>,

    /// Actual lines absent from intended, parents preserved.
    pub extra: Option<String>,

    /// True when no parser is available for the platform (or the inputs
    /// could not be loaded); all other fields are unset in that case.
    pub cannot_parse: bool,
}

impl ComplianceResult {
    fn unparsed() -> Self {
        Self {
            actual: None,
            intended: None,
            ordered_compliant: None,
            unordered_compliant: None,
            compliant: None,
            missing: None,
            extra: None,
            cannot_parse: true,
        }
    }
}

/// Compare two on-disk configurations for a device, with preflight input
/// checks: a missing backup or intended file is a hard classified error
/// here, where the inputs were promised, rather than a silent per-feature
/// degradation.
pub fn compliance_config(
    device: &DeviceContext,
    features: &[FeatureSpec],
    backup_path: &Path,
    intended_path: &Path,
    network_os: &str,
) -> Result<IndexMap<String, ComplianceResult>> {
    if !backup_path.exists() {
        return Err(ClassifiedError::new(
            "E1007",
            &[("backup_file", &backup_path.display().to_string())],
        )
        .log(device));
    }
    if !intended_path.exists() {
        return Err(ClassifiedError::new(
            "E1008",
            &[("intended_file", &intended_path.display().to_string())],
        )
        .log(device));
    }
    compliance(features, backup_path, intended_path, network_os)
}

/// Report compliance for all features, loading both configurations from
/// disk. Load failures degrade per-feature like an unavailable parser.
pub fn compliance(
    features: &[FeatureSpec],
    backup_path: &Path,
    intended_path: &Path,
    network_os: &str,
) -> Result<IndexMap<String, ComplianceResult>> {
    require_ordered_declared(features)?;

    let backup_cfg = std::fs::read_to_string(backup_path);
    let intended_cfg = std::fs::read_to_string(intended_path);
    match (backup_cfg, intended_cfg) {
        (Ok(backup), Ok(intended)) => {
            compliance_text(features, backup.trim(), intended.trim(), network_os)
        }
        _ => Ok(unparsed_report(features)),
    }
}

/// Report compliance for all features over in-memory configuration text.
pub fn compliance_text(
    features: &[FeatureSpec],
    backup_cfg: &str,
    intended_cfg: &str,
    network_os: &str,
) -> Result<IndexMap<String, ComplianceResult>> {
    require_ordered_declared(features)?;

    let Some(parser) = parser_for(network_os) else {
        return Ok(unparsed_report(features));
    };

    let mut report = IndexMap::with_capacity(features.len());
    for feature in features {
        let actual = section_config(&feature.section, backup_cfg, parser);
        let intended = section_config(&feature.section, intended_cfg, parser);

        let ordered_compliant = actual == intended;
        let (missing, extra, unordered_compliant) = if ordered_compliant {
            (String::new(), String::new(), true)
        } else {
            let missing = config_difference(&intended, &actual, parser);
            let extra = config_difference(&actual, &intended, parser);
            let unordered_compliant = if missing.is_empty() && extra.is_empty() {
                find_unordered_lines(&intended, &actual).0
            } else {
                false
            };
            (missing, extra, unordered_compliant)
        };

        let compliant = match feature.ordered {
            Some(true) => ordered_compliant,
            Some(false) => unordered_compliant,
            None => unreachable!("validated by require_ordered_declared"),
        };

        report.insert(
            feature.name.clone(),
            ComplianceResult {
                actual: Some(actual),
                intended: Some(intended),
                ordered_compliant: Some(ordered_compliant),
                unordered_compliant: Some(unordered_compliant),
                compliant: Some(compliant),
                missing: Some(missing),
                extra: Some(extra),
                cannot_parse: false,
            },
        );
    }
    Ok(report)
}

fn require_ordered_declared(features: &[FeatureSpec]) -> Result<()> {
    for feature in features {
        if feature.ordered.is_none() {
            let detail = format!("feature `{}` does not declare `ordered`", feature.name);
            return Err(ClassifiedError::new("E1009", &[("error", &detail)]));
        }
    }
    Ok(())
}

fn unparsed_report(features: &[FeatureSpec]) -> IndexMap<String, ComplianceResult> {
    features
        .iter()
        .map(|feature| (feature.name.clone(), ComplianceResult::unparsed()))
        .collect()
}
