//! Configuration text processing.
//!
//! Pure, order-sensitive pipeline applied to retrieved configuration text:
//! line removal, then line substitution (secret redaction), then optional
//! persistence. The fixed remove-then-substitute order is a contract:
//! substitution patterns may target lines that removal patterns also match.
//!
//! This module also owns hidden vendor-error classification: some CLI
//! transports report success even when the device rejected the command, so
//! raw output is scanned for known rejection markers before it is trusted.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{ClassifiedError, Result};

/// Vendor rejection markers hidden inside "successful" command output,
/// checked in order; the first match classifies the failure.
pub const HIDDEN_VENDOR_ERRORS: &[(&str, &str)] = &[
    ("% Invalid input detected at", "E1019"),
    ("% Incomplete command", "E1028"),
    ("% Ambiguous command", "E1029"),
    ("% Permission denied for the role", "E1030"),
    ("% Authentication failed", "E1017"),
];

/// A line substitution rule: every match of `pattern` within a line is
/// rewritten with `replacement` (capture groups referenced as `$1`, `$2`).
#[derive(Debug, Clone)]
pub struct SubstituteRule {
    pattern: Regex,
    replacement: String,
}

impl SubstituteRule {
    /// Compile a substitution rule.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }
}

/// Delete every line matching any of the given patterns.
///
/// No-op when `patterns` is empty; `remove_lines(text, &[]) == text`.
pub fn remove_lines(text: &str, patterns: &[Regex]) -> String {
    if patterns.is_empty() {
        return text.to_string();
    }
    log::debug!("Removing lines from configuration based on `remove_lines` definition");
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| !patterns.iter().any(|pattern| pattern.is_match(line)))
        .collect();
    kept.join("\n")
}

/// Apply substitution rules to every line; used to redact secrets such as
/// enable passwords before the text is persisted or compared.
///
/// No-op when `rules` is empty; `substitute_lines(text, &[]) == text`.
pub fn substitute_lines(text: &str, rules: &[SubstituteRule]) -> String {
    if rules.is_empty() {
        return text.to_string();
    }
    log::debug!("Substitute lines from configuration based on `substitute_lines` definition");
    let rewritten: Vec<String> = text
        .lines()
        .map(|line| {
            let mut line = line.to_string();
            for rule in rules {
                line = rule
                    .pattern
                    .replace_all(&line, rule.replacement.as_str())
                    .into_owned();
            }
            line
        })
        .collect();
    rewritten.join("\n")
}

/// Write configuration text to a destination, creating parent directories
/// as needed ("already exists" is success) and overwriting any prior file.
pub fn save_file(destination: &Path, text: &str) -> Result<()> {
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| ClassifiedError::new("E1009", &[("error", &err.to_string())]))?;
    }
    log::debug!("Saving configuration to file: {}", destination.display());
    fs::write(destination, text)
        .map_err(|err| ClassifiedError::new("E1009", &[("error", &err.to_string())]))
}

/// Run the full remove → substitute → persist pipeline.
pub fn process(
    text: &str,
    remove: &[Regex],
    substitute: &[SubstituteRule],
    destination: Option<&Path>,
) -> Result<String> {
    let text = remove_lines(text, remove);
    let text = substitute_lines(&text, substitute);
    if let Some(destination) = destination {
        save_file(destination, &text)?;
    }
    Ok(text)
}

/// Scan command output for hidden vendor rejection markers.
///
/// The builtin markers are checked first, in their fixed order, then any
/// platform-specific extras. Returns the classified error for the first
/// marker found, `None` when the output is clean.
pub fn scan_vendor_errors(
    output: &str,
    extra_markers: &[(String, &'static str)],
) -> Option<ClassifiedError> {
    let builtin = HIDDEN_VENDOR_ERRORS
        .iter()
        .map(|(marker, code)| (*marker, *code));
    let extra = extra_markers
        .iter()
        .map(|(marker, code)| (marker.as_str(), *code));

    for (marker, code) in builtin.chain(extra) {
        if output.contains(marker) {
            return Some(ClassifiedError::new(code, &[("error", marker)]));
        }
    }
    None
}
