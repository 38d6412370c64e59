//! Offline command output source.
//!
//! Instead of executing on a live device, command output can be read from
//! a catalog of pre-recorded files (typically a version-controlled
//! checkout of previously captured output). The catalog layout is one
//! directory per device hostname, one `.txt` file per command, with the
//! command text sanitized into a filename.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::device::DeviceContext;
use crate::error::{ClassifiedError, Result};

/// Slash and colon act as separators; surrounding whitespace folds in.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[/:]\s*").unwrap());

/// Everything else outside `[A-Za-z0-9_\- ]` is dropped outright.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());

/// Sanitize a command string into a catalog filename (without extension).
pub fn command_to_filename(command: &str, replacement: &str) -> String {
    let collapsed = SEPARATORS.replace_all(command, " ");
    let cleaned = DISALLOWED.replace_all(&collapsed, "");
    cleaned
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                replacement.to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

/// Resolve the catalog path holding a device's recorded output for a command.
pub fn output_path(device: &DeviceContext, command: &str) -> Option<PathBuf> {
    device
        .offline_device_dir()
        .map(|dir| dir.join(format!("{}.txt", command_to_filename(command, "_"))))
}

/// Read a command's recorded output from the offline catalog.
///
/// The error taxonomy mirrors live execution so the two sources are
/// interchangeable to callers: a file that is not there is "could not be
/// found" (E1032), a file that cannot be loaded is "could not be
/// retrieved" (E1031), and a device with no catalog configured at all is
/// also a retrieval failure.
pub fn read_command_output(device: &DeviceContext, command: &str) -> Result<String> {
    let Some(path) = output_path(device, command) else {
        return Err(ClassifiedError::new("E1031", &[("command", command)]).log(device));
    };
    if !path.exists() {
        return Err(ClassifiedError::new("E1032", &[("command", command)]).log(device));
    }
    std::fs::read_to_string(&path)
        .map_err(|_| ClassifiedError::new("E1031", &[("command", command)]).log(device))
}
