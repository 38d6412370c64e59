//! Registry of stable error codes and their message templates.
//!
//! Every user-facing failure in this crate is reported as
//! `"{code}: {message}"`. The codes are stable identifiers that downstream
//! log-matching relies on, so entries are never renumbered or removed.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// A registered error code entry.
///
/// `message` is a template; `{placeholder}` tokens are interpolated from
/// the key/value pairs passed to [`format_error`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorCode {
    /// Message template with `{placeholder}` interpolation tokens.
    pub message: &'static str,

    /// What the condition means.
    pub description: &'static str,

    /// How to investigate, where known.
    pub troubleshooting: Option<&'static str>,

    /// How to remediate, where known.
    pub recommendation: Option<&'static str>,
}

impl ErrorCode {
    const fn new(message: &'static str, description: &'static str) -> Self {
        Self {
            message,
            description,
            troubleshooting: None,
            recommendation: None,
        }
    }

    const fn with_guidance(
        message: &'static str,
        description: &'static str,
        troubleshooting: &'static str,
        recommendation: &'static str,
    ) -> Self {
        Self {
            message,
            description,
            troubleshooting: Some(troubleshooting),
            recommendation: Some(recommendation),
        }
    }
}

/// Sentinel code returned when a lookup uses an unregistered code.
pub const UNREGISTERED: &str = "E1XXX";

/// Global error code registry. Read-only after initialization.
static ERROR_CODES: Lazy<HashMap<&'static str, ErrorCode>> = Lazy::new(|| {
    HashMap::from([
        (
            UNREGISTERED,
            ErrorCode::new(
                "Un-registered error code used.",
                "A code path requested an error code that is not in the registry.",
            ),
        ),
        (
            "E1001",
            ErrorCode::new(
                "Did not find a valid driver in {checked_paths}, preemptively failed.",
                "No driver registration matched the platform/transport lookup paths.",
            ),
        ),
        (
            "E1002",
            ErrorCode::new(
                "The resolved driver does not support the `{method}` operation, preemptively failed.",
                "The operation is not implemented for this platform/transport combination.",
            ),
        ),
        (
            "E1003",
            ErrorCode::new(
                "The hostname {hostname} did not have an IP nor was resolvable, preemptively failed.",
                "The device hostname is neither an address nor resolvable via DNS.",
            ),
        ),
        (
            "E1004",
            ErrorCode::new(
                "Could not connect to IP: `{ip_addr}` and port: `{port}`, preemptively failed.",
                "The TCP reachability probe to the device failed.",
            ),
        ),
        (
            "E1005",
            ErrorCode::new(
                "There was no username defined, preemptively failed.",
                "The device context is missing a username.",
            ),
        ),
        (
            "E1006",
            ErrorCode::new(
                "There was no password defined, preemptively failed.",
                "The device context is missing a password.",
            ),
        ),
        (
            "E1007",
            ErrorCode::new(
                "Backup file not found at location: `{backup_file}`, preemptively failed.",
                "The actual (backup) configuration file does not exist.",
            ),
        ),
        (
            "E1008",
            ErrorCode::new(
                "Intended config file not found at location: `{intended_file}`, preemptively failed.",
                "The intended configuration file does not exist.",
            ),
        ),
        (
            "E1009",
            ErrorCode::new(
                "Unknown failure of: {error}",
                "A failure that has no more specific classification.",
            ),
        ),
        (
            "E1010",
            ErrorCode::new(
                "There was a template undefined variable error: ``{error}``",
                "The template referenced a variable that was not provided.",
            ),
        ),
        (
            "E1011",
            ErrorCode::new(
                "There was a template syntax error: ``{error}``",
                "The template source failed to parse.",
            ),
        ),
        (
            "E1012",
            ErrorCode::new(
                "Template not found: ``{error}``",
                "The named template does not exist under the configured search path.",
            ),
        ),
        (
            "E1013",
            ErrorCode::new(
                "General template error: ``{error}``",
                "A filter, test, or operation inside the template failed.",
            ),
        ),
        (
            "E1014",
            ErrorCode::new(
                "Template rendering failed with an unknown issue: `{error}`",
                "A templating failure outside the recognized categories.",
            ),
        ),
        (
            "E1015",
            ErrorCode::new(
                "The method `{method}` failed with an unexpected issue: `{error}`",
                "A driver operation failed for a reason the transport could not classify.",
            ),
        ),
        (
            "E1016",
            ErrorCode::new(
                "Failed with an unknown transport issue: `{error}`",
                "The command-execution backend reported an unclassified failure.",
            ),
        ),
        (
            "E1017",
            ErrorCode::new(
                "Failed with an authentication issue: `{error}`",
                "The device rejected the session credentials.",
            ),
        ),
        (
            "E1018",
            ErrorCode::new(
                "Failed with a timeout issue. `{error}`",
                "The command-execution backend timed out.",
            ),
        ),
        (
            "E1019",
            ErrorCode::new(
                "Discovered `% Invalid input detected at` in the output",
                "The device rejected the command even though the transport reported success.",
            ),
        ),
        (
            "E1020",
            ErrorCode::new(
                "The `{dependency}` collaborator is not available in this environment.",
                "An external collaborator required by the operation is missing.",
            ),
        ),
        (
            "E1021",
            ErrorCode::new(
                "The method `get_config` failed with an unexpected issue: `{error}`",
                "Configuration retrieval failed outside the transport layer.",
            ),
        ),
        (
            "E1022",
            ErrorCode::new(
                "The method `get_config` returned a failed result: `{error}`",
                "The backend reported a failed result for the configuration retrieval.",
            ),
        ),
        (
            "E1023",
            ErrorCode::new(
                "The API authentication failed with an unexpected issue: `{error}`",
                "The structured-API backend could not establish an authenticated session.",
            ),
        ),
        (
            "E1024",
            ErrorCode::new(
                "The `{endpoint}` endpoint failed: `{error}`",
                "One endpoint of a multi-endpoint aggregation failed, failing the whole operation.",
            ),
        ),
        (
            "E1025",
            ErrorCode::new(
                "The endpoint list for `{platform}` is empty, schema invalid.",
                "The platform profile declares an API transport but no endpoints.",
            ),
        ),
        (
            "E1026",
            ErrorCode::new(
                "Config push failed with result: `{result}`",
                "The backend accepted the push but reported a failed result.",
            ),
        ),
        (
            "E1027",
            ErrorCode::new(
                "The config merge completed, but failed to save: `{error}`",
                "Persisting the merged configuration on the device failed.",
            ),
        ),
        (
            "E1028",
            ErrorCode::new(
                "Discovered `% Incomplete command` in the output",
                "The device rejected the command even though the transport reported success.",
            ),
        ),
        (
            "E1029",
            ErrorCode::new(
                "Discovered `% Ambiguous command` in the output",
                "The device rejected the command even though the transport reported success.",
            ),
        ),
        (
            "E1030",
            ErrorCode::with_guidance(
                "Discovered `% Permission denied for the role` in the output",
                "Common permission issue, primarily seen on Cisco NXOS.",
                "Ensure the user is allowed to run the command that is being requested.",
                "If `show run` is allowed but `show running-config` is not, the actual \
                 command sent needs to be adjusted to the permitted form.",
            ),
        ),
        (
            "E1031",
            ErrorCode::with_guidance(
                "The command output file for `{command}` could not be retrieved.",
                "In offline mode, the output file for the command exists but could not be read.",
                "Check for permission issues or problems with the offline catalog checkout.",
                "Ensure the catalog is accessible and the file is readable.",
            ),
        ),
        (
            "E1032",
            ErrorCode::with_guidance(
                "The command output file for `{command}` could not be found.",
                "In offline mode, the output file for the command was not found at the expected path.",
                "Verify that the output file for the command has been generated and stored \
                 in the offline catalog.",
                "Ensure the command has been run and its output stored under the expected path.",
            ),
        ),
        (
            "E1033",
            ErrorCode::with_guidance(
                "The command output for `{command}` was empty.",
                "The command ran but returned no configuration at all.",
                "Verify that the command is valid for this device.",
                "Override the show command for this device or platform if the default \
                 does not apply.",
            ),
        ),
    ])
});

/// Matches interpolation tokens left behind after substitution.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[a-z_]+\}").unwrap());

/// Look up a registered error code, falling back to the sentinel entry.
pub fn lookup(code: &str) -> &'static ErrorCode {
    ERROR_CODES
        .get(code)
        .unwrap_or_else(|| &ERROR_CODES[UNREGISTERED])
}

/// Build the `"{code}: {message}"` string for an error code.
///
/// `args` holds `(placeholder, value)` pairs interpolated into the
/// registered message template. Placeholders are resolved against the
/// template, never against substituted values, so values containing
/// braces cannot corrupt the result; a template placeholder with no
/// matching arg degrades to a diagnostic message instead of panicking.
pub fn format_error(code: &str, args: &[(&str, &str)]) -> String {
    let entry = lookup(code);
    let mut message = entry.message.to_string();
    for placeholder in PLACEHOLDER.find_iter(entry.message) {
        let key = placeholder.as_str().trim_matches(['{', '}']);
        match args.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => message = message.replace(placeholder.as_str(), value),
            None => {
                message = format!(
                    "Error code was found, but failed to format, message expected arg `{key}`."
                );
                break;
            }
        }
    }
    format!("{code}: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_interpolates() {
        let message = format_error("E1004", &[("ip_addr", "10.0.0.1"), ("port", "22")]);
        assert_eq!(
            message,
            "E1004: Could not connect to IP: `10.0.0.1` and port: `22`, preemptively failed."
        );
    }

    #[test]
    fn test_format_error_prefixes_code() {
        for code in ["E1005", "E1006", "E1019", "E1030"] {
            assert!(format_error(code, &[]).starts_with(&format!("{code}: ")));
        }
    }

    #[test]
    fn test_unregistered_code_falls_back() {
        let message = format_error("E9999", &[]);
        assert_eq!(message, "E9999: Un-registered error code used.");
    }

    #[test]
    fn test_missing_arg_degrades() {
        let message = format_error("E1003", &[]);
        assert_eq!(
            message,
            "E1003: Error code was found, but failed to format, message expected arg `hostname`."
        );
    }

    #[test]
    fn test_braces_in_values_do_not_corrupt_formatting() {
        let message = format_error("E1009", &[("error", r#"unexpected token `{bad}`"#)]);
        assert_eq!(message, "E1009: Unknown failure of: unexpected token `{bad}`");
    }

    #[test]
    fn test_every_registered_entry_has_message() {
        for (code, entry) in ERROR_CODES.iter() {
            assert!(!entry.message.is_empty(), "{code} has an empty message");
            assert!(!entry.description.is_empty(), "{code} has an empty description");
        }
    }
}
