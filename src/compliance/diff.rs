//! Section extraction and line-level configuration diffing.

use std::collections::HashSet;

use super::parser::OsParser;

/// Extract the section of a configuration belonging to a feature.
///
/// A line belongs to the section if it prefix-matches one of the section
/// starts, or if it is hierarchically nested under a line already in the
/// section. Matching is stateful and sequential: a prefix match opens the
/// section, nested lines stay in it, and a top-level line closes it unless
/// it opens a new match itself. Empty `prefixes` selects the entire text.
pub fn section_config(prefixes: &[String], device_cfg: &str, parser: &OsParser) -> String {
    if prefixes.is_empty() {
        return device_cfg.to_string();
    }

    let mut matched = false;
    let mut section: Vec<String> = Vec::new();
    for line in parser.parse(device_cfg) {
        if matched {
            if !line.parents.is_empty() {
                section.push(line.text);
                continue;
            }
            matched = false;
        }
        for prefix in prefixes {
            if !matched && line.text.starts_with(prefix.as_str()) {
                section.push(line.text.clone());
                matched = true;
            }
        }
    }
    section.join("\n").trim().to_string()
}

/// Identify the lines in `compare` that are absent from `base`.
///
/// Each absent line is emitted preceded by any of its parents not already
/// emitted, so hierarchical context survives into the diff.
pub fn config_difference(compare: &str, base: &str, parser: &OsParser) -> String {
    let base_lines: Vec<_> = parser.parse(base);
    let base_set: HashSet<&str> = base_lines.iter().map(|line| line.text.as_str()).collect();

    let mut needed: Vec<String> = Vec::new();
    for line in parser.parse(compare) {
        if !base_set.contains(line.text.as_str()) {
            for parent in &line.parents {
                if !needed.contains(parent) {
                    needed.push(parent.clone());
                }
            }
            needed.push(line.text);
        }
    }
    needed.join("\n")
}

/// Secondary order scan over two section texts.
///
/// Returns whether every line is present ignoring order, plus the pairwise
/// mismatches when the line counts are equal; the pairs exist purely for
/// diagnostic detail.
pub fn find_unordered_lines(intended: &str, actual: &str) -> (bool, Vec<(String, String)>) {
    let intended_lines: Vec<&str> = intended.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let mut unordered_pairs = Vec::new();
    if intended_lines.len() == actual_lines.len() {
        unordered_pairs = intended_lines
            .iter()
            .zip(actual_lines.iter())
            .filter(|(left, right)| left != right)
            .map(|(left, right)| (left.to_string(), right.to_string()))
            .collect();
    }

    let actual_set: HashSet<&str> = actual_lines.iter().copied().collect();
    let all_present = intended_lines
        .iter()
        .all(|line| actual_set.contains(line));
    (all_present, unordered_pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::parser::parser_for;

    const DEVICE_CFG: &str = "\
router bgp 100
 bgp router-id 10.6.6.5
snmp-server packetsize 4096
access-list 1 permit 10.22.142.132
access-list 1 permit 10.22.143.189";

    #[test]
    fn test_section_extraction_with_children() {
        let parser = parser_for("cisco_ios").unwrap();
        let section = section_config(&["router bgp ".to_string()], DEVICE_CFG, parser);
        assert_eq!(section, "router bgp 100\n bgp router-id 10.6.6.5");
    }

    #[test]
    fn test_section_multiple_prefixes() {
        let parser = parser_for("cisco_ios").unwrap();
        let section = section_config(
            &["snmp-server".to_string(), "access-list".to_string()],
            DEVICE_CFG,
            parser,
        );
        assert_eq!(
            section,
            "snmp-server packetsize 4096\n\
             access-list 1 permit 10.22.142.132\n\
             access-list 1 permit 10.22.143.189"
        );
    }

    #[test]
    fn test_section_empty_prefixes_selects_everything() {
        let parser = parser_for("cisco_ios").unwrap();
        assert_eq!(section_config(&[], DEVICE_CFG, parser), DEVICE_CFG);
    }

    #[test]
    fn test_section_absent_feature_is_empty() {
        let parser = parser_for("cisco_ios").unwrap();
        assert_eq!(section_config(&["ntp".to_string()], DEVICE_CFG, parser), "");
    }

    #[test]
    fn test_difference_complementarity() {
        let parser = parser_for("cisco_ios").unwrap();
        let intended = "ntp server 10.10.10.10\nntp server 10.10.10.11";
        let actual = "ntp server 10.10.10.10\nntp server 192.168.0.1";

        let missing = config_difference(intended, actual, parser);
        let extra = config_difference(actual, intended, parser);
        assert_eq!(missing, "ntp server 10.10.10.11");
        assert_eq!(extra, "ntp server 192.168.0.1");
    }

    #[test]
    fn test_difference_preserves_parent_context() {
        let parser = parser_for("cisco_ios").unwrap();
        let intended = "interface GigabitEthernet0/1\n description Uplink to Core";
        let actual = "interface GigabitEthernet0/1";

        let missing = config_difference(intended, actual, parser);
        assert_eq!(
            missing,
            "interface GigabitEthernet0/1\n description Uplink to Core"
        );
    }

    #[test]
    fn test_find_unordered_lines_reordered() {
        let intended = "ntp server 10.10.10.10\nntp server 10.10.10.11\nntp server 10.10.10.12";
        let actual = "ntp server 10.10.10.12\nntp server 10.10.10.11\nntp server 10.10.10.10";

        let (all_present, pairs) = find_unordered_lines(intended, actual);
        assert!(all_present);
        assert_eq!(
            pairs,
            vec![
                (
                    "ntp server 10.10.10.10".to_string(),
                    "ntp server 10.10.10.12".to_string()
                ),
                (
                    "ntp server 10.10.10.12".to_string(),
                    "ntp server 10.10.10.10".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_find_unordered_lines_divergent_content() {
        let (all_present, _) =
            find_unordered_lines("ntp server 10.0.0.1", "ntp server 10.0.0.9");
        assert!(!all_present);
    }
}
