//! OS-aware configuration parsing.
//!
//! Each supported network OS resolves to a parser that turns raw
//! configuration text into a line stream where every line carries its
//! chain of hierarchical parents (e.g. the interface stanza a child line
//! sits under). OS families fall into two shapes: hierarchical configs
//! where nesting is expressed by indentation (Cisco-style), and flat
//! configs where every line stands alone (Linux files, Junos display-set
//! output).

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;

/// One configuration line with its ancestor chain, outermost first.
#[derive(Debug, Clone)]
pub struct ConfigLine {
    /// The line as it appeared, trailing whitespace stripped.
    pub text: String,

    /// Ancestor lines establishing hierarchy; empty for top-level lines.
    pub parents: Vec<String>,
}

// Equality is value equality on the line text.
impl PartialEq for ConfigLine {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ConfigLine {}

impl Hash for ConfigLine {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

/// How an OS family expresses structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserStyle {
    /// Nesting by indentation depth.
    Hierarchical,

    /// Every line is top-level.
    Flat,
}

/// Parser for one network OS family.
#[derive(Debug, Clone)]
pub struct OsParser {
    style: ParserStyle,
    comment_prefixes: &'static [&'static str],
}

impl OsParser {
    const fn hierarchical(comment_prefixes: &'static [&'static str]) -> Self {
        Self {
            style: ParserStyle::Hierarchical,
            comment_prefixes,
        }
    }

    const fn flat(comment_prefixes: &'static [&'static str]) -> Self {
        Self {
            style: ParserStyle::Flat,
            comment_prefixes,
        }
    }

    fn is_comment(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        self.comment_prefixes
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
    }

    /// Parse configuration text into lines with parent chains.
    pub fn parse(&self, text: &str) -> Vec<ConfigLine> {
        match self.style {
            ParserStyle::Flat => self.parse_flat(text),
            ParserStyle::Hierarchical => self.parse_hierarchical(text),
        }
    }

    fn parse_flat(&self, text: &str) -> Vec<ConfigLine> {
        text.lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty() && !self.is_comment(line))
            .map(|line| ConfigLine {
                text: line.to_string(),
                parents: vec![],
            })
            .collect()
    }

    fn parse_hierarchical(&self, text: &str) -> Vec<ConfigLine> {
        let mut lines = Vec::new();
        // Stack of (indent, text) for the current ancestor chain.
        let mut stack: Vec<(usize, String)> = Vec::new();

        for raw in text.lines() {
            let line = raw.trim_end();
            if line.trim().is_empty() || self.is_comment(line) {
                continue;
            }
            let indent = line.len() - line.trim_start().len();
            while stack.last().is_some_and(|(depth, _)| *depth >= indent) {
                stack.pop();
            }
            lines.push(ConfigLine {
                text: line.to_string(),
                parents: stack.iter().map(|(_, text)| text.clone()).collect(),
            });
            stack.push((indent, line.to_string()));
        }
        lines
    }
}

/// Parser registry keyed by network OS token.
static PARSER_MAP: Lazy<HashMap<&'static str, OsParser>> = Lazy::new(|| {
    HashMap::from([
        ("arista_eos", OsParser::hierarchical(&["!"])),
        ("cisco_ios", OsParser::hierarchical(&["!"])),
        ("cisco_nxos", OsParser::hierarchical(&["!"])),
        ("cisco_aireos", OsParser::hierarchical(&["!"])),
        ("bigip_f5", OsParser::hierarchical(&["#"])),
        ("linux", OsParser::flat(&["#"])),
        ("juniper_junos", OsParser::flat(&["#"])),
    ])
});

/// Resolve the parser for a network OS; `None` for unsupported tokens.
pub fn parser_for(network_os: &str) -> Option<&'static OsParser> {
    PARSER_MAP.get(network_os)
}
