// src/escape.rs
//! Escaping and multi-value encoding for the properties file format.
//!
//! The downstream consumer parses the generated file with a Java-properties
//! style reader: values are escaped to printable ASCII with `\uXXXX` forms
//! (one per UTF-16 unit), and multi-value properties span physical lines
//! joined by a `,\` continuation.

use crate::logger::Logger;

/// Physical line ending understood by the consumer's parser.
pub const CRLF: &str = "\r\n";

/// Continuation joining one logical multi-value property across lines.
pub const MULTI_VALUE_SEPARATOR: &str = ",\\\r\n";

/// Target-tool version at which quoted multi-value syntax became legal.
const QUOTED_SYNTAX_VERSION: (u64, u64) = (6, 5);

/// Escapes a value for the properties file.
///
/// Backslash becomes `\\`; every UTF-16 unit outside the printable ASCII
/// range (including newline and the other control characters) becomes an
/// uppercase, zero-padded `\uXXXX` form. Total: never fails, and the output
/// contains only printable ASCII.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut buf = [0u16; 2];
    for c in text.chars() {
        if c == '\\' {
            out.push_str("\\\\");
            continue;
        }
        for &unit in c.encode_utf16(&mut buf).iter() {
            if (0x20..=0x7E).contains(&unit) {
                out.push(unit as u8 as char);
            } else {
                out.push_str(&format!("\\u{unit:04X}"));
            }
        }
    }
    out
}

/// Encodes an ordered path list as one logical multi-value property.
///
/// With a target version of 6.5 or later every path is wrapped in double
/// quotes (embedded quotes doubled), so commas inside paths are safe. Older
/// or unparseable versions cannot handle quoted syntax: comma-containing
/// paths are dropped with a single warning naming them, and the remaining
/// paths are joined unquoted.
#[must_use]
pub fn encode_multi_value(
    paths: &[String],
    target_version: Option<&str>,
    logger: &mut dyn Logger,
) -> String {
    if supports_quoted_syntax(target_version) {
        return paths
            .iter()
            .map(|p| format!("\"{}\"", p.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(MULTI_VALUE_SEPARATOR);
    }

    let (kept, dropped): (Vec<&String>, Vec<&String>) =
        paths.iter().partition(|p| !p.contains(','));

    if !dropped.is_empty() {
        let names = dropped
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        logger.warn(&format!(
            "The following paths contain invalid characters for this version \
             of SonarQube and will be excluded from this analysis: {names}"
        ));
    }

    kept.iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(MULTI_VALUE_SEPARATOR)
}

fn supports_quoted_syntax(target_version: Option<&str>) -> bool {
    parse_version(target_version.unwrap_or(""))
        .is_some_and(|v| v >= QUOTED_SYNTAX_VERSION)
}

/// Parses a dotted numeric version into (major, minor). Requires at least
/// two numeric components; anything else is unparseable.
fn parse_version(text: &str) -> Option<(u64, u64)> {
    let mut parts = text.trim().split('.');
    let major = parts.next()?.parse::<u64>().ok()?;
    let minor = parts.next()?.parse::<u64>().ok()?;
    for rest in parts {
        rest.parse::<u64>().ok()?;
    }
    Some((major, minor))
}
