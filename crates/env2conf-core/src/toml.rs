//! TOML encoder.
//!
//! TOML table headers implicitly close the table before them, so within each
//! table every plain `key = value` line is written before any `[table]` or
//! `[[array.of.tables]]` child:
//!
//! ```text
//! name = "svc"
//! ports = [80, 443]
//!
//! [server]
//!   host = "localhost"
//!
//!   [server.tls]
//!     enabled = true
//!
//! [[items]]
//!   name = "Alice"
//! ```
//!
//! - A non-empty array whose elements are all maps becomes one `[[path]]`
//!   block per element.
//! - Any other array is written inline. Arrays of arrays and maps inside inline
//!   arrays are spread over several lines; scalar arrays stay on one line.
//! - Arrays mixing element types (null holes included) and null values are
//!   errors: TOML can express neither.

use crate::array::ElementType;
use crate::error::{ConfError, Result};
use crate::value::{Kind, Map, Value};
use std::fmt::Write;

/// Encode a document as TOML text.
pub fn encode(document: &Map) -> Result<String> {
    let mut out = String::new();
    encode_table(document, &[], 0, &mut out)?;
    Ok(out)
}

/// How a table entry is written.
enum Layout {
    /// `key = value` on a single (possibly multi-line) entry.
    Inline,
    /// `[path]` header followed by the nested table.
    Table,
    /// One `[[path]]` block per element.
    ArrayOfTables,
}

fn layout_of(value: &Value, path: &str) -> Result<Layout> {
    match value {
        Value::Map(_) => Ok(Layout::Table),
        Value::Array(array) => match array.element_type() {
            ElementType::Mixed => Err(ConfError::MixedArray {
                path: path.to_string(),
            }),
            ElementType::Uniform(Kind::Map) if !array.is_empty() => Ok(Layout::ArrayOfTables),
            ElementType::Uniform(_) => Ok(Layout::Inline),
        },
        _ => Ok(Layout::Inline),
    }
}

/// Write the body of one table: inline entries first, then child tables.
///
/// `trail` holds the encoded header components of this table; `indent` is the
/// indentation of the body lines.
fn encode_table(map: &Map, trail: &[String], indent: usize, out: &mut String) -> Result<()> {
    let pad = " ".repeat(indent);
    let mut nested = Vec::new();

    for (key, value) in map {
        let path = dotted(trail, key);
        match layout_of(value, &path)? {
            Layout::Inline => {
                out.push_str(&pad);
                out.push_str(&encode_key(key));
                out.push_str(" = ");
                encode_inline(value, &path, indent, out)?;
                out.push('\n');
            }
            layout => nested.push((key, value, layout)),
        }
    }

    for (key, value, layout) in nested {
        let mut child = trail.to_vec();
        child.push(encode_key(key));
        let header = child.join(".");
        match (layout, value) {
            (Layout::Table, Value::Map(table)) => {
                start_header(out);
                let _ = writeln!(out, "{pad}[{header}]");
                encode_table(table, &child, indent + 2, out)?;
            }
            (Layout::ArrayOfTables, Value::Array(array)) => {
                for element in array {
                    if let Value::Map(table) = element {
                        start_header(out);
                        let _ = writeln!(out, "{pad}[[{header}]]");
                        encode_table(table, &child, indent + 2, out)?;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Separate a header from whatever precedes it with one blank line.
fn start_header(out: &mut String) {
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
}

/// Write a value in inline position (right of `=` or inside an inline array).
fn encode_inline(value: &Value, path: &str, indent: usize, out: &mut String) -> Result<()> {
    match value {
        Value::Null => {
            return Err(ConfError::UnsupportedNull {
                path: path.to_string(),
            })
        }
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Float(f) => out.push_str(&format_float(*f)),
        Value::String(s) => encode_string(s, out),
        Value::Map(map) => {
            out.push('{');
            for (i, (key, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&encode_key(key));
                out.push_str(" = ");
                encode_inline(v, &format!("{path}.{key}"), indent, out)?;
            }
            out.push('}');
        }
        Value::Array(array) => {
            let multiline = match array.element_type() {
                ElementType::Mixed => {
                    return Err(ConfError::MixedArray {
                        path: path.to_string(),
                    })
                }
                ElementType::Uniform(kind) => {
                    matches!(kind, Kind::Map | Kind::Array) && !array.is_empty()
                }
            };
            out.push('[');
            let inner_pad = " ".repeat(indent + 2);
            for (i, element) in array.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                    if !multiline {
                        out.push(' ');
                    }
                }
                if multiline {
                    out.push('\n');
                    out.push_str(&inner_pad);
                }
                encode_inline(element, &format!("{path}[{i}]"), indent + 2, out)?;
            }
            if multiline {
                out.push('\n');
                out.push_str(&" ".repeat(indent));
            }
            out.push(']');
        }
    }
    Ok(())
}

/// Floats always carry a fraction or exponent so they read back as floats.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let s = f.to_string();
    if s.contains(['.', 'e', 'E']) {
        s
    } else {
        format!("{s}.0")
    }
}

/// Emit a TOML basic string.
fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Bare keys are `[A-Za-z0-9_-]+`; anything else is quoted.
fn encode_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        key.to_string()
    } else {
        let mut out = String::with_capacity(key.len() + 2);
        encode_string(key, &mut out);
        out
    }
}

fn dotted(trail: &[String], key: &str) -> String {
    let mut path = trail.join(".");
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(key);
    path
}
