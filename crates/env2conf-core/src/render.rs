//! Output formats and the renderer for each.
//!
//! JSON and YAML go through serde (`serde_json`, `serde_yaml`) using the
//! `Serialize` impls on [`Value`](crate::value::Value); TOML has layout rules of
//! its own and is written by [`crate::toml`]. Every renderer returns text
//! ending in a single newline (or nothing at all for an empty TOML document).

use crate::error::{ConfError, Result};
use crate::toml;
use crate::value::Map;
use std::fmt;
use std::str::FromStr;

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Yaml,
    Toml,
}

impl FromStr for Format {
    type Err = ConfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            _ => Err(ConfError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        })
    }
}

/// Render `document` in the chosen format.
pub fn render(document: &Map, format: Format) -> Result<String> {
    match format {
        Format::Json => to_json(document),
        Format::Yaml => to_yaml(document),
        Format::Toml => toml::encode(document),
    }
}

/// Pretty-printed JSON, two spaces per level. Null holes print as `null`.
pub fn to_json(document: &Map) -> Result<String> {
    let mut out = serde_json::to_string_pretty(document)?;
    out.push('\n');
    Ok(out)
}

/// Block-style YAML behind a `---` document marker.
pub fn to_yaml(document: &Map) -> Result<String> {
    let body = serde_yaml::to_string(document)?;
    Ok(format!("---\n{body}"))
}
