//! Run configuration: which keys take part, and how to print the result.

use crate::render::Format;

/// Prefix list used when none is given.
pub const DEFAULT_PREFIX: &str = "config";

/// Selection and output settings for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// A pair takes part when its key starts with any of these.
    pub prefixes: Vec<String>,
    pub format: Format,
}

impl Config {
    /// Build from a comma-delimited prefix list such as `"app,db"`.
    ///
    /// An empty entry (e.g. from `""`) matches every key.
    pub fn new(prefix_list: &str, format: Format) -> Self {
        Self {
            prefixes: prefix_list
                .split(',')
                .map(|p| p.trim().to_string())
                .collect(),
            format,
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        self.prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, Format::default())
    }
}
