//! Building a document from key/value pairs.

use crate::config::Config;
use crate::error::{ConfError, Result};
use crate::path::{self, SyntheticKeys};
use crate::render::{self, Format};
use crate::value::{Map, Value};
use std::cmp::Ordering;
use std::iter;
use tracing::{debug, trace};

/// A finished document: a map at the root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Map,
}

impl Document {
    /// Filter `pairs` by the configured prefixes and apply them in descending
    /// `KEY=VALUE` line order, stopping at the first conflict.
    pub fn build<I, K, V>(config: &Config, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut selected: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| config.matches(k))
            .collect();
        // Descending `KEY=VALUE` line order puts `a={}` before `a.b=1`, since
        // `=` sorts after `.`.
        selected.sort_by(|a, b| line_cmp(b, a));
        debug!(pairs = selected.len(), "building document");

        let mut builder = Builder::new();
        for (key, value) in &selected {
            builder.apply(key, value)?;
        }
        Ok(builder.finish())
    }

    pub fn root(&self) -> &Map {
        &self.root
    }

    pub fn into_map(self) -> Map {
        self.root
    }

    /// Look up a dotted path of plain map keys, e.g. `config.db.host`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.root.get(parts.next()?)?;
        for part in parts {
            current = current.as_map()?.get(part)?;
        }
        Some(current)
    }

    pub fn render(&self, format: Format) -> Result<String> {
        render::render(&self.root, format)
    }
}

/// Compare two pairs as the `KEY=VALUE` lines they were read from.
fn line_cmp(a: &(String, String), b: &(String, String)) -> Ordering {
    line_bytes(a).cmp(line_bytes(b))
}

fn line_bytes((key, value): &(String, String)) -> impl Iterator<Item = u8> + '_ {
    key.bytes().chain(iter::once(b'=')).chain(value.bytes())
}

/// Incremental document construction, one pair at a time, in caller order.
#[derive(Debug, Default)]
pub struct Builder {
    root: Map,
    synthetic: SyntheticKeys,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one pair. Errors name the pair that caused them.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        debug!(key, value, "apply");
        path::apply(key, value, &mut self.root, &mut self.synthetic).map_err(|source| {
            ConfError::Pair {
                key: key.to_string(),
                value: value.to_string(),
                source: Box::new(source),
            }
        })
    }

    /// Drain the side table of bracketed segments and hand back the document.
    ///
    /// The document never holds a literal `b[5]` key, so emptying the table
    /// is the whole cleanup.
    pub fn finish(mut self) -> Document {
        let drained = self.synthetic.drain();
        for (path, entry) in &drained {
            trace!(path = %path, owner = %entry.owner, key = %entry.key, "drop synthetic key");
        }
        debug!(synthetic = drained.len(), "cleanup");
        Document { root: self.root }
    }
}
