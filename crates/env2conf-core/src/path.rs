//! Dotted/bracketed key paths → nested maps and sparse arrays.
//!
//! A path like `a.b[2][0].c` is split on `.` into segments. Every segment but
//! the last is intermediate and must resolve to a map; the last one receives
//! the sanitized value. A segment with brackets names a map key whose value is
//! a [`SparseArray`], indexed by each bracketed integer in turn.
//!
//! ```
//! use env2conf_core::path::{apply, SyntheticKeys};
//! use env2conf_core::value::Map;
//!
//! let mut doc = Map::new();
//! let mut synthetic = SyntheticKeys::new();
//! apply("items[0].name", "Alice", &mut doc, &mut synthetic).unwrap();
//! apply("items[0].age", "30", &mut doc, &mut synthetic).unwrap();
//!
//! let items = doc["items"].as_array().unwrap();
//! assert_eq!(items.len(), 1);
//! assert_eq!(items.get(0).as_map().unwrap()["age"].as_i64(), Some(30));
//! ```
//!
//! Conflicts fail on the pair that introduces them:
//! - an intermediate segment that already holds a scalar or array (`ExpectedMap`)
//! - a bracketed segment whose key or nested slot is not an array (`ExpectedArray`)
//! - a terminal segment that is already defined (`DuplicateKey`)
//!
//! Input order does not matter to the rules above. The one slot that may be
//! entered twice is an array slot holding a map, so `a[0].x=1` and `a[0].y=2`
//! share the element at index 0.

use crate::array::SparseArray;
use crate::error::{ConfError, Result};
use crate::sanitize::sanitize;
use crate::value::{Kind, Map, Value};
use indexmap::IndexMap;
use std::fmt::{self, Write};
use std::num::IntErrorKind;
use tracing::trace;

/// Largest bracketed index accepted. Arrays grow to cover every index set.
pub const MAX_INDEX: usize = 100_000;

/// A bracketed intermediate segment seen while parsing, e.g. `b[5]` in
/// `a.b[5].c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticKey {
    /// Fully-qualified path of the map that owns the bracketed key.
    pub owner: String,
    /// The segment text, brackets included.
    pub key: String,
}

/// Side table of bracketed intermediate segments, keyed by canonical
/// fully-qualified path.
///
/// The document itself never holds a literal `b[5]` key; this table is how a
/// later pair learns that `a.b[5]` was already opened as a map, and it is
/// drained once after every pair has been applied.
#[derive(Debug, Default)]
pub struct SyntheticKeys {
    entries: IndexMap<String, SyntheticKey>,
}

impl SyntheticKeys {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, path: &str, owner: &str, key: &str) {
        self.entries
            .entry(path.to_string())
            .or_insert_with(|| SyntheticKey {
                owner: owner.to_string(),
                key: key.to_string(),
            });
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&SyntheticKey> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty the table, returning what it held in insertion order.
    pub fn drain(&mut self) -> Vec<(String, SyntheticKey)> {
        self.entries.drain(..).collect()
    }
}

/// One dot-delimited piece of a path: a map key plus zero or more indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub key: String,
    pub indices: Vec<usize>,
}

impl Segment {
    /// Parse `key[i0][i1]...`. Closing brackets are optional, so `b[5[3`
    /// reads the same as `b[5][3]`. Indices above [`MAX_INDEX`] fail with
    /// `IndexTooLarge`.
    ///
    /// `path` is only used to name the offending path in errors.
    pub fn parse(text: &str, path: &str) -> Result<Self> {
        let mut pieces = text.split('[');
        let key = pieces.next().unwrap_or_default().replace(']', "");
        let indices = pieces
            .map(|piece| parse_index(piece.replace(']', ""), path))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { key, indices })
    }
}

fn parse_index(token: String, path: &str) -> Result<usize> {
    match token.parse::<usize>() {
        Ok(index) if index <= MAX_INDEX => Ok(index),
        Err(err) if *err.kind() != IntErrorKind::PosOverflow => Err(ConfError::NonNumericIndex {
            path: path.to_string(),
            token,
        }),
        _ => Err(ConfError::IndexTooLarge {
            path: path.to_string(),
            index: token,
            max: MAX_INDEX,
        }),
    }
}

/// Canonical spelling, e.g. `b[5][3]` for both `b[5][3]` and `b[05[3`.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)?;
        for index in &self.indices {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

/// Set `path` to the sanitized `raw` value inside `document`.
///
/// Intermediate maps and arrays are created on demand. Bracketed intermediate
/// segments are recorded in `synthetic`.
pub fn apply(
    path: &str,
    raw: &str,
    document: &mut Map,
    synthetic: &mut SyntheticKeys,
) -> Result<()> {
    let parts: Vec<&str> = path.split('.').collect();
    let Some((terminal, intermediate)) = parts.split_last() else {
        return Ok(());
    };

    let mut cursor = document;
    // Canonical spelling of every segment consumed so far.
    let mut trail: Vec<String> = Vec::with_capacity(parts.len());
    for part in intermediate {
        let segment = Segment::parse(part, &qualify(&trail, part))?;
        let fq = qualify(&trail, &segment.to_string());
        trace!(path = %fq, "descend");
        cursor = match segment.indices.split_last() {
            Some((last, walk)) => {
                let array = index_array(cursor, &trail, &segment.key, walk)?;
                let next = open_map_slot(array, *last, &fq)?;
                synthetic.record(&fq, &trail.join("."), part);
                next
            }
            None => open_map(cursor, &segment.key, &fq)?,
        };
        trail.push(segment.to_string());
    }

    let segment = Segment::parse(terminal, path)?;
    let fq = qualify(&trail, &segment.to_string());
    let value = sanitize(raw);
    match segment.indices.split_last() {
        None => {
            if let Some(existing) = cursor.get(&segment.key) {
                return Err(ConfError::DuplicateKey {
                    path: fq,
                    existing: existing.kind(),
                    incoming: value.kind(),
                });
            }
            cursor.insert(segment.key, value);
        }
        Some((last, walk)) => {
            // Opened as a map by an earlier `path.x=...` pair.
            if synthetic.contains(&fq) {
                return Err(ConfError::DuplicateKey {
                    path: fq,
                    existing: Kind::Map,
                    incoming: value.kind(),
                });
            }
            let array = index_array(cursor, &trail, &segment.key, walk)?;
            let slot = array.slot_mut(*last);
            if !matches!(slot, Value::Null | Value::Map(_)) {
                return Err(ConfError::DuplicateKey {
                    path: fq,
                    existing: slot.kind(),
                    incoming: value.kind(),
                });
            }
            *slot = value;
        }
    }
    Ok(())
}

fn qualify(trail: &[String], last: &str) -> String {
    let mut out = String::new();
    for segment in trail {
        out.push_str(segment);
        out.push('.');
    }
    out.push_str(last);
    out
}

/// The map stored under `key`, created if absent.
fn open_map<'a>(map: &'a mut Map, key: &str, path: &str) -> Result<&'a mut Map> {
    match map
        .entry(key.to_string())
        .or_insert_with(|| Value::Map(Map::new()))
    {
        Value::Map(next) => Ok(next),
        other => Err(ConfError::ExpectedMap {
            path: path.to_string(),
            found: other.kind(),
        }),
    }
}

/// The map stored at `array[index]`, created if the slot is unset.
fn open_map_slot<'a>(array: &'a mut SparseArray, index: usize, path: &str) -> Result<&'a mut Map> {
    let slot = array.slot_mut(index);
    if slot.is_null() {
        *slot = Value::Map(Map::new());
    }
    match slot {
        Value::Map(next) => Ok(next),
        other => Err(ConfError::ExpectedMap {
            path: path.to_string(),
            found: other.kind(),
        }),
    }
}

/// Resolve `key[walk0][walk1]...` to the innermost array, creating arrays on
/// the way. The caller handles the final index.
fn index_array<'a>(
    map: &'a mut Map,
    trail: &[String],
    key: &str,
    walk: &[usize],
) -> Result<&'a mut SparseArray> {
    let mut label = qualify(trail, key);
    let mut current = match map
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(SparseArray::new()))
    {
        Value::Array(array) => array,
        other => {
            return Err(ConfError::ExpectedArray {
                path: label,
                found: other.kind(),
            })
        }
    };

    for &index in walk {
        let _ = write!(label, "[{index}]");
        let slot = current.slot_mut(index);
        if slot.is_null() {
            *slot = Value::Array(SparseArray::new());
        }
        current = match slot {
            Value::Array(inner) => inner,
            other => {
                return Err(ConfError::ExpectedArray {
                    path: label,
                    found: other.kind(),
                })
            }
        };
    }
    Ok(current)
}
