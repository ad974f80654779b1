//! Auto-growing array addressed by index, set out of order.
//!
//! Every slot past the end reads as [`Value::Null`], and setting a slot beyond
//! the end grows the array, filling the gap with nulls. The length is always
//! one more than the highest index ever set.

use crate::value::{Kind, Value};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// An ordered, zero-indexed sequence with null holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseArray {
    slots: Vec<Value>,
}

/// The element type of a [`SparseArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// Every element (holes included) has this kind.
    Uniform(Kind),
    /// Elements disagree on their kind.
    Mixed,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Uniform(kind) => kind.fmt(f),
            ElementType::Mixed => f.write_str("mixed"),
        }
    }
}

static NULL: Value = Value::Null;

impl SparseArray {
    pub fn new() -> Self {
        Self::default()
    }

    fn grow_to_fit(&mut self, index: usize) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, Value::Null);
        }
    }

    /// Overwrite the slot at `index`, growing the array if needed.
    ///
    /// # Panics
    ///
    /// Panics if the array cannot grow to `index + 1` slots, as `Vec` does.
    pub fn set(&mut self, index: usize, value: Value) {
        self.grow_to_fit(index);
        self.slots[index] = value;
    }

    /// The value at `index`, or null when the index is past the end.
    pub fn get(&self, index: usize) -> &Value {
        self.slots.get(index).unwrap_or(&NULL)
    }

    /// Grow the array to cover `index` and hand back the slot.
    pub fn slot_mut(&mut self, index: usize) -> &mut Value {
        self.grow_to_fit(index);
        &mut self.slots[index]
    }

    /// Iterate every slot in order, holes included.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots that hold something other than null.
    pub fn len_non_empty(&self) -> usize {
        self.slots.iter().filter(|v| !v.is_null()).count()
    }

    /// True when every slot has the same kind as slot 0.
    ///
    /// An empty or all-null array is well-defined: slot 0 reads as null and
    /// every other slot is null too.
    pub fn is_well_defined(&self) -> bool {
        let first = self.get(0).kind();
        self.slots.iter().all(|v| v.kind() == first)
    }

    pub fn element_type(&self) -> ElementType {
        if self.is_well_defined() {
            ElementType::Uniform(self.get(0).kind())
        } else {
            ElementType::Mixed
        }
    }
}

impl<'a> IntoIterator for &'a SparseArray {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Value> for SparseArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl Serialize for SparseArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.slots.len()))?;
        for v in &self.slots {
            seq.serialize_element(v)?;
        }
        seq.end()
    }
}

