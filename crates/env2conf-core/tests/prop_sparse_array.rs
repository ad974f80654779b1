/// Property-based tests for SparseArray and the value sanitizer.
///
/// - Length is always one past the highest index set, whatever the order.
/// - Every index never set reads back as null.
/// - Quoting any string keeps it a string, and integers survive `to_string`.
use env2conf_core::{sanitize, SparseArray, Value};
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #[test]
    fn len_is_one_past_max_index(writes in prop::collection::vec((0usize..500, any::<i64>()), 1..40)) {
        let mut a = SparseArray::new();
        for (i, v) in &writes {
            a.set(*i, Value::Integer(*v));
        }
        let max = writes.iter().map(|(i, _)| *i).max().unwrap();
        prop_assert_eq!(a.len(), max + 1);
    }

    #[test]
    fn unset_indices_read_null_and_last_write_wins(
        writes in prop::collection::vec((0usize..200, any::<i64>()), 0..40),
        probe in 0usize..400,
    ) {
        let mut a = SparseArray::new();
        let mut expected = HashMap::new();
        for (i, v) in &writes {
            a.set(*i, Value::Integer(*v));
            expected.insert(*i, *v);
        }
        match expected.get(&probe) {
            Some(v) => prop_assert_eq!(a.get(probe), &Value::Integer(*v)),
            None => prop_assert!(a.get(probe).is_null()),
        }
        prop_assert_eq!(a.len_non_empty(), expected.len());
    }

    #[test]
    fn quoted_strings_stay_strings(s in "[a-zA-Z0-9 .\\[\\]{}-]{0,20}") {
        prop_assert_eq!(sanitize(&format!("\"{s}\"")), Value::String(s));
    }

    #[test]
    fn integers_sanitize_to_integers(n in any::<i64>()) {
        prop_assert_eq!(sanitize(&n.to_string()), Value::Integer(n));
    }
}
