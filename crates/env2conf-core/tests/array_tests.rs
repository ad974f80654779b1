/// SparseArray behavior: growth on out-of-order writes, null holes, and the
/// element-type check the TOML encoder relies on.
use env2conf_core::{ElementType, Kind, SparseArray, Value};

// ============================================================================
// Set / Get / Len
// ============================================================================

#[test]
fn set_in_order() {
    let mut a = SparseArray::new();
    a.set(0, Value::from("q"));
    a.set(1, Value::from("w"));
    a.set(2, Value::from("e"));
    assert_eq!(a.len(), 3);
    assert_eq!(a.len_non_empty(), 3);
}

#[test]
fn set_out_of_order() {
    let mut a = SparseArray::new();
    a.set(30, Value::from("q"));
    a.set(11, Value::from("w"));
    a.set(18, Value::from("e"));
    a.set(1, Value::from("r"));
    assert_eq!(a.len(), 31);
    assert_eq!(a.get(30).as_str(), Some("q"));
    assert_eq!(a.get(11).as_str(), Some("w"));
    assert_eq!(a.get(18).as_str(), Some("e"));
    assert_eq!(a.get(1).as_str(), Some("r"));
    assert_eq!(a.len_non_empty(), 4);
}

#[test]
fn set_nested_arrays() {
    let mut a = SparseArray::new();
    let mut third = SparseArray::new();
    third.set(1, Value::from("d"));
    third.set(0, Value::from("c"));
    a.set(2, Value::Array(third));
    let mut first = SparseArray::new();
    first.set(1, Value::from("b"));
    first.set(0, Value::from("a"));
    a.set(0, Value::Array(first));

    assert_eq!(a.len(), 3);
    assert_eq!(a.len_non_empty(), 2);
    assert_eq!(a.get(0).as_array().map(SparseArray::len), Some(2));
    assert_eq!(a.get(2).as_array().map(SparseArray::len), Some(2));
    assert!(a.get(1).is_null());
}

#[test]
fn unset_slots_read_as_null() {
    let mut a = SparseArray::new();
    a.set(4, Value::from(1i64));
    for i in 0..4 {
        assert!(a.get(i).is_null(), "slot {i} should be a null hole");
    }
    assert!(a.get(4).as_i64() == Some(1));
}

#[test]
fn get_past_end_is_null_and_does_not_grow() {
    let a = SparseArray::new();
    assert!(a.get(100).is_null());
    assert_eq!(a.len(), 0);
    assert!(a.is_empty());
}

#[test]
fn overwrite_keeps_length() {
    let mut a = SparseArray::new();
    a.set(3, Value::from("first"));
    a.set(3, Value::from("second"));
    assert_eq!(a.len(), 4);
    assert_eq!(a.get(3).as_str(), Some("second"));
    assert_eq!(a.len_non_empty(), 1);
}

#[test]
fn slot_mut_grows_and_fills_with_null() {
    let mut a = SparseArray::new();
    *a.slot_mut(3) = Value::from("x");
    assert_eq!(a.len(), 4);
    assert_eq!(a.len_non_empty(), 1);
    assert_eq!(a.get(3).as_str(), Some("x"));
}

#[test]
fn iterator_includes_holes_and_is_restartable() {
    let mut a = SparseArray::new();
    a.set(2, Value::from(7i64));
    let first: Vec<&Value> = a.iter().collect();
    let second: Vec<&Value> = (&a).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert!(first[0].is_null() && first[1].is_null());
}

// ============================================================================
// Well-definedness and element type
// ============================================================================

#[test]
fn empty_array_is_well_defined() {
    let a = SparseArray::new();
    assert!(a.is_well_defined());
    assert_eq!(a.element_type(), ElementType::Uniform(Kind::Null));
}

#[test]
fn all_null_array_is_well_defined() {
    let mut a = SparseArray::new();
    a.set(5, Value::Null);
    assert!(a.is_well_defined());
    assert_eq!(a.len_non_empty(), 0);
}

#[test]
fn uniform_strings_are_well_defined() {
    let a: SparseArray = vec![Value::from("a"), Value::from("b")].into_iter().collect();
    assert!(a.is_well_defined());
    assert_eq!(a.element_type(), ElementType::Uniform(Kind::String));
}

#[test]
fn string_and_integer_are_mixed() {
    let mut a = SparseArray::new();
    a.set(0, Value::from("a"));
    a.set(1, Value::from(1i64));
    assert!(!a.is_well_defined());
    assert_eq!(a.element_type(), ElementType::Mixed);
    assert_eq!(a.element_type().to_string(), "mixed");
}

#[test]
fn hole_before_a_value_is_mixed() {
    let mut a = SparseArray::new();
    a.set(1, Value::from("x"));
    assert!(!a.is_well_defined());
}

#[test]
fn integer_and_float_are_mixed() {
    let a: SparseArray = vec![Value::from(1i64), Value::from(1.5)].into_iter().collect();
    assert_eq!(a.element_type(), ElementType::Mixed);
}
