//! Nil-aware deep equality.

use super::{Inspect, Inspected, Shape};

/// Whether `value` is nil-like: `Nil`, `None` or a null pointer.
pub fn is_nil<T: Inspect + ?Sized>(value: &T) -> bool {
    value.shape().is_nil()
}

/// Compare two values of possibly different types.
///
/// - A nil-like operand is equal only to another nil-like operand, whatever the types.
/// - Otherwise the types must match (see [`super::type_key`]) and the contents must be
///   deeply equal: sequences element by element, mappings entry by entry regardless of
///   order.
/// - Two opaque handles of the same type at the same address are equal.
pub fn equal<A, B>(a: &A, b: &B) -> bool
where
    A: Inspect + ?Sized,
    B: Inspect + ?Sized,
{
    equal_inspected(&Inspected::of(a), &Inspected::of(b))
}

/// [`equal`] over values that were already inspected.
pub fn equal_inspected(a: &Inspected, b: &Inspected) -> bool {
    if a.is_nil() || b.is_nil() {
        return a.is_nil() && b.is_nil();
    }
    if a.type_key == b.type_key && deep_equal(&a.shape, &b.shape) {
        return true;
    }
    same_reference(&a.shape, &b.shape)
}

fn deep_equal(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Nil, Shape::Nil) => true,
        (Shape::Scalar(a), Shape::Scalar(b)) => a.type_key == b.type_key && a.key == b.key,
        (Shape::Sequence(a), Shape::Sequence(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (Shape::Mapping(a), Shape::Mapping(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, value)| {
                    b.iter()
                        .any(|(other_key, other_value)| deep_equal(key, other_key) && deep_equal(value, other_value))
                })
        }
        _ => false,
    }
}

/// Last resort for handles that cannot be looked into.
fn same_reference(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (
            Shape::Opaque { type_key: a_type, addr: a_addr },
            Shape::Opaque { type_key: b_type, addr: b_addr },
        ) => a_type == b_type && a_addr == b_addr,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Nil;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::mpsc;

    #[test]
    fn test_nil_kinds_are_equal_to_each_other() {
        assert!(equal(&Nil, &None::<String>));
        assert!(equal(&None::<Vec<u8>>, &std::ptr::null::<i32>()));
        assert!(equal(&None::<i32>, &None::<i64>));
    }

    #[test]
    fn test_nil_never_equals_non_nil() {
        assert!(!equal(&1, &Nil));
        assert!(!equal(&Nil, &2));
        assert!(!equal(&None::<Vec<i32>>, &Vec::<i32>::new()));
        assert!(!equal(&None::<HashMap<String, String>>, &HashMap::<String, String>::new()));
    }

    #[test]
    fn test_different_types_are_not_equal() {
        assert!(!equal(&1i32, &1i64));
        assert!(!equal("one", &1));
    }

    #[test]
    fn test_string_types_share_one_identity() {
        assert!(equal(&String::from("Hi Mat"), "Hi Mat"));
        assert!(equal(&std::borrow::Cow::Borrowed("x"), &String::from("x")));
        let boxed: Box<str> = Box::from("x");
        let shared: std::sync::Arc<str> = std::sync::Arc::from("x");
        assert!(equal(&boxed, &shared));
        assert!(equal(&vec![String::from("a")], &vec!["a"]));
        assert!(!equal(&String::from("Hey Mat"), "Hi Mat"));
    }

    mod a {
        #[derive(Debug)]
        pub struct Id(pub u32);
        crate::inspect_debug!(Id);
    }

    mod b {
        #[derive(Debug)]
        pub struct Id(pub u32);
        crate::inspect_debug!(Id);
    }

    #[test]
    fn test_same_short_name_from_different_modules_is_not_equal() {
        assert!(!equal(&a::Id(1), &b::Id(1)));
        assert!(equal(&a::Id(1), &a::Id(1)));
    }

    #[test]
    fn test_sequences_compare_in_order() {
        assert!(equal(&vec![1, 2, 3], &vec![1, 2, 3]));
        assert!(!equal(&vec![1, 2, 3], &vec![3, 2, 1]));
        assert!(!equal(&vec!["one", "two"], &vec!["one", "two", "three"]));
    }

    #[test]
    fn test_mappings_compare_by_key() {
        let a: HashMap<&str, i32> = [("x", 1), ("y", 2)].into_iter().collect();
        let b: HashMap<&str, i32> = [("y", 2), ("x", 1)].into_iter().collect();
        assert!(equal(&a, &b));

        let c: HashMap<&str, i32> = [("x", 1), ("y", 3)].into_iter().collect();
        assert!(!equal(&a, &c));

        let d: BTreeMap<i32, Vec<i32>> = [(1, vec![1])].into_iter().collect();
        assert!(equal(&d, &d.clone()));
    }

    #[test]
    fn test_nested_dynamic_values() {
        let a: HashMap<&str, Box<dyn Inspect>> = [("value", Box::new(1i32) as Box<dyn Inspect>)].into_iter().collect();
        let b: HashMap<&str, Box<dyn Inspect>> = [("value", Box::new(1i64) as Box<dyn Inspect>)].into_iter().collect();
        assert!(!equal(&a, &b));
    }

    #[test]
    fn test_nan_is_not_equal_to_itself() {
        assert!(!equal(&f64::NAN, &f64::NAN));
        assert!(equal(&0.5f32, &0.5f32));
    }

    #[test]
    fn test_channels_compare_by_handle() {
        let (tx, _rx) = mpsc::channel::<String>();
        let (other, _other_rx) = mpsc::channel::<String>();
        assert!(equal(&tx, &tx));
        assert!(!equal(&tx, &other));
        assert!(!equal(&None::<mpsc::Sender<String>>, &tx));
        // Endpoints are compared by their own address, not the channel's.
        assert!(!equal(&tx, &tx.clone()));
    }
}
