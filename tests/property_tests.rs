//! Property-based tests for equality, rendering and comment recovery
//!
//! These tests use proptest to check the invariants across many randomly generated
//! inputs.

use std::collections::HashMap;

use is_harness::value::{equal, is_nil, render};
use is_harness::{Nil, SourceIndex};
use proptest::prelude::*;

// =============================================================================
// Equality Properties
// =============================================================================

proptest! {
    /// Property: a nil-like operand equals only another nil-like operand
    #[test]
    fn nil_equals_only_nil(x in any::<i64>()) {
        prop_assert!(!equal(&x, &Nil));
        prop_assert!(!equal(&Nil, &x));
        prop_assert!(!equal(&Some(x), &None::<i64>));
        prop_assert!(equal(&None::<i64>, &Nil));
        prop_assert!(is_nil(&None::<i64>));
        prop_assert!(!is_nil(&Some(x)));
    }

    /// Property: equality is symmetric and agrees with `==` for same-typed scalars
    #[test]
    fn equality_is_symmetric(a in any::<i32>(), b in any::<i32>()) {
        prop_assert_eq!(equal(&a, &b), equal(&b, &a));
        prop_assert_eq!(equal(&a, &b), a == b);
    }

    /// Property: differently typed values are never equal, even when they print the same
    #[test]
    fn different_types_never_equal(x in any::<i32>(), s in "[a-z]{0,8}") {
        prop_assert!(!equal(&x, &i64::from(x)));
        prop_assert!(!equal(&x.to_string(), &x));
        prop_assert!(equal(&s, &s.clone()));
    }

    /// Property: owned and borrowed strings share one identity
    #[test]
    fn string_types_compare_by_text(s in "[a-z]{0,8}", t in "[a-z]{0,8}") {
        prop_assert!(equal(s.as_str(), &s));
        prop_assert_eq!(equal(s.as_str(), &t), s == t);
    }

    /// Property: independently built sequences with the same elements are equal
    #[test]
    fn sequences_compare_deeply(v in prop::collection::vec(any::<u8>(), 0..16)) {
        let copy: Vec<u8> = v.iter().copied().collect();
        prop_assert!(equal(&v, &copy));

        let mut longer = copy.clone();
        longer.push(0);
        prop_assert!(!equal(&v, &longer));
    }

    /// Property: mapping equality does not depend on insertion order
    #[test]
    fn mappings_ignore_insertion_order(
        entries in prop::collection::hash_map("[a-z]{1,4}", any::<i32>(), 0..8)
    ) {
        let mut pairs: Vec<(String, i32)> = entries.iter().map(|(k, v)| (k.clone(), *v)).collect();
        pairs.reverse();
        let rebuilt: HashMap<String, i32> = pairs.into_iter().collect();
        prop_assert!(equal(&entries, &rebuilt));
    }
}

// =============================================================================
// Rendering Properties
// =============================================================================

proptest! {
    /// Property: rendering is deterministic and shows one word per element
    #[test]
    fn render_is_deterministic(v in prop::collection::vec(any::<i16>(), 0..8)) {
        prop_assert_eq!(render(&v), render(&v.clone()));
        prop_assert_eq!(render(&v).split_whitespace().count(), v.len());
    }
}

// =============================================================================
// Comment Recovery Properties
// =============================================================================

proptest! {
    /// Property: a trailing comment is recovered trimmed, on the line it was written
    #[test]
    fn trailing_comment_is_recovered(text in "[a-zA-Z0-9 ,.']{0,24}") {
        let source = format!("fn f() {{\n    is.that(x); // {text}\n}}\n");
        let index = SourceIndex::parse(&source).unwrap();
        prop_assert_eq!(index.comment_at(2), Some(text.trim()));
        prop_assert_eq!(index.comment_at(1), None);
        prop_assert_eq!(index.arguments_at(2), Some("x"));
    }
}
