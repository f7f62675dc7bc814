// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Deferred Value Resolution
//!
//! Generates arbitrarily nested deferred trees (lists of lists, joins of
//! references, base64 of joins, ...) and checks that resolution turns every
//! deferred node into markup while preserving list structure.

use cim_stack_template::intrinsics::{
    resolve, AttributeLookup, Base64Encode, Deferred, Join,
};
use proptest::prelude::*;
use serde_json::Value;

const INTRINSIC_KEYS: [&str; 4] = ["Ref", "Fn::Join", "Fn::Base64", "Fn::GetAtt"];

// ============================================================================
// Property Test Strategies
// ============================================================================

fn resource_key() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{0,12}"
}

/// Literal strings, numbers and references
fn leaf() -> impl Strategy<Value = Deferred> {
    prop_oneof![
        any::<i64>().prop_map(Deferred::from),
        "[a-z0-9./-]{0,10}".prop_map(Deferred::from),
        resource_key().prop_map(|key| Deferred::reference(key).unwrap()),
    ]
}

/// Deferred trees up to a few levels deep
fn deferred() -> impl Strategy<Value = Deferred> {
    leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Deferred::List),
            prop::collection::vec(inner.clone(), 0..6)
                .prop_map(|items| Deferred::from(Join::new(items))),
            inner
                .clone()
                .prop_filter("base64 needs a value", |value| !value.is_absent())
                .prop_map(|value| Deferred::from(Base64Encode::new(value).unwrap())),
            (resource_key(), inner)
                .prop_filter("attribute needs a value", |(_, attribute)| {
                    !attribute.is_absent()
                })
                .prop_map(|(key, attribute)| {
                    Deferred::from(AttributeLookup::new(key, attribute).unwrap())
                }),
        ]
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Number of intrinsic function nodes in a deferred tree
fn intrinsic_nodes(value: &Deferred) -> usize {
    match value {
        Deferred::Literal(_) => 0,
        Deferred::List(items) => items.iter().map(intrinsic_nodes).sum(),
        Deferred::Ref(_) => 1,
        Deferred::Join(join) => 1 + join.items().iter().map(intrinsic_nodes).sum::<usize>(),
        Deferred::Base64(encode) => 1 + intrinsic_nodes(encode.resource()),
        Deferred::GetAtt(lookup) => {
            1 + intrinsic_nodes(lookup.object_key()) + intrinsic_nodes(lookup.attribute())
        }
    }
}

/// Number of intrinsic function objects in resolved JSON
fn markup_nodes(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.iter().map(markup_nodes).sum(),
        Value::Object(map) => {
            let own = usize::from(
                map.len() == 1 && map.keys().all(|key| INTRINSIC_KEYS.contains(&key.as_str())),
            );
            own + map.values().map(markup_nodes).sum::<usize>()
        }
        _ => 0,
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Resolution is deterministic
    #[test]
    fn prop_resolution_is_deterministic(value in deferred()) {
        prop_assert_eq!(resolve(&value), resolve(&value));
    }

    /// Property: Serializing a deferred value yields its resolved form
    #[test]
    fn prop_serialize_matches_resolve(value in deferred()) {
        prop_assert_eq!(serde_json::to_value(&value).unwrap(), resolve(&value));
    }

    /// Property: Lists keep their length and order
    #[test]
    fn prop_lists_resolve_element_wise(items in prop::collection::vec(deferred(), 0..8)) {
        let resolved = resolve(&Deferred::List(items.clone()));
        let array = resolved.as_array().unwrap();

        prop_assert_eq!(array.len(), items.len());
        for (item, element) in items.iter().zip(array) {
            prop_assert_eq!(&resolve(item), element);
        }
    }

    /// Property: Every Ref/Join/Base64/GetAtt node becomes exactly one
    /// intrinsic function object in the output
    #[test]
    fn prop_every_intrinsic_is_rendered(value in deferred()) {
        prop_assert_eq!(markup_nodes(&resolve(&value)), intrinsic_nodes(&value));
    }

    /// Property: Literals resolve to themselves
    #[test]
    fn prop_literals_are_identity(text in "[a-z0-9 ]{0,16}", number in any::<i64>()) {
        prop_assert_eq!(resolve(&Deferred::from(text.clone())), Value::from(text));
        prop_assert_eq!(resolve(&Deferred::from(number)), Value::from(number));
    }
}
