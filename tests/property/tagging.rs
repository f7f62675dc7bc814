// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Tag Application

use cim_stack_template::domain::{propagate_at_launch, TagSet};
use proptest::prelude::*;
use serde_json::json;

fn tag_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[a-z]{1,8}", "[a-z0-9-]{0,12}", 0..6)
        .prop_map(|tags| tags.into_iter().collect())
}

proptest! {
    /// Property: Applying a tag set n times appends n copies of every tag
    #[test]
    fn prop_tags_accumulate(pairs in tag_pairs(), times in 1usize..4) {
        let tags = TagSet::new(pairs.clone());
        let mut body = json!({ "Type": "AWS::EC2::VPC" });
        for _ in 0..times {
            tags.apply(&mut body).unwrap();
        }

        let applied = body["Properties"]["Tags"].as_array().unwrap();
        prop_assert_eq!(applied.len(), pairs.len() * times);
    }

    /// Property: Existing tags stay first and in order
    #[test]
    fn prop_existing_tags_are_preserved(pairs in tag_pairs()) {
        let mut body = json!({
            "Properties": { "Tags": [ { "Key": "Name", "Value": "wc" } ] }
        });
        TagSet::new(pairs.clone()).apply(&mut body).unwrap();

        let applied = body["Properties"]["Tags"].as_array().unwrap();
        prop_assert_eq!(&applied[0], &json!({ "Key": "Name", "Value": "wc" }));
        for (tag, (key, value)) in applied[1..].iter().zip(&pairs) {
            prop_assert_eq!(tag, &json!({ "Key": key, "Value": value }));
        }
    }

    /// Property: The launch transform marks every tag for propagation
    #[test]
    fn prop_propagate_at_launch(pairs in tag_pairs()) {
        let mut body = json!({});
        TagSet::new(pairs).apply_with(&mut body, propagate_at_launch).unwrap();

        let applied = body["Properties"]["Tags"].as_array().unwrap();
        prop_assert!(applied.iter().all(|tag| tag["PropagateAtLaunch"] == true));
    }
}
