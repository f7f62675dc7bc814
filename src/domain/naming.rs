// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Name Normalization
//!
//! Composite builders receive mixed-case logical names (`PublicSubnetA`) and
//! turn them into hyphenated, lower-case resource names (`public-subnet-a`)
//! prefixed with the stack's base name.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of characters that are not word characters
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("valid non-word pattern"));

/// A lower-case letter or digit followed by an upper-case letter
static CASE_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid case boundary pattern"));

/// Convert a camel case name into a hyphenated, lower-case name
///
/// # Examples
///
/// ```rust
/// use cim_stack_template::domain::hyphenate;
///
/// assert_eq!(hyphenate("PublicSubnetA"), "public-subnet-a");
/// assert_eq!(hyphenate("nat gateway"), "nat-gateway");
/// ```
pub fn hyphenate(name: &str) -> String {
    let separated = NON_WORD_RE.replace_all(name, "-");
    CASE_BOUNDARY_RE
        .replace_all(&separated, "$1-$2")
        .to_lowercase()
}

/// Join a base name and a suffix with a hyphen, or return the base name alone
pub fn suffixed(base_name: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        base_name.to_string()
    } else {
        format!("{}-{}", base_name, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Vpc", "vpc")]
    #[test_case("PublicSubnetA", "public-subnet-a")]
    #[test_case("NatSubnetD", "nat-subnet-d")]
    #[test_case("web2Api", "web2-api")]
    #[test_case("ELB", "elb")]
    #[test_case("fe elb", "fe-elb")]
    #[test_case("a..b", "a-b")]
    #[test_case("snake_case", "snake_case")]
    fn test_hyphenate(input: &str, expected: &str) {
        assert_eq!(hyphenate(input), expected);
    }

    #[test]
    fn test_suffixed() {
        assert_eq!(suffixed("wc-dev-vpc", ""), "wc-dev-vpc");
        assert_eq!(suffixed("wc-dev-vpc", "igw"), "wc-dev-vpc-igw");
    }
}
