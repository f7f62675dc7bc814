// Copyright (c) 2025 - Cowboy AI, Inc.
//! Template Domain Models
//!
//! Cross-cutting concepts shared by every block in a stack template:
//!
//! - [`TagSet`] - Stack-wide tags stamped onto resource bodies
//! - [`ValidationError`] - Construction-time invariant failures
//! - [`hyphenate`] - Logical name to resource name normalization

pub mod invariants;
pub mod naming;
pub mod tags;

pub use invariants::{ValidationError, ValidationResult};
pub use naming::{hyphenate, suffixed};
pub use tags::{key_value, propagate_at_launch, TagSet};
