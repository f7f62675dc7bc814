// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! - `resolution` - deferred value resolution is total and structure preserving
//! - `tagging` - tag application appends, never deduplicates

mod resolution;
mod tagging;
