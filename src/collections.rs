// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collection aliases used throughout the crate.
//!
//! Keys are small integer handles, so the Fx hasher is used everywhere.

pub use indexmap::IndexMap;

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<K> = rustc_hash::FxHashSet<K>;

/// An insertion-ordered map using the Fx hasher.
pub type FxIndexMap<K, V> = IndexMap<K, V, rustc_hash::FxBuildHasher>;
