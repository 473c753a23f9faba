// Copyright The Sashtree Authors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A binary split-tree layout engine for dividing a workbench area among
//! panels separated by draggable sashes.

pub mod actor;
pub mod config;
pub mod log;
pub mod model;

mod collections;
