// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise illustration catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Catalog entry mapping an exercise name to its illustration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseImage {
    /// Exercise name, matched exactly against generated plans
    pub name: String,
    /// Public image URL
    pub url: String,
}

impl ExerciseImage {
    /// Document ID for a catalog entry.
    pub fn doc_id(name: &str) -> String {
        urlencoding::encode(name).into_owned()
    }
}

/// Build a name -> URL lookup from catalog entries.
///
/// Later entries win when a name appears twice.
pub fn image_map(images: Vec<ExerciseImage>) -> HashMap<String, String> {
    images.into_iter().map(|i| (i.name, i.url)).collect()
}
