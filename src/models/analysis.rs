// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food image analysis result returned by the vision model.
//!
//! The reply is relayed to the client as the model wrote it. The prompt
//! asks for `food_identification`, `nutritional_information` and `recipe`,
//! or `{"food": "None"}` when the photo shows no food, but none of those
//! sections is required and unknown keys are kept.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object from the vision model, kept verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FoodAnalysis(Map<String, Value>);

impl FoodAnalysis {
    /// False only for the `{"food": "None"}` marker.
    pub fn is_food(&self) -> bool {
        !matches!(
            self.0.get("food").and_then(Value::as_str),
            Some(marker) if marker.trim().eq_ignore_ascii_case("none")
        )
    }

    /// Number of entries under `food_identification`, if present.
    pub fn item_count(&self) -> usize {
        self.0
            .get("food_identification")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}
