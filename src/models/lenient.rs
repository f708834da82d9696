// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tolerant deserializers for model-generated JSON.
//!
//! Language models are asked for plain numbers but regularly answer with
//! `"30g"`, `"350 kcal"` or `"3"`. These helpers accept numbers, numeric
//! strings with units, and `null`, falling back to zero/empty instead of
//! rejecting the whole plan.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Extract the first decimal number found in `text`.
///
/// `"30g"` -> 30.0, `"approx. 12.5 g"` -> 12.5, `"none"` -> None.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let negative = text[..start].ends_with('-');
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(|c| *c != ',')
        .collect();
    let value: f64 = digits.trim_end_matches('.').parse().ok()?;
    Some(if negative { -value } else { value })
}

fn value_to_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_leading_number(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Deserialize a number that may arrive as a string with units.
pub fn f64_from_any<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(value_to_f64).unwrap_or(0.0))
}

/// Deserialize a non-negative count (sets, reps, day numbers).
pub fn u32_from_any<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = f64_from_any(deserializer)?;
    if n.is_finite() && n > 0.0 {
        Ok(n.round().min(u32::MAX as f64) as u32)
    } else {
        Ok(0)
    }
}

/// Deserialize a display string that may arrive as a number or `null`.
pub fn string_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Deserialize a list of strings, accepting a single comma-separated string.
pub fn strings_from_any<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "f64_from_any")]
        grams: f64,
        #[serde(default, deserialize_with = "u32_from_any")]
        sets: u32,
        #[serde(default, deserialize_with = "string_from_any")]
        time: String,
        #[serde(default, deserialize_with = "strings_from_any")]
        tags: Vec<String>,
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("30g"), Some(30.0));
        assert_eq!(parse_leading_number("approx. 12.5 g"), Some(12.5));
        assert_eq!(parse_leading_number("1,850 kcal"), Some(1850.0));
        assert_eq!(parse_leading_number("-5"), Some(-5.0));
        assert_eq!(parse_leading_number("Protein content"), None);
    }

    #[test]
    fn test_numbers_and_strings_accepted() {
        let s: Sample = serde_json::from_str(
            r#"{"grams": "45g", "sets": "3", "time": 30, "tags": "Chest, Triceps"}"#,
        )
        .unwrap();
        assert_eq!(s.grams, 45.0);
        assert_eq!(s.sets, 3);
        assert_eq!(s.time, "30");
        assert_eq!(s.tags, vec!["Chest", "Triceps"]);
    }

    #[test]
    fn test_nulls_and_missing_default() {
        let s: Sample = serde_json::from_str(r#"{"grams": null, "time": null}"#).unwrap();
        assert_eq!(s.grams, 0.0);
        assert_eq!(s.sets, 0);
        assert_eq!(s.time, "");
        assert!(s.tags.is_empty());
    }

    #[test]
    fn test_negative_count_clamps_to_zero() {
        let s: Sample = serde_json::from_str(r#"{"sets": -2}"#).unwrap();
        assert_eq!(s.sets, 0);
    }
}
