//! Interpretation of the loosely-shaped `audio` and `tajweed` word fields.
//!
//! Deck authors have used several shapes for these over time, so they are
//! kept as raw JSON in [`super::Word`] and read leniently here.

use serde::Serialize;
use serde_json::Value;

/// A single tajweed rule attached to a word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TajweedRule {
  pub name: String,
  pub description: String,
}

/// Audio URL for a word: either the annotation itself as a string or its
/// `url` / `src` field.
pub fn audio_url(audio: Option<&Value>) -> Option<String> {
  let url = match audio? {
    Value::String(s) => s.as_str(),
    Value::Object(map) => map
      .get("url")
      .or_else(|| map.get("src"))
      .and_then(Value::as_str)?,
    _ => return None,
  };

  let url = url.trim();
  if url.is_empty() {
    None
  } else {
    Some(url.to_string())
  }
}

/// Tajweed rules from either a bare array or an object with a `rules` array.
pub fn tajweed_rules(tajweed: Option<&Value>) -> Vec<TajweedRule> {
  let rules = match tajweed {
    Some(Value::Array(items)) => items,
    Some(Value::Object(map)) => match map.get("rules") {
      Some(Value::Array(items)) => items,
      _ => return Vec::new(),
    },
    _ => return Vec::new(),
  };

  rules.iter().filter_map(parse_rule).collect()
}

fn parse_rule(value: &Value) -> Option<TajweedRule> {
  let map = value.as_object()?;
  let text = |keys: &[&str]| {
    keys
      .iter()
      .find_map(|k| map.get(*k).and_then(Value::as_str))
      .unwrap_or_default()
      .to_string()
  };

  let name = text(&["rule", "name"]);
  let description = text(&["description", "note"]);
  if name.is_empty() && description.is_empty() {
    return None;
  }
  Some(TajweedRule { name, description })
}
