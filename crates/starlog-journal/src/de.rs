//! Field deserializers for journal values whose type changed between game
//! versions, and the lenient body decoder.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Copy of `value` with every `null` object member removed, at any depth.
/// Body structs default their missing fields, so a `null` reads as absent.
pub(crate) fn strip_nulls(value: &Value) -> Value {
  match value {
    Value::Object(fields) => Value::Object(
      fields
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), strip_nulls(v)))
        .collect(),
    ),
    Value::Array(items) => Value::Array(items.iter().map(strip_nulls).collect()),
    other => other.clone(),
  }
}

/// Decode an event body, treating `null` members as absent. When the body
/// still does not decode, top-level members that break it are dropped one
/// by one so the rest of the event survives; the original error is
/// returned only if nothing helps.
pub(crate) fn decode_body<T: DeserializeOwned>(json: &Value) -> serde_json::Result<T> {
  let cleaned = strip_nulls(json);
  let error = match T::deserialize(&cleaned) {
    Ok(body) => return Ok(body),
    Err(error) => error,
  };
  let Value::Object(fields) = &cleaned else {
    return Err(error);
  };

  let mut kept = Map::new();
  for (key, value) in fields {
    let mut trial = kept.clone();
    trial.insert(key.clone(), value.clone());
    let trial = Value::Object(trial);
    match T::deserialize(&trial) {
      Ok(_) => {
        if let Value::Object(trial) = trial {
          kept = trial;
        }
      }
      Err(reason) => tracing::warn!(field = %key, %reason, "dropping unreadable journal field"),
    }
  }
  T::deserialize(&Value::Object(kept)).map_err(|_| error)
}

/// An integer that older journals wrote as a string (`"Donation": "1000"`).
/// Anything unreadable becomes `None`.
pub(crate) fn int_or_string<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(de)? {
    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  })
}

/// Count of `+` (or `-`) signs in an influence or reputation trend such as
/// `"+++"`; negative for `-`.
pub(crate) fn trend_strength(trend: &str) -> i32 {
  let plus = trend.chars().filter(|c| *c == '+').count() as i32;
  let minus = trend.chars().filter(|c| *c == '-').count() as i32;
  plus - minus
}

#[cfg(test)]
mod tests {
  use serde::Deserialize;
  use serde_json::json;

  use super::*;

  #[derive(Deserialize)]
  struct Holder {
    #[serde(default, deserialize_with = "int_or_string")]
    value: Option<i64>,
  }

  #[test]
  fn accepts_both_forms() {
    let h: Holder = serde_json::from_value(json!({ "value": "1500" })).unwrap();
    assert_eq!(h.value, Some(1500));
    let h: Holder = serde_json::from_value(json!({ "value": 20 })).unwrap();
    assert_eq!(h.value, Some(20));
    let h: Holder = serde_json::from_value(json!({ "value": "lots" })).unwrap();
    assert_eq!(h.value, None);
    let h: Holder = serde_json::from_value(json!({})).unwrap();
    assert_eq!(h.value, None);
  }

  #[derive(Debug, Default, Deserialize)]
  #[serde(rename_all = "PascalCase", default)]
  struct Body {
    station_name: String,
    count:        i64,
    services:     Vec<String>,
  }

  #[derive(Debug, Deserialize)]
  struct Strict {
    #[allow(dead_code)]
    required: i64,
  }

  #[test]
  fn nulls_read_as_absent() {
    let body: Body = decode_body(&json!({
      "StationName": null,
      "Count": 4,
      "Services": ["dock", null]
    }))
    .unwrap();
    assert_eq!(body.station_name, "");
    assert_eq!(body.count, 4);
    // Nulls inside arrays are kept, and break only that member.
    assert!(body.services.is_empty());
  }

  #[test]
  fn wrong_types_fall_back_to_default() {
    let body: Body = decode_body(&json!({
      "StationName": 17,
      "Count": 4,
      "Services": "dock"
    }))
    .unwrap();
    assert_eq!(body.station_name, "");
    assert_eq!(body.count, 4);
    assert!(body.services.is_empty());

    assert!(decode_body::<Strict>(&json!({ "required": "x" })).is_err());
    assert!(decode_body::<Strict>(&json!([1])).is_err());
  }

  #[test]
  fn trends() {
    assert_eq!(trend_strength("+++"), 3);
    assert_eq!(trend_strength("--"), -2);
    assert_eq!(trend_strength(""), 0);
  }
}
