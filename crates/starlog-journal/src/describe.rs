//! Human-readable rendering of journal events.

use serde_json::Value;

use crate::fields::FieldBuilder;

/// Text shown for one event in a log view.
pub trait Describe {
  /// One-line summary.
  fn info(&self) -> String;

  /// Multi-line supplement shown on expansion; empty when there is nothing
  /// beyond `info`.
  fn detailed(&self) -> String { String::new() }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
  fn info(&self) -> String { (**self).info() }

  fn detailed(&self) -> String { (**self).detailed() }
}

/// Summary for events without a typed body: every scalar top-level field
/// except the envelope keys, in document order.
pub fn raw_fields(json: &Value) -> String {
  let Some(obj) = json.as_object() else {
    return String::new();
  };
  obj
    .iter()
    .filter(|(key, _)| *key != "timestamp" && *key != "event")
    .fold(FieldBuilder::new(), |b, (key, value)| {
      let label = format!("{key}:");
      match value {
        Value::String(s) => b.text(&label, s),
        Value::Number(n) => b.text(&label, n.to_string()),
        Value::Bool(v) => b.text(&label, v.to_string()),
        _ => b,
      }
    })
    .build()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn raw_fields_skip_envelope_and_nested() {
    let v = json!({
      "timestamp": "2024-01-01T00:00:00Z",
      "event": "SquadronStartup",
      "SquadronName": "Iron Wing",
      "CurrentRank": 3,
      "Flags": { "a": 1 },
      "Active": true
    });
    assert_eq!(
      raw_fields(&v),
      "SquadronName: Iron Wing, CurrentRank: 3, Active: true"
    );
  }
}
