//! Envelope decoding: `timestamp` and `event`, then the typed body.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use starlog_core::{Error as CoreError, EventType};

use crate::{JournalEntry, error::Result, events::EventBody};

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
  if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
    return Ok(ts.with_timezone(&Utc));
  }
  // Some third-party tools strip the zone suffix.
  NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
    .map(|naive| naive.and_utc())
    .map_err(|_| {
      CoreError::InvalidTimestamp {
        value: value.to_string(),
      }
      .into()
    })
}

pub(crate) fn parse_value(json: &Value, id: i64) -> Result<JournalEntry> {
  let obj = json.as_object().ok_or(CoreError::NotAnObject)?;

  let timestamp = obj
    .get("timestamp")
    .and_then(Value::as_str)
    .ok_or(CoreError::MissingField("timestamp"))?;
  let timestamp = parse_timestamp(timestamp)?;

  let name = obj
    .get("event")
    .and_then(Value::as_str)
    .ok_or(CoreError::MissingField("event"))?;
  let event_type = EventType::from_name(name);

  let body = match EventBody::decode(&event_type, json) {
    Ok(EventBody::Unknown) => {
      tracing::debug!(id, event = name, "unknown journal event");
      EventBody::Unknown
    }
    Ok(body) => body,
    Err(error) => {
      tracing::warn!(id, event = name, %error, "journal event body did not decode");
      EventBody::Unparsed
    }
  };

  Ok(JournalEntry {
    id,
    timestamp,
    event_type,
    body,
    json: json.clone(),
  })
}

pub(crate) fn parse_str(input: &str, id: i64) -> Result<JournalEntry> {
  let json: Value = serde_json::from_str(input)?;
  parse_value(&json, id)
}

/// One JSON value per non-blank line.
pub(crate) fn parse_lines(input: &str) -> Vec<Result<JournalEntry>> {
  input
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .zip(1..)
    .map(|(line, id)| parse_str(line, id))
    .collect()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::error::Error;

  #[test]
  fn envelope_errors() {
    let err = parse_value(&json!([1, 2]), 1).unwrap_err();
    assert!(matches!(err, Error::Core(CoreError::NotAnObject)));

    let err = parse_value(&json!({ "event": "Docked" }), 1).unwrap_err();
    assert!(matches!(
      err,
      Error::Core(CoreError::MissingField("timestamp"))
    ));

    let err = parse_value(
      &json!({ "timestamp": "yesterday", "event": "Docked" }),
      1,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Core(CoreError::InvalidTimestamp { .. })));

    let err = parse_value(
      &json!({ "timestamp": "2024-03-01T10:00:00Z", "event": 5 }),
      1,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Core(CoreError::MissingField("event"))));

    assert!(matches!(parse_str("{ not json", 1), Err(Error::Json(_))));
  }

  #[test]
  fn zone_less_timestamp_is_utc() {
    let ts = parse_timestamp("2024-03-01T10:00:00").unwrap();
    assert_eq!(ts.to_rfc3339(), "2024-03-01T10:00:00+00:00");
  }

  #[test]
  fn mistyped_member_does_not_sink_the_body() {
    let entry = parse_value(
      &json!({
        "timestamp": "2024-03-01T10:00:00Z",
        "event": "MarketBuy",
        "Type": "gold",
        "Count": "lots"
      }),
      7,
    )
    .unwrap();
    assert_eq!(entry.event_type, EventType::MarketBuy);
    let EventBody::MarketBuy(buy) = &entry.body else {
      panic!("expected a MarketBuy body");
    };
    assert_eq!(buy.commodity, "gold");
    assert_eq!(buy.count, 0);
    assert_eq!(entry.id, 7);
  }

  #[test]
  fn lines_numbered_from_one_and_errors_kept_in_place() {
    let input = "\
{\"timestamp\":\"2024-03-01T10:00:00Z\",\"event\":\"Shutdown\"}

garbage
{\"timestamp\":\"2024-03-01T10:05:00Z\",\"event\":\"Fileheader\"}
";
    let entries = parse_lines(input);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].as_ref().unwrap().id, 1);
    assert!(entries[1].is_err());
    assert_eq!(entries[2].as_ref().unwrap().id, 3);
  }
}
