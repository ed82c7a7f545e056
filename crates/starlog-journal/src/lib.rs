//! Journal-event decoder for starlog.
//!
//! Turns one JSON journal line into a typed [`JournalEntry`]: the envelope
//! (`timestamp`, `event`), a decoded [`EventBody`], human-readable text via
//! [`Describe`], and the effect views accumulators consume. Pure synchronous;
//! no file or UI dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use starlog_journal::parse_str;
//!
//! let line = r#"{"timestamp":"2024-03-01T10:00:00Z","event":"MarketBuy",
//!   "Type":"gold","Count":4,"BuyPrice":9400,"TotalCost":37600}"#;
//! let entry = parse_str(line, 1).unwrap();
//! println!("{}: {}", entry.summary_name(), entry.info());
//! ```

mod de;
pub mod describe;
mod effects;
pub mod error;
pub mod events;
pub mod fields;
mod parse;
pub mod scan;

use chrono::{DateTime, Utc};
pub use describe::Describe;
pub use error::{Error, Result};
pub use events::EventBody;
use serde_json::Value;
use starlog_core::{
  EventType,
  effect::{Effect, EntryMeta},
};

// ─── Entry ───────────────────────────────────────────────────────────────────

/// One decoded journal line.
#[derive(Debug, Clone)]
pub struct JournalEntry {
  /// Caller-assigned sequence id.
  pub id:         i64,
  pub timestamp:  DateTime<Utc>,
  pub event_type: EventType,
  pub body:       EventBody,
  /// The line as read, for fields no typed body covers.
  pub json:       Value,
}

impl JournalEntry {
  pub fn meta(&self) -> EntryMeta {
    EntryMeta {
      id:         self.id,
      timestamp:  self.timestamp,
      event_type: self.event_type.clone(),
    }
  }

  pub fn is(&self, event_type: EventType) -> bool { self.event_type == event_type }

  pub fn summary_name(&self) -> String { self.event_type.summary_name() }

  /// One-line summary. Events without a typed body list their scalar
  /// fields.
  pub fn info(&self) -> String {
    match self.body.describer() {
      Some(body) => body.info(),
      None => describe::raw_fields(&self.json),
    }
  }

  pub fn detailed(&self) -> String {
    self
      .body
      .describer()
      .map(|body| body.detailed())
      .unwrap_or_default()
  }

  pub fn effects(&self) -> Vec<Effect> { self.body.effects() }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Decode one already-parsed journal value.
///
/// Only an envelope problem (not an object, no readable `timestamp` or
/// `event`) is an error. `null` or mistyped body members read as absent;
/// a body that still cannot be decoded is kept as [`EventBody::Unparsed`].
pub fn parse_value(json: &Value, id: i64) -> Result<JournalEntry> {
  parse::parse_value(json, id)
}

/// Decode one journal line.
pub fn parse_str(input: &str, id: i64) -> Result<JournalEntry> {
  parse::parse_str(input, id)
}

/// Decode a journal file's contents, one JSON value per line.
///
/// Entries are numbered from 1 in input order, skipping blank lines. A
/// malformed line yields `Err(…)` in its position without aborting the rest.
pub fn parse_many(input: &str) -> Vec<Result<JournalEntry>> {
  parse::parse_lines(input)
}

#[cfg(test)]
mod tests;
