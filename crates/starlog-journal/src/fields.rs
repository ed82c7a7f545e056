//! Report-line construction for `info` / `detailed` output.
//!
//! [`FieldBuilder`] joins labelled values with `", "`, silently skipping
//! anything empty so events can list every optional field without
//! branching.

use std::fmt::Write as _;

// ─── Number formatting ───────────────────────────────────────────────────────

/// `1234567` → `"1,234,567"`.
pub fn thousands(value: i64) -> String {
  let digits = value.unsigned_abs().to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
  if value < 0 {
    out.push('-');
  }
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}

/// `1234` → `"1,234 cr"`.
pub fn credits(value: i64) -> String { format!("{} cr", thousands(value)) }

/// Fixed-point rendering with an optional unit postfix.
pub fn fixed(value: f64, decimals: usize, unit: &str) -> String {
  if unit.is_empty() {
    format!("{value:.decimals$}")
  } else {
    format!("{value:.decimals$} {unit}")
  }
}

pub fn light_years(value: f64) -> String { fixed(value, 2, "ly") }

pub fn light_seconds(value: f64) -> String { fixed(value, 0, "ls") }

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Accumulates `Label value` fields into one report string.
#[derive(Debug, Default)]
pub struct FieldBuilder {
  out:      String,
  next_sep: Option<&'static str>,
}

impl FieldBuilder {
  pub fn new() -> Self { Self::default() }

  fn push(&mut self, label: &str, value: &str) {
    if !self.out.is_empty() {
      self.out.push_str(self.next_sep.unwrap_or(", "));
    }
    self.next_sep = None;
    if !label.is_empty() {
      self.out.push_str(label);
      if !label.ends_with(' ') {
        self.out.push(' ');
      }
    }
    self.out.push_str(value);
  }

  /// Text field; skipped when `value` is empty or whitespace.
  pub fn text(mut self, label: &str, value: impl AsRef<str>) -> Self {
    let value = value.as_ref().trim();
    if !value.is_empty() {
      self.push(label, value);
    }
    self
  }

  pub fn opt_text(self, label: &str, value: Option<impl AsRef<str>>) -> Self {
    match value {
      Some(v) => self.text(label, v),
      None => self,
    }
  }

  /// Integer with thousands separators; always written.
  pub fn int(mut self, label: &str, value: i64) -> Self {
    self.push(label, &thousands(value));
    self
  }

  pub fn nonzero_int(self, label: &str, value: i64) -> Self {
    if value == 0 { self } else { self.int(label, value) }
  }

  pub fn opt_int(self, label: &str, value: Option<i64>) -> Self {
    match value {
      Some(v) => self.int(label, v),
      None => self,
    }
  }

  /// Credits amount (`1,234 cr`); always written.
  pub fn credits(mut self, label: &str, value: i64) -> Self {
    self.push(label, &credits(value));
    self
  }

  pub fn nonzero_credits(self, label: &str, value: i64) -> Self {
    if value == 0 { self } else { self.credits(label, value) }
  }

  pub fn opt_credits(self, label: &str, value: Option<i64>) -> Self {
    match value {
      Some(v) => self.nonzero_credits(label, v),
      None => self,
    }
  }

  /// Float with `decimals` places and a unit postfix; always written.
  pub fn float(
    mut self,
    label: &str,
    value: f64,
    decimals: usize,
    unit: &str,
  ) -> Self {
    self.push(label, &fixed(value, decimals, unit));
    self
  }

  pub fn opt_float(
    self,
    label: &str,
    value: Option<f64>,
    decimals: usize,
    unit: &str,
  ) -> Self {
    match value {
      Some(v) => self.float(label, v, decimals, unit),
      None => self,
    }
  }

  pub fn nonzero_float(
    self,
    label: &str,
    value: f64,
    decimals: usize,
    unit: &str,
  ) -> Self {
    if value == 0.0 {
      self
    } else {
      self.float(label, value, decimals, unit)
    }
  }

  /// Writes `label` alone when `on`.
  pub fn flag(mut self, label: &str, on: bool) -> Self {
    if on {
      self.push("", label);
    }
    self
  }

  /// Start the next field on a new line instead of after a comma.
  pub fn line(mut self) -> Self {
    if !self.out.is_empty() {
      self.next_sep = Some("\n");
    }
    self
  }

  /// Append a pre-formatted block on its own line; skipped when empty.
  pub fn block(mut self, block: impl AsRef<str>) -> Self {
    let block = block.as_ref().trim_end();
    if !block.is_empty() {
      if !self.out.is_empty() {
        self.out.push('\n');
      }
      self.next_sep = None;
      self.out.push_str(block);
    }
    self
  }

  pub fn build(self) -> String { self.out }
}

/// Render `items` as one line each, `prefix` first; used for lists in
/// detailed output.
pub fn lines<I, S>(prefix: &str, items: I) -> String
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut out = String::new();
  for item in items {
    let item = item.as_ref();
    if item.is_empty() {
      continue;
    }
    if !out.is_empty() {
      out.push('\n');
    }
    let _ = write!(out, "{prefix}{item}");
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn thousands_separators() {
    assert_eq!(thousands(0), "0");
    assert_eq!(thousands(999), "999");
    assert_eq!(thousands(1000), "1,000");
    assert_eq!(thousands(1234567), "1,234,567");
    assert_eq!(thousands(-45000), "-45,000");
    assert_eq!(credits(2500), "2,500 cr");
  }

  #[test]
  fn builder_skips_empty_fields() {
    let s = FieldBuilder::new()
      .text("", "Gold")
      .text("From:", "")
      .opt_text("To:", None::<&str>)
      .int("Count:", 12)
      .nonzero_credits("Profit:", 0)
      .credits("Cost:", 120000)
      .flag("Stolen", true)
      .flag("Illegal", false)
      .build();
    assert_eq!(s, "Gold, Count: 12, Cost: 120,000 cr, Stolen");
  }

  #[test]
  fn builder_lines_and_blocks() {
    let s = FieldBuilder::new()
      .text("System:", "Sol")
      .line()
      .float("Distance:", 8.5, 2, "ly")
      .block("a\nb\n")
      .text("", "tail")
      .build();
    assert_eq!(s, "System: Sol\nDistance: 8.50 ly\na\nb, tail");
  }

  #[test]
  fn line_list() {
    assert_eq!(lines("  ", ["a", "", "b"]), "  a\n  b");
  }
}
