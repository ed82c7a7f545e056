//! Credit movements with a running balance.

use starlog_core::effect::{EntryMeta, LedgerEntry, LedgerSink};

/// A recorded movement and the balance after it.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerLine {
  pub entry:   LedgerEntry,
  pub balance: i64,
}

#[derive(Debug, Default)]
pub struct Ledger {
  balance: i64,
  lines:   Vec<LedgerLine>,
}

impl Ledger {
  pub fn new() -> Self { Self::default() }

  pub fn balance(&self) -> i64 { self.balance }

  /// Every movement in the order it was recorded.
  pub fn entries(&self) -> &[LedgerLine] { &self.lines }

  /// Sum of positive movements.
  pub fn income(&self) -> i64 {
    self
      .lines
      .iter()
      .map(|l| l.entry.cash_delta)
      .filter(|d| *d > 0)
      .sum()
  }

  /// Sum of negative movements, as a positive number.
  pub fn expenses(&self) -> i64 {
    -self
      .lines
      .iter()
      .map(|l| l.entry.cash_delta)
      .filter(|d| *d < 0)
      .sum::<i64>()
  }
}

impl LedgerSink for Ledger {
  fn record(&mut self, entry: LedgerEntry) {
    self.balance += entry.cash_delta;
    tracing::trace!(
      id = entry.meta.id,
      delta = entry.cash_delta,
      balance = self.balance,
      "ledger"
    );
    self.lines.push(LedgerLine {
      entry,
      balance: self.balance,
    });
  }

  fn set_balance(&mut self, meta: &EntryMeta, credits: i64) {
    if credits != self.balance {
      tracing::trace!(id = meta.id, from = self.balance, to = credits, "ledger re-based");
    }
    self.balance = credits;
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use starlog_core::{EventType, effect::record_cash};

  use super::*;

  fn meta(id: i64) -> EntryMeta {
    EntryMeta {
      id,
      timestamp: Utc::now(),
      event_type: EventType::MarketBuy,
    }
  }

  #[test]
  fn running_balance_follows_rebase() {
    let mut ledger = Ledger::new();
    ledger.set_balance(&meta(1), 10_000);
    record_cash(&mut ledger, &meta(2), "fuel", -500);
    record_cash(&mut ledger, &meta(3), "bounty", 2_000);
    assert_eq!(ledger.balance(), 11_500);

    let balances: Vec<i64> = ledger.entries().iter().map(|l| l.balance).collect();
    assert_eq!(balances, [9_500, 11_500]);
    assert_eq!(ledger.income(), 2_000);
    assert_eq!(ledger.expenses(), 500);

    ledger.set_balance(&meta(4), 50_000);
    record_cash(&mut ledger, &meta(5), "repair", -1_000);
    assert_eq!(ledger.balance(), 49_000);
    assert_eq!(ledger.entries().len(), 3);
  }
}
