//! Plain-text rendering for the two subcommands.

use std::fmt::Write as _;

use starlog_core::{effect::ItemKind, material::MaterialCategory};
use starlog_journal::{
  JournalEntry,
  fields::{credits, thousands},
};
use starlog_state::{MissionState, StateBuilder, stats::FactionStats};
use strum::IntoEnumIterator;

/// `timestamp  summary  info`, plus the indented detail when asked.
pub fn describe_line(entry: &JournalEntry, detailed: bool) -> String {
  let mut out = format!(
    "{}  {}  {}",
    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
    entry.summary_name(),
    entry.info()
  );
  if detailed {
    for line in entry.detailed().lines().filter(|l| !l.trim().is_empty()) {
      let _ = write!(out, "\n    {line}");
    }
  }
  out
}

fn kind_label(kind: ItemKind) -> String {
  match kind {
    ItemKind::Commodity => "Cargo".to_string(),
    ItemKind::Material(MaterialCategory::Unknown) => "Materials".to_string(),
    ItemKind::Material(category) => format!("{category} materials"),
  }
}

fn faction_line(name: &str, s: &FactionStats) -> String {
  let mut parts = Vec::new();
  if s.bounties > 0 {
    parts.push(format!("bounties {} ({})", s.bounties, credits(s.bounty_rewards)));
  }
  if s.bonds > 0 {
    parts.push(format!("bonds {} ({})", s.bonds, credits(s.bond_rewards)));
  }
  if s.missions_completed > 0 || s.missions_failed > 0 {
    parts.push(format!(
      "missions {} won / {} failed ({})",
      s.missions_completed,
      s.missions_failed,
      credits(s.mission_rewards)
    ));
  }
  if s.influence != 0 || s.reputation != 0 {
    parts.push(format!("influence {:+}, reputation {:+}", s.influence, s.reputation));
  }
  if s.crimes > 0 {
    parts.push(format!(
      "crimes {} (fines {}, bounties {})",
      s.crimes,
      credits(s.fines),
      credits(s.bounties_incurred)
    ));
  }
  if s.goods_bought > 0 {
    parts.push(format!("bought {} t for {}", thousands(s.goods_bought), credits(s.purchase_cost)));
  }
  if s.goods_sold > 0 {
    parts.push(format!("sold {} t, profit {}", thousands(s.goods_sold), credits(s.trade_profit)));
  }
  if s.vouchers_redeemed > 0 {
    parts.push(format!("vouchers {}", credits(s.vouchers_redeemed)));
  }
  if s.exploration_sold > 0 {
    parts.push(format!("exploration {}", credits(s.exploration_sold)));
  }
  format!("{name}: {}", parts.join(", "))
}

/// Everything the state builder accumulated.
pub fn totals(state: &StateBuilder) -> String {
  let mut out = String::new();
  let ledger = &state.ledger;
  let _ = writeln!(
    out,
    "Balance: {} (income {}, expenses {})",
    credits(ledger.balance()),
    credits(ledger.income()),
    credits(ledger.expenses())
  );

  for kind in state.inventory.kinds() {
    let _ = writeln!(
      out,
      "{}: {}",
      kind_label(kind),
      thousands(state.inventory.total(kind))
    );
    for item in state.inventory.items(kind) {
      let _ = write!(out, "  {} {}", item.name, thousands(item.count));
      if item.average_price > 0 {
        let _ = write!(out, " (avg {})", credits(item.average_price));
      }
      out.push('\n');
    }
  }

  let counts: Vec<String> = MissionState::iter()
    .map(|s| format!("{s} {}", state.missions.count(s)))
    .collect();
  let _ = writeln!(out, "Missions: {}", counts.join(", "));

  let carrier = &state.carrier;
  if carrier.is_known() {
    let _ = write!(out, "Carrier: {}", carrier.callsign);
    if !carrier.name.is_empty() {
      let _ = write!(out, " \"{}\"", carrier.name);
    }
    if let Some(system) = &carrier.system {
      let _ = write!(out, " at {system}");
    }
    let _ = write!(
      out,
      ", fuel {} t, balance {}, {} jumps",
      carrier.fuel,
      credits(carrier.balance),
      carrier.jumps
    );
    if let Some(jump) = &carrier.pending_jump {
      let _ = write!(out, ", jumping to {}", jump.system);
    }
    if carrier.pending_decommission() {
      out.push_str(", decommissioning");
    }
    out.push('\n');
  }

  let mut systems = state.stats.systems().peekable();
  if systems.peek().is_some() {
    out.push_str("Factions:\n");
  }
  for system in systems {
    let _ = writeln!(out, "  {system}");
    for (faction, stats) in state.stats.factions_in(system) {
      let _ = writeln!(out, "    {}", faction_line(faction, stats));
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use starlog_journal::parse_many;

  use super::*;

  const SESSION: &str = r#"
{"timestamp":"2024-03-01T10:00:00Z","event":"LoadGame","Credits":1000}
{"timestamp":"2024-03-01T10:00:05Z","event":"Docked","StarSystem":"Lave","StationName":"Lave Station","StationFaction":{"Name":"Lave Radio"}}
{"timestamp":"2024-03-01T10:02:00Z","event":"MarketBuy","Type":"gold","Count":2,"BuyPrice":300,"TotalCost":600}
{"timestamp":"2024-03-01T10:03:00Z","event":"CarrierBuy","CarrierID":1,"Callsign":"ABC-123","Location":"Lave","Price":100}
"#;

  fn state() -> StateBuilder {
    let entries: Vec<JournalEntry> =
      parse_many(SESSION).into_iter().map(|r| r.unwrap()).collect();
    let mut state = StateBuilder::new();
    state.apply_all(&entries);
    state
  }

  #[test]
  fn describe_adds_indented_detail() {
    let entry = starlog_journal::parse_str(
      r#"{"timestamp":"2024-03-01T10:00:00Z","event":"MarketSell","Type":"gold","Count":1,"SellPrice":10,"TotalSale":10,"AvgPricePaid":4}"#,
      1,
    )
    .unwrap();
    let line = describe_line(&entry, true);
    let mut lines = line.lines();
    assert!(lines.next().unwrap().starts_with("2024-03-01 10:00:00  Market Sell  Gold, 1"));
    assert_eq!(lines.next(), Some("    Average paid: 4 cr, Profit per unit: 6 cr"));
    assert!(!describe_line(&entry, false).contains('\n'));
  }

  #[test]
  fn totals_cover_each_accumulator() {
    let text = totals(&state());
    assert!(text.starts_with("Balance: 300 cr (income 0 cr, expenses 700 cr)\n"));
    assert!(text.contains("Cargo: 2\n  Gold 2 (avg 300 cr)\n"));
    assert!(text.contains("Missions: Active 0, Completed 0, Failed 0, Abandoned 0\n"));
    assert!(text.contains("Carrier: ABC-123 at Lave"));
    assert!(text.contains("  Lave\n    Lave Radio: bought 2 t for 600 cr\n"));
  }
}
