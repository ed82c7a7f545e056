//! Chat, wings, crew and powerplay.

use serde::Deserialize;
use starlog_core::{
  effect::{EntryMeta, LedgerEffect, LedgerSink, record_cash},
  naming,
};

use super::session::RankKind;
use crate::{describe::Describe, fields::FieldBuilder};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReceiveText {
  pub from:              String,
  #[serde(rename = "From_Localised")]
  pub from_localised:    Option<String>,
  pub message:           String,
  #[serde(rename = "Message_Localised")]
  pub message_localised: Option<String>,
  pub channel:           String,
}

impl ReceiveText {
  pub fn sender(&self) -> String {
    match self.from_localised.as_deref().map(str::trim) {
      Some(loc) if !loc.is_empty() => loc.to_string(),
      _ => self.from.clone(),
    }
  }

  /// NPC messages are localisation keys; prefer the rendered text.
  pub fn text(&self) -> String {
    match self.message_localised.as_deref().map(str::trim) {
      Some(loc) if !loc.is_empty() => loc.to_string(),
      _ => self.message.clone(),
    }
  }
}

impl Describe for ReceiveText {
  fn info(&self) -> String {
    let channel = if self.channel.is_empty() {
      String::new()
    } else {
      format!(" ({})", naming::capitalise(&self.channel))
    };
    format!("From {}{channel}: {}", self.sender(), self.text())
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SendText {
  pub to:           String,
  #[serde(rename = "To_Localised")]
  pub to_localised: Option<String>,
  pub message:      String,
  pub sent:         Option<bool>,
}

impl Describe for SendText {
  fn info(&self) -> String {
    let to = naming::friendly(&self.to, self.to_localised.as_deref());
    let mut out = format!("To {to}: {}", self.message);
    if self.sent == Some(false) {
      out.push_str(" (not sent)");
    }
    out
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WingJoin {
  pub others: Vec<String>,
}

impl Describe for WingJoin {
  fn info(&self) -> String {
    FieldBuilder::new().text("With", self.others.join(", ")).build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WingAdd {
  pub name: String,
}

impl Describe for WingAdd {
  fn info(&self) -> String { self.name.clone() }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WingLeave {}

impl Describe for WingLeave {
  fn info(&self) -> String { String::new() }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NpcCrewPaidWage {
  pub npc_crew_name: String,
  pub npc_crew_id:   Option<u64>,
  pub amount:        i64,
}

impl Describe for NpcCrewPaidWage {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.npc_crew_name)
      .credits("Amount:", self.amount)
      .build()
  }
}

// ─── NPC crew ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CrewHire {
  pub name:        String,
  #[serde(rename = "CrewID")]
  pub crew_id:     Option<u64>,
  pub faction:     String,
  pub cost:        i64,
  pub combat_rank: Option<i64>,
}

impl Describe for CrewHire {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("Hired", &self.name)
      .text("of faction", &self.faction)
      .opt_text("Rank", self.combat_rank.map(|r| RankKind::Combat.rank_name(r)))
      .nonzero_credits("Cost:", self.cost)
      .build()
  }
}

impl LedgerEffect for CrewHire {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    if self.cost != 0 {
      record_cash(sink, meta, format!("Hired {}", self.name), -self.cost);
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CrewFire {
  pub name:    String,
  #[serde(rename = "CrewID")]
  pub crew_id: Option<u64>,
}

impl Describe for CrewFire {
  fn info(&self) -> String { format!("Fired {}", self.name) }
}

// ─── Powerplay ───────────────────────────────────────────────────────────────

/// `PowerplayJoin` and `PowerplayLeave`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PowerplayMembership {
  pub power: String,
}

impl Describe for PowerplayMembership {
  fn info(&self) -> String { self.power.clone() }
}

pub type PowerplayJoin = PowerplayMembership;
pub type PowerplayLeave = PowerplayMembership;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PowerplaySalary {
  pub power:  String,
  pub amount: i64,
}

impl Describe for PowerplaySalary {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.power)
      .credits("Amount:", self.amount)
      .build()
  }
}

impl LedgerEffect for PowerplaySalary {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, format!("{} salary", self.power), self.amount);
  }
}
