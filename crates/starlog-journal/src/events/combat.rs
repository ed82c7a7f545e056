//! Bounties, bonds, crimes, death and interdiction.

use serde::Deserialize;
use starlog_core::{
  effect::{
    EntryMeta, FactionStat, LedgerEffect, LedgerSink, StatsContext,
    StatsEffect, StatsSink, record_cash,
  },
  naming,
};

use super::session::RankKind;
use crate::{
  describe::Describe,
  fields::{FieldBuilder, credits, lines},
};

fn localised(fd: &str, localised: Option<&str>) -> String {
  naming::friendly(fd, localised)
}

/// A bounty target is usually a ship FD name such as `empire_eagle`.
fn target_name(fd: &str, localised: Option<&str>) -> String {
  match localised.map(str::trim) {
    Some(loc) if !loc.is_empty() => loc.to_string(),
    _ => naming::ship(fd),
  }
}

/// Strips the `$faction_` key decoration some faction names carry.
fn faction_name(fd: &str, localised: Option<&str>) -> String {
  match localised.map(str::trim) {
    Some(loc) if !loc.is_empty() => loc.to_string(),
    _ => {
      let s = naming::strip_key(fd);
      s.strip_prefix("faction_").unwrap_or(s).to_string()
    }
  }
}

// ─── Bounties and bonds ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FactionReward {
  pub faction: String,
  #[serde(rename = "Faction_Localised")]
  pub faction_localised: Option<String>,
  pub reward:  i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Bounty {
  pub rewards:                  Vec<FactionReward>,
  pub target:                   String,
  #[serde(rename = "Target_Localised")]
  pub target_localised:         Option<String>,
  pub pilot_name:               Option<String>,
  #[serde(rename = "PilotName_Localised")]
  pub pilot_name_localised:     Option<String>,
  pub total_reward:             i64,
  pub victim_faction:           String,
  #[serde(rename = "VictimFaction_Localised")]
  pub victim_faction_localised: Option<String>,
  pub shared_with_others:       Option<i64>,
  /// Single-faction form used for skimmers and on-foot kills.
  pub faction:                  Option<String>,
  pub reward:                   Option<i64>,
}

impl Bounty {
  /// Every (faction, reward) pair, whichever form the event used.
  pub fn awards(&self) -> Vec<(String, i64)> {
    if self.rewards.is_empty() {
      return match (&self.faction, self.reward) {
        (Some(faction), Some(reward)) => vec![(faction_name(faction, None), reward)],
        _ => Vec::new(),
      };
    }
    self
      .rewards
      .iter()
      .map(|r| (faction_name(&r.faction, r.faction_localised.as_deref()), r.reward))
      .collect()
  }

  pub fn total(&self) -> i64 {
    if self.total_reward != 0 {
      self.total_reward
    } else {
      self.awards().iter().map(|(_, r)| r).sum()
    }
  }
}

impl Describe for Bounty {
  fn info(&self) -> String {
    let target = target_name(&self.target, self.target_localised.as_deref());
    let pilot = self
      .pilot_name
      .as_deref()
      .map(|p| localised(p, self.pilot_name_localised.as_deref()));
    FieldBuilder::new()
      .text("", target)
      .opt_text("", pilot)
      .text(
        "Faction:",
        faction_name(&self.victim_faction, self.victim_faction_localised.as_deref()),
      )
      .credits("Reward:", self.total())
      .opt_int("Shared with", self.shared_with_others)
      .build()
  }

  fn detailed(&self) -> String {
    lines(
      "",
      self
        .awards()
        .into_iter()
        .map(|(faction, reward)| format!("{faction}: {}", credits(reward))),
    )
  }
}

impl StatsEffect for Bounty {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  ) {
    for (faction, reward) in self.awards() {
      sink.record(meta, context, FactionStat::BountyAwarded { faction, reward });
    }
  }
}

/// `FactionKillBond` and `CapShipBond`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct KillBond {
  pub reward:                    i64,
  pub awarding_faction:          String,
  #[serde(rename = "AwardingFaction_Localised")]
  pub awarding_faction_localised: Option<String>,
  pub victim_faction:            String,
  #[serde(rename = "VictimFaction_Localised")]
  pub victim_faction_localised:  Option<String>,
}

impl KillBond {
  pub fn awarding(&self) -> String {
    faction_name(&self.awarding_faction, self.awarding_faction_localised.as_deref())
  }

  pub fn victim(&self) -> String {
    faction_name(&self.victim_faction, self.victim_faction_localised.as_deref())
  }

  fn record(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
    capital_ship: bool,
  ) {
    sink.record(meta, context, FactionStat::BondAwarded {
      faction: self.awarding(),
      reward: self.reward,
      capital_ship,
    });
  }
}

impl Describe for KillBond {
  fn info(&self) -> String {
    FieldBuilder::new()
      .credits("Reward:", self.reward)
      .text("Faction:", self.awarding())
      .text("< on", self.victim())
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FactionKillBond(pub KillBond);

impl Describe for FactionKillBond {
  fn info(&self) -> String { self.0.info() }
}

impl StatsEffect for FactionKillBond {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  ) {
    self.0.record(meta, context, sink, false);
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CapShipBond(pub KillBond);

impl Describe for CapShipBond {
  fn info(&self) -> String { self.0.info() }
}

impl StatsEffect for CapShipBond {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  ) {
    self.0.record(meta, context, sink, true);
  }
}

// ─── Vouchers and fines ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VoucherFaction {
  pub faction: String,
  pub amount:  i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RedeemVoucher {
  #[serde(rename = "Type")]
  pub kind:              String,
  pub amount:            i64,
  pub faction:           Option<String>,
  pub factions:          Vec<VoucherFaction>,
  pub broker_percentage: Option<f64>,
}

impl RedeemVoucher {
  pub fn kind_name(&self) -> String { naming::split_caps(&naming::capitalise(&self.kind)) }

  /// Per-faction amounts; the single `Faction` form when no list is given.
  pub fn by_faction(&self) -> Vec<(String, i64)> {
    if self.factions.is_empty() {
      return self
        .faction
        .iter()
        .map(|f| (faction_name(f, None), self.amount))
        .collect();
    }
    self
      .factions
      .iter()
      .map(|f| (faction_name(&f.faction, None), f.amount))
      .collect()
  }
}

impl Describe for RedeemVoucher {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("Type:", self.kind_name())
      .credits("Amount:", self.amount)
      .opt_float("Broker:", self.broker_percentage, 0, "%")
      .build()
  }

  fn detailed(&self) -> String {
    lines(
      "",
      self
        .by_faction()
        .into_iter()
        .filter(|(f, _)| !f.is_empty())
        .map(|(f, amount)| format!("{f}: {}", credits(amount))),
    )
  }
}

impl LedgerEffect for RedeemVoucher {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, self.kind_name(), self.amount);
  }
}

impl StatsEffect for RedeemVoucher {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  ) {
    let kind = self.kind_name();
    for (faction, amount) in self.by_faction() {
      sink.record(meta, context, FactionStat::VoucherRedeemed {
        faction,
        kind: kind.clone(),
        amount,
      });
    }
  }
}

/// `PayFines` and `PayBounties`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Payment {
  pub amount:            i64,
  pub all_fines:         bool,
  pub faction:           Option<String>,
  #[serde(rename = "Faction_Localised")]
  pub faction_localised: Option<String>,
  #[serde(rename = "ShipID")]
  pub ship_id:           Option<u64>,
  pub broker_percentage: Option<f64>,
}

impl Payment {
  pub fn faction(&self) -> Option<String> {
    let fd = self.faction.as_deref()?;
    Some(faction_name(fd, self.faction_localised.as_deref()))
  }
}

impl Describe for Payment {
  fn info(&self) -> String {
    FieldBuilder::new()
      .credits("Amount:", self.amount)
      .opt_text("Faction:", self.faction())
      .flag("All fines", self.all_fines)
      .opt_float("Broker:", self.broker_percentage, 0, "%")
      .build()
  }
}

impl LedgerEffect for Payment {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    let note = self.faction().unwrap_or_else(|| meta.event_type.summary_name());
    record_cash(sink, meta, note, -self.amount);
  }
}

pub type PayFines = Payment;
pub type PayBounties = Payment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommitCrime {
  pub crime_type:       String,
  pub faction:          String,
  pub victim:           Option<String>,
  #[serde(rename = "Victim_Localised")]
  pub victim_localised: Option<String>,
  pub fine:             Option<i64>,
  pub bounty:           Option<i64>,
}

impl Describe for CommitCrime {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", naming::crime(&self.crime_type))
      .text("Faction:", faction_name(&self.faction, None))
      .opt_text(
        "Victim:",
        self
          .victim
          .as_deref()
          .map(|v| localised(v, self.victim_localised.as_deref())),
      )
      .opt_credits("Fine:", self.fine)
      .opt_credits("Bounty:", self.bounty)
      .build()
  }
}

impl StatsEffect for CommitCrime {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  ) {
    sink.record(meta, context, FactionStat::CrimeCommitted {
      faction: faction_name(&self.faction, None),
      fine:    self.fine.unwrap_or(0),
      bounty:  self.bounty.unwrap_or(0),
    });
  }
}

// ─── Death ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Killer {
  pub name: String,
  pub ship: String,
  pub rank: String,
}

impl Killer {
  fn display(&self) -> String {
    FieldBuilder::new()
      .text("", &self.name)
      .text("in", naming::ship(&self.ship))
      .text("", &self.rank)
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Died {
  pub killer_name:           Option<String>,
  #[serde(rename = "KillerName_Localised")]
  pub killer_name_localised: Option<String>,
  pub killer_ship:           Option<String>,
  pub killer_rank:           Option<String>,
  /// Wing kills list every attacker.
  pub killers:               Vec<Killer>,
}

impl Died {
  pub fn killers(&self) -> Vec<Killer> {
    if !self.killers.is_empty() {
      return self.killers.clone();
    }
    match &self.killer_name {
      Some(name) => vec![Killer {
        name: localised(name, self.killer_name_localised.as_deref()),
        ship: self.killer_ship.clone().unwrap_or_default(),
        rank: self.killer_rank.clone().unwrap_or_default(),
      }],
      None => Vec::new(),
    }
  }
}

impl Describe for Died {
  fn info(&self) -> String {
    let killers = self.killers();
    match killers.as_slice() {
      [] => String::new(),
      [one] => format!("Killed by {}", one.display()),
      many => format!("Killed by {} attackers", many.len()),
    }
  }

  fn detailed(&self) -> String {
    let killers = self.killers();
    if killers.len() < 2 {
      return String::new();
    }
    lines("", killers.iter().map(Killer::display))
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Resurrect {
  pub option:   String,
  pub cost:     i64,
  pub bankrupt: bool,
}

impl Describe for Resurrect {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("Option:", naming::capitalise(&self.option))
      .credits("Cost:", self.cost)
      .flag("Bankrupt", self.bankrupt)
      .build()
  }
}

impl LedgerEffect for Resurrect {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, format!("Rebuy ({})", self.option), -self.cost);
  }
}

// ─── Interdiction ────────────────────────────────────────────────────────────

/// Combat rank as written for player interdictors.
fn combat_rank(rank: Option<i64>) -> Option<String> {
  rank.map(|r| RankKind::Combat.rank_name(r))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Interdicted {
  pub submitted:             bool,
  pub interdictor:           String,
  #[serde(rename = "Interdictor_Localised")]
  pub interdictor_localised: Option<String>,
  pub is_player:             bool,
  pub combat_rank:           Option<i64>,
  pub faction:               Option<String>,
  pub power:                 Option<String>,
}

impl Describe for Interdicted {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("By", localised(&self.interdictor, self.interdictor_localised.as_deref()))
      .flag("Submitted", self.submitted)
      .flag("Player", self.is_player)
      .opt_text("Rank:", combat_rank(self.combat_rank))
      .opt_text("Faction:", self.faction.as_deref())
      .opt_text("Power:", self.power.as_deref())
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Interdiction {
  pub success:               bool,
  pub interdicted:           String,
  #[serde(rename = "Interdicted_Localised")]
  pub interdicted_localised: Option<String>,
  pub is_player:             bool,
  pub combat_rank:           Option<i64>,
  pub faction:               Option<String>,
  pub power:                 Option<String>,
}

impl Describe for Interdiction {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text(
        if self.success { "Succeeded on" } else { "Failed on" },
        localised(&self.interdicted, self.interdicted_localised.as_deref()),
      )
      .flag("Player", self.is_player)
      .opt_text("Rank:", combat_rank(self.combat_rank))
      .opt_text("Faction:", self.faction.as_deref())
      .opt_text("Power:", self.power.as_deref())
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EscapeInterdiction {
  pub interdictor:           String,
  #[serde(rename = "Interdictor_Localised")]
  pub interdictor_localised: Option<String>,
  pub is_player:             bool,
}

impl Describe for EscapeInterdiction {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("By", localised(&self.interdictor, self.interdictor_localised.as_deref()))
      .flag("Player", self.is_player)
      .build()
  }
}

// ─── Damage ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HullDamage {
  /// Remaining hull, 0.0 to 1.0.
  pub health:       f64,
  pub player_pilot: bool,
  pub fighter:      bool,
}

impl Describe for HullDamage {
  fn info(&self) -> String {
    FieldBuilder::new()
      .float("Hull Health", self.health * 100.0, 1, "%")
      .flag("Fighter", self.fighter)
      .flag("NPC Controlled", !self.player_pilot)
      .build()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn bounty_forms() {
    let ship: Bounty = serde_json::from_value(json!({
      "Rewards": [
        { "Faction": "Sirius Corporation", "Reward": 120000 },
        { "Faction": "Federation", "Reward": 5000 }
      ],
      "Target": "viper_mkiv",
      "Target_Localised": "Viper Mk IV",
      "TotalReward": 125000,
      "VictimFaction": "Dark Wheel"
    }))
    .unwrap();
    assert_eq!(ship.awards().len(), 2);
    assert_eq!(
      ship.info(),
      "Viper Mk IV, Faction: Dark Wheel, Reward: 125,000 cr"
    );

    let skimmer: Bounty = serde_json::from_value(json!({
      "Target": "Skimmer",
      "VictimFaction": "$faction_none;",
      "Faction": "$faction_Federation;",
      "Reward": 1000
    }))
    .unwrap();
    assert_eq!(skimmer.awards(), vec![("Federation".to_string(), 1000)]);
    assert_eq!(skimmer.total(), 1000);
    assert!(skimmer.info().starts_with("Skimmer"));

    let eagle: Bounty = serde_json::from_value(json!({
      "Rewards": [{ "Faction": "Lave Radio", "Reward": 8000 }],
      "Target": "empire_eagle",
      "TotalReward": 8000,
      "VictimFaction": "Lave Pirates"
    }))
    .unwrap();
    assert_eq!(eagle.info(), "Imperial Eagle, Faction: Lave Pirates, Reward: 8,000 cr");
  }

  #[test]
  fn died_wing_and_single() {
    let single: Died = serde_json::from_value(json!({
      "KillerName": "Cmdr Ravager",
      "KillerShip": "federation_corvette",
      "KillerRank": "Elite"
    }))
    .unwrap();
    assert!(single.info().starts_with("Killed by Cmdr Ravager, in "));
    assert!(single.detailed().is_empty());

    let wing: Died = serde_json::from_value(json!({
      "Killers": [
        { "Name": "A", "Ship": "viper", "Rank": "Deadly" },
        { "Name": "B", "Ship": "eagle", "Rank": "Novice" }
      ]
    }))
    .unwrap();
    assert_eq!(wing.info(), "Killed by 2 attackers");
    assert_eq!(wing.detailed().lines().count(), 2);
  }

  #[test]
  fn voucher_split() {
    let v: RedeemVoucher = serde_json::from_value(json!({
      "Type": "CombatBond",
      "Amount": 30000,
      "Factions": [{ "Faction": "A", "Amount": 10000 }, { "Faction": "B", "Amount": 20000 }]
    }))
    .unwrap();
    assert_eq!(v.kind_name(), "Combat Bond");
    assert_eq!(v.by_faction(), vec![("A".into(), 10000), ("B".into(), 20000)]);
  }
}
