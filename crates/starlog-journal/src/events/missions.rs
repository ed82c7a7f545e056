//! Mission lifecycle events.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use starlog_core::{
  effect::{
    CommodityEffect, EntryMeta, FactionStat, InventorySink, ItemKind,
    LedgerEffect, LedgerSink, MaterialEffect, MissionEffect, MissionRecord,
    MissionSink, MissionUpdate, StatsContext, StatsEffect, StatsSink,
    record_cash,
  },
  material::{MaterialCategory, material_info, material_name},
  naming,
};

use super::{
  materials::material_key,
  trade::{commodity_key, commodity_name},
};
use crate::{
  de::{int_or_string, trend_strength},
  describe::Describe,
  fields::{FieldBuilder, lines},
};

/// Mission title: the localised name when given, else derived from the FD
/// name.
fn mission_title(name: &str, localised: Option<&str>) -> String {
  match localised.map(str::trim) {
    Some(loc) if !loc.is_empty() => loc.to_string(),
    _ => naming::mission(name),
  }
}

// ─── Accepted ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MissionAccepted {
  pub faction:                String,
  pub name:                   String,
  pub localised_name:         Option<String>,
  #[serde(rename = "MissionID")]
  pub mission_id:             u64,
  pub commodity:              Option<String>,
  #[serde(rename = "Commodity_Localised")]
  pub commodity_localised:    Option<String>,
  pub count:                  Option<i64>,
  pub target:                 Option<String>,
  pub target_type:            Option<String>,
  #[serde(rename = "TargetType_Localised")]
  pub target_type_localised:  Option<String>,
  pub target_faction:         Option<String>,
  pub kill_count:             Option<i64>,
  pub destination_system:     Option<String>,
  pub destination_station:    Option<String>,
  pub destination_settlement: Option<String>,
  pub expiry:                 Option<DateTime<Utc>>,
  pub wing:                   bool,
  pub influence:              Option<String>,
  pub reputation:             Option<String>,
  #[serde(deserialize_with = "int_or_string")]
  pub reward:                 Option<i64>,
  pub passenger_count:        Option<i64>,
  #[serde(rename = "PassengerVIPs")]
  pub passenger_vips:         bool,
  pub passenger_wanted:       bool,
  pub passenger_type:         Option<String>,
  #[serde(deserialize_with = "int_or_string")]
  pub donation:               Option<i64>,
}

impl MissionAccepted {
  pub fn title(&self) -> String {
    mission_title(&self.name, self.localised_name.as_deref())
  }

  pub fn commodity_name(&self) -> Option<String> {
    let fd = self.commodity.as_deref()?;
    Some(commodity_name(fd, self.commodity_localised.as_deref()))
  }

  pub fn record(&self) -> MissionRecord {
    MissionRecord {
      mission_id:          self.mission_id,
      name:                self.name.clone(),
      display_name:        self.title(),
      faction:             self.faction.clone(),
      accepted:            None,
      expiry:              self.expiry,
      destination_system:  self.destination_system.clone(),
      destination_station: self.destination_station.clone(),
      reward:              self.reward,
      commodity:           self.commodity_name(),
      count:               self.count,
      kill_count:          self.kill_count,
      passengers:          self.passenger_count,
      wing:                self.wing,
    }
  }
}

impl Describe for MissionAccepted {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", self.title())
      .text("", &self.faction)
      .opt_credits("Reward:", self.reward)
      .opt_text("To", self.destination_system.as_deref())
      .opt_text("", self.destination_station.as_deref())
      .opt_text(
        "Expiry:",
        self.expiry.map(|e| e.format("%Y-%m-%d %H:%M").to_string()),
      )
      .flag("Wing", self.wing)
      .build()
  }

  fn detailed(&self) -> String {
    let target = match (&self.target_type, &self.target_type_localised) {
      (_, Some(loc)) if !loc.trim().is_empty() => Some(loc.clone()),
      (Some(fd), _) => Some(naming::split_caps(naming::strip_key(fd))),
      _ => None,
    };
    FieldBuilder::new()
      .opt_text("Commodity:", self.commodity_name())
      .opt_int("Count:", self.count)
      .opt_text("Target:", self.target.as_deref())
      .opt_text("Type:", target)
      .opt_text("Target Faction:", self.target_faction.as_deref())
      .opt_int("Kill Count:", self.kill_count)
      .line()
      .opt_int("Passengers:", self.passenger_count)
      .opt_text("Passenger Type:", self.passenger_type.as_deref())
      .flag("VIP", self.passenger_vips)
      .flag("Wanted", self.passenger_wanted)
      .line()
      .opt_text("Influence:", self.influence.as_deref())
      .opt_text("Reputation:", self.reputation.as_deref())
      .opt_credits("Donation:", self.donation)
      .build()
  }
}

impl MissionEffect for MissionAccepted {
  fn missions(&self, meta: &EntryMeta, sink: &mut dyn MissionSink) {
    let mut record = self.record();
    record.accepted = Some(meta.timestamp);
    sink.update(meta, MissionUpdate::Accepted(Box::new(record)));
  }
}

// ─── Completed ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommodityReward {
  pub name:           String,
  #[serde(rename = "Name_Localised")]
  pub name_localised: Option<String>,
  pub count:          i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MaterialReward {
  pub name:           String,
  #[serde(rename = "Name_Localised")]
  pub name_localised: Option<String>,
  pub category:       String,
  pub count:          i64,
}

impl MaterialReward {
  fn category(&self) -> MaterialCategory {
    match MaterialCategory::from_journal(&self.category) {
      MaterialCategory::Unknown => {
        material_info(&self.name).map(|i| i.category).unwrap_or_default()
      }
      category => category,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InfluenceEffect {
  pub system_address: Option<u64>,
  pub trend:          String,
  pub influence:      String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StateEffect {
  pub effect:           String,
  #[serde(rename = "Effect_Localised")]
  pub effect_localised: Option<String>,
  pub trend:            String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FactionEffect {
  pub faction:          String,
  pub effects:          Vec<StateEffect>,
  pub influence:        Vec<InfluenceEffect>,
  pub reputation_trend: String,
  pub reputation:       String,
}

impl FactionEffect {
  pub fn influence_strength(&self) -> i32 {
    self.influence.iter().map(|i| trend_strength(&i.influence)).sum()
  }

  pub fn reputation_strength(&self) -> i32 { trend_strength(&self.reputation) }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MissionCompleted {
  pub faction:             String,
  pub name:                String,
  pub localised_name:      Option<String>,
  #[serde(rename = "MissionID")]
  pub mission_id:          u64,
  pub commodity:           Option<String>,
  #[serde(rename = "Commodity_Localised")]
  pub commodity_localised: Option<String>,
  pub count:               Option<i64>,
  pub target_faction:      Option<String>,
  pub destination_system:  Option<String>,
  pub destination_station: Option<String>,
  #[serde(deserialize_with = "int_or_string")]
  pub reward:              Option<i64>,
  /// Older journals write a string `Donation`; newer ones `Donated`.
  #[serde(deserialize_with = "int_or_string")]
  pub donation:            Option<i64>,
  #[serde(deserialize_with = "int_or_string")]
  pub donated:             Option<i64>,
  pub commodity_reward:    Vec<CommodityReward>,
  pub materials_reward:    Vec<MaterialReward>,
  pub faction_effects:     Vec<FactionEffect>,
}

impl MissionCompleted {
  pub fn title(&self) -> String {
    mission_title(&self.name, self.localised_name.as_deref())
  }

  pub fn reward(&self) -> i64 { self.reward.unwrap_or(0) }

  pub fn donation(&self) -> i64 { self.donated.or(self.donation).unwrap_or(0) }
}

impl Describe for MissionCompleted {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", self.title())
      .text("", &self.faction)
      .nonzero_credits("Reward:", self.reward())
      .nonzero_credits("Donation:", self.donation())
      .opt_text(
        "",
        self.commodity.as_deref().map(|fd| {
          format!(
            "{} {}",
            self.count.unwrap_or(0),
            commodity_name(fd, self.commodity_localised.as_deref())
          )
        }),
      )
      .build()
  }

  fn detailed(&self) -> String {
    let rewards = self
      .commodity_reward
      .iter()
      .map(|r| {
        format!("{} {}", r.count, commodity_name(&r.name, r.name_localised.as_deref()))
      })
      .chain(self.materials_reward.iter().map(|r| {
        format!("{} {}", r.count, material_name(&r.name, r.name_localised.as_deref()))
      }));
    let effects = self.faction_effects.iter().filter(|f| !f.faction.is_empty()).map(|f| {
      FieldBuilder::new()
        .text("", &f.faction)
        .text("Influence", f.influence.iter().map(|i| i.influence.as_str()).collect::<String>())
        .text("Reputation", &f.reputation)
        .text(
          "",
          f.effects
            .iter()
            .map(|e| naming::friendly(&e.effect, e.effect_localised.as_deref()))
            .collect::<Vec<_>>()
            .join(", "),
        )
        .build()
    });
    let rewards = lines("Reward: ", rewards);
    let effects = lines("", effects);
    FieldBuilder::new().block(rewards).block(effects).build()
  }
}

impl MissionEffect for MissionCompleted {
  fn missions(&self, meta: &EntryMeta, sink: &mut dyn MissionSink) {
    sink.update(meta, MissionUpdate::Completed {
      mission_id: self.mission_id,
      reward:     self.reward(),
    });
  }
}

impl LedgerEffect for MissionCompleted {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    let delta = self.reward() - self.donation();
    if delta != 0 {
      record_cash(sink, meta, self.title(), delta);
    }
  }
}

impl CommodityEffect for MissionCompleted {
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    _unloading_from_srv: bool,
  ) {
    if let (Some(fd), Some(count)) = (&self.commodity, self.count) {
      sink.change(meta, ItemKind::Commodity, &commodity_key(fd), -count, None);
    }
    for reward in &self.commodity_reward {
      sink.change(
        meta,
        ItemKind::Commodity,
        &commodity_key(&reward.name),
        reward.count,
        None,
      );
    }
  }
}

impl MaterialEffect for MissionCompleted {
  fn materials(&self, meta: &EntryMeta, sink: &mut dyn InventorySink) {
    for reward in &self.materials_reward {
      sink.change(
        meta,
        ItemKind::Material(reward.category()),
        &material_key(&reward.name),
        reward.count,
        None,
      );
    }
  }
}

impl StatsEffect for MissionCompleted {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  ) {
    sink.record(meta, context, FactionStat::MissionCompleted {
      faction: self.faction.clone(),
      reward:  self.reward(),
    });
    for effect in self.faction_effects.iter().filter(|f| !f.faction.is_empty()) {
      sink.record(meta, context, FactionStat::MissionEffect {
        faction:    effect.faction.clone(),
        influence:  effect.influence_strength(),
        reputation: effect.reputation_strength(),
      });
    }
  }
}

// ─── Failed / abandoned / redirected ─────────────────────────────────────────

/// `MissionFailed` and `MissionAbandoned`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MissionEnded {
  pub name:           String,
  pub localised_name: Option<String>,
  #[serde(rename = "MissionID")]
  pub mission_id:     u64,
  pub faction:        Option<String>,
  pub fine:           Option<i64>,
}

impl MissionEnded {
  pub fn title(&self) -> String {
    mission_title(&self.name, self.localised_name.as_deref())
  }

  fn ledger_fine(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    if let Some(fine) = self.fine.filter(|f| *f != 0) {
      record_cash(sink, meta, format!("{} fine", self.title()), -fine);
    }
  }
}

impl Describe for MissionEnded {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", self.title())
      .opt_credits("Fine:", self.fine)
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MissionFailed(pub MissionEnded);

impl Describe for MissionFailed {
  fn info(&self) -> String { self.0.info() }
}

impl MissionEffect for MissionFailed {
  fn missions(&self, meta: &EntryMeta, sink: &mut dyn MissionSink) {
    sink.update(meta, MissionUpdate::Failed { mission_id: self.0.mission_id });
  }
}

impl LedgerEffect for MissionFailed {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    self.0.ledger_fine(meta, sink);
  }
}

impl StatsEffect for MissionFailed {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  ) {
    sink.record(meta, context, FactionStat::MissionFailed {
      mission_id: self.0.mission_id,
      faction:    self.0.faction.clone(),
    });
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MissionAbandoned(pub MissionEnded);

impl Describe for MissionAbandoned {
  fn info(&self) -> String { self.0.info() }
}

impl MissionEffect for MissionAbandoned {
  fn missions(&self, meta: &EntryMeta, sink: &mut dyn MissionSink) {
    sink.update(meta, MissionUpdate::Abandoned { mission_id: self.0.mission_id });
  }
}

impl LedgerEffect for MissionAbandoned {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    self.0.ledger_fine(meta, sink);
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MissionRedirected {
  #[serde(rename = "MissionID")]
  pub mission_id:              u64,
  pub name:                    String,
  pub localised_name:          Option<String>,
  pub new_destination_station: String,
  pub new_destination_system:  String,
  pub old_destination_station: String,
  pub old_destination_system:  String,
}

impl Describe for MissionRedirected {
  fn info(&self) -> String {
    let new = FieldBuilder::new()
      .text("", &self.new_destination_system)
      .text("", &self.new_destination_station)
      .build();
    let old = FieldBuilder::new()
      .text("", &self.old_destination_system)
      .text("", &self.old_destination_station)
      .build();
    FieldBuilder::new()
      .text("", mission_title(&self.name, self.localised_name.as_deref()))
      .text("To", new)
      .text("From", old)
      .build()
  }
}

impl MissionEffect for MissionRedirected {
  fn missions(&self, meta: &EntryMeta, sink: &mut dyn MissionSink) {
    sink.update(meta, MissionUpdate::Redirected {
      mission_id: self.mission_id,
      system:     self.new_destination_system.clone(),
      station:    self.new_destination_station.clone(),
    });
  }
}

// ─── Session snapshot ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MissionSummary {
  #[serde(rename = "MissionID")]
  pub mission_id:        u64,
  pub name:              String,
  pub passenger_mission: bool,
  /// Seconds until expiry.
  pub expires:           i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Missions {
  pub active:   Vec<MissionSummary>,
  pub failed:   Vec<MissionSummary>,
  pub complete: Vec<MissionSummary>,
}

fn ids(list: &[MissionSummary]) -> Vec<u64> { list.iter().map(|m| m.mission_id).collect() }

impl Describe for Missions {
  fn info(&self) -> String {
    FieldBuilder::new()
      .int("Active:", self.active.len() as i64)
      .int("Failed:", self.failed.len() as i64)
      .int("Completed:", self.complete.len() as i64)
      .build()
  }

  fn detailed(&self) -> String {
    lines("", self.active.iter().map(|m| naming::mission(&m.name)))
  }
}

impl MissionEffect for Missions {
  fn missions(&self, meta: &EntryMeta, sink: &mut dyn MissionSink) {
    sink.update(meta, MissionUpdate::Snapshot {
      active:   ids(&self.active),
      failed:   ids(&self.failed),
      complete: ids(&self.complete),
    });
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn accepted_record() {
    let m: MissionAccepted = serde_json::from_value(json!({
      "Faction": "Sirius Corporation",
      "Name": "Mission_Delivery_Boom_name",
      "LocalisedName": "Boom time delivery of 20 units of Gold",
      "MissionID": 65380400,
      "Commodity": "$Gold_Name;",
      "Commodity_Localised": "Gold",
      "Count": 20,
      "DestinationSystem": "Sol",
      "DestinationStation": "Daedalus",
      "Expiry": "2024-03-05T18:00:00Z",
      "Wing": false,
      "Influence": "++",
      "Reputation": "+",
      "Reward": 250000
    }))
    .unwrap();
    let record = m.record();
    assert_eq!(record.mission_id, 65380400);
    assert_eq!(record.display_name, "Boom time delivery of 20 units of Gold");
    assert_eq!(record.commodity.as_deref(), Some("Gold"));
    assert_eq!(record.reward, Some(250000));
    assert!(m.info().contains("Reward: 250,000 cr, To Sol, Daedalus"));
  }

  #[test]
  fn completed_donation_forms() {
    let old: MissionCompleted = serde_json::from_value(json!({
      "Faction": "A",
      "Name": "Mission_AltruismCredits_name",
      "MissionID": 1,
      "Donation": "100000"
    }))
    .unwrap();
    assert_eq!(old.donation(), 100000);
    assert_eq!(old.reward(), 0);
    let new: MissionCompleted = serde_json::from_value(json!({
      "Faction": "A",
      "Name": "Mission_AltruismCredits_name",
      "MissionID": 1,
      "Donated": 5000
    }))
    .unwrap();
    assert_eq!(new.donation(), 5000);
  }

  #[test]
  fn faction_effect_strength() {
    let effect: FactionEffect = serde_json::from_value(json!({
      "Faction": "Sirius Corporation",
      "Effects": [],
      "Influence": [
        { "SystemAddress": 1, "Trend": "UpGood", "Influence": "+++" },
        { "SystemAddress": 2, "Trend": "UpGood", "Influence": "+" }
      ],
      "ReputationTrend": "UpGood",
      "Reputation": "++"
    }))
    .unwrap();
    assert_eq!(effect.influence_strength(), 4);
    assert_eq!(effect.reputation_strength(), 2);
  }
}
