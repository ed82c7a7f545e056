//! Docking and station services.

use serde::Deserialize;
use starlog_core::{
  effect::{EntryMeta, LedgerEffect, LedgerEntry, LedgerSink, record_cash},
  naming,
};

use super::travel::FactionRef;
use crate::{
  describe::Describe,
  fields::{FieldBuilder, light_seconds},
};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LandingPads {
  pub small:  i64,
  pub medium: i64,
  pub large:  i64,
}

impl LandingPads {
  fn display(&self) -> String {
    format!("{}/{}/{} (S/M/L)", self.small, self.medium, self.large)
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StationEconomy {
  pub name:           String,
  #[serde(rename = "Name_Localised")]
  pub name_localised: Option<String>,
  pub proportion:     f64,
}

impl StationEconomy {
  fn display(&self) -> String {
    let name = match self.name_localised.as_deref() {
      Some(loc) if !loc.trim().is_empty() => loc.trim().to_string(),
      _ => naming::economy(&self.name),
    };
    format!("{name} {:.0}%", self.proportion * 100.0)
  }
}

// ─── Docked / Undocked ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Docked {
  pub station_name:                 String,
  pub station_type:                 String,
  pub star_system:                  String,
  pub system_address:               Option<u64>,
  #[serde(rename = "MarketID")]
  pub market_id:                    Option<u64>,
  pub station_faction:              Option<FactionRef>,
  pub station_government:           String,
  #[serde(rename = "StationGovernment_Localised")]
  pub station_government_localised: Option<String>,
  pub station_allegiance:           Option<String>,
  pub station_services:             Vec<String>,
  pub station_economies:            Vec<StationEconomy>,
  #[serde(rename = "DistFromStarLS")]
  pub dist_from_star_ls:            Option<f64>,
  pub landing_pads:                 Option<LandingPads>,
  pub wanted:                       bool,
  pub active_fine:                  bool,
  pub cockpit_breach:               bool,
  pub taxi:                         bool,
  pub multicrew:                    bool,
}

impl Docked {
  pub fn faction(&self) -> Option<&str> {
    self.station_faction.as_ref().map(FactionRef::name)
  }

  pub fn government(&self) -> String {
    match self.station_government_localised.as_deref() {
      Some(loc) if !loc.trim().is_empty() => loc.trim().to_string(),
      _ if self.station_government.is_empty() => String::new(),
      _ => naming::government(&self.station_government),
    }
  }
}

impl Describe for Docked {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.station_name)
      .text("", naming::station_type(&self.station_type))
      .text("in", &self.star_system)
      .flag("Wanted", self.wanted)
      .flag("Active Fine", self.active_fine)
      .flag("Cockpit Breach", self.cockpit_breach)
      .flag("Taxi", self.taxi)
      .build()
  }

  fn detailed(&self) -> String {
    let economies = self
      .station_economies
      .iter()
      .map(StationEconomy::display)
      .collect::<Vec<_>>()
      .join(", ");
    let services = self
      .station_services
      .iter()
      .map(|s| naming::capitalise(s))
      .collect::<Vec<_>>()
      .join(", ");
    FieldBuilder::new()
      .opt_text(
        "Faction:",
        self.station_faction.as_ref().map(FactionRef::display),
      )
      .text("Government:", self.government())
      .opt_text(
        "Allegiance:",
        self.station_allegiance.as_deref().map(naming::allegiance),
      )
      .line()
      .text("Economy:", economies)
      .opt_text("Distance:", self.dist_from_star_ls.map(light_seconds))
      .opt_text("Pads:", self.landing_pads.map(|p| p.display()))
      .line()
      .text("Services:", services)
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Undocked {
  pub station_name: String,
  pub station_type: String,
  #[serde(rename = "MarketID")]
  pub market_id:    Option<u64>,
  pub taxi:         bool,
  pub multicrew:    bool,
}

impl Describe for Undocked {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.station_name)
      .text("", naming::station_type(&self.station_type))
      .flag("Taxi", self.taxi)
      .build()
  }
}

// ─── Docking control ─────────────────────────────────────────────────────────

/// Fields shared by the docking-request family.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Docking {
  pub station_name: String,
  pub station_type: String,
  #[serde(rename = "MarketID")]
  pub market_id:    Option<u64>,
  pub landing_pads: Option<LandingPads>,
  pub landing_pad:  Option<i64>,
  pub reason:       Option<String>,
}

impl Describe for Docking {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.station_name)
      .text("", naming::station_type(&self.station_type))
      .opt_int("Pad:", self.landing_pad)
      .opt_text("Reason:", self.reason.as_deref().map(naming::split_caps))
      .build()
  }
}

pub type DockingRequested = Docking;
pub type DockingGranted = Docking;
pub type DockingDenied = Docking;
pub type DockingCancelled = Docking;
pub type DockingTimeout = Docking;

// ─── Services ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Refuel {
  pub cost:   i64,
  pub amount: f64,
}

impl Describe for Refuel {
  fn info(&self) -> String {
    FieldBuilder::new()
      .credits("Cost:", self.cost)
      .float("Fuel:", self.amount, 2, "t")
      .build()
  }
}

impl LedgerEffect for Refuel {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, format!("{:.2}t fuel", self.amount), -self.cost);
  }
}

pub type RefuelAll = Refuel;
pub type RefuelPartial = Refuel;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Repair {
  /// Older journals name one item; newer ones list several.
  pub item:  Option<String>,
  pub items: Vec<String>,
  pub cost:  i64,
}

impl Repair {
  pub fn repaired(&self) -> String {
    self
      .item
      .iter()
      .chain(&self.items)
      .map(|i| repaired_name(i))
      .collect::<Vec<_>>()
      .join(", ")
  }
}

fn repaired_name(item: &str) -> String {
  match item.to_ascii_lowercase().as_str() {
    "all" => "All".into(),
    "wear" => "Wear".into(),
    "hull" => "Hull".into(),
    "paint" => "Paint".into(),
    _ => naming::module(item),
  }
}

impl Describe for Repair {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", self.repaired())
      .credits("Cost:", self.cost)
      .build()
  }
}

impl LedgerEffect for Repair {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, self.repaired(), -self.cost);
  }
}

/// `RepairAll` and `BuyAmmo` carry only a cost.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceCost {
  pub cost: i64,
}

impl Describe for ServiceCost {
  fn info(&self) -> String { FieldBuilder::new().credits("Cost:", self.cost).build() }
}

impl LedgerEffect for ServiceCost {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, meta.event_type.summary_name(), -self.cost);
  }
}

pub type RepairAll = ServiceCost;
pub type BuyAmmo = ServiceCost;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RestockVehicle {
  #[serde(rename = "Type")]
  pub vehicle:        String,
  #[serde(rename = "Type_Localised")]
  pub type_localised: Option<String>,
  pub loadout:        String,
  pub cost:           i64,
  pub count:          i64,
}

impl RestockVehicle {
  pub fn vehicle_name(&self) -> String {
    naming::friendly(&self.vehicle, self.type_localised.as_deref())
  }
}

impl Describe for RestockVehicle {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", self.vehicle_name())
      .text("Loadout:", naming::split_caps(&self.loadout))
      .credits("Cost:", self.cost)
      .int("Count:", self.count)
      .build()
  }
}

impl LedgerEffect for RestockVehicle {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    sink.record(LedgerEntry {
      meta:        meta.clone(),
      note:        self.vehicle_name(),
      cash_delta:  -self.cost,
      count:       Some(self.count),
      unit_profit: None,
    });
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn docked_detail() {
    let docked: Docked = serde_json::from_value(json!({
      "StationName": "Jameson Memorial",
      "StationType": "Orbis",
      "StarSystem": "Shinrarta Dezhra",
      "MarketID": 128666762,
      "StationFaction": { "Name": "Pilots Federation Local Branch", "FactionState": "None" },
      "StationGovernment": "$government_Democracy;",
      "StationGovernment_Localised": "Democracy",
      "StationServices": ["dock", "refuel"],
      "StationEconomies": [
        { "Name": "$economy_HighTech;", "Name_Localised": "High Tech", "Proportion": 0.8 },
        { "Name": "$economy_Industrial;", "Proportion": 0.2 }
      ],
      "DistFromStarLS": 346.2,
      "LandingPads": { "Small": 17, "Medium": 18, "Large": 9 },
      "Wanted": true
    }))
    .unwrap();
    assert_eq!(docked.faction(), Some("Pilots Federation Local Branch"));
    assert!(docked.info().ends_with("in Shinrarta Dezhra, Wanted"));
    let detail = docked.detailed();
    assert!(detail.contains("Economy: High Tech 80%, Industrial 20%"));
    assert!(detail.contains("Pads: 17/18/9 (S/M/L)"));
    assert!(detail.contains("Services: Dock, Refuel"));
  }

  #[test]
  fn repair_merges_item_forms() {
    let old: Repair =
      serde_json::from_value(json!({ "Item": "Wear", "Cost": 100 })).unwrap();
    assert_eq!(old.repaired(), "Wear");
    let new: Repair = serde_json::from_value(json!({
      "Items": ["Hull", "Paint"],
      "Cost": 2500
    }))
    .unwrap();
    assert_eq!(new.info(), "Hull, Paint, Cost: 2,500 cr");
  }
}
