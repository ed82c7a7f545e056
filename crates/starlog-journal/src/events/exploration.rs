//! Scanning, signals, codex and the sale of exploration data.
//!
//! The body `Scan` event lives in [`crate::scan`].

use serde::Deserialize;
use starlog_core::{
  effect::{
    EntryMeta, FactionStat, LedgerEffect, LedgerSink, StatsContext,
    StatsEffect, StatsSink, record_cash,
  },
  naming,
};

use crate::{
  describe::Describe,
  fields::{FieldBuilder, lines},
};

fn friendly_opt(fd: &Option<String>, localised: &Option<String>) -> Option<String> {
  fd.as_deref()
    .map(|fd| naming::friendly(fd, localised.as_deref()))
}

// ─── FSS ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FssDiscoveryScan {
  pub progress:       f64,
  pub body_count:     i64,
  pub non_body_count: i64,
  pub system_name:    Option<String>,
  pub system_address: Option<u64>,
}

impl Describe for FssDiscoveryScan {
  fn info(&self) -> String {
    FieldBuilder::new()
      .float("Progress:", self.progress * 100.0, 0, "%")
      .int("Bodies:", self.body_count)
      .int("Others:", self.non_body_count)
      .opt_text("", self.system_name.as_deref())
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FssAllBodiesFound {
  pub system_name:    String,
  pub system_address: Option<u64>,
  pub count:          i64,
}

impl Describe for FssAllBodiesFound {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.system_name)
      .int("Bodies:", self.count)
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FssSignalDiscovered {
  pub system_address:          Option<u64>,
  pub signal_name:             String,
  #[serde(rename = "SignalName_Localised")]
  pub signal_name_localised:   Option<String>,
  pub signal_type:             Option<String>,
  #[serde(rename = "USSType")]
  pub uss_type:                Option<String>,
  #[serde(rename = "USSType_Localised")]
  pub uss_type_localised:      Option<String>,
  pub spawning_state:          Option<String>,
  #[serde(rename = "SpawningState_Localised")]
  pub spawning_state_localised: Option<String>,
  pub spawning_faction:        Option<String>,
  #[serde(rename = "SpawningFaction_Localised")]
  pub spawning_faction_localised: Option<String>,
  pub threat_level:            Option<i64>,
  /// Seconds.
  pub time_remaining:          Option<f64>,
  pub is_station:              bool,
}

impl FssSignalDiscovered {
  pub fn signal(&self) -> String {
    naming::friendly(&self.signal_name, self.signal_name_localised.as_deref())
  }
}

impl Describe for FssSignalDiscovered {
  fn info(&self) -> String {
    let remaining = self.time_remaining.filter(|t| *t > 0.0).map(|t| {
      let secs = t as i64;
      format!("{}:{:02}", secs / 60, secs % 60)
    });
    FieldBuilder::new()
      .text("", self.signal())
      .opt_text("", friendly_opt(&self.uss_type, &self.uss_type_localised))
      .opt_text(
        "State:",
        friendly_opt(&self.spawning_state, &self.spawning_state_localised)
          .filter(|s| s != "None"),
      )
      .opt_text(
        "Faction:",
        friendly_opt(&self.spawning_faction, &self.spawning_faction_localised),
      )
      .opt_int("Threat:", self.threat_level.filter(|t| *t > 0))
      .opt_text("Time:", remaining)
      .flag("Station", self.is_station)
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BodySignal {
  #[serde(rename = "Type")]
  pub kind:           String,
  #[serde(rename = "Type_Localised")]
  pub type_localised: Option<String>,
  pub count:          i64,
}

impl BodySignal {
  fn display(&self) -> String {
    format!(
      "{} {}",
      self.count,
      naming::friendly(&self.kind, self.type_localised.as_deref())
    )
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Genus {
  pub genus:           String,
  #[serde(rename = "Genus_Localised")]
  pub genus_localised: Option<String>,
}

/// `FSSBodySignals` and `SAASignalsFound`; only the latter lists genuses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BodySignals {
  pub body_name:      String,
  #[serde(rename = "BodyID")]
  pub body_id:        Option<i64>,
  pub system_address: Option<u64>,
  pub signals:        Vec<BodySignal>,
  pub genuses:        Vec<Genus>,
}

impl Describe for BodySignals {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.body_name)
      .text(
        "",
        self
          .signals
          .iter()
          .map(BodySignal::display)
          .collect::<Vec<_>>()
          .join(", "),
      )
      .build()
  }

  fn detailed(&self) -> String {
    lines(
      "Genus: ",
      self
        .genuses
        .iter()
        .map(|g| naming::friendly(&g.genus, g.genus_localised.as_deref())),
    )
  }
}

pub type FssBodySignals = BodySignals;
pub type SaaSignalsFound = BodySignals;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SaaScanComplete {
  pub body_name:         String,
  #[serde(rename = "BodyID")]
  pub body_id:           Option<i64>,
  pub system_address:    Option<u64>,
  pub probes_used:       i64,
  pub efficiency_target: i64,
}

impl SaaScanComplete {
  /// Mapped within the probe target; earns the efficiency bonus.
  pub fn efficient(&self) -> bool { self.probes_used <= self.efficiency_target }
}

impl Describe for SaaScanComplete {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.body_name)
      .text(
        "Probes:",
        format!("{} / {}", self.probes_used, self.efficiency_target),
      )
      .flag("Efficient", self.efficient())
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DiscoveryScan {
  pub system_address: Option<u64>,
  pub bodies:         i64,
}

impl Describe for DiscoveryScan {
  fn info(&self) -> String { FieldBuilder::new().int("New bodies:", self.bodies).build() }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NavBeaconScan {
  pub system_address: Option<u64>,
  pub num_bodies:     i64,
}

impl Describe for NavBeaconScan {
  fn info(&self) -> String { FieldBuilder::new().int("Bodies:", self.num_bodies).build() }
}

// ─── Codex and organics ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CodexEntry {
  #[serde(rename = "EntryID")]
  pub entry_id:                      u64,
  pub name:                          String,
  #[serde(rename = "Name_Localised")]
  pub name_localised:                Option<String>,
  pub sub_category:                  String,
  #[serde(rename = "SubCategory_Localised")]
  pub sub_category_localised:        Option<String>,
  pub category:                      String,
  #[serde(rename = "Category_Localised")]
  pub category_localised:            Option<String>,
  pub region:                        String,
  #[serde(rename = "Region_Localised")]
  pub region_localised:              Option<String>,
  pub system:                        String,
  pub system_address:                Option<u64>,
  #[serde(rename = "BodyID")]
  pub body_id:                       Option<i64>,
  pub nearest_destination:           Option<String>,
  #[serde(rename = "NearestDestination_Localised")]
  pub nearest_destination_localised: Option<String>,
  pub latitude:                      Option<f64>,
  pub longitude:                     Option<f64>,
  pub is_new_entry:                  bool,
  pub voucher_amount:                Option<i64>,
}

impl Describe for CodexEntry {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", naming::friendly(&self.name, self.name_localised.as_deref()))
      .text(
        "",
        naming::friendly(&self.sub_category, self.sub_category_localised.as_deref()),
      )
      .text("", naming::friendly(&self.category, self.category_localised.as_deref()))
      .text("", &self.system)
      .flag("New Entry", self.is_new_entry)
      .opt_credits("Voucher:", self.voucher_amount)
      .build()
  }

  fn detailed(&self) -> String {
    FieldBuilder::new()
      .text("Region:", naming::friendly(&self.region, self.region_localised.as_deref()))
      .opt_text(
        "Near:",
        friendly_opt(&self.nearest_destination, &self.nearest_destination_localised),
      )
      .opt_float("Lat:", self.latitude, 4, "")
      .opt_float("Long:", self.longitude, 4, "")
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScanOrganic {
  pub scan_type:         String,
  pub genus:             String,
  #[serde(rename = "Genus_Localised")]
  pub genus_localised:   Option<String>,
  pub species:           String,
  #[serde(rename = "Species_Localised")]
  pub species_localised: Option<String>,
  pub variant:           Option<String>,
  #[serde(rename = "Variant_Localised")]
  pub variant_localised: Option<String>,
  pub system_address:    Option<u64>,
  pub body:              Option<i64>,
}

impl Describe for ScanOrganic {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", naming::split_caps(&self.scan_type))
      .text("", naming::friendly(&self.species, self.species_localised.as_deref()))
      .opt_text("", friendly_opt(&self.variant, &self.variant_localised))
      .build()
  }
}

// ─── Data sales ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SellExplorationData {
  pub systems:        Vec<String>,
  pub discovered:     Vec<String>,
  pub base_value:     i64,
  pub bonus:          i64,
  pub total_earnings: i64,
}

/// Earnings, falling back to base + bonus for journals that predate the
/// total.
fn earnings(total: i64, base: i64, bonus: i64) -> i64 {
  if total != 0 { total } else { base + bonus }
}

impl Describe for SellExplorationData {
  fn info(&self) -> String {
    FieldBuilder::new()
      .int("Systems:", self.systems.len() as i64)
      .credits("Base Value:", self.base_value)
      .nonzero_credits("Bonus:", self.bonus)
      .credits(
        "Total:",
        earnings(self.total_earnings, self.base_value, self.bonus),
      )
      .build()
  }

  fn detailed(&self) -> String {
    FieldBuilder::new()
      .text("Systems:", self.systems.join(", "))
      .line()
      .text("First discovered:", self.discovered.join(", "))
      .build()
  }
}

impl LedgerEffect for SellExplorationData {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(
      sink,
      meta,
      format!("{} systems", self.systems.len()),
      earnings(self.total_earnings, self.base_value, self.bonus),
    );
  }
}

impl StatsEffect for SellExplorationData {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  ) {
    sink.record(meta, context, FactionStat::ExplorationSold {
      value: earnings(self.total_earnings, self.base_value, self.bonus),
    });
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SoldSystem {
  pub system_name: String,
  pub num_bodies:  i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MultiSellExplorationData {
  pub discovered:     Vec<SoldSystem>,
  pub base_value:     i64,
  pub bonus:          i64,
  pub total_earnings: i64,
}

impl MultiSellExplorationData {
  pub fn total(&self) -> i64 { earnings(self.total_earnings, self.base_value, self.bonus) }
}

impl Describe for MultiSellExplorationData {
  fn info(&self) -> String {
    FieldBuilder::new()
      .int("Systems:", self.discovered.len() as i64)
      .int("Bodies:", self.discovered.iter().map(|d| d.num_bodies).sum())
      .credits("Base Value:", self.base_value)
      .nonzero_credits("Bonus:", self.bonus)
      .credits("Total:", self.total())
      .build()
  }

  fn detailed(&self) -> String {
    lines(
      "",
      self
        .discovered
        .iter()
        .map(|d| format!("{} ({} bodies)", d.system_name, d.num_bodies)),
    )
  }
}

impl LedgerEffect for MultiSellExplorationData {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(
      sink,
      meta,
      format!("{} systems", self.discovered.len()),
      self.total(),
    );
  }
}

impl StatsEffect for MultiSellExplorationData {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  ) {
    sink.record(meta, context, FactionStat::ExplorationSold { value: self.total() });
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BioSale {
  pub genus:             String,
  #[serde(rename = "Genus_Localised")]
  pub genus_localised:   Option<String>,
  pub species:           String,
  #[serde(rename = "Species_Localised")]
  pub species_localised: Option<String>,
  pub variant:           Option<String>,
  #[serde(rename = "Variant_Localised")]
  pub variant_localised: Option<String>,
  pub value:             i64,
  pub bonus:             i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SellOrganicData {
  #[serde(rename = "MarketID")]
  pub market_id: Option<u64>,
  pub bio_data:  Vec<BioSale>,
}

impl SellOrganicData {
  pub fn total(&self) -> i64 { self.bio_data.iter().map(|b| b.value + b.bonus).sum() }
}

impl Describe for SellOrganicData {
  fn info(&self) -> String {
    FieldBuilder::new()
      .int("Samples:", self.bio_data.len() as i64)
      .credits("Total:", self.total())
      .build()
  }

  fn detailed(&self) -> String {
    lines(
      "",
      self.bio_data.iter().map(|b| {
        FieldBuilder::new()
          .text("", naming::friendly(&b.species, b.species_localised.as_deref()))
          .credits("", b.value)
          .nonzero_credits("Bonus:", b.bonus)
          .build()
      }),
    )
  }
}

impl LedgerEffect for SellOrganicData {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, format!("{} samples", self.bio_data.len()), self.total());
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BuyExplorationData {
  pub system: String,
  pub cost:   i64,
}

impl Describe for BuyExplorationData {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.system)
      .credits("Cost:", self.cost)
      .build()
  }
}

impl LedgerEffect for BuyExplorationData {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, self.system.clone(), -self.cost);
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn multi_sell_totals() {
    let sale: MultiSellExplorationData = serde_json::from_value(json!({
      "Discovered": [
        { "SystemName": "Col 285 Sector AB-C d1", "NumBodies": 12 },
        { "SystemName": "Col 285 Sector AB-C d2", "NumBodies": 3 }
      ],
      "BaseValue": 1500000,
      "Bonus": 250000,
      "TotalEarnings": 1750000
    }))
    .unwrap();
    assert_eq!(
      sale.info(),
      "Systems: 2, Bodies: 15, Base Value: 1,500,000 cr, Bonus: 250,000 cr, Total: 1,750,000 cr"
    );
  }

  #[test]
  fn old_sale_without_total() {
    let sale: SellExplorationData = serde_json::from_value(json!({
      "Systems": ["Sol"],
      "Discovered": [],
      "BaseValue": 1000,
      "Bonus": 200
    }))
    .unwrap();
    assert!(sale.info().ends_with("Total: 1,200 cr"));
  }

  #[test]
  fn saa_efficiency() {
    let saa: SaaScanComplete = serde_json::from_value(json!({
      "BodyName": "Sol 3",
      "ProbesUsed": 5,
      "EfficiencyTarget": 6
    }))
    .unwrap();
    assert!(saa.efficient());
    assert_eq!(saa.info(), "Sol 3, Probes: 5 / 6, Efficient");
  }

  #[test]
  fn signals_with_genus() {
    let s: BodySignals = serde_json::from_value(json!({
      "BodyName": "HIP 1 A 2",
      "Signals": [{ "Type": "$SAA_SignalType_Biological;", "Type_Localised": "Biological", "Count": 3 }],
      "Genuses": [{ "Genus": "$Codex_Ent_Bacterial_Genus_Name;", "Genus_Localised": "Bacterium" }]
    }))
    .unwrap();
    assert_eq!(s.info(), "HIP 1 A 2, 3 Biological");
    assert_eq!(s.detailed(), "Genus: Bacterium");
  }
}
