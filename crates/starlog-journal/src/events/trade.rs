//! Cargo and commodity-market events.

use std::collections::BTreeMap;

use serde::Deserialize;
use starlog_core::{
  effect::{
    CommodityEffect, EntryMeta, FactionStat, InventorySink, ItemKind,
    LedgerEffect, LedgerEntry, LedgerSink, StatsContext, StatsEffect,
    StatsSink,
  },
  naming,
};

use crate::{describe::Describe, fields::FieldBuilder};

/// Display name for a commodity, preferring the localised companion.
pub(crate) fn commodity_name(fd: &str, localised: Option<&str>) -> String {
  match localised.map(str::trim) {
    Some(loc) if !loc.is_empty() => loc.to_string(),
    _ => naming::commodity(fd),
  }
}

/// Inventory key for a commodity: the lower-cased FD name with decoration
/// removed, so `$gold_name;` and `Gold` land on the same item.
pub(crate) fn commodity_key(fd: &str) -> String {
  naming::strip_key(fd).to_ascii_lowercase()
}

/// Hand a localised commodity name to the inventory.
pub(crate) fn offer_name(sink: &mut dyn InventorySink, fd: &str, localised: Option<&str>) {
  if let Some(display) = localised {
    sink.name(ItemKind::Commodity, &commodity_key(fd), display);
  }
}

// ─── Cargo ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CargoItem {
  pub name:           String,
  #[serde(rename = "Name_Localised")]
  pub name_localised: Option<String>,
  #[serde(rename = "MissionID")]
  pub mission_id:     Option<u64>,
  pub count:          i64,
  pub stolen:         i64,
}

/// Full cargo listing for the ship or SRV.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Cargo {
  pub vessel:    String,
  pub count:     i64,
  /// Absent in the short form the game writes when the listing went to
  /// the companion `Cargo.json` file instead.
  pub inventory: Option<Vec<CargoItem>>,
}

impl Cargo {
  pub fn is_ship(&self) -> bool {
    self.vessel.is_empty() || self.vessel.eq_ignore_ascii_case("Ship")
  }

  /// Total count per commodity key; mission cargo and stolen cargo of the
  /// same commodity share a slot.
  pub fn totals(&self) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for item in self.inventory.iter().flatten() {
      *totals.entry(commodity_key(&item.name)).or_insert(0) += item.count;
    }
    totals
  }
}

impl Describe for Cargo {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.vessel)
      .int("Count:", self.count)
      .build()
  }

  fn detailed(&self) -> String {
    let Some(items) = &self.inventory else {
      return String::new();
    };
    items
      .iter()
      .map(|item| {
        FieldBuilder::new()
          .text("", commodity_name(&item.name, item.name_localised.as_deref()))
          .int("", item.count)
          .nonzero_int("Stolen:", item.stolen)
          .flag("Mission", item.mission_id.is_some())
          .build()
      })
      .collect::<Vec<_>>()
      .join("\n")
  }
}

impl CommodityEffect for Cargo {
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    _unloading_from_srv: bool,
  ) {
    if !self.is_ship() || self.inventory.is_none() {
      return;
    }
    sink.reset(meta, ItemKind::Commodity);
    for (key, count) in self.totals() {
      sink.set(meta, ItemKind::Commodity, &key, count);
    }
    for item in self.inventory.iter().flatten() {
      offer_name(sink, &item.name, item.name_localised.as_deref());
    }
  }
}

// ─── MarketBuy / MarketSell ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MarketBuy {
  #[serde(rename = "MarketID")]
  pub market_id:      u64,
  #[serde(rename = "Type")]
  pub commodity:      String,
  #[serde(rename = "Type_Localised")]
  pub type_localised: Option<String>,
  pub count:          i64,
  pub buy_price:      i64,
  pub total_cost:     i64,
}

impl MarketBuy {
  pub fn name(&self) -> String {
    commodity_name(&self.commodity, self.type_localised.as_deref())
  }
}

impl Describe for MarketBuy {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", self.name())
      .int("", self.count)
      .credits("< buy price", self.buy_price)
      .credits("Total Cost:", self.total_cost)
      .build()
  }
}

impl CommodityEffect for MarketBuy {
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    _unloading_from_srv: bool,
  ) {
    offer_name(sink, &self.commodity, self.type_localised.as_deref());
    sink.change(
      meta,
      ItemKind::Commodity,
      &commodity_key(&self.commodity),
      self.count,
      Some(self.buy_price),
    );
  }
}

impl LedgerEffect for MarketBuy {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    sink.record(LedgerEntry {
      meta:        meta.clone(),
      note:        format!("{} {}", self.count, self.name()),
      cash_delta:  -self.total_cost,
      count:       Some(self.count),
      unit_profit: None,
    });
  }
}

impl StatsEffect for MarketBuy {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  ) {
    sink.record(meta, context, FactionStat::CommodityBought {
      count: self.count,
      cost:  self.total_cost,
    });
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MarketSell {
  #[serde(rename = "MarketID")]
  pub market_id:      u64,
  #[serde(rename = "Type")]
  pub commodity:      String,
  #[serde(rename = "Type_Localised")]
  pub type_localised: Option<String>,
  pub count:          i64,
  pub sell_price:     i64,
  pub total_sale:     i64,
  pub avg_price_paid: i64,
  pub illegal_goods:  bool,
  pub stolen_goods:   bool,
  pub black_market:   bool,
}

impl MarketSell {
  pub fn name(&self) -> String {
    commodity_name(&self.commodity, self.type_localised.as_deref())
  }

  pub fn profit(&self) -> i64 { self.total_sale - self.avg_price_paid * self.count }

  pub fn unit_profit(&self) -> i64 { self.sell_price - self.avg_price_paid }
}

impl Describe for MarketSell {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", self.name())
      .int("", self.count)
      .credits("< sell price", self.sell_price)
      .credits("Total Sale:", self.total_sale)
      .credits("Profit:", self.profit())
      .flag("Illegal", self.illegal_goods)
      .flag("Stolen", self.stolen_goods)
      .flag("Black Market", self.black_market)
      .build()
  }

  fn detailed(&self) -> String {
    FieldBuilder::new()
      .credits("Average paid:", self.avg_price_paid)
      .credits("Profit per unit:", self.unit_profit())
      .build()
  }
}

impl CommodityEffect for MarketSell {
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    _unloading_from_srv: bool,
  ) {
    offer_name(sink, &self.commodity, self.type_localised.as_deref());
    sink.change(
      meta,
      ItemKind::Commodity,
      &commodity_key(&self.commodity),
      -self.count,
      None,
    );
  }
}

impl LedgerEffect for MarketSell {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    sink.record(LedgerEntry {
      meta:        meta.clone(),
      note:        format!("{} {}", self.count, self.name()),
      cash_delta:  self.total_sale,
      count:       Some(self.count),
      unit_profit: Some(self.unit_profit()),
    });
  }
}

impl StatsEffect for MarketSell {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  ) {
    sink.record(meta, context, FactionStat::CommoditySold {
      count:  self.count,
      profit: self.profit(),
    });
  }
}

// ─── Limpets ─────────────────────────────────────────────────────────────────

const DRONES: &str = "drones";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BuyDrones {
  pub count:      i64,
  pub buy_price:  i64,
  pub total_cost: i64,
}

impl Describe for BuyDrones {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("Type:", "Limpet")
      .int("Count:", self.count)
      .credits("Price:", self.buy_price)
      .credits("Total Cost:", self.total_cost)
      .build()
  }
}

impl CommodityEffect for BuyDrones {
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    _unloading_from_srv: bool,
  ) {
    sink.change(meta, ItemKind::Commodity, DRONES, self.count, Some(self.buy_price));
  }
}

impl LedgerEffect for BuyDrones {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    sink.record(LedgerEntry {
      meta:        meta.clone(),
      note:        format!("{} Limpets", self.count),
      cash_delta:  -self.total_cost,
      count:       Some(self.count),
      unit_profit: None,
    });
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SellDrones {
  pub count:      i64,
  pub sell_price: i64,
  pub total_sale: i64,
}

impl Describe for SellDrones {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("Type:", "Limpet")
      .int("Count:", self.count)
      .credits("Price:", self.sell_price)
      .credits("Amount:", self.total_sale)
      .build()
  }
}

impl CommodityEffect for SellDrones {
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    _unloading_from_srv: bool,
  ) {
    sink.change(meta, ItemKind::Commodity, DRONES, -self.count, None);
  }
}

impl LedgerEffect for SellDrones {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    sink.record(LedgerEntry {
      meta:        meta.clone(),
      note:        format!("{} Limpets", self.count),
      cash_delta:  self.total_sale,
      count:       Some(self.count),
      unit_profit: None,
    });
  }
}

// ─── Collect / eject / refine ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CollectCargo {
  #[serde(rename = "Type")]
  pub commodity:      String,
  #[serde(rename = "Type_Localised")]
  pub type_localised: Option<String>,
  pub stolen:         bool,
  #[serde(rename = "MissionID")]
  pub mission_id:     Option<u64>,
}

impl Describe for CollectCargo {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", commodity_name(&self.commodity, self.type_localised.as_deref()))
      .flag("Stolen", self.stolen)
      .flag("Mission", self.mission_id.is_some())
      .build()
  }
}

impl CommodityEffect for CollectCargo {
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    unloading_from_srv: bool,
  ) {
    // The cargo listing that ends the SRV transfer already counts it.
    if unloading_from_srv {
      return;
    }
    offer_name(sink, &self.commodity, self.type_localised.as_deref());
    sink.change(meta, ItemKind::Commodity, &commodity_key(&self.commodity), 1, None);
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EjectCargo {
  #[serde(rename = "Type")]
  pub commodity:        String,
  #[serde(rename = "Type_Localised")]
  pub type_localised:   Option<String>,
  pub count:            i64,
  pub abandoned:        bool,
  #[serde(rename = "MissionID")]
  pub mission_id:       Option<u64>,
  pub powerplay_origin: Option<String>,
}

impl Describe for EjectCargo {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", commodity_name(&self.commodity, self.type_localised.as_deref()))
      .int("Count:", self.count)
      .flag("Abandoned", self.abandoned)
      .opt_text("Powerplay:", self.powerplay_origin.as_deref())
      .build()
  }
}

impl CommodityEffect for EjectCargo {
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    unloading_from_srv: bool,
  ) {
    if unloading_from_srv {
      return;
    }
    offer_name(sink, &self.commodity, self.type_localised.as_deref());
    sink.change(
      meta,
      ItemKind::Commodity,
      &commodity_key(&self.commodity),
      -self.count,
      None,
    );
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MiningRefined {
  #[serde(rename = "Type")]
  pub commodity:      String,
  #[serde(rename = "Type_Localised")]
  pub type_localised: Option<String>,
}

impl Describe for MiningRefined {
  fn info(&self) -> String {
    commodity_name(&self.commodity, self.type_localised.as_deref())
  }
}

impl CommodityEffect for MiningRefined {
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    _unloading_from_srv: bool,
  ) {
    offer_name(sink, &self.commodity, self.type_localised.as_deref());
    sink.change(meta, ItemKind::Commodity, &commodity_key(&self.commodity), 1, None);
  }
}

// ─── Wing mission cargo ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CargoDepot {
  #[serde(rename = "MissionID")]
  pub mission_id:             u64,
  /// `Collect`, `Deliver` or `WingUpdate`.
  pub update_type:            String,
  pub cargo_type:             Option<String>,
  #[serde(rename = "CargoType_Localised")]
  pub cargo_type_localised:   Option<String>,
  pub count:                  i64,
  #[serde(rename = "StartMarketID")]
  pub start_market_id:        Option<u64>,
  #[serde(rename = "EndMarketID")]
  pub end_market_id:          Option<u64>,
  pub items_collected:        i64,
  pub items_delivered:        i64,
  pub total_items_to_deliver: i64,
  pub progress:               f64,
}

impl CargoDepot {
  /// Signed change to the commander's own hold.
  pub fn delta(&self) -> i64 {
    match self.update_type.to_ascii_lowercase().as_str() {
      "collect" => self.count,
      "deliver" => -self.count,
      _ => 0,
    }
  }
}

impl Describe for CargoDepot {
  fn info(&self) -> String {
    let cargo = self
      .cargo_type
      .as_deref()
      .map(|fd| commodity_name(fd, self.cargo_type_localised.as_deref()));
    FieldBuilder::new()
      .text("", naming::split_caps(&self.update_type))
      .opt_text("", cargo)
      .nonzero_int("Count:", self.count)
      .text(
        "Delivered:",
        format!("{} / {}", self.items_delivered, self.total_items_to_deliver),
      )
      .build()
  }

  fn detailed(&self) -> String {
    FieldBuilder::new()
      .int("Collected:", self.items_collected)
      .float("Progress:", self.progress * 100.0, 1, "%")
      .build()
  }
}

impl CommodityEffect for CargoDepot {
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    _unloading_from_srv: bool,
  ) {
    let (Some(fd), delta) = (&self.cargo_type, self.delta()) else {
      return;
    };
    if delta != 0 {
      offer_name(sink, fd, self.cargo_type_localised.as_deref());
      sink.change(meta, ItemKind::Commodity, &commodity_key(fd), delta, None);
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn market_sell_profit_and_info() {
    let sell: MarketSell = serde_json::from_value(json!({
      "MarketID": 128666762,
      "Type": "gold",
      "Count": 10,
      "SellPrice": 9500,
      "TotalSale": 95000,
      "AvgPricePaid": 9000,
      "StolenGoods": true
    }))
    .unwrap();
    assert_eq!(sell.profit(), 5000);
    assert_eq!(sell.unit_profit(), 500);
    assert_eq!(
      sell.info(),
      "Gold, 10, < sell price 9,500 cr, Total Sale: 95,000 cr, Profit: 5,000 cr, Stolen"
    );
  }

  #[test]
  fn cargo_totals_merge_duplicates() {
    let cargo: Cargo = serde_json::from_value(json!({
      "Vessel": "Ship",
      "Count": 7,
      "Inventory": [
        { "Name": "gold", "Count": 4, "Stolen": 0 },
        { "Name": "$gold_name;", "Count": 2, "Stolen": 0, "MissionID": 55 },
        { "Name": "drones", "Name_Localised": "Limpet", "Count": 1, "Stolen": 0 }
      ]
    }))
    .unwrap();
    let totals = cargo.totals();
    assert_eq!(cargo.info(), "Ship, Count: 7");
    assert_eq!(totals.get("gold"), Some(&6));
    assert_eq!(totals.get("drones"), Some(&1));
    assert!(cargo.is_ship());
    assert_eq!(cargo.detailed(), "Gold, 4\nGold, 2, Mission\nLimpet, 1");
  }

  #[test]
  fn localised_name_wins() {
    let buy: MarketBuy = serde_json::from_value(json!({
      "Type": "lowtemperaturediamond",
      "Type_Localised": "Low Temp. Diamonds",
      "Count": 1,
      "BuyPrice": 100,
      "TotalCost": 100
    }))
    .unwrap();
    assert_eq!(buy.name(), "Low Temp. Diamonds");
  }

  #[test]
  fn cargo_depot_moves_only_own_hold() {
    let depot: CargoDepot = serde_json::from_value(json!({
      "MissionID": 65394170,
      "UpdateType": "Deliver",
      "CargoType": "Tantalum",
      "Count": 54,
      "StartMarketID": 0,
      "EndMarketID": 3224777216u64,
      "ItemsCollected": 0,
      "ItemsDelivered": 54,
      "TotalItemsToDeliver": 54,
      "Progress": 0.0
    }))
    .unwrap();
    assert_eq!(depot.delta(), -54);
    assert_eq!(depot.info(), "Deliver, Tantalum, Count: 54, Delivered: 54 / 54");

    let update = CargoDepot {
      update_type: "WingUpdate".into(),
      count: 10,
      ..Default::default()
    };
    assert_eq!(update.delta(), 0);
  }
}
