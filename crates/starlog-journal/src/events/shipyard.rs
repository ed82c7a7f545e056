//! Ship purchases, transfers and outfitting.

use serde::Deserialize;
use starlog_core::{
  effect::{EntryMeta, LedgerEffect, LedgerSink, record_cash},
  naming,
};

use crate::{
  describe::Describe,
  fields::{FieldBuilder, light_years},
};

fn ship_name(fd: &str, localised: Option<&str>) -> String {
  match localised.map(str::trim) {
    Some(loc) if !loc.is_empty() => loc.to_string(),
    _ => naming::ship(fd),
  }
}

fn module_name(fd: &str, localised: Option<&str>) -> String {
  match localised.map(str::trim) {
    Some(loc) if !loc.is_empty() => loc.to_string(),
    _ => naming::module(fd),
  }
}

// ─── Ships ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipyardBuy {
  pub ship_type:           String,
  #[serde(rename = "ShipType_Localised")]
  pub ship_type_localised: Option<String>,
  pub ship_price:          i64,
  pub store_old_ship:      Option<String>,
  #[serde(rename = "StoreShipID")]
  pub store_ship_id:       Option<u64>,
  pub sell_old_ship:       Option<String>,
  #[serde(rename = "SellShipID")]
  pub sell_ship_id:        Option<u64>,
  pub sell_price:          Option<i64>,
  #[serde(rename = "MarketID")]
  pub market_id:           Option<u64>,
}

impl ShipyardBuy {
  pub fn ship(&self) -> String { ship_name(&self.ship_type, self.ship_type_localised.as_deref()) }
}

impl Describe for ShipyardBuy {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", self.ship())
      .credits("Amount:", self.ship_price)
      .opt_text("Stored:", self.store_old_ship.as_deref().map(naming::ship))
      .opt_text("Sold:", self.sell_old_ship.as_deref().map(naming::ship))
      .opt_credits("for", self.sell_price)
      .build()
  }
}

impl LedgerEffect for ShipyardBuy {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    let mut note = self.ship();
    if let Some(old) = &self.sell_old_ship {
      note.push_str(&format!(" (sold {})", naming::ship(old)));
    }
    record_cash(
      sink,
      meta,
      note,
      self.sell_price.unwrap_or(0) - self.ship_price,
    );
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipyardSell {
  pub ship_type:           String,
  #[serde(rename = "ShipType_Localised")]
  pub ship_type_localised: Option<String>,
  #[serde(rename = "SellShipID")]
  pub sell_ship_id:        u64,
  pub ship_price:          i64,
  /// Present when the ship was sold remotely.
  pub system:              Option<String>,
  #[serde(rename = "MarketID")]
  pub market_id:           Option<u64>,
}

impl ShipyardSell {
  pub fn ship(&self) -> String { ship_name(&self.ship_type, self.ship_type_localised.as_deref()) }
}

impl Describe for ShipyardSell {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", self.ship())
      .credits("Amount:", self.ship_price)
      .opt_text("At:", self.system.as_deref())
      .build()
  }
}

impl LedgerEffect for ShipyardSell {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, self.ship(), self.ship_price);
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipyardSwap {
  pub ship_type:           String,
  #[serde(rename = "ShipType_Localised")]
  pub ship_type_localised: Option<String>,
  #[serde(rename = "ShipID")]
  pub ship_id:             u64,
  pub store_old_ship:      Option<String>,
  #[serde(rename = "StoreShipID")]
  pub store_ship_id:       Option<u64>,
  pub sell_old_ship:       Option<String>,
  #[serde(rename = "SellShipID")]
  pub sell_ship_id:        Option<u64>,
  #[serde(rename = "MarketID")]
  pub market_id:           Option<u64>,
}

impl Describe for ShipyardSwap {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("Swap to", ship_name(&self.ship_type, self.ship_type_localised.as_deref()))
      .opt_text("Stored:", self.store_old_ship.as_deref().map(naming::ship))
      .opt_text("Sold:", self.sell_old_ship.as_deref().map(naming::ship))
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipyardTransfer {
  pub ship_type:           String,
  #[serde(rename = "ShipType_Localised")]
  pub ship_type_localised: Option<String>,
  #[serde(rename = "ShipID")]
  pub ship_id:             u64,
  pub system:              String,
  #[serde(rename = "ShipMarketID")]
  pub ship_market_id:      Option<u64>,
  pub distance:            f64,
  pub transfer_price:      i64,
  /// Seconds.
  pub transfer_time:       Option<i64>,
  #[serde(rename = "MarketID")]
  pub market_id:           Option<u64>,
}

impl ShipyardTransfer {
  pub fn ship(&self) -> String { ship_name(&self.ship_type, self.ship_type_localised.as_deref()) }
}

impl Describe for ShipyardTransfer {
  fn info(&self) -> String {
    let eta = self
      .transfer_time
      .filter(|secs| *secs > 0)
      .map(|secs| format!("{}:{:02}", secs / 3600, (secs % 3600) / 60));
    FieldBuilder::new()
      .text("", self.ship())
      .text("From", &self.system)
      .text("Distance:", light_years(self.distance))
      .credits("Price:", self.transfer_price)
      .opt_text("Transfer Time:", eta)
      .build()
  }
}

impl LedgerEffect for ShipyardTransfer {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, format!("{} transfer", self.ship()), -self.transfer_price);
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShipyardNew {
  pub ship_type:           String,
  #[serde(rename = "ShipType_Localised")]
  pub ship_type_localised: Option<String>,
  #[serde(rename = "NewShipID")]
  pub new_ship_id:         u64,
}

impl Describe for ShipyardNew {
  fn info(&self) -> String {
    ship_name(&self.ship_type, self.ship_type_localised.as_deref())
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SetUserShipName {
  pub ship:           String,
  #[serde(rename = "ShipID")]
  pub ship_id:        u64,
  pub user_ship_name: String,
  pub user_ship_id:   String,
}

impl Describe for SetUserShipName {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", naming::ship(&self.ship))
      .text("", &self.user_ship_name)
      .text("", &self.user_ship_id)
      .build()
  }
}

// ─── Outfitting ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModuleBuy {
  pub slot:                  String,
  pub buy_item:              String,
  #[serde(rename = "BuyItem_Localised")]
  pub buy_item_localised:    Option<String>,
  pub buy_price:             i64,
  pub sell_item:             Option<String>,
  #[serde(rename = "SellItem_Localised")]
  pub sell_item_localised:   Option<String>,
  pub sell_price:            Option<i64>,
  pub stored_item:           Option<String>,
  #[serde(rename = "StoredItem_Localised")]
  pub stored_item_localised: Option<String>,
  pub ship:                  String,
  #[serde(rename = "ShipID")]
  pub ship_id:               u64,
}

impl ModuleBuy {
  pub fn item(&self) -> String {
    module_name(&self.buy_item, self.buy_item_localised.as_deref())
  }
}

impl Describe for ModuleBuy {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", naming::split_caps(&self.slot))
      .text("", self.item())
      .credits("Price:", self.buy_price)
      .opt_text(
        "Sold:",
        self
          .sell_item
          .as_deref()
          .map(|fd| module_name(fd, self.sell_item_localised.as_deref())),
      )
      .opt_credits("for", self.sell_price)
      .opt_text(
        "Stored:",
        self
          .stored_item
          .as_deref()
          .map(|fd| module_name(fd, self.stored_item_localised.as_deref())),
      )
      .build()
  }
}

impl LedgerEffect for ModuleBuy {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(
      sink,
      meta,
      self.item(),
      self.sell_price.unwrap_or(0) - self.buy_price,
    );
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModuleSell {
  pub slot:                String,
  pub sell_item:           String,
  #[serde(rename = "SellItem_Localised")]
  pub sell_item_localised: Option<String>,
  pub sell_price:          i64,
  pub ship:                String,
  #[serde(rename = "ShipID")]
  pub ship_id:             u64,
}

impl ModuleSell {
  pub fn item(&self) -> String {
    module_name(&self.sell_item, self.sell_item_localised.as_deref())
  }
}

impl Describe for ModuleSell {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", naming::split_caps(&self.slot))
      .text("", self.item())
      .credits("Price:", self.sell_price)
      .build()
  }
}

impl LedgerEffect for ModuleSell {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, self.item(), self.sell_price);
  }
}

/// `ModuleStore` and `ModuleRetrieve`. The item key differs
/// (`StoredItem` / `RetrievedItem`); both are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModuleStorage {
  pub slot:                   String,
  #[serde(alias = "RetrievedItem")]
  pub stored_item:            String,
  #[serde(rename = "StoredItem_Localised", alias = "RetrievedItem_Localised")]
  pub item_localised:         Option<String>,
  pub ship:                   String,
  #[serde(rename = "ShipID")]
  pub ship_id:                u64,
  pub hot:                    bool,
  pub engineer_modifications: Option<String>,
  pub level:                  Option<i64>,
  pub quality:                Option<f64>,
  pub replacement_item:       Option<String>,
  pub swap_out_item:          Option<String>,
  pub cost:                   i64,
}

impl ModuleStorage {
  pub fn item(&self) -> String {
    module_name(&self.stored_item, self.item_localised.as_deref())
  }
}

impl Describe for ModuleStorage {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", naming::split_caps(&self.slot))
      .text("", self.item())
      .nonzero_credits("Cost:", self.cost)
      .opt_text(
        "Blueprint:",
        self.engineer_modifications.as_deref().map(naming::split_caps),
      )
      .opt_int("Level:", self.level)
      .flag("Hot", self.hot)
      .build()
  }
}

impl LedgerEffect for ModuleStorage {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    if self.cost != 0 {
      record_cash(sink, meta, self.item(), -self.cost);
    }
  }
}

pub type ModuleStore = ModuleStorage;
pub type ModuleRetrieve = ModuleStorage;

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn retrieve_uses_alias() {
    let m: ModuleRetrieve = serde_json::from_value(json!({
      "Slot": "Slot01_Size6",
      "RetrievedItem": "$int_shieldgenerator_size6_class5_name;",
      "RetrievedItem_Localised": "Shield Generator",
      "Ship": "python",
      "ShipID": 3,
      "Hot": false,
      "EngineerModifications": "ShieldGenerator_Reinforced",
      "Level": 5,
      "Cost": 0
    }))
    .unwrap();
    assert_eq!(m.item(), "Shield Generator");
    assert!(m.info().contains("Level: 5"));
  }

  #[test]
  fn transfer_eta() {
    let t: ShipyardTransfer = serde_json::from_value(json!({
      "ShipType": "krait_mkii",
      "ShipType_Localised": "Krait Mk II",
      "ShipID": 7,
      "System": "Sol",
      "Distance": 22.75,
      "TransferPrice": 34000,
      "TransferTime": 5430
    }))
    .unwrap();
    assert_eq!(
      t.info(),
      "Krait Mk II, From Sol, Distance: 22.75 ly, Price: 34,000 cr, Transfer Time: 1:30"
    );
  }
}
