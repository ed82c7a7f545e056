//! Fleet carrier management.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use starlog_core::{
  effect::{
    CarrierCrew, CarrierEffect, CarrierSink, CarrierSnapshot, CarrierUpdate,
    EntryMeta, LedgerEffect, LedgerSink, record_cash,
  },
  naming,
};

use super::trade::commodity_name;
use crate::{
  describe::Describe,
  fields::{FieldBuilder, light_years, lines},
};

fn access_name(access: &str) -> String {
  match access.to_ascii_lowercase().as_str() {
    "all" => "All".into(),
    "none" => "None".into(),
    "friends" => "Friends".into(),
    "squadron" => "Squadron".into(),
    "squadronfriends" => "Squadron and Friends".into(),
    _ => naming::split_caps(access),
  }
}

// ─── Purchase and status ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierBuy {
  pub bought_at_market: Option<u64>,
  #[serde(rename = "CarrierID")]
  pub carrier_id:       u64,
  pub location:         String,
  pub price:            i64,
  pub variant:          String,
  pub callsign:         String,
}

impl Describe for CarrierBuy {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.callsign)
      .text("At", &self.location)
      .credits("Price:", self.price)
      .build()
  }
}

impl CarrierEffect for CarrierBuy {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::Bought {
      carrier_id: self.carrier_id,
      callsign:   self.callsign.clone(),
      location:   self.location.clone(),
      price:      self.price,
    });
  }
}

impl LedgerEffect for CarrierBuy {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, format!("Carrier {}", self.callsign), -self.price);
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SpaceUsage {
  pub total_capacity:       i64,
  pub crew:                 i64,
  pub cargo:                i64,
  pub cargo_space_reserved: i64,
  pub ship_packs:           i64,
  pub module_packs:         i64,
  pub free_space:           i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierFinances {
  pub carrier_balance:   i64,
  pub reserve_balance:   i64,
  pub available_balance: i64,
  pub reserve_percent:   i64,
  pub tax_rate:          Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CrewMember {
  pub crew_role: String,
  pub activated: bool,
  pub enabled:   bool,
  pub crew_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierStats {
  #[serde(rename = "CarrierID")]
  pub carrier_id:           u64,
  pub callsign:             String,
  pub name:                 String,
  pub docking_access:       String,
  pub allow_notorious:      bool,
  pub fuel_level:           i64,
  #[serde(rename = "JumpRangeCurr")]
  pub jump_range_current:   f64,
  pub jump_range_max:       f64,
  pub pending_decommission: bool,
  pub space_usage:          SpaceUsage,
  pub finance:              CarrierFinances,
  pub crew:                 Vec<CrewMember>,
}

impl CarrierStats {
  pub fn snapshot(&self) -> CarrierSnapshot {
    CarrierSnapshot {
      carrier_id:           self.carrier_id,
      callsign:             self.callsign.clone(),
      name:                 self.name.clone(),
      docking_access:       self.docking_access.clone(),
      allow_notorious:      self.allow_notorious,
      fuel_level:           self.fuel_level,
      jump_range_current:   self.jump_range_current,
      jump_range_max:       self.jump_range_max,
      pending_decommission: self.pending_decommission,
      total_capacity:       self.space_usage.total_capacity,
      free_space:           self.space_usage.free_space,
      balance:              self.finance.carrier_balance,
      reserve_balance:      self.finance.reserve_balance,
      available_balance:    self.finance.available_balance,
      crew:                 self
        .crew
        .iter()
        .map(|c| CarrierCrew {
          role:      c.crew_role.clone(),
          activated: c.activated,
          enabled:   c.enabled,
          crew_name: c.crew_name.clone(),
        })
        .collect(),
    }
  }
}

impl Describe for CarrierStats {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.name)
      .text("", &self.callsign)
      .int("Fuel:", self.fuel_level)
      .credits("Balance:", self.finance.carrier_balance)
      .int("Free space:", self.space_usage.free_space)
      .flag("Pending Decommission", self.pending_decommission)
      .build()
  }

  fn detailed(&self) -> String {
    let usage = &self.space_usage;
    let crew = lines(
      "  ",
      self.crew.iter().filter(|c| c.activated).map(|c| {
        FieldBuilder::new()
          .text("", naming::split_caps(&c.crew_role))
          .opt_text("", c.crew_name.as_deref())
          .flag("Disabled", !c.enabled)
          .build()
      }),
    );
    FieldBuilder::new()
      .text("Access:", access_name(&self.docking_access))
      .flag("Notorious allowed", self.allow_notorious)
      .text(
        "Jump range:",
        format!(
          "{} / {}",
          light_years(self.jump_range_current),
          light_years(self.jump_range_max)
        ),
      )
      .line()
      .int("Capacity:", usage.total_capacity)
      .int("Crew:", usage.crew)
      .int("Cargo:", usage.cargo)
      .int("Reserved:", usage.cargo_space_reserved)
      .int("Ships:", usage.ship_packs)
      .int("Modules:", usage.module_packs)
      .line()
      .credits("Reserve:", self.finance.reserve_balance)
      .credits("Available:", self.finance.available_balance)
      .int("Reserve %:", self.finance.reserve_percent)
      .opt_float("Tax:", self.finance.tax_rate, 0, "%")
      .block(if crew.is_empty() { String::new() } else { format!("Services:\n{crew}") })
      .build()
  }
}

impl CarrierEffect for CarrierStats {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::Stats(Box::new(self.snapshot())));
  }
}

// ─── Jumps and decommission ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierJumpRequest {
  #[serde(rename = "CarrierID")]
  pub carrier_id:     u64,
  pub system_name:    String,
  pub body:           Option<String>,
  pub system_address: Option<u64>,
  #[serde(rename = "BodyID")]
  pub body_id:        Option<i64>,
  pub departure_time: Option<DateTime<Utc>>,
}

impl Describe for CarrierJumpRequest {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("To", &self.system_name)
      .opt_text("", self.body.as_deref().filter(|b| *b != self.system_name))
      .opt_text(
        "Departure:",
        self.departure_time.map(|t| t.format("%Y-%m-%d %H:%M").to_string()),
      )
      .build()
  }
}

impl CarrierEffect for CarrierJumpRequest {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::JumpRequested {
      system:    self.system_name.clone(),
      body:      self.body.clone(),
      departure: self.departure_time,
    });
  }
}

/// Events that carry nothing but the carrier id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierRef {
  #[serde(rename = "CarrierID")]
  pub carrier_id: u64,
}

impl Describe for CarrierRef {
  fn info(&self) -> String { String::new() }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CarrierJumpCancelled(pub CarrierRef);

impl Describe for CarrierJumpCancelled {
  fn info(&self) -> String { self.0.info() }
}

impl CarrierEffect for CarrierJumpCancelled {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::JumpCancelled);
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CarrierCancelDecommission(pub CarrierRef);

impl Describe for CarrierCancelDecommission {
  fn info(&self) -> String { self.0.info() }
}

impl CarrierEffect for CarrierCancelDecommission {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::DecommissionCancelled);
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierDecommission {
  #[serde(rename = "CarrierID")]
  pub carrier_id:   u64,
  pub scrap_refund: i64,
  /// Unix seconds.
  pub scrap_time:   Option<i64>,
}

impl CarrierDecommission {
  pub fn scrap_at(&self) -> Option<DateTime<Utc>> {
    self.scrap_time.and_then(|secs| DateTime::from_timestamp(secs, 0))
  }
}

impl Describe for CarrierDecommission {
  fn info(&self) -> String {
    FieldBuilder::new()
      .credits("Refund:", self.scrap_refund)
      .opt_text(
        "At:",
        self.scrap_at().map(|t| t.format("%Y-%m-%d %H:%M").to_string()),
      )
      .build()
  }
}

impl CarrierEffect for CarrierDecommission {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::DecommissionScheduled {
      refund: self.scrap_refund,
      at:     self.scrap_at(),
    });
  }
}

// ─── Finance ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierBankTransfer {
  #[serde(rename = "CarrierID")]
  pub carrier_id:      u64,
  pub deposit:         i64,
  pub withdraw:        i64,
  pub player_balance:  i64,
  pub carrier_balance: i64,
}

impl Describe for CarrierBankTransfer {
  fn info(&self) -> String {
    FieldBuilder::new()
      .nonzero_credits("Deposit:", self.deposit)
      .nonzero_credits("Withdraw:", self.withdraw)
      .credits("Carrier Balance:", self.carrier_balance)
      .build()
  }
}

impl CarrierEffect for CarrierBankTransfer {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::BankTransfer {
      deposit:  self.deposit,
      withdraw: self.withdraw,
      balance:  self.carrier_balance,
    });
  }
}

impl LedgerEffect for CarrierBankTransfer {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    record_cash(sink, meta, "Carrier bank", self.withdraw - self.deposit);
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierDepositFuel {
  #[serde(rename = "CarrierID")]
  pub carrier_id: u64,
  pub amount:     i64,
  pub total:      i64,
}

impl Describe for CarrierDepositFuel {
  fn info(&self) -> String {
    FieldBuilder::new()
      .int("Amount:", self.amount)
      .int("Fuel:", self.total)
      .build()
  }
}

impl CarrierEffect for CarrierDepositFuel {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::FuelDeposited {
      amount: self.amount,
      total:  self.total,
    });
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierCrewServices {
  #[serde(rename = "CarrierID")]
  pub carrier_id: u64,
  pub crew_role:  String,
  pub operation:  String,
  pub crew_name:  Option<String>,
}

impl Describe for CarrierCrewServices {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", naming::split_caps(&self.crew_role))
      .text("", naming::split_caps(&self.operation))
      .opt_text("", self.crew_name.as_deref())
      .build()
  }
}

impl CarrierEffect for CarrierCrewServices {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::CrewService {
      role:      self.crew_role.clone(),
      operation: self.operation.clone(),
      crew_name: self.crew_name.clone(),
    });
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierFinance {
  #[serde(rename = "CarrierID")]
  pub carrier_id:        u64,
  pub tax_rate:          Option<f64>,
  pub carrier_balance:   i64,
  pub reserve_balance:   i64,
  pub available_balance: i64,
  pub reserve_percent:   i64,
}

impl Describe for CarrierFinance {
  fn info(&self) -> String {
    FieldBuilder::new()
      .opt_float("Tax:", self.tax_rate, 0, "%")
      .int("Reserve %:", self.reserve_percent)
      .credits("Balance:", self.carrier_balance)
      .credits("Available:", self.available_balance)
      .build()
  }
}

impl CarrierEffect for CarrierFinance {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::Finance {
      tax_rate:        self.tax_rate,
      reserve_percent: self.reserve_percent,
    });
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierTradeOrder {
  #[serde(rename = "CarrierID")]
  pub carrier_id:          u64,
  pub black_market:        bool,
  pub commodity:           String,
  #[serde(rename = "Commodity_Localised")]
  pub commodity_localised: Option<String>,
  pub purchase_order:      Option<i64>,
  pub sale_order:          Option<i64>,
  pub cancel_trade:        bool,
  pub price:               Option<i64>,
}

impl Describe for CarrierTradeOrder {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", commodity_name(&self.commodity, self.commodity_localised.as_deref()))
      .opt_int("Buy:", self.purchase_order)
      .opt_int("Sell:", self.sale_order)
      .opt_credits("Price:", self.price)
      .flag("Cancelled", self.cancel_trade)
      .flag("Black Market", self.black_market)
      .build()
  }
}

impl CarrierEffect for CarrierTradeOrder {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::TradeOrder {
      commodity:    self.commodity.to_ascii_lowercase(),
      purchase:     self.purchase_order,
      sale:         self.sale_order,
      cancel:       self.cancel_trade,
      price:        self.price,
      black_market: self.black_market,
    });
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierDockingPermission {
  #[serde(rename = "CarrierID")]
  pub carrier_id:      u64,
  pub docking_access:  String,
  pub allow_notorious: bool,
}

impl Describe for CarrierDockingPermission {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("Access:", access_name(&self.docking_access))
      .flag("Notorious allowed", self.allow_notorious)
      .build()
  }
}

impl CarrierEffect for CarrierDockingPermission {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::DockingPermission {
      access:          self.docking_access.clone(),
      allow_notorious: self.allow_notorious,
    });
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CarrierNameChange {
  #[serde(rename = "CarrierID")]
  pub carrier_id: u64,
  pub name:       String,
  pub callsign:   String,
}

impl Describe for CarrierNameChange {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.name)
      .text("", &self.callsign)
      .build()
  }
}

impl CarrierEffect for CarrierNameChange {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::Renamed {
      name:     self.name.clone(),
      callsign: self.callsign.clone(),
    });
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn stats_snapshot() {
    let stats: CarrierStats = serde_json::from_value(json!({
      "CarrierID": 3700000000u64,
      "Callsign": "K7Q-1HT",
      "Name": "DISTANT HORIZON",
      "DockingAccess": "squadronfriends",
      "AllowNotorious": false,
      "FuelLevel": 800,
      "JumpRangeCurr": 500.0,
      "JumpRangeMax": 500.0,
      "PendingDecommission": false,
      "SpaceUsage": { "TotalCapacity": 25000, "Crew": 1870, "FreeSpace": 23130 },
      "Finance": { "CarrierBalance": 2000000000, "ReserveBalance": 5000000, "AvailableBalance": 1995000000, "ReservePercent": 0 },
      "Crew": [
        { "CrewRole": "Refuel", "Activated": true, "Enabled": true, "CrewName": "Alia" },
        { "CrewRole": "BlackMarket", "Activated": false, "Enabled": false }
      ]
    }))
    .unwrap();
    let snap = stats.snapshot();
    assert_eq!(snap.callsign, "K7Q-1HT");
    assert_eq!(snap.balance, 2_000_000_000);
    assert_eq!(snap.crew.len(), 2);
    let detail = stats.detailed();
    assert!(detail.contains("Access: Squadron and Friends"));
    assert!(detail.contains("Services:\n  Refuel, Alia"));
    assert!(!detail.contains("Black Market"));
  }

  #[test]
  fn decommission_time_from_unix() {
    let d: CarrierDecommission = serde_json::from_value(json!({
      "CarrierID": 1,
      "ScrapRefund": 4850000000u64,
      "ScrapTime": 1700000000
    }))
    .unwrap();
    assert_eq!(d.scrap_at().map(|t| t.timestamp()), Some(1_700_000_000));
  }
}
