//! The commander's fleet carrier.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use starlog_core::effect::{CarrierSink, CarrierUpdate, EntryMeta};

#[derive(Debug, Clone, PartialEq)]
pub struct PendingJump {
  pub system:    String,
  pub body:      Option<String>,
  pub departure: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrewStatus {
  Active,
  Paused,
  Inactive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrewService {
  pub status:    CrewStatus,
  pub crew_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeOrder {
  pub purchase:     Option<i64>,
  pub sale:         Option<i64>,
  pub price:        Option<i64>,
  pub black_market: bool,
}

#[derive(Debug, Default)]
pub struct CarrierState {
  pub carrier_id:          Option<u64>,
  pub callsign:            String,
  pub name:                String,
  pub system:              Option<String>,
  pub body:                Option<String>,
  pub pending_jump:        Option<PendingJump>,
  pub jumps:               u32,
  pub decommission_at:     Option<DateTime<Utc>>,
  pub decommission_refund: Option<i64>,
  pub fuel:                i64,
  pub balance:             i64,
  pub reserve_balance:     i64,
  pub available_balance:   i64,
  pub tax_rate:            Option<f64>,
  pub reserve_percent:     i64,
  pub docking_access:      String,
  pub allow_notorious:     bool,
  pub total_capacity:      i64,
  pub free_space:          i64,
  /// Keyed by crew role.
  pub crew:                BTreeMap<String, CrewService>,
  /// Keyed by commodity FD name.
  pub trade_orders:        BTreeMap<String, TradeOrder>,
}

impl CarrierState {
  pub fn new() -> Self { Self::default() }

  /// Whether a carrier has been seen at all.
  pub fn is_known(&self) -> bool { self.carrier_id.is_some() || !self.callsign.is_empty() }

  pub fn pending_decommission(&self) -> bool { self.decommission_at.is_some() }

  fn crew_service(&mut self, role: String, operation: &str, crew_name: Option<String>) {
    let status = match operation.to_ascii_lowercase().as_str() {
      "activate" | "resume" | "replace" => CrewStatus::Active,
      "pause" => CrewStatus::Paused,
      "deactivate" => CrewStatus::Inactive,
      other => {
        tracing::debug!(role = %role, operation = other, "unrecognised crew operation");
        return;
      }
    };
    let service = self.crew.entry(role).or_insert(CrewService {
      status,
      crew_name: None,
    });
    service.status = status;
    if crew_name.is_some() {
      service.crew_name = crew_name;
    }
  }
}

impl CarrierSink for CarrierState {
  fn update(&mut self, meta: &EntryMeta, update: CarrierUpdate) {
    match update {
      CarrierUpdate::Bought {
        carrier_id,
        callsign,
        location,
        price: _,
      } => {
        self.carrier_id = Some(carrier_id);
        self.callsign = callsign;
        self.system = Some(location);
      }
      CarrierUpdate::Stats(snapshot) => {
        let s = *snapshot;
        self.carrier_id = Some(s.carrier_id);
        self.callsign = s.callsign;
        self.name = s.name;
        self.docking_access = s.docking_access;
        self.allow_notorious = s.allow_notorious;
        self.fuel = s.fuel_level;
        self.total_capacity = s.total_capacity;
        self.free_space = s.free_space;
        self.balance = s.balance;
        self.reserve_balance = s.reserve_balance;
        self.available_balance = s.available_balance;
        if !s.pending_decommission {
          self.decommission_at = None;
          self.decommission_refund = None;
        }
        for crew in s.crew {
          let status = match (crew.activated, crew.enabled) {
            (true, true) => CrewStatus::Active,
            (true, false) => CrewStatus::Paused,
            _ => CrewStatus::Inactive,
          };
          self.crew.insert(crew.role, CrewService {
            status,
            crew_name: crew.crew_name,
          });
        }
      }
      CarrierUpdate::JumpRequested {
        system,
        body,
        departure,
      } => {
        self.pending_jump = Some(PendingJump {
          system,
          body,
          departure,
        });
      }
      CarrierUpdate::JumpCancelled => self.pending_jump = None,
      CarrierUpdate::Jumped { system, body } => {
        self.system = Some(system);
        self.body = body;
        self.pending_jump = None;
        self.jumps += 1;
      }
      CarrierUpdate::DecommissionScheduled { refund, at } => {
        self.decommission_refund = Some(refund);
        self.decommission_at = at.or(Some(meta.timestamp));
      }
      CarrierUpdate::DecommissionCancelled => {
        self.decommission_at = None;
        self.decommission_refund = None;
      }
      CarrierUpdate::BankTransfer { balance, .. } => self.balance = balance,
      CarrierUpdate::FuelDeposited { total, .. } => self.fuel = total,
      CarrierUpdate::CrewService {
        role,
        operation,
        crew_name,
      } => self.crew_service(role, &operation, crew_name),
      CarrierUpdate::Finance {
        tax_rate,
        reserve_percent,
      } => {
        self.tax_rate = tax_rate;
        self.reserve_percent = reserve_percent;
      }
      CarrierUpdate::TradeOrder {
        commodity,
        purchase,
        sale,
        cancel,
        price,
        black_market,
      } => {
        if cancel {
          self.trade_orders.remove(&commodity);
        } else {
          self.trade_orders.insert(commodity, TradeOrder {
            purchase,
            sale,
            price,
            black_market,
          });
        }
      }
      CarrierUpdate::DockingPermission {
        access,
        allow_notorious,
      } => {
        self.docking_access = access;
        self.allow_notorious = allow_notorious;
      }
      CarrierUpdate::Renamed { name, callsign } => {
        self.name = name;
        if !callsign.is_empty() {
          self.callsign = callsign;
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use starlog_core::{
    EventType,
    effect::{CarrierCrew, CarrierSnapshot},
  };

  use super::*;

  fn meta() -> EntryMeta {
    EntryMeta {
      id:         1,
      timestamp:  Utc::now(),
      event_type: EventType::CarrierStats,
    }
  }

  #[test]
  fn jump_lifecycle() {
    let mut c = CarrierState::new();
    assert!(!c.is_known());
    c.update(&meta(), CarrierUpdate::Bought {
      carrier_id: 3700000000,
      callsign:   "K7Q-1HT".into(),
      location:   "Sol".into(),
      price:      5_000_000_000,
    });
    assert!(c.is_known());
    c.update(&meta(), CarrierUpdate::JumpRequested {
      system:    "Colonia".into(),
      body:      None,
      departure: None,
    });
    assert_eq!(c.pending_jump.as_ref().unwrap().system, "Colonia");
    c.update(&meta(), CarrierUpdate::JumpCancelled);
    assert!(c.pending_jump.is_none());
    c.update(&meta(), CarrierUpdate::Jumped {
      system: "Shinrarta Dezhra".into(),
      body:   Some("Shinrarta Dezhra A 1".into()),
    });
    assert_eq!(c.system.as_deref(), Some("Shinrarta Dezhra"));
    assert_eq!(c.jumps, 1);
  }

  #[test]
  fn stats_snapshot_and_services() {
    let mut c = CarrierState::new();
    c.update(
      &meta(),
      CarrierUpdate::Stats(Box::new(CarrierSnapshot {
        carrier_id: 1,
        callsign: "ABC-123".into(),
        name: "Deep Dive".into(),
        fuel_level: 800,
        balance: 1_000_000,
        crew: vec![CarrierCrew {
          role: "Refuel".into(),
          activated: true,
          enabled: false,
          crew_name: Some("Ada".into()),
        }],
        ..Default::default()
      })),
    );
    assert_eq!(c.fuel, 800);
    assert_eq!(c.crew["Refuel"].status, CrewStatus::Paused);

    c.update(&meta(), CarrierUpdate::CrewService {
      role:      "Refuel".into(),
      operation: "Resume".into(),
      crew_name: None,
    });
    assert_eq!(c.crew["Refuel"].status, CrewStatus::Active);
    assert_eq!(c.crew["Refuel"].crew_name.as_deref(), Some("Ada"));

    c.update(&meta(), CarrierUpdate::TradeOrder {
      commodity:    "tritium".into(),
      purchase:     Some(1000),
      sale:         None,
      cancel:       false,
      price:        Some(50_000),
      black_market: false,
    });
    assert!(c.trade_orders.contains_key("tritium"));
    c.update(&meta(), CarrierUpdate::TradeOrder {
      commodity:    "tritium".into(),
      purchase:     None,
      sale:         None,
      cancel:       true,
      price:        None,
      black_market: false,
    });
    assert!(c.trade_orders.is_empty());

    c.update(&meta(), CarrierUpdate::DecommissionScheduled {
      refund: 4_000_000_000,
      at:     None,
    });
    assert!(c.pending_decommission());
    c.update(&meta(), CarrierUpdate::DecommissionCancelled);
    assert!(!c.pending_decommission());
  }
}
