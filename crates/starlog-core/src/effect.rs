//! Effects of journal events on aggregate state.
//!
//! Events that change something beyond their own record (cash, cargo,
//! materials, missions, the fleet carrier, faction statistics) implement one
//! or more of the `*Effect` traits. Accumulators implement the matching
//! `*Sink` trait and are handed to the event; the event decides what to
//! record. Neither side knows about the other's concrete type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::{EventType, material::MaterialCategory};

// ─── Entry identity ──────────────────────────────────────────────────────────

/// Identity of the entry producing an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
  /// Caller-assigned row/sequence id.
  pub id:         i64,
  pub timestamp:  DateTime<Utc>,
  pub event_type: EventType,
}

/// The kinds of effect an event can have.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter,
)]
pub enum Effect {
  Ledger,
  Commodity,
  Material,
  Missions,
  Carrier,
  Stats,
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// One credit movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
  pub meta:        EntryMeta,
  /// Short description, e.g. the commodity or module involved.
  pub note:        String,
  /// Signed change to the commander's balance.
  pub cash_delta:  i64,
  pub count:       Option<i64>,
  pub unit_profit: Option<i64>,
}

pub trait LedgerSink {
  fn record(&mut self, entry: LedgerEntry);

  /// The game reported an absolute balance (e.g. on load).
  fn set_balance(&mut self, meta: &EntryMeta, credits: i64);
}

pub trait LedgerEffect {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink);
}

/// Shorthand used by events: record `cash_delta` with `note`.
pub fn record_cash(
  sink: &mut dyn LedgerSink,
  meta: &EntryMeta,
  note: impl Into<String>,
  cash_delta: i64,
) {
  sink.record(LedgerEntry {
    meta: meta.clone(),
    note: note.into(),
    cash_delta,
    count: None,
    unit_profit: None,
  });
}

// ─── Inventory ───────────────────────────────────────────────────────────────

/// Which inventory an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
  Commodity,
  Material(MaterialCategory),
}

pub trait InventorySink {
  /// Add (`delta > 0`) or remove (`delta < 0`) items. `unit_price` is the
  /// price paid per unit when the change is a purchase.
  fn change(
    &mut self,
    meta: &EntryMeta,
    kind: ItemKind,
    fd_name: &str,
    delta: i64,
    unit_price: Option<i64>,
  );

  /// Overwrite the held count of one item.
  fn set(&mut self, meta: &EntryMeta, kind: ItemKind, fd_name: &str, count: i64);

  /// Zero every item of `kind` ahead of a full inventory listing.
  fn reset(&mut self, meta: &EntryMeta, kind: ItemKind);

  /// Offer the journal's localised display name for an item.
  fn name(&mut self, _kind: ItemKind, _fd_name: &str, _display: &str) {}
}

pub trait CommodityEffect {
  /// `unloading_from_srv` is set by the caller while cargo is moving from
  /// an SRV back to the ship; such movements must not be counted twice.
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    unloading_from_srv: bool,
  );
}

pub trait MaterialEffect {
  fn materials(&self, meta: &EntryMeta, sink: &mut dyn InventorySink);
}

// ─── Missions ────────────────────────────────────────────────────────────────

/// Everything known about a mission at acceptance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionRecord {
  pub mission_id:          u64,
  /// FD name, e.g. `Mission_Delivery_name`.
  pub name:                String,
  pub display_name:        String,
  pub faction:             String,
  pub accepted:            Option<DateTime<Utc>>,
  pub expiry:              Option<DateTime<Utc>>,
  pub destination_system:  Option<String>,
  pub destination_station: Option<String>,
  pub reward:              Option<i64>,
  pub commodity:           Option<String>,
  pub count:               Option<i64>,
  pub kill_count:          Option<i64>,
  pub passengers:          Option<i64>,
  pub wing:                bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MissionUpdate {
  Accepted(Box<MissionRecord>),
  Completed {
    mission_id: u64,
    reward:     i64,
  },
  Failed {
    mission_id: u64,
  },
  Abandoned {
    mission_id: u64,
  },
  Redirected {
    mission_id: u64,
    system:     String,
    station:    String,
  },
  /// The game's list of missions still held, sent at session start.
  Snapshot {
    active:   Vec<u64>,
    failed:   Vec<u64>,
    complete: Vec<u64>,
  },
}

pub trait MissionSink {
  fn update(&mut self, meta: &EntryMeta, update: MissionUpdate);
}

pub trait MissionEffect {
  fn missions(&self, meta: &EntryMeta, sink: &mut dyn MissionSink);
}

// ─── Fleet carrier ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierCrew {
  pub role:      String,
  pub activated: bool,
  pub enabled:   bool,
  pub crew_name: Option<String>,
}

/// A `CarrierStats` report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierSnapshot {
  pub carrier_id:           u64,
  pub callsign:             String,
  pub name:                 String,
  pub docking_access:       String,
  pub allow_notorious:      bool,
  pub fuel_level:           i64,
  pub jump_range_current:   f64,
  pub jump_range_max:       f64,
  pub pending_decommission: bool,
  pub total_capacity:       i64,
  pub free_space:           i64,
  pub balance:              i64,
  pub reserve_balance:      i64,
  pub available_balance:    i64,
  pub crew:                 Vec<CarrierCrew>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CarrierUpdate {
  Bought {
    carrier_id: u64,
    callsign:   String,
    location:   String,
    price:      i64,
  },
  Stats(Box<CarrierSnapshot>),
  JumpRequested {
    system:    String,
    body:      Option<String>,
    departure: Option<DateTime<Utc>>,
  },
  JumpCancelled,
  Jumped {
    system: String,
    body:   Option<String>,
  },
  DecommissionScheduled {
    refund: i64,
    at:     Option<DateTime<Utc>>,
  },
  DecommissionCancelled,
  BankTransfer {
    deposit:  i64,
    withdraw: i64,
    balance:  i64,
  },
  FuelDeposited {
    amount: i64,
    total:  i64,
  },
  CrewService {
    role:      String,
    operation: String,
    crew_name: Option<String>,
  },
  Finance {
    tax_rate:        Option<f64>,
    reserve_percent: i64,
  },
  TradeOrder {
    commodity:    String,
    purchase:     Option<i64>,
    sale:         Option<i64>,
    cancel:       bool,
    price:        Option<i64>,
    black_market: bool,
  },
  DockingPermission {
    access:          String,
    allow_notorious: bool,
  },
  Renamed {
    name:     String,
    callsign: String,
  },
}

pub trait CarrierSink {
  fn update(&mut self, meta: &EntryMeta, update: CarrierUpdate);
}

pub trait CarrierEffect {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink);
}

// ─── Faction statistics ──────────────────────────────────────────────────────

/// Where the commander was when the event happened. Supplied by the caller,
/// which tracks location from travel and docking events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsContext {
  pub system:          Option<String>,
  pub station_faction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactionStat {
  BountyAwarded {
    faction: String,
    reward:  i64,
  },
  BondAwarded {
    faction:      String,
    reward:       i64,
    capital_ship: bool,
  },
  VoucherRedeemed {
    faction: String,
    kind:    String,
    amount:  i64,
  },
  MissionCompleted {
    faction: String,
    reward:  i64,
  },
  /// Influence and reputation change from a completed mission; the values
  /// count the `+` (or `-`) signs the game writes.
  MissionEffect {
    faction:    String,
    influence:  i32,
    reputation: i32,
  },
  /// The failure event does not name the faction; sinks that track
  /// accepted missions can resolve it from `mission_id`.
  MissionFailed {
    mission_id: u64,
    faction:    Option<String>,
  },
  CrimeCommitted {
    faction: String,
    fine:    i64,
    bounty:  i64,
  },
  CommodityBought {
    count: i64,
    cost:  i64,
  },
  CommoditySold {
    count:  i64,
    profit: i64,
  },
  ExplorationSold {
    value: i64,
  },
}

pub trait StatsSink {
  fn record(&mut self, meta: &EntryMeta, context: &StatsContext, stat: FactionStat);
}

pub trait StatsEffect {
  fn stats(
    &self,
    meta: &EntryMeta,
    context: &StatsContext,
    sink: &mut dyn StatsSink,
  );
}
