//! The event-type tag carried by every journal entry.
//!
//! The tag is decoded from the `event` key of a journal line. Names the layer
//! does not know about are kept verbatim in [`EventType::Unknown`] so callers
//! can still display and count them.

use std::fmt;

use strum::{AsRefStr, EnumIter, EnumMessage, EnumString};

use crate::naming;

/// Every journal event this layer decodes into a typed body.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, AsRefStr, EnumIter, EnumMessage, EnumString,
)]
pub enum EventType {
  // ── Session ─────────────────────────────────────────────────────────────
  #[strum(message = "File Header")]
  Fileheader,
  Commander,
  LoadGame,
  Rank,
  Progress,
  Promotion,
  Reputation,
  Statistics,
  Shutdown,

  // ── Trade ───────────────────────────────────────────────────────────────
  Cargo,
  MarketBuy,
  MarketSell,
  BuyDrones,
  SellDrones,
  CollectCargo,
  EjectCargo,
  MiningRefined,
  CargoDepot,

  // ── Materials & engineering ─────────────────────────────────────────────
  Materials,
  MaterialCollected,
  MaterialDiscarded,
  MaterialTrade,
  Synthesis,
  EngineerCraft,
  EngineerContribution,
  EngineerProgress,

  // ── Travel ──────────────────────────────────────────────────────────────
  #[strum(serialize = "FSDJump", message = "Jump")]
  FsdJump,
  Location,
  CarrierJump,
  StartJump,
  #[strum(serialize = "FSDTarget", message = "FSD Target")]
  FsdTarget,
  SupercruiseEntry,
  SupercruiseExit,
  ApproachBody,
  LeaveBody,
  Touchdown,
  Liftoff,
  FuelScoop,
  JetConeBoost,
  #[strum(message = "Nav Route")]
  NavRoute,
  #[strum(serialize = "LaunchSRV", message = "Launch SRV")]
  LaunchSrv,
  #[strum(serialize = "DockSRV", message = "Dock SRV")]
  DockSrv,

  // ── Station services ────────────────────────────────────────────────────
  Docked,
  Undocked,
  DockingRequested,
  DockingGranted,
  DockingDenied,
  DockingCancelled,
  DockingTimeout,
  RefuelAll,
  RefuelPartial,
  Repair,
  RepairAll,
  BuyAmmo,
  RestockVehicle,

  // ── Shipyard & outfitting ───────────────────────────────────────────────
  ShipyardBuy,
  ShipyardSell,
  ShipyardSwap,
  ShipyardTransfer,
  ShipyardNew,
  SetUserShipName,
  ModuleBuy,
  ModuleSell,
  ModuleStore,
  ModuleRetrieve,

  // ── Missions ────────────────────────────────────────────────────────────
  MissionAccepted,
  MissionCompleted,
  MissionFailed,
  MissionAbandoned,
  MissionRedirected,
  Missions,

  // ── Combat & crime ──────────────────────────────────────────────────────
  Bounty,
  FactionKillBond,
  CapShipBond,
  RedeemVoucher,
  PayFines,
  PayBounties,
  CommitCrime,
  Died,
  Resurrect,
  Interdicted,
  Interdiction,
  EscapeInterdiction,
  HullDamage,

  // ── Exploration ─────────────────────────────────────────────────────────
  Scan,
  #[strum(serialize = "FSSDiscoveryScan", message = "Discovery Scan")]
  FssDiscoveryScan,
  #[strum(serialize = "FSSAllBodiesFound", message = "All Bodies Found")]
  FssAllBodiesFound,
  #[strum(serialize = "FSSSignalDiscovered", message = "Signal Discovered")]
  FssSignalDiscovered,
  #[strum(serialize = "FSSBodySignals", message = "Body Signals")]
  FssBodySignals,
  #[strum(serialize = "SAASignalsFound", message = "Surface Signals Found")]
  SaaSignalsFound,
  #[strum(serialize = "SAAScanComplete", message = "Surface Mapping Complete")]
  SaaScanComplete,
  DiscoveryScan,
  NavBeaconScan,
  CodexEntry,
  ScanOrganic,
  SellExplorationData,
  #[strum(message = "Sell Exploration Data")]
  MultiSellExplorationData,
  SellOrganicData,
  BuyExplorationData,

  // ── Fleet carrier ───────────────────────────────────────────────────────
  CarrierBuy,
  CarrierStats,
  CarrierJumpRequest,
  CarrierJumpCancelled,
  CarrierDecommission,
  CarrierCancelDecommission,
  CarrierBankTransfer,
  CarrierDepositFuel,
  CarrierCrewServices,
  CarrierFinance,
  CarrierTradeOrder,
  CarrierDockingPermission,
  CarrierNameChange,

  // ── Social, crew & powerplay ────────────────────────────────────────────
  ReceiveText,
  SendText,
  WingJoin,
  WingAdd,
  WingLeave,
  CrewHire,
  CrewFire,
  #[strum(message = "NPC Crew Paid Wage")]
  NpcCrewPaidWage,
  PowerplayJoin,
  PowerplayLeave,
  PowerplaySalary,

  /// Any event name not listed above, kept verbatim.
  #[strum(default)]
  Unknown(String),
}

impl EventType {
  /// Decode a journal `event` name. Never fails; unrecognised names become
  /// [`EventType::Unknown`].
  pub fn from_name(name: &str) -> Self {
    name
      .parse()
      .unwrap_or_else(|_| Self::Unknown(name.to_string()))
  }

  /// The journal name of this event, exactly as the game writes it.
  pub fn name(&self) -> &str {
    match self {
      Self::Unknown(name) => name,
      other => other.as_ref(),
    }
  }

  /// A human-readable title for log views.
  pub fn summary_name(&self) -> String {
    match self.get_message() {
      Some(message) => message.to_string(),
      None => naming::split_caps(self.name()),
    }
  }

  pub fn is_unknown(&self) -> bool { matches!(self, Self::Unknown(_)) }
}

impl fmt::Display for EventType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn known_names_round_trip() {
    for ty in EventType::iter().filter(|t| !t.is_unknown()) {
      assert_eq!(EventType::from_name(ty.name()), ty, "{}", ty.name());
    }
  }

  #[test]
  fn acronym_names_use_journal_spelling() {
    assert_eq!(EventType::from_name("FSDJump"), EventType::FsdJump);
    assert_eq!(EventType::FsdJump.name(), "FSDJump");
    assert_eq!(EventType::SaaSignalsFound.name(), "SAASignalsFound");
    assert_eq!(EventType::LaunchSrv.name(), "LaunchSRV");
  }

  #[test]
  fn unknown_names_are_preserved() {
    let ty = EventType::from_name("SquadronStartup");
    assert_eq!(ty, EventType::Unknown("SquadronStartup".to_string()));
    assert_eq!(ty.name(), "SquadronStartup");
    assert_eq!(ty.to_string(), "SquadronStartup");
    assert_eq!(ty.summary_name(), "Squadron Startup");
  }

  #[test]
  fn summary_names() {
    assert_eq!(EventType::FsdJump.summary_name(), "Jump");
    assert_eq!(EventType::MarketBuy.summary_name(), "Market Buy");
    assert_eq!(
      EventType::MultiSellExplorationData.summary_name(),
      "Sell Exploration Data"
    );
  }
}
