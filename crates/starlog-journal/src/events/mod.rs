//! Typed bodies for every known journal event.
//!
//! Each submodule covers one area of play. [`EventBody`] ties an
//! [`EventType`] to the struct its JSON decodes into; the table below is the
//! only place that mapping is written.

pub mod carrier;
pub mod combat;
pub mod exploration;
pub mod materials;
pub mod missions;
pub mod session;
pub mod shipyard;
pub mod social;
pub mod station;
pub mod trade;
pub mod travel;

use serde_json::Value;
use starlog_core::EventType;

use self::{
  carrier::*, combat::*, exploration::*, materials::*, missions::*,
  session::*, shipyard::*, social::*, station::*, trade::*, travel::*,
};
use crate::{describe::Describe, scan::Scan};

macro_rules! event_bodies {
  ($($variant:ident => $body:ty),* $(,)?) => {
    /// The decoded body of one journal entry.
    #[derive(Debug, Clone)]
    pub enum EventBody {
      $($variant($body),)*
      /// The event name is not one this layer knows.
      Unknown,
      /// A known event whose body could not be decoded at all.
      Unparsed,
    }

    impl EventBody {
      /// Decode the body of a `event_type` entry. Unknown names decode to
      /// [`EventBody::Unknown`]. `null` members and members of the wrong
      /// type read as absent; only a body that still cannot decode is an
      /// error.
      pub fn decode(
        event_type: &EventType,
        json: &Value,
      ) -> serde_json::Result<Self> {
        match event_type {
          $(EventType::$variant => {
            crate::de::decode_body::<$body>(json).map(Self::$variant)
          })*
          EventType::Unknown(_) => Ok(Self::Unknown),
        }
      }

      pub fn describer(&self) -> Option<&dyn Describe> {
        match self {
          $(Self::$variant(body) => Some(body),)*
          Self::Unknown | Self::Unparsed => None,
        }
      }
    }
  };
}

event_bodies! {
  // session
  Fileheader => Fileheader,
  Commander => Commander,
  LoadGame => Box<LoadGame>,
  Rank => Rank,
  Progress => Progress,
  Promotion => Promotion,
  Reputation => Reputation,
  Statistics => Box<Statistics>,
  Shutdown => Shutdown,

  // trade
  Cargo => Cargo,
  MarketBuy => MarketBuy,
  MarketSell => MarketSell,
  BuyDrones => BuyDrones,
  SellDrones => SellDrones,
  CollectCargo => CollectCargo,
  EjectCargo => EjectCargo,
  MiningRefined => MiningRefined,
  CargoDepot => CargoDepot,

  // materials
  Materials => Materials,
  MaterialCollected => MaterialCollected,
  MaterialDiscarded => MaterialDiscarded,
  MaterialTrade => MaterialTrade,
  Synthesis => Synthesis,
  EngineerCraft => Box<EngineerCraft>,
  EngineerContribution => EngineerContribution,
  EngineerProgress => EngineerProgress,

  // travel
  FsdJump => Box<FsdJump>,
  Location => Box<Location>,
  CarrierJump => Box<CarrierJump>,
  StartJump => StartJump,
  FsdTarget => FsdTarget,
  SupercruiseEntry => SupercruiseEntry,
  SupercruiseExit => SupercruiseExit,
  ApproachBody => ApproachBody,
  LeaveBody => LeaveBody,
  Touchdown => Touchdown,
  Liftoff => Liftoff,
  FuelScoop => FuelScoop,
  JetConeBoost => JetConeBoost,
  NavRoute => NavRoute,
  LaunchSrv => LaunchSrv,
  DockSrv => DockSrv,

  // station
  Docked => Box<Docked>,
  Undocked => Undocked,
  DockingRequested => DockingRequested,
  DockingGranted => DockingGranted,
  DockingDenied => DockingDenied,
  DockingCancelled => DockingCancelled,
  DockingTimeout => DockingTimeout,
  RefuelAll => RefuelAll,
  RefuelPartial => RefuelPartial,
  Repair => Repair,
  RepairAll => RepairAll,
  BuyAmmo => BuyAmmo,
  RestockVehicle => RestockVehicle,

  // shipyard
  ShipyardBuy => ShipyardBuy,
  ShipyardSell => ShipyardSell,
  ShipyardSwap => ShipyardSwap,
  ShipyardTransfer => ShipyardTransfer,
  ShipyardNew => ShipyardNew,
  SetUserShipName => SetUserShipName,
  ModuleBuy => ModuleBuy,
  ModuleSell => ModuleSell,
  ModuleStore => ModuleStore,
  ModuleRetrieve => ModuleRetrieve,

  // missions
  MissionAccepted => Box<MissionAccepted>,
  MissionCompleted => Box<MissionCompleted>,
  MissionFailed => MissionFailed,
  MissionAbandoned => MissionAbandoned,
  MissionRedirected => MissionRedirected,
  Missions => Missions,

  // combat
  Bounty => Bounty,
  FactionKillBond => FactionKillBond,
  CapShipBond => CapShipBond,
  RedeemVoucher => RedeemVoucher,
  PayFines => PayFines,
  PayBounties => PayBounties,
  CommitCrime => CommitCrime,
  Died => Died,
  Resurrect => Resurrect,
  Interdicted => Interdicted,
  Interdiction => Interdiction,
  EscapeInterdiction => EscapeInterdiction,
  HullDamage => HullDamage,

  // exploration
  Scan => Box<Scan>,
  FssDiscoveryScan => FssDiscoveryScan,
  FssAllBodiesFound => FssAllBodiesFound,
  FssSignalDiscovered => FssSignalDiscovered,
  FssBodySignals => FssBodySignals,
  SaaSignalsFound => SaaSignalsFound,
  SaaScanComplete => SaaScanComplete,
  DiscoveryScan => DiscoveryScan,
  NavBeaconScan => NavBeaconScan,
  CodexEntry => CodexEntry,
  ScanOrganic => ScanOrganic,
  SellExplorationData => SellExplorationData,
  MultiSellExplorationData => MultiSellExplorationData,
  SellOrganicData => SellOrganicData,
  BuyExplorationData => BuyExplorationData,

  // carrier
  CarrierBuy => CarrierBuy,
  CarrierStats => Box<CarrierStats>,
  CarrierJumpRequest => CarrierJumpRequest,
  CarrierJumpCancelled => CarrierJumpCancelled,
  CarrierDecommission => CarrierDecommission,
  CarrierCancelDecommission => CarrierCancelDecommission,
  CarrierBankTransfer => CarrierBankTransfer,
  CarrierDepositFuel => CarrierDepositFuel,
  CarrierCrewServices => CarrierCrewServices,
  CarrierFinance => CarrierFinance,
  CarrierTradeOrder => CarrierTradeOrder,
  CarrierDockingPermission => CarrierDockingPermission,
  CarrierNameChange => CarrierNameChange,

  // social
  ReceiveText => ReceiveText,
  SendText => SendText,
  WingJoin => WingJoin,
  WingAdd => WingAdd,
  WingLeave => WingLeave,
  CrewHire => CrewHire,
  CrewFire => CrewFire,
  NpcCrewPaidWage => NpcCrewPaidWage,
  PowerplayJoin => PowerplayJoin,
  PowerplayLeave => PowerplayLeave,
  PowerplaySalary => PowerplaySalary,
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn every_known_event_decodes_from_an_empty_object() {
    let empty = json!({});
    for ty in EventType::iter().filter(|t| !t.is_unknown()) {
      let body = EventBody::decode(&ty, &empty)
        .unwrap_or_else(|e| panic!("{}: {e}", ty.name()));
      assert!(body.describer().is_some(), "{}", ty.name());
    }
  }

  #[test]
  fn unknown_event_has_no_typed_body() {
    let ty = EventType::from_name("SquadronStartup");
    let body = EventBody::decode(&ty, &json!({ "Name": "x" })).unwrap();
    assert!(matches!(body, EventBody::Unknown));
    assert!(body.describer().is_none());
  }

  #[test]
  fn unreadable_members_read_as_absent() {
    let json = json!({ "Type": "gold", "Count": "many", "BuyPrice": null, "TotalCost": 300 });
    let EventBody::MarketBuy(buy) = EventBody::decode(&EventType::MarketBuy, &json).unwrap() else {
      panic!("expected a MarketBuy body");
    };
    assert_eq!(buy.commodity, "gold");
    assert_eq!(buy.count, 0);
    assert_eq!(buy.buy_price, 0);
    assert_eq!(buy.total_cost, 300);

    assert!(EventBody::decode(&EventType::MarketBuy, &json!("gold")).is_err());
  }
}
