//! Which effect traits each event body implements.
//!
//! Accumulators ask a body for one view at a time; a `None` means the event
//! has no effect of that kind.

use starlog_core::effect::{
  CarrierEffect, CommodityEffect, Effect, LedgerEffect, MaterialEffect,
  MissionEffect, StatsEffect,
};

use crate::events::EventBody;

impl EventBody {
  pub fn as_ledger(&self) -> Option<&dyn LedgerEffect> {
    let effect: &dyn LedgerEffect = match self {
      Self::LoadGame(b) => &**b,
      Self::MarketBuy(b) => b,
      Self::MarketSell(b) => b,
      Self::BuyDrones(b) => b,
      Self::SellDrones(b) => b,
      Self::RefuelAll(b) | Self::RefuelPartial(b) => b,
      Self::Repair(b) => b,
      Self::RepairAll(b) | Self::BuyAmmo(b) => b,
      Self::RestockVehicle(b) => b,
      Self::ShipyardBuy(b) => b,
      Self::ShipyardSell(b) => b,
      Self::ShipyardTransfer(b) => b,
      Self::ModuleBuy(b) => b,
      Self::ModuleSell(b) => b,
      Self::ModuleStore(b) | Self::ModuleRetrieve(b) => b,
      Self::MissionCompleted(b) => &**b,
      Self::MissionFailed(b) => b,
      Self::MissionAbandoned(b) => b,
      Self::RedeemVoucher(b) => b,
      Self::PayFines(b) | Self::PayBounties(b) => b,
      Self::Resurrect(b) => b,
      Self::SellExplorationData(b) => b,
      Self::MultiSellExplorationData(b) => b,
      Self::SellOrganicData(b) => b,
      Self::BuyExplorationData(b) => b,
      Self::CarrierBuy(b) => b,
      Self::CarrierBankTransfer(b) => b,
      Self::PowerplaySalary(b) => b,
      Self::CrewHire(b) => b,
      _ => return None,
    };
    Some(effect)
  }

  pub fn as_commodity(&self) -> Option<&dyn CommodityEffect> {
    let effect: &dyn CommodityEffect = match self {
      Self::Cargo(b) => b,
      Self::MarketBuy(b) => b,
      Self::MarketSell(b) => b,
      Self::BuyDrones(b) => b,
      Self::SellDrones(b) => b,
      Self::CollectCargo(b) => b,
      Self::EjectCargo(b) => b,
      Self::MiningRefined(b) => b,
      Self::CargoDepot(b) => b,
      Self::EngineerContribution(b) => b,
      Self::MissionCompleted(b) => &**b,
      _ => return None,
    };
    Some(effect)
  }

  pub fn as_material(&self) -> Option<&dyn MaterialEffect> {
    let effect: &dyn MaterialEffect = match self {
      Self::Materials(b) => b,
      Self::MaterialCollected(b) => b,
      Self::MaterialDiscarded(b) => b,
      Self::MaterialTrade(b) => b,
      Self::Synthesis(b) => b,
      Self::EngineerCraft(b) => &**b,
      Self::EngineerContribution(b) => b,
      Self::MissionCompleted(b) => &**b,
      _ => return None,
    };
    Some(effect)
  }

  pub fn as_missions(&self) -> Option<&dyn MissionEffect> {
    let effect: &dyn MissionEffect = match self {
      Self::MissionAccepted(b) => &**b,
      Self::MissionCompleted(b) => &**b,
      Self::MissionFailed(b) => b,
      Self::MissionAbandoned(b) => b,
      Self::MissionRedirected(b) => b,
      Self::Missions(b) => b,
      _ => return None,
    };
    Some(effect)
  }

  pub fn as_carrier(&self) -> Option<&dyn CarrierEffect> {
    let effect: &dyn CarrierEffect = match self {
      Self::CarrierBuy(b) => b,
      Self::CarrierStats(b) => &**b,
      Self::CarrierJumpRequest(b) => b,
      Self::CarrierJumpCancelled(b) => b,
      Self::CarrierJump(b) => &**b,
      Self::CarrierDecommission(b) => b,
      Self::CarrierCancelDecommission(b) => b,
      Self::CarrierBankTransfer(b) => b,
      Self::CarrierDepositFuel(b) => b,
      Self::CarrierCrewServices(b) => b,
      Self::CarrierFinance(b) => b,
      Self::CarrierTradeOrder(b) => b,
      Self::CarrierDockingPermission(b) => b,
      Self::CarrierNameChange(b) => b,
      _ => return None,
    };
    Some(effect)
  }

  pub fn as_stats(&self) -> Option<&dyn StatsEffect> {
    let effect: &dyn StatsEffect = match self {
      Self::MarketBuy(b) => b,
      Self::MarketSell(b) => b,
      Self::MissionCompleted(b) => &**b,
      Self::MissionFailed(b) => b,
      Self::Bounty(b) => b,
      Self::FactionKillBond(b) => b,
      Self::CapShipBond(b) => b,
      Self::RedeemVoucher(b) => b,
      Self::CommitCrime(b) => b,
      Self::SellExplorationData(b) => b,
      Self::MultiSellExplorationData(b) => b,
      _ => return None,
    };
    Some(effect)
  }

  /// The kinds of effect this body has, in [`Effect`] order.
  pub fn effects(&self) -> Vec<Effect> {
    [
      (Effect::Ledger, self.as_ledger().is_some()),
      (Effect::Commodity, self.as_commodity().is_some()),
      (Effect::Material, self.as_material().is_some()),
      (Effect::Missions, self.as_missions().is_some()),
      (Effect::Carrier, self.as_carrier().is_some()),
      (Effect::Stats, self.as_stats().is_some()),
    ]
    .into_iter()
    .filter_map(|(effect, present)| present.then_some(effect))
    .collect()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use starlog_core::EventType;

  use super::*;

  fn body(name: &str) -> EventBody {
    EventBody::decode(&EventType::from_name(name), &json!({})).unwrap()
  }

  #[test]
  fn market_events_touch_three_sinks() {
    assert_eq!(
      body("MarketSell").effects(),
      vec![Effect::Ledger, Effect::Commodity, Effect::Stats]
    );
  }

  #[test]
  fn mission_completed_touches_everything_but_the_carrier() {
    assert_eq!(
      body("MissionCompleted").effects(),
      vec![
        Effect::Ledger,
        Effect::Commodity,
        Effect::Material,
        Effect::Missions,
        Effect::Stats
      ]
    );
  }

  #[test]
  fn informational_events_have_no_effects() {
    for name in ["Fileheader", "FSDJump", "Scan", "ReceiveText", "Touchdown"] {
      assert!(body(name).effects().is_empty(), "{name}");
    }
    assert_eq!(body("CarrierJump").effects(), vec![Effect::Carrier]);
    assert!(EventBody::Unparsed.effects().is_empty());
  }
}
