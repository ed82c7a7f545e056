//! Per-system, per-faction activity counters.

use std::collections::BTreeMap;

use starlog_core::effect::{EntryMeta, FactionStat, StatsContext, StatsSink};

/// Placeholder for a missing system or faction name.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactionStats {
  pub bounties:           i64,
  pub bounty_rewards:     i64,
  pub bonds:              i64,
  pub bond_rewards:       i64,
  pub capital_ship_bonds: i64,
  pub vouchers_redeemed:  i64,
  pub missions_completed: i64,
  pub mission_rewards:    i64,
  pub missions_failed:    i64,
  /// Sum of `+`/`-` signs across mission effects.
  pub influence:          i32,
  pub reputation:         i32,
  pub crimes:             i64,
  pub fines:              i64,
  pub bounties_incurred:  i64,
  pub goods_bought:       i64,
  pub purchase_cost:      i64,
  pub goods_sold:         i64,
  pub trade_profit:       i64,
  pub exploration_sold:   i64,
}

impl FactionStats {
  pub fn merge(&mut self, other: &Self) {
    self.bounties += other.bounties;
    self.bounty_rewards += other.bounty_rewards;
    self.bonds += other.bonds;
    self.bond_rewards += other.bond_rewards;
    self.capital_ship_bonds += other.capital_ship_bonds;
    self.vouchers_redeemed += other.vouchers_redeemed;
    self.missions_completed += other.missions_completed;
    self.mission_rewards += other.mission_rewards;
    self.missions_failed += other.missions_failed;
    self.influence += other.influence;
    self.reputation += other.reputation;
    self.crimes += other.crimes;
    self.fines += other.fines;
    self.bounties_incurred += other.bounties_incurred;
    self.goods_bought += other.goods_bought;
    self.purchase_cost += other.purchase_cost;
    self.goods_sold += other.goods_sold;
    self.trade_profit += other.trade_profit;
    self.exploration_sold += other.exploration_sold;
  }

  fn apply(&mut self, stat: &FactionStat) {
    match *stat {
      FactionStat::BountyAwarded { reward, .. } => {
        self.bounties += 1;
        self.bounty_rewards += reward;
      }
      FactionStat::BondAwarded {
        reward,
        capital_ship,
        ..
      } => {
        self.bonds += 1;
        self.bond_rewards += reward;
        if capital_ship {
          self.capital_ship_bonds += 1;
        }
      }
      FactionStat::VoucherRedeemed { amount, .. } => self.vouchers_redeemed += amount,
      FactionStat::MissionCompleted { reward, .. } => {
        self.missions_completed += 1;
        self.mission_rewards += reward;
      }
      FactionStat::MissionEffect {
        influence,
        reputation,
        ..
      } => {
        self.influence += influence;
        self.reputation += reputation;
      }
      FactionStat::MissionFailed { .. } => self.missions_failed += 1,
      FactionStat::CrimeCommitted { fine, bounty, .. } => {
        self.crimes += 1;
        self.fines += fine;
        self.bounties_incurred += bounty;
      }
      FactionStat::CommodityBought { count, cost } => {
        self.goods_bought += count;
        self.purchase_cost += cost;
      }
      FactionStat::CommoditySold { count, profit } => {
        self.goods_sold += count;
        self.trade_profit += profit;
      }
      FactionStat::ExplorationSold { value } => self.exploration_sold += value,
    }
  }
}

/// The faction a stat is credited to: the one it names, otherwise the
/// faction owning the station the commander is docked at.
fn faction_for<'a>(stat: &'a FactionStat, context: &'a StatsContext) -> Option<&'a str> {
  match stat {
    FactionStat::BountyAwarded { faction, .. }
    | FactionStat::BondAwarded { faction, .. }
    | FactionStat::VoucherRedeemed { faction, .. }
    | FactionStat::MissionCompleted { faction, .. }
    | FactionStat::MissionEffect { faction, .. }
    | FactionStat::CrimeCommitted { faction, .. } => Some(faction.as_str()),
    FactionStat::MissionFailed { faction, .. } => faction.as_deref(),
    FactionStat::CommodityBought { .. }
    | FactionStat::CommoditySold { .. }
    | FactionStat::ExplorationSold { .. } => context.station_faction.as_deref(),
  }
}

#[derive(Debug, Default)]
pub struct Stats {
  systems: BTreeMap<String, BTreeMap<String, FactionStats>>,
}

impl Stats {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, system: &str, faction: &str) -> Option<&FactionStats> {
    self.systems.get(system)?.get(faction)
  }

  pub fn systems(&self) -> impl Iterator<Item = &str> { self.systems.keys().map(String::as_str) }

  pub fn factions_in(&self, system: &str) -> impl Iterator<Item = (&str, &FactionStats)> {
    self
      .systems
      .get(system)
      .into_iter()
      .flat_map(|factions| factions.iter().map(|(f, s)| (f.as_str(), s)))
  }

  /// One faction's counters summed over every system.
  pub fn totals_for_faction(&self, faction: &str) -> FactionStats {
    let mut total = FactionStats::default();
    for stats in self.systems.values().filter_map(|f| f.get(faction)) {
      total.merge(stats);
    }
    total
  }

  /// Every faction seen, with its totals.
  pub fn faction_totals(&self) -> BTreeMap<&str, FactionStats> {
    let mut out: BTreeMap<&str, FactionStats> = BTreeMap::new();
    for factions in self.systems.values() {
      for (name, stats) in factions {
        out.entry(name.as_str()).or_default().merge(stats);
      }
    }
    out
  }
}

impl StatsSink for Stats {
  fn record(&mut self, meta: &EntryMeta, context: &StatsContext, stat: FactionStat) {
    let system = context.system.as_deref().unwrap_or(UNKNOWN);
    let faction = match faction_for(&stat, context) {
      Some(f) if !f.is_empty() => f,
      _ => UNKNOWN,
    };
    tracing::trace!(id = meta.id, system, faction, ?stat, "faction stat");
    self
      .systems
      .entry(system.to_string())
      .or_default()
      .entry(faction.to_string())
      .or_default()
      .apply(&stat);
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use starlog_core::EventType;

  use super::*;

  fn meta() -> EntryMeta {
    EntryMeta {
      id:         1,
      timestamp:  Utc::now(),
      event_type: EventType::Bounty,
    }
  }

  fn at(system: &str, station_faction: Option<&str>) -> StatsContext {
    StatsContext {
      system:          Some(system.to_string()),
      station_faction: station_faction.map(str::to_string),
    }
  }

  #[test]
  fn counters_roll_up_by_system_and_faction() {
    let mut stats = Stats::new();
    let lave = at("Lave", Some("Lave Radio"));
    stats.record(&meta(), &lave, FactionStat::BountyAwarded {
      faction: "Lave Radio".into(),
      reward:  10_000,
    });
    stats.record(&meta(), &lave, FactionStat::BountyAwarded {
      faction: "Lave Radio".into(),
      reward:  5_000,
    });
    stats.record(&meta(), &lave, FactionStat::CommoditySold {
      count:  10,
      profit: 5_000,
    });
    stats.record(&meta(), &at("Diso", None), FactionStat::MissionEffect {
      faction:    "Lave Radio".into(),
      influence:  2,
      reputation: 1,
    });

    let s = stats.get("Lave", "Lave Radio").unwrap();
    assert_eq!(s.bounties, 2);
    assert_eq!(s.bounty_rewards, 15_000);
    assert_eq!(s.goods_sold, 10);
    assert_eq!(s.trade_profit, 5_000);

    let total = stats.totals_for_faction("Lave Radio");
    assert_eq!(total.bounties, 2);
    assert_eq!(total.influence, 2);
    assert_eq!(stats.systems().collect::<Vec<_>>(), ["Diso", "Lave"]);
  }

  #[test]
  fn missing_names_are_bucketed() {
    let mut stats = Stats::new();
    stats.record(&meta(), &StatsContext::default(), FactionStat::ExplorationSold {
      value: 1_000_000,
    });
    stats.record(&meta(), &at("Sol", None), FactionStat::MissionFailed {
      mission_id: 4,
      faction:    None,
    });
    assert_eq!(stats.get(UNKNOWN, UNKNOWN).unwrap().exploration_sold, 1_000_000);
    assert_eq!(stats.get("Sol", UNKNOWN).unwrap().missions_failed, 1);
  }
}
