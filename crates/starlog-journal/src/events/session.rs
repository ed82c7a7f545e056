//! Session and commander-profile events.

use serde::Deserialize;
use starlog_core::{
  effect::{EntryMeta, LedgerEffect, LedgerSink},
  naming,
};
use strum::{AsRefStr, Display};

use crate::{
  describe::Describe,
  fields::{FieldBuilder, thousands},
};

// ─── Ranks ───────────────────────────────────────────────────────────────────

/// The rank ladders tracked by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
pub enum RankKind {
  Combat,
  Trade,
  Explore,
  Soldier,
  Exobiologist,
  #[strum(serialize = "CQC")]
  Cqc,
  Federation,
  Empire,
}

const COMBAT: &[&str] = &[
  "Harmless", "Mostly Harmless", "Novice", "Competent", "Expert", "Master",
  "Dangerous", "Deadly", "Elite",
];
const TRADE: &[&str] = &[
  "Penniless", "Mostly Penniless", "Peddler", "Dealer", "Merchant", "Broker",
  "Entrepreneur", "Tycoon", "Elite",
];
const EXPLORE: &[&str] = &[
  "Aimless", "Mostly Aimless", "Scout", "Surveyor", "Trailblazer",
  "Pathfinder", "Ranger", "Pioneer", "Elite",
];
const SOLDIER: &[&str] = &[
  "Defenceless", "Mostly Defenceless", "Rookie", "Soldier", "Gunslinger",
  "Warrior", "Gladiator", "Deadeye", "Elite",
];
const EXOBIOLOGIST: &[&str] = &[
  "Directionless", "Mostly Directionless", "Compiler", "Collector",
  "Cataloguer", "Taxonomist", "Ecologist", "Geneticist", "Elite",
];
const CQC: &[&str] = &[
  "Helpless", "Mostly Helpless", "Amateur", "Semi Professional",
  "Professional", "Champion", "Hero", "Legend", "Elite",
];
const FEDERATION: &[&str] = &[
  "None", "Recruit", "Cadet", "Midshipman", "Petty Officer",
  "Chief Petty Officer", "Warrant Officer", "Ensign", "Lieutenant",
  "Lieutenant Commander", "Post Commander", "Post Captain", "Rear Admiral",
  "Vice Admiral", "Admiral",
];
const EMPIRE: &[&str] = &[
  "None", "Outsider", "Serf", "Master", "Squire", "Knight", "Lord", "Baron",
  "Viscount", "Count", "Earl", "Marquis", "Duke", "Prince", "King",
];

impl RankKind {
  fn ladder(self) -> &'static [&'static str] {
    match self {
      Self::Combat => COMBAT,
      Self::Trade => TRADE,
      Self::Explore => EXPLORE,
      Self::Soldier => SOLDIER,
      Self::Exobiologist => EXOBIOLOGIST,
      Self::Cqc => CQC,
      Self::Federation => FEDERATION,
      Self::Empire => EMPIRE,
    }
  }

  /// Name of rank `level`. The Elite ranks continue as `Elite I` … `Elite V`
  /// on the pilot ladders.
  pub fn rank_name(self, level: i64) -> String {
    let ladder = self.ladder();
    let Ok(index) = usize::try_from(level) else {
      return format!("Rank {level}");
    };
    if let Some(name) = ladder.get(index) {
      return (*name).to_string();
    }
    let prestige = index + 1 - ladder.len();
    let is_pilot = !matches!(self, Self::Federation | Self::Empire);
    match prestige {
      1..=5 if is_pilot => {
        format!("Elite {}", ["I", "II", "III", "IV", "V"][prestige - 1])
      }
      _ => format!("Rank {level}"),
    }
  }
}

// ─── Fileheader / Commander / LoadGame ───────────────────────────────────────

/// First line of every journal file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fileheader {
  pub part:         i64,
  pub language:     String,
  #[serde(rename = "Odyssey")]
  pub odyssey:      bool,
  #[serde(rename = "gameversion")]
  pub game_version: String,
  pub build:        String,
}

impl Describe for Fileheader {
  fn info(&self) -> String {
    FieldBuilder::new()
      .int("Part", self.part)
      .text("Version:", &self.game_version)
      .text("Build:", &self.build)
      .text("Language:", &self.language)
      .flag("Odyssey", self.odyssey)
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Commander {
  #[serde(rename = "FID")]
  pub fid:  String,
  pub name: String,
}

impl Describe for Commander {
  fn info(&self) -> String { FieldBuilder::new().text("Cmdr", &self.name).build() }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoadGame {
  pub commander:       String,
  #[serde(rename = "FID")]
  pub fid:             String,
  pub horizons:        bool,
  pub odyssey:         bool,
  pub ship:            String,
  #[serde(rename = "Ship_Localised")]
  pub ship_localised:  Option<String>,
  #[serde(rename = "ShipID")]
  pub ship_id:         Option<i64>,
  pub ship_name:       String,
  pub ship_ident:      String,
  pub fuel_level:      f64,
  pub fuel_capacity:   f64,
  pub game_mode:       String,
  pub group:           Option<String>,
  pub credits:         i64,
  pub loan:            i64,
  #[serde(rename = "language")]
  pub language:        Option<String>,
  #[serde(rename = "gameversion")]
  pub game_version:    Option<String>,
}

impl LoadGame {
  pub fn ship_type(&self) -> String {
    match self.ship_localised.as_deref() {
      Some(loc) if !loc.trim().is_empty() => loc.to_string(),
      _ => naming::ship(&self.ship),
    }
  }

  /// On foot (Odyssey) sessions report a suit instead of a ship.
  pub fn on_foot(&self) -> bool {
    self.ship.to_ascii_lowercase().contains("suit")
  }
}

impl Describe for LoadGame {
  fn info(&self) -> String {
    let ship = if self.ship.is_empty() {
      String::new()
    } else if self.ship_name.trim().is_empty() {
      self.ship_type()
    } else {
      format!("{} \"{}\"", self.ship_type(), self.ship_name.trim())
    };
    FieldBuilder::new()
      .text("Cmdr", &self.commander)
      .text("Ship:", ship)
      .text("Mode:", &self.game_mode)
      .opt_text("Group:", self.group.as_deref())
      .credits("Credits:", self.credits)
      .nonzero_credits("Loan:", self.loan)
      .build()
  }

  fn detailed(&self) -> String {
    FieldBuilder::new()
      .text("Ident:", &self.ship_ident)
      .float("Fuel:", self.fuel_level, 1, "t")
      .nonzero_float("Capacity:", self.fuel_capacity, 1, "t")
      .flag("Horizons", self.horizons)
      .flag("Odyssey", self.odyssey)
      .opt_text("Version:", self.game_version.as_deref())
      .build()
  }
}

impl LedgerEffect for LoadGame {
  fn ledger(&self, meta: &EntryMeta, sink: &mut dyn LedgerSink) {
    sink.set_balance(meta, self.credits);
  }
}

// ─── Rank / Progress / Promotion ─────────────────────────────────────────────

/// Rank levels, as written by `Rank` and `Promotion` (and percentages, as
/// written by `Progress`). Absent ladders stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RankLevels {
  pub combat:       Option<i64>,
  pub trade:        Option<i64>,
  pub explore:      Option<i64>,
  pub soldier:      Option<i64>,
  pub exobiologist: Option<i64>,
  #[serde(rename = "CQC")]
  pub cqc:          Option<i64>,
  pub federation:   Option<i64>,
  pub empire:       Option<i64>,
}

impl RankLevels {
  /// Present ladders in display order.
  pub fn iter(&self) -> impl Iterator<Item = (RankKind, i64)> + '_ {
    [
      (RankKind::Combat, self.combat),
      (RankKind::Trade, self.trade),
      (RankKind::Explore, self.explore),
      (RankKind::Soldier, self.soldier),
      (RankKind::Exobiologist, self.exobiologist),
      (RankKind::Cqc, self.cqc),
      (RankKind::Federation, self.federation),
      (RankKind::Empire, self.empire),
    ]
    .into_iter()
    .filter_map(|(kind, level)| level.map(|l| (kind, l)))
  }

  fn named(&self) -> String {
    self
      .iter()
      .fold(FieldBuilder::new(), |b, (kind, level)| {
        b.text(&format!("{kind}:"), kind.rank_name(level))
      })
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Rank(pub RankLevels);

impl Describe for Rank {
  fn info(&self) -> String { self.0.named() }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Progress(pub RankLevels);

impl Describe for Progress {
  fn info(&self) -> String {
    self
      .0
      .iter()
      .fold(FieldBuilder::new(), |b, (kind, pct)| {
        b.text(&format!("{kind}:"), format!("{pct}%"))
      })
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Promotion(pub RankLevels);

impl Describe for Promotion {
  fn info(&self) -> String { self.0.named() }
}

// ─── Reputation ──────────────────────────────────────────────────────────────

/// Reputation band for a value in `-100..=100`.
pub fn reputation_band(value: f64) -> &'static str {
  if value <= -90.0 {
    "Hostile"
  } else if value <= -35.0 {
    "Unfriendly"
  } else if value < 4.0 {
    "Neutral"
  } else if value < 35.0 {
    "Cordial"
  } else if value < 90.0 {
    "Friendly"
  } else {
    "Allied"
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Reputation {
  pub empire:      Option<f64>,
  pub federation:  Option<f64>,
  pub independent: Option<f64>,
  pub alliance:    Option<f64>,
}

impl Describe for Reputation {
  fn info(&self) -> String {
    [
      ("Federation:", self.federation),
      ("Empire:", self.empire),
      ("Independent:", self.independent),
      ("Alliance:", self.alliance),
    ]
    .into_iter()
    .fold(FieldBuilder::new(), |b, (label, value)| match value {
      Some(v) => b.text(label, format!("{v:.1}% ({})", reputation_band(v))),
      None => b,
    })
    .build()
  }
}

// ─── Statistics ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BankAccountStats {
  #[serde(rename = "Current_Wealth")]
  pub current_wealth:      i64,
  #[serde(rename = "Spent_On_Ships")]
  pub spent_on_ships:      i64,
  #[serde(rename = "Spent_On_Outfitting")]
  pub spent_on_outfitting: i64,
  #[serde(rename = "Spent_On_Repairs")]
  pub spent_on_repairs:    i64,
  #[serde(rename = "Spent_On_Fuel")]
  pub spent_on_fuel:       i64,
  #[serde(rename = "Spent_On_Insurance")]
  pub spent_on_insurance:  i64,
  #[serde(rename = "Insurance_Claims")]
  pub insurance_claims:    i64,
  #[serde(rename = "Owned_Ship_Count")]
  pub owned_ship_count:    i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CombatStats {
  #[serde(rename = "Bounties_Claimed")]
  pub bounties_claimed:      i64,
  #[serde(rename = "Bounty_Hunting_Profit")]
  pub bounty_hunting_profit: f64,
  #[serde(rename = "Combat_Bonds")]
  pub combat_bonds:          i64,
  #[serde(rename = "Combat_Bond_Profits")]
  pub combat_bond_profits:   i64,
  #[serde(rename = "Assassinations")]
  pub assassinations:        i64,
  #[serde(rename = "Assassination_Profits")]
  pub assassination_profits: f64,
  #[serde(rename = "Highest_Single_Reward")]
  pub highest_single_reward: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrimeStats {
  #[serde(rename = "Notoriety")]
  pub notoriety:         i64,
  #[serde(rename = "Fines")]
  pub fines:             i64,
  #[serde(rename = "Total_Fines")]
  pub total_fines:       i64,
  #[serde(rename = "Bounties_Received")]
  pub bounties_received: i64,
  #[serde(rename = "Total_Bounties")]
  pub total_bounties:    f64,
  #[serde(rename = "Highest_Bounty")]
  pub highest_bounty:    i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TradingStats {
  #[serde(rename = "Markets_Traded_With")]
  pub markets_traded_with:        i64,
  #[serde(rename = "Market_Profits")]
  pub market_profits:             i64,
  #[serde(rename = "Resources_Traded")]
  pub resources_traded:           i64,
  #[serde(rename = "Average_Profit")]
  pub average_profit:             f64,
  #[serde(rename = "Highest_Single_Transaction")]
  pub highest_single_transaction: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MiningStats {
  #[serde(rename = "Mining_Profits")]
  pub mining_profits:      i64,
  #[serde(rename = "Quantity_Mined")]
  pub quantity_mined:      i64,
  #[serde(rename = "Materials_Collected")]
  pub materials_collected: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExplorationStats {
  #[serde(rename = "Systems_Visited")]
  pub systems_visited:           i64,
  #[serde(rename = "Exploration_Profits")]
  pub exploration_profits:       i64,
  #[serde(rename = "Planets_Scanned_To_Level_2")]
  pub planets_scanned_level_2:   i64,
  #[serde(rename = "Planets_Scanned_To_Level_3")]
  pub planets_scanned_level_3:   i64,
  #[serde(rename = "Efficient_Scans")]
  pub efficient_scans:           i64,
  #[serde(rename = "Highest_Payout")]
  pub highest_payout:            i64,
  #[serde(rename = "Total_Hyperspace_Distance")]
  pub total_hyperspace_distance: f64,
  #[serde(rename = "Total_Hyperspace_Jumps")]
  pub total_hyperspace_jumps:    i64,
  #[serde(rename = "Greatest_Distance_From_Start")]
  pub greatest_distance:         f64,
  /// Seconds.
  #[serde(rename = "Time_Played")]
  pub time_played:               i64,
}

/// The lifetime statistics block written at session start. Only the most
/// commonly displayed sections are decoded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Statistics {
  #[serde(rename = "Bank_Account")]
  pub bank_account: BankAccountStats,
  #[serde(rename = "Combat")]
  pub combat:       CombatStats,
  #[serde(rename = "Crime")]
  pub crime:        CrimeStats,
  #[serde(rename = "Trading")]
  pub trading:      TradingStats,
  #[serde(rename = "Mining")]
  pub mining:       MiningStats,
  #[serde(rename = "Exploration")]
  pub exploration:  ExplorationStats,
}

/// `93784` seconds → `"1d 2h 3m"`.
pub fn play_time(seconds: i64) -> String {
  let seconds = seconds.max(0);
  let days = seconds / 86_400;
  let hours = seconds % 86_400 / 3_600;
  let minutes = seconds % 3_600 / 60;
  if days > 0 {
    format!("{days}d {hours}h {minutes}m")
  } else {
    format!("{hours}h {minutes}m")
  }
}

impl Describe for Statistics {
  fn info(&self) -> String {
    FieldBuilder::new()
      .credits("Wealth:", self.bank_account.current_wealth)
      .int("Jumps:", self.exploration.total_hyperspace_jumps)
      .int("Systems:", self.exploration.systems_visited)
      .text("Played:", play_time(self.exploration.time_played))
      .build()
  }

  fn detailed(&self) -> String {
    let bank = &self.bank_account;
    let combat = &self.combat;
    let crime = &self.crime;
    let trade = &self.trading;
    let mining = &self.mining;
    let explore = &self.exploration;
    FieldBuilder::new()
      .credits("Ships:", bank.spent_on_ships)
      .credits("Outfitting:", bank.spent_on_outfitting)
      .credits("Repairs:", bank.spent_on_repairs)
      .credits("Fuel:", bank.spent_on_fuel)
      .credits("Insurance:", bank.spent_on_insurance)
      .int("Claims:", bank.insurance_claims)
      .int("Ships owned:", bank.owned_ship_count)
      .line()
      .int("Bounties:", combat.bounties_claimed)
      .credits("Bounty profit:", combat.bounty_hunting_profit.round() as i64)
      .int("Bonds:", combat.combat_bonds)
      .credits("Bond profit:", combat.combat_bond_profits)
      .int("Assassinations:", combat.assassinations)
      .line()
      .int("Notoriety:", crime.notoriety)
      .int("Fines:", crime.fines)
      .credits("Total fines:", crime.total_fines)
      .int("Bounties received:", crime.bounties_received)
      .line()
      .int("Markets:", trade.markets_traded_with)
      .credits("Market profits:", trade.market_profits)
      .text("Resources traded:", thousands(trade.resources_traded))
      .credits("Mining profits:", mining.mining_profits)
      .int("Mined:", mining.quantity_mined)
      .line()
      .credits("Exploration profits:", explore.exploration_profits)
      .int("Level 2 scans:", explore.planets_scanned_level_2)
      .int("Level 3 scans:", explore.planets_scanned_level_3)
      .int("Efficient scans:", explore.efficient_scans)
      .float("Distance:", explore.total_hyperspace_distance, 0, "ly")
      .float("Furthest:", explore.greatest_distance, 0, "ly")
      .build()
  }
}

// ─── Shutdown ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Shutdown {}

impl Describe for Shutdown {
  fn info(&self) -> String { String::new() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rank_names_cover_prestige() {
    assert_eq!(RankKind::Combat.rank_name(0), "Harmless");
    assert_eq!(RankKind::Combat.rank_name(8), "Elite");
    assert_eq!(RankKind::Combat.rank_name(9), "Elite I");
    assert_eq!(RankKind::Trade.rank_name(13), "Elite V");
    assert_eq!(RankKind::Trade.rank_name(14), "Rank 14");
    assert_eq!(RankKind::Empire.rank_name(14), "King");
    assert_eq!(RankKind::Federation.rank_name(15), "Rank 15");
    assert_eq!(RankKind::Cqc.rank_name(-1), "Rank -1");
  }

  #[test]
  fn reputation_bands() {
    assert_eq!(reputation_band(-100.0), "Hostile");
    assert_eq!(reputation_band(-50.0), "Unfriendly");
    assert_eq!(reputation_band(0.0), "Neutral");
    assert_eq!(reputation_band(20.0), "Cordial");
    assert_eq!(reputation_band(75.0), "Friendly");
    assert_eq!(reputation_band(100.0), "Allied");
  }

  #[test]
  fn play_time_formats() {
    assert_eq!(play_time(93_784), "1d 2h 3m");
    assert_eq!(play_time(3_660), "1h 1m");
    assert_eq!(play_time(-5), "0h 0m");
  }
}
