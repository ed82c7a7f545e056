//! Hyperspace, supercruise, planetary and SRV movement.

use serde::Deserialize;
use starlog_core::{
  effect::{CarrierEffect, CarrierSink, CarrierUpdate, EntryMeta},
  naming,
};

use crate::{
  describe::Describe,
  fields::{FieldBuilder, fixed, light_seconds, light_years, lines},
};

// ─── System block ────────────────────────────────────────────────────────────

/// A faction reference. Older journals write the controlling faction as a
/// bare string; newer ones as an object with its state.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FactionRef {
  Name(String),
  Detail {
    #[serde(rename = "Name")]
    name:          String,
    #[serde(rename = "FactionState", default)]
    faction_state: Option<String>,
  },
}

impl FactionRef {
  pub fn name(&self) -> &str {
    match self {
      Self::Name(name) | Self::Detail { name, .. } => name,
    }
  }

  pub fn state(&self) -> Option<&str> {
    match self {
      Self::Detail { faction_state, .. } => faction_state.as_deref(),
      Self::Name(_) => None,
    }
  }

  pub(crate) fn display(&self) -> String {
    match self.state() {
      Some(state) if !state.is_empty() && state != "None" => {
        format!("{} ({})", self.name(), naming::faction_state(state))
      }
      _ => self.name().to_string(),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FactionStateEntry {
  pub state: String,
  pub trend: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SystemFaction {
  pub name:              String,
  pub faction_state:     String,
  pub government:        String,
  pub influence:         f64,
  pub allegiance:        String,
  pub happiness:         String,
  #[serde(rename = "Happiness_Localised")]
  pub happiness_localised: Option<String>,
  pub my_reputation:     f64,
  pub active_states:     Vec<FactionStateEntry>,
  pub pending_states:    Vec<FactionStateEntry>,
  pub recovering_states: Vec<FactionStateEntry>,
}

impl SystemFaction {
  fn display(&self) -> String {
    let states = self
      .active_states
      .iter()
      .map(|s| naming::faction_state(&s.state))
      .collect::<Vec<_>>()
      .join("/");
    FieldBuilder::new()
      .text("", &self.name)
      .float("", self.influence * 100.0, 1, "%")
      .text("", naming::government(&self.government))
      .text("", naming::allegiance(&self.allegiance))
      .text("State:", naming::faction_state(&self.faction_state))
      .text("Active:", states)
      .opt_text("Happiness:", self.happiness_localised.as_deref())
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConflictSide {
  pub name:     String,
  pub stake:    String,
  pub won_days: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Conflict {
  pub war_type: String,
  pub status:   String,
  pub faction1: ConflictSide,
  pub faction2: ConflictSide,
}

/// Fields common to `FSDJump`, `Location` and `CarrierJump`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SystemInfo {
  pub star_system:                 String,
  pub system_address:              Option<u64>,
  pub star_pos:                    Option<[f64; 3]>,
  pub system_allegiance:           String,
  pub system_economy:              String,
  #[serde(rename = "SystemEconomy_Localised")]
  pub system_economy_localised:    Option<String>,
  pub system_second_economy:       String,
  #[serde(rename = "SystemSecondEconomy_Localised")]
  pub second_economy_localised:    Option<String>,
  pub system_government:           String,
  #[serde(rename = "SystemGovernment_Localised")]
  pub system_government_localised: Option<String>,
  pub system_security:             String,
  #[serde(rename = "SystemSecurity_Localised")]
  pub system_security_localised:   Option<String>,
  pub population:                  i64,
  pub system_faction:              Option<FactionRef>,
  pub factions:                    Vec<SystemFaction>,
  pub conflicts:                   Vec<Conflict>,
  pub powers:                      Vec<String>,
  pub powerplay_state:             Option<String>,
}

fn localised_or(localised: Option<&str>, fd: &str, normalise: fn(&str) -> String) -> String {
  match localised.map(str::trim) {
    Some(loc) if !loc.is_empty() => loc.to_string(),
    _ if fd.is_empty() => String::new(),
    _ => normalise(fd),
  }
}

impl SystemInfo {
  pub fn economy(&self) -> String {
    localised_or(
      self.system_economy_localised.as_deref(),
      &self.system_economy,
      naming::economy,
    )
  }

  pub fn second_economy(&self) -> String {
    localised_or(
      self.second_economy_localised.as_deref(),
      &self.system_second_economy,
      naming::economy,
    )
  }

  pub fn government(&self) -> String {
    localised_or(
      self.system_government_localised.as_deref(),
      &self.system_government,
      naming::government,
    )
  }

  pub fn security(&self) -> String {
    localised_or(
      self.system_security_localised.as_deref(),
      &self.system_security,
      naming::security,
    )
  }

  pub fn controlling_faction(&self) -> Option<&str> {
    self.system_faction.as_ref().map(FactionRef::name)
  }

  /// Straight-line distance in light years to another position.
  pub fn distance_to(&self, other: [f64; 3]) -> Option<f64> {
    let [x, y, z] = self.star_pos?;
    Some(((x - other[0]).powi(2) + (y - other[1]).powi(2) + (z - other[2]).powi(2)).sqrt())
  }

  fn detailed(&self) -> String {
    let economy = match self.second_economy().as_str() {
      "" | "None" => self.economy(),
      second => format!("{}/{second}", self.economy()),
    };
    let mut out = FieldBuilder::new()
      .text("Allegiance:", naming::allegiance(&self.system_allegiance))
      .text("Economy:", economy)
      .line()
      .text("Government:", self.government())
      .text("Security:", self.security())
      .nonzero_int("Population:", self.population)
      .line()
      .opt_text("Faction:", self.system_faction.as_ref().map(FactionRef::display))
      .opt_text("Powerplay:", self.powerplay_state.as_deref())
      .text("Powers:", self.powers.join(", "));
    if !self.factions.is_empty() {
      out = out.block(format!(
        "Factions:\n{}",
        lines("  ", self.factions.iter().map(SystemFaction::display))
      ));
    }
    if !self.conflicts.is_empty() {
      out = out.block(lines(
        "",
        self.conflicts.iter().map(|c| {
          format!(
            "{} {}: {} {} v {} {}",
            naming::capitalise(&c.war_type),
            c.status,
            c.faction1.name,
            c.faction1.won_days,
            c.faction2.won_days,
            c.faction2.name
          )
        }),
      ));
    }
    out.build()
  }
}

// ─── FSDJump / Location / CarrierJump ────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FsdJump {
  #[serde(flatten)]
  pub system:     SystemInfo,
  pub body:       Option<String>,
  #[serde(rename = "BodyID")]
  pub body_id:    Option<i64>,
  pub body_type:  Option<String>,
  pub jump_dist:  f64,
  pub fuel_used:  f64,
  pub fuel_level: f64,
  pub boost_used: i64,
  pub taxi:       bool,
  pub multicrew:  bool,
}

impl Describe for FsdJump {
  fn info(&self) -> String {
    let boost = match self.boost_used {
      1 => "Basic Boost",
      2 => "Standard Boost",
      3 => "Premium Boost",
      4 => "Neutron Boost",
      _ => "",
    };
    FieldBuilder::new()
      .text("", &self.system.star_system)
      .nonzero_float("", self.jump_dist, 2, "ly")
      .nonzero_float("Fuel", self.fuel_used, 2, "t")
      .nonzero_float("left", self.fuel_level, 2, "t")
      .text("", boost)
      .flag("Taxi", self.taxi)
      .build()
  }

  fn detailed(&self) -> String { self.system.detailed() }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Location {
  #[serde(flatten)]
  pub system:                 SystemInfo,
  pub docked:                 bool,
  pub station_name:           Option<String>,
  pub station_type:           Option<String>,
  #[serde(rename = "MarketID")]
  pub market_id:              Option<u64>,
  pub station_faction:        Option<FactionRef>,
  pub body:                   Option<String>,
  #[serde(rename = "BodyID")]
  pub body_id:                Option<i64>,
  pub body_type:              Option<String>,
  #[serde(rename = "DistFromStarLS")]
  pub dist_from_star_ls:      Option<f64>,
  pub latitude:               Option<f64>,
  pub longitude:              Option<f64>,
  pub taxi:                   bool,
  pub multicrew:              bool,
  pub on_foot:                bool,
}

impl Location {
  /// Station or body the commander is at, if any.
  pub fn place(&self) -> Option<&str> {
    if self.docked {
      self.station_name.as_deref()
    } else {
      self.body.as_deref().filter(|b| *b != self.system.star_system)
    }
  }

  fn describe_place(&self) -> String {
    FieldBuilder::new()
      .text("", &self.system.star_system)
      .opt_text(if self.docked { "Docked at" } else { "Near" }, self.place())
      .opt_text(
        "",
        self
          .station_type
          .as_deref()
          .filter(|_| self.docked)
          .map(naming::station_type),
      )
      .flag("On Foot", self.on_foot)
      .flag("Taxi", self.taxi)
      .opt_float("Lat:", self.latitude, 4, "")
      .opt_float("Long:", self.longitude, 4, "")
      .build()
  }

  fn describe_detail(&self) -> String {
    FieldBuilder::new()
      .opt_text(
        "Station Faction:",
        self.station_faction.as_ref().map(FactionRef::display),
      )
      .opt_text("Distance:", self.dist_from_star_ls.map(light_seconds))
      .block(self.system.detailed())
      .build()
  }
}

impl Describe for Location {
  fn info(&self) -> String { self.describe_place() }

  fn detailed(&self) -> String { self.describe_detail() }
}

/// Written instead of `Location` when the carrier the commander is docked
/// on jumps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CarrierJump(pub Location);

impl Describe for CarrierJump {
  fn info(&self) -> String { self.0.describe_place() }

  fn detailed(&self) -> String { self.0.describe_detail() }
}

impl CarrierEffect for CarrierJump {
  fn carrier(&self, meta: &EntryMeta, sink: &mut dyn CarrierSink) {
    sink.update(meta, CarrierUpdate::Jumped {
      system: self.0.system.star_system.clone(),
      body:   self.0.body.clone(),
    });
  }
}

// ─── Jump preparation ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StartJump {
  pub jump_type:      String,
  pub star_system:    Option<String>,
  pub system_address: Option<u64>,
  pub star_class:     Option<String>,
  pub taxi:           bool,
}

impl Describe for StartJump {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.jump_type)
      .opt_text("", self.star_system.as_deref())
      .opt_text("Star class:", self.star_class.as_deref())
      .flag("Taxi", self.taxi)
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FsdTarget {
  pub name:                     String,
  pub system_address:           Option<u64>,
  pub star_class:               Option<String>,
  pub remaining_jumps_in_route: Option<i64>,
}

impl Describe for FsdTarget {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.name)
      .opt_text("Star class:", self.star_class.as_deref())
      .opt_int("Jumps remaining:", self.remaining_jumps_in_route)
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NavRouteStop {
  pub star_system:    String,
  pub system_address: u64,
  pub star_pos:       [f64; 3],
  pub star_class:     String,
}

/// Plotted route. The journal line usually carries no stops; the game
/// writes them to a companion file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NavRoute {
  pub route: Vec<NavRouteStop>,
}

impl NavRoute {
  /// Sum of the straight-line hops between consecutive stops.
  pub fn total_distance(&self) -> f64 {
    self
      .route
      .windows(2)
      .map(|w| {
        let ([x1, y1, z1], [x2, y2, z2]) = (w[0].star_pos, w[1].star_pos);
        ((x1 - x2).powi(2) + (y1 - y2).powi(2) + (z1 - z2).powi(2)).sqrt()
      })
      .sum()
  }
}

impl Describe for NavRoute {
  fn info(&self) -> String {
    let (Some(first), Some(last)) = (self.route.first(), self.route.last()) else {
      return String::new();
    };
    FieldBuilder::new()
      .text("From", &first.star_system)
      .text("to", &last.star_system)
      .int("Jumps:", self.route.len() as i64 - 1)
      .text("Distance:", light_years(self.total_distance()))
      .build()
  }

  fn detailed(&self) -> String {
    lines(
      "",
      self
        .route
        .iter()
        .map(|stop| format!("{} ({})", stop.star_system, stop.star_class)),
    )
  }
}

// ─── Supercruise and bodies ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SupercruiseEntry {
  pub star_system:    String,
  pub system_address: Option<u64>,
  pub taxi:           bool,
  pub multicrew:      bool,
}

impl Describe for SupercruiseEntry {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.star_system)
      .flag("Taxi", self.taxi)
      .flag("Multicrew", self.multicrew)
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SupercruiseExit {
  pub star_system: String,
  pub body:        String,
  #[serde(rename = "BodyID")]
  pub body_id:     Option<i64>,
  pub body_type:   String,
  pub taxi:        bool,
}

impl Describe for SupercruiseExit {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("At", &self.body)
      .text("in", &self.star_system)
      .text("", naming::split_caps(&self.body_type))
      .build()
  }
}

/// `ApproachBody` and `LeaveBody`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BodyMovement {
  pub star_system:    String,
  pub system_address: Option<u64>,
  pub body:           String,
  #[serde(rename = "BodyID")]
  pub body_id:        Option<i64>,
}

impl Describe for BodyMovement {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.body)
      .text("in", &self.star_system)
      .build()
  }
}

pub type ApproachBody = BodyMovement;
pub type LeaveBody = BodyMovement;

/// `Touchdown` and `Liftoff`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SurfaceMovement {
  pub player_controlled:             bool,
  pub latitude:                      Option<f64>,
  pub longitude:                     Option<f64>,
  pub nearest_destination:           Option<String>,
  #[serde(rename = "NearestDestination_Localised")]
  pub nearest_destination_localised: Option<String>,
  pub star_system:                   Option<String>,
  pub body:                          Option<String>,
  pub on_station:                    bool,
  pub on_planet:                     bool,
  pub taxi:                          bool,
  pub multicrew:                     bool,
}

impl SurfaceMovement {
  pub fn nearest(&self) -> Option<String> {
    let fd = self.nearest_destination.as_deref()?;
    Some(naming::friendly(fd, self.nearest_destination_localised.as_deref()))
  }
}

impl Describe for SurfaceMovement {
  fn info(&self) -> String {
    FieldBuilder::new()
      .opt_text("", self.body.as_deref())
      .opt_float("Lat:", self.latitude, 4, "")
      .opt_float("Long:", self.longitude, 4, "")
      .opt_text("Near:", self.nearest())
      .flag("NPC Controlled", !self.player_controlled)
      .flag("Taxi", self.taxi)
      .build()
  }
}

pub type Touchdown = SurfaceMovement;
pub type Liftoff = SurfaceMovement;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FuelScoop {
  pub scooped: f64,
  pub total:   f64,
}

impl Describe for FuelScoop {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("Scooped", fixed(self.scooped, 2, "t"))
      .text("Total", fixed(self.total, 2, "t"))
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct JetConeBoost {
  pub boost_value: f64,
}

impl Describe for JetConeBoost {
  fn info(&self) -> String {
    FieldBuilder::new().float("Boost:", self.boost_value, 1, "x").build()
  }
}

// ─── SRV ─────────────────────────────────────────────────────────────────────

/// `LaunchSRV` and `DockSRV`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SrvMovement {
  pub loadout:            Option<String>,
  #[serde(rename = "SRVType")]
  pub srv_type:           Option<String>,
  #[serde(rename = "SRVType_Localised")]
  pub srv_type_localised: Option<String>,
  #[serde(rename = "ID")]
  pub id:                 Option<i64>,
  pub player_controlled:  Option<bool>,
}

impl Describe for SrvMovement {
  fn info(&self) -> String {
    let srv = match (&self.srv_type, &self.srv_type_localised) {
      (_, Some(loc)) if !loc.trim().is_empty() => loc.clone(),
      (Some(fd), _) => naming::split_caps(fd),
      _ => String::new(),
    };
    FieldBuilder::new()
      .text("", srv)
      .opt_text("Loadout:", self.loadout.as_deref().map(naming::split_caps))
      .flag("NPC Controlled", self.player_controlled == Some(false))
      .build()
  }
}

pub type LaunchSrv = SrvMovement;
pub type DockSrv = SrvMovement;

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn jump_json() -> serde_json::Value {
    json!({
      "StarSystem": "Shinrarta Dezhra",
      "SystemAddress": 3932277478106u64,
      "StarPos": [55.71875, 17.59375, 27.15625],
      "SystemAllegiance": "PilotsFederation",
      "SystemEconomy": "$economy_HighTech;",
      "SystemEconomy_Localised": "High Tech",
      "SystemSecondEconomy": "$economy_Industrial;",
      "SystemSecondEconomy_Localised": "Industrial",
      "SystemGovernment": "$government_Democracy;",
      "SystemGovernment_Localised": "Democracy",
      "SystemSecurity": "$SYSTEM_SECURITY_high;",
      "SystemSecurity_Localised": "High Security",
      "Population": 85206935,
      "SystemFaction": { "Name": "Pilots Federation Local Branch" },
      "JumpDist": 8.499,
      "FuelUsed": 1.2,
      "FuelLevel": 30.5,
      "BoostUsed": 4
    })
  }

  #[test]
  fn fsd_jump_reads_flattened_system() {
    let jump: FsdJump = serde_json::from_value(jump_json()).unwrap();
    assert_eq!(jump.system.star_system, "Shinrarta Dezhra");
    assert_eq!(
      jump.system.controlling_faction(),
      Some("Pilots Federation Local Branch")
    );
    assert_eq!(
      jump.info(),
      "Shinrarta Dezhra, 8.50 ly, Fuel 1.20 t, left 30.50 t, Neutron Boost"
    );
    assert!(jump.detailed().contains("Economy: High Tech/Industrial"));
    assert!(jump.detailed().contains("Population: 85,206,935"));
  }

  #[test]
  fn faction_ref_accepts_bare_string() {
    let loc: Location = serde_json::from_value(json!({
      "StarSystem": "Sol",
      "SystemFaction": "Mother Gaia",
      "Docked": true,
      "StationName": "Abraham Lincoln",
      "StationType": "Orbis"
    }))
    .unwrap();
    assert_eq!(loc.system.controlling_faction(), Some("Mother Gaia"));
    assert_eq!(loc.place(), Some("Abraham Lincoln"));
    assert!(loc.info().starts_with("Sol, Docked at Abraham Lincoln"));
  }

  #[test]
  fn nav_route_distance() {
    let route: NavRoute = serde_json::from_value(json!({
      "Route": [
        { "StarSystem": "A", "SystemAddress": 1, "StarPos": [0.0, 0.0, 0.0], "StarClass": "K" },
        { "StarSystem": "B", "SystemAddress": 2, "StarPos": [3.0, 4.0, 0.0], "StarClass": "M" },
        { "StarSystem": "C", "SystemAddress": 3, "StarPos": [3.0, 4.0, 10.0], "StarClass": "G" }
      ]
    }))
    .unwrap();
    assert!((route.total_distance() - 15.0).abs() < 1e-9);
    assert_eq!(route.info(), "From A, to C, Jumps: 2, Distance: 15.00 ly");
  }
}
