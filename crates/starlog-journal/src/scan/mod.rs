//! The `Scan` event: one star, planet or belt cluster, with derived
//! physical quantities.

pub mod planet;
pub mod star;
pub mod value;

use std::collections::BTreeMap;

use serde::Deserialize;
use starlog_core::{material, naming};
use strum::{EnumString, IntoEnumIterator};

pub use self::{
  planet::{Atmosphere, AtmosphereKind, PlanetClass, Volcanism, VolcanismKind},
  star::{SOLAR_RADIUS_M, SPEED_OF_LIGHT, StarType, Zone},
  value::ValueOptions,
};
use crate::{
  describe::Describe,
  fields::{FieldBuilder, fixed, light_seconds, lines, thousands},
};

pub const EARTH_GRAVITY: f64 = 9.80665;
pub const ATMOSPHERE_PA: f64 = 101_325.0;
pub const ASTRONOMICAL_UNIT_M: f64 = 149_597_870_700.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

// ─── Raw record ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Ring {
  pub name:       String,
  pub ring_class: String,
  #[serde(rename = "MassMT")]
  pub mass_mt:    f64,
  pub inner_rad:  f64,
  pub outer_rad:  f64,
}

impl Ring {
  /// Belts and rings share the record; the name tells them apart.
  pub fn is_belt(&self) -> bool { self.name.ends_with("Belt") }

  fn line(&self, body_name: &str) -> String {
    let short = self.name.strip_prefix(body_name).unwrap_or(&self.name).trim();
    FieldBuilder::new()
      .text("", short)
      .text("", naming::ring_class(&self.ring_class))
      .text("Mass:", format!("{} MT", thousands(self.mass_mt as i64)))
      .text("Inner:", format!("{} km", thousands((self.inner_rad / 1000.0) as i64)))
      .text("Outer:", format!("{} km", thousands((self.outer_rad / 1000.0) as i64)))
      .build()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Proportion {
  pub name:    String,
  pub percent: f64,
}

/// Older journals write materials as a name → percent object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScanMaterials {
  List(Vec<Proportion>),
  Map(BTreeMap<String, f64>),
}

impl Default for ScanMaterials {
  fn default() -> Self { Self::List(Vec::new()) }
}

impl ScanMaterials {
  pub fn proportions(&self) -> Vec<Proportion> {
    match self {
      Self::List(list) => list.clone(),
      Self::Map(map) => map
        .iter()
        .map(|(name, &percent)| Proportion { name: name.clone(), percent })
        .collect(),
    }
  }
}

/// Bulk composition, as fractions summing to about one.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Composition {
  pub ice:   f64,
  pub rock:  f64,
  pub metal: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum ParentKind {
  Null,
  Star,
  Planet,
  Ring,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Scan {
  pub scan_type:                String,
  pub body_name:                String,
  #[serde(rename = "BodyID")]
  pub body_id:                  Option<i64>,
  pub parents:                  Vec<BTreeMap<String, i64>>,
  pub star_system:              String,
  pub system_address:           Option<u64>,
  #[serde(rename = "DistanceFromArrivalLS")]
  pub distance_from_arrival_ls: f64,

  pub star_type:          String,
  pub subclass:           Option<i64>,
  pub stellar_mass:       Option<f64>,
  pub absolute_magnitude: Option<f64>,
  #[serde(rename = "Age_MY")]
  pub age_my:             Option<f64>,
  pub luminosity:         String,

  /// Metres.
  pub radius:              Option<f64>,
  /// Kelvin.
  pub surface_temperature: Option<f64>,
  /// Seconds.
  pub rotation_period:     Option<f64>,
  /// Radians.
  pub axial_tilt:          Option<f64>,

  /// Metres.
  pub semi_major_axis:     Option<f64>,
  pub eccentricity:        Option<f64>,
  pub orbital_inclination: Option<f64>,
  pub periapsis:           Option<f64>,
  /// Seconds.
  pub orbital_period:      Option<f64>,
  pub ascending_node:      Option<f64>,
  pub mean_anomaly:        Option<f64>,

  pub rings:         Vec<Ring>,
  pub reserve_level: String,

  pub planet_class:           String,
  pub tidal_lock:             bool,
  pub terraform_state:        String,
  pub atmosphere:             String,
  pub atmosphere_type:        String,
  pub atmosphere_composition: Vec<Proportion>,
  pub volcanism:              String,
  #[serde(rename = "MassEM")]
  pub mass_em:                Option<f64>,
  /// m/s².
  pub surface_gravity:        Option<f64>,
  /// Pascals.
  pub surface_pressure:       Option<f64>,
  pub landable:               bool,
  pub materials:              ScanMaterials,
  pub composition:            Option<Composition>,

  pub was_discovered: Option<bool>,
  pub was_mapped:     Option<bool>,
}

// ─── Classification ──────────────────────────────────────────────────────────

impl Scan {
  pub fn is_star(&self) -> bool { !self.star_type.trim().is_empty() }

  pub fn is_planet(&self) -> bool { !self.planet_class.trim().is_empty() }

  pub fn is_belt_cluster(&self) -> bool {
    !self.is_star() && !self.is_planet() && self.body_name.contains("Belt Cluster")
  }

  pub fn star_kind(&self) -> Option<StarType> {
    self.is_star().then(|| StarType::from_code(&self.star_type))
  }

  pub fn planet_kind(&self) -> Option<PlanetClass> {
    self.is_planet().then(|| PlanetClass::from_journal(&self.planet_class))
  }

  /// The parents chain, nearest first. Unrecognised entries are skipped.
  pub fn parents(&self) -> Vec<(ParentKind, i64)> {
    self
      .parents
      .iter()
      .flat_map(|entry| entry.iter())
      .filter_map(|(kind, &id)| kind.parse::<ParentKind>().ok().map(|k| (k, id)))
      .collect()
  }

  pub fn is_moon(&self) -> bool {
    self.parents().iter().any(|(kind, _)| *kind == ParentKind::Planet)
  }

  pub fn is_terraformable(&self) -> bool {
    matches!(self.terraform_state.as_str(), "Terraformable" | "Terraforming")
  }

  /// Body name with the system prefix removed; the main star of a
  /// single-star system keeps its full name.
  pub fn body_designation(&self) -> &str {
    let name = self.body_name.as_str();
    let system = self.star_system.as_str();
    if system.is_empty() || name.len() <= system.len() {
      return name;
    }
    match name.get(..system.len()) {
      Some(prefix) if prefix.eq_ignore_ascii_case(system) => {
        name[system.len()..].trim()
      }
      _ => name,
    }
  }

  pub fn atmosphere_info(&self) -> Atmosphere {
    Atmosphere::parse(&self.atmosphere, &self.atmosphere_type)
  }

  pub fn volcanism_info(&self) -> Volcanism { Volcanism::parse(&self.volcanism) }
}

// ─── Unit conversions ────────────────────────────────────────────────────────

impl Scan {
  pub fn radius_km(&self) -> Option<f64> { self.radius.map(|r| r / 1000.0) }

  pub fn radius_solar(&self) -> Option<f64> { self.radius.map(|r| r / SOLAR_RADIUS_M) }

  pub fn gravity_g(&self) -> Option<f64> {
    self.surface_gravity.map(|g| g / EARTH_GRAVITY)
  }

  pub fn pressure_atm(&self) -> Option<f64> {
    self.surface_pressure.map(|p| p / ATMOSPHERE_PA)
  }

  pub fn semi_major_axis_au(&self) -> Option<f64> {
    self.semi_major_axis.map(|a| a / ASTRONOMICAL_UNIT_M)
  }

  pub fn semi_major_axis_ls(&self) -> Option<f64> {
    self.semi_major_axis.map(|a| a / SPEED_OF_LIGHT)
  }

  pub fn orbital_period_days(&self) -> Option<f64> {
    self.orbital_period.map(|s| s / SECONDS_PER_DAY)
  }

  pub fn rotation_period_days(&self) -> Option<f64> {
    self.rotation_period.map(|s| s / SECONDS_PER_DAY)
  }

  pub fn axial_tilt_degrees(&self) -> Option<f64> {
    self.axial_tilt.map(f64::to_degrees)
  }

  /// Millions of years, or billions past a thousand.
  pub fn age_text(&self) -> Option<String> {
    self.age_my.map(|age| {
      if age >= 1000.0 {
        fixed(age / 1000.0, 2, "billion years")
      } else {
        format!("{} million years", thousands(age as i64))
      }
    })
  }

  /// Inner and outer edge of `zone` in light seconds; stars only.
  pub fn zone(&self, zone: Zone) -> Option<(f64, Option<f64>)> {
    let (radius, temp) = (self.radius?, self.surface_temperature?);
    self.is_star().then(|| zone.range(radius, temp))
  }
}

// ─── Value ───────────────────────────────────────────────────────────────────

impl Scan {
  pub fn estimated_value(&self, opts: &ValueOptions) -> i64 {
    if let Some(star) = self.star_kind() {
      value::star_value(star, self.stellar_mass.unwrap_or(0.0), opts)
    } else if let Some(class) = self.planet_kind() {
      value::planet_value(
        class,
        self.is_terraformable(),
        self.mass_em.unwrap_or(0.0),
        opts,
      )
    } else {
      0
    }
  }

  fn survey(&self, mapped: bool) -> ValueOptions {
    ValueOptions {
      mapped,
      efficient: mapped,
      odyssey: mapped,
      first_discovery: self.was_discovered == Some(false),
      first_mapped: self.was_mapped == Some(false),
    }
  }

  /// Value from a detailed scan alone.
  pub fn scan_value(&self) -> i64 { self.estimated_value(&self.survey(false)) }

  /// Value after an efficient surface map; planets only.
  pub fn mapped_value(&self) -> Option<i64> {
    self.is_planet().then(|| self.estimated_value(&self.survey(true)))
  }
}

// ─── Rendering ───────────────────────────────────────────────────────────────

impl Scan {
  fn star_info(&self, star: StarType) -> String {
    FieldBuilder::new()
      .text("", self.body_designation())
      .text("", star.name())
      .opt_float("Mass:", self.stellar_mass, 2, "SM")
      .opt_float("Radius:", self.radius_solar(), 2, "SR")
      .opt_text("Age:", self.age_text())
      .nonzero_float("Distance:", self.distance_from_arrival_ls.round(), 0, "ls")
      .credits("Value:", self.scan_value())
      .build()
  }

  fn planet_info(&self, class: PlanetClass) -> String {
    FieldBuilder::new()
      .text("", self.body_designation())
      .text("", class.name())
      .flag("Terraformable", self.is_terraformable())
      .flag("Landable", self.landable)
      .opt_float("Mass:", self.mass_em, 2, "EM")
      .opt_float("Gravity:", self.gravity_g(), 2, "g")
      .nonzero_float("Distance:", self.distance_from_arrival_ls.round(), 0, "ls")
      .credits("Value:", self.scan_value())
      .build()
  }

  fn orbit_report(&self) -> String {
    FieldBuilder::new()
      .opt_float("Semi-major axis:", self.semi_major_axis_au(), 2, "AU")
      .opt_float("Orbital period:", self.orbital_period_days(), 1, "days")
      .opt_float("Eccentricity:", self.eccentricity, 4, "")
      .opt_float("Inclination:", self.orbital_inclination, 2, "°")
      .opt_float("Periapsis:", self.periapsis, 2, "°")
      .opt_float("Ascending node:", self.ascending_node, 2, "°")
      .opt_float("Mean anomaly:", self.mean_anomaly, 2, "°")
      .line()
      .opt_float("Rotation period:", self.rotation_period_days(), 1, "days")
      .flag("Tidally locked", self.tidal_lock)
      .opt_float("Axial tilt:", self.axial_tilt_degrees(), 2, "°")
      .build()
  }

  fn surface_report(&self) -> String {
    let atmo = self.atmosphere_info();
    let volc = self.volcanism_info();
    let composition = lines(
      "  ",
      self
        .atmosphere_composition
        .iter()
        .map(|p| format!("{}: {:.1}%", p.name, p.percent)),
    );
    FieldBuilder::new()
      .opt_float("Temperature:", self.surface_temperature, 0, "K")
      .opt_float("Pressure:", self.pressure_atm(), 2, "atm")
      .line()
      .text("Atmosphere:", atmo.to_string())
      .line()
      .text("Volcanism:", volc.to_string())
      .block(composition)
      .build()
  }

  fn materials_report(&self) -> String {
    let mut props = self.materials.proportions();
    props.sort_by(|a, b| b.percent.total_cmp(&a.percent));
    let items = props.iter().map(|p| {
      let name = material::material_name(&p.name, None);
      format!("{name}: {:.1}%", p.percent)
    });
    let body = lines("  ", items);
    if body.is_empty() { body } else { format!("Materials:\n{body}") }
  }

  fn composition_report(&self) -> String {
    let Some(c) = self.composition else {
      return String::new();
    };
    let parts = FieldBuilder::new()
      .nonzero_float("Rock", c.rock * 100.0, 1, "%")
      .nonzero_float("Metal", c.metal * 100.0, 1, "%")
      .nonzero_float("Ice", c.ice * 100.0, 1, "%")
      .build();
    if parts.is_empty() { parts } else { format!("Composition: {parts}") }
  }

  fn rings_report(&self) -> String {
    let rings = self.rings.iter().map(|r| r.line(&self.body_name));
    let body = lines("  ", rings);
    if body.is_empty() { body } else { format!("Rings:\n{body}") }
  }

  fn zones_report(&self) -> String {
    let rows = Zone::iter().filter_map(|zone| {
      let (inner, outer) = self.zone(zone)?;
      let range = match outer {
        Some(outer) => {
          format!("{} to {}", light_seconds(inner), light_seconds(outer))
        }
        None => format!("{} and beyond", light_seconds(inner)),
      };
      Some(format!("{}: {range}", zone.as_ref()))
    });
    let body = lines("  ", rows);
    if body.is_empty() { body } else { format!("Zones:\n{body}") }
  }
}

impl Describe for Scan {
  fn info(&self) -> String {
    if let Some(star) = self.star_kind() {
      self.star_info(star)
    } else if let Some(class) = self.planet_kind() {
      self.planet_info(class)
    } else {
      FieldBuilder::new()
        .text("", self.body_designation())
        .nonzero_float("Distance:", self.distance_from_arrival_ls.round(), 0, "ls")
        .build()
    }
  }

  fn detailed(&self) -> String {
    let star_temp = self.surface_temperature.filter(|_| self.is_star());
    let mut out = FieldBuilder::new()
      .opt_float("Surface temperature:", star_temp, 0, "K")
      .text("Luminosity:", &self.luminosity)
      .opt_float("Absolute magnitude:", self.absolute_magnitude, 2, "")
      .line()
      .opt_float("Radius:", self.radius_km(), 0, "km")
      .line()
      .block(self.orbit_report());
    if self.is_planet() {
      out = out
        .block(self.surface_report())
        .block(self.composition_report())
        .block(self.materials_report());
    }
    out = out.block(self.rings_report());
    if self.is_star() {
      out = out.block(self.zones_report());
    }
    if let Some(mapped) = self.mapped_value() {
      out = out.line().credits("Mapped value:", mapped);
    }
    out.build()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn scan(v: serde_json::Value) -> Scan { serde_json::from_value(v).unwrap() }

  #[test]
  fn main_star() {
    let s = scan(json!({
      "ScanType": "AutoScan",
      "BodyName": "Sol",
      "BodyID": 0,
      "StarSystem": "Sol",
      "DistanceFromArrivalLS": 0.0,
      "StarType": "G",
      "Subclass": 2,
      "StellarMass": 1.0,
      "Radius": 695700000.0,
      "AbsoluteMagnitude": 4.83,
      "Age_MY": 4600,
      "SurfaceTemperature": 5778.0,
      "Luminosity": "V",
      "WasDiscovered": true,
      "WasMapped": false
    }));
    assert!(s.is_star());
    assert!(!s.is_planet());
    assert_eq!(s.body_designation(), "Sol");
    assert_eq!(s.star_kind(), Some(StarType::G));
    assert_eq!(s.age_text().as_deref(), Some("4.60 billion years"));
    assert_eq!(s.scan_value(), 1218);
    assert_eq!(
      s.info(),
      "Sol, G (White-Yellow) Star, Mass: 1.00 SM, Radius: 1.00 SR, Age: 4.60 billion years, Value: 1,218 cr"
    );
    let detail = s.detailed();
    assert!(detail.contains("Zones:\n  Habitable Zone: 390 ls to 779 ls"), "{detail}");
    assert!(detail.contains("Icy Planets: "), "{detail}");
    assert!(s.mapped_value().is_none());
  }

  #[test]
  fn terraformable_moon() {
    let s = scan(json!({
      "ScanType": "Detailed",
      "BodyName": "Col 285 Sector AB-C d1 4 a",
      "BodyID": 12,
      "Parents": [ {"Planet": 9}, {"Null": 8}, {"Star": 0} ],
      "StarSystem": "Col 285 Sector AB-C d1",
      "DistanceFromArrivalLS": 1234.56,
      "TidalLock": true,
      "TerraformState": "Terraformable",
      "PlanetClass": "High metal content body",
      "Atmosphere": "thin carbon dioxide atmosphere",
      "AtmosphereType": "CarbonDioxide",
      "AtmosphereComposition": [ {"Name": "CarbonDioxide", "Percent": 99.0} ],
      "Volcanism": "minor rocky magma volcanism",
      "MassEM": 0.5,
      "Radius": 4000000.0,
      "SurfaceGravity": 9.80665,
      "SurfaceTemperature": 250.0,
      "SurfacePressure": 10132.5,
      "Landable": false,
      "Materials": [
        {"Name": "iron", "Percent": 20.0},
        {"Name": "nickel", "Percent": 15.0}
      ],
      "Composition": {"Ice": 0.0, "Rock": 0.7, "Metal": 0.3},
      "SemiMajorAxis": 149597870700.0,
      "OrbitalPeriod": 864000.0,
      "RotationPeriod": 86400.0,
      "AxialTilt": 0.5,
      "WasDiscovered": false,
      "WasMapped": false
    }));
    assert!(s.is_planet());
    assert!(s.is_moon());
    assert!(s.is_terraformable());
    assert_eq!(s.body_designation(), "4 a");
    assert_eq!(s.parents()[0], (ParentKind::Planet, 9));
    assert!((s.gravity_g().unwrap() - 1.0).abs() < 1e-9);
    assert!((s.pressure_atm().unwrap() - 0.1).abs() < 1e-9);
    assert!((s.semi_major_axis_au().unwrap() - 1.0).abs() < 1e-9);
    assert!((s.orbital_period_days().unwrap() - 10.0).abs() < 1e-9);
    assert_eq!(s.atmosphere_info().kind, AtmosphereKind::CarbonDioxide);
    assert!(s.atmosphere_info().thin);
    assert_eq!(s.volcanism_info().kind, VolcanismKind::Rocky);

    let info = s.info();
    assert!(
      info.starts_with("4 a, High metal content body, Terraformable, Mass: 0.50 EM, Gravity: 1.00 g, Distance: 1235 ls, Value: "),
      "{info}"
    );
    let detail = s.detailed();
    assert!(detail.contains("Atmosphere: Thin Carbon Dioxide"), "{detail}");
    assert!(detail.contains("Volcanism: Minor Rocky Magma"), "{detail}");
    assert!(detail.contains("Materials:\n  Iron: 20.0%\n  Nickel: 15.0%"), "{detail}");
    assert!(detail.contains("Composition: Rock 70.0 %, Metal 30.0 %"), "{detail}");
    assert!(detail.contains("Mapped value:"), "{detail}");
    assert!(s.mapped_value().unwrap() > s.scan_value());
  }

  #[test]
  fn belt_cluster_and_old_materials() {
    let s = scan(json!({
      "BodyName": "Sol A Belt Cluster 1",
      "StarSystem": "Sol",
      "DistanceFromArrivalLS": 400.4
    }));
    assert!(s.is_belt_cluster());
    assert_eq!(s.info(), "A Belt Cluster 1, Distance: 400 ls");
    assert_eq!(s.scan_value(), 0);

    let s = scan(json!({
      "BodyName": "Old 1",
      "PlanetClass": "Rocky body",
      "Materials": { "iron": 18.5, "sulphur": 20.1 }
    }));
    let mut props = s.materials.proportions();
    props.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(props.len(), 2);
    assert_eq!(props[0].name, "iron");
  }

  #[test]
  fn rings_listed_with_short_names() {
    let s = scan(json!({
      "BodyName": "Hip 1 5",
      "StarSystem": "Hip 1",
      "PlanetClass": "Sudarsky class I gas giant",
      "Rings": [{
        "Name": "Hip 1 5 A Ring",
        "RingClass": "eRingClass_Icy",
        "MassMT": 1.5e10,
        "InnerRad": 7.0e7,
        "OuterRad": 1.2e8
      }]
    }));
    assert!(!s.rings[0].is_belt());
    let detail = s.detailed();
    assert!(
      detail.contains("Rings:\n  A Ring, Icy, Mass: 15,000,000,000 MT, Inner: 70,000 km, Outer: 120,000 km"),
      "{detail}"
    );
  }
}
