//! Star classification and black-body zones.

use strum::{AsRefStr, EnumIter, EnumMessage, EnumString};

/// Stellar classes as written in the journal's `StarType` field.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  AsRefStr,
  EnumIter,
  EnumMessage,
  EnumString,
)]
pub enum StarType {
  #[strum(message = "O (Blue-White) Star")]
  O,
  #[strum(message = "B (Blue-White) Star")]
  B,
  #[strum(message = "A (Blue-White) Star")]
  A,
  #[strum(message = "F (White) Star")]
  F,
  #[strum(message = "G (White-Yellow) Star")]
  G,
  #[strum(message = "K (Yellow-Orange) Star")]
  K,
  #[strum(message = "M (Red Dwarf) Star")]
  M,

  #[strum(serialize = "B_BlueWhiteSuperGiant", message = "B (Blue-White Super Giant) Star")]
  BBlueWhiteSuperGiant,
  #[strum(serialize = "A_BlueWhiteSuperGiant", message = "A (Blue-White Super Giant) Star")]
  ABlueWhiteSuperGiant,
  #[strum(serialize = "F_WhiteSuperGiant", message = "F (White Super Giant) Star")]
  FWhiteSuperGiant,
  #[strum(serialize = "G_WhiteSuperGiant", message = "G (White-Yellow Super Giant) Star")]
  GWhiteSuperGiant,
  #[strum(serialize = "K_OrangeGiant", message = "K (Yellow-Orange Giant) Star")]
  KOrangeGiant,
  #[strum(serialize = "M_RedGiant", message = "M (Red Giant) Star")]
  MRedGiant,
  #[strum(serialize = "M_RedSuperGiant", message = "M (Red Super Giant) Star")]
  MRedSuperGiant,

  #[strum(message = "L (Brown Dwarf) Star")]
  L,
  #[strum(message = "T (Brown Dwarf) Star")]
  T,
  #[strum(message = "Y (Brown Dwarf) Star")]
  Y,

  #[strum(serialize = "TTS", message = "T Tauri Star")]
  TTauri,
  #[strum(serialize = "AeBe", message = "Herbig Ae/Be Star")]
  HerbigAeBe,

  #[strum(serialize = "W", message = "Wolf-Rayet Star")]
  WolfRayet,
  #[strum(serialize = "WN", message = "Wolf-Rayet N Star")]
  WolfRayetN,
  #[strum(serialize = "WNC", message = "Wolf-Rayet NC Star")]
  WolfRayetNC,
  #[strum(serialize = "WC", message = "Wolf-Rayet C Star")]
  WolfRayetC,
  #[strum(serialize = "WO", message = "Wolf-Rayet O Star")]
  WolfRayetO,

  #[strum(serialize = "CS", message = "CS Star")]
  CarbonS,
  #[strum(serialize = "C", message = "C Star")]
  Carbon,
  #[strum(serialize = "CN", message = "CN Star")]
  CarbonN,
  #[strum(serialize = "CJ", message = "CJ Star")]
  CarbonJ,
  #[strum(serialize = "CH", message = "CH Star")]
  CarbonH,
  #[strum(serialize = "CHd", message = "CHd Star")]
  CarbonHd,
  #[strum(serialize = "MS", message = "MS-type Star")]
  Ms,
  #[strum(serialize = "S", message = "S-type Star")]
  S,

  #[strum(message = "White Dwarf (D) Star")]
  D,
  #[strum(message = "White Dwarf (DA) Star")]
  DA,
  #[strum(message = "White Dwarf (DAB) Star")]
  DAB,
  #[strum(message = "White Dwarf (DAO) Star")]
  DAO,
  #[strum(message = "White Dwarf (DAZ) Star")]
  DAZ,
  #[strum(message = "White Dwarf (DAV) Star")]
  DAV,
  #[strum(message = "White Dwarf (DB) Star")]
  DB,
  #[strum(message = "White Dwarf (DBZ) Star")]
  DBZ,
  #[strum(message = "White Dwarf (DBV) Star")]
  DBV,
  #[strum(message = "White Dwarf (DO) Star")]
  DO,
  #[strum(message = "White Dwarf (DOV) Star")]
  DOV,
  #[strum(message = "White Dwarf (DQ) Star")]
  DQ,
  #[strum(message = "White Dwarf (DC) Star")]
  DC,
  #[strum(message = "White Dwarf (DCV) Star")]
  DCV,
  #[strum(message = "White Dwarf (DX) Star")]
  DX,

  #[strum(serialize = "N", message = "Neutron Star")]
  Neutron,
  #[strum(serialize = "H", message = "Black Hole")]
  BlackHole,
  #[strum(message = "Supermassive Black Hole")]
  SupermassiveBlackHole,
  #[strum(serialize = "X", message = "Exotic Star")]
  Exotic,

  #[strum(message = "Rogue Planet")]
  RoguePlanet,
  #[strum(message = "Nebula")]
  Nebula,
  #[strum(message = "Stellar Remnant Nebula")]
  StellarRemnantNebula,

  #[default]
  #[strum(message = "Unknown Star")]
  Unknown,
}

impl StarType {
  /// Never fails; unrecognised codes are `Unknown`.
  pub fn from_code(code: &str) -> Self { code.trim().parse().unwrap_or_default() }

  pub fn name(self) -> &'static str { self.get_message().unwrap_or("Unknown Star") }

  pub fn is_main_sequence(self) -> bool {
    matches!(
      self,
      Self::O | Self::B | Self::A | Self::F | Self::G | Self::K | Self::M
    )
  }

  pub fn is_giant(self) -> bool {
    matches!(
      self,
      Self::BBlueWhiteSuperGiant
        | Self::ABlueWhiteSuperGiant
        | Self::FWhiteSuperGiant
        | Self::GWhiteSuperGiant
        | Self::KOrangeGiant
        | Self::MRedGiant
        | Self::MRedSuperGiant
    )
  }

  pub fn is_brown_dwarf(self) -> bool { matches!(self, Self::L | Self::T | Self::Y) }

  pub fn is_proto_star(self) -> bool { matches!(self, Self::TTauri | Self::HerbigAeBe) }

  pub fn is_wolf_rayet(self) -> bool {
    matches!(
      self,
      Self::WolfRayet
        | Self::WolfRayetN
        | Self::WolfRayetNC
        | Self::WolfRayetC
        | Self::WolfRayetO
    )
  }

  pub fn is_carbon(self) -> bool {
    matches!(
      self,
      Self::CarbonS
        | Self::Carbon
        | Self::CarbonN
        | Self::CarbonJ
        | Self::CarbonH
        | Self::CarbonHd
    )
  }

  pub fn is_white_dwarf(self) -> bool { self.as_ref().starts_with('D') }

  pub fn is_neutron(self) -> bool { self == Self::Neutron }

  pub fn is_black_hole(self) -> bool {
    matches!(self, Self::BlackHole | Self::SupermassiveBlackHole)
  }

  /// Scoopable for fuel: the KGB FOAM classes and their giants.
  pub fn is_scoopable(self) -> bool {
    matches!(
      self,
      Self::O | Self::B | Self::A | Self::F | Self::G | Self::K | Self::M
    ) || self.is_giant()
  }
}

// ─── Zones ───────────────────────────────────────────────────────────────────

pub const SOLAR_RADIUS_M: f64 = 695_700_000.0;
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Distance, in light seconds, from a star of radius `radius_m` and surface
/// temperature `star_temp` at which a black body reaches `temp`.
pub fn distance_for_black_body_temperature(
  radius_m: f64,
  star_temp: f64,
  temp: f64,
) -> f64 {
  let top = radius_m.powi(2) * star_temp.powi(4);
  let bottom = 4.0 * temp.powi(4);
  (top / bottom).sqrt() / SPEED_OF_LIGHT
}

/// Orbit bands where particular planet classes form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
pub enum Zone {
  #[strum(serialize = "Habitable Zone")]
  Habitable,
  #[strum(serialize = "Metal Rich")]
  MetalRich,
  #[strum(serialize = "Water Worlds")]
  WaterWorld,
  #[strum(serialize = "Earth Like")]
  EarthLike,
  #[strum(serialize = "Ammonia Worlds")]
  Ammonia,
  #[strum(serialize = "Icy Planets")]
  Icy,
}

impl Zone {
  /// Black-body temperatures (hot edge, cold edge) bounding the zone. `None`
  /// is unbounded in that direction.
  pub fn temperatures(self) -> (Option<f64>, Option<f64>) {
    match self {
      Self::Habitable => (Some(315.0), Some(223.0)),
      Self::MetalRich => (None, Some(1100.0)),
      Self::WaterWorld => (Some(307.0), Some(156.0)),
      Self::EarthLike => (Some(281.0), Some(227.0)),
      Self::Ammonia => (Some(193.0), Some(117.0)),
      Self::Icy => (Some(150.0), None),
    }
  }

  /// Inner and outer edge in light seconds around a star.
  pub fn range(self, radius_m: f64, star_temp: f64) -> (f64, Option<f64>) {
    let dist = |t: f64| distance_for_black_body_temperature(radius_m, star_temp, t);
    let (hot, cold) = self.temperatures();
    (hot.map(dist).unwrap_or(0.0), cold.map(dist))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn codes_parse() {
    assert_eq!(StarType::from_code("K"), StarType::K);
    assert_eq!(StarType::from_code("TTS"), StarType::TTauri);
    assert_eq!(StarType::from_code("M_RedGiant"), StarType::MRedGiant);
    assert_eq!(StarType::from_code("DAV"), StarType::DAV);
    assert_eq!(StarType::from_code("N"), StarType::Neutron);
    assert_eq!(StarType::from_code("Q"), StarType::Unknown);
    assert_eq!(StarType::from_code("TTS").name(), "T Tauri Star");
  }

  #[test]
  fn predicates() {
    assert!(StarType::DAV.is_white_dwarf());
    assert!(!StarType::Neutron.is_white_dwarf());
    assert!(StarType::SupermassiveBlackHole.is_black_hole());
    assert!(StarType::Y.is_brown_dwarf());
    assert!(StarType::KOrangeGiant.is_scoopable());
    assert!(!StarType::L.is_scoopable());
    assert!(StarType::CarbonHd.is_carbon());
    assert!(StarType::WolfRayetNC.is_wolf_rayet());
  }

  #[test]
  fn sol_habitable_zone() {
    let (inner, outer) = Zone::Habitable.range(SOLAR_RADIUS_M, 5778.0);
    // Roughly 0.78 to 1.56 AU.
    assert!((inner - 390.0).abs() < 10.0, "inner {inner}");
    let outer = outer.unwrap();
    assert!((outer - 780.0).abs() < 15.0, "outer {outer}");
    let (icy_inner, icy_outer) = Zone::Icy.range(SOLAR_RADIUS_M, 5778.0);
    assert!(icy_outer.is_none());
    assert!(icy_inner > outer);
  }
}
