//! Planet class, atmosphere and volcanism.
//!
//! Atmosphere and volcanism arrive as free text (`"hot thick carbon
//! dioxide atmosphere"`, `"minor water geysers volcanism"`). The adjective
//! words are peeled off as flags and what remains is matched against the
//! kind tables, ignoring case, spaces and hyphens.

use std::fmt;

use starlog_core::naming;
use strum::{AsRefStr, EnumString, IntoStaticStr};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PlanetClass {
  #[strum(serialize = "Metal rich body")]
  MetalRich,
  #[strum(serialize = "High metal content body")]
  HighMetalContent,
  #[strum(serialize = "Rocky body")]
  Rocky,
  #[strum(serialize = "Icy body")]
  Icy,
  #[strum(serialize = "Rocky ice body")]
  RockyIce,
  #[strum(serialize = "Earthlike body")]
  EarthLike,
  #[strum(serialize = "Water world")]
  WaterWorld,
  #[strum(serialize = "Ammonia world")]
  AmmoniaWorld,
  #[strum(serialize = "Water giant")]
  WaterGiant,
  #[strum(serialize = "Water giant with life")]
  WaterGiantWithLife,
  #[strum(serialize = "Gas giant with water based life")]
  GasGiantWaterLife,
  #[strum(serialize = "Gas giant with ammonia based life")]
  GasGiantAmmoniaLife,
  #[strum(serialize = "Sudarsky class I gas giant")]
  SudarskyI,
  #[strum(serialize = "Sudarsky class II gas giant")]
  SudarskyII,
  #[strum(serialize = "Sudarsky class III gas giant")]
  SudarskyIII,
  #[strum(serialize = "Sudarsky class IV gas giant")]
  SudarskyIV,
  #[strum(serialize = "Sudarsky class V gas giant")]
  SudarskyV,
  #[strum(serialize = "Helium rich gas giant")]
  HeliumRich,
  #[strum(serialize = "Helium gas giant")]
  Helium,
  #[default]
  #[strum(serialize = "Unknown body")]
  Unknown,
}

impl PlanetClass {
  pub fn from_journal(text: &str) -> Self { text.trim().parse().unwrap_or_default() }

  pub fn name(self) -> &'static str { self.into() }

  pub fn is_gas_giant(self) -> bool {
    matches!(
      self,
      Self::GasGiantWaterLife
        | Self::GasGiantAmmoniaLife
        | Self::SudarskyI
        | Self::SudarskyII
        | Self::SudarskyIII
        | Self::SudarskyIV
        | Self::SudarskyV
        | Self::HeliumRich
        | Self::Helium
        | Self::WaterGiant
        | Self::WaterGiantWithLife
    )
  }

  /// Earth-like, water and ammonia worlds.
  pub fn is_notable(self) -> bool {
    matches!(self, Self::EarthLike | Self::WaterWorld | Self::AmmoniaWorld)
  }
}

/// Lowercase, drop spaces and hyphens.
fn squash(words: &[&str]) -> String {
  words
    .iter()
    .flat_map(|w| w.chars())
    .filter(|c| !matches!(c, ' ' | '-' | '_'))
    .collect::<String>()
    .to_ascii_lowercase()
}

// ─── Atmosphere ──────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum AtmosphereKind {
  #[default]
  #[strum(to_string = "None", serialize = "no")]
  None,
  Ammonia,
  #[strum(to_string = "AmmoniaOxygen", serialize = "ammoniaandoxygen")]
  AmmoniaOxygen,
  AmmoniaRich,
  Argon,
  ArgonRich,
  CarbonDioxide,
  CarbonDioxideRich,
  #[strum(to_string = "EarthLike", serialize = "suitableforwaterbasedlife")]
  EarthLike,
  Helium,
  Methane,
  MethaneRich,
  MetallicVapour,
  Neon,
  NeonRich,
  Nitrogen,
  Oxygen,
  SilicateVapour,
  SulphurDioxide,
  Water,
  WaterRich,
  Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Atmosphere {
  pub kind:  AtmosphereKind,
  pub thin:  bool,
  pub thick: bool,
  pub hot:   bool,
}

impl Atmosphere {
  /// `atmosphere_type` is the newer CamelCase field; when blank the kind is
  /// taken from the free text. Adjectives always come from the text.
  pub fn parse(text: &str, atmosphere_type: &str) -> Self {
    let lower = text.to_ascii_lowercase();
    let mut atmo = Self::default();
    let mut rest = Vec::new();
    for word in lower.split_whitespace() {
      match word {
        "thin" => atmo.thin = true,
        "thick" => atmo.thick = true,
        "hot" => atmo.hot = true,
        "atmosphere" => {}
        other => rest.push(other),
      }
    }
    let from_type = atmosphere_type.trim();
    let key = if from_type.is_empty() || from_type.eq_ignore_ascii_case("None")
    {
      squash(&rest)
    } else {
      from_type.to_string()
    };
    atmo.kind = if key.is_empty() {
      AtmosphereKind::None
    } else {
      key.parse().unwrap_or(AtmosphereKind::Unknown)
    };
    atmo
  }

  pub fn is_none(&self) -> bool { self.kind == AtmosphereKind::None }
}

impl fmt::Display for Atmosphere {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_none() {
      return f.write_str("No atmosphere");
    }
    if self.hot {
      f.write_str("Hot ")?;
    }
    if self.thin {
      f.write_str("Thin ")?;
    }
    if self.thick {
      f.write_str("Thick ")?;
    }
    write!(f, "{}", naming::split_caps(self.kind.as_ref()))
  }
}

// ─── Volcanism ───────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum VolcanismKind {
  #[default]
  #[strum(to_string = "None", serialize = "no")]
  None,
  Water,
  SulphurDioxide,
  Ammonia,
  Methane,
  Nitrogen,
  CarbonDioxide,
  SilicateVapour,
  #[strum(to_string = "Metallic", serialize = "iron")]
  Metallic,
  #[strum(to_string = "Rocky", serialize = "silicate")]
  Rocky,
  Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Volcanism {
  pub kind:    VolcanismKind,
  pub minor:   bool,
  pub major:   bool,
  /// Geysers rather than magma.
  pub geysers: bool,
}

impl Volcanism {
  pub fn parse(text: &str) -> Self {
    let lower = text.to_ascii_lowercase();
    let mut volc = Self::default();
    let mut rest = Vec::new();
    for word in lower.split_whitespace() {
      match word {
        "minor" => volc.minor = true,
        "major" => volc.major = true,
        "geysers" => volc.geysers = true,
        "magma" | "volcanism" => {}
        other => rest.push(other),
      }
    }
    let key = squash(&rest);
    volc.kind = if key.is_empty() {
      VolcanismKind::None
    } else {
      key.parse().unwrap_or(VolcanismKind::Unknown)
    };
    volc
  }

  pub fn is_none(&self) -> bool { self.kind == VolcanismKind::None }
}

impl fmt::Display for Volcanism {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_none() {
      return f.write_str("No volcanism");
    }
    if self.minor {
      f.write_str("Minor ")?;
    }
    if self.major {
      f.write_str("Major ")?;
    }
    let kind = naming::split_caps(self.kind.as_ref());
    let form = if self.geysers { "Geysers" } else { "Magma" };
    write!(f, "{kind} {form}")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn planet_classes() {
    assert_eq!(
      PlanetClass::from_journal("Sudarsky class II gas giant"),
      PlanetClass::SudarskyII
    );
    assert_eq!(
      PlanetClass::from_journal("earthlike body"),
      PlanetClass::EarthLike
    );
    assert_eq!(PlanetClass::from_journal("Dyson sphere"), PlanetClass::Unknown);
    assert!(PlanetClass::HeliumRich.is_gas_giant());
    assert!(!PlanetClass::Rocky.is_gas_giant());
  }

  #[test]
  fn atmosphere_from_text() {
    let a = Atmosphere::parse("hot thick carbon dioxide atmosphere", "");
    assert_eq!(a.kind, AtmosphereKind::CarbonDioxide);
    assert!(a.hot && a.thick && !a.thin);
    assert_eq!(a.to_string(), "Hot Thick Carbon Dioxide");

    let a = Atmosphere::parse("thin carbon dioxide-rich atmosphere", "");
    assert_eq!(a.kind, AtmosphereKind::CarbonDioxideRich);

    let a = Atmosphere::parse("thin ammonia and oxygen atmosphere", "");
    assert_eq!(a.kind, AtmosphereKind::AmmoniaOxygen);

    let a = Atmosphere::parse("", "");
    assert!(a.is_none());
    assert_eq!(a.to_string(), "No atmosphere");
  }

  #[test]
  fn atmosphere_type_wins_over_text() {
    let a = Atmosphere::parse("thin sulphur dioxide atmosphere", "SulphurDioxide");
    assert_eq!(a.kind, AtmosphereKind::SulphurDioxide);
    assert!(a.thin);
    let a = Atmosphere::parse("odd gas atmosphere", "");
    assert_eq!(a.kind, AtmosphereKind::Unknown);
  }

  #[test]
  fn volcanism_from_text() {
    let v = Volcanism::parse("minor water geysers volcanism");
    assert_eq!(v.kind, VolcanismKind::Water);
    assert!(v.minor && v.geysers);
    assert_eq!(v.to_string(), "Minor Water Geysers");

    let v = Volcanism::parse("major silicate vapour geysers volcanism");
    assert_eq!(v.kind, VolcanismKind::SilicateVapour);
    assert!(v.major);

    let v = Volcanism::parse("metallic magma volcanism");
    assert_eq!(v.kind, VolcanismKind::Metallic);
    assert!(!v.geysers);
    assert_eq!(v.to_string(), "Metallic Magma");

    assert!(Volcanism::parse("").is_none());
    assert!(Volcanism::parse("No volcanism").is_none());
  }
}
