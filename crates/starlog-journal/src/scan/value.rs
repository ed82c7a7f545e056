//! Estimated cartographic sale value of a scanned body.
//!
//! Uses the community-derived formulae: a per-class constant `k` scaled by
//! mass, then mapping and discovery multipliers on top.

use super::{planet::PlanetClass, star::StarType};

const PLANET_MASS_FACTOR: f64 = 0.56591828;
const MINIMUM_VALUE: f64 = 500.0;
const FIRST_DISCOVERY_MULTIPLIER: f64 = 2.6;
const EFFICIENCY_MULTIPLIER: f64 = 1.25;

/// How the body was (or will be) surveyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueOptions {
  pub mapped:          bool,
  pub efficient:       bool,
  /// Surface mapping bonus introduced with the Odyssey release.
  pub odyssey:         bool,
  pub first_discovery: bool,
  pub first_mapped:    bool,
}

fn star_k(star: StarType) -> f64 {
  if star.is_white_dwarf() {
    14057.0
  } else if star.is_neutron() || star.is_black_hole() {
    22628.0
  } else {
    1200.0
  }
}

pub fn star_value(star: StarType, stellar_mass: f64, opts: &ValueOptions) -> i64 {
  let k = star_k(star);
  let value = k + stellar_mass * k / 66.25;
  finish(value, opts.first_discovery)
}

fn planet_k(class: PlanetClass, terraformable: bool) -> f64 {
  let bonus = |b: f64| if terraformable { b } else { 0.0 };
  match class {
    PlanetClass::MetalRich => 21790.0,
    PlanetClass::AmmoniaWorld => 96932.0,
    PlanetClass::SudarskyI => 1656.0,
    PlanetClass::SudarskyII | PlanetClass::HighMetalContent => {
      9654.0 + bonus(100677.0)
    }
    PlanetClass::EarthLike => 64831.0 + 116295.0,
    PlanetClass::WaterWorld => 64831.0 + bonus(116295.0),
    _ => 300.0 + bonus(93328.0),
  }
}

fn mapping_multiplier(opts: &ValueOptions) -> f64 {
  if !opts.mapped {
    1.0
  } else if opts.first_discovery && opts.first_mapped {
    3.699622554
  } else if opts.first_mapped {
    8.0956
  } else {
    3.3333333333
  }
}

pub fn planet_value(
  class: PlanetClass,
  terraformable: bool,
  earth_masses: f64,
  opts: &ValueOptions,
) -> i64 {
  let k = planet_k(class, terraformable);
  let mut value =
    (k + k * PLANET_MASS_FACTOR * earth_masses.powf(0.2)) * mapping_multiplier(opts);
  if opts.mapped {
    if opts.odyssey {
      value += (value * 0.3).max(555.0);
    }
    if opts.efficient {
      value *= EFFICIENCY_MULTIPLIER;
    }
  }
  finish(value, opts.first_discovery)
}

fn finish(value: f64, first_discovery: bool) -> i64 {
  let mut value = value.max(MINIMUM_VALUE);
  if first_discovery {
    value *= FIRST_DISCOVERY_MULTIPLIER;
  }
  value.round() as i64
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sol_like_star() {
    let v = star_value(StarType::G, 1.0, &ValueOptions::default());
    assert_eq!(v, 1218);
    let v = star_value(StarType::DA, 0.6, &ValueOptions::default());
    assert_eq!(v, 14184);
    let first = ValueOptions { first_discovery: true, ..Default::default() };
    assert_eq!(star_value(StarType::G, 1.0, &first), 3167);
  }

  #[test]
  fn small_bodies_hit_the_floor() {
    let v = planet_value(PlanetClass::Icy, false, 0.0001, &ValueOptions::default());
    assert_eq!(v, 500);
  }

  #[test]
  fn earthlike_unmapped_and_mapped() {
    let base = planet_value(PlanetClass::EarthLike, false, 1.0, &ValueOptions::default());
    // (64831 + 116295) * (1 + 0.56591828)
    assert_eq!(base, 283_629);

    let mapped = ValueOptions {
      mapped: true,
      efficient: true,
      odyssey: true,
      ..Default::default()
    };
    let v = planet_value(PlanetClass::EarthLike, false, 1.0, &mapped);
    assert!((v - 1_536_321).abs() <= 1, "{v}");
  }

  #[test]
  fn terraformable_bonus_applies() {
    let plain = planet_value(PlanetClass::HighMetalContent, false, 0.5, &ValueOptions::default());
    let terra = planet_value(PlanetClass::HighMetalContent, true, 0.5, &ValueOptions::default());
    assert!(terra > plain * 5);
  }

  #[test]
  fn first_mapped_multiplier() {
    let only_mapped = ValueOptions { mapped: true, first_mapped: true, ..Default::default() };
    let both = ValueOptions { first_discovery: true, ..only_mapped };
    let a = planet_value(PlanetClass::WaterWorld, false, 0.3, &only_mapped);
    let b = planet_value(PlanetClass::WaterWorld, false, 0.3, &both);
    // 3.6996 * 2.6 is larger than 8.0956.
    assert!(b > a);
  }
}
