//! FDName normalisation.
//!
//! The game writes vendor identifiers ("FDNames") such as
//! `$economy_HighTech;`, `Int_HyperDrive_Size5_Class5` or `empire_eagle`,
//! sometimes accompanied by a `_Localised` companion. Everything here turns
//! those into display strings and never fails: an identifier nobody has a
//! table entry for falls back to a capitalisation-split rendering.

// ─── Generic helpers ─────────────────────────────────────────────────────────

/// Strip the localisation-key decoration from an FDName:
/// `$MISSION_Delivery_name;` → `MISSION_Delivery`.
pub fn strip_key(fd: &str) -> &str {
  let s = fd.trim();
  let s = s.strip_prefix('$').unwrap_or(s);
  let s = s.strip_suffix(';').unwrap_or(s);
  match s.len().checked_sub(5) {
    Some(cut)
      if s.is_char_boundary(cut) && s[cut..].eq_ignore_ascii_case("_name") =>
    {
      &s[..cut]
    }
    _ => s,
  }
}

/// Split an identifier on capitalisation and underscores:
/// `HighTechSystem` → `High Tech System`, `FSDJump` → `FSD Jump`.
///
/// The first character is upper-cased; everything else keeps its case.
pub fn split_caps(s: &str) -> String {
  let chars: Vec<char> = s.chars().collect();
  let mut out = String::with_capacity(s.len() + 8);

  for (i, &c) in chars.iter().enumerate() {
    if c == '_' || c.is_whitespace() {
      if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
      }
      continue;
    }

    if i > 0 && !out.is_empty() && !out.ends_with(' ') && c.is_uppercase() {
      let prev = chars[i - 1];
      let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
      if prev.is_lowercase()
        || prev.is_ascii_digit()
        || (prev.is_uppercase() && next_lower)
      {
        out.push(' ');
      }
    }

    if out.is_empty() {
      out.extend(c.to_uppercase());
    } else {
      out.push(c);
    }
  }

  out.trim_end().to_string()
}

/// Upper-case the first character of `s`, leaving the rest alone.
pub fn capitalise(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Prefer a non-empty `_Localised` companion, otherwise derive a display
/// string from the FDName.
pub fn friendly(fd: &str, localised: Option<&str>) -> String {
  match localised.map(str::trim) {
    Some(loc) if !loc.is_empty() => loc.to_string(),
    _ => split_caps(strip_key(fd)),
  }
}

/// Strip a case-insensitive `prefix` from an already key-stripped name.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
  if s.len() >= prefix.len()
    && s.is_char_boundary(prefix.len())
    && s[..prefix.len()].eq_ignore_ascii_case(prefix)
  {
    Some(&s[prefix.len()..])
  } else {
    None
  }
}

// ─── System vocabularies ─────────────────────────────────────────────────────

/// `$economy_HighTech;` → `High Tech`.
pub fn economy(fd: &str) -> String {
  let s = strip_key(fd);
  let s = strip_prefix_ci(s, "economy_").unwrap_or(s);
  match s.to_ascii_lowercase().as_str() {
    "agri" => "Agriculture".to_string(),
    "hightech" => "High Tech".to_string(),
    "carrier" => "Private Enterprise".to_string(),
    "" => "None".to_string(),
    _ => split_caps(s),
  }
}

/// `$government_PrisonColony;` → `Prison Colony`.
pub fn government(fd: &str) -> String {
  let s = strip_key(fd);
  let s = strip_prefix_ci(s, "government_").unwrap_or(s);
  match s.to_ascii_lowercase().as_str() {
    "carrier" => "Private Ownership".to_string(),
    "" => "None".to_string(),
    _ => split_caps(s),
  }
}

/// `$SYSTEM_SECURITY_high;` → `High Security`.
pub fn security(fd: &str) -> String {
  let s = strip_key(fd);
  let s = strip_prefix_ci(s, "SYSTEM_SECURITY_")
    .or_else(|| strip_prefix_ci(s, "GAlAXY_MAP_INFO_state_"))
    .unwrap_or(s);
  match s.to_ascii_lowercase().as_str() {
    "high" => "High Security".to_string(),
    "medium" => "Medium Security".to_string(),
    "low" => "Low Security".to_string(),
    "anarchy" => "Anarchy".to_string(),
    "lawless" => "Lawless".to_string(),
    "" => "None".to_string(),
    _ => split_caps(s),
  }
}

/// `PilotsFederation` → `Pilots Federation`; empty → `None`.
pub fn allegiance(fd: &str) -> String {
  let s = strip_key(fd);
  if s.is_empty() {
    "None".to_string()
  } else {
    split_caps(s)
  }
}

/// `CivilUnrest` → `Civil Unrest`.
pub fn faction_state(fd: &str) -> String {
  let s = strip_key(fd);
  let s = strip_prefix_ci(s, "FactionState_").unwrap_or(s);
  if s.is_empty() {
    "None".to_string()
  } else {
    split_caps(s)
  }
}

/// `CraterOutpost` → `Planetary Outpost`.
pub fn station_type(fd: &str) -> String {
  match fd.trim().to_ascii_lowercase().as_str() {
    "coriolis" => "Coriolis Starport".to_string(),
    "orbis" => "Orbis Starport".to_string(),
    "ocellus" | "bernal" => "Ocellus Starport".to_string(),
    "outpost" => "Outpost".to_string(),
    "craterport" | "surfacestation" => "Planetary Port".to_string(),
    "crateroutpost" => "Planetary Outpost".to_string(),
    "megaship" | "megashipcivilian" => "Mega Ship".to_string(),
    "asteroidbase" => "Asteroid Base".to_string(),
    "fleetcarrier" => "Fleet Carrier".to_string(),
    "onfootsettlement" => "Settlement".to_string(),
    "dodec" => "Dodec Starport".to_string(),
    "" => "Unknown".to_string(),
    _ => split_caps(fd.trim()),
  }
}

/// `eRingClass_MetalRich` → `Metal Rich`.
pub fn ring_class(fd: &str) -> String {
  let s = strip_key(fd);
  let s = strip_prefix_ci(s, "eRingClass_").unwrap_or(s);
  split_caps(s)
}

/// `collidedAtSpeedInNoFireZone` → `Collided At Speed In No Fire Zone`.
pub fn crime(fd: &str) -> String { split_caps(strip_key(fd)) }

// ─── Ships ───────────────────────────────────────────────────────────────────

const SHIPS: &[(&str, &str)] = &[
  ("adder", "Adder"),
  ("anaconda", "Anaconda"),
  ("asp", "Asp Explorer"),
  ("asp_scout", "Asp Scout"),
  ("belugaliner", "Beluga Liner"),
  ("cobramkiii", "Cobra Mk III"),
  ("cobramkiv", "Cobra Mk IV"),
  ("cobramkv", "Cobra Mk V"),
  ("corsair", "Corsair"),
  ("cutter", "Imperial Cutter"),
  ("diamondback", "Diamondback Scout"),
  ("diamondbackxl", "Diamondback Explorer"),
  ("dolphin", "Dolphin"),
  ("eagle", "Eagle"),
  ("empire_courier", "Imperial Courier"),
  ("empire_eagle", "Imperial Eagle"),
  ("empire_fighter", "Imperial Fighter"),
  ("empire_trader", "Imperial Clipper"),
  ("federation_corvette", "Federal Corvette"),
  ("federation_dropship", "Federal Dropship"),
  ("federation_dropship_mkii", "Federal Assault Ship"),
  ("federation_fighter", "F63 Condor"),
  ("federation_gunship", "Federal Gunship"),
  ("ferdelance", "Fer-de-Lance"),
  ("hauler", "Hauler"),
  ("independant_trader", "Keelback"),
  ("independent_fighter", "Taipan Fighter"),
  ("krait_light", "Krait Phantom"),
  ("krait_mkii", "Krait Mk II"),
  ("mamba", "Mamba"),
  ("mandalay", "Mandalay"),
  ("orca", "Orca"),
  ("python", "Python"),
  ("python_nx", "Python Mk II"),
  ("sidewinder", "Sidewinder"),
  ("type6", "Type-6 Transporter"),
  ("type7", "Type-7 Transporter"),
  ("type8", "Type-8 Transporter"),
  ("type9", "Type-9 Heavy"),
  ("type9_military", "Type-10 Defender"),
  ("typex", "Alliance Chieftain"),
  ("typex_2", "Alliance Crusader"),
  ("typex_3", "Alliance Challenger"),
  ("viper", "Viper Mk III"),
  ("viper_mkiv", "Viper Mk IV"),
  ("vulture", "Vulture"),
  ("testbuggy", "SRV Scarab"),
  ("combat_multicrew_srv_01", "SRV Scorpion"),
];

/// Look up the marketing name for an FD ship id (`empire_eagle` →
/// `Imperial Eagle`). Case-insensitive.
pub fn ship(fd: &str) -> String {
  let key = strip_key(fd).to_ascii_lowercase();
  SHIPS
    .iter()
    .find(|(id, _)| *id == key)
    .map(|(_, name)| name.to_string())
    .unwrap_or_else(|| split_caps(strip_key(fd)))
}

// ─── Commodities ─────────────────────────────────────────────────────────────

const COMMODITIES: &[(&str, &str)] = &[
  ("advancedcatalysers", "Advanced Catalysers"),
  ("agriculturalmedicines", "Agri-Medicines"),
  ("algae", "Algae"),
  ("aluminium", "Aluminium"),
  ("animalmeat", "Animal Meat"),
  ("autofabricators", "Auto-Fabricators"),
  ("basicmedicines", "Basic Medicines"),
  ("battleweapons", "Battle Weapons"),
  ("bauxite", "Bauxite"),
  ("beer", "Beer"),
  ("bertrandite", "Bertrandite"),
  ("beryllium", "Beryllium"),
  ("bioreducinglichen", "Bioreducing Lichen"),
  ("biowaste", "Biowaste"),
  ("bismuth", "Bismuth"),
  ("bromellite", "Bromellite"),
  ("clothing", "Clothing"),
  ("cmmcomposite", "CMM Composite"),
  ("cobalt", "Cobalt"),
  ("coffee", "Coffee"),
  ("coltan", "Coltan"),
  ("combatstabilisers", "Combat Stabilisers"),
  ("computercomponents", "Computer Components"),
  ("consumertechnology", "Consumer Technology"),
  ("copper", "Copper"),
  ("domesticappliances", "Domestic Appliances"),
  ("drones", "Limpet"),
  ("emergencypowercells", "Emergency Power Cells"),
  ("explosives", "Explosives"),
  ("fish", "Fish"),
  ("foodcartridges", "Food Cartridges"),
  ("fruitandvegetables", "Fruit and Vegetables"),
  ("gallite", "Gallite"),
  ("gallium", "Gallium"),
  ("gold", "Gold"),
  ("grain", "Grain"),
  ("hazardousenvironmentsuits", "H.E. Suits"),
  ("hydrogenfuel", "Hydrogen Fuel"),
  ("hydrogenperoxide", "Hydrogen Peroxide"),
  ("indite", "Indite"),
  ("indium", "Indium"),
  ("insulatingmembrane", "Insulating Membrane"),
  ("landmines", "Landmines"),
  ("lepidolite", "Lepidolite"),
  ("liquidoxygen", "Liquid Oxygen"),
  ("liquor", "Liquor"),
  ("lithium", "Lithium"),
  ("lithiumhydroxide", "Lithium Hydroxide"),
  ("lowtemperaturediamond", "Low Temperature Diamonds"),
  ("marinesupplies", "Marine Equipment"),
  ("meta-alloys", "Meta-Alloys"),
  ("methaneclathrate", "Methane Clathrate"),
  ("methanolmonohydratecrystals", "Methanol Monohydrate Crystals"),
  ("mineraloil", "Mineral Oil"),
  ("monazite", "Monazite"),
  ("musgravite", "Musgravite"),
  ("mutomimager", "Muon Imager"),
  ("nonlethalweapons", "Non-Lethal Weapons"),
  ("occupiedcryopod", "Occupied Escape Pod"),
  ("opal", "Void Opal"),
  ("osmium", "Osmium"),
  ("painite", "Painite"),
  ("palladium", "Palladium"),
  ("performanceenhancers", "Performance Enhancers"),
  ("personalweapons", "Personal Weapons"),
  ("pesticides", "Pesticides"),
  ("platinum", "Platinum"),
  ("polymers", "Polymers"),
  ("powergenerators", "Power Generators"),
  ("progenitorcells", "Progenitor Cells"),
  ("reactivearmour", "Reactive Armour"),
  ("rhodplumsite", "Rhodplumsite"),
  ("rutile", "Rutile"),
  ("samarium", "Samarium"),
  ("scrap", "Scrap"),
  ("semiconductors", "Semiconductors"),
  ("serendibite", "Serendibite"),
  ("silver", "Silver"),
  ("slaves", "Slaves"),
  ("superconductors", "Superconductors"),
  ("survivalequipment", "Survival Equipment"),
  ("syntheticfabrics", "Synthetic Fabrics"),
  ("tantalum", "Tantalum"),
  ("tea", "Tea"),
  ("thargoidheart", "Thargoid Heart"),
  ("thorium", "Thorium"),
  ("titanium", "Titanium"),
  ("tritium", "Tritium"),
  ("unknownartifact", "Thargoid Sensor"),
  ("uraninite", "Uraninite"),
  ("uranium", "Uranium"),
  ("usscargoblackbox", "Black Box"),
  ("water", "Water"),
  ("waterpurifiers", "Water Purifiers"),
  ("wine", "Wine"),
  ("wreckagecomponents", "Wreckage Components"),
];

/// Display name for an FD commodity id (`drones` → `Limpet`,
/// `lowtemperaturediamond` → `Low Temperature Diamonds`).
pub fn commodity(fd: &str) -> String {
  let key = strip_key(fd).to_ascii_lowercase();
  if let Some((_, name)) = COMMODITIES.iter().find(|(id, _)| *id == key) {
    return name.to_string();
  }
  let s = strip_key(fd);
  if s.chars().all(|c| !c.is_uppercase()) {
    capitalise(s)
  } else {
    split_caps(s)
  }
}

// ─── Missions ────────────────────────────────────────────────────────────────

/// Trailing variant markers the game appends to mission names.
const MISSION_SUFFIXES: &[&str] = &[
  "_boom",
  "_bust",
  "_civilunrest",
  "_civilwar",
  "_election",
  "_expansion",
  "_famine",
  "_investment",
  "_lockdown",
  "_outbreak",
  "_retreat",
  "_war",
  "_rankemp",
  "_rankfed",
  "_wing",
];

/// `Mission_Courier_Boom_name` → `Courier`.
pub fn mission(fd: &str) -> String {
  let mut s = strip_key(fd);
  s = strip_prefix_ci(s, "Mission_").unwrap_or(s);

  loop {
    let lower = s.to_ascii_lowercase();
    match MISSION_SUFFIXES.iter().find(|suffix| lower.ends_with(*suffix)) {
      Some(suffix) if s.len() > suffix.len() => {
        s = &s[..s.len() - suffix.len()];
      }
      _ => break,
    }
  }

  split_caps(s)
}

// ─── Modules ─────────────────────────────────────────────────────────────────

const INTERNAL_MODULES: &[(&str, &str)] = &[
  ("buggybay", "Planetary Vehicle Hangar"),
  ("cargorack", "Cargo Rack"),
  ("corrosionproofcargorack", "Corrosion Resistant Cargo Rack"),
  ("detailedsurfacescanner", "Detailed Surface Scanner"),
  ("dockingcomputer", "Docking Computer"),
  ("dronecontrol", "Limpet Controller"),
  ("engine", "Thrusters"),
  ("fighterbay", "Fighter Hangar"),
  ("fsdinterdictor", "Frame Shift Drive Interdictor"),
  ("fuelscoop", "Fuel Scoop"),
  ("fueltank", "Fuel Tank"),
  ("guardianfsdbooster", "Guardian FSD Booster"),
  ("hullreinforcement", "Hull Reinforcement Package"),
  ("hyperdrive", "Frame Shift Drive"),
  ("lifesupport", "Life Support"),
  ("metaalloyhullreinforcement", "Meta Alloy Hull Reinforcement"),
  ("modulereinforcement", "Module Reinforcement Package"),
  ("passengercabin", "Passenger Cabin"),
  ("planetapproachsuite", "Planetary Approach Suite"),
  ("powerdistributor", "Power Distributor"),
  ("powerplant", "Power Plant"),
  ("refinery", "Refinery"),
  ("repairer", "AFM Unit"),
  ("sensors", "Sensors"),
  ("shieldcellbank", "Shield Cell Bank"),
  ("shieldgenerator", "Shield Generator"),
  ("stellarbodydiscoveryscanner", "Discovery Scanner"),
  ("supercruiseassist", "Supercruise Assist"),
];

const HARDPOINTS: &[(&str, &str)] = &[
  ("basicmissilerack", "Seeker Missile Rack"),
  ("beamlaser", "Beam Laser"),
  ("cannon", "Cannon"),
  ("cargoscanner", "Manifest Scanner"),
  ("chafflauncher", "Chaff Launcher"),
  ("cloudscanner", "Frame Shift Wake Scanner"),
  ("crimescanner", "Kill Warrant Scanner"),
  ("dumbfiremissilerack", "Missile Rack"),
  ("electroniccountermeasure", "Electronic Countermeasure"),
  ("heatsinklauncher", "Heat Sink Launcher"),
  ("minelauncher", "Mine Launcher"),
  ("mininglaser", "Mining Laser"),
  ("mrascanner", "Pulse Wave Analyser"),
  ("multicannon", "Multi-Cannon"),
  ("plasmaaccelerator", "Plasma Accelerator"),
  ("plasmapointdefence", "Point Defence"),
  ("pulselaser", "Pulse Laser"),
  ("pulselaserburst", "Burst Laser"),
  ("railgun", "Rail Gun"),
  ("shieldbooster", "Shield Booster"),
  ("slugshot", "Fragment Cannon"),
  ("torpedopylon", "Torpedo Pylon"),
];

const DRONE_CONTROLLERS: &[(&str, &str)] = &[
  ("collection", "Collector Limpet Controller"),
  ("fueltransfer", "Fuel Transfer Limpet Controller"),
  ("prospector", "Prospector Limpet Controller"),
  ("repair", "Repair Limpet Controller"),
  ("resourcesiphon", "Hatch Breaker Limpet Controller"),
  ("recon", "Recon Limpet Controller"),
  ("decontamination", "Decontamination Limpet Controller"),
];

fn class_letter(class: u32) -> Option<char> {
  match class {
    1 => Some('E'),
    2 => Some('D'),
    3 => Some('C'),
    4 => Some('B'),
    5 => Some('A'),
    _ => None,
  }
}

fn lookup(table: &[(&str, &str)], key: &str) -> Option<String> {
  table
    .iter()
    .find(|(id, _)| *id == key)
    .map(|(_, name)| name.to_string())
}

fn armour_grade(part: &str) -> Option<&'static str> {
  match part {
    "grade1" => Some("Lightweight Alloy"),
    "grade2" => Some("Reinforced Alloy"),
    "grade3" => Some("Military Grade Composite"),
    "mirrored" => Some("Mirrored Surface Composite"),
    "reactive" => Some("Reactive Surface Composite"),
    _ => None,
  }
}

/// Display name for an FD module id:
/// `Int_HyperDrive_Size5_Class5` → `Frame Shift Drive 5A`,
/// `Hpt_PulseLaser_Gimbal_Medium` → `Pulse Laser Gimbal Medium`,
/// `Python_Armour_Grade3` → `Military Grade Composite`.
pub fn module(fd: &str) -> String {
  let key = strip_key(fd).to_ascii_lowercase();
  let parts: Vec<&str> = key.split('_').filter(|p| !p.is_empty()).collect();

  let mut size: Option<u32> = None;
  let mut class: Option<u32> = None;
  let mut words: Vec<&str> = Vec::new();
  for part in parts.iter().skip(1) {
    if let Some(n) = part.strip_prefix("size").and_then(|n| n.parse().ok()) {
      size = Some(n);
    } else if let Some(n) =
      part.strip_prefix("class").and_then(|n| n.parse().ok())
    {
      class = Some(n);
    } else {
      words.push(part);
    }
  }
  let rating = match (size, class.and_then(class_letter)) {
    (Some(s), Some(c)) => Some(format!("{s}{c}")),
    (Some(s), None) => Some(s.to_string()),
    _ => None,
  };

  let name = match parts.first().copied() {
    Some("int") => {
      let base = words.first().copied().unwrap_or_default();
      let mut name = if base == "dronecontrol" {
        words
          .get(1)
          .and_then(|kind| lookup(DRONE_CONTROLLERS, kind))
          .unwrap_or_else(|| "Limpet Controller".to_string())
      } else {
        lookup(INTERNAL_MODULES, base).unwrap_or_else(|| capitalise(base))
      };
      if base == "hyperdrive" && words.contains(&"overcharge") {
        name.push_str(" (SCO)");
      }
      name
    }
    Some("hpt") => {
      let base = words.first().copied().unwrap_or_default();
      let mut name =
        lookup(HARDPOINTS, base).unwrap_or_else(|| capitalise(base));
      for word in words.iter().skip(1) {
        let extra = match *word {
          "fixed" => "Fixed",
          "gimbal" => "Gimbal",
          "turret" => "Turret",
          "tiny" => "Utility",
          "small" => "Small",
          "medium" => "Medium",
          "large" => "Large",
          "huge" => "Huge",
          _ => continue,
        };
        name.push(' ');
        name.push_str(extra);
      }
      name
    }
    _ => {
      if let Some(pos) = parts.iter().position(|p| *p == "armour") {
        return parts
          .get(pos + 1)
          .and_then(|g| armour_grade(g))
          .map(str::to_string)
          .unwrap_or_else(|| "Armour".to_string());
      }
      split_caps(strip_key(fd))
    }
  };

  match rating {
    Some(r) => format!("{name} {r}"),
    None => name,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strip_key_removes_decoration() {
    assert_eq!(strip_key("$MISSION_Delivery_name;"), "MISSION_Delivery");
    assert_eq!(strip_key("$economy_Agri;"), "economy_Agri");
    assert_eq!(strip_key("plain"), "plain");
    assert_eq!(strip_key("$x;"), "x");
  }

  #[test]
  fn split_caps_boundaries() {
    assert_eq!(split_caps("HighTechSystem"), "High Tech System");
    assert_eq!(split_caps("FSDJump"), "FSD Jump");
    assert_eq!(split_caps("civil_war"), "Civil war");
    assert_eq!(split_caps("collidedAtSpeed"), "Collided At Speed");
    assert_eq!(split_caps(""), "");
  }

  #[test]
  fn friendly_prefers_localised() {
    assert_eq!(friendly("$economy_Agri;", Some("Agriculture")), "Agriculture");
    assert_eq!(friendly("$economy_Agri;", Some("  ")), "Economy Agri");
    assert_eq!(friendly("CivilUnrest", None), "Civil Unrest");
  }

  #[test]
  fn system_vocabularies() {
    assert_eq!(economy("$economy_HighTech;"), "High Tech");
    assert_eq!(economy("$economy_Agri;"), "Agriculture");
    assert_eq!(government("$government_PrisonColony;"), "Prison Colony");
    assert_eq!(security("$SYSTEM_SECURITY_high;"), "High Security");
    assert_eq!(security("$GAlAXY_MAP_INFO_state_anarchy;"), "Anarchy");
    assert_eq!(allegiance(""), "None");
    assert_eq!(allegiance("PilotsFederation"), "Pilots Federation");
    assert_eq!(faction_state("PublicHoliday"), "Public Holiday");
    assert_eq!(station_type("CraterOutpost"), "Planetary Outpost");
    assert_eq!(ring_class("eRingClass_MetalRich"), "Metal Rich");
  }

  #[test]
  fn ship_names() {
    assert_eq!(ship("empire_eagle"), "Imperial Eagle");
    assert_eq!(ship("Federation_Corvette"), "Federal Corvette");
    assert_eq!(ship("SomeNewShip"), "Some New Ship");
  }

  #[test]
  fn commodity_names() {
    assert_eq!(commodity("drones"), "Limpet");
    assert_eq!(commodity("$lowtemperaturediamond_name;"), "Low Temperature Diamonds");
    assert_eq!(commodity("hafnium178"), "Hafnium178");
    assert_eq!(commodity("ImperialSlaves"), "Imperial Slaves");
  }

  #[test]
  fn mission_names() {
    assert_eq!(mission("Mission_Courier_Boom_name"), "Courier");
    assert_eq!(mission("Mission_Delivery"), "Delivery");
    assert_eq!(mission("Mission_MassacreWing_name"), "Massacre Wing");
    assert_eq!(mission("Mission_Assassinate_Legal_Elections"), "Assassinate Legal Elections");
  }

  #[test]
  fn module_names() {
    assert_eq!(module("Int_HyperDrive_Size5_Class5"), "Frame Shift Drive 5A");
    assert_eq!(module("int_engine_size3_class1"), "Thrusters 3E");
    assert_eq!(
      module("Hpt_PulseLaser_Gimbal_Medium"),
      "Pulse Laser Gimbal Medium"
    );
    assert_eq!(module("hpt_shieldbooster_size0_class5"), "Shield Booster 0A");
    assert_eq!(
      module("int_dronecontrol_collection_size1_class5"),
      "Collector Limpet Controller 1A"
    );
    assert_eq!(module("Python_Armour_Grade3"), "Military Grade Composite");
    assert_eq!(module("$int_cargorack_size4_class1_name;"), "Cargo Rack 4E");
  }
}
