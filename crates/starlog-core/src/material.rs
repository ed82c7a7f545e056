//! Engineering materials: categories, grades, and the lookup table.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::naming;

// ─── Category ────────────────────────────────────────────────────────────────

/// The three storage categories the game keeps materials in.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum MaterialCategory {
  Raw,
  Manufactured,
  Encoded,
  #[default]
  Unknown,
}

impl MaterialCategory {
  /// Decode a category as written by the journal. Accepts bare names
  /// (`"Raw"`, `"encoded"`) and localisation keys
  /// (`"$MICRORESOURCE_CATEGORY_Manufactured;"`).
  pub fn from_journal(s: &str) -> Self {
    let key = naming::strip_key(s);
    let key = key.rsplit('_').next().unwrap_or(key);
    key.parse().unwrap_or(Self::Unknown)
  }
}

// ─── Grade ───────────────────────────────────────────────────────────────────

/// Material grade, 1 (very common) to 5 (very rare).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MaterialGrade(u8);

impl MaterialGrade {
  /// `None` outside `1..=5`.
  pub fn new(grade: u8) -> Option<Self> {
    (1..=5).contains(&grade).then_some(Self(grade))
  }

  pub fn get(self) -> u8 { self.0 }

  pub fn rarity(self) -> &'static str {
    match self.0 {
      1 => "Very Common",
      2 => "Common",
      3 => "Standard",
      4 => "Rare",
      _ => "Very Rare",
    }
  }

  /// Maximum number of this grade the commander can hold.
  pub fn capacity(self) -> u32 {
    match self.0 {
      1 => 300,
      2 => 250,
      3 => 200,
      4 => 150,
      _ => 100,
    }
  }
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// Static description of one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialInfo {
  pub fd_name:  &'static str,
  pub name:     &'static str,
  pub category: MaterialCategory,
  pub grade:    MaterialGrade,
  /// Element symbol; raw materials only.
  pub symbol:   Option<&'static str>,
}

use MaterialCategory::{Encoded as E, Manufactured as M, Raw as R};

#[rustfmt::skip]
const MATERIALS: &[(&str, &str, MaterialCategory, u8, Option<&str>)] = &[
  // Raw
  ("carbon",      "Carbon",      R, 1, Some("C")),
  ("iron",        "Iron",        R, 1, Some("Fe")),
  ("lead",        "Lead",        R, 1, Some("Pb")),
  ("nickel",      "Nickel",      R, 1, Some("Ni")),
  ("phosphorus",  "Phosphorus",  R, 1, Some("P")),
  ("rhenium",     "Rhenium",     R, 1, Some("Re")),
  ("sulphur",     "Sulphur",     R, 1, Some("S")),
  ("arsenic",     "Arsenic",     R, 2, Some("As")),
  ("chromium",    "Chromium",    R, 2, Some("Cr")),
  ("germanium",   "Germanium",   R, 2, Some("Ge")),
  ("manganese",   "Manganese",   R, 2, Some("Mn")),
  ("vanadium",    "Vanadium",    R, 2, Some("V")),
  ("zinc",        "Zinc",        R, 2, Some("Zn")),
  ("zirconium",   "Zirconium",   R, 2, Some("Zr")),
  ("boron",       "Boron",       R, 3, Some("B")),
  ("cadmium",     "Cadmium",     R, 3, Some("Cd")),
  ("mercury",     "Mercury",     R, 3, Some("Hg")),
  ("molybdenum",  "Molybdenum",  R, 3, Some("Mo")),
  ("niobium",     "Niobium",     R, 3, Some("Nb")),
  ("tin",         "Tin",         R, 3, Some("Sn")),
  ("tungsten",    "Tungsten",    R, 3, Some("W")),
  ("antimony",    "Antimony",    R, 4, Some("Sb")),
  ("polonium",    "Polonium",    R, 4, Some("Po")),
  ("ruthenium",   "Ruthenium",   R, 4, Some("Ru")),
  ("selenium",    "Selenium",    R, 4, Some("Se")),
  ("technetium",  "Technetium",  R, 4, Some("Tc")),
  ("tellurium",   "Tellurium",   R, 4, Some("Te")),
  ("yttrium",     "Yttrium",     R, 4, Some("Y")),

  // Manufactured
  ("chemicalstorageunits",    "Chemical Storage Units",       M, 1, None),
  ("compactcomposites",       "Compact Composites",           M, 1, None),
  ("crystalshards",           "Crystal Shards",               M, 1, None),
  ("gridresistors",           "Grid Resistors",               M, 1, None),
  ("heatconductionwiring",    "Heat Conduction Wiring",       M, 1, None),
  ("mechanicalscrap",         "Mechanical Scrap",             M, 1, None),
  ("salvagedalloys",          "Salvaged Alloys",              M, 1, None),
  ("temperedalloys",          "Tempered Alloys",              M, 1, None),
  ("wornshieldemitters",      "Worn Shield Emitters",         M, 1, None),
  ("basicconductors",         "Basic Conductors",             M, 1, None),
  ("chemicalprocessors",      "Chemical Processors",          M, 2, None),
  ("filamentcomposites",      "Filament Composites",          M, 2, None),
  ("galvanisingalloys",       "Galvanising Alloys",           M, 2, None),
  ("heatdispersionplate",     "Heat Dispersion Plate",        M, 2, None),
  ("heatresistantceramics",   "Heat Resistant Ceramics",      M, 2, None),
  ("hybridcapacitors",        "Hybrid Capacitors",            M, 2, None),
  ("mechanicalequipment",     "Mechanical Equipment",         M, 2, None),
  ("shieldemitters",          "Shield Emitters",              M, 2, None),
  ("uncutfocuscrystals",      "Flawed Focus Crystals",        M, 2, None),
  ("conductivecomponents",    "Conductive Components",        M, 2, None),
  ("chemicaldistillery",      "Chemical Distillery",          M, 3, None),
  ("electrochemicalarrays",   "Electrochemical Arrays",       M, 3, None),
  ("focuscrystals",           "Focus Crystals",               M, 3, None),
  ("heatexchangers",          "Heat Exchangers",              M, 3, None),
  ("highdensitycomposites",   "High Density Composites",      M, 3, None),
  ("mechanicalcomponents",    "Mechanical Components",        M, 3, None),
  ("phasealloys",             "Phase Alloys",                 M, 3, None),
  ("precipitatedalloys",      "Precipitated Alloys",          M, 3, None),
  ("shieldingsensors",        "Shielding Sensors",            M, 3, None),
  ("conductiveceramics",      "Conductive Ceramics",          M, 3, None),
  ("chemicalmanipulators",    "Chemical Manipulators",        M, 4, None),
  ("compoundshielding",       "Compound Shielding",           M, 4, None),
  ("configurablecomponents",  "Configurable Components",      M, 4, None),
  ("heatvanes",               "Heat Vanes",                   M, 4, None),
  ("polymercapacitors",       "Polymer Capacitors",           M, 4, None),
  ("fedproprietarycomposites", "Proprietary Composites",      M, 4, None),
  ("protolightalloys",        "Proto Light Alloys",           M, 4, None),
  ("refinedfocuscrystals",    "Refined Focus Crystals",       M, 4, None),
  ("thermicalloys",           "Thermic Alloys",               M, 4, None),
  ("conductivepolymers",      "Conductive Polymers",          M, 4, None),
  ("biotechconductors",       "Biotech Conductors",           M, 5, None),
  ("fedcorecomposites",       "Core Dynamics Composites",     M, 5, None),
  ("exquisitefocuscrystals",  "Exquisite Focus Crystals",     M, 5, None),
  ("imperialshielding",       "Imperial Shielding",           M, 5, None),
  ("improvisedcomponents",    "Improvised Components",        M, 5, None),
  ("militarygradealloys",     "Military Grade Alloys",        M, 5, None),
  ("pharmaceuticalisolators", "Pharmaceutical Isolators",     M, 5, None),
  ("protoheatradiators",      "Proto Heat Radiators",         M, 5, None),
  ("protoradiolicalloys",     "Proto Radiolic Alloys",        M, 5, None),
  ("militarysupercapacitors", "Military Supercapacitors",     M, 5, None),

  // Manufactured, Guardian
  ("guardian_sentinel_wreckagecomponents", "Guardian Wreckage Components",   M, 1, None),
  ("guardian_powercell",                   "Guardian Power Cell",            M, 1, None),
  ("guardian_powerconduit",                "Guardian Power Conduit",         M, 2, None),
  ("guardian_sentinel_weaponparts",        "Guardian Sentinel Weapon Parts", M, 3, None),
  ("guardian_techcomponent",               "Guardian Technology Component",  M, 3, None),

  // Manufactured, Thargoid
  ("tg_wreckagecomponents",       "Wreckage Components",             M, 2, None),
  ("tg_causticshard",             "Caustic Shard",                   M, 2, None),
  ("unknowncarapace",             "Thargoid Carapace",               M, 2, None),
  ("tg_biomechanicalconduits",    "Bio-Mechanical Conduits",         M, 3, None),
  ("tg_weaponparts",              "Weapon Parts",                    M, 3, None),
  ("tg_causticgeneratorparts",    "Corrosive Mechanisms",            M, 3, None),
  ("unknownenergycell",           "Thargoid Energy Cell",            M, 3, None),
  ("tg_propulsionelement",        "Propulsion Elements",             M, 4, None),
  ("tg_causticcrystal",           "Caustic Crystal",                 M, 4, None),
  ("unknowntechnologycomponents", "Thargoid Technological Components", M, 4, None),
  ("unknowncorechip",             "Thargoid Organic Circuitry",      M, 5, None),
  ("unknownenergysource",         "Sensor Fragment",                 M, 5, None),

  // Encoded
  ("bulkscandata",            "Anomalous Bulk Scan Data",              E, 1, None),
  ("disruptedwakeechoes",     "Atypical Disrupted Wake Echoes",        E, 1, None),
  ("encryptedfiles",          "Unusual Encrypted Files",               E, 1, None),
  ("legacyfirmware",          "Specialised Legacy Firmware",           E, 1, None),
  ("scrambledemissiondata",   "Exceptional Scrambled Emission Data",   E, 1, None),
  ("shieldcyclerecordings",   "Distorted Shield Cycle Recordings",     E, 1, None),
  ("archivedemissiondata",    "Irregular Emission Data",               E, 2, None),
  ("consumerfirmware",        "Modified Consumer Firmware",            E, 2, None),
  ("encryptioncodes",         "Tagged Encryption Codes",               E, 2, None),
  ("fsdtelemetry",            "Anomalous FSD Telemetry",               E, 2, None),
  ("scanarchives",            "Unidentified Scan Archives",            E, 2, None),
  ("shieldsoakanalysis",      "Inconsistent Shield Soak Analysis",     E, 2, None),
  ("emissiondata",            "Unexpected Emission Data",              E, 3, None),
  ("encryptionarchives",      "Atypical Encryption Archives",          E, 3, None),
  ("industrialfirmware",      "Cracked Industrial Firmware",           E, 3, None),
  ("scandatabanks",           "Classified Scan Databanks",             E, 3, None),
  ("shielddensityreports",    "Untypical Shield Scans",                E, 3, None),
  ("wakesolutions",           "Strange Wake Solutions",                E, 3, None),
  ("decodedemissiondata",     "Decoded Emission Data",                 E, 4, None),
  ("encodedscandata",         "Divergent Scan Data",                   E, 4, None),
  ("hyperspacetrajectories",  "Eccentric Hyperspace Trajectories",     E, 4, None),
  ("securityfirmware",        "Security Firmware Patch",               E, 4, None),
  ("shieldpatternanalysis",   "Aberrant Shield Pattern Analysis",      E, 4, None),
  ("symmetrickeys",           "Open Symmetric Keys",                   E, 4, None),
  ("adaptiveencryptors",      "Adaptive Encryptors Capture",           E, 5, None),
  ("classifiedscandata",      "Classified Scan Fragment",              E, 5, None),
  ("compactemissionsdata",    "Abnormal Compact Emissions Data",       E, 5, None),
  ("dataminedwake",           "Datamined Wake Exceptions",             E, 5, None),
  ("embeddedfirmware",        "Modified Embedded Firmware",            E, 5, None),
  ("shieldfrequencydata",     "Peculiar Shield Frequency Data",        E, 5, None),

  // Encoded, Guardian
  ("ancientbiologicaldata",     "Pattern Alpha Obelisk Data",        E, 3, None),
  ("ancientculturaldata",       "Pattern Beta Obelisk Data",         E, 3, None),
  ("ancienthistoricaldata",     "Pattern Gamma Obelisk Data",        E, 4, None),
  ("ancientlanguagedata",       "Pattern Delta Obelisk Data",        E, 4, None),
  ("ancienttechnologicaldata",  "Pattern Epsilon Obelisk Data",      E, 5, None),
  ("guardian_moduleblueprint",  "Guardian Module Blueprint Fragment", E, 5, None),
  ("guardian_vesselblueprint",  "Guardian Vessel Blueprint Fragment", E, 5, None),
  ("guardian_weaponblueprint",  "Guardian Weapon Blueprint Fragment", E, 5, None),

  // Encoded, Thargoid
  ("tg_structuraldata",         "Thargoid Structural Data",          E, 2, None),
  ("tg_shipflightdata",         "Ship Flight Data",                  E, 3, None),
  ("unknownshipsignature",      "Thargoid Ship Signature",           E, 3, None),
  ("tg_shipsystemsdata",        "Ship Systems Data",                 E, 4, None),
  ("tg_residuedata",            "Thargoid Residue Data",             E, 4, None),
  ("tg_interdictiondata",       "Thargoid Interdiction Telemetry",   E, 4, None),
  ("unknownwakedata",           "Thargoid Wake Data",                E, 4, None),
];

/// Look up a material by FD name (case-insensitive, localisation key
/// decoration tolerated).
pub fn material_info(fd: &str) -> Option<MaterialInfo> {
  let key = naming::strip_key(fd).to_ascii_lowercase();
  MATERIALS
    .iter()
    .find(|(id, ..)| *id == key)
    .and_then(|&(fd_name, name, category, grade, symbol)| {
      Some(MaterialInfo {
        fd_name,
        name,
        category,
        grade: MaterialGrade::new(grade)?,
        symbol,
      })
    })
}

/// Display name for a material, falling back to the localised companion
/// and then to the FD name itself.
pub fn material_name(fd: &str, localised: Option<&str>) -> String {
  match material_info(fd) {
    Some(info) => info.name.to_string(),
    None => match localised.map(str::trim) {
      Some(loc) if !loc.is_empty() => loc.to_string(),
      _ => naming::capitalise(naming::strip_key(fd)),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn category_from_journal_forms() {
    assert_eq!(MaterialCategory::from_journal("Raw"), MaterialCategory::Raw);
    assert_eq!(
      MaterialCategory::from_journal("encoded"),
      MaterialCategory::Encoded
    );
    assert_eq!(
      MaterialCategory::from_journal("$MICRORESOURCE_CATEGORY_Manufactured;"),
      MaterialCategory::Manufactured
    );
    assert_eq!(
      MaterialCategory::from_journal("Elements"),
      MaterialCategory::Unknown
    );
  }

  #[test]
  fn lookup_is_case_insensitive() {
    let info = material_info("Iron").unwrap();
    assert_eq!(info.name, "Iron");
    assert_eq!(info.category, MaterialCategory::Raw);
    assert_eq!(info.grade.get(), 1);
    assert_eq!(info.symbol, Some("Fe"));

    let info = material_info("uncutfocuscrystals").unwrap();
    assert_eq!(info.name, "Flawed Focus Crystals");
    assert_eq!(info.grade.rarity(), "Common");
    assert_eq!(info.grade.capacity(), 250);
  }

  #[test]
  fn journal_names_for_composites_and_alien_materials() {
    assert_eq!(material_info("fedproprietarycomposites").unwrap().grade.get(), 4);
    assert_eq!(material_info("fedcorecomposites").unwrap().name, "Core Dynamics Composites");
    assert!(material_info("proprietarycomposites").is_none());
    let conductive = [
      "basicconductors",
      "conductivecomponents",
      "conductiveceramics",
      "conductivepolymers",
      "militarysupercapacitors",
    ];
    for (grade, fd) in (1..).zip(conductive) {
      let info = material_info(fd).unwrap();
      assert_eq!(info.category, MaterialCategory::Manufactured, "{fd}");
      assert_eq!(info.grade.get(), grade, "{fd}");
    }
    assert_eq!(
      material_info("guardian_powercell").unwrap().category,
      MaterialCategory::Manufactured
    );
    assert_eq!(
      material_info("$tg_shipflightdata_name;").unwrap().category,
      MaterialCategory::Encoded
    );
  }

  #[test]
  fn names_fall_back() {
    assert_eq!(material_name("tellurium", None), "Tellurium");
    assert_eq!(
      material_name("tg_shipflightdata", Some("Ship Flight Data")),
      "Ship Flight Data"
    );
    assert_eq!(material_name("unobtainium", None), "Unobtainium");
  }

  #[test]
  fn grade_bounds() {
    assert!(MaterialGrade::new(0).is_none());
    assert!(MaterialGrade::new(6).is_none());
    assert_eq!(MaterialGrade::new(5).unwrap().capacity(), 100);
  }
}
