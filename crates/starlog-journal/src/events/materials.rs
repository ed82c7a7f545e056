//! Engineering materials, synthesis and engineer events.

use serde::Deserialize;
use starlog_core::{
  effect::{
    CommodityEffect, EntryMeta, InventorySink, ItemKind, MaterialEffect,
  },
  material::{MaterialCategory, material_info, material_name},
  naming,
};

use super::trade::{commodity_key, commodity_name};
use crate::{
  describe::Describe,
  fields::{FieldBuilder, lines},
};

/// Inventory key for a material.
pub(crate) fn material_key(fd: &str) -> String {
  naming::strip_key(fd).to_ascii_lowercase()
}

/// Category written by the event, falling back to the material table when
/// the event does not say.
fn category_of(fd: &str, written: &str) -> MaterialCategory {
  match MaterialCategory::from_journal(written) {
    MaterialCategory::Unknown => material_info(fd)
      .map(|info| info.category)
      .unwrap_or_default(),
    category => category,
  }
}

fn change_material(
  sink: &mut dyn InventorySink,
  meta: &EntryMeta,
  fd: &str,
  category: MaterialCategory,
  delta: i64,
) {
  sink.change(meta, ItemKind::Material(category), &material_key(fd), delta, None);
}

/// Hand a localised name to the inventory for materials the table lacks.
fn offer_name(
  sink: &mut dyn InventorySink,
  kind: ItemKind,
  fd: &str,
  localised: Option<&str>,
) {
  if let (None, Some(display)) = (material_info(fd), localised) {
    sink.name(kind, &material_key(fd), display);
  }
}

// ─── Materials ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MaterialCount {
  pub name:           String,
  #[serde(rename = "Name_Localised")]
  pub name_localised: Option<String>,
  pub count:          i64,
}

impl MaterialCount {
  pub fn display(&self) -> String {
    format!(
      "{} {}",
      material_name(&self.name, self.name_localised.as_deref()),
      self.count
    )
  }
}

/// Full materials listing, written at session start.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Materials {
  pub raw:          Vec<MaterialCount>,
  pub manufactured: Vec<MaterialCount>,
  pub encoded:      Vec<MaterialCount>,
}

impl Materials {
  fn groups(&self) -> [(MaterialCategory, &[MaterialCount]); 3] {
    [
      (MaterialCategory::Raw, &self.raw),
      (MaterialCategory::Manufactured, &self.manufactured),
      (MaterialCategory::Encoded, &self.encoded),
    ]
  }
}

impl Describe for Materials {
  fn info(&self) -> String {
    FieldBuilder::new()
      .int("Raw:", self.raw.len() as i64)
      .int("Manufactured:", self.manufactured.len() as i64)
      .int("Encoded:", self.encoded.len() as i64)
      .build()
  }

  fn detailed(&self) -> String {
    self
      .groups()
      .into_iter()
      .filter(|(_, items)| !items.is_empty())
      .map(|(category, items)| {
        format!(
          "{category}:\n{}",
          lines("  ", items.iter().map(MaterialCount::display))
        )
      })
      .collect::<Vec<_>>()
      .join("\n")
  }
}

impl MaterialEffect for Materials {
  fn materials(&self, meta: &EntryMeta, sink: &mut dyn InventorySink) {
    for (category, items) in self.groups() {
      let kind = ItemKind::Material(category);
      sink.reset(meta, kind);
      for item in items {
        sink.set(meta, kind, &material_key(&item.name), item.count);
        offer_name(sink, kind, &item.name, item.name_localised.as_deref());
      }
    }
  }
}

// ─── Collected / discarded ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MaterialCollected {
  pub category:       String,
  pub name:           String,
  #[serde(rename = "Name_Localised")]
  pub name_localised: Option<String>,
  pub count:          i64,
}

impl MaterialCollected {
  pub fn material_category(&self) -> MaterialCategory {
    category_of(&self.name, &self.category)
  }
}

impl Describe for MaterialCollected {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", material_name(&self.name, self.name_localised.as_deref()))
      .text("", self.material_category().as_ref())
      .int("Count:", self.count)
      .build()
  }
}

impl MaterialEffect for MaterialCollected {
  fn materials(&self, meta: &EntryMeta, sink: &mut dyn InventorySink) {
    let category = self.material_category();
    offer_name(
      sink,
      ItemKind::Material(category),
      &self.name,
      self.name_localised.as_deref(),
    );
    change_material(sink, meta, &self.name, category, self.count);
  }
}

/// Same shape as [`MaterialCollected`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MaterialDiscarded(pub MaterialCollected);

impl Describe for MaterialDiscarded {
  fn info(&self) -> String { self.0.info() }
}

impl MaterialEffect for MaterialDiscarded {
  fn materials(&self, meta: &EntryMeta, sink: &mut dyn InventorySink) {
    let m = &self.0;
    change_material(sink, meta, &m.name, m.material_category(), -m.count);
  }
}

// ─── Trade ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TradedMaterial {
  pub material:           String,
  #[serde(rename = "Material_Localised")]
  pub material_localised: Option<String>,
  pub category:           String,
  pub quantity:           i64,
}

impl TradedMaterial {
  pub fn name(&self) -> String {
    material_name(&self.material, self.material_localised.as_deref())
  }

  fn category(&self) -> MaterialCategory { category_of(&self.material, &self.category) }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MaterialTrade {
  #[serde(rename = "MarketID")]
  pub market_id:   u64,
  pub trader_type: String,
  pub paid:        TradedMaterial,
  pub received:    TradedMaterial,
}

impl Describe for MaterialTrade {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("Sold:", format!("{} {}", self.paid.quantity, self.paid.name()))
      .text(
        "Received:",
        format!("{} {}", self.received.quantity, self.received.name()),
      )
      .text("Trader:", naming::capitalise(&self.trader_type))
      .build()
  }
}

impl MaterialEffect for MaterialTrade {
  fn materials(&self, meta: &EntryMeta, sink: &mut dyn InventorySink) {
    let (paid, received) = (&self.paid, &self.received);
    change_material(sink, meta, &paid.material, paid.category(), -paid.quantity);
    change_material(
      sink,
      meta,
      &received.material,
      received.category(),
      received.quantity,
    );
  }
}

// ─── Synthesis / engineering ─────────────────────────────────────────────────

/// Ingredient of a synthesis recipe or engineering blueprint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Ingredient {
  pub name:           String,
  #[serde(rename = "Name_Localised")]
  pub name_localised: Option<String>,
  pub count:          i64,
}

impl Ingredient {
  pub fn display(&self) -> String {
    format!(
      "{} {}",
      self.count,
      material_name(&self.name, self.name_localised.as_deref())
    )
  }
}

fn consume(sink: &mut dyn InventorySink, meta: &EntryMeta, items: &[Ingredient]) {
  for item in items {
    let category = material_info(&item.name)
      .map(|info| info.category)
      .unwrap_or_default();
    change_material(sink, meta, &item.name, category, -item.count);
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Synthesis {
  pub name:      String,
  pub materials: Vec<Ingredient>,
}

impl Describe for Synthesis {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.name)
      .text(
        "",
        self
          .materials
          .iter()
          .map(Ingredient::display)
          .collect::<Vec<_>>()
          .join(", "),
      )
      .build()
  }
}

impl MaterialEffect for Synthesis {
  fn materials(&self, meta: &EntryMeta, sink: &mut dyn InventorySink) {
    consume(sink, meta, &self.materials);
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Modifier {
  pub label:          String,
  pub value:          f64,
  pub original_value: f64,
  pub less_is_good:   i64,
}

impl Modifier {
  /// Whether the change improves the module.
  pub fn is_improvement(&self) -> bool {
    if self.less_is_good != 0 {
      self.value < self.original_value
    } else {
      self.value > self.original_value
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EngineerCraft {
  pub slot:                      String,
  pub module:                    String,
  pub ingredients:               Vec<Ingredient>,
  pub engineer:                  String,
  #[serde(rename = "EngineerID")]
  pub engineer_id:               u64,
  #[serde(rename = "BlueprintID")]
  pub blueprint_id:              u64,
  pub blueprint_name:            String,
  pub level:                     i64,
  pub quality:                   f64,
  pub apply_experimental_effect: Option<String>,
  #[serde(rename = "ExperimentalEffect_Localised")]
  pub experimental_localised:    Option<String>,
  pub modifiers:                 Vec<Modifier>,
}

impl Describe for EngineerCraft {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.engineer)
      .text("", naming::module(&self.module))
      .text("Blueprint:", naming::split_caps(&self.blueprint_name))
      .int("Level:", self.level)
      .float("Quality:", self.quality * 100.0, 0, "%")
      .opt_text("Experimental:", self.experimental_localised.as_deref())
      .build()
  }

  fn detailed(&self) -> String {
    let ingredients = lines("  ", self.ingredients.iter().map(Ingredient::display));
    let modifiers = lines(
      "  ",
      self.modifiers.iter().map(|m| {
        format!(
          "{}: {:.2} -> {:.2}{}",
          naming::split_caps(&m.label),
          m.original_value,
          m.value,
          if m.is_improvement() { " (better)" } else { "" }
        )
      }),
    );
    FieldBuilder::new()
      .block(if ingredients.is_empty() {
        String::new()
      } else {
        format!("Ingredients:\n{ingredients}")
      })
      .block(if modifiers.is_empty() {
        String::new()
      } else {
        format!("Modifiers:\n{modifiers}")
      })
      .build()
  }
}

impl MaterialEffect for EngineerCraft {
  fn materials(&self, meta: &EntryMeta, sink: &mut dyn InventorySink) {
    consume(sink, meta, &self.ingredients);
  }
}

/// Commodities, materials or credits handed to an engineer to unlock them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EngineerContribution {
  pub engineer:            String,
  #[serde(rename = "EngineerID")]
  pub engineer_id:         u64,
  #[serde(rename = "Type")]
  pub kind:                String,
  pub commodity:           Option<String>,
  #[serde(rename = "Commodity_Localised")]
  pub commodity_localised: Option<String>,
  pub material:            Option<String>,
  #[serde(rename = "Material_Localised")]
  pub material_localised:  Option<String>,
  pub faction:             Option<String>,
  pub quantity:            i64,
  pub total_quantity:      i64,
}

impl EngineerContribution {
  pub fn item_name(&self) -> Option<String> {
    if let Some(fd) = &self.commodity {
      return Some(commodity_name(fd, self.commodity_localised.as_deref()));
    }
    self
      .material
      .as_deref()
      .map(|fd| material_name(fd, self.material_localised.as_deref()))
  }
}

impl Describe for EngineerContribution {
  fn info(&self) -> String {
    FieldBuilder::new()
      .text("", &self.engineer)
      .text("Type:", &self.kind)
      .opt_text("", self.item_name())
      .opt_text("Faction:", self.faction.as_deref())
      .int("Quantity:", self.quantity)
      .int("Total:", self.total_quantity)
      .build()
  }
}

impl CommodityEffect for EngineerContribution {
  fn commodities(
    &self,
    meta: &EntryMeta,
    sink: &mut dyn InventorySink,
    _unloading_from_srv: bool,
  ) {
    if let (true, Some(fd)) =
      (self.kind.eq_ignore_ascii_case("Commodity"), &self.commodity)
    {
      sink.change(meta, ItemKind::Commodity, &commodity_key(fd), -self.quantity, None);
    }
  }
}

impl MaterialEffect for EngineerContribution {
  fn materials(&self, meta: &EntryMeta, sink: &mut dyn InventorySink) {
    if let (true, Some(fd)) =
      (self.kind.eq_ignore_ascii_case("Materials"), &self.material)
    {
      let category = material_info(fd).map(|i| i.category).unwrap_or_default();
      change_material(sink, meta, fd, category, -self.quantity);
    }
  }
}

// ─── Engineer progress ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EngineerStatus {
  pub engineer:      String,
  #[serde(rename = "EngineerID")]
  pub engineer_id:   Option<u64>,
  /// `Known`, `Invited`, `Acquainted`, `Unlocked` or `Barred`.
  pub progress:      String,
  pub rank:          Option<i64>,
  pub rank_progress: Option<i64>,
}

impl EngineerStatus {
  fn line(&self) -> String {
    FieldBuilder::new()
      .text("", &self.engineer)
      .text("", &self.progress)
      .opt_int("Rank:", self.rank)
      .opt_text("", self.rank_progress.map(|p| format!("{p}%")))
      .build()
  }
}

/// Written once at startup with every engineer, and again with a single
/// engineer when their status changes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EngineerProgress {
  #[serde(flatten)]
  pub single:    EngineerStatus,
  pub engineers: Vec<EngineerStatus>,
}

impl EngineerProgress {
  pub fn statuses(&self) -> Vec<&EngineerStatus> {
    if self.engineers.is_empty() && !self.single.engineer.is_empty() {
      vec![&self.single]
    } else {
      self.engineers.iter().collect()
    }
  }
}

impl Describe for EngineerProgress {
  fn info(&self) -> String {
    match self.statuses().as_slice() {
      [one] => one.line(),
      all => {
        let unlocked = all
          .iter()
          .filter(|e| e.progress.eq_ignore_ascii_case("Unlocked"))
          .count();
        FieldBuilder::new()
          .int("Engineers:", all.len() as i64)
          .int("Unlocked:", unlocked as i64)
          .build()
      }
    }
  }

  fn detailed(&self) -> String {
    if self.engineers.is_empty() {
      return String::new();
    }
    lines("", self.engineers.iter().map(EngineerStatus::line))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn collected_category_falls_back_to_table() {
    let m: MaterialCollected = serde_json::from_value(json!({
      "Category": "",
      "Name": "iron",
      "Count": 3
    }))
    .unwrap();
    assert_eq!(m.material_category(), MaterialCategory::Raw);
    assert_eq!(m.info(), "Iron, Raw, Count: 3");

    let m: MaterialCollected = serde_json::from_value(json!({
      "Category": "$MICRORESOURCE_CATEGORY_Encoded;",
      "Name": "shielddensityreports",
      "Name_Localised": "Untypical Shield Scans ",
      "Count": 1
    }))
    .unwrap();
    assert_eq!(m.material_category(), MaterialCategory::Encoded);
  }

  #[test]
  fn materials_detailed_groups_by_category() {
    let m: Materials = serde_json::from_value(json!({
      "Raw": [{ "Name": "iron", "Count": 10 }, { "Name": "nickel", "Count": 5 }],
      "Manufactured": [],
      "Encoded": [{ "Name": "unknown_thing", "Name_Localised": "Thing", "Count": 2 }]
    }))
    .unwrap();
    assert_eq!(m.info(), "Raw: 2, Manufactured: 0, Encoded: 1");
    assert_eq!(m.detailed(), "Raw:\n  Iron 10\n  Nickel 5\nEncoded:\n  Thing 2");
  }

  #[test]
  fn modifier_direction() {
    let better = Modifier {
      label:          "Mass".into(),
      value:          10.0,
      original_value: 12.0,
      less_is_good:   1,
    };
    assert!(better.is_improvement());
    let worse = Modifier { less_is_good: 0, ..better };
    assert!(!worse.is_improvement());
  }

  #[test]
  fn contribution_item_name() {
    let c: EngineerContribution = serde_json::from_value(json!({
      "Engineer": "Felicity Farseer",
      "Type": "Commodity",
      "Commodity": "meta_alloys",
      "Commodity_Localised": "Meta-Alloys",
      "Quantity": 1,
      "TotalQuantity": 1
    }))
    .unwrap();
    assert_eq!(c.item_name().as_deref(), Some("Meta-Alloys"));
  }

  #[test]
  fn engineer_progress_both_forms() {
    let one: EngineerProgress = serde_json::from_value(json!({
      "Engineer": "Felicity Farseer",
      "EngineerID": 300100,
      "Progress": "Unlocked",
      "Rank": 3,
      "RankProgress": 40
    }))
    .unwrap();
    assert_eq!(one.info(), "Felicity Farseer, Unlocked, Rank: 3, 40%");

    let all: EngineerProgress = serde_json::from_value(json!({
      "Engineers": [
        { "Engineer": "Felicity Farseer", "Progress": "Unlocked", "Rank": 5 },
        { "Engineer": "Elvira Martuuk", "Progress": "Invited" }
      ]
    }))
    .unwrap();
    assert_eq!(all.info(), "Engineers: 2, Unlocked: 1");
    assert_eq!(all.detailed(), "Felicity Farseer, Unlocked, Rank: 5\nElvira Martuuk, Invited");
  }
}
