//! Commodity and material holdings.
//!
//! Items are keyed by kind, then by lower-cased FD name. Counts never go
//! below zero: a removal larger than what is held leaves zero, which happens
//! routinely when a log starts mid-session.
//!
//! A material change whose category is unknown goes to the category that
//! already holds that material, if any.

use std::collections::BTreeMap;

use starlog_core::{
  effect::{EntryMeta, InventorySink, ItemKind},
  material::{self, MaterialCategory},
  naming,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
  pub fd_name:       String,
  pub name:          String,
  pub count:         i64,
  /// Mean price paid per unit over purchases still held; zero when nothing
  /// was bought.
  pub average_price: i64,
  /// Set once the journal supplied a localised name.
  localised:         bool,
}

impl Item {
  fn new(kind: ItemKind, fd_name: &str) -> Self {
    let name = match kind {
      ItemKind::Commodity => naming::commodity(fd_name),
      ItemKind::Material(_) => material::material_name(fd_name, None),
    };
    Self {
      fd_name: fd_name.to_ascii_lowercase(),
      name,
      count: 0,
      average_price: 0,
      localised: false,
    }
  }
}

#[derive(Debug, Default)]
pub struct Inventory {
  items: BTreeMap<ItemKind, BTreeMap<String, Item>>,
}

impl Inventory {
  pub fn new() -> Self { Self::default() }

  fn entry(&mut self, kind: ItemKind, fd_name: &str) -> &mut Item {
    self
      .items
      .entry(kind)
      .or_default()
      .entry(fd_name.to_ascii_lowercase())
      .or_insert_with(|| Item::new(kind, fd_name))
  }

  /// The material category already holding `fd_name`, for changes the
  /// journal did not categorise.
  fn resolve(&self, kind: ItemKind, fd_name: &str) -> ItemKind {
    if kind != ItemKind::Material(MaterialCategory::Unknown) {
      return kind;
    }
    let key = fd_name.to_ascii_lowercase();
    self
      .items
      .iter()
      .find(|(held, items)| {
        matches!(held, ItemKind::Material(c) if *c != MaterialCategory::Unknown)
          && items.contains_key(&key)
      })
      .map_or(kind, |(held, _)| *held)
  }

  pub fn get(&self, kind: ItemKind, fd_name: &str) -> Option<&Item> {
    self.items.get(&kind)?.get(&fd_name.to_ascii_lowercase())
  }

  pub fn count(&self, kind: ItemKind, fd_name: &str) -> i64 {
    self.get(kind, fd_name).map_or(0, |item| item.count)
  }

  /// Held items of `kind` (count above zero), by FD name.
  pub fn items(&self, kind: ItemKind) -> Vec<&Item> {
    self
      .items
      .get(&kind)
      .map(|items| items.values().filter(|i| i.count > 0).collect())
      .unwrap_or_default()
  }

  pub fn total(&self, kind: ItemKind) -> i64 {
    self.items(kind).iter().map(|i| i.count).sum()
  }

  /// Kinds with at least one held item.
  pub fn kinds(&self) -> Vec<ItemKind> {
    self
      .items
      .iter()
      .filter(|(_, items)| items.values().any(|i| i.count > 0))
      .map(|(kind, _)| *kind)
      .collect()
  }
}

impl InventorySink for Inventory {
  fn change(
    &mut self,
    meta: &EntryMeta,
    kind: ItemKind,
    fd_name: &str,
    delta: i64,
    unit_price: Option<i64>,
  ) {
    let kind = self.resolve(kind, fd_name);
    let item = self.entry(kind, fd_name);
    let held = item.count;
    if delta > 0 {
      if let Some(price) = unit_price {
        let paid = held * item.average_price + delta * price;
        item.average_price = paid / (held + delta);
      }
    }
    item.count = (held + delta).max(0);
    if held + delta < 0 {
      tracing::trace!(id = meta.id, item = fd_name, held, delta, "count clamped at zero");
    }
    if item.count == 0 {
      item.average_price = 0;
    }
  }

  fn set(&mut self, _meta: &EntryMeta, kind: ItemKind, fd_name: &str, count: i64) {
    let item = self.entry(kind, fd_name);
    item.count = count.max(0);
    if item.count == 0 {
      item.average_price = 0;
    }
  }

  fn reset(&mut self, _meta: &EntryMeta, kind: ItemKind) {
    if let Some(items) = self.items.get_mut(&kind) {
      for item in items.values_mut() {
        item.count = 0;
      }
    }
  }

  fn name(&mut self, kind: ItemKind, fd_name: &str, display: &str) {
    let display = display.trim();
    if display.is_empty() {
      return;
    }
    let kind = self.resolve(kind, fd_name);
    let item = self.entry(kind, fd_name);
    if !item.localised {
      item.name = display.to_string();
      item.localised = true;
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use starlog_core::{EventType, material::MaterialCategory};

  use super::*;

  fn meta() -> EntryMeta {
    EntryMeta {
      id:         1,
      timestamp:  Utc::now(),
      event_type: EventType::MarketBuy,
    }
  }

  #[test]
  fn purchases_average_the_price() {
    let mut inv = Inventory::new();
    inv.change(&meta(), ItemKind::Commodity, "gold", 10, Some(9000));
    inv.change(&meta(), ItemKind::Commodity, "Gold", 10, Some(10000));
    let gold = inv.get(ItemKind::Commodity, "gold").unwrap();
    assert_eq!(gold.count, 20);
    assert_eq!(gold.average_price, 9500);
    assert_eq!(gold.name, "Gold");

    // Sales leave the average alone until the hold is empty.
    inv.change(&meta(), ItemKind::Commodity, "gold", -5, None);
    assert_eq!(inv.get(ItemKind::Commodity, "gold").unwrap().average_price, 9500);
    inv.change(&meta(), ItemKind::Commodity, "gold", -50, None);
    let gold = inv.get(ItemKind::Commodity, "gold").unwrap();
    assert_eq!(gold.count, 0);
    assert_eq!(gold.average_price, 0);
    assert!(inv.items(ItemKind::Commodity).is_empty());
  }

  #[test]
  fn removal_from_nothing_stays_at_zero() {
    let mut inv = Inventory::new();
    inv.change(&meta(), ItemKind::Commodity, "drones", -3, None);
    assert_eq!(inv.count(ItemKind::Commodity, "drones"), 0);
  }

  #[test]
  fn uncategorised_material_follows_the_held_one() {
    let manufactured = ItemKind::Material(MaterialCategory::Manufactured);
    let unknown = ItemKind::Material(MaterialCategory::Unknown);
    let mut inv = Inventory::new();
    inv.set(&meta(), manufactured, "tg_abrasion02", 8);
    inv.change(&meta(), unknown, "TG_Abrasion02", -3, None);
    assert_eq!(inv.count(manufactured, "tg_abrasion02"), 5);
    assert!(inv.get(unknown, "tg_abrasion02").is_none());

    // Nothing held anywhere: the change stays uncategorised.
    inv.change(&meta(), unknown, "mysteryshard", 2, None);
    assert_eq!(inv.count(unknown, "mysteryshard"), 2);
  }

  #[test]
  fn first_localised_name_sticks() {
    let mut inv = Inventory::new();
    inv.change(&meta(), ItemKind::Commodity, "imperialslaves", 3, Some(100));
    assert_eq!(inv.get(ItemKind::Commodity, "imperialslaves").unwrap().name, "Imperialslaves");

    inv.name(ItemKind::Commodity, "imperialslaves", "Imperial Slaves");
    inv.name(ItemKind::Commodity, "ImperialSlaves", "Esclaves impériaux");
    inv.name(ItemKind::Commodity, "imperialslaves", "  ");
    let slaves = inv.get(ItemKind::Commodity, "imperialslaves").unwrap();
    assert_eq!(slaves.name, "Imperial Slaves");
    assert_eq!(slaves.count, 3);
  }

  #[test]
  fn reset_then_set_replaces_one_kind() {
    let raw = ItemKind::Material(MaterialCategory::Raw);
    let encoded = ItemKind::Material(MaterialCategory::Encoded);
    let mut inv = Inventory::new();
    inv.change(&meta(), raw, "iron", 5, None);
    inv.change(&meta(), raw, "nickel", 2, None);
    inv.change(&meta(), encoded, "shielddensityreports", 4, None);

    inv.reset(&meta(), raw);
    inv.set(&meta(), raw, "iron", 12);

    assert_eq!(inv.count(raw, "iron"), 12);
    assert_eq!(inv.count(raw, "nickel"), 0);
    assert_eq!(inv.count(encoded, "shielddensityreports"), 4);
    assert_eq!(inv.total(raw), 12);
    assert_eq!(inv.kinds(), [raw, encoded]);
    assert_eq!(inv.get(raw, "iron").unwrap().name, "Iron");
  }
}
