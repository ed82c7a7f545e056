//! Folds journal entries into every accumulator at once.

use starlog_core::effect::{EntryMeta, FactionStat, StatsContext, StatsSink};
use starlog_journal::{EventBody, JournalEntry, events::travel::Location};

use crate::{
  carrier::CarrierState, inventory::Inventory, ledger::Ledger,
  missions::MissionList, stats::Stats,
};

/// Fills in the faction of a failed mission from the missions seen so far.
struct FactionResolver<'a> {
  stats:    &'a mut Stats,
  missions: &'a MissionList,
}

impl StatsSink for FactionResolver<'_> {
  fn record(&mut self, meta: &EntryMeta, context: &StatsContext, stat: FactionStat) {
    let stat = match stat {
      FactionStat::MissionFailed {
        mission_id,
        faction: None,
      } => FactionStat::MissionFailed {
        mission_id,
        faction: self.missions.faction_of(mission_id).map(str::to_string),
      },
      other => other,
    };
    self.stats.record(meta, context, stat);
  }
}

/// Aggregate state built from a journal, in order.
///
/// Besides the accumulators it tracks where the commander is, so faction
/// statistics land in the right system, and whether cargo is currently
/// being moved out of a docked SRV.
#[derive(Debug, Default)]
pub struct StateBuilder {
  pub ledger:         Ledger,
  pub inventory:      Inventory,
  pub missions:       MissionList,
  pub carrier:        CarrierState,
  pub stats:          Stats,
  context:            StatsContext,
  unloading_from_srv: bool,
}

impl StateBuilder {
  pub fn new() -> Self { Self::default() }

  pub fn context(&self) -> &StatsContext { &self.context }

  pub fn unloading_from_srv(&self) -> bool { self.unloading_from_srv }

  pub fn apply_all<'a>(&mut self, entries: impl IntoIterator<Item = &'a JournalEntry>) {
    for entry in entries {
      self.apply(entry);
    }
  }

  /// Apply one entry. Location is updated before effects, so a docking
  /// event's own statistics are credited to the new station.
  pub fn apply(&mut self, entry: &JournalEntry) {
    self.track_location(&entry.body);
    if matches!(entry.body, EventBody::DockSrv(_)) {
      self.unloading_from_srv = true;
    }

    let meta = entry.meta();
    let body = &entry.body;
    if let Some(effect) = body.as_ledger() {
      effect.ledger(&meta, &mut self.ledger);
    }
    if let Some(effect) = body.as_commodity() {
      effect.commodities(&meta, &mut self.inventory, self.unloading_from_srv);
    }
    if let Some(effect) = body.as_material() {
      effect.materials(&meta, &mut self.inventory);
    }
    if let Some(effect) = body.as_stats() {
      let mut sink = FactionResolver {
        stats:    &mut self.stats,
        missions: &self.missions,
      };
      effect.stats(&meta, &self.context, &mut sink);
    }
    if let Some(effect) = body.as_missions() {
      effect.missions(&meta, &mut self.missions);
    }
    if let Some(effect) = body.as_carrier() {
      effect.carrier(&meta, &mut self.carrier);
    }
    tracing::trace!(id = entry.id, event = %entry.event_type.name(), "applied");

    // The cargo listing written after an SRV docks ends the transfer.
    if matches!(entry.body, EventBody::Cargo(_)) {
      self.unloading_from_srv = false;
    }
  }

  fn track_location(&mut self, body: &EventBody) {
    match body {
      EventBody::Location(loc) => self.arrive(loc),
      EventBody::CarrierJump(jump) => self.arrive(&jump.0),
      EventBody::FsdJump(jump) => {
        self.context.system = Some(jump.system.star_system.clone());
        self.context.station_faction = None;
      }
      EventBody::Docked(docked) => {
        if !docked.star_system.is_empty() {
          self.context.system = Some(docked.star_system.clone());
        }
        self.context.station_faction = docked.faction().map(str::to_string);
      }
      EventBody::Undocked(_) => self.context.station_faction = None,
      _ => {}
    }
  }

  fn arrive(&mut self, loc: &Location) {
    self.context.system = Some(loc.system.star_system.clone());
    self.context.station_faction = loc
      .station_faction
      .as_ref()
      .filter(|_| loc.docked)
      .map(|f| f.name().to_string());
  }
}
