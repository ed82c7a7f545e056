//! Missions seen in the log, keyed by mission id.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use starlog_core::effect::{EntryMeta, MissionRecord, MissionSink, MissionUpdate};
use strum::{AsRefStr, Display, EnumIter};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, Display, EnumIter,
)]
pub enum MissionState {
  Active,
  Completed,
  Failed,
  Abandoned,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
  pub record: MissionRecord,
  pub state:  MissionState,
  /// Credits paid on completion.
  pub reward: Option<i64>,
  pub ended:  Option<DateTime<Utc>>,
}

impl Mission {
  /// A mission known only by id, from a snapshot or an end event whose
  /// acceptance came before the log started.
  fn stub(mission_id: u64, state: MissionState) -> Self {
    Self {
      record: MissionRecord {
        mission_id,
        ..Default::default()
      },
      state,
      reward: None,
      ended: None,
    }
  }

  pub fn id(&self) -> u64 { self.record.mission_id }
}

#[derive(Debug, Default)]
pub struct MissionList {
  missions: BTreeMap<u64, Mission>,
}

impl MissionList {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, mission_id: u64) -> Option<&Mission> { self.missions.get(&mission_id) }

  pub fn all(&self) -> impl Iterator<Item = &Mission> { self.missions.values() }

  pub fn in_state(&self, state: MissionState) -> impl Iterator<Item = &Mission> {
    self.missions.values().filter(move |m| m.state == state)
  }

  pub fn count(&self, state: MissionState) -> usize { self.in_state(state).count() }

  /// The issuing faction, when the acceptance was seen.
  pub fn faction_of(&self, mission_id: u64) -> Option<&str> {
    self
      .get(mission_id)
      .map(|m| m.record.faction.as_str())
      .filter(|f| !f.is_empty())
  }

  fn end(
    &mut self,
    meta: &EntryMeta,
    mission_id: u64,
    state: MissionState,
    reward: Option<i64>,
  ) {
    let mission = self
      .missions
      .entry(mission_id)
      .or_insert_with(|| Mission::stub(mission_id, state));
    mission.state = state;
    mission.reward = reward;
    mission.ended = Some(meta.timestamp);
  }

  fn reconcile(&mut self, active: &[u64], failed: &[u64], complete: &[u64]) {
    for &id in active {
      self
        .missions
        .entry(id)
        .or_insert_with(|| Mission::stub(id, MissionState::Active));
    }
    for (ids, state) in [
      (failed, MissionState::Failed),
      (complete, MissionState::Completed),
    ] {
      for id in ids {
        if let Some(m) = self.missions.get_mut(id) {
          if m.state == MissionState::Active {
            m.state = state;
          }
        }
      }
    }
  }
}

impl MissionSink for MissionList {
  fn update(&mut self, meta: &EntryMeta, update: MissionUpdate) {
    match update {
      MissionUpdate::Accepted(record) => {
        let id = record.mission_id;
        self.missions.insert(id, Mission {
          record: *record,
          state:  MissionState::Active,
          reward: None,
          ended:  None,
        });
      }
      MissionUpdate::Completed { mission_id, reward } => {
        self.end(meta, mission_id, MissionState::Completed, Some(reward));
      }
      MissionUpdate::Failed { mission_id } => {
        self.end(meta, mission_id, MissionState::Failed, None);
      }
      MissionUpdate::Abandoned { mission_id } => {
        self.end(meta, mission_id, MissionState::Abandoned, None);
      }
      MissionUpdate::Redirected {
        mission_id,
        system,
        station,
      } => match self.missions.get_mut(&mission_id) {
        Some(m) => {
          m.record.destination_system = Some(system);
          m.record.destination_station = Some(station);
        }
        None => {
          tracing::debug!(id = meta.id, mission_id, "redirect for unseen mission");
        }
      },
      MissionUpdate::Snapshot {
        active,
        failed,
        complete,
      } => self.reconcile(&active, &failed, &complete),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use starlog_core::EventType;

  use super::*;

  fn meta() -> EntryMeta {
    EntryMeta {
      id:         1,
      timestamp:  Utc::now(),
      event_type: EventType::MissionAccepted,
    }
  }

  fn accept(list: &mut MissionList, id: u64, faction: &str) {
    list.update(
      &meta(),
      MissionUpdate::Accepted(Box::new(MissionRecord {
        mission_id: id,
        name: "Mission_Delivery_name".into(),
        faction: faction.into(),
        ..Default::default()
      })),
    );
  }

  #[test]
  fn lifecycle() {
    let mut list = MissionList::new();
    accept(&mut list, 1, "Lave Radio");
    accept(&mut list, 2, "Lave Radio");
    accept(&mut list, 3, "Brothers of Lave");

    list.update(&meta(), MissionUpdate::Completed { mission_id: 1, reward: 40_000 });
    list.update(&meta(), MissionUpdate::Failed { mission_id: 2 });
    list.update(&meta(), MissionUpdate::Redirected {
      mission_id: 3,
      system:     "Diso".into(),
      station:    "Shifnalport".into(),
    });

    assert_eq!(list.get(1).unwrap().state, MissionState::Completed);
    assert_eq!(list.get(1).unwrap().reward, Some(40_000));
    assert!(list.get(1).unwrap().ended.is_some());
    assert_eq!(list.get(2).unwrap().state, MissionState::Failed);
    assert_eq!(list.faction_of(2), Some("Lave Radio"));
    assert_eq!(
      list.get(3).unwrap().record.destination_station.as_deref(),
      Some("Shifnalport")
    );
    assert_eq!(list.count(MissionState::Active), 1);
  }

  #[test]
  fn end_of_unseen_mission_keeps_a_stub() {
    let mut list = MissionList::new();
    list.update(&meta(), MissionUpdate::Abandoned { mission_id: 9 });
    assert_eq!(list.get(9).unwrap().state, MissionState::Abandoned);
    assert_eq!(list.faction_of(9), None);
  }

  #[test]
  fn snapshot_reconciles_without_dropping() {
    let mut list = MissionList::new();
    accept(&mut list, 1, "A");
    accept(&mut list, 2, "B");
    accept(&mut list, 3, "C");
    list.update(&meta(), MissionUpdate::Snapshot {
      active:   vec![1, 7],
      failed:   vec![2],
      complete: vec![],
    });
    assert_eq!(list.get(1).unwrap().state, MissionState::Active);
    assert_eq!(list.get(2).unwrap().state, MissionState::Failed);
    // Missing from every list: left as it was.
    assert_eq!(list.get(3).unwrap().state, MissionState::Active);
    // Unknown active id becomes a stub.
    assert_eq!(list.get(7).unwrap().state, MissionState::Active);
    assert_eq!(list.count(MissionState::Active), 3);
  }
}
