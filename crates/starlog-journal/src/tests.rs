//! End-to-end decoding: journal lines in, text and effects out.

use serde_json::json;
use starlog_core::{
  EventType,
  effect::{
    Effect, EntryMeta, InventorySink, ItemKind, LedgerEntry, LedgerSink,
  },
};

use crate::{EventBody, JournalEntry, parse_many, parse_value};

const SESSION: &str = r#"
{"timestamp":"2024-03-01T10:00:00Z","event":"Fileheader","part":1,"language":"English/UK","Odyssey":true,"gameversion":"4.0.0.1700","build":"r299999/r0 "}
{"timestamp":"2024-03-01T10:00:05Z","event":"LoadGame","Commander":"Jameson","FID":"F1","Ship":"CobraMkIII","ShipName":"Wanderer","ShipIdent":"JM-01","GameMode":"Solo","Credits":1000000,"Loan":0}
{"timestamp":"2024-03-01T10:05:00Z","event":"MarketBuy","MarketID":128666762,"Type":"gold","Count":10,"BuyPrice":9000,"TotalCost":90000}
{"timestamp":"2024-03-01T10:06:00Z","event":"SquadronStartup","SquadronName":"Iron Wing","CurrentRank":3}
{"timestamp":"2024-03-01T10:30:00Z","event":"MarketSell","MarketID":128666763,"Type":"gold","Count":10,"SellPrice":9500,"TotalSale":95000,"AvgPricePaid":9000}
"#;

#[derive(Default)]
struct Recorder {
  balance: Option<i64>,
  entries: Vec<LedgerEntry>,
  changes: Vec<(ItemKind, String, i64, Option<i64>)>,
}

impl LedgerSink for Recorder {
  fn record(&mut self, entry: LedgerEntry) { self.entries.push(entry); }

  fn set_balance(&mut self, _meta: &EntryMeta, credits: i64) {
    self.balance = Some(credits);
  }
}

impl InventorySink for Recorder {
  fn change(
    &mut self,
    _meta: &EntryMeta,
    kind: ItemKind,
    fd_name: &str,
    delta: i64,
    unit_price: Option<i64>,
  ) {
    self.changes.push((kind, fd_name.to_string(), delta, unit_price));
  }

  fn set(&mut self, _meta: &EntryMeta, kind: ItemKind, fd_name: &str, count: i64) {
    self.changes.push((kind, fd_name.to_string(), count, None));
  }

  fn reset(&mut self, _meta: &EntryMeta, _kind: ItemKind) {}
}

#[test]
fn session_decodes_in_order() {
  let entries: Vec<_> = parse_many(SESSION)
    .into_iter()
    .collect::<Result<_, _>>()
    .unwrap();
  assert_eq!(entries.len(), 5);

  let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
  assert_eq!(ids, [1, 2, 3, 4, 5]);

  assert!(entries[0].is(EventType::Fileheader));
  assert!(entries[2].is(EventType::MarketBuy));
  assert_eq!(entries[2].summary_name(), "Market Buy");
  assert_eq!(
    entries[2].info(),
    "Gold, 10, < buy price 9,000 cr, Total Cost: 90,000 cr"
  );

  let unknown = &entries[3];
  assert!(unknown.event_type.is_unknown());
  assert!(matches!(unknown.body, EventBody::Unknown));
  assert_eq!(unknown.summary_name(), "Squadron Startup");
  assert_eq!(unknown.info(), "SquadronName: Iron Wing, CurrentRank: 3");
  assert!(unknown.detailed().is_empty());
  assert!(unknown.effects().is_empty());
}

#[test]
fn effects_reach_sinks() {
  let mut rec = Recorder::default();
  for entry in parse_many(SESSION).into_iter().flatten() {
    let meta = entry.meta();
    if let Some(ledger) = entry.body.as_ledger() {
      ledger.ledger(&meta, &mut rec);
    }
    if let Some(cargo) = entry.body.as_commodity() {
      cargo.commodities(&meta, &mut rec, false);
    }
  }

  assert_eq!(rec.balance, Some(1_000_000));
  let deltas: Vec<i64> = rec.entries.iter().map(|e| e.cash_delta).collect();
  assert_eq!(deltas, [-90_000, 95_000]);
  assert_eq!(rec.entries[1].unit_profit, Some(500));
  assert_eq!(rec.entries[0].meta.id, 3);

  assert_eq!(
    rec.changes,
    [
      (ItemKind::Commodity, "gold".to_string(), 10, Some(9000)),
      (ItemKind::Commodity, "gold".to_string(), -10, None),
    ]
  );
}

#[test]
fn null_and_mistyped_members_keep_the_body() {
  let entry = parse_value(
    &json!({
      "timestamp": "2024-03-01T11:00:00Z",
      "event": "Docked",
      "StationName": null,
      "StationType": "Coriolis",
      "StarSystem": "Lave",
      "StationFaction": { "Name": "Lave Radio" },
      "StationServices": "dock",
      "DistFromStarLS": null
    }),
    1,
  )
  .unwrap();
  let EventBody::Docked(docked) = &entry.body else {
    panic!("expected a Docked body, got {:?}", entry.body);
  };
  assert_eq!(docked.station_name, "");
  assert_eq!(docked.star_system, "Lave");
  assert_eq!(docked.faction(), Some("Lave Radio"));
  assert!(docked.station_services.is_empty());
  assert_eq!(docked.dist_from_star_ls, None);
  assert_eq!(entry.info(), "Coriolis Starport, in Lave");
}

#[test]
fn unparsed_body_still_has_text() {
  let json = json!({
    "timestamp": "2024-03-01T11:00:00Z",
    "event": "Docked",
    "StationName": ["not", "a", "string"],
    "StarSystem": "Lave"
  });
  let entry = JournalEntry {
    body: EventBody::Unparsed,
    ..parse_value(&json, 1).unwrap()
  };
  assert_eq!(entry.info(), "StarSystem: Lave");
  assert!(entry.detailed().is_empty());
  assert!(entry.effects().is_empty());
}

#[test]
fn effect_listing_matches_dispatch() {
  let entry = parse_value(
    &json!({
      "timestamp": "2024-03-01T11:00:00Z",
      "event": "MissionFailed",
      "Name": "Mission_Delivery_name",
      "MissionID": 65380900,
      "Fine": 50000
    }),
    1,
  )
  .unwrap();
  assert_eq!(
    entry.effects(),
    [Effect::Ledger, Effect::Missions, Effect::Stats]
  );
}
