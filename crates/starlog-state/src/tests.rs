//! A short session folded through every accumulator.

use starlog_core::{effect::ItemKind, material::MaterialCategory};
use starlog_journal::{JournalEntry, parse_many};

use crate::{MissionState, StateBuilder, stats::UNKNOWN};

const SESSION: &str = r#"
{"timestamp":"2024-03-01T10:00:00Z","event":"LoadGame","Commander":"Jameson","Credits":1000000}
{"timestamp":"2024-03-01T10:00:05Z","event":"Location","Docked":true,"StarSystem":"Lave","StationName":"Lave Station","StationFaction":{"Name":"Lave Radio"}}
{"timestamp":"2024-03-01T10:01:00Z","event":"MissionAccepted","Faction":"Lave Radio","Name":"Mission_Delivery_name","MissionID":100,"Reward":50000}
{"timestamp":"2024-03-01T10:01:30Z","event":"MissionAccepted","Faction":"Brothers of Lave","Name":"Mission_Courier_name","MissionID":101}
{"timestamp":"2024-03-01T10:02:00Z","event":"MarketBuy","Type":"gold","Count":10,"BuyPrice":9000,"TotalCost":90000}
{"timestamp":"2024-03-01T10:03:00Z","event":"Undocked","StationName":"Lave Station"}
{"timestamp":"2024-03-01T10:05:00Z","event":"FSDJump","StarSystem":"Diso","JumpDist":3.6}
{"timestamp":"2024-03-01T10:08:00Z","event":"Docked","StarSystem":"Diso","StationName":"Shifnalport","StationFaction":{"Name":"Diso Corp"}}
{"timestamp":"2024-03-01T10:09:00Z","event":"MarketSell","Type":"gold","Count":10,"SellPrice":9500,"TotalSale":95000,"AvgPricePaid":9000}
{"timestamp":"2024-03-01T10:10:00Z","event":"MissionCompleted","Faction":"Lave Radio","Name":"Mission_Delivery_name","MissionID":100,"Reward":50000,"FactionEffects":[{"Faction":"Lave Radio","Influence":[{"Influence":"++"}],"Reputation":"+"}]}
{"timestamp":"2024-03-01T10:11:00Z","event":"MissionFailed","Name":"Mission_Courier_name","MissionID":101}
{"timestamp":"2024-03-01T10:12:00Z","event":"Bounty","Rewards":[{"Faction":"Diso Corp","Reward":1000}],"TotalReward":1000,"Target":"viper"}
"#;

fn entries(input: &str) -> Vec<JournalEntry> {
  parse_many(input).into_iter().map(|r| r.unwrap()).collect()
}

fn build(input: &str) -> StateBuilder {
  let mut state = StateBuilder::new();
  state.apply_all(&entries(input));
  state
}

#[test]
fn ledger_follows_the_session() {
  let state = build(SESSION);
  assert_eq!(state.ledger.balance(), 1_000_000 - 90_000 + 95_000 + 50_000);
  assert_eq!(state.ledger.entries().len(), 3);
  assert_eq!(state.ledger.income(), 145_000);
}

#[test]
fn cargo_is_bought_and_sold() {
  let state = build(SESSION);
  assert_eq!(state.inventory.count(ItemKind::Commodity, "gold"), 0);
  assert!(state.inventory.items(ItemKind::Commodity).is_empty());
}

#[test]
fn missions_end_in_the_right_state() {
  let state = build(SESSION);
  assert_eq!(state.missions.get(100).unwrap().state, MissionState::Completed);
  assert_eq!(state.missions.get(101).unwrap().state, MissionState::Failed);
  assert_eq!(state.missions.count(MissionState::Active), 0);
}

#[test]
fn stats_land_in_the_system_where_they_happened() {
  let state = build(SESSION);
  let stats = &state.stats;

  // Bought while docked at Lave; sold at Diso.
  let lave = stats.get("Lave", "Lave Radio").unwrap();
  assert_eq!(lave.goods_bought, 10);
  assert_eq!(lave.purchase_cost, 90_000);
  let diso = stats.get("Diso", "Diso Corp").unwrap();
  assert_eq!(diso.goods_sold, 10);
  assert_eq!(diso.trade_profit, 5_000);
  assert_eq!(diso.bounties, 1);

  // Mission rewards are credited to the issuing faction where they are
  // handed in.
  let radio = stats.get("Diso", "Lave Radio").unwrap();
  assert_eq!(radio.missions_completed, 1);
  assert_eq!(radio.mission_rewards, 50_000);
  assert_eq!(radio.influence, 2);
  assert_eq!(radio.reputation, 1);

  // The failure names no faction; it comes from the acceptance.
  let brothers = stats.get("Diso", "Brothers of Lave").unwrap();
  assert_eq!(brothers.missions_failed, 1);
  assert!(stats.get("Diso", UNKNOWN).is_none());

  assert_eq!(stats.totals_for_faction("Lave Radio").goods_bought, 10);
}

#[test]
fn location_context_tracks_docking() {
  let mut state = StateBuilder::new();
  let all = entries(SESSION);

  state.apply_all(&all[..2]);
  assert_eq!(state.context().system.as_deref(), Some("Lave"));
  assert_eq!(state.context().station_faction.as_deref(), Some("Lave Radio"));

  state.apply_all(&all[2..6]);
  assert_eq!(state.context().station_faction, None);

  state.apply_all(&all[6..7]);
  assert_eq!(state.context().system.as_deref(), Some("Diso"));
  assert_eq!(state.context().station_faction, None);

  state.apply_all(&all[7..8]);
  assert_eq!(state.context().station_faction.as_deref(), Some("Diso Corp"));
}

#[test]
fn stats_without_a_location_are_unknown() {
  let state = build(
    r#"{"timestamp":"2024-03-01T10:00:00Z","event":"SellExplorationData","BaseValue":1000,"Bonus":500,"TotalEarnings":1500}"#,
  );
  let unknown = state.stats.get(UNKNOWN, UNKNOWN).unwrap();
  assert!(unknown.exploration_sold > 0);
}

#[test]
fn srv_cargo_is_not_ejected_twice() {
  let input = r#"
{"timestamp":"2024-03-01T10:00:00Z","event":"MarketBuy","Type":"water","Count":4,"BuyPrice":300,"TotalCost":1200}
{"timestamp":"2024-03-01T10:01:00Z","event":"DockSRV","SRVType":"testbuggy","ID":53}
{"timestamp":"2024-03-01T10:01:01Z","event":"EjectCargo","Type":"water","Count":2,"Abandoned":false}
"#;
  let mut state = StateBuilder::new();
  let all = entries(input);
  state.apply_all(&all);
  assert!(state.unloading_from_srv());
  assert_eq!(state.inventory.count(ItemKind::Commodity, "water"), 4);

  let cargo = entries(
    r#"{"timestamp":"2024-03-01T10:01:02Z","event":"Cargo","Vessel":"Ship","Count":4,"Inventory":[{"Name":"water","Count":4}]}"#,
  );
  state.apply_all(&cargo);
  assert!(!state.unloading_from_srv());
  assert_eq!(state.inventory.count(ItemKind::Commodity, "water"), 4);
}

#[test]
fn srv_cargo_is_not_collected_twice() {
  let input = r#"
{"timestamp":"2024-03-01T10:00:00Z","event":"MarketBuy","Type":"water","Count":4,"BuyPrice":300,"TotalCost":1200}
{"timestamp":"2024-03-01T10:01:00Z","event":"DockSRV","SRVType":"testbuggy","ID":53}
{"timestamp":"2024-03-01T10:01:01Z","event":"CollectCargo","Type":"painite","Stolen":false}
{"timestamp":"2024-03-01T10:01:01Z","event":"CollectCargo","Type":"painite","Stolen":false}
{"timestamp":"2024-03-01T10:01:02Z","event":"Cargo","Vessel":"Ship","Count":6,"Inventory":[{"Name":"water","Count":4},{"Name":"painite","Count":2}]}
{"timestamp":"2024-03-01T10:05:00Z","event":"CollectCargo","Type":"painite","Stolen":false}
"#;
  let state = build(input);
  assert!(!state.unloading_from_srv());
  assert_eq!(state.inventory.count(ItemKind::Commodity, "painite"), 3);
  assert_eq!(state.inventory.count(ItemKind::Commodity, "water"), 4);
}

#[test]
fn crafting_draws_down_the_materials_listing() {
  let input = r#"
{"timestamp":"2024-03-01T10:00:00Z","event":"Materials","Raw":[{"Name":"iron","Count":20}],"Manufactured":[{"Name":"conductivecomponents","Name_Localised":"Conductive Components","Count":10},{"Name":"fedproprietarycomposites","Name_Localised":"Proprietary Composites","Count":6},{"Name":"tg_abrasion02","Name_Localised":"Phasing Membrane Residue","Count":8}],"Encoded":[]}
{"timestamp":"2024-03-01T10:20:00Z","event":"EngineerCraft","Slot":"PowerPlant","Module":"int_powerplant_size3_class5","Ingredients":[{"Name":"conductivecomponents","Count":3},{"Name":"fedproprietarycomposites","Count":2},{"Name":"tg_abrasion02","Count":1},{"Name":"iron","Count":5}],"Engineer":"Felicity Farseer","EngineerID":300100,"BlueprintID":128673765,"BlueprintName":"PowerPlant_Boosted","Level":1,"Quality":0.5}
"#;
  let state = build(input);
  let manufactured = ItemKind::Material(MaterialCategory::Manufactured);
  let unknown = ItemKind::Material(MaterialCategory::Unknown);
  assert_eq!(state.inventory.count(manufactured, "conductivecomponents"), 7);
  assert_eq!(state.inventory.count(manufactured, "fedproprietarycomposites"), 4);
  assert_eq!(state.inventory.count(manufactured, "tg_abrasion02"), 7);
  assert_eq!(
    state.inventory.count(ItemKind::Material(MaterialCategory::Raw), "iron"),
    15
  );
  assert!(state.inventory.items(unknown).is_empty());
  assert_eq!(
    state.inventory.get(manufactured, "tg_abrasion02").unwrap().name,
    "Phasing Membrane Residue"
  );
}

#[test]
fn docking_with_a_null_field_still_tracks_the_station() {
  let input = r#"
{"timestamp":"2024-03-01T10:00:00Z","event":"FSDJump","StarSystem":"Diso"}
{"timestamp":"2024-03-01T10:08:00Z","event":"Docked","StarSystem":"Diso","StationName":null,"StationFaction":{"Name":"Diso Corp"}}
{"timestamp":"2024-03-01T10:09:00Z","event":"MarketSell","Type":"gold","Count":2,"SellPrice":9500,"TotalSale":19000,"AvgPricePaid":9000}
"#;
  let state = build(input);
  assert_eq!(state.context().station_faction.as_deref(), Some("Diso Corp"));
  let diso = state.stats.get("Diso", "Diso Corp").unwrap();
  assert_eq!(diso.goods_sold, 2);
  assert_eq!(diso.trade_profit, 1000);
}

#[test]
fn unlisted_commodity_takes_the_localised_name() {
  let input = r#"
{"timestamp":"2024-03-01T10:00:00Z","event":"MarketBuy","Type":"imperialslaves","Type_Localised":"Imperial Slaves","Count":3,"BuyPrice":15000,"TotalCost":45000}
{"timestamp":"2024-03-01T10:01:00Z","event":"MarketBuy","Type":"unobtainiumore","Count":1,"BuyPrice":10,"TotalCost":10}
"#;
  let state = build(input);
  let slaves = state.inventory.get(ItemKind::Commodity, "imperialslaves").unwrap();
  assert_eq!(slaves.name, "Imperial Slaves");
  assert_eq!(slaves.count, 3);
  assert_eq!(
    state.inventory.get(ItemKind::Commodity, "unobtainiumore").unwrap().name,
    "Unobtainiumore"
  );
}
