//! Aggregate state built from a stream of journal entries.
//!
//! Each accumulator implements one of the sink traits from
//! [`starlog_core::effect`]; [`StateBuilder`] owns one of each and routes
//! every entry's effects to them, tracking the commander's location along
//! the way.

mod builder;

pub mod carrier;
pub mod inventory;
pub mod ledger;
pub mod missions;
pub mod stats;

pub use builder::StateBuilder;
pub use carrier::CarrierState;
pub use inventory::{Inventory, Item};
pub use ledger::{Ledger, LedgerLine};
pub use missions::{Mission, MissionList, MissionState};
pub use stats::{FactionStats, Stats};

#[cfg(test)]
mod tests;
