//! Core types and trait definitions for the starlog journal layer.
//!
//! This crate is deliberately free of JSON-schema knowledge about individual
//! events. It holds the vocabulary every other crate shares: the event-type
//! tag, FDName normalisation tables, the material table, and the effect /
//! sink traits through which events feed aggregate state.

pub mod effect;
pub mod error;
pub mod event_type;
pub mod material;
pub mod naming;

pub use error::{Error, Result};
pub use event_type::EventType;
