//! Core domain models for the roster engine.
//!
//! This module contains all the domain types consumed by the optimization
//! core: hospitals and their demand, workers and their availability,
//! per-date preferences, assignment caps, and the bundled roster input.

mod hospital;
mod input;
mod preference;
mod shift;
mod worker;

pub use hospital::{DemandRule, Hospital, SpecifiedDay};
pub use input::RosterInput;
pub use preference::{Cap, CapMap, Preference, PreferenceEntry, PreferenceMap};
pub use shift::{Frequency, ShiftKind};
pub use worker::{AssignmentRule, Worker};
