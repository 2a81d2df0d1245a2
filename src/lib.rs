//! Duty Roster Optimization Engine
//!
//! This crate computes monthly duty rosters for medical staff across multiple
//! hospitals. Given hospitals with structured coverage demand, workers with
//! availability rules, per-date preferences, and per-worker-per-hospital
//! assignment caps, it builds a mixed-integer linear program, solves it with
//! CBC, and returns the concrete (hospital, worker, date, shift) assignments
//! together with a penalty breakdown explaining every soft-rule violation.
//!
//! Loading input files, rendering rosters, and exporting spreadsheets are the
//! responsibility of external collaborators; this crate is the pure
//! optimization core.

#![warn(missing_docs)]

pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod rules;
pub mod solver;
pub mod validation;

pub use solver::{solve, SolveResult, SolveStatus};
