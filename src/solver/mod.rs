//! Model construction and solving.
//!
//! The pipeline: the variable builder materializes the feasible decision
//! space, the rules add constraints and penalty terms through the shared
//! model and ledger, and the driver assembles the objective, runs CBC, and
//! reads the solution back.

mod context;
mod demand;
mod driver;
mod ledger;
mod model;
mod report;
mod variables;

pub use context::{ContextKey, SolveContext};
pub use demand::expand_required_coverage;
pub use driver::{solve, SolveResult, SolveStatus};
pub use ledger::{PenaltyItem, PenaltyLedger, ResolvedPenalty};
pub use model::RosterModel;
pub use report::PenaltyReport;
pub use variables::{CoverageDiagnostic, CoveragePoint, VarKey, VariableBuilder};
