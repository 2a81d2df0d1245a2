//! The solve pipeline: validate, build, apply rules, optimize, read back.

use std::collections::BTreeMap;
use std::time::Instant;

use good_lp::solvers::coin_cbc::coin_cbc;
use good_lp::{Expression, ResolutionError, Solution, SolverModel};
use serde::Serialize;
use tracing::info;

use crate::calendar::MonthCalendar;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::RosterInput;
use crate::rules;
use crate::validation::validate_domain;

use super::context::SolveContext;
use super::ledger::{PenaltyLedger, ResolvedPenalty};
use super::model::RosterModel;
use super::report::PenaltyReport;
use super::variables::{VarKey, VariableBuilder};

/// Solver outcome classification, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Proven-optimal integer solution.
    Optimal,
    /// Integer solution found, optimality bound not closed (time limit
    /// exhausted).
    Feasible,
    /// The constraints admit no solution.
    Infeasible,
    /// The objective is unbounded; impossible for this model structure and
    /// reported as a failure if the solver ever claims it.
    Unbounded,
    /// The time limit elapsed without an integer solution.
    TimeLimit,
    /// The solver backend failed.
    SolverError,
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Feasible => "feasible",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::TimeLimit => "time_limit",
            SolveStatus::SolverError => "solver_error",
        };
        write!(f, "{name}")
    }
}

/// The outcome of a successful solve.
///
/// Only [`SolveStatus::Optimal`] and [`SolveStatus::Feasible`] runs produce
/// this; every other outcome surfaces as an [`EngineError`].
#[derive(Debug, Serialize)]
pub struct SolveResult {
    /// Outcome classification.
    pub status: SolveStatus,
    /// Objective value: selected assignments minus the weighted penalty sum.
    pub objective_value: f64,
    /// Value of every materialized decision, 0 or 1.
    pub assignment: BTreeMap<VarKey, u8>,
    /// The resolved penalty ledger, in registration order.
    pub penalty_items: Vec<ResolvedPenalty>,
    /// Wall-clock seconds spent inside the solver call.
    pub solve_time_seconds: f64,
    /// Number of model variables, decision plus auxiliary.
    pub num_variables: usize,
    /// Number of model constraints.
    pub num_constraints: usize,
}

impl SolveResult {
    /// The keys assigned 1, in key order.
    pub fn selected(&self) -> impl Iterator<Item = &VarKey> {
        self.assignment
            .iter()
            .filter(|(_, &value)| value == 1)
            .map(|(key, _)| key)
    }

    /// Sum of all resolved penalties.
    pub fn total_penalty(&self) -> f64 {
        self.penalty_items.iter().map(|item| item.penalty).sum()
    }

    /// Aggregated penalty report keeping the `top_n` heaviest items.
    pub fn penalty_report(&self, top_n: usize) -> PenaltyReport {
        PenaltyReport::from_items(&self.penalty_items, top_n)
    }
}

/// Optimizes one month's roster.
///
/// Runs the full pipeline: configuration and domain validation, calendar
/// construction, the two-pass variable build, rule application, objective
/// assembly (`maximize Σ assignments − Σ weight·penalty`), the CBC solve,
/// and solution read-back with penalty resolution.
///
/// # Errors
///
/// - [`EngineError::InvalidConfig`] / [`EngineError::DomainValidation`] /
///   [`EngineError::MissingContext`] before any solver work.
/// - [`EngineError::Infeasible`] with coverage diagnostics when the solver
///   proves the model infeasible.
/// - [`EngineError::SolverFailure`] for unbounded models, backend errors,
///   and non-binary read-back values.
pub fn solve(input: &RosterInput, config: &EngineConfig) -> EngineResult<SolveResult> {
    config.validate()?;
    validate_domain(input)?;
    let rules = rules::enabled_rules(config)?;

    let calendar = MonthCalendar::build(input.year, input.month, &input.holidays)?;
    let preferences = input.preference_map();
    let caps = input.cap_map();

    let mut builder = VariableBuilder::new(&input.hospitals, &input.workers, &calendar);
    builder.elevate_by_workers();
    builder.restrict_by_hospitals(&input.specified_days);
    if let Some(caps) = &caps {
        builder.filter_by_caps(caps);
    }

    let mut model = RosterModel::new();
    let variables = builder.materialize(&mut model);

    let ctx = SolveContext {
        calendar: &calendar,
        hospitals: &input.hospitals,
        workers: &input.workers,
        variables: &variables,
        required_coverage: builder.required_coverage(),
        preferences: preferences.as_ref(),
        caps: caps.as_ref(),
        config,
    };

    // Fail on any unmet requirement before the first rule touches the model.
    for rule in &rules {
        ctx.ensure_requires(rule.name(), rule.requires())?;
    }

    let mut ledger = PenaltyLedger::new();
    for rule in &rules {
        rule.apply(&mut model, &ctx, &mut ledger)?;
    }

    let mut objective = Expression::default();
    for &var in variables.values() {
        objective += var;
    }
    objective -= ledger.objective_expression();

    let num_variables = model.variable_count();
    let num_constraints = model.constraint_count();
    info!(
        year = input.year,
        month = input.month,
        decisions = variables.len(),
        variables = num_variables,
        constraints = num_constraints,
        penalties = ledger.len(),
        "model built"
    );

    let (problem_vars, constraints) = model.into_parts();
    let mut problem = problem_vars.maximise(objective.clone()).using(coin_cbc);
    problem.set_parameter("logLevel", "0");
    if let Some(limit) = config.solver_time_limit_seconds {
        problem.set_parameter("sec", &format!("{limit}"));
    }
    for constraint in constraints {
        problem = problem.with(constraint);
    }

    let started = Instant::now();
    let outcome = problem.solve();
    let solve_time_seconds = started.elapsed().as_secs_f64();

    let solution = match outcome {
        Ok(solution) => solution,
        Err(ResolutionError::Infeasible) => {
            info!(solve_time_seconds, "solver reported infeasible");
            return Err(EngineError::Infeasible {
                diagnostics: builder.coverage_diagnostics(&variables),
            });
        }
        Err(ResolutionError::Unbounded) => {
            return Err(EngineError::SolverFailure {
                status: SolveStatus::Unbounded,
                message: "solver reported an unbounded objective".to_string(),
            });
        }
        Err(error) => {
            return Err(EngineError::SolverFailure {
                status: SolveStatus::SolverError,
                message: error.to_string(),
            });
        }
    };

    let mut assignment = BTreeMap::new();
    for (key, &var) in &variables {
        let value = solution.value(var);
        let rounded = value.round();
        if rounded != 0.0 && rounded != 1.0 {
            return Err(EngineError::SolverFailure {
                status: SolveStatus::SolverError,
                message: format!(
                    "decision for {} {} {} {} resolved to non-binary value {value}",
                    key.hospital, key.worker, key.date, key.shift
                ),
            });
        }
        assignment.insert(key.clone(), rounded as u8);
    }

    let status = match config.solver_time_limit_seconds {
        Some(limit) if solve_time_seconds >= limit => SolveStatus::Feasible,
        _ => SolveStatus::Optimal,
    };
    let objective_value = solution.eval(objective);
    let penalty_items = ledger.resolve(&solution);

    info!(
        %status,
        objective_value,
        solve_time_seconds,
        assignments = assignment.values().filter(|&&v| v == 1).count(),
        "solve finished"
    );

    Ok(SolveResult {
        status,
        objective_value,
        assignment,
        penalty_items,
        solve_time_seconds,
        num_variables,
        num_constraints,
    })
}
