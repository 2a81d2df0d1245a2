//! Linearization helpers for AND/OR of binary variables.
//!
//! Several rules need an indicator for "both of these binaries are 1" or
//! "at least one of these binaries is 1". The standard encodings live here
//! so the algebra is written (and tested) once.

use good_lp::{constraint, Expression, Variable};

use crate::solver::RosterModel;

/// Adds a binary `z` with `z = a AND b`:
/// `z <= a`, `z <= b`, `z >= a + b - 1`.
pub fn and_indicator(
    model: &mut RosterModel,
    name: impl Into<String>,
    a: Variable,
    b: Variable,
) -> Variable {
    let z = model.add_binary(name);
    model.push(constraint!(z <= a));
    model.push(constraint!(z <= b));
    model.push(constraint!(z >= a + b - 1.0));
    z
}

/// Adds a binary `y` with `y = OR(terms)`:
/// `y >= t` for every term and `y <= Σ terms`.
///
/// `terms` must be non-empty; with an empty slice the indicator would be
/// unconstrained below and pinned to 0 above, which no caller wants.
pub fn or_indicator(
    model: &mut RosterModel,
    name: impl Into<String>,
    terms: &[Variable],
) -> Variable {
    debug_assert!(!terms.is_empty(), "or_indicator needs at least one term");
    let y = model.add_binary(name);
    let mut sum = Expression::default();
    for &term in terms {
        model.push(constraint!(y >= term));
        sum += term;
    }
    model.push(constraint!(y <= sum));
    y
}
