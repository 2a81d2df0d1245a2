//! Decision-variable identity and the two-pass variable builder.
//!
//! The builder starts from an all-zero upper-bound map over the
//! hospital × worker × date × shift product, elevates keys the workers'
//! availability rules admit, restricts back to the hospitals' required
//! coverage, and materializes one binary variable per surviving key.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use good_lp::{variable, Variable};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::MonthCalendar;
use crate::models::{CapMap, Hospital, ShiftKind, SpecifiedDay, Worker};

use super::demand::expand_required_coverage;
use super::model::RosterModel;

/// Identity of one binary roster decision.
///
/// The `Ord` implementation (hospital, then worker, then date, then shift)
/// fixes the iteration order everywhere the variable map is walked, which
/// keeps variable naming and constraint emission deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarKey {
    /// Hospital name.
    pub hospital: String,
    /// Worker name.
    pub worker: String,
    /// Duty date.
    pub date: NaiveDate,
    /// Shift kind.
    pub shift: ShiftKind,
}

impl VarKey {
    /// Creates a key.
    pub fn new(
        hospital: impl Into<String>,
        worker: impl Into<String>,
        date: NaiveDate,
        shift: ShiftKind,
    ) -> Self {
        Self {
            hospital: hospital.into(),
            worker: worker.into(),
            date,
            shift,
        }
    }

    /// The coverage point this decision would staff.
    pub fn coverage_point(&self) -> CoveragePoint {
        CoveragePoint {
            hospital: self.hospital.clone(),
            date: self.date,
            shift: self.shift,
        }
    }
}

/// A (hospital, date, shift) that must be staffed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoveragePoint {
    /// Hospital name.
    pub hospital: String,
    /// Coverage date.
    pub date: NaiveDate,
    /// Shift kind to staff.
    pub shift: ShiftKind,
}

impl std::fmt::Display for CoveragePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.hospital, self.date, self.shift)
    }
}

/// A tightly constrained coverage point, reported when the model turns out
/// infeasible: zero candidates make infeasibility certain, a single
/// candidate makes the point a likely binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageDiagnostic {
    /// The coverage point.
    pub point: CoveragePoint,
    /// Names of the workers that could staff it.
    pub candidates: Vec<String>,
}

/// Two-pass sieve over the hospital × worker × date × shift product.
pub struct VariableBuilder<'a> {
    hospitals: &'a [Hospital],
    workers: &'a [Worker],
    calendar: &'a MonthCalendar,
    ub: BTreeMap<VarKey, u8>,
    required: BTreeSet<CoveragePoint>,
}

impl<'a> VariableBuilder<'a> {
    /// Creates a builder over the given domain.
    pub fn new(
        hospitals: &'a [Hospital],
        workers: &'a [Worker],
        calendar: &'a MonthCalendar,
    ) -> Self {
        Self {
            hospitals,
            workers,
            calendar,
            ub: BTreeMap::new(),
            required: BTreeSet::new(),
        }
    }

    /// Pass 1: elevate the upper bound of every key a worker availability
    /// rule admits.
    pub fn elevate_by_workers(&mut self) {
        for worker in self.workers {
            for rule in &worker.assignments {
                for day in self.calendar.days() {
                    if rule.weekdays.contains(&day.weekday) {
                        let key =
                            VarKey::new(&rule.hospital, &worker.name, day.date, rule.shift);
                        self.ub.insert(key, 1);
                    }
                }
            }
        }
    }

    /// Pass 2: compute the required coverage set and lower every key that
    /// does not staff a required point back to zero.
    pub fn restrict_by_hospitals(&mut self, specified_days: &[SpecifiedDay]) {
        self.required = expand_required_coverage(self.hospitals, self.calendar, specified_days);
        let required = &self.required;
        self.ub
            .retain(|key, _| required.contains(&key.coverage_point()));
    }

    /// Zeroes every key whose (worker, hospital) cap is exactly 0, so the
    /// model never carries variables a cap rule would immediately pin.
    pub fn filter_by_caps(&mut self, caps: &CapMap) {
        for ((worker, hospital), cap) in caps {
            if *cap != 0 {
                continue;
            }
            self.ub
                .retain(|key, _| !(key.worker == *worker && key.hospital == *hospital));
        }
    }

    /// The required coverage set computed by [`Self::restrict_by_hospitals`].
    pub fn required_coverage(&self) -> &BTreeSet<CoveragePoint> {
        &self.required
    }

    /// Pass 3: materialize one named binary variable per surviving key, in
    /// key order.
    pub fn materialize(&self, model: &mut RosterModel) -> BTreeMap<VarKey, Variable> {
        let mut vars = BTreeMap::new();
        for (key, ub) in &self.ub {
            if *ub != 1 {
                continue;
            }
            let name = format!(
                "x__{}__{}__{}__{}",
                sanitize(&key.hospital),
                sanitize(&key.worker),
                key.date.format("%Y%m%d"),
                key.shift.token(),
            );
            let var = model.add(variable().binary().name(name));
            vars.insert(key.clone(), var);
        }
        debug!(
            variables = vars.len(),
            coverage_points = self.required.len(),
            "materialized decision variables"
        );
        vars
    }

    /// Coverage points with at most one candidate variable, for
    /// infeasibility reporting.
    pub fn coverage_diagnostics(
        &self,
        vars: &BTreeMap<VarKey, Variable>,
    ) -> Vec<CoverageDiagnostic> {
        let mut candidates: BTreeMap<CoveragePoint, Vec<String>> = self
            .required
            .iter()
            .cloned()
            .map(|p| (p, Vec::new()))
            .collect();
        for key in vars.keys() {
            if let Some(names) = candidates.get_mut(&key.coverage_point()) {
                names.push(key.worker.clone());
            }
        }
        candidates
            .into_iter()
            .filter(|(_, names)| names.len() <= 1)
            .map(|(point, candidates)| CoverageDiagnostic { point, candidates })
            .collect()
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
