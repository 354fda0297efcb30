//! Shared validate → compute → project pipeline.
//!
//! Every estimator runs through [`run`]; only the formula, the validation
//! rules and the equivalence table differ between implementors.

use serde::Serialize;
use tracing::{debug, warn};

use crate::equivalence::{project, Emissions, EquivalenceRow, EquivalenceTable};
use crate::error::Result;
use crate::types::CalculatorId;

/// One estimator: typed input, typed result, and the table its total projects onto.
pub trait Calculator {
    type Input: std::fmt::Debug;
    type Output: Serialize;

    fn id(&self) -> CalculatorId;

    /// Reject the input as a whole if any field is outside its domain.
    fn validate(&self, input: &Self::Input) -> Result<()>;

    /// Closed-form estimate over an already validated input.
    fn compute(&self, input: &Self::Input) -> Result<Self::Output>;

    /// Total emissions the equivalence rows are derived from.
    fn emissions(&self, output: &Self::Output) -> Emissions;

    fn equivalence_table(&self) -> &'static EquivalenceTable;
}

/// Everything one invocation hands to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report<O> {
    pub calculator: CalculatorId,
    pub result: O,
    pub emissions: Emissions,
    pub equivalences: Vec<EquivalenceRow>,
}

/// Validate, compute and project. No partial report is produced on error.
pub fn run<C: Calculator>(calculator: &C, input: &C::Input) -> Result<Report<C::Output>> {
    let id = calculator.id();
    debug!(calculator = %id, ?input, "validating input");

    if let Err(err) = calculator.validate(input) {
        warn!(calculator = %id, error = %err, "input rejected");
        return Err(err);
    }

    let result = calculator.compute(input)?;
    let emissions = calculator.emissions(&result);
    debug!(calculator = %id, total = emissions.value, unit = %emissions.unit, "computed");

    let equivalences = project(emissions, calculator.equivalence_table())?;

    Ok(Report {
        calculator: id,
        result,
        emissions,
        equivalences,
    })
}
