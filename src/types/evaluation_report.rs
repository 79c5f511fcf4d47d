use std::fmt;
use std::time::Duration;

use super::data_values::VariableValues;
use super::result::EvaluationResult;

/// Detailed evaluation report returned by
/// [`ProgramRules::evaluate_detailed()`](super::ProgramRules::evaluate_detailed).
///
/// Contains the evaluation result, the resolved variable table, which rules
/// fired, which were skipped for an invalid condition, and the wall-clock
/// duration of the pass.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    result: EvaluationResult,
    variables: VariableValues,
    fired: Vec<usize>,
    fired_names: Vec<String>,
    invalid: Vec<usize>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(
        result: EvaluationResult,
        variables: VariableValues,
        fired: Vec<(usize, String)>,
        invalid: Vec<usize>,
        duration: Duration,
    ) -> Self {
        let (fired, fired_names) = fired.into_iter().unzip();
        Self {
            result,
            variables,
            fired,
            fired_names,
            invalid,
            duration,
        }
    }

    /// The evaluation result, same as [`ProgramRules::evaluate()`](super::ProgramRules::evaluate).
    pub fn result(&self) -> &EvaluationResult {
        &self.result
    }

    pub fn into_result(self) -> EvaluationResult {
        self.result
    }

    /// Variable values the conditions were evaluated against.
    #[must_use]
    pub fn variables(&self) -> &VariableValues {
        &self.variables
    }

    /// Declaration indices of rules whose condition held, in evaluation order.
    #[must_use]
    pub fn fired(&self) -> &[usize] {
        &self.fired
    }

    /// Names (or condition text, for unnamed rules) of the rules that fired.
    #[must_use]
    pub fn fired_names(&self) -> Vec<&str> {
        self.fired_names.iter().map(String::as_str).collect()
    }

    /// Declaration indices of rules skipped because their condition does not parse.
    #[must_use]
    pub fn invalid(&self) -> &[usize] {
        &self.invalid
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fired: [{}]", self.fired_names.join(", "))?;
        if !self.invalid.is_empty() {
            write!(f, ", invalid: {}", self.invalid.len())?;
        }
        write!(
            f,
            ", hidden: {}, shown: {}, assigned: {}",
            self.result.hidden_fields().len(),
            self.result.shown_fields().len(),
            self.result.assignments().len(),
        )?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
