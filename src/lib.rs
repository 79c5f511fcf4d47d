//! Program-rule evaluation for signal case-management forms.
//!
//! Rules carry a condition over `#{variable}` placeholders and a list of
//! actions. Evaluating a compiled [`ProgramRules`] against a form snapshot
//! ([`DataValues`]) yields the field assignments, visibility changes,
//! messages and warnings the form should apply.

mod compile;
mod dispatch;
mod error;
mod evaluate;
pub mod parse;
mod resolve;
mod types;
pub mod workflow;

pub use error::EngineError;
pub use evaluate::{evaluate_condition, evaluate_condition_with};
pub use parse::{ParseError, parse_condition};
pub use resolve::resolve;
pub use types::{
    ActionType, CompareOp, DataElementRef, DataValues, EngineOptions, EqualityMode,
    EvaluationReport, EvaluationResult, Expr, ProgramRules, ProgramRulesBuilder, Rule, RuleAction,
    RuleBuilder, RuleVariable, Value, ValueType, VarExpr, VariableValues, Visibility,
    VisibilityPolicy, lit, var,
};

/// Evaluate `rules` against `data_values` in one call.
///
/// Compiles the rules on every call. When the same rules are evaluated
/// repeatedly, build a [`ProgramRules`] once and call
/// [`evaluate()`](ProgramRules::evaluate) instead.
pub fn execute_program_rules(
    rules: &[Rule],
    variables: &[RuleVariable],
    data_values: &DataValues,
) -> EvaluationResult {
    ProgramRules::new(rules.to_vec(), variables.to_vec()).evaluate(data_values)
}
