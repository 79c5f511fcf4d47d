mod data_values;
mod evaluation_report;
mod expr;
mod options;
mod program_rules;
mod result;
mod rule;
mod value;

pub use data_values::{DataValues, VariableValues};
pub use evaluation_report::EvaluationReport;
pub use expr::{CompareOp, Expr, VarExpr, lit, var};
pub use options::{EngineOptions, EqualityMode, VisibilityPolicy};
pub use program_rules::{ProgramRules, ProgramRulesBuilder, RuleBuilder};
pub use result::{EvaluationResult, Visibility};
pub use rule::{ActionType, DataElementRef, Rule, RuleAction, RuleVariable, ValueType};
pub(crate) use rule::CompiledRule;
pub use value::Value;
