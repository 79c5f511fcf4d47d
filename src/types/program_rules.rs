use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::data_values::DataValues;
use super::evaluation_report::EvaluationReport;
use super::expr::Expr;
use super::options::EngineOptions;
use super::result::EvaluationResult;
use super::rule::{CompiledRule, DataElementRef, Rule, RuleAction, RuleVariable};
use crate::parse::ParseError;
use crate::EngineError;

/// Builder for constructing [`ProgramRules`] in code.
///
/// # Example
///
/// ```
/// use signal_rules::{DataValues, ProgramRulesBuilder, var};
///
/// let rules = ProgramRulesBuilder::new()
///     .variable("age", "DE1")
///     .rule("adult", |r| r.when_expr(var("age").gte(18)).show_field("DE2"))
///     .rule("minor", |r| r.when("#{age} < 18").error("Patient is a minor"))
///     .build();
///
/// let result = rules.evaluate(&DataValues::new().set("DE1", "20"));
/// assert!(result.shown_fields().contains("DE2"));
/// ```
#[derive(Debug, Default)]
pub struct ProgramRulesBuilder {
    rules: Vec<Rule>,
    variables: Vec<RuleVariable>,
    options: EngineOptions,
}

/// Intermediate builder passed to the rule definition closure.
#[derive(Debug)]
pub struct RuleBuilder {
    rule: Rule,
}

impl ProgramRulesBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a rule variable bound to a data element.
    #[must_use]
    pub fn variable(mut self, name: &str, data_element: impl Into<DataElementRef>) -> Self {
        self.variables.push(RuleVariable::bound(name, data_element));
        self
    }

    /// Declare a rule variable with no data element; it always reads `null`.
    #[must_use]
    pub fn unbound_variable(mut self, name: &str) -> Self {
        self.variables.push(RuleVariable::unbound(name));
        self
    }

    /// Define a rule. The closure sets the condition with `.when(..)` and adds
    /// actions; a rule without a condition never fires.
    #[must_use]
    pub fn rule(mut self, name: &str, f: impl FnOnce(RuleBuilder) -> RuleBuilder) -> Self {
        let builder = f(RuleBuilder {
            rule: Rule::new("").named(name),
        });
        self.rules.push(builder.rule);
        self
    }

    #[must_use]
    pub fn options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse every condition and produce an immutable `ProgramRules`.
    #[must_use]
    pub fn build(self) -> ProgramRules {
        crate::compile::compile(self.rules, self.variables, self.options)
    }
}

impl RuleBuilder {
    /// Set the condition text, e.g. `#{age} >= 18`.
    #[must_use]
    pub fn when(mut self, condition: &str) -> Self {
        self.rule.condition = condition.to_owned();
        self
    }

    /// Set the condition from an expression tree.
    #[must_use]
    pub fn when_expr(mut self, condition: Expr) -> Self {
        self.rule.condition = condition.to_string();
        self
    }

    #[must_use]
    pub fn action(mut self, action: RuleAction) -> Self {
        self.rule.actions.push(action);
        self
    }

    #[must_use]
    pub fn assign(self, data_element: &str, value: &str) -> Self {
        self.action(RuleAction::assign(data_element, value))
    }

    #[must_use]
    pub fn hide_field(self, data_element: &str) -> Self {
        self.action(RuleAction::hide_field(data_element))
    }

    #[must_use]
    pub fn show_field(self, data_element: &str) -> Self {
        self.action(RuleAction::show_field(data_element))
    }

    #[must_use]
    pub fn display_text(self, text: &str) -> Self {
        self.action(RuleAction::display_text(text))
    }

    #[must_use]
    pub fn error(self, text: &str) -> Self {
        self.action(RuleAction::error(text))
    }

    #[must_use]
    pub fn show_warning(self, text: &str) -> Self {
        self.action(RuleAction::show_warning(text))
    }
}

/// Program-rule metadata as served by the host platform.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    #[serde(default)]
    program_rules: Vec<Rule>,
    #[serde(default)]
    program_rule_variables: Vec<RuleVariable>,
    #[serde(default)]
    options: EngineOptions,
}

/// A compiled, immutable set of program rules and rule variables.
///
/// Conditions are parsed once, at construction. Evaluation is a pure
/// function of the data values, so one `ProgramRules` can be shared behind
/// `Arc` and evaluated from any thread.
#[derive(Debug)]
pub struct ProgramRules {
    pub(crate) rules: Vec<CompiledRule>,
    pub(crate) variables: Vec<RuleVariable>,
    pub(crate) options: EngineOptions,
}

impl ProgramRules {
    /// Compile rules and variables with default [`EngineOptions`].
    #[must_use]
    pub fn new(rules: Vec<Rule>, variables: Vec<RuleVariable>) -> Self {
        Self::with_options(rules, variables, EngineOptions::default())
    }

    #[must_use]
    pub fn with_options(
        rules: Vec<Rule>,
        variables: Vec<RuleVariable>,
        options: EngineOptions,
    ) -> Self {
        crate::compile::compile(rules, variables, options)
    }

    /// Evaluate every rule against the current form snapshot.
    ///
    /// Rules run in declaration order; the actions of each rule whose
    /// condition holds are applied to a fresh [`EvaluationResult`].
    pub fn evaluate(&self, data_values: &DataValues) -> EvaluationResult {
        crate::evaluate::evaluate(&self.rules, &self.variables, &self.options, data_values)
    }

    /// Evaluate with diagnostics: fired rules, invalid rules, resolved
    /// variables and timing.
    pub fn evaluate_detailed(&self, data_values: &DataValues) -> EvaluationReport {
        crate::evaluate::evaluate_detailed(&self.rules, &self.variables, &self.options, data_values)
    }

    /// Parse a metadata document:
    /// `{ "programRules": [..], "programRuleVariables": [..], "options": {..} }`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] if the document is not valid metadata.
    /// Invalid conditions are not errors; see [`invalid_conditions()`](Self::invalid_conditions).
    pub fn from_json(input: &str) -> Result<Self, EngineError> {
        let metadata: Metadata = serde_json::from_str(input)?;
        Ok(Self::with_options(
            metadata.program_rules,
            metadata.program_rule_variables,
            metadata.options,
        ))
    }

    /// Read a metadata document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] on I/O or JSON failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }

    /// Rules whose condition does not parse, by declaration index.
    #[must_use]
    pub fn invalid_conditions(&self) -> Vec<(usize, &ParseError)> {
        self.rules
            .iter()
            .filter_map(|r| r.condition.as_ref().err().map(|e| (r.index, e)))
            .collect()
    }

    /// The rules in declaration (= evaluation) order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|r| &r.rule)
    }

    #[must_use]
    pub fn variables(&self) -> &[RuleVariable] {
        &self.variables
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for ProgramRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProgramRules({} rules, {} variables, {} invalid)",
            self.rules.len(),
            self.variables.len(),
            self.rules.iter().filter(|r| r.condition.is_err()).count(),
        )
    }
}
