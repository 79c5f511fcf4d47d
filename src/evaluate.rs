use std::borrow::Cow;
use std::time::Instant;

use tracing::{debug, warn};

use crate::compile::normalize;
use crate::parse::parse_condition;
use crate::types::{CompiledRule, EvaluationReport};
use crate::{
    DataValues, EngineOptions, EqualityMode, EvaluationResult, Expr, RuleVariable, Value,
    VariableValues,
};

/// Evaluate one condition against resolved variables, with `==` left loose.
///
/// A condition that does not parse is `false`; the parse error is logged.
#[must_use]
pub fn evaluate_condition(condition: &str, variables: &VariableValues) -> bool {
    evaluate_condition_with(condition, variables, EqualityMode::Loose)
}

/// [`evaluate_condition`] with an explicit equality mode.
#[must_use]
pub fn evaluate_condition_with(
    condition: &str,
    variables: &VariableValues,
    equality: EqualityMode,
) -> bool {
    match parse_condition(condition) {
        Ok(expr) => holds(&normalize(expr, equality), variables),
        Err(err) => {
            warn!(condition, error = %err, "invalid program rule condition; treating it as false");
            false
        }
    }
}

pub(crate) fn holds(expr: &Expr, variables: &VariableValues) -> bool {
    eval_expr(expr, variables).is_truthy()
}

/// `&&` and `||` short-circuit and yield one of their operands, so a bare
/// variable or literal can stand as a whole condition.
pub(crate) fn eval_expr<'a>(expr: &'a Expr, variables: &'a VariableValues) -> Cow<'a, Value> {
    match expr {
        Expr::Literal(value) => Cow::Borrowed(value),
        Expr::Var(name) => Cow::Borrowed(variables.get(name)),
        Expr::Compare { left, op, right } => {
            let l = eval_expr(left, variables);
            let r = eval_expr(right, variables);
            Cow::Owned(Value::Bool(l.compare(*op, &r)))
        }
        Expr::And(a, b) => {
            let l = eval_expr(a, variables);
            if l.is_truthy() {
                eval_expr(b, variables)
            } else {
                l
            }
        }
        Expr::Or(a, b) => {
            let l = eval_expr(a, variables);
            if l.is_truthy() {
                l
            } else {
                eval_expr(b, variables)
            }
        }
        Expr::Not(inner) => Cow::Owned(Value::Bool(!eval_expr(inner, variables).is_truthy())),
        Expr::Neg(inner) => Cow::Owned(Value::Number(-eval_expr(inner, variables).to_number())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleOutcome {
    Fired,
    NotFired,
    Invalid,
}

fn run(
    rules: &[CompiledRule],
    variables: &VariableValues,
    options: &EngineOptions,
    mut observe: impl FnMut(&CompiledRule, RuleOutcome),
) -> EvaluationResult {
    let mut result = EvaluationResult::new(options.visibility);

    for rule in rules {
        let outcome = match &rule.condition {
            Ok(expr) if holds(expr, variables) => {
                crate::dispatch::apply(&rule.rule.actions, &mut result);
                RuleOutcome::Fired
            }
            Ok(_) => RuleOutcome::NotFired,
            Err(err) => {
                debug!(rule = rule.rule.label(), error = %err, "skipping rule with invalid condition");
                RuleOutcome::Invalid
            }
        };
        observe(rule, outcome);
    }

    result
}

pub(crate) fn evaluate(
    rules: &[CompiledRule],
    variables: &[RuleVariable],
    options: &EngineOptions,
    data_values: &DataValues,
) -> EvaluationResult {
    let values = crate::resolve(variables, data_values);
    let mut fired = 0_usize;
    let result = run(rules, &values, options, |_, outcome| {
        if outcome == RuleOutcome::Fired {
            fired += 1;
        }
    });
    debug!(rules = rules.len(), fired, "program rules evaluated");
    result
}

pub(crate) fn evaluate_detailed(
    rules: &[CompiledRule],
    variables: &[RuleVariable],
    options: &EngineOptions,
    data_values: &DataValues,
) -> EvaluationReport {
    let start = Instant::now();
    let values = crate::resolve(variables, data_values);
    let mut fired = Vec::new();
    let mut invalid = Vec::new();

    let result = run(rules, &values, options, |rule, outcome| match outcome {
        RuleOutcome::Fired => fired.push((rule.index, rule.rule.label().to_owned())),
        RuleOutcome::Invalid => invalid.push(rule.index),
        RuleOutcome::NotFired => {}
    });

    EvaluationReport::new(result, values, fired, invalid, start.elapsed())
}
