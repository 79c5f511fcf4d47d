use tracing::warn;

use crate::parse::parse_condition;
use crate::types::CompiledRule;
use crate::{CompareOp, EngineOptions, EqualityMode, Expr, ProgramRules, Rule, RuleVariable};

/// Parse and normalize every rule condition once.
///
/// Never fails: a condition that does not parse is kept as an error and the
/// rule never fires. Invalid conditions and duplicate variable names are
/// logged here, once per configuration.
pub(crate) fn compile(
    rules: Vec<Rule>,
    variables: Vec<RuleVariable>,
    options: EngineOptions,
) -> ProgramRules {
    crate::resolve::warn_duplicates(&variables);

    let rules = rules
        .into_iter()
        .enumerate()
        .map(|(index, rule)| {
            let condition =
                parse_condition(&rule.condition).map(|expr| normalize(expr, options.equality));
            if let Err(err) = &condition {
                warn!(
                    rule = rule.label(),
                    condition = %rule.condition,
                    error = %err,
                    "invalid program rule condition; the rule will never fire"
                );
            }
            CompiledRule {
                rule,
                condition,
                index,
            }
        })
        .collect();

    ProgramRules {
        rules,
        variables,
        options,
    }
}

/// Rewrite `!=` as `!==` everywhere, and `==` as `===` in strict mode.
pub(crate) fn normalize(expr: Expr, equality: EqualityMode) -> Expr {
    match expr {
        Expr::Compare { left, op, right } => Expr::Compare {
            left: Box::new(normalize(*left, equality)),
            op: normalize_op(op, equality),
            right: Box::new(normalize(*right, equality)),
        },
        Expr::And(a, b) => Expr::And(
            Box::new(normalize(*a, equality)),
            Box::new(normalize(*b, equality)),
        ),
        Expr::Or(a, b) => Expr::Or(
            Box::new(normalize(*a, equality)),
            Box::new(normalize(*b, equality)),
        ),
        Expr::Not(inner) => Expr::Not(Box::new(normalize(*inner, equality))),
        Expr::Neg(inner) => Expr::Neg(Box::new(normalize(*inner, equality))),
        leaf @ (Expr::Literal(_) | Expr::Var(_)) => leaf,
    }
}

fn normalize_op(op: CompareOp, equality: EqualityMode) -> CompareOp {
    match (op, equality) {
        (CompareOp::Neq, _) => CompareOp::StrictNeq,
        (CompareOp::Eq, EqualityMode::Strict) => CompareOp::StrictEq,
        (other, _) => other,
    }
}
