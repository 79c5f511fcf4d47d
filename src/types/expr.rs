use std::fmt;
use std::ops::Not;

use super::Value;

/// Comparison operators supported in rule conditions.
///
/// `Eq`/`Neq` are the coercing `==`/`!=` forms, `StrictEq`/`StrictNeq` the
/// type-checking `===`/`!==` forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    StrictEq,
    StrictNeq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Parsed condition expression.
///
/// Variables are referenced by name and bound to their resolved values only
/// at evaluation time; no value is ever spliced into condition text.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Var(String),
    Compare {
        left: Box<Expr>,
        op: CompareOp,
        right: Box<Expr>,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    Neg(Box<Expr>),
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Neq => write!(f, "!="),
            CompareOp::StrictEq => write!(f, "==="),
            CompareOp::StrictNeq => write!(f, "!=="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

/// Renders condition syntax that parses back to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{value}"),
            Expr::Var(name) => write!(f, "#{{{name}}}"),
            Expr::Compare { left, op, right } => write!(f, "({left} {op} {right})"),
            Expr::And(a, b) => write!(f, "({a} && {b})"),
            Expr::Or(a, b) => write!(f, "({a} || {b})"),
            Expr::Not(inner) => write!(f, "!{inner}"),
            Expr::Neg(inner) => write!(f, "-{inner}"),
        }
    }
}

impl Expr {
    #[must_use]
    pub fn compare(left: Expr, op: CompareOp, right: Expr) -> Expr {
        Expr::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(other))
    }

    /// Names of all variables referenced in this expression, in order of
    /// appearance (duplicates included).
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_variables(self, &mut out);
        out
    }
}

fn collect_variables<'a>(expr: &'a Expr, out: &mut Vec<&'a str>) {
    match expr {
        Expr::Var(name) => out.push(name),
        Expr::Compare { left, right, .. } => {
            collect_variables(left, out);
            collect_variables(right, out);
        }
        Expr::And(a, b) | Expr::Or(a, b) => {
            collect_variables(a, out);
            collect_variables(b, out);
        }
        Expr::Not(inner) | Expr::Neg(inner) => collect_variables(inner, out),
        Expr::Literal(_) => {}
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

/// Intermediate builder for comparisons against a rule variable.
/// Created by [`var()`]; converts into a bare variable reference via `Into<Expr>`.
#[derive(Debug, Clone)]
pub struct VarExpr {
    name: String,
}

impl VarExpr {
    fn op(self, op: CompareOp, value: impl Into<Value>) -> Expr {
        Expr::compare(Expr::Var(self.name), op, Expr::Literal(value.into()))
    }

    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Expr {
        self.op(CompareOp::Eq, value)
    }

    #[must_use]
    pub fn neq(self, value: impl Into<Value>) -> Expr {
        self.op(CompareOp::Neq, value)
    }

    #[must_use]
    pub fn strict_eq(self, value: impl Into<Value>) -> Expr {
        self.op(CompareOp::StrictEq, value)
    }

    #[must_use]
    pub fn strict_neq(self, value: impl Into<Value>) -> Expr {
        self.op(CompareOp::StrictNeq, value)
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Expr {
        self.op(CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Expr {
        self.op(CompareOp::Gte, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Expr {
        self.op(CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Expr {
        self.op(CompareOp::Lte, value)
    }
}

impl From<VarExpr> for Expr {
    fn from(v: VarExpr) -> Self {
        Expr::Var(v.name)
    }
}

#[must_use]
pub fn var(name: &str) -> VarExpr {
    VarExpr {
        name: name.to_owned(),
    }
}

#[must_use]
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_gte_number() {
        let expr = var("age").gte(18);
        assert_eq!(
            expr,
            Expr::Compare {
                left: Box::new(Expr::Var("age".to_owned())),
                op: CompareOp::Gte,
                right: Box::new(Expr::Literal(Value::Number(18.0))),
            }
        );
    }

    #[test]
    fn var_neq_str() {
        let expr = var("status").neq("New");
        assert_eq!(
            expr,
            Expr::compare(
                Expr::Var("status".to_owned()),
                CompareOp::Neq,
                lit("New"),
            )
        );
    }

    #[test]
    fn and_chaining_is_left_associative() {
        let expr = var("a").eq(1).and(var("b").eq(2)).and(var("c").eq(3));
        match &expr {
            Expr::And(left, right) => {
                assert_eq!(**right, var("c").eq(3));
                assert!(matches!(left.as_ref(), Expr::And(_, _)));
            }
            other => panic!("expected outer And, got {other:?}"),
        }
    }

    #[test]
    fn not_expr() {
        let expr = !Expr::from(var("closed"));
        assert_eq!(expr, Expr::Not(Box::new(Expr::Var("closed".to_owned()))));
    }

    #[test]
    fn display_renders_condition_syntax() {
        let expr = var("age").gte(18).and(!var("status").strict_eq("New"));
        assert_eq!(
            expr.to_string(),
            "((#{age} >= 18) && !(#{status} === 'New'))"
        );
    }

    #[test]
    fn variables_in_order() {
        let expr = var("a").eq(1).or(var("b").lt(Value::Null));
        assert_eq!(expr.variables(), vec!["a", "b"]);
    }

    #[test]
    fn all_compare_ops_display() {
        let ops = [
            (CompareOp::Eq, "=="),
            (CompareOp::Neq, "!="),
            (CompareOp::StrictEq, "==="),
            (CompareOp::StrictNeq, "!=="),
            (CompareOp::Gt, ">"),
            (CompareOp::Gte, ">="),
            (CompareOp::Lt, "<"),
            (CompareOp::Lte, "<="),
        ];
        for (op, sym) in ops {
            assert_eq!(op.to_string(), sym);
        }
    }
}
