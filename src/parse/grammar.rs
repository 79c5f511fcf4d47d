use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, delimited, fail, opt, repeat};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_till, take_while};

use crate::{CompareOp, Expr, Value};

// -- Whitespace -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

fn next_char(input: &mut &str) -> ModalResult<char> {
    any.parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn quote_mark(input: &mut &str) -> ModalResult<char> {
    alt(('\'', '"')).parse_next(input)
}

fn string_literal(input: &mut &str) -> ModalResult<String> {
    let quote = quote_mark(input)?;
    let mut s = String::new();
    let mut closing = cut_err(next_char).context(StrContext::Expected(
        StrContextValue::Description("closing quote"),
    ));
    loop {
        match closing.parse_next(input)? {
            c if c == quote => return Ok(s),
            '\\' => match closing.parse_next(input)? {
                'n' => s.push('\n'),
                't' => s.push('\t'),
                'r' => s.push('\r'),
                other => s.push(other),
            },
            c => s.push(c),
        }
    }
}

fn number(input: &mut &str) -> ModalResult<f64> {
    (digit1, opt(('.', digit1)))
        .take()
        .try_map(|s: &str| s.parse::<f64>())
        .parse_next(input)
}

fn literal(input: &mut &str) -> ModalResult<Value> {
    alt((
        string_literal.map(Value::String),
        number.map(Value::Number),
        "true".value(Value::Bool(true)),
        "false".value(Value::Bool(false)),
        "null".value(Value::Null),
        "undefined".value(Value::Null),
    ))
    .parse_next(input)
}

// -- Variables --------------------------------------------------------------

/// `#{name}`. The name runs to the closing brace and is trimmed, so names
/// containing spaces or dots are accepted.
fn variable(input: &mut &str) -> ModalResult<String> {
    delimited(
        "#{",
        cut_err(take_till(0.., '}')),
        cut_err('}').context(StrContext::Expected(StrContextValue::CharLiteral('}'))),
    )
    .map(|name: &str| name.trim().to_owned())
    .parse_next(input)
}

// -- Operators --------------------------------------------------------------

fn equality_op(input: &mut &str) -> ModalResult<CompareOp> {
    ws.parse_next(input)?;
    alt((
        "===".value(CompareOp::StrictEq),
        "!==".value(CompareOp::StrictNeq),
        "==".value(CompareOp::Eq),
        "!=".value(CompareOp::Neq),
    ))
    .parse_next(input)
}

fn relational_op(input: &mut &str) -> ModalResult<CompareOp> {
    ws.parse_next(input)?;
    alt((
        "<=".value(CompareOp::Lte),
        ">=".value(CompareOp::Gte),
        "<".value(CompareOp::Lt),
        ">".value(CompareOp::Gt),
    ))
    .parse_next(input)
}

fn and_op(input: &mut &str) -> ModalResult<()> {
    ws.parse_next(input)?;
    "&&".void().parse_next(input)
}

fn or_op(input: &mut &str) -> ModalResult<()> {
    ws.parse_next(input)?;
    "||".void().parse_next(input)
}

fn prefix_op(input: &mut &str) -> ModalResult<Option<char>> {
    ws.parse_next(input)?;
    opt(alt(('!', '-'))).parse_next(input)
}

// -- Expressions (precedence: || < && < equality < relational < unary) ------

/// Deepest expression tree a condition may produce, and the deepest nesting
/// of parentheses and prefix operators the parser will descend into.
pub(crate) const MAX_DEPTH: usize = 100;

/// A parsed subexpression and the height of its tree.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }
}

fn too_deep(input: &mut &str) -> ModalResult<Node> {
    cut_err(fail)
        .context(StrContext::Expected(StrContextValue::Description(
            "a less deeply nested condition",
        )))
        .parse_next(input)
}

/// Build a node one level above its children, failing past [`MAX_DEPTH`].
fn join(input: &mut &str, children: &[usize], expr: Expr) -> ModalResult<Node> {
    let height = children.iter().copied().max().unwrap_or(0) + 1;
    if height > MAX_DEPTH {
        return too_deep(input);
    }
    Ok(Node { expr, height })
}

fn primary(input: &mut &str, depth: usize) -> ModalResult<Node> {
    ws.parse_next(input)?;
    alt((
        delimited('(', |i: &mut &str| expr(i, depth + 1), (ws, cut_err(')'))),
        variable.map(|name| Node::leaf(Expr::Var(name))),
        literal.map(|value| Node::leaf(Expr::Literal(value))),
    ))
    .context(StrContext::Expected(StrContextValue::Description("operand")))
    .parse_next(input)
}

fn unary(input: &mut &str, depth: usize) -> ModalResult<Node> {
    if depth > MAX_DEPTH {
        return too_deep(input);
    }
    match prefix_op(input)? {
        Some('!') => {
            let inner = cut_err(|i: &mut &str| unary(i, depth + 1)).parse_next(input)?;
            join(input, &[inner.height], Expr::Not(Box::new(inner.expr)))
        }
        Some(_) => {
            let inner = cut_err(|i: &mut &str| unary(i, depth + 1)).parse_next(input)?;
            match inner.expr {
                Expr::Literal(Value::Number(n)) => Ok(Node::leaf(Expr::Literal(Value::Number(-n)))),
                other => join(input, &[inner.height], Expr::Neg(Box::new(other))),
            }
        }
        None => primary(input, depth),
    }
}

fn relational(input: &mut &str, depth: usize) -> ModalResult<Node> {
    let mut acc = unary(input, depth)?;
    let rest: Vec<(CompareOp, Node)> =
        repeat(0.., (relational_op, cut_err(|i: &mut &str| unary(i, depth)))).parse_next(input)?;
    for (op, rhs) in rest {
        acc = join(
            input,
            &[acc.height, rhs.height],
            Expr::compare(acc.expr, op, rhs.expr),
        )?;
    }
    Ok(acc)
}

fn equality(input: &mut &str, depth: usize) -> ModalResult<Node> {
    let mut acc = relational(input, depth)?;
    let rest: Vec<(CompareOp, Node)> = repeat(
        0..,
        (equality_op, cut_err(|i: &mut &str| relational(i, depth))),
    )
    .parse_next(input)?;
    for (op, rhs) in rest {
        acc = join(
            input,
            &[acc.height, rhs.height],
            Expr::compare(acc.expr, op, rhs.expr),
        )?;
    }
    Ok(acc)
}

fn and_expr(input: &mut &str, depth: usize) -> ModalResult<Node> {
    let mut acc = equality(input, depth)?;
    let rest: Vec<((), Node)> =
        repeat(0.., (and_op, cut_err(|i: &mut &str| equality(i, depth)))).parse_next(input)?;
    for ((), rhs) in rest {
        acc = join(
            input,
            &[acc.height, rhs.height],
            Expr::And(Box::new(acc.expr), Box::new(rhs.expr)),
        )?;
    }
    Ok(acc)
}

fn or_expr(input: &mut &str, depth: usize) -> ModalResult<Node> {
    let mut acc = and_expr(input, depth)?;
    let rest: Vec<((), Node)> =
        repeat(0.., (or_op, cut_err(|i: &mut &str| and_expr(i, depth)))).parse_next(input)?;
    for ((), rhs) in rest {
        acc = join(
            input,
            &[acc.height, rhs.height],
            Expr::Or(Box::new(acc.expr), Box::new(rhs.expr)),
        )?;
    }
    Ok(acc)
}

fn expr(input: &mut &str, depth: usize) -> ModalResult<Node> {
    ws.parse_next(input)?;
    or_expr(input, depth)
}

// -- Top-level parser -------------------------------------------------------

pub fn condition(input: &mut &str) -> ModalResult<Expr> {
    let parsed = expr(input, 0)?;
    ws.parse_next(input)?;
    Ok(parsed.expr)
}
