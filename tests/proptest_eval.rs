
use proptest::prelude::*;
use signal_rules::{
    DataValues, EqualityMode, Value, VariableValues, evaluate_condition, evaluate_condition_with,
    parse_condition, resolve, var,
};
use strategies::{arb_data_values, arb_expr, arb_value, single_rule, variables};

fn holds(expr: signal_rules::Expr, data: &DataValues) -> bool {
    single_rule(expr).evaluate(data).shown_fields().contains("HELD")
}

proptest! {
    /// Arbitrary condition text never panics; it either evaluates or is false.
    #[test]
    fn arbitrary_text_never_panics(condition in ".{0,40}", value in arb_value()) {
        let vars = VariableValues::new().set("x", value);
        let _ = evaluate_condition(&condition, &vars);
        let _ = evaluate_condition_with(&condition, &vars, EqualityMode::Strict);
    }

    /// Text that does not parse always evaluates to false.
    #[test]
    fn unparsable_is_false(condition in "[#{}()!=<>&|' a-z0-9]{0,24}", value in arb_value()) {
        let vars = VariableValues::new().set("x", value);
        if parse_condition(&condition).is_err() {
            prop_assert!(!evaluate_condition(&condition, &vars));
        }
    }

    /// A variable's value is data, never syntax: string values cannot change
    /// the shape of a condition.
    #[test]
    fn string_value_is_not_spliced(text in ".{0,20}") {
        let vars = VariableValues::new().set("x", text.as_str());
        let expected = text == "''" || text == "marker";
        prop_assert_eq!(evaluate_condition("#{x} === 'marker'", &vars), text == "marker");
        prop_assert_eq!(
            evaluate_condition("#{x} === null || #{x} === 'marker'", &vars),
            expected
        );
    }

    /// Conditions rendered from expression trees parse back to the same tree.
    #[test]
    fn display_parse_round_trip(expr in arb_expr(3)) {
        let text = expr.to_string();
        let parsed = parse_condition(&text);
        prop_assert_eq!(parsed.as_ref().ok(), Some(&expr), "failed for {}", text);
    }

    /// NOT(NOT(x)) holds exactly when x holds.
    #[test]
    fn double_negation(expr in arb_expr(2), data in arb_data_values()) {
        prop_assert_eq!(holds(expr.clone(), &data), holds(!!expr, &data));
    }

    /// `a && b` holds exactly when both hold; `a || b` when either holds.
    #[test]
    fn logical_operators(a in arb_expr(1), b in arb_expr(1), data in arb_data_values()) {
        let ha = holds(a.clone(), &data);
        let hb = holds(b.clone(), &data);
        prop_assert_eq!(holds(a.clone().and(b.clone()), &data), ha && hb);
        prop_assert_eq!(holds(a.or(b), &data), ha || hb);
    }

    /// Every declared variable resolves, to its field value or to null.
    #[test]
    fn resolve_is_total(data in arb_data_values()) {
        let vars = variables();
        let resolved = resolve(&vars, &data);
        prop_assert_eq!(resolved.len(), vars.len());
        for variable in &vars {
            let id = &variable.data_element.as_ref().unwrap().id;
            let expected = match data.get(id) {
                Some(Value::String(s)) if s == "''" => &Value::Null,
                Some(value) => value,
                None => &Value::Null,
            };
            prop_assert_eq!(resolved.get(&variable.name), expected);
        }
    }

    /// An absent field behaves as null in every relational comparison.
    #[test]
    fn absent_field_relational_is_numeric_zero(n in -50_i32..50) {
        let data = DataValues::new();
        prop_assert_eq!(holds(var("cases").gt(n), &data), 0 > n);
        prop_assert_eq!(holds(var("cases").lt(n), &data), 0 < n);
        prop_assert!(!holds(var("cases").strict_eq(n), &data));
    }

    /// `!=` never coerces: a numeric string is always unequal to a number.
    #[test]
    fn not_equal_is_strict(n in 0_u32..1000) {
        let vars = VariableValues::new().set("x", n.to_string());
        let not_equal = format!("#{{x}} != {n}");
        let equal = format!("#{{x}} == {n}");
        prop_assert!(evaluate_condition(&not_equal, &vars));
        prop_assert!(evaluate_condition(&equal, &vars));
        prop_assert!(!evaluate_condition_with(&equal, &vars, EqualityMode::Strict));
    }
}
