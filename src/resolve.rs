use std::collections::HashSet;

use tracing::warn;

use crate::{DataValues, RuleVariable, Value, VariableValues};

/// Resolve every rule variable against the current form snapshot.
///
/// A variable bound to a field present in `data_values` takes that field's
/// value; an unbound variable or a missing field resolves to `null`. When two
/// variables share a name the one declared last wins.
#[must_use]
pub fn resolve(variables: &[RuleVariable], data_values: &DataValues) -> VariableValues {
    let mut resolved = VariableValues::new();
    for variable in variables {
        let value = variable
            .data_element
            .as_ref()
            .and_then(|de| data_values.get(&de.id))
            .cloned()
            .unwrap_or(Value::Null);
        resolved.insert(&variable.name, value);
    }
    resolved
}

/// Names declared more than once, each reported once, in declaration order.
pub(crate) fn duplicate_names(variables: &[RuleVariable]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for variable in variables {
        let name = variable.name.as_str();
        if !seen.insert(name) && reported.insert(name) {
            duplicates.push(name);
        }
    }
    duplicates
}

pub(crate) fn warn_duplicates(variables: &[RuleVariable]) {
    for name in duplicate_names(variables) {
        warn!(
            variable = name,
            "rule variable declared more than once; the last declaration wins"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_variable_takes_field_value() {
        let variables = [RuleVariable::bound("age", "DE1")];
        let data = DataValues::new().set("DE1", "20");
        let resolved = resolve(&variables, &data);
        assert_eq!(resolved.get("age"), &Value::String("20".into()));
    }

    #[test]
    fn missing_field_resolves_null() {
        let variables = [RuleVariable::bound("age", "DE1")];
        let resolved = resolve(&variables, &DataValues::new());
        assert!(resolved.contains("age"));
        assert_eq!(resolved.get("age"), &Value::Null);
    }

    #[test]
    fn unbound_variable_resolves_null() {
        let variables = [RuleVariable::unbound("flag")];
        let data = DataValues::new().set("flag", true);
        let resolved = resolve(&variables, &data);
        assert_eq!(resolved.get("flag"), &Value::Null);
    }

    #[test]
    fn boolean_value_kept() {
        let variables = [RuleVariable::bound("closed", "DE9")];
        let data = DataValues::new().set("DE9", true);
        assert_eq!(resolve(&variables, &data).get("closed"), &Value::Bool(true));
    }

    #[test]
    fn last_declared_duplicate_wins() {
        let variables = [
            RuleVariable::bound("x", "DE1"),
            RuleVariable::bound("x", "DE2"),
        ];
        let data = DataValues::new().set("DE1", "first").set("DE2", "second");
        let resolved = resolve(&variables, &data);
        assert_eq!(resolved.get("x"), &Value::String("second".into()));
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn duplicate_names_reported_once() {
        let variables = [
            RuleVariable::unbound("x"),
            RuleVariable::unbound("y"),
            RuleVariable::unbound("x"),
            RuleVariable::unbound("x"),
        ];
        assert_eq!(duplicate_names(&variables), vec!["x"]);
    }

    #[test]
    fn every_variable_is_resolved() {
        let variables = [
            RuleVariable::bound("a", "DE1"),
            RuleVariable::unbound("b"),
            RuleVariable::bound("c", "DE3"),
        ];
        let data = DataValues::new().set("DE1", "x");
        let resolved = resolve(&variables, &data);
        for variable in &variables {
            assert!(resolved.contains(&variable.name));
        }
    }
}
