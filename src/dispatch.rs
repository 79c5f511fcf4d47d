use tracing::{debug, trace};

use crate::{ActionType, EvaluationResult, RuleAction};

/// Apply the actions of a rule whose condition held, in declared order.
pub(crate) fn apply(actions: &[RuleAction], result: &mut EvaluationResult) {
    for action in actions {
        apply_action(action, result);
    }
}

fn apply_action(action: &RuleAction, result: &mut EvaluationResult) {
    match action.action_type {
        ActionType::Assign => match &action.data_element {
            Some(de) => result.assign(&de.id, action.value.clone()),
            None => skipped(action, "no data element"),
        },
        ActionType::HideField => match &action.data_element {
            Some(de) => result.hide(&de.id),
            None => skipped(action, "no data element"),
        },
        ActionType::ShowField => match &action.data_element {
            Some(de) => result.show(&de.id),
            None => skipped(action, "no data element"),
        },
        ActionType::DisplayText => match text(action) {
            Some(value) => result.push_message(value.to_owned()),
            None => skipped(action, "empty value"),
        },
        ActionType::Error => match text(action) {
            Some(value) => result.push_message(format!("Error: {value}")),
            None => skipped(action, "empty value"),
        },
        ActionType::ShowWarning => match text(action) {
            Some(value) => result.push_warning(value.to_owned()),
            None => skipped(action, "empty value"),
        },
        ActionType::Unknown => debug!("ignoring program rule action of unknown type"),
    }
}

fn text(action: &RuleAction) -> Option<&str> {
    action.value.as_deref().filter(|v| !v.is_empty())
}

fn skipped(action: &RuleAction, reason: &str) {
    trace!(action = ?action.action_type, reason, "program rule action skipped");
}
