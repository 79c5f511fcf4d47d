use serde::{Deserialize, Serialize};

use super::expr::Expr;
use crate::parse::ParseError;

/// Value type declared on a data element. Used by the form layer; the engine
/// treats every value as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    Text,
    LongText,
    Boolean,
    TrueOnly,
    Date,
    Datetime,
    Time,
    Age,
    Number,
    Integer,
    IntegerPositive,
    IntegerZeroOrPositive,
    #[serde(other)]
    Other,
}

/// Reference to a form field by its stable data element id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataElementRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    /// Whether the field is backed by an option set.
    #[serde(default)]
    pub option_set_value: bool,
}

impl DataElementRef {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            value_type: None,
            option_set_value: false,
        }
    }

    #[must_use]
    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }
}

impl From<&str> for DataElementRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A symbolic name usable as `#{name}` in conditions, bound to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleVariable {
    pub name: String,
    #[serde(default)]
    pub data_element: Option<DataElementRef>,
}

impl RuleVariable {
    #[must_use]
    pub fn bound(name: &str, data_element: impl Into<DataElementRef>) -> Self {
        Self {
            name: name.to_owned(),
            data_element: Some(data_element.into()),
        }
    }

    /// A variable with no data element; it always resolves to `null`.
    #[must_use]
    pub fn unbound(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            data_element: None,
        }
    }
}

/// Kind of effect a rule action has on the evaluation result.
///
/// Types this engine does not know deserialize as [`ActionType::Unknown`] and
/// are ignored during dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionType {
    Assign,
    HideField,
    ShowField,
    DisplayText,
    Error,
    ShowWarning,
    #[serde(other)]
    Unknown,
}

/// One effect of a rule, applied when the rule's condition holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAction {
    #[serde(rename = "programRuleActionType", alias = "type")]
    pub action_type: ActionType,
    #[serde(default)]
    pub data_element: Option<DataElementRef>,
    #[serde(default)]
    pub value: Option<String>,
}

impl RuleAction {
    #[must_use]
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            data_element: None,
            value: None,
        }
    }

    #[must_use]
    pub fn data_element(mut self, data_element: impl Into<DataElementRef>) -> Self {
        self.data_element = Some(data_element.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_owned());
        self
    }

    #[must_use]
    pub fn assign(data_element: &str, value: &str) -> Self {
        Self::new(ActionType::Assign)
            .data_element(data_element)
            .value(value)
    }

    #[must_use]
    pub fn hide_field(data_element: &str) -> Self {
        Self::new(ActionType::HideField).data_element(data_element)
    }

    #[must_use]
    pub fn show_field(data_element: &str) -> Self {
        Self::new(ActionType::ShowField).data_element(data_element)
    }

    #[must_use]
    pub fn display_text(text: &str) -> Self {
        Self::new(ActionType::DisplayText).value(text)
    }

    #[must_use]
    pub fn error(text: &str) -> Self {
        Self::new(ActionType::Error).value(text)
    }

    #[must_use]
    pub fn show_warning(text: &str) -> Self {
        Self::new(ActionType::ShowWarning).value(text)
    }
}

/// A declarative program rule: a condition over `#{variable}` placeholders
/// and the actions to apply when it holds.
///
/// Rules have no priority. They run in declaration order and a later rule
/// overwrites an earlier one's assignment to the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Used only in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub condition: String,
    #[serde(rename = "programRuleActions", alias = "actions", default)]
    pub actions: Vec<RuleAction>,
}

impl Rule {
    #[must_use]
    pub fn new(condition: &str) -> Self {
        Self {
            name: None,
            condition: condition.to_owned(),
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    #[must_use]
    pub fn action(mut self, action: RuleAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Label for log lines: the rule name, or its condition text when unnamed.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.condition)
    }
}

/// A rule whose condition has been parsed and normalized once, ahead of
/// every evaluation.
///
/// Produced by the compilation step and stored inside a
/// [`ProgramRules`](super::ProgramRules). `index` is the declaration position.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) rule: Rule,
    pub(crate) condition: Result<Expr, ParseError>,
    pub(crate) index: usize,
}
