use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::options::VisibilityPolicy;

/// Effective visibility of a field after applying the conflict policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
    /// No true rule touched the field's visibility.
    Unchanged,
}

/// Dynamic form behavior computed by one evaluation pass.
///
/// Built fresh on every call. `hidden_fields` and `shown_fields` only grow
/// during a pass; a field hidden by one rule and shown by another stays in
/// both sets, and [`visibility()`](Self::visibility) settles the conflict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct EvaluationResult {
    assignments: BTreeMap<String, Option<String>>,
    hidden_fields: BTreeSet<String>,
    shown_fields: BTreeSet<String>,
    messages: Vec<String>,
    warnings: Vec<String>,
    #[serde(skip)]
    policy: VisibilityPolicy,
}

impl EvaluationResult {
    pub(crate) fn new(policy: VisibilityPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub(crate) fn assign(&mut self, id: &str, value: Option<String>) {
        self.assignments.insert(id.to_owned(), value);
    }

    pub(crate) fn hide(&mut self, id: &str) {
        self.hidden_fields.insert(id.to_owned());
    }

    pub(crate) fn show(&mut self, id: &str) {
        self.shown_fields.insert(id.to_owned());
    }

    pub(crate) fn push_message(&mut self, message: String) {
        self.messages.push(message);
    }

    pub(crate) fn push_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Field values to write back into the form. `None` clears the field.
    #[must_use]
    pub fn assignments(&self) -> &BTreeMap<String, Option<String>> {
        &self.assignments
    }

    /// The value assigned to a field, if any true rule assigned one.
    #[must_use]
    pub fn assignment(&self, id: &str) -> Option<Option<&str>> {
        self.assignments.get(id).map(Option::as_deref)
    }

    #[must_use]
    pub fn hidden_fields(&self) -> &BTreeSet<String> {
        &self.hidden_fields
    }

    #[must_use]
    pub fn shown_fields(&self) -> &BTreeSet<String> {
        &self.shown_fields
    }

    /// Display texts and `Error: `-prefixed errors, in rule order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Resolve a field's visibility using the configured [`VisibilityPolicy`].
    #[must_use]
    pub fn visibility(&self, id: &str) -> Visibility {
        let hidden = self.hidden_fields.contains(id);
        let shown = self.shown_fields.contains(id);
        match (hidden, shown, self.policy) {
            (true, true, VisibilityPolicy::HideWins) | (true, false, _) => Visibility::Hidden,
            (true, true, VisibilityPolicy::ShowWins) | (false, true, _) => Visibility::Shown,
            (false, false, _) => Visibility::Unchanged,
        }
    }

    /// Shorthand for `visibility(id) == Visibility::Hidden`.
    #[must_use]
    pub fn is_hidden(&self, id: &str) -> bool {
        self.visibility(id) == Visibility::Hidden
    }

    /// Whether no true rule produced any effect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
            && self.hidden_fields.is_empty()
            && self.shown_fields.is_empty()
            && self.messages.is_empty()
            && self.warnings.is_empty()
    }
}
