use serde::{Deserialize, Serialize};

/// How `==` is evaluated. `!=` is always evaluated as `!==`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityMode {
    /// `==` coerces mixed operands (`'5' == 5` holds). Existing rule sets are
    /// written against this behavior.
    #[default]
    Loose,
    /// `==` is evaluated as `===`.
    Strict,
}

/// Which action wins when one true rule hides a field and another shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityPolicy {
    #[default]
    HideWins,
    ShowWins,
}

/// Engine configuration. Every field has a default, so a partial (or absent)
/// `"options"` object in a metadata document is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub equality: EqualityMode,
    pub visibility: VisibilityPolicy,
}

impl EngineOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn equality(mut self, equality: EqualityMode) -> Self {
        self.equality = equality;
        self
    }

    #[must_use]
    pub fn visibility(mut self, visibility: VisibilityPolicy) -> Self {
        self.visibility = visibility;
        self
    }
}
