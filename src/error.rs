use thiserror::Error;

/// Errors from loading program-rule metadata.
///
/// Evaluation itself never fails; these only come from
/// [`ProgramRules::from_json()`](crate::ProgramRules::from_json) and
/// [`ProgramRules::from_file()`](crate::ProgramRules::from_file).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid program rule metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
