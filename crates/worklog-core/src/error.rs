//! Error types for `worklog-core`.

use thiserror::Error;

/// Client input that cannot become an entity.
///
/// Raised before any store interaction; `field` names the offending input
/// field (or `"body"` when the payload itself could not be decoded).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
  pub field:  String,
  pub reason: String,
}

impl ValidationError {
  pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
    Self { field: field.into(), reason: reason.into() }
  }

  /// A required field was absent from the input.
  pub fn missing(field: &str) -> Self { Self::new(field, "field required") }
}

/// Take a required input field or report it missing.
pub(crate) fn require(
  value: Option<String>,
  field: &str,
) -> Result<String, ValidationError> {
  value.ok_or_else(|| ValidationError::missing(field))
}
