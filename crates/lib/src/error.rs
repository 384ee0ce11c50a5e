use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::value::Kind;

/// Errors returned by [`bind`](crate::bind) and the refresh entry points.
#[derive(Debug, Error)]
pub enum BindError {
  /// The record (or refresh request) cannot be bound at all. Nothing was written.
  #[error("invalid bind target: {reason}")]
  InvalidTarget { reason: String },

  /// A variable (or default) was present but did not parse as the field's kind.
  #[error("unable to set field {field}: failed to parse {raw_value:?} as {target_kind}: {cause}")]
  Conversion {
    field: &'static str,
    raw_value: String,
    target_kind: Kind,
    #[source]
    cause: ParseFailure,
  },

  /// Binding a nested record failed.
  #[error("unable to bind nested field {field}: {source}")]
  Nested {
    field: &'static str,
    #[source]
    source: Box<BindError>,
  },
}

impl BindError {
  pub(crate) fn invalid_target(reason: impl Into<String>) -> Self {
    BindError::InvalidTarget { reason: reason.into() }
  }

  /// Dotted path of the field that ultimately failed, e.g. `database.pool_size`.
  pub fn field_path(&self) -> Option<String> {
    match self {
      BindError::InvalidTarget { .. } => None,
      BindError::Conversion { field, .. } => Some((*field).to_string()),
      BindError::Nested { field, source } => match source.field_path() {
        Some(inner) => Some(format!("{}.{}", field, inner)),
        None => Some((*field).to_string()),
      },
    }
  }

  /// The innermost error, skipping `Nested` wrappers.
  pub fn root_cause(&self) -> &BindError {
    match self {
      BindError::Nested { source, .. } => source.root_cause(),
      other => other,
    }
  }
}

/// Why a piece of text did not convert.
#[derive(Debug, Error)]
pub enum ParseFailure {
  #[error(transparent)]
  Integer(ParseIntError),

  #[error(transparent)]
  Float(ParseFloatError),

  #[error("invalid boolean literal")]
  Boolean,

  #[error("value is not valid unicode")]
  NotUnicode,

  /// One element of a comma-separated sequence failed.
  #[error("element {index} ({raw:?}): {cause}")]
  Element {
    index: usize,
    raw: String,
    #[source]
    cause: Box<ParseFailure>,
  },
}

#[cfg(test)]
mod tests {
  use super::*;

  fn conversion(field: &'static str) -> BindError {
    BindError::Conversion {
      field,
      raw_value: "seven".to_string(),
      target_kind: Kind::Integer,
      cause: ParseFailure::Boolean,
    }
  }

  #[test]
  fn field_path_walks_nested_wrappers() {
    let err = BindError::Nested {
      field: "outer",
      source: Box::new(BindError::Nested {
        field: "inner",
        source: Box::new(conversion("count")),
      }),
    };

    assert_eq!(err.field_path().as_deref(), Some("outer.inner.count"));
    assert!(matches!(err.root_cause(), BindError::Conversion { field: "count", .. }));
  }

  #[test]
  fn conversion_message_names_field_value_and_kind() {
    let message = conversion("count").to_string();
    assert!(message.contains("count"));
    assert!(message.contains("\"seven\""));
    assert!(message.contains("integer"));
  }

  #[test]
  fn invalid_target_has_no_field() {
    assert_eq!(BindError::invalid_target("zero interval").field_path(), None);
  }
}
