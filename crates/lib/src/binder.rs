//! One-shot binding of environment variables into a record.

use std::env::{self, VarError};

use tracing::{debug, trace};

use crate::error::{BindError, ParseFailure};
use crate::record::{EnvRecord, EnvSource, Target};

/// Bind every declared field of `record` from the process environment.
///
/// Fields are processed in declaration order and nested records are bound
/// recursively. A variable that is unset or empty falls back to its default
/// literal; with no default the field keeps its current value.
///
/// The first conversion error aborts the call. Fields written before it keep
/// their new values; the failing field and everything after it are untouched.
///
/// # Errors
///
/// - [`BindError::InvalidTarget`] if any declared variable name is unusable.
///   This is checked for the whole record before anything is written.
/// - [`BindError::Conversion`] if a value does not parse as its field's kind.
/// - [`BindError::Nested`] wrapping either of the above from a nested record.
pub fn bind<R: EnvRecord>(record: &mut R) -> Result<(), BindError> {
  validate(record)?;
  bind_fields(record)
}

/// Build a `R::default()` and bind it.
pub fn from_env<R: EnvRecord + Default>() -> Result<R, BindError> {
  let mut record = R::default();
  bind(&mut record)?;
  Ok(record)
}

fn validate(record: &mut dyn EnvRecord) -> Result<(), BindError> {
  for field in record.fields() {
    match field.target {
      Target::Value { source, .. } => check_var_name(field.name, source.var())?,
      Target::Nested(inner) => validate(inner)?,
    }
  }
  Ok(())
}

fn check_var_name(field: &str, var: &str) -> Result<(), BindError> {
  if var.is_empty() {
    return Err(BindError::invalid_target(format!(
      "field {} declares an empty variable name",
      field
    )));
  }
  if var.contains(['=', '\0']) {
    return Err(BindError::invalid_target(format!(
      "field {} declares variable {:?}, which cannot contain '=' or NUL",
      field, var
    )));
  }
  Ok(())
}

fn bind_fields(record: &mut dyn EnvRecord) -> Result<(), BindError> {
  for field in record.fields() {
    let name = field.name;
    match field.target {
      Target::Nested(inner) => {
        bind_fields(inner).map_err(|e| BindError::Nested {
          field: name,
          source: Box::new(e),
        })?;
      }
      Target::Value { slot, source } => {
        let resolved = match resolve(name, &source) {
          Ok(resolved) => resolved,
          Err(lossy) => {
            return Err(BindError::Conversion {
              field: name,
              raw_value: lossy,
              target_kind: slot.kind(),
              cause: ParseFailure::NotUnicode,
            });
          }
        };
        let Some(raw) = resolved else {
          trace!(field = name, var = source.var(), "variable unset and no default, leaving field as is");
          continue;
        };

        if let Err(cause) = slot.assign(&raw) {
          return Err(BindError::Conversion {
            field: name,
            raw_value: raw,
            target_kind: slot.kind(),
            cause,
          });
        }
      }
    }
  }
  Ok(())
}

/// Resolve the text for one field: the variable if set and non-empty, else the default.
///
/// A value that is not valid unicode comes back as `Err` holding its lossy rendering.
fn resolve(field: &'static str, source: &EnvSource) -> Result<Option<String>, String> {
  match env::var(source.var()) {
    Ok(value) if !value.is_empty() => {
      debug!(field, var = source.var(), "resolved from environment");
      return Ok(Some(value));
    }
    Ok(_) | Err(VarError::NotPresent) => {}
    Err(VarError::NotUnicode(value)) => return Err(value.to_string_lossy().into_owned()),
  }

  match source.default() {
    Some(default) if !default.is_empty() => {
      debug!(field, var = source.var(), default, "variable unset, using default");
      Ok(Some(default.to_string()))
    }
    _ => Ok(None),
  }
}
