//! Record declarations.
//!
//! A record is any type that can list its bindable fields as [`Field`]
//! descriptors. The list is usually generated with [`env_record!`](crate::env_record):
//!
//! ```
//! #[derive(Debug, Default)]
//! struct Database {
//!   url: String,
//!   pool_size: u32,
//! }
//!
//! envbind::env_record!(Database {
//!   url: { env: "DATABASE_URL", default: "postgres://localhost/app" },
//!   pool_size: { env: "DATABASE_POOL_SIZE", default: "4" },
//! });
//!
//! #[derive(Debug, Default)]
//! struct Config {
//!   name: String,
//!   tags: Vec<String>,
//!   database: Database,
//!   // Not declared below, so the binder never touches it.
//!   started: bool,
//! }
//!
//! envbind::env_record!(Config {
//!   name: { env: "APP_NAME", default: "anon" },
//!   tags: { env: "APP_TAGS" },
//!   database: nested,
//! });
//! ```

use serde::Serialize;

use crate::value::{FieldValue, Kind};

/// A type whose fields can be bound from the environment.
pub trait EnvRecord {
  /// Descriptors for every bindable field, in declaration order.
  fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Where a field's text comes from: a variable name plus an optional default literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvSource {
  var: &'static str,
  default: Option<&'static str>,
}

impl EnvSource {
  pub const fn new(var: &'static str) -> Self {
    Self { var, default: None }
  }

  pub const fn with_default(self, default: &'static str) -> Self {
    Self {
      var: self.var,
      default: Some(default),
    }
  }

  pub fn var(&self) -> &'static str {
    self.var
  }

  pub fn default(&self) -> Option<&'static str> {
    self.default
  }
}

/// One bindable field of a record, borrowed mutably for the duration of a bind.
pub struct Field<'a> {
  pub(crate) name: &'static str,
  pub(crate) target: Target<'a>,
}

pub(crate) enum Target<'a> {
  Value {
    slot: &'a mut dyn FieldValue,
    source: EnvSource,
  },
  Nested(&'a mut dyn EnvRecord),
}

impl<'a> Field<'a> {
  /// A scalar or sequence field read from `source`.
  pub fn value<V: FieldValue>(name: &'static str, slot: &'a mut V, source: EnvSource) -> Self {
    Self {
      name,
      target: Target::Value { slot, source },
    }
  }

  /// A nested record, bound recursively whether or not it has a source of its own.
  pub fn nested<R: EnvRecord>(name: &'static str, record: &'a mut R) -> Self {
    Self {
      name,
      target: Target::Nested(record),
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  /// The environment source, or `None` for nested records.
  pub fn source(&self) -> Option<&EnvSource> {
    match &self.target {
      Target::Value { source, .. } => Some(source),
      Target::Nested(_) => None,
    }
  }
}

/// Read-only summary of a declared variable, as reported by [`describe`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldInfo {
  /// Dotted field path from the root record, e.g. `database.url`.
  pub path: String,
  pub var: &'static str,
  pub default: Option<&'static str>,
  pub kind: Kind,
}

/// List every declared variable of `record`, recursing into nested records.
///
/// Neither the environment nor the record is read or modified beyond asking
/// each slot for its kind.
pub fn describe<R: EnvRecord>(record: &mut R) -> Vec<FieldInfo> {
  let mut out = Vec::new();
  describe_into(record, "", &mut out);
  out
}

fn describe_into(record: &mut dyn EnvRecord, prefix: &str, out: &mut Vec<FieldInfo>) {
  for field in record.fields() {
    let path = if prefix.is_empty() {
      field.name.to_string()
    } else {
      format!("{}.{}", prefix, field.name)
    };

    match field.target {
      Target::Value { slot, source } => out.push(FieldInfo {
        path,
        var: source.var(),
        default: source.default(),
        kind: slot.kind(),
      }),
      Target::Nested(inner) => describe_into(inner, &path, out),
    }
  }
}

/// Implement [`EnvRecord`] for a struct by listing its bindable fields.
///
/// Each entry is either `field: { env: "VAR" }`, `field: { env: "VAR", default: "literal" }`
/// or `field: nested`. Fields that are not listed are left alone by the binder.
#[macro_export]
macro_rules! env_record {
  (@field $this:ident, $field:ident, nested) => {
    $crate::Field::nested(::std::stringify!($field), &mut $this.$field)
  };
  (@field $this:ident, $field:ident, { env: $var:literal $(, default: $default:literal)? $(,)? }) => {
    $crate::Field::value(
      ::std::stringify!($field),
      &mut $this.$field,
      $crate::EnvSource::new($var)$(.with_default($default))?,
    )
  };
  ($ty:ty { $($field:ident : $decl:tt),* $(,)? }) => {
    impl $crate::EnvRecord for $ty {
      fn fields(&mut self) -> ::std::vec::Vec<$crate::Field<'_>> {
        ::std::vec![$($crate::env_record!(@field self, $field, $decl)),*]
      }
    }
  };
}
