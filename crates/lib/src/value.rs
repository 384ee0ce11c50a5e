//! Text-to-value conversion for the field types a record may declare.
//!
//! Every bindable field implements [`FieldValue`]. Scalars parse the whole
//! text; sequences split it on `,` and parse each element with the scalar rule.

use std::fmt;

use serde::Serialize;

use crate::error::ParseFailure;

/// Element kinds a sequence field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
  Text,
  Integer,
  Boolean,
  Float,
}

impl ScalarKind {
  pub fn as_str(self) -> &'static str {
    match self {
      ScalarKind::Text => "text",
      ScalarKind::Integer => "integer",
      ScalarKind::Boolean => "boolean",
      ScalarKind::Float => "float",
    }
  }
}

impl fmt::Display for ScalarKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Semantic kind of a bindable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
  Text,
  Integer,
  Boolean,
  Float,
  List(ScalarKind),
}

impl From<ScalarKind> for Kind {
  fn from(kind: ScalarKind) -> Self {
    match kind {
      ScalarKind::Text => Kind::Text,
      ScalarKind::Integer => Kind::Integer,
      ScalarKind::Boolean => Kind::Boolean,
      ScalarKind::Float => Kind::Float,
    }
  }
}

impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Kind::Text => f.write_str("text"),
      Kind::Integer => f.write_str("integer"),
      Kind::Boolean => f.write_str("boolean"),
      Kind::Float => f.write_str("float"),
      Kind::List(elem) => write!(f, "list of {}", elem),
    }
  }
}

/// A single value parsed from environment text.
pub trait ScalarValue: Sized {
  const KIND: ScalarKind;

  fn parse_scalar(raw: &str) -> Result<Self, ParseFailure>;
}

/// A field slot the binder can overwrite from environment text.
///
/// Implementations must parse the full text before touching `self`, so a
/// failed conversion leaves the field at its previous value.
pub trait FieldValue {
  fn kind(&self) -> Kind;

  fn assign(&mut self, raw: &str) -> Result<(), ParseFailure>;
}

impl ScalarValue for String {
  const KIND: ScalarKind = ScalarKind::Text;

  fn parse_scalar(raw: &str) -> Result<Self, ParseFailure> {
    Ok(raw.to_string())
  }
}

impl ScalarValue for bool {
  const KIND: ScalarKind = ScalarKind::Boolean;

  fn parse_scalar(raw: &str) -> Result<Self, ParseFailure> {
    parse_bool(raw)
  }
}

impl ScalarValue for f64 {
  const KIND: ScalarKind = ScalarKind::Float;

  fn parse_scalar(raw: &str) -> Result<Self, ParseFailure> {
    raw.parse::<f64>().map_err(ParseFailure::Float)
  }
}

macro_rules! integer_scalar {
  ($($ty:ty),* $(,)?) => {
    $(
      impl ScalarValue for $ty {
        const KIND: ScalarKind = ScalarKind::Integer;

        fn parse_scalar(raw: &str) -> Result<Self, ParseFailure> {
          raw.parse::<$ty>().map_err(ParseFailure::Integer)
        }
      }
    )*
  };
}

integer_scalar!(i64, i32, u16, u32, u64, usize);

macro_rules! field_value {
  ($($ty:ty),* $(,)?) => {
    $(
      impl FieldValue for $ty {
        fn kind(&self) -> Kind {
          <$ty as ScalarValue>::KIND.into()
        }

        fn assign(&mut self, raw: &str) -> Result<(), ParseFailure> {
          *self = <$ty>::parse_scalar(raw)?;
          Ok(())
        }
      }

      impl FieldValue for Vec<$ty> {
        fn kind(&self) -> Kind {
          Kind::List(<$ty as ScalarValue>::KIND)
        }

        fn assign(&mut self, raw: &str) -> Result<(), ParseFailure> {
          *self = parse_list::<$ty>(raw)?;
          Ok(())
        }
      }
    )*
  };
}

field_value!(String, bool, f64, i64, i32, u16, u32, u64, usize);

/// Parse a boolean using the conventional literal set.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`; nothing else.
pub fn parse_bool(raw: &str) -> Result<bool, ParseFailure> {
  match raw {
    "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
    "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
    _ => Err(ParseFailure::Boolean),
  }
}

/// Split `raw` on `,` and parse every element, preserving order.
///
/// Elements are never trimmed. Text elements are kept verbatim (including
/// empty ones), while an empty typed element fails like any other bad input.
pub fn parse_list<T: ScalarValue>(raw: &str) -> Result<Vec<T>, ParseFailure> {
  raw
    .split(',')
    .enumerate()
    .map(|(index, elem)| {
      T::parse_scalar(elem).map_err(|cause| ParseFailure::Element {
        index,
        raw: elem.to_string(),
        cause: Box::new(cause),
      })
    })
    .collect()
}
