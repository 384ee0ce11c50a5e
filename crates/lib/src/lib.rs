//! envbind: bind environment variables to typed record fields.
//!
//! This crate provides:
//! - [`EnvRecord`] and the [`env_record!`] macro: declare which fields come from which variables
//! - [`bind`]: one-shot, synchronous binding of a record from the process environment
//! - [`bind_with_auto_refresh`]: bind now, then re-bind a shared record on a timer
//!
//! Supported field types are `String`, the integer types, `bool`, `f64`,
//! `Vec` of any of those (comma-separated), and nested records.

pub mod binder;
pub mod error;
pub mod record;
pub mod refresh;
pub mod value;

pub use binder::{bind, from_env};
pub use error::{BindError, ParseFailure};
pub use record::{EnvRecord, EnvSource, Field, FieldInfo, describe};
pub use refresh::{
  DEFAULT_REFRESH_INTERVAL, RefreshHandle, bind_with_auto_refresh, bind_with_refresh_interval, refresh_interval,
  set_refresh_interval,
};
pub use value::{FieldValue, Kind, ScalarKind, ScalarValue};
