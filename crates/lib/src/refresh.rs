//! Periodic re-binding of a shared record.
//!
//! A refresh task owns a clone of the record's `Arc` and re-runs [`bind`] on a
//! fixed interval until it is cancelled or the runtime shuts down. Each tick
//! holds the write lock for the whole bind, so readers never observe a
//! half-applied tick.
//!
//! The interval is fixed when the task starts. [`set_refresh_interval`] only
//! affects tasks started afterwards.

use std::any::type_name;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info, info_span, warn};

use crate::binder::bind;
use crate::error::BindError;
use crate::record::EnvRecord;

/// Refresh interval used by [`bind_with_auto_refresh`] unless changed.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

static REFRESH_INTERVAL_SECS: AtomicU64 = AtomicU64::new(DEFAULT_REFRESH_INTERVAL.as_secs());

/// Current process-wide refresh interval.
pub fn refresh_interval() -> Duration {
  Duration::from_secs(REFRESH_INTERVAL_SECS.load(Ordering::Relaxed))
}

/// Set the process-wide refresh interval in whole seconds.
///
/// Only refresh tasks started after this call observe the new value.
///
/// # Errors
///
/// [`BindError::InvalidTarget`] if `secs` is zero; the stored interval is left unchanged.
pub fn set_refresh_interval(secs: u64) -> Result<(), BindError> {
  if secs == 0 {
    return Err(BindError::invalid_target("refresh interval must be at least one second"));
  }
  REFRESH_INTERVAL_SECS.store(secs, Ordering::Relaxed);
  Ok(())
}

/// Bind `record` now, then keep re-binding it every [`refresh_interval`].
///
/// See [`bind_with_refresh_interval`].
pub fn bind_with_auto_refresh<R>(record: Arc<RwLock<R>>) -> Result<RefreshHandle, BindError>
where
  R: EnvRecord + Send + Sync + 'static,
{
  bind_with_refresh_interval(record, refresh_interval())
}

/// Bind `record` now, then keep re-binding it every `interval` on a background task.
///
/// The initial bind runs on the calling thread and its error is returned as-is;
/// no task is started in that case. Errors from later ticks are logged and the
/// loop carries on with the next tick.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// Any error from the initial [`bind`], or [`BindError::InvalidTarget`] for a
/// zero interval.
pub fn bind_with_refresh_interval<R>(record: Arc<RwLock<R>>, interval: Duration) -> Result<RefreshHandle, BindError>
where
  R: EnvRecord + Send + Sync + 'static,
{
  if interval.is_zero() {
    return Err(BindError::invalid_target("refresh interval must be greater than zero"));
  }

  {
    let mut guard = record.write().unwrap_or_else(PoisonError::into_inner);
    bind(&mut *guard)?;
  }

  let token = CancellationToken::new();
  let span = info_span!("env_refresh", record = type_name::<R>(), interval = ?interval);
  let task = tokio::spawn(refresh_loop(record, interval, token.clone()).instrument(span));

  Ok(RefreshHandle { token, task })
}

async fn refresh_loop<R: EnvRecord>(record: Arc<RwLock<R>>, interval: Duration, token: CancellationToken) {
  info!("refresh task started");

  loop {
    tokio::select! {
      _ = token.cancelled() => break,
      _ = tokio::time::sleep(interval) => {}
    }

    let mut guard = record.write().unwrap_or_else(PoisonError::into_inner);
    if let Err(e) = bind(&mut *guard) {
      warn!(error = %e, "failed to refresh environment variables");
    }
  }

  info!("refresh task stopped");
}

/// Handle to a running refresh task.
///
/// Dropping the handle detaches the task; it then runs until the runtime shuts down.
#[derive(Debug)]
pub struct RefreshHandle {
  token: CancellationToken,
  task: JoinHandle<()>,
}

impl RefreshHandle {
  /// Ask the task to stop. It exits at its next wake-up without binding again.
  pub fn cancel(&self) {
    self.token.cancel();
  }

  pub fn is_cancelled(&self) -> bool {
    self.token.is_cancelled()
  }

  pub fn is_finished(&self) -> bool {
    self.task.is_finished()
  }

  /// Cancel the task and wait for it to exit.
  pub async fn stop(self) {
    self.token.cancel();
    if let Err(e) = self.task.await
      && e.is_panic()
    {
      std::panic::resume_unwind(e.into_panic());
    }
  }
}
