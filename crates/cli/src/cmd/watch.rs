//! Implementation of the `envbind watch` command.
//!
//! Starts a refresh task for the demo configuration and prints it again
//! whenever a tick changes it. Runs until interrupted.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use envbind::{bind_with_auto_refresh, refresh_interval, set_refresh_interval};

use crate::config::ServiceConfig;
use crate::output::{OutputFormat, format_duration, print_config, print_error, print_info, print_warning, symbols};

pub fn cmd_watch(interval_secs: Option<u64>, output: OutputFormat) -> Result<()> {
  if let Some(secs) = interval_secs {
    set_refresh_interval(secs).context("Invalid refresh interval")?;
  }
  let interval = refresh_interval();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  rt.block_on(watch(interval, output))
}

async fn watch(interval: Duration, output: OutputFormat) -> Result<()> {
  let record = Arc::new(RwLock::new(ServiceConfig::default()));
  let handle = match bind_with_auto_refresh(record.clone()) {
    Ok(handle) => handle,
    Err(e) => {
      print_error(&format!("Initial bind failed: {}", e));
      return Err(e.into());
    }
  };

  let started = Instant::now();
  let mut last = snapshot(&record);
  if !output.is_json() {
    print_info(&format!("Refreshing every {}", format_duration(interval)));
  }
  print_config(&last, output)?;

  loop {
    tokio::select! {
      signal = tokio::signal::ctrl_c() => {
        signal.context("Failed to listen for Ctrl-C")?;
        break;
      }
      _ = tokio::time::sleep(interval) => {}
    }

    let current = snapshot(&record);
    if current == last {
      debug!("configuration unchanged");
    } else {
      if !output.is_json() {
        print_info(&format!(
          "{} configuration changed after {}",
          symbols::ARROW,
          format_duration(started.elapsed())
        ));
      }
      print_config(&current, output)?;
      last = current;
    }
  }

  print_warning("Interrupted, stopping refresh");
  handle.stop().await;
  Ok(())
}

fn snapshot(record: &RwLock<ServiceConfig>) -> ServiceConfig {
  record.read().unwrap_or_else(PoisonError::into_inner).clone()
}
