//! Implementation of the `envbind show` command.
//!
//! Binds the demo service configuration once and prints the result.

use anyhow::Result;

use envbind::from_env;

use crate::config::ServiceConfig;
use crate::output::{OutputFormat, print_config, print_error, print_success};

pub fn cmd_show(output: OutputFormat) -> Result<()> {
  let config: ServiceConfig = match from_env() {
    Ok(config) => config,
    Err(e) => {
      let field = e.field_path().unwrap_or_else(|| "<record>".to_string());
      print_error(&format!("Failed to bind {}: {}", field, e));
      return Err(e.into());
    }
  };

  if !output.is_json() {
    print_success("Configuration bound from environment");
  }
  print_config(&config, output)
}
