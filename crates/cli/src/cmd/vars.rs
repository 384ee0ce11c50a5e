//! Implementation of the `envbind vars` command.
//!
//! Lists the variables the demo configuration reads, without touching the environment.

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};

use envbind::describe;

use crate::config::ServiceConfig;
use crate::output::{OutputFormat, print_info, print_json, symbols};

pub fn cmd_vars(output: OutputFormat) -> Result<()> {
  let fields = describe(&mut ServiceConfig::default());

  if output.is_json() {
    return print_json(&fields);
  }

  print_info(&format!("{} variable(s) declared", fields.len()));
  for field in &fields {
    let default = match field.default {
      Some(default) => format!("default {:?}", default),
      None => "no default".to_string(),
    };
    println!(
      "  {} {} {} {} {}",
      symbols::INFO,
      field.var.if_supports_color(Stream::Stdout, |s| s.cyan()),
      symbols::ARROW,
      field.path,
      format!("({}, {})", field.kind, default).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }

  Ok(())
}
