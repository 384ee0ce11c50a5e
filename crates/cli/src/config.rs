//! Demo service configuration bound from `ENVBIND_*` variables.

use envbind::env_record;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub pool_size: u32,
}

env_record!(DatabaseConfig {
  url: { env: "ENVBIND_DATABASE_URL", default: "postgres://localhost/envbind" },
  pool_size: { env: "ENVBIND_DATABASE_POOL_SIZE", default: "4" },
});

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceConfig {
  pub host: String,
  pub port: u16,
  pub debug: bool,
  pub sample_ratio: f64,
  pub tags: Vec<String>,
  pub database: DatabaseConfig,
}

env_record!(ServiceConfig {
  host: { env: "ENVBIND_HOST", default: "127.0.0.1" },
  port: { env: "ENVBIND_PORT", default: "8080" },
  debug: { env: "ENVBIND_DEBUG", default: "false" },
  sample_ratio: { env: "ENVBIND_SAMPLE_RATIO", default: "1.0" },
  tags: { env: "ENVBIND_TAGS" },
  database: nested,
});
