//! Settings from `starlog.toml` and `STARLOG_*` environment variables.

use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;

/// Shape of the optional config file. Every key may be omitted.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
  /// Print each event's detailed report under its summary line.
  pub detailed:     bool,
  /// Default log level when `RUST_LOG` is not set.
  pub log_level:    String,
  /// Include events this build does not recognise.
  pub show_unknown: bool,
}

impl Default for CliConfig {
  fn default() -> Self {
    Self {
      detailed:     false,
      log_level:    "warn".to_string(),
      show_unknown: true,
    }
  }
}

impl CliConfig {
  /// Load from `path` (skipped when absent) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("STARLOG"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise config")
  }

  /// Unparseable levels fall back to `warn`.
  pub fn level(&self) -> LevelFilter {
    self.log_level.parse().unwrap_or(LevelFilter::WARN)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let cfg = CliConfig::load(Path::new("does-not-exist/starlog.toml")).unwrap();
    assert_eq!(cfg.level(), LevelFilter::WARN);
    assert!(cfg.show_unknown);
  }

  #[test]
  fn level_parsing() {
    let cfg = CliConfig {
      log_level: "debug".into(),
      ..Default::default()
    };
    assert_eq!(cfg.level(), LevelFilter::DEBUG);
    let cfg = CliConfig {
      log_level: "loud".into(),
      ..Default::default()
    };
    assert_eq!(cfg.level(), LevelFilter::WARN);
  }
}
