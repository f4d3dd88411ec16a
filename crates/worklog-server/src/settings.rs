//! Runtime configuration: defaults, then an optional TOML file, then
//! `WORKLOG_*` environment variables.

use std::path::Path;

use config::{
  Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite:///database_dailywork.db";
pub const DEFAULT_SECRET_KEY: &str = "DEFAULT_KEY";
pub const DEFAULT_ALGORITHM: &str = "HS256";

/// Server configuration, deserialised from the layered sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// `sqlite:///relative.db`, `sqlite:////absolute.db` or `sqlite://` for an
  /// in-memory store.
  pub database_url: String,
  /// Token signing settings. Nothing signs tokens yet.
  pub secret_key:   String,
  pub algorithm:    String,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// A copy safe to print.
  pub fn redacted(&self) -> Self {
    Self { secret_key: "********".to_owned(), ..self.clone() }
  }
}

/// Seed `builder` with every default.
pub fn with_defaults(
  builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
  builder
    .set_default("host", DEFAULT_HOST)?
    .set_default("port", i64::from(DEFAULT_PORT))?
    .set_default("database_url", DEFAULT_DATABASE_URL)?
    .set_default("secret_key", DEFAULT_SECRET_KEY)?
    .set_default("algorithm", DEFAULT_ALGORITHM)
}

/// Load configuration; a missing file at `path` is not an error.
pub fn load(path: &Path) -> Result<ServerConfig, ConfigError> {
  with_defaults(Config::builder())?
    .add_source(File::from(path).required(false))
    .add_source(Environment::with_prefix("WORKLOG"))
    .build()?
    .try_deserialize()
}

#[cfg(test)]
mod tests {
  use config::FileFormat;

  use super::*;

  #[test]
  fn defaults_apply_without_sources() {
    let cfg: ServerConfig = with_defaults(Config::builder())
      .unwrap()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();

    assert_eq!(cfg.address(), "127.0.0.1:8000");
    assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(cfg.secret_key, DEFAULT_SECRET_KEY);
    assert_eq!(cfg.algorithm, DEFAULT_ALGORITHM);
  }

  #[test]
  fn file_overrides_defaults() {
    let toml = r#"
      port = 9090
      database_url = "sqlite://"
    "#;
    let cfg: ServerConfig = with_defaults(Config::builder())
      .unwrap()
      .add_source(File::from_str(toml, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();

    assert_eq!(cfg.port, 9090);
    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.database_url, "sqlite://");
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let cfg = load(Path::new("/nonexistent/worklog.toml")).unwrap();
    assert!(!cfg.host.is_empty());
  }

  #[test]
  fn redacted_hides_secret() {
    let cfg = ServerConfig {
      host:         DEFAULT_HOST.into(),
      port:         DEFAULT_PORT,
      database_url: DEFAULT_DATABASE_URL.into(),
      secret_key:   "hunter2".into(),
      algorithm:    DEFAULT_ALGORITHM.into(),
    };
    let shown = cfg.redacted();
    assert_ne!(shown.secret_key, "hunter2");
    assert_eq!(shown.port, cfg.port);
  }
}
