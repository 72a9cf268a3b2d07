use anyhow::Context;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{
  debug,
  info,
  warn
};

use crate::datetime::parse_timezone;

const DEFAULT_API_BASE_URL: &str =
  "http://localhost:3000/api";

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct BoardConfig {
  pub api:     ApiConfig,
  pub display: DisplayConfig
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ApiConfig {
  pub base_url: String
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Default,
  Deserialize,
)]
#[serde(default)]
pub struct DisplayConfig {
  /// IANA zone used for "today". The
  /// browser's local zone when unset.
  pub timezone: Option<String>,
  /// Hide descriptions on collapsed cards.
  pub compact:  bool
}

impl Default for BoardConfig {
  fn default() -> Self {
    Self {
      api:     ApiConfig::default(),
      display: DisplayConfig::default()
    }
  }
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_API_BASE_URL
        .to_string()
    }
  }
}

impl BoardConfig {
  #[tracing::instrument(skip(text))]
  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let cfg: BoardConfig =
      toml::from_str(text).context(
        "failed to parse board config"
      )?;
    if cfg.api.base_url.trim().is_empty()
    {
      anyhow::bail!(
        "api.base_url must not be empty"
      );
    }
    debug!(base_url = %cfg.api.base_url, "parsed board config");
    Ok(cfg)
  }

  /// Parses an embedded config, logging
  /// and falling back to defaults when it
  /// is unusable.
  pub fn load_or_default(
    text: &str,
    source: &str
  ) -> Self {
    match Self::from_toml_str(text) {
      | Ok(cfg) => {
        info!(
          source,
          base_url = %cfg.api.base_url,
          compact = cfg.display.compact,
          "loaded board config"
        );
        cfg
      }
      | Err(error) => {
        warn!(source, error = %format!("{error:#}"), "using default board config");
        Self::default()
      }
    }
  }

  /// Configured zone, `None` for host
  /// local time or an unknown id.
  pub fn timezone(&self) -> Option<Tz> {
    self.display.timezone.as_deref().and_then(
      |raw| {
        parse_timezone(
          raw,
          "display.timezone"
        )
      }
    )
  }

  /// `base_url` joined with `path`,
  /// without doubled slashes.
  pub fn endpoint(
    &self,
    path: &str
  ) -> String {
    format!(
      "{}/{}",
      self.api.base_url.trim_end_matches('/'),
      path.trim_start_matches('/')
    )
  }
}
