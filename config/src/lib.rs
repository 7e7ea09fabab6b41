//! Configuration loading for liuyao.
//!
//! Reads `~/.liuyao/config.toml` and resolves it into
//! [`DivinationSettings`]. The TOML shape stays private to this crate:
//!
//! ```toml
//! [six_spirit]
//! scheme = "traditional"      # or "paired"
//!
//! [six_kin]
//! changed_palace = "original" # or "own"
//!
//! [symbolic_stars]
//! disabled = ["PeachBlossom"]
//!
//! [calendar]
//! utc_offset_minutes = 480
//! ```
//!
//! Every section and key is optional; missing values take their defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use liuyao_types::settings::{
    ChangedKinPalace, DivinationSettings, SettingsError, SixSpiritScheme, UtcOffsetMinutes,
};
use liuyao_types::{CatalogError, SymbolicStar};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },
    #[error("invalid [symbolic_stars] entry: {0}")]
    UnknownStar(#[from] CatalogError),
    #[error("invalid [calendar] entry: {0}")]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    six_spirit: Option<SixSpiritSection>,
    six_kin: Option<SixKinSection>,
    symbolic_stars: Option<SymbolicStarsSection>,
    calendar: Option<CalendarSection>,
}

#[derive(Debug, Default, Deserialize)]
struct SixSpiritSection {
    scheme: Option<SixSpiritScheme>,
}

#[derive(Debug, Default, Deserialize)]
struct SixKinSection {
    changed_palace: Option<ChangedKinPalace>,
}

#[derive(Debug, Default, Deserialize)]
struct SymbolicStarsSection {
    /// Built-in star labels to leave out of the default registry.
    #[serde(default)]
    disabled: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CalendarSection {
    utc_offset_minutes: Option<i32>,
}

impl RawConfig {
    fn resolve(self) -> Result<DivinationSettings, ConfigError> {
        let scheme = self
            .six_spirit
            .and_then(|section| section.scheme)
            .unwrap_or_default();
        let changed_palace = self
            .six_kin
            .and_then(|section| section.changed_palace)
            .unwrap_or_default();
        let disabled = self
            .symbolic_stars
            .map(|section| section.disabled)
            .unwrap_or_default()
            .iter()
            .map(|label| SymbolicStar::from_label(label))
            .collect::<Result<Vec<_>, _>>()?;
        let offset = match self.calendar.and_then(|section| section.utc_offset_minutes) {
            Some(minutes) => UtcOffsetMinutes::try_from(minutes)?,
            None => UtcOffsetMinutes::default(),
        };
        Ok(DivinationSettings::new(scheme, changed_palace, disabled, offset))
    }
}

/// Loads settings from the default location.
///
/// Returns `None` when there is no home directory or no config file. A file
/// that cannot be read or parsed is logged and also yields `None`.
#[must_use]
pub fn load() -> Option<DivinationSettings> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    match load_from(&path) {
        Ok(settings) => Some(settings),
        Err(ConfigError::Read { source, .. }) => {
            tracing::warn!("Failed to read config at {:?}: {}", path, source);
            None
        }
        Err(err) => {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
            None
        }
    }
}

pub fn load_from(path: &Path) -> Result<DivinationSettings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<DivinationSettings, ConfigError> {
    let raw: RawConfig = toml::from_str(content)?;
    raw.resolve()
}

/// `~/.liuyao/config.toml`, when a home directory is known.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".liuyao").join("config.toml"))
}
