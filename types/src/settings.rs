//! Resolved configuration types shared across crates.
//!
//! Raw TOML deserialization structs stay private in `liuyao-config`. The
//! config loader resolves them into these types at the parse boundary, so a
//! `DivinationSettings` value is always valid.

use serde::Deserialize;
use thiserror::Error;

use crate::{Element, HeavenlyStem, SixSpirit, SymbolicStar};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("UTC offset of {minutes} minutes is outside -720..=840")]
    OffsetOutOfRange { minutes: i32 },
}

/// How the day stem picks the spirit on the first line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SixSpiritScheme {
    /// Jia/Yi Azure Dragon, Bing/Ding Vermilion Bird, Wu Hook Chen,
    /// Ji Coiled Snake, Geng/Xin White Tiger, Ren/Gui Black Tortoise.
    #[default]
    Traditional,
    /// Stems grouped in five pairs; Wu/Ji share Hook Chen, Geng/Xin start at
    /// Coiled Snake and Ren/Gui at White Tiger.
    Paired,
}

impl SixSpiritScheme {
    /// Offset into the spirit cycle for the first line.
    #[must_use]
    pub fn start_offset(self, day_stem: HeavenlyStem) -> usize {
        let index = day_stem.index();
        match self {
            Self::Traditional => match day_stem {
                HeavenlyStem::Jia | HeavenlyStem::Yi => 0,
                HeavenlyStem::Bing | HeavenlyStem::Ding => 1,
                HeavenlyStem::Wu => 2,
                HeavenlyStem::Ji => 3,
                HeavenlyStem::Geng | HeavenlyStem::Xin => 4,
                HeavenlyStem::Ren | HeavenlyStem::Gui => 5,
            },
            Self::Paired => index / 2,
        }
    }

    #[must_use]
    pub fn first_spirit(self, day_stem: HeavenlyStem) -> SixSpirit {
        SixSpirit::ALL[self.start_offset(day_stem)]
    }
}

/// Which palace the changed hexagram's lines are classified against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangedKinPalace {
    /// The original hexagram's palace phase.
    #[default]
    Original,
    /// The changed hexagram's own palace phase.
    Own,
}

/// Offset from UTC, in minutes, used for calendar day boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffsetMinutes(i32);

impl UtcOffsetMinutes {
    /// China Standard Time.
    pub const CHINA_STANDARD: Self = Self(480);

    #[must_use]
    pub fn minutes(self) -> i32 {
        self.0
    }
}

impl Default for UtcOffsetMinutes {
    fn default() -> Self {
        Self::CHINA_STANDARD
    }
}

impl TryFrom<i32> for UtcOffsetMinutes {
    type Error = SettingsError;

    fn try_from(minutes: i32) -> Result<Self, Self::Error> {
        if (-720..=840).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(SettingsError::OffsetOutOfRange { minutes })
        }
    }
}

/// Fully resolved divination settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivinationSettings {
    six_spirit_scheme: SixSpiritScheme,
    changed_kin_palace: ChangedKinPalace,
    disabled_stars: Vec<SymbolicStar>,
    calendar_offset: UtcOffsetMinutes,
}

impl DivinationSettings {
    #[must_use]
    pub fn new(
        six_spirit_scheme: SixSpiritScheme,
        changed_kin_palace: ChangedKinPalace,
        disabled_stars: Vec<SymbolicStar>,
        calendar_offset: UtcOffsetMinutes,
    ) -> Self {
        Self {
            six_spirit_scheme,
            changed_kin_palace,
            disabled_stars,
            calendar_offset,
        }
    }

    #[must_use]
    pub fn six_spirit_scheme(&self) -> SixSpiritScheme {
        self.six_spirit_scheme
    }

    #[must_use]
    pub fn changed_kin_palace(&self) -> ChangedKinPalace {
        self.changed_kin_palace
    }

    #[must_use]
    pub fn disabled_stars(&self) -> &[SymbolicStar] {
        &self.disabled_stars
    }

    #[must_use]
    pub fn calendar_offset(&self) -> UtcOffsetMinutes {
        self.calendar_offset
    }
}
