use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveTime};
use liuyao_types::{EarthlyBranch, HeavenlyStem, StemBranch};
use serde::Serialize;

/// A date in the Chinese lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LunarDate {
    pub year: i32,
    /// 1..=12. A leap month repeats the number of the month before it.
    pub month: u8,
    /// 1..=30.
    pub day: u8,
    pub is_leap: bool,
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leap = if self.is_leap { "leap " } else { "" };
        write!(f, "{}-{leap}{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Lunar date plus the civil time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LunarDateTime {
    pub date: LunarDate,
    pub time: NaiveTime,
}

/// Year, month, day and hour pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FourPillars {
    pub year: StemBranch,
    pub month: StemBranch,
    pub day: StemBranch,
    pub hour: StemBranch,
}

impl fmt::Display for FourPillars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

/// The moment a question was asked, in every reckoning the divination needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InquiryTime {
    solar: DateTime<FixedOffset>,
    lunar: LunarDateTime,
    pillars: FourPillars,
}

impl InquiryTime {
    #[must_use]
    pub fn new(solar: DateTime<FixedOffset>, lunar: LunarDateTime, pillars: FourPillars) -> Self {
        Self {
            solar,
            lunar,
            pillars,
        }
    }

    #[must_use]
    pub fn solar(&self) -> DateTime<FixedOffset> {
        self.solar
    }

    #[must_use]
    pub fn lunar(&self) -> LunarDateTime {
        self.lunar
    }

    #[must_use]
    pub fn pillars(&self) -> FourPillars {
        self.pillars
    }

    #[must_use]
    pub fn day_stem(&self) -> HeavenlyStem {
        self.pillars.day.stem
    }

    #[must_use]
    pub fn day_branch(&self) -> EarthlyBranch {
        self.pillars.day.branch
    }

    #[must_use]
    pub fn month_branch(&self) -> EarthlyBranch {
        self.pillars.month.branch
    }

    #[must_use]
    pub fn year_branch(&self) -> EarthlyBranch {
        self.pillars.year.branch
    }

    #[must_use]
    pub fn hour_branch(&self) -> EarthlyBranch {
        self.pillars.hour.branch
    }

    /// Branches left empty by the day pillar's decade.
    #[must_use]
    pub fn empty_branches(&self) -> [EarthlyBranch; 2] {
        self.pillars.day.empty_branches()
    }
}
