//! Calendar conversion for six-line divination.
//!
//! Turns a civil instant into an [`InquiryTime`]: the instant itself, its
//! lunar date and the four stem-branch pillars.
//!
//! # Architecture
//!
//! - [`Calendar`]: the conversion seam the divination builder depends on
//! - [`AstronomicalCalendar`]: the default, computed from solar longitude
//!   and new moons
//! - [`FixedCalendar`]: hands back an already resolved time

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod astro;
mod inquiry;
mod lunar;

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use liuyao_types::settings::UtcOffsetMinutes;
use liuyao_types::{EarthlyBranch, HeavenlyStem, StemBranch};
use thiserror::Error;

pub use inquiry::{FourPillars, InquiryTime, LunarDate, LunarDateTime};

use crate::astro::{
    date_of_day_number, day_number, julian_day, solar_longitude, solar_term_jde, tt_to_ut,
    ut_to_tt,
};
use crate::lunar::Lunisolar;

/// Gregorian years the astronomical calendar accepts.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1901..=2099;

/// Solar longitude of the Beginning of Spring, which opens the Yin month.
const BEGINNING_OF_SPRING: f64 = 315.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("year {year} is outside the supported range 1901..=2099")]
    OutOfRange { year: i32 },
    #[error("day number {day} has no civil date")]
    InvalidDate { day: i64 },
}

/// Converts a civil instant into the reckonings a divination needs.
pub trait Calendar: Send + Sync {
    fn convert(&self, solar: DateTime<FixedOffset>) -> Result<InquiryTime, CalendarError>;
}

/// Returns the same pre-resolved time for every instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedCalendar(InquiryTime);

impl FixedCalendar {
    #[must_use]
    pub fn new(time: InquiryTime) -> Self {
        Self(time)
    }
}

impl Calendar for FixedCalendar {
    fn convert(&self, _solar: DateTime<FixedOffset>) -> Result<InquiryTime, CalendarError> {
        Ok(self.0)
    }
}

/// Lunisolar calendar computed from low-precision ephemerides.
///
/// Day and hour pillars follow the instant's own civil clock. Month starts
/// and solar terms are dated in the reference offset, China Standard Time
/// unless configured otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstronomicalCalendar {
    reference_offset: UtcOffsetMinutes,
}

impl AstronomicalCalendar {
    #[must_use]
    pub fn new(reference_offset: UtcOffsetMinutes) -> Self {
        Self { reference_offset }
    }

    #[must_use]
    pub fn reference_offset(&self) -> UtcOffsetMinutes {
        self.reference_offset
    }

    fn lunisolar(&self) -> Lunisolar {
        Lunisolar::new(self.reference_offset.minutes())
    }
}

impl Calendar for AstronomicalCalendar {
    fn convert(&self, solar: DateTime<FixedOffset>) -> Result<InquiryTime, CalendarError> {
        let local = solar.naive_local();
        let year = local.year();
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(CalendarError::OutOfRange { year });
        }

        let civil_day = day_number(local.date());
        let lunar_date = self.lunisolar().lunar_date(civil_day, year);

        let day = day_pillar(civil_day);
        let hour = hour_pillar(civil_day, local.hour())?;
        let month = month_pillar(julian_day(&solar), year);
        let year_pillar = StemBranch::from_cycle_index((lunar_date.year - 4).rem_euclid(60) as usize);

        let pillars = FourPillars {
            year: year_pillar,
            month,
            day,
            hour,
        };
        tracing::debug!(%solar, lunar = %lunar_date, %pillars, "Converted inquiry time");

        Ok(InquiryTime::new(
            solar,
            LunarDateTime {
                date: lunar_date,
                time: local.time(),
            },
            pillars,
        ))
    }
}

/// Day pillar of a civil day number; day number 2 433 191 (1949-10-01) is Jia-Zi.
fn day_pillar(day: i64) -> StemBranch {
    StemBranch::from_cycle_index((day + 49).rem_euclid(60) as usize)
}

/// Hour pillar by the five-rats rule. The Zi hour starting at 23:00 takes
/// its stem from the following day.
fn hour_pillar(day: i64, hour: u32) -> Result<StemBranch, CalendarError> {
    let branch = EarthlyBranch::from_index(((hour + 1) / 2) as usize);
    let stem_day = if hour == 23 {
        let next = day + 1;
        date_of_day_number(next).ok_or(CalendarError::InvalidDate { day: next })?;
        next
    } else {
        day
    };
    let day_stem = day_pillar(stem_day).stem;
    let stem = HeavenlyStem::from_index(day_stem.index() % 5 * 2 + branch.index());
    Ok(StemBranch::new(stem, branch))
}

/// Month pillar by solar longitude and the five-tigers rule. The stem
/// cycle restarts each year at the Beginning of Spring.
fn month_pillar(jd_ut: f64, civil_year: i32) -> StemBranch {
    let longitude = solar_longitude(ut_to_tt(jd_ut));
    let months_since_spring = ((longitude - BEGINNING_OF_SPRING).rem_euclid(360.0) / 30.0) as usize;

    let spring = tt_to_ut(solar_term_jde(civil_year, BEGINNING_OF_SPRING));
    let solar_year = if jd_ut >= spring {
        civil_year
    } else {
        civil_year - 1
    };
    let year_stem = HeavenlyStem::from_index((solar_year - 4).rem_euclid(10) as usize);

    let branch = EarthlyBranch::from_index(months_since_spring + 2);
    let stem = HeavenlyStem::from_index(year_stem.index() % 5 * 2 + 2 + months_since_spring);
    StemBranch::new(stem, branch)
}
