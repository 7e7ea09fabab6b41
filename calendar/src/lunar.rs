//! Lunisolar month reckoning.
//!
//! A lunar month runs from the civil day of one new moon to the day before
//! the next. Month 11 is the month holding the winter solstice. When
//! thirteen months separate two consecutive month-11 starts, the first of
//! them without a major solar term (a multiple of 30° of solar longitude)
//! is the leap month and repeats the previous month's number.

use crate::astro::{
    local_day_number, nearest_lunation, new_moon_jde, solar_longitude, solar_term_jde, tt_to_ut,
    ut_to_tt,
};
use crate::inquiry::LunarDate;

/// Solar longitude of the winter solstice.
const WINTER_SOLSTICE: f64 = 270.0;

/// Computes lunar dates with month boundaries in a fixed civil offset.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lunisolar {
    offset_days: f64,
}

impl Lunisolar {
    pub(crate) fn new(offset_minutes: i32) -> Self {
        Self {
            offset_days: f64::from(offset_minutes) / 1_440.0,
        }
    }

    /// Day number of the new moon with lunation number `k`.
    fn new_moon_day(self, k: i64) -> i64 {
        local_day_number(tt_to_ut(new_moon_jde(k)), self.offset_days)
    }

    /// Lunation and day number of the last new moon falling on or before `day`.
    fn new_moon_on_or_before(self, day: i64) -> (i64, i64) {
        let mut k = nearest_lunation(day as f64);
        while self.new_moon_day(k) > day {
            k -= 1;
        }
        while self.new_moon_day(k + 1) <= day {
            k += 1;
        }
        (k, self.new_moon_day(k))
    }

    /// Lunation and start day of the month holding the winter solstice of `year`.
    fn month_eleven(self, year: i32) -> (i64, i64) {
        let solstice = tt_to_ut(solar_term_jde(year, WINTER_SOLSTICE));
        self.new_moon_on_or_before(local_day_number(solstice, self.offset_days))
    }

    /// Solar longitude at the civil midnight opening `day`.
    fn longitude_at_day_start(self, day: i64) -> f64 {
        let jd_ut = day as f64 - 0.5 - self.offset_days;
        solar_longitude(ut_to_tt(jd_ut))
    }

    /// Whether a major solar term falls in the days `start..end`.
    fn has_major_term(self, start: i64, end: i64) -> bool {
        let sector = |day| (self.longitude_at_day_start(day) / 30.0).floor() as i64;
        sector(start) != sector(end)
    }

    /// Lunar date of the civil day `day` (a Julian day number) in Gregorian `year`.
    pub(crate) fn lunar_date(self, day: i64, year: i32) -> LunarDate {
        let (this_k, this_start) = self.month_eleven(year);
        let (solstice_year, first_k, end) = if day >= this_start {
            (year, this_k, self.month_eleven(year + 1).1)
        } else {
            (year - 1, self.month_eleven(year - 1).0, this_start)
        };

        let mut starts = Vec::with_capacity(13);
        let mut k = first_k;
        loop {
            let start = self.new_moon_day(k);
            if start >= end {
                break;
            }
            starts.push(start);
            k += 1;
        }

        let bound = |index: usize| starts.get(index + 1).copied().unwrap_or(end);
        let leap = if starts.len() == 13 {
            (1..starts.len()).find(|&index| !self.has_major_term(starts[index], bound(index)))
        } else {
            None
        };
        if let Some(index) = leap {
            tracing::trace!(solstice_year, index, "Leap month in lunar year");
        }

        let index = starts.iter().rposition(|&start| start <= day).unwrap_or(0);
        let (month, is_leap) = month_number(index, leap);
        let first_month = (0..starts.len())
            .find(|&i| month_number(i, leap) == (1, false))
            .unwrap_or(2);
        let lunar_year = if index < first_month {
            solstice_year
        } else {
            solstice_year + 1
        };

        LunarDate {
            year: lunar_year,
            month,
            day: (day - starts[index] + 1) as u8,
            is_leap,
        }
    }
}

/// Month number and leap flag of the month at `index`, counted from month 11.
fn month_number(index: usize, leap: Option<usize>) -> (u8, bool) {
    let (ordinal, is_leap) = match leap {
        Some(leap) if index >= leap => (index - 1, index == leap),
        _ => (index, false),
    };
    (((ordinal + 10) % 12 + 1) as u8, is_leap)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::astro::day_number;

    fn lunar(year: i32, month: u32, day: u32) -> LunarDate {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        Lunisolar::new(480).lunar_date(day_number(date), year)
    }

    fn expect(date: LunarDate, year: i32, month: u8, day: u8, is_leap: bool) {
        assert_eq!(
            date,
            LunarDate {
                year,
                month,
                day,
                is_leap
            }
        );
    }

    #[test]
    fn month_numbers_start_at_eleven() {
        assert_eq!(month_number(0, None), (11, false));
        assert_eq!(month_number(1, None), (12, false));
        assert_eq!(month_number(2, None), (1, false));
        assert_eq!(month_number(12, None), (11, false));
        assert_eq!(month_number(4, Some(4)), (2, true));
        assert_eq!(month_number(5, Some(4)), (3, false));
    }

    #[test]
    fn new_year_2024() {
        expect(lunar(2024, 1, 1), 2023, 11, 20, false);
        expect(lunar(2024, 2, 9), 2023, 12, 30, false);
        expect(lunar(2024, 2, 10), 2024, 1, 1, false);
    }

    #[test]
    fn leap_second_month_of_2023() {
        expect(lunar(2023, 3, 21), 2023, 2, 30, false);
        expect(lunar(2023, 4, 1), 2023, 2, 11, true);
        expect(lunar(2023, 5, 1), 2023, 3, 12, false);
    }

    #[test]
    fn mid_autumn_2000() {
        expect(lunar(2000, 9, 12), 2000, 8, 15, false);
    }
}
