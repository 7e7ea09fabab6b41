//! Low-precision solar and lunar ephemeris.
//!
//! Apparent solar longitude uses the low-accuracy solar series (about 0.01°).
//! New moons use the mean lunation with the principal periodic terms, which
//! is good to a few minutes over the supported range. Both work in
//! Terrestrial Time; `delta_t_days` bridges to Universal Time.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

/// Julian day of J2000.0.
pub(crate) const J2000: f64 = 2_451_545.0;

/// Julian day of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Days in a tropical year.
const TROPICAL_YEAR: f64 = 365.242_2;

/// Days in a mean synodic month.
pub(crate) const SYNODIC_MONTH: f64 = 29.530_588_861;

/// Julian day number of 0001-01-01 minus one.
const CE_JDN_OFFSET: i64 = 1_721_425;

/// Julian day (UT) of an instant.
pub(crate) fn julian_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    let seconds = instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
    seconds / 86_400.0 + UNIX_EPOCH_JD
}

/// Julian day number of a civil date.
pub(crate) fn day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + CE_JDN_OFFSET
}

/// Civil date of a Julian day number.
pub(crate) fn date_of_day_number(day: i64) -> Option<NaiveDate> {
    i32::try_from(day - CE_JDN_OFFSET)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// The civil day (as a day number) an instant falls on at `offset_days` from UT.
pub(crate) fn local_day_number(jd_ut: f64, offset_days: f64) -> i64 {
    (jd_ut + 0.5 + offset_days).floor() as i64
}

/// Decimal year of a Julian day, close enough for ΔT.
fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000) / 365.25
}

/// ΔT = TT − UT in seconds, from the Espenak-Meeus polynomials.
fn delta_t_seconds(year: f64) -> f64 {
    match year {
        y if y < 1900.0 => {
            let u = (y - 1820.0) / 100.0;
            -20.0 + 32.0 * u * u
        }
        y if y < 1920.0 => {
            let t = y - 1900.0;
            -2.79 + 1.494_119 * t - 0.059_893_9 * t.powi(2) + 0.006_196_6 * t.powi(3)
                - 0.000_197 * t.powi(4)
        }
        y if y < 1941.0 => {
            let t = y - 1920.0;
            21.20 + 0.844_93 * t - 0.076_100 * t.powi(2) + 0.002_093_6 * t.powi(3)
        }
        y if y < 1961.0 => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if y < 1986.0 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if y < 2005.0 => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060_374 * t.powi(2)
                + 0.001_727_5 * t.powi(3)
                + 0.000_651_814 * t.powi(4)
                + 0.000_023_735_99 * t.powi(5)
        }
        y if y < 2050.0 => {
            let t = y - 2000.0;
            62.92 + 0.322_17 * t + 0.005_589 * t.powi(2)
        }
        y => {
            let u = (y - 1820.0) / 100.0;
            -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
        }
    }
}

pub(crate) fn delta_t_days(jd: f64) -> f64 {
    delta_t_seconds(decimal_year(jd)) / 86_400.0
}

pub(crate) fn ut_to_tt(jd_ut: f64) -> f64 {
    jd_ut + delta_t_days(jd_ut)
}

pub(crate) fn tt_to_ut(jde: f64) -> f64 {
    jde - delta_t_days(jde)
}

pub(crate) fn normalize_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

fn normalize_to_pm180(angle: f64) -> f64 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Apparent geocentric longitude of the sun, in degrees, at `jde` (TT).
pub(crate) fn solar_longitude(jde: f64) -> f64 {
    let t = (jde - J2000) / 36_525.0;
    let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let anomaly = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * anomaly.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * anomaly).sin()
        + 0.000_289 * (3.0 * anomaly).sin();
    let node = (125.04 - 1_934.136 * t).to_radians();
    normalize_degrees(mean_longitude + center - 0.005_69 - 0.004_78 * node.sin())
}

/// The moment (TT) in Gregorian `year` at which the sun's apparent
/// longitude reaches `longitude` degrees.
pub(crate) fn solar_term_jde(year: i32, longitude: f64) -> f64 {
    // On 1 January the sun stands near 280°.
    let january_first = NaiveDate::from_ymd_opt(year, 1, 1).map_or_else(
        || J2000 + f64::from(year - 2000) * TROPICAL_YEAR,
        |date| day_number(date) as f64 - 0.5,
    );
    let mut jde = january_first + (longitude - 280.0).rem_euclid(360.0) / 360.0 * TROPICAL_YEAR;
    for _ in 0..50 {
        let delta = normalize_to_pm180(longitude - solar_longitude(jde));
        jde += delta / 360.0 * TROPICAL_YEAR;
        if delta.abs() < 1e-7 {
            break;
        }
    }
    jde
}

/// The moment (TT) of the new moon with lunation number `k`, counted from
/// the new moon of 6 January 2000.
pub(crate) fn new_moon_jde(k: i64) -> f64 {
    let k = k as f64;
    let t = k / 1_236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = 2_451_550.097_66 + SYNODIC_MONTH * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let sun = (2.553_4 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3).to_radians();
    let moon = (201.564_3 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    let lat = (160.710_8 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    let node = (124.774_6 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3).to_radians();

    let correction = -0.407_20 * moon.sin() + 0.172_41 * e * sun.sin()
        + 0.016_08 * (2.0 * moon).sin()
        + 0.010_39 * (2.0 * lat).sin()
        + 0.007_39 * e * (moon - sun).sin()
        - 0.005_14 * e * (moon + sun).sin()
        + 0.002_08 * e * e * (2.0 * sun).sin()
        - 0.001_11 * (moon - 2.0 * lat).sin()
        - 0.000_57 * (moon + 2.0 * lat).sin()
        + 0.000_56 * e * (2.0 * moon + sun).sin()
        - 0.000_42 * (3.0 * moon).sin()
        + 0.000_42 * e * (sun + 2.0 * lat).sin()
        + 0.000_38 * e * (sun - 2.0 * lat).sin()
        - 0.000_24 * e * (2.0 * moon - sun).sin()
        - 0.000_17 * node.sin()
        - 0.000_07 * (moon + 2.0 * sun).sin()
        + 0.000_04 * (2.0 * moon - 2.0 * lat).sin()
        + 0.000_04 * (3.0 * sun).sin()
        + 0.000_04 * (moon + sun - 2.0 * lat).sin()
        + 0.000_03 * (2.0 * moon + 2.0 * lat).sin()
        - 0.000_03 * (moon + sun + 2.0 * lat).sin()
        + 0.000_03 * (moon - sun + 2.0 * lat).sin()
        - 0.000_02 * (moon - sun - 2.0 * lat).sin()
        - 0.000_02 * (3.0 * moon + sun).sin()
        + 0.000_02 * (4.0 * moon).sin();

    mean + correction
}

/// Lunation number whose mean new moon lies nearest `jd`.
pub(crate) fn nearest_lunation(jd: f64) -> i64 {
    ((jd - 2_451_550.097_66) / SYNODIC_MONTH).round() as i64
}
