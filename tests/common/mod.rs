//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use chrono::{DateTime, FixedOffset, TimeZone};
use liuyao_calendar::{AstronomicalCalendar, Calendar, InquiryTime};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a captured fmt subscriber once per test binary. `RUST_LOG`
/// overrides the default `warn` filter.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// 2024-01-01 12:00 UTC: a Jia-Zi day in a Jia-Zi month.
pub fn jia_zi_noon() -> DateTime<FixedOffset> {
    at(0, (2024, 1, 1), (12, 0, 0))
}

/// 2024-01-06 12:00 UTC: a Ji-Si day.
pub fn ji_si_noon() -> DateTime<FixedOffset> {
    at(0, (2024, 1, 6), (12, 0, 0))
}

pub fn at(offset_hours: i32, ymd: (i32, u32, u32), hms: (u32, u32, u32)) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .unwrap()
        .with_ymd_and_hms(ymd.0, ymd.1, ymd.2, hms.0, hms.1, hms.2)
        .unwrap()
}

/// The inquiry time of [`jia_zi_noon`], resolved by the default calendar.
pub fn jia_zi_time() -> InquiryTime {
    AstronomicalCalendar::default()
        .convert(jia_zi_noon())
        .unwrap()
}
