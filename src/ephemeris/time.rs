//! Julian dates and sidereal time for UTC instants.
//!
//! Universal time is used in place of terrestrial time. The difference
//! (about a minute) is far below what a 30° sign band can resolve.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of 1999-12-31 00:00, day zero of the orbital element tables.
pub const ELEMENT_EPOCH_JD: f64 = 2_451_543.5;

/// Convert a Gregorian calendar date with fractional day to a Julian Date.
///
/// Meeus, *Astronomical Algorithms* (2nd ed.), Chapter 7.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let y = f64::from(y);
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * f64::from(m + 1)).floor() + day + b - 1524.5
}

/// Julian Date of a UTC instant.
pub fn jd_from_datetime(instant: &NaiveDateTime) -> f64 {
    calendar_to_jd(
        instant.year(),
        instant.month(),
        f64::from(instant.day()) + ut_hours(instant) / 24.0,
    )
}

/// Days since [`ELEMENT_EPOCH_JD`].
pub fn element_day(instant: &NaiveDateTime) -> f64 {
    jd_from_datetime(instant) - ELEMENT_EPOCH_JD
}

/// Universal time of day in hours, including fractional seconds.
pub fn ut_hours(instant: &NaiveDateTime) -> f64 {
    f64::from(instant.hour())
        + f64::from(instant.minute()) / 60.0
        + (f64::from(instant.second()) + f64::from(instant.nanosecond()) / 1e9) / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn j2000_epoch() {
        assert_eq!(jd_from_datetime(&at(2000, 1, 1, 12, 0)), J2000_JD);
    }

    #[test]
    fn meeus_example_sputnik() {
        // Meeus example 7.a: 1957 Oct 4.81 = JD 2436116.31
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-6);
    }

    #[test]
    fn january_and_february_roll_back_a_year() {
        // Meeus, table in chapter 7: 1987 Jan 27.0 = JD 2446822.5
        let jd = calendar_to_jd(1987, 1, 27.0);
        assert!((jd - 2_446_822.5).abs() < 1e-6);
    }

    #[test]
    fn element_day_zero() {
        assert_eq!(element_day(&at(1999, 12, 31, 0, 0)), 0.0);
        assert_eq!(element_day(&at(2000, 1, 1, 12, 0)), 1.5);
    }

    #[test]
    fn fractional_seconds_reach_hours_and_julian_day() {
        let instant = NaiveDate::from_ymd_opt(1991, 7, 20)
            .unwrap()
            .and_hms_milli_opt(12, 0, 1, 800)
            .unwrap();
        let hours = ut_hours(&instant);
        assert!((hours - (12.0 + 1.8 / 3600.0)).abs() < 1e-12);

        let midnight_jd = jd_from_datetime(&at(1991, 7, 20, 0, 0));
        assert!((jd_from_datetime(&instant) - midnight_jd - hours / 24.0).abs() < 1e-9);
    }

    #[test]
    fn ut_hours_includes_minutes() {
        assert!((ut_hours(&at(1991, 7, 20, 12, 30)) - 12.5).abs() < 1e-12);
    }
}
