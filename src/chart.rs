//! Birth chart calculation: parse the query strings, place the five chart
//! bodies, and map each onto its sign.
//!
//! Accepted input:
//! - date: `Y-M-D` or `Y/M/D`, one separator kind, leading zeros optional
//! - time: `H:M` or `H:M:S` (seconds may be fractional), UTC; blank is midnight
//! - coordinates: decimal degrees or `D:M[:S]`, east and north positive

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use log::debug;

use crate::ephemeris::{Body, CHART_BODIES, Ephemeris, EphemerisError, Observer};
use crate::locale::Locale;
use crate::zodiac::Sign;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    InvalidDate {
        input: String,
        reason: &'static str,
    },
    InvalidTime {
        input: String,
        reason: &'static str,
    },
    InvalidCoordinate {
        field: &'static str,
        input: String,
        reason: &'static str,
    },
    Ephemeris(EphemerisError),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate { input, reason } => write!(f, "invalid date {input:?}: {reason}"),
            Self::InvalidTime { input, reason } => write!(f, "invalid time {input:?}: {reason}"),
            Self::InvalidCoordinate {
                field,
                input,
                reason,
            } => write!(f, "invalid {field} {input:?}: {reason}"),
            Self::Ephemeris(err) => write!(f, "ephemeris failed: {err}"),
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ephemeris(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EphemerisError> for ChartError {
    fn from(err: EphemerisError) -> Self {
        Self::Ephemeris(err)
    }
}

/// Sign placements of the five chart bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chart {
    pub sun: Sign,
    pub moon: Sign,
    pub mercury: Sign,
    pub mars: Sign,
    pub saturn: Sign,
}

impl Chart {
    pub fn get(&self, body: Body) -> Sign {
        match body {
            Body::Sun => self.sun,
            Body::Moon => self.moon,
            Body::Mercury => self.mercury,
            Body::Mars => self.mars,
            Body::Saturn => self.saturn,
        }
    }

    /// Placements in output order.
    pub fn placements(&self) -> [(Body, Sign); 5] {
        CHART_BODIES.map(|body| (body, self.get(body)))
    }

    /// Compact one-line description, e.g. `sun=Cancer moon=Scorpio ...`.
    pub fn summary(&self, locale: Locale) -> String {
        self.placements()
            .iter()
            .map(|(body, sign)| format!("{}={}", body, sign.name(locale)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Place the chart bodies for a birth date, time, and location.
pub fn calculate(
    ephemeris: &dyn Ephemeris,
    date: &str,
    time: &str,
    latitude: &str,
    longitude: &str,
) -> Result<Chart, ChartError> {
    let observer = observer_for(date, time, latitude, longitude)?;
    debug!(
        "observer at {} UTC, lat {:.4}, lon {:.4}",
        observer.instant, observer.latitude_deg, observer.longitude_deg
    );

    let sign_of = |body: Body| -> Result<Sign, ChartError> {
        let lon = ephemeris.ecliptic_longitude(body, &observer)?;
        Ok(Sign::from_longitude(lon))
    };

    Ok(Chart {
        sun: sign_of(Body::Sun)?,
        moon: sign_of(Body::Moon)?,
        mercury: sign_of(Body::Mercury)?,
        mars: sign_of(Body::Mars)?,
        saturn: sign_of(Body::Saturn)?,
    })
}

/// Build an observer from the raw query strings.
pub fn observer_for(
    date: &str,
    time: &str,
    latitude: &str,
    longitude: &str,
) -> Result<Observer, ChartError> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    let latitude_deg = parse_angle("latitude", latitude)?;
    let longitude_deg = parse_angle("longitude", longitude)?;

    if !(-90.0..=90.0).contains(&latitude_deg) {
        return Err(ChartError::InvalidCoordinate {
            field: "latitude",
            input: latitude.to_string(),
            reason: "must be between -90 and 90 degrees",
        });
    }

    Ok(Observer {
        instant: date.and_time(time),
        latitude_deg,
        longitude_deg,
    })
}

/// Parse `Y-M-D` or `Y/M/D`. Leading zeros are optional in every component.
pub fn parse_date(input: &str) -> Result<NaiveDate, ChartError> {
    let err = |reason| ChartError::InvalidDate {
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    let separator = match (trimmed.contains('-'), trimmed.contains('/')) {
        (true, false) => '-',
        (false, true) => '/',
        (true, true) => return Err(err("mixed '-' and '/' separators")),
        (false, false) => return Err(err("expected YYYY-MM-DD or YYYY/MM/DD")),
    };

    let parts: Vec<&str> = trimmed.split(separator).collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(err("expected year, month, and day"));
    };

    let year: i32 = parse_digits(year).ok_or_else(|| err("year is not a number"))?;
    let month: u32 = parse_digits(month).ok_or_else(|| err("month is not a number"))?;
    let day: u32 = parse_digits(day).ok_or_else(|| err("day is not a number"))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| err("no such calendar day"))
}

/// Parse `H:M` or `H:M:S`; blank input means midnight.
pub fn parse_time(input: &str) -> Result<NaiveTime, ChartError> {
    let err = |reason| ChartError::InvalidTime {
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(NaiveTime::MIN);
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    let (hour, minute, second) = match parts.as_slice() {
        [h, m] => (*h, *m, None),
        [h, m, s] => (*h, *m, Some(*s)),
        _ => return Err(err("expected HH:MM or HH:MM:SS")),
    };

    let hour: u32 = parse_digits(hour).ok_or_else(|| err("hour is not a number"))?;
    let minute: u32 = parse_digits(minute).ok_or_else(|| err("minute is not a number"))?;
    let seconds = match second {
        Some(s) => parse_unsigned_decimal(s).ok_or_else(|| err("second is not a number"))?,
        None => 0.0,
    };

    if hour > 23 || minute > 59 || seconds >= 60.0 {
        return Err(err("out of range"));
    }

    let whole = seconds.trunc() as u32;
    let nanos = ((seconds - seconds.trunc()) * 1e9).round().min(999_999_999.0) as u32;
    NaiveTime::from_hms_nano_opt(hour, minute, whole, nanos).ok_or_else(|| err("out of range"))
}

/// Parse an angle as decimal degrees (`-73.98`) or sexagesimal (`41:00:30`).
pub fn parse_angle(field: &'static str, input: &str) -> Result<f64, ChartError> {
    let err = |reason| ChartError::InvalidCoordinate {
        field,
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(err("empty"));
    }

    if !trimmed.contains(':') {
        return match trimmed.parse::<f64>() {
            Ok(deg) if deg.is_finite() => Ok(deg),
            _ => Err(err("not a number")),
        };
    }

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let parts: Vec<&str> = body.split(':').collect();
    if parts.len() > 3 {
        return Err(err("expected D:M or D:M:S"));
    }

    let mut degrees = 0.0;
    for (i, part) in parts.iter().enumerate() {
        let value = parse_unsigned_decimal(part).ok_or_else(|| err("not a number"))?;
        if i > 0 && value >= 60.0 {
            return Err(err("minutes and seconds must be below 60"));
        }
        degrees += value / 60f64.powi(i as i32);
    }

    Ok(if negative { -degrees } else { degrees })
}

/// A non-empty run of ASCII digits. Rejects signs and whitespace that
/// `str::parse` would otherwise let through.
fn parse_digits<T: std::str::FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Digits with an optional fractional part, e.g. `30` or `30.5`.
fn parse_unsigned_decimal(s: &str) -> Option<f64> {
    let (int, frac) = s.split_once('.').unwrap_or((s, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !digits_only(int) || !digits_only(frac) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::fixed::FixedEphemeris;

    fn all_bodies() -> FixedEphemeris {
        FixedEphemeris::new()
            .with(Body::Sun, 117.3)
            .with(Body::Moon, 229.6)
            .with(Body::Mercury, 143.8)
            .with(Body::Mars, 153.1)
            .with(Body::Saturn, 304.0)
    }

    #[test]
    fn dash_and_slash_dates_agree() {
        let expected = NaiveDate::from_ymd_opt(1991, 7, 20).unwrap();
        assert_eq!(parse_date("1991-07-20").unwrap(), expected);
        assert_eq!(parse_date("1991/07/20").unwrap(), expected);
        assert_eq!(parse_date("1991/7/20").unwrap(), expected);
        assert_eq!(parse_date(" 1991-7-020 ").unwrap(), expected);
    }

    #[test]
    fn non_numeric_date_is_rejected() {
        let err = parse_date("19a1-07-20").unwrap_err();
        assert!(matches!(err, ChartError::InvalidDate { .. }));
        assert!(err.to_string().contains("year"));
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert!(parse_date("1991-02-30").is_err());
        assert!(parse_date("1991-13-01").is_err());
        assert!(parse_date("1991-07").is_err());
        assert!(parse_date("1991-07-20-01").is_err());
        assert!(parse_date("1991-07/20").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("20.07.1991").is_err());
        assert!(parse_date("1991--20").is_err());
        assert!(parse_date("1991-+7-20").is_err());
    }

    #[test]
    fn leap_day_is_accepted() {
        assert!(parse_date("2000-02-29").is_ok());
        assert!(parse_date("1900-02-29").is_err());
    }

    #[test]
    fn time_formats() {
        assert_eq!(
            parse_time("12:00").unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("7:5:9").unwrap(),
            NaiveTime::from_hms_opt(7, 5, 9).unwrap()
        );
        assert_eq!(
            parse_time("23:59:30.5").unwrap(),
            NaiveTime::from_hms_milli_opt(23, 59, 30, 500).unwrap()
        );
        assert_eq!(parse_time("  ").unwrap(), NaiveTime::MIN);
    }

    #[test]
    fn bad_times_are_rejected() {
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("12:60").is_err());
        assert!(parse_time("12").is_err());
        assert!(parse_time("noon").is_err());
        assert!(parse_time("12:00:60").is_err());
        assert!(parse_time("-1:00").is_err());
    }

    #[test]
    fn decimal_and_sexagesimal_angles() {
        assert_eq!(parse_angle("latitude", "41.0").unwrap(), 41.0);
        assert_eq!(parse_angle("longitude", " -73.5 ").unwrap(), -73.5);
        assert!((parse_angle("latitude", "41:30").unwrap() - 41.5).abs() < 1e-12);
        assert!((parse_angle("latitude", "-0:30:36").unwrap() + 0.51).abs() < 1e-12);
        assert!((parse_angle("latitude", "+10:0:0").unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn bad_angles_are_rejected() {
        for input in ["", "north", "NaN", "inf", "41:60", "41:1:2:3", "41:-5", "1e999"] {
            assert!(parse_angle("latitude", input).is_err(), "{input:?} accepted");
        }
    }

    #[test]
    fn latitude_out_of_range_is_rejected() {
        let err = observer_for("1991-07-20", "12:00", "91", "29").unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidCoordinate {
                field: "latitude",
                ..
            }
        ));
    }

    #[test]
    fn chart_has_all_five_bodies() {
        let chart = calculate(&all_bodies(), "1991-07-20", "12:00", "41.0", "29.0").unwrap();
        assert_eq!(chart.sun, Sign::Cancer);
        assert_eq!(chart.moon, Sign::Scorpio);
        assert_eq!(chart.mercury, Sign::Leo);
        assert_eq!(chart.mars, Sign::Virgo);
        assert_eq!(chart.saturn, Sign::Aquarius);

        let bodies: Vec<_> = chart.placements().iter().map(|(b, _)| b.key()).collect();
        assert_eq!(bodies, ["sun", "moon", "mercury", "mars", "saturn"]);
    }

    #[test]
    fn malformed_date_is_an_error_not_a_panic() {
        let err = calculate(&all_bodies(), "yesterday", "12:00", "41.0", "29.0").unwrap_err();
        assert!(matches!(err, ChartError::InvalidDate { .. }));
    }

    #[test]
    fn ephemeris_failure_is_reported() {
        let partial = FixedEphemeris::new().with(Body::Sun, 10.0);
        let err = calculate(&partial, "1991-07-20", "12:00", "41.0", "29.0").unwrap_err();
        assert_eq!(
            err,
            ChartError::Ephemeris(EphemerisError::UnsupportedBody(Body::Moon))
        );
        assert!(err.to_string().contains("moon"));
    }

    #[test]
    fn summary_uses_locale() {
        let chart = calculate(&all_bodies(), "1991-07-20", "12:00", "41.0", "29.0").unwrap();
        assert!(chart.summary(Locale::En).starts_with("sun=Cancer moon=Scorpio"));
        assert!(chart.summary(Locale::Tr).starts_with("sun=Yengeç moon=Akrep"));
    }
}
