//! Apparent positions of the chart bodies.
//!
//! The [`Ephemeris`] trait is the seam between chart calculation and the
//! astronomy backend. [`kepler::KeplerEphemeris`] is the shipped backend;
//! [`fixed::FixedEphemeris`] returns canned longitudes for tests.

pub mod fixed;
pub mod kepler;
pub mod time;

use std::fmt;

use chrono::NaiveDateTime;

/// Bodies that make up a chart, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Mars,
    Saturn,
}

/// Array of all chart bodies, in output order.
pub const CHART_BODIES: [Body; 5] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Mars,
    Body::Saturn,
];

impl Body {
    /// Lowercase key used in JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Mars => "mars",
            Body::Saturn => "saturn",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A place on Earth at a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub instant: NaiveDateTime,
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive.
    pub longitude_deg: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EphemerisError {
    /// The backend cannot evaluate this body.
    UnsupportedBody(Body),
    /// The observer is outside the range the backend can handle.
    InvalidObserver(String),
    /// The computation produced a non-finite value.
    NonFinite(Body),
}

impl fmt::Display for EphemerisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedBody(body) => write!(f, "no ephemeris data for {body}"),
            Self::InvalidObserver(msg) => write!(f, "invalid observer: {msg}"),
            Self::NonFinite(body) => write!(f, "position of {body} is not finite"),
        }
    }
}

impl std::error::Error for EphemerisError {}

/// Something that knows where the bodies are.
pub trait Ephemeris: Send + Sync {
    /// Apparent ecliptic longitude of `body` seen by `observer`, in radians,
    /// referred to the equinox of date.
    fn ecliptic_longitude(&self, body: Body, observer: &Observer) -> Result<f64, EphemerisError>;
}

/// Normalize an angle to [0, 360) degrees.
pub(crate) fn normalize_deg(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}
