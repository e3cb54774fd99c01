use std::collections::HashMap;

use super::{Body, Ephemeris, EphemerisError, Observer};

/// An ephemeris with hard-coded longitudes, for tests.
///
/// Bodies without an entry report [`EphemerisError::UnsupportedBody`].
#[derive(Debug, Clone, Default)]
pub struct FixedEphemeris {
    longitudes_deg: HashMap<Body, f64>,
}

impl FixedEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a body's longitude in degrees.
    pub fn with(mut self, body: Body, lon_deg: f64) -> Self {
        self.longitudes_deg.insert(body, lon_deg);
        self
    }
}

impl Ephemeris for FixedEphemeris {
    fn ecliptic_longitude(&self, body: Body, _observer: &Observer) -> Result<f64, EphemerisError> {
        self.longitudes_deg
            .get(&body)
            .map(|deg| deg.to_radians())
            .ok_or(EphemerisError::UnsupportedBody(body))
    }
}
