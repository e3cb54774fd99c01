//! The twelve tropical signs and the longitude → sign mapping.
//!
//! Signs are fixed 30° bands starting at the vernal equinox. The mapping is
//! `floor(degrees / 30) mod 12` with Euclidean modulo, so negative and
//! over-range longitudes land in the same band as their normalized value.

use std::fmt;

use crate::locale::Locale;

/// Width of one sign in degrees.
pub const SIGN_WIDTH_DEG: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All signs in ecliptic order, starting at 0°.
pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    /// Sign containing an ecliptic longitude given in radians.
    pub fn from_longitude(lon_rad: f64) -> Self {
        Self::from_degrees(lon_rad.to_degrees())
    }

    /// Sign containing an ecliptic longitude given in degrees.
    pub fn from_degrees(lon_deg: f64) -> Self {
        let band = (lon_deg / SIGN_WIDTH_DEG).floor();
        // rem_euclid keeps negative bands in 0..12; NaN falls through to 0.
        let index = band.rem_euclid(12.0) as usize;
        ALL_SIGNS[index.min(11)]
    }

    pub fn name(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.english(),
            Locale::Tr => self.turkish(),
        }
    }

    pub fn english(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    pub fn turkish(self) -> &'static str {
        match self {
            Sign::Aries => "Koç",
            Sign::Taurus => "Boğa",
            Sign::Gemini => "İkizler",
            Sign::Cancer => "Yengeç",
            Sign::Leo => "Aslan",
            Sign::Virgo => "Başak",
            Sign::Libra => "Terazi",
            Sign::Scorpio => "Akrep",
            Sign::Sagittarius => "Yay",
            Sign::Capricorn => "Oğlak",
            Sign::Aquarius => "Kova",
            Sign::Pisces => "Balık",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_aries() {
        assert_eq!(Sign::from_degrees(0.0), Sign::Aries);
    }

    #[test]
    fn just_below_boundary_stays_in_band() {
        assert_eq!(Sign::from_degrees(29.999), Sign::Aries);
        assert_eq!(Sign::from_degrees(359.999), Sign::Pisces);
    }

    #[test]
    fn boundary_starts_next_sign() {
        assert_eq!(Sign::from_degrees(30.0), Sign::Taurus);
        assert_eq!(Sign::from_degrees(90.0), Sign::Cancer);
    }

    #[test]
    fn full_circle_wraps_to_aries() {
        assert_eq!(Sign::from_degrees(360.0), Sign::Aries);
        assert_eq!(Sign::from_degrees(725.0), Sign::Aries);
    }

    #[test]
    fn negative_uses_floor_not_truncation() {
        assert_eq!(Sign::from_degrees(-10.0), Sign::Pisces);
        assert_eq!(Sign::from_degrees(-0.001), Sign::Pisces);
        assert_eq!(Sign::from_degrees(-30.0), Sign::Pisces);
        assert_eq!(Sign::from_degrees(-30.001), Sign::Aquarius);
        assert_eq!(Sign::from_degrees(-360.0), Sign::Aries);
    }

    #[test]
    fn radians_are_converted() {
        // 0.5 rad ≈ 28.6°, 3.5 rad ≈ 200.5°, -0.1 rad ≈ -5.7°, 7.0 rad ≈ 401.1°
        assert_eq!(Sign::from_longitude(0.5), Sign::Aries);
        assert_eq!(Sign::from_longitude(3.5), Sign::Libra);
        assert_eq!(Sign::from_longitude(-0.1), Sign::Pisces);
        assert_eq!(Sign::from_longitude(7.0), Sign::Taurus);
    }

    #[test]
    fn every_band_maps_to_its_sign() {
        for (i, sign) in ALL_SIGNS.iter().enumerate() {
            let mid = i as f64 * SIGN_WIDTH_DEG + 15.0;
            assert_eq!(Sign::from_degrees(mid), *sign);
        }
    }

    #[test]
    fn nan_does_not_panic() {
        let _ = Sign::from_degrees(f64::NAN);
    }

    #[test]
    fn localized_names() {
        assert_eq!(Sign::Aries.name(Locale::Tr), "Koç");
        assert_eq!(Sign::Pisces.name(Locale::Tr), "Balık");
        assert_eq!(Sign::Gemini.name(Locale::En), "Gemini");
        assert_eq!(Sign::Cancer.to_string(), "Cancer");
    }
}
