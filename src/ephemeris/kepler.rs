//! Low-precision Keplerian ephemeris.
//!
//! Mean orbital elements referred to the equinox of date, with linear
//! secular terms in days since 1999-12-31 00:00 (Paul Schlyter, "How to
//! compute planetary positions"). The Moon gets the twelve largest
//! longitude perturbations plus topocentric parallax; Saturn gets the
//! great-inequality terms from Jupiter. Accuracy is a few arcminutes for
//! the planets and better than a quarter degree for the Moon, well inside
//! the resolution of a 30° sign.

use super::time::{element_day, ut_hours};
use super::{Body, Ephemeris, EphemerisError, Observer, normalize_deg};

/// Osculating elements, angles in degrees.
#[derive(Debug, Clone, Copy)]
struct Elements {
    /// Longitude of the ascending node.
    node: f64,
    /// Inclination to the ecliptic.
    incl: f64,
    /// Argument of perihelion.
    peri: f64,
    /// Semi-major axis (AU, or Earth radii for the Moon).
    axis: f64,
    ecc: f64,
    /// Mean anomaly.
    mean_anomaly: f64,
}

/// Ecliptic spherical position, angles in degrees.
#[derive(Debug, Clone, Copy)]
struct Spherical {
    lon: f64,
    lat: f64,
    dist: f64,
}

fn sind(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cosd(x: f64) -> f64 {
    x.to_radians().cos()
}

fn atan2d(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

fn sun_elements(d: f64) -> Elements {
    Elements {
        node: 0.0,
        incl: 0.0,
        peri: 282.9404 + 4.70935e-5 * d,
        axis: 1.0,
        ecc: 0.016709 - 1.151e-9 * d,
        mean_anomaly: normalize_deg(356.0470 + 0.985_600_258_5 * d),
    }
}

fn moon_elements(d: f64) -> Elements {
    Elements {
        node: normalize_deg(125.1228 - 0.052_953_808_3 * d),
        incl: 5.1454,
        peri: normalize_deg(318.0634 + 0.164_357_322_3 * d),
        axis: 60.2666,
        ecc: 0.054900,
        mean_anomaly: normalize_deg(115.3654 + 13.064_992_950_9 * d),
    }
}

fn planet_elements(body: Body, d: f64) -> Option<Elements> {
    let el = match body {
        Body::Mercury => Elements {
            node: 48.3313 + 3.24587e-5 * d,
            incl: 7.0047 + 5.00e-8 * d,
            peri: 29.1241 + 1.01444e-5 * d,
            axis: 0.387098,
            ecc: 0.205635 + 5.59e-10 * d,
            mean_anomaly: normalize_deg(168.6562 + 4.092_334_436_8 * d),
        },
        Body::Mars => Elements {
            node: 49.5574 + 2.11081e-5 * d,
            incl: 1.8497 - 1.78e-8 * d,
            peri: 286.5016 + 2.92961e-5 * d,
            axis: 1.523688,
            ecc: 0.093405 + 2.516e-9 * d,
            mean_anomaly: normalize_deg(18.6021 + 0.524_020_776_6 * d),
        },
        Body::Saturn => Elements {
            node: 113.6634 + 2.38980e-5 * d,
            incl: 2.4886 - 1.081e-7 * d,
            peri: 339.3939 + 2.97661e-5 * d,
            axis: 9.55475,
            ecc: 0.055546 - 9.499e-9 * d,
            mean_anomaly: normalize_deg(316.9670 + 0.033_444_228_2 * d),
        },
        Body::Sun | Body::Moon => return None,
    };
    Some(el)
}

/// Jupiter's mean anomaly, needed for Saturn's perturbations.
fn jupiter_mean_anomaly(d: f64) -> f64 {
    normalize_deg(19.8950 + 0.083_085_300_1 * d)
}

/// Obliquity of the ecliptic of date.
fn obliquity(d: f64) -> f64 {
    23.4393 - 3.563e-7 * d
}

/// Solve Kepler's equation for the eccentric anomaly (degrees).
fn eccentric_anomaly(mean_anomaly: f64, ecc: f64) -> f64 {
    let e_deg = ecc.to_degrees();
    let mut ea = mean_anomaly + e_deg * sind(mean_anomaly) * (1.0 + ecc * cosd(mean_anomaly));
    for _ in 0..32 {
        let next = ea - (ea - e_deg * sind(ea) - mean_anomaly) / (1.0 - ecc * cosd(ea));
        let done = (next - ea).abs() < 1e-9;
        ea = next;
        if done {
            break;
        }
    }
    ea
}

/// Rectangular ecliptic position of an orbiting body around its primary.
fn orbit_position(el: &Elements) -> [f64; 3] {
    let ea = eccentric_anomaly(el.mean_anomaly, el.ecc);
    let xv = el.axis * (cosd(ea) - el.ecc);
    let yv = el.axis * (1.0 - el.ecc * el.ecc).sqrt() * sind(ea);
    let v = atan2d(yv, xv);
    let r = xv.hypot(yv);

    let vw = v + el.peri;
    [
        r * (cosd(el.node) * cosd(vw) - sind(el.node) * sind(vw) * cosd(el.incl)),
        r * (sind(el.node) * cosd(vw) + cosd(el.node) * sind(vw) * cosd(el.incl)),
        r * sind(vw) * sind(el.incl),
    ]
}

fn to_spherical(xyz: &[f64; 3]) -> Spherical {
    let [x, y, z] = *xyz;
    Spherical {
        lon: normalize_deg(atan2d(y, x)),
        lat: atan2d(z, x.hypot(y)),
        dist: (x * x + y * y + z * z).sqrt(),
    }
}

fn to_rectangular(s: &Spherical) -> [f64; 3] {
    [
        s.dist * cosd(s.lon) * cosd(s.lat),
        s.dist * sind(s.lon) * cosd(s.lat),
        s.dist * sind(s.lat),
    ]
}

/// Geocentric rectangular position of the Sun (AU).
fn sun_position(d: f64) -> [f64; 3] {
    orbit_position(&sun_elements(d))
}

/// Sun's mean longitude (degrees), also the base of sidereal time.
fn sun_mean_longitude(d: f64) -> f64 {
    let sun = sun_elements(d);
    normalize_deg(sun.mean_anomaly + sun.peri)
}

/// Geocentric ecliptic position of the Moon, distance in Earth radii.
fn moon_geocentric(d: f64) -> Spherical {
    let moon = moon_elements(d);
    let sun = sun_elements(d);
    let mut pos = to_spherical(&orbit_position(&moon));

    let ms = sun.mean_anomaly;
    let mm = moon.mean_anomaly;
    let ls = ms + sun.peri;
    let lm = mm + moon.peri + moon.node;
    let dd = lm - ls;
    let f = lm - moon.node;

    #[rustfmt::skip]
    let dlon = -1.274 * sind(mm - 2.0 * dd)          // evection
        + 0.658 * sind(2.0 * dd)                      // variation
        - 0.186 * sind(ms)                            // yearly equation
        - 0.059 * sind(2.0 * mm - 2.0 * dd)
        - 0.057 * sind(mm - 2.0 * dd + ms)
        + 0.053 * sind(mm + 2.0 * dd)
        + 0.046 * sind(2.0 * dd - ms)
        + 0.041 * sind(mm - ms)
        - 0.035 * sind(dd)                            // parallactic equation
        - 0.031 * sind(mm + ms)
        - 0.015 * sind(2.0 * f - 2.0 * dd)
        + 0.011 * sind(mm - 4.0 * dd);

    let dlat = -0.173 * sind(f - 2.0 * dd) - 0.055 * sind(mm - f - 2.0 * dd)
        - 0.046 * sind(mm + f - 2.0 * dd)
        + 0.033 * sind(f + 2.0 * dd)
        + 0.017 * sind(2.0 * mm + f);

    let ddist = -0.58 * cosd(mm - 2.0 * dd) - 0.46 * cosd(2.0 * dd);

    pos.lon = normalize_deg(pos.lon + dlon);
    pos.lat += dlat;
    pos.dist += ddist;
    pos
}

/// Shift the Moon's geocentric position to the observer's location.
///
/// Works in right ascension / declination with the observer's geocentric
/// latitude, then converts back to the ecliptic of date.
fn moon_topocentric(geo: &Spherical, d: f64, observer: &Observer) -> Spherical {
    let ecl = obliquity(d);

    let [x, y, z] = to_rectangular(&Spherical { dist: 1.0, ..*geo });
    let ye = y * cosd(ecl) - z * sind(ecl);
    let ze = y * sind(ecl) + z * cosd(ecl);
    let ra = atan2d(ye, x);
    let dec = atan2d(ze, x.hypot(ye));

    let parallax = (1.0 / geo.dist).asin().to_degrees();
    let lat = observer.latitude_deg;
    let gclat = lat - 0.1924 * sind(2.0 * lat);
    let rho = 0.99833 + 0.00167 * cosd(2.0 * lat);

    let lst = sun_mean_longitude(d) + 180.0 + ut_hours(&observer.instant) * 15.0
        + observer.longitude_deg;
    let ha = lst - ra;

    let top_ra = ra - parallax * rho * cosd(gclat) * sind(ha) / cosd(dec);
    let top_dec = if gclat.abs() < 1e-9 {
        dec - parallax * rho * sind(-dec) * cosd(ha)
    } else {
        // atan(tan(gclat) / cos(ha)) without dividing by zero at ha = ±90°
        let g = atan2d(sind(gclat) * cosd(ha).signum(), cosd(gclat) * cosd(ha).abs());
        dec - parallax * rho * sind(gclat) * sind(g - dec) / sind(g)
    };

    let xe = cosd(top_ra) * cosd(top_dec);
    let ye = sind(top_ra) * cosd(top_dec);
    let ze = sind(top_dec);
    let yl = ye * cosd(ecl) + ze * sind(ecl);
    let zl = -ye * sind(ecl) + ze * cosd(ecl);

    Spherical {
        lon: normalize_deg(atan2d(yl, xe)),
        lat: atan2d(zl, xe.hypot(yl)),
        dist: geo.dist,
    }
}

/// Geocentric ecliptic position of a planet, distance in AU.
fn planet_geocentric(body: Body, d: f64) -> Result<Spherical, EphemerisError> {
    let el = planet_elements(body, d).ok_or(EphemerisError::UnsupportedBody(body))?;
    let mut helio = to_spherical(&orbit_position(&el));

    if body == Body::Saturn {
        let mj = jupiter_mean_anomaly(d);
        let ms = el.mean_anomaly;
        helio.lon += 0.812 * sind(2.0 * mj - 5.0 * ms - 67.6)
            - 0.229 * cosd(2.0 * mj - 4.0 * ms - 2.0)
            + 0.119 * sind(mj - 2.0 * ms - 3.0)
            + 0.046 * sind(2.0 * mj - 6.0 * ms - 69.0)
            + 0.014 * sind(mj - 3.0 * ms + 32.0);
        helio.lat += -0.020 * cosd(2.0 * mj - 4.0 * ms - 2.0) + 0.018 * sind(2.0 * mj - 6.0 * ms - 49.0);
    }

    let [xh, yh, zh] = to_rectangular(&helio);
    let [xs, ys, zs] = sun_position(d);
    Ok(to_spherical(&[xh + xs, yh + ys, zh + zs]))
}

/// Closed-form ephemeris good to a few arcminutes over several centuries
/// around 2000.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeplerEphemeris;

impl KeplerEphemeris {
    fn longitude_deg(&self, body: Body, observer: &Observer) -> Result<f64, EphemerisError> {
        let d = element_day(&observer.instant);
        match body {
            Body::Sun => Ok(to_spherical(&sun_position(d)).lon),
            Body::Moon => Ok(moon_topocentric(&moon_geocentric(d), d, observer).lon),
            Body::Mercury | Body::Mars | Body::Saturn => Ok(planet_geocentric(body, d)?.lon),
        }
    }
}

impl Ephemeris for KeplerEphemeris {
    fn ecliptic_longitude(&self, body: Body, observer: &Observer) -> Result<f64, EphemerisError> {
        if !(-90.0..=90.0).contains(&observer.latitude_deg) {
            return Err(EphemerisError::InvalidObserver(format!(
                "latitude {} is outside [-90, 90]",
                observer.latitude_deg
            )));
        }
        if !observer.longitude_deg.is_finite() {
            return Err(EphemerisError::InvalidObserver(
                "longitude is not finite".to_string(),
            ));
        }

        let lon = self.longitude_deg(body, observer)?;
        if !lon.is_finite() {
            return Err(EphemerisError::NonFinite(body));
        }
        Ok(lon.to_radians())
    }
}
