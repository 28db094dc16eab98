//! Cartesian ↔ spherical conversion and the ecliptic-of-date rotation.
//!
//! Longitude (or right ascension) is measured in the x-y plane from +x
//! toward +y and wrapped to [0, 2π); latitude (or declination) is the
//! elevation above the x-y plane. Distances keep whatever unit the
//! input carries.

use std::f64::consts::TAU;

/// Spherical coordinates: longitude, latitude, distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Longitude in radians, range [0, 2π).
    pub lon_rad: f64,
    /// Latitude in radians, range [-π/2, π/2].
    pub lat_rad: f64,
    /// Distance from the origin, in the input's unit.
    pub distance: f64,
}

impl Spherical {
    /// Longitude in degrees, range [0, 360).
    pub fn lon_deg(&self) -> f64 {
        self.lon_rad.to_degrees()
    }

    /// Latitude in degrees.
    pub fn lat_deg(&self) -> f64 {
        self.lat_rad.to_degrees()
    }
}

/// Convert a Cartesian vector to spherical coordinates.
///
/// The zero vector maps to all-zero coordinates.
pub fn cartesian_to_spherical(xyz: &[f64; 3]) -> Spherical {
    let [x, y, z] = *xyz;
    let r = (x * x + y * y + z * z).sqrt();

    if r == 0.0 {
        return Spherical {
            lon_rad: 0.0,
            lat_rad: 0.0,
            distance: 0.0,
        };
    }

    Spherical {
        lon_rad: y.atan2(x).rem_euclid(TAU),
        lat_rad: (z / r).asin(),
        distance: r,
    }
}

/// Convert spherical coordinates back to a Cartesian vector.
pub fn spherical_to_cartesian(s: &Spherical) -> [f64; 3] {
    let cos_lat = s.lat_rad.cos();
    [
        s.distance * cos_lat * s.lon_rad.cos(),
        s.distance * cos_lat * s.lon_rad.sin(),
        s.distance * s.lat_rad.sin(),
    ]
}

/// Rotate an equator-of-date vector into ecliptic-of-date coordinates.
///
/// A rotation by the true obliquity about the +x (equinox) axis; the
/// equinox itself is shared between the two frames.
pub fn equatorial_to_ecliptic(xyz: &[f64; 3], true_obliquity_rad: f64) -> [f64; 3] {
    let (s, c) = true_obliquity_rad.sin_cos();
    let [x, y, z] = *xyz;
    [x, y * c + z * s, z * c - y * s]
}
