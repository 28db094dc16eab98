//! Surface observer locations.
//!
//! A [`Topos`] is built once from latitude/longitude/elevation and
//! reused for every observation from that site. Its `up`/`north`/`west`
//! unit vectors live in the Earth-fixed frame and are rotated to the
//! instant's equinox by the horizontal transform.
//!
//! The ellipsoidal position/velocity formulas follow the classical
//! reduction (Kaplan, USNO Circular 179 §6); the ellipsoid constants
//! are IERS 2010.

use vega_frames::mtxv;
use vega_time::{SECONDS_PER_DAY, Time, Timescale, gast_rad, local_sidereal_time_rad};

use crate::error::ObserveError;
use crate::position::{Barycentric, date_frame};
use crate::{AU_KM, Body, EARTH_ANGVEL_RAD_S, EARTH_FLATTENING, EARTH_RADIUS_KM, Ephemeris};

/// A fixed geographic location: the observer's end of every
/// topocentric observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Topos {
    latitude_rad: f64,
    longitude_rad: f64,
    elevation_m: f64,
    temperature_c: f64,
    pressure_mbar: f64,
    up: [f64; 3],
    north: [f64; 3],
    west: [f64; 3],
}

impl Topos {
    /// A location from geodetic latitude and east longitude in degrees
    /// and elevation in meters, with standard atmosphere (10 °C,
    /// 1010 mbar).
    pub fn new(latitude_deg: f64, longitude_deg: f64, elevation_m: f64) -> Self {
        Self::with_conditions(latitude_deg, longitude_deg, elevation_m, 10.0, 1010.0)
    }

    /// A location with explicit atmospheric conditions, stored for
    /// callers that apply their own refraction model.
    pub fn with_conditions(
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
        temperature_c: f64,
        pressure_mbar: f64,
    ) -> Self {
        let lat = latitude_deg.to_radians();
        let lon = longitude_deg.to_radians();
        let (sinlat, coslat) = lat.sin_cos();
        let (sinlon, coslon) = lon.sin_cos();

        Self {
            latitude_rad: lat,
            longitude_rad: lon,
            elevation_m,
            temperature_c,
            pressure_mbar,
            up: [coslat * coslon, coslat * sinlon, sinlat],
            north: [-sinlat * coslon, -sinlat * sinlon, coslat],
            west: [sinlon, -coslon, 0.0],
        }
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_rad
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_rad
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    pub fn pressure_mbar(&self) -> f64 {
        self.pressure_mbar
    }

    /// Earth-fixed zenith unit vector.
    pub fn up(&self) -> &[f64; 3] {
        &self.up
    }

    /// Earth-fixed north unit vector.
    pub fn north(&self) -> &[f64; 3] {
        &self.north
    }

    /// Earth-fixed west unit vector.
    pub fn west(&self) -> &[f64; 3] {
        &self.west
    }

    /// The observer's barycentric state at each instant.
    ///
    /// Earth's barycentric state from the oracle, plus this location's
    /// geocentric offset rotated from the true-equator-of-date frame
    /// (where the sidereal spin puts it) back into the ICRS.
    pub fn at(
        &self,
        time: &Time,
        ephemeris: &dyn Ephemeris,
        ts: &Timescale,
    ) -> Result<Barycentric, ObserveError> {
        let earth = ephemeris.state_at(Body::Earth, time.tdb())?;
        let ut1 = time.ut1(ts);
        let tdb = time.tdb();

        let n = time.len();
        let mut position = Vec::with_capacity(n);
        let mut velocity = Vec::with_capacity(n);
        let mut offset = Vec::with_capacity(n);

        for i in 0..n {
            let frame = date_frame(tdb[i]);
            let gast = gast_rad(ut1[i], frame.eqeq_rad);
            let lst = local_sidereal_time_rad(gast, self.longitude_rad);
            let (p_date, v_date) = terra(self, lst);

            // Back out of the true-of-date frame into the ICRS.
            let p_icrs = mtxv(&frame.rotation, &p_date);
            let v_icrs = mtxv(&frame.rotation, &v_date);

            position.push([
                earth[i].position_au[0] + p_icrs[0],
                earth[i].position_au[1] + p_icrs[1],
                earth[i].position_au[2] + p_icrs[2],
            ]);
            velocity.push([
                earth[i].velocity_au_day[0] + v_icrs[0],
                earth[i].velocity_au_day[1] + v_icrs[1],
                earth[i].velocity_au_day[2] + v_icrs[2],
            ]);
            offset.push(p_icrs);
        }

        Ok(Barycentric::new(
            position,
            velocity,
            offset,
            time.clone(),
            Some(self.clone()),
        ))
    }
}

/// The geocenter as an observer: Earth's barycentric state verbatim.
///
/// Geocentric positions skip the Earth-deflection gate entirely and
/// cannot produce horizontal coordinates.
pub fn geocenter(
    time: &Time,
    ephemeris: &dyn Ephemeris,
) -> Result<Barycentric, ObserveError> {
    let earth = ephemeris.state_at(Body::Earth, time.tdb())?;
    let position = earth.iter().map(|s| s.position_au).collect();
    let velocity = earth.iter().map(|s| s.velocity_au_day).collect();
    let offset = vec![[0.0; 3]; time.len()];
    Ok(Barycentric::new(position, velocity, offset, time.clone(), None))
}

/// Position and velocity of a surface location, in the true-equator-
/// and-equinox-of-date frame, in AU and AU/day.
///
/// `lst_rad` is the local apparent sidereal time. The ellipsoid
/// factors `c` and `s` scale the equatorial radius to the geocentric
/// position of a geodetic latitude.
pub(crate) fn terra(topos: &Topos, lst_rad: f64) -> ([f64; 3], [f64; 3]) {
    let df = 1.0 - EARTH_FLATTENING;
    let df2 = df * df;

    let (sinphi, cosphi) = topos.latitude_rad.sin_cos();
    let c = 1.0 / (cosphi * cosphi + df2 * sinphi * sinphi).sqrt();
    let s = df2 * c;
    let ht_km = topos.elevation_m / 1000.0;
    let ach = EARTH_RADIUS_KM * c + ht_km;
    let ash = EARTH_RADIUS_KM * s + ht_km;

    let (sinst, cosst) = lst_rad.sin_cos();

    let ac = ach * cosphi;
    let position = [
        ac * cosst / AU_KM,
        ac * sinst / AU_KM,
        ash * sinphi / AU_KM,
    ];

    // Rotation carries the site eastward at ANGVEL.
    let aac = EARTH_ANGVEL_RAD_S * SECONDS_PER_DAY * ach * cosphi;
    let velocity = [-aac * sinst / AU_KM, aac * cosst / AU_KM, 0.0];

    (position, velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vega_frames::{dot, length_of};

    #[test]
    fn basis_is_orthonormal() {
        let t = Topos::new(36.95, -112.52, 0.0);
        for v in [t.up(), t.north(), t.west()] {
            assert!((length_of(v) - 1.0).abs() < 1e-14);
        }
        assert!(dot(t.up(), t.north()).abs() < 1e-14);
        assert!(dot(t.up(), t.west()).abs() < 1e-14);
        assert!(dot(t.north(), t.west()).abs() < 1e-14);
    }

    #[test]
    fn equator_up_points_outward() {
        let t = Topos::new(0.0, 0.0, 0.0);
        assert!((t.up()[0] - 1.0).abs() < 1e-14);
        assert!((t.north()[2] - 1.0).abs() < 1e-14);
    }

    #[test]
    fn pole_up_is_z() {
        let t = Topos::new(90.0, 0.0, 0.0);
        assert!((t.up()[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn terra_radius_on_equator() {
        let t = Topos::new(0.0, 0.0, 0.0);
        let (p, _) = terra(&t, 0.0);
        let r_km = length_of(&p) * AU_KM;
        assert!((r_km - EARTH_RADIUS_KM).abs() < 1e-6, "r = {r_km} km");
    }

    #[test]
    fn terra_radius_shrinks_at_pole() {
        let t = Topos::new(90.0, 0.0, 0.0);
        let (p, _) = terra(&t, 0.0);
        let r_km = length_of(&p) * AU_KM;
        // Polar radius ≈ 6356.75 km.
        assert!((r_km - 6_356.75).abs() < 0.1, "r = {r_km} km");
    }

    #[test]
    fn terra_velocity_eastward() {
        let t = Topos::new(0.0, 0.0, 0.0);
        let (_, v) = terra(&t, 0.0);
        // At lst=0 the site sits on +x and moves toward +y at ~0.465 km/s.
        let speed_km_s = length_of(&v) * AU_KM / SECONDS_PER_DAY;
        assert!((speed_km_s - 0.465).abs() < 0.005, "v = {speed_km_s} km/s");
        assert!(v[1] > 0.0 && v[0].abs() < 1e-20);
    }

    #[test]
    fn terra_velocity_zero_at_pole() {
        let t = Topos::new(90.0, 0.0, 0.0);
        let (_, v) = terra(&t, 1.0);
        assert!(length_of(&v) * AU_KM < 1e-9);
    }
}
