//! Position types and the observe → apparent → horizontal pipeline.
//!
//! A [`Barycentric`] observer state subtracts a target (with
//! light-time iteration) into an [`Astrometric`] relative position;
//! `apparent()` applies deflection, aberration, frame bias,
//! precession, and nutation — in that order — to land in the true
//! equator and equinox of date; `horizontal()` rotates into a surface
//! observer's local horizon.
//!
//! All positions are batches: one entry per instant of the tagged
//! [`Time`]. Nothing here is shared or mutable across queries.

use std::f64::consts::TAU;

use vega_frames::{
    NutationAngles, cartesian_to_spherical, dot, equation_of_equinoxes_rad,
    equatorial_to_ecliptic, icrs_to_true_of_date, julian_centuries, mean_obliquity_rad, mxv,
    nutation_iau2000b, spin_z,
};
use vega_time::{SECONDS_PER_DAY, Time, Timescale, gast_rad, tdb_minus_tt_seconds};

use crate::error::ObserveError;
use crate::relativity::{add_aberration, add_deflection, limb_angle};
use crate::topos::Topos;
use crate::{
    AU_KM, Body, C_AU_DAY, EARTH_RADIUS_KM, Ephemeris, MU_EARTH_AU3_DAY2, MU_SUN_AU3_DAY2,
    OrbitPropagator, StateVector,
};

/// Earth deflection is applied only when the target stands at least
/// this far above the limb; closer in, the correction is skipped to
/// stay clear of the grazing-ray singularity.
const DEFLECTION_LIMB_ANGLE_DEG: f64 = 0.8;

/// Light-time fixed point: tolerance (~0.1 μs) and iteration cap.
const LIGHT_TIME_TOL_DAYS: f64 = 1.0e-12;
const LIGHT_TIME_MAX_ITER: usize = 10;

/// Per-instant rotation context: the ICRS → true-of-date matrix and
/// the two angles downstream stages reuse.
pub(crate) struct DateFrame {
    pub rotation: [[f64; 3]; 3],
    pub eqeq_rad: f64,
    pub true_obliquity_rad: f64,
}

pub(crate) fn date_frame(jd_tdb: f64) -> DateFrame {
    let t = julian_centuries(jd_tdb);
    let angles: NutationAngles = nutation_iau2000b(t);
    DateFrame {
        rotation: icrs_to_true_of_date(t, &angles),
        eqeq_rad: equation_of_equinoxes_rad(t, &angles),
        true_obliquity_rad: mean_obliquity_rad(t) + angles.deps_rad,
    }
}

/// An observer's barycentric ICRS state over a batch of instants.
#[derive(Debug, Clone)]
pub struct Barycentric {
    position: Vec<[f64; 3]>,
    velocity: Vec<[f64; 3]>,
    /// Observer minus geocenter, ICRS AU; zero for the geocenter itself.
    geocentric_offset: Vec<[f64; 3]>,
    time: Time,
    topos: Option<Topos>,
}

impl Barycentric {
    pub(crate) fn new(
        position: Vec<[f64; 3]>,
        velocity: Vec<[f64; 3]>,
        geocentric_offset: Vec<[f64; 3]>,
        time: Time,
        topos: Option<Topos>,
    ) -> Self {
        Self {
            position,
            velocity,
            geocentric_offset,
            time,
            topos,
        }
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn position_au(&self) -> &[[f64; 3]] {
        &self.position
    }

    pub fn velocity_au_day(&self) -> &[[f64; 3]] {
        &self.velocity
    }

    /// Whether this observer is the geocenter (no surface basis).
    pub fn is_geocentric(&self) -> bool {
        self.topos.is_none()
    }

    /// Observe a solar-system body: target minus observer, with the
    /// emission time solved by fixed-point iteration on light time.
    pub fn observe(
        &self,
        target: Body,
        ephemeris: &dyn Ephemeris,
    ) -> Result<Astrometric, ObserveError> {
        self.observe_states(&|jd_tdb: &[f64]| -> Result<Vec<StateVector>, ObserveError> {
            Ok(ephemeris.state_at(target, jd_tdb)?)
        })
    }

    /// Observe an Earth satellite: the target's barycentric state is
    /// Earth's state plus the propagator's geocentric state.
    pub fn observe_orbiter(
        &self,
        orbiter: &dyn OrbitPropagator,
        ephemeris: &dyn Ephemeris,
    ) -> Result<Astrometric, ObserveError> {
        self.observe_states(&|jd_tdb: &[f64]| -> Result<Vec<StateVector>, ObserveError> {
            let earth = ephemeris.state_at(Body::Earth, jd_tdb)?;
            let jd_tt: Vec<f64> = jd_tdb
                .iter()
                .map(|&jd| jd - tdb_minus_tt_seconds(jd) / SECONDS_PER_DAY)
                .collect();
            let sat = orbiter.geocentric_state(&jd_tt)?;
            Ok(earth
                .iter()
                .zip(&sat)
                .map(|(e, s)| StateVector {
                    position_au: [
                        e.position_au[0] + s.position_au[0],
                        e.position_au[1] + s.position_au[1],
                        e.position_au[2] + s.position_au[2],
                    ],
                    velocity_au_day: [
                        e.velocity_au_day[0] + s.velocity_au_day[0],
                        e.velocity_au_day[1] + s.velocity_au_day[1],
                        e.velocity_au_day[2] + s.velocity_au_day[2],
                    ],
                })
                .collect())
        })
    }

    fn observe_states(
        &self,
        target_at: &dyn Fn(&[f64]) -> Result<Vec<StateVector>, ObserveError>,
    ) -> Result<Astrometric, ObserveError> {
        let tdb = self.time.tdb();
        let n = tdb.len();

        let mut states = target_at(tdb)?;
        let mut light_time = vec![0.0_f64; n];
        let mut relative = vec![[0.0_f64; 3]; n];

        for _ in 0..LIGHT_TIME_MAX_ITER {
            let mut max_delta: f64 = 0.0;
            for i in 0..n {
                let p = [
                    states[i].position_au[0] - self.position[i][0],
                    states[i].position_au[1] - self.position[i][1],
                    states[i].position_au[2] - self.position[i][2],
                ];
                let lt = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt() / C_AU_DAY;
                max_delta = max_delta.max((lt - light_time[i]).abs());
                light_time[i] = lt;
                relative[i] = p;
            }
            if max_delta < LIGHT_TIME_TOL_DAYS {
                break;
            }
            let emission: Vec<f64> = tdb
                .iter()
                .zip(&light_time)
                .map(|(&jd, &lt)| jd - lt)
                .collect();
            states = target_at(&emission)?;
        }

        Ok(Astrometric {
            position: relative,
            light_time_days: light_time,
            time: self.time.clone(),
            observer_position: self.position.clone(),
            observer_velocity: self.velocity.clone(),
            observer_offset: self.geocentric_offset.clone(),
            geocentric: self.is_geocentric(),
            topos: self.topos.clone(),
        })
    }
}

/// A body's own barycentric state as an observer — the vantage for
/// looking back from a body toward its illuminating source or its
/// observer. Carries no surface basis.
pub fn body_barycentric(
    body: Body,
    time: &Time,
    ephemeris: &dyn Ephemeris,
) -> Result<Barycentric, ObserveError> {
    let states = ephemeris.state_at(body, time.tdb())?;
    let position = states.iter().map(|s| s.position_au).collect();
    let velocity = states.iter().map(|s| s.velocity_au_day).collect();
    let offset = vec![[0.0; 3]; time.len()];
    Ok(Barycentric::new(position, velocity, offset, time.clone(), None))
}

/// A light-time-corrected relative position in the ICRS, before any
/// relativistic or frame corrections.
#[derive(Debug, Clone)]
pub struct Astrometric {
    position: Vec<[f64; 3]>,
    light_time_days: Vec<f64>,
    time: Time,
    observer_position: Vec<[f64; 3]>,
    observer_velocity: Vec<[f64; 3]>,
    observer_offset: Vec<[f64; 3]>,
    geocentric: bool,
    topos: Option<Topos>,
}

impl Astrometric {
    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Target relative to observer, ICRS AU.
    pub fn position_au(&self) -> &[[f64; 3]] {
        &self.position
    }

    pub fn light_time_days(&self) -> &[f64] {
        &self.light_time_days
    }

    pub fn distance_au(&self) -> Vec<f64> {
        self.position
            .iter()
            .map(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt())
            .collect()
    }

    /// Angular separation from another relative position, per instant.
    ///
    /// Both batches must cover the same instants.
    pub fn separation_rad(&self, other: &Astrometric) -> Vec<f64> {
        self.position
            .iter()
            .zip(&other.position)
            .map(|(a, b)| {
                let la = (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt();
                let lb = (b[0] * b[0] + b[1] * b[1] + b[2] * b[2]).sqrt();
                if la == 0.0 || lb == 0.0 {
                    0.0
                } else {
                    (dot(a, b) / (la * lb)).clamp(-1.0, 1.0).acos()
                }
            })
            .collect()
    }

    /// Flip the position vectors, for looking back along a line of
    /// sight (e.g. from a body toward its observer).
    pub fn reversed(&self) -> Astrometric {
        let mut out = self.clone();
        for p in &mut out.position {
            *p = [-p[0], -p[1], -p[2]];
        }
        out
    }

    /// The apparent place: deflection, aberration, then rotation into
    /// the true equator and equinox of date.
    pub fn apparent(&self, ephemeris: &dyn Ephemeris) -> Result<Apparent, ObserveError> {
        let tdb = self.time.tdb();
        let n = tdb.len();
        let sun = ephemeris.state_at(Body::Sun, tdb)?;
        let earth_radius_au = EARTH_RADIUS_KM / AU_KM;

        let mut position = Vec::with_capacity(n);
        let mut ra_rad = Vec::with_capacity(n);
        let mut dec_rad = Vec::with_capacity(n);
        let mut distance_au = Vec::with_capacity(n);
        let mut eqeq_rad = Vec::with_capacity(n);
        let mut true_obliquity_rad = Vec::with_capacity(n);

        for i in 0..n {
            let mut pos = self.position[i];
            let offset = self.observer_offset[i];

            // Earth deflection only for surface observers with the
            // target safely above the limb.
            let include_earth = if self.geocentric {
                false
            } else {
                let target_geocentric = [
                    pos[0] + offset[0],
                    pos[1] + offset[1],
                    pos[2] + offset[2],
                ];
                let (limb_deg, _) = limb_angle(&target_geocentric, &offset, earth_radius_au);
                limb_deg >= DEFLECTION_LIMB_ANGLE_DEG
            };

            let sun_to_observer = [
                self.observer_position[i][0] - sun[i].position_au[0],
                self.observer_position[i][1] - sun[i].position_au[1],
                self.observer_position[i][2] - sun[i].position_au[2],
            ];
            let sun_to_target = [
                sun_to_observer[0] + pos[0],
                sun_to_observer[1] + pos[1],
                sun_to_observer[2] + pos[2],
            ];
            add_deflection(&mut pos, &sun_to_observer, &sun_to_target, MU_SUN_AU3_DAY2);

            if include_earth {
                let earth_to_target = [
                    offset[0] + pos[0],
                    offset[1] + pos[1],
                    offset[2] + pos[2],
                ];
                add_deflection(&mut pos, &offset, &earth_to_target, MU_EARTH_AU3_DAY2);
            }

            add_aberration(&mut pos, &self.observer_velocity[i], self.light_time_days[i]);

            let frame = date_frame(tdb[i]);
            let pos_date = mxv(&frame.rotation, &pos);
            let sph = cartesian_to_spherical(&pos_date);

            position.push(pos_date);
            ra_rad.push(sph.lon_rad);
            dec_rad.push(sph.lat_rad);
            distance_au.push(sph.distance);
            eqeq_rad.push(frame.eqeq_rad);
            true_obliquity_rad.push(frame.true_obliquity_rad);
        }

        Ok(Apparent {
            position,
            ra_rad,
            dec_rad,
            distance_au,
            eqeq_rad,
            true_obliquity_rad,
            time: self.time.clone(),
            topos: self.topos.clone(),
        })
    }
}

/// An apparent place: right ascension, declination, and distance
/// against the true equator and equinox of date.
#[derive(Debug, Clone)]
pub struct Apparent {
    position: Vec<[f64; 3]>,
    ra_rad: Vec<f64>,
    dec_rad: Vec<f64>,
    distance_au: Vec<f64>,
    eqeq_rad: Vec<f64>,
    true_obliquity_rad: Vec<f64>,
    time: Time,
    topos: Option<Topos>,
}

impl Apparent {
    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Position vectors in the true-of-date frame, AU.
    pub fn position_au(&self) -> &[[f64; 3]] {
        &self.position
    }

    pub fn ra_rad(&self) -> &[f64] {
        &self.ra_rad
    }

    pub fn dec_rad(&self) -> &[f64] {
        &self.dec_rad
    }

    pub fn distance_au(&self) -> &[f64] {
        &self.distance_au
    }

    /// Ecliptic-of-date longitude/latitude/distance per instant.
    ///
    /// Longitude is wrapped to [0, 2π); this is the coordinate whose
    /// quadrant steps drive the phase and season observables.
    pub fn ecliptic_lon_lat(&self) -> Vec<vega_frames::Spherical> {
        self.position
            .iter()
            .zip(&self.true_obliquity_rad)
            .map(|(p, &eps)| cartesian_to_spherical(&equatorial_to_ecliptic(p, eps)))
            .collect()
    }

    /// Altitude/azimuth against a surface observer's horizon.
    ///
    /// Fails with [`ObserveError::MissingObserverFrame`] unless this
    /// position was observed from a [`Topos`] — only a surface
    /// location carries the `up`/`north`/`west` basis a horizon needs.
    pub fn horizontal(&self, ts: &Timescale) -> Result<Horizontal, ObserveError> {
        let topos = self.topos.as_ref().ok_or(ObserveError::MissingObserverFrame)?;
        let ut1 = self.time.ut1(ts);
        let n = self.position.len();

        let mut alt_rad = Vec::with_capacity(n);
        let mut az_rad = Vec::with_capacity(n);
        let mut zenith_rad = Vec::with_capacity(n);

        for i in 0..n {
            let gast = gast_rad(ut1[i], self.eqeq_rad[i]);

            // Spin the Earth-fixed basis to the instant's true equinox.
            let uz = spin_z(-gast, topos.up());
            let un = spin_z(-gast, topos.north());
            let uw = spin_z(-gast, topos.west());

            let p = &self.position[i];
            let pz = dot(p, &uz);
            let pn = dot(p, &un);
            let pw = dot(p, &uw);

            let proj = (pn * pn + pw * pw).sqrt();

            // Azimuth from north through east; exactly at the zenith
            // the bearing is undefined and reported as 0.
            let mut az = if proj > 0.0 { -pw.atan2(pn) } else { 0.0 };
            if az < 0.0 {
                az += TAU;
            }
            if az >= TAU {
                az -= TAU;
            }

            let zd = proj.atan2(pz);
            alt_rad.push(TAU / 4.0 - zd);
            az_rad.push(az);
            zenith_rad.push(zd);
        }

        Ok(Horizontal {
            alt_rad,
            az_rad,
            zenith_rad,
            distance_au: self.distance_au.clone(),
        })
    }
}

/// Horizontal coordinates: altitude, azimuth, zenith distance.
#[derive(Debug, Clone)]
pub struct Horizontal {
    /// Altitude above the horizon, radians.
    pub alt_rad: Vec<f64>,
    /// Azimuth from north through east, radians in [0, 2π).
    pub az_rad: Vec<f64>,
    /// Zenith distance, radians.
    pub zenith_rad: Vec<f64>,
    /// Distance to the target, AU.
    pub distance_au: Vec<f64>,
}

impl Horizontal {
    pub fn alt_degrees(&self) -> Vec<f64> {
        self.alt_rad.iter().map(|a| a.to_degrees()).collect()
    }

    /// Azimuths in degrees, each exactly within [0, 360).
    pub fn az_degrees(&self) -> Vec<f64> {
        self.az_rad
            .iter()
            .map(|a| {
                let mut deg = a.to_degrees();
                if deg >= 360.0 {
                    deg -= 360.0;
                }
                if deg < 0.0 {
                    deg += 360.0;
                }
                deg
            })
            .collect()
    }
}
