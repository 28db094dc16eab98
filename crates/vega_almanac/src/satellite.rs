//! A minimal circular-orbit propagator.
//!
//! Implements the [`OrbitPropagator`] seam with an unperturbed
//! circular Kepler orbit — enough to exercise pass prediction without
//! a full SGP4 stack, and the drop-in shape a real propagator takes.

use vega_core::{AU_KM, EARTH_RADIUS_KM, EphemerisError, OrbitPropagator, StateVector};
use vega_frames::{mxm, mxv, r1, r3};
use vega_time::SECONDS_PER_DAY;

/// Geocentric gravitational parameter in km³/s².
const MU_EARTH_KM3_S2: f64 = 398_600.4418;

/// An unperturbed circular orbit around Earth.
#[derive(Debug, Clone, Copy)]
pub struct CircularOrbit {
    radius_km: f64,
    rotation: [[f64; 3]; 3],
    phase_at_epoch_rad: f64,
    epoch_jd_tt: f64,
    mean_motion_rad_s: f64,
}

impl CircularOrbit {
    /// An orbit from altitude above the equator (km), inclination and
    /// ascending-node angles (degrees), orbital phase past the node
    /// at epoch (degrees), and the epoch itself (TT Julian Date).
    pub fn new(
        altitude_km: f64,
        inclination_deg: f64,
        node_deg: f64,
        phase_at_epoch_deg: f64,
        epoch_jd_tt: f64,
    ) -> Self {
        let radius_km = EARTH_RADIUS_KM + altitude_km;
        let mean_motion_rad_s = (MU_EARTH_KM3_S2 / radius_km.powi(3)).sqrt();
        // Orbital plane → inertial: undo inclination, then the node.
        let rotation = mxm(
            &r3(-node_deg.to_radians()),
            &r1(-inclination_deg.to_radians()),
        );
        Self {
            radius_km,
            rotation,
            phase_at_epoch_rad: phase_at_epoch_deg.to_radians(),
            epoch_jd_tt,
            mean_motion_rad_s,
        }
    }

    /// Orbital period in minutes.
    pub fn period_minutes(&self) -> f64 {
        std::f64::consts::TAU / self.mean_motion_rad_s / 60.0
    }
}

impl OrbitPropagator for CircularOrbit {
    fn geocentric_state(&self, jd_tt: &[f64]) -> Result<Vec<StateVector>, EphemerisError> {
        Ok(jd_tt
            .iter()
            .map(|&jd| {
                let elapsed_s = (jd - self.epoch_jd_tt) * SECONDS_PER_DAY;
                let u = self.phase_at_epoch_rad + self.mean_motion_rad_s * elapsed_s;
                let (sin_u, cos_u) = u.sin_cos();

                let pos_km = mxv(&self.rotation, &[
                    self.radius_km * cos_u,
                    self.radius_km * sin_u,
                    0.0,
                ]);
                let speed_km_s = self.radius_km * self.mean_motion_rad_s;
                let vel_km_s = mxv(&self.rotation, &[
                    -speed_km_s * sin_u,
                    speed_km_s * cos_u,
                    0.0,
                ]);

                StateVector {
                    position_au: [
                        pos_km[0] / AU_KM,
                        pos_km[1] / AU_KM,
                        pos_km[2] / AU_KM,
                    ],
                    velocity_au_day: [
                        vel_km_s[0] * SECONDS_PER_DAY / AU_KM,
                        vel_km_s[1] * SECONDS_PER_DAY / AU_KM,
                        vel_km_s[2] * SECONDS_PER_DAY / AU_KM,
                    ],
                }
            })
            .collect())
    }

    fn mean_motion_rad_per_min(&self) -> f64 {
        self.mean_motion_rad_s * 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vega_frames::{dot, length_of};

    fn leo() -> CircularOrbit {
        CircularOrbit::new(550.0, 53.0, 40.0, 0.0, 2_460_000.5)
    }

    #[test]
    fn leo_period_about_95_minutes() {
        let p = leo().period_minutes();
        assert!((p - 95.6).abs() < 1.0, "period = {p} min");
    }

    #[test]
    fn radius_is_constant() {
        let orbit = leo();
        let states = orbit
            .geocentric_state(&[2_460_000.5, 2_460_000.53, 2_460_000.57])
            .unwrap();
        for s in &states {
            let r_km = length_of(&s.position_au) * AU_KM;
            assert!((r_km - (EARTH_RADIUS_KM + 550.0)).abs() < 1e-6);
        }
    }

    #[test]
    fn velocity_is_tangential() {
        let orbit = leo();
        let states = orbit.geocentric_state(&[2_460_000.61]).unwrap();
        let s = &states[0];
        let radial = dot(&s.position_au, &s.velocity_au_day);
        assert!(radial.abs() < 1e-12, "radial component = {radial}");
        let v_km_s = length_of(&s.velocity_au_day) * AU_KM / SECONDS_PER_DAY;
        assert!((v_km_s - 7.59).abs() < 0.05, "v = {v_km_s} km/s");
    }

    #[test]
    fn inclination_bounds_latitude() {
        let orbit = leo();
        // Sample a full orbit; |z|/r never exceeds sin(inclination).
        let period_days = orbit.period_minutes() / (24.0 * 60.0);
        let jd: Vec<f64> = (0..40)
            .map(|i| 2_460_000.5 + period_days * i as f64 / 39.0)
            .collect();
        let max_sin_lat = orbit
            .geocentric_state(&jd)
            .unwrap()
            .iter()
            .map(|s| (s.position_au[2] / length_of(&s.position_au)).abs())
            .fold(0.0_f64, f64::max);
        let sin_incl = 53.0_f64.to_radians().sin();
        assert!(max_sin_lat <= sin_incl + 1e-9);
        assert!(max_sin_lat > sin_incl - 0.02, "orbit should reach its inclination");
    }
}
