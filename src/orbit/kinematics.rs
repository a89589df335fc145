//! Circular-orbit kinematics.
//!
//! Every function here is a pure function of the orbit parameters and an
//! explicit simulated time. Data flows one way:
//!
//! ```text
//! time -> frame angle -> plane normal -> (progress, base vector) -> position -> velocity
//! ```
//!
//! Positions are in meters in an Earth-centered frame, velocities in m/s.

use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

use super::constants::{
    EARTH_GM_KM_E10, EARTH_RADIUS_KM, EARTH_ROTATION_PERIOD, METERS_PER_KM, SPEED_UNIT_FACTOR,
};
use super::params::{OrbitConfig, OrbitPhase};

/// Angle of the rotating Earth frame at `now`, in radians.
///
/// The frame advances one full turn per [`EARTH_ROTATION_PERIOD`], starting
/// from `longitude_offset`.
pub fn frame_angle(now: Duration, longitude_offset: f64) -> f64 {
    longitude_offset + (now.as_secs_f64() / EARTH_ROTATION_PERIOD.as_secs_f64()) * TAU
}

/// Unit normal of the orbital plane for the given inclination and frame angle.
///
/// Degenerate for a zero inclination; that value is rejected when the
/// inclination is configured.
pub fn plane_normal(inclination: f64, frame_angle: f64) -> Vector3<f64> {
    Vector3::new(
        (-inclination).sin() * frame_angle.cos(),
        (-inclination).sin() * frame_angle.sin(),
        inclination.cos(),
    )
}

/// Orbital speed in m/s for an orbit whose radius is `orbit_height_km`.
#[inline]
pub fn orbital_speed(orbit_height_km: f64) -> f64 {
    (EARTH_GM_KM_E10 / orbit_height_km).sqrt() * SPEED_UNIT_FACTOR
}

/// Direction multiplier for the progress angle.
///
/// Orbits tilted past 90° move against the frame rotation.
#[inline]
pub fn progress_sign(inclination: f64) -> f64 {
    if inclination > FRAC_PI_2 {
        -1.0
    } else {
        1.0
    }
}

/// Signed angle traveled inside the orbital plane at `now`, in radians.
///
/// The distance traveled is measured against the Earth's circumference,
/// not the orbit's.
pub fn progress(speed: f64, now: Duration, inclination: f64, plane_offset: f64) -> f64 {
    let traveled = speed * now.as_secs_f64() / (EARTH_RADIUS_KM * METERS_PER_KM);
    progress_sign(inclination) * traveled + plane_offset
}

/// Position at zero progress, in meters.
pub fn base_vector(orbit_height_km: f64, inclination: f64, frame_angle: f64) -> Vector3<f64> {
    Vector3::new(
        inclination.cos() * frame_angle.cos(),
        inclination.cos() * frame_angle.sin(),
        inclination.sin(),
    ) * (orbit_height_km * METERS_PER_KM)
}

/// Rotates `x` by `angle` around the unit axis `n` (Rodrigues).
///
/// `(n·x)n + cos(a)·((n×x)×n) + sin(a)·(n×x)`
pub fn rotate_about_axis(n: &Vector3<f64>, angle: f64, x: &Vector3<f64>) -> Vector3<f64> {
    let n_cross_x = n.cross(x);
    n * n.dot(x) + n_cross_x.cross(n) * angle.cos() + n_cross_x * angle.sin()
}

/// Position for a given frame angle and progress angle.
pub fn frame_position(orbit: &OrbitConfig, frame_angle: f64, progress: f64) -> Vector3<f64> {
    let inclination = orbit.inclination_rad();
    let n = plane_normal(inclination, frame_angle);
    let x = base_vector(orbit.orbit_height_km(), inclination, frame_angle);
    rotate_about_axis(&n, progress, &x)
}

/// Position of the satellite at `now`.
pub fn position_at(orbit: &OrbitConfig, phase: &OrbitPhase, now: Duration) -> Vector3<f64> {
    let angle = frame_angle(now, phase.longitude_offset_rad);
    let speed = orbital_speed(orbit.orbit_height_km());
    let a = progress(speed, now, orbit.inclination_rad(), phase.plane_offset_rad);
    frame_position(orbit, angle, a)
}

/// Velocity for a satellite at `position` moving in the plane with normal `normal`.
///
/// Orthogonal to `position` by construction.
pub fn velocity_for(position: &Vector3<f64>, normal: &Vector3<f64>, speed: f64) -> Vector3<f64> {
    normal.cross(&position.normalize()) * speed
}

/// Velocity of the satellite at `now`.
pub fn velocity_at(orbit: &OrbitConfig, phase: &OrbitPhase, now: Duration) -> Vector3<f64> {
    let position = position_at(orbit, phase, now);
    let normal = plane_normal(
        orbit.inclination_rad(),
        frame_angle(now, phase.longitude_offset_rad),
    );
    velocity_for(&position, &normal, orbital_speed(orbit.orbit_height_km()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn config(altitude_km: f64, inclination_deg: f64) -> OrbitConfig {
        let mut orbit = OrbitConfig::default();
        orbit.set_altitude_km(altitude_km).unwrap();
        orbit.set_inclination_deg(inclination_deg).unwrap();
        orbit
    }

    #[test]
    fn frame_angle_turns_once_per_day() {
        assert_eq!(frame_angle(Duration::ZERO, 0.25), 0.25);
        assert!(approx(frame_angle(Duration::from_secs(6 * 3600), 0.0), PI / 2.0, 1e-12));
        assert!(approx(frame_angle(Duration::from_secs(24 * 3600), 1.0), 1.0 + TAU, 1e-12));
    }

    #[test]
    fn plane_normal_is_unit_length() {
        for incl in [0.1, 0.9, FRAC_PI_2, 2.5, PI] {
            for lat in [0.0, 1.0, 3.0, -2.0] {
                assert!(approx(plane_normal(incl, lat).norm(), 1.0, 1e-12));
            }
        }
    }

    #[test]
    fn base_vector_lies_in_orbital_plane() {
        let incl = 53f64.to_radians();
        for lat in [0.0, 0.7, 2.2] {
            let n = plane_normal(incl, lat);
            let x = base_vector(7371.009, incl, lat);
            assert!(n.dot(&x).abs() < 1e-6);
            assert!(approx(x.norm(), 7_371_009.0, 1e-6));
        }
    }

    #[test]
    fn speed_is_reported_in_meters_per_second() {
        // 1000 km altitude: v = sqrt(GM / r) with GM in m³/s² and r in m.
        let height_km = EARTH_RADIUS_KM + 1000.0;
        let expected = (3.98600436e14_f64 / (height_km * 1000.0)).sqrt();
        let speed = orbital_speed(height_km);
        assert!(approx(speed, expected, 1e-6), "speed {} expected {}", speed, expected);
        assert!(approx(speed, 7353.6, 1.0), "LEO speed should be ~7.35 km/s, got {}", speed);
    }

    #[test]
    fn progress_reverses_for_retrograde_orbits() {
        let t = Duration::from_secs(100);
        let prograde = progress(7000.0, t, 80f64.to_radians(), 0.0);
        let retrograde = progress(7000.0, t, 100f64.to_radians(), 0.0);
        assert!(prograde > 0.0);
        assert!(approx(prograde, -retrograde, 1e-12));
        // Exactly 90° still counts as prograde
        assert!(progress(7000.0, t, FRAC_PI_2, 0.0) > 0.0);
    }

    #[test]
    fn progress_includes_plane_offset() {
        assert_eq!(progress(7000.0, Duration::ZERO, 0.5, 1.25), 1.25);
        let expected = 7000.0 * 10.0 / (EARTH_RADIUS_KM * 1000.0) + 0.5;
        assert!(approx(progress(7000.0, Duration::from_secs(10), 0.5, 0.5), expected, 1e-15));
    }

    #[test]
    fn rotation_about_axis_matches_known_case() {
        // Quarter turn of x around z lands on y.
        let z = Vector3::new(0.0, 0.0, 1.0);
        let x = Vector3::new(1.0, 0.0, 0.0);
        let r = rotate_about_axis(&z, FRAC_PI_2, &x);
        assert!((r - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn rotation_is_periodic_in_angle() {
        let n = plane_normal(0.9, 0.4);
        let x = base_vector(7000.0, 0.9, 0.4);
        for a in [0.0, 0.3, 2.0, -1.5] {
            let r1 = rotate_about_axis(&n, a, &x);
            let r2 = rotate_about_axis(&n, a + TAU, &x);
            assert!((r1 - r2).norm() < 1e-6);
        }
    }

    #[test]
    fn position_keeps_orbit_radius() {
        let orbit = config(550.0, 97.6);
        let phase = OrbitPhase::new(0.3, 1.1);
        for secs in [0, 1, 60, 3600, 86_400, 1_000_000] {
            let p = position_at(&orbit, &phase, Duration::from_secs(secs));
            assert!(approx(p.norm(), orbit.orbit_height_m(), 1e-3));
        }
    }

    #[test]
    fn velocity_is_tangential() {
        let orbit = config(1000.0, 53.0);
        let phase = OrbitPhase::default();
        for secs in [0, 17, 600, 5000] {
            let t = Duration::from_secs(secs);
            let p = position_at(&orbit, &phase, t);
            let v = velocity_at(&orbit, &phase, t);
            assert!(p.normalize().dot(&v.normalize()).abs() < 1e-9);
            assert!(approx(v.norm(), orbital_speed(orbit.orbit_height_km()), 1e-6));
        }
    }
}
