//! Point-mass trajectory model.
//!
//! Stateless kinematics used by the integrator on every tick: launch velocity
//! split, drag-free vertical fall, drag-decelerated horizontal speed, and the
//! sine/cosine split of a ground-plane magnitude into world x/z.
//!
//! Two fidelities are supported. `Reference` reproduces the bullet drop
//! notebook this model was derived from, including its arithmetic quirks;
//! `Corrected` is the textbook form of the same equations.

use serde::{Deserialize, Serialize};

use crate::constants::{AIR_DENSITY_KG_M3, COMPONENT_DEADBAND, G_ACCEL_MPS2};
use crate::profile::BulletProfile;

/// Physical constants the model is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub gravity: f64,       // m/s²
    pub air_density: f64,   // kg/m³
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            gravity: G_ACCEL_MPS2,
            air_density: AIR_DENSITY_KG_M3,
        }
    }
}

/// Which form of the drag and decomposition equations to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFidelity {
    /// Reference behaviour:
    /// - drag deceleration is `-(Cd·ρ·A·v²) / 2 · m` (mass multiplies)
    /// - the integrator feeds total elapsed time as the drag `dt`
    /// - the deadband is signed, so negative trig factors collapse to zero
    #[default]
    Reference,
    /// `-(Cd·ρ·A·v²) / (2·m)`, per-step `dt`, deadband on `|factor|`
    Corrected,
}

/// Stateless trajectory equations bound to an environment
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrajectoryModel {
    pub environment: Environment,
    pub fidelity: ModelFidelity,
}

impl TrajectoryModel {
    pub fn new(environment: Environment, fidelity: ModelFidelity) -> Self {
        Self { environment, fidelity }
    }

    /// Split launch speed into (vx, vy), angle measured from horizontal.
    pub fn initial_velocity_components(speed: f64, angle_deg: f64) -> (f64, f64) {
        let angle_rad = angle_deg.to_radians();
        (speed * angle_rad.cos(), speed * angle_rad.sin())
    }

    /// Height gained after `t` seconds with constant initial vertical speed.
    /// No drag acts on this axis.
    pub fn vertical_displacement(&self, vy: f64, t: f64) -> f64 {
        vy * t - 0.5 * self.environment.gravity * t * t
    }

    /// Horizontal deceleration from quadratic drag (m/s², non-positive for valid profiles)
    pub fn drag_deceleration(&self, vx: f64, profile: &BulletProfile) -> f64 {
        let drag = profile.drag_coefficient
            * self.environment.air_density
            * profile.cross_sectional_area
            * vx
            * vx;

        match self.fidelity {
            ModelFidelity::Reference => -drag / 2.0 * profile.mass,
            ModelFidelity::Corrected => -drag / (2.0 * profile.mass),
        }
    }

    pub fn horizontal_velocity_with_drag(&self, vx: f64, dt: f64, profile: &BulletProfile) -> f64 {
        vx + self.drag_deceleration(vx, profile) * dt
    }

    pub fn horizontal_distance_step(vx: f64, dt: f64) -> f64 {
        vx * dt
    }

    /// Split a ground-plane magnitude into world (x, z) along a heading.
    /// x follows sin, z follows cos; heading 0° points along +z.
    pub fn planar_components(&self, magnitude: f64, angle_deg: f64) -> (f64, f64) {
        let angle_rad = angle_deg.to_radians();
        let x = self.deadband(angle_rad.sin());
        let z = self.deadband(angle_rad.cos());
        (x * magnitude, z * magnitude)
    }

    /// Wind velocity split into (x, z) m/s.
    pub fn wind_components(&self, wind_angle_deg: f64, wind_speed: f64) -> (f64, f64) {
        self.planar_components(wind_speed, wind_angle_deg)
    }

    fn deadband(&self, factor: f64) -> f64 {
        let below = match self.fidelity {
            ModelFidelity::Reference => factor < COMPONENT_DEADBAND,
            ModelFidelity::Corrected => factor.abs() < COMPONENT_DEADBAND,
        };
        if below {
            0.0
        } else {
            factor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn reference() -> TrajectoryModel {
        TrajectoryModel::default()
    }

    fn corrected() -> TrajectoryModel {
        TrajectoryModel::new(Environment::default(), ModelFidelity::Corrected)
    }

    #[test]
    fn test_initial_velocity_components() {
        let (vx, vy) = TrajectoryModel::initial_velocity_components(710.0, 90.0);
        assert!(vx.abs() < 1e-9);
        assert!((vy - 710.0).abs() < EPS);

        let (vx, vy) = TrajectoryModel::initial_velocity_components(710.0, 0.0);
        assert!((vx - 710.0).abs() < EPS);
        assert_eq!(vy, 0.0);

        let (vx, vy) = TrajectoryModel::initial_velocity_components(100.0, 30.0);
        assert!((vx - 86.602540378).abs() < 1e-6);
        assert!((vy - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_displacement() {
        let m = reference();
        assert_eq!(m.vertical_displacement(10.0, 0.0), 0.0);
        assert!((m.vertical_displacement(10.0, 1.0) - (10.0 - 4.903325)).abs() < EPS);

        // Apex at vy/g, back to zero at 2·vy/g
        let t_land = 2.0 * 10.0 / G_ACCEL_MPS2;
        assert!(m.vertical_displacement(10.0, t_land).abs() < 1e-9);
    }

    #[test]
    fn test_environment_is_injectable() {
        let moon = TrajectoryModel::new(
            Environment { gravity: 1.62, air_density: 0.0 },
            ModelFidelity::Reference,
        );
        assert!((moon.vertical_displacement(0.0, 2.0) + 3.24).abs() < EPS);

        let profile = BulletProfile::new(0.3, 5e-5, 0.01);
        assert_eq!(moon.horizontal_velocity_with_drag(800.0, 1.0, &profile), 800.0);
    }

    // Reference drag multiplies by mass instead of dividing. Keep this pinned:
    // changing it alters every reference trajectory.
    #[test]
    fn test_reference_drag_multiplies_by_mass() {
        let profile = BulletProfile::new(0.5, 0.01, 2.0);
        // Cd·ρ·A·v² = 0.5 · 1.2 · 0.01 · 100 = 0.6
        let vx = reference().horizontal_velocity_with_drag(10.0, 1.0, &profile);
        assert!((vx - 9.4).abs() < EPS, "got {}", vx);

        let vx = corrected().horizontal_velocity_with_drag(10.0, 1.0, &profile);
        assert!((vx - 9.85).abs() < EPS, "got {}", vx);
    }

    #[test]
    fn test_drag_scales_with_dt() {
        let profile = BulletProfile::new(0.388, 0.000025419304, 0.0123);
        let m = reference();
        let a = m.drag_deceleration(700.0, &profile);
        assert!(a < 0.0);
        let v1 = m.horizontal_velocity_with_drag(700.0, 0.001, &profile);
        let v2 = m.horizontal_velocity_with_drag(700.0, 0.002, &profile);
        assert!(((700.0 - v2) - 2.0 * (700.0 - v1)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_drag_coefficient_keeps_speed() {
        let profile = BulletProfile::new(0.0, 5e-5, 0.01);
        assert_eq!(reference().horizontal_velocity_with_drag(500.0, 3.0, &profile), 500.0);
    }

    #[test]
    fn test_horizontal_distance_step() {
        assert!((TrajectoryModel::horizontal_distance_step(700.0, 0.001) - 0.7).abs() < EPS);
        assert_eq!(TrajectoryModel::horizontal_distance_step(700.0, 0.0), 0.0);
    }

    #[test]
    fn test_planar_components_snap_to_zero() {
        let m = reference();

        // cos(90°) ≈ 6e-17 must come out as exactly zero
        let (x, z) = m.planar_components(250.0, 90.0);
        assert!((x - 250.0).abs() < EPS);
        assert_eq!(z, 0.0);

        let (x, z) = m.planar_components(250.0, 0.0);
        assert_eq!(x, 0.0);
        assert!((z - 250.0).abs() < EPS);

        // Factor just under the deadband
        let tiny_deg = (0.5e-4f64).asin().to_degrees();
        let (x, _) = m.planar_components(1000.0, tiny_deg);
        assert_eq!(x, 0.0);

        let (x, z) = m.planar_components(100.0, 45.0);
        assert!((x - 70.710678118).abs() < 1e-6);
        assert!((z - 70.710678118).abs() < 1e-6);
    }

    // Reference deadband is signed: headings with negative components collapse.
    #[test]
    fn test_reference_deadband_drops_negative_components() {
        let (x, z) = reference().planar_components(100.0, 270.0);
        assert_eq!(x, 0.0);
        assert_eq!(z, 0.0);

        let (x, z) = corrected().planar_components(100.0, 270.0);
        assert!((x + 100.0).abs() < EPS);
        assert_eq!(z, 0.0);

        let (x, z) = corrected().planar_components(100.0, 180.0);
        assert_eq!(x, 0.0);
        assert!((z + 100.0).abs() < EPS);
    }

    #[test]
    fn test_wind_components_match_planar_split() {
        let m = reference();
        for angle in [0.0, 30.0, 90.0, 135.0, 200.0] {
            assert_eq!(m.wind_components(angle, 4.0), m.planar_components(4.0, angle));
        }
        assert_eq!(m.wind_components(60.0, 0.0), (0.0, 0.0));
    }
}
