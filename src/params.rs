use serde::{Deserialize, Serialize};

use crate::error::{BallisticsError, Result};

/// Point on the ground plane (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub z: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

/// Launch and environment settings for one shot.
///
/// Angles stay in degrees here; the model converts them at the trig call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub muzzle_velocity: f64,       // m/s
    pub elevation_angle: f64,       // degrees, launch pitch
    pub azimuth_direction: f64,     // degrees, horizontal heading
    pub origin_offset: PlanarPoint,
    pub wind_direction: f64,        // degrees
    pub wind_speed: f64,            // m/s
    pub initial_height: f64,        // meters
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            muzzle_velocity: 710.0,
            elevation_angle: 5.0,
            azimuth_direction: 90.0,
            origin_offset: PlanarPoint::default(),
            wind_direction: 0.0,
            wind_speed: 4.0,
            initial_height: 1.0,
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("muzzle velocity", self.muzzle_velocity),
            ("elevation angle", self.elevation_angle),
            ("azimuth direction", self.azimuth_direction),
            ("origin x", self.origin_offset.x),
            ("origin z", self.origin_offset.z),
            ("wind direction", self.wind_direction),
            ("wind speed", self.wind_speed),
            ("initial height", self.initial_height),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(BallisticsError::InvalidParameters(format!(
                    "{} must be finite (got {})",
                    name, value
                )));
            }
        }

        if self.muzzle_velocity <= 0.0 {
            return Err(BallisticsError::InvalidParameters(format!(
                "muzzle velocity must be > 0 (got {})",
                self.muzzle_velocity
            )));
        }
        // Past vertical the horizontal component turns negative and the
        // projectile flies backwards
        if self.elevation_angle.abs() > 90.0 {
            return Err(BallisticsError::InvalidParameters(format!(
                "elevation angle must be within [-90, 90] degrees (got {})",
                self.elevation_angle
            )));
        }
        if self.wind_speed < 0.0 {
            return Err(BallisticsError::InvalidParameters(format!(
                "wind speed must be >= 0 (got {})",
                self.wind_speed
            )));
        }
        if self.initial_height < 0.0 {
            return Err(BallisticsError::InvalidParameters(format!(
                "initial height must be >= 0 (got {})",
                self.initial_height
            )));
        }
        Ok(())
    }
}
