//! Fixed-step trajectory integration.
//!
//! The integrator owns simulation time and projectile state. Each tick it
//! evaluates altitude from the drag-free vertical fall, decays horizontal
//! speed under drag, advances downrange distance and either records a
//! sample or, once altitude reaches the ground, stops.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_TICKS, DEFAULT_TIME_STEP_S, MAX_PREALLOCATED_SAMPLES};
use crate::error::{BallisticsError, Result};
use crate::model::{Environment, ModelFidelity, TrajectoryModel};
use crate::params::{PlanarPoint, SimulationParameters};
use crate::profile::BulletProfile;
use crate::result::{SimulationResult, TrajectorySample};

/// Integration settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    pub time_step: f64,             // seconds
    /// Give up after this many ticks; `None` runs until impact
    pub max_ticks: Option<u64>,
    pub environment: Environment,
    pub fidelity: ModelFidelity,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP_S,
            max_ticks: Some(DEFAULT_MAX_TICKS),
            environment: Environment::default(),
            fidelity: ModelFidelity::Reference,
        }
    }
}

impl IntegratorConfig {
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_fidelity(mut self, fidelity: ModelFidelity) -> Self {
        self.fidelity = fidelity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(BallisticsError::InvalidParameters(format!(
                "time step must be finite and > 0 (got {})",
                self.time_step
            )));
        }
        if self.max_ticks == Some(0) {
            return Err(BallisticsError::InvalidParameters(
                "tick ceiling must allow at least one tick".to_string(),
            ));
        }
        let env = &self.environment;
        if !env.gravity.is_finite() || env.gravity <= 0.0 {
            return Err(BallisticsError::InvalidParameters(format!(
                "gravity must be finite and > 0 (got {})",
                env.gravity
            )));
        }
        if !env.air_density.is_finite() || env.air_density < 0.0 {
            return Err(BallisticsError::InvalidParameters(format!(
                "air density must be finite and >= 0 (got {})",
                env.air_density
            )));
        }
        Ok(())
    }
}

/// Flight state machine: `Flying` until altitude reaches the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    Flying,
    Impacted,
}

/// Runs one projectile from launch to ground impact
#[derive(Debug, Clone, Default)]
pub struct TrajectoryIntegrator {
    config: IntegratorConfig,
}

impl TrajectoryIntegrator {
    pub fn new(config: IntegratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    pub fn set_time_step(&mut self, step: f64) {
        self.config.time_step = step;
    }

    pub fn set_max_ticks(&mut self, max_ticks: Option<u64>) {
        self.config.max_ticks = max_ticks;
    }

    pub fn model(&self) -> TrajectoryModel {
        TrajectoryModel::new(self.config.environment, self.config.fidelity)
    }

    pub fn run(
        &self,
        profile: &BulletProfile,
        params: &SimulationParameters,
    ) -> Result<SimulationResult> {
        self.config.validate()?;
        profile.validate()?;
        params.validate()?;

        let model = self.model();
        let dt = self.config.time_step;
        let max_ticks = self.config.max_ticks.unwrap_or(u64::MAX);

        let (mut vx, vy0) = TrajectoryModel::initial_velocity_components(
            params.muzzle_velocity,
            params.elevation_angle,
        );
        // Wind is constant over the whole flight
        let (wind_x, wind_z) = model.wind_components(params.wind_direction, params.wind_speed);

        debug!(
            "Starting run: v0={:.1} m/s elev={:.2}° az={:.2}° h0={:.2} m dt={} fidelity={:?}",
            params.muzzle_velocity,
            params.elevation_angle,
            params.azimuth_direction,
            params.initial_height,
            dt,
            self.config.fidelity
        );

        let mut samples = Vec::with_capacity(self.estimate_samples(vy0, params.initial_height));
        let mut phase = FlightPhase::Flying;
        let mut tick: u64 = 0;
        let mut distance = 0.0;
        let mut impact_time = 0.0;

        while phase == FlightPhase::Flying {
            if tick >= max_ticks {
                warn!("Tick ceiling of {} reached before impact", max_ticks);
                return Err(BallisticsError::TickLimitExceeded { max_ticks });
            }

            // Derived from the tick count so time does not accumulate rounding error
            let time = tick as f64 * dt;
            let altitude = params.initial_height + model.vertical_displacement(vy0, time);

            let drag_dt = match self.config.fidelity {
                ModelFidelity::Reference => time,
                ModelFidelity::Corrected => dt,
            };
            vx = model.horizontal_velocity_with_drag(vx, drag_dt, profile);
            distance += TrajectoryModel::horizontal_distance_step(vx, dt);

            if !altitude.is_finite() || !vx.is_finite() || !distance.is_finite() {
                warn!(
                    "Non-finite state at tick {} (alt={}, vx={}, x={})",
                    tick, altitude, vx, distance
                );
                return Err(BallisticsError::NumericDivergence { tick, time });
            }

            tick += 1;

            if altitude <= 0.0 {
                trace!("Terminal tick {}: alt={:.4} m x={:.3} m", tick - 1, altitude, distance);
                impact_time = time;
                phase = FlightPhase::Impacted;
                continue;
            }

            let (planar_x, planar_z) = model.planar_components(distance, params.azimuth_direction);
            samples.push(TrajectorySample {
                time,
                downrange_distance: distance,
                altitude,
                horizontal_velocity: vx,
                x: planar_x + params.origin_offset.x + wind_x * time,
                z: planar_z + params.origin_offset.z + wind_z * time,
            });
        }

        let final_coordinates = samples
            .last()
            .map(|s| PlanarPoint::new(s.x, s.z))
            .unwrap_or(params.origin_offset);

        debug!(
            "Impact after {} ticks: t={:.3} s x={:.2} m vx={:.2} m/s",
            tick, impact_time, distance, vx
        );

        Ok(SimulationResult {
            samples,
            impact_distance: distance,
            impact_time,
            final_horizontal_velocity: vx,
            final_coordinates,
            ticks: tick,
        })
    }

    /// Ticks until the drag-free fall reaches the ground, capped.
    fn estimate_samples(&self, vy0: f64, initial_height: f64) -> usize {
        let g = self.config.environment.gravity;
        let flight_time = (vy0 + (vy0 * vy0 + 2.0 * g * initial_height).sqrt()) / g;
        let ticks = (flight_time / self.config.time_step).ceil() + 1.0;
        if !ticks.is_finite() || ticks < 0.0 {
            return 0;
        }
        let cap = self
            .config
            .max_ticks
            .map_or(MAX_PREALLOCATED_SAMPLES, |m| (m as usize).min(MAX_PREALLOCATED_SAMPLES));
        (ticks as usize).min(cap)
    }
}
