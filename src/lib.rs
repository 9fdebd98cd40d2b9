//! # Bullet Drop
//!
//! Fixed-step exterior ballistics for a single projectile: gravity, quadratic
//! horizontal drag and constant lateral wind drift, integrated until the
//! projectile reaches the ground.
//!
//! ```
//! use bullet_drop::{BulletPreset, SimulationParameters, TrajectoryIntegrator};
//!
//! let integrator = TrajectoryIntegrator::default();
//! let result = integrator
//!     .run(&BulletPreset::Nato556.profile(), &SimulationParameters::default())
//!     .unwrap();
//! assert!(result.impact_distance > 0.0);
//! println!("{}", result.summary());
//! ```

// Re-export the main types and functions
pub use batch::{compare_profiles, sweep_parameters, NamedProfile, ProfileRun};
pub use config::{Scenario, ScenarioConfig};
pub use error::{BallisticsError, Result};
pub use integrator::{FlightPhase, IntegratorConfig, TrajectoryIntegrator};
pub use model::{Environment, ModelFidelity, TrajectoryModel};
pub use params::{PlanarPoint, SimulationParameters};
pub use profile::{BulletPreset, BulletProfile};
pub use result::{ImpactSummary, SimulationResult, TrajectorySample};

// Module declarations
pub mod batch;
pub mod config;
pub mod constants;
mod error;
pub mod integrator;
pub mod model;
mod params;
mod profile;
mod result;
