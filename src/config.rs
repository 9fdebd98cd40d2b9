//! # Scenario files
//!
//! A scenario bundles a bullet, launch parameters and integrator settings in
//! one JSON document:
//!
//! ```json
//! {
//!   "preset": "5.56",
//!   "parameters": { "muzzle_velocity": 710.0, "elevation_angle": 5.0 },
//!   "integrator": { "time_step": 0.001, "fidelity": "reference" }
//! }
//! ```
//!
//! Either `profile` or `preset` names the bullet. Everything else falls back
//! to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BallisticsError, Result};
use crate::integrator::IntegratorConfig;
use crate::params::SimulationParameters;
use crate::profile::{BulletPreset, BulletProfile};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Display name for reports
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile: Option<BulletProfile>,
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub parameters: SimulationParameters,
    #[serde(default)]
    pub integrator: IntegratorConfig,
}

/// A scenario with the bullet resolved to concrete values
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub profile: BulletProfile,
    pub parameters: SimulationParameters,
    pub integrator: IntegratorConfig,
}

impl ScenarioConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            BallisticsError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn resolve(self) -> Result<Scenario> {
        let (profile, default_name) = match (self.profile, self.preset.as_deref()) {
            (Some(_), Some(_)) => {
                return Err(BallisticsError::Config(
                    "give either `profile` or `preset`, not both".to_string(),
                ))
            }
            (Some(profile), None) => (profile, "custom".to_string()),
            (None, Some(name)) => {
                let preset = BulletPreset::parse(name)?;
                (preset.profile(), preset.label().to_string())
            }
            (None, None) => {
                return Err(BallisticsError::Config(
                    "scenario needs a `profile` or a `preset`".to_string(),
                ))
            }
        };

        Ok(Scenario {
            name: self.name.unwrap_or(default_name),
            profile,
            parameters: self.parameters,
            integrator: self.integrator,
        })
    }
}
