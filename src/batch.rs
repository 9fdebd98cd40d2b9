//! Parallel comparison runs.
//!
//! Every run is independent: profiles and parameters are immutable and each
//! result is owned by the thread that produced it, so runs fan out over the
//! rayon pool without coordination.

use rayon::prelude::*;

use crate::error::Result;
use crate::integrator::TrajectoryIntegrator;
use crate::params::SimulationParameters;
use crate::profile::{BulletPreset, BulletProfile};
use crate::result::SimulationResult;

/// A profile tagged with a display name
#[derive(Debug, Clone, PartialEq)]
pub struct NamedProfile {
    pub label: String,
    pub profile: BulletProfile,
}

impl NamedProfile {
    pub fn new(label: impl Into<String>, profile: BulletProfile) -> Self {
        Self {
            label: label.into(),
            profile,
        }
    }
}

impl From<BulletPreset> for NamedProfile {
    fn from(preset: BulletPreset) -> Self {
        NamedProfile::new(preset.label(), preset.profile())
    }
}

/// Outcome of one run in a batch
#[derive(Debug, Clone)]
pub struct ProfileRun {
    pub label: String,
    pub result: Result<SimulationResult>,
}

/// Fire every profile with the same launch parameters.
///
/// Results come back in input order; a failing run does not stop the others.
pub fn compare_profiles(
    integrator: &TrajectoryIntegrator,
    profiles: &[NamedProfile],
    params: &SimulationParameters,
) -> Vec<ProfileRun> {
    profiles
        .par_iter()
        .map(|named| ProfileRun {
            label: named.label.clone(),
            result: integrator.run(&named.profile, params),
        })
        .collect()
}

/// Run several launch setups against one profile.
pub fn sweep_parameters(
    integrator: &TrajectoryIntegrator,
    profile: &BulletProfile,
    params: &[SimulationParameters],
) -> Vec<Result<SimulationResult>> {
    params
        .par_iter()
        .map(|p| integrator.run(profile, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BallisticsError;

    #[test]
    fn test_compare_keeps_input_order() {
        let integrator = TrajectoryIntegrator::default();
        let profiles: Vec<NamedProfile> = BulletPreset::ALL.iter().map(|&p| p.into()).collect();
        let params = SimulationParameters::default();

        let runs = compare_profiles(&integrator, &profiles, &params);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].label, "5.56mm");
        assert_eq!(runs[1].label, ".308");

        // Parallel runs match a sequential call exactly
        for (run, named) in runs.iter().zip(&profiles) {
            let sequential = integrator.run(&named.profile, &params).unwrap();
            assert_eq!(run.result.as_ref().unwrap(), &sequential);
        }
    }

    #[test]
    fn test_compare_isolates_failures() {
        let integrator = TrajectoryIntegrator::default();
        let profiles = vec![
            NamedProfile::new("broken", BulletProfile::new(0.3, 1e-5, -1.0)),
            BulletPreset::Win308.into(),
        ];
        let runs = compare_profiles(&integrator, &profiles, &SimulationParameters::default());

        assert!(matches!(runs[0].result, Err(BallisticsError::InvalidProfile(_))));
        assert!(runs[1].result.is_ok());
    }

    #[test]
    fn test_sweep_elevation() {
        let integrator = TrajectoryIntegrator::default();
        let params: Vec<SimulationParameters> = [1.0, 5.0, 10.0]
            .iter()
            .map(|&elevation_angle| SimulationParameters {
                elevation_angle,
                ..SimulationParameters::default()
            })
            .collect();

        let results = sweep_parameters(&integrator, &BulletPreset::Nato556.profile(), &params);
        let times: Vec<f64> = results.iter().map(|r| r.as_ref().unwrap().impact_time).collect();
        assert!(times[0] < times[1] && times[1] < times[2]);
    }
}
