use nalgebra::Vector3;
use serde::Serialize;
use std::fmt;

use crate::params::PlanarPoint;

/// State of the projectile at one accepted tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub time: f64,                  // s
    pub downrange_distance: f64,    // m
    pub altitude: f64,              // m
    pub horizontal_velocity: f64,   // m/s
    pub x: f64,                     // world x including wind drift
    pub z: f64,                     // world z including wind drift
}

/// Full output of one integration run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub samples: Vec<TrajectorySample>,
    pub impact_distance: f64,
    pub impact_time: f64,
    pub final_horizontal_velocity: f64,
    pub final_coordinates: PlanarPoint,
    /// Ticks evaluated, including the terminal one that is not stored
    pub ticks: u64,
}

impl SimulationResult {
    pub fn max_altitude(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.altitude)
            .fold(None, |acc, a| Some(acc.map_or(a, |m: f64| m.max(a))))
    }

    pub fn last_sample(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    // Plot-ready series

    pub fn distance_altitude_series(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.downrange_distance, s.altitude)).collect()
    }

    pub fn time_altitude_series(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.time, s.altitude)).collect()
    }

    pub fn time_distance_series(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.time, s.downrange_distance)).collect()
    }

    pub fn time_speed_series(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.time, s.horizontal_velocity)).collect()
    }

    pub fn planar_series(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.x, s.z)).collect()
    }

    /// World points ordered (x, z, altitude) for a 3D view
    pub fn spatial_series(&self) -> Vec<Vector3<f64>> {
        self.samples
            .iter()
            .map(|s| Vector3::new(s.x, s.z, s.altitude))
            .collect()
    }

    pub fn summary(&self) -> ImpactSummary<'_> {
        ImpactSummary { result: self }
    }
}

/// Human-readable impact report
pub struct ImpactSummary<'a> {
    result: &'a SimulationResult,
}

impl fmt::Display for ImpactSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        writeln!(
            f,
            "Bullet touched the ground at {:.3}s, {:.2}m away",
            r.impact_time, r.impact_distance
        )?;
        writeln!(
            f,
            "Coordinates of the touchdown: {:.2}m, {:.2}m",
            r.final_coordinates.x, r.final_coordinates.z
        )?;
        write!(f, "Final horizontal velocity is {:.2}m/s", r.final_horizontal_velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, distance: f64, altitude: f64) -> TrajectorySample {
        TrajectorySample {
            time,
            downrange_distance: distance,
            altitude,
            horizontal_velocity: 700.0 - time,
            x: distance,
            z: 0.5 * time,
        }
    }

    fn result() -> SimulationResult {
        SimulationResult {
            samples: vec![sample(0.0, 0.7, 1.0), sample(0.001, 1.4, 1.5), sample(0.002, 2.1, 1.2)],
            impact_distance: 2.8,
            impact_time: 0.003,
            final_horizontal_velocity: 699.5,
            final_coordinates: PlanarPoint::new(2.1, 0.001),
            ticks: 4,
        }
    }

    #[test]
    fn test_max_altitude() {
        assert_eq!(result().max_altitude(), Some(1.5));

        let empty = SimulationResult { samples: Vec::new(), ..result() };
        assert_eq!(empty.max_altitude(), None);
    }

    #[test]
    fn test_series_follow_sample_order() {
        let r = result();
        assert_eq!(r.distance_altitude_series(), vec![(0.7, 1.0), (1.4, 1.5), (2.1, 1.2)]);
        assert_eq!(r.time_distance_series()[2], (0.002, 2.1));
        assert_eq!(r.time_altitude_series().len(), 3);
        assert_eq!(r.time_speed_series()[1], (0.001, 700.0 - 0.001));
        assert_eq!(r.planar_series()[1], (1.4, 0.0005));

        let points = r.spatial_series();
        assert_eq!(points[1], Vector3::new(1.4, 0.0005, 1.5));
    }

    #[test]
    fn test_summary_lines() {
        let text = result().summary().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Bullet touched the ground at 0.003s, 2.80m away");
        assert_eq!(lines[1], "Coordinates of the touchdown: 2.10m, 0.00m");
        assert_eq!(lines[2], "Final horizontal velocity is 699.50m/s");
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(result()).unwrap();
        assert_eq!(json["ticks"], 4);
        assert_eq!(json["samples"].as_array().unwrap().len(), 3);
        assert_eq!(json["final_coordinates"]["x"], 2.1);
    }
}
