/// Physical and numerical constants used by the trajectory model

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.80665;

/// Air density used by the drag model (kg/m³)
///
/// Slightly below ICAO sea level (1.225) and held fixed for every altitude.
pub const AIR_DENSITY_KG_M3: f64 = 1.2;

/// Fixed integration step (seconds)
pub const DEFAULT_TIME_STEP_S: f64 = 0.001;

/// Trig factors below this value are treated as zero when splitting a
/// magnitude into planar x/z components.
pub const COMPONENT_DEADBAND: f64 = 1e-4;

/// Default ceiling on integration ticks.
///
/// At the default step this is 10 000 s of simulated flight, far past any
/// realistic small-arms trajectory.
pub const DEFAULT_MAX_TICKS: u64 = 10_000_000;

/// Upper bound on the sample buffer reserved before integration starts.
pub const MAX_PREALLOCATED_SAMPLES: usize = 1 << 20;
