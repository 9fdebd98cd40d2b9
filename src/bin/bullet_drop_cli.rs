use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

use bullet_drop::{
    compare_profiles, BulletPreset, BulletProfile, Environment, IntegratorConfig, ModelFidelity,
    NamedProfile, PlanarPoint, ScenarioConfig, SimulationParameters, SimulationResult,
    TrajectoryIntegrator,
};

#[derive(Parser)]
#[command(name = "bullet-drop")]
#[command(author = "Ballistics Engine Team")]
#[command(version)]
#[command(about = "Bullet drop simulator with drag and wind drift", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a single shot until ground impact
    Simulate {
        /// JSON scenario file (replaces bullet, launch and integrator flags)
        #[arg(
            short = 's',
            long,
            conflicts_with_all = [
                "preset", "drag_coefficient", "area", "mass",
                "velocity", "angle", "direction", "origin_x", "origin_z",
                "wind_speed", "wind_direction", "height",
                "time_step", "max_ticks", "gravity", "air_density", "corrected",
            ]
        )]
        scenario: Option<PathBuf>,

        /// Built-in bullet (5.56, .308)
        #[arg(short = 'p', long)]
        preset: Option<String>,

        /// Drag coefficient for a custom bullet
        #[arg(long)]
        drag_coefficient: Option<f64>,

        /// Cross-sectional area for a custom bullet (m²)
        #[arg(long)]
        area: Option<f64>,

        /// Mass for a custom bullet (kg)
        #[arg(short = 'm', long)]
        mass: Option<f64>,

        #[command(flatten)]
        launch: LaunchArgs,

        #[command(flatten)]
        integration: IntegrationArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Full output (show all trajectory points)
        #[arg(long)]
        full: bool,
    },

    /// Fire several presets with the same launch parameters
    Compare {
        /// Presets to compare
        #[arg(short = 'p', long = "preset", num_args = 1.., default_values_t = vec!["5.56".to_string(), ".308".to_string()])]
        presets: Vec<String>,

        #[command(flatten)]
        launch: LaunchArgs,

        #[command(flatten)]
        integration: IntegrationArgs,
    },

    /// List built-in bullet profiles
    Presets,

    /// Display simulator information
    Info,
}

#[derive(Args, Debug, Clone)]
struct LaunchArgs {
    /// Muzzle velocity (m/s)
    #[arg(short = 'v', long, default_value = "710.0")]
    velocity: f64,

    /// Elevation angle (degrees)
    #[arg(short = 'a', long, default_value = "5.0", allow_hyphen_values = true)]
    angle: f64,

    /// Heading of travel (degrees)
    #[arg(short = 'd', long, default_value = "90.0", allow_hyphen_values = true)]
    direction: f64,

    /// Shooter x position (meters)
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    origin_x: f64,

    /// Shooter z position (meters)
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    origin_z: f64,

    /// Wind speed (m/s)
    #[arg(long, default_value = "4.0")]
    wind_speed: f64,

    /// Wind direction (degrees)
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    wind_direction: f64,

    /// Muzzle height above ground (meters)
    #[arg(long, default_value = "1.0")]
    height: f64,
}

impl LaunchArgs {
    fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            muzzle_velocity: self.velocity,
            elevation_angle: self.angle,
            azimuth_direction: self.direction,
            origin_offset: PlanarPoint::new(self.origin_x, self.origin_z),
            wind_direction: self.wind_direction,
            wind_speed: self.wind_speed,
            initial_height: self.height,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct IntegrationArgs {
    /// Time step (seconds)
    #[arg(long, default_value = "0.001")]
    time_step: f64,

    /// Abort after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Gravitational acceleration (m/s²)
    #[arg(long, default_value = "9.80665")]
    gravity: f64,

    /// Air density (kg/m³)
    #[arg(long, default_value = "1.2")]
    air_density: f64,

    /// Use the corrected drag equations instead of the reference ones
    #[arg(long)]
    corrected: bool,
}

impl IntegrationArgs {
    fn config(&self) -> IntegratorConfig {
        let defaults = IntegratorConfig::default();
        IntegratorConfig::default()
            .with_time_step(self.time_step)
            .with_max_ticks(self.max_ticks.or(defaults.max_ticks))
            .with_environment(Environment {
                gravity: self.gravity,
                air_density: self.air_density,
            })
            .with_fidelity(if self.corrected {
                ModelFidelity::Corrected
            } else {
                ModelFidelity::Reference
            })
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    name: &'a str,
    profile: &'a BulletProfile,
    parameters: &'a SimulationParameters,
    max_altitude: Option<f64>,
    result: &'a SimulationResult,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Simulate {
            scenario,
            preset,
            drag_coefficient,
            area,
            mass,
            launch,
            integration,
            output,
            full,
        } => {
            let (name, profile, params, config) = if let Some(path) = scenario {
                info!("Loading scenario from {}", path.display());
                let s = ScenarioConfig::load(&path)?.resolve()?;
                (s.name, s.profile, s.parameters, s.integrator)
            } else {
                let (name, profile) = match (drag_coefficient, area, mass) {
                    (Some(cd), Some(a), Some(m)) => {
                        if preset.is_some() {
                            return Err("give either --preset or a custom bullet, not both".into());
                        }
                        ("custom".to_string(), BulletProfile::new(cd, a, m))
                    }
                    (None, None, None) => {
                        let preset = BulletPreset::parse(preset.as_deref().unwrap_or("5.56"))?;
                        (preset.label().to_string(), preset.profile())
                    }
                    _ => {
                        return Err(
                            "a custom bullet needs all of --drag-coefficient, --area and --mass"
                                .into(),
                        )
                    }
                };
                (name, profile, launch.parameters(), integration.config())
            };

            let integrator = TrajectoryIntegrator::new(config);
            let result = integrator.run(&profile, &params)?;

            display_cli_results(&name, &profile, &params, &result, output, full)?;
        }

        Commands::Compare {
            presets,
            launch,
            integration,
        } => {
            let profiles = presets
                .iter()
                .map(|p| BulletPreset::parse(p).map(NamedProfile::from))
                .collect::<Result<Vec<_>, _>>()?;
            let params = launch.parameters();
            let integrator = TrajectoryIntegrator::new(integration.config());

            let runs = compare_profiles(&integrator, &profiles, &params);

            println!("┌──────────┬──────────┬────────────┬──────────┬──────────┬──────────┐");
            println!("│ Bullet   │ Time (s) │ Range (m)  │ Vx (m/s) │  X (m)   │  Z (m)   │");
            println!("├──────────┼──────────┼────────────┼──────────┼──────────┼──────────┤");
            let mut failed = 0;
            for run in &runs {
                match &run.result {
                    Ok(r) => println!(
                        "│ {:<8} │ {:>8.3} │ {:>10.2} │ {:>8.2} │ {:>8.2} │ {:>8.2} │",
                        run.label,
                        r.impact_time,
                        r.impact_distance,
                        r.final_horizontal_velocity,
                        r.final_coordinates.x,
                        r.final_coordinates.z
                    ),
                    Err(e) => {
                        failed += 1;
                        println!("│ {:<8} │ {:<54.54} │", run.label, e.to_string());
                    }
                }
            }
            println!("└──────────┴──────────┴────────────┴──────────┴──────────┴──────────┘");

            if failed > 0 {
                return Err(format!("{} of {} runs failed", failed, runs.len()).into());
            }
        }

        Commands::Presets => {
            println!("┌──────────┬──────────┬──────────────┬──────────┐");
            println!("│ Preset   │ Cd       │ Area (m²)    │ Mass (kg)│");
            println!("├──────────┼──────────┼──────────────┼──────────┤");
            for preset in BulletPreset::ALL {
                let p = preset.profile();
                println!(
                    "│ {:<8} │ {:>8.3} │ {:>12.4e} │ {:>8.4} │",
                    preset.label(),
                    p.drag_coefficient,
                    p.cross_sectional_area,
                    p.mass
                );
            }
            println!("└──────────┴──────────┴──────────────┴──────────┘");
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      BULLET DROP SIMULATOR v{:<10} ║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Fixed-step point-mass trajectory:      ║");
            println!("║ • Drag-free vertical fall              ║");
            println!("║ • Quadratic horizontal drag            ║");
            println!("║ • Constant lateral wind drift          ║");
            println!("║ • Table, JSON and CSV output           ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_cli_results(
    name: &str,
    profile: &BulletProfile,
    params: &SimulationParameters,
    result: &SimulationResult,
    format: OutputFormat,
    full: bool,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            let report = JsonReport {
                name,
                profile,
                parameters: params,
                max_altitude: result.max_altitude(),
                result,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        OutputFormat::Csv => {
            println!("time,distance,altitude,horizontal_velocity,x,z");
            for s in &result.samples {
                println!(
                    "{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
                    s.time, s.downrange_distance, s.altitude, s.horizontal_velocity, s.x, s.z
                );
            }
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         TRAJECTORY RESULTS             ║");
            println!("║ Bullet: {:<30} ║", name);
            println!("╠════════════════════════════════════════╣");
            println!("║ Impact Distance:   {:>8.2} m          ║", result.impact_distance);
            println!("║ Impact Time:       {:>8.3} s          ║", result.impact_time);
            println!("║ Max Altitude:      {:>8.2} m          ║", result.max_altitude().unwrap_or(0.0));
            println!("║ Final Velocity:    {:>8.2} m/s        ║", result.final_horizontal_velocity);
            println!("║ Touchdown X:       {:>8.2} m          ║", result.final_coordinates.x);
            println!("║ Touchdown Z:       {:>8.2} m          ║", result.final_coordinates.z);
            println!("╚════════════════════════════════════════╝");

            let n = result.samples.len();
            if n > 0 {
                if full {
                    println!("\nFull Trajectory Points:");
                } else {
                    println!("\nTrajectory Points (every {:.2}s):", result.impact_time / 10.0);
                }
                println!("┌──────────┬──────────┬──────────┬──────────┬──────────┬──────────┐");
                println!("│ Time (s) │ Dist (m) │  Alt (m) │ Vx (m/s) │  X (m)   │  Z (m)   │");
                println!("├──────────┼──────────┼──────────┼──────────┼──────────┼──────────┤");

                let step = if full { 1 } else { (n / 10).max(1) };
                for (i, s) in result.samples.iter().enumerate() {
                    if i % step == 0 || i == n - 1 {
                        println!(
                            "│ {:>8.3} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.2} │",
                            s.time, s.downrange_distance, s.altitude, s.horizontal_velocity, s.x, s.z
                        );
                    }
                }
                println!("└──────────┴──────────┴──────────┴──────────┴──────────┴──────────┘");
            }

            println!("\n{}", result.summary());
        }
    }

    Ok(())
}
