use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use dispersion_engine::cli_api::{compute_checked, format_result, load_parameters, OutputFormat};
use dispersion_engine::{FiringParameters, ImpactSurface, MunitionType};

#[derive(Parser)]
#[command(name = "dispersion-cli")]
#[command(author = "Dispersion Engine Team")]
#[command(version = "0.1.0")]
#[command(about = "Dispersion cone and safety-radius geometry for ballistic firing overlays", long_about = None)]
struct Cli {
    /// Log at debug level (otherwise RUST_LOG, default warn)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the overlay geometry for one set of firing parameters
    Compute {
        /// JSON parameter file; flags below override its values
        #[arg(short = 'p', long)]
        params: Option<PathBuf>,

        #[command(flatten)]
        overrides: ParameterOverrides,

        /// Output format (table, json, geojson, csv)
        #[arg(short = 'o', long, default_value = "table", value_parser = parse_format)]
        output: OutputFormat,
    },

    /// Print the default parameters as JSON
    Defaults,

    /// Display engine information
    Info,
}

#[derive(Args, Debug)]
struct ParameterOverrides {
    /// Munition class
    #[arg(long, value_parser = parse_munition)]
    munition: Option<MunitionType>,

    /// Impact surface
    #[arg(long, value_parser = parse_surface)]
    impact: Option<ImpactSurface>,

    /// Dispersion half-angle (degrees)
    #[arg(long, allow_hyphen_values = true)]
    dispersion_angle: Option<f64>,

    /// Primary range X (meters)
    #[arg(short = 'x', long, allow_hyphen_values = true)]
    distance_x: Option<f64>,

    /// Auxiliary angle P (degrees)
    #[arg(long, allow_hyphen_values = true)]
    angle_p: Option<f64>,

    /// Lateral distance W (meters)
    #[arg(long, allow_hyphen_values = true)]
    distance_w: Option<f64>,

    /// Distance A (meters, explosive only)
    #[arg(long, allow_hyphen_values = true)]
    distance_a: Option<f64>,

    /// Distance B (meters, safety circle offset)
    #[arg(long, allow_hyphen_values = true)]
    distance_b: Option<f64>,

    /// Maximum height (meters, informational)
    #[arg(long, allow_hyphen_values = true)]
    max_height: Option<f64>,

    /// Origin latitude (degrees)
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Origin longitude (degrees)
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Fire bearing (degrees clockwise from north)
    #[arg(short = 'b', long, allow_hyphen_values = true)]
    bearing: Option<f64>,
}

impl ParameterOverrides {
    fn apply(&self, mut params: FiringParameters) -> FiringParameters {
        if let Some(v) = self.munition {
            params.munition_type = v;
        }
        if let Some(v) = self.impact {
            params.impact_surface = v;
        }
        if let Some(v) = self.dispersion_angle {
            params.dispersion_angle = v;
        }
        if let Some(v) = self.distance_x {
            params.distance_x = v;
        }
        if let Some(v) = self.angle_p {
            params.angle_p = v;
        }
        if let Some(v) = self.distance_w {
            params.distance_w = v;
        }
        if let Some(v) = self.distance_a {
            params.distance_a = v;
        }
        if let Some(v) = self.distance_b {
            params.distance_b = v;
        }
        if let Some(v) = self.max_height {
            params.max_height = v;
        }
        if let Some(v) = self.latitude {
            params.latitude = v;
        }
        if let Some(v) = self.longitude {
            params.longitude = v;
        }
        if let Some(v) = self.bearing {
            params.fire_bearing = v;
        }
        params
    }
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(s).ok_or_else(|| format!("unknown output format '{s}' (table, json, geojson, csv)"))
}

fn parse_munition(s: &str) -> Result<MunitionType, String> {
    MunitionType::from_str(s).ok_or_else(|| format!("unknown munition type '{s}' (explosive, non-explosive)"))
}

fn parse_surface(s: &str) -> Result<ImpactSurface, String> {
    ImpactSurface::from_str(s).ok_or_else(|| format!("unknown impact surface '{s}' (ground, metal)"))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compute { params, overrides, output } => {
            let base = match params {
                Some(path) => load_parameters(&path)?,
                None => FiringParameters::default(),
            };
            let params = overrides.apply(base);
            tracing::info!(munition = %params.munition_type, bearing = params.fire_bearing, "computing overlay");

            let result = compute_checked(&params)?;
            print!("{}", format_result(&result, &params, output)?);
            if !matches!(output, OutputFormat::Table | OutputFormat::Csv) {
                println!();
            }
        }

        Commands::Defaults => {
            println!("{}", serde_json::to_string_pretty(&FiringParameters::default())?);
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      DISPERSION ENGINE v0.1.0          ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Geodesic overlay geometry for          ║");
            println!("║ ballistic firing parameters.           ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Features:                              ║");
            println!("║ • Spherical direct geodesic            ║");
            println!("║ • Dispersion cone and main arc         ║");
            println!("║ • Explosive safety lines and circle    ║");
            println!("║ • Table / JSON / GeoJSON / CSV output  ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}
