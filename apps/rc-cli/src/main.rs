mod error;
mod report;
mod survey;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use rc_photometry::{TransientModel, builtin_bands, filter_builtin_bands, sample_light_curve};
use rc_rates::RateCalculator;
use report::ExpectedRow;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(about = "RateCalc CLI - expected transient counts for magnitude-limited surveys", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in bandpasses
    Bands {
        /// Filter by name or alias
        query: Option<String>,
    },
    /// Cumulative expected counts against limiting magnitude
    Expected {
        /// Path to the survey YAML file
        survey_path: PathBuf,
        /// Brightest limiting magnitude
        #[arg(long, default_value_t = 18.0)]
        mag_min: f64,
        /// Faintest limiting magnitude (defaults to the survey limit)
        #[arg(long)]
        mag_max: Option<f64>,
        /// Magnitude step
        #[arg(long, default_value_t = 0.5)]
        step: f64,
        /// Redshift shells per count
        #[arg(long, default_value_t = 100)]
        n_bins: usize,
        /// Report counts cut short at the redshift ceiling instead of failing
        #[arg(long)]
        partial: bool,
        /// Save the magnitude-redshift map to this JSON file
        #[arg(long)]
        save_state: Option<PathBuf>,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Expected counts in redshift bins for one limiting magnitude
    Redshift {
        /// Path to the survey YAML file
        survey_path: PathBuf,
        /// Limiting magnitude (defaults to the survey limit)
        #[arg(long)]
        mag: Option<f64>,
        /// Redshift bin width
        #[arg(long, default_value_t = 0.01)]
        z_bin: f64,
        /// Integration step within each bin
        #[arg(long, default_value_t = 1e-3)]
        z_step: f64,
        /// Report a distribution cut short at the redshift ceiling instead of failing
        #[arg(long)]
        partial: bool,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Observer-frame light curve of the survey model at one redshift
    Lightcurve {
        /// Path to the survey YAML file
        survey_path: PathBuf,
        /// Redshift
        #[arg(long)]
        z: f64,
        /// Number of phases across the model window
        #[arg(long, default_value_t = 100)]
        points: usize,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    // Logs go to stderr so tables on stdout stay clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bands { query } => cmd_bands(query.as_deref()),
        Commands::Expected {
            survey_path,
            mag_min,
            mag_max,
            step,
            n_bins,
            partial,
            save_state,
            output,
        } => cmd_expected(
            &survey_path,
            ExpectedArgs {
                mag_min,
                mag_max,
                step,
                n_bins,
                partial,
            },
            save_state.as_deref(),
            output.as_deref(),
        ),
        Commands::Redshift {
            survey_path,
            mag,
            z_bin,
            z_step,
            partial,
            output,
        } => cmd_redshift(&survey_path, mag, z_bin, z_step, partial, output.as_deref()),
        Commands::Lightcurve {
            survey_path,
            z,
            points,
            output,
        } => cmd_lightcurve(&survey_path, z, points, output.as_deref()),
    }
}

struct ExpectedArgs {
    mag_min: f64,
    mag_max: Option<f64>,
    step: f64,
    n_bins: usize,
    partial: bool,
}

fn cmd_bands(query: Option<&str>) -> CliResult<()> {
    let entries = match query {
        Some(q) => filter_builtin_bands(q),
        None => builtin_bands().to_vec(),
    };
    if entries.is_empty() {
        println!("No bands match.");
        return Ok(());
    }

    println!("{:<12} {:<12} {:>9} {:>9} {:>8}", "ID", "NAME", "BLUE[Å]", "RED[Å]", "AB-VEGA");
    println!("{}", "-".repeat(54));
    for entry in entries {
        let band = entry.bandpass()?;
        println!(
            "{:<12} {:<12} {:>9.0} {:>9.0} {:>8.2}",
            entry.canonical_id,
            entry.display_name,
            band.min_wave(),
            band.max_wave(),
            entry.ab_minus_vega
        );
    }
    Ok(())
}

fn cmd_expected(
    survey_path: &Path,
    args: ExpectedArgs,
    save_state: Option<&Path>,
    output: Option<&Path>,
) -> CliResult<()> {
    let survey = survey::load_survey(survey_path)?;
    let mag_max = args.mag_max.unwrap_or(survey.survey.limit);
    if !(args.step > 0.0) || mag_max < args.mag_min {
        return Err(CliError::InvalidInput(format!(
            "magnitude range [{}, {mag_max}] with step {}",
            args.mag_min, args.step
        )));
    }

    let start = Instant::now();
    let mut calc = survey.build_calculator()?;
    let mut rows = Vec::new();
    for magnitude in report::magnitude_steps(args.mag_min, mag_max, args.step) {
        let row = if args.partial {
            let estimate = calc.estimate_count(magnitude, args.n_bins)?;
            ExpectedRow {
                magnitude,
                count: estimate.count,
                truncated: estimate.truncated,
            }
        } else {
            ExpectedRow {
                magnitude,
                count: calc.expected_count(magnitude, args.n_bins)?,
                truncated: false,
            }
        };
        rows.push(row);
    }

    emit(&report::expected_table(calc.model().name(), &rows), output)?;
    if let Some(path) = save_state {
        calc.save(path)?;
        eprintln!("✓ Saved magnitude-redshift map to {}", path.display());
    }
    print_summary(&calc, start);
    Ok(())
}

fn cmd_redshift(
    survey_path: &Path,
    mag: Option<f64>,
    z_bin: f64,
    z_step: f64,
    partial: bool,
    output: Option<&Path>,
) -> CliResult<()> {
    let survey = survey::load_survey(survey_path)?;
    let magnitude = mag.unwrap_or(survey.survey.limit);

    let start = Instant::now();
    let mut calc = survey.build_calculator()?;
    let dist = if partial {
        calc.estimate_redshift_distribution(magnitude, z_bin, z_step)?
    } else {
        calc.redshift_distribution(magnitude, z_bin, z_step)?
    };

    emit(&report::redshift_table(&dist), output)?;
    eprintln!(
        "✓ {} bins, {:.3e} events brighter than {magnitude:.2}",
        dist.len(),
        dist.total()
    );
    print_summary(&calc, start);
    Ok(())
}

fn cmd_lightcurve(survey_path: &Path, z: f64, points: usize, output: Option<&Path>) -> CliResult<()> {
    let survey = survey::load_survey(survey_path)?;
    let calc = survey.build_calculator()?;
    let model = calc.scale_model_to_redshift(z)?;
    let curve = sample_light_curve(&model, calc.band(), calc.config().magsys, points)?;

    emit(&report::light_curve_table(&curve), output)?;
    if let Some((phase, magnitude)) = curve.brightest() {
        eprintln!("✓ Brightest sample: {magnitude:.2} at phase {phase:.1} d");
    }
    Ok(())
}

fn emit(table: &str, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            fs::write(path, table).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => print!("{table}"),
    }
    Ok(())
}

fn print_summary<M: TransientModel>(calc: &RateCalculator<M>, start: Instant) {
    eprintln!(
        "  map: {} samples up to z = {:.4} (ceiling {:.3}), {:?}",
        calc.map().len(),
        calc.map().last().0,
        calc.z_ceiling(),
        calc.coverage()
    );
    eprintln!("  elapsed: {:.2} s", start.elapsed().as_secs_f64());
}
