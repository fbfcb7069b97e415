use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use log::{info, LevelFilter};
use rodx::{
    calculate_displacements_with, calculate_rod_results, render_displacements,
    render_full_result, render_samples, render_samples_csv, validate_structure, ErrorResponse,
    GaussianElimination, SamplingError, StructureInput, DEFAULT_PIVOT_TOLERANCE,
};

/// What to calculate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Nodal displacements only.
    Displacements,
    /// Displacements plus force, displacement and stress diagrams per rod.
    Full,
}

/// How to print the outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable report.
    Text,
    /// JSON body matching the calculation service responses.
    Json,
    /// Comma-separated sample table; needs `--step`.
    Csv,
}

/// Axial analysis of a rod chain described in a JSON project file.
#[derive(Debug, Parser)]
#[command(name = "rodx", version, about)]
struct Cli {
    /// Project file with `nodes` and `rods` lists.
    input: PathBuf,
    /// What to calculate.
    #[arg(long, value_enum, default_value_t = Mode::Full)]
    mode: Mode,
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Also tabulate N(x), σ(x) and u(x) along each rod at this step in metres.
    #[arg(long)]
    step: Option<f64>,
    /// Pivots smaller than this are treated as zero.
    #[arg(long, default_value_t = DEFAULT_PIVOT_TOLERANCE)]
    pivot_tolerance: f64,
    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Print a failure body in the requested format.
fn report_failure(format: Format, response: &ErrorResponse) -> Result<ExitCode, Box<dyn Error>> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(response)?),
        Format::Text | Format::Csv => {
            for error in &response.errors {
                eprintln!("error: {error}");
            }
        }
    }
    Ok(ExitCode::FAILURE)
}

/// Read and parse a project file, turning I/O and JSON errors into an error body.
fn load_structure(path: &Path) -> Result<StructureInput, ErrorResponse> {
    let contents = fs::read_to_string(path).map_err(|error| {
        ErrorResponse::message(format!("cannot read {}: {error}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|error| {
        ErrorResponse::message(format!("invalid project file {}: {error}", path.display()))
    })
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Some(step) = cli.step {
        if !step.is_finite() || step <= 0.0 {
            let error = SamplingError::InvalidStep(step);
            return report_failure(cli.format, &ErrorResponse::from(&error));
        }
    }
    if cli.format == Format::Csv && (cli.step.is_none() || cli.mode != Mode::Full) {
        return report_failure(
            cli.format,
            &ErrorResponse::message("csv output needs --mode full and --step"),
        );
    }

    let structure = match load_structure(&cli.input) {
        Ok(structure) => structure,
        Err(response) => return report_failure(cli.format, &response),
    };
    info!(
        "loaded {} nodes and {} rods from {}",
        structure.node_count(),
        structure.rod_count(),
        cli.input.display()
    );

    // Reject malformed structures before any arithmetic, listing every problem.
    let issues = validate_structure(&structure);
    if !issues.is_empty() {
        return report_failure(cli.format, &ErrorResponse::from(&issues[..]));
    }

    let solver = GaussianElimination::with_pivot_tolerance(cli.pivot_tolerance);
    let displacements = match calculate_displacements_with(&structure, &solver) {
        Ok(displacements) => displacements,
        Err(error) => return report_failure(cli.format, &ErrorResponse::from(&error)),
    };

    if cli.mode == Mode::Displacements {
        match cli.format {
            Format::Json => println!("{}", serde_json::to_string_pretty(&displacements)?),
            Format::Text | Format::Csv => print!("{}", render_displacements(&displacements)),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let result = match calculate_rod_results(&structure, &displacements) {
        Ok(result) => result,
        Err(error) => return report_failure(cli.format, &ErrorResponse::from(&error)),
    };
    let samples = match cli.step.map(|step| result.sample(step)).transpose() {
        Ok(samples) => samples,
        Err(error) => return report_failure(cli.format, &ErrorResponse::from(&error)),
    };

    match cli.format {
        Format::Json => {
            let mut body = serde_json::to_value(&result)?;
            if let (Some(samples), Some(object)) = (&samples, body.as_object_mut()) {
                object.insert("samples".to_string(), serde_json::to_value(samples)?);
            }
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Format::Text => {
            print!("{}", render_full_result(&result));
            if let Some(samples) = &samples {
                print!("\n{}", render_samples(samples));
            }
        }
        Format::Csv => {
            if let Some(samples) = &samples {
                print!("{}", render_samples_csv(samples));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
