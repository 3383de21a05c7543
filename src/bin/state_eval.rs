//! State Evaluation Tool
//!
//! This binary reads a JSON sample document, as produced by a metadata loader,
//! and prints the interpolated position, velocity, orientation and
//! orientation rate at a requested time.
//!
//! The document may contain any of:
//!
//! ```json
//! {
//!   "times": [0.0, 1.0, 2.0],
//!   "positions": [[...], [...], [...]],
//!   "rotations": [[...], [...], [...], [...]],
//!   "position_coefficients": [[...], [...], [...]],
//!   "kernel": "cubic-spline"
//! }
//! ```
//!
//! Usage:
//!   cargo run --bin state_eval -- --time 1.5 path/to/samples.json

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use serde::Deserialize;

use ephemstate::state::{
    get_position, get_position_from_coeffs, get_velocity, get_velocity_from_coeffs,
    OrientationSamples,
};
use ephemstate::Kernel;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// State Evaluation Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Evaluates interpolated spacecraft state from a JSON sample document",
    long_about = None
)]
struct Args {
    /// Query time, in the same units as the sample times
    #[arg(short, long, allow_hyphen_values = true)]
    time: f64,

    /// Interpolation kernel (linear, cubic-spline, akima); overrides the document
    #[arg(short, long)]
    kernel: Option<Kernel>,

    /// Also print first derivatives (velocity and orientation rate)
    #[arg(short, long, action = ArgAction::SetTrue)]
    rates: bool,

    /// JSON sample document to evaluate
    filename: PathBuf,
}

/// Sample data handed over by a metadata loader
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SampleDocument {
    times: Vec<f64>,
    positions: Option<Vec<Vec<f64>>>,
    rotations: Option<Vec<Vec<f64>>>,
    position_coefficients: Option<Vec<Vec<f64>>>,
    kernel: Option<Kernel>,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print a labelled vector
fn print_vector(name: &str, values: &[f64]) {
    let formatted: Vec<String> = values.iter().map(|v| format!("{:.9}", v)).collect();
    println!("{:<12} [{}]", name, formatted.join(", "));
}

fn display_sampled_position(
    doc: &SampleDocument,
    coords: &[Vec<f64>],
    args: &Args,
    kernel: Kernel,
) -> Result<()> {
    print_section_header(&format!("Sampled position ({})", kernel));
    let position = get_position(coords, &doc.times, args.time, kernel)?;
    print_vector("Position", position.as_slice());

    if args.rates {
        let velocity = get_velocity(coords, &doc.times, args.time, kernel)?;
        print_vector("Velocity", velocity.as_slice());
    }
    Ok(())
}

fn display_polynomial_position(coeffs: &[Vec<f64>], args: &Args) -> Result<()> {
    print_section_header("Polynomial position");
    let position = get_position_from_coeffs(coeffs, args.time)?;
    print_vector("Position", position.as_slice());

    if args.rates {
        let velocity = get_velocity_from_coeffs(coeffs, args.time)?;
        print_vector("Velocity", velocity.as_slice());
    }
    Ok(())
}

fn display_orientation(
    doc: &SampleDocument,
    rotations: &[Vec<f64>],
    args: &Args,
    kernel: Kernel,
) -> Result<()> {
    print_section_header(&format!("Orientation ({})", kernel));
    let samples = OrientationSamples::new(rotations.to_vec(), doc.times.clone())?;

    let rotation = samples.rotation(args.time, kernel)?;
    print_vector("Quaternion", rotation.as_slice());

    if args.rates {
        let rate = samples.angular_velocity(args.time, kernel)?;
        print_vector("Rate", rate.as_slice());
    }
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.filename)?;
    let doc: SampleDocument = serde_json::from_str(&text)?;
    let kernel = args.kernel.or(doc.kernel).unwrap_or_default();

    println!(
        "Evaluating {} at t = {}",
        args.filename.display(),
        args.time
    );
    if let (Some(first), Some(last)) = (doc.times.first(), doc.times.last()) {
        println!("Sample range: {} .. {} ({} samples)", first, last, doc.times.len());
    }

    let mut evaluated = false;

    if let Some(coords) = &doc.positions {
        display_sampled_position(&doc, coords, &args, kernel)?;
        evaluated = true;
    }

    if let Some(coeffs) = &doc.position_coefficients {
        display_polynomial_position(coeffs, &args)?;
        evaluated = true;
    }

    if let Some(rotations) = &doc.rotations {
        display_orientation(&doc, rotations, &args, kernel)?;
        evaluated = true;
    }

    if !evaluated {
        println!("\nNo positions, rotations or coefficients found in document.");
    }

    Ok(())
}
