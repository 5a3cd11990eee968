// ============================================================================
// graygrid CLI: apply one caption-style filter command to image files
// ============================================================================
//
// Usage examples:
//   graygrid -i photo.jpg -f "blur 5"                 (writes photo_filtered.jpg)
//   graygrid -i photo.png -f contour -o edges.png
//   graygrid -i "shots/*.jpg" -f "salt and pepper 0.05 0.05" --seed 7 --output-dir out/
//
// Every input gets its own grid and its own seeded RNG, so batch runs are
// processed in parallel with rayon and stay reproducible for a given --seed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::{FilterCommand, SUPPORTED_FILTERS};
use crate::error::Result;
use crate::io::{self, ToneMapping};

/// Default `RUST_LOG`-style directive when the environment sets none.
pub const DEFAULT_LOG_FILTER: &str = "graygrid=info";

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// Grayscale grid filters for image files.
#[derive(Parser, Debug)]
#[command(
    name = "graygrid",
    about = "Apply a grayscale grid filter to image files",
    long_about = "Decode each input image to grayscale, apply one filter command and\n\
                  write the result as an 8-bit grayscale image.\n\n\
                  Filters: blur [k], contour, rotate [n], segment,\n\
                  salt and pepper [salt] [pepper], concat [horizontal|vertical],\n\
                  brightness [factor], contrast [factor]\n\n\
                  Example:\n  \
                  graygrid -i photo.jpg -f \"blur 5\"\n  \
                  graygrid -i \"*.png\" -f segment --output-dir out/"
)]
pub struct CliArgs {
    /// Input file(s). Glob patterns accepted (e.g. "*.png", "shots/*.jpg").
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Filter command, written like a caption: "blur 5", "rotate 2", "concat vertical".
    #[arg(short, long, value_name = "CAPTION")]
    pub filter: String,

    /// Output file path. Only valid for single-file input.
    /// Defaults to <stem>_filtered.<ext> next to the input.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing; files keep the _filtered name.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Seed for salt-and-pepper noise. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How samples are mapped to 8-bit gray on output.
    #[arg(long, value_enum, default_value_t = ToneMapping::Stretch)]
    pub tone: ToneMapping,

    /// Log per-file details.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Install the tracing subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "graygrid=debug" } else { DEFAULT_LOG_FILTER };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run the CLI and return an exit code.
/// `0` = all files succeeded, `1` = the command was rejected or any file failed.
pub fn run(args: CliArgs) -> ExitCode {
    // Reject the filter before touching any file
    let command = match FilterCommand::parse(&args.filter) {
        Ok(command) => command,
        Err(e) => {
            error!(
                error = %e,
                supported = %SUPPORTED_FILTERS.join(", "),
                "rejected filter command"
            );
            return ExitCode::FAILURE;
        }
    };

    let inputs = resolve_inputs(&args.input);
    if inputs.is_empty() {
        error!("no input files matched the given pattern(s)");
        return ExitCode::FAILURE;
    }

    if inputs.len() > 1 && args.output.is_some() {
        error!(
            count = inputs.len(),
            "--output accepts a single input; use --output-dir for batches"
        );
        return ExitCode::FAILURE;
    }

    // Two tasks must never write the same file
    let outputs = match plan_outputs(&inputs, args.output.as_deref(), args.output_dir.as_deref()) {
        Ok(outputs) => outputs,
        Err(collision) => {
            error!(
                output = %collision.display(),
                "several inputs map to the same output file; rename them or split the batch"
            );
            return ExitCode::FAILURE;
        }
    };

    if let Some(dir) = &args.output_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            error!(dir = %dir.display(), error = %e, "could not create output directory");
            return ExitCode::FAILURE;
        }
    }

    let base_seed = args.seed.unwrap_or_else(rand::random);
    info!(%command, files = inputs.len(), seed = base_seed, "processing");

    let failures: usize = inputs
        .par_iter()
        .zip(outputs.par_iter())
        .enumerate()
        .map(|(idx, (input, output))| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(idx as u64));
            match process_one(input, output, &command, args.tone, &mut rng) {
                Ok(()) => 0,
                Err(e) => {
                    error!(input = %input.display(), error = %e, "failed");
                    1
                }
            }
        })
        .sum();

    if failures > 0 {
        warn!(failed = failures, total = inputs.len(), "some files failed");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// ============================================================================
// Per-file pipeline
// ============================================================================

/// Decode `input`, apply `command`, encode to `output`.
pub fn process_one<R: Rng + ?Sized>(
    input: &Path,
    output: &Path,
    command: &FilterCommand,
    tone: ToneMapping,
    rng: &mut R,
) -> Result<()> {
    let start = Instant::now();

    let mut grid = io::decode_path(input)?;
    let before = grid.dim();
    command.apply(&mut grid, rng)?;
    debug!(
        filter = command.name(),
        ?before,
        after = ?grid.dim(),
        "applied filter"
    );
    io::encode_path(&grid, output, tone)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}

/// Expand glob patterns; literal paths that exist are kept even if they
/// contain glob metacharacters. The result is sorted and each file appears
/// once, even when several patterns (or spellings of a path) match it.
fn resolve_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let literal = Path::new(pattern);
        if literal.is_file() {
            paths.push(literal.to_path_buf());
            continue;
        }
        match glob::glob(pattern) {
            Ok(entries) => {
                let before = paths.len();
                for entry in entries {
                    match entry {
                        Ok(path) if path.is_file() => paths.push(path),
                        Ok(_) => {}
                        Err(e) => warn!(error = %e, "unreadable glob entry"),
                    }
                }
                if paths.len() == before {
                    warn!(pattern = %pattern, "pattern matched no files");
                }
            }
            Err(e) => warn!(pattern = %pattern, error = %e, "invalid glob pattern"),
        }
    }

    paths.sort();
    let mut seen = HashSet::new();
    paths.retain(|path| {
        let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.clone());
        let first = seen.insert(key);
        if !first {
            debug!(input = %path.display(), "skipping duplicate input");
        }
        first
    });
    paths
}

/// Output path for every input, in input order.
/// Returns the first output path claimed by more than one input.
fn plan_outputs(
    inputs: &[PathBuf],
    output: Option<&Path>,
    output_dir: Option<&Path>,
) -> std::result::Result<Vec<PathBuf>, PathBuf> {
    let mut claimed = HashSet::new();
    let mut outputs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let path = build_output_path(input, output, output_dir);
        if !claimed.insert(path.clone()) {
            return Err(path);
        }
        outputs.push(path);
    }
    Ok(outputs)
}

fn build_output_path(input: &Path, output: Option<&Path>, output_dir: Option<&Path>) -> PathBuf {
    if let Some(path) = output {
        return path.to_path_buf();
    }
    let filtered = io::filtered_path(input);
    match (output_dir, filtered.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => filtered,
    }
}
