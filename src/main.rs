use clap::{Parser, Subcommand};
use edgefill::config::{self, ServiceConfig};
use edgefill::imaging::{AspectRatio, RustBackend, Strategy};
use edgefill::job::{ImageJob, JobDescriptor};
use edgefill::process::{self, BatchSummary, JobEvent};
use edgefill::output;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "edgefill")]
#[command(about = "Pad images to an aspect ratio with colors sampled from their own edges")]
#[command(long_about = "\
Pad images to an aspect ratio with colors sampled from their own edges

An image that does not match the target ratio is center-cropped to a whole
number of ratio units, then pasted onto a canvas split in two along its long
axis. Each half is filled with one color taken from the matching edge of the
image, so the padding continues the picture instead of boxing it in.

Job descriptors (for `job` and `batch`) are JSON objects:

  {\"Source\": \"in/a.jpg\", \"Destination\": \"out/a.jpg\", \"AspectRatio\": [4, 5]}

Strategies:
  average    mean color of the edge band
  dominant   largest color cluster, favouring saturated colors
  prominent  most common hue with its mean chroma and luminance (default)

Run 'edgefill gen-config' to generate a documented edgefill.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "edgefill.toml", global = true)]
    config: PathBuf,

    /// Edge-color strategy (overrides the config file)
    #[arg(long, value_enum, global = true)]
    strategy: Option<Strategy>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pad a single image
    Pad {
        source: PathBuf,
        destination: PathBuf,
        /// Target ratio as W:H
        #[arg(long)]
        ratio: AspectRatio,
    },
    /// Run one JSON job descriptor read from stdin
    Job,
    /// Run a JSON array of job descriptors read from stdin
    Batch,
    /// Pad every supported image under a directory
    Dir {
        source: PathBuf,
        output: PathBuf,
        /// Target ratio as W:H (default from config)
        #[arg(long)]
        ratio: Option<AspectRatio>,
    },
    /// Print a stock edgefill.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let service_config = config::load_config(&cli.config)?;
    let strategy = cli.strategy.unwrap_or(service_config.padding.strategy);
    init_thread_pool(&service_config.processing);
    log::debug!("strategy {strategy}, config {}", cli.config.display());

    match cli.command {
        Command::Pad {
            source,
            destination,
            ratio,
        } => {
            let job = ImageJob::new(source, destination, ratio);
            let outcome = process::compile_image(&job, &strategy)?;
            println!("{}", output::format_outcome(&outcome));
        }
        Command::Job => {
            let descriptor: JobDescriptor = serde_json::from_str(&read_stdin()?)?;
            let job = ImageJob::try_from(descriptor)?;
            let outcome = process::compile_image(&job, &strategy)?;
            println!("{}", output::format_outcome(&outcome));
        }
        Command::Batch => {
            let descriptors: Vec<JobDescriptor> = serde_json::from_str(&read_stdin()?)?;
            let summary = run_with_printer(|tx| {
                process::run_descriptors(&RustBackend::new(), descriptors, &strategy, Some(tx))
            })?;
            finish(&summary)?;
        }
        Command::Dir {
            source,
            output: output_dir,
            ratio,
        } => {
            let ratio = resolve_ratio(ratio, &service_config)?;
            let jobs = process::plan_directory(&source, &output_dir, ratio)?;
            println!("==> Padding {} images to {}", jobs.len(), ratio);
            let summary = run_with_printer(|tx| {
                process::run_jobs(&RustBackend::new(), jobs, &strategy, Some(tx))
            })?;
            finish(&summary)?;
        }
        // Printed before the config is loaded
        Command::GenConfig => {}
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn read_stdin() -> std::io::Result<String> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn resolve_ratio(
    cli_ratio: Option<AspectRatio>,
    service_config: &ServiceConfig,
) -> Result<AspectRatio, Box<dyn std::error::Error>> {
    cli_ratio
        .or_else(|| service_config.aspect_ratio())
        .ok_or_else(|| "no aspect ratio: pass --ratio or set padding.aspect_ratio".into())
}

/// Run a batch while a printer thread streams job events to stdout.
fn run_with_printer<F>(run: F) -> Result<BatchSummary, Box<dyn std::error::Error>>
where
    F: FnOnce(std::sync::mpsc::Sender<JobEvent>) -> BatchSummary,
{
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_job_event(&event);
        }
    });
    let summary = run(tx);
    printer.join().map_err(|_| "output thread panicked")?;
    Ok(summary)
}

fn finish(summary: &BatchSummary) -> Result<(), Box<dyn std::error::Error>> {
    output::print_summary(summary);
    if summary.failed > 0 {
        return Err(format!("{} of {} jobs failed", summary.failed, summary.total()).into());
    }
    Ok(())
}
