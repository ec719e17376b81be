use std::path::PathBuf;
use std::process;

use clap::Parser;
use grasp::{loader, Grasp, GraspConfig, Report};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "grasp_file")]
#[command(about = "Cluster the points of a delimited text file using GRASP", long_about = None)]
struct Args {
    /// Dataset: one point per line, features separated by --delimiter
    input: PathBuf,

    /// Number of clusters
    #[arg(short, long, default_value_t = 3)]
    k: usize,

    /// RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Restricted candidate list threshold, within [0, 1]
    #[arg(short, long, default_value_t = 0.3)]
    threshold: f64,

    /// Number of GRASP restarts
    #[arg(short, long, default_value_t = 25)]
    restarts: usize,

    /// Maximum move attempts per local search
    #[arg(long, default_value_t = grasp::DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Verbosity: info, debug, trace, warn
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = init_logging(&args.log_level) {
        eprintln!("failed to initialise logging: {err}");
    }

    if let Err(err) = run(args) {
        error!(error = %err, "GRASP run failed");
        process::exit(1);
    }
}

fn init_logging(level: &str) -> Result<(), String> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(match level {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(|err| err.to_string())
}

fn run(args: Args) -> grasp::Result<()> {
    let delimiter = u8::try_from(args.delimiter).map_err(|_| {
        grasp::GraspError::InvalidConfiguration(format!("delimiter {:?} is not a single byte", args.delimiter))
    })?;
    let options = loader::LoaderOptions { delimiter, ..Default::default() };
    let points = loader::read_points_with::<f64>(&args.input, options)?;
    info!(path = ?args.input, points = points.len(), dims = points.dims(), "loaded dataset");

    let conf = GraspConfig::build()
        .seed(args.seed)
        .restarts(args.restarts)
        .max_iterations(args.max_iterations)
        .build();
    let grasp = Grasp::from_points(points);
    let state = grasp.optimize(args.k, args.threshold, &conf)?;

    let source = args.input.display().to_string();
    println!("{}", Report::new(&source, grasp.points(), &state));
    Ok(())
}
