use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use linear_regression::{
    Trainer, TrainingSettings, analytic::ErrorSurface, data, persistence, plot,
};

/// Fits `y = t0 + t1 * x` on a two-column CSV file.
///
/// Flags left unset take their value from `--config`, or the default.
#[derive(Debug, Parser)]
#[command(name = "train", version)]
struct Args {
    /// Dataset, a CSV file with a header line and two numeric columns.
    #[arg(short = 'i', long, default_value = "data.csv")]
    input: PathBuf,

    /// Where the fitted parameters are written.
    #[arg(short = 'o', long, default_value = "params.json")]
    output: PathBuf,

    /// JSON file with training settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Amount of cross-validation folds [default: 6].
    #[arg(short = 'p', long)]
    parts: Option<usize>,

    /// Max gradient-descent iterations per fold [default: 100000].
    #[arg(short = 't', long)]
    iterations: Option<usize>,

    /// Convergence threshold on the gradient norm [default: 1e-10].
    #[arg(short = 'e', long)]
    epsilon: Option<f64>,

    /// Armijo slack coefficient [default: 0.8].
    #[arg(short = 'x', long)]
    xi: Option<f64>,

    /// Initial learning rate [default: 0.5].
    #[arg(short = 'l', long)]
    learning_rate: Option<f64>,

    /// Fit on the raw columns.
    #[arg(long)]
    no_standardize: bool,

    /// Fit the folds in parallel.
    #[arg(long)]
    parallel: bool,

    /// Seed for the random generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Write gnuplot.gp and gnuplot.dat for the picked trial.
    #[arg(short = 'g', long)]
    gnuplot: bool,
}

impl Args {
    fn settings(&self) -> Result<TrainingSettings> {
        let mut settings = match &self.config {
            Some(path) => TrainingSettings::from_json_file(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => TrainingSettings::default(),
        };

        if let Some(n_parts) = self.parts {
            settings.n_parts = n_parts;
        }
        if let Some(max_iterations) = self.iterations {
            settings.max_iterations = max_iterations;
        }
        if let Some(epsilon) = self.epsilon {
            settings.epsilon = epsilon;
        }
        if let Some(xi) = self.xi {
            settings.xi = xi;
        }
        if let Some(rate) = self.learning_rate {
            settings.initial_learning_rate = rate;
        }
        if self.no_standardize {
            settings.with_standardize = false;
        }
        if self.parallel {
            settings.parallel = true;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }

        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let trainer = Trainer::new(args.settings()?)?;
    debug!("settings: {:?}", trainer.settings());

    let dataset = data::load_csv(&args.input)
        .with_context(|| format!("loading dataset from {}", args.input.display()))?;
    info!(samples = dataset.len(); "dataset loaded");

    let surface = ErrorSurface::from_dataset(&dataset);
    debug!("error surface\n{surface}");
    if let Some(exact) = surface.minimizer() {
        debug!(t0 = exact.t0, t1 = exact.t1, error2 = exact.error2; "least-squares solution");
    }

    let mut rng = trainer.rng();
    let outcome = trainer.train(&dataset, &mut rng)?;

    for trial in outcome.report().trials() {
        println!("{trial}");
    }
    for failure in outcome.report().failures() {
        println!("[trial #{}] skipped: {}", failure.fold + 1, failure.error);
    }
    println!("picked: trial #{}", outcome.best().fold + 1);
    println!("{}", outcome.best());

    persistence::save_model(outcome.model(), &args.output)
        .with_context(|| format!("writing parameters to {}", args.output.display()))?;

    if args.gnuplot {
        plot::write_gnuplot(
            outcome.best(),
            plot::DEFAULT_SCRIPT_PATH,
            plot::DEFAULT_DATA_PATH,
        )
        .context("writing gnuplot files")?;
    }

    Ok(())
}
