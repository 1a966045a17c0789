use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::Parser;

use linear_regression::{persistence, predict};

/// Predicts `y` for one `x` with the parameters written by `train`.
#[derive(Debug, Parser)]
#[command(name = "predict", version)]
struct Args {
    /// Fitted parameters.
    #[arg(short = 'i', long, default_value = "params.json")]
    input: PathBuf,

    /// Value to predict for, read from stdin when missing.
    #[arg(allow_negative_numbers = true)]
    x: Option<f64>,
}

fn read_x() -> Result<f64> {
    print!("tell me \"x\" > ");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("no input");
    }

    let line = line.trim();
    line.parse()
        .with_context(|| format!("\"{line}\" is not a number"))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let model = persistence::load_model(&args.input)
        .with_context(|| format!("reading parameters from {}", args.input.display()))?;

    let x = match args.x {
        Some(x) => x,
        None => read_x()?,
    };
    println!("x told: {x}");

    let y = predict(&model, x)?;
    println!("y predicted: {y}");

    Ok(())
}
