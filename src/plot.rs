use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::debug;

use crate::{data::Dataset, validation::TrialResult};

pub const DEFAULT_SCRIPT_PATH: &str = "gnuplot.gp";
pub const DEFAULT_DATA_PATH: &str = "gnuplot.dat";

/// Writes the trial's samples as two gnuplot data blocks: training points,
/// then validation points.
pub fn write_data<W: Write>(trial: &TrialResult, mut writer: W) -> io::Result<()> {
    write_points(&trial.train, &mut writer)?;
    // Two blank lines start a new `index` block.
    writeln!(writer)?;
    writeln!(writer)?;
    write_points(&trial.validation, &mut writer)?;
    writer.flush()
}

fn write_points<W: Write>(data: &Dataset, writer: &mut W) -> io::Result<()> {
    for sample in data.iter() {
        writeln!(writer, "{:.6} {:.6}", sample.x, sample.y)?;
    }
    Ok(())
}

/// Writes a gnuplot script plotting the fitted line over the samples stored
/// at `data_path`.
pub fn write_script<W: Write>(trial: &TrialResult, data_path: &str, mut writer: W) -> io::Result<()> {
    writeln!(writer, "t0 = \"{}\"", trial.model.t0)?;
    writeln!(writer, "t1 = \"{}\"", trial.model.t1)?;
    writeln!(writer, "f(x) = t0 + t1 * x")?;
    writeln!(
        writer,
        "plot \"{data_path}\" index 0 title \"Training Data\", \
         f(x) title \"Prediction\", \
         \"{data_path}\" index 1 title \"Validation Data\""
    )?;
    writer.flush()
}

/// Writes both gnuplot files for `trial`.
///
/// # Arguments
/// * `trial` - The picked trial.
/// * `script_path` - Destination of the script.
/// * `data_path` - Destination of the data file, referenced by the script.
///
/// # Errors
/// Any I/O error creating or writing either file.
pub fn write_gnuplot<P: AsRef<Path>, Q: AsRef<Path>>(
    trial: &TrialResult,
    script_path: P,
    data_path: Q,
) -> io::Result<()> {
    let (script_path, data_path) = (script_path.as_ref(), data_path.as_ref());

    write_data(trial, BufWriter::new(File::create(data_path)?))?;
    write_script(
        trial,
        &data_path.to_string_lossy(),
        BufWriter::new(File::create(script_path)?),
    )?;

    debug!(
        "gnuplot files written to {} and {}",
        script_path.display(),
        data_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{metrics, model::ModelParams};

    fn trial() -> TrialResult {
        let train = Dataset::new(vec![1.0, 2.0], vec![3.0, 5.0]).unwrap();
        let validation = Dataset::new(vec![3.0, 4.5], vec![7.0, 10.0]).unwrap();
        let model = ModelParams::new(1.0, 2.0);

        TrialResult {
            fold: 0,
            model,
            precision: metrics::evaluate(&validation, &model),
            train,
            validation,
        }
    }

    #[test]
    fn data_file_has_two_blocks() {
        let mut buf = Vec::new();
        write_data(&trial(), &mut buf).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "1.000000 3.000000\n2.000000 5.000000\n\n\n3.000000 7.000000\n4.500000 10.000000\n"
        );
    }

    #[test]
    fn script_defines_the_line_and_plots_both_blocks() {
        let mut buf = Vec::new();
        write_script(&trial(), "gnuplot.dat", &mut buf).unwrap();
        let script = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines[0], "t0 = \"1\"");
        assert_eq!(lines[1], "t1 = \"2\"");
        assert_eq!(lines[2], "f(x) = t0 + t1 * x");
        assert_eq!(
            lines[3],
            "plot \"gnuplot.dat\" index 0 title \"Training Data\", f(x) title \"Prediction\", \"gnuplot.dat\" index 1 title \"Validation Data\""
        );
    }
}
