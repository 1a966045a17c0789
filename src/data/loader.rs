use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use super::{DataError, Dataset};

/// Loads a two-column numeric CSV file into a `Dataset`.
///
/// The first record is a header and is discarded.
///
/// # Arguments
/// * `path` - Path to the CSV file.
///
/// # Errors
/// Returns a `DataError` if the file cannot be opened or any row is malformed.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset, DataError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = read_csv(file)?;

    debug!(samples = dataset.len(); "dataset loaded from {}", path.display());
    Ok(dataset)
}

/// Reads a two-column numeric CSV stream into a `Dataset`.
///
/// # Arguments
/// * `reader` - The source of the CSV text, header included.
///
/// # Errors
/// Returns a `DataError` pointing at the first malformed line.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, DataError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut xs = Vec::new();
    let mut ys = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let (x, y) = parse_row(&record, line)?;
        xs.push(x);
        ys.push(y);
    }

    Dataset::new(xs, ys)
}

fn parse_row(record: &StringRecord, line: u64) -> Result<(f64, f64), DataError> {
    if record.len() != 2 {
        return Err(DataError::FieldCount {
            line,
            got: record.len(),
        });
    }

    Ok((parse_field(&record[0], line)?, parse_field(&record[1], line)?))
}

fn parse_field(field: &str, line: u64) -> Result<f64, DataError> {
    let value: f64 = field.parse().map_err(|_| DataError::NotNumeric {
        line,
        field: field.to_string(),
    })?;

    if !value.is_finite() {
        return Err(DataError::NotFinite { line, value });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_discarded_and_rows_are_parsed() {
        let csv = "km,price\n240000,3650\n139800, 3800\n150500,4400\n";
        let ds = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(ds.xs(), &[240000.0, 139800.0, 150500.0]);
        assert_eq!(ds.ys(), &[3650.0, 3800.0, 4400.0]);
    }

    #[test]
    fn wrong_field_count_reports_line() {
        let csv = "km,price\n1,2\n3,4,5\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::FieldCount { line: 3, got: 3 }), "{err}");
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let csv = "km,price\n1,2\nthree,4\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        match err {
            DataError::NotNumeric { line, field } => {
                assert_eq!(line, 3);
                assert_eq!(field, "three");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_field_is_rejected() {
        let csv = "km,price\n1,2\n3,inf\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::NotFinite { line: 3, .. }), "{err}");
    }

    #[test]
    fn header_only_is_too_few_samples() {
        let err = read_csv("km,price\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::TooFewSamples { got: 0, .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_csv("this/file/does/not/exist.csv").unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
