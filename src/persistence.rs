use std::{
    error::Error,
    fmt,
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::ModelParams;

/// Errors of reading or writing a model record.
#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Json(serde_json::Error),
    /// `t0` or `t1` is NaN or infinite.
    NonFinite { t0: f64, t1: f64 },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "io error: {e}"),
            PersistError::Json(e) => write!(f, "malformed model record: {e}"),
            PersistError::NonFinite { t0, t1 } => {
                write!(f, "model parameters are not finite: t0={t0} t1={t1}")
            }
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Json(e) => Some(e),
            PersistError::NonFinite { .. } => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// On-disk form of a fitted model.
///
/// Only the four fields below are written. Reading ignores any other field,
/// so records carrying extra diagnostics still load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub t0: f64,
    pub t1: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,
}

impl ModelRecord {
    fn check(self) -> Result<Self, PersistError> {
        if self.t0.is_finite() && self.t1.is_finite() {
            Ok(self)
        } else {
            Err(PersistError::NonFinite {
                t0: self.t0,
                t1: self.t1,
            })
        }
    }

    pub fn into_params(self) -> ModelParams {
        let mut params = ModelParams::new(self.t0, self.t1);
        if let Some(error2) = self.error2 {
            params.error2 = error2;
        }
        params.iterations = self.iterations.unwrap_or_default();
        params
    }
}

impl From<&ModelParams> for ModelRecord {
    /// A non-finite `error2` has no JSON form and is left out.
    fn from(params: &ModelParams) -> Self {
        Self {
            t0: params.t0,
            t1: params.t1,
            error2: params.error2.is_finite().then_some(params.error2),
            iterations: Some(params.iterations),
        }
    }
}

/// Serializes `params` as a JSON object into `writer`.
///
/// # Errors
/// `PersistError::NonFinite` if `t0` or `t1` is not finite, otherwise any
/// I/O or JSON error.
pub fn write_model<W: Write>(params: &ModelParams, mut writer: W) -> Result<(), PersistError> {
    let record = ModelRecord::from(params).check()?;
    serde_json::to_writer(&mut writer, &record)?;
    writer.flush()?;
    Ok(())
}

/// Parses a model record from `reader`.
///
/// # Errors
/// `PersistError::Json` on malformed JSON or missing `t0`/`t1`;
/// `PersistError::NonFinite` if `t0` or `t1` is not finite.
pub fn read_model<R: Read>(reader: R) -> Result<ModelParams, PersistError> {
    let record: ModelRecord = serde_json::from_reader(reader)?;
    Ok(record.check()?.into_params())
}

/// Writes `params` to the file at `path`, replacing it.
pub fn save_model<P: AsRef<Path>>(params: &ModelParams, path: P) -> Result<(), PersistError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_model(params, BufWriter::new(file))?;

    debug!(t0 = params.t0, t1 = params.t1; "model saved to {}", path.display());
    Ok(())
}

/// Reads the model stored in the file at `path`.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<ModelParams, PersistError> {
    let file = File::open(path.as_ref())?;
    read_model(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted() -> ModelParams {
        ModelParams {
            t0: 8499.6,
            t1: -0.0214,
            error2: 1.5e7,
            iterations: 312,
        }
    }

    #[test]
    fn written_record_reads_back() {
        let mut buf = Vec::new();
        write_model(&fitted(), &mut buf).unwrap();

        assert_eq!(read_model(buf.as_slice()).unwrap(), fitted());
    }

    #[test]
    fn infinite_error2_is_omitted() {
        let mut buf = Vec::new();
        write_model(&ModelParams::new(1.0, 2.0), &mut buf).unwrap();

        let json = String::from_utf8(buf).unwrap();
        assert_eq!(json, r#"{"t0":1.0,"t1":2.0,"iterations":0}"#);
    }

    #[test]
    fn minimal_record_is_accepted() {
        let params = read_model(r#"{"t0": 1, "t1": 2}"#.as_bytes()).unwrap();

        assert_eq!((params.t0, params.t1), (1.0, 2.0));
        assert_eq!(params.iterations, 0);
        assert_eq!(params.error2, f64::INFINITY);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let json = r#"{"t0": 1.0, "t1": 2.0, "error2": 3.0, "iterations": 4,
            "R2": 0.5, "RMSE": 0.1, "nth": 1, "train_data": [{"x": 1, "y": 3}]}"#;
        let params = read_model(json.as_bytes()).unwrap();

        assert_eq!(
            params,
            ModelParams {
                t0: 1.0,
                t1: 2.0,
                error2: 3.0,
                iterations: 4,
            }
        );
    }

    #[test]
    fn non_finite_parameters_are_not_read() {
        let err = read_model(r#"{"t0": 1e999, "t1": 2}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, PersistError::Json(_) | PersistError::NonFinite { .. }));
    }

    #[test]
    fn missing_parameter_is_rejected() {
        let err = read_model(r#"{"t0": 1}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, PersistError::Json(_)));
    }

    #[test]
    fn non_finite_parameters_are_not_written() {
        let err = write_model(&ModelParams::new(f64::NAN, 2.0), Vec::new()).unwrap_err();
        assert!(matches!(err, PersistError::NonFinite { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_model("no/such/params.json").unwrap_err();
        assert!(matches!(err, PersistError::Io(_)));
    }
}
