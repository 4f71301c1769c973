use pyo3::exceptions::PyValueError;
use pyo3::PyErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateKitError {
    #[error("Column '{0}' not found. Choose from: {1:?}")]
    UnknownColumn(String, Vec<String>),

    #[error("Column '{0}' isn't numeric (can't do nearest/bracket/interpolated)")]
    NonNumericColumn(String),

    #[error("Unknown mode: '{0}'")]
    UnknownMode(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl From<RateKitError> for PyErr {
    fn from(err: RateKitError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
