use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;

use pyo3::prelude::*;
use pyo3_polars::PyDataFrame;

use crate::error::RateKitError;
use crate::lookup::{self, MatchMode};
use crate::rates;

/// The reference table from the original conversion chart, stated once.
/// Empty cells (the `n20` column past 100 units/ac) become nulls.
const EMBEDDED_TABLE: &str = include_str!("../data/reference_table.csv");

/// Immutable nitrogen rate conversion table.
///
/// All columns are Float64 after construction; absent cells are nulls.
/// Row index is the only join key - row i in every column describes the
/// same application rate in a different unit system.
#[pyclass]
pub struct RateTable {
    df: DataFrame,
}

#[pymethods]
impl RateTable {
    /// Build the table from the embedded reference data.
    #[new]
    fn new() -> PyResult<Self> {
        Ok(Self {
            df: embedded_table()?,
        })
    }

    /// Load a table from a CSV file instead of the embedded data.
    ///
    /// Column names are trimmed; every column is coerced to Float64 with
    /// unparseable cells becoming null. The lookup contract is identical
    /// over a loaded table.
    #[staticmethod]
    fn from_csv(path: &str) -> PyResult<Self> {
        Ok(Self {
            df: read_table_csv(Path::new(path))?,
        })
    }

    #[getter]
    fn table(&self) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(self.df.clone()))
    }

    fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names_str()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// (min, max) of a column's numeric values. Intended for form defaults,
    /// e.g. initialising an input field to the column minimum.
    fn column_range(&self, column: &str) -> PyResult<(f64, f64)> {
        Ok(column_range(&self.df, column)?)
    }

    /// Find row(s) matching `value` in `column` under the given mode.
    ///
    /// Modes: "exact", "nearest", "bracket", "interpolated"
    /// (case-insensitive; the legacy label "Bracket (below + above)" is
    /// accepted too).
    fn lookup(&self, column: &str, value: f64, mode: &str) -> PyResult<PyDataFrame> {
        let mode = MatchMode::parse(mode)?;
        let rows = lookup::lookup(&self.df, column, value, mode)?;
        Ok(PyDataFrame(rows))
    }

    /// Product application rates equivalent to a target nitrogen rate
    /// (kg N/ha), as a single synthetic row. Pure arithmetic over the
    /// fixed product concentrations; independent of the table.
    #[staticmethod]
    fn rates_from_target_n(target_n: f64) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(rates::rates_from_target_n(target_n)?))
    }
}

// ── Construction helpers ────────────────────────────────────────────────────

/// Parse the embedded reference CSV into an all-Float64 DataFrame.
pub fn embedded_table() -> Result<DataFrame, RateKitError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .into_reader_with_file_handle(Cursor::new(EMBEDDED_TABLE.as_bytes()))
        .finish()?;
    coerce_numeric(df)
}

/// Read a CSV file with trimmed column names, every column coerced to
/// Float64 (unparseable cells -> null).
pub fn read_table_csv(path: &Path) -> Result<DataFrame, RateKitError> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;

    coerce_numeric(df)
}

/// Cast every column to Float64, keeping the declared column order.
/// Non-strict: cells that don't parse become null, never an error.
fn coerce_numeric(df: DataFrame) -> Result<DataFrame, RateKitError> {
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .map(|c| {
            c.as_materialized_series()
                .cast(&DataType::Float64)
                .map(Column::from)
        })
        .collect::<Result<_, _>>()?;
    Ok(DataFrame::new(columns)?)
}

// ── Column access ───────────────────────────────────────────────────────────

pub fn unknown_column(df: &DataFrame, column: &str) -> RateKitError {
    let names = df
        .get_column_names_str()
        .iter()
        .map(|s| s.to_string())
        .collect();
    RateKitError::UnknownColumn(column.to_string(), names)
}

/// The Float64 values of `column`, or `UnknownColumn`.
pub fn numeric_column<'a>(
    df: &'a DataFrame,
    column: &str,
) -> Result<&'a Float64Chunked, RateKitError> {
    let ca = df
        .column(column)
        .map_err(|_| unknown_column(df, column))?
        .as_materialized_series()
        .f64()?;
    Ok(ca)
}

/// Numeric extrema of `column`. Fails with `NonNumericColumn` when the
/// column holds no usable values at all.
pub fn column_range(df: &DataFrame, column: &str) -> Result<(f64, f64), RateKitError> {
    let ca = numeric_column(df, column)?;
    match (ca.min(), ca.max()) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(RateKitError::NonNumericColumn(column.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::columns;

    #[test]
    fn embedded_table_shape_and_order() {
        let df = embedded_table().unwrap();
        assert_eq!(df.height(), 50);
        assert_eq!(df.get_column_names_str(), columns::ALL.to_vec());
    }

    #[test]
    fn embedded_table_all_float64() {
        let df = embedded_table().unwrap();
        for c in df.get_columns() {
            assert_eq!(c.dtype(), &DataType::Float64, "{}", c.name());
        }
    }

    #[test]
    fn n20_missing_above_100_units() {
        let df = embedded_table().unwrap();
        let n20 = df.column(columns::N20).unwrap();
        assert_eq!(n20.null_count(), 30);
        assert_eq!(n20.len() - n20.null_count(), 20);
    }

    #[test]
    fn column_range_of_unit_ac() {
        let df = embedded_table().unwrap();
        let (min, max) = column_range(&df, columns::UNIT_AC).unwrap();
        assert_eq!(min, 5.0);
        assert_eq!(max, 250.0);
    }

    #[test]
    fn unknown_column_lists_choices() {
        let df = embedded_table().unwrap();
        let err = column_range(&df, "nonexistent_column").unwrap_err();
        match err {
            RateKitError::UnknownColumn(name, choices) => {
                assert_eq!(name, "nonexistent_column");
                assert_eq!(choices.len(), 7);
            }
            other => panic!("expected UnknownColumn, got {other:?}"),
        }
    }

    #[test]
    fn csv_coerces_junk_cells_to_null() {
        let path = std::env::temp_dir().join("ratekit_coerce_test.csv");
        std::fs::write(&path, " a ,b\n1,2\nx,4\n,6\n").unwrap();
        let df = read_table_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(df.get_column_names_str(), vec!["a", "b"]);
        let a = df.column("a").unwrap().as_materialized_series();
        let a = a.f64().unwrap();
        assert_eq!(a.get(0), Some(1.0));
        assert_eq!(a.get(1), None);
        assert_eq!(a.get(2), None);
    }
}
