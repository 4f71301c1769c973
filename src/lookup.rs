use polars::prelude::*;

use crate::error::RateKitError;
use crate::schema::modes;
use crate::table::{numeric_column, unknown_column};

/// How a target value is matched against a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Nearest,
    Bracket,
    Interpolated,
}

impl MatchMode {
    /// Parse a caller-supplied mode string, case-insensitively.
    /// "Bracket (below + above)" is the label the original form UI used.
    pub fn parse(mode: &str) -> Result<Self, RateKitError> {
        match mode.trim().to_lowercase().as_str() {
            modes::EXACT => Ok(Self::Exact),
            modes::NEAREST => Ok(Self::Nearest),
            modes::BRACKET | "bracket (below + above)" => Ok(Self::Bracket),
            modes::INTERPOLATED => Ok(Self::Interpolated),
            _ => Err(RateKitError::UnknownMode(mode.to_string())),
        }
    }
}

/// Find row(s) whose value in `column` matches `value` under `mode`.
///
/// Returns rows in the table's schema and declared column order:
/// - Exact: zero or more real rows, original table order;
/// - Nearest: exactly one real row;
/// - Bracket: one or two real rows (below and/or above the target);
/// - Interpolated: one row, synthetic unless the target hits a stored
///   value or falls outside the column's range (then the nearest real row).
pub fn lookup(
    df: &DataFrame,
    column: &str,
    value: f64,
    mode: MatchMode,
) -> Result<DataFrame, RateKitError> {
    if df.column(column).is_err() {
        return Err(unknown_column(df, column));
    }

    match mode {
        MatchMode::Exact => {
            let out = df
                .clone()
                .lazy()
                .filter(col(column).eq(lit(value)))
                .collect()?;
            Ok(out)
        }
        MatchMode::Nearest => {
            let ca = ordered_column(df, column)?;
            Ok(nearest_row(df, ca, value))
        }
        MatchMode::Bracket => {
            let ca = ordered_column(df, column)?;
            bracket_rows(df, ca, value)
        }
        MatchMode::Interpolated => {
            let ca = ordered_column(df, column)?;
            interpolate_row(df, column, ca, value)
        }
    }
}

/// The column's values for modes that need numeric ordering.
/// Fails with `NonNumericColumn` when no cell holds a value.
fn ordered_column<'a>(
    df: &'a DataFrame,
    column: &str,
) -> Result<&'a Float64Chunked, RateKitError> {
    let ca = numeric_column(df, column)?;
    if ca.null_count() == ca.len() {
        return Err(RateKitError::NonNumericColumn(column.to_string()));
    }
    Ok(ca)
}

/// The single row minimising |v - value|.
///
/// Tie-break: prefer the lower column value; among duplicates of that
/// value, the lowest row index.
fn nearest_row(df: &DataFrame, ca: &Float64Chunked, value: f64) -> DataFrame {
    let mut best: Option<(f64, f64, usize)> = None; // (diff, v, idx)
    for idx in 0..ca.len() {
        let Some(v) = ca.get(idx) else { continue };
        let diff = (v - value).abs();
        let better = match best {
            None => true,
            Some((bd, bv, _)) => diff < bd || (diff == bd && v < bv),
        };
        if better {
            best = Some((diff, v, idx));
        }
    }
    // Guarded by the all-null check in `ordered_column`.
    let (_, _, idx) = best.unwrap_or((0.0, 0.0, 0));
    df.slice(idx as i64, 1)
}

/// Up to two rows: greatest v <= value and least v >= value.
/// An exact hit is returned once; a side that doesn't exist is omitted.
fn bracket_rows(
    df: &DataFrame,
    ca: &Float64Chunked,
    value: f64,
) -> Result<DataFrame, RateKitError> {
    let mut lower: Option<(f64, usize)> = None;
    let mut upper: Option<(f64, usize)> = None;
    for idx in 0..ca.len() {
        let Some(v) = ca.get(idx) else { continue };
        if v <= value && lower.is_none_or(|(lv, _)| v > lv) {
            lower = Some((v, idx));
        }
        if v >= value && upper.is_none_or(|(uv, _)| v < uv) {
            upper = Some((v, idx));
        }
    }

    match (lower, upper) {
        (Some((_, lo)), Some((_, up))) if lo == up => Ok(df.slice(lo as i64, 1)),
        (Some((_, lo)), Some((_, up))) => {
            let mut out = df.slice(lo as i64, 1);
            out.vstack_mut(&df.slice(up as i64, 1))?;
            Ok(out)
        }
        (Some((_, lo)), None) => Ok(df.slice(lo as i64, 1)),
        (None, Some((_, up))) => Ok(df.slice(up as i64, 1)),
        // Unreachable for a column with any values, but harmless.
        (None, None) => Ok(df.slice(0, 0)),
    }
}

/// Linear interpolation between the two rows straddling `value`.
///
/// Out-of-range targets clamp to the nearest real row instead of
/// extrapolating. Each column interpolates independently; if either
/// neighbour cell is null the result cell is null.
fn interpolate_row(
    df: &DataFrame,
    column: &str,
    ca: &Float64Chunked,
    value: f64,
) -> Result<DataFrame, RateKitError> {
    let (xmin, xmax) = match (ca.min(), ca.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => return Err(RateKitError::NonNumericColumn(column.to_string())),
    };
    if value < xmin || value > xmax {
        return Ok(nearest_row(df, ca, value));
    }

    let mut exact: Option<usize> = None;
    let mut lower: Option<(f64, usize)> = None; // greatest v < value
    let mut upper: Option<(f64, usize)> = None; // least v > value
    for idx in 0..ca.len() {
        let Some(v) = ca.get(idx) else { continue };
        if v == value {
            if exact.is_none() {
                exact = Some(idx);
            }
        } else if v < value && lower.is_none_or(|(lv, _)| v > lv) {
            lower = Some((v, idx));
        } else if v > value && upper.is_none_or(|(uv, _)| v < uv) {
            upper = Some((v, idx));
        }
    }

    if let Some(idx) = exact {
        return Ok(df.slice(idx as i64, 1));
    }
    let (Some((x_lower, lo)), Some((x_upper, up))) = (lower, upper) else {
        // Degenerate column despite the bounds check; clamp rather than guess.
        return Ok(nearest_row(df, ca, value));
    };

    let t = (value - x_lower) / (x_upper - x_lower);

    let mut columns: Vec<Column> = Vec::with_capacity(df.width());
    for name in df.get_column_names_str() {
        let cell = if name == column {
            Some(value)
        } else {
            let series = df.column(name)?.as_materialized_series().f64()?;
            match (series.get(lo), series.get(up)) {
                (Some(a), Some(b)) => Some(a + t * (b - a)),
                _ => None,
            }
        };
        columns.push(Series::new(name.into(), [cell]).into());
    }
    Ok(DataFrame::new(columns)?)
}
