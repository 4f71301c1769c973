use polars::prelude::*;

use crate::error::RateKitError;
use crate::schema::columns;

// Fixed product conversion constants. A product's divisor is its nitrogen
// fraction (kg N per kg product), or kg N per litre for the liquid.
/// kg N/ha equivalent to 1 unit/ac (imperial pound-per-acre).
pub const KG_N_HA_PER_UNIT_AC: f64 = 1.12085;
/// Urea, 46% N.
pub const UREA_N_FRACTION: f64 = 0.46;
/// Nitram (ammonium nitrate), 34.5% N.
pub const NITRAM_N_FRACTION: f64 = 0.345;
/// Nuram 35S liquid, 35% w/v: kg N per litre of product.
pub const NURAM_N_PER_LITRE: f64 = 0.35;
/// Generic 20% N product.
pub const N20_N_FRACTION: f64 = 0.20;

/// Product application rates equivalent to `target_n` kg N/ha, as one
/// synthetic row. Total over the reals: the divisors are fixed and
/// nonzero, so no input is rejected here - range checks belong to the
/// caller.
pub fn rates_from_target_n(target_n: f64) -> Result<DataFrame, RateKitError> {
    let row: [(&str, f64); 6] = [
        (columns::KG_HA_NUTRIENT, target_n),
        (columns::UNIT_AC, target_n / KG_N_HA_PER_UNIT_AC),
        (columns::UREA_46_KG_HA, target_n / UREA_N_FRACTION),
        (columns::NITRAM_34_5_KG_HA, target_n / NITRAM_N_FRACTION),
        (columns::NURAM_35S_L_HA, target_n / NURAM_N_PER_LITRE),
        (columns::N20, target_n / N20_N_FRACTION),
    ];

    let series: Vec<Column> = row
        .iter()
        .map(|(name, value)| Series::new((*name).into(), [*value]).into())
        .collect();
    Ok(DataFrame::new(series)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(df: &DataFrame, column: &str) -> f64 {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .get(0)
            .unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn urea_rate_for_46_kg_n_is_100() {
        let row = rates_from_target_n(46.0).unwrap();
        assert_eq!(row.height(), 1);
        assert_close(cell(&row, columns::UREA_46_KG_HA), 100.0);
        assert_close(cell(&row, columns::KG_HA_NUTRIENT), 46.0);
    }

    #[test]
    fn zero_target_gives_all_zero_rates() {
        let row = rates_from_target_n(0.0).unwrap();
        for name in [
            columns::KG_HA_NUTRIENT,
            columns::UNIT_AC,
            columns::UREA_46_KG_HA,
            columns::NITRAM_34_5_KG_HA,
            columns::NURAM_35S_L_HA,
            columns::N20,
        ] {
            assert_eq!(cell(&row, name), 0.0, "{name}");
        }
    }

    #[test]
    fn unit_ac_uses_pound_per_acre_factor() {
        let row = rates_from_target_n(112.085).unwrap();
        assert_close(cell(&row, columns::UNIT_AC), 100.0);
    }

    #[test]
    fn remaining_product_divisors() {
        let row = rates_from_target_n(69.0).unwrap();
        assert_close(cell(&row, columns::NITRAM_34_5_KG_HA), 200.0);
        assert_close(cell(&row, columns::NURAM_35S_L_HA), 69.0 / 0.35);
        assert_close(cell(&row, columns::N20), 345.0);
    }
}
