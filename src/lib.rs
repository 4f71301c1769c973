use pyo3::prelude::*;
use pyo3::types::PyModule;

mod error;
mod lookup;
mod rates;
mod schema;
mod table;

use table::RateTable;

/// Export schema constants as Python submodules
fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Column names
    let columns = PyModule::new(m.py(), "columns")?;
    columns.add("UNIT_AC", schema::columns::UNIT_AC)?;
    columns.add("KG_HA", schema::columns::KG_HA)?;
    columns.add("KG_HA_NUTRIENT", schema::columns::KG_HA_NUTRIENT)?;
    columns.add("UREA_46_KG_HA", schema::columns::UREA_46_KG_HA)?;
    columns.add("NITRAM_34_5_KG_HA", schema::columns::NITRAM_34_5_KG_HA)?;
    columns.add("NURAM_35S_L_HA", schema::columns::NURAM_35S_L_HA)?;
    columns.add("N20", schema::columns::N20)?;
    m.add_submodule(&columns)?;

    // Match modes
    let modes = PyModule::new(m.py(), "modes")?;
    modes.add("EXACT", schema::modes::EXACT)?;
    modes.add("NEAREST", schema::modes::NEAREST)?;
    modes.add("BRACKET", schema::modes::BRACKET)?;
    modes.add("INTERPOLATED", schema::modes::INTERPOLATED)?;
    m.add_submodule(&modes)?;

    // Product conversion constants
    let products = PyModule::new(m.py(), "products")?;
    products.add("KG_N_HA_PER_UNIT_AC", rates::KG_N_HA_PER_UNIT_AC)?;
    products.add("UREA_N_FRACTION", rates::UREA_N_FRACTION)?;
    products.add("NITRAM_N_FRACTION", rates::NITRAM_N_FRACTION)?;
    products.add("NURAM_N_PER_LITRE", rates::NURAM_N_PER_LITRE)?;
    products.add("N20_N_FRACTION", rates::N20_N_FRACTION)?;
    m.add_submodule(&products)?;

    Ok(())
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<RateTable>()?;
    add_schema_exports(m)?;
    Ok(())
}
