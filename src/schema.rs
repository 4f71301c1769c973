/// Column-name constants for the nitrogen rate table.
/// Single source of truth - exported to Python via PyO3.

// ── Reference table columns ─────────────────────────────────────────────────
pub mod columns {
    /// Units of nitrogen per acre (1 unit/ac = 1.12085 kg N/ha).
    pub const UNIT_AC: &str = "unit_ac";
    pub const KG_HA: &str = "kg_ha";
    /// Nitrogen applied, kg N/ha. The calculator's input quantity.
    pub const KG_HA_NUTRIENT: &str = "kg_ha_nutrient";
    /// Urea product rate, kg/ha (46% N).
    pub const UREA_46_KG_HA: &str = "urea_46_kg_ha";
    /// Nitram product rate, kg/ha (34.5% N).
    pub const NITRAM_34_5_KG_HA: &str = "nitram_34_5_kg_ha";
    /// Nuram 35S liquid rate, l/ha (35% w/v).
    pub const NURAM_35S_L_HA: &str = "nuram_35s_l_ha";
    /// 20% N product rate. Absent above 100 units/ac in the reference table.
    pub const N20: &str = "n20";

    pub const ALL: [&str; 7] = [
        UNIT_AC,
        KG_HA,
        KG_HA_NUTRIENT,
        UREA_46_KG_HA,
        NITRAM_34_5_KG_HA,
        NURAM_35S_L_HA,
        N20,
    ];
}

// ── Match mode values ───────────────────────────────────────────────────────
pub mod modes {
    pub const EXACT: &str = "exact";
    pub const NEAREST: &str = "nearest";
    pub const BRACKET: &str = "bracket";
    pub const INTERPOLATED: &str = "interpolated";
}
