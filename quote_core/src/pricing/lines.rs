//! Line Pricers
//!
//! One pricer per line kind. Each resolves weight, base cost and base column
//! from its own source, runs [`core_engine`], applies the order minimums and
//! rounds only the values it reports.
//!
//! | Kind    | Weight / cost source          | Material code  | Minimum width |
//! |---------|-------------------------------|----------------|---------------|
//! | stock   | item catalog + cost table     | item's code    | item width    |
//! | custom  | material spec + cost table    | spec's code    | sheet width   |
//! | ad hoc  | caller input                  | `AD`           | 48"           |

use super::columns::extract_column_from_breaks;
use super::cost::build_base_cost_per_unit;
use super::engine::{core_engine, EngineInput};
use super::minimums::apply_order_minimums;
use super::round_to;
use crate::errors::{QuoteError, QuoteResult};
use crate::materials::codes::{custom_sheet_surcharge, MaterialCode};
use crate::materials::custom_rules::{
    get_material_spec, minimum_sheets_for_weight, sheet_weight, MINIMUM_WEIGHT_LBS,
};
use crate::quote::{AdHocLine, CustomLine, LineKind, LinePriceResult, StockLine};
use crate::settings::{Customer, Settings};

/// Width assumed for ad-hoc minimums
pub const AD_HOC_WIDTH: f64 = 48.0;

/// Description used when an ad-hoc line has none
pub const AD_HOC_DESCRIPTION: &str = "Ad-hoc line";

/// Everything a line pricer reads besides the line itself
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub customer: &'a Customer,
    pub settings: &'a Settings,
    pub include_freight: bool,
}

impl<'a> LineContext<'a> {
    fn engine_input(
        &self,
        material_code: &str,
        base_column: i32,
        base_cost_per_unit: f64,
        weight_per_unit: f64,
        quantity: f64,
    ) -> EngineInput {
        EngineInput {
            base_cost_per_unit,
            weight_per_unit,
            quantity,
            base_column,
            material_code: material_code.to_string(),
            include_freight: self.include_freight,
            freight_column_offset: self.customer.freight_column_offset,
        }
    }

    fn base_column(&self, material_code: &str) -> i32 {
        extract_column_from_breaks(material_code, &self.customer.column_break)
    }
}

/// Unrounded line figures, rounded once into a [`LinePriceResult`]
struct PricedLine {
    kind: LineKind,
    sku: Option<String>,
    description: String,
    quantity: f64,
    weight_per_unit: f64,
    base_cost_per_unit: f64,
    sell_price_per_unit: f64,
    total_column: i32,
}

impl PricedLine {
    fn into_result(self) -> LinePriceResult {
        let extended = self.sell_price_per_unit * self.quantity;
        LinePriceResult {
            kind: self.kind,
            sku: self.sku,
            description: self.description,
            quantity: self.quantity,
            weight_per_unit: self.weight_per_unit,
            base_cost_per_unit: round_to(self.base_cost_per_unit, 4),
            sell_price_per_unit: round_to(self.sell_price_per_unit, 4),
            extended_sell_price: round_to(extended, 2),
            total_column: self.total_column,
        }
    }
}

/// Price a catalog item.
///
/// Fails with `ItemNotFound` when the SKU is not in the catalog.
pub fn price_stock_line(line: &StockLine, ctx: &LineContext<'_>) -> QuoteResult<LinePriceResult> {
    let item = ctx
        .settings
        .item(&line.sku)
        .ok_or_else(|| QuoteError::item_not_found(&line.sku))?;

    let base_cost_per_unit = build_base_cost_per_unit(
        &item.material,
        &item.color,
        &item.surface,
        item.weight_per_unit,
        &ctx.settings.base_costs,
    );

    let output = core_engine(
        &ctx.engine_input(
            &item.material_code,
            ctx.base_column(&item.material_code),
            base_cost_per_unit,
            item.weight_per_unit,
            line.quantity,
        ),
        &ctx.settings.weight_breaks,
        &ctx.settings.column_multipliers,
    );

    let sell_price_per_unit = apply_order_minimums(output.price_per_unit, line.quantity, item.width);

    Ok(PricedLine {
        kind: LineKind::Stock,
        sku: Some(item.sku.clone()),
        description: item.description.clone(),
        quantity: line.quantity,
        weight_per_unit: item.weight_per_unit,
        base_cost_per_unit,
        sell_price_per_unit,
        total_column: output.total_column,
    }
    .into_result())
}

/// Weight factor and code for a custom material, with a fallback for
/// materials that have no spec
fn custom_material_profile(material: &str) -> (f64, MaterialCode) {
    if let Some(spec) = get_material_spec(material) {
        return (spec.weight_factor, spec.material_code);
    }
    match material.to_lowercase().as_str() {
        "vinyl" => (0.05, MaterialCode::Vinyl),
        "apet" => (0.05, MaterialCode::Apet),
        _ => (0.04, MaterialCode::Styrene),
    }
}

/// `"0.060 White Matte/Matte Styrene 30X40"`
fn custom_description(line: &CustomLine, gauge: f64, width: f64, length: f64) -> String {
    format!(
        "{:.3} {} {} {} {}X{}",
        gauge,
        line.color.as_deref().unwrap_or(""),
        line.surface.as_deref().unwrap_or(""),
        line.material.as_deref().unwrap_or(""),
        width.trunc() as i64,
        length.trunc() as i64
    )
}

/// Price a made-to-order sheet.
///
/// Runs under [`MINIMUM_WEIGHT_LBS`] are bumped to the minimum-run sheet
/// count; the reported quantity is the bumped count. Styrene customs price
/// further up the multiplier table than stock styrene.
///
/// The line is expected to have passed validation; absent fields price as
/// zero.
pub fn price_custom_line(line: &CustomLine, ctx: &LineContext<'_>) -> LinePriceResult {
    let material = line.material.as_deref().unwrap_or("");
    let color = line.color.as_deref().unwrap_or("");
    let surface = line.surface.as_deref().unwrap_or("");
    let gauge = line.gauge.unwrap_or(0.0);
    let width = line.width.unwrap_or(0.0);
    let length = line.length.unwrap_or(0.0);
    let mut sheets = line.sheets.unwrap_or(0.0);

    let (weight_factor, code) = custom_material_profile(material);
    let weight_per_sheet = sheet_weight(weight_factor, gauge, width, length);

    if weight_per_sheet > 0.0 && weight_per_sheet * sheets < MINIMUM_WEIGHT_LBS {
        let bumped = minimum_sheets_for_weight(weight_per_sheet);
        tracing::debug!(material, requested = sheets, bumped, "custom run under minimum weight");
        sheets = bumped;
    }

    let base_cost_per_unit = build_base_cost_per_unit(
        material,
        color,
        surface,
        weight_per_sheet,
        &ctx.settings.base_costs,
    );

    let base_column = ctx.base_column(code.code()) + custom_sheet_surcharge(code);

    let output = core_engine(
        &ctx.engine_input(
            code.code(),
            base_column,
            base_cost_per_unit,
            weight_per_sheet,
            sheets,
        ),
        &ctx.settings.weight_breaks,
        &ctx.settings.column_multipliers,
    );

    let sell_price_per_unit = apply_order_minimums(output.price_per_unit, sheets, width);

    let description = match line.description.as_deref() {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => custom_description(line, gauge, width, length),
    };

    PricedLine {
        kind: LineKind::Custom,
        sku: None,
        description,
        quantity: sheets,
        weight_per_unit: weight_per_sheet,
        base_cost_per_unit,
        sell_price_per_unit,
        total_column: output.total_column,
    }
    .into_result()
}

/// Price a line from caller-supplied weight and landed cost
pub fn price_ad_hoc_line(line: &AdHocLine, ctx: &LineContext<'_>) -> LinePriceResult {
    let weight_per_unit = line.weight_per_unit.unwrap_or(0.0);
    let base_cost_per_unit = line.landed_cost_per_unit.unwrap_or(0.0);
    let code = MaterialCode::AdHoc.code();

    let output = core_engine(
        &ctx.engine_input(
            code,
            ctx.base_column(code),
            base_cost_per_unit,
            weight_per_unit,
            line.quantity,
        ),
        &ctx.settings.weight_breaks,
        &ctx.settings.column_multipliers,
    );

    let sell_price_per_unit = apply_order_minimums(output.price_per_unit, line.quantity, AD_HOC_WIDTH);

    let description = match line.description.as_deref() {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => AD_HOC_DESCRIPTION.to_string(),
    };

    PricedLine {
        kind: LineKind::AdHoc,
        sku: None,
        description,
        quantity: line.quantity,
        weight_per_unit,
        base_cost_per_unit,
        sell_price_per_unit,
        total_column: output.total_column,
    }
    .into_result()
}
