//! Stock Catalog Options
//!
//! Materials, colors and surfaces carried as stock (catalog) sheets. Stock
//! offers more variety than custom runs; these lists drive item setup and
//! option pickers, they are not checked when pricing a stock SKU.

use super::options_for;

/// Stock material display names
pub const STOCK_MATERIALS: [&str; 8] = [
    "APET",
    "PETG",
    "Polycarbonate",
    "Polyester",
    "Polyethylene",
    "Polypropylene",
    "Styrene",
    "Vinyl",
];

/// Stock colors by lowercase material name
pub const STOCK_COLORS: &[(&str, &[&str])] = &[
    ("apet", &["Clear"]),
    ("petg", &["Clear", "Green Tint"]),
    ("polycarbonate", &["Clear", "Indigo Clear"]),
    ("polyester", &["Clear"]),
    (
        "polyethylene",
        &[
            "Black", "Dark Blue", "Frost", "Green", "Grey", "Light Blue", "Orange", "Red", "White",
            "Yellow",
        ],
    ),
    ("polypropylene", &["White"]),
    (
        "styrene",
        &["Black", "Block Out White", "Dead White", "Translucent White", "White", "Yellow"],
    ),
    (
        "vinyl",
        &[
            "Black",
            "Blue",
            "Clear",
            "Florescent Green",
            "Florescent Orange",
            "Florescent Pink",
            "Florescent Yellow",
            "Gold",
            "Green",
            "Indigo White",
            "Light Blue",
            "Orange",
            "Red",
            "Silver",
            "Tan",
            "White",
            "Yellow",
        ],
    ),
];

/// Stock surfaces by lowercase material name
pub const STOCK_SURFACES: &[(&str, &[&str])] = &[
    ("apet", &["Gloss/Gloss"]),
    ("petg", &["Gloss/Gloss"]),
    (
        "polycarbonate",
        &["FR700 Velvet Gloss", "Gloss/Gloss", "Velvet/Gloss", "Velvet/Matte"],
    ),
    ("polyester", &["Gloss/Gloss"]),
    ("polyethylene", &["Matte/Matte"]),
    ("polypropylene", &["Matte/Matte"]),
    ("styrene", &["Gloss/Gloss", "Matte/Matte"]),
    ("vinyl", &["Blue Matte", "Gloss/Gloss", "Matte/Matte", "Velvet/Gloss"]),
];

/// Stock colors for a material (empty if not stocked)
pub fn stock_colors(material: &str) -> &'static [&'static str] {
    options_for(STOCK_COLORS, material)
}

/// Stock surfaces for a material (empty if not stocked)
pub fn stock_surfaces(material: &str) -> &'static [&'static str] {
    options_for(STOCK_SURFACES, material)
}
