//! Upcharge Rules
//!
//! Which named cost-table upcharges apply to a material for a given color and
//! surface. The amounts themselves live in the cost table (`base_costs.json`);
//! this table only says when each key is charged.
//!
//! All matching is case-insensitive. Materials without rules (APET,
//! polycarbonate, polyethylene, ...) price at their base rate.

/// Which attribute of the sheet a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Color,
    Surface,
}

/// Condition on the attribute value (values are lowercase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    AnyOf(&'static [&'static str]),
    NoneOf(&'static [&'static str]),
}

/// One upcharge: when `attribute` meets `condition`, add the cost-table amount at `cost_key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpchargeRule {
    pub attribute: Attribute,
    pub condition: Condition,
    pub cost_key: &'static str,
}

impl UpchargeRule {
    /// Check the rule against a color and surface (any case)
    pub fn applies(&self, color: &str, surface: &str) -> bool {
        let value = match self.attribute {
            Attribute::Color => color,
            Attribute::Surface => surface,
        };
        let value = value.to_lowercase();
        match self.condition {
            Condition::AnyOf(options) => options.contains(&value.as_str()),
            Condition::NoneOf(options) => !options.contains(&value.as_str()),
        }
    }
}

const VINYL_RULES: &[UpchargeRule] = &[
    UpchargeRule {
        attribute: Attribute::Color,
        condition: Condition::NoneOf(&["white", "clear"]),
        cost_key: "color_up",
    },
    UpchargeRule {
        attribute: Attribute::Color,
        condition: Condition::AnyOf(&["clear"]),
        cost_key: "clear_up",
    },
    UpchargeRule {
        attribute: Attribute::Surface,
        condition: Condition::AnyOf(&["gloss/gloss"]),
        cost_key: "gloss_up",
    },
    UpchargeRule {
        attribute: Attribute::Surface,
        condition: Condition::AnyOf(&["velvet/gloss", "velvet one side"]),
        cost_key: "velvet_up",
    },
];

const STYRENE_RULES: &[UpchargeRule] = &[
    UpchargeRule {
        attribute: Attribute::Color,
        condition: Condition::AnyOf(&["dead white"]),
        cost_key: "dead_white_up",
    },
    UpchargeRule {
        attribute: Attribute::Color,
        condition: Condition::AnyOf(&["translucent white"]),
        cost_key: "translucent_white_up",
    },
    UpchargeRule {
        attribute: Attribute::Surface,
        condition: Condition::AnyOf(&["gloss/matte"]),
        cost_key: "gloss_up",
    },
];

/// Upcharge rules keyed by lowercase material name (the cost-table key)
pub const UPCHARGE_RULES: &[(&str, &[UpchargeRule])] = &[
    ("vinyl", VINYL_RULES),
    ("styrene", STYRENE_RULES),
];

/// Rules for a material, empty when it has none
pub fn rules_for(material: &str) -> &'static [UpchargeRule] {
    let key = material.to_lowercase();
    UPCHARGE_RULES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rules)| *rules)
        .unwrap_or(&[])
}

/// Cost-table keys charged for this material/color/surface, in rule order
pub fn applicable_keys(material: &str, color: &str, surface: &str) -> Vec<&'static str> {
    rules_for(material)
        .iter()
        .filter(|rule| rule.applies(color, surface))
        .map(|rule| rule.cost_key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vinyl_color_rules() {
        assert_eq!(applicable_keys("Vinyl", "White", "Matte/Matte"), Vec::<&str>::new());
        assert_eq!(applicable_keys("vinyl", "Red", "Matte/Matte"), vec!["color_up"]);
        assert_eq!(applicable_keys("VINYL", "CLEAR", "matte/matte"), vec!["clear_up"]);
    }

    #[test]
    fn test_vinyl_surface_rules() {
        assert_eq!(applicable_keys("vinyl", "white", "Gloss/Gloss"), vec!["gloss_up"]);
        assert_eq!(applicable_keys("vinyl", "white", "Velvet/Gloss"), vec!["velvet_up"]);
        assert_eq!(applicable_keys("vinyl", "white", "Velvet One Side"), vec!["velvet_up"]);
        assert_eq!(
            applicable_keys("vinyl", "Blue", "gloss/gloss"),
            vec!["color_up", "gloss_up"]
        );
    }

    #[test]
    fn test_styrene_rules() {
        assert_eq!(applicable_keys("Styrene", "Dead White", "Matte/Matte"), vec!["dead_white_up"]);
        assert_eq!(
            applicable_keys("styrene", "translucent white", "Gloss/Matte"),
            vec!["translucent_white_up", "gloss_up"]
        );
        assert_eq!(applicable_keys("styrene", "Black", "Gloss/Gloss"), Vec::<&str>::new());
    }

    #[test]
    fn test_materials_without_rules() {
        assert!(rules_for("APET").is_empty());
        assert!(rules_for("polycarbonate").is_empty());
        assert!(applicable_keys("Polyethylene", "Red", "Gloss/Gloss").is_empty());
    }
}
