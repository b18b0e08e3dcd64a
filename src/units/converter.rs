use crate::convert::{Conversion, ConvertResult};

/// One unit family registered inside the SimpleUnitConverter
pub trait UnitConverter: Send + Sync {
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    /// Lower-case identifiers this family answers to, aliases included
    fn unit_ids(&self) -> Vec<String>;

    fn try_convert(&self, value: f64, unit_id: &str) -> Conversion;
}

/// How a unit is keyed in metadata and shown to the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitLabel {
    pub id: &'static str,
    pub symbol: &'static str,
}

/// A unit related to its family's base unit by a constant factor
#[derive(Debug, Clone, Copy)]
pub struct FactorUnit {
    pub id: &'static str,
    pub symbol: &'static str,
    pub to_base: f64,
    // Unit the value is shown in when copied in this unit
    pub target: &'static str,
}

impl FactorUnit {
    pub fn label(&self) -> UnitLabel {
        UnitLabel {
            id: self.id,
            symbol: self.symbol,
        }
    }
}

pub fn find_unit<'a>(table: &'a [FactorUnit], id: &str) -> Option<&'a FactorUnit> {
    table.iter().find(|unit| unit.id == id)
}

pub fn convert_by_factor(table: &[FactorUnit], value: f64, from: &str, to: &str) -> Option<f64> {
    let from = find_unit(table, from)?;
    let to = find_unit(table, to)?;
    let converted = value * from.to_base / to.to_base;
    converted.is_finite().then_some(converted)
}

/// Round to `precision` decimals and drop trailing zeros: 31.0686 -> "31.07", 20.0 -> "20"
pub fn format_number(value: f64, precision: usize) -> String {
    let mut text = format!("{:.*}", precision, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Common rendering for every unit family
pub fn quantity_result(
    family: &str,
    value: f64,
    from: UnitLabel,
    converted: f64,
    to: UnitLabel,
    precision: usize,
) -> ConvertResult {
    let source = format!("{} {}", format_number(value, precision), from.symbol);
    let output = format!("{} {}", format_number(converted, precision), to.symbol);

    ConvertResult::new(family, source, output)
        .with_metadata("unit", from.id)
        .with_metadata("target_unit", to.id)
        .with_metadata("value", value.to_string())
        .with_metadata("converted", converted.to_string())
        .with_metadata("precision", precision.to_string())
}

/// Shared implementation for families whose units only differ by a factor
pub fn convert_factor_family(
    family: &str,
    table: &[FactorUnit],
    value: f64,
    canonical_id: &str,
    precision: usize,
) -> Conversion {
    let Some(from) = find_unit(table, canonical_id) else {
        return Conversion::NoMatch;
    };
    let Some(to) = find_unit(table, from.target) else {
        return Conversion::NoMatch;
    };

    match convert_by_factor(table, value, from.id, to.id) {
        Some(converted) => {
            let result =
                quantity_result(family, value, from.label(), converted, to.label(), precision);
            Conversion::Matched(result)
        }
        None => Conversion::NoMatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(31.0686, 2), "31.07");
        assert_eq!(format_number(20.0, 2), "20");
        assert_eq!(format_number(1.5, 2), "1.5");
        assert_eq!(format_number(-0.001, 2), "0");
        assert_eq!(format_number(1234.0, 0), "1234");
        assert_eq!(format_number(-40.0, 3), "-40");
    }

    #[test]
    fn test_convert_by_factor_unknown_unit() {
        let table = [FactorUnit {
            id: "m",
            symbol: "m",
            to_base: 1.0,
            target: "m",
        }];
        assert_eq!(convert_by_factor(&table, 1.0, "m", "m"), Some(1.0));
        assert_eq!(convert_by_factor(&table, 1.0, "m", "ft"), None);
    }

    #[test]
    fn test_quantity_result_rendering() {
        let from = UnitLabel { id: "km", symbol: "km" };
        let to = UnitLabel { id: "mi", symbol: "mi" };
        let result = quantity_result("Length", 10.0, from, 6.213_71, to, 2);

        assert_eq!(result.original(), "10 km");
        assert_eq!(result.output(), "6.21 mi");
        assert_eq!(result.metadata_value("unit"), Some("km"));
        assert_eq!(result.metadata_value("target_unit"), Some("mi"));
        assert_eq!(result.metadata_value("precision"), Some("2"));
    }
}
