use crate::convert::Conversion;
use crate::units::converter::{convert_by_factor, convert_factor_family, FactorUnit, UnitConverter};
use crate::units::preprocessor::UnitPreprocessor;

// Base unit: metre
pub const UNITS: &[FactorUnit] = &[
    FactorUnit { id: "mm", symbol: "mm", to_base: 0.001, target: "in" },
    FactorUnit { id: "cm", symbol: "cm", to_base: 0.01, target: "in" },
    FactorUnit { id: "m", symbol: "m", to_base: 1.0, target: "ft" },
    FactorUnit { id: "km", symbol: "km", to_base: 1000.0, target: "mi" },
    FactorUnit { id: "in", symbol: "in", to_base: 0.0254, target: "cm" },
    FactorUnit { id: "ft", symbol: "ft", to_base: 0.3048, target: "m" },
    FactorUnit { id: "yd", symbol: "yd", to_base: 0.9144, target: "m" },
    FactorUnit { id: "mi", symbol: "mi", to_base: 1609.344, target: "km" },
];

const ALIASES: &[(&str, &[&str])] = &[
    ("mm", &["millimeter", "millimeters", "millimetre", "millimetres"]),
    ("cm", &["centimeter", "centimeters", "centimetre", "centimetres"]),
    ("m", &["meter", "meters", "metre", "metres"]),
    ("km", &["kilometer", "kilometers", "kilometre", "kilometres"]),
    ("in", &["inch", "inches"]),
    ("ft", &["foot", "feet"]),
    ("yd", &["yard", "yards"]),
    ("mi", &["mile", "miles"]),
];

/// Metric <-> imperial lengths
pub struct LengthConverter {
    preprocessor: UnitPreprocessor,
    enabled: bool,
    precision: usize,
}

impl LengthConverter {
    pub fn new(enabled: bool, precision: usize) -> Self {
        Self {
            preprocessor: UnitPreprocessor::new(ALIASES),
            enabled,
            precision,
        }
    }

    pub fn convert(value: f64, from: &str, to: &str) -> Option<f64> {
        convert_by_factor(UNITS, value, from, to)
    }
}

impl UnitConverter for LengthConverter {
    fn name(&self) -> &str {
        "Length"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn unit_ids(&self) -> Vec<String> {
        self.preprocessor.unit_ids()
    }

    fn try_convert(&self, value: f64, unit_id: &str) -> Conversion {
        match self.preprocessor.canonical(unit_id) {
            Some(unit) => convert_factor_family(self.name(), UNITS, value, unit, self.precision),
            None => Conversion::NoMatch,
        }
    }
}
