use crate::convert::Conversion;
use crate::units::converter::{convert_by_factor, convert_factor_family, FactorUnit, UnitConverter};
use crate::units::preprocessor::UnitPreprocessor;

// Base unit: gram
pub const UNITS: &[FactorUnit] = &[
    FactorUnit { id: "g", symbol: "g", to_base: 1.0, target: "oz" },
    FactorUnit { id: "kg", symbol: "kg", to_base: 1000.0, target: "lb" },
    FactorUnit { id: "lb", symbol: "lb", to_base: 453.592_37, target: "kg" },
    FactorUnit { id: "oz", symbol: "oz", to_base: 28.349_523_125, target: "g" },
];

const ALIASES: &[(&str, &[&str])] = &[
    ("g", &["gram", "grams"]),
    ("kg", &["kilo", "kilos", "kilogram", "kilograms"]),
    ("lb", &["lbs", "pound", "pounds"]),
    ("oz", &["ounce", "ounces"]),
];

pub struct MassConverter {
    preprocessor: UnitPreprocessor,
    enabled: bool,
    precision: usize,
}

impl MassConverter {
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

impl UnitConverter for MassConverter {
    fn name(&self) -> &str {
        "Mass"
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
