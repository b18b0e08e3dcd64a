use crate::convert::Conversion;
use crate::units::converter::{convert_by_factor, convert_factor_family, FactorUnit, UnitConverter};
use crate::units::preprocessor::UnitPreprocessor;

// Base unit: metre per second
pub const UNITS: &[FactorUnit] = &[
    FactorUnit { id: "km/h", symbol: "km/h", to_base: 1.0 / 3.6, target: "mph" },
    FactorUnit { id: "mph", symbol: "mph", to_base: 0.44704, target: "km/h" },
    FactorUnit { id: "m/s", symbol: "m/s", to_base: 1.0, target: "km/h" },
    FactorUnit { id: "kn", symbol: "kn", to_base: 1852.0 / 3600.0, target: "km/h" },
];

const ALIASES: &[(&str, &[&str])] = &[
    ("km/h", &["kmh", "kph", "kmph", "km/hr"]),
    ("mph", &["mi/h", "mi/hr"]),
    ("m/s", &["mps"]),
    ("kn", &["kt", "kts", "knot", "knots"]),
];

/// km/h <-> mph, plus m/s and knots shown in km/h
pub struct SpeedConverter {
    preprocessor: UnitPreprocessor,
    enabled: bool,
    precision: usize,
}

impl SpeedConverter {
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

impl UnitConverter for SpeedConverter {
    fn name(&self) -> &str {
        "Speed"
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
