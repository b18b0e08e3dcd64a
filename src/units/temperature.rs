use crate::convert::Conversion;
use crate::units::converter::{quantity_result, UnitConverter, UnitLabel};
use crate::units::preprocessor::UnitPreprocessor;

const CELSIUS: UnitLabel = UnitLabel { id: "°c", symbol: "°C" };
const FAHRENHEIT: UnitLabel = UnitLabel { id: "°f", symbol: "°F" };
// No bare "k": "10k" in everyday text means ten thousand
const KELVIN: UnitLabel = UnitLabel { id: "°k", symbol: "K" };

const ALIASES: &[(&str, &[&str])] = &[
    (CELSIUS.id, &["c", "celsius", "degc"]),
    (FAHRENHEIT.id, &["f", "fahrenheit", "degf"]),
    (KELVIN.id, &["kelvin"]),
];

const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

/// Celsius <-> Fahrenheit, Kelvin is shown in Celsius
pub struct TemperatureConverter {
    preprocessor: UnitPreprocessor,
    enabled: bool,
    precision: usize,
}

impl TemperatureConverter {
    pub fn new(enabled: bool, precision: usize) -> Self {
        Self {
            preprocessor: UnitPreprocessor::new(ALIASES),
            enabled,
            precision,
        }
    }

    /// Convert between two canonical temperature units.
    /// Returns None below absolute zero.
    pub fn convert(value: f64, from: &str, to: &str) -> Option<f64> {
        let kelvin = match from {
            id if id == CELSIUS.id => value - ABSOLUTE_ZERO_CELSIUS,
            id if id == FAHRENHEIT.id => (value - 32.0) * 5.0 / 9.0 - ABSOLUTE_ZERO_CELSIUS,
            id if id == KELVIN.id => value,
            _ => return None,
        };
        if kelvin < 0.0 {
            return None;
        }

        let converted = match to {
            id if id == CELSIUS.id => kelvin + ABSOLUTE_ZERO_CELSIUS,
            id if id == FAHRENHEIT.id => (kelvin + ABSOLUTE_ZERO_CELSIUS) * 9.0 / 5.0 + 32.0,
            id if id == KELVIN.id => kelvin,
            _ => return None,
        };

        converted.is_finite().then_some(converted)
    }

    fn label(unit: &str) -> Option<UnitLabel> {
        [CELSIUS, FAHRENHEIT, KELVIN]
            .into_iter()
            .find(|label| label.id == unit)
    }

    fn target(from: UnitLabel) -> UnitLabel {
        if from == CELSIUS {
            FAHRENHEIT
        } else {
            CELSIUS
        }
    }
}

impl UnitConverter for TemperatureConverter {
    fn name(&self) -> &str {
        "Temperature"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn unit_ids(&self) -> Vec<String> {
        self.preprocessor.unit_ids()
    }

    fn try_convert(&self, value: f64, unit_id: &str) -> Conversion {
        let Some(from) = self.preprocessor.canonical(unit_id).and_then(Self::label) else {
            return Conversion::NoMatch;
        };
        let to = Self::target(from);

        match Self::convert(value, from.id, to.id) {
            Some(converted) => Conversion::Matched(quantity_result(
                self.name(),
                value,
                from,
                converted,
                to,
                self.precision,
            )),
            None => Conversion::NoMatch,
        }
    }
}
