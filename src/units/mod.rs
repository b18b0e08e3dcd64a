// Simple unit conversion: a single number followed by a single unit, e.g. "50 km/h"

pub mod converter;
pub mod length;
pub mod mass;
pub mod preprocessor;
pub mod registry;
pub mod speed;
pub mod temperature;

pub use converter::{format_number, UnitConverter};
pub use length::LengthConverter;
pub use mass::MassConverter;
pub use preprocessor::UnitPreprocessor;
pub use registry::SimpleUnitConverter;
pub use speed::SpeedConverter;
pub use temperature::TemperatureConverter;

use crate::config::UnitsConfig;
use crate::number::ThousandsDetector;

/// Unit families in registration order; later families win unit id collisions
pub fn variants_from_config(config: &UnitsConfig) -> Vec<Box<dyn UnitConverter>> {
    vec![
        Box::new(TemperatureConverter::new(config.temperature, config.precision)),
        Box::new(LengthConverter::new(config.length, config.precision)),
        Box::new(SpeedConverter::new(config.speed, config.precision)),
        Box::new(MassConverter::new(config.mass, config.precision)),
    ]
}

pub fn simple_unit_converter(config: &UnitsConfig) -> SimpleUnitConverter {
    SimpleUnitConverter::new(variants_from_config(config), ThousandsDetector::new())
}
