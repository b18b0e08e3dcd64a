use crate::convert::{Conversion, Converter};
use crate::number::ThousandsDetector;
use crate::units::converter::UnitConverter;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Number followed directly by a unit, anchored at the start of the normalized text
    /// Examples (after whitespace removal): "50km/h", "-20°c", "1.234,5kg"
    static ref NUMBER_AND_UNIT: Regex = Regex::new(r"^(-?[\d,.]*\d[\d,.]*)([a-z/*°]+)").unwrap();
}

/// Converts "number + unit" text by dispatching to the unit family owning the unit
pub struct SimpleUnitConverter {
    variants: Vec<Box<dyn UnitConverter>>,
    // unit id -> index into variants
    unit_to_variant: HashMap<String, usize>,
    detector: ThousandsDetector,
}

impl SimpleUnitConverter {
    pub fn new(variants: Vec<Box<dyn UnitConverter>>, detector: ThousandsDetector) -> Self {
        let mut unit_to_variant = HashMap::new();

        for (index, variant) in variants.iter().enumerate() {
            if !variant.is_enabled() {
                continue;
            }

            for unit_id in variant.unit_ids() {
                if let Some(previous) = unit_to_variant.insert(unit_id.clone(), index) {
                    if previous != index {
                        log::warn!(
                            "Unit '{}' of {} is also claimed by {}, using {}",
                            unit_id,
                            variants[previous].name(),
                            variant.name(),
                            variant.name()
                        );
                    }
                }
            }
        }

        Self {
            variants,
            unit_to_variant,
            detector,
        }
    }

    /// Registered unit ids, sorted
    pub fn unit_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.unit_to_variant.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Name of the family a unit id dispatches to
    pub fn owner_of(&self, unit_id: &str) -> Option<&str> {
        self.unit_to_variant
            .get(unit_id)
            .map(|&index| self.variants[index].name())
    }

    fn parse_text<'a>(&self, text: &'a str) -> Option<Quantity<'a>> {
        let normalized: String = text
            .split_whitespace()
            .collect::<String>()
            .to_lowercase();

        let captures = NUMBER_AND_UNIT.captures(&normalized)?;
        let number = captures.get(1)?.as_str();
        let unit = captures.get(2)?.as_str();

        if !self.unit_to_variant.contains_key(unit) {
            return None;
        }

        let value = self.detector.parse_number(number)?;
        let matched_chars = captures.get(0)?.as_str().chars().count();

        Some(Quantity {
            value,
            unit: unit.to_string(),
            original: source_span(text, matched_chars),
        })
    }
}

/// A number and registered unit read from the start of the clipboard text
#[derive(Debug, PartialEq)]
struct Quantity<'a> {
    value: f64,
    unit: String,
    // The matched part of the input, spacing and case as typed
    original: &'a str,
}

// Slice of `text` that normalizes to its first `normalized_chars` characters
fn source_span(text: &str, normalized_chars: usize) -> &str {
    let text = text.trim_start();
    let mut seen = 0;

    for (index, c) in text.char_indices() {
        if c.is_whitespace() {
            continue;
        }
        seen += c.to_lowercase().count();
        if seen >= normalized_chars {
            return &text[..index + c.len_utf8()];
        }
    }

    text.trim_end()
}

impl Converter for SimpleUnitConverter {
    fn name(&self) -> &str {
        "Simple"
    }

    fn is_enabled(&self) -> bool {
        !self.unit_to_variant.is_empty()
    }

    /// `original` on the result is the matched number and unit, trailing text is left out
    fn try_convert(&self, text: &str) -> Conversion {
        let Some(quantity) = self.parse_text(text) else {
            return Conversion::NoMatch;
        };

        // parse_text only returns registered units
        let variant = &self.variants[self.unit_to_variant[&quantity.unit]];

        variant
            .try_convert(quantity.value, &quantity.unit)
            .map(|result| {
                result
                    .with_name_prefix(self.name())
                    .with_original(quantity.original)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{LengthConverter, MassConverter, SpeedConverter, TemperatureConverter};

    fn registry(temperature: bool, length: bool, speed: bool, mass: bool) -> SimpleUnitConverter {
        SimpleUnitConverter::new(
            vec![
                Box::new(TemperatureConverter::new(temperature, 2)),
                Box::new(LengthConverter::new(length, 2)),
                Box::new(SpeedConverter::new(speed, 2)),
                Box::new(MassConverter::new(mass, 2)),
            ],
            ThousandsDetector::new(),
        )
    }

    // Claims "m" and "mi" so collisions with Length can be observed
    struct Minutes;

    impl UnitConverter for Minutes {
        fn name(&self) -> &str {
            "Minutes"
        }

        fn is_enabled(&self) -> bool {
            true
        }

        fn unit_ids(&self) -> Vec<String> {
            vec!["m".to_string(), "min".to_string()]
        }

        fn try_convert(&self, value: f64, _unit_id: &str) -> Conversion {
            Conversion::Matched(crate::convert::ConvertResult::new(
                "Minutes",
                value.to_string(),
                format!("{} s", value * 60.0),
            ))
        }
    }

    #[test]
    fn test_whitespace_and_case_are_normalized() {
        let converter = registry(true, true, true, true);
        for text in ["50 KM/H", "50km/h", " 5 0 K M / H ", "50\tkm /h\n"] {
            let quantity = converter.parse_text(text).unwrap();
            assert_eq!(quantity.value, 50.0, "{:?}", text);
            assert_eq!(quantity.unit, "km/h", "{:?}", text);
            assert_eq!(quantity.original, text.trim(), "{:?}", text);
        }
    }

    #[test]
    fn test_original_is_the_matched_text() {
        let converter = registry(true, true, true, true);

        let result = converter.try_convert("12 kg (approx)").into_result().unwrap();
        assert_eq!(result.original(), "12 kg");

        let result = converter.try_convert("  20 °C!").into_result().unwrap();
        assert_eq!(result.original(), "20 °C");

        let result = converter.try_convert("1.234,5 KM, give or take").into_result().unwrap();
        assert_eq!(result.original(), "1.234,5 KM");
    }

    #[test]
    fn test_bare_k_is_not_a_temperature() {
        let converter = registry(true, true, true, true);
        assert_eq!(converter.try_convert("10k"), Conversion::NoMatch);
        assert_eq!(converter.try_convert("-5 K"), Conversion::NoMatch);
        assert_eq!(converter.try_convert("-5 kelvin"), Conversion::NoMatch);

        let result = converter.try_convert("300 Kelvin").into_result().unwrap();
        assert_eq!(result.output(), "26.85 °C");
    }

    #[test]
    fn test_converts_and_prefixes_name() {
        let converter = registry(true, true, true, true);
        let result = converter.try_convert(" 50 km/h ").into_result().unwrap();
        assert_eq!(result.converter_name(), "Simple.Speed");
        assert_eq!(result.original(), "50 km/h");
        assert_eq!(result.output(), "31.07 mph");

        let result = converter.try_convert("-20 °C").into_result().unwrap();
        assert_eq!(result.converter_name(), "Simple.Temperature");
        assert_eq!(result.output(), "-4 °F");
    }

    #[test]
    fn test_locale_numbers() {
        let converter = registry(true, true, true, true);
        let result = converter.try_convert("1.234,5 km").into_result().unwrap();
        assert_eq!(result.metadata_value("value"), Some("1234.5"));

        let result = converter.try_convert("1,5 kg").into_result().unwrap();
        assert_eq!(result.output(), "3.31 lb");
    }

    #[test]
    fn test_prefix_match_ignores_trailing_text_only_when_unit_is_clean() {
        let converter = registry(true, true, true, true);
        // Whitespace removal glues the trailing word onto the unit
        assert_eq!(converter.try_convert("50 km/h is fast"), Conversion::NoMatch);
        // Characters outside the unit class end the unit
        assert!(converter.try_convert("50 km/h!").is_match());
        assert!(converter.try_convert("12 kg (approx)").is_match());
    }

    #[test]
    fn test_no_match_cases() {
        let converter = registry(true, true, true, true);
        for text in ["", "   ", "50 parsecs", "km/h", "hello 50 km", "1,,2 km", "-", "50"] {
            assert_eq!(converter.try_convert(text), Conversion::NoMatch, "{:?}", text);
        }
    }

    #[test]
    fn test_disabled_variant_is_excluded() {
        let converter = registry(false, true, true, true);
        assert!(converter.owner_of("°c").is_none());
        assert!(converter.owner_of("celsius").is_none());
        assert_eq!(converter.try_convert("20 °C"), Conversion::NoMatch);
        assert!(converter.try_convert("20 km").is_match());
    }

    #[test]
    fn test_enabled_only_with_registered_units() {
        assert!(registry(false, false, false, true).is_enabled());
        assert!(!registry(false, false, false, false).is_enabled());
        assert!(registry(false, false, false, false).unit_ids().is_empty());
    }

    #[test]
    fn test_later_registration_wins() {
        let converter = SimpleUnitConverter::new(
            vec![Box::new(LengthConverter::new(true, 2)), Box::new(Minutes)],
            ThousandsDetector::new(),
        );
        assert_eq!(converter.owner_of("m"), Some("Minutes"));
        assert_eq!(converter.owner_of("km"), Some("Length"));

        let result = converter.try_convert("2 m").into_result().unwrap();
        assert_eq!(result.converter_name(), "Simple.Minutes");
        assert_eq!(result.output(), "120 s");
    }

    #[test]
    fn test_unit_ids_sorted() {
        let converter = registry(false, false, true, false);
        let ids = converter.unit_ids();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert!(ids.contains(&"km/h"));
        assert!(!ids.contains(&"kg"));
    }
}
