use crate::config::Config;
use crate::convert::converter::Converter;
use crate::convert::result::{Conversion, ConvertResult};
use crate::timestamp::TimestampConverter;
use crate::units;
use std::sync::mpsc::Sender;

/// Sent to the presentation side once per processed clipboard text
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionEvent {
    Converted(ConvertResult),
    // Nothing recognised, any previously shown value should go away
    Cleared,
}

/// Tries each enabled converter in order; the first match wins
pub struct ConversionManager {
    converters: Vec<Box<dyn Converter>>,
    events: Option<Sender<ConversionEvent>>,
}

impl ConversionManager {
    pub fn new(converters: Vec<Box<dyn Converter>>) -> Self {
        Self {
            converters,
            events: None,
        }
    }

    /// Timestamp first, then simple units
    pub fn from_config(config: &Config) -> Self {
        let converters: Vec<Box<dyn Converter>> = vec![
            Box::new(TimestampConverter::new(
                &config.timestamp,
                config.converters.timestamp,
            )),
            Box::new(simple_unit_from_config(config)),
        ];

        Self::new(converters)
    }

    pub fn with_events(mut self, sender: Sender<ConversionEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Names of the converters that take part, in order
    pub fn enabled_converters(&self) -> Vec<&str> {
        self.converters
            .iter()
            .filter(|c| c.is_enabled())
            .map(|c| c.name())
            .collect()
    }

    pub fn process(&self, text: &str) -> Conversion {
        log::debug!("Clipboard changed: {:?}", text);

        let conversion: Conversion = self
            .converters
            .iter()
            .filter(|converter| converter.is_enabled())
            .find_map(|converter| converter.try_convert(text).into_result())
            .into();

        match &conversion {
            Conversion::Matched(result) => {
                log::debug!(
                    "{} detected: {:?} -> {:?}",
                    result.converter_name(),
                    result.original(),
                    result.output()
                );
            }
            Conversion::NoMatch => log::debug!("Conversion cleared"),
        }

        self.emit(&conversion);
        conversion
    }

    fn emit(&self, conversion: &Conversion) {
        let Some(sender) = &self.events else {
            return;
        };

        let event = match conversion {
            Conversion::Matched(result) => ConversionEvent::Converted(result.clone()),
            Conversion::NoMatch => ConversionEvent::Cleared,
        };

        if sender.send(event).is_err() {
            log::warn!("Conversion event receiver is gone, dropping event");
        }
    }
}

fn simple_unit_from_config(config: &Config) -> units::SimpleUnitConverter {
    if config.converters.simple_unit {
        units::simple_unit_converter(&config.units)
    } else {
        units::SimpleUnitConverter::new(Vec::new(), Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::sync::Arc;

    struct Fixed {
        name: &'static str,
        enabled: bool,
        matches: bool,
        calls: Arc<AtomicUsize>,
    }

    impl Fixed {
        fn boxed(
            name: &'static str,
            enabled: bool,
            matches: bool,
        ) -> (Box<dyn Converter>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let converter = Fixed {
                name,
                enabled,
                matches,
                calls: Arc::clone(&calls),
            };
            (Box::new(converter), calls)
        }
    }

    impl Converter for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn try_convert(&self, text: &str) -> Conversion {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.matches {
                Conversion::Matched(ConvertResult::new(self.name, text, self.name))
            } else {
                Conversion::NoMatch
            }
        }
    }

    #[test]
    fn test_first_match_wins() {
        let (first, first_calls) = Fixed::boxed("first", true, true);
        let (second, second_calls) = Fixed::boxed("second", true, true);
        let manager = ConversionManager::new(vec![first, second]);

        let result = manager.process("x").into_result().unwrap();
        assert_eq!(result.converter_name(), "first");
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_falls_through_and_skips_disabled() {
        let (disabled, disabled_calls) = Fixed::boxed("disabled", false, true);
        let (miss, miss_calls) = Fixed::boxed("miss", true, false);
        let (hit, _) = Fixed::boxed("hit", true, true);
        let manager = ConversionManager::new(vec![disabled, miss, hit]);

        assert_eq!(manager.enabled_converters(), vec!["miss", "hit"]);
        let result = manager.process("x").into_result().unwrap();
        assert_eq!(result.converter_name(), "hit");
        assert_eq!(disabled_calls.load(Ordering::SeqCst), 0);
        assert_eq!(miss_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_one_event_per_input() {
        let (tx, rx) = mpsc::channel();
        let (hit, _) = Fixed::boxed("hit", true, true);
        let (miss, _) = Fixed::boxed("miss", true, false);

        ConversionManager::new(vec![hit]).with_events(tx.clone()).process("a");
        ConversionManager::new(vec![miss]).with_events(tx).process("b");

        let events: Vec<ConversionEvent> = rx.iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], ConversionEvent::Converted(r) if r.original() == "a"));
        assert_eq!(events[1], ConversionEvent::Cleared);
    }

    #[test]
    fn test_dropped_receiver_does_not_panic() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let manager = ConversionManager::new(Vec::new()).with_events(tx);
        assert_eq!(manager.process("anything"), Conversion::NoMatch);
    }

    #[test]
    fn test_from_config_order_and_flags() {
        let mut config = Config::empty();
        let manager = ConversionManager::from_config(&config);
        assert_eq!(manager.enabled_converters(), vec!["Timestamp", "Simple"]);

        config.converters.timestamp = false;
        config.converters.simple_unit = false;
        let manager = ConversionManager::from_config(&config);
        assert!(manager.enabled_converters().is_empty());
        assert_eq!(manager.process("1700000000"), Conversion::NoMatch);
        assert_eq!(manager.process("50 km/h"), Conversion::NoMatch);
    }
}
