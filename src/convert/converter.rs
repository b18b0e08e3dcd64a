use crate::convert::result::Conversion;

/// A top-level strategy tried by the ConversionManager against clipboard text
pub trait Converter: Send + Sync {
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    /// Must not panic on arbitrary input; anything unrecognised is NoMatch
    fn try_convert(&self, text: &str) -> Conversion;
}
