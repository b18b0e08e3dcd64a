pub mod converter;
pub mod manager;
pub mod result;

pub use converter::Converter;
pub use manager::{ConversionEvent, ConversionManager};
pub use result::{Conversion, ConvertResult};
