pub mod converter;
pub mod formatter;
pub mod types;

pub use converter::{Clock, TimestampConverter};
pub use formatter::TimestampTextFormatter;
pub use types::{Timestamp, TimestampUnit};
