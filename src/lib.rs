pub mod config;
pub mod convert;
pub mod number;
pub mod timestamp;
pub mod units;
pub mod watch;
