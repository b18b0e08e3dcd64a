pub mod detector;

pub use detector::ThousandsDetector;
