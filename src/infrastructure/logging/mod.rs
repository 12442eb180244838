//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty console output on stderr
//! - Optional daily-rotated JSON log file

pub mod logger;

pub use logger::LoggerImpl;
