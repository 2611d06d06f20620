//! Core conversion logic and the ambient pieces it needs

pub mod config;
pub mod exchange;
pub mod log;
pub mod rate;

// Re-export main types for cleaner imports
pub use exchange::{ConversionRequest, ConversionResult, ExchangeCalculator, RequestError};
pub use rate::{RateError, RateProvider};
