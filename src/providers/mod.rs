pub mod conversion_rates;

pub use conversion_rates::ConversionRatesProvider;
