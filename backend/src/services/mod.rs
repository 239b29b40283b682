//! Business logic services for the Raincast server

pub mod forecast;

pub use forecast::ForecastService;
