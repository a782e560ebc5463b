//! Core library for the `weather-aggregator` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The continent/country/weather data model
//! - Country and weather provider stacks (remote clients plus caching and
//!   exporting decorators)
//! - File-backed persistence for the country cache and the CSV export
//!
//! It is used by `aggregator-cli`, but can also be reused by other binaries
//! or services.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod storage;

pub use aggregate::Aggregator;
pub use config::{API_KEY_ENV_VAR, Config};
pub use error::{Error, Result};
pub use model::{Continent, Country, WeatherData, WindScale};
pub use provider::{
    CountryProvider, WeatherProvider, cache::CachingCountryProvider,
    export::ExportingWeatherProvider, openweather::OpenWeatherClient,
    restcountries::RestCountriesClient,
};
pub use storage::ExportRecord;
