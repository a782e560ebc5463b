use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::model::{Continent, Country, WeatherData};
use crate::provider::cache::CachingCountryProvider;
use crate::provider::export::ExportingWeatherProvider;
use crate::provider::openweather::OpenWeatherClient;
use crate::provider::restcountries::RestCountriesClient;

pub mod cache;
pub mod export;
pub mod openweather;
pub mod restcountries;

/// Lookup capability for the countries of a continent.
#[async_trait]
pub trait CountryProvider: Send + Sync + Debug {
    async fn countries_by_continent(&self, continent: Continent) -> Result<Vec<Country>>;
}

/// Lookup capability for current weather across a set of countries.
///
/// The contract is all-or-nothing: either every country resolves and the full
/// map is returned, or the call fails and no partial map is observable.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn weather_for_countries(
        &self,
        countries: &[Country],
        api_key: Option<&str>,
    ) -> Result<HashMap<Country, WeatherData>>;
}

/// Assemble the country lookup stack: remote client wrapped in the
/// file-backed cache.
pub fn country_provider_from_config(config: &Config) -> Box<dyn CountryProvider> {
    let client = RestCountriesClient::new();
    Box::new(CachingCountryProvider::new(Box::new(client), config.cache_file()))
}

/// Assemble the weather lookup stack: remote client wrapped in the CSV
/// exporter.
pub fn weather_provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let client = OpenWeatherClient::new();
    Box::new(ExportingWeatherProvider::new(Box::new(client), config.export_file()))
}
