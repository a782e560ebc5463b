use std::collections::HashMap;

use tracing::info;

use crate::error::Result;
use crate::model::{Continent, Country, WeatherData};
use crate::provider::{CountryProvider, WeatherProvider};

/// Orchestrates one aggregation run: continent → countries → weather.
///
/// Thin glue over the two provider stacks; any resolver error aborts the run
/// unchanged.
#[derive(Debug)]
pub struct Aggregator {
    countries: Box<dyn CountryProvider>,
    weather: Box<dyn WeatherProvider>,
}

impl Aggregator {
    pub fn new(countries: Box<dyn CountryProvider>, weather: Box<dyn WeatherProvider>) -> Self {
        Self { countries, weather }
    }

    pub async fn run(
        &self,
        continent: Continent,
        api_key: Option<&str>,
    ) -> Result<HashMap<Country, WeatherData>> {
        let countries = self.countries.countries_by_continent(continent).await?;
        info!(%continent, count = countries.len(), "resolved countries");

        let resolved = self.weather.weather_for_countries(&countries, api_key).await?;
        info!(count = resolved.len(), "resolved weather for countries");

        Ok(resolved)
    }
}
