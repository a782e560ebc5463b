use std::collections::HashMap;

use async_trait::async_trait;
use futures::future;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::model::{Country, WeatherData};

use super::WeatherProvider;

const SERVICE: &str = "OpenWeather";
const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Current-weather lookup against an OpenWeather-shaped endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint, e.g. a mock server.
    pub fn with_base_url(base_url: String) -> Self {
        Self { http: Client::new(), base_url }
    }

    async fn fetch_one(&self, country: &Country, api_key: &str) -> Result<WeatherData> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", country.latitude.to_string().as_str()),
                ("lon", country.longitude.to_string().as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|source| Error::Transport { service: SERVICE, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| Error::Transport { service: SERVICE, source })?;

        if !status.is_success() {
            error!(country = %country, %status, "weather lookup rejected");
            return Err(Error::UnexpectedStatus { service: SERVICE, status });
        }

        let parsed: OwResponse =
            serde_json::from_str(&body).map_err(|err| Error::parse(SERVICE, err.to_string()))?;

        // The description comes from the first listed condition; a response
        // with no conditions is malformed.
        let description = parsed
            .weather
            .first()
            .map(|condition| condition.description.clone())
            .ok_or_else(|| {
                Error::parse(SERVICE, format!("no weather conditions reported for {country}"))
            })?;

        Ok(WeatherData {
            description: Some(description),
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
        })
    }
}

impl Default for OpenWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn weather_for_countries(
        &self,
        countries: &[Country],
        api_key: Option<&str>,
    ) -> Result<HashMap<Country, WeatherData>> {
        let api_key = match api_key {
            Some(key) if !key.is_empty() => key,
            _ => {
                return Err(Error::InvalidArgument(
                    "A weather API key is required but none was provided.".to_string(),
                ));
            }
        };

        debug!(count = countries.len(), "fetching weather for countries");

        let fetches = countries.iter().map(|country| async move {
            let weather = self.fetch_one(country, api_key).await?;
            Ok::<_, Error>((country.clone(), weather))
        });

        // Every fetch runs to completion before any outcome is inspected:
        // one failure fails the whole call, but siblings are never cancelled.
        let outcomes = future::join_all(fetches).await;

        let mut resolved = HashMap::with_capacity(countries.len());
        for outcome in outcomes {
            let (country, weather) = outcome?;
            // Duplicate input countries collapse here, later entries winning.
            resolved.insert(country, weather);
        }

        Ok(resolved)
    }
}

#[derive(Debug, Deserialize)]
struct OwResponse {
    weather: Vec<OwCondition>,
    main: OwMain,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_into_weather_fields() {
        let body = r#"{
            "weather": [{"description": "clear sky", "icon": "01d"}],
            "main": {"temp": 18.2, "feels_like": 17.5, "pressure": 1021, "humidity": 56},
            "wind": {"speed": 4.1}
        }"#;

        let parsed: OwResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.weather[0].description, "clear sky");
        assert_eq!(parsed.main.temp, 18.2);
        assert_eq!(parsed.main.pressure, 1021.0);
        assert_eq!(parsed.wind.speed, 4.1);
    }

    #[test]
    fn missing_main_block_fails_to_parse() {
        let body = r#"{"weather": [], "wind": {"speed": 1.0}}"#;
        assert!(serde_json::from_str::<OwResponse>(body).is_err());
    }
}
