use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use crate::error::{Error, Result};
use crate::model::{Continent, Country};

use super::CountryProvider;

const SERVICE: &str = "RestCountries";
const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1/region";

/// Country lookup against a RestCountries-shaped endpoint.
///
/// One round trip per call; no caching and no retries here.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    http: Client,
    base_url: String,
}

impl RestCountriesClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint, e.g. a mock server.
    pub fn with_base_url(base_url: String) -> Self {
        Self { http: Client::new(), base_url }
    }
}

impl Default for RestCountriesClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CountryProvider for RestCountriesClient {
    async fn countries_by_continent(&self, continent: Continent) -> Result<Vec<Country>> {
        let url = format!("{}/{}", self.base_url, continent.region_name());

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| Error::Transport { service: SERVICE, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| Error::Transport { service: SERVICE, source })?;

        if !status.is_success() {
            error!(%continent, %status, url, "country lookup rejected");
            return Err(Error::UnexpectedStatus { service: SERVICE, status });
        }

        let records: Vec<CountryRecord> =
            serde_json::from_str(&body).map_err(|err| Error::parse(SERVICE, err.to_string()))?;

        if records.is_empty() {
            return Err(Error::parse(
                SERVICE,
                format!("response for {continent} contained no countries"),
            ));
        }

        records.into_iter().map(Country::try_from).collect()
    }
}

#[derive(Debug, Deserialize)]
struct CountryRecord {
    name: CountryName,
    latlng: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    common: String,
}

impl TryFrom<CountryRecord> for Country {
    type Error = Error;

    fn try_from(record: CountryRecord) -> Result<Self> {
        // latlng is specified as a [latitude, longitude] pair.
        let &[latitude, longitude] = record.latlng.as_slice() else {
            return Err(Error::parse(
                SERVICE,
                format!(
                    "country '{}' carried {} coordinates instead of 2",
                    record.name.common,
                    record.latlng.len()
                ),
            ));
        };

        Ok(Country { name: record.name.common, latitude, longitude })
    }
}
