use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::model::{Country, WeatherData};
use crate::storage::{self, ExportRecord};

use super::WeatherProvider;

/// Signature of the (country, weather) → export row mapping.
pub type ExportMapper = fn(&Country, &WeatherData) -> ExportRecord;

/// Exporting decorator over a [`WeatherProvider`].
///
/// After a successful fetch the result map is flattened through the mapper
/// and written to a CSV file in one batch. The returned map is exactly what
/// the wrapped provider produced; exporting is a side effect only.
#[derive(Debug)]
pub struct ExportingWeatherProvider {
    inner: Box<dyn WeatherProvider>,
    mapper: ExportMapper,
    export_path: PathBuf,
}

impl ExportingWeatherProvider {
    pub fn new(inner: Box<dyn WeatherProvider>, export_path: PathBuf) -> Self {
        Self::with_mapper(inner, ExportRecord::from_pair, export_path)
    }

    pub fn with_mapper(
        inner: Box<dyn WeatherProvider>,
        mapper: ExportMapper,
        export_path: PathBuf,
    ) -> Self {
        Self { inner, mapper, export_path }
    }
}

#[async_trait]
impl WeatherProvider for ExportingWeatherProvider {
    async fn weather_for_countries(
        &self,
        countries: &[Country],
        api_key: Option<&str>,
    ) -> Result<HashMap<Country, WeatherData>> {
        let resolved = self.inner.weather_for_countries(countries, api_key).await?;

        let mut records: Vec<ExportRecord> =
            resolved.iter().map(|(country, weather)| (self.mapper)(country, weather)).collect();
        // Map iteration order is arbitrary; sort so equal data yields
        // byte-identical files across runs.
        records.sort_by(|a, b| a.country_name.cmp(&b.country_name));

        // A failed export outranks the successful fetch: the caller must not
        // see the map if the rows never reached the file.
        storage::write_export(&self.export_path, &records)?;
        info!(rows = records.len(), path = %self.export_path.display(), "exported weather rows");

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::WindScale;

    #[derive(Debug)]
    struct StubWeather {
        fail: bool,
    }

    fn country(name: &str) -> Country {
        Country { name: name.into(), latitude: 10.0, longitude: 20.0 }
    }

    fn weather(wind_speed_mps: f64) -> WeatherData {
        WeatherData {
            description: Some("overcast clouds".into()),
            temperature_c: 12.0,
            feels_like_c: 11.0,
            humidity_pct: 81.0,
            wind_speed_mps,
            pressure_hpa: 1013.0,
        }
    }

    #[async_trait]
    impl WeatherProvider for StubWeather {
        async fn weather_for_countries(
            &self,
            countries: &[Country],
            _api_key: Option<&str>,
        ) -> Result<HashMap<Country, WeatherData>> {
            if self.fail {
                return Err(Error::InvalidArgument("stubbed failure".into()));
            }

            Ok(countries
                .iter()
                .enumerate()
                .map(|(i, c)| (c.clone(), weather(i as f64)))
                .collect())
        }
    }

    #[tokio::test]
    async fn returns_exactly_what_the_delegate_produced() {
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("export.csv");
        let countries = vec![country("Kenya"), country("Ghana")];

        let bare = StubWeather { fail: false };
        let expected = bare.weather_for_countries(&countries, Some("key")).await.unwrap();

        let exporting =
            ExportingWeatherProvider::new(Box::new(StubWeather { fail: false }), export_path);
        let actual = exporting.weather_for_countries(&countries, Some("key")).await.unwrap();

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn writes_rows_sorted_by_country_name() {
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("export.csv");
        let countries = vec![country("Togo"), country("Benin"), country("Mali")];

        let exporting = ExportingWeatherProvider::new(
            Box::new(StubWeather { fail: false }),
            export_path.clone(),
        );
        exporting.weather_for_countries(&countries, Some("key")).await.unwrap();

        let rows = storage::read_export(&export_path).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.country_name.as_str()).collect();
        assert_eq!(names, ["Benin", "Mali", "Togo"]);
    }

    #[tokio::test]
    async fn export_write_failure_propagates_despite_successful_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("no-such-dir").join("export.csv");

        let exporting =
            ExportingWeatherProvider::new(Box::new(StubWeather { fail: false }), export_path);
        let err = exporting
            .weather_for_countries(&[country("Chad")], Some("key"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Persistence { .. }));
    }

    #[tokio::test]
    async fn delegate_failure_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("export.csv");

        let exporting = ExportingWeatherProvider::new(
            Box::new(StubWeather { fail: true }),
            export_path.clone(),
        );
        let err = exporting
            .weather_for_countries(&[country("Chad")], Some("key"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(!export_path.exists());
    }

    #[tokio::test]
    async fn custom_mapper_replaces_the_default_projection() {
        fn shouting(country: &Country, weather: &WeatherData) -> ExportRecord {
            let mut record = ExportRecord::from_pair(country, weather);
            record.country_name = record.country_name.to_uppercase();
            record
        }

        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("export.csv");

        let exporting = ExportingWeatherProvider::with_mapper(
            Box::new(StubWeather { fail: false }),
            shouting,
            export_path.clone(),
        );
        exporting.weather_for_countries(&[country("Niger")], Some("key")).await.unwrap();

        let rows = storage::read_export(&export_path).unwrap();
        assert_eq!(rows[0].country_name, "NIGER");
        assert_eq!(rows[0].wind_speed, WindScale::Calm);
    }
}
