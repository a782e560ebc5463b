use std::collections::HashMap;

use aggregator_core::{Country, WeatherData};

const COUNTRY_CELL: usize = 30;
const VALUE_CELL: usize = 20;
const SEPARATOR: char = '|';

const VALUE_HEADERS: [&str; 6] =
    ["Description", "Temperature", "Feels Like", "Humidity", "Wind Speed", "Pressure"];

/// Render the result map as a fixed-width table, rows sorted by country name.
pub fn render(resolved: &HashMap<Country, WeatherData>) -> String {
    let mut rows: Vec<(&Country, &WeatherData)> = resolved.iter().collect();
    rows.sort_by(|a, b| a.0.name.cmp(&b.0.name));

    let mut out = String::new();

    out.push_str(&format!("{:<COUNTRY_CELL$}", "Country Name"));
    for header in VALUE_HEADERS {
        out.push_str(&format!("{SEPARATOR}{header:<VALUE_CELL$}"));
    }
    out.push('\n');

    let total_width = COUNTRY_CELL + (VALUE_CELL + 1) * VALUE_HEADERS.len();
    out.push_str(&"-".repeat(total_width));
    out.push('\n');

    for (country, weather) in rows {
        append_row(&mut out, country, weather);
    }

    out
}

fn append_row(out: &mut String, country: &Country, weather: &WeatherData) {
    // Truncate by characters, not bytes, so accented names cannot split.
    let name: String = country.name.chars().take(COUNTRY_CELL).collect();
    out.push_str(&format!("{name:<COUNTRY_CELL$}"));

    let description = weather.description.as_deref().unwrap_or("-");
    out.push_str(&format!("{SEPARATOR}{description:<VALUE_CELL$}"));

    for value in [
        format!("{:.1} C", weather.temperature_c),
        format!("{:.1} C", weather.feels_like_c),
        format!("{:.0} %", weather.humidity_pct),
        format!("{:.1} m/s", weather.wind_speed_mps),
        format!("{:.0} hPa", weather.pressure_hpa),
    ] {
        out.push_str(&format!("{SEPARATOR}{value:<VALUE_CELL$}"));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, temp: f64) -> (Country, WeatherData) {
        (
            Country { name: name.into(), latitude: 0.0, longitude: 0.0 },
            WeatherData {
                description: Some("scattered clouds".into()),
                temperature_c: temp,
                feels_like_c: temp,
                humidity_pct: 60.0,
                wind_speed_mps: 5.0,
                pressure_hpa: 1013.0,
            },
        )
    }

    #[test]
    fn rows_are_sorted_by_country_name() {
        let resolved: HashMap<_, _> =
            [entry("Zimbabwe", 28.0), entry("Algeria", 31.0)].into_iter().collect();

        let rendered = render(&resolved);
        let algeria = rendered.find("Algeria").unwrap();
        let zimbabwe = rendered.find("Zimbabwe").unwrap();

        assert!(algeria < zimbabwe);
    }

    #[test]
    fn header_and_rule_precede_the_rows() {
        let resolved: HashMap<_, _> = [entry("Kenya", 24.0)].into_iter().collect();

        let rendered = render(&resolved);
        let mut lines = rendered.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("Country Name"));
        assert!(header.contains("|Description"));

        let rule = lines.next().unwrap();
        assert!(rule.chars().all(|c| c == '-'));

        let row = lines.next().unwrap();
        assert!(row.starts_with("Kenya"));
        assert!(row.contains("24.0 C"));
    }

    #[test]
    fn long_country_names_are_truncated_to_the_cell() {
        let resolved: HashMap<_, _> =
            [entry("United Kingdom of Great Britain and Northern Ireland", 12.0)]
                .into_iter()
                .collect();

        let rendered = render(&resolved);
        let row = rendered.lines().nth(2).unwrap();
        assert!(row.starts_with("United Kingdom of Great Britai|"));
    }

    #[test]
    fn missing_description_renders_a_placeholder() {
        let (country, mut weather) = entry("Chad", 35.0);
        weather.description = None;
        let resolved: HashMap<_, _> = [(country, weather)].into_iter().collect();

        let rendered = render(&resolved);
        assert!(rendered.lines().nth(2).unwrap().contains("|-"));
    }
}
