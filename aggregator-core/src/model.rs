use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Closed set of continents the country source understands.
///
/// Doubles as the key of the country cache, so it must stay `Copy + Eq + Hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continent {
    Europe,
    Asia,
    Africa,
    NorthAmerica,
    SouthAmerica,
    Oceania,
}

impl Continent {
    /// Region name in the country source's vocabulary.
    pub fn region_name(&self) -> &'static str {
        match self {
            Continent::Europe => "europe",
            Continent::Asia => "asia",
            Continent::Africa => "africa",
            Continent::NorthAmerica => "north america",
            Continent::SouthAmerica => "south america",
            Continent::Oceania => "oceania",
        }
    }

    pub const fn all() -> &'static [Continent] {
        &[
            Continent::Europe,
            Continent::Asia,
            Continent::Africa,
            Continent::NorthAmerica,
            Continent::SouthAmerica,
            Continent::Oceania,
        ]
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Continent::Europe => "Europe",
            Continent::Asia => "Asia",
            Continent::Africa => "Africa",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Oceania => "Oceania",
        };
        f.write_str(name)
    }
}

impl TryFrom<&str> for Continent {
    type Error = crate::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "europe" => Ok(Continent::Europe),
            "asia" => Ok(Continent::Asia),
            "africa" => Ok(Continent::Africa),
            "north america" | "northamerica" => Ok(Continent::NorthAmerica),
            "south america" | "southamerica" => Ok(Continent::SouthAmerica),
            "oceania" | "australia" => Ok(Continent::Oceania),
            _ => Err(crate::Error::InvalidArgument(format!(
                "Unknown continent '{value}'. Supported: europe, asia, africa, \
                 north america, south america, oceania."
            ))),
        }
    }
}

/// A country as resolved from the country source.
///
/// Identity is full structural equality; coordinates are compared bitwise so
/// the struct can key a `HashMap`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl PartialEq for Country {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

impl Eq for Country {}

impl Hash for Country {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.latitude, self.longitude)
    }
}

/// A single current-weather reading, metric units throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub description: Option<String>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,
    pub pressure_hpa: f64,
}

/// Beaufort-like wind categories, ordered from calm to hurricane force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WindScale {
    Calm,
    LightAir,
    LightBreeze,
    GentleBreeze,
    ModerateBreeze,
    FreshBreeze,
    StrongBreeze,
    NearGale,
    Gale,
    SevereGale,
    StormWholeGale,
    ViolentStorm,
    HurricaneForce,
}

impl WindScale {
    /// Bucket a raw m/s value. Thresholds are inclusive upper bounds; values
    /// at or below zero are `Calm`, anything above 33 m/s is `HurricaneForce`.
    pub fn from_mps(speed: f64) -> Self {
        match speed {
            s if s <= 0.0 => WindScale::Calm,
            s if s <= 2.0 => WindScale::LightAir,
            s if s <= 3.0 => WindScale::LightBreeze,
            s if s <= 5.0 => WindScale::GentleBreeze,
            s if s <= 8.0 => WindScale::ModerateBreeze,
            s if s <= 11.0 => WindScale::FreshBreeze,
            s if s <= 14.0 => WindScale::StrongBreeze,
            s if s <= 17.0 => WindScale::NearGale,
            s if s <= 21.0 => WindScale::Gale,
            s if s <= 24.0 => WindScale::SevereGale,
            s if s <= 28.0 => WindScale::StormWholeGale,
            s if s <= 33.0 => WindScale::ViolentStorm,
            _ => WindScale::HurricaneForce,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindScale::Calm => "Calm",
            WindScale::LightAir => "LightAir",
            WindScale::LightBreeze => "LightBreeze",
            WindScale::GentleBreeze => "GentleBreeze",
            WindScale::ModerateBreeze => "ModerateBreeze",
            WindScale::FreshBreeze => "FreshBreeze",
            WindScale::StrongBreeze => "StrongBreeze",
            WindScale::NearGale => "NearGale",
            WindScale::Gale => "Gale",
            WindScale::SevereGale => "SevereGale",
            WindScale::StormWholeGale => "StormWholeGale",
            WindScale::ViolentStorm => "ViolentStorm",
            WindScale::HurricaneForce => "HurricaneForce",
        }
    }
}

impl fmt::Display for WindScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
