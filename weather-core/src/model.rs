use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::WeatherError;

/// Raw query parameters of `GET /api/weather`.
///
/// Everything is kept as text so that a malformed number ends up as a
/// validation error instead of a generic query rejection.
#[derive(Debug, Clone, Default)]
pub struct WeatherParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub city: Option<String>,
}

impl WeatherParams {
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat.to_string()),
            lon: Some(lon.to_string()),
            city: None,
        }
    }

    /// Build from decoded query pairs. The first occurrence of a key wins and
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "lat" => &mut params.lat,
                "lon" => &mut params.lon,
                "city" => &mut params.city,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// A validated location: either a city name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl LocationQuery {
    /// Validate raw parameters. A city wins over coordinates when both are given.
    pub fn from_params(params: &WeatherParams) -> Result<Self, WeatherError> {
        let city = params
            .city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let coords = match (parse_coord(&params.lat), parse_coord(&params.lon)) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        };

        match (city, coords) {
            (Some(city), coords) => {
                if coords.is_some() {
                    tracing::debug!(city, "both city and coordinates supplied, using city");
                }
                Ok(Self::City(city.to_string()))
            }
            (None, Some((lat, lon))) => Ok(Self::Coordinates { lat, lon }),
            (None, None) => Err(WeatherError::MissingLocation),
        }
    }

    /// Location part of the upstream query string.
    pub fn upstream_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::City(city) => vec![("q", city.clone())],
            Self::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City(city) => write!(f, "city={city}"),
            Self::Coordinates { lat, lon } => write!(f, "lat={lat},lon={lon}"),
        }
    }
}

fn parse_coord(raw: &Option<String>) -> Option<f64> {
    raw.as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Merged response: both provider documents, byte for byte as received.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedWeather {
    pub current: Box<RawValue>,
    pub forecast: Box<RawValue>,
}

/// Body of every non-200 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl From<&WeatherError> for ErrorBody {
    fn from(err: &WeatherError) -> Self {
        Self {
            message: err.client_message(),
        }
    }
}
