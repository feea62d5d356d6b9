use crate::{error::WeatherError, model::LocationQuery};
use async_trait::async_trait;
use serde_json::value::RawValue;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// The two provider documents the proxy merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    /// Path relative to the provider base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "/weather",
            Endpoint::Forecast => "/forecast",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Current => f.write_str("current"),
            Endpoint::Forecast => f.write_str("forecast"),
        }
    }
}

/// Source of raw provider documents.
///
/// Implementations return the response body exactly as received; the proxy
/// only nests it.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        location: &LocationQuery,
    ) -> Result<Box<RawValue>, WeatherError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_are_distinct() {
        assert_eq!(Endpoint::Current.path(), "/weather");
        assert_eq!(Endpoint::Forecast.path(), "/forecast");
    }

    #[test]
    fn endpoint_display_names() {
        assert_eq!(Endpoint::Current.to_string(), "current");
        assert_eq!(Endpoint::Forecast.to_string(), "forecast");
    }
}
