use crate::{
    error::WeatherError,
    fanout::join_all_or_nothing,
    model::{AggregatedWeather, LocationQuery, WeatherParams},
    provider::{Endpoint, WeatherProvider},
};

/// Validates a location, fetches both provider documents and merges them.
///
/// Holds no per-request state, so one instance serves every request.
#[derive(Debug, Clone)]
pub struct WeatherProxy<P> {
    provider: P,
}

impl<P: WeatherProvider> WeatherProxy<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    #[cfg(test)]
    pub(crate) fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn weather(
        &self,
        params: &WeatherParams,
    ) -> Result<AggregatedWeather, WeatherError> {
        let location = LocationQuery::from_params(params)?;
        self.weather_for(&location).await
    }

    /// Fetch current conditions and forecast for an already validated location.
    pub async fn weather_for(
        &self,
        location: &LocationQuery,
    ) -> Result<AggregatedWeather, WeatherError> {
        let result = join_all_or_nothing(
            self.provider.fetch(Endpoint::Current, location),
            self.provider.fetch(Endpoint::Forecast, location),
        )
        .await;

        match result {
            Ok((current, forecast)) => {
                tracing::info!(%location, "weather aggregated");
                Ok(AggregatedWeather { current, forecast })
            }
            Err(err) => {
                if err.is_client_error() {
                    tracing::warn!(%location, error = %err, "error fetching weather data");
                } else {
                    tracing::error!(%location, error = %err, "error fetching weather data");
                }
                Err(err)
            }
        }
    }
}
