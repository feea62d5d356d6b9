use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::{
    config::{ProviderCredential, Settings},
    error::WeatherError,
    model::LocationQuery,
};

use super::{Endpoint, WeatherProvider};

/// Client for the OpenWeatherMap 2.5 API.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    credential: ProviderCredential,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(credential: ProviderCredential, base_url: impl Into<String>) -> Self {
        Self {
            credential,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.credential.clone(), settings.base_url.clone())
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Shared query: credential, metric units, then the location.
    fn query(&self, location: &LocationQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("appid", self.credential.expose().to_string()),
            ("units", "metric".to_string()),
        ];
        params.extend(location.upstream_params());
        params
    }
}

/// Error body shape: `{"cod": "404", "message": "city not found"}`.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        location: &LocationQuery,
    ) -> Result<Box<RawValue>, WeatherError> {
        tracing::debug!(%endpoint, %location, "requesting OpenWeather");

        let res = self
            .http
            .get(self.url(endpoint))
            .query(&self.query(location))
            .send()
            .await
            .map_err(|e| {
                WeatherError::Transport(format!(
                    "failed to send OpenWeather {endpoint} request: {}",
                    e.without_url()
                ))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::Transport(format!(
                "failed to read OpenWeather {endpoint} response body: {}",
                e.without_url()
            ))
        })?;

        if !status.is_success() {
            tracing::debug!(
                %endpoint,
                %status,
                body = %truncate_body(&body),
                "OpenWeather error reply"
            );

            let message = serde_json::from_str::<OwErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);

            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<&RawValue>(&body)
            .map(|raw| raw.to_owned())
            .map_err(|e| {
                WeatherError::Transport(format!(
                    "failed to parse OpenWeather {endpoint} JSON ({e}): {}",
                    truncate_body(&body)
                ))
            })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
