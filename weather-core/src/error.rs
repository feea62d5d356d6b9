use thiserror::Error;

/// Message returned when the query names neither a city nor a coordinate pair.
pub const MISSING_LOCATION_MESSAGE: &str =
    "Please provide either latitude and longitude or a city name.";

/// Message returned when the provider failed without telling us why.
pub const FALLBACK_MESSAGE: &str = "Error fetching data from the weather provider.";

/// Errors that can end a single weather request.
///
/// Every variant maps to a client-visible status and message; none of them
/// are fatal to the process.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{}", MISSING_LOCATION_MESSAGE)]
    MissingLocation,

    /// The provider answered with a non-success status.
    #[error(
        "provider replied with status {status}: {}",
        .message.as_deref().unwrap_or("<no message>")
    )]
    Upstream { status: u16, message: Option<String> },

    /// No usable response: connection failure, timeout or a garbled body.
    #[error("transport error: {0}")]
    Transport(String),
}

impl WeatherError {
    /// HTTP status to surface to the client.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingLocation => 400,
            Self::Upstream { status, .. } if (100..=599).contains(status) => *status,
            Self::Upstream { .. } | Self::Transport(_) => 500,
        }
    }

    /// Message to put in the client-facing error body.
    pub fn client_message(&self) -> String {
        match self {
            Self::MissingLocation => MISSING_LOCATION_MESSAGE.to_string(),
            Self::Upstream {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Upstream { .. } | Self::Transport(_) => FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
