//! Core library for the `weather-proxy` server.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - Location validation and the merged response model
//! - The upstream provider abstraction and its OpenWeather client
//! - The aggregation proxy and its HTTP routes
//!
//! It is used by the `weather-proxy` binary, and everything up to the HTTP
//! routes can be exercised in-process with a stub provider.

pub mod config;
pub mod error;
pub mod fanout;
pub mod http;
pub mod model;
pub mod provider;
pub mod proxy;

pub use config::{Config, ProviderCredential, Settings};
pub use error::WeatherError;
pub use model::{AggregatedWeather, ErrorBody, LocationQuery, WeatherParams};
pub use provider::{Endpoint, OpenWeatherProvider, WeatherProvider};
pub use proxy::WeatherProxy;
