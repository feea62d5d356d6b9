use std::{net::IpAddr, net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use weather_core::{Config, OpenWeatherProvider, WeatherProxy, http};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-proxy", version, about = "Weather aggregation proxy")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP proxy (default).
    Serve {
        /// Port to listen on; overrides PORT and the config file.
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind.
        #[arg(long, default_value = "0.0.0.0")]
        bind: IpAddr,
    },

    /// Store the OpenWeatherMap API key in the config file.
    Configure,

    /// Print the config file location.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Serve {
            port: None,
            bind: IpAddr::from([0, 0, 0, 0]),
        }) {
            Command::Serve { port, bind } => serve(port, bind).await,
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn serve(port: Option<u16>, bind: IpAddr) -> anyhow::Result<()> {
    let config = Config::load()?;
    let settings = config.resolve()?;

    let port = port.unwrap_or(settings.port);
    let proxy = Arc::new(WeatherProxy::new(OpenWeatherProvider::from_settings(&settings)));

    let (addr, server) = http::serve(proxy, SocketAddr::new(bind, port), shutdown_signal())?;

    tracing::info!(base_url = %settings.base_url, "Server is running on http://{addr}");
    server.await;
    tracing::info!("Server shutdown complete");

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_validator(inquire::required!("API key cannot be empty"))
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;

    println!("Saved API key to {}", path.display());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
