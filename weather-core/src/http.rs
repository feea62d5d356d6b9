//! HTTP surface of the proxy.
//!
//! `GET /api/weather?lat=..&lon=..` or `GET /api/weather?city=..` answers with
//! `{"current": .., "forecast": ..}` or `{"message": ..}` on failure.

use std::{convert::Infallible, future::Future, net::SocketAddr, sync::Arc};

use warp::{Filter, Reply, http::StatusCode};

use crate::{
    model::{ErrorBody, WeatherParams},
    provider::WeatherProvider,
    proxy::WeatherProxy,
};

/// All routes, with CORS open to any origin for the browser client.
pub fn routes<P>(
    proxy: Arc<WeatherProxy<P>>,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone
where
    P: WeatherProvider + 'static,
{
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET"])
        .allow_headers(vec!["content-type"]);

    weather_route(proxy)
        .with(cors)
        .with(warp::trace::request())
}

/// `GET /api/weather`
pub fn weather_route<P>(
    proxy: Arc<WeatherProxy<P>>,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone
where
    P: WeatherProvider + 'static,
{
    warp::get()
        .and(warp::path!("api" / "weather"))
        .and(
            warp::query::<Vec<(String, String)>>()
                .map(|pairs: Vec<(String, String)>| WeatherParams::from_pairs(pairs)),
        )
        .and(warp::any().map(move || proxy.clone()))
        .and_then(handle_weather)
}

async fn handle_weather<P>(
    params: WeatherParams,
    proxy: Arc<WeatherProxy<P>>,
) -> Result<warp::reply::Response, Infallible>
where
    P: WeatherProvider,
{
    let reply = match proxy.weather(&params).await {
        Ok(merged) => warp::reply::json(&merged).into_response(),
        Err(err) => {
            let status = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            warp::reply::with_status(warp::reply::json(&ErrorBody::from(&err)), status)
                .into_response()
        }
    };

    Ok(reply)
}

/// Bind `addr` and serve the proxy until `shutdown` resolves.
///
/// Returns the bound address (useful with port 0) and the server future.
pub fn serve<P, S>(
    proxy: Arc<WeatherProxy<P>>,
    addr: SocketAddr,
    shutdown: S,
) -> anyhow::Result<(SocketAddr, impl Future<Output = ()>)>
where
    P: WeatherProvider + 'static,
    S: Future<Output = ()> + Send + 'static,
{
    warp::serve(routes(proxy))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}"))
}
