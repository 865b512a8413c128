use std::error::Error;
use std::net::SocketAddr;

use drive_proxy::{config::API_KEY_VAR, routes::routes, DriveProxy, ProxyConfig};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();

    let config = ProxyConfig::from_env()?;
    if config.api_key.is_none() {
        warn!("{} is not set; proxied requests will fail until it is", API_KEY_VAR);
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        %addr,
        upstream = %config.upstream_base,
        timeout_ms = config.request_timeout.as_millis() as u64,
        "starting drive proxy"
    );

    let proxy = DriveProxy::new(config)?;
    let (bound, server) = warp::serve(routes(proxy)).try_bind_with_graceful_shutdown(addr, async {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown signal received");
    })?;

    info!("Drive proxy listening on http://{}", bound);
    server.await;
    Ok(())
}
