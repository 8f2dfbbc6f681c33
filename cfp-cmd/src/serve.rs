//! Run the estimation proxy.

use std::net::SocketAddr;

use cfp_core::gateway::{Gateway, GatewayConfig, API_KEY_ENV};
use log::{info, warn};

pub async fn run_serve(bind: SocketAddr, endpoint: String, model: String) -> anyhow::Result<()> {
    let config = GatewayConfig::from_env(endpoint, model);
    if config.api_key.is_none() {
        warn!(
            "{} is not set; every estimate will fail with a configuration error",
            API_KEY_ENV
        );
    }
    info!("Forwarding to {} with model {}", config.endpoint, config.model);

    cfp_proxy::serve(bind, Gateway::new(config)).await
}
