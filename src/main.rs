use std::sync::Arc;

use breakwater::config::Config;
use breakwater::http::request::Method;
use breakwater::http::response::Response;
use breakwater::server::{HttpProtocol, Protocol, Server};
use breakwater::site::Site;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let protocols: Vec<Arc<dyn Protocol>> =
        vec![Arc::new(HttpProtocol::with_port(cfg.server.port))];
    let mut server = Server::new(welcome_site()?, protocols, cfg.server.bind_addr);
    server.start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    server.stop().await;

    Ok(())
}

fn welcome_site() -> anyhow::Result<Site> {
    let site = Site::builder()
        .route(&[Method::GET], "/", "welcome")
        .handler("welcome", |_req| Ok(Response::ok("Hello World!\n")))
        .build()?;
    Ok(site)
}
