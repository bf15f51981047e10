use crate::config::Config;
use crate::routes;
use std::sync::Arc;
use tokio::net::TcpListener;

pub async fn create_web_server(
    config: Config,
    listener: TcpListener,
) -> Result<(), std::io::Error> {
    let router = routes::create_router(&config).with_state(Arc::new(config));

    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await
}
