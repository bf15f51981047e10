use fishbowl::config::Config;
use fishbowl::startup::create_web_server;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    std_logger::Config::logfmt().init();

    let config = Config::get().map_err(|error| {
        log::error!("Unable to load the configuration. Error: '{error}'.");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, error)
    })?;

    let listener = TcpListener::bind(config.address()).await?;
    create_web_server(config, listener).await
}
