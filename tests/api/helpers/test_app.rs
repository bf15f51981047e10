use std::net::SocketAddr;

use fishbowl::config::{Config, GameSettings};
use once_cell::sync::Lazy;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::test_client::TestClient;

// Tests run in parallel threads, the environment is set only once
static ENVIRONMENT: Lazy<()> = Lazy::new(|| std::env::set_var("ENVIRONMENT", "dev"));

pub struct TestApp {
    pub base_address: String,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        // Long ticks keep the countdown out of the way of the tests that don't care about it
        TestApp::spawn_app_with_game_settings(GameSettings {
            turn_duration_seconds: 60,
            tick_interval_millis: 60_000,
        })
        .await
    }

    pub async fn spawn_app_with_game_settings(game: GameSettings) -> TestApp {
        // Binding to port 0 triggers an OS scan for an available port, this way we can run tests in parallel where each runs its own application
        let random_port_address = SocketAddr::from(([0, 0, 0, 0], 0));
        let listener = TcpListener::bind(random_port_address)
            .await
            .expect("Failed to bind to bind random port.");
        let address = listener.local_addr().unwrap();
        Lazy::force(&ENVIRONMENT);
        let config = {
            let mut config = Config::get().expect("Failed to read configuration.");
            config.game = game;
            config.websocket.ping_timeout_seconds = 2;
            config
        };

        let server = fishbowl::startup::create_web_server(config, listener);
        let _ = tokio::spawn(server);

        TestApp {
            base_address: format!("localhost:{}", address.port()),
        }
    }

    pub async fn open_session_websocket(
        &self,
    ) -> Result<WebSocketStream<MaybeTlsStream<TcpStream>>, String> {
        tokio_tungstenite::connect_async(format!("ws://{}/session/ws", self.base_address))
            .await
            .map(|websocket_stream| websocket_stream.0)
            .map_err(|error| format!("WebSocket could not be created. Error: '{error}'."))
    }

    pub async fn connect_client(&self) -> TestClient {
        let websocket = self.open_session_websocket().await.unwrap();
        let mut client = TestClient::new(websocket);
        let state = client.receive_game_state().await.unwrap();
        assert_eq!(state.phase, "setup");
        client
    }
}
