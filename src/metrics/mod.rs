use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref ACTIVE_SESSIONS: IntGauge =
        IntGauge::new("fishbowl_active_sessions", "Active ongoing game sessions")
            .expect("metric cannot be created");
    pub static ref CONNECTED_CLIENTS: IntGauge =
        IntGauge::new("fishbowl_connected_clients", "Amount of browsers connected")
            .expect("metric cannot be created");
    pub static ref TURNS_PLAYED: IntCounter =
        IntCounter::new("fishbowl_turns_played", "Turns started across all sessions")
            .expect("metric cannot be created");
    pub static ref REGISTRY: Registry = {
        let registry = Registry::new();
        registry
            .register(Box::new(ACTIVE_SESSIONS.clone()))
            .expect("collector cannot be registered");
        registry
            .register(Box::new(CONNECTED_CLIENTS.clone()))
            .expect("collector cannot be registered");
        registry
            .register(Box::new(TURNS_PLAYED.clone()))
            .expect("collector cannot be registered");
        registry
    };
}
