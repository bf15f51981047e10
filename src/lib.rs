pub mod config;
pub mod connection;
pub mod error;
pub mod game;
pub mod metrics;
pub mod routes;
pub mod startup;
pub mod websocket;
