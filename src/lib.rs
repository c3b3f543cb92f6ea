pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod settings;
pub mod state;
pub mod telemetry;
pub mod users;
