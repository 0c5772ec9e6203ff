//! troophq library
//!
//! This library exposes the router, services and app state so integration
//! tests can drive the API end to end without spawning the binary.

pub mod api;
pub mod app_state;
pub mod http;
pub mod init_telemetry;
pub mod services;
pub mod settings;
pub mod stop_flag;

pub use app_state::AppState;
