//! Core of the Golem API tester: local persistence of preferences,
//! collections, saved requests and request history, plus the request
//! execution flow that feeds history.
//!
//! The presentation layer builds an [`AppState`] once at startup and calls
//! the functions in [`commands`].

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod recorder;
pub mod state;

pub use config::AppConfig;
pub use db::Store;
pub use error::{StoreError, StoreResult};
pub use http::{RequestError, RequestExecutor};
pub use recorder::HistoryRecorder;
pub use state::AppState;

/// Install the global logger. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: Option<&str>) {
    let env = env_logger::Env::default().default_filter_or(level.unwrap_or("info"));
    // A second call (e.g. from tests) keeps the first logger
    let _ = env_logger::Builder::from_env(env).try_init();
}
