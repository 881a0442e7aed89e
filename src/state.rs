use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Store;
use crate::http::{RequestError, RequestExecutor};
use crate::recorder::HistoryRecorder;

/// Application state built once by the entry point and handed to every
/// command.
#[derive(Debug)]
pub struct AppState {
    /// Local SQLite store for preferences, collections, history and saved requests
    pub store: Arc<Store>,

    /// Outbound HTTP client
    pub executor: RequestExecutor,

    /// Writes executed requests into history in the background
    pub recorder: HistoryRecorder,

    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: Store, config: AppConfig) -> Result<Self, RequestError> {
        let store = Arc::new(store);
        let executor = RequestExecutor::with_options(config.request_timeout(), config.use_system_proxy)?;

        Ok(Self {
            recorder: HistoryRecorder::new(Arc::clone(&store)),
            store,
            executor,
            config,
        })
    }

    /// Open the store under `config.data_dir` and build the state.
    /// Any failure here should abort startup.
    pub fn initialize(config: AppConfig) -> Result<Self, String> {
        let store = Store::open(&config.data_dir)
            .map_err(|e| format!("Failed to initialize database: {}", e))?;

        Self::new(store, config).map_err(|e| format!("Failed to initialize HTTP client: {}", e))
    }
}
