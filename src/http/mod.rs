pub mod error;
pub mod executor;

pub use error::RequestError;
pub use executor::{RequestExecutor, DEFAULT_TIMEOUT};
