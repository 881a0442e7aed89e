pub mod collection;
pub mod history;
pub mod preferences;
pub mod request;
pub mod saved_request;

pub use collection::*;
pub use history::*;
pub use preferences::*;
pub use request::*;
pub use saved_request::*;
