pub mod collection;
pub mod preference;
pub mod request_history;
pub mod response;
pub mod saved_request;
pub mod settings;

pub use collection::*;
pub use preference::*;
pub use request_history::*;
pub use response::*;
pub use saved_request::*;
pub use settings::*;
