pub mod schema;
pub mod sqlite;
pub mod store;
pub mod transfer;

pub use store::Store;
