pub mod error;
pub mod export;
pub mod json;

pub use error::StoreError;
pub use json::SessionStore;
