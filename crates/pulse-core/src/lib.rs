pub mod bankroll;
pub mod demo;
pub mod error;
pub mod session;
pub mod stats;

pub use bankroll::{Bankroll, SessionPatch};
pub use error::ModelError;
pub use session::Session;
