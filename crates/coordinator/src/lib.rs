pub mod config;
pub mod engine;
pub mod error;

pub use config::CoordinatorConfig;
pub use engine::{Coordinator, GetOutcome};
pub use error::CoordinatorError;
