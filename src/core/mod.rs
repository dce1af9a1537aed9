pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ViewConfig};
pub use error::{Result, VolterriaError};
