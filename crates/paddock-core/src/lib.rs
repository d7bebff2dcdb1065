pub mod config;
pub mod error;
pub mod types;

pub use config::PaddockConfig;
pub use error::{PaddockError, Result};
pub use types::*;
