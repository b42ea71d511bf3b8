pub mod config;
pub mod error;
pub mod geo;
pub mod locale;
pub mod types;
pub mod validation;

pub use config::AppConfig;
pub use error::{HyperlocalError, HyperlocalResult};
pub use validation::ValidationError;
