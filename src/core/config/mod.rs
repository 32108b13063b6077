pub mod paths;
pub mod service;
pub mod validation;

pub use paths::AppPaths;
pub use service::{AppConfig, ConfigService, FaqConfig, LlmConfig, ServerConfig};
pub use validation::validate_config;
