mod error;
pub use error::AppError;

mod env;
pub use env::{AppEnv, Backend, CRITERION_MIN_SAMPLES, ConfigError, DEFAULT_DIMENSIONS, ReportFormat};
