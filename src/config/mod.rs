pub mod settings;

pub use settings::{Config, ConfigError, ReportConfig};
