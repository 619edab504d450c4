// Library exports for tcpdump-endpoints
pub mod analysis;
pub mod capture;
pub mod config;
pub mod utils;

pub use analysis::endpoints;
pub use capture::{extract, line_matcher};
pub use config::settings;
pub use utils::formatting;

pub use analysis::{Endpoint, EndpointRegistry};
pub use capture::{extract_endpoints, Extraction, LineMatcher};
pub use config::Config;

// Error types
pub use anyhow::{Error, Result};
