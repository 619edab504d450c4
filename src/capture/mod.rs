pub mod extract;
pub mod line_matcher;

pub use extract::{extract_endpoints, Extraction};
pub use line_matcher::{LineMatcher, MatcherError, TrafficRecord, DEFAULT_MARKER};
