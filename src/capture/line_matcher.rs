use regex::Regex;
use thiserror::Error;

/// Record marker tcpdump prints in front of IPv4 traffic.
pub const DEFAULT_MARKER: &str = "IP";

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("Record marker must not be empty")]
    EmptyMarker,

    #[error("Invalid record pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Source and destination tokens pulled out of one traffic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficRecord<'a> {
    pub source: &'a str,
    pub destination: &'a str,
}

#[derive(Debug, Clone)]
pub struct LineMatcher {
    pattern: Regex,
}

impl LineMatcher {
    pub fn new() -> Self {
        Self::with_marker(DEFAULT_MARKER).expect("default record pattern is valid")
    }

    /// Build a matcher for `<marker> SRC > DST[:]` lines. The marker is taken literally.
    pub fn with_marker(marker: &str) -> Result<Self, MatcherError> {
        if marker.is_empty() {
            return Err(MatcherError::EmptyMarker);
        }

        let pattern = Regex::new(&format!(
            r"{}\s+(\S+)\s+>\s+([^\s:]+)",
            regex::escape(marker)
        ))?;

        Ok(Self { pattern })
    }

    /// Parse a single line. Lines that don't look like traffic are skipped, not rejected.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<TrafficRecord<'a>> {
        let caps = self.pattern.captures(line)?;
        let source = caps.get(1)?.as_str();
        let destination = caps.get(2)?.as_str();

        Some(TrafficRecord { source, destination })
    }
}

impl Default for LineMatcher {
    fn default() -> Self {
        Self::new()
    }
}
