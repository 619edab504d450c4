use std::io::{self, BufRead};

use log::{info, trace};

use crate::analysis::endpoints::EndpointRegistry;
use crate::capture::line_matcher::LineMatcher;

/// Result of one pass over a trace.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub registry: EndpointRegistry,
    pub lines_read: u64,
    pub lines_matched: u64,
}

/// Read every line of `input`, registering the source and destination of each
/// traffic record. Unmatched lines are ignored. Bytes that aren't valid UTF-8
/// (payload dumps) are decoded lossily so one bad line can't abort the pass.
pub fn extract_endpoints<R: BufRead>(
    mut input: R,
    matcher: &LineMatcher,
    distinguish_ports: bool,
) -> io::Result<Extraction> {
    let mut registry = EndpointRegistry::new(distinguish_ports);
    let mut lines_read = 0;
    let mut lines_matched = 0;

    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lines_read += 1;

        let line = String::from_utf8_lossy(trim_line_ending(&buf));

        match matcher.match_line(&line) {
            Some(record) => {
                registry.insert(record.source, true);
                registry.insert(record.destination, false);
                lines_matched += 1;
            }
            None => trace!("Skipping line {}: {}", lines_read, line),
        }
    }

    info!(
        "Read {} lines, {} traffic records, {} unique endpoints",
        lines_read,
        lines_matched,
        registry.len()
    );

    Ok(Extraction {
        registry,
        lines_read,
        lines_matched,
    })
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
