use std::collections::BTreeMap;
use std::io::{self, Write};

use log::debug;

use crate::utils::formatting::{format_column, LINE_ENDING};

const HEADER: [&str; 4] = ["host", "port", "appeared as source", "appeared as destination"];

const HOST_COL: usize = 0;
const PORT_COL: usize = 1;

/// Split a raw `host.port` token on its last dot.
///
/// A token without any dot is treated as a bare host with an empty port.
pub fn split_token(raw: &str) -> (&str, &str) {
    raw.rsplit_once('.').unwrap_or((raw, ""))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: String,
    pub seen_as_source: bool,
    pub seen_as_destination: bool,
}

impl Endpoint {
    pub fn from_token(raw: &str, was_source: bool) -> Self {
        let (host, port) = split_token(raw);
        Self {
            host: host.to_string(),
            port: port.to_string(),
            seen_as_source: was_source,
            seen_as_destination: !was_source,
        }
    }

    fn mark(&mut self, was_source: bool) {
        if was_source {
            self.seen_as_source = true;
        } else {
            self.seen_as_destination = true;
        }
    }

    fn columns(&self) -> [String; 4] {
        [
            self.host.clone(),
            self.port.clone(),
            self.seen_as_source.to_string(),
            self.seen_as_destination.to_string(),
        ]
    }
}

/// Deduplicated set of endpoints seen in a trace, keyed by host or by host+port.
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    distinguish_ports: bool,
    endpoints: BTreeMap<String, Endpoint>,
    col_widths: [usize; 4],
}

impl EndpointRegistry {
    pub fn new(distinguish_ports: bool) -> Self {
        Self {
            distinguish_ports,
            endpoints: BTreeMap::new(),
            col_widths: HEADER.map(|label| label.chars().count()),
        }
    }

    pub fn distinguishes_ports(&self) -> bool {
        self.distinguish_ports
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Endpoints in ascending key order
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }

    pub fn lookup(&self, raw: &str) -> Option<&Endpoint> {
        self.endpoints.get(self.identity_key(raw))
    }

    /// Record one observation of `raw`, merging flags into an existing entry
    /// or creating a new one.
    pub fn insert(&mut self, raw: &str, was_source: bool) {
        let key = self.identity_key(raw);

        if let Some(endpoint) = self.endpoints.get_mut(key) {
            endpoint.mark(was_source);
            return;
        }

        let endpoint = Endpoint::from_token(raw, was_source);
        debug!(
            "New endpoint {} (host={}, port={}, source={})",
            key, endpoint.host, endpoint.port, was_source
        );
        self.update_col_widths(&endpoint);
        self.endpoints.insert(key.to_string(), endpoint);
    }

    fn identity_key<'a>(&self, raw: &'a str) -> &'a str {
        if self.distinguish_ports {
            raw
        } else {
            split_token(raw).0
        }
    }

    fn update_col_widths(&mut self, endpoint: &Endpoint) {
        let host_width = endpoint.host.chars().count();
        if host_width > self.col_widths[HOST_COL] {
            self.col_widths[HOST_COL] = host_width;
        }

        let port_width = endpoint.port.chars().count();
        if port_width > self.col_widths[PORT_COL] {
            self.col_widths[PORT_COL] = port_width;
        }
    }

    fn write_row<W: Write, S: AsRef<str>>(&self, out: &mut W, cells: &[S]) -> io::Result<()> {
        for (col, cell) in cells.iter().enumerate() {
            if col == PORT_COL && !self.distinguish_ports {
                continue;
            }
            out.write_all(format_column(cell.as_ref(), self.col_widths[col]).as_bytes())?;
        }
        out.write_all(LINE_ENDING.as_bytes())
    }

    /// Write the aligned report: header, one row per endpoint, then the total.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_row(out, &HEADER[..])?;
        for endpoint in self.endpoints.values() {
            self.write_row(out, &endpoint.columns()[..])?;
        }
        write!(out, "total unique endpoints: {}{}", self.endpoints.len(), LINE_ENDING)
    }
}
