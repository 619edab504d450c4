pub mod endpoints;

pub use endpoints::{split_token, Endpoint, EndpointRegistry};
