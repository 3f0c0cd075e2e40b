//! HTTP transport to the backend.

mod http;

pub use http::{HttpTransport, TransportError, NO_QUERY};
