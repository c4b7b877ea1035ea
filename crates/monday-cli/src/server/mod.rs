//! HTTP server startup with lifecycle management.

mod error;
mod http_server;
mod lifecycle;
mod shutdown;

pub use error::{Result, ServerError};
pub use http_server::serve_http;
use shutdown::shutdown_signal;
