//! GraphQL requests, responses and string escaping.
//!
//! Operations build variable-based [`GraphqlRequest`]s through the
//! [`query`] builders. [`GraphqlRequest::render_literal`] inlines the
//! variables for transports that can only send a bare document.

mod escape;
mod request;
mod response;

pub mod query;

pub use escape::{escape_for_graphql, escape_json_for_graphql};
pub use request::GraphqlRequest;
pub use response::{Classification, GraphqlError, classify, decode_data};

/// Tracing target for GraphQL calls.
pub const TRACING_TARGET: &str = "monday_core::graphql";
