#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for client operations.
pub const TRACING_TARGET: &str = "monday_core::client";

mod client;
mod error;
mod provider;

pub mod column;
pub mod graphql;
pub mod pagination;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use client::MondayClient;
pub use column::{
    ColumnDefinition, ColumnDispatcher, ColumnType, ColumnValues, FileLink, IdList,
    UserColumnInput,
};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use graphql::{
    Classification, GraphqlRequest, classify, escape_for_graphql, escape_json_for_graphql,
};
pub use pagination::PageWalker;
pub use provider::{API_TOKEN_KEY, ApiKey, ConfigSource, MondayTransport};
