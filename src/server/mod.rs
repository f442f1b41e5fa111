//! # Server Module
//!
//! The request and response abstractions the dispatch pipeline consumes.
//!
//! The hosting HTTP server is responsible for building an [`HttpRequest`]
//! from the wire request and for turning the committed [`ResponseAction`]
//! back into bytes. Neither type performs I/O.

pub mod request;
pub mod response;

pub use request::{parse_query_params, HttpRequest};
pub use response::{status_reason, HttpResponse, ResponseAction};
