//! # Router Module
//!
//! Maps `(method, path)` to the handler that serves it.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Holding the immutable routing table built at startup
//! - Matching incoming requests against path templates
//! - Extracting path variables from the matched template
//! - Consulting several mapping sources in a fixed order
//!
//! ## Route Table
//!
//! [`RouteTable`] keeps its entries in registration order. Lookup scans them
//! in that order and returns the first entry whose method equals the request
//! method and whose template matches the path.
//!
//! Two consequences are deliberate and documented:
//!
//! - **Last registration wins** for an identical `(method, template)` pair.
//!   The earlier handler becomes unreachable; the entry keeps its original
//!   position in the scan.
//! - **Overlapping templates have undefined precedence.** When
//!   `/users/{id}` and `/users/{name}` (or `/users/me`) could both match,
//!   whichever was registered first is found first. There is no
//!   "most specific wins" rule.
//!
//! ## Mapping Sources
//!
//! [`HandlerMappings`] tries each [`HandlerMapping`] in order and stops at
//! the first hit: declared routes first, then legacy controllers mapped by
//! exact path. If none matches, lookup fails with
//! [`DispatchError::RouteNotFound`](crate::error::DispatchError::RouteNotFound).
//!
//! ## Example
//!
//! ```rust
//! use brrtmvc::coerce::DeclaredType;
//! use brrtmvc::handler::HandlerDescriptor;
//! use brrtmvc::router::RouteTable;
//! use brrtmvc::spec::{ParameterSpec, Route};
//! use http::Method;
//!
//! let mut table = RouteTable::new();
//! table
//!     .register(HandlerDescriptor::from_fn(
//!         "get_user",
//!         Route::get("/users/{id}"),
//!         vec![ParameterSpec::path_variable("id", DeclaredType::Long)],
//!         |_args| Ok("user"),
//!     ))
//!     .unwrap();
//!
//! let m = table.lookup(&Method::GET, "/users/42").unwrap();
//! assert_eq!(m.descriptor.name, "get_user");
//! assert_eq!(m.get_path_variable("id"), Some("42"));
//! assert!(table.lookup(&Method::POST, "/users/42").is_err());
//! ```

mod core;
mod mapping;
#[cfg(test)]
mod performance_tests;

pub use self::core::{RouteMatch, RouteTable};
pub use crate::spec::{ParamVec, MAX_INLINE_PARAMS};
pub use mapping::{HandlerMapping, HandlerMappings, LegacyMapping};
