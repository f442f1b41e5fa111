//! # Spec Module
//!
//! Static description of the handlers a dispatcher serves: which route each
//! handler answers and how each of its parameters is bound.
//!
//! Nothing here is discovered at runtime. Applications describe their
//! handlers with [`Route`] and [`ParameterSpec`] values and hand them to the
//! [`DispatcherBuilder`](crate::dispatcher::DispatcherBuilder), which turns
//! them into an immutable routing table before the first request.
//!
//! ## Path Templates
//!
//! A template is a `/`-segmented path where a segment of the exact form
//! `{name}` captures one non-empty path segment. All other segments match
//! literally and case-sensitively:
//!
//! ```rust
//! use brrtmvc::spec::PathTemplate;
//!
//! let template = PathTemplate::parse("/users/{id}/posts/{post_id}").unwrap();
//! let vars = template.matches("/users/42/posts/abc").unwrap();
//! assert_eq!(vars[0].1, "42");
//! assert_eq!(vars[1].1, "abc");
//! assert!(template.matches("/users/42/posts").is_none());
//! ```

mod template;
mod types;

pub use template::{ParamVec, PathTemplate, Segment, MAX_INLINE_PARAMS};
pub use types::{HandlerKey, ParamAnnotation, ParameterSpec, Route, SUPPORTED_METHODS};
