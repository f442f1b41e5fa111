//! # Resolver Module
//!
//! Binds request data onto declared handler parameters.
//!
//! ## Overview
//!
//! Every handler parameter is described by a
//! [`ParameterSpec`](crate::spec::ParameterSpec). For each one, the
//! [`ArgumentResolvers`] chain asks its resolvers in order whether they
//! support the parameter; the first that does produces the bound
//! [`Argument`]. When none does, binding fails with
//! [`DispatchError::UnsupportedParameterType`](crate::error::DispatchError::UnsupportedParameterType).
//!
//! ## Resolvers
//!
//! | Resolver        | Claims                                         | Source |
//! |-----------------|------------------------------------------------|--------|
//! | `PathVariable`  | `ParamAnnotation::PathVariable`                | captured `{name}` segment |
//! | `RequestParam`  | `ParamAnnotation::RequestParam`, unannotated scalars | query/form parameter |
//! | `RequestHeader` | `ParamAnnotation::RequestHeader`               | request header |
//! | `RawContext`    | unannotated `Request` / `Response` types       | the context itself |
//!
//! Scalar values go through [`coerce`](crate::coerce::coerce), so a declared
//! `int` receives an `i32` or the request fails; it never receives a default
//! of zero.
//!
//! Handlers read their bound values from [`Arguments`] by declared name or
//! by position.

mod arguments;
mod core;

pub use arguments::{Argument, Arguments, FromArgument};
pub use self::core::{ArgumentResolver, ArgumentResolvers, RequestContext};
