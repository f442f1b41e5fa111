//! # Handler Module
//!
//! Application logic and its invocation.
//!
//! ## Handler Kinds
//!
//! - [`Handler`] - receives bound [`Arguments`](crate::resolver::Arguments)
//!   for its declared parameters. Any `Fn(&mut Arguments) -> anyhow::Result<R>`
//!   closure is a handler when `R` converts into [`HandlerOutput`].
//! - [`Controller`] - legacy handler mapped by exact path; receives the raw
//!   request and response and returns a view name.
//!
//! ## Result Normalization
//!
//! Whatever a handler returns is normalized into a
//! [`ModelAndView`](crate::view::ModelAndView): a bare string is a view name
//! with an empty model, a `ModelAndView` passes through untouched.
//!
//! ## Invocation
//!
//! [`HandlerExecution::execute`] resolves every declared parameter in
//! declaration order, invokes the handler, and normalizes the result. It
//! does not catch anything: binding failures and handler failures reach the
//! dispatcher as they are.

mod core;
mod execution;
#[cfg(test)]
mod tests;

pub use self::core::{Controller, Handler, HandlerOutput};
pub use execution::{HandlerDescriptor, HandlerExecution};
