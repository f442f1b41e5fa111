//! # Dispatcher Module
//!
//! The dispatcher drives one request through the MVC pipeline: find the
//! handler, bind its arguments, run it, resolve the view it names, and let
//! that view act on the response.
//!
//! ## Overview
//!
//! A [`Dispatcher`] is built once at startup by a [`DispatcherBuilder`] and is
//! immutable afterwards. It is `Send + Sync`, so one instance can serve
//! requests from any number of threads; per-request state lives only on the
//! stack of [`Dispatcher::dispatch`].
//!
//! ## Request Flow
//!
//! Each request moves through the phases of [`DispatchPhase`] in order:
//!
//! 1. **Routing** - the handler mappings find a [`HandlerExecution`](crate::handler::HandlerExecution)
//! 2. **Executing** - arguments are bound and the handler runs
//! 3. **ViewResolving** - a logical view name becomes a concrete view
//!    (skipped when the handler returned a view directly)
//! 4. **Rendering** - the view redirects, forwards to a template, or writes JSON
//!
//! ## Error Handling
//!
//! Any phase may fail with a [`DispatchError`](crate::error::DispatchError).
//! The failure is logged with full detail and then collapsed to a bare
//! status on the response: 404 when no route matched, 500 for everything
//! else. The response is committed exactly once either way.
//!
//! Handler panics are caught and treated as handler failures.
//!
//! ## Example
//!
//! ```rust
//! use brrtmvc::coerce::DeclaredType;
//! use brrtmvc::dispatcher::Dispatcher;
//! use brrtmvc::server::{HttpRequest, HttpResponse, ResponseAction};
//! use brrtmvc::spec::{ParameterSpec, Route};
//! use brrtmvc::view::{MiniJinjaRenderer, ModelAndView};
//! use http::Method;
//! use std::sync::Arc;
//!
//! let dispatcher = Dispatcher::builder()
//!     .renderer(Arc::new(MiniJinjaRenderer::from_sources([(
//!         "greeting.html",
//!         "Hello, {{ name }}!",
//!     )])))
//!     .route(
//!         "greet",
//!         Route::get("/greet/{name}"),
//!         vec![ParameterSpec::path_variable("name", DeclaredType::String)],
//!         |args| {
//!             let name: String = args.get("name")?;
//!             Ok(ModelAndView::new("greeting").add("name", name))
//!         },
//!     )
//!     .build()
//!     .unwrap();
//!
//! let request = HttpRequest::new(Method::GET, "/greet/world");
//! let mut response = HttpResponse::new();
//! dispatcher.dispatch(&request, &mut response).unwrap();
//!
//! match response.action() {
//!     Some(ResponseAction::Forward { location, body, .. }) => {
//!         assert_eq!(location, "greeting.html");
//!         assert_eq!(body, "Hello, world!");
//!     }
//!     other => panic!("unexpected action: {other:?}"),
//! }
//! ```

mod builder;
mod core;
#[cfg(test)]
mod tests;

pub use self::core::{DispatchPhase, Dispatcher};
pub use builder::DispatcherBuilder;
