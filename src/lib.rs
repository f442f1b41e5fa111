//! # brrtmvc
//!
//! **brrtmvc** is a small MVC request-dispatch engine. Given an inbound
//! request it finds the handler registered for the method and path, binds
//! the handler's declared parameters from the request with type coercion,
//! runs it, turns the returned logical view name into a concrete view, and
//! lets that view act on the response: redirect, render a template, or
//! write JSON.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`spec`]** - Handler metadata: routes, path templates, parameter declarations
//! - **[`router`]** - Route table lookup and the ordered handler mappings
//! - **[`coerce`]** - String-to-scalar conversion for declared parameter types
//! - **[`resolver`]** - The argument resolver chain and the [`Arguments`](resolver::Arguments) handlers receive
//! - **[`handler`]** - Handler traits and bound handler execution
//! - **[`view`]** - Models, views, view resolvers, and the template renderer
//! - **[`server`]** - Request and response abstractions
//! - **[`dispatcher`]** - The per-request state machine and its builder
//! - **[`runtime_config`]** - View prefix/suffix and template settings
//! - **[`cli`]** - Command-line front end over a demo application
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Dispatcher
//!     participant Mappings as HandlerMappings
//!     participant Resolvers as ArgumentResolvers
//!     participant Handler
//!     participant Views as ViewResolvers
//!     participant View
//!
//!     Caller->>Dispatcher: dispatch(request, response)
//!     Dispatcher->>Mappings: get_handler(request)
//!     alt No Route Match
//!         Mappings-->>Dispatcher: RouteNotFound
//!         Dispatcher-->>Caller: 404 committed
//!     end
//!     Mappings-->>Dispatcher: HandlerExecution
//!     Dispatcher->>Resolvers: resolve each parameter
//!     Resolvers-->>Dispatcher: Arguments (or binding failure: 500)
//!     Dispatcher->>Handler: handle(arguments)
//!     Handler-->>Dispatcher: view name / ModelAndView / View
//!     Dispatcher->>Views: resolve_view_name(name)
//!     Views-->>Dispatcher: Redirect / Forward view
//!     Dispatcher->>View: render(model, request, response)
//!     View-->>Caller: response committed
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtmvc::coerce::DeclaredType;
//! use brrtmvc::dispatcher::Dispatcher;
//! use brrtmvc::server::{HttpRequest, HttpResponse};
//! use brrtmvc::spec::{ParameterSpec, Route};
//! use brrtmvc::view::MiniJinjaRenderer;
//! use http::Method;
//! use std::sync::Arc;
//!
//! let dispatcher = Dispatcher::builder()
//!     .renderer(Arc::new(MiniJinjaRenderer::new("templates")))
//!     .route(
//!         "login",
//!         Route::post("/login"),
//!         vec![ParameterSpec::request_param("user", DeclaredType::String)],
//!         |_args| Ok("redirect:/dashboard"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let request = HttpRequest::new(Method::POST, "/login?user=alice");
//! let mut response = HttpResponse::new();
//! dispatcher.dispatch(&request, &mut response).unwrap();
//! assert_eq!(response.status(), 302);
//! assert_eq!(response.header("location"), Some("/dashboard"));
//! ```
//!
//! ## Concurrency
//!
//! A built [`Dispatcher`](dispatcher::Dispatcher) is immutable and
//! `Send + Sync`; share it behind an `Arc` and call `dispatch` from as many
//! threads as the hosting server uses. Handlers must be `Send + Sync` for the
//! same reason.
//!
//! ## Logging
//!
//! Every stage logs through `tracing`. Install a subscriber (the binary uses
//! `tracing-subscriber` with `RUST_LOG`) to see route matches, argument
//! binding, view resolution, and failures.

pub mod cli;
pub mod coerce;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod resolver;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod spec;
pub mod view;

pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use error::{DispatchError, RegistrationError};
pub use handler::{Controller, Handler, HandlerOutput};
pub use resolver::Arguments;
pub use runtime_config::RuntimeConfig;
pub use server::{HttpRequest, HttpResponse, ResponseAction};
pub use spec::{ParameterSpec, Route};
pub use view::{ModelAndView, View};
