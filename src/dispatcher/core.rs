//! Dispatcher core - the per-request state machine.

use super::builder::DispatcherBuilder;
use crate::error::DispatchError;
use crate::handler::HandlerExecution;
use crate::resolver::ArgumentResolvers;
use crate::router::HandlerMappings;
use crate::server::{HttpRequest, HttpResponse};
use crate::view::{ModelAndView, View, ViewRef, ViewResolvers};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Stage of the pipeline a request is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchPhase {
    Routing,
    Executing,
    ViewResolving,
    Rendering,
}

impl fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DispatchPhase::Routing => "routing",
            DispatchPhase::Executing => "executing",
            DispatchPhase::ViewResolving => "view_resolving",
            DispatchPhase::Rendering => "rendering",
        };
        f.write_str(name)
    }
}

/// Immutable request dispatcher
///
/// Holds the handler mappings and both resolver chains. Built with
/// [`Dispatcher::builder`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    pub(super) mappings: HandlerMappings,
    pub(super) argument_resolvers: ArgumentResolvers,
    pub(super) view_resolvers: ViewResolvers,
}

impl Dispatcher {
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    #[must_use]
    pub fn mappings(&self) -> &HandlerMappings {
        &self.mappings
    }

    #[must_use]
    pub fn argument_resolvers(&self) -> &ArgumentResolvers {
        &self.argument_resolvers
    }

    #[must_use]
    pub fn view_resolvers(&self) -> &ViewResolvers {
        &self.view_resolvers
    }

    /// Dispatch one request
    ///
    /// On success the chosen view has committed the response. On failure the
    /// error is logged, the response is committed with the error's status,
    /// and the error is returned for the caller's information.
    ///
    /// # Errors
    ///
    /// The [`DispatchError`] that ended the pipeline.
    pub fn dispatch(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
    ) -> Result<(), DispatchError> {
        let start = Instant::now();

        // D1: Dispatch start
        debug!(method = %request.method(), path = %request.path(), "Dispatch start");

        match self.run(request, response) {
            Ok(()) => {
                // D2: Dispatch complete
                info!(
                    method = %request.method(),
                    path = %request.path(),
                    status = response.status(),
                    duration_us = start.elapsed().as_micros(),
                    "Dispatch complete"
                );
                Ok(())
            }
            Err((phase, err)) => {
                let status = err.status();
                // D3: Dispatch failed; detail stays in the log
                if status == 404 {
                    warn!(
                        method = %request.method(),
                        path = %request.path(),
                        phase = %phase,
                        status = status,
                        error = %err,
                        "Dispatch failed"
                    );
                } else {
                    error!(
                        method = %request.method(),
                        path = %request.path(),
                        phase = %phase,
                        status = status,
                        binding_failure = err.is_binding_failure(),
                        error = %err,
                        error_detail = ?err,
                        "Dispatch failed"
                    );
                }
                if !response.is_committed() {
                    response.send_error(status);
                }
                Err(err)
            }
        }
    }

    fn run(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
    ) -> Result<(), (DispatchPhase, DispatchError)> {
        let execution = self
            .mappings
            .get_handler(request)
            .map_err(|e| (DispatchPhase::Routing, e))?;

        let mav = self
            .execute(&execution, request, response)
            .map_err(|e| (DispatchPhase::Executing, e))?;

        let (view_ref, model) = mav.into_parts();
        let view = self
            .resolve_view(view_ref)
            .map_err(|e| (DispatchPhase::ViewResolving, e))?;

        view.render(&model, request, response)
            .map_err(|e| (DispatchPhase::Rendering, e))
    }

    fn execute(
        &self,
        execution: &HandlerExecution,
        request: &HttpRequest,
        response: &mut HttpResponse,
    ) -> Result<ModelAndView, DispatchError> {
        match catch_unwind(AssertUnwindSafe(|| {
            execution.execute(request, response, &self.argument_resolvers)
        })) {
            Ok(result) => result,
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic payload".to_string());
                // H3: Handler panic caught
                error!(
                    handler_name = %execution.name(),
                    panic_message = %message,
                    "Handler panicked"
                );
                Err(DispatchError::Handler(anyhow::anyhow!(
                    "handler '{}' panicked: {}",
                    execution.name(),
                    message
                )))
            }
        }
    }

    fn resolve_view(&self, view_ref: ViewRef) -> Result<View, DispatchError> {
        match view_ref {
            ViewRef::View(view) => Ok(view),
            ViewRef::Name(name) => self.view_resolvers.resolve_view_name(&name),
        }
    }
}
