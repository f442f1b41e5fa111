use super::core::{Controller, Handler, HandlerOutput};
use crate::error::DispatchError;
use crate::resolver::{ArgumentResolvers, Arguments, RequestContext};
use crate::server::{HttpRequest, HttpResponse};
use crate::spec::{ParamVec, ParameterSpec, Route};
use crate::view::ModelAndView;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// A registered handler: its route, its parameter bindings, and the handler
/// itself. Built once at startup and never mutated.
#[derive(Clone)]
pub struct HandlerDescriptor {
    pub name: String,
    pub route: Route,
    pub parameters: Vec<ParameterSpec>,
    handler: Arc<dyn Handler>,
}

impl HandlerDescriptor {
    pub fn new<H: Handler>(
        name: impl Into<String>,
        route: Route,
        parameters: Vec<ParameterSpec>,
        handler: H,
    ) -> Self {
        Self {
            name: name.into(),
            route,
            parameters,
            handler: Arc::new(handler),
        }
    }

    /// Same as [`HandlerDescriptor::new`], with the closure signature spelled
    /// out so closures infer their argument and error types.
    pub fn from_fn<F, R>(
        name: impl Into<String>,
        route: Route,
        parameters: Vec<ParameterSpec>,
        handler: F,
    ) -> Self
    where
        F: Fn(&mut Arguments<'_>) -> anyhow::Result<R> + Send + Sync + 'static,
        R: Into<HandlerOutput>,
    {
        Self::new(name, route, parameters, handler)
    }
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("name", &self.name)
            .field("route", &self.route)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// A handler bound to one request's route match, ready to invoke
#[derive(Clone)]
pub enum HandlerExecution {
    /// Declared handler with the path variables its template captured
    Annotated {
        descriptor: Arc<HandlerDescriptor>,
        path_variables: ParamVec,
    },
    /// Legacy controller mapped by exact path
    Legacy {
        path: String,
        controller: Arc<dyn Controller>,
    },
}

impl fmt::Debug for HandlerExecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerExecution::Annotated {
                descriptor,
                path_variables,
            } => f
                .debug_struct("Annotated")
                .field("handler", &descriptor.name)
                .field("path_variables", path_variables)
                .finish(),
            HandlerExecution::Legacy { path, .. } => {
                f.debug_struct("Legacy").field("path", path).finish_non_exhaustive()
            }
        }
    }
}

impl HandlerExecution {
    /// Name used in logs
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            HandlerExecution::Annotated { descriptor, .. } => &descriptor.name,
            HandlerExecution::Legacy { path, .. } => path,
        }
    }

    /// Captured path variables; empty for legacy controllers
    #[must_use]
    pub fn path_variables(&self) -> &[(Arc<str>, String)] {
        match self {
            HandlerExecution::Annotated { path_variables, .. } => path_variables,
            HandlerExecution::Legacy { .. } => &[],
        }
    }

    /// Bind arguments, invoke the handler, and normalize its result
    ///
    /// # Errors
    ///
    /// Binding failures from the resolver chain unchanged;
    /// [`DispatchError::Handler`] for handler failures (a handler returning
    /// a [`DispatchError`] has it passed through as is).
    pub fn execute(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
        resolvers: &ArgumentResolvers,
    ) -> Result<ModelAndView, DispatchError> {
        let start = Instant::now();
        let mav = match self {
            HandlerExecution::Annotated {
                descriptor,
                path_variables,
            } => {
                let ctx = RequestContext::new(request, path_variables);
                let mut args = resolvers.resolve_all(&ctx, &descriptor.parameters, response)?;
                debug!(
                    handler_name = %descriptor.name,
                    arg_count = args.len(),
                    "Arguments bound"
                );
                descriptor
                    .handler
                    .handle(&mut args)
                    .map_err(from_handler_error)?
                    .into_model_and_view()
            }
            HandlerExecution::Legacy { controller, .. } => {
                let view_name = controller
                    .execute(request, response)
                    .map_err(from_handler_error)?;
                ModelAndView::new(view_name)
            }
        };

        info!(
            handler_name = %self.name(),
            view_name = ?mav.view_name(),
            model_keys = mav.model().len(),
            duration_us = start.elapsed().as_micros(),
            "Handler executed"
        );
        Ok(mav)
    }
}

fn from_handler_error(err: anyhow::Error) -> DispatchError {
    match err.downcast::<DispatchError>() {
        Ok(dispatch_err) => dispatch_err,
        Err(other) => DispatchError::Handler(other),
    }
}
