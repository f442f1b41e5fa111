use super::core::RouteTable;
use crate::error::{DispatchError, RegistrationError};
use crate::handler::{Controller, HandlerExecution};
use crate::server::HttpRequest;
use crate::spec::SUPPORTED_METHODS;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Legacy controllers keyed by exact path; every supported method matches
#[derive(Clone, Default)]
pub struct LegacyMapping {
    controllers: HashMap<String, Arc<dyn Controller>>,
}

impl fmt::Debug for LegacyMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyMapping")
            .field("paths", &self.paths())
            .finish()
    }
}

impl LegacyMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `path` to `controller`, replacing any earlier mapping
    ///
    /// # Errors
    ///
    /// [`RegistrationError::TemplatedLegacyPath`] when `path` contains a
    /// `{name}` segment, and [`RegistrationError::InvalidTemplate`] when it
    /// does not start with `/`.
    pub fn register(
        &mut self,
        path: impl Into<String>,
        controller: Arc<dyn Controller>,
    ) -> Result<(), RegistrationError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(RegistrationError::InvalidTemplate { template: path });
        }
        if path
            .split('/')
            .any(|s| s.len() >= 2 && s.starts_with('{') && s.ends_with('}'))
        {
            return Err(RegistrationError::TemplatedLegacyPath { path });
        }
        if self.controllers.insert(path.clone(), controller).is_some() {
            warn!(path = %path, "Legacy controller registered twice; previous one is now unreachable");
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Mapped paths, sorted
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.controllers.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    fn get_handler(&self, path: &str) -> Option<HandlerExecution> {
        self.controllers
            .get_key_value(path)
            .map(|(path, controller)| HandlerExecution::Legacy {
                path: path.clone(),
                controller: Arc::clone(controller),
            })
    }
}

/// One source of handlers
#[derive(Debug, Clone)]
pub enum HandlerMapping {
    /// Declared routes with templates and bound parameters
    Annotated(RouteTable),
    /// Legacy controllers by exact path
    Legacy(LegacyMapping),
}

impl HandlerMapping {
    /// Find a handler for the request, or `None`
    #[must_use]
    pub fn get_handler(&self, request: &HttpRequest) -> Option<HandlerExecution> {
        match self {
            HandlerMapping::Annotated(table) => table
                .find(request.method(), request.path())
                .map(|m| HandlerExecution::Annotated {
                    descriptor: m.descriptor,
                    path_variables: m.path_variables,
                }),
            HandlerMapping::Legacy(legacy) => {
                if !SUPPORTED_METHODS.contains(request.method()) {
                    return None;
                }
                legacy.get_handler(request.path())
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerMapping::Annotated(_) => "annotated",
            HandlerMapping::Legacy(_) => "legacy",
        }
    }
}

/// Ordered mapping sources; the first hit wins
#[derive(Debug, Clone, Default)]
pub struct HandlerMappings {
    mappings: Vec<HandlerMapping>,
}

impl HandlerMappings {
    #[must_use]
    pub fn new(mappings: Vec<HandlerMapping>) -> Self {
        Self { mappings }
    }

    #[must_use]
    pub fn mappings(&self) -> &[HandlerMapping] {
        &self.mappings
    }

    /// Find the handler for a request
    ///
    /// # Errors
    ///
    /// [`DispatchError::RouteNotFound`] when no mapping source has one.
    pub fn get_handler(&self, request: &HttpRequest) -> Result<HandlerExecution, DispatchError> {
        // RT1: Route match attempt
        debug!(
            method = %request.method(),
            path = %request.path(),
            sources = self.mappings.len(),
            "Route match attempt"
        );

        for mapping in &self.mappings {
            if let Some(execution) = mapping.get_handler(request) {
                // RT3: Route matched
                info!(
                    method = %request.method(),
                    path = %request.path(),
                    source = mapping.kind(),
                    handler_name = %execution.name(),
                    path_variables = ?execution.path_variables(),
                    "Route matched"
                );
                return Ok(execution);
            }
        }

        // RT4: No route found (404)
        warn!(
            method = %request.method(),
            path = %request.path(),
            "No route matched"
        );
        Err(DispatchError::route_not_found(request.method(), request.path()))
    }
}
