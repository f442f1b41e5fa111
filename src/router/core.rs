//! Route table - hot path for request routing.

use crate::error::{DispatchError, RegistrationError};
use crate::handler::HandlerDescriptor;
use crate::spec::{HandlerKey, ParamVec, PathTemplate};
use http::Method;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of successfully matching a request to a registered route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The key of the matched entry
    pub key: HandlerKey,
    /// The registered handler (Arc to avoid cloning descriptors per request)
    pub descriptor: Arc<HandlerDescriptor>,
    /// Captured `{name}` segments, in template order
    pub path_variables: ParamVec,
}

impl RouteMatch {
    /// Get a captured path variable by name
    #[inline]
    #[must_use]
    pub fn get_path_variable(&self, name: &str) -> Option<&str> {
        self.path_variables
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
struct RouteEntry {
    key: HandlerKey,
    template: PathTemplate,
    descriptor: Arc<HandlerDescriptor>,
}

/// Immutable-after-startup routing table keyed by `(method, template)`
///
/// Entries are scanned in registration order; see the module docs for the
/// overwrite and overlap rules.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under every method its route declares
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] when the route template is malformed.
    pub fn register(&mut self, descriptor: HandlerDescriptor) -> Result<(), RegistrationError> {
        let keys = descriptor.route.keys();
        let descriptor = Arc::new(descriptor);
        for key in keys {
            self.register_key(key, Arc::clone(&descriptor))?;
        }
        Ok(())
    }

    /// Insert or overwrite one `(method, template)` entry
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] when the template is malformed.
    pub fn register_key(
        &mut self,
        key: HandlerKey,
        descriptor: Arc<HandlerDescriptor>,
    ) -> Result<(), RegistrationError> {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.key == key) {
            warn!(
                route = %key,
                previous_handler = %existing.descriptor.name,
                handler_name = %descriptor.name,
                "Route registered twice; previous handler is now unreachable"
            );
            existing.descriptor = descriptor;
            return Ok(());
        }

        let template = PathTemplate::parse(&key.template)?;
        debug!(route = %key, handler_name = %descriptor.name, "Route registered");
        self.entries.push(RouteEntry {
            key,
            template,
            descriptor,
        });
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys in scan order
    pub fn keys(&self) -> impl Iterator<Item = &HandlerKey> {
        self.entries.iter().map(|e| &e.key)
    }

    /// Descriptors with their keys, in scan order
    pub fn iter(&self) -> impl Iterator<Item = (&HandlerKey, &Arc<HandlerDescriptor>)> {
        self.entries.iter().map(|e| (&e.key, &e.descriptor))
    }

    /// Log the routing table summary
    pub fn log_summary(&self) {
        // RT5: Routing table loaded
        let routes_summary: Vec<String> = self
            .entries
            .iter()
            .take(10)
            .map(|e| format!("{} -> {}", e.key, e.descriptor.name))
            .collect();

        info!(
            routes_count = self.entries.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );
    }

    /// Find the first entry matching method and path
    #[must_use]
    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        self.entries
            .iter()
            .filter(|e| &e.key.method == method)
            .find_map(|e| {
                e.template.matches(path).map(|path_variables| RouteMatch {
                    key: e.key.clone(),
                    descriptor: Arc::clone(&e.descriptor),
                    path_variables,
                })
            })
    }

    /// Match a request to a route
    ///
    /// # Errors
    ///
    /// [`DispatchError::RouteNotFound`] when no entry matches both the
    /// method and the path.
    pub fn lookup(&self, method: &Method, path: &str) -> Result<RouteMatch, DispatchError> {
        // RT1: Route match attempt
        debug!(method = %method, path = %path, "Route match attempt");

        let match_start = Instant::now();
        let result = self.find(method, path);
        let match_duration = match_start.elapsed();

        match result {
            Some(m) => {
                // RT3: Route matched
                if match_duration > Duration::from_millis(1) {
                    warn!(
                        method = %method,
                        path = %path,
                        handler_name = %m.descriptor.name,
                        route_pattern = %m.key.template,
                        duration_us = match_duration.as_micros(),
                        "Slow route matching detected"
                    );
                } else {
                    debug!(
                        method = %method,
                        path = %path,
                        handler_name = %m.descriptor.name,
                        route_pattern = %m.key.template,
                        path_variables = ?m.path_variables,
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );
                }
                Ok(m)
            }
            None => {
                // RT4: No route found (404)
                debug!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched in route table"
                );
                Err(DispatchError::route_not_found(method, path))
            }
        }
    }
}
