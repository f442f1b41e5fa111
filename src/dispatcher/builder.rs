use super::core::Dispatcher;
use crate::error::RegistrationError;
use crate::handler::{Controller, Handler, HandlerDescriptor, HandlerOutput};
use crate::resolver::{ArgumentResolvers, Arguments};
use crate::router::{HandlerMapping, HandlerMappings, LegacyMapping, RouteTable};
use crate::runtime_config::RuntimeConfig;
use crate::server::{HttpRequest, HttpResponse};
use crate::spec::{ParamAnnotation, ParameterSpec, PathTemplate, Route};
use crate::view::{MiniJinjaRenderer, TemplateRenderer, ViewResolvers};
use std::sync::Arc;
use tracing::{info, warn};

/// Startup registration for a [`Dispatcher`]
///
/// Routes and legacy controllers are collected in call order and registered
/// by [`DispatcherBuilder::build`], which is also where malformed templates
/// are reported.
#[derive(Default)]
pub struct DispatcherBuilder {
    descriptors: Vec<HandlerDescriptor>,
    legacy: Vec<(String, Arc<dyn Controller>)>,
    config: RuntimeConfig,
    renderer: Option<Arc<dyn TemplateRenderer>>,
    view_resolvers: Option<ViewResolvers>,
    argument_resolvers: Option<ArgumentResolvers>,
}

impl DispatcherBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure handler
    #[must_use]
    pub fn route<F, R>(
        self,
        name: &str,
        route: Route,
        parameters: Vec<ParameterSpec>,
        handler: F,
    ) -> Self
    where
        F: Fn(&mut Arguments<'_>) -> anyhow::Result<R> + Send + Sync + 'static,
        R: Into<HandlerOutput>,
    {
        self.descriptor(HandlerDescriptor::from_fn(name, route, parameters, handler))
    }

    /// Register a [`Handler`] implementation
    #[must_use]
    pub fn route_handler<H: Handler>(
        self,
        name: &str,
        route: Route,
        parameters: Vec<ParameterSpec>,
        handler: H,
    ) -> Self {
        self.descriptor(HandlerDescriptor::new(name, route, parameters, handler))
    }

    /// Register a prepared descriptor
    #[must_use]
    pub fn descriptor(mut self, descriptor: HandlerDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Map an exact path to a closure controller, for every method
    #[must_use]
    pub fn legacy<F>(self, path: &str, controller: F) -> Self
    where
        F: Fn(&HttpRequest, &mut HttpResponse) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.legacy_controller(path, controller)
    }

    /// Map an exact path to a [`Controller`], for every method
    #[must_use]
    pub fn legacy_controller<C: Controller>(mut self, path: &str, controller: C) -> Self {
        let controller: Arc<dyn Controller> = Arc::new(controller);
        self.legacy.push((path.to_string(), controller));
        self
    }

    /// View prefix/suffix, redirect prefix, and template directory
    #[must_use]
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Template collaborator for forward views
    ///
    /// Defaults to a [`MiniJinjaRenderer`] over the configured template
    /// directory.
    #[must_use]
    pub fn renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Replace the standard redirect-then-template view resolver chain
    #[must_use]
    pub fn view_resolvers(mut self, resolvers: ViewResolvers) -> Self {
        self.view_resolvers = Some(resolvers);
        self
    }

    /// Replace the default argument resolver chain
    #[must_use]
    pub fn argument_resolvers(mut self, resolvers: ArgumentResolvers) -> Self {
        self.argument_resolvers = Some(resolvers);
        self
    }

    /// Register everything and freeze the dispatcher
    ///
    /// # Errors
    ///
    /// The first [`RegistrationError`] from a malformed route template or a
    /// templated legacy path.
    pub fn build(self) -> Result<Dispatcher, RegistrationError> {
        let DispatcherBuilder {
            descriptors,
            legacy,
            config,
            renderer,
            view_resolvers,
            argument_resolvers,
        } = self;

        let mut table = RouteTable::new();
        for descriptor in descriptors {
            lint_path_variables(&descriptor)?;
            table.register(descriptor)?;
        }
        table.log_summary();

        let mut mappings = vec![HandlerMapping::Annotated(table)];
        if !legacy.is_empty() {
            let mut legacy_mapping = LegacyMapping::new();
            for (path, controller) in legacy {
                legacy_mapping.register(path, controller)?;
            }
            info!(
                legacy_count = legacy_mapping.len(),
                "Legacy controllers loaded"
            );
            mappings.push(HandlerMapping::Legacy(legacy_mapping));
        }

        let view_resolvers = view_resolvers.unwrap_or_else(|| {
            let renderer: Arc<dyn TemplateRenderer> = match renderer {
                Some(renderer) => renderer,
                None => Arc::new(MiniJinjaRenderer::new(config.template_dir.clone())),
            };
            ViewResolvers::standard(
                &config.redirect_prefix,
                &config.view_prefix,
                &config.view_suffix,
                renderer,
            )
        });

        Ok(Dispatcher {
            mappings: HandlerMappings::new(mappings),
            argument_resolvers: argument_resolvers.unwrap_or_default(),
            view_resolvers,
        })
    }
}

/// Warn about path-variable parameters the route template never captures.
///
/// Such a parameter fails every request with a missing path variable.
fn lint_path_variables(descriptor: &HandlerDescriptor) -> Result<(), RegistrationError> {
    let template = PathTemplate::parse(&descriptor.route.path)?;
    for spec in &descriptor.parameters {
        if spec.annotation == ParamAnnotation::PathVariable
            && !template.variables().any(|v| v == spec.name.as_ref())
        {
            warn!(
                handler_name = %descriptor.name,
                route_pattern = %descriptor.route.path,
                parameter = %spec.name,
                "Path variable parameter is not part of the route template"
            );
        }
    }
    Ok(())
}
