use super::model::Model;
use anyhow::{anyhow, Context};
use minijinja::Environment;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Rendering collaborator used by forward views.
///
/// Produces the response body for a template `location` and a model.
/// Failures are opaque to the dispatcher.
pub trait TemplateRenderer: Send + Sync {
    /// Render the template at `location` with `model`
    ///
    /// # Errors
    ///
    /// Any failure to locate, parse, or evaluate the template.
    fn render(&self, location: &str, model: &Model) -> anyhow::Result<String>;
}

enum TemplateSource {
    Directory(PathBuf),
    Inline(HashMap<String, String>),
}

/// [`TemplateRenderer`] backed by minijinja.
///
/// Templates come either from a base directory (read on every render, so
/// edits show up without a restart) or from an in-memory set.
pub struct MiniJinjaRenderer {
    source: TemplateSource,
}

impl MiniJinjaRenderer {
    /// Load templates from files under `base_dir`
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            source: TemplateSource::Directory(base_dir.into()),
        }
    }

    /// Serve templates from memory, keyed by location
    pub fn from_sources<I, K, V>(templates: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let templates = templates
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            source: TemplateSource::Inline(templates),
        }
    }

    /// Map a location onto the base directory, refusing traversal outside it
    fn map_path(base_dir: &Path, location: &str) -> Option<PathBuf> {
        let mut pb = base_dir.to_path_buf();
        for comp in Path::new(location.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    fn template_source(&self, location: &str) -> anyhow::Result<String> {
        match &self.source {
            TemplateSource::Directory(base_dir) => {
                let path = Self::map_path(base_dir, location)
                    .ok_or_else(|| anyhow!("invalid template location '{location}'"))?;
                fs::read_to_string(&path)
                    .with_context(|| format!("reading template {}", path.display()))
            }
            TemplateSource::Inline(templates) => templates
                .get(location)
                .cloned()
                .ok_or_else(|| anyhow!("template '{location}' not found")),
        }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, location: &str, model: &Model) -> anyhow::Result<String> {
        let source = self.template_source(location)?;
        let mut env = Environment::new();
        env.add_template(location, &source)?;
        let tmpl = env.get_template(location)?;
        Ok(tmpl.render(model)?)
    }
}
