use super::core::View;
use serde::Serialize;
use serde_json::Value;

/// Values exposed to a view, keyed by name
pub type Model = serde_json::Map<String, Value>;

/// Either a logical view name to resolve, or a concrete view
#[derive(Debug, Clone)]
pub enum ViewRef {
    Name(String),
    View(View),
}

/// Normalized handler result: what to show, and the data to show it with
#[derive(Debug, Clone)]
pub struct ModelAndView {
    view: ViewRef,
    model: Model,
}

impl ModelAndView {
    /// Result naming a logical view, with an empty model
    #[must_use]
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            view: ViewRef::Name(view_name.into()),
            model: Model::new(),
        }
    }

    /// Result carrying a concrete view; view resolution is skipped
    #[must_use]
    pub fn with_view(view: View) -> Self {
        Self {
            view: ViewRef::View(view),
            model: Model::new(),
        }
    }

    /// Add a model entry, replacing an existing entry of the same name
    #[must_use]
    pub fn add(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.model.insert(name.into(), value.into());
        self
    }

    /// Add any serializable value to the model
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be represented as JSON.
    pub fn add_serialized<T: Serialize>(
        mut self,
        name: impl Into<String>,
        value: &T,
    ) -> anyhow::Result<Self> {
        self.model.insert(name.into(), serde_json::to_value(value)?);
        Ok(self)
    }

    #[must_use]
    pub fn view(&self) -> &ViewRef {
        &self.view
    }

    /// Logical view name, when the result carries one
    #[must_use]
    pub fn view_name(&self) -> Option<&str> {
        match &self.view {
            ViewRef::Name(name) => Some(name),
            ViewRef::View(_) => None,
        }
    }

    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    #[must_use]
    pub fn into_parts(self) -> (ViewRef, Model) {
        (self.view, self.model)
    }
}
