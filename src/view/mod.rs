//! # View Module
//!
//! Turns a handler's logical result into a response action.
//!
//! ## Overview
//!
//! Handlers return a [`ModelAndView`]: a model map plus either a logical
//! view name or a concrete [`View`]. Logical names go through the
//! [`ViewResolvers`] chain, where each resolver claims or declines the name
//! and the first claim wins:
//!
//! - `redirect:/home` is claimed by the redirect resolver and becomes a
//!   redirect to `/home` (the target is not validated)
//! - `profile` falls through to the template resolver and becomes a forward
//!   to `{prefix}profile{suffix}`, rendered by a [`TemplateRenderer`]
//! - a name with any other `scheme:` prefix is claimed by nobody and fails
//!   with [`DispatchError::ViewNotResolved`](crate::error::DispatchError::ViewNotResolved)
//!
//! A view renders exactly once per dispatch. Rendering failures from the
//! template collaborator propagate unchanged as
//! [`DispatchError::Render`](crate::error::DispatchError::Render).

mod core;
mod model;
mod renderer;
mod resolver;

pub use self::core::{ForwardView, JsonView, RedirectView, View};
pub use model::{Model, ModelAndView, ViewRef};
pub use renderer::{MiniJinjaRenderer, TemplateRenderer};
pub use resolver::{ViewResolver, ViewResolvers, DEFAULT_REDIRECT_PREFIX};
