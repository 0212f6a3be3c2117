//! View resolution and rendering.
//!
//! Handlers return a [`ModelAndView`]: a logical view name plus a JSON model.
//! The dispatcher resolves the name with [`ViewResolver`] and renders the
//! template with a [`ViewRenderer`]. A name of the form `redirect:<url>`
//! resolves to a 302 redirect instead of a template.

use std::fs;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use minijinja::Environment;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub const REDIRECT_PREFIX: &str = "redirect:";

/// Result of a handler: which view to show and the data bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAndView {
    view_name: String,
    model: Map<String, Value>,
}

impl ModelAndView {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self { view_name: view_name.into(), model: Map::new() }
    }

    pub fn redirect(url: &str) -> Self {
        Self::new(format!("{REDIRECT_PREFIX}{url}"))
    }

    /// Bind `value` under `key` in the model.
    pub fn with_object(mut self, key: &str, value: impl Serialize) -> Result<Self, serde_json::Error> {
        self.model.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    pub fn view_name(&self) -> &str { &self.view_name }

    pub fn model(&self) -> &Map<String, Value> { &self.model }

    pub fn into_model(self) -> Value { Value::Object(self.model) }
}

/// Handlers hand the unrendered view to the dispatcher through the response
/// extensions; the body stays empty until the dispatcher renders it.
impl IntoResponse for ModelAndView {
    fn into_response(self) -> Response {
        let mut response = ().into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// What a logical view name resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Template(String),
    Redirect(String),
}

/// Maps logical view names to template paths: `prefix + name + suffix`.
#[derive(Debug, Clone)]
pub struct ViewResolver {
    prefix: String,
    suffix: String,
}

impl ViewResolver {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), suffix: suffix.into() }
    }

    pub fn template_path(&self, view_name: &str) -> String {
        format!("{}{}{}", self.prefix, view_name, self.suffix)
    }

    pub fn resolve(&self, view_name: &str) -> View {
        match view_name.strip_prefix(REDIRECT_PREFIX) {
            Some(url) => View::Redirect(url.to_string()),
            None => View::Template(self.template_path(view_name)),
        }
    }
}

impl From<&configs::ViewConfig> for ViewResolver {
    fn from(cfg: &configs::ViewConfig) -> Self {
        Self::new(cfg.prefix.clone(), cfg.suffix.clone())
    }
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("template {path} not readable: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("template {path} failed to render: {message}")]
    Render { path: String, message: String },
}

/// Turns a resolved template path and a model into an HTML document.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, template_path: &str, model: &Value) -> Result<String, ViewError>;
}

/// Reads templates from disk on every render and evaluates them with
/// minijinja. Auto-escaping follows the template extension, so `.html`
/// templates escape interpolated values.
pub struct TemplateFileRenderer {
    env: Environment<'static>,
}

impl Default for TemplateFileRenderer {
    fn default() -> Self {
        Self { env: Environment::new() }
    }
}

impl TemplateFileRenderer {
    pub fn new() -> Self { Self::default() }
}

impl ViewRenderer for TemplateFileRenderer {
    fn render(&self, template_path: &str, model: &Value) -> Result<String, ViewError> {
        let source = fs::read_to_string(template_path)
            .map_err(|source| ViewError::Io { path: template_path.to_string(), source })?;
        let render_err = |e: minijinja::Error| ViewError::Render { path: template_path.to_string(), message: e.to_string() };
        let tmpl = self.env.template_from_named_str(template_path, &source).map_err(render_err)?;
        tmpl.render(model).map_err(render_err)
    }
}

/// A view that is ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Html(String),
    Redirect(String),
}

/// Resolver and renderer configured once at startup.
#[derive(Clone)]
pub struct Views {
    resolver: ViewResolver,
    renderer: Arc<dyn ViewRenderer>,
}

impl Views {
    pub fn new(resolver: ViewResolver, renderer: Arc<dyn ViewRenderer>) -> Self {
        Self { resolver, renderer }
    }

    pub fn from_config(cfg: &configs::ViewConfig) -> Self {
        Self::new(ViewResolver::from(cfg), Arc::new(TemplateFileRenderer::new()))
    }

    pub fn resolver(&self) -> &ViewResolver { &self.resolver }

    pub fn render(&self, mav: ModelAndView) -> Result<Rendered, ViewError> {
        match self.resolver.resolve(mav.view_name()) {
            View::Redirect(url) => Ok(Rendered::Redirect(url)),
            View::Template(path) => {
                let html = self.renderer.render(&path, &mav.into_model())?;
                Ok(Rendered::Html(html))
            }
        }
    }
}
