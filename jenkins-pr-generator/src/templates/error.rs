//! Template rendering error types.

/// Template rendering error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A job value could not be rendered.
    #[error("Failed to render job value '{key}': {source}")]
    RenderError {
        key: String,
        #[source]
        source: handlebars::RenderError,
    },
}
