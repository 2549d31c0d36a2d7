//! Job renderer.

use super::TemplateError;
use crate::config::{JobCollection, ValueMap};
use handlebars::{no_escape, Handlebars};
use serde_json::Value;

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (job values are not markup)
/// - Strict mode (catches references to undefined values)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Resolves template references inside job definitions.
pub struct JobRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for JobRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRenderer {
    /// Creates a new job renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders every job of a collection against its defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if any job value fails to render.
    pub fn render_collection(
        &self,
        collection: &JobCollection,
    ) -> Result<Vec<ValueMap>, TemplateError> {
        collection
            .jobs
            .iter()
            .map(|job| self.render_job(job, &collection.defaults))
            .collect()
    }

    /// Renders all string values of a job, including nested ones.
    ///
    /// The rendering context is `defaults` overlaid with the job's own
    /// top-level values.
    ///
    /// # Errors
    ///
    /// Returns an error if a value references an undefined name or is not a
    /// valid template.
    pub fn render_job(
        &self,
        job: &ValueMap,
        defaults: &ValueMap,
    ) -> Result<ValueMap, TemplateError> {
        let mut context = defaults.clone();
        context.extend(job.iter().map(|(k, v)| (k.clone(), v.clone())));
        let context = Value::Object(context);

        job.iter()
            .map(|(key, value)| Ok((key.clone(), self.render_value(key, value, &context)?)))
            .collect::<Result<ValueMap, TemplateError>>()
    }

    fn render_value(
        &self,
        key: &str,
        value: &Value,
        context: &Value,
    ) -> Result<Value, TemplateError> {
        match value {
            Value::String(s) if s.contains("{{") => self
                .handlebars
                .render_template(s, context)
                .map(Value::String)
                .map_err(|source| TemplateError::RenderError {
                    key: key.to_string(),
                    source,
                }),
            Value::Array(items) => items
                .iter()
                .map(|item| self.render_value(key, item, context))
                .collect::<Result<Vec<_>, TemplateError>>()
                .map(Value::Array),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| Ok((k.clone(), self.render_value(k, v, context)?)))
                .collect::<Result<ValueMap, TemplateError>>()
                .map(Value::Object),
            other => Ok(other.clone()),
        }
    }
}
