//! Job value templating using Handlebars.
//!
//! Job definitions may reference the collection defaults, e.g.
//! `name = "{{application_name}}-build"`. After a collection has been
//! converted for a pull request, rendering resolves those references so the
//! materialized job names carry the pull request suffix.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, JobRenderer};
