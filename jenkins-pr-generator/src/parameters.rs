//! Job parameter definitions.
//!
//! Maps the parameter type tags used in job templates to the Jenkins
//! parameter-definition classes emitted into job configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Jenkins class for string parameters, also used for unknown tags.
pub const STRING_PARAMETER: &str = "hudson.model.StringParameterDefinition";

/// Jenkins class for boolean parameters.
pub const BOOLEAN_PARAMETER: &str = "hudson.model.BooleanParameterDefinition";

/// Jenkins class for multi-line text parameters.
pub const TEXT_PARAMETER: &str = "hudson.model.TextParameterDefinition";

/// Jenkins class for password parameters.
pub const PASSWORD_PARAMETER: &str = "hudson.model.PasswordParameterDefinition";

/// Jenkins class for choice parameters.
pub const CHOICE_PARAMETER: &str = "hudson.model.ChoiceParameterDefinition";

/// A parameter declared in a job template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name.
    #[serde(default)]
    pub name: String,

    /// Type tag (`string`, `bool`, `text`, `password`, `choice`).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Default value, if any.
    #[serde(default)]
    pub default: Option<Value>,

    /// Human readable description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ParameterSpec {
    /// Returns the Jenkins parameter-definition class for this parameter.
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        param_type(self.kind.as_deref())
    }
}

/// Returns the Jenkins parameter-definition class for a type tag.
///
/// Unknown or absent tags fall back to [`STRING_PARAMETER`].
#[must_use]
pub fn param_type(kind: Option<&str>) -> &'static str {
    match kind {
        Some("bool") => BOOLEAN_PARAMETER,
        Some("text") => TEXT_PARAMETER,
        Some("password") => PASSWORD_PARAMETER,
        Some("choice") => CHOICE_PARAMETER,
        _ => STRING_PARAMETER,
    }
}

/// Records the parameter-definition class on every parameter of a job.
///
/// Each table in the job's `parameters` array gains a `class` entry derived
/// from its `type` tag. Entries that are not tables are left untouched.
/// Returns the number of parameters annotated.
pub fn annotate_parameter_classes(job: &mut crate::config::ValueMap) -> usize {
    let Some(params) = job.get_mut("parameters").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut annotated = 0;
    for param in params.iter_mut().filter_map(Value::as_object_mut) {
        let class = param_type(param.get("type").and_then(Value::as_str));
        param.insert("class".to_string(), Value::String(class.to_string()));
        annotated += 1;
    }
    annotated
}
