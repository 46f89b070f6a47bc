use crate::{
    error::{PlannerError, Result},
    schemas::SchemaHandle,
};
use jsonschema::{error::ValidationErrorKind, Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate a parsed payload against a schema.
///
/// The reported path points at the first offending field; for a missing
/// required property that is the property itself, not its parent.
pub fn validate_structured_payload(schema: &SchemaHandle, payload: &Value) -> Result<()> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            PlannerError::schema_violation(
                "<schema>",
                format!(
                    "failed to prepare `{}` schema for validation: {}",
                    schema.schema_name(),
                    err
                ),
            )
        })?;

    let Err(errors) = validator.validate(payload) else {
        return Ok(());
    };

    let mut first_path = None;
    let mut details = Vec::new();
    let mut truncated = false;

    for (idx, error) in errors.enumerate() {
        if idx >= MAX_SCHEMA_ERRORS {
            truncated = true;
            break;
        }

        let path = offending_path(&error.instance_path.to_string(), &error.kind);
        details.push(format!("{}: {}", display_path(&path), error));
        first_path.get_or_insert(path);
    }

    let mut detail_str = if details.is_empty() {
        "structured payload failed schema validation".to_string()
    } else {
        details.join("; ")
    };

    if truncated {
        detail_str.push_str("; additional errors truncated");
    }

    Err(PlannerError::schema_violation(
        first_path.unwrap_or_default(),
        format!(
            "payload does not match `{}` schema: {}",
            schema.schema_name(),
            detail_str
        ),
    ))
}

fn offending_path(instance_path: &str, kind: &ValidationErrorKind) -> String {
    match kind {
        ValidationErrorKind::Required { property } => {
            let name = property
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| property.to_string());
            format!("{instance_path}/{name}")
        }
        _ => instance_path.to_string(),
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}
