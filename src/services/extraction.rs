use std::sync::OnceLock;

use regex::Regex;
use serde_path_to_error::Segment;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{PlannerError, Result},
    schemas::{validate_structured_payload, CompletionSchema, SchemaHandle},
    types::TravelPlan,
};

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$").unwrap_or_else(|err| {
            panic!("fence pattern failed to compile: {err}")
        })
    })
}

/// Remove a code fence that wraps the whole reply.
///
/// Fences embedded in surrounding prose are left alone.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match fence_regex()
        .captures(trimmed)
        .and_then(|captures| captures.get(2))
        .map(|body| body.as_str().trim())
    {
        Some(body) if !body.is_empty() => body,
        _ => trimmed,
    }
}

/// Parse, validate and type a raw model reply as a [`TravelPlan`].
pub fn extract_travel_plan(raw: &str) -> Result<TravelPlan> {
    let plan: TravelPlan = extract_structured(raw)?;
    plan.check_invariants()?;
    Ok(plan)
}

/// Two-stage extraction for any completion schema: parse the text as JSON,
/// then validate against the schema before deserializing.
pub fn extract_structured<T: CompletionSchema>(raw: &str) -> Result<T> {
    let text = strip_code_fence(raw);

    let payload: Value = serde_json::from_str(text).map_err(|err| {
        debug!(target: "tripplanner::extract", error = %err, "reply is not JSON");
        PlannerError::MalformedOutput(format!("reply is not valid JSON: {err}"))
    })?;

    let schema = T::schema();
    validate_structured_payload(schema, &payload)?;
    deserialize_validated(&payload, schema)
}

fn deserialize_validated<T: CompletionSchema>(payload: &Value, schema: &SchemaHandle) -> Result<T> {
    serde_path_to_error::deserialize(payload).map_err(|err| {
        PlannerError::schema_violation(
            json_pointer(err.path()),
            format!(
                "failed to deserialize `{}`: {}",
                schema.type_name(),
                err.inner()
            ),
        )
    })
}

fn json_pointer(path: &serde_path_to_error::Path) -> String {
    path.iter()
        .map(|segment| match segment {
            Segment::Seq { index } => format!("/{index}"),
            Segment::Map { key } => format!("/{key}"),
            Segment::Enum { variant } => format!("/{variant}"),
            Segment::Unknown => "/?".to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(strip_code_fence("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_fence_with_language_tag() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_fence_without_language_tag() {
        assert_eq!(strip_code_fence("```\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn test_fence_with_trailing_prose_is_kept() {
        let raw = "```json\n{}\n```\nHope this helps!";
        assert_eq!(strip_code_fence(raw), raw);
    }

    #[test]
    fn test_empty_fence_is_kept() {
        assert_eq!(strip_code_fence("``````"), "``````");
    }

    #[test]
    fn test_not_json() {
        let err = extract_travel_plan("not json at all").unwrap_err();
        assert!(matches!(err, PlannerError::MalformedOutput(_)));
    }

    #[test]
    fn test_wrong_kind_reports_pointer() {
        let payload = serde_json::json!({ "days": [{ "day": "one" }] });
        let err =
            deserialize_validated::<TravelPlan>(&payload, TravelPlan::schema()).unwrap_err();
        assert_eq!(err.violation_path(), Some("/days/0/day"));
        assert!(err.to_string().contains("TravelPlan"));
    }
}
