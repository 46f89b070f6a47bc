use thiserror::Error;

use crate::types::PlanError;

const RETRY_LATER_TITLE: &str = "여행 계획 생성 실패";
const RETRY_LATER_MESSAGE: &str =
    "Failed to generate the travel plan. The AI may have returned an error or an invalid format. Please try again.";

/// Main error type for the planning pipeline
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Precondition violated before any network call was made.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The generation service refused the prompt on content-policy grounds.
    #[error("Blocked by the generation service: {0}")]
    ServiceBlocked(String),

    /// Network, rate-limit or service-availability failure.
    #[error("Transport failure{}: {message}", status_suffix(.status))]
    TransportFailure {
        status: Option<u16>,
        message: String,
    },

    /// The reply could not be parsed as JSON after fence stripping.
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// The reply parsed but does not conform to the travel plan schema.
    #[error("Schema violation at {path}: {message}")]
    SchemaViolation { path: String, message: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" (HTTP {code})"))
        .unwrap_or_default()
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    pub(crate) fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        PlannerError::TransportFailure {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn schema_violation(path: impl Into<String>, message: impl Into<String>) -> Self {
        let path = path.into();
        PlannerError::SchemaViolation {
            path: if path.is_empty() {
                "<root>".to_string()
            } else {
                path
            },
            message: message.into(),
        }
    }

    /// Whether the failure happened after an outbound call was issued
    pub fn is_downstream(&self) -> bool {
        !matches!(self, PlannerError::InvalidRequest(_))
    }

    /// Offending JSON pointer for schema violations
    pub fn violation_path(&self) -> Option<&str> {
        match self {
            PlannerError::SchemaViolation { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get the error code for structured logs
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::InvalidRequest(_) => "INVALID_REQUEST",
            PlannerError::ServiceBlocked(_) => "SERVICE_BLOCKED",
            PlannerError::TransportFailure { .. } => "TRANSPORT_FAILURE",
            PlannerError::MalformedOutput(_) => "MALFORMED_OUTPUT",
            PlannerError::SchemaViolation { .. } => "SCHEMA_VIOLATION",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        });
        match self {
            PlannerError::TransportFailure {
                status: Some(status),
                ..
            } => {
                payload["error"]["status"] = serde_json::json!(status);
            }
            PlannerError::SchemaViolation { path, .. } => {
                payload["error"]["path"] = serde_json::json!(path);
            }
            _ => {}
        }
        payload
    }

    /// Collapse into the title/message pair shown to the user.
    pub fn to_plan_error(&self) -> PlanError {
        match self {
            PlannerError::InvalidRequest(message) => PlanError {
                title: "입력 오류".to_string(),
                message: message.clone(),
            },
            PlannerError::ServiceBlocked(reason) => PlanError {
                title: "요청이 차단되었습니다".to_string(),
                message: format!(
                    "The request was blocked due to safety settings ({reason}). Please modify your inputs."
                ),
            },
            PlannerError::TransportFailure { .. }
            | PlannerError::MalformedOutput(_)
            | PlannerError::SchemaViolation { .. } => PlanError {
                title: RETRY_LATER_TITLE.to_string(),
                message: RETRY_LATER_MESSAGE.to_string(),
            },
        }
    }
}

impl From<PlannerError> for PlanError {
    fn from(err: PlannerError) -> Self {
        err.to_plan_error()
    }
}
