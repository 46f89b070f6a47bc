pub mod schema;
pub mod validation;

pub use schema::{project_for_service, CompletionSchema, SchemaHandle};
pub use validation::validate_structured_payload;
