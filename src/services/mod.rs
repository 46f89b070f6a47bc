pub mod extraction;
pub mod gemini_client;
pub mod normalize;
pub mod prompt;

pub use extraction::{extract_structured, extract_travel_plan, strip_code_fence};
pub use gemini_client::{GeminiClient, GenerateContentRequest, GenerationBackend};
pub use normalize::normalize_destination;
pub use prompt::{budget_sharing_clause, compile_prompt, CompiledPrompt};
