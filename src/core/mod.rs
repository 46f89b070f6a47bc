pub mod config;
pub mod planner;

pub use config::{GeminiConfig, SamplingConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use planner::TripPlanner;
