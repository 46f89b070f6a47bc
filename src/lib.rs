//! trip-planner-rs: compile trip-planning requests into schema-constrained
//! prompts and validate the itinerary the model sends back.
//!
//! The pipeline is strictly linear and single-shot: request validation,
//! destination normalization, prompt compilation, one generation call, then
//! fence stripping, JSON parsing and schema validation of the reply.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use trip_planner_rs::{TransportationMode, TravelPlanRequest, TravelTheme, TripPlanner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = TripPlanner::from_env()?;
//!
//!     let request = TravelPlanRequest::new(
//!         "서울 부산",
//!         "김포공항",
//!         NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
//!     )
//!     .with_travelers(4)
//!     .with_transportation_mode(TransportationMode::Car)
//!     .with_theme(TravelTheme::Gourmet);
//!
//!     let plan = planner.plan(&request).await?;
//!     println!("{} ({} days)", plan.title, plan.days.len());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod error;
pub mod schemas;
pub mod services;
pub mod types;

pub use crate::core::{GeminiConfig, SamplingConfig, TripPlanner};
pub use error::{PlannerError, Result};
pub use schemas::{CompletionSchema, SchemaHandle};
pub use services::{
    compile_prompt, extract_travel_plan, normalize_destination, CompiledPrompt, GeminiClient,
    GenerationBackend,
};
pub use types::{
    AccommodationSuggestion, Activity, BudgetBreakdown, EstimatedBudget, ItineraryDay, PlanError,
    RestaurantSuggestion, TransportationMode, TravelPlan, TravelPlanRequest, TravelTheme,
};
