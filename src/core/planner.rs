use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    core::config::{GeminiConfig, SamplingConfig},
    error::Result,
    schemas::CompletionSchema,
    services::{
        extraction::extract_travel_plan,
        gemini_client::{GeminiClient, GenerationBackend},
        prompt::{compile_prompt, CompiledPrompt},
    },
    types::{PlanError, TravelPlan, TravelPlanRequest},
};

/// Turns a request into a validated itinerary with a single generation call.
///
/// Holds no per-request state, so one planner can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    backend: Arc<dyn GenerationBackend>,
    sampling: SamplingConfig,
}

impl TripPlanner {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        Ok(Self::with_backend(Arc::new(GeminiClient::new(config)?)))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn with_backend(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            sampling: SamplingConfig::default(),
        }
    }

    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Validate and normalize the request, then compile its prompt.
    pub fn compile_prompt(&self, request: &TravelPlanRequest) -> Result<CompiledPrompt> {
        request.validate()?;
        let request = request.normalized();
        let prompt = compile_prompt(&request);

        debug!(
            target: "tripplanner::prompt",
            chars = prompt.as_str().chars().count(),
            mode = %request.transportation_mode,
            theme = %request.travel_theme,
            "compiled prompt"
        );

        Ok(prompt)
    }

    pub async fn plan(&self, request: &TravelPlanRequest) -> Result<TravelPlan> {
        let prompt = self.compile_prompt(request).map_err(|err| {
            warn!(target: "tripplanner::request", code = err.error_code(), error = %err);
            err
        })?;

        info!(
            target: "tripplanner::request",
            destination = %request.destination,
            travelers = request.travelers,
            days = request.trip_length_days(),
            "requesting travel plan"
        );

        let outcome = match self
            .backend
            .generate(&prompt, TravelPlan::schema(), &self.sampling)
            .await
        {
            Ok(raw) => extract_travel_plan(&raw),
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(plan) => info!(
                target: "tripplanner::extract",
                days = plan.days.len(),
                title = %plan.title,
                "travel plan ready"
            ),
            Err(err) => warn!(
                target: "tripplanner::extract",
                code = err.error_code(),
                downstream = err.is_downstream(),
                error = %err,
                "travel plan failed"
            ),
        }

        outcome
    }

    /// Same as [`plan`](Self::plan) with failures collapsed for display.
    pub async fn plan_for_display(
        &self,
        request: &TravelPlanRequest,
    ) -> std::result::Result<TravelPlan, PlanError> {
        self.plan(request).await.map_err(PlanError::from)
    }
}
