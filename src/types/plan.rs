use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    schemas::{CompletionSchema, SchemaHandle},
};

/// Number of schedule slots every day must contain.
pub const ACTIVITIES_PER_DAY: usize = 8;
/// Extra restaurant suggestions expected for every day.
pub const RESTAURANTS_PER_DAY: usize = 2;

/// Complete itinerary returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlan {
    /// A creative title for the trip in Korean
    pub title: String,
    /// A brief summary of the trip in Korean
    pub summary: String,
    pub accommodation: AccommodationSuggestion,
    pub estimated_budget: EstimatedBudget,
    pub days: Vec<ItineraryDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AccommodationSuggestion {
    /// Kind of lodging, e.g. 럭셔리 호텔
    #[serde(rename = "type")]
    pub kind: String,
    /// Actual name of the place, e.g. 롯데호텔 서울
    pub name: String,
    /// Reason for recommendation in Korean
    pub reason: String,
}

/// Per-person budget estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedBudget {
    #[schemars(range(min = 0))]
    pub total_per_person: f64,
    /// Should be KRW
    pub currency: String,
    pub breakdown: BudgetBreakdown,
    /// How shared costs were divided between the travelers
    pub details: String,
}

/// Informational split of the per-person total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BudgetBreakdown {
    #[schemars(range(min = 0))]
    pub accommodation: f64,
    #[schemars(range(min = 0))]
    pub food: f64,
    #[schemars(range(min = 0))]
    pub transportation: f64,
    #[schemars(range(min = 0))]
    pub activities: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    /// 1-based day counter within the itinerary
    pub day: u32,
    pub date: String,
    /// Daily theme in Korean
    pub theme: String,
    pub activities: Vec<Activity>,
    pub restaurant_suggestions: Vec<RestaurantSuggestion>,
}

/// One of the eight schedule slots of a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Activity {
    /// Slot label such as "아침 식사 (08:00~09:00)" or "오전 (09:30~12:00)"
    pub time: String,
    pub title: String,
    pub description: String,
    /// Transportation details. This is optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transportation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RestaurantSuggestion {
    pub name: String,
    pub cuisine: String,
    pub reason: String,
}

/// Title/message pair handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanError {
    pub title: String,
    pub message: String,
}

impl CompletionSchema for TravelPlan {
    fn schema() -> &'static SchemaHandle {
        static HANDLE: OnceLock<SchemaHandle> = OnceLock::new();
        HANDLE.get_or_init(|| SchemaHandle::for_type::<TravelPlan>("TravelPlan"))
    }
}

impl TravelPlan {
    /// Check the itinerary rules the JSON schema cannot express.
    pub fn check_invariants(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(PlannerError::schema_violation(
                "/days",
                "itinerary must contain at least one day",
            ));
        }

        let budget = &self.estimated_budget;
        let amounts = [
            ("/estimatedBudget/totalPerPerson", budget.total_per_person),
            (
                "/estimatedBudget/breakdown/accommodation",
                budget.breakdown.accommodation,
            ),
            ("/estimatedBudget/breakdown/food", budget.breakdown.food),
            (
                "/estimatedBudget/breakdown/transportation",
                budget.breakdown.transportation,
            ),
            (
                "/estimatedBudget/breakdown/activities",
                budget.breakdown.activities,
            ),
        ];
        if let Some((path, amount)) = amounts
            .iter()
            .find(|(_, amount)| !amount.is_finite() || *amount < 0.0)
        {
            return Err(PlannerError::schema_violation(
                *path,
                format!("budget amount {amount} must be non-negative"),
            ));
        }

        for (idx, day) in self.days.iter().enumerate() {
            let expected = idx as u32 + 1;
            if day.day != expected {
                return Err(PlannerError::schema_violation(
                    format!("/days/{idx}/day"),
                    format!("expected day {expected}, found {}", day.day),
                ));
            }

            if day.activities.len() != ACTIVITIES_PER_DAY {
                return Err(PlannerError::schema_violation(
                    format!("/days/{idx}/activities"),
                    format!(
                        "expected {ACTIVITIES_PER_DAY} activities, found {}",
                        day.activities.len()
                    ),
                ));
            }

            if day.restaurant_suggestions.len() != RESTAURANTS_PER_DAY {
                return Err(PlannerError::schema_violation(
                    format!("/days/{idx}/restaurantSuggestions"),
                    format!(
                        "expected {RESTAURANTS_PER_DAY} restaurant suggestions, found {}",
                        day.restaurant_suggestions.len()
                    ),
                ));
            }
        }

        Ok(())
    }
}
