pub mod plan;
pub mod request;

pub use plan::{
    AccommodationSuggestion, Activity, BudgetBreakdown, EstimatedBudget, ItineraryDay, PlanError,
    RestaurantSuggestion, TravelPlan, ACTIVITIES_PER_DAY, RESTAURANTS_PER_DAY,
};
pub use request::{TransportationMode, TravelPlanRequest, TravelTheme};
