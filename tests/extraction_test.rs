mod common;

use serde_json::json;
use trip_planner_rs::{extract_travel_plan, PlannerError, TravelPlan};

#[test]
fn test_valid_reply_is_typed() {
    let plan = extract_travel_plan(&common::plan_value(2).to_string()).unwrap();

    assert_eq!(plan.days.len(), 2);
    assert_eq!(plan.accommodation.kind, "부티크 호텔");
    assert_eq!(plan.estimated_budget.total_per_person, 420000.0);
    assert_eq!(plan.days[1].day, 2);
    assert_eq!(plan.days[0].activities.len(), 8);
    assert_eq!(plan.days[0].activities[0].time, "아침 식사 (08:00~09:00)");
    assert!(plan.days[0].activities[0].transportation.is_some());
    assert!(plan.days[0].activities[1].transportation.is_none());
}

#[test]
fn test_round_trip() {
    let plan = extract_travel_plan(&common::plan_value(3).to_string()).unwrap();
    let again = extract_travel_plan(&serde_json::to_string(&plan).unwrap()).unwrap();
    assert_eq!(plan, again);

    let pretty = extract_travel_plan(&serde_json::to_string_pretty(&plan).unwrap()).unwrap();
    assert_eq!(plan, pretty);
}

#[test]
fn test_fenced_reply_matches_bare_reply() {
    let json = common::plan_value(1).to_string();
    let bare = extract_travel_plan(&json).unwrap();
    let fenced = extract_travel_plan(&format!("```json\n{json}\n```")).unwrap();
    let untagged = extract_travel_plan(&format!("\n```\n{json}\n```\n")).unwrap();

    assert_eq!(bare, fenced);
    assert_eq!(bare, untagged);
}

#[test]
fn test_not_json_is_malformed() {
    let err = extract_travel_plan("not json at all").unwrap_err();
    assert!(matches!(err, PlannerError::MalformedOutput(_)));
    assert_eq!(err.error_code(), "MALFORMED_OUTPUT");
}

#[test]
fn test_fence_with_trailing_prose_is_malformed() {
    let json = common::plan_value(1).to_string();
    let err = extract_travel_plan(&format!("```json\n{json}\n```\n즐거운 여행 되세요!")).unwrap_err();
    assert!(matches!(err, PlannerError::MalformedOutput(_)));
}

#[test]
fn test_multiple_fences_are_malformed() {
    let json = common::plan_value(1).to_string();
    let err = extract_travel_plan(&format!("```json\n{json}\n```\n```json\n{json}\n```")).unwrap_err();
    assert!(matches!(err, PlannerError::MalformedOutput(_)));
}

#[test]
fn test_missing_days_names_days() {
    let mut value = common::plan_value(2);
    value.as_object_mut().unwrap().remove("days");

    let err = extract_travel_plan(&value.to_string()).unwrap_err();
    assert!(matches!(err, PlannerError::SchemaViolation { .. }));
    assert_eq!(err.violation_path(), Some("/days"));
    assert!(err.to_string().contains("days"));
}

#[test]
fn test_missing_nested_field() {
    let mut value = common::plan_value(1);
    value["estimatedBudget"]["breakdown"]
        .as_object_mut()
        .unwrap()
        .remove("food");

    let err = extract_travel_plan(&value.to_string()).unwrap_err();
    assert_eq!(
        err.violation_path(),
        Some("/estimatedBudget/breakdown/food")
    );
}

#[test]
fn test_wrong_primitive_kind() {
    let mut value = common::plan_value(1);
    value["days"][0]["day"] = json!("first");

    let err = extract_travel_plan(&value.to_string()).unwrap_err();
    assert_eq!(err.violation_path(), Some("/days/0/day"));
}

#[test]
fn test_null_array_rejected() {
    let mut value = common::plan_value(1);
    value["days"][0]["restaurantSuggestions"] = json!(null);

    let err = extract_travel_plan(&value.to_string()).unwrap_err();
    assert_eq!(
        err.violation_path(),
        Some("/days/0/restaurantSuggestions")
    );
}

#[test]
fn test_negative_budget_rejected() {
    let mut value = common::plan_value(1);
    value["estimatedBudget"]["totalPerPerson"] = json!(-5);

    let err = extract_travel_plan(&value.to_string()).unwrap_err();
    assert_eq!(
        err.violation_path(),
        Some("/estimatedBudget/totalPerPerson")
    );
}

#[test]
fn test_schedule_grammar_enforced() {
    let mut value = common::plan_value(2);
    value["days"][1]["activities"].as_array_mut().unwrap().pop();

    let err = extract_travel_plan(&value.to_string()).unwrap_err();
    assert!(matches!(err, PlannerError::SchemaViolation { .. }));
    assert_eq!(err.violation_path(), Some("/days/1/activities"));
}

#[test]
fn test_empty_itinerary_rejected() {
    let err = extract_travel_plan(&common::plan_value(0).to_string()).unwrap_err();
    assert_eq!(err.violation_path(), Some("/days"));
}

#[test]
fn test_extra_fields_are_ignored() {
    let mut value = common::plan_value(1);
    value["weatherNote"] = json!("장마 대비 우산 지참");

    let plan = extract_travel_plan(&value.to_string()).unwrap();
    assert_eq!(plan.days.len(), 1);
}

#[test]
fn test_fractional_budget_survives_round_trip() {
    let mut plan: TravelPlan = serde_json::from_value(common::plan_value(1)).unwrap();
    let total = 481798707.05759996_f64;
    plan.estimated_budget.total_per_person = total;
    plan.estimated_budget.breakdown.food = 0.1 + 0.2;

    let back = extract_travel_plan(&serde_json::to_string(&plan).unwrap()).unwrap();
    assert_eq!(back.estimated_budget.total_per_person.to_bits(), total.to_bits());
    assert_eq!(back, plan);
}
