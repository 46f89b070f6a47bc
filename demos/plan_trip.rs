use chrono::NaiveDate;
use trip_planner_rs::{TransportationMode, TravelPlanRequest, TravelTheme, TripPlanner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::try_init().ok();

    let planner = TripPlanner::from_env()?;

    let request = TravelPlanRequest::new(
        "서울, 부산",
        "김포공항",
        NaiveDate::from_ymd_opt(2025, 6, 1).ok_or("invalid start date")?,
        NaiveDate::from_ymd_opt(2025, 6, 3).ok_or("invalid end date")?,
    )
    .with_travelers(4)
    .with_transportation_mode(TransportationMode::Car)
    .with_theme(TravelTheme::Gourmet);

    println!("=== K-Trip Planner ===\n");

    let plan = match planner.plan_for_display(&request).await {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("{}\n{}", err.title, err.message);
            std::process::exit(1);
        }
    };

    println!("{}\n{}\n", plan.title, plan.summary);
    println!(
        "숙소: {} ({}) - {}",
        plan.accommodation.name, plan.accommodation.kind, plan.accommodation.reason
    );

    let budget = &plan.estimated_budget;
    println!(
        "1인 예상 경비: {:.0} {} (숙박 {:.0} / 식비 {:.0} / 교통 {:.0} / 활동 {:.0})",
        budget.total_per_person,
        budget.currency,
        budget.breakdown.accommodation,
        budget.breakdown.food,
        budget.breakdown.transportation,
        budget.breakdown.activities,
    );
    println!("  {}", budget.details);

    for day in &plan.days {
        println!("\nDay {} ({}) - {}", day.day, day.date, day.theme);
        for activity in &day.activities {
            println!("  {} {}", activity.time, activity.title);
            if let Some(transportation) = &activity.transportation {
                println!("      이동: {}", transportation);
            }
        }
        for restaurant in &day.restaurant_suggestions {
            println!(
                "  추천 맛집: {} ({}) - {}",
                restaurant.name, restaurant.cuisine, restaurant.reason
            );
        }
    }

    Ok(())
}
