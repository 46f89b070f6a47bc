use std::fmt;

use crate::types::{TransportationMode, TravelPlanRequest, TravelTheme, ACTIVITIES_PER_DAY};

/// Instruction string sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledPrompt(String);

impl CompiledPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CompiledPrompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompiledPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct TransportClause {
    budget_rule: String,
    advice: &'static str,
}

fn transport_clause(mode: TransportationMode, departure: &str) -> TransportClause {
    match mode {
        TransportationMode::Public => TransportClause {
            budget_rule: "All transportation advice must be based on public transport (subway, bus, train). \
                 Transportation costs must reflect fares."
                .to_string(),
            advice: "Name the specific subway line, bus number, or train route for every move.",
        },
        TransportationMode::Car => TransportClause {
            budget_rule: "All transportation advice must be based on driving a car. \
                 Transportation costs must be based on fuel and tolls."
                .to_string(),
            advice: "Suggest a driving route, give the estimated driving time, and add parking information wherever it matters.",
        },
        TransportationMode::Airplane => TransportClause {
            budget_rule: format!(
                "The trip involves flying. Assume the travelers drive from \"{departure}\" to the departure airport \
                 and leave the car in airport parking for the whole trip, then fly. At the destination they use \
                 either a rental car or public transport. The budget must include the airport parking fee, the \
                 flight tickets, and local transport at the destination (rental car or public transport fares)."
            ),
            advice: "Getting to the departure airport is always by car. At the destination choose either a rental car \
                 (routes, driving times, parking) or public transport (lines and numbers), whichever fits the \
                 itinerary better, and be specific.",
        },
    }
}

/// Instruction that shared costs are totalled for the party, then divided.
pub fn budget_sharing_clause(travelers: u32) -> String {
    format!(
        "Shareable costs such as accommodation, airport parking, and car rental must first be calculated as one \
         total for the whole group, then divided by the actual number of travelers ({travelers}) to get the \
         per-person cost. Size rooms and vehicles for the real party (for example, 8 travelers need two \
         4-person rooms or two cars) before dividing. Explain this calculation in the 'details' field of the budget."
    )
}

fn schedule_clause() -> String {
    format!(
        "You must create a schedule of exactly {ACTIVITIES_PER_DAY} items for each day in the 'activities' array, in \
         this order: Breakfast, two Morning activities, Lunch, two Afternoon activities, Dinner, and one Night activity. \
         Every item needs a specific, flexible time estimate in its 'time' field. For meals use the form \
         \"아침 식사 (08:00~09:00)\"; for activities use \"오전 (09:30~12:00)\", \"오후 (14:30~16:30)\", or \
         \"야간 (20:00~21:30)\". Do not number the activities (write \"오전\", never \"오전 활동 1\")."
    )
}

fn theme_clause(request: &TravelPlanRequest) -> Option<String> {
    let (description, policy) = match request.travel_theme {
        TravelTheme::Default => return None,
        TravelTheme::Kids => (
            preset(TravelTheme::Kids),
            "Focus on family-friendly attractions, restaurants with kids' menus or room to move, and hotels \
             with family rooms or pools. Leave out places unsuitable for children."
                .to_string(),
        ),
        TravelTheme::Parents => (
            preset(TravelTheme::Parents),
            "Pick comfortable, accessible places, restaurants serving traditional and healthy food, and \
             restful accommodation. Avoid strenuous activities."
                .to_string(),
        ),
        TravelTheme::Healing => (
            preset(TravelTheme::Healing),
            "Suggest quiet, scenic spots such as temples, forests, spas, and calm cafes. Keep the pace leisurely."
                .to_string(),
        ),
        TravelTheme::Activity => (
            preset(TravelTheme::Activity),
            "Include hiking, water sports, cycling, zip-lining, or other dynamic experiences.".to_string(),
        ),
        TravelTheme::Gourmet => (
            preset(TravelTheme::Gourmet),
            "The plan must revolve around food: famous local specialties, Michelin-starred restaurants, unique \
             cafes, and local markets. The 'reason' of every restaurant suggestion must be very detailed."
                .to_string(),
        ),
        TravelTheme::Art => (
            preset(TravelTheme::Art),
            "Focus on museums, galleries, theater districts, live music venues, and architectural landmarks. \
             Check for current exhibitions or performances where possible."
                .to_string(),
        ),
        TravelTheme::Dog => (
            preset(TravelTheme::Dog),
            "Every option must be pet-friendly: accommodation that explicitly allows dogs, restaurants with \
             outdoor seating or a dog-friendly reputation, and activities in parks, trails, or beaches where dogs \
             are welcome. Avoid indoor attractions that prohibit pets."
                .to_string(),
        ),
        TravelTheme::Custom => {
            let text = request.custom_theme_text.as_deref().unwrap_or_default().trim();
            (
                format!("사용자 지정 테마: \"{text}\""),
                format!(
                    "Interpret the user's theme (\"{text}\") and tailor every suggestion to it. Be creative and \
                     make sure the whole plan reflects its spirit."
                ),
            )
        }
    };

    Some(format!(
        "13. **Travel Theme:** The user chose a travel theme: {description}. All recommendations, including \
         activities, restaurants, and accommodation, must align with this theme. {policy}\n"
    ))
}

fn preset(theme: TravelTheme) -> String {
    format!("사전 정의된 테마: \"{}\"", theme.label())
}

fn header(request: &TravelPlanRequest) -> String {
    let custom = match (request.travel_theme, request.custom_theme_text.as_deref()) {
        (TravelTheme::Custom, Some(text)) => format!(" - {}", text.trim()),
        _ => String::new(),
    };

    format!(
        "You are an expert travel planner for South Korea. Your name is \"K-Trip Planner\".\n\
         A user wants to plan a trip with the following details:\n\
         - Destinations: {destination}\n\
         - Travel Period: From {start} to {end}\n\
         - Number of Travelers: {travelers}\n\
         - Departure Location: {departure}\n\
         - Main Transportation Mode: {mode}\n\
         - Travel Theme: {theme}{custom}\n\n",
        destination = request.destination,
        start = request.start_date,
        end = request.end_date,
        travelers = request.travelers,
        departure = request.departure,
        mode = request.transportation_mode.label(),
        theme = request.travel_theme.label(),
    )
}

/// Compile a validated request into the single instruction string.
///
/// The output depends only on the request, so equal requests always
/// produce equal prompts.
pub fn compile_prompt(request: &TravelPlanRequest) -> CompiledPrompt {
    let transport = transport_clause(request.transportation_mode, &request.departure);

    let mut prompt = header(request);
    prompt.push_str(&format!(
        "Your task is to create a detailed, day-by-day travel itinerary. Follow these instructions carefully:\n\
         1. **Route Planning:** If several destinations are given (comma-separated), build a logical route that \
         covers all of them and leave realistic time for travel between cities.\n\
         2. **Overall Plan:** Write a compelling title and a short summary for the entire trip.\n\
         3. **Daily Structure:** Give each day a theme (e.g. \"Historic Seoul Exploration\").\n\
         4. **Activities & Meals:** {schedule}\n\
         5. **Transportation Advice:** For every activity and meal, give practical transportation advice. {advice}\n\
         6. **Additional Restaurant Suggestions:** Besides the meals in the schedule, recommend exactly TWO extra \
         well-known or unique local restaurants or cafes per day in the 'restaurantSuggestions' array. They must \
         differ from the planned meals.\n\
         7. **Accommodation:** Suggest one specific, real place to stay with its actual name and explain why it \
         fits the trip. Avoid generic types.\n\
         8. **Budget Estimation:** Estimate a rough budget PER PERSON for the entire trip in Korean Won (KRW), with \
         a total and a breakdown for accommodation, food, transportation, and activities. {budget_rule} {sharing}\n\
         9. **Realism:** Account for realistic travel times between locations.\n\
         10. **Tone:** Be enthusiastic, helpful, and creative, mixing famous spots with hidden gems.\n\
         11. **Language:** The entire output must be in Korean.\n\
         12. **Format:** Respond with a single, valid JSON object that conforms to the provided schema. Do not add \
         any text, markdown code fences, or comments before or after the JSON object. Enclose every key and string \
         value in double quotes. Do not use trailing commas.\n",
        schedule = schedule_clause(),
        advice = transport.advice,
        budget_rule = transport.budget_rule,
        sharing = budget_sharing_clause(request.travelers),
    ));

    if let Some(theme) = theme_clause(request) {
        prompt.push_str(&theme);
    }

    CompiledPrompt(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> TravelPlanRequest {
        TravelPlanRequest::new(
            "서울, 부산",
            "김포공항",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
        )
        .with_travelers(4)
    }

    #[test]
    fn test_header_restates_request() {
        let prompt = compile_prompt(&request().with_transportation_mode(TransportationMode::Car));
        let text = prompt.as_str();

        assert!(text.contains("- Destinations: 서울, 부산"));
        assert!(text.contains("From 2025-06-01 to 2025-06-03"));
        assert!(text.contains("- Number of Travelers: 4"));
        assert!(text.contains("- Departure Location: 김포공항"));
        assert!(text.contains("자동차 (Car)"));
        assert!(text.contains("- Travel Theme: 기본 (Default)"));
    }

    #[test]
    fn test_transport_clauses() {
        let public = compile_prompt(&request());
        assert!(public.as_str().contains("subway, bus, train"));
        assert!(public.as_str().contains("fares"));

        let car = compile_prompt(&request().with_transportation_mode(TransportationMode::Car));
        assert!(car.as_str().contains("parking information"));
        assert!(car.as_str().contains("fuel and tolls"));

        let plane = compile_prompt(&request().with_transportation_mode(TransportationMode::Airplane));
        assert!(plane.as_str().contains("airport parking"));
        assert!(plane.as_str().contains("either a rental car"));
        assert!(plane.as_str().contains("flight tickets"));
        assert!(plane.as_str().contains("drive from \"김포공항\""));
    }

    #[test]
    fn test_default_theme_has_no_theme_clause() {
        let prompt = compile_prompt(&request());
        assert!(!prompt.as_str().contains("**Travel Theme:**"));
        assert!(theme_clause(&request()).is_none());
    }

    #[test]
    fn test_only_selected_theme_policy_is_included() {
        let prompt = compile_prompt(&request().with_theme(TravelTheme::Gourmet));
        let text = prompt.as_str();
        assert!(text.contains("미식여행 (Gourmet Trip)"));
        assert!(text.contains("Michelin-starred"));
        assert!(!text.contains("kids' menus"));
        assert!(!text.contains("dog-friendly"));
    }

    #[test]
    fn test_custom_theme_text_is_quoted() {
        let prompt = compile_prompt(&request().with_custom_theme("야구장 투어"));
        let text = prompt.as_str();
        assert!(text.contains("- Travel Theme: (직접입력) - 야구장 투어"));
        assert!(text.contains("사용자 지정 테마: \"야구장 투어\""));
        assert!(text.contains("Interpret the user's theme (\"야구장 투어\")"));
    }

    #[test]
    fn test_budget_sharing_uses_traveler_count() {
        let prompt = compile_prompt(&request().with_travelers(3));
        assert!(prompt.as_str().contains(&budget_sharing_clause(3)));
        assert!(prompt
            .as_str()
            .contains("divided by the actual number of travelers (3)"));
    }

    #[test]
    fn test_schedule_and_format_clauses() {
        let text = compile_prompt(&request()).into_string();
        assert!(text.contains("exactly 8 items"));
        assert!(text.contains("아침 식사 (08:00~09:00)"));
        assert!(text.contains("야간 (20:00~21:30)"));
        assert!(text.contains("exactly TWO extra"));
        assert!(text.contains("single, valid JSON object"));
        assert!(text.contains("trailing commas"));
        assert!(text.contains("must be in Korean"));
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let req = request().with_custom_theme("전통시장");
        assert_eq!(compile_prompt(&req), compile_prompt(&req.clone()));
    }
}
