#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::{json, Value};
use trip_planner_rs::{TransportationMode, TravelPlanRequest, TravelTheme};

const SLOTS: [&str; 8] = [
    "아침 식사 (08:00~09:00)",
    "오전 (09:30~11:00)",
    "오전 (11:00~12:00)",
    "점심 식사 (12:00~13:00)",
    "오후 (13:30~15:00)",
    "오후 (15:30~17:30)",
    "저녁 식사 (18:00~19:30)",
    "야간 (20:00~21:30)",
];

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The Seoul/Busan gourmet road trip used across the integration tests.
pub fn gourmet_request() -> TravelPlanRequest {
    TravelPlanRequest::new("서울, 부산", "김포공항", date(2025, 6, 1), date(2025, 6, 3))
        .with_travelers(4)
        .with_transportation_mode(TransportationMode::Car)
        .with_theme(TravelTheme::Gourmet)
}

pub fn day_value(day: u32) -> Value {
    let activities: Vec<Value> = SLOTS
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let mut activity = json!({
                "time": slot,
                "title": format!("{day}일차 일정 {}", idx + 1),
                "description": "현지 명소 방문",
            });
            if idx % 2 == 0 {
                activity["transportation"] = json!("자가용 이동, 공영주차장 이용");
            }
            activity
        })
        .collect();

    json!({
        "day": day,
        "date": format!("2025-06-0{day}"),
        "theme": format!("{day}일차 미식 탐방"),
        "activities": activities,
        "restaurantSuggestions": [
            { "name": "할매국밥", "cuisine": "돼지국밥", "reason": "부산 대표 향토 음식" },
            { "name": "초량밀면", "cuisine": "밀면", "reason": "여름철 시원한 별미" }
        ]
    })
}

pub fn plan_value(days: u32) -> Value {
    json!({
        "title": "서울에서 부산까지, 미식 로드트립",
        "summary": "서울과 부산의 대표 맛집을 자동차로 잇는 3일 여행",
        "accommodation": {
            "type": "부티크 호텔",
            "name": "호텔 포레 해운대",
            "reason": "해운대 시장과 가까워 미식 여행에 적합"
        },
        "estimatedBudget": {
            "totalPerPerson": 420000,
            "currency": "KRW",
            "breakdown": {
                "accommodation": 150000,
                "food": 180000,
                "transportation": 60000,
                "activities": 30000
            },
            "details": "객실 2개 숙박비와 유류비, 통행료 합계를 4명으로 나누어 계산"
        },
        "days": (1..=days).map(day_value).collect::<Vec<_>>()
    })
}
