use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    services::normalize::normalize_destination,
};

/// Main way the party gets around during the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportationMode {
    Public,
    Car,
    Airplane,
}

impl TransportationMode {
    pub const ALL: [TransportationMode; 3] = [
        TransportationMode::Public,
        TransportationMode::Car,
        TransportationMode::Airplane,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportationMode::Public => "public",
            TransportationMode::Car => "car",
            TransportationMode::Airplane => "airplane",
        }
    }

    /// Display label used in the prompt header
    pub fn label(&self) -> &'static str {
        match self {
            TransportationMode::Public => "대중교통 (Public Transport)",
            TransportationMode::Car => "자동차 (Car)",
            TransportationMode::Airplane => "비행기 (Airplane)",
        }
    }
}

impl fmt::Display for TransportationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportationMode {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "public" => Ok(TransportationMode::Public),
            "car" => Ok(TransportationMode::Car),
            "airplane" => Ok(TransportationMode::Airplane),
            other => Err(PlannerError::InvalidRequest(format!(
                "unknown transportation mode `{other}`"
            ))),
        }
    }
}

/// Theme every recommendation in the plan has to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelTheme {
    #[default]
    Default,
    Kids,
    Parents,
    Healing,
    Activity,
    Gourmet,
    Art,
    Dog,
    Custom,
}

impl TravelTheme {
    pub const ALL: [TravelTheme; 9] = [
        TravelTheme::Default,
        TravelTheme::Kids,
        TravelTheme::Parents,
        TravelTheme::Healing,
        TravelTheme::Activity,
        TravelTheme::Gourmet,
        TravelTheme::Art,
        TravelTheme::Dog,
        TravelTheme::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelTheme::Default => "default",
            TravelTheme::Kids => "kids",
            TravelTheme::Parents => "parents",
            TravelTheme::Healing => "healing",
            TravelTheme::Activity => "activity",
            TravelTheme::Gourmet => "gourmet",
            TravelTheme::Art => "art",
            TravelTheme::Dog => "dog",
            TravelTheme::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TravelTheme::Default => "기본 (Default)",
            TravelTheme::Kids => "아이동반 (With Kids)",
            TravelTheme::Parents => "효도관광 (For Parents)",
            TravelTheme::Healing => "힐링 (Healing/Relaxing)",
            TravelTheme::Activity => "액티비티 (Activity-focused)",
            TravelTheme::Gourmet => "미식여행 (Gourmet Trip)",
            TravelTheme::Art => "예술/공연 (Art & Performance)",
            TravelTheme::Dog => "반려견 동반 (With Pet Dog)",
            TravelTheme::Custom => "(직접입력)",
        }
    }
}

impl fmt::Display for TravelTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelTheme {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        TravelTheme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == wanted)
            .ok_or_else(|| PlannerError::InvalidRequest(format!("unknown travel theme `{wanted}`")))
    }
}

/// Trip-planning request as submitted by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlanRequest {
    /// Free text, possibly several places separated by whitespace or commas
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: u32,
    pub departure: String,
    pub transportation_mode: TransportationMode,
    #[serde(default)]
    pub travel_theme: TravelTheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_theme_text: Option<String>,
}

impl TravelPlanRequest {
    /// Single-traveler public-transport trip with the default theme.
    pub fn new(
        destination: impl Into<String>,
        departure: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            destination: destination.into(),
            start_date,
            end_date,
            travelers: 1,
            departure: departure.into(),
            transportation_mode: TransportationMode::Public,
            travel_theme: TravelTheme::Default,
            custom_theme_text: None,
        }
    }

    pub fn with_travelers(mut self, travelers: u32) -> Self {
        self.travelers = travelers;
        self
    }

    pub fn with_transportation_mode(mut self, mode: TransportationMode) -> Self {
        self.transportation_mode = mode;
        self
    }

    /// Set a predefined theme; clears any custom theme text.
    pub fn with_theme(mut self, theme: TravelTheme) -> Self {
        self.travel_theme = theme;
        self.custom_theme_text = None;
        self
    }

    pub fn with_custom_theme(mut self, text: impl Into<String>) -> Self {
        self.travel_theme = TravelTheme::Custom;
        self.custom_theme_text = Some(text.into());
        self
    }

    /// Parse a request from the form's JSON payload.
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            PlannerError::InvalidRequest(format!(
                "could not read request field `{}`: {}",
                err.path(),
                err.inner()
            ))
        })
    }

    /// Number of calendar days covered, both ends inclusive.
    pub fn trip_length_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Copy of the request with the destination list normalized.
    pub fn normalized(&self) -> Self {
        Self {
            destination: normalize_destination(&self.destination),
            ..self.clone()
        }
    }

    /// Check every precondition that must hold before a prompt is compiled.
    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(PlannerError::InvalidRequest(format!(
                "end date {} precedes start date {}",
                self.end_date, self.start_date
            )));
        }

        if self.travelers == 0 {
            return Err(PlannerError::InvalidRequest(
                "at least one traveler is required".to_string(),
            ));
        }

        if normalize_destination(&self.destination).is_empty() {
            return Err(PlannerError::InvalidRequest(
                "destination must not be empty".to_string(),
            ));
        }

        if self.departure.trim().is_empty() {
            return Err(PlannerError::InvalidRequest(
                "departure location must not be empty".to_string(),
            ));
        }

        let custom_text = self
            .custom_theme_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());

        match (self.travel_theme, custom_text) {
            (TravelTheme::Custom, None) => Err(PlannerError::InvalidRequest(
                "a custom theme needs a description".to_string(),
            )),
            (TravelTheme::Custom, Some(_)) | (_, None) => Ok(()),
            (theme, Some(_)) => Err(PlannerError::InvalidRequest(format!(
                "custom theme text given for the `{theme}` theme"
            ))),
        }
    }
}
