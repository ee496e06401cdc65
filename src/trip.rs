use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripParameters {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interests: Vec<String>,
    #[serde(default)]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: String,
    pub activities: Vec<String>,
}

pub type Itinerary = Vec<ItineraryDay>;

impl TripParameters {
    // Inclusive: 2024-03-01..2024-03-02 spans 2 days. None on a reversed range.
    pub fn day_count(&self) -> Option<u32> {
        let span = (self.end_date - self.start_date).num_days();
        if span < 0 { None } else { Some(span as u32 + 1) }
    }

    // Returns the inclusive day count so callers validate and size in one pass.
    pub fn validate(&self) -> Result<u32, String> {
        if self.destination.trim().is_empty() {
            return Err("destination must not be empty".into());
        }
        if self.interests.is_empty() {
            return Err("at least one interest is required".into());
        }
        if let Some(budget) = self.budget {
            if budget < 0.0 {
                return Err("budget must not be negative".into());
            }
        }
        self.day_count()
            .ok_or_else(|| "endDate must not be before startDate".into())
    }
}
