use serde_json::Value;
use thiserror::Error;

use crate::trip::{Itinerary, ItineraryDay};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON array found in model response")]
    NoJsonFound,
    #[error("model response is not valid JSON: {detail}")]
    MalformedJson { detail: String },
    #[error("itinerary has the wrong shape: {detail}")]
    InvalidShape { detail: String },
}

// Models routinely wrap the requested JSON in prose despite instructions, so
// take the span between the first '[' and the last ']' and parse strictly.
// Nothing is repaired; callers keep the raw text for diagnostics.
pub fn extract_itinerary(raw: &str) -> Result<Itinerary, ExtractError> {
    let start = raw.find('[').ok_or(ExtractError::NoJsonFound)?;
    let end = raw.rfind(']').ok_or(ExtractError::NoJsonFound)?;
    if end < start {
        return Err(ExtractError::NoJsonFound);
    }

    let entries: Vec<Value> = serde_json::from_str(&raw[start..=end])
        .map_err(|e| ExtractError::MalformedJson { detail: e.to_string() })?;
    if entries.is_empty() {
        return Err(ExtractError::InvalidShape {
            detail: "itinerary array is empty".into(),
        });
    }

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| day_from_value(idx, entry))
        .collect()
}

fn day_from_value(idx: usize, entry: &Value) -> Result<ItineraryDay, ExtractError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| shape_error(idx, "expected an object"))?;
    let day = obj
        .get("day")
        .and_then(Value::as_str)
        .ok_or_else(|| shape_error(idx, "missing \"day\" string"))?;
    let activities = obj
        .get("activities")
        .and_then(Value::as_array)
        .ok_or_else(|| shape_error(idx, "missing \"activities\" array"))?;
    if activities.is_empty() {
        return Err(shape_error(idx, "\"activities\" is empty"));
    }
    let activities = activities
        .iter()
        .map(|a| {
            a.as_str()
                .map(str::to_owned)
                .ok_or_else(|| shape_error(idx, "\"activities\" entry is not a string"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ItineraryDay {
        day: day.to_owned(),
        activities,
    })
}

fn shape_error(idx: usize, detail: &str) -> ExtractError {
    ExtractError::InvalidShape {
        detail: format!("entry {}: {}", idx, detail),
    }
}
