use crate::trip::TripParameters;

// Deterministic for a given trip. The embedded example array matches the
// exact shape the extractor expects.
pub fn build_itinerary_prompt(params: &TripParameters, day_count: u32) -> String {
    format!(
        r#"Create a detailed {day_count}-day travel itinerary for a solo traveler visiting {destination}. The traveler is interested in {interests}.

Important:
- Respond only with a JSON array.
- Do NOT include any explanations, introductions, or extra text.
- The JSON must be an array of objects.
- Each object must have:
  - a "day" field (e.g., "Day 1")
  - an "activities" field which is an array of 3 to 5 activity descriptions (strings) for that day.

Example format you must follow exactly:

[
  {{
    "day": "Day 1",
    "activities": [
      "Visit the main museum",
      "Have lunch at a local cafe",
      "Walk through the historic district"
    ]
  }},
  {{
    "day": "Day 2",
    "activities": [
      "Explore the art gallery",
      "Try local street food",
      "Visit the city park"
    ]
  }}
]

Please ensure the output is valid JSON and contains no extra characters or text outside the JSON array."#,
        day_count = day_count,
        destination = params.destination,
        interests = params.interests.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rome() -> TripParameters {
        TripParameters {
            destination: "Rome".into(),
            start_date: "2024-03-01".parse().unwrap(),
            end_date: "2024-03-02".parse().unwrap(),
            interests: vec!["History".into(), "Food".into()],
            budget: None,
        }
    }

    #[test]
    fn mentions_exact_day_count() {
        let params = rome();
        let days = params.day_count().unwrap();
        let prompt = build_itinerary_prompt(&params, days);
        assert!(prompt.contains("2-day"));
        assert!(!prompt.contains("3-day"));
    }

    #[test]
    fn joins_interests_with_commas() {
        let prompt = build_itinerary_prompt(&rome(), 2);
        assert!(prompt.contains("History, Food"));
        assert!(prompt.contains("Rome"));
    }

    #[test]
    fn mandates_json_array_only() {
        let prompt = build_itinerary_prompt(&rome(), 2);
        assert!(prompt.contains("only with a JSON array"));
        assert!(prompt.contains("\"activities\""));
    }

    #[test]
    fn embedded_example_is_valid_json() {
        let prompt = build_itinerary_prompt(&rome(), 2);
        let start = prompt.find('[').unwrap();
        let end = prompt.rfind(']').unwrap();
        let value: serde_json::Value = serde_json::from_str(&prompt[start..=end]).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn deterministic_for_same_input() {
        let params = rome();
        assert_eq!(
            build_itinerary_prompt(&params, 2),
            build_itinerary_prompt(&params, 2)
        );
    }
}
