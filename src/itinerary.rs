use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::DecodingParams;
use crate::extract::{ExtractError, extract_itinerary};
use crate::gateway::{ChatModel, ChatRequest, GatewayError};
use crate::prompt::build_itinerary_prompt;
use crate::trip::{Itinerary, TripParameters};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    // The model answered but nothing usable could be pulled out of the
    // answer; the raw text rides along so callers can expose it.
    #[error("could not extract an itinerary: {error}")]
    Extraction {
        #[source]
        error: ExtractError,
        raw_response: String,
    },
}

#[derive(Clone)]
pub struct ItineraryOrchestrator {
    model: Arc<dyn ChatModel>,
    params: DecodingParams,
}

impl ItineraryOrchestrator {
    pub fn new(model: Arc<dyn ChatModel>, params: DecodingParams) -> Self {
        Self { model, params }
    }

    // Self-contained per trip: no session history and no preamble go out.
    pub async fn generate(&self, trip: &TripParameters) -> Result<Itinerary, GenerationError> {
        let day_count = trip.validate().map_err(GenerationError::InvalidInput)?;
        let prompt = build_itinerary_prompt(trip, day_count);

        let request = ChatRequest {
            message: prompt,
            history: Vec::new(),
            preamble: None,
            params: self.params,
        };
        let raw = self.model.complete(request).await?;

        match extract_itinerary(&raw) {
            Ok(itinerary) => {
                info!(destination = %trip.destination, days = day_count, "itinerary generated");
                Ok(itinerary)
            }
            Err(error) => {
                warn!(error = %error, "model response failed itinerary extraction");
                Err(GenerationError::Extraction { error, raw_response: raw })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Clone)]
    struct StubModel {
        requests: Arc<Mutex<Vec<ChatRequest>>>,
        response: Result<String, u16>,
    }

    impl StubModel {
        fn replying(text: &str) -> Self {
            Self { requests: Arc::new(Mutex::new(Vec::new())), response: Ok(text.to_owned()) }
        }

        fn failing(status: u16) -> Self {
            Self { requests: Arc::new(Mutex::new(Vec::new())), response: Err(status) }
        }

        fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last_request(&self) -> ChatRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl ChatModel for StubModel {
        async fn complete(&self, request: ChatRequest) -> Result<String, GatewayError> {
            self.requests.lock().unwrap().push(request);
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(GatewayError::Api { status: *status, body: "boom".into() }),
            }
        }
    }

    fn orchestrator(model: StubModel) -> ItineraryOrchestrator {
        ItineraryOrchestrator::new(
            Arc::new(model),
            DecodingParams { temperature: 0.8, max_tokens: 1000 },
        )
    }

    fn rome_trip() -> TripParameters {
        TripParameters {
            destination: "Rome".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            interests: vec!["history".into(), "food".into()],
            budget: Some(1200.0),
        }
    }

    const ROME_REPLY: &str = r#"Here is your trip:
[
  {"day": "Day 1", "activities": ["Colosseum tour", "Trevi Fountain", "Dinner in Trastevere"]},
  {"day": "Day 2", "activities": ["Vatican Museums", "Piazza Navona", "Campo de' Fiori market"]}
]
Enjoy Rome!"#;

    #[tokio::test]
    async fn invalid_trip_never_reaches_the_model() {
        let model = StubModel::replying(ROME_REPLY);
        let orchestrator = orchestrator(model.clone());
        let trip = TripParameters { interests: vec![], ..rome_trip() };

        let err = orchestrator.generate(&trip).await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidInput(_)));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn prose_wrapped_response_yields_the_itinerary() {
        let model = StubModel::replying(ROME_REPLY);
        let orchestrator = orchestrator(model.clone());

        let itinerary = orchestrator.generate(&rome_trip()).await.unwrap();
        assert_eq!(itinerary.len(), 2);
        assert_eq!(itinerary[0].day, "Day 1");
        assert_eq!(itinerary[0].activities.len(), 3);
        assert_eq!(itinerary[1].activities[0], "Vatican Museums");

        let request = model.last_request();
        assert!(request.message.contains("2-day travel itinerary"));
        assert!(request.message.contains("Rome"));
        assert!(request.history.is_empty());
        assert!(request.preamble.is_none());
        assert_eq!(request.params.max_tokens, 1000);
    }

    #[tokio::test]
    async fn gateway_failure_passes_through() {
        let orchestrator = orchestrator(StubModel::failing(503));

        let err = orchestrator.generate(&rome_trip()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Gateway(GatewayError::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn unusable_response_carries_the_raw_text() {
        let orchestrator = orchestrator(StubModel::replying("I cannot plan that trip."));

        let err = orchestrator.generate(&rome_trip()).await.unwrap_err();
        match err {
            GenerationError::Extraction { error, raw_response } => {
                assert!(matches!(error, ExtractError::NoJsonFound));
                assert_eq!(raw_response, "I cannot plan that trip.");
            }
            other => panic!("expected extraction failure, got {other:?}"),
        }
    }
}
