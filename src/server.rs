use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::{get, post}};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::chat::{ChatError, ChatOrchestrator};
use crate::itinerary::{GenerationError, ItineraryOrchestrator};
use crate::persona::{PersonaProfile, classify};
use crate::trip::{Itinerary, TripParameters};

#[derive(Clone)]
pub struct AppState {
    pub chat: ChatOrchestrator,
    pub itinerary: ItineraryOrchestrator,
}

// raw_response is present only when the model replied but no itinerary
// could be extracted from the reply.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(rename = "rawResponse", skip_serializing_if = "Option::is_none")]
    raw_response: Option<String>,
}

struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, body: ErrorBody { error: error.into(), raw_response: None } }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::InvalidInput(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            GenerationError::Gateway(e) => {
                ApiError::new(StatusCode::BAD_GATEWAY, format!("itinerary generation failed: {e}"))
            }
            GenerationError::Extraction { error, raw_response } => ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorBody {
                    error: format!("failed to parse the model response as JSON: {error}"),
                    raw_response: Some(raw_response),
                },
            },
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::InvalidInput(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            ChatError::Gateway(e) => {
                ApiError::new(StatusCode::BAD_GATEWAY, format!("chat completion failed: {e}"))
            }
        }
    }
}

async fn health() -> &'static str {
    "Server is working!"
}

#[derive(Debug, Serialize)]
struct GenerateItineraryResponse {
    itinerary: Itinerary,
}

async fn generate_itinerary(
    axum::extract::State(state): axum::extract::State<AppState>,
    Json(trip): Json<TripParameters>,
) -> Result<Json<GenerateItineraryResponse>, ApiError> {
    let itinerary = state.itinerary.generate(&trip).await?;
    Ok(Json(GenerateItineraryResponse { itinerary }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatbotBody {
    session_id: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatbotResponse {
    reply: String,
}

async fn chatbot(
    axum::extract::State(state): axum::extract::State<AppState>,
    Json(body): Json<ChatbotBody>,
) -> Result<Json<ChatbotResponse>, ApiError> {
    let reply = state.chat.respond(&body.session_id, &body.message).await?;
    Ok(Json(ChatbotResponse { reply }))
}

#[derive(Debug, Deserialize)]
struct AiChatBody {
    message: String,
}

// Sessionless chat for the floating widget; each request stands alone.
async fn ai_chat(
    axum::extract::State(state): axum::extract::State<AppState>,
    Json(body): Json<AiChatBody>,
) -> Result<Json<ChatbotResponse>, ApiError> {
    let reply = state.chat.respond_once(&body.message).await?;
    Ok(Json(ChatbotResponse { reply }))
}

#[derive(Debug, Deserialize)]
struct PersonaBody {
    interests: Vec<String>,
    budget: f64,
    duration: i64,
}

async fn classify_persona(
    Json(body): Json<PersonaBody>,
) -> Result<Json<PersonaProfile>, ApiError> {
    let profile = classify(&body.interests, body.budget, body.duration)
        .map_err(|msg| ApiError::new(StatusCode::BAD_REQUEST, msg))?;
    Ok(Json(profile))
}

pub fn router(state: AppState) -> Router {
    // Browser clients are served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/generate-itinerary", post(generate_itinerary))
        .route("/chatbot", post(chatbot))
        .route("/ai-chat", post(ai_chat))
        .route("/persona", post(classify_persona))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
