use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use sitechat_domain::{ChatResponse, SearchResult};
use sitechat_index::IndexSource;
use sitechat_service::ReloadReport;

use crate::state::AppState;

pub const MAX_TOP_K: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
	#[serde(default)]
	pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
	#[serde(default)]
	pub query: String,
	pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
	pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct StartersResponse {
	pub starters: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
	pub status: &'static str,
	pub model: String,
	pub index_source: IndexSource,
	pub passage_count: usize,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/chat", post(chat))
		.route("/api/search", post(search))
		.route("/api/starters", get(starters))
		.route("/api/status", get(status))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/v1/admin/reload", post(reload)).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn chat(
	State(state): State<AppState>,
	Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
	let message = payload.message.trim();

	if message.is_empty() {
		return Err(ApiError::new(
			StatusCode::BAD_REQUEST,
			"empty_message",
			"Message must not be empty.",
			Some(vec!["$.message".to_string()]),
		));
	}

	let response = state.service.chat(message).await;

	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	if payload.top_k.is_some_and(|top_k| top_k > MAX_TOP_K) {
		return Err(ApiError::new(
			StatusCode::BAD_REQUEST,
			"invalid_request",
			format!("top_k must be at most {MAX_TOP_K}."),
			Some(vec!["$.top_k".to_string()]),
		));
	}

	let results = state.service.search(&payload.query, payload.top_k).await;

	Ok(Json(SearchResponse { results }))
}

async fn starters(State(state): State<AppState>) -> Json<StartersResponse> {
	Json(StartersResponse { starters: state.service.starters().to_vec() })
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
	let snapshot = state.service.snapshot();

	Json(StatusResponse {
		status: "ready",
		model: state.service.model_name().to_string(),
		index_source: snapshot.source,
		passage_count: snapshot.index.len(),
	})
}

async fn reload(State(state): State<AppState>) -> Result<Json<ReloadReport>, ApiError> {
	let service = state.service.clone();
	let report = tokio::task::spawn_blocking(move || service.reload()).await.map_err(|err| {
		tracing::error!(error = %err, "Index reload task failed.");

		ApiError::new(
			StatusCode::INTERNAL_SERVER_ERROR,
			"internal_error",
			"Index reload failed.",
			None,
		)
	})?;

	Ok(Json(report))
}
