use axum::{
	Json, Router,
	extract::{Query, State, rejection::QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use hearth_config::Config;
use hearth_service::{
	Error as ServiceError, FilterOptionsResponse, SearchRequest, SearchResponse,
	filter_options::FILTER_OPTIONS_FAILURE,
	search::{EMPTY_QUERY_EXAMPLE, EMPTY_QUERY_MESSAGE},
};

const HIDDEN_ERROR_DETAIL: &str = "Internal server error";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/chat", get(chat))
		.route("/chat/filters", get(filter_options))
		.with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ChatParams {
	pub msg: Option<String>,
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn chat(
	State(state): State<AppState>,
	params: Result<Query<ChatParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let Query(params) = params.map_err(ApiError::malformed_query)?;
	let request = SearchRequest { msg: params.msg.unwrap_or_default() };
	let response = state
		.service
		.search(request)
		.await
		.map_err(|err| ApiError::search(err, &state.service.cfg))?;

	Ok(Json(response))
}

async fn filter_options(
	State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>, ApiError> {
	let response = state.service.filter_options().await.map_err(|_| ApiError::filter_options())?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	success: bool,
	message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	example: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
	example: Option<String>,
	error: Option<String>,
}
impl ApiError {
	/// Maps a failed search to its response. Error details are shown only in development.
	fn search(err: ServiceError, cfg: &Config) -> Self {
		match err {
			ServiceError::InvalidRequest { message } => Self {
				status: StatusCode::BAD_REQUEST,
				message,
				example: Some(EMPTY_QUERY_EXAMPLE.to_string()),
				error: None,
			},
			other => {
				let detail = if cfg.service.exposes_error_details() {
					other.to_string()
				} else {
					HIDDEN_ERROR_DETAIL.to_string()
				};

				Self {
					status: StatusCode::INTERNAL_SERVER_ERROR,
					message: apology(cfg),
					example: None,
					error: Some(detail),
				}
			},
		}
	}

	/// A query string that does not decode (a repeated `msg`, for one) reads as a missing message.
	fn malformed_query(rejection: QueryRejection) -> Self {
		tracing::warn!(error = %rejection.body_text(), "Rejected chat query string.");

		Self {
			status: StatusCode::BAD_REQUEST,
			message: EMPTY_QUERY_MESSAGE.to_string(),
			example: Some(EMPTY_QUERY_EXAMPLE.to_string()),
			error: None,
		}
	}

	fn filter_options() -> Self {
		Self {
			status: StatusCode::INTERNAL_SERVER_ERROR,
			message: FILTER_OPTIONS_FAILURE.to_string(),
			example: None,
			error: None,
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody {
			success: false,
			message: self.message,
			example: self.example,
			error: self.error,
		};

		(self.status, Json(body)).into_response()
	}
}

fn apology(cfg: &Config) -> String {
	format!(
		"Hi! I'm {} from {}. I'm experiencing some technical difficulties, but I'm here to help you \
		 find your perfect property. Please try again!",
		cfg.assistant.persona, cfg.assistant.site
	)
}
