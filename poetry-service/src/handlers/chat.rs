use crate::models::{ChatRequest, ChatResponse};
use crate::services::ChatError;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use service_core::middleware::tracing::RequestId;

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(
                request_id = request_id.as_ref().map(|Extension(id)| id.0.as_str()),
                error = %rejection,
                "Unreadable chat request body"
            );
            ChatRequest::default()
        }
    };

    let response = state.gateway.answer(request.query.as_deref()).await?;
    Ok(Json(response))
}
