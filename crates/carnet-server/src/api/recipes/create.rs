use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::RecetteDraft;
use crate::store::{self, StoreError};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecetteResponse {
    pub id: i32,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecetteDraft,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecetteResponse),
        (status = 400, description = "Missing title/category or invalid category", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_recette(
    State(state): State<AppState>,
    Json(draft): Json<RecetteDraft>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    match store::create(&mut conn, &draft) {
        Ok(id) => (
            StatusCode::CREATED,
            Json(CreateRecetteResponse {
                id,
                message: "Recette créée avec succès".to_string(),
            }),
        )
            .into_response(),
        Err(StoreError::Validation(message)) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
