use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::RecetteDraft;
use crate::store::{self, StoreError};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpdateRecetteResponse {
    pub message: String,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = RecetteDraft,
    responses(
        (status = 200, description = "Recipe replaced successfully", body = UpdateRecetteResponse),
        (status = 400, description = "Missing title/category or invalid category", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn update_recette(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(draft): Json<RecetteDraft>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    match store::update(&mut conn, id, &draft) {
        Ok(()) => (
            StatusCode::OK,
            Json(UpdateRecetteResponse {
                message: "Recette modifiée avec succès".to_string(),
            }),
        )
            .into_response(),
        Err(StoreError::Validation(message)) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
        }
        Err(StoreError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recette non trouvée".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update recipe {}: {}", id, e);
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
