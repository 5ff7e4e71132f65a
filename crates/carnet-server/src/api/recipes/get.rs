use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::Recette;
use crate::store::{self, StoreError};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = Recette),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_recette(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    match store::get(&mut conn, id) {
        Ok(recette) => (StatusCode::OK, Json(recette)).into_response(),
        Err(StoreError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recette non trouvée".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch recipe {}: {}", id, e);
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
