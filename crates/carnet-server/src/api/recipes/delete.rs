use crate::api::ErrorResponse;
use crate::get_conn;
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
pub struct DeleteRecetteResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted successfully", body = DeleteRecetteResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_recette(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let image_url = {
        let mut conn = get_conn!(state.pool);

        match store::delete(&mut conn, id) {
            Ok(image_url) => image_url,
            Err(StoreError::NotFound) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: "Recette non trouvée".to_string(),
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                tracing::error!("Failed to delete recipe {}: {}", id, e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                )
                    .into_response();
            }
        }
    };

    // Best-effort cleanup: the row is gone, a leftover file never fails
    // the request.
    if let Some(url) = image_url {
        if let Err(e) = state.media.delete(&url).await {
            tracing::warn!("Failed to remove image {}: {}", url, e);
        }
    }

    (
        StatusCode::OK,
        Json(DeleteRecetteResponse {
            message: "Recette supprimée avec succès".to_string(),
        }),
    )
        .into_response()
}
