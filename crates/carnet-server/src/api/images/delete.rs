use crate::api::ErrorResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteImageRequest {
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteImageResponse {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/api/delete-image",
    tag = "images",
    request_body = DeleteImageRequest,
    responses(
        (status = 200, description = "Image removed", body = DeleteImageResponse),
        (status = 400, description = "No URL given", body = ErrorResponse),
        (status = 500, description = "File deletion failed", body = ErrorResponse)
    )
)]
pub async fn delete_image(
    State(state): State<AppState>,
    Json(request): Json<DeleteImageRequest>,
) -> impl IntoResponse {
    let image_url = match request.image_url.filter(|u| !u.is_empty()) {
        Some(url) => url,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "URL d'image requise".to_string(),
                }),
            )
                .into_response()
        }
    };

    match state.media.delete(&image_url).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeleteImageResponse {
                success: true,
                message: "Image supprimée avec succès".to_string(),
            }),
        )
            .into_response(),
        Err(crate::media::MediaError::Validation(message)) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to delete image {}: {}", image_url, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Erreur lors de la suppression de l'image".to_string(),
                }),
            )
                .into_response()
        }
    }
}
