use crate::api::ErrorResponse;
use crate::media::MediaError;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadImageResponse {
    pub success: bool,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub message: String,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageRequest {
    /// The image file, in a multipart field named `image`
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/upload-image",
    tag = "images",
    request_body(content_type = "multipart/form-data", content = UploadImageRequest),
    responses(
        (status = 200, description = "Image stored, URL usable as-is in image_url", body = UploadImageResponse),
        (status = 400, description = "No file, wrong type, or oversize", body = ErrorResponse),
        (status = 500, description = "Filesystem failure", body = ErrorResponse)
    )
)]
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Find the `image` field; other fields are drained and ignored.
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("image") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "Aucune image fournie".to_string(),
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                tracing::warn!("Multipart read error: {}", e);
                let error = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    "L'image est trop volumineuse (maximum 5 Mo)".to_string()
                } else {
                    format!("Failed to read multipart data: {}", e.body_text())
                };
                return (e.status(), Json(ErrorResponse { error })).into_response();
            }
        }
    };

    let original_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);

    let data = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Field read error: {}", e);
            let error = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                "L'image est trop volumineuse (maximum 5 Mo)".to_string()
            } else {
                format!("Failed to read file data: {}", e.body_text())
            };
            return (e.status(), Json(ErrorResponse { error })).into_response();
        }
    };

    match state
        .media
        .save(&data, original_name.as_deref(), content_type.as_deref())
        .await
    {
        Ok(image_url) => (
            StatusCode::OK,
            Json(UploadImageResponse {
                success: true,
                image_url,
                message: "Image uploadée avec succès".to_string(),
            }),
        )
            .into_response(),
        Err(MediaError::Validation(message)) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to store uploaded image: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Erreur lors de l'upload de l'image".to_string(),
                }),
            )
                .into_response()
        }
    }
}
