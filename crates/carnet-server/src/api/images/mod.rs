pub mod delete;
pub mod upload;

use crate::AppState;
use axum::routing::{delete as delete_route, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the image endpoints (mounted at the API root;
/// the upload routes are top-level, not under /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/upload-image", post(upload::upload_image))
        .route("/api/delete-image", delete_route(delete::delete_image))
}

#[derive(OpenApi)]
#[openapi(
    paths(upload::upload_image, delete::delete_image),
    components(schemas(
        upload::UploadImageRequest,
        upload::UploadImageResponse,
        delete::DeleteImageRequest,
        delete::DeleteImageResponse,
    ))
)]
pub struct ApiDoc;
