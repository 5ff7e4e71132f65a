use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::Recette;
use crate::store::{self, RecetteFilter};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecettesParams {
    /// Category filter; `all` (or absent) means no restriction
    pub categorie: Option<String>,
    /// Substring match on title or description
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecettesParams),
    responses(
        (status = 200, description = "All recipes matching the filter, newest first", body = [Recette]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_recettes(
    State(state): State<AppState>,
    Query(params): Query<ListRecettesParams>,
) -> impl IntoResponse {
    let filter = RecetteFilter {
        categorie: params.categorie.filter(|c| c != "all"),
        search: params.search.filter(|s| !s.is_empty()),
    };

    let mut conn = get_conn!(state.pool);

    match store::list(&mut conn, &filter) {
        Ok(recettes) => (StatusCode::OK, Json(recettes)).into_response(),
        Err(e) => {
            tracing::error!("Failed to list recipes: {}", e);
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
