pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recettes).post(create::create_recette))
        .route(
            "/{id}",
            get(get::get_recette)
                .put(update::update_recette)
                .delete(delete::delete_recette),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recettes,
        get::get_recette,
        create::create_recette,
        update::update_recette,
        delete::delete_recette,
    ),
    components(schemas(
        crate::models::Recette,
        crate::models::RecetteDraft,
        crate::models::Categorie,
        crate::models::Difficulte,
        create::CreateRecetteResponse,
        update::UpdateRecetteResponse,
        delete::DeleteRecetteResponse,
    ))
)]
pub struct ApiDoc;
