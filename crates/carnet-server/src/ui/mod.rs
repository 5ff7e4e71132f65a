//! The browser application, modeled as plain data: one owned state struct
//! ([`state::App`]), field validation separate from markup, and render
//! functions from typed view-models to HTML. The DOM wiring around it is
//! thin and lives outside this crate; `GET /` serves the shell rendered
//! from a fresh state.

pub mod state;
pub mod validate;
pub mod view;

use crate::get_conn;
use crate::store::{self, RecetteFilter};
use crate::AppState;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Serves the application shell with the full recipe list pre-rendered.
/// A store failure renders the grid's inline error state instead.
async fn index(State(app_state): State<AppState>) -> impl IntoResponse {
    let mut app = state::App::new();

    let mut conn = get_conn!(app_state.pool);
    let result = store::list(&mut conn, &RecetteFilter::default());
    drop(conn);

    app.apply_list(result.map_err(|e| e.to_string()));

    Html(view::render_shell(&app)).into_response()
}
