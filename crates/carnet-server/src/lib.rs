pub mod api;
pub mod config;
pub mod db;
pub mod media;
pub mod models;
pub mod schema;
pub mod store;
pub mod telemetry;
pub mod ui;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: db::DbPool,
    pub media: media::MediaStore,
}

/// Grabs a pooled connection or bails out of the handler with a 500.
#[macro_export]
macro_rules! get_conn {
    ($pool:expr) => {
        match $pool.get() {
            Ok(conn) => conn,
            Err(_) => {
                return (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json($crate::api::ErrorResponse {
                        error: "Database connection failed".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    };
}
