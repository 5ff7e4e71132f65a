use std::env;

use axum::extract::{DefaultBodyLimit, MatchedPath};
use axum::http::Request;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

use carnet_server::{api, config::Config, db, media::MediaStore, telemetry, ui, AppState};

/// Request bodies are JSON or multipart; the image ceiling is 5 MiB, so
/// 10 MiB leaves room for multipart framing and the JSON payloads.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json().expect("spec serializes");
        println!("{}", spec);
        return;
    }

    telemetry::init();

    let config = Config::from_env();

    let pool = db::create_pool(&config.database_url);
    let media = MediaStore::new(&config.media_root).expect("Failed to create uploads directory");

    let state = AppState { pool, media };

    let app = Router::new()
        .merge(ui::router())
        .nest("/api/recipes", api::recipes::router())
        .merge(api::images::router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi()))
        .nest_service("/media/uploads", ServeDir::new(&config.media_root))
        .fallback(api::fallback)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                ),
        );

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("Failed to bind server port");

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());
    tracing::info!("SQLite database: {}", config.database_url);
    tracing::info!("Uploads directory: {}", config.media_root.display());
    tracing::info!("Swagger UI available at /swagger-ui/");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Dropping the last pool handle closes the SQLite connections.
    tracing::info!("Database closed, bye");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, draining requests");
}
