// In crates/web-server/src/lib.rs

use app_config::ServerSettings;
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, Json},
    routing::get,
};
use core_types::{PricePoint, Symbol};
use std::sync::Arc;
use strategies::MACrossoverSettings;
use tokio::net::TcpListener;
use types::{SignalParams, SignalReport};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

/// The shared application state that is available to all API handlers.
///
/// The price series is loaded once at startup and only ever read; the signal
/// is recomputed from it on each request.
#[derive(Clone)]
pub struct AppState {
    pub symbol: Symbol,
    pub prices: Arc<Vec<PricePoint>>,
    pub defaults: MACrossoverSettings,
}

impl AppState {
    pub fn new(symbol: Symbol, prices: Vec<PricePoint>, defaults: MACrossoverSettings) -> Self {
        Self {
            symbol,
            prices: Arc::new(prices),
            defaults,
        }
    }
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new().route("/signal", get(get_signal_handler));

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /`. Serves the chart page, which pulls its data from `/api/signal`.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(INDEX_TEMPLATE.replace("{{symbol}}", &escape_html(state.symbol.as_str())))
}

/// The handler for `GET /api/signal`.
/// Computes the crossover report, optionally with window overrides from the query.
async fn get_signal_handler(
    State(state): State<AppState>,
    Query(params): Query<SignalParams>,
) -> Result<Json<SignalReport>> {
    let settings = params.resolve(&state.defaults);
    tracing::debug!(
        short_window = settings.short_window,
        long_window = settings.long_window,
        "Computing signal report"
    );

    let report = SignalReport::build(state.symbol.clone(), &state.prices, settings)
        .inspect_err(|e| tracing::warn!(error = %e, "Rejected signal request"))?;
    Ok(Json(report))
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The main entry point for running the web server.
///
/// It will run until the process is terminated.
pub async fn run(settings: ServerSettings, app_state: AppState) -> Result<()> {
    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!("Web server listening on http://{}", address);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::ServeError)
}
