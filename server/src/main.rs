mod api;
mod store;

use std::env;
use std::sync::Arc;

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa_swagger_ui::SwaggerUi;

use weeknight_core::llm::create_provider_from_env;
use weeknight_core::{Consolidator, IcsOptions, MealPlanner};

/// Application state shared across all handlers.
pub struct App {
    pub store: Arc<store::MemoryStore>,
    pub planner: MealPlanner,
    pub consolidator: Consolidator,
    pub ics: IcsOptions,
}

pub type AppState = Arc<App>;

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// AI consolidation is opt-in: without WEEKNIGHT_AI_PROVIDER the heuristic
/// path runs alone, with no provider in the loop.
fn build_consolidator() -> Consolidator {
    if env::var("WEEKNIGHT_AI_PROVIDER").is_err() {
        return Consolidator::new();
    }
    match create_provider_from_env() {
        Ok(provider) => {
            tracing::info!(
                provider = provider.provider_name(),
                model = provider.model_name(),
                "AI consolidation enabled"
            );
            Consolidator::with_ai(provider)
        }
        Err(e) => {
            tracing::warn!(error = %e, "AI provider misconfigured, using heuristic consolidation");
            Consolidator::new()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    init_logging();

    let store = Arc::new(store::MemoryStore::new());
    let planner = MealPlanner::new(store.clone(), store.clone());

    let ics = IcsOptions {
        domain: env::var("WEEKNIGHT_ICS_DOMAIN")
            .unwrap_or_else(|_| IcsOptions::default().domain),
    };

    let state: AppState = Arc::new(App {
        store,
        planner,
        consolidator: build_consolidator(),
        ics,
    });

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = Router::new()
        .nest("/api/recipes", api::recipes::router())
        .nest("/api/mealplans", api::meal_plans::router())
        .nest("/api/tags", api::tags::router())
        .nest("/api/profile", api::profile::router())
        .nest("/api", api::testing::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    // Don't create a span at all for noisy endpoints
                    if matched_path == "/api/ping" {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
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

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!("Swagger UI available at http://localhost:{port}/swagger-ui/");

    axum::serve(listener, app).await?;
    Ok(())
}
