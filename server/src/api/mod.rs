pub mod meal_plans;
pub mod profile;
pub mod recipes;
pub mod tags;
pub mod testing;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use weeknight_core::{Ingredient, StoreError};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Map store failures onto HTTP statuses.
pub fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::DuplicateTitle(title) => error_response(
            StatusCode::CONFLICT,
            format!("A recipe titled \"{title}\" already exists"),
        ),
        StoreError::NotFound => error_response(StatusCode::NOT_FOUND, "Not found"),
        StoreError::Backend(e) => {
            tracing::error!("Store operation failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Storage failure")
        }
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse, Ingredient)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        testing::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        tags::ApiDoc::openapi(),
        meal_plans::ApiDoc::openapi(),
        profile::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
