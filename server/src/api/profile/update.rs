use crate::api::{error_response, ErrorResponse};
use crate::store::UserProfile;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profile",
    request_body = UserProfile,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> impl IntoResponse {
    if !(4..=5).contains(&profile.default_dinners_per_week) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "default_dinners_per_week must be 4 or 5",
        );
    }

    state.store.set_profile(profile.clone()).await;
    (StatusCode::OK, Json(profile)).into_response()
}
