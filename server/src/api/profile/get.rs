use crate::store::UserProfile;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Current user profile", body = UserProfile)
    )
)]
pub async fn get_profile(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.profile().await)
}
