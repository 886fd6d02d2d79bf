use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagCount {
    pub tag: String,
    /// How many recipes carry this tag.
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagsResponse {
    pub tags: Vec<TagCount>,
}

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    responses(
        (status = 200, description = "Distinct tags with usage counts", body = TagsResponse)
    )
)]
pub async fn list_tags(State(state): State<AppState>) -> impl IntoResponse {
    let tags = state
        .store
        .tag_counts()
        .await
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect();

    Json(TagsResponse { tags })
}
