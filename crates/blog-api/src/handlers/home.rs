//! Homepage handler

use axum::{extract::State, Json};
use blog_service::{dto::HomepageResponse, HomepageService};

use crate::response::{ApiResult, FailureMessage};
use crate::state::AppState;

/// Courses, popular blogs and popular videos in one payload
///
/// GET /
pub async fn get_homepage(State(state): State<AppState>) -> ApiResult<Json<HomepageResponse>> {
    let homepage = HomepageService::new(state.service_context())
        .get()
        .await
        .or_fail("Internal error!")?;
    Ok(Json(homepage))
}
