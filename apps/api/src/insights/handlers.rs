//! Axum route handlers for the Insights API.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::insights::models::IndustryInsight;
use crate::profile::models::resolve_industry;
use crate::state::AppState;

/// GET /api/v1/insights
///
/// Returns the insight for the caller's industry, generating it on first use
/// and regenerating it once it has expired.
pub async fn handle_get_insights(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<IndustryInsight>, AppError> {
    let profile = state.profiles.find_by_external_id(&user_id).await?;
    let industry = resolve_industry(profile)?;
    let insight = state.insights.get_or_refresh(&industry, Utc::now()).await?;
    Ok(Json(insight))
}
