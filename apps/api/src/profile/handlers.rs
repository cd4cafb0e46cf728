//! Axum route handlers for profile and onboarding.

use std::time::Duration;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::insights::service::InsightService;
use crate::profile::models::{ProfileChanges, ProfileUpdateRequest, UserProfile};
use crate::profile::store::ProfileStore;
use crate::state::AppState;

/// Upper bound for the whole profile update, insight generation included.
pub const PROFILE_UPDATE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub is_onboarded: bool,
}

/// GET /api/v1/users/me
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .profiles
        .find_by_external_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(profile))
}

/// GET /api/v1/onboarding/status
pub async fn handle_onboarding_status(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<OnboardingStatus>, AppError> {
    let profile = state
        .profiles
        .find_by_external_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(OnboardingStatus {
        is_onboarded: profile.is_onboarded(),
    }))
}

/// PUT /api/v1/users/me/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = update_profile(
        &state.insights,
        state.profiles.as_ref(),
        &user_id,
        req,
        Utc::now(),
    )
    .await?;
    Ok(Json(profile))
}

/// Makes sure the new industry has an insight, then writes the profile.
/// Bounded by `PROFILE_UPDATE_TIMEOUT`.
pub async fn update_profile(
    insights: &InsightService,
    profiles: &dyn ProfileStore,
    user_id: &str,
    req: ProfileUpdateRequest,
    now: DateTime<Utc>,
) -> Result<UserProfile, AppError> {
    let changes = req.into_changes()?;

    tokio::time::timeout(
        PROFILE_UPDATE_TIMEOUT,
        apply_profile_changes(insights, profiles, user_id, &changes, now),
    )
    .await
    .map_err(|_| {
        AppError::Timeout(format!(
            "Profile update did not finish within {}s",
            PROFILE_UPDATE_TIMEOUT.as_secs()
        ))
    })?
}

async fn apply_profile_changes(
    insights: &InsightService,
    profiles: &dyn ProfileStore,
    user_id: &str,
    changes: &ProfileChanges,
    now: DateTime<Utc>,
) -> Result<UserProfile, AppError> {
    if profiles.find_by_external_id(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    insights.get_or_refresh(&changes.industry, now).await?;
    let updated = profiles.update_profile(user_id, changes).await?;
    info!("Updated profile for {user_id}: industry={}", changes.industry);
    Ok(updated)
}
