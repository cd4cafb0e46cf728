use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

const MAX_EXPERIENCE_YEARS: i32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    /// Insight key, e.g. `tech-software-development`. `None` until onboarding.
    pub industry: Option<String>,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn is_onboarded(&self) -> bool {
        self.industry.as_deref().is_some_and(|i| !i.is_empty())
    }
}

/// Body of PUT /api/v1/users/me/profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub industry: String,
    pub specialization: Option<String>,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Validated profile fields as written to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileChanges {
    pub industry: String,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
}

impl ProfileUpdateRequest {
    pub fn into_changes(self) -> Result<ProfileChanges, AppError> {
        let industry = industry_key(&self.industry, self.specialization.as_deref());
        if industry.is_empty() {
            return Err(AppError::Validation("industry is required".to_string()));
        }
        if let Some(years) = self.experience {
            if !(0..=MAX_EXPERIENCE_YEARS).contains(&years) {
                return Err(AppError::Validation(format!(
                    "experience must be between 0 and {MAX_EXPERIENCE_YEARS} years"
                )));
            }
        }
        let skills = self
            .skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(ProfileChanges {
            industry,
            experience: self.experience,
            bio: self.bio.map(|b| b.trim().to_string()).filter(|b| !b.is_empty()),
            skills,
        })
    }
}

/// Builds the insight key `"{industry}-{specialization}"`: lowercased, whitespace runs as `-`.
pub fn industry_key(industry: &str, specialization: Option<&str>) -> String {
    let slug = |s: &str| {
        s.split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    };
    let industry = slug(industry);
    match specialization.map(slug).filter(|s| !s.is_empty()) {
        Some(spec) if !industry.is_empty() => format!("{industry}-{spec}"),
        _ => industry,
    }
}

/// Precondition for insight reads: the caller must have a profile with an industry.
pub fn resolve_industry(profile: Option<UserProfile>) -> Result<String, AppError> {
    let profile = profile.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    match profile.industry {
        Some(industry) if !industry.is_empty() => Ok(industry),
        _ => Err(AppError::ProfileIncomplete(
            "Complete onboarding to choose an industry first".to_string(),
        )),
    }
}
