use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of entries every list in an insight payload must contain.
pub const INSIGHT_LIST_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketOutlook {
    Positive,
    Neutral,
    Negative,
}

impl DemandLevel {
    pub const ALL: [DemandLevel; 3] = [DemandLevel::High, DemandLevel::Medium, DemandLevel::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            DemandLevel::High => "High",
            DemandLevel::Medium => "Medium",
            DemandLevel::Low => "Low",
        }
    }
}

impl MarketOutlook {
    pub const ALL: [MarketOutlook; 3] = [
        MarketOutlook::Positive,
        MarketOutlook::Neutral,
        MarketOutlook::Negative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketOutlook::Positive => "Positive",
            MarketOutlook::Neutral => "Neutral",
            MarketOutlook::Negative => "Negative",
        }
    }
}

/// Unknown literal for one of the closed insight enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLiteral {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.field, self.value)
    }
}

impl std::error::Error for UnknownLiteral {}

// Exact, case-sensitive match against the literal the model is told to emit.
impl FromStr for DemandLevel {
    type Err = UnknownLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownLiteral {
                field: "demandLevel",
                value: s.to_string(),
            })
    }
}

impl FromStr for MarketOutlook {
    type Err = UnknownLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownLiteral {
                field: "marketOutlook",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub location: String,
}

/// The model-produced part of an insight, decoded only after validation succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPayload {
    pub salary_ranges: Vec<SalaryRange>,
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub top_skills: Vec<String>,
    pub market_outlook: MarketOutlook,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
}

/// A cached insight row: one per industry key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryInsight {
    pub id: Uuid,
    pub industry: String,
    #[serde(flatten)]
    pub payload: InsightPayload,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

impl IndustryInsight {
    /// Builds a fresh row stamped at `now` that expires after `ttl`.
    pub fn new(industry: &str, payload: InsightPayload, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            industry: industry.to_string(),
            payload,
            last_updated: now,
            next_update: now + ttl,
        }
    }

    /// Replaces the insight fields and restamps the timestamps, keeping identity.
    pub fn refreshed(self, payload: InsightPayload, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            payload,
            last_updated: now,
            next_update: now + ttl,
            ..self
        }
    }

    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_update
    }
}
