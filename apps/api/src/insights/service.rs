//! Read-through cache policy for industry insights.
//!
//! Absent rows are generated and created, stale rows are regenerated and
//! updated in place, fresh rows are returned untouched. Staleness is decided
//! only at read time by comparing `now` with `next_update`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::insights::generator::InsightGenerator;
use crate::insights::models::IndustryInsight;
use crate::insights::store::InsightStore;
use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Absent,
    Fresh,
    Stale,
}

impl Freshness {
    pub fn of(existing: Option<&IndustryInsight>, now: DateTime<Utc>) -> Self {
        match existing {
            None => Freshness::Absent,
            Some(insight) if insight.is_stale(now) => Freshness::Stale,
            Some(_) => Freshness::Fresh,
        }
    }
}

#[derive(Clone)]
pub struct InsightService {
    generator: InsightGenerator,
    store: Arc<dyn InsightStore>,
    ttl: chrono::Duration,
}

impl InsightService {
    pub fn new(
        generator: InsightGenerator,
        store: Arc<dyn InsightStore>,
        ttl: Duration,
    ) -> Result<Self, AppError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Insight TTL out of range: {e}")))?;
        Ok(Self {
            generator,
            store,
            ttl,
        })
    }

    /// Returns the cached insight for `industry`, generating or refreshing it as needed.
    pub async fn get_or_refresh(
        &self,
        industry: &str,
        now: DateTime<Utc>,
    ) -> Result<IndustryInsight, AppError> {
        let existing = self.store.find_by_industry(industry).await?;

        match (Freshness::of(existing.as_ref(), now), existing) {
            (Freshness::Stale, Some(current)) => {
                info!(
                    "Insights for '{industry}' expired at {}, regenerating",
                    current.next_update
                );
                let payload = self.generator.generate(industry).await?;
                let refreshed = current.refreshed(payload, now, self.ttl);
                Ok(self.store.update(&refreshed).await?)
            }
            (Freshness::Fresh, Some(current)) => Ok(current),
            _ => {
                info!("No insights cached for '{industry}', generating");
                let payload = self.generator.generate(industry).await?;
                let created = IndustryInsight::new(industry, payload, now, self.ttl);
                self.create_or_reread(created).await
            }
        }
    }

    /// Two requests can both see an absent row; the loser of the insert race
    /// re-reads and returns the winner's row.
    async fn create_or_reread(&self, insight: IndustryInsight) -> Result<IndustryInsight, AppError> {
        match self.store.create(&insight).await {
            Ok(created) => Ok(created),
            Err(StoreError::AlreadyExists(entity)) => {
                warn!(
                    "Insights for '{}' were created concurrently, using the stored row",
                    insight.industry
                );
                self.store
                    .find_by_industry(&insight.industry)
                    .await?
                    .ok_or(StoreError::AlreadyExists(entity))
                    .map_err(AppError::from)
            }
            Err(e) => Err(e.into()),
        }
    }
}
