//! Persistence for cached industry insights. Postgres is the only backend;
//! the trait exists so the refresh policy can be exercised without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::insights::models::{IndustryInsight, InsightPayload, SalaryRange};
use crate::store::StoreError;

const ENTITY: &str = "Industry insight";

#[async_trait]
pub trait InsightStore: Send + Sync {
    async fn find_by_industry(&self, industry: &str) -> Result<Option<IndustryInsight>, StoreError>;

    /// Inserts a new row. Fails with `AlreadyExists` if the industry already has one.
    async fn create(&self, insight: &IndustryInsight) -> Result<IndustryInsight, StoreError>;

    /// Overwrites insight fields and timestamps of the row with the same industry.
    async fn update(&self, insight: &IndustryInsight) -> Result<IndustryInsight, StoreError>;
}

#[derive(Debug, FromRow)]
struct IndustryInsightRow {
    id: Uuid,
    industry: String,
    salary_ranges: Json<Vec<SalaryRange>>,
    growth_rate: f64,
    demand_level: String,
    top_skills: Vec<String>,
    market_outlook: String,
    key_trends: Vec<String>,
    recommended_skills: Vec<String>,
    last_updated: DateTime<Utc>,
    next_update: DateTime<Utc>,
}

impl TryFrom<IndustryInsightRow> for IndustryInsight {
    type Error = StoreError;

    fn try_from(row: IndustryInsightRow) -> Result<Self, Self::Error> {
        let corrupt = |e: crate::insights::models::UnknownLiteral| {
            StoreError::Corrupt(format!("industry_insights '{}': {e}", row.industry))
        };
        let demand_level = row.demand_level.parse().map_err(corrupt)?;
        let market_outlook = row.market_outlook.parse().map_err(corrupt)?;
        Ok(IndustryInsight {
            id: row.id,
            payload: InsightPayload {
                salary_ranges: row.salary_ranges.0,
                growth_rate: row.growth_rate,
                demand_level,
                top_skills: row.top_skills,
                market_outlook,
                key_trends: row.key_trends,
                recommended_skills: row.recommended_skills,
            },
            industry: row.industry,
            last_updated: row.last_updated,
            next_update: row.next_update,
        })
    }
}

pub struct PgInsightStore {
    pool: PgPool,
}

impl PgInsightStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsightStore for PgInsightStore {
    async fn find_by_industry(&self, industry: &str) -> Result<Option<IndustryInsight>, StoreError> {
        let row: Option<IndustryInsightRow> =
            sqlx::query_as("SELECT * FROM industry_insights WHERE industry = $1")
                .bind(industry)
                .fetch_optional(&self.pool)
                .await?;
        row.map(IndustryInsight::try_from).transpose()
    }

    async fn create(&self, insight: &IndustryInsight) -> Result<IndustryInsight, StoreError> {
        let p = &insight.payload;
        let row: IndustryInsightRow = sqlx::query_as(
            r#"
            INSERT INTO industry_insights
                (id, industry, salary_ranges, growth_rate, demand_level, top_skills,
                 market_outlook, key_trends, recommended_skills, last_updated, next_update)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(insight.id)
        .bind(&insight.industry)
        .bind(Json(&p.salary_ranges))
        .bind(p.growth_rate)
        .bind(p.demand_level.as_str())
        .bind(&p.top_skills)
        .bind(p.market_outlook.as_str())
        .bind(&p.key_trends)
        .bind(&p.recommended_skills)
        .bind(insight.last_updated)
        .bind(insight.next_update)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::on_insert(ENTITY, e))?;
        row.try_into()
    }

    async fn update(&self, insight: &IndustryInsight) -> Result<IndustryInsight, StoreError> {
        let p = &insight.payload;
        let row: Option<IndustryInsightRow> = sqlx::query_as(
            r#"
            UPDATE industry_insights
            SET salary_ranges = $2, growth_rate = $3, demand_level = $4, top_skills = $5,
                market_outlook = $6, key_trends = $7, recommended_skills = $8,
                last_updated = $9, next_update = $10
            WHERE industry = $1
            RETURNING *
            "#,
        )
        .bind(&insight.industry)
        .bind(Json(&p.salary_ranges))
        .bind(p.growth_rate)
        .bind(p.demand_level.as_str())
        .bind(&p.top_skills)
        .bind(p.market_outlook.as_str())
        .bind(&p.key_trends)
        .bind(&p.recommended_skills)
        .bind(insight.last_updated)
        .bind(insight.next_update)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or_else(|| StoreError::NotFound(ENTITY.to_string()))?
            .try_into()
    }
}
