pub mod health;

use axum::{
    routing::{get, put},
    Router,
};

use crate::insights::handlers as insights;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Insights API
        .route("/api/v1/insights", get(insights::handle_get_insights))
        // Profile / onboarding API
        .route("/api/v1/users/me", get(profile::handle_get_profile))
        .route(
            "/api/v1/users/me/profile",
            put(profile::handle_update_profile),
        )
        .route(
            "/api/v1/onboarding/status",
            get(profile::handle_onboarding_status),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::USER_ID_HEADER;
    use crate::insights::generator::{InsightGenerator, RetryPolicy};
    use crate::insights::models::fixtures::valid_payload_json;
    use crate::insights::service::InsightService;
    use crate::insights::testing::{MemoryInsightStore, ScriptedModel};
    use crate::profile::testing::{profile, MemoryProfileStore};

    fn app(replies: Vec<String>, profiles: MemoryProfileStore) -> (Router, Arc<ScriptedModel>) {
        let model = Arc::new(ScriptedModel::new(replies.into_iter().map(Ok).collect()));
        let insights = InsightService::new(
            InsightGenerator::new(model.clone(), RetryPolicy::default()),
            Arc::new(MemoryInsightStore::default()),
            Duration::from_secs(3600),
        )
        .unwrap();
        let state = AppState {
            insights,
            profiles: Arc::new(profiles),
        };
        (build_router(state), model)
    }

    fn get_as(uri: &str, user: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(user) = user {
            builder = builder.header(USER_ID_HEADER, user);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app(vec![], MemoryProfileStore::default());
        let response = app.oneshot(get_as("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_insights_require_identity() {
        let (app, model) = app(vec![], MemoryProfileStore::default());
        let response = app.oneshot(get_as("/api/v1/insights", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"]["code"], "UNAUTHORIZED");
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_insights_for_unknown_user() {
        let (app, model) = app(vec![], MemoryProfileStore::default());
        let response = app
            .oneshot(get_as("/api/v1/insights", Some("user_x")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_insights_for_user_without_industry() {
        let profiles = MemoryProfileStore::with_users(vec![profile("user_1", None)]);
        let (app, model) = app(vec![], profiles);
        let response = app
            .oneshot(get_as("/api/v1/insights", Some("user_1")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"]["code"], "PROFILE_INCOMPLETE");
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_insights_generated_once_then_served_from_cache() {
        let profiles = MemoryProfileStore::with_users(vec![profile(
            "user_1",
            Some("tech-software-development"),
        )]);
        let (app, model) = app(vec![valid_payload_json().to_string()], profiles);

        let first = app
            .clone()
            .oneshot(get_as("/api/v1/insights", Some("user_1")))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let first = body_json(first).await;
        assert_eq!(first["industry"], "tech-software-development");
        assert_eq!(first["demandLevel"], "High");
        assert_eq!(first["topSkills"].as_array().unwrap().len(), 5);

        let second = app
            .oneshot(get_as("/api/v1/insights", Some("user_1")))
            .await
            .unwrap();
        assert_eq!(body_json(second).await, first);
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_onboarding_status_and_profile_update() {
        let profiles = MemoryProfileStore::with_users(vec![profile("user_1", None)]);
        let (app, _) = app(vec![valid_payload_json().to_string()], profiles);

        let status = app
            .clone()
            .oneshot(get_as("/api/v1/onboarding/status", Some("user_1")))
            .await
            .unwrap();
        assert_eq!(body_json(status).await, json!({"isOnboarded": false}));

        let update = Request::builder()
            .method("PUT")
            .uri("/api/v1/users/me/profile")
            .header(USER_ID_HEADER, "user_1")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "industry": "tech",
                    "specialization": "Software Development",
                    "experience": 5,
                    "skills": ["Rust", "Go"]
                })
                .to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(update).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["industry"], "tech-software-development");
        assert_eq!(body["experience"], 5);

        let status = app
            .oneshot(get_as("/api/v1/onboarding/status", Some("user_1")))
            .await
            .unwrap();
        assert_eq!(body_json(status).await, json!({"isOnboarded": true}));
    }
}
