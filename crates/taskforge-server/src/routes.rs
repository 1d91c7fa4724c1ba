//! Axum routes for the generation endpoint.

use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::instrument;

use taskforge_core::types::Task;

/// Body of `POST /api/generate-tasks`.
///
/// Both fields tolerate being missing or JSON `null`; either way the
/// request routes through the generator's fallback policy rather than a
/// validation error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateTasksRequest {
    /// User-chosen project name. Not embedded in generated tasks.
    pub project_name: Option<String>,
    /// Template key selecting the follow-on catalog entry.
    pub template: Option<String>,
}

/// Response of `POST /api/generate-tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTasksResponse {
    /// The generated checklist, in order.
    pub tasks: Vec<Task>,
}

/// Build the application router.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/api/generate-tasks", post(generate_tasks))
        .layer(CorsLayer::permissive())
}

#[instrument(skip(request))]
async fn generate_tasks(Json(request): Json<GenerateTasksRequest>) -> Json<GenerateTasksResponse> {
    let project_name = request.project_name.unwrap_or_default();
    let template = request.template.unwrap_or_default();
    Json(GenerateTasksResponse {
        tasks: taskforge_core::generate(&project_name, &template),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    async fn post_generate(body: &str) -> (StatusCode, serde_json::Value) {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/generate-tasks")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn generates_seven_tasks_for_e_commerce() {
        let (status, body) =
            post_generate(r#"{"projectName": "Shop", "template": "e-commerce"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let tasks = body["tasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 7);
        assert_eq!(tasks[3]["id"], "4");
        assert_eq!(tasks[3]["description"], "Design database schema");
        assert_eq!(tasks[3]["priority"], "high");
        assert_eq!(tasks[3]["submodule"], "Database");
    }

    #[tokio::test]
    async fn tasks_use_wire_field_names() {
        let (_, body) = post_generate(r#"{"projectName": "P", "template": "ai"}"#).await;

        let first = &body["tasks"][0];
        assert_eq!(first["assignedTo"], "Developer");
        assert_eq!(first["status"], "pending");
        assert!(first.get("subtasks").is_none());
    }

    #[tokio::test]
    async fn missing_fields_fall_back_instead_of_erroring() {
        let (status, body) = post_generate("{}").await;

        assert_eq!(status, StatusCode::OK);
        let tasks = body["tasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 7);
        // Fallback catalog: "other"
        assert_eq!(tasks[3]["description"], "Define project requirements");
    }

    #[tokio::test]
    async fn null_fields_fall_back_instead_of_erroring() {
        let (status, body) =
            post_generate(r#"{"projectName": "P", "template": null}"#).await;

        assert_eq!(status, StatusCode::OK);
        let tasks = body["tasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 7);
        assert_eq!(tasks[3]["description"], "Define project requirements");
    }

    #[tokio::test]
    async fn unknown_template_matches_other() {
        let (_, unknown) = post_generate(r#"{"projectName": "P", "template": "mobile"}"#).await;
        let (_, other) = post_generate(r#"{"projectName": "P", "template": "other"}"#).await;
        assert_eq!(unknown["tasks"], other["tasks"]);
    }
}
