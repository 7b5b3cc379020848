pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::planning::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Planning API
        .route("/api/v1/modules/plan", post(handlers::handle_plan_module))
        .route("/api/v1/programs/plan", post(handlers::handle_plan_program))
        .route(
            "/api/v1/lessons/verify-progression",
            post(handlers::handle_verify_progression),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    fn test_router() -> Router {
        build_router(AppState {
            config: Config {
                port: 0,
                environment: "test".to_string(),
                rust_log: "info".to_string(),
            },
        })
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(value) => Body::from(value.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn module_body(id: &str, hours: f64) -> Value {
        json!({
            "id": id,
            "title": "Operations Strategy",
            "contact_hours": hours,
            "mlos": [
                {"id": "mlo-1", "statement": "Recall core terms", "complexity_level": "Remember"},
                {"id": "mlo-2", "statement": "Evaluate trade-offs", "complexity_level": "evaluate"},
                {"id": "mlo-3", "statement": "Apply models", "complexity_level": "apply"}
            ]
        })
    }

    #[tokio::test]
    async fn test_health_reports_environment() {
        let (status, body) = send(test_router(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["environment"], "test");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_not_found() {
        let (status, body) = send(test_router(), "GET", "/api/v1/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_plan_module_end_to_end() {
        let request = json!({
            "module": module_body("ops-101", 4.5),
            "case_studies": [
                {"id": "cs-1", "title": "Port congestion", "difficulty_label": "Basic",
                 "outcome_tags": ["mlo-1"], "is_role_play_suitable": true}
            ],
            "assessments": [
                {"id": "q-1", "module_id": "ops-101", "outcome_tags": ["mlo-2"],
                 "type": "Multiple Choice", "duration": 100,
                 "options": ["A", "B"], "correct_answer": "A"},
                {"id": "q-2", "module_id": "ops-101", "linked_mlos": ["mlo-1"], "type": "poll"}
            ]
        });

        let (status, body) = send(test_router(), "POST", "/api/v1/modules/plan", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["module_id"], "ops-101");
        assert_eq!(body["total_minutes"], 270);
        assert_eq!(body["progression_verified"], true);

        let lessons = body["lessons"].as_array().unwrap();
        assert_eq!(lessons.len(), 3);
        let total: u64 = lessons.iter().map(|l| l["duration"].as_u64().unwrap()).sum();
        assert_eq!(total, 270);
        assert_eq!(lessons[0]["lesson_number"], 1);
        assert_eq!(lessons[0]["complexity_level"], "remember");
        assert_eq!(lessons[0]["case_study_activity"]["case_study_id"], "cs-1");
        assert_eq!(lessons[0]["formative_checks"][0]["type"], "quick_poll");
        assert_eq!(lessons[2]["complexity_level"], "evaluate");
        assert_eq!(lessons[2]["formative_checks"][0]["duration"], 15);
        assert_eq!(lessons[2]["formative_checks"][0]["type"], "mcq");
    }

    #[tokio::test]
    async fn test_plan_module_rejects_zero_hours() {
        let request = json!({ "module": module_body("ops-101", 0.0) });
        let (status, body) = send(test_router(), "POST", "/api/v1/modules/plan", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_plan_module_rejects_oversized_hours() {
        let request = json!({ "module": module_body("ops-101", 1.0e7) });
        let (status, body) = send(test_router(), "POST", "/api/v1/modules/plan", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("must not exceed"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let request = json!({ "module": { "id": "m1" } });
        let (status, body) = send(test_router(), "POST", "/api/v1/modules/plan", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_plan_program_tracks_first_appearances() {
        let request = json!({
            "modules": [module_body("m1", 3.0), module_body("m2", 3.0)],
            "case_studies": [
                {"id": "cs-shared", "title": "Shared", "difficulty_label": "moderate",
                 "outcome_tags": ["mlo-1"]}
            ]
        });

        let (status, body) = send(test_router(), "POST", "/api/v1/programs/plan", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["run_id"].is_string());
        assert_eq!(body["modules"].as_array().unwrap().len(), 2);
        assert_eq!(body["case_study_first_appearances"]["cs-shared"], "m1");
        let appearance = &body["modules"][1]["lessons"][0]["case_study_activity"]["appearance"];
        assert_eq!(appearance["kind"], "continuation");
        assert_eq!(appearance["first_module_id"], "m1");
    }

    #[tokio::test]
    async fn test_plan_program_rejects_duplicate_modules() {
        let request = json!({ "modules": [module_body("m1", 3.0), module_body("m1", 3.0)] });
        let (status, body) = send(test_router(), "POST", "/api/v1/programs/plan", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("duplicate"));
    }

    #[tokio::test]
    async fn test_verify_progression_flags_regression() {
        let lesson = |n: u32, level: &str| {
            json!({
                "lesson_number": n,
                "duration": 90,
                "assigned_outcomes": [{"id": format!("o{n}"), "complexity_level": level}],
                "complexity_level": level
            })
        };
        let request = json!({ "lessons": [lesson(1, "analyze"), lesson(2, "apply")] });

        let (status, body) =
            send(test_router(), "POST", "/api/v1/lessons/verify-progression", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verified"], false);
        assert_eq!(body["lesson_count"], 2);
    }
}
