pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/resume", post(handlers::handle_set_resume))
        .route("/resume-file", post(handlers::handle_set_resume_file))
        .route("/save-location", post(handlers::handle_set_save_location))
        .route("/generate-cover-letter", post(handlers::handle_generate))
        .route("/status", get(handlers::handle_status))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::generation::pipeline::CoverLetterPipeline;
    use crate::render::LopdfWriter;
    use crate::session::SessionState;
    use crate::test_support::ScriptedLlm;

    fn app(llm: ScriptedLlm) -> Router {
        let pipeline = CoverLetterPipeline::new(
            Arc::new(SessionState::new()),
            Arc::new(llm),
            Arc::new(LopdfWriter::default()),
        );
        build_router(AppState { pipeline })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn multipart_upload(filename: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--XBOUNDARY\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {content}\r\n\
             --XBOUNDARY--\r\n"
        );
        Request::post("/resume-file")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(ScriptedLlm::new(vec![])), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_full_flow_over_http() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(ScriptedLlm::google());

        let (status, body) = send(
            &app,
            post_json(
                "/resume",
                json!({"content": "Experienced backend engineer, 5 years Python."}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["length"], 45);

        let (status, body) = send(
            &app,
            post_json(
                "/save-location",
                json!({"directory_path": dir.path().to_str().unwrap()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);

        let (status, body) = send(&app, get("/status")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume_set"], true);
        assert!(body["save_location"].is_string());

        let (status, body) = send(
            &app,
            post_json(
                "/generate-cover-letter",
                json!({"content": "Software Engineer role at Google, job ID 12345."}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["success"], true);
        assert_eq!(body["filename"], "Google_SWE_12345.pdf");
        assert_eq!(body["company_name"], "Google");
        assert_eq!(body["job_id"], "12345");
        assert!(body["file_path"]
            .as_str()
            .unwrap()
            .ends_with("Google_SWE_12345.pdf"));
    }

    #[tokio::test]
    async fn test_generate_without_resume_is_bad_request() {
        let app = app(ScriptedLlm::google());
        let (status, body) = send(
            &app,
            post_json("/generate-cover-letter", json!({"content": "Role at Google"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error_code"], "NO_RESUME_SET");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_save_location_reports_error() {
        let app = app(ScriptedLlm::new(vec![]));
        let (status, body) = send(
            &app,
            post_json("/save-location", json!({"directory_path": "/nonexistent/path"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert!(body["error"].as_str().unwrap().contains("does not exist"));

        let (_, body) = send(&app, get("/status")).await;
        assert_eq!(body["save_location"], Value::Null);
    }

    #[tokio::test]
    async fn test_blank_resume_is_validation_error() {
        let app = app(ScriptedLlm::new(vec![]));
        let (status, body) = send(&app, post_json("/resume", json!({"content": "  "}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_resume_file_upload_accepts_markdown() {
        let app = app(ScriptedLlm::new(vec![]));
        let (status, body) = send(&app, multipart_upload("resume.md", "# Jane Doe")).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["length"], 10);
        assert!(body["message"].as_str().unwrap().contains("resume.md"));

        let (_, body) = send(&app, get("/status")).await;
        assert_eq!(body["resume_set"], true);
    }

    #[tokio::test]
    async fn test_resume_file_upload_rejects_pdf() {
        let app = app(ScriptedLlm::new(vec![]));
        let (status, body) = send(&app, multipart_upload("resume.pdf", "%PDF-1.4")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains(".txt and .md"));

        let (_, body) = send(&app, get("/status")).await;
        assert_eq!(body["resume_set"], false);
    }
}
