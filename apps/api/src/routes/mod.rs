pub mod health;
pub mod uploads;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ats::handlers::handle_score;
use crate::oracle::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Local rubric
        .route("/api/v1/score", post(handle_score))
        // Oracle-backed flows
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/generate", post(handlers::handle_generate))
        .route("/api/v1/optimize", post(handlers::handle_optimize))
        // Synthesized documents
        .route("/uploads/:filename", get(uploads::handle_download))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::test_support::RecordingOcr;
    use crate::extraction::Extractor;
    use crate::llm_client::test_support::ScriptedGenerator;
    use crate::synthesis::badges::test_support::png_badge;

    const BOUNDARY: &str = "atsforge-test-boundary";

    fn test_state(output_dir: &std::path::Path, replies: Option<Vec<&str>>) -> AppState {
        AppState {
            config: Config {
                anthropic_api_key: None,
                port: 0,
                rust_log: "debug".to_string(),
                output_dir: output_dir.to_path_buf(),
                ocr_language: "eng".to_string(),
                max_upload_bytes: 1024 * 1024,
            },
            extractor: Extractor::new(Arc::new(RecordingOcr::returning("Experience Led X"))),
            generator: replies.map(|r| {
                Arc::new(ScriptedGenerator::replying(r)) as Arc<dyn crate::llm_client::TextGenerator>
            }),
        }
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, Vec<u8>),
    }

    fn multipart(uri: &str, parts: Vec<Part>) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File(name, filename, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, value: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn resume_docx(lines: &[&str]) -> Vec<u8> {
        let mut docx = docx_rs::Docx::new();
        for line in lines {
            docx = docx.add_paragraph(
                docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*line)),
            );
        }
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), None));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["oracle_configured"], false);
    }

    #[tokio::test]
    async fn test_score_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), None));
        let response = app
            .oneshot(json_request(
                "/api/v1/score",
                json!({"resume_text": "Python SQL", "job_description": "Python SQL Docker"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["breakdown"]["keyword_points"], 26);
        assert_eq!(body["score"], body["breakdown"]["total"]);
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_score_rejects_blank_resume() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), None));
        let response = app
            .oneshot(json_request("/api/v1/score", json!({"resume_text": "  "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_without_oracle_scores_locally() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), None));
        let request = multipart(
            "/api/v1/analyze",
            vec![
                Part::File(
                    "resume",
                    "cv.docx",
                    resume_docx(&["Summary", "Experience", "Education", "Skills"]),
                ),
                Part::Text("job_description", ""),
            ],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["local"]["breakdown"]["section_points"], 20);
        assert_eq!(body["target_score"], 85);
        assert!(body["oracle"].is_null());
    }

    #[tokio::test]
    async fn test_analyze_with_oracle() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(
            dir.path(),
            Some(vec![r#"{"ats_score_estimation": 77, "missing_keywords": ["docker"]}"#]),
        ));
        let request = multipart(
            "/api/v1/analyze",
            vec![
                Part::File("resume", "cv.docx", resume_docx(&["Python SQL"])),
                Part::Text("job_description", "Python SQL Docker"),
            ],
        );
        let body = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(body["oracle"]["ats_score_estimation"], 77);
        assert_eq!(body["oracle"]["missing_keywords"], json!(["docker"]));
    }

    #[tokio::test]
    async fn test_analyze_rejects_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), None));
        let request = multipart(
            "/api/v1/analyze",
            vec![Part::File("resume", "cv.txt", b"plain text".to_vec())],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_analyze_unreadable_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), None));
        let request = multipart(
            "/api/v1/analyze",
            vec![Part::File("resume", "cv.pdf", b"not a pdf".to_vec())],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_analyze_requires_resume() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), None));
        let request = multipart("/api/v1/analyze", vec![Part::Text("job_description", "Rust")]);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_without_oracle_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), None));
        let request = multipart("/api/v1/generate", vec![Part::Text("prompt", "Rust engineer")]);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_generate_requires_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), Some(vec![])));
        let request = multipart("/api/v1/generate", vec![Part::Text("prompt", " ")]);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_writes_downloadable_docx() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(
            dir.path(),
            Some(vec![
                r#"{"status": "success", "generated_resume_text": "[H1]Jane Doe\n[H2]Summary\n[BULLET]Built X", "skills": ["Rust"]}"#,
            ]),
        );
        let app = build_router(state);
        let request = multipart(
            "/api/v1/generate",
            vec![
                Part::Text("prompt", "Backend engineer, 5 years Rust"),
                Part::File("badges", "aws.png", png_badge("aws.png", 40, 20).bytes),
                Part::File("badges", "broken.png", b"nope".to_vec()),
                Part::File("badges", "notes.txt", b"text".to_vec()),
            ],
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["skills"], json!(["Rust"]));
        assert_eq!(body["skipped_badges"], json!(["notes.txt", "broken.png"]));

        let download_path = body["download_path"].as_str().unwrap().to_string();
        assert!(download_path.starts_with("uploads/generated_"));

        let response = app
            .oneshot(
                Request::get(format!("/{download_path}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            uploads::DOCX_CONTENT_TYPE
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = crate::extraction::docx::extract_paragraphs(&bytes).unwrap();
        // First paragraph is the badge row.
        assert!(text.ends_with("\nJane Doe\n\nSummary\nBuilt X"));
    }

    #[tokio::test]
    async fn test_generate_clarification_needed() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(
            dir.path(),
            Some(vec![r#"{"status": "clarification_needed", "questions": ["Which role?"]}"#]),
        ));
        let request = multipart("/api/v1/generate", vec![Part::Text("prompt", "make me a resume")]);
        let body = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(
            body,
            json!({"status": "clarification_needed", "questions": ["Which role?"]})
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_generate_contract_violation_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), Some(vec!["no json at all"])));
        let request = multipart("/api/v1/generate", vec![Part::Text("prompt", "Rust engineer")]);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "ORACLE_CONTRACT_VIOLATION");
    }

    #[tokio::test]
    async fn test_optimize_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(
            dir.path(),
            Some(vec![
                r#"{"ats_score": 90, "optimized_resume_text": "[H1]Jane\n[H2]Skills\n[BULLET]Python SQL Docker", "modifications_made": ["Added Docker"], "user_recommendations": []}"#,
            ]),
        ));
        let response = app
            .oneshot(json_request(
                "/api/v1/optimize",
                json!({
                    "original_resume_text": "Jane\nSkills: Python SQL",
                    "job_description": "Python SQL Docker",
                    "recommendations_for_improvement": ["Mention Docker"]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ats_score"], 90);
        assert_eq!(body["modifications_made"], json!(["Added Docker"]));
        assert!(body["download_path"]
            .as_str()
            .unwrap()
            .starts_with("uploads/optimized_"));
    }

    #[tokio::test]
    async fn test_download_rejects_traversal_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), None));
        let response = app
            .clone()
            .oneshot(Request::get("/uploads/..%2Fsecret").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(Request::get("/uploads/missing.docx").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
