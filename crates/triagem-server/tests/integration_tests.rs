//! Integration tests for the triage HTTP service

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt; // for oneshot
use triagem_llm::MockProvider;
use triagem_pipeline::{
    Classifier, ClassifierConfig, MSG_BACKEND_FAILED, MSG_MALFORMED_RESPONSE, MSG_NO_CONTENT,
    MSG_NO_VALID_INPUT, MSG_UNREADABLE_PDF,
};
use triagem_server::handlers::{create_router, AppState, ErrorResponse, HealthCheckResponse};

const BOUNDARY: &str = "triagem-test-boundary";

const PRODUCTIVE_REPLY: &str = r#"{"classificacao":"Produtivo","sugestao_resposta":"Olá! Vamos verificar o status do seu chamado e retornaremos em breve."}"#;

/// A multipart form part
enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn processar_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/processar")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

/// Router plus a handle on the backend for call counting
fn create_test_app(backend: MockProvider) -> (Router, MockProvider) {
    let handle = backend.clone();
    let classifier = Classifier::new(backend, ClassifierConfig::default());
    (create_router(AppState::new(classifier, 1024 * 1024)), handle)
}

async fn body_string(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn error_message(response: axum::response::Response) -> String {
    let body = body_string(response).await;
    let error: ErrorResponse = serde_json::from_str(&body).unwrap();
    error.erro
}

#[tokio::test]
async fn test_pasted_text_is_classified() {
    let (app, backend) = create_test_app(MockProvider::new(PRODUCTIVE_REPLY));

    let request = processar_request(&[Part::Text(
        "email_texto",
        "Olá, gostaria de saber o status do chamado #123.",
    )]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(body_string(response).await, PRODUCTIVE_REPLY);
    assert_eq!(backend.call_count(), 1);
    assert!(backend
        .last_prompt()
        .unwrap()
        .contains("status do chamado #123"));
}

#[tokio::test]
async fn test_text_file_is_classified() {
    let (app, backend) = create_test_app(MockProvider::new(PRODUCTIVE_REPLY));

    let request = processar_request(&[Part::File(
        "email_arquivo",
        "email.txt",
        "Preciso de ajuda com a fatura de março.".as_bytes(),
    )]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(backend
        .last_prompt()
        .unwrap()
        .contains("Preciso de ajuda com a fatura de março."));
}

#[tokio::test]
async fn test_pasted_text_wins_over_file() {
    let (app, backend) = create_test_app(MockProvider::new(PRODUCTIVE_REPLY));

    let request = processar_request(&[
        Part::Text("email_texto", "Texto colado"),
        Part::File("email_arquivo", "email.pdf", b"not a pdf"),
    ]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(backend.last_prompt().unwrap().contains("Texto colado"));
}

#[tokio::test]
async fn test_whitespace_only_text_is_rejected() {
    let (app, backend) = create_test_app(MockProvider::new(PRODUCTIVE_REPLY));

    let request = processar_request(&[Part::Text("email_texto", "   \n\t ")]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, MSG_NO_CONTENT);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_unsupported_file_is_rejected() {
    let (app, backend) = create_test_app(MockProvider::new(PRODUCTIVE_REPLY));

    let request = processar_request(&[Part::File("email_arquivo", "notes.docx", b"PK\x03\x04")]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_empty_filename_is_rejected() {
    let (app, backend) = create_test_app(MockProvider::new(PRODUCTIVE_REPLY));

    let request = processar_request(&[Part::File("email_arquivo", "", b"")]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, MSG_NO_VALID_INPUT);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_corrupt_pdf_is_rejected() {
    let (app, backend) = create_test_app(MockProvider::new(PRODUCTIVE_REPLY));

    let request = processar_request(&[Part::File(
        "email_arquivo",
        "email.pdf",
        b"this is definitely not a pdf document",
    )]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, MSG_UNREADABLE_PDF);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_backend_failure_is_server_error() {
    let (app, backend) = create_test_app(MockProvider::failing());

    let request = processar_request(&[Part::Text("email_texto", "Feliz Natal a toda a equipe!")]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(response).await, MSG_BACKEND_FAILED);
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_malformed_backend_reply_is_server_error() {
    let (app, _backend) = create_test_app(MockProvider::new(
        r#"{"classificacao":"Urgente","sugestao_resposta":"ok"}"#,
    ));

    let request = processar_request(&[Part::Text("email_texto", "Qualquer coisa")]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(response).await, MSG_MALFORMED_RESPONSE);
}

#[tokio::test]
async fn test_fenced_backend_reply_is_cleaned() {
    let fenced = format!("```json\n{}\n```", PRODUCTIVE_REPLY);
    let (app, _backend) = create_test_app(MockProvider::new(fenced));

    let request = processar_request(&[Part::Text("email_texto", "Status do pedido?")]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, PRODUCTIVE_REPLY);
}

#[tokio::test]
async fn test_non_multipart_request_is_rejected() {
    let (app, backend) = create_test_app(MockProvider::new(PRODUCTIVE_REPLY));

    let request = Request::builder()
        .method("POST")
        .uri("/processar")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"email_texto":"oi"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, MSG_NO_CONTENT);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let (app, _backend) = create_test_app(MockProvider::new(PRODUCTIVE_REPLY));

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    let health: HealthCheckResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.provider, "mock");
}

#[tokio::test]
async fn test_script_is_served() {
    let (app, _backend) = create_test_app(MockProvider::new(PRODUCTIVE_REPLY));

    let request = Request::builder()
        .uri("/static/script.js")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("/processar"));
}
