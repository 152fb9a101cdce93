use doc_orchestrator::clients::ApiClient;
use doc_orchestrator::models::{AlertRequest, IntakeRequest};
use doc_orchestrator::services::{
    AlertService, HttpAlertService, HttpProcessingService, ProcessingService,
};
use doc_orchestrator::{Config, DocumentInput, ProcessResult, ServiceError};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = Config {
        api_base_url: format!("{}/", server.uri()),
        request_timeout_secs: 5,
        ..Config::default()
    };
    ApiClient::new(&config).expect("创建客户端失败")
}

fn intake_request(question: &str) -> IntakeRequest {
    IntakeRequest {
        document: DocumentInput::new(b"quarterly report body".to_vec(), "report.txt", "text/plain"),
        question: question.to_string(),
    }
}

#[tokio::test]
async fn test_process_sends_multipart_file_and_question() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process"))
        .and(body_string_contains("name=\"file\"; filename=\"report.txt\""))
        .and(body_string_contains("quarterly report body"))
        .and(body_string_contains("name=\"question\""))
        .and(body_string_contains("who signed it?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "hello",
            "structuredJson": {"a": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpProcessingService::new(client_for(&server));
    let result = service.process(intake_request("who signed it?")).await.unwrap();

    assert_eq!(result.text, "hello");
    assert_eq!(result.structured_json.get("a"), Some(&json!(1)));

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_ascii_lowercase();
    assert!(body.contains("content-disposition: form-data"));
    assert!(body.contains("content-type: text/plain"));
}

#[tokio::test]
async fn test_process_non_2xx_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process"))
        .respond_with(ResponseTemplate::new(500).set_body_string("extraction crashed"))
        .mount(&server)
        .await;

    let service = HttpProcessingService::new(client_for(&server));
    let err = service.process(intake_request("")).await.unwrap_err();

    match err {
        ServiceError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "extraction crashed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_process_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "missing json"})))
        .mount(&server)
        .await;

    let service = HttpProcessingService::new(client_for(&server));
    let err = service.process(intake_request("q")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Decode { .. }));
}

#[tokio::test]
async fn test_process_unreachable_is_request_error() {
    let config = Config {
        api_base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: 2,
        ..Config::default()
    };
    let service = HttpProcessingService::new(ApiClient::new(&config).unwrap());
    let err = service.process(intake_request("q")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Request { .. }));
}

#[tokio::test]
async fn test_send_webhook_posts_json_and_unwraps_n8n() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/send-webhook"))
        .and(body_json(json!({
            "text": "hello",
            "structuredJson": {"a": 1},
            "question": "due?",
            "recipientEmail": "a@b.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "n8n": {"status": "ok"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = ProcessResult::new("hello", json!({"a": 1}).as_object().cloned().unwrap());
    let request = AlertRequest::new(&result, "due?", "a@b.com");

    let service = HttpAlertService::new(client_for(&server));
    let n8n = service.send_webhook(&request).await.unwrap();
    assert_eq!(n8n.get("status"), Some(&json!("ok")));
}

#[tokio::test]
async fn test_send_webhook_failure_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/send-webhook"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = ProcessResult::new("t", Default::default());
    let request = AlertRequest::new(&result, "", "a@b.com");

    let service = HttpAlertService::new(client_for(&server));
    let err = service.send_webhook(&request).await.unwrap_err();
    assert!(matches!(err, ServiceError::Status { status: 404, .. }));
}
