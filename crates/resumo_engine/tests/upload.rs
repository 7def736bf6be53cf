use std::net::TcpListener;

use pretty_assertions::assert_eq;
use resumo_engine::{ReqwestUploader, UploadError, UploadFile, UploadSettings, Uploader};
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> UploadSettings {
    UploadSettings::new(Url::parse(&server.uri()).unwrap())
}

fn pdf() -> UploadFile {
    UploadFile {
        name: "paper.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        bytes: b"%PDF-1.4 tiny".to_vec(),
    }
}

#[tokio::test]
async fn posts_file_as_multipart_and_returns_redirect() {
    resumo_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resumir"))
        .and(body_string_contains(r#"name="arquivo""#))
        .and(body_string_contains(r#"filename="paper.pdf""#))
        .and(body_string_contains("%PDF-1.4 tiny"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"redirect": "/resumo/42"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(settings_for(&server)).unwrap();
    let redirect = uploader.upload(1, pdf()).await.expect("upload ok");

    assert_eq!(redirect, "/resumo/42");
    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn declared_type_travels_with_the_part() {
    resumo_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resumir"))
        .and(body_string_contains("Content-Type: application/pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"redirect": "/resumo"})),
        )
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(settings_for(&server)).unwrap();
    assert_eq!(uploader.upload(2, pdf()).await, Ok("/resumo".to_string()));
}

#[tokio::test]
async fn server_error_carries_message() {
    resumo_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resumir"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"erro": "internal error"})),
        )
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(settings_for(&server)).unwrap();
    let err = uploader.upload(3, pdf()).await.unwrap_err();

    assert_eq!(
        err,
        UploadError::ServerRejected {
            status: 500,
            message: Some("internal error".to_string()),
        }
    );
}

#[tokio::test]
async fn success_without_redirect_is_malformed() {
    resumo_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resumir"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(settings_for(&server)).unwrap();
    let err = uploader.upload(4, pdf()).await.unwrap_err();

    assert!(matches!(
        err,
        UploadError::MalformedResponse { status: 200, .. }
    ));
}

#[tokio::test]
async fn unreachable_server_is_network_failure() {
    resumo_logging::initialize_for_tests();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = Url::parse(&format!("http://{addr}")).unwrap();
    let uploader = ReqwestUploader::new(UploadSettings::new(base)).unwrap();
    let err = uploader.upload(5, pdf()).await.unwrap_err();

    assert!(matches!(err, UploadError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn invalid_declared_type_is_request_error() {
    resumo_logging::initialize_for_tests();
    let server = MockServer::start().await;
    let uploader = ReqwestUploader::new(settings_for(&server)).unwrap();
    let file = UploadFile {
        mime_type: "not a mime".to_string(),
        ..pdf()
    };

    let err = uploader.upload(6, file).await.unwrap_err();

    assert!(matches!(err, UploadError::Request(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
