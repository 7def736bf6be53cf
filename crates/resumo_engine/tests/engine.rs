use std::time::Duration;

use pretty_assertions::assert_eq;
use resumo_engine::{EngineEvent, EngineHandle, UploadError, UploadFile, UploadSettings};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

fn engine_for(server: &MockServer) -> EngineHandle {
    let settings = UploadSettings::new(Url::parse(&server.uri()).unwrap());
    EngineHandle::new(settings).expect("engine")
}

fn pdf(name: &str) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        mime_type: "application/pdf".to_string(),
        bytes: b"%PDF-1.4".to_vec(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upload_result_arrives_as_event() {
    resumo_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resumir"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"redirect": "/resumo"})),
        )
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.upload(7, pdf("a.pdf"));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::UploadCompleted {
            submission: 7,
            result: Ok("/resumo".to_string()),
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rejected_upload_arrives_as_error_event() {
    resumo_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resumir"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"erro": "Nenhum arquivo enviado"})),
        )
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.upload(1, pdf("a.pdf"));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::UploadCompleted {
            submission: 1,
            result: Err(UploadError::ServerRejected {
                status: 400,
                message: Some("Nenhum arquivo enviado".to_string()),
            }),
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn in_flight_upload_can_be_cancelled() {
    resumo_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resumir"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(30))
                .set_body_json(serde_json::json!({"redirect": "/resumo"})),
        )
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.upload(3, pdf("slow.pdf"));
    engine.cancel(3);

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::UploadCancelled { submission: 3 })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn overlapping_uploads_both_complete() {
    resumo_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resumir"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"redirect": "/resumo"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.upload(1, pdf("one.pdf"));
    engine.upload(2, pdf("two.pdf"));

    let mut submissions = Vec::new();
    for _ in 0..2 {
        match engine.recv_timeout(WAIT) {
            Some(EngineEvent::UploadCompleted { submission, result }) => {
                assert_eq!(result, Ok("/resumo".to_string()));
                submissions.push(submission);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    submissions.sort_unstable();
    assert_eq!(submissions, vec![1, 2]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn summary_page_shares_session_cookie_with_upload() {
    resumo_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resumir"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "session=abc123; Path=/")
                .set_body_json(serde_json::json!({"redirect": "/resumo"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resumo"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><body><textarea id="resumoTexto">Texto resumido.</textarea></body></html>"#,
            "text/html; charset=utf-8",
        ))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine.upload(1, pdf("a.pdf"));
    let redirect = match engine.recv_timeout(WAIT) {
        Some(EngineEvent::UploadCompleted {
            result: Ok(redirect),
            ..
        }) => redirect,
        other => panic!("unexpected event {other:?}"),
    };
    engine.load_summary(redirect);

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::SummaryLoaded {
            url: "/resumo".to_string(),
            result: Ok("Texto resumido.".to_string()),
        })
    );
}
