//! End-to-end controller tests against a mock generation endpoint.

use std::sync::Arc;
use std::time::Duration;

use relief_client::{GeneratorConfig, HttpVideoGenerator};
use relief_models::VideoSource;
use relief_player::{GenerationOutcome, Notice, ObjectUrlRegistry, VideoSourceController};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller_for(server: &MockServer) -> VideoSourceController {
    let config = GeneratorConfig {
        endpoint: format!("{}/sendmoney", server.uri()),
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
    };
    let generator = HttpVideoGenerator::new(config).expect("valid config");
    VideoSourceController::new(Arc::new(generator))
}

#[tokio::test]
async fn test_generated_video_replaces_local_pick() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sendmoney"))
        .and(body_json(serde_json::json!({ "response": "ocean waves" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "video/mp4")
                .set_body_bytes(b"generated".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut ctrl = controller_for(&server);
    ctrl.pick_local(Some(relief_models::Blob::new(b"local".to_vec())));
    let local_url = ctrl.current_source().url().cloned().unwrap();

    assert!(ctrl.generate("ocean waves").is_started());
    let outcome = ctrl.settle().await.expect("request in flight");

    let GenerationOutcome::Ready(VideoSource::RemoteBlob(url)) = outcome else {
        panic!("expected remote source, got {:?}", outcome);
    };
    let blob = ctrl.registry().resolve(&url).unwrap();
    assert_eq!(blob.data(), b"generated");
    assert_eq!(blob.content_type(), Some("video/mp4"));
    assert!(!ctrl.registry().is_live(&local_url));

    ctrl.dispose();
    assert_eq!(ctrl.registry().live_count(), 0);
}

#[tokio::test]
async fn test_rate_limit_surfaces_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let mut ctrl = controller_for(&server);
    ctrl.generate("prompt");

    let outcome = ctrl.settle().await.unwrap();
    assert_eq!(
        outcome,
        GenerationOutcome::Failed(Notice::RateLimited {
            retry_after: Some(Duration::from_secs(30))
        })
    );
    assert_eq!(ctrl.current_source(), &VideoSource::None);
    assert!(!ctrl.is_generating());
}

#[tokio::test]
async fn test_server_error_surfaces_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut ctrl = controller_for(&server);
    ctrl.generate("prompt");

    let outcome = ctrl.settle().await.unwrap();
    assert!(matches!(outcome.notice(), Some(Notice::RequestFailed { .. })));
    assert_eq!(ctrl.registry().live_count(), 0);
}

#[tokio::test]
async fn test_slow_request_superseded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({ "response": "a" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"stale".to_vec())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({ "response": "b" })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fresh".to_vec()))
        .mount(&server)
        .await;

    let mut ctrl = controller_for(&server);
    ctrl.generate("a");
    tokio::time::sleep(Duration::from_millis(50)).await;
    ctrl.generate("b");

    let outcome = ctrl.settle().await.unwrap();
    let GenerationOutcome::Ready(source) = outcome else {
        panic!("expected b to succeed");
    };
    let url = source.url().unwrap();
    assert_eq!(ctrl.registry().resolve(url).unwrap().data(), b"fresh");

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(ctrl.try_settle().is_none());
    assert_eq!(ctrl.registry().live_count(), 1);
}
