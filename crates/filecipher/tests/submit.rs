//! End-to-end submissions through the reqwest transport

mod common;

use axum::http::StatusCode;
use bytes::Bytes;
use tempfile::TempDir;
use url::Url;

use common::{Behavior, TestService};
use filecipher::prelude::*;
use filecipher::workflow::{DOWNLOAD_LABEL, SERVER_FAILURE_TEXT};

fn workflow_for(base_url: Url) -> Workflow<HttpTransport> {
    let config = CipherConfig {
        base_url,
        ..Default::default()
    };
    Workflow::new(config, HttpTransport::new().unwrap(), ObjectUrls::new())
}

fn request(action: Action) -> SubmissionRequest {
    SubmissionRequest {
        file: Some(FileUpload::new("message.txt", &b"ACT"[..])),
        key_matrix: " 6,24,1;13,16,10;20,17,15 ".to_string(),
        action,
    }
}

async fn service(body: &[u8]) -> TestService {
    common::spawn_service(Behavior::Respond(body.to_vec())).await
}

#[tokio::test]
async fn test_success_downloads_exact_bytes() {
    let service = service(b"POH\x00\xff").await;
    let workflow = workflow_for(service.base_url.clone());
    let mut area = ResultArea::new();

    let notice = workflow
        .handle_submit(&request(Action::Encrypt), &mut area)
        .await;
    assert!(notice.is_none());

    let links = area.links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].label, DOWNLOAD_LABEL);

    let temp_dir = TempDir::new().unwrap();
    let path = links[0]
        .activate(workflow.object_urls(), temp_dir.path())
        .await
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "output.txt");
    assert_eq!(std::fs::read(&path).unwrap(), b"POH\x00\xff");
}

#[tokio::test]
async fn test_multipart_fields_reach_the_service() {
    let service = service(b"ok").await;
    let workflow = workflow_for(service.base_url.clone());

    workflow.submit(&request(Action::Decrypt)).await.unwrap();

    let received = service.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].route, "decrypt");
    assert_eq!(received[0].filename.as_deref(), Some("message.txt"));
    assert_eq!(received[0].file.as_deref(), Some(&b"ACT"[..]));
    assert_eq!(
        received[0].key_matrix.as_deref(),
        Some("6,24,1;13,16,10;20,17,15")
    );
    assert!(received[0].other_fields.is_empty());
}

#[tokio::test]
async fn test_each_action_hits_its_route() {
    let service = service(b"ok").await;
    let workflow = workflow_for(service.base_url.clone());

    workflow.submit(&request(Action::Encrypt)).await.unwrap();
    workflow.submit(&request(Action::Decrypt)).await.unwrap();
    workflow.submit(&request(Action::Encrypt)).await.unwrap();

    let routes: Vec<_> = service.received().into_iter().map(|r| r.route).collect();
    assert_eq!(routes, vec!["encrypt", "decrypt", "encrypt"]);
}

#[tokio::test]
async fn test_server_error_shows_fixed_message() {
    for (status, body) in [
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error: ArithmeticException - / by zero"),
        (StatusCode::BAD_REQUEST, ""),
    ] {
        let service =
            common::spawn_service(Behavior::Fail(status, body.to_string())).await;
        let workflow = workflow_for(service.base_url.clone());
        let mut area = ResultArea::new();

        let notice = workflow
            .handle_submit(&request(Action::Encrypt), &mut area)
            .await;
        assert!(notice.is_none());
        assert_eq!(area.text(), SERVER_FAILURE_TEXT);
        assert!(area.links().is_empty());

        assert!(matches!(
            workflow.submit(&request(Action::Encrypt)).await,
            Err(SubmitError::Server(s)) if s == status
        ));
    }
}

#[tokio::test]
async fn test_unknown_route_is_a_server_error() {
    let service = service(b"ok").await;
    let config = CipherConfig {
        base_url: service.base_url.clone(),
        routes: Routes {
            encrypt: "scramble".to_string(),
            decrypt: "decrypt".to_string(),
        },
        ..Default::default()
    };
    let workflow = Workflow::new(config, HttpTransport::new().unwrap(), ObjectUrls::new());

    let result = workflow.submit(&request(Action::Encrypt)).await;
    assert!(matches!(
        result,
        Err(SubmitError::Server(status)) if status == StatusCode::NOT_FOUND
    ));
    assert!(service.received().is_empty());
}

#[tokio::test]
async fn test_refused_connection_is_reported_with_cause() {
    let addr = common::closed_address().await;
    let workflow = workflow_for(Url::parse(&format!("http://{}", addr)).unwrap());
    let mut area = ResultArea::new();

    let err = workflow
        .submit(&request(Action::Encrypt))
        .await
        .unwrap_err();
    let message = match &err {
        SubmitError::Transport(e) => e.message().to_string(),
        other => panic!("expected a transport error, got {:?}", other),
    };
    assert!(message.starts_with("error sending request"));
    assert!(
        message.to_lowercase().contains("connection refused"),
        "cause missing from {:?}",
        message
    );

    let notice = workflow
        .handle_submit(&request(Action::Encrypt), &mut area)
        .await;
    assert!(notice.is_none());
    assert!(area.links().is_empty());
    assert!(area.text().starts_with("Error: "));
    assert_eq!(area.text(), "Error: ".to_string() + &message);
}

#[tokio::test]
async fn test_validation_never_reaches_the_service() {
    let service = service(b"ok").await;
    let workflow = workflow_for(service.base_url.clone());
    let mut area = ResultArea::new();

    let mut no_file = request(Action::Encrypt);
    no_file.file = None;
    let mut no_key = request(Action::Decrypt);
    no_key.key_matrix = "  ".to_string();

    for req in [no_file, no_key] {
        let notice = workflow.handle_submit(&req, &mut area).await;
        assert_eq!(
            notice.unwrap().message(),
            "Please select a file and enter a key matrix."
        );
    }
    assert!(service.received().is_empty());
    assert_eq!(area.content(), &ResultContent::Empty);
}

#[tokio::test]
async fn test_download_bytes_independent_of_content_type() {
    let body = Bytes::from_static(b"%PDF-1.4 not really text");
    let service = service(&body).await;
    let workflow = workflow_for(service.base_url.clone());

    let link = workflow.submit(&request(Action::Decrypt)).await.unwrap();
    assert_eq!(link.download, "output.txt");
    assert_eq!(workflow.object_urls().resolve(&link.href).unwrap(), body);
}
