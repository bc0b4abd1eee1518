//! End-to-end uploads over HTTP against a mock tus server.

use mockito::{Matcher, Server, ServerGuard};
use tus_client::{ClientConfig, MemorySource, TusClient, TusError};

fn config(chunk_size: usize) -> ClientConfig {
    ClientConfig {
        enable_logging: false,
        request_timeout_ms: 5_000,
        ..Default::default()
    }
    .with_chunk_size(chunk_size)
}

async fn mock_options(server: &mut ServerGuard, extensions: &str) -> mockito::Mock {
    server
        .mock("OPTIONS", "/files/")
        .with_status(204)
        .with_header("Tus-Resumable", "1.0.0")
        .with_header("Tus-Version", "1.0.0")
        .with_header("Tus-Extension", extensions)
        .expect(1)
        .create_async()
        .await
}

async fn mock_create(server: &mut ServerGuard, length: u64) -> mockito::Mock {
    let location = format!("{}/files/24e533e0", server.url());
    server
        .mock("POST", "/files/")
        .match_header("tus-resumable", "1.0.0")
        .match_header("upload-length", length.to_string().as_str())
        .match_header(
            "upload-metadata",
            Matcher::Regex(r"^filename [A-Za-z0-9+/=]+,is_confidential$".to_string()),
        )
        .with_status(201)
        .with_header("Location", &location)
        .expect(1)
        .create_async()
        .await
}

async fn mock_head(server: &mut ServerGuard, offset: u64, length: u64) -> mockito::Mock {
    server
        .mock("HEAD", "/files/24e533e0")
        .match_header("tus-resumable", "1.0.0")
        .with_status(200)
        .with_header("Upload-Offset", &offset.to_string())
        .with_header("Upload-Length", &length.to_string())
        .with_header("Cache-Control", "no-store")
        .expect(1)
        .create_async()
        .await
}

async fn mock_patch(
    server: &mut ServerGuard,
    offset: u64,
    reply_offset: u64,
    expect: usize,
) -> mockito::Mock {
    server
        .mock("PATCH", "/files/24e533e0")
        .match_header("content-type", "application/offset+octet-stream")
        .match_header("tus-resumable", "1.0.0")
        .match_header("upload-offset", offset.to_string().as_str())
        .with_status(204)
        .with_header("Upload-Offset", &reply_offset.to_string())
        .expect(expect)
        .create_async()
        .await
}

fn endpoint(server: &ServerGuard) -> String {
    format!("{}/files/", server.url())
}

#[tokio::test]
async fn test_upload_in_three_chunks() {
    let mut server = Server::new_async().await;
    let options = mock_options(&mut server, "creation,termination").await;
    let create = mock_create(&mut server, 300).await;
    let head = mock_head(&mut server, 0, 300).await;
    let patches = vec![
        mock_patch(&mut server, 0, 100, 1).await,
        mock_patch(&mut server, 100, 200, 1).await,
        mock_patch(&mut server, 200, 300, 1).await,
    ];

    let client = TusClient::with_config(&endpoint(&server), config(100))
        .await
        .unwrap();
    assert!(client.capabilities().supports("creation"));

    let upload = client
        .upload(MemorySource::new("three.bin", vec![42u8; 300]))
        .await
        .unwrap();
    assert_eq!(upload.length, 300);
    assert_eq!(upload.location, "/files/24e533e0");

    options.assert_async().await;
    create.assert_async().await;
    head.assert_async().await;
    for patch in patches {
        patch.assert_async().await;
    }
}

#[tokio::test]
async fn test_creation_rejected_by_server() {
    let mut server = Server::new_async().await;
    let _options = mock_options(&mut server, "creation").await;
    let create = server
        .mock("POST", "/files/")
        .with_status(413)
        .expect(1)
        .create_async()
        .await;

    let client = TusClient::with_config(&endpoint(&server), config(100))
        .await
        .unwrap();
    let err = client
        .upload(MemorySource::new("big.bin", vec![0u8; 10]))
        .await
        .unwrap_err();

    assert!(matches!(err, TusError::ResourceCreationFailed(413)));
    create.assert_async().await;
}

#[tokio::test]
async fn test_creation_unsupported_sends_no_post() {
    let mut server = Server::new_async().await;
    let _options = mock_options(&mut server, "termination").await;
    let create = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = TusClient::with_config(&endpoint(&server), config(100))
        .await
        .unwrap();
    let err = client
        .upload(MemorySource::new("a.bin", vec![0u8; 10]))
        .await
        .unwrap_err();

    assert!(matches!(err, TusError::UnsupportedOperation(_)));
    create.assert_async().await;
}

#[tokio::test]
async fn test_offset_mismatch_aborts_before_next_chunk() {
    let mut server = Server::new_async().await;
    let _options = mock_options(&mut server, "creation").await;
    let _create = mock_create(&mut server, 200).await;
    let _head = mock_head(&mut server, 0, 200).await;
    let first = mock_patch(&mut server, 0, 90, 1).await;
    let second = mock_patch(&mut server, 100, 200, 0).await;
    let second_at_reported = mock_patch(&mut server, 90, 200, 0).await;

    let client = TusClient::with_config(&endpoint(&server), config(100))
        .await
        .unwrap();
    let err = client
        .upload(MemorySource::new("mismatch.bin", vec![1u8; 200]))
        .await
        .unwrap_err();

    assert!(matches!(
        err.cause(),
        TusError::ChunkUploadBroken { expected: 100, actual: 90 }
    ));
    first.assert_async().await;
    second.assert_async().await;
    second_at_reported.assert_async().await;
}

#[tokio::test]
async fn test_resolve_offset_of_existing_resource() {
    let mut server = Server::new_async().await;
    let _options = mock_options(&mut server, "creation").await;
    let head = mock_head(&mut server, 150, 300).await;

    let client = TusClient::with_config(&endpoint(&server), config(100))
        .await
        .unwrap();
    let progress = client.resolve_offset("/files/24e533e0").await.unwrap();

    assert_eq!(progress.offset, 150);
    assert_eq!(progress.length, 300);
    assert!(!progress.is_complete());
    head.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_server_fails_negotiation() {
    let result = TusClient::with_config("http://127.0.0.1:9/files/", config(100)).await;
    assert!(matches!(result, Err(TusError::Transport(_))));
}
