//! Transparent response decompression.

mod common;

use reqwu::{NetError, RequestBuilder};

async fn fetch_compressed(path: &str) -> Result<reqwu::HttpResponse, NetError> {
    common::init_tracing();
    let addr = common::spawn_echo_server().await;
    RequestBuilder::get(&common::url(addr, path))?
        .compress()
        .send()
        .await
}

#[tokio::test]
async fn test_gzip() {
    let resp = fetch_compressed("/gzip").await.unwrap();
    let body = resp.json().unwrap();
    assert_eq!(body["path"], "/gzip");
    assert_eq!(body["headers"]["accept-encoding"], "deflate, gzip, br");
}

#[tokio::test]
async fn test_deflate() {
    let resp = fetch_compressed("/deflate").await.unwrap();
    assert_eq!(resp.json().unwrap()["path"], "/deflate");
}

#[tokio::test]
async fn test_brotli() {
    let resp = fetch_compressed("/brotli").await.unwrap();
    assert_eq!(resp.json().unwrap()["path"], "/brotli");
}

#[tokio::test]
async fn test_without_compress_body_is_raw() {
    let addr = common::spawn_echo_server().await;

    let resp = RequestBuilder::get(&common::url(addr, "/gzip"))
        .unwrap()
        .send()
        .await
        .unwrap();

    assert_eq!(resp.headers()["content-encoding"], "gzip");
    assert_eq!(&resp.bytes()[..2], &[0x1f, 0x8b]);
    assert!(resp.json().is_err());
}

#[tokio::test]
async fn test_caller_accept_encoding_is_kept() {
    let addr = common::spawn_echo_server().await;

    let resp = RequestBuilder::get(&common::url(addr, "/gzip"))
        .unwrap()
        .header("accept-encoding", "gzip")
        .unwrap()
        .compress()
        .send()
        .await
        .unwrap();

    assert_eq!(resp.json().unwrap()["headers"]["accept-encoding"], "gzip");
}

#[tokio::test]
async fn test_unsupported_encoding() {
    let addr = common::spawn_raw_server(
        b"HTTP/1.1 200 OK\r\ncontent-encoding: zstd\r\ncontent-length: 4\r\n\r\nabcd",
    )
    .await;

    let err = RequestBuilder::get(&common::url(addr, "/"))
        .unwrap()
        .compress()
        .send()
        .await
        .unwrap_err();

    assert_eq!(err, NetError::UnsupportedEncoding(Some("zstd".to_string())));
    assert_eq!(err.to_string(), "Content encoding zstd isn't supported");
}

#[tokio::test]
async fn test_corrupt_gzip_stream() {
    let addr = common::spawn_raw_server(
        b"HTTP/1.1 200 OK\r\ncontent-encoding: gzip\r\ncontent-length: 8\r\n\r\nnotgzip!",
    )
    .await;

    let err = RequestBuilder::get(&common::url(addr, "/"))
        .unwrap()
        .compress()
        .send()
        .await
        .unwrap_err();

    assert_eq!(err, NetError::ContentDecodingFailed);
}

#[tokio::test]
async fn test_chunked_gzip_is_reassembled() {
    // Gzip body split across two chunks of a chunked response.
    let payload = common::gzip(br#"{"split":true}"#);
    let (a, b) = payload.split_at(payload.len() / 2);

    let mut raw = Vec::new();
    raw.extend_from_slice(
        b"HTTP/1.1 200 OK\r\ncontent-encoding: gzip\r\ntransfer-encoding: chunked\r\n\r\n",
    );
    for part in [a, b] {
        raw.extend_from_slice(format!("{:x}\r\n", part.len()).as_bytes());
        raw.extend_from_slice(part);
        raw.extend_from_slice(b"\r\n");
    }
    raw.extend_from_slice(b"0\r\n\r\n");
    let raw: &'static [u8] = Box::leak(raw.into_boxed_slice());

    let addr = common::spawn_raw_server(raw).await;
    let resp = RequestBuilder::get(&common::url(addr, "/"))
        .unwrap()
        .compress()
        .send()
        .await
        .unwrap();

    assert_eq!(resp.json().unwrap()["split"], true);
}

#[tokio::test]
async fn test_no_content_with_declared_encoding() {
    let addr =
        common::spawn_raw_server(b"HTTP/1.1 204 No Content\r\ncontent-encoding: gzip\r\n\r\n").await;

    let resp = RequestBuilder::delete(&common::url(addr, "/item"))
        .unwrap()
        .compress()
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 204);
    assert!(resp.is_empty());
}

#[tokio::test]
async fn test_not_modified_with_brotli_encoding() {
    let addr =
        common::spawn_raw_server(b"HTTP/1.1 304 Not Modified\r\ncontent-encoding: br\r\n\r\n").await;

    let resp = RequestBuilder::get(&common::url(addr, "/cached"))
        .unwrap()
        .compress()
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 304);
    assert!(resp.is_empty());
}

#[tokio::test]
async fn test_head_with_declared_encoding() {
    let addr = common::spawn_raw_server(
        b"HTTP/1.1 200 OK\r\ncontent-encoding: gzip\r\ncontent-length: 120\r\n\r\n",
    )
    .await;

    let resp = RequestBuilder::head(&common::url(addr, "/"))
        .unwrap()
        .compress()
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-encoding"], "gzip");
    assert!(resp.text().is_empty());
}
