use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use cover_upload::{
    BoxError, Config, MemoryStore, ObjectStore, PutObject, RawRequest, Receipt, UploadedBody, Uploader,
};
use http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};

const BUCKET: &str = "covers";

struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn put(&self, _object: PutObject) -> Result<Receipt, BoxError> {
        Err("bucket does not exist".into())
    }
}

fn single_part_body(boundary: &str, payload: &[u8]) -> Vec<u8> {
    let mut data = format!(
        "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cover.png\"\r\nContent-Type: image/png\r\n\r\n",
        boundary
    )
    .into_bytes();
    data.extend_from_slice(payload);
    data.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    data
}

fn encoded_request(data: &[u8], content_type: Option<&str>) -> RawRequest {
    let mut headers = HeaderMap::new();
    if let Some(content_type) = content_type {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
    }
    RawRequest::new(general_purpose::STANDARD.encode(data), true, headers)
}

fn uploader() -> (MemoryStore, Uploader<MemoryStore>) {
    let store = MemoryStore::new();
    let uploader = Uploader::new(store.clone(), Config::new().bucket(BUCKET));
    (store, uploader)
}

fn uploaded_id(body: &Bytes) -> String {
    let body: UploadedBody = serde_json::from_slice(body).unwrap();
    assert_eq!(body.status, "uploaded");
    body.uuid
}

#[tokio::test]
async fn test_upload_concrete_scenario() {
    let (store, uploader) = uploader();

    let mut data = b"This is the preamble, to be ignored.\r\n".to_vec();
    data.extend_from_slice(b"--XYZ\r\nContent-Disposition: form-data; name=\"file\"\r\n\r\n");
    data.extend_from_slice(&[0x01, 0x02, 0x03]);
    data.extend_from_slice(b"\r\n--XYZ--");

    let res = uploader
        .handle(&encoded_request(&data, Some("multipart/form-data; boundary=XYZ")))
        .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let id = uploaded_id(res.body());

    let stored = store.get(BUCKET, &id).unwrap();
    assert_eq!(&stored.body[..], &[0x01, 0x02, 0x03]);
    assert_eq!(stored.content_length, 3);
    assert_eq!(stored.content_type, "multipart/form-data; boundary=XYZ");
}

#[tokio::test]
async fn test_upload_round_trip() {
    let (store, uploader) = uploader();

    let payloads: Vec<Vec<u8>> = vec![
        Vec::new(),
        b"plain text".to_vec(),
        (0..=255u8).cycle().take(4096).collect(),
        b"\r\n--not-the-boundary\r\n\r\n--".to_vec(),
    ];

    for (i, payload) in payloads.iter().enumerate() {
        let boundary = format!("----WebKitFormBoundary{}", i);
        let data = single_part_body(&boundary, payload);
        let content_type = format!("multipart/form-data; boundary={}", boundary);

        let res = uploader.handle(&encoded_request(&data, Some(content_type.as_str()))).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let stored = store.get(BUCKET, &uploaded_id(res.body())).unwrap();
        assert_eq!(&stored.body[..], &payload[..]);
    }
}

#[tokio::test]
async fn test_upload_with_quoted_boundary() {
    let (store, uploader) = uploader();
    let data = single_part_body("gc0p4Jq0M2Yt08j34c0p", b"quoted");

    let res = uploader
        .handle(&encoded_request(&data, Some(r#"multipart/form-data; boundary="gc0p4Jq0M2Yt08j34c0p""#)))
        .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(&store.get(BUCKET, &uploaded_id(res.body())).unwrap().body[..], b"quoted");
}

#[tokio::test]
async fn test_upload_with_lenient_content_types() {
    let (store, uploader) = uploader();

    let cases = [
        ("XYZ", "boundary=XYZ"),
        ("XYZ", "multipart/form-data; boundary=XYZ "),
        ("----=_Part_0_1234.5678", "multipart/form-data; boundary=----=_Part_0_1234.5678"),
        ("----=_Part_0_1234.5678", r#"multipart/form-data; boundary="----=_Part_0_1234.5678""#),
        ("a/b:c?d", "multipart/form-data; boundary=a/b:c?d; charset=utf-8"),
        ("a/b:c?d", r#"multipart/form-data; boundary="a/b:c?d""#),
    ];

    for (boundary, content_type) in &cases {
        let payload = format!("payload for {}", content_type).into_bytes();
        let data = single_part_body(boundary, &payload);

        let res = uploader.handle(&encoded_request(&data, Some(*content_type))).await;
        assert_eq!(res.status(), StatusCode::CREATED, "{}", content_type);

        let stored = store.get(BUCKET, &uploaded_id(res.body())).unwrap();
        assert_eq!(&stored.body[..], &payload[..]);
        assert_eq!(stored.content_type, *content_type);
    }
}

#[tokio::test]
async fn test_content_type_header_name_case() {
    let (_, uploader) = uploader();
    let data = single_part_body("XYZ", b"abc");

    for name in &["Content-Type", "content-type", "CONTENT-TYPE"] {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_static("multipart/form-data; boundary=XYZ"),
        );
        let req = RawRequest::new(general_purpose::STANDARD.encode(&data), true, headers);

        assert_eq!(uploader.handle(&req).await.status(), StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_rejects_unencoded_body() {
    let (store, uploader) = uploader();
    let data = single_part_body("XYZ", b"abc");

    let mut req = encoded_request(&data, Some("multipart/form-data; boundary=XYZ"));
    req.is_base64_encoded = false;
    let res = uploader.handle(&req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.body().is_empty());

    let mut req = req.clone();
    req.body = Bytes::from(data);
    assert_eq!(uploader.handle(&req).await.status(), StatusCode::BAD_REQUEST);

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_rejects_invalid_base64() {
    let (store, uploader) = uploader();

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("multipart/form-data; boundary=XYZ"));
    let req = RawRequest::new("this is *not* base64", true, headers);

    assert_eq!(uploader.handle(&req).await.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_rejects_missing_content_type() {
    let (store, uploader) = uploader();
    let data = single_part_body("XYZ", b"abc");

    let res = uploader.handle(&encoded_request(&data, None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.body().is_empty());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_rejects_malformed_content_type() {
    let (store, uploader) = uploader();
    let data = single_part_body("XYZ", b"abc");

    let malformed = [
        "multipart/form-data",
        "multipart/form-data; charset=utf-8",
        "image/png",
        "boundary=",
        r#"multipart/form-data; boundary="""#,
    ];

    for content_type in &malformed {
        let res = uploader.handle(&encoded_request(&data, Some(*content_type))).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", content_type);
    }

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_rejects_malformed_multipart() {
    let (store, uploader) = uploader();
    let content_type = Some("multipart/form-data; boundary=XYZ");

    let bodies: Vec<&[u8]> = vec![
        // no boundary at all
        &b"just some bytes"[..],
        // no parts
        &b"--XYZ--\r\n"[..],
        // missing terminal boundary
        &b"--XYZ\r\nContent-Type: image/png\r\n\r\n\x01\x02\x03"[..],
        &b"--XYZ\r\n\r\n\x01\x02\x03\r\n--XYZ\r\n\r\n\x04"[..],
        &b"--XYZ\r\n\r\n\x01\x02\x03\r\n--XYZ"[..],
        // unterminated part headers
        &b"--XYZ\r\nContent-Type: image/png\r\n"[..],
    ];

    for data in bodies {
        let res = uploader.handle(&encoded_request(data, content_type)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{:?}", String::from_utf8_lossy(data));
        assert!(res.body().is_empty());
    }

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_only_first_part_is_stored() {
    let (store, uploader) = uploader();
    let data = b"--XYZ\r\n\r\nfirst\r\n--XYZ\r\n\r\nsecond\r\n--XYZ--";

    let res = uploader
        .handle(&encoded_request(data, Some("multipart/form-data; boundary=XYZ")))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    assert_eq!(store.len(), 1);
    assert_eq!(&store.get(BUCKET, &uploaded_id(res.body())).unwrap().body[..], b"first");
}

#[tokio::test]
async fn test_identical_uploads_get_distinct_keys() {
    let (store, uploader) = uploader();
    let data = single_part_body("XYZ", b"same content");
    let req = encoded_request(&data, Some("multipart/form-data; boundary=XYZ"));

    let first = uploaded_id(uploader.handle(&req).await.body());
    let second = uploaded_id(uploader.handle(&req).await.body());

    assert_ne!(first, second);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_storage_failure() {
    let uploader = Uploader::new(FailingStore, Config::new());
    let data = single_part_body("XYZ", b"abc");

    let res = uploader
        .handle(&encoded_request(&data, Some("multipart/form-data; boundary=XYZ")))
        .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body().is_empty());
}

#[tokio::test]
async fn test_concurrent_uploads() {
    let (store, uploader) = uploader();
    let uploader = std::sync::Arc::new(uploader);

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let uploader = uploader.clone();
            tokio::spawn(async move {
                let data = single_part_body("XYZ", &[i; 16]);
                let req = encoded_request(&data, Some("multipart/form-data; boundary=XYZ"));
                let res = uploader.handle(&req).await;
                (i, res)
            })
        })
        .collect();

    for handle in handles {
        let (i, res) = handle.await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(&store.get(BUCKET, &uploaded_id(res.body())).unwrap().body[..], &[i; 16]);
    }

    assert_eq!(store.len(), 8);
}
