use crate::decode::decode_body;
use crate::id::{IdGenerator, UuidGenerator};
use crate::response::build_response;
use crate::storage::{ObjectStore, PutObject, Receipt};
use crate::{Config, ErrorKind, Multipart, Part, RawRequest};
use bytes::Bytes;
use log::{debug, error, info, warn};

/// The outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// The generated identifier, which is also the object key.
    pub id: String,
    /// Exact length of the stored part body.
    pub byte_length: usize,
    /// The request's `Content-Type` header value, stored as the object's content type.
    pub content_type: String,
    /// The store's confirmation of the write.
    pub receipt: Receipt,
}

/// Drives an upload request from the encoded body to a single object write.
///
/// # Examples
///
/// ```
/// use cover_upload::{Config, MemoryStore, RawRequest, Uploader};
/// use http::{header, HeaderMap, HeaderValue, StatusCode};
///
/// # async fn run() {
/// let store = MemoryStore::new();
/// let uploader = Uploader::new(store.clone(), Config::new().bucket("covers"));
///
/// let mut headers = HeaderMap::new();
/// headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("multipart/form-data; boundary=XYZ"));
///
/// // --XYZ\r\n\r\nabc\r\n--XYZ--
/// let req = RawRequest::new("LS1YWVoNCg0KYWJjDQotLVhZWi0t", true, headers);
///
/// let res = uploader.handle(&req).await;
/// assert_eq!(res.status(), StatusCode::CREATED);
/// assert_eq!(store.len(), 1);
/// # }
/// # tokio::runtime::Runtime::new().unwrap().block_on(run());
/// ```
pub struct Uploader<S, G = UuidGenerator> {
    store: S,
    ids: G,
    config: Config,
}

impl<S: ObjectStore> Uploader<S> {
    pub fn new(store: S, config: Config) -> Uploader<S> {
        Uploader::with_id_generator(store, UuidGenerator, config)
    }
}

impl<S: ObjectStore, G: IdGenerator> Uploader<S, G> {
    pub fn with_id_generator(store: S, ids: G, config: Config) -> Uploader<S, G> {
        Uploader { store, ids, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decodes the request, extracts its first part and writes that part's
    /// body to the configured bucket under a freshly generated key.
    ///
    /// Nothing is written unless the whole multipart body is well formed.
    pub async fn upload(&self, req: &RawRequest) -> crate::Result<UploadResult> {
        info!("Upload request received, body size: {} bytes", req.body.len());
        debug!("Request is base64 encoded: {}", req.is_base64_encoded);

        let data = decode_body(&req.body, req.is_base64_encoded)?;
        debug!("Decoded body size: {} bytes", data.len());

        let content_type = req.content_type()?.to_owned();
        let boundary = crate::parse_boundary(&content_type)?;

        let part = first_part(Multipart::new(data, boundary))?;
        debug!(
            "Uploading part {} (name: {:?}, file name: {:?}, headers: {:?})",
            part.index(),
            part.name(),
            part.file_name(),
            part.raw_headers()
        );

        let body: Bytes = part.into_body();
        let byte_length = body.len();
        let id = self.ids.new_id();

        let object = PutObject {
            bucket: self.config.bucket.clone(),
            key: id.clone(),
            body,
            content_type: content_type.clone(),
            content_length: byte_length as u64,
        };

        info!("Persisting {} bytes to bucket {} as {}", byte_length, self.config.bucket, id);

        let receipt = self.store.put(object).await.map_err(crate::Error::Storage)?;
        info!("Object {} persisted: {:?}", id, receipt);

        Ok(UploadResult {
            id,
            byte_length,
            content_type,
            receipt,
        })
    }

    /// Runs [`upload`](Uploader::upload) and builds the response for the transport.
    pub async fn handle(&self, req: &RawRequest) -> http::Response<Bytes> {
        let outcome = self.upload(req).await;

        if let Err(err) = &outcome {
            match err.kind() {
                ErrorKind::ClientInput => warn!("Rejected upload request: {}", err),
                ErrorKind::Backend => error!("Upload failed: {}", err),
            }
        }

        let res = build_response(&outcome);
        info!("Request processing complete, responding with {}", res.status());
        res
    }
}

/// Returns the first part after checking that the rest of the body is well formed.
fn first_part(mut multipart: Multipart) -> crate::Result<Part> {
    let part = multipart.next_part()?.ok_or(crate::Error::NoParts)?;

    let mut ignored = 0;
    for rest in multipart {
        rest?;
        ignored += 1;
    }

    if ignored > 0 {
        warn!("Only the first part is uploaded, ignoring {} more", ignored);
    }

    Ok(part)
}
