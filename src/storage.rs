use crate::error::BoxError;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;

/// A single object write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObject {
    pub bucket: String,
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
    pub content_length: u64,
}

/// Confirmation returned by the store for a completed write. Its contents are
/// store specific and only ever logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    pub version_id: Option<String>,
}

/// The object storage capability the upload pipeline writes through.
///
/// Implementations must not report success before the object is durable.
/// Retries, if any, belong to the implementation; the pipeline calls `put`
/// exactly once per upload.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, object: PutObject) -> Result<Receipt, BoxError>;
}

#[async_trait]
impl<S: ObjectStore + ?Sized> ObjectStore for Arc<S> {
    async fn put(&self, object: PutObject) -> Result<Receipt, BoxError> {
        (**self).put(object).await
    }
}

/// An object as kept by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
    pub content_length: u64,
    pub version_id: String,
}

/// An in-process [`ObjectStore`]. Clones share the same objects.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Arc<spin::Mutex<HashMap<(String, String), StoredObject>>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects.lock().get(&(bucket.to_owned(), key.to_owned())).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, object: PutObject) -> Result<Receipt, BoxError> {
        if object.body.len() as u64 != object.content_length {
            return Err(format!(
                "content length {} does not match body length {}",
                object.content_length,
                object.body.len()
            )
            .into());
        }

        let mut objects = self.objects.lock();
        let version_id = (objects.len() + 1).to_string();

        objects.insert(
            (object.bucket, object.key),
            StoredObject {
                body: object.body,
                content_type: object.content_type,
                content_length: object.content_length,
                version_id: version_id.clone(),
            },
        );

        Ok(Receipt {
            version_id: Some(version_id),
        })
    }
}
