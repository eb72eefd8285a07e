use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use certstore_s3::{ObjectMetadata, ObjectStoreClient, ObjectStoreError, PutObjectOptions};

/// Object store kept in memory. Returns exactly the bytes last written under a key and
/// records the options of every write.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<String, Bytes>>,
    writes: Mutex<Vec<(String, PutObjectOptions)>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str, body: impl Into<Bytes>) {
        self.objects.lock().unwrap().insert(key.to_string(), body.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn writes(&self) -> Vec<(String, PutObjectOptions)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStoreClient for InMemoryObjectStore {
    async fn get_object(&self, key: &str) -> Result<Bytes, ObjectStoreError> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| ObjectStoreError::NotFound { key: key.to_string() })
    }

    async fn put_object(&self, key: &str, body: Bytes, options: PutObjectOptions) -> Result<(), ObjectStoreError> {
        self.writes.lock().unwrap().push((key.to_string(), options));
        self.objects.lock().unwrap().insert(key.to_string(), body);
        Ok(())
    }

    async fn head_object(&self, key: &str) -> Result<ObjectMetadata, ObjectStoreError> {
        let objects = self.objects.lock().unwrap();
        let body = objects.get(key).ok_or_else(|| ObjectStoreError::NotFound { key: key.to_string() })?;
        Ok(ObjectMetadata { content_length: Some(body.len() as i64), ..Default::default() })
    }

    async fn delete_object(&self, key: &str) -> Result<(), ObjectStoreError> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}
