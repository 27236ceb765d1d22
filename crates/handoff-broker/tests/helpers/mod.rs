#![allow(dead_code)]

//! Test helpers: build the broker router over an in-memory image store and a
//! fake object store.

use async_trait::async_trait;
use axum_test::TestServer;
use handoff_broker::{setup_routes, BrokerState};
use handoff_core::{BaseConfig, MetadataSigner, UploadMetadata};
use handoff_db::InMemoryImageRepository;
use handoff_storage::{ObjectStorage, StorageError, StorageResult};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_SECRET: &str = "test-signing-secret-at-least-32-bytes!!";

/// Object store double. Records issued keys and answers existence probes from
/// an explicit set.
#[derive(Default)]
pub struct FakeStorage {
    pub fail_presign: AtomicBool,
    pub fail_probe: AtomicBool,
    pub objects: Mutex<HashSet<String>>,
    pub presigned: Mutex<Vec<String>>,
}

impl FakeStorage {
    pub fn put_object(&self, key: &str) {
        self.objects.lock().unwrap().insert(key.to_string());
    }

    pub fn presigned_keys(&self) -> Vec<String> {
        self.presigned.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        _content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if self.fail_presign.load(Ordering::SeqCst) {
            return Err(StorageError::PresignFailed(
                "credentials rejected by backend".to_string(),
            ));
        }
        self.presigned.lock().unwrap().push(storage_key.to_string());
        Ok(format!(
            "https://fake-store.test/{}?X-Amz-Expires={}",
            storage_key,
            expires_in.as_secs()
        ))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        if self.fail_probe.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError("HEAD timed out".to_string()));
        }
        Ok(self.objects.lock().unwrap().contains(storage_key))
    }
}

pub struct TestBroker {
    pub server: TestServer,
    pub images: InMemoryImageRepository,
    pub storage: Arc<FakeStorage>,
    pub signer: MetadataSigner,
}

impl TestBroker {
    /// Body for `POST /presigned-url` signed with the test secret.
    pub fn signed_body(&self, metadata: &UploadMetadata) -> serde_json::Value {
        serde_json::json!({
            "filename": metadata.filename,
            "size": metadata.size,
            "content_type": metadata.content_type,
            "signature": self.signer.sign(metadata).as_str(),
        })
    }
}

pub fn base_config() -> BaseConfig {
    BaseConfig {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        signing_secret: TEST_SECRET.to_string(),
        max_body_bytes: 64 * 1024,
    }
}

pub fn setup_test_broker(verify_object_exists: bool) -> TestBroker {
    let images = InMemoryImageRepository::new();
    let storage = Arc::new(FakeStorage::default());
    let signer = MetadataSigner::new(TEST_SECRET);

    let state = Arc::new(BrokerState {
        signer: signer.clone(),
        images: Arc::new(images.clone()),
        storage: storage.clone(),
        presign_expiry: Duration::from_secs(900),
        verify_object_exists,
    });

    let router = setup_routes(&base_config(), state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestBroker {
        server,
        images,
        storage,
        signer,
    }
}

pub fn photo() -> UploadMetadata {
    UploadMetadata::new("photo.jpg", 52_341, "image/jpeg")
}
