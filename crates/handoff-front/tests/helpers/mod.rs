#![allow(dead_code)]

//! Test helpers: build the front router over an in-memory product store and a
//! scripted broker.

use async_trait::async_trait;
use axum_test::TestServer;
use handoff_core::models::{PresignedUrlRequest, PresignedUrlResponse};
use handoff_core::{AppError, BaseConfig, FrontConfig, MetadataSigner};
use handoff_db::InMemoryProductRepository;
use handoff_front::auth::JwtAuth;
use handoff_front::{setup_routes, BrokerClient, FrontState};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret-at-least-32-bytes!!";
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-that-is-32-chars-long";

/// Broker double. Upload URL requests are recorded; verification answers come
/// from `images` (absent ids behave like a broker 404).
#[derive(Default)]
pub struct FakeBroker {
    pub requests: Mutex<Vec<PresignedUrlRequest>>,
    pub request_ids: Mutex<Vec<String>>,
    pub images: Mutex<HashMap<String, bool>>,
    pub verify_calls: AtomicUsize,
    pub fail_upload: AtomicBool,
    pub unreachable: AtomicBool,
}

impl FakeBroker {
    pub fn add_image(&self, image_id: &str, uploaded: bool) {
        self.images
            .lock()
            .unwrap()
            .insert(image_id.to_string(), uploaded);
    }

    pub fn recorded_requests(&self) -> Vec<PresignedUrlRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `X-Request-ID` values received, in call order, across both operations.
    pub fn recorded_request_ids(&self) -> Vec<String> {
        self.request_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrokerClient for FakeBroker {
    async fn request_upload_url(
        &self,
        request: &PresignedUrlRequest,
        request_id: &str,
    ) -> Result<PresignedUrlResponse, AppError> {
        self.request_ids.lock().unwrap().push(request_id.to_string());
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("connection refused".to_string()));
        }
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("Broker returned status 401".to_string()));
        }
        self.requests.lock().unwrap().push(request.clone());
        let image_id = Uuid::new_v4();
        Ok(PresignedUrlResponse {
            upload_url: format!(
                "https://fake-store.test/uploads/{}/{}",
                image_id, request.metadata.filename
            ),
            image_id,
            expires_at: None,
        })
    }

    async fn verify_image(&self, image_id: &str, request_id: &str) -> Result<bool, AppError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.request_ids.lock().unwrap().push(request_id.to_string());
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("connection refused".to_string()));
        }
        match self.images.lock().unwrap().get(image_id) {
            Some(valid) => Ok(*valid),
            None => Err(AppError::Upstream(
                "Broker returned status 404".to_string(),
            )),
        }
    }
}

pub fn front_config(issue_test_tokens: bool) -> FrontConfig {
    FrontConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            signing_secret: TEST_SIGNING_SECRET.to_string(),
            max_body_bytes: 64 * 1024,
        },
        broker_url: "http://broker.test".to_string(),
        broker_timeout_secs: 5,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiry_hours: 1,
        issue_test_tokens,
    }
}

pub struct TestFront {
    pub server: TestServer,
    pub products: InMemoryProductRepository,
    pub broker: Arc<FakeBroker>,
    pub token: String,
}

impl TestFront {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Front router wired to `broker`, with a valid bearer token ready.
pub fn build_front(
    config: &FrontConfig,
    broker: Arc<dyn BrokerClient>,
    products: InMemoryProductRepository,
) -> (TestServer, String) {
    let jwt = Arc::new(JwtAuth::new(&config.jwt_secret, config.jwt_expiry_hours));
    let token = jwt.issue("tester").expect("token").token;

    let state = Arc::new(FrontState {
        signer: MetadataSigner::new(config.base.signing_secret.as_bytes()),
        broker,
        products: Arc::new(products),
        jwt,
    });

    let router = setup_routes(config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to create test server");
    (server, token)
}

pub fn setup_test_front() -> TestFront {
    setup_test_front_with(front_config(true))
}

pub fn setup_test_front_with(config: FrontConfig) -> TestFront {
    let broker = Arc::new(FakeBroker::default());
    let products = InMemoryProductRepository::new();
    let (server, token) = build_front(&config, broker.clone(), products.clone());

    TestFront {
        server,
        products,
        broker,
        token,
    }
}
