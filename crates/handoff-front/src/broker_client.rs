//! HTTP client for the broker service.

use anyhow::Context;
use async_trait::async_trait;
use handoff_core::models::{PresignedUrlRequest, PresignedUrlResponse, VerifyResponse};
use handoff_core::AppError;
use handoff_infra::REQUEST_ID_HEADER;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

/// The front service's view of the broker.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Exchange signed metadata for a presigned upload URL.
    ///
    /// `request_id` is sent as `X-Request-ID` so the broker logs the same ID.
    async fn request_upload_url(
        &self,
        request: &PresignedUrlRequest,
        request_id: &str,
    ) -> Result<PresignedUrlResponse, AppError>;

    /// Confirm an upload. `Ok(valid)` only when the broker answered 200 with a
    /// decodable body; every other outcome is an error.
    async fn verify_image(&self, image_id: &str, request_id: &str) -> Result<bool, AppError>;
}

#[derive(Clone, Debug)]
pub struct HttpBrokerClient {
    client: Client,
    base_url: Url,
}

impl HttpBrokerClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid broker URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Broker URL cannot be used as a base: {}", base_url);
        }

        Ok(Self { client, base_url })
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal(format!("Invalid broker URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl BrokerClient for HttpBrokerClient {
    async fn request_upload_url(
        &self,
        request: &PresignedUrlRequest,
        request_id: &str,
    ) -> Result<PresignedUrlResponse, AppError> {
        let url = self.endpoint(&["presigned-url"])?;

        let response = self
            .client
            .post(url)
            .header(REQUEST_ID_HEADER, request_id)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Broker request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                body = %error_text,
                "Broker rejected upload URL request"
            );
            return Err(AppError::Upstream(format!(
                "Broker returned status {}",
                status
            )));
        }

        response
            .json::<PresignedUrlResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to decode broker response: {}", e)))
    }

    async fn verify_image(&self, image_id: &str, request_id: &str) -> Result<bool, AppError> {
        let url = self.endpoint(&["verify", image_id])?;

        let response = self
            .client
            .get(url)
            .header(REQUEST_ID_HEADER, request_id)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Broker request failed: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::Upstream(format!(
                "Broker returned status {} verifying image {}",
                status, image_id
            )));
        }

        let body = response
            .json::<VerifyResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to decode broker response: {}", e)))?;

        Ok(body.valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpBrokerClient {
        HttpBrokerClient::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let url = client("http://broker:8081/").endpoint(&["presigned-url"]).unwrap();
        assert_eq!(url.as_str(), "http://broker:8081/presigned-url");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = client("http://gateway/broker")
            .endpoint(&["verify", "abc"])
            .unwrap();
        assert_eq!(url.as_str(), "http://gateway/broker/verify/abc");
    }

    #[test]
    fn test_image_id_is_percent_encoded() {
        let url = client("http://broker:8081")
            .endpoint(&["verify", "../presigned-url"])
            .unwrap();
        assert_eq!(url.path(), "/verify/..%2Fpresigned-url");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(HttpBrokerClient::new("mailto:broker@example.com", Duration::from_secs(1)).is_err());
        assert!(HttpBrokerClient::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_broker_is_upstream_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = client("http://127.0.0.1:9");
        let result = client.verify_image("abc", "req-1").await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_request_id_is_sent_as_header() {
        use axum::{http::HeaderMap, routing::get, Json, Router};

        // Answers `valid: true` only when the expected request id arrives.
        async fn verify(headers: HeaderMap) -> Json<VerifyResponse> {
            let valid = headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                == Some("req-abc");
            Json(VerifyResponse { valid })
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/verify/{id}", get(verify));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = client(&format!("http://{}", addr));
        assert!(client.verify_image("abc", "req-abc").await.unwrap());
        assert!(!client.verify_image("abc", "req-other").await.unwrap());
    }
}
