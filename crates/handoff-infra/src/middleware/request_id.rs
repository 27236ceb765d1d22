use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Request ID extension type
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Tags each request with an ID, reusing an inbound `X-Request-ID` when present.
/// The ID is stored in the request extensions and echoed on the response; the
/// front service forwards it on its broker calls.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Extension, Router};
    use axum_test::TestServer;

    async fn echo_id(Extension(id): Extension<RequestId>) -> String {
        id.0
    }

    fn server() -> TestServer {
        let app = Router::new()
            .route("/", get(echo_id))
            .layer(axum::middleware::from_fn(request_id_middleware));
        TestServer::new(app).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn test_generates_id_when_missing() {
        let response = server().get("/").await;
        let header = response.header(REQUEST_ID_HEADER);
        let id = header.to_str().expect("ascii header");
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(response.text(), id);
    }

    #[tokio::test]
    async fn test_propagates_inbound_id() {
        let response = server()
            .get("/")
            .add_header(REQUEST_ID_HEADER, "req-123")
            .await;
        assert_eq!(response.header(REQUEST_ID_HEADER), "req-123");
        assert_eq!(response.text(), "req-123");
    }
}
