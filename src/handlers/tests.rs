#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use warp::http::StatusCode;
    use warp::Reply;
    use crate::errors::ProxyError;
    use crate::handlers::{handle_rejection, preflight, relay_reply};
    use crate::models::{ErrorBody, ProxyResponse};

    async fn body_of(reply: impl Reply) -> (StatusCode, ErrorBody) {
        let response = reply.into_response();
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_handle_not_found_rejection() {
        let rejection = warp::reject::not_found();
        let response = handle_rejection(rejection).await.unwrap();
        let (status, body) = body_of(response).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "not found");
    }

    #[tokio::test]
    async fn test_handle_validation_rejection() {
        let rejection = warp::reject::custom(ProxyError::Validation("fileId is required".to_string()));
        let response = handle_rejection(rejection).await.unwrap();
        let (status, body) = body_of(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, ErrorBody::new("fileId is required"));
    }

    #[tokio::test]
    async fn test_handle_configuration_rejection() {
        let rejection = warp::reject::custom(ProxyError::Configuration("DRIVE_API_KEY is not set".to_string()));
        let response = handle_rejection(rejection).await.unwrap();
        let (status, body) = body_of(response).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "DRIVE_API_KEY is not set");
        assert!(body.detail.is_none());
    }

    #[tokio::test]
    async fn test_handle_upstream_rejection() {
        let rejection = warp::reject::custom(ProxyError::Upstream("connection refused".to_string()));
        let response = handle_rejection(rejection).await.unwrap();
        let (status, body) = body_of(response).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, ErrorBody::with_detail("proxy fetch failed", "connection refused"));
    }

    #[tokio::test]
    async fn test_handle_method_not_allowed_rejection() {
        let rejection = warp::test::request()
            .method("POST")
            .filter(&warp::get())
            .await
            .unwrap_err();
        let (status, body) = body_of(handle_rejection(rejection).await.unwrap()).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body.error, "method not allowed");
    }

    #[tokio::test]
    async fn test_relay_reply_keeps_upstream_parts() {
        let response = relay_reply(ProxyResponse {
            status: StatusCode::NOT_FOUND,
            content_type: "application/json; charset=UTF-8".to_string(),
            body: Bytes::from_static(b"{\"error\":{}}"),
        })
        .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["content-type"], "application/json; charset=UTF-8");
        assert_eq!(response.headers()["cache-control"], "public, max-age=60");
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body, Bytes::from_static(b"{\"error\":{}}"));
    }

    #[test]
    fn test_relay_reply_rejects_broken_content_type() {
        let err = relay_reply(ProxyResponse {
            status: StatusCode::OK,
            content_type: "text/plain\n".to_string(),
            body: Bytes::new(),
        })
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_preflight_is_empty_no_content() {
        let response = preflight().into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
