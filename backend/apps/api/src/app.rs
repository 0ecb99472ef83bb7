//! HTTP application assembly
//!
//! Mounts the feature routers and applies the cross-cutting layers.

use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{BODY_LIMIT_BYTES, ServerConfig};

/// Health check text served at `/`
pub const HEALTH_MESSAGE: &str = "Server is working correctly";

pub fn build_app(auth: Router, config: &ServerConfig) -> anyhow::Result<Router> {
    let origin: HeaderValue = config
        .client_url
        .trim_end_matches('/')
        .parse()
        .with_context(|| format!("CLIENT_URL is not a valid origin: {}", config.client_url))?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    Ok(Router::new()
        .route("/", get(health))
        .nest("/api/auth", auth)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

async fn health() -> &'static str {
    HEALTH_MESSAGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{
        AuthConfig, InMemoryRefreshTokenStore, InMemoryUserRepository, auth_router_generic,
    };
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    const CLIENT_URL: &str = "https://shop.example.com";

    fn app() -> Router {
        let auth = auth_router_generic(
            InMemoryUserRepository::new(),
            InMemoryRefreshTokenStore::new(),
            AuthConfig::with_random_secrets(),
        );
        let config = ServerConfig {
            port: 5000,
            database_url: "postgres://unused".to_string(),
            redis_url: "redis://unused".to_string(),
            client_url: format!("{}/", CLIENT_URL),
        };
        build_app(auth, &config).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], HEALTH_MESSAGE.as_bytes());
    }

    #[tokio::test]
    async fn test_auth_routes_are_nested() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/auth/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_client_with_credentials() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/auth/login")
                    .header(header::ORIGIN, CLIENT_URL)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            CLIENT_URL
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_cors_rejects_other_origins() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "https://evil.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let padding = "a".repeat(BODY_LIMIT_BYTES + 1);
        let body = format!(
            r#"{{"name":"{}","email":"jane@example.com","password":"secret1"}}"#,
            padding
        );

        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/auth/signup")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
