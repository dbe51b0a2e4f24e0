use axum::http::HeaderValue;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Security headers configuration
#[derive(Clone)]
pub struct SecurityHeadersConfig {
    /// Extra image origins, e.g. a custom S3 endpoint served over plain http
    pub image_origins: Vec<String>,
    pub is_production: bool,
}

impl SecurityHeadersConfig {
    pub fn new(image_origins: Vec<String>, is_production: bool) -> Self {
        Self {
            image_origins,
            is_production,
        }
    }

    /// Build Content-Security-Policy header value
    ///
    /// Previews are data URLs and photos come from signed https URLs, so both are
    /// allowed as image sources. The pages run no scripts.
    fn build_csp(&self) -> String {
        let mut img_src = "img-src 'self' data: https:".to_string();
        for origin in &self.image_origins {
            img_src.push(' ');
            img_src.push_str(origin);
        }

        [
            "default-src 'self'",
            "script-src 'none'",
            "style-src 'self'",
            img_src.as_str(),
            "form-action 'self'",
            "frame-ancestors 'none'",
        ]
        .join("; ")
    }
}

/// Security headers middleware
/// Adds security headers to all HTTP responses
pub async fn security_headers_middleware(
    State(config): State<Arc<SecurityHeadersConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    // X-Content-Type-Options: Prevent MIME type sniffing
    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );

    // Redundant with CSP frame-ancestors, kept for older browsers
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));

    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    // HSTS header (only set in production over HTTPS)
    if config.is_production {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    let csp = config.build_csp();
    if let Ok(header_value) = HeaderValue::from_str(&csp) {
        headers.insert("Content-Security-Policy", header_value);
    }

    headers.insert(
        "Permissions-Policy",
        HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
    );

    // Pages embed signed URLs that expire
    if !headers.contains_key("Cache-Control") {
        headers.insert(
            "Cache-Control",
            HeaderValue::from_static("no-store, private"),
        );
    }

    response
}
