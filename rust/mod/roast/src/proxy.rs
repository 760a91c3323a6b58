//! Image proxy — same-origin relay for third-party profile images.
//!
//! The UI never embeds a provider image URL directly. Normalization
//! rewrites every absolute image URL into a reference to this
//! endpoint, which fetches the original and streams it back.

use axum::body::Bytes;
use reqwest::header::CONTENT_TYPE;

use instacook_core::{percent_encode, ServiceError};

/// Path of the relay endpoint as seen from the browser.
pub const IMAGE_PROXY_PATH: &str = "/api/image-proxy";

/// Rewrite an absolute image URL into a same-origin proxy reference.
///
/// Non-HTTP(S) or missing URLs normalize to the empty string.
pub fn proxy_image_url(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        format!("{}?url={}", IMAGE_PROXY_PATH, percent_encode(raw))
    } else {
        String::new()
    }
}

/// Fetch the original image and return its bytes plus content type.
pub async fn relay_image(
    http: &reqwest::Client,
    url: &str,
) -> Result<(Bytes, String), ServiceError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ServiceError::Validation("url must be http(s)".into()));
    }

    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| ServiceError::Provider(format!("image fetch failed: {}", e)))?;

    if !resp.status().is_success() {
        return Err(ServiceError::Provider(format!(
            "image host returned {}",
            resp.status()
        )));
    }

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| ServiceError::Provider(format!("image read failed: {}", e)))?;

    Ok((bytes, content_type))
}
