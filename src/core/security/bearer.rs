use axum::http::{HeaderMap, header::AUTHORIZATION};

use crate::core::config::AuthConfig;

/// JSON-RPC error code returned when the bearer check fails.
pub const UNAUTHORIZED: i32 = -32001;

/// Errors that can occur during bearer-token validation
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Authorization header must use the Bearer scheme")]
    Malformed,

    #[error("Invalid bearer token")]
    InvalidToken,
}

/// Validates the `Authorization` header of a request against the configured
/// secret.
///
/// When no secret is configured every request passes. Otherwise the header
/// must read `Bearer <token>` with `<token>` equal to the secret.
///
/// # Examples
///
/// ```rust,ignore
/// let config = Config::from_env();
/// validate_bearer(request.headers(), &config.auth)?;
/// ```
pub fn validate_bearer(headers: &HeaderMap, auth: &AuthConfig) -> Result<(), BearerError> {
    let Some(expected) = auth.bearer_token.as_deref() else {
        return Ok(());
    };

    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(BearerError::Malformed)?
        .trim();

    if constant_time_eq(token.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(BearerError::InvalidToken)
    }
}

/// Compare two byte strings without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn auth(token: Option<&str>) -> AuthConfig {
        AuthConfig {
            bearer_token: token.map(str::to_string),
        }
    }

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_no_secret_allows_everything() {
        assert!(validate_bearer(&HeaderMap::new(), &auth(None)).is_ok());
    }

    #[test]
    fn test_valid_token() {
        assert!(validate_bearer(&headers("Bearer s3cret"), &auth(Some("s3cret"))).is_ok());
    }

    #[test]
    fn test_rejections() {
        let auth = auth(Some("s3cret"));
        assert_eq!(
            validate_bearer(&HeaderMap::new(), &auth),
            Err(BearerError::MissingHeader)
        );
        assert_eq!(
            validate_bearer(&headers("Basic s3cret"), &auth),
            Err(BearerError::Malformed)
        );
        assert_eq!(
            validate_bearer(&headers("Bearer wrong!"), &auth),
            Err(BearerError::InvalidToken)
        );
        assert_eq!(
            validate_bearer(&headers("Bearer s3cret-longer"), &auth),
            Err(BearerError::InvalidToken)
        );
    }
}
