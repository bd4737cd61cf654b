//! CSRF protection via the double-submit cookie pattern.
//!
//! Browsers get a random token as a readable cookie and must echo it back in
//! a request header on every mutating request. A cross-site attacker can make
//! the browser send the cookie but cannot read it to fill in the header.

use std::fmt::Write as _;

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use rand::Rng;

use crate::error::AppError;

/// Cookie carrying the CSRF token. Readable by client-side code on purpose.
pub const CSRF_COOKIE_NAME: &str = "csrfToken";

/// Header clients must echo the cookie's value in.
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";

/// Token issuance endpoint, exempt from the check by definition.
const TOKEN_PATH: &str = "/api/auth/csrf-token";

/// Generate a fresh 256-bit CSRF token, hex encoded.
#[must_use]
pub fn generate_csrf_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    let mut token = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(token, "{b:02x}");
    }
    token
}

/// Reject mutating requests whose CSRF header does not match the cookie.
///
/// Safe methods (GET, HEAD, OPTIONS) pass through untouched.
pub async fn csrf_protection(req: Request, next: Next) -> Response {
    let method = req.method();
    if matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
        || req.uri().path() == TOKEN_PATH
    {
        return next.run(req).await;
    }

    let headers = req.headers();

    let cookie_token = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split("; ").find_map(|pair| {
                pair.strip_prefix(CSRF_COOKIE_NAME)
                    .and_then(|rest| rest.strip_prefix('='))
            })
        });

    let header_token = headers.get(CSRF_HEADER_NAME).and_then(|v| v.to_str().ok());

    match (cookie_token, header_token) {
        (Some(cookie), Some(header)) if !cookie.is_empty() && cookie == header => {
            next.run(req).await
        }
        _ => AppError::CsrfMismatch.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_64_hex_chars() {
        let token = generate_csrf_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_csrf_token(), generate_csrf_token());
    }
}
