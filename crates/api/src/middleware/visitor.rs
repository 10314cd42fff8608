//! Anonymous visitor identification.
//!
//! The storefront generates a random id per browser and sends it on every
//! request that touches per-visitor state such as the wishlist.

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
    response::Response,
};

use maison_shared::AppError;

use crate::routes::error_response;

/// Header carrying the visitor id.
pub const VISITOR_HEADER: &str = "x-visitor-id";

const MAX_VISITOR_ID_LEN: usize = 64;

/// A validated visitor id: 1 to 64 ASCII letters, digits, `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Visitor(String);

impl Visitor {
    /// Validates a raw header value.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        let valid = !raw.is_empty()
            && raw.len() <= MAX_VISITOR_ID_LEN
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(AppError::Validation(format!("Invalid {VISITOR_HEADER} header")))
        }
    }

    /// The id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

fn visitor_from_parts(parts: &Parts) -> Result<Option<Visitor>, AppError> {
    let Some(value) = parts.headers.get(VISITOR_HEADER) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| AppError::Validation(format!("Invalid {VISITOR_HEADER} header")))?;
    Visitor::parse(raw).map(Some)
}

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        visitor_from_parts(parts)
            .and_then(|visitor| {
                visitor.ok_or_else(|| {
                    AppError::Validation(format!("Missing {VISITOR_HEADER} header"))
                })
            })
            .map_err(error_response)
    }
}

/// `Option<Visitor>` is `None` without the header; a malformed header is still rejected.
impl<S> OptionalFromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        visitor_from_parts(parts).map_err(error_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a1b2-c3_d4", true)]
    #[case("  padded  ", true)]
    #[case("", false)]
    #[case("has space", false)]
    #[case("semi;colon", false)]
    fn test_parse_visitor(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(Visitor::parse(raw).is_ok(), ok);
    }

    #[test]
    fn test_parse_rejects_overlong_id() {
        assert!(Visitor::parse(&"v".repeat(MAX_VISITOR_ID_LEN)).is_ok());
        assert!(Visitor::parse(&"v".repeat(MAX_VISITOR_ID_LEN + 1)).is_err());
    }
}
