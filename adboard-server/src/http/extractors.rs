//! Custom Axum extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Identity of the caller, taken from the `x-author` header.
///
/// Authentication itself is handled by whatever sits in front of this
/// service; the header carries the already-authenticated username. Absent
/// or non-UTF-8 headers yield `Author(None)` - anonymous ads are allowed.
pub struct Author(pub Option<String>);

impl<S> FromRequestParts<S> for Author
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let author = parts
            .headers
            .get("x-author")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Ok(Self(author))
    }
}
