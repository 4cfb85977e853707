use crate::extractors::RejectionType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use service::config::ApiVersion;

/// Rejects requests whose `x-version` header is absent or names an API
/// version this deployment does not expose. OAuth redirect endpoints skip
/// this extractor because browser redirects cannot set custom headers.
#[derive(Debug)]
pub(crate) struct CompareApiVersion(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ApiVersion::field_name())
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Missing {} header", ApiVersion::field_name()),
                )
            })?;

        let version = header
            .to_str()
            .map_err(|_| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Invalid {} header", ApiVersion::field_name()),
                )
            })?
            .to_string();

        if ApiVersion::versions().contains(&version.as_str()) {
            Ok(CompareApiVersion(version))
        } else {
            Err((
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version: {version}"),
            ))
        }
    }
}
