use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use domain::error::{
    DomainErrorKind, EntityErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Domain(DomainError),
    Web(WebErrorKind),
}

/// Errors originating in the web layer itself, before any domain call.
#[derive(Debug, PartialEq)]
pub enum WebErrorKind {
    Input,
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Web(web_error_kind) => match web_error_kind {
                WebErrorKind::Input => (StatusCode::BAD_REQUEST, "BAD REQUEST").into_response(),
            },
            Error::Domain(domain_error) => match domain_error.error_kind {
                DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                    InternalErrorKind::Entity(entity_error_kind) => match entity_error_kind {
                        EntityErrorKind::NotFound => {
                            (StatusCode::NOT_FOUND, "NOT FOUND").into_response()
                        }
                        EntityErrorKind::Invalid => {
                            (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE ENTITY")
                                .into_response()
                        }
                        EntityErrorKind::Other(_) => {
                            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR")
                                .into_response()
                        }
                    },
                    InternalErrorKind::Config => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                    }
                    InternalErrorKind::Other(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                    }
                },
                DomainErrorKind::External(external_error_kind) => match external_error_kind {
                    ExternalErrorKind::Network => {
                        (StatusCode::BAD_GATEWAY, "BAD GATEWAY").into_response()
                    }
                    ExternalErrorKind::Unauthorized => {
                        (StatusCode::UNAUTHORIZED, "UNAUTHORIZED").into_response()
                    }
                    ExternalErrorKind::Other(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                    }
                },
            },
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self::Domain(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: Error) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn missing_input_maps_to_bad_request() {
        assert_eq!(status_of(Error::Web(WebErrorKind::Input)), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_entity_maps_to_404() {
        let error = Error::Domain(DomainError {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::NotFound,
            )),
        });
        assert_eq!(status_of(error), StatusCode::NOT_FOUND);
    }

    #[test]
    fn provider_network_failure_maps_to_bad_gateway() {
        let error = Error::Domain(DomainError {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
        });
        assert_eq!(status_of(error), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn rejected_token_maps_to_unauthorized() {
        let error = Error::Domain(DomainError {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Unauthorized),
        });
        assert_eq!(status_of(error), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn provider_detail_is_not_leaked_to_the_client() {
        // Upstream error bodies are logged, never surfaced verbatim.
        let error = Error::Domain(DomainError {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                "provider secret detail".to_string(),
            )),
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
