//! Request extractors that report failures in the standard error format.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::AppError;

/// `Json<T>` whose rejections render as [`AppError`].
///
/// Well-formed JSON that does not fit `T` (wrong type, unknown enum variant,
/// missing field) becomes a 422 validation error; anything else is a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => AppError::validation(
            vec![json!({ "error": err.body_text() })],
            "request body does not match the expected schema",
        ),
        JsonRejection::JsonSyntaxError(err) => {
            AppError::bad_request(format!("malformed JSON body: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request("expected `Content-Type: application/json`")
        }
        other => AppError::bad_request(other.body_text()),
    }
}

/// `Path<T>` whose rejections render as [`AppError`].
///
/// Segments that fail to decode or deserialize (bad percent-encoding,
/// invalid UTF-8, wrong type) are 400s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection_to_error(rejection)),
        }
    }
}

fn path_rejection_to_error(rejection: PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(err) => {
            AppError::bad_request(format!("invalid path parameter: {}", err.body_text()))
        }
        // Route declared without the expected parameters
        other => AppError::Internal(anyhow::anyhow!(other.body_text())),
    }
}
