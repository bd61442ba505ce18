//! Path, query and form extractors whose rejections use the API error body.

use axum::extract::{Form, FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use contacts_core::error::AppError;

use crate::error::ApiError;

/// Map an axum rejection onto the matching error kind.
///
/// 422 stays a validation error; everything else is a bad request.
pub(crate) fn rejection_error(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        AppError::validation(message).into()
    } else {
        AppError::bad_request(message).into()
    }
}

/// Typed path parameters.
#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| rejection_error(e.status(), e.body_text()))?;
        Ok(ValidPath(value))
    }
}

/// Typed query string.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| rejection_error(e.status(), e.body_text()))?;
        Ok(ValidQuery(value))
    }
}

/// `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone)]
pub struct ValidForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| rejection_error(e.status(), e.body_text()))?;
        Ok(ValidForm(value))
    }
}
