//! JSON extractor with automatic validation using the validator crate.

use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use contacts_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::rejection::rejection_error;

/// JSON body that has passed its `Validate` rules.
///
/// Malformed JSON is a 400; a body that parses but breaks a rule, or is
/// missing a field, is a 422 with per-field details.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| rejection_error(e.status(), e.body_text()))?;

        data.validate().map_err(|e| {
            AppError::validation("Request validation failed").with_details(field_details(&e))
        })?;

        Ok(ValidatedJson(data))
    }
}

/// `{field: [{code, message, params}]}` for every failing field.
pub(crate) fn field_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(messages))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}
