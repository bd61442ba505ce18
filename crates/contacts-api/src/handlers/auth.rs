//! Auth handlers: signup, login, refresh, and email confirmation.

use axum::Json;
use axum::extract::State;
use axum::http::header::HOST;
use axum::http::{HeaderMap, StatusCode};

use contacts_auth::jwt::TokenPair;

use crate::dto::request::{LoginForm, RequestEmailBody, SignupBody};
use crate::dto::response::{MessageResponse, SignupResponse};
use crate::error::ApiResult;
use crate::extractors::{BearerToken, ValidForm, ValidPath, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(body): ValidatedJson<SignupBody>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let base_url = base_url(&state, &headers);
    let user = state.auth_service.signup(body.into(), &base_url).await?;
    Ok((StatusCode::CREATED, Json(SignupResponse::new(user))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<LoginForm>,
) -> ApiResult<Json<TokenPair>> {
    let tokens = state
        .auth_service
        .login(&form.username, &form.password)
        .await?;
    Ok(Json(tokens))
}

/// GET /api/auth/refresh_token
pub async fn refresh_token(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<TokenPair>> {
    let tokens = state.auth_service.refresh(&token).await?;
    Ok(Json(tokens))
}

/// GET /api/auth/confirmed_email/{token}
pub async fn confirmed_email(
    State(state): State<AppState>,
    ValidPath(token): ValidPath<String>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.auth_service.confirm_email(&token).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// POST /api/auth/request_email
pub async fn request_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(body): ValidatedJson<RequestEmailBody>,
) -> ApiResult<Json<MessageResponse>> {
    let base_url = base_url(&state, &headers);
    let message = state
        .auth_service
        .request_email(&body.email, &base_url)
        .await?;
    Ok(Json(MessageResponse::new(message)))
}

/// Public origin used in confirmation links, always ending in `/`.
///
/// `server.public_url` wins; otherwise the request's `Host` header and
/// `X-Forwarded-Proto` are used.
pub(crate) fn base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(url) = state.config.server.public_url.as_deref() {
        return format!("{}/", url.trim_end_matches('/'));
    }

    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    format!("{scheme}://{host}/")
}
