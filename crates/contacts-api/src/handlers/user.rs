//! User self-service handlers.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};

use contacts_core::error::{AppError, ErrorKind};
use contacts_entity::user::User;
use contacts_storage::avatar::AvatarProcessor;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::extractors::rejection::rejection_error;
use crate::state::AppState;

/// Name of the multipart field carrying the image.
const AVATAR_FIELD: &str = "file";

/// GET /api/users/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Json<User> {
    Json(state.user_service.me(&auth))
}

/// PATCH /api/users/avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<User>> {
    let mut multipart = multipart.map_err(|e| rejection_error(e.status(), e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::BadRequest, "Malformed multipart body", e))?
    {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        if let Some(content_type) = field.content_type() {
            if !AvatarProcessor::is_supported(content_type) {
                return Err(AppError::validation(format!(
                    "Unsupported image type: {content_type}"
                ))
                .into());
            }
        }

        let data = field.bytes().await.map_err(|e| {
            AppError::with_source(ErrorKind::BadRequest, "Failed to read upload", e)
        })?;

        let user = state.user_service.update_avatar(&auth, data).await?;
        return Ok(Json(user));
    }

    Err(AppError::validation(format!("Missing multipart field '{AVATAR_FIELD}'")).into())
}
