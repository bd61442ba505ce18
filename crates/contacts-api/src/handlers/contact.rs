//! Contact handlers. Every route acts on the caller's own address book.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use contacts_entity::contact::Contact;

use crate::dto::request::{ContactBody, ContactUpdateBody};
use crate::error::ApiResult;
use crate::extractors::{
    AuthUser, BirthdayQuery, ContactListQuery, ValidPath, ValidQuery, ValidatedJson,
};
use crate::state::AppState;

/// GET /api/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidQuery(query): ValidQuery<ContactListQuery>,
) -> ApiResult<Json<Vec<Contact>>> {
    let contacts = state
        .contact_service
        .list(&auth, query.filter.as_deref(), query.page())
        .await?;
    Ok(Json(contacts))
}

/// GET /api/contacts/birthdays
pub async fn upcoming_birthdays(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidQuery(query): ValidQuery<BirthdayQuery>,
) -> ApiResult<Json<Vec<Contact>>> {
    let contacts = state
        .contact_service
        .upcoming_birthdays(&auth, query.page())
        .await?;
    Ok(Json(contacts))
}

/// GET /api/contacts/{id}
pub async fn get_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Json<Contact>> {
    let contact = state.contact_service.get(&auth, id).await?;
    Ok(Json(contact))
}

/// POST /api/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<ContactBody>,
) -> ApiResult<(StatusCode, Json<Contact>)> {
    let contact = state.contact_service.create(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT | PATCH /api/contacts/{id}
pub async fn update_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(body): ValidatedJson<ContactUpdateBody>,
) -> ApiResult<Json<Contact>> {
    let contact = state.contact_service.update(&auth, id, body.into()).await?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> ApiResult<Json<Contact>> {
    let contact = state.contact_service.delete(&auth, id).await?;
    Ok(Json(contact))
}
