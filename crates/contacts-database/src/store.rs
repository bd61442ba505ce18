//! Persistence seams consumed by the service layer.
//!
//! Each trait has a Postgres implementation in [`crate::repositories`] and
//! an in-memory one in [`crate::memory`].

use async_trait::async_trait;
use uuid::Uuid;

use contacts_core::result::AppResult;
use contacts_core::types::PageRequest;
use contacts_entity::contact::{BirthdayWindow, Contact, ContactFilter, CreateContact, UpdateContact};
use contacts_entity::user::{CreateUser, User};

/// Account persistence.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user. A taken email yields a `Conflict` error.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Mark the email as verified. Returns `false` when no user has it.
    async fn confirm_email(&self, email: &str) -> AppResult<bool>;

    /// Replace (or clear) the stored refresh token.
    async fn update_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<()>;

    /// Set the avatar URL and return the updated user.
    async fn update_avatar(&self, id: Uuid, url: &str) -> AppResult<Option<User>>;

    /// List users ordered by creation time.
    async fn list(&self, page: PageRequest) -> AppResult<Vec<User>>;
}

/// Address-book persistence. Every operation is scoped to one owner.
#[async_trait]
pub trait ContactStore: Send + Sync + std::fmt::Debug + 'static {
    /// Contacts matching `filter`, ordered by surname, name and id.
    async fn list(
        &self,
        owner: Uuid,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> AppResult<Vec<Contact>>;

    /// A single contact, if it exists and belongs to `owner`.
    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Contact>>;

    /// Contacts whose birthday falls in `window`, soonest first.
    async fn upcoming_birthdays(
        &self,
        owner: Uuid,
        window: BirthdayWindow,
        page: PageRequest,
    ) -> AppResult<Vec<Contact>>;

    async fn create(&self, owner: Uuid, data: &CreateContact) -> AppResult<Contact>;

    /// Apply a partial update. `None` when the contact is missing.
    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        data: &UpdateContact,
    ) -> AppResult<Option<Contact>>;

    /// Remove a contact and return it. `None` when the contact is missing.
    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Contact>>;
}
