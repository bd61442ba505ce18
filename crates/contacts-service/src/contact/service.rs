//! Contact CRUD, filtering, and upcoming birthdays.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use contacts_core::error::AppError;
use contacts_core::types::PageRequest;
use contacts_database::store::ContactStore;
use contacts_entity::contact::{
    BirthdayWindow, Contact, ContactFilter, CreateContact, UpdateContact,
};

use crate::context::RequestContext;

const NOT_FOUND: &str = "Contact not found";

/// Contact operations, always scoped to the acting user.
#[derive(Debug, Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(contacts: Arc<dyn ContactStore>) -> Self {
        Self { contacts }
    }

    /// List contacts matching a raw `field::value|...` filter.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Contact>, AppError> {
        let filter = ContactFilter::parse(filter)?;
        self.contacts.list(ctx.user_id(), &filter, page).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Contact, AppError> {
        self.contacts
            .find(ctx.user_id(), id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))
    }

    /// Contacts with a birthday in the next seven days (UTC calendar).
    pub async fn upcoming_birthdays(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<Vec<Contact>, AppError> {
        self.upcoming_birthdays_from(ctx, Utc::now().date_naive(), page)
            .await
    }

    /// Same as [`upcoming_birthdays`](Self::upcoming_birthdays) with an explicit today.
    pub async fn upcoming_birthdays_from(
        &self,
        ctx: &RequestContext,
        today: NaiveDate,
        page: PageRequest,
    ) -> Result<Vec<Contact>, AppError> {
        self.contacts
            .upcoming_birthdays(ctx.user_id(), BirthdayWindow::upcoming(today), page)
            .await
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateContact,
    ) -> Result<Contact, AppError> {
        let contact = self.contacts.create(ctx.user_id(), &data).await?;
        info!(user_id = %ctx.user_id(), contact_id = %contact.id, "Contact created");
        Ok(contact)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateContact,
    ) -> Result<Contact, AppError> {
        let contact = self
            .contacts
            .update(ctx.user_id(), id, &data)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
        info!(user_id = %ctx.user_id(), contact_id = %id, changed = data.is_dirty(), "Contact updated");
        Ok(contact)
    }

    /// Delete a contact and return what was removed.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<Contact, AppError> {
        let contact = self
            .contacts
            .delete(ctx.user_id(), id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
        info!(user_id = %ctx.user_id(), contact_id = %id, "Contact deleted");
        Ok(contact)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use contacts_core::error::ErrorKind;
    use contacts_database::memory::MemoryContactStore;
    use contacts_entity::user::User;

    use super::*;

    fn ctx() -> RequestContext {
        let now = Utc::now();
        RequestContext::new(User {
            id: Uuid::new_v4(),
            username: "alan".into(),
            email: format!("{}@example.com", Uuid::new_v4()),
            password_hash: String::new(),
            avatar: None,
            refresh_token: None,
            confirmed: true,
            created_at: now,
            updated_at: now,
        })
    }

    fn data(name: &str, surname: &str, birthday: NaiveDate) -> CreateContact {
        CreateContact {
            name: name.into(),
            surname: surname.into(),
            email: "someone@example.com".into(),
            phone: "555-0100".into(),
            birthday,
            address: Some("1 Main St".into()),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> ContactService {
        ContactService::new(Arc::new(MemoryContactStore::new()))
    }

    #[tokio::test]
    async fn test_crud_round() {
        let svc = service();
        let me = ctx();
        let created = svc
            .create(&me, data("Alan", "Brown", ymd(1990, 5, 17)))
            .await
            .unwrap();
        assert_eq!(svc.get(&me, created.id).await.unwrap(), created);

        let updated = svc
            .update(
                &me,
                created.id,
                UpdateContact {
                    phone: Some("555-0199".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone, "555-0199");
        assert_eq!(updated.name, "Alan");
        assert!(updated.updated_at >= created.updated_at);

        let removed = svc.delete(&me, created.id).await.unwrap();
        assert_eq!(removed.id, created.id);
        let err = svc.get(&me, created.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "Contact not found");
    }

    #[tokio::test]
    async fn test_other_users_contacts_are_not_found() {
        let svc = service();
        let owner = ctx();
        let intruder = ctx();
        let c = svc
            .create(&owner, data("Alan", "Brown", ymd(1990, 5, 17)))
            .await
            .unwrap();

        assert_eq!(svc.get(&intruder, c.id).await.unwrap_err().kind, ErrorKind::NotFound);
        assert_eq!(
            svc.update(&intruder, c.id, UpdateContact::default())
                .await
                .unwrap_err()
                .kind,
            ErrorKind::NotFound
        );
        assert_eq!(svc.delete(&intruder, c.id).await.unwrap_err().kind, ErrorKind::NotFound);
        assert!(
            svc.list(&intruder, None, PageRequest::default())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_list_with_filter() {
        let svc = service();
        let me = ctx();
        svc.create(&me, data("Alan", "Brown", ymd(1990, 5, 17))).await.unwrap();
        svc.create(&me, data("Alan", "Turing", ymd(1912, 6, 23))).await.unwrap();
        svc.create(&me, data("Grace", "Brown", ymd(1906, 12, 9))).await.unwrap();

        let found = svc
            .list(&me, Some("name::Alan|surname::Brown"), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].surname, "Brown");

        let err = svc
            .list(&me, Some("nickname::Al"), PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_upcoming_birthdays() {
        let svc = service();
        let me = ctx();
        svc.create(&me, data("Soon", "A", ymd(1990, 3, 12))).await.unwrap();
        svc.create(&me, data("Today", "B", ymd(1985, 3, 10))).await.unwrap();
        svc.create(&me, data("Later", "C", ymd(1985, 3, 17))).await.unwrap();
        svc.create(&me, data("Past", "D", ymd(1985, 3, 9))).await.unwrap();

        let found = svc
            .upcoming_birthdays_from(&me, ymd(2024, 3, 10), PageRequest::new(0, 20))
            .await
            .unwrap();
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Today", "Soon"]);
    }
}
