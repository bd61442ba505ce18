//! In-memory store implementations.
//!
//! Used by the service and API test suites, and handy for running the
//! server without PostgreSQL. Ordering and conflict semantics match the
//! Postgres stores.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use contacts_core::error::AppError;
use contacts_core::result::AppResult;
use contacts_core::types::PageRequest;
use contacts_entity::contact::{BirthdayWindow, Contact, ContactFilter, CreateContact, UpdateContact};
use contacts_entity::user::{CreateUser, User};

use crate::store::{ContactStore, UserStore};

/// User store held in a process-local map.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&data.email)) {
            return Err(AppError::conflict("Account already exists"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            avatar: data.avatar.clone(),
            refresh_token: None,
            confirmed: false,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn confirm_email(&self, email: &str) -> AppResult<bool> {
        let mut users = self.users.write().await;
        match users.values_mut().find(|u| u.email.eq_ignore_ascii_case(email)) {
            Some(user) => {
                user.confirmed = true;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<()> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.refresh_token = token.map(str::to_string);
        }
        Ok(())
    }

    async fn update_avatar(&self, id: Uuid, url: &str) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            user.avatar = Some(url.to_string());
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn list(&self, page: PageRequest) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(page.slice(users))
    }
}

/// Contact store held in a process-local map.
#[derive(Debug, Clone, Default)]
pub struct MemoryContactStore {
    contacts: Arc<RwLock<HashMap<Uuid, Contact>>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_name(a: &Contact, b: &Contact) -> std::cmp::Ordering {
    a.surname
        .cmp(&b.surname)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list(
        &self,
        owner: Uuid,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> AppResult<Vec<Contact>> {
        let mut found: Vec<Contact> = self
            .contacts
            .read()
            .await
            .values()
            .filter(|c| c.user_id == owner && filter.matches(c))
            .cloned()
            .collect();
        found.sort_by(by_name);
        Ok(page.slice(found))
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Contact>> {
        Ok(self
            .contacts
            .read()
            .await
            .get(&id)
            .filter(|c| c.user_id == owner)
            .cloned())
    }

    async fn upcoming_birthdays(
        &self,
        owner: Uuid,
        window: BirthdayWindow,
        page: PageRequest,
    ) -> AppResult<Vec<Contact>> {
        let mut found: Vec<Contact> = self
            .contacts
            .read()
            .await
            .values()
            .filter(|c| c.user_id == owner && window.contains(c.birthday))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            window
                .order_key(a.birthday)
                .cmp(&window.order_key(b.birthday))
                .then_with(|| by_name(a, b))
        });
        Ok(page.slice(found))
    }

    async fn create(&self, owner: Uuid, data: &CreateContact) -> AppResult<Contact> {
        let contact = data.clone().into_contact(owner);
        self.contacts
            .write()
            .await
            .insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        data: &UpdateContact,
    ) -> AppResult<Option<Contact>> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts
            .get_mut(&id)
            .filter(|c| c.user_id == owner)
            .map(|contact| {
                data.apply(contact, Utc::now());
                contact.clone()
            }))
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Contact>> {
        let mut contacts = self.contacts.write().await;
        if contacts.get(&id).is_some_and(|c| c.user_id == owner) {
            Ok(contacts.remove(&id))
        } else {
            Ok(None)
        }
    }
}
