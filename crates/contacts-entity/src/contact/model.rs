//! Contact entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An address-book record owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Contact {
    /// Unique contact identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// First name.
    pub name: String,
    /// Last name.
    pub surname: String,
    /// Email address.
    pub email: String,
    /// Phone number, stored as entered.
    pub phone: String,
    /// Date of birth.
    pub birthday: NaiveDate,
    /// Postal address.
    pub address: Option<String>,
    /// When the contact was created.
    pub created_at: DateTime<Utc>,
    /// When the contact was last changed.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContact {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub birthday: NaiveDate,
    pub address: Option<String>,
}

impl CreateContact {
    /// Materialize a row for `user_id` with fresh id and timestamps.
    pub fn into_contact(self, user_id: Uuid) -> Contact {
        let now = Utc::now();
        Contact {
            id: Uuid::new_v4(),
            user_id,
            name: self.name,
            surname: self.surname,
            email: self.email,
            phone: self.phone,
            birthday: self.birthday,
            address: self.address,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a contact. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContact {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub address: Option<String>,
}

impl UpdateContact {
    /// Whether the update carries at least one field.
    pub fn is_dirty(&self) -> bool {
        self.name.is_some()
            || self.surname.is_some()
            || self.email.is_some()
            || self.phone.is_some()
            || self.birthday.is_some()
            || self.address.is_some()
    }

    /// Overwrite the provided fields on `contact`.
    ///
    /// `updated_at` moves to `now` only when the update is dirty.
    pub fn apply(&self, contact: &mut Contact, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            contact.name = name.clone();
        }
        if let Some(surname) = &self.surname {
            contact.surname = surname.clone();
        }
        if let Some(email) = &self.email {
            contact.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            contact.phone = phone.clone();
        }
        if let Some(birthday) = self.birthday {
            contact.birthday = birthday;
        }
        if let Some(address) = &self.address {
            contact.address = Some(address.clone());
        }
        if self.is_dirty() {
            contact.updated_at = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn contact() -> Contact {
        CreateContact {
            name: "Alan".into(),
            surname: "Brown".into(),
            email: "alan@example.com".into(),
            phone: "+380501112233".into(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            address: None,
        }
        .into_contact(Uuid::new_v4())
    }

    #[test]
    fn test_empty_update_is_clean_and_keeps_timestamp() {
        let mut c = contact();
        let before = c.clone();
        let update = UpdateContact::default();
        assert!(!update.is_dirty());
        update.apply(&mut c, Utc::now() + Duration::hours(1));
        assert_eq!(c, before);
    }

    #[test]
    fn test_apply_overwrites_only_provided_fields() {
        let mut c = contact();
        let later = c.updated_at + Duration::minutes(5);
        let update = UpdateContact {
            phone: Some("555-0100".into()),
            address: Some("1 Main St".into()),
            ..Default::default()
        };
        update.apply(&mut c, later);
        assert_eq!(c.name, "Alan");
        assert_eq!(c.phone, "555-0100");
        assert_eq!(c.address.as_deref(), Some("1 Main St"));
        assert_eq!(c.updated_at, later);
    }
}
