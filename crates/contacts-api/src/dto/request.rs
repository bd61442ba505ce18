//! Request DTOs: deserialized and validated at the HTTP boundary.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use contacts_entity::contact::{CreateContact, UpdateContact};
use contacts_service::SignupRequest;

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupBody {
    #[validate(length(min = 2, max = 50))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub password: String,
}

impl From<SignupBody> for SignupRequest {
    fn from(body: SignupBody) -> Self {
        Self {
            username: body.username,
            email: body.email,
            password: body.password,
        }
    }
}

/// OAuth2-style password form of `POST /auth/login`; `username` carries the email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/request_email`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestEmailBody {
    #[validate(email)]
    pub email: String,
}

/// Body of `POST /contacts`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactBody {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub surname: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(custom(function = "validate_birthday"))]
    pub birthday: NaiveDate,
    #[validate(length(max = 150))]
    pub address: Option<String>,
}

impl From<ContactBody> for CreateContact {
    fn from(body: ContactBody) -> Self {
        Self {
            name: body.name,
            surname: body.surname,
            email: body.email,
            phone: body.phone,
            birthday: body.birthday,
            address: body.address,
        }
    }
}

/// Body of `PUT`/`PATCH /contacts/{id}`; only the fields present change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactUpdateBody {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub surname: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(custom(function = "validate_birthday"))]
    pub birthday: Option<NaiveDate>,
    #[validate(length(max = 150))]
    pub address: Option<String>,
}

impl From<ContactUpdateBody> for UpdateContact {
    fn from(body: ContactUpdateBody) -> Self {
        Self {
            name: body.name,
            surname: body.surname,
            email: body.email,
            phone: body.phone,
            birthday: body.birthday,
            address: body.address,
        }
    }
}

/// At most 20 chars of digits, `+`, spaces, dashes, dots and parentheses,
/// with at least 5 digits.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '.' | '(' | ')'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();

    if !allowed || digits < 5 || phone.chars().count() > 20 {
        let mut err = ValidationError::new("phone");
        err.message = Some("Invalid phone number".into());
        return Err(err);
    }
    Ok(())
}

fn validate_birthday(birthday: &NaiveDate) -> Result<(), ValidationError> {
    if *birthday > Utc::now().date_naive() {
        let mut err = ValidationError::new("birthday");
        err.message = Some("Birthday cannot be in the future".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_body() -> ContactBody {
        ContactBody {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0958".into(),
            birthday: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            address: None,
        }
    }

    #[test]
    fn test_valid_contact_passes() {
        assert!(contact_body().validate().is_ok());
    }

    #[test]
    fn test_bad_fields_are_reported() {
        let body = ContactBody {
            email: "not-an-email".into(),
            phone: "call me".into(),
            ..contact_body()
        };
        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn test_future_birthday_rejected() {
        let body = ContactBody {
            birthday: Utc::now().date_naive() + chrono::Duration::days(3),
            ..contact_body()
        };
        assert!(body.validate().unwrap_err().field_errors().contains_key("birthday"));
    }

    #[test]
    fn test_empty_update_is_valid() {
        let body = ContactUpdateBody::default();
        assert!(body.validate().is_ok());
        assert!(!UpdateContact::from(body).is_dirty());
    }

    #[test]
    fn test_update_checks_present_fields_only() {
        let body = ContactUpdateBody {
            phone: Some("12".into()),
            ..ContactUpdateBody::default()
        };
        assert!(body.validate().unwrap_err().field_errors().contains_key("phone"));
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("(050) 123-45-67").is_ok());
        assert!(validate_phone("1234").is_err());
        assert!(validate_phone("12 34 5").is_ok());
        // long enough, but only four digits
        assert!(validate_phone("+(12) 34-..").is_err());
        assert!(validate_phone("123456789012345678901").is_err());
    }
}
