//! Contact list filter syntax.
//!
//! Filters arrive as `field::value` pairs joined by `|`, for example
//! `name::Alan|surname::Brown`. Every pair is an exact-match predicate and
//! all predicates are combined with AND.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use contacts_core::error::AppError;

use super::model::Contact;

const PAIR_SEPARATOR: char = '|';
const KEY_SEPARATOR: &str = "::";

/// Contact columns that may be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Surname,
    Email,
    Phone,
    Birthday,
    Address,
}

impl ContactField {
    /// Database column for this field.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Birthday => "birthday",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for ContactField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "surname" => Ok(Self::Surname),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "birthday" => Ok(Self::Birthday),
            "address" => Ok(Self::Address),
            other => Err(AppError::validation(format!(
                "Unknown filter field '{other}'"
            ))),
        }
    }
}

/// Typed right-hand side of a filter predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Date(NaiveDate),
}

/// Parsed set of exact-match predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    predicates: BTreeMap<ContactField, FilterValue>,
}

impl ContactFilter {
    /// Parse an optional raw filter. `None` and blank input yield no predicates.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw {
            Some(raw) => raw.parse(),
            None => Ok(Self::default()),
        }
    }

    /// Whether no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Iterate over predicates in column order.
    pub fn predicates(&self) -> impl Iterator<Item = (ContactField, &FilterValue)> {
        self.predicates.iter().map(|(field, value)| (*field, value))
    }

    /// Value bound to `field`, if any.
    pub fn get(&self, field: ContactField) -> Option<&FilterValue> {
        self.predicates.get(&field)
    }

    /// Add or replace a predicate.
    pub fn with(mut self, field: ContactField, value: FilterValue) -> Self {
        self.predicates.insert(field, value);
        self
    }

    /// Evaluate the filter against an in-memory contact.
    pub fn matches(&self, contact: &Contact) -> bool {
        self.predicates.iter().all(|(field, value)| match (field, value) {
            (ContactField::Name, FilterValue::Text(v)) => contact.name == *v,
            (ContactField::Surname, FilterValue::Text(v)) => contact.surname == *v,
            (ContactField::Email, FilterValue::Text(v)) => contact.email == *v,
            (ContactField::Phone, FilterValue::Text(v)) => contact.phone == *v,
            (ContactField::Address, FilterValue::Text(v)) => {
                contact.address.as_deref() == Some(v.as_str())
            }
            (ContactField::Birthday, FilterValue::Date(d)) => contact.birthday == *d,
            _ => false,
        })
    }
}

impl FromStr for ContactFilter {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut filter = Self::default();
        if raw.trim().is_empty() {
            return Ok(filter);
        }

        for pair in raw.split(PAIR_SEPARATOR) {
            let (key, value) = pair.split_once(KEY_SEPARATOR).ok_or_else(|| {
                AppError::validation(format!(
                    "Malformed filter '{pair}', expected field::value"
                ))
            })?;
            let field: ContactField = key.trim().parse()?;
            let value = match field {
                ContactField::Birthday => {
                    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
                        AppError::validation(format!(
                            "Invalid birthday '{value}' in filter, expected YYYY-MM-DD"
                        ))
                    })?;
                    FilterValue::Date(date)
                }
                _ => FilterValue::Text(value.to_string()),
            };
            filter.predicates.insert(field, value);
        }

        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use contacts_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_parse_pairs() {
        let filter: ContactFilter = "name::Alan|surname::Brown".parse().unwrap();
        assert_eq!(
            filter.get(ContactField::Name),
            Some(&FilterValue::Text("Alan".into()))
        );
        assert_eq!(
            filter.get(ContactField::Surname),
            Some(&FilterValue::Text("Brown".into()))
        );
        assert_eq!(filter.predicates().count(), 2);
    }

    #[test]
    fn test_blank_and_missing_filters_are_empty() {
        assert!(ContactFilter::parse(None).unwrap().is_empty());
        assert!(ContactFilter::parse(Some("  ")).unwrap().is_empty());
    }

    #[test]
    fn test_later_duplicate_wins() {
        let filter: ContactFilter = "name::Alan|name::Grace".parse().unwrap();
        assert_eq!(
            filter.get(ContactField::Name),
            Some(&FilterValue::Text("Grace".into()))
        );
    }

    #[test]
    fn test_birthday_is_typed() {
        let filter: ContactFilter = "birthday::1990-05-17".parse().unwrap();
        assert_eq!(
            filter.get(ContactField::Birthday),
            Some(&FilterValue::Date(NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()))
        );
    }

    #[test]
    fn test_rejects_malformed_input() {
        for raw in ["name", "name:Alan", "age::30", "::Alan", "birthday::17.05.1990", "name::Alan|"] {
            let err = raw.parse::<ContactFilter>().unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "input {raw:?}");
        }
    }

    #[test]
    fn test_value_may_contain_separator_text() {
        let filter: ContactFilter = "address::12::B Baker St".parse().unwrap();
        assert_eq!(
            filter.get(ContactField::Address),
            Some(&FilterValue::Text("12::B Baker St".into()))
        );
    }
}
