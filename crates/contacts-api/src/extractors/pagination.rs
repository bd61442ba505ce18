//! Query parameters for the contact list endpoints.

use serde::{Deserialize, Serialize};

use contacts_core::types::PageRequest;

/// Default page size for `GET /contacts`.
pub const CONTACTS_DEFAULT_LIMIT: u64 = 100;

/// Default page size for `GET /contacts/birthdays`.
pub const BIRTHDAYS_DEFAULT_LIMIT: u64 = 20;

/// `?filter=&skip=&limit=` on the contact listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactListQuery {
    /// Raw `field::value|field::value` filter.
    pub filter: Option<String>,
    /// Items to skip.
    pub skip: Option<u64>,
    /// Items per page (max: 100).
    pub limit: Option<u64>,
}

impl ContactListQuery {
    /// Converts to a `PageRequest`.
    pub fn page(&self) -> PageRequest {
        PageRequest::from_query(self.skip, self.limit, CONTACTS_DEFAULT_LIMIT)
    }
}

/// `?skip=&limit=` on the birthdays listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BirthdayQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl BirthdayQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest::from_query(self.skip, self.limit, BIRTHDAYS_DEFAULT_LIMIT)
    }
}
