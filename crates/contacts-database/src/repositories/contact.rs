//! PostgreSQL contact store.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use contacts_core::error::{AppError, ErrorKind};
use contacts_core::result::AppResult;
use contacts_core::types::PageRequest;
use contacts_entity::contact::{
    BirthdayWindow, Contact, ContactFilter, CreateContact, FilterValue, UpdateContact,
};

use crate::store::ContactStore;

const BIRTHDAY_KEY: &str = "to_char(birthday, 'MM-DD')";

/// Contact persistence backed by the `contacts` table.
#[derive(Debug, Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append `AND column = $n` for every predicate. Column names come from
/// the `ContactField` enum, values are always bound.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ContactFilter) {
    for (field, value) in filter.predicates() {
        qb.push(" AND ").push(field.column()).push(" = ");
        match value {
            FilterValue::Text(text) => qb.push_bind(text.clone()),
            FilterValue::Date(date) => qb.push_bind(*date),
        };
    }
}

fn push_page(qb: &mut QueryBuilder<'_, Postgres>, page: PageRequest) {
    qb.push(" OFFSET ")
        .push_bind(page.offset())
        .push(" LIMIT ")
        .push_bind(page.sql_limit());
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn list(
        &self,
        owner: Uuid,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> AppResult<Vec<Contact>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM contacts WHERE user_id = ");
        qb.push_bind(owner);
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY surname ASC, name ASC, id ASC");
        push_page(&mut qb, page);

        qb.build_query_as::<Contact>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list contacts", e))
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Contact>> {
        sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find contact", e))
    }

    async fn upcoming_birthdays(
        &self,
        owner: Uuid,
        window: BirthdayWindow,
        page: PageRequest,
    ) -> AppResult<Vec<Contact>> {
        if window.end() == window.start() {
            return Ok(Vec::new());
        }

        let start = window.start_key();
        let end = window.end_key();

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM contacts WHERE user_id = ");
        qb.push_bind(owner);
        if !window.is_full_year() {
            let joiner = if window.wraps() { " OR " } else { " AND " };
            qb.push(" AND (")
                .push(BIRTHDAY_KEY)
                .push(" >= ")
                .push_bind(start.clone())
                .push(joiner)
                .push(BIRTHDAY_KEY)
                .push(" < ")
                .push_bind(end)
                .push(")");
        }
        qb.push(" ORDER BY (")
            .push(BIRTHDAY_KEY)
            .push(" < ")
            .push_bind(start)
            .push(") ASC, ")
            .push(BIRTHDAY_KEY)
            .push(" ASC, surname ASC, name ASC, id ASC");
        push_page(&mut qb, page);

        qb.build_query_as::<Contact>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list upcoming birthdays", e)
            })
    }

    async fn create(&self, owner: Uuid, data: &CreateContact) -> AppResult<Contact> {
        sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (id, user_id, name, surname, email, phone, birthday, address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(&data.name)
        .bind(&data.surname)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(data.birthday)
        .bind(&data.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create contact", e))
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        data: &UpdateContact,
    ) -> AppResult<Option<Contact>> {
        sqlx::query_as::<_, Contact>(
            "UPDATE contacts SET name = COALESCE($3, name), \
                                 surname = COALESCE($4, surname), \
                                 email = COALESCE($5, email), \
                                 phone = COALESCE($6, phone), \
                                 birthday = COALESCE($7, birthday), \
                                 address = COALESCE($8, address), \
                                 updated_at = CASE WHEN $9 THEN NOW() ELSE updated_at END \
             WHERE id = $1 AND user_id = $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(&data.name)
        .bind(&data.surname)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(data.birthday)
        .bind(&data.address)
        .bind(data.is_dirty())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update contact", e))
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Contact>> {
        sqlx::query_as::<_, Contact>(
            "DELETE FROM contacts WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete contact", e))
    }
}
