use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{ContactStore, Database};
use crate::common::StoreError;
use crate::models::{ContactCreate, ContactSubmission};

pub async fn create_contact(
    pool: &PgPool,
    data: &ContactCreate,
    created_at: DateTime<Utc>,
) -> Result<ContactSubmission, sqlx::Error> {
    sqlx::query_as::<_, ContactSubmission>(
        r#"
        INSERT INTO contact_submissions (name, email, phone, subject, message, status, created_at)
        VALUES ($1, $2, $3, $4, $5, 'new', $6)
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(data.phone.as_deref())
    .bind(&data.subject)
    .bind(&data.message)
    .bind(created_at)
    .fetch_one(pool)
    .await
}

pub async fn get_contact(pool: &PgPool, id: Uuid) -> Result<Option<ContactSubmission>, sqlx::Error> {
    sqlx::query_as::<_, ContactSubmission>(r#"SELECT * FROM contact_submissions WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_contacts(
    pool: &PgPool,
    only_new: bool,
) -> Result<Vec<ContactSubmission>, sqlx::Error> {
    sqlx::query_as::<_, ContactSubmission>(
        r#"
        SELECT *
        FROM contact_submissions
        WHERE $1 = FALSE OR status = 'new'
        ORDER BY created_at DESC
        "#,
    )
    .bind(only_new)
    .fetch_all(pool)
    .await
}

pub async fn count_new_contacts(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM contact_submissions WHERE status = 'new'"#)
        .fetch_one(pool)
        .await
}

pub async fn mark_contact_read(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ContactSubmission>, sqlx::Error> {
    sqlx::query_as::<_, ContactSubmission>(
        r#"
        UPDATE contact_submissions
        SET status = CASE WHEN status = 'new' THEN 'read' ELSE status END
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn mark_contact_responded(
    pool: &PgPool,
    id: Uuid,
    admin_notes: Option<&str>,
) -> Result<Option<ContactSubmission>, sqlx::Error> {
    sqlx::query_as::<_, ContactSubmission>(
        r#"
        UPDATE contact_submissions
        SET
            status = 'responded',
            admin_notes = COALESCE($1, admin_notes)
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(admin_notes)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_contact_notes(
    pool: &PgPool,
    id: Uuid,
    admin_notes: &str,
) -> Result<Option<ContactSubmission>, sqlx::Error> {
    sqlx::query_as::<_, ContactSubmission>(
        r#"
        UPDATE contact_submissions
        SET admin_notes = $1
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(admin_notes)
    .bind(id)
    .fetch_optional(pool)
    .await
}

#[async_trait]
impl ContactStore for Database {
    async fn create_contact(
        &self,
        data: &ContactCreate,
        created_at: DateTime<Utc>,
    ) -> Result<ContactSubmission, StoreError> {
        Ok(create_contact(&self.pool, data, created_at).await?)
    }

    async fn get_contact(&self, id: Uuid) -> Result<Option<ContactSubmission>, StoreError> {
        Ok(get_contact(&self.pool, id).await?)
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, StoreError> {
        Ok(list_contacts(&self.pool, false).await?)
    }

    async fn list_new_contacts(&self) -> Result<Vec<ContactSubmission>, StoreError> {
        Ok(list_contacts(&self.pool, true).await?)
    }

    async fn count_new_contacts(&self) -> Result<i64, StoreError> {
        Ok(count_new_contacts(&self.pool).await?)
    }

    async fn mark_contact_read(&self, id: Uuid) -> Result<Option<ContactSubmission>, StoreError> {
        Ok(mark_contact_read(&self.pool, id).await?)
    }

    async fn mark_contact_responded(
        &self,
        id: Uuid,
        admin_notes: Option<&str>,
    ) -> Result<Option<ContactSubmission>, StoreError> {
        Ok(mark_contact_responded(&self.pool, id, admin_notes).await?)
    }

    async fn update_contact_notes(
        &self,
        id: Uuid,
        admin_notes: &str,
    ) -> Result<Option<ContactSubmission>, StoreError> {
        Ok(update_contact_notes(&self.pool, id, admin_notes).await?)
    }
}
