use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use super::{Database, ReleaseStore};
use crate::common::{StoreError, is_unique_violation};
use crate::models::{PressRelease, PressReleaseCreate, PressReleaseFields, ReleaseStatus};

pub async fn create_release(
    pool: &PgPool,
    data: &PressReleaseCreate,
) -> Result<PressRelease, StoreError> {
    let fields = &data.fields;
    let result = sqlx::query_as::<_, PressRelease>(
        r#"
        INSERT INTO press_releases (
            slug, title, subtitle, content, category, author, company,
            contact_email, contact_phone, image_url, featured, status,
            created_at, published_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(&data.slug)
    .bind(&fields.title)
    .bind(fields.subtitle.as_deref())
    .bind(&fields.content)
    .bind(fields.category.label())
    .bind(&fields.author)
    .bind(&fields.company)
    .bind(&fields.contact_email)
    .bind(fields.contact_phone.as_deref())
    .bind(fields.image_url.as_deref())
    .bind(fields.featured)
    .bind(data.status.as_str())
    .bind(data.created_at)
    .bind(data.published_at)
    .fetch_one(pool)
    .await;

    match result {
        Ok(release) => Ok(release),
        Err(e) if is_unique_violation(&e) => Err(StoreError::SlugConflict(data.slug.clone())),
        Err(e) => Err(StoreError::Database(e)),
    }
}

pub async fn get_release(pool: &PgPool, id: Uuid) -> Result<Option<PressRelease>, sqlx::Error> {
    sqlx::query_as::<_, PressRelease>(
        r#"
        SELECT *
        FROM press_releases
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_published_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<PressRelease>, sqlx::Error> {
    sqlx::query_as::<_, PressRelease>(
        r#"
        SELECT *
        FROM press_releases
        WHERE slug = $1 AND status = 'published'
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}

pub async fn list_published(
    pool: &PgPool,
    featured_only: bool,
    limit: i64,
) -> Result<Vec<PressRelease>, sqlx::Error> {
    sqlx::query_as::<_, PressRelease>(
        r#"
        SELECT *
        FROM press_releases
        WHERE status = 'published' AND ($1 = FALSE OR featured)
        ORDER BY published_at DESC
        LIMIT $2
        "#,
    )
    .bind(featured_only)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn list_by_status(
    pool: &PgPool,
    status: Option<ReleaseStatus>,
    limit: Option<i64>,
) -> Result<Vec<PressRelease>, sqlx::Error> {
    sqlx::query_as::<_, PressRelease>(
        r#"
        SELECT *
        FROM press_releases
        WHERE $1::text IS NULL OR status = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(status.as_ref().map(ReleaseStatus::as_str))
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn existing_slugs(pool: &PgPool) -> Result<HashSet<String>, sqlx::Error> {
    let slugs = sqlx::query_scalar::<_, String>(r#"SELECT slug FROM press_releases"#)
        .fetch_all(pool)
        .await?;

    Ok(slugs.into_iter().collect())
}

pub async fn count_by_status(pool: &PgPool, status: ReleaseStatus) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM press_releases WHERE status = $1"#)
        .bind(status.as_str())
        .fetch_one(pool)
        .await
}

pub async fn update_release(
    pool: &PgPool,
    id: Uuid,
    fields: &PressReleaseFields,
) -> Result<Option<PressRelease>, sqlx::Error> {
    sqlx::query_as::<_, PressRelease>(
        r#"
        UPDATE press_releases
        SET
            title = $1,
            subtitle = $2,
            content = $3,
            category = $4,
            author = $5,
            company = $6,
            contact_email = $7,
            contact_phone = $8,
            image_url = $9,
            featured = $10
        WHERE id = $11
        RETURNING *
        "#,
    )
    .bind(&fields.title)
    .bind(fields.subtitle.as_deref())
    .bind(&fields.content)
    .bind(fields.category.label())
    .bind(&fields.author)
    .bind(&fields.company)
    .bind(&fields.contact_email)
    .bind(fields.contact_phone.as_deref())
    .bind(fields.image_url.as_deref())
    .bind(fields.featured)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn approve_release(
    pool: &PgPool,
    id: Uuid,
    published_at: DateTime<Utc>,
) -> Result<Option<PressRelease>, sqlx::Error> {
    sqlx::query_as::<_, PressRelease>(
        r#"
        UPDATE press_releases
        SET
            status = 'published',
            published_at = $1
        WHERE id = $2 AND status = 'draft'
        RETURNING *
        "#,
    )
    .bind(published_at)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn reject_release(
    pool: &PgPool,
    id: Uuid,
    reason: &str,
) -> Result<Option<PressRelease>, sqlx::Error> {
    sqlx::query_as::<_, PressRelease>(
        r#"
        UPDATE press_releases
        SET
            status = 'rejected',
            rejection_reason = $1
        WHERE id = $2 AND status = 'draft'
        RETURNING *
        "#,
    )
    .bind(reason)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_release(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM press_releases WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl ReleaseStore for Database {
    async fn create_release(&self, data: &PressReleaseCreate) -> Result<PressRelease, StoreError> {
        create_release(&self.pool, data).await
    }

    async fn get_release(&self, id: Uuid) -> Result<Option<PressRelease>, StoreError> {
        Ok(get_release(&self.pool, id).await?)
    }

    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<PressRelease>, StoreError> {
        Ok(get_published_by_slug(&self.pool, slug).await?)
    }

    async fn list_published(&self, limit: i64) -> Result<Vec<PressRelease>, StoreError> {
        Ok(list_published(&self.pool, false, limit).await?)
    }

    async fn list_featured(&self, limit: i64) -> Result<Vec<PressRelease>, StoreError> {
        Ok(list_published(&self.pool, true, limit).await?)
    }

    async fn list_drafts(&self) -> Result<Vec<PressRelease>, StoreError> {
        Ok(list_by_status(&self.pool, Some(ReleaseStatus::Draft), None).await?)
    }

    async fn list_by_status(&self, status: ReleaseStatus) -> Result<Vec<PressRelease>, StoreError> {
        Ok(list_by_status(&self.pool, Some(status), None).await?)
    }

    async fn list_all(&self, limit: i64) -> Result<Vec<PressRelease>, StoreError> {
        Ok(list_by_status(&self.pool, None, Some(limit)).await?)
    }

    async fn existing_slugs(&self) -> Result<HashSet<String>, StoreError> {
        Ok(existing_slugs(&self.pool).await?)
    }

    async fn count_by_status(&self, status: ReleaseStatus) -> Result<i64, StoreError> {
        Ok(count_by_status(&self.pool, status).await?)
    }

    async fn update_release(
        &self,
        id: Uuid,
        fields: &PressReleaseFields,
    ) -> Result<Option<PressRelease>, StoreError> {
        Ok(update_release(&self.pool, id, fields).await?)
    }

    async fn approve_release(
        &self,
        id: Uuid,
        published_at: DateTime<Utc>,
    ) -> Result<Option<PressRelease>, StoreError> {
        Ok(approve_release(&self.pool, id, published_at).await?)
    }

    async fn reject_release(&self, id: Uuid, reason: &str) -> Result<Option<PressRelease>, StoreError> {
        Ok(reject_release(&self.pool, id, reason).await?)
    }

    async fn delete_release(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(delete_release(&self.pool, id).await?)
    }
}
