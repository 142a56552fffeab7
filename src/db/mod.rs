//! Record-store seam for press releases and contact submissions.
//!
//! [`Database`] talks to Postgres; [`MemoryStore`] keeps everything in
//! process and backs the tests and database-less development runs.

pub use contacts::*;
pub use db::*;
pub use memory::*;
pub use press_releases::*;

mod contacts;
mod db;
mod memory;
mod press_releases;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use crate::common::StoreError;
use crate::models::{
    ContactCreate, ContactSubmission, PressRelease, PressReleaseCreate, PressReleaseFields,
    ReleaseStatus,
};

/// Default cap for the published listing.
pub const DEFAULT_LIST_LIMIT: i64 = 50;
/// Cap for the featured strip on the home page.
pub const FEATURED_LIMIT: i64 = 10;
/// Bulk fetch size used by the public listing and the sitemap.
pub const BULK_LIST_LIMIT: i64 = 1000;
/// Fetch size for the admin tables.
pub const ADMIN_LIST_LIMIT: i64 = 100;

/// Both stores behind one object, as the web layer holds them.
pub trait RecordStore: ReleaseStore + ContactStore {}

impl<T: ReleaseStore + ContactStore + ?Sized> RecordStore for T {}

#[async_trait]
pub trait ReleaseStore: Send + Sync {
    async fn create_release(&self, data: &PressReleaseCreate) -> Result<PressRelease, StoreError>;

    /// Any status.
    async fn get_release(&self, id: Uuid) -> Result<Option<PressRelease>, StoreError>;

    /// Published records only.
    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<PressRelease>, StoreError>;

    /// Published records, newest publication first.
    async fn list_published(&self, limit: i64) -> Result<Vec<PressRelease>, StoreError>;

    /// Published and featured records, newest publication first.
    async fn list_featured(&self, limit: i64) -> Result<Vec<PressRelease>, StoreError>;

    /// Drafts, newest submission first.
    async fn list_drafts(&self) -> Result<Vec<PressRelease>, StoreError>;

    /// One status, newest submission first, unbounded.
    async fn list_by_status(&self, status: ReleaseStatus) -> Result<Vec<PressRelease>, StoreError>;

    /// Every status, newest submission first.
    async fn list_all(&self, limit: i64) -> Result<Vec<PressRelease>, StoreError>;

    async fn existing_slugs(&self) -> Result<HashSet<String>, StoreError>;

    async fn count_by_status(&self, status: ReleaseStatus) -> Result<i64, StoreError>;

    /// Rewrites the content-bearing fields; slug, status and timestamps stay.
    async fn update_release(
        &self,
        id: Uuid,
        fields: &PressReleaseFields,
    ) -> Result<Option<PressRelease>, StoreError>;

    /// Publishes a draft. Returns `None` when no draft with `id` exists.
    async fn approve_release(
        &self,
        id: Uuid,
        published_at: DateTime<Utc>,
    ) -> Result<Option<PressRelease>, StoreError>;

    /// Rejects a draft. Returns `None` when no draft with `id` exists.
    async fn reject_release(&self, id: Uuid, reason: &str) -> Result<Option<PressRelease>, StoreError>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete_release(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn create_contact(
        &self,
        data: &ContactCreate,
        created_at: DateTime<Utc>,
    ) -> Result<ContactSubmission, StoreError>;

    async fn get_contact(&self, id: Uuid) -> Result<Option<ContactSubmission>, StoreError>;

    /// Newest first.
    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, StoreError>;

    /// Status `new`, newest first.
    async fn list_new_contacts(&self) -> Result<Vec<ContactSubmission>, StoreError>;

    async fn count_new_contacts(&self) -> Result<i64, StoreError>;

    /// Moves `new` to `read`; later statuses are left alone.
    async fn mark_contact_read(&self, id: Uuid) -> Result<Option<ContactSubmission>, StoreError>;

    /// `None` leaves existing notes untouched.
    async fn mark_contact_responded(
        &self,
        id: Uuid,
        admin_notes: Option<&str>,
    ) -> Result<Option<ContactSubmission>, StoreError>;

    async fn update_contact_notes(
        &self,
        id: Uuid,
        admin_notes: &str,
    ) -> Result<Option<ContactSubmission>, StoreError>;
}
