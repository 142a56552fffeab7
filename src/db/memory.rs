use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use super::{ContactStore, ReleaseStore};
use crate::common::StoreError;
use crate::models::{
    ContactCreate, ContactStatus, ContactSubmission, PressRelease, PressReleaseCreate,
    PressReleaseFields, ReleaseStatus,
};

/// In-process store. Rows keep insertion order, which acts as the
/// natural tie-break for equal timestamps.
#[derive(Default)]
pub struct MemoryStore {
    releases: RwLock<Vec<PressRelease>>,
    contacts: RwLock<Vec<ContactSubmission>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Inserts a record as-is, bypassing slug generation.
    pub fn insert_release(&self, release: PressRelease) {
        write(&self.releases).push(release);
    }

    pub fn insert_contact(&self, contact: ContactSubmission) {
        write(&self.contacts).push(contact);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".into()));
        }
        Ok(())
    }

    fn sorted_releases<K, F>(&self, keep: F, key: K, limit: Option<i64>) -> Vec<PressRelease>
    where
        F: Fn(&PressRelease) -> bool,
        K: Fn(&PressRelease) -> DateTime<Utc>,
    {
        let mut rows: Vec<PressRelease> = read(&self.releases)
            .iter()
            .filter(|&r| keep(r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| key(b).cmp(&key(a)));

        if let Some(limit) = limit {
            rows.truncate(usize::try_from(limit).unwrap_or(0));
        }
        rows
    }

    fn modify_release<F>(&self, id: Uuid, f: F) -> Option<PressRelease>
    where
        F: FnOnce(&mut PressRelease) -> bool,
    {
        let mut rows = write(&self.releases);
        let row = rows.iter_mut().find(|r| r.id == id)?;
        f(&mut *row).then(|| row.clone())
    }

    fn modify_contact<F>(&self, id: Uuid, f: F) -> Option<ContactSubmission>
    where
        F: FnOnce(&mut ContactSubmission),
    {
        let mut rows = write(&self.contacts);
        let row = rows.iter_mut().find(|c| c.id == id)?;
        f(&mut *row);
        Some(row.clone())
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn published_key(r: &PressRelease) -> DateTime<Utc> {
    r.display_date()
}

fn created_key(r: &PressRelease) -> DateTime<Utc> {
    r.created_at
}

#[async_trait]
impl ReleaseStore for MemoryStore {
    async fn create_release(&self, data: &PressReleaseCreate) -> Result<PressRelease, StoreError> {
        self.check()?;
        let mut rows = write(&self.releases);

        if rows.iter().any(|r| r.slug == data.slug) {
            return Err(StoreError::SlugConflict(data.slug.clone()));
        }

        let fields = &data.fields;
        let release = PressRelease {
            id: Uuid::new_v4(),
            slug: data.slug.clone(),
            title: fields.title.clone(),
            subtitle: fields.subtitle.clone(),
            content: fields.content.clone(),
            category: fields.category.label().to_string(),
            author: fields.author.clone(),
            company: fields.company.clone(),
            contact_email: fields.contact_email.clone(),
            contact_phone: fields.contact_phone.clone(),
            image_url: fields.image_url.clone(),
            featured: fields.featured,
            status: data.status,
            created_at: data.created_at,
            published_at: data.published_at,
            rejection_reason: None,
        };
        rows.push(release.clone());

        Ok(release)
    }

    async fn get_release(&self, id: Uuid) -> Result<Option<PressRelease>, StoreError> {
        self.check()?;
        Ok(read(&self.releases).iter().find(|r| r.id == id).cloned())
    }

    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<PressRelease>, StoreError> {
        self.check()?;
        Ok(read(&self.releases)
            .iter()
            .find(|r| r.slug == slug && r.is_published())
            .cloned())
    }

    async fn list_published(&self, limit: i64) -> Result<Vec<PressRelease>, StoreError> {
        self.check()?;
        Ok(self.sorted_releases(PressRelease::is_published, published_key, Some(limit)))
    }

    async fn list_featured(&self, limit: i64) -> Result<Vec<PressRelease>, StoreError> {
        self.check()?;
        Ok(self.sorted_releases(
            |r| r.is_published() && r.featured,
            published_key,
            Some(limit),
        ))
    }

    async fn list_drafts(&self) -> Result<Vec<PressRelease>, StoreError> {
        self.check()?;
        Ok(self.sorted_releases(
            |r| r.status == ReleaseStatus::Draft,
            created_key,
            None,
        ))
    }

    async fn list_by_status(&self, status: ReleaseStatus) -> Result<Vec<PressRelease>, StoreError> {
        self.check()?;
        Ok(self.sorted_releases(|r| r.status == status, created_key, None))
    }

    async fn list_all(&self, limit: i64) -> Result<Vec<PressRelease>, StoreError> {
        self.check()?;
        Ok(self.sorted_releases(|_| true, created_key, Some(limit)))
    }

    async fn existing_slugs(&self) -> Result<HashSet<String>, StoreError> {
        self.check()?;
        Ok(read(&self.releases).iter().map(|r| r.slug.clone()).collect())
    }

    async fn count_by_status(&self, status: ReleaseStatus) -> Result<i64, StoreError> {
        self.check()?;
        let count = read(&self.releases).iter().filter(|r| r.status == status).count();
        Ok(count as i64)
    }

    async fn update_release(
        &self,
        id: Uuid,
        fields: &PressReleaseFields,
    ) -> Result<Option<PressRelease>, StoreError> {
        self.check()?;
        Ok(self.modify_release(id, |r| {
            r.title = fields.title.clone();
            r.subtitle = fields.subtitle.clone();
            r.content = fields.content.clone();
            r.category = fields.category.label().to_string();
            r.author = fields.author.clone();
            r.company = fields.company.clone();
            r.contact_email = fields.contact_email.clone();
            r.contact_phone = fields.contact_phone.clone();
            r.image_url = fields.image_url.clone();
            r.featured = fields.featured;
            true
        }))
    }

    async fn approve_release(
        &self,
        id: Uuid,
        published_at: DateTime<Utc>,
    ) -> Result<Option<PressRelease>, StoreError> {
        self.check()?;
        Ok(self.modify_release(id, |r| {
            if r.status != ReleaseStatus::Draft {
                return false;
            }
            r.status = ReleaseStatus::Published;
            r.published_at = Some(published_at);
            true
        }))
    }

    async fn reject_release(&self, id: Uuid, reason: &str) -> Result<Option<PressRelease>, StoreError> {
        self.check()?;
        Ok(self.modify_release(id, |r| {
            if r.status != ReleaseStatus::Draft {
                return false;
            }
            r.status = ReleaseStatus::Rejected;
            r.rejection_reason = Some(reason.to_string());
            true
        }))
    }

    async fn delete_release(&self, id: Uuid) -> Result<bool, StoreError> {
        self.check()?;
        let mut rows = write(&self.releases);
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create_contact(
        &self,
        data: &ContactCreate,
        created_at: DateTime<Utc>,
    ) -> Result<ContactSubmission, StoreError> {
        self.check()?;
        let contact = ContactSubmission {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            subject: data.subject.clone(),
            message: data.message.clone(),
            status: ContactStatus::New,
            admin_notes: None,
            created_at,
        };
        write(&self.contacts).push(contact.clone());

        Ok(contact)
    }

    async fn get_contact(&self, id: Uuid) -> Result<Option<ContactSubmission>, StoreError> {
        self.check()?;
        Ok(read(&self.contacts).iter().find(|c| c.id == id).cloned())
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, StoreError> {
        self.check()?;
        let mut rows = read(&self.contacts).clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_new_contacts(&self) -> Result<Vec<ContactSubmission>, StoreError> {
        let mut rows = self.list_contacts().await?;
        rows.retain(|c| c.status == ContactStatus::New);
        Ok(rows)
    }

    async fn count_new_contacts(&self) -> Result<i64, StoreError> {
        self.check()?;
        let count = read(&self.contacts)
            .iter()
            .filter(|c| c.status == ContactStatus::New)
            .count();
        Ok(count as i64)
    }

    async fn mark_contact_read(&self, id: Uuid) -> Result<Option<ContactSubmission>, StoreError> {
        self.check()?;
        Ok(self.modify_contact(id, |c| c.status = c.status.after_read()))
    }

    async fn mark_contact_responded(
        &self,
        id: Uuid,
        admin_notes: Option<&str>,
    ) -> Result<Option<ContactSubmission>, StoreError> {
        self.check()?;
        Ok(self.modify_contact(id, |c| {
            c.status = ContactStatus::Responded;
            if let Some(notes) = admin_notes {
                c.admin_notes = Some(notes.to_string());
            }
        }))
    }

    async fn update_contact_notes(
        &self,
        id: Uuid,
        admin_notes: &str,
    ) -> Result<Option<ContactSubmission>, StoreError> {
        self.check()?;
        Ok(self.modify_contact(id, |c| c.admin_notes = Some(admin_notes.to_string())))
    }
}
