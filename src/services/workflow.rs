use std::sync::Arc;
use uuid::Uuid;

use crate::common::WorkflowError;
use crate::db::ReleaseStore;
use crate::models::{PressRelease, PressReleaseCreate, PressReleaseInput, ReleaseStatus};
use crate::services::clock::Clock;
use crate::services::slug::generate_unique_slug;

/// Stored when a draft is rejected without a reason.
pub const DEFAULT_REJECTION_REASON: &str = "Not approved for publication";

/// Moves press releases through `draft -> published | rejected`.
///
/// The slug set is re-read right before every insert. Two submissions with
/// the same title racing between that read and the insert can still pick
/// the same slug; the Postgres unique constraint then turns the loser into
/// [`crate::common::StoreError::SlugConflict`], which is reported, not retried.
pub struct ReviewWorkflow<S: ?Sized, C: ?Sized> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S: ?Sized, C: ?Sized> Clone for ReviewWorkflow<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> ReviewWorkflow<S, C>
where
    S: ReleaseStore + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Public submission: enters the review queue as a draft.
    pub async fn submit(&self, input: &PressReleaseInput) -> Result<PressRelease, WorkflowError> {
        self.create(input, ReleaseStatus::Draft).await
    }

    /// Admin direct entry: published immediately, bypassing review.
    pub async fn create_published(
        &self,
        input: &PressReleaseInput,
    ) -> Result<PressRelease, WorkflowError> {
        self.create(input, ReleaseStatus::Published).await
    }

    async fn create(
        &self,
        input: &PressReleaseInput,
        status: ReleaseStatus,
    ) -> Result<PressRelease, WorkflowError> {
        let fields = input.validate()?;

        let existing = self.store.existing_slugs().await?;
        let slug = generate_unique_slug(&fields.title, &existing);

        let now = self.clock.now();
        let data = PressReleaseCreate {
            slug,
            fields,
            status,
            created_at: now,
            published_at: (status == ReleaseStatus::Published).then_some(now),
        };

        let created = self.store.create_release(&data).await?;
        log::info!(
            "Created {} press release {} ({})",
            created.status,
            created.id,
            created.slug
        );

        Ok(created)
    }

    pub async fn approve(&self, id: Uuid) -> Result<PressRelease, WorkflowError> {
        self.expect_draft(id, ReleaseStatus::Published).await?;

        let published_at = self.clock.now();
        match self.store.approve_release(id, published_at).await? {
            Some(release) => {
                log::info!("Approved press release {}", release.id);
                Ok(release)
            }
            None => Err(self.lost_race(id, ReleaseStatus::Published).await),
        }
    }

    /// Rejects a draft; a missing or blank reason stores
    /// [`DEFAULT_REJECTION_REASON`].
    pub async fn reject(
        &self,
        id: Uuid,
        reason: Option<&str>,
    ) -> Result<PressRelease, WorkflowError> {
        self.expect_draft(id, ReleaseStatus::Rejected).await?;

        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REJECTION_REASON);

        match self.store.reject_release(id, reason).await? {
            Some(release) => {
                log::info!("Rejected press release {}: {}", release.id, reason);
                Ok(release)
            }
            None => Err(self.lost_race(id, ReleaseStatus::Rejected).await),
        }
    }

    /// Rewrites content fields of a record in any status.
    pub async fn update(
        &self,
        id: Uuid,
        input: &PressReleaseInput,
    ) -> Result<PressRelease, WorkflowError> {
        let fields = input.validate()?;

        self.store
            .update_release(id, &fields)
            .await?
            .ok_or(WorkflowError::NotFound(id))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), WorkflowError> {
        if !self.store.delete_release(id).await? {
            return Err(WorkflowError::NotFound(id));
        }
        log::info!("Deleted press release {}", id);
        Ok(())
    }

    async fn expect_draft(&self, id: Uuid, to: ReleaseStatus) -> Result<(), WorkflowError> {
        let current = self
            .store
            .get_release(id)
            .await?
            .ok_or(WorkflowError::NotFound(id))?;

        if !current.status.can_transition_to(to) {
            return Err(WorkflowError::InvalidTransition {
                from: current.status,
                to,
            });
        }
        Ok(())
    }

    /// The record changed between the status check and the conditional
    /// update; report what it became.
    async fn lost_race(&self, id: Uuid, to: ReleaseStatus) -> WorkflowError {
        match self.store.get_release(id).await {
            Ok(Some(current)) => WorkflowError::InvalidTransition {
                from: current.status,
                to,
            },
            Ok(None) => WorkflowError::NotFound(id),
            Err(e) => WorkflowError::Store(e),
        }
    }
}
