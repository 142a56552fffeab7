use serde::Serialize;

use crate::common::StoreError;
use crate::db::{ContactStore, ReleaseStore};
use crate::models::ReleaseStatus;

/// Seconds between badge refreshes on the admin dashboard.
pub const POLL_INTERVAL_SECS: u64 = 30;

/// Badge counters. Each poll replaces the previous snapshot wholesale.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub drafts: i64,
    pub new_contacts: i64,
}

impl DashboardCounts {
    pub async fn load<S>(store: &S) -> Result<Self, StoreError>
    where
        S: ReleaseStore + ContactStore + ?Sized,
    {
        Ok(Self {
            drafts: store.count_by_status(ReleaseStatus::Draft).await?,
            new_contacts: store.count_new_contacts().await?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.drafts == 0 && self.new_contacts == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::ContactCreate;
    use chrono::Utc;

    #[tokio::test]
    async fn counts_new_contacts_only() {
        let store = MemoryStore::new();
        let data = ContactCreate {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            phone: None,
            subject: "Hello".into(),
            message: "Hi".into(),
        };
        let first = store.create_contact(&data, Utc::now()).await.unwrap();
        store.create_contact(&data, Utc::now()).await.unwrap();
        assert_eq!(DashboardCounts::load(&store).await.unwrap().new_contacts, 2);

        store.mark_contact_read(first.id).await.unwrap();
        let counts = DashboardCounts::load(&store).await.unwrap();
        assert_eq!(counts, DashboardCounts { drafts: 0, new_contacts: 1 });
    }

    #[tokio::test]
    async fn store_failure_is_surfaced() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(DashboardCounts::load(&store).await.is_err());
    }
}
