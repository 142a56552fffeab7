mod common;

// These need a Postgres instance behind DATABASE_URL:
//     cargo test --test db_tests -- --ignored
#[cfg(test)]
pub mod db_tests {
    use sqlx::PgPool;
    use uuid::Uuid;

    use super::common::*;

    use pressroom::common::*;
    use pressroom::db::*;
    use pressroom::models::*;

    #[ignore]
    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_seed_integrity(pool: PgPool) {
        let db = Database::from_pool(pool);

        let acme = db.get_release(seed_id(1)).await.expect("Failed database query");
        assert_eq!(acme, Some(get_seed_release_acme()));

        let gamma = db.get_release(seed_id(3)).await.expect("Failed database query");
        assert_eq!(gamma, Some(get_seed_release_gamma()));

        let contact = db.get_contact(seed_id(0xc1)).await.expect("Failed database query");
        assert_eq!(contact, Some(get_seed_contact_new()));

        assert!(db.get_release(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[ignore]
    #[sqlx::test(migrations = "./migrations")]
    async fn test_from_pool(pool: PgPool) {
        let db = Database::from_pool(pool.clone());

        let row: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&db.pool)
            .await
            .expect("Failed to query database");
        assert_eq!(row.0, 1);

        pool.close().await;

        let result = db.list_published(DEFAULT_LIST_LIMIT).await;
        assert!(matches!(result, Err(StoreError::Database(_))));
    }

    #[ignore]
    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_published_queries_hide_other_statuses(pool: PgPool) {
        let db = Database::from_pool(pool);

        let published = db.list_published(DEFAULT_LIST_LIMIT).await.unwrap();
        let slugs: Vec<_> = published.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["beta-raises-round", "acme-ships-widget"]);

        let featured = db.list_featured(FEATURED_LIMIT).await.unwrap();
        assert_eq!(featured, vec![get_seed_release_acme()]);

        assert!(db.get_published_by_slug("gamma-opens-office").await.unwrap().is_none());
        assert!(db.get_published_by_slug("delta-spam").await.unwrap().is_none());

        let drafts = db.list_drafts().await.unwrap();
        assert_eq!(drafts, vec![get_seed_release_gamma()]);

        assert_eq!(db.count_by_status(ReleaseStatus::Draft).await.unwrap(), 1);
        assert_eq!(db.count_by_status(ReleaseStatus::Rejected).await.unwrap(), 1);
        assert_eq!(db.list_all(2).await.unwrap().len(), 2);

        let rejected = db.list_by_status(ReleaseStatus::Rejected).await.unwrap();
        let ids: Vec<_> = rejected.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![seed_id(4)]);
    }

    #[ignore]
    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_duplicate_slug_is_a_conflict(pool: PgPool) {
        let db = Database::from_pool(pool);
        let fields = release_input("Acme Ships Widget").validate().unwrap();

        let result = db
            .create_release(&PressReleaseCreate {
                slug: "acme-ships-widget".to_string(),
                fields,
                status: ReleaseStatus::Draft,
                created_at: parse_time("2024-04-01 09:00:00+00"),
                published_at: None,
            })
            .await;

        assert!(matches!(result, Err(StoreError::SlugConflict(slug)) if slug == "acme-ships-widget"));
    }

    #[ignore]
    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_status_changes_only_apply_to_drafts(pool: PgPool) {
        let db = Database::from_pool(pool);
        let at = parse_time("2024-04-01 09:00:00+00");

        // already published
        assert!(db.approve_release(seed_id(1), at).await.unwrap().is_none());
        assert!(db.reject_release(seed_id(1), "no").await.unwrap().is_none());

        let approved = db.approve_release(seed_id(3), at).await.unwrap().unwrap();
        assert_eq!(approved.status, ReleaseStatus::Published);
        assert_eq!(approved.published_at, Some(at));
        assert_eq!(approved.created_at, get_seed_release_gamma().created_at);

        assert!(db.reject_release(seed_id(3), "late").await.unwrap().is_none());
    }

    #[ignore]
    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_update_keeps_slug_status_and_dates(pool: PgPool) {
        let db = Database::from_pool(pool);
        let before = get_seed_release_acme();

        let mut input = release_input("Acme Ships Widget v2");
        input.category = "Business".to_string();
        let fields = input.validate().unwrap();
        let updated = db.update_release(before.id, &fields).await.unwrap().unwrap();

        assert_eq!(updated.title, "Acme Ships Widget v2");
        assert_eq!(updated.category, "Business");
        assert_eq!(updated.slug, before.slug);
        assert_eq!(updated.status, before.status);
        assert_eq!(updated.published_at, before.published_at);

        assert!(db.update_release(Uuid::new_v4(), &fields).await.unwrap().is_none());
    }

    #[ignore]
    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_delete_release(pool: PgPool) {
        let db = Database::from_pool(pool);

        assert!(db.delete_release(seed_id(4)).await.unwrap());
        assert!(!db.delete_release(seed_id(4)).await.unwrap());
        assert!(db.get_release(seed_id(4)).await.unwrap().is_none());
    }

    #[ignore]
    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_contact_status_only_moves_forward(pool: PgPool) {
        let db = Database::from_pool(pool);
        let id = seed_id(0xc1);

        assert_eq!(db.count_new_contacts().await.unwrap(), 1);

        let read = db.mark_contact_read(id).await.unwrap().unwrap();
        assert_eq!(read.status, ContactStatus::Read);
        assert_eq!(db.count_new_contacts().await.unwrap(), 0);

        let responded = db.mark_contact_responded(id, Some("Sent price list")).await.unwrap().unwrap();
        assert_eq!(responded.status, ContactStatus::Responded);

        let again = db.mark_contact_read(id).await.unwrap().unwrap();
        assert_eq!(again.status, ContactStatus::Responded);
        assert_eq!(again.admin_notes.as_deref(), Some("Sent price list"));

        let kept = db.mark_contact_responded(id, None).await.unwrap().unwrap();
        assert_eq!(kept.admin_notes.as_deref(), Some("Sent price list"));
    }

    #[ignore]
    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_contacts_newest_first(pool: PgPool) {
        let db = Database::from_pool(pool);
        let at = parse_time("2024-04-01 09:00:00+00");

        let created = db
            .create_contact(
                &ContactInput {
                    name: "Cat".into(),
                    email: "cat@example.com".into(),
                    phone: Some("  ".into()),
                    subject: "Coverage".into(),
                    message: "Can you cover us?".into(),
                }
                .validate()
                .unwrap(),
                at,
            )
            .await
            .unwrap();
        assert_eq!(created.status, ContactStatus::New);
        assert_eq!(created.phone, None);
        assert_eq!(created.created_at, at);

        let all = db.list_contacts().await.unwrap();
        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Cat", "Ben", "Ann"]);

        let fresh = db.list_new_contacts().await.unwrap();
        assert_eq!(fresh.len(), 2);
        assert!(fresh.iter().all(|c| c.status == ContactStatus::New));

        let noted = db.update_contact_notes(created.id, "Maybe next week").await.unwrap().unwrap();
        assert_eq!(noted.status, ContactStatus::New);
        assert_eq!(noted.admin_notes.as_deref(), Some("Maybe next week"));
    }
}
