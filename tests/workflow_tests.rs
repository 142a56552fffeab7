mod common;

#[cfg(test)]
pub mod workflow_tests {
    use chrono::Duration;
    use uuid::Uuid;

    use super::common::*;

    use pressroom::common::*;
    use pressroom::db::*;
    use pressroom::models::*;
    use pressroom::services::listing::{CategoryFilter, ListingCriteria, ListingState, SortKey};
    use pressroom::services::{Clock, DEFAULT_REJECTION_REASON, DashboardCounts};

    const NOW: &str = "2024-04-01 09:00:00+00";

    #[tokio::test]
    async fn test_submit_creates_draft() {
        let (workflow, store, _) = memory_workflow(NOW);

        let draft = workflow
            .submit(&release_input("Acme Corp Launches!!"))
            .await
            .expect("Failed to submit");

        assert_eq!(draft.slug, "acme-corp-launches");
        assert_eq!(draft.status, ReleaseStatus::Draft);
        assert_eq!(draft.created_at, parse_time(NOW));
        assert!(draft.published_at.is_none());
        assert!(store.get_published_by_slug(&draft.slug).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_titles_get_suffixed_slugs() {
        let (workflow, _, _) = memory_workflow(NOW);

        let first = workflow.submit(&release_input("Big News")).await.unwrap();
        let second = workflow.submit(&release_input("Big News")).await.unwrap();
        let third = workflow.create_published(&release_input("Big News")).await.unwrap();

        assert_eq!(first.slug, "big-news");
        assert_eq!(second.slug, "big-news-2");
        assert_eq!(third.slug, "big-news-3");
    }

    #[tokio::test]
    async fn test_plain_text_content_becomes_paragraphs() {
        let (workflow, _, _) = memory_workflow(NOW);
        let mut input = release_input("Plain");
        input.content = "First line\n\nSecond line".to_string();

        let draft = workflow.submit(&input).await.unwrap();

        assert!(draft.content.starts_with("<p>"));
        assert!(draft.content.contains("Second line"));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_store() {
        let (workflow, store, _) = memory_workflow(NOW);
        let mut input = release_input("No email");
        input.contact_email = "not-an-email".to_string();

        let result = workflow.submit(&input).await;

        assert!(matches!(
            result,
            Err(WorkflowError::Validation(ValidationError::InvalidEmail(_)))
        ));
        assert!(store.existing_slugs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category_is_refused() {
        let (workflow, _, _) = memory_workflow(NOW);
        let mut input = release_input("Odd");
        input.category = "Gossip".to_string();

        let result = workflow.submit(&input).await;

        assert!(matches!(
            result,
            Err(WorkflowError::Validation(ValidationError::UnknownCategory(_)))
        ));
    }

    #[tokio::test]
    async fn test_approve_sets_publication_time() {
        let (workflow, store, clock) = memory_workflow(NOW);
        let draft = workflow.submit(&release_input("Launch")).await.unwrap();

        clock.advance(Duration::hours(3));
        let published = workflow.approve(draft.id).await.expect("Failed to approve");

        assert_eq!(published.status, ReleaseStatus::Published);
        assert_eq!(published.published_at, Some(parse_time(NOW) + Duration::hours(3)));
        assert_eq!(published.created_at, parse_time(NOW));
        assert_eq!(
            store.get_published_by_slug("launch").await.unwrap(),
            Some(published)
        );
    }

    #[tokio::test]
    async fn test_reject_records_reason() {
        let (workflow, _, _) = memory_workflow(NOW);
        let a = workflow.submit(&release_input("Spam one")).await.unwrap();
        let b = workflow.submit(&release_input("Spam two")).await.unwrap();

        let with_reason = workflow.reject(a.id, Some("Off topic")).await.unwrap();
        let without = workflow.reject(b.id, None).await.unwrap();

        assert_eq!(with_reason.status, ReleaseStatus::Rejected);
        assert_eq!(with_reason.rejection_reason.as_deref(), Some("Off topic"));
        assert_eq!(without.rejection_reason.as_deref(), Some(DEFAULT_REJECTION_REASON));
        assert!(without.published_at.is_none());
    }

    #[tokio::test]
    async fn test_terminal_states_refuse_transitions() {
        let (workflow, _, _) = memory_workflow(NOW);
        let published = workflow.create_published(&release_input("Live")).await.unwrap();
        let draft = workflow.submit(&release_input("Dead")).await.unwrap();
        workflow.reject(draft.id, None).await.unwrap();

        assert!(matches!(
            workflow.approve(published.id).await,
            Err(WorkflowError::InvalidTransition { from: ReleaseStatus::Published, .. })
        ));
        assert!(matches!(
            workflow.reject(published.id, None).await,
            Err(WorkflowError::InvalidTransition { .. })
        ));
        assert!(matches!(
            workflow.approve(draft.id).await,
            Err(WorkflowError::InvalidTransition { from: ReleaseStatus::Rejected, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_release_is_not_found() {
        let (workflow, _, _) = memory_workflow(NOW);
        let id = Uuid::new_v4();

        assert!(matches!(workflow.approve(id).await, Err(WorkflowError::NotFound(_))));
        assert!(matches!(workflow.delete(id).await, Err(WorkflowError::NotFound(_))));
        assert!(matches!(
            workflow.update(id, &release_input("x")).await,
            Err(WorkflowError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let (workflow, _, clock) = memory_workflow(NOW);
        let draft = workflow.submit(&release_input("Before")).await.unwrap();
        clock.advance(Duration::days(1));

        let mut input = release_input("After");
        input.featured = true;
        let updated = workflow.update(draft.id, &input).await.unwrap();

        assert_eq!(updated.id, draft.id);
        assert_eq!(updated.slug, "before");
        assert_eq!(updated.title, "After");
        assert!(updated.featured);
        assert_eq!(updated.status, ReleaseStatus::Draft);
        assert_eq!(updated.created_at, draft.created_at);
    }

    #[tokio::test]
    async fn test_store_outage_surfaces_as_store_error() {
        let (workflow, store, _) = memory_workflow(NOW);
        store.set_unavailable(true);

        let result = workflow.submit(&release_input("Down")).await;

        assert!(matches!(result, Err(WorkflowError::Store(_))));
    }

    #[tokio::test]
    async fn test_dashboard_counts_follow_workflow() {
        let (workflow, store, clock) = memory_workflow(NOW);
        let a = workflow.submit(&release_input("One")).await.unwrap();
        workflow.submit(&release_input("Two")).await.unwrap();
        store
            .create_contact(
                &ContactCreate {
                    name: "Ann".into(),
                    email: "ann@example.com".into(),
                    phone: None,
                    subject: "Hi".into(),
                    message: "Hello".into(),
                },
                clock.now(),
            )
            .await
            .unwrap();

        assert_eq!(
            DashboardCounts::load(&*store).await.unwrap(),
            DashboardCounts { drafts: 2, new_contacts: 1 }
        );

        workflow.approve(a.id).await.unwrap();
        assert_eq!(DashboardCounts::load(&*store).await.unwrap().drafts, 1);
    }

    #[tokio::test]
    async fn test_status_list_reaches_past_admin_limit() {
        let (workflow, store, clock) = memory_workflow(NOW);
        let spam = workflow.submit(&release_input("Old Spam")).await.unwrap();
        workflow.reject(spam.id, None).await.unwrap();

        for i in 0..ADMIN_LIST_LIMIT {
            clock.advance(Duration::minutes(1));
            workflow
                .create_published(&release_input(&format!("Story {i}")))
                .await
                .unwrap();
        }

        let recent = store.list_all(ADMIN_LIST_LIMIT).await.unwrap();
        assert!(recent.iter().all(|r| r.id != spam.id));

        let rejected = store.list_by_status(ReleaseStatus::Rejected).await.unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, spam.id);
        assert_eq!(
            store.list_by_status(ReleaseStatus::Published).await.unwrap().len() as i64,
            ADMIN_LIST_LIMIT
        );
    }

    #[tokio::test]
    async fn test_listing_sees_only_published() {
        let (workflow, store, clock) = memory_workflow(NOW);

        let mut finance = release_input("Zeta Results");
        finance.category = "Finance".to_string();
        finance.company = "Zeta".to_string();
        workflow.create_published(&finance).await.unwrap();
        clock.advance(Duration::hours(1));
        workflow.create_published(&release_input("Alpha Update")).await.unwrap();
        workflow.submit(&release_input("Secret Draft")).await.unwrap();

        let all = store.list_all(ADMIN_LIST_LIMIT).await.unwrap();
        assert_eq!(all.len(), 3);

        let mut state = ListingState::new(ListingCriteria::default());
        let page = state.view(&all);
        let titles: Vec<_> = page.items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha Update", "Zeta Results"]);

        state.set_sort(SortKey::Company);
        state.set_category(CategoryFilter::parse("Finance"));
        let page = state.view(&all);
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].company, "Zeta");
    }
}
