#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pressroom::db::MemoryStore;
use pressroom::models::*;
use pressroom::services::{FixedClock, ReviewWorkflow};

const SQL_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S%#z";

pub fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_str(s, SQL_TIME_FMT)
        .expect("Invalid time format in test helper")
        .with_timezone(&Utc)
}

pub fn seed_id(n: u32) -> Uuid {
    Uuid::parse_str(&format!("00000000-0000-0000-0000-{n:012x}")).unwrap()
}

pub fn release_input(title: &str) -> PressReleaseInput {
    PressReleaseInput {
        title: title.to_string(),
        subtitle: None,
        content: "<p>Body of the announcement.</p>".to_string(),
        category: "Technology".to_string(),
        author: "Jane Doe".to_string(),
        company: "Acme".to_string(),
        contact_email: "press@acme.test".to_string(),
        contact_phone: None,
        featured: false,
        image_url: None,
    }
}

pub type Workflow = ReviewWorkflow<MemoryStore, FixedClock>;

pub fn memory_workflow(now: &str) -> (Workflow, Arc<MemoryStore>, Arc<FixedClock>) {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::new(parse_time(now)));
    let workflow = ReviewWorkflow::new(store.clone(), clock.clone());
    (workflow, store, clock)
}

/// Published release from the seed fixture.
pub fn get_seed_release_acme() -> PressRelease {
    PressRelease {
        id: seed_id(1),
        slug: "acme-ships-widget".to_string(),
        title: "Acme Ships Widget".to_string(),
        subtitle: None,
        content: "<p>Acme ships its new widget.</p>".to_string(),
        category: "Technology".to_string(),
        author: "Jane Doe".to_string(),
        company: "Acme".to_string(),
        contact_email: "press@acme.test".to_string(),
        contact_phone: None,
        image_url: None,
        featured: true,
        status: ReleaseStatus::Published,
        created_at: parse_time("2024-03-01 09:00:00+00"),
        published_at: Some(parse_time("2024-03-02 10:00:00+00")),
        rejection_reason: None,
    }
}

/// Draft from the seed fixture.
pub fn get_seed_release_gamma() -> PressRelease {
    PressRelease {
        id: seed_id(3),
        slug: "gamma-opens-office".to_string(),
        title: "Gamma Opens Office".to_string(),
        subtitle: None,
        content: "<p>Gamma opens an office.</p>".to_string(),
        category: "Business".to_string(),
        author: "Cy Poe".to_string(),
        company: "Gamma".to_string(),
        contact_email: "pr@gamma.test".to_string(),
        contact_phone: None,
        image_url: None,
        featured: false,
        status: ReleaseStatus::Draft,
        created_at: parse_time("2024-03-05 09:00:00+00"),
        published_at: None,
        rejection_reason: None,
    }
}

pub fn get_seed_contact_new() -> ContactSubmission {
    ContactSubmission {
        id: seed_id(0xc1),
        name: "Ann".to_string(),
        email: "ann@example.com".to_string(),
        phone: None,
        subject: "Pricing".to_string(),
        message: "How much?".to_string(),
        status: ContactStatus::New,
        admin_notes: None,
        created_at: parse_time("2024-03-07 09:00:00+00"),
    }
}
