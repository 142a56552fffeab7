use serde::Deserialize;

use pressroom::models::PressReleaseInput;
use pressroom::services::listing::{CategoryFilter, ListingCriteria, ListingState, SortKey};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    pub error: Option<String>,
}

/// `?notice=` / `?error=` codes carried across a redirect.
#[derive(Deserialize, Default)]
pub struct FlashQuery {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Press release form shared by public submission, admin entry and edit.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ReleaseForm {
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub company: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub image_url: String,
    /// Checkbox: present (usually `on`) when ticked.
    pub featured: Option<String>,
}

impl ReleaseForm {
    pub fn to_input(&self) -> PressReleaseInput {
        PressReleaseInput {
            title: self.title.clone(),
            subtitle: Some(self.subtitle.clone()),
            content: self.content.clone(),
            category: self.category.clone(),
            author: self.author.clone(),
            company: self.company.clone(),
            contact_email: self.contact_email.clone(),
            contact_phone: Some(self.contact_phone.clone()),
            featured: self
                .featured
                .as_deref()
                .is_some_and(|v| !matches!(v, "" | "false" | "off" | "0")),
            image_url: Some(self.image_url.clone()),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

impl ListingQuery {
    pub fn to_state(&self) -> ListingState {
        let mut state = ListingState::new(ListingCriteria {
            query: self.q.clone().unwrap_or_default().trim().to_string(),
            category: CategoryFilter::parse(self.category.as_deref().unwrap_or_default()),
            sort: SortKey::parse_lossy(self.sort.as_deref().unwrap_or_default()),
        });
        state.go_to(self.page.unwrap_or(1));
        state
    }
}

#[derive(Deserialize, Default)]
pub struct RejectForm {
    pub reason: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct NotesForm {
    pub admin_notes: Option<String>,
}
