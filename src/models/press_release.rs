use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Category, ReleaseStatus};
use crate::common::ValidationError;
use crate::services::{html, validation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PressRelease {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub content: String,
    pub category: String,
    pub author: String,
    pub company: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub status: ReleaseStatus,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

impl PressRelease {
    pub fn is_published(&self) -> bool {
        self.status == ReleaseStatus::Published
    }

    /// Publication date, or the creation date for unpublished records.
    pub fn display_date(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.created_at)
    }

    pub fn excerpt(&self, max_chars: usize) -> String {
        html::truncate_html(&self.content, max_chars)
    }

    pub fn plain_text(&self) -> String {
        html::strip_html(&self.content)
    }
}

/// Raw press release fields as submitted by a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PressReleaseInput {
    pub title: String,
    pub subtitle: Option<String>,
    pub content: String,
    pub category: String,
    pub author: String,
    pub company: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub image_url: Option<String>,
}

impl PressReleaseInput {
    pub fn validate(&self) -> Result<PressReleaseFields, ValidationError> {
        let title = validation::required("title", &self.title)?;

        let content = validation::required("content", &self.content)?;
        if html::strip_html(&content).is_empty() {
            return Err(ValidationError::Required("content"));
        }
        let content = if html::is_html_content(&content) {
            content
        } else {
            html::plain_text_to_html(&content)
        };

        let category_label = validation::required("category", &self.category)?;
        let category = category_label
            .parse::<Category>()
            .map_err(|_| ValidationError::UnknownCategory(category_label))?;

        Ok(PressReleaseFields {
            title,
            subtitle: validation::optional(self.subtitle.as_deref()),
            content,
            category,
            author: validation::required("author", &self.author)?,
            company: validation::required("company", &self.company)?,
            contact_email: validation::email("contact email", &self.contact_email)?,
            contact_phone: validation::optional(self.contact_phone.as_deref()),
            featured: self.featured,
            image_url: validation::optional(self.image_url.as_deref()),
        })
    }
}

impl From<&PressRelease> for PressReleaseInput {
    fn from(release: &PressRelease) -> Self {
        Self {
            title: release.title.clone(),
            subtitle: release.subtitle.clone(),
            content: release.content.clone(),
            category: release.category.clone(),
            author: release.author.clone(),
            company: release.company.clone(),
            contact_email: release.contact_email.clone(),
            contact_phone: release.contact_phone.clone(),
            featured: release.featured,
            image_url: release.image_url.clone(),
        }
    }
}

/// Validated content-bearing fields; the only fields an edit may change.
#[derive(Debug, Clone, PartialEq)]
pub struct PressReleaseFields {
    pub title: String,
    pub subtitle: Option<String>,
    pub content: String,
    pub category: Category,
    pub author: String,
    pub company: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub featured: bool,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PressReleaseCreate {
    pub slug: String,
    pub fields: PressReleaseFields,
    pub status: ReleaseStatus,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}
