use askama::Template;

use pressroom::models::{Category, ContactInput, ContactSubmission, PressRelease};
use pressroom::services::listing::{ListingState, Page, PageLink, SortKey};

use crate::web::forms::ReleaseForm;
use crate::web::helpers::{format_date, with_param};

const EXCERPT_CHARS: usize = 200;

/// A press release as listing cards and admin tables show it.
pub struct ReleaseCard {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub company: String,
    pub author: String,
    pub category: String,
    pub date: String,
    pub excerpt: String,
    pub image_url: String,
    pub featured: bool,
    pub status: String,
    pub rejection_reason: String,
}

impl From<&PressRelease> for ReleaseCard {
    fn from(r: &PressRelease) -> Self {
        Self {
            id: r.id.to_string(),
            slug: r.slug.clone(),
            title: r.title.clone(),
            subtitle: r.subtitle.clone().unwrap_or_default(),
            company: r.company.clone(),
            author: r.author.clone(),
            category: r.category.clone(),
            date: format_date(r.display_date()),
            excerpt: r.excerpt(EXCERPT_CHARS),
            image_url: r.image_url.clone().unwrap_or_default(),
            featured: r.featured,
            status: r.status.as_str().to_string(),
            rejection_reason: r.rejection_reason.clone().unwrap_or_default(),
        }
    }
}

pub fn cards<'a>(releases: impl IntoIterator<Item = &'a PressRelease>) -> Vec<ReleaseCard> {
    releases.into_iter().map(ReleaseCard::from).collect()
}

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub fn category_options(selected: &str, include_all: bool) -> Vec<SelectOption> {
    let mut options = Vec::with_capacity(Category::ALL.len() + 1);
    if include_all {
        options.push(SelectOption {
            value: "all".into(),
            label: "All Categories".into(),
            selected: selected.is_empty() || selected == "all",
        });
    }
    options.extend(Category::ALL.iter().map(|c| SelectOption {
        value: c.label().into(),
        label: c.label().into(),
        selected: c.label() == selected,
    }));
    options
}

pub struct PageLinkView {
    pub label: String,
    pub href: String,
    pub current: bool,
    pub ellipsis: bool,
}

/// Search form state plus pagination links for a listing page.
pub struct ListingView {
    pub query: String,
    pub categories: Vec<SelectOption>,
    pub sorts: Vec<SelectOption>,
    pub filtered: bool,
    pub total_items: usize,
    pub start: usize,
    pub end: usize,
    pub links: Vec<PageLinkView>,
    pub previous_href: String,
    pub next_href: String,
    pub clear_href: String,
}

fn listing_href(base: &str, state: &ListingState, page: usize) -> String {
    let criteria = state.criteria();
    let mut href = base.to_string();
    if !criteria.query.is_empty() {
        href = with_param(&href, "q", &criteria.query);
    }
    if criteria.category.as_param() != "all" {
        href = with_param(&href, "category", criteria.category.as_param());
    }
    if criteria.sort != SortKey::Newest {
        href = with_param(&href, "sort", criteria.sort.as_str());
    }
    if page > 1 {
        href = with_param(&href, "page", &page.to_string());
    }
    href
}

impl ListingView {
    pub fn new<T>(base: &str, state: &ListingState, page: &Page<T>) -> Self {
        let criteria = state.criteria();
        let links = page
            .window()
            .into_iter()
            .map(|link| match link {
                PageLink::Number(n) => PageLinkView {
                    label: n.to_string(),
                    href: listing_href(base, state, n),
                    current: n == page.page,
                    ellipsis: false,
                },
                PageLink::Ellipsis => PageLinkView {
                    label: "...".into(),
                    href: String::new(),
                    current: false,
                    ellipsis: true,
                },
            })
            .collect();

        Self {
            query: criteria.query.clone(),
            categories: category_options(criteria.category.as_param(), true),
            sorts: SortKey::ALL
                .iter()
                .map(|s| SelectOption {
                    value: s.as_str().into(),
                    label: s.label().into(),
                    selected: *s == criteria.sort,
                })
                .collect(),
            filtered: criteria.is_filtered(),
            total_items: page.total_items,
            start: page.start,
            end: page.end,
            links,
            previous_href: if page.has_previous() {
                listing_href(base, state, page.previous())
            } else {
                String::new()
            },
            next_href: if page.has_next() {
                listing_href(base, state, page.next())
            } else {
                String::new()
            },
            clear_href: base.to_string(),
        }
    }
}

/// Values echoed back into a press release form.
pub struct ReleaseFormView {
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub company: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub image_url: String,
    pub featured: bool,
    pub categories: Vec<SelectOption>,
}

impl ReleaseFormView {
    pub fn empty() -> Self {
        Self::from_form(&ReleaseForm::default())
    }

    pub fn from_form(form: &ReleaseForm) -> Self {
        let input = form.to_input();
        Self {
            title: form.title.clone(),
            subtitle: form.subtitle.clone(),
            content: form.content.clone(),
            category: form.category.clone(),
            author: form.author.clone(),
            company: form.company.clone(),
            contact_email: form.contact_email.clone(),
            contact_phone: form.contact_phone.clone(),
            image_url: form.image_url.clone(),
            featured: input.featured,
            categories: category_options(&form.category, false),
        }
    }

    pub fn from_release(r: &PressRelease) -> Self {
        Self {
            title: r.title.clone(),
            subtitle: r.subtitle.clone().unwrap_or_default(),
            content: r.content.clone(),
            category: r.category.clone(),
            author: r.author.clone(),
            company: r.company.clone(),
            contact_email: r.contact_email.clone(),
            contact_phone: r.contact_phone.clone().unwrap_or_default(),
            image_url: r.image_url.clone().unwrap_or_default(),
            featured: r.featured,
            categories: category_options(&r.category, false),
        }
    }
}

pub struct ContactRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub is_new: bool,
    pub is_responded: bool,
    pub admin_notes: String,
    pub date: String,
}

impl From<&ContactSubmission> for ContactRow {
    fn from(c: &ContactSubmission) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone().unwrap_or_default(),
            subject: c.subject.clone(),
            message: c.message.clone(),
            status: c.status.as_str().to_string(),
            is_new: c.status == pressroom::models::ContactStatus::New,
            is_responded: c.status == pressroom::models::ContactStatus::Responded,
            admin_notes: c.admin_notes.clone().unwrap_or_default(),
            date: format_date(c.created_at),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub site_name: String,
    pub featured: Vec<ReleaseCard>,
    pub recent: Vec<ReleaseCard>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "releases.html")]
pub struct ReleasesTemplate {
    pub site_name: String,
    pub releases: Vec<ReleaseCard>,
    pub listing: ListingView,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "release.html")]
pub struct ReleaseTemplate {
    pub site_name: String,
    pub release: ReleaseCard,
    pub content_html: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub json_ld: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub site_name: String,
}

#[derive(Template)]
#[template(path = "submit.html")]
pub struct SubmitTemplate {
    pub site_name: String,
    pub form: ReleaseFormView,
    pub error: Option<String>,
    pub submitted: bool,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub site_name: String,
    pub form: ContactInput,
    pub error: Option<String>,
    pub sent: bool,
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub site_name: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub site_name: String,
    pub drafts: i64,
    pub new_contacts: i64,
    pub releases: Vec<ReleaseCard>,
    pub listing: ListingView,
    pub rejected: Vec<ReleaseCard>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/counts.html")]
pub struct AdminCountsTemplate {
    pub drafts: i64,
    pub new_contacts: i64,
}

#[derive(Template)]
#[template(path = "admin/drafts.html")]
pub struct AdminDraftsTemplate {
    pub site_name: String,
    pub drafts: Vec<ReleaseCard>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/release_form.html")]
pub struct AdminReleaseFormTemplate {
    pub site_name: String,
    pub heading: String,
    pub action: String,
    pub submit_label: String,
    pub form: ReleaseFormView,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/preview.html")]
pub struct AdminPreviewTemplate {
    pub site_name: String,
    pub release: ReleaseCard,
    pub is_draft: bool,
    pub preview_iframe: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/contacts.html")]
pub struct AdminContactsTemplate {
    pub site_name: String,
    pub contacts: Vec<ContactRow>,
    pub only_new: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
}
