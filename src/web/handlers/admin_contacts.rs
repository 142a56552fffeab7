use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use serde::Deserialize;
use uuid::Uuid;

use pressroom::common::StoreError;
use pressroom::models::ContactSubmission;

use crate::web::forms::NotesForm;
use crate::web::helpers::{redirect, render, with_param};
use crate::web::state::AppState;
use crate::web::templates::{AdminContactsTemplate, ContactRow};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactsQuery {
    pub only_new: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
}

fn notice_message(code: &str) -> Option<String> {
    let message = match code {
        "read" => "Marked as read.",
        "responded" => "Marked as responded.",
        "notes" => "Notes saved.",
        _ => return None,
    };
    Some(message.to_string())
}

#[get("/admin/contacts")]
pub async fn list_contacts(state: web::Data<AppState>, query: web::Query<ContactsQuery>) -> impl Responder {
    let mut error = query.error.clone();

    let loaded = if query.only_new {
        state.store.list_new_contacts().await
    } else {
        state.store.list_contacts().await
    };
    let contacts = loaded.unwrap_or_else(|e| {
        log::error!("Failed to load contact submissions: {}", e);
        error.get_or_insert_with(|| "Failed to load contact submissions.".to_string());
        Vec::new()
    });

    render(AdminContactsTemplate {
        site_name: state.site.name.clone(),
        contacts: contacts.iter().map(ContactRow::from).collect(),
        only_new: query.only_new,
        notice: query.notice.as_deref().and_then(notice_message),
        error,
    })
}

/// Shared tail of the three contact actions.
fn finish(
    req: &HttpRequest,
    id: Uuid,
    action: &str,
    result: Result<Option<ContactSubmission>, StoreError>,
) -> HttpResponse {
    match result {
        Ok(Some(_)) => redirect(req, &format!("/admin/contacts?notice={action}")),
        Ok(None) => HttpResponse::NotFound().body("Contact submission not found"),
        Err(e) => {
            log::error!("Failed to update contact submission {} ({}): {}", id, action, e);
            redirect(req, &with_param("/admin/contacts", "error", e.user_message()))
        }
    }
}

#[post("/admin/contacts/{id}/read")]
pub async fn mark_read(state: web::Data<AppState>, req: HttpRequest, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    finish(&req, id, "read", state.store.mark_contact_read(id).await)
}

#[post("/admin/contacts/{id}/responded")]
pub async fn mark_responded(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<NotesForm>,
) -> impl Responder {
    let id = path.into_inner();
    let notes = form
        .admin_notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    finish(&req, id, "responded", state.store.mark_contact_responded(id, notes).await)
}

#[post("/admin/contacts/{id}/notes")]
pub async fn save_notes(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<NotesForm>,
) -> impl Responder {
    let id = path.into_inner();
    let notes = form.admin_notes.as_deref().unwrap_or_default().trim();

    finish(&req, id, "notes", state.store.update_contact_notes(id, notes).await)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_contacts)
        .service(mark_read)
        .service(mark_responded)
        .service(save_notes);
}
