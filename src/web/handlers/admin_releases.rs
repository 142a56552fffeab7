use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use uuid::Uuid;

use pressroom::common::{UploadError, WorkflowError};
use pressroom::db::ADMIN_LIST_LIMIT;
use pressroom::models::ReleaseStatus;
use pressroom::services::DashboardCounts;

use crate::web::forms::{FlashQuery, ListingQuery, RejectForm, ReleaseForm};
use crate::web::helpers::{iframe_srcdoc, redirect, render, render_status, with_param};
use crate::web::state::AppState;
use crate::web::templates::{
    AdminCountsTemplate, AdminDashboardTemplate, AdminDraftsTemplate, AdminPreviewTemplate,
    AdminReleaseFormTemplate, ListingView, ReleaseCard, ReleaseFormView, cards,
};

const LOAD_ERROR: &str = "Failed to load press releases. Please try again.";

/// Only known codes are shown; anything else in the query string is dropped.
fn notice_message(code: &str) -> Option<String> {
    let message = match code {
        "created" => "Press release published.",
        "updated" => "Press release updated.",
        "approved" => "Press release approved and published.",
        "rejected" => "Press release rejected.",
        "deleted" => "Press release deleted.",
        _ => return None,
    };
    Some(message.to_string())
}

fn flash(query: &FlashQuery) -> (Option<String>, Option<String>) {
    (
        query.notice.as_deref().and_then(notice_message),
        query.error.clone(),
    )
}

/// Maps a failed workflow action onto a redirect with an error message.
fn workflow_failure(req: &HttpRequest, back_to: &str, action: &str, e: WorkflowError) -> HttpResponse {
    match &e {
        WorkflowError::Store(_) => log::error!("Failed to {} press release: {}", action, e),
        _ => log::warn!("Refused to {} press release: {}", action, e),
    }
    redirect(req, &with_param(back_to, "error", &e.user_message()))
}

#[get("/admin")]
pub async fn dashboard(
    state: web::Data<AppState>,
    listing: web::Query<ListingQuery>,
    flash_query: web::Query<FlashQuery>,
) -> impl Responder {
    let (notice, mut error) = flash(&flash_query);

    let badge = DashboardCounts::load(&*state.store).await.unwrap_or_else(|e| {
        log::error!("Failed to load dashboard counts: {}", e);
        DashboardCounts::default()
    });

    let published = match state.store.list_published(ADMIN_LIST_LIMIT).await {
        Ok(releases) => releases,
        Err(e) => {
            log::error!("Failed to load published releases: {}", e);
            error.get_or_insert_with(|| LOAD_ERROR.to_string());
            Vec::new()
        }
    };

    let rejected = match state.store.list_by_status(ReleaseStatus::Rejected).await {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Failed to load rejected releases: {}", e);
            Vec::new()
        }
    };

    let listing = listing.to_state();
    let page = listing.view(&published);

    render(AdminDashboardTemplate {
        site_name: state.site.name.clone(),
        drafts: badge.drafts,
        new_contacts: badge.new_contacts,
        releases: cards(page.items.iter().copied()),
        listing: ListingView::new("/admin", &listing, &page),
        rejected: cards(&rejected),
        notice,
        error,
    })
}

/// Badge fragment polled by the dashboard.
#[get("/admin/counts")]
pub async fn counts(state: web::Data<AppState>) -> impl Responder {
    match DashboardCounts::load(&*state.store).await {
        Ok(badge) => render(AdminCountsTemplate {
            drafts: badge.drafts,
            new_contacts: badge.new_contacts,
        }),
        Err(e) => {
            log::error!("Failed to refresh dashboard counts: {}", e);
            // htmx leaves the previous counts in place on an error status.
            HttpResponse::ServiceUnavailable().finish()
        }
    }
}

#[get("/admin/drafts")]
pub async fn drafts(state: web::Data<AppState>, query: web::Query<FlashQuery>) -> impl Responder {
    let (notice, mut error) = flash(&query);

    let queue = match state.store.list_drafts().await {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Failed to load drafts: {}", e);
            error.get_or_insert_with(|| LOAD_ERROR.to_string());
            Vec::new()
        }
    };

    render(AdminDraftsTemplate {
        site_name: state.site.name.clone(),
        drafts: cards(&queue),
        notice,
        error,
    })
}

fn release_form_page(
    state: &AppState,
    status: StatusCode,
    heading: &str,
    action: String,
    form: ReleaseFormView,
    error: Option<String>,
) -> HttpResponse {
    let submit_label = if action == "/admin/releases" {
        "Publish"
    } else {
        "Save changes"
    };

    render_status(
        status,
        AdminReleaseFormTemplate {
            site_name: state.site.name.clone(),
            heading: heading.to_string(),
            action,
            submit_label: submit_label.to_string(),
            form,
            error,
        },
    )
}

#[get("/admin/releases/new")]
pub async fn new_release(state: web::Data<AppState>) -> impl Responder {
    release_form_page(
        &state,
        StatusCode::OK,
        "New press release",
        "/admin/releases".to_string(),
        ReleaseFormView::empty(),
        None,
    )
}

/// Admin direct entry: published immediately.
#[post("/admin/releases")]
pub async fn create_release(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ReleaseForm>,
) -> impl Responder {
    match state.workflow.create_published(&form.to_input()).await {
        Ok(_) => redirect(&req, "/admin?notice=created"),
        Err(e @ WorkflowError::Validation(_)) => release_form_page(
            &state,
            StatusCode::UNPROCESSABLE_ENTITY,
            "New press release",
            "/admin/releases".to_string(),
            ReleaseFormView::from_form(&form),
            Some(e.user_message()),
        ),
        Err(e) => {
            log::error!("Failed to create press release: {}", e);
            release_form_page(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                "New press release",
                "/admin/releases".to_string(),
                ReleaseFormView::from_form(&form),
                Some(e.user_message()),
            )
        }
    }
}

#[get("/admin/releases/{id}/edit")]
pub async fn edit_release(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.store.get_release(id).await {
        Ok(Some(release)) => release_form_page(
            &state,
            StatusCode::OK,
            "Edit press release",
            format!("/admin/releases/{id}"),
            ReleaseFormView::from_release(&release),
            None,
        ),
        Ok(None) => HttpResponse::NotFound().body("Press release not found"),
        Err(e) => {
            log::error!("Failed to load press release {}: {}", id, e);
            HttpResponse::InternalServerError().body(LOAD_ERROR)
        }
    }
}

#[post("/admin/releases/{id}")]
pub async fn update_release(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<ReleaseForm>,
) -> impl Responder {
    let id = path.into_inner();

    match state.workflow.update(id, &form.to_input()).await {
        Ok(release) => {
            log::info!("Updated press release {}", release.id);
            redirect(&req, "/admin?notice=updated")
        }
        Err(WorkflowError::NotFound(_)) => HttpResponse::NotFound().body("Press release not found"),
        Err(e) => {
            let status = if matches!(e, WorkflowError::Validation(_)) {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                log::error!("Failed to update press release {}: {}", id, e);
                StatusCode::INTERNAL_SERVER_ERROR
            };
            release_form_page(
                &state,
                status,
                "Edit press release",
                format!("/admin/releases/{id}"),
                ReleaseFormView::from_form(&form),
                Some(e.user_message()),
            )
        }
    }
}

/// Renders any status, drafts included, for review.
#[get("/admin/releases/{id}/preview")]
pub async fn preview_release(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<FlashQuery>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.get_release(id).await {
        Ok(Some(release)) => render(AdminPreviewTemplate {
            site_name: state.site.name.clone(),
            is_draft: release.status == ReleaseStatus::Draft,
            preview_iframe: iframe_srcdoc(&release.content),
            release: ReleaseCard::from(&release),
            error: query.error.clone(),
        }),
        Ok(None) => HttpResponse::NotFound().body("Press release not found"),
        Err(e) => {
            log::error!("Failed to load press release {}: {}", id, e);
            HttpResponse::InternalServerError().body(LOAD_ERROR)
        }
    }
}

#[post("/admin/releases/{id}/approve")]
pub async fn approve_release(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    match state.workflow.approve(path.into_inner()).await {
        Ok(_) => redirect(&req, "/admin/drafts?notice=approved"),
        Err(e) => workflow_failure(&req, "/admin/drafts", "approve", e),
    }
}

#[post("/admin/releases/{id}/reject")]
pub async fn reject_release(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<RejectForm>,
) -> impl Responder {
    match state
        .workflow
        .reject(path.into_inner(), form.reason.as_deref())
        .await
    {
        Ok(_) => redirect(&req, "/admin/drafts?notice=rejected"),
        Err(e) => workflow_failure(&req, "/admin/drafts", "reject", e),
    }
}

#[post("/admin/releases/{id}/delete")]
pub async fn delete_release(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let image_url = match state.store.get_release(id).await {
        Ok(release) => release.and_then(|r| r.image_url),
        Err(e) => return workflow_failure(&req, "/admin", "delete", e.into()),
    };

    if let Err(e) = state.workflow.delete(id).await {
        return workflow_failure(&req, "/admin", "delete", e);
    }

    if let Some(url) = image_url {
        match state.storage.delete(&url).await {
            Ok(()) | Err(UploadError::ForeignUrl(_)) => {}
            Err(e) => log::warn!("Failed to remove image {} of deleted release {}: {}", url, id, e),
        }
    }

    redirect(&req, "/admin?notice=deleted")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard)
        .service(counts)
        .service(drafts)
        .service(new_release)
        .service(create_release)
        .service(edit_release)
        .service(update_release)
        .service(preview_release)
        .service(approve_release)
        .service(reject_release)
        .service(delete_release);
}
