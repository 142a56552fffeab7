use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, post, web};

use pressroom::common::WorkflowError;

use crate::web::forms::ReleaseForm;
use crate::web::helpers::{render, render_status};
use crate::web::security::{SUBMISSION_LIMIT, client_key};
use crate::web::state::AppState;
use crate::web::templates::{ReleaseFormView, SubmitTemplate};

const RATE_LIMITED: &str = "Too many submissions. Please try again later.";

#[get("/submit")]
pub async fn submit_form(state: web::Data<AppState>) -> impl Responder {
    render(SubmitTemplate {
        site_name: state.site.name.clone(),
        form: ReleaseFormView::empty(),
        error: None,
        submitted: false,
    })
}

#[post("/submit")]
pub async fn submit_release(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ReleaseForm>,
) -> impl Responder {
    let failed = |status: StatusCode, message: String| {
        render_status(
            status,
            SubmitTemplate {
                site_name: state.site.name.clone(),
                form: ReleaseFormView::from_form(&form),
                error: Some(message),
                submitted: false,
            },
        )
    };

    if !state
        .rate_limiter
        .check(&client_key(&req, "submit"), SUBMISSION_LIMIT)
    {
        return failed(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED.to_string());
    }

    // Public submissions never choose their placement, and only keep images we issued.
    let mut input = form.to_input();
    input.featured = false;
    input.image_url = input.image_url.filter(|url| state.storage.owns(url.trim()));

    match state.workflow.submit(&input).await {
        Ok(_) => render(SubmitTemplate {
            site_name: state.site.name.clone(),
            form: ReleaseFormView::empty(),
            error: None,
            submitted: true,
        }),
        Err(e @ WorkflowError::Validation(_)) => {
            failed(StatusCode::UNPROCESSABLE_ENTITY, e.user_message())
        }
        Err(e) => {
            log::error!("Failed to submit press release: {}", e);
            failed(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to submit press release. Please try again.".to_string(),
            )
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_form).service(submit_release);
}
