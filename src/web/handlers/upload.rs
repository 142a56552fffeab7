use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde_json::json;

use pressroom::services::upload::{MAX_IMAGE_BYTES, UploadFailure, upload_image};
use pressroom::services::ImageUpload;

use crate::web::security::{PUBLIC_UPLOAD_LIMIT, client_key};
use crate::web::state::AppState;

/// Body cap for the upload route. Sits above the image limit so an
/// oversized image still gets the friendly size message.
pub const UPLOAD_PAYLOAD_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

const FILE_NAME_HEADER: &str = "X-File-Name";
const RATE_LIMITED: &str = "Too many uploads. Please try again later.";

fn header<'a>(req: &'a HttpRequest, name: &str) -> &'a str {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Raw image body; type from `Content-Type`, original name from `X-File-Name`.
async fn store_upload(state: &AppState, req: &HttpRequest, body: web::Bytes) -> HttpResponse {
    let file_name = urlencoding::decode(header(req, FILE_NAME_HEADER))
        .map(|n| n.into_owned())
        .unwrap_or_default();

    let upload = ImageUpload {
        file_name: if file_name.is_empty() {
            "image".to_string()
        } else {
            file_name
        },
        content_type: header(req, CONTENT_TYPE.as_str()).to_string(),
        bytes: body.to_vec(),
    };

    match upload_image(&*state.storage, &upload).await {
        Ok(url) => HttpResponse::Ok().json(json!({ "url": url })),
        Err(e @ UploadFailure::Invalid(_)) => {
            HttpResponse::BadRequest().json(json!({ "error": e.user_message() }))
        }
        Err(e @ UploadFailure::Storage(_)) => {
            log::error!("Image upload failed: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e.user_message() }))
        }
    }
}

pub async fn admin_upload(state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> impl Responder {
    store_upload(&state, &req, body).await
}

/// Same checks as the admin route, throttled per client.
pub async fn public_upload(state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> impl Responder {
    if !state
        .rate_limiter
        .check(&client_key(&req, "upload"), PUBLIC_UPLOAD_LIMIT)
    {
        return HttpResponse::TooManyRequests().json(json!({ "error": RATE_LIMITED }));
    }
    store_upload(&state, &req, body).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/admin/upload")
            .app_data(web::PayloadConfig::new(UPLOAD_PAYLOAD_LIMIT))
            .route(web::post().to(admin_upload)),
    )
    .service(
        web::resource("/upload")
            .app_data(web::PayloadConfig::new(UPLOAD_PAYLOAD_LIMIT))
            .route(web::post().to(public_upload)),
    );
}
