use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};

use pressroom::services::ADMIN_SESSION_COOKIE;

use crate::web::forms::{AuthQuery, LoginForm};
use crate::web::helpers::{is_htmx, removal_cookie, render, see_other, session_cookie};
use crate::web::security::{LOGIN_LIMIT, client_key};
use crate::web::state::AppState;
use crate::web::templates::AdminLoginTemplate;

#[get("/admin/login")]
pub async fn login_form(state: web::Data<AppState>, query: web::Query<AuthQuery>) -> impl Responder {
    let error = query.error.as_deref().map(|code| match code {
        "missing" => "Username and password are required".to_string(),
        "invalid" => "Invalid username or password".to_string(),
        "rate_limit" => "Too many login attempts. Please try again later.".to_string(),
        "unconfigured" => "Admin credentials not configured".to_string(),
        _ => "An internal error occurred. Please try again.".to_string(),
    });

    render(AdminLoginTemplate {
        site_name: state.site.name.clone(),
        error,
    })
}

#[post("/admin/login")]
pub async fn login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> impl Responder {
    if !state.rate_limiter.check(&client_key(&req, "login"), LOGIN_LIMIT) {
        log::warn!("Login rate limit hit for {}", client_key(&req, "login"));
        return see_other("/admin/login?error=rate_limit");
    }

    let Some(admin) = state.admin.as_ref() else {
        return see_other("/admin/login?error=unconfigured");
    };

    if form.username.trim().is_empty() || form.password.is_empty() {
        return see_other("/admin/login?error=missing");
    }

    // argon2 is slow on purpose; keep it off the async workers.
    let admin = admin.clone();
    let LoginForm { username, password } = form.into_inner();
    let valid = web::block(move || admin.verify(&username, &password))
        .await
        .unwrap_or_else(|e| {
            log::error!("Password verification failed to run: {}", e);
            false
        });

    if !valid {
        log::warn!("Failed admin login from {}", client_key(&req, "login"));
        return see_other("/admin/login?error=invalid");
    }

    let session = state.sessions.issue();
    log::info!("Admin logged in");

    HttpResponse::SeeOther()
        .cookie(session_cookie(
            &session.token,
            state.sessions.ttl(),
            state.site.secure_cookies,
        ))
        .insert_header(("Location", "/admin"))
        .finish()
}

#[post("/admin/logout")]
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Some(cookie) = req.cookie(ADMIN_SESSION_COOKIE) {
        state.sessions.revoke(cookie.value());
    }
    let cookie = removal_cookie(state.site.secure_cookies);

    if is_htmx(&req) {
        HttpResponse::Ok()
            .cookie(cookie)
            .insert_header(("HX-Redirect", "/admin/login"))
            .finish()
    } else {
        HttpResponse::SeeOther()
            .cookie(cookie)
            .insert_header(("Location", "/admin/login"))
            .finish()
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_form)
        .service(login_submit)
        .service(logout);
}
