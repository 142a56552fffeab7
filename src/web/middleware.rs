use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};
use futures_util::future::{Ready, ok};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use pressroom::services::{ADMIN_SESSION_COOKIE, SessionManager};

pub const LOGIN_PATH: &str = "/admin/login";

/// Every `/admin` path except the login page needs a live admin session.
fn requires_session(path: &str) -> bool {
    let is_admin = path == "/admin" || path.starts_with("/admin/");
    is_admin && path != LOGIN_PATH
}

/// Admin session gate
pub struct AdminGuard {
    sessions: Arc<SessionManager>,
}

impl AdminGuard {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AdminGuardMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminGuardMiddleware {
            service: Rc::new(service),
            sessions: self.sessions.clone(),
        })
    }
}

pub struct AdminGuardMiddleware<S> {
    service: Rc<S>,
    sessions: Arc<SessionManager>,
}

impl<S> AdminGuardMiddleware<S> {
    fn has_session(&self, req: &ServiceRequest) -> bool {
        req.cookie(ADMIN_SESSION_COOKIE)
            .is_some_and(|c| self.sessions.validate(c.value()))
    }
}

fn login_redirect(req: &ServiceRequest) -> HttpResponse {
    let htmx = req
        .headers()
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|s| s.eq_ignore_ascii_case("true"));

    if htmx {
        HttpResponse::Unauthorized()
            .insert_header(("HX-Redirect", LOGIN_PATH))
            .finish()
    } else {
        HttpResponse::SeeOther()
            .insert_header(("Location", LOGIN_PATH))
            .finish()
    }
}

impl<S, B> Service<ServiceRequest> for AdminGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !requires_session(req.path()) || self.has_session(&req) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        log::debug!("Unauthenticated request to {}", req.path());
        let response = login_redirect(&req);
        Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
    }
}
