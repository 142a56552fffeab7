pub mod admin_contacts;
pub mod admin_releases;
pub mod auth;
pub mod contact;
pub mod public;
pub mod submit;
pub mod upload;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    public::configure(cfg);
    submit::configure(cfg);
    contact::configure(cfg);
    auth::configure(cfg);
    admin_releases::configure(cfg);
    admin_contacts::configure(cfg);
    upload::configure(cfg);
}
