mod web;

use std::sync::Arc;
use std::time::Duration;

use actix_files::Files;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::web::Data;
use actix_web::{App, HttpServer};

use pressroom::config::Config;
use pressroom::db::{Database, MemoryStore, RecordStore};
use pressroom::services::{Clock, LocalBlobStorage, SessionManager, SystemClock};

use crate::web::handlers;
use crate::web::middleware::AdminGuard;
use crate::web::state::{AppState, SiteSettings};

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(15 * 60);

fn startup_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(startup_error)?;

    let store: Arc<dyn RecordStore> = match config.database_url.as_deref() {
        Some(url) => Arc::new(Database::new(url).await.map_err(startup_error)?),
        None => {
            log::warn!("DATABASE_URL not set; using an in-memory store, nothing will persist");
            Arc::new(MemoryStore::new())
        }
    };

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let storage = Arc::new(LocalBlobStorage::new(
        config.upload_dir.clone(),
        &config.upload_url_prefix,
    ));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let sessions = Arc::new(SessionManager::new(clock.clone(), config.session_ttl()));

    let admin = config.admin_credentials().map_err(startup_error)?;
    if admin.is_none() {
        log::warn!("ADMIN_USERNAME and ADMIN_PASSWORD (or ADMIN_PASSWORD_HASH) not set; admin login is disabled");
    }

    let state = Data::new(AppState::new(
        store,
        storage,
        clock,
        sessions.clone(),
        admin,
        SiteSettings::from(&config),
    ));

    let purge = sessions.clone();
    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            let purged = purge.purge_expired();
            if purged > 0 {
                log::debug!("Purged {} expired admin sessions", purged);
            }
        }
    });

    let upload_dir = config.upload_dir.clone();
    let upload_prefix = config.upload_url_prefix.clone();
    log::info!("Listening on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(AdminGuard::new(sessions.clone()))
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Frame-Options", "DENY"))
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "strict-origin-when-cross-origin")),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
            .service(Files::new("/static", "./static").prefer_utf8(true))
            .service(Files::new(&upload_prefix, upload_dir.clone()))
            .default_service(actix_web::web::to(handlers::public::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
