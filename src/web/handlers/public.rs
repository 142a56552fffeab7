use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, web};

use pressroom::db::{BULK_LIST_LIMIT, FEATURED_LIMIT};
use pressroom::services::{Clock, seo};

use crate::web::forms::ListingQuery;
use crate::web::helpers::{render, render_status};
use crate::web::state::AppState;
use crate::web::templates::{
    HomeTemplate, ListingView, NotFoundTemplate, ReleaseCard, ReleaseTemplate, ReleasesTemplate,
    cards,
};

const RECENT_LIMIT: i64 = 6;
const LOAD_ERROR: &str = "Press releases could not be loaded right now. Please try again later.";

#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    let featured = state.store.list_featured(FEATURED_LIMIT).await;
    let recent = state.store.list_published(RECENT_LIMIT).await;

    let (featured, recent, error) = match (featured, recent) {
        (Ok(featured), Ok(recent)) => (featured, recent, None),
        (featured, recent) => {
            for e in [featured.err(), recent.err()].into_iter().flatten() {
                log::error!("Failed to load home page releases: {}", e);
            }
            (Vec::new(), Vec::new(), Some(LOAD_ERROR.to_string()))
        }
    };

    render(HomeTemplate {
        site_name: state.site.name.clone(),
        featured: cards(&featured),
        recent: cards(&recent),
        error,
    })
}

#[get("/releases")]
pub async fn releases(state: web::Data<AppState>, query: web::Query<ListingQuery>) -> impl Responder {
    let (all, error) = match state.store.list_published(BULK_LIST_LIMIT).await {
        Ok(all) => (all, None),
        Err(e) => {
            log::error!("Failed to load press releases: {}", e);
            (Vec::new(), Some(LOAD_ERROR.to_string()))
        }
    };

    let listing = query.to_state();
    let page = listing.view(&all);

    render(ReleasesTemplate {
        site_name: state.site.name.clone(),
        releases: cards(page.items.iter().copied()),
        listing: ListingView::new("/releases", &listing, &page),
        error,
    })
}

#[get("/releases/{slug}")]
pub async fn release_detail(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let slug = path.into_inner();

    let release = match state.store.get_published_by_slug(&slug).await {
        Ok(Some(release)) => release,
        Ok(None) => {
            return render_status(
                StatusCode::NOT_FOUND,
                NotFoundTemplate {
                    site_name: state.site.name.clone(),
                },
            );
        }
        Err(e) => {
            log::error!("Failed to load press release {}: {}", slug, e);
            return HttpResponse::InternalServerError().body(LOAD_ERROR);
        }
    };

    render(ReleaseTemplate {
        site_name: state.site.name.clone(),
        json_ld: seo::structured_data_script(&state.site.url, &state.site.name, &release),
        content_html: release.content.clone(),
        contact_email: release.contact_email.clone(),
        contact_phone: release.contact_phone.clone().unwrap_or_default(),
        release: ReleaseCard::from(&release),
    })
}

#[get("/sitemap.xml")]
pub async fn sitemap(state: web::Data<AppState>) -> impl Responder {
    let published = state
        .store
        .list_published(BULK_LIST_LIMIT)
        .await
        .unwrap_or_else(|e| {
            log::error!("Error generating sitemap, serving static pages only: {}", e);
            Vec::new()
        });
    let today = state.clock.now().date_naive();

    HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(seo::sitemap_xml(&state.site.url, &published, today))
}

#[get("/robots.txt")]
pub async fn robots(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(seo::robots_txt(&state.site.url))
}

/// Fallback for unmatched paths.
pub async fn not_found(state: web::Data<AppState>) -> HttpResponse {
    render_status(
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            site_name: state.site.name.clone(),
        },
    )
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(releases)
        .service(release_detail)
        .service(sitemap)
        .service(robots);
}
