//! Sitemap, robots.txt and schema.org markup for search engines.

use chrono::NaiveDate;
use serde_json::{Value, json};
use std::fmt::Write;

use crate::models::PressRelease;
use crate::services::html::{escape_html, strip_html};

const DESCRIPTION_CHARS: usize = 160;

struct StaticPage {
    path: &'static str,
    changefreq: &'static str,
    priority: &'static str,
}

const STATIC_PAGES: [StaticPage; 4] = [
    StaticPage { path: "", changefreq: "daily", priority: "1.0" },
    StaticPage { path: "/releases", changefreq: "daily", priority: "0.9" },
    StaticPage { path: "/submit", changefreq: "monthly", priority: "0.8" },
    StaticPage { path: "/contact", changefreq: "monthly", priority: "0.6" },
];

fn base(site_url: &str) -> &str {
    site_url.trim_end_matches('/')
}

fn push_url(out: &mut String, loc: &str, lastmod: NaiveDate, changefreq: &str, priority: &str) {
    // Writing to a String cannot fail.
    let _ = write!(
        out,
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
        escape_html(loc),
        lastmod.format("%Y-%m-%d"),
        changefreq,
        priority
    );
}

/// Static pages dated `today`, then one entry per published release dated
/// by its publication (or creation) day. Pass an empty slice to get the
/// static pages alone.
pub fn sitemap_xml(site_url: &str, releases: &[PressRelease], today: NaiveDate) -> String {
    let base = base(site_url);
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for page in &STATIC_PAGES {
        let loc = format!("{base}{}", page.path);
        push_url(&mut out, &loc, today, page.changefreq, page.priority);
    }

    for release in releases.iter().filter(|r| r.is_published()) {
        let loc = format!("{base}/releases/{}", release.slug);
        push_url(&mut out, &loc, release.display_date().date_naive(), "monthly", "0.8");
    }

    out.push_str("</urlset>\n");
    out
}

pub fn robots_txt(site_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /admin/\nDisallow: /api/\n\nSitemap: {}/sitemap.xml\n",
        base(site_url)
    )
}

/// schema.org `NewsArticle` for a release page.
pub fn structured_data(site_url: &str, site_name: &str, release: &PressRelease) -> Value {
    let base = base(site_url);
    let description = match &release.subtitle {
        Some(subtitle) => subtitle.clone(),
        None => strip_html(&release.content)
            .chars()
            .take(DESCRIPTION_CHARS)
            .collect(),
    };
    let published = release.published_at.map(|at| at.to_rfc3339());

    json!({
        "@context": "https://schema.org",
        "@type": "NewsArticle",
        "headline": release.title,
        "description": description,
        "image": release.image_url.iter().collect::<Vec<_>>(),
        "datePublished": published,
        "dateModified": published,
        "author": {
            "@type": "Organization",
            "name": release.company,
            "contactPoint": {
                "@type": "ContactPoint",
                "email": release.contact_email,
                "telephone": release.contact_phone,
            },
        },
        "publisher": {
            "@type": "Organization",
            "name": site_name,
            "logo": {
                "@type": "ImageObject",
                "url": format!("{base}/static/logo.png"),
            },
        },
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": format!("{base}/releases/{}", release.slug),
        },
        "articleSection": release.category,
        "keywords": release.category,
    })
}

/// JSON-LD safe to drop inside `<script type="application/ld+json">`.
pub fn structured_data_script(site_url: &str, site_name: &str, release: &PressRelease) -> String {
    structured_data(site_url, site_name, release)
        .to_string()
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReleaseStatus;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn release(slug: &str, status: ReleaseStatus) -> PressRelease {
        let created = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        PressRelease {
            id: Uuid::new_v4(),
            slug: slug.into(),
            title: "Acme ships </script> widgets".into(),
            subtitle: None,
            content: "<p>Acme &amp; friends</p>".into(),
            category: "Technology".into(),
            author: "Jane".into(),
            company: "Acme".into(),
            contact_email: "press@acme.test".into(),
            contact_phone: None,
            image_url: Some("/uploads/press-releases/1-abcdef.png".into()),
            featured: false,
            status,
            created_at: created,
            published_at: (status == ReleaseStatus::Published)
                .then(|| Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap()),
            rejection_reason: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn sitemap_lists_static_pages_and_published_releases() {
        let releases = [
            release("acme-ships", ReleaseStatus::Published),
            release("secret-draft", ReleaseStatus::Draft),
        ];

        let xml = sitemap_xml("https://news.example/", &releases, today());

        assert!(xml.contains("<loc>https://news.example</loc>"));
        assert!(xml.contains("<loc>https://news.example/contact</loc>"));
        assert!(xml.contains("<loc>https://news.example/releases/acme-ships</loc>"));
        assert!(xml.contains("<lastmod>2024-03-05</lastmod>"));
        assert!(!xml.contains("secret-draft"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn sitemap_without_releases_has_static_pages_only() {
        let xml = sitemap_xml("https://news.example", &[], today());
        assert_eq!(xml.matches("<url>").count(), STATIC_PAGES.len());
    }

    #[test]
    fn robots_blocks_admin() {
        let robots = robots_txt("https://news.example/");
        assert!(robots.contains("Disallow: /admin/"));
        assert!(robots.contains("Sitemap: https://news.example/sitemap.xml"));
    }

    #[test]
    fn structured_data_describes_release() {
        let data = structured_data("https://news.example", "Pressroom", &release("acme-ships", ReleaseStatus::Published));

        assert_eq!(data["@type"], "NewsArticle");
        assert_eq!(data["description"], "Acme & friends");
        assert_eq!(data["author"]["name"], "Acme");
        assert_eq!(data["publisher"]["name"], "Pressroom");
        assert_eq!(data["mainEntityOfPage"]["@id"], "https://news.example/releases/acme-ships");
        assert_eq!(data["image"][0], "/uploads/press-releases/1-abcdef.png");
        assert!(data["datePublished"].as_str().unwrap().starts_with("2024-03-05"));
    }

    #[test]
    fn script_cannot_close_its_tag() {
        let script = structured_data_script("https://news.example", "Pressroom", &release("a", ReleaseStatus::Published));
        assert!(!script.contains("</script>"));
    }
}
