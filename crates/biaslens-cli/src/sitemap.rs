use std::path::Path;

use anyhow::Context;
use biaslens_core::{build_sitemap, render_sitemap_xml, SiteConfig, SitemapArticle};
use chrono::{DateTime, Utc};

fn sitemap_document(site: &SiteConfig, articles: &[SitemapArticle], now: DateTime<Utc>) -> String {
    render_sitemap_xml(&build_sitemap(site, articles, now))
}

pub(crate) async fn run_sitemap(
    pool: &sqlx::PgPool,
    site: &SiteConfig,
    output: &Path,
) -> anyhow::Result<()> {
    let articles = biaslens_db::list_sitemap_articles(pool).await?;
    let xml = sitemap_document(site, &articles, Utc::now());

    std::fs::write(output, xml).with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(
        articles = articles.len(),
        static_routes = site.routes.len(),
        path = %output.display(),
        "sitemap written"
    );
    println!("wrote {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sitemap_document_covers_routes_and_articles() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/site.yaml");
        let site = biaslens_core::load_site_config(&path).expect("bundled site config loads");
        let now = Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).single().expect("valid time");
        let articles = vec![SitemapArticle {
            id: "news.example.com_a".to_string(),
            last_modified: None,
        }];

        let xml = sitemap_document(&site, &articles, now);

        assert!(xml.contains("<loc>https://biaslens.com/methodology</loc>"));
        assert!(xml.contains("<loc>https://biaslens.com/articles/news.example.com_a</loc>"));
        assert!(xml.contains("<lastmod>2024-11-01T00:00:00Z</lastmod>"));
    }

    #[test]
    fn sitemap_document_is_written_to_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/site.yaml");
        let site = biaslens_core::load_site_config(&path).expect("bundled site config loads");

        let output = dir.path().join("sitemap.xml");
        std::fs::write(&output, sitemap_document(&site, &[], Utc::now())).expect("write");

        let written = std::fs::read_to_string(&output).expect("read back");
        assert!(written.starts_with("<?xml"));
        assert!(written.trim_end().ends_with("</urlset>"));
    }
}
