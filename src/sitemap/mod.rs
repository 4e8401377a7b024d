// wblogtool/src/sitemap/mod.rs
use anyhow::{Context, Result};
use chrono::Local;
use std::fmt::Write as _;
use std::fs;

use crate::config::AppConfig;

/// Regenerates the blog's sitemap.xml. Runs daily as the backup job's peer
/// on the scheduler.
pub fn write_sitemap(config: &AppConfig) -> Result<()> {
    let xml = render_sitemap(&config.site_url, &Local::now().format("%Y-%m-%d").to_string());

    if let Some(parent) = config.sitemap_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "Failed to create sitemap directory {}",
                    parent.display()
                )
            })?;
        }
    }
    fs::write(&config.sitemap_path, xml).with_context(|| {
        format!("Failed to write sitemap to {}", config.sitemap_path.display())
    })?;
    println!("Sitemap written to {}", config.sitemap_path.display());
    Ok(())
}

fn render_sitemap(site_url: &str, lastmod: &str) -> String {
    let base = site_url.trim_end_matches('/');
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for (page, priority) in [("", "1.0"), ("/index", "0.8"), ("/rss", "0.5")] {
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}{}</loc>\n    <lastmod>{}</lastmod>\n    <priority>{}</priority>\n  </url>\n",
            base, page, lastmod, priority
        );
    }
    xml.push_str("</urlset>\n");
    xml
}
