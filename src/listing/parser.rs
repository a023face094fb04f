//! Listing page markup extraction
//!
//! Two things are pulled out of a listing page: the total page count from
//! the pagination control (page 1 only) and the post references inside the
//! main content container (every page).

use crate::config::SiteConfig;
use crate::ArchiverError;
use scraper::{Html, Selector};
use url::Url;

/// A single author post discovered on a listing page
///
/// The canonical URL is all the archive pipeline needs; the title is
/// carried along for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReference {
    pub url: Url,
    pub title: Option<String>,
}

/// Extracts the total listing page count from page 1's pagination control
///
/// The last pagination element's text is the highest page number. A page
/// with no pagination elements, or one whose last element is not a number,
/// is what a listing for a nonexistent author looks like, so both fail
/// with [`ArchiverError::Discovery`].
pub fn extract_total_pages(html: &str, page_url: &str, site: &SiteConfig) -> crate::Result<u32> {
    let document = Html::parse_document(html);
    let pagination = parse_selector(&site.pagination_selector)?;

    let last = document
        .select(&pagination)
        .last()
        .ok_or_else(|| ArchiverError::Discovery {
            url: page_url.to_string(),
        })?;

    let text = last.text().collect::<String>();
    text.trim()
        .parse::<u32>()
        .map_err(|_| ArchiverError::Discovery {
            url: page_url.to_string(),
        })
}

/// Extracts every post reference from a listing page
///
/// Posts are the post-title elements inside the last matching main content
/// container; each title's anchor href, resolved against the page URL,
/// becomes the post's canonical URL. Missing container, zero titles, or a
/// title without a link all fail with [`ArchiverError::PageParse`].
pub fn extract_posts(
    html: &str,
    page_url: &Url,
    site: &SiteConfig,
) -> crate::Result<Vec<PostReference>> {
    let document = Html::parse_document(html);
    let content = parse_selector(&site.content_selector)?;
    let post_title = parse_selector(&site.post_title_selector)?;
    let anchor = parse_selector("a")?;

    let container = document
        .select(&content)
        .last()
        .ok_or_else(|| parse_error(page_url, "no main content container"))?;

    let mut posts = Vec::new();
    for title in container.select(&post_title) {
        let link = title
            .select(&anchor)
            .next()
            .ok_or_else(|| parse_error(page_url, "post title without a link"))?;

        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| parse_error(page_url, "post link missing href"))?;

        let url = page_url.join(href.trim())?;

        let text = link.text().collect::<String>().trim().to_string();
        let title = if text.is_empty() { None } else { Some(text) };

        posts.push(PostReference { url, title });
    }

    if posts.is_empty() {
        return Err(parse_error(page_url, "content container has no post titles"));
    }

    Ok(posts)
}

fn parse_selector(selector: &str) -> crate::Result<Selector> {
    Selector::parse(selector).map_err(|e| ArchiverError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn parse_error(url: &Url, message: &str) -> ArchiverError {
    ArchiverError::PageParse {
        url: url.to_string(),
        message: message.to_string(),
    }
}
