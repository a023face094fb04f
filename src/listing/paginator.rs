//! Listing pagination discovery
//!
//! Determines how many listing pages an author has from page 1's
//! pagination control, then fetches and parses the remaining pages with
//! bounded concurrency, producing the full post list in listing order.

use crate::config::SiteConfig;
use crate::listing::fetcher::PageFetcher;
use crate::listing::parser::{extract_posts, extract_total_pages, PostReference};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use url::Url;

/// Discovers the ordered set of an author's posts across all listing pages
pub struct ListingPaginator<'a, F> {
    fetcher: &'a F,
    site: &'a SiteConfig,
}

impl<'a, F: PageFetcher> ListingPaginator<'a, F> {
    pub fn new(fetcher: &'a F, site: &'a SiteConfig) -> Self {
        Self { fetcher, site }
    }

    /// Discovers every post on the author listing rooted at `root_url`
    ///
    /// Pages 2..=N are fetched concurrently, at most `page-concurrency` in
    /// flight at once; the buffered stream yields them in page order, so
    /// the returned posts are in page-ascending, within-page listing order
    /// with page 1's posts first. Any page's fetch or parse error aborts
    /// discovery entirely.
    pub async fn discover(&self, root_url: &str) -> crate::Result<Vec<PostReference>> {
        tracing::info!("Fetching {}...", root_url);
        let first_body = self.fetcher.fetch(root_url).await?;

        let total_pages = extract_total_pages(&first_body, root_url, self.site)?;
        tracing::info!(
            "Extracting remaining {} pages of author posts...",
            total_pages.saturating_sub(1)
        );

        let mut remaining = stream::iter((2..=total_pages).map(|page_number| {
            let page_url = format!("{}/page/{}/", root_url.trim_end_matches('/'), page_number);
            async move {
                let body = self.fetcher.fetch(&page_url).await?;
                let base = Url::parse(&page_url)?;
                extract_posts(&body, &base, self.site)
            }
        }))
        .buffered(self.site.page_concurrency);

        let first_base = Url::parse(root_url)?;
        let mut posts = extract_posts(&first_body, &first_base, self.site)?;

        while let Some(page_posts) = remaining.try_next().await? {
            posts.extend(page_posts);
        }

        tracing::info!("Found {} posts", posts.len());
        Ok(posts)
    }
}
