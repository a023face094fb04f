//! Author listing discovery
//!
//! This module finds every post an author has published by walking the
//! site's paginated listing: page-count extraction from the pagination
//! control, concurrent page fetching, and post-reference extraction.

mod fetcher;
mod paginator;
mod parser;

pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use paginator::ListingPaginator;
pub use parser::{extract_posts, extract_total_pages, PostReference};
