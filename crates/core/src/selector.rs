//! Content region selection.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::config::heuristics;
use crate::matcher::first_match;

/// Element most likely to hold the article body.
///
/// Candidates are tried in rank order (`article`, then anything named or
/// classed `content`, `main`, `body`); the first group with a match wins.
pub fn content_region(document: &Html) -> Option<ElementRef<'_>> {
	let root = document.root_element();
	for (rank, candidates) in heuristics().content_candidates.iter().enumerate() {
		if let Some(region) = first_match(root, candidates) {
			debug!(target = "article2md.selector", rank, tag = region.value().name(), "content region selected");
			return Some(region);
		}
	}
	debug!(target = "article2md.selector", "no content region matched");
	None
}
