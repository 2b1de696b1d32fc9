//! Heuristic tables loaded from `heuristics.json`.

use std::sync::LazyLock;

use serde::Deserialize;

use crate::matcher::ElementMatcher;

static HEURISTICS: LazyLock<Heuristics> = LazyLock::new(|| {
	let json = include_str!("heuristics.json");
	serde_json::from_str(json).expect("Failed to parse heuristics.json")
});

pub fn heuristics() -> &'static Heuristics {
	&HEURISTICS
}

/// Matcher tables driving region selection, noise removal, preservation
/// and metadata lookup.
#[derive(Debug, Deserialize)]
pub struct Heuristics {
	/// Ranked candidates for the article body; each entry is an any-of group.
	pub content_candidates: Vec<Vec<ElementMatcher>>,
	/// Elements deleted from the content region before conversion.
	pub remove: Vec<ElementMatcher>,
	/// Elements emitted as raw markup instead of being converted.
	pub preserve: Vec<ElementMatcher>,
	/// Elements carrying the publish date.
	pub time: Vec<ElementMatcher>,
	/// Author links or their containers.
	pub author: Vec<ElementMatcher>,
}
