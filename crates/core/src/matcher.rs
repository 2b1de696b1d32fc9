//! Typed element matchers.
//!
//! Fuzzy lookups such as "an element called `main` or with `main` somewhere in
//! its class" are expressed as small lists of matchers evaluated with
//! any-of semantics, instead of assembling CSS selector strings at runtime.

use std::sync::Arc;

use scraper::ElementRef;
use serde::Deserialize;

/// Boolean test over a single element, shared by the removal and
/// preservation lists of the converter.
pub type ElementPredicate = Arc<dyn Fn(&ElementRef<'_>) -> bool + Send + Sync>;

/// A single structural test against an element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementMatcher {
	/// Tag name equality, ignoring ASCII case.
	Tag(String),
	/// Case-insensitive substring of the raw `class` attribute.
	ClassContains(String),
	/// A whole class token, ignoring ASCII case.
	ClassToken(String),
	/// A class token starting with the given prefix, ignoring ASCII case.
	ClassPrefix(String),
}

impl ElementMatcher {
	pub fn matches(&self, element: &ElementRef<'_>) -> bool {
		match self {
			Self::Tag(tag) => element.value().name().eq_ignore_ascii_case(tag),
			Self::ClassContains(needle) => class_attr(element).is_some_and(|class| contains_ignore_case(class, needle)),
			Self::ClassToken(token) => class_tokens(element).any(|class| class.eq_ignore_ascii_case(token)),
			Self::ClassPrefix(prefix) => {
				class_tokens(element).any(|class| class.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix)))
			}
		}
	}
}

/// True when any matcher in `matchers` accepts `element`.
pub fn matches_any(matchers: &[ElementMatcher], element: &ElementRef<'_>) -> bool {
	matchers.iter().any(|matcher| matcher.matches(element))
}

/// First element in document order, starting at `root` itself, accepted by
/// any of `matchers`.
pub fn first_match<'a>(root: ElementRef<'a>, matchers: &[ElementMatcher]) -> Option<ElementRef<'a>> {
	root.descendants().filter_map(ElementRef::wrap).find(|element| matches_any(matchers, element))
}

fn class_attr<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
	element.value().attr("class")
}

fn class_tokens<'a>(element: &ElementRef<'a>) -> impl Iterator<Item = &'a str> {
	class_attr(element).into_iter().flat_map(str::split_ascii_whitespace)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
	use scraper::Html;

	use super::*;

	fn check(html: &str, matcher: ElementMatcher) -> bool {
		let fragment = Html::parse_fragment(html);
		let element = fragment
			.root_element()
			.descendants()
			.filter_map(ElementRef::wrap)
			.find(|element| element.value().name() == "div")
			.expect("fixture should contain a div");
		matcher.matches(&element)
	}

	#[test]
	fn tag_matcher_ignores_case() {
		assert!(check("<DIV>x</DIV>", ElementMatcher::Tag("Div".into())));
	}

	#[test]
	fn class_contains_is_a_substring_test() {
		assert!(check(r#"<div class="top-ADS-slot">x</div>"#, ElementMatcher::ClassContains("ads".into())));
		assert!(!check(r#"<div class="ad-banner">x</div>"#, ElementMatcher::ClassContains("ads".into())));
	}

	#[test]
	fn class_token_and_prefix_need_whole_tokens() {
		assert!(check(r#"<div class="wide ad">x</div>"#, ElementMatcher::ClassToken("ad".into())));
		assert!(!check(r#"<div class="head">x</div>"#, ElementMatcher::ClassToken("ad".into())));
		assert!(check(r#"<div class="wide ad-banner">x</div>"#, ElementMatcher::ClassPrefix("ad-".into())));
		assert!(!check(r#"<div class="load-ad">x</div>"#, ElementMatcher::ClassPrefix("ad-".into())));
	}

	#[test]
	fn first_match_walks_in_document_order() {
		let document = Html::parse_document(r#"<p class="post-date">a</p><time>b</time>"#);
		let matchers = [ElementMatcher::Tag("time".into()), ElementMatcher::ClassContains("date".into())];
		let found = first_match(document.root_element(), &matchers).expect("a match");
		assert_eq!(found.value().name(), "p");
	}

	#[test]
	fn matchers_deserialize_from_json() {
		let matchers: Vec<ElementMatcher> = serde_json::from_str(r#"[{"tag":"time"},{"class_prefix":"ad-"}]"#).unwrap();
		assert_eq!(matchers, vec![ElementMatcher::Tag("time".into()), ElementMatcher::ClassPrefix("ad-".into())]);
	}
}
