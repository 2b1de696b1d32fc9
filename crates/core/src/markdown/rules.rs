//! Conversion rules and the custom rules registered by the article preset.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex_lite::Regex;
use scraper::ElementRef;

use crate::dom::{find_descendant, is_named};
use crate::markdown::render::RenderContext;
use crate::srcset::{first_candidate, max_declared_size};

static NO_OP_HREF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#|javascript:\s*void\(0\);?\s*)$").expect("NO_OP_HREF should compile"));

/// Maps a matching element to a Markdown fragment.
///
/// Rules are tried in registration order and the first match renders the
/// element; `cx` renders children on demand so a rule that ignores its
/// content never walks it.
pub trait ConversionRule: Send + Sync {
	fn name(&self) -> &'static str;

	fn matches(&self, element: &ElementRef<'_>) -> bool;

	fn replacement(&self, element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String;
}

/// A stateless rule built from two plain functions.
#[derive(Clone, Copy)]
pub struct Rule {
	pub name: &'static str,
	pub filter: fn(&ElementRef<'_>) -> bool,
	pub replacement: fn(ElementRef<'_>, &mut RenderContext<'_>) -> String,
}

impl ConversionRule for Rule {
	fn name(&self) -> &'static str {
		self.name
	}

	fn matches(&self, element: &ElementRef<'_>) -> bool {
		(self.filter)(element)
	}

	fn replacement(&self, element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
		(self.replacement)(element, cx)
	}
}

/// Drops `<a>`/`<area>` elements whose `href` goes nowhere: empty, `#`, or
/// `javascript:void(0)`. Anchors without any `href` are left to the
/// baseline rules.
pub fn dead_link() -> Rule {
	Rule {
		name: "dead-link",
		filter: |element| {
			(is_named(element, "a") || is_named(element, "area")) && element.value().attr("href").is_some_and(is_dead_href)
		},
		replacement: |_, _| String::new(),
	}
}

pub(crate) fn is_dead_href(href: &str) -> bool {
	href.trim().is_empty() || NO_OP_HREF.is_match(href)
}

/// `<img>`: `src`, else the first `srcset` candidate.
pub fn image() -> Rule {
	Rule {
		name: "img-srcset",
		filter: |element| is_named(element, "img"),
		replacement: |element, _| {
			let value = element.value();
			let src = value.attr("src").filter(|src| !src.is_empty()).or_else(|| value.attr("srcset").and_then(first_candidate));
			image_markdown(value.attr("alt").unwrap_or_default(), src, value.attr("title"))
		},
	}
}

/// `<picture>`: the nested `<img>` supplies alt, title and a direct `src`;
/// without a direct `src` the `<source>` with the largest declared size wins.
pub fn picture() -> Rule {
	Rule {
		name: "source-srcset",
		filter: |element| is_named(element, "picture"),
		replacement: |element, _| {
			let img = find_descendant(element, "img").map(|img| img.value());
			let alt = img.and_then(|img| img.attr("alt")).unwrap_or_default();
			let title = img.and_then(|img| img.attr("title"));
			let direct = img.and_then(|img| img.attr("src")).filter(|src| !src.is_empty());

			let mut sources: Vec<(f64, Option<&str>)> = element
				.descendants()
				.filter_map(ElementRef::wrap)
				.filter(|child| is_named(child, "source"))
				.map(|source| {
					let value = source.value();
					let size = max_declared_size(value.attr("sizes").unwrap_or_default());
					(size, value.attr("srcset").and_then(first_candidate))
				})
				.collect();
			sources.sort_by(|(a, _), (b, _)| b.partial_cmp(a).unwrap_or(Ordering::Equal));

			let src = direct.or_else(|| sources.first().and_then(|(_, src)| *src));
			image_markdown(alt, src, title)
		},
	}
}

/// `![alt](url "title")`, omitting whichever of url and title is missing.
fn image_markdown(alt: &str, src: Option<&str>, title: Option<&str>) -> String {
	let title = title.filter(|title| !title.is_empty()).map(quote);
	let target = [src.map(str::to_string), title].into_iter().flatten().collect::<Vec<_>>().join(" ");
	format!("![{alt}]({target})")
}

fn quote(title: &str) -> String {
	serde_json::to_string(title).unwrap_or_else(|_| format!("\"{title}\""))
}
