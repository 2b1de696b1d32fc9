//! Source route resolution from a Markdown snippet.

use std::sync::LazyLock;

use pulldown_cmark::{Parser, html};
use regex_lite::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

use crate::dom::is_named;
use crate::error::{Error, Result};

static INDEX_DOCUMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(^|/)index\.\w+$").expect("INDEX_DOCUMENT should compile"));

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:https?://|ftp://|www\.)[^\s<]+").expect("BARE_URL should compile"));

/// Absolute URL of the first link in `markdown`, with a trailing
/// `index.<ext>` path segment removed. Bare URLs in text count as links.
///
/// ```text
/// - Source: [Post](https://example.com/news/post/index.html)
/// => https://example.com/news/post/
/// ```
pub fn route_address(markdown: &str) -> Result<String> {
	let mut rendered = String::new();
	html::push_html(&mut rendered, Parser::new(markdown));

	let fragment = Html::parse_fragment(&rendered);
	let href = first_href(&fragment).filter(|href| !href.trim().is_empty()).ok_or(Error::RouteNotFound)?;
	let href = href.as_str();

	let mut url = Url::parse(href.trim()).map_err(|source| Error::InvalidRoute { href: href.to_string(), source })?;
	let path = INDEX_DOCUMENT.replace(url.path(), "$1").into_owned();
	url.set_path(&path);

	debug!(target = "article2md.route", href, route = %url, "resolved route");
	Ok(url.to_string())
}

/// First `href` or autolinkable text in document order. Text inside anchors
/// and code spans is skipped.
fn first_href(fragment: &Html) -> Option<String> {
	for node in fragment.root_element().descendants() {
		if let Some(element) = ElementRef::wrap(node) {
			if is_named(&element, "a") {
				if let Some(href) = element.value().attr("href") {
					return Some(href.to_string());
				}
			}
			continue;
		}
		let Some(text) = node.value().as_text() else {
			continue;
		};
		let linked = node.ancestors().filter_map(ElementRef::wrap).any(|ancestor| is_named(&ancestor, "a") || is_named(&ancestor, "code"));
		if linked {
			continue;
		}
		if let Some(found) = BARE_URL.find(text) {
			let url = trim_autolink(found.as_str());
			return Some(if url.starts_with("www.") { format!("http://{url}") } else { url.to_string() });
		}
	}
	None
}

/// Drop trailing punctuation and unbalanced closing parentheses from a bare
/// URL, as GFM autolinking does.
fn trim_autolink(candidate: &str) -> &str {
	let mut url = candidate;
	while let Some(last) = url.chars().next_back() {
		let strip = match last {
			'?' | '!' | '.' | ',' | ':' | '*' | '_' | '~' | '\'' | '"' => true,
			')' => url.matches(')').count() > url.matches('(').count(),
			_ => false,
		};
		if !strip {
			break;
		}
		url = &url[..url.len() - last.len_utf8()];
	}
	url
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_index_document() {
		let markdown = "- 原文网址：[Test Example](https://www.freecodecamp.org/news/testexample/index.html)";
		assert_eq!(route_address(markdown).unwrap(), "https://www.freecodecamp.org/news/testexample/");
	}

	#[test]
	fn bare_url_is_a_link() {
		let markdown = "- 原文网址：https://www.freecodecamp.org/news/testexample/index.html";
		assert_eq!(route_address(markdown).unwrap(), "https://www.freecodecamp.org/news/testexample/");
		assert_eq!(route_address("Read https://host/a/index.html.").unwrap(), "https://host/a/");
		assert_eq!(route_address("see www.example.com/docs/index.html").unwrap(), "http://www.example.com/docs/");
	}

	#[test]
	fn bare_url_trailing_parenthesis_needs_a_match() {
		assert_eq!(route_address("(see https://host/wiki/A_(b))").unwrap(), "https://host/wiki/A_(b)");
	}

	#[test]
	fn bare_url_order_and_code_spans() {
		assert_eq!(route_address("Read https://first.example/ then [b](https://second.example/)").unwrap(), "https://first.example/");
		assert_eq!(route_address("`https://code.example/` and [b](https://b.example/)").unwrap(), "https://b.example/");
	}

	#[test]
	fn index_match_ignores_case_and_extension() {
		assert_eq!(route_address("[a](https://host/path/INDEX.HTM)").unwrap(), "https://host/path/");
		assert_eq!(route_address("[a](https://host/index.php?x=1)").unwrap(), "https://host/?x=1");
	}

	#[test]
	fn other_documents_are_untouched() {
		assert_eq!(route_address("[a](https://host/path/post.html)").unwrap(), "https://host/path/post.html");
		assert_eq!(route_address("[a](https://host/path/myindex.html)").unwrap(), "https://host/path/myindex.html");
	}

	#[test]
	fn first_link_wins() {
		let markdown = "See <https://first.example/a/> and [second](https://second.example/)";
		assert_eq!(route_address(markdown).unwrap(), "https://first.example/a/");
	}

	#[test]
	fn missing_link_is_an_error() {
		assert!(matches!(route_address("no links here"), Err(Error::RouteNotFound)));
		assert!(matches!(route_address(""), Err(Error::RouteNotFound)));
	}

	#[test]
	fn relative_link_is_rejected() {
		assert!(matches!(route_address("[a](/relative/path)"), Err(Error::InvalidRoute { .. })));
	}
}
