//! Metadata extraction: title, publish date, author and author link.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

use crate::config::heuristics;
use crate::dom::{find_descendant, is_named, trimmed_text};
use crate::matcher::{first_match, matches_any};
use crate::types::ArticleMetadata;

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%B %d %Y", "%d %B %Y", "%d %B, %Y"];

/// Extract metadata, falling back to the current time for the date.
pub fn extract_metadata(document: &Html, base: Option<&Url>) -> ArticleMetadata {
	extract_metadata_at(document, base, Utc::now())
}

pub(crate) fn extract_metadata_at(document: &Html, base: Option<&Url>, now: DateTime<Utc>) -> ArticleMetadata {
	let author = author_link(document);
	ArticleMetadata {
		title: extract_title(document),
		date: extract_date(time_element(document).as_ref(), now),
		author: author.as_ref().map(trimmed_text),
		author_url: resolve_author_url(author.and_then(|link| link.value().attr("href")), base),
	}
}

/// Trimmed text of the first `<h1>`, else of `<title>`.
pub fn extract_title(document: &Html) -> String {
	let root = document.root_element();
	let heading = find_descendant(root, "h1").map(|h1| trimmed_text(&h1)).filter(|title| !title.is_empty());
	heading.or_else(|| find_descendant(root, "title").map(|title| trimmed_text(&title))).unwrap_or_default()
}

/// First `<time>` element, or element classed like a time or date.
pub fn time_element(document: &Html) -> Option<ElementRef<'_>> {
	first_match(document.root_element(), &heuristics().time)
}

/// Date from the `datetime` attribute, else from the visible text, else
/// `fallback`.
pub fn extract_date(time: Option<&ElementRef<'_>>, fallback: DateTime<Utc>) -> DateTime<Utc> {
	let Some(time) = time else {
		debug!(target = "article2md.metadata", "no time element, using fallback date");
		return fallback;
	};
	if let Some(date) = time.value().attr("datetime").and_then(parse_date) {
		return date;
	}
	let text = trimmed_text(time);
	if let Some(date) = parse_date(&text) {
		return date;
	}
	debug!(target = "article2md.metadata", text = %text, "unparsable date, using fallback date");
	fallback
}

/// Parse a timestamp in one of the formats commonly found in pages.
/// Values without an offset are taken as UTC.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
	let input = input.trim();
	if input.is_empty() {
		return None;
	}
	if let Ok(date) = DateTime::parse_from_rfc3339(input) {
		return Some(date.with_timezone(&Utc));
	}
	if let Ok(date) = DateTime::parse_from_rfc2822(input) {
		return Some(date.with_timezone(&Utc));
	}
	if let Some(date) = DATE_TIME_FORMATS.iter().find_map(|format| NaiveDateTime::parse_from_str(input, format).ok()) {
		return Some(date.and_utc());
	}
	DATE_FORMATS
		.iter()
		.find_map(|format| NaiveDate::parse_from_str(input, format).ok())
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|date| date.and_utc())
}

/// First anchor in document order that is classed as an author link or sits
/// inside an element classed that way.
pub fn author_link(document: &Html) -> Option<ElementRef<'_>> {
	let matchers = &heuristics().author;
	let is_author = |element: &ElementRef<'_>| matches_any(matchers, element);

	document
		.root_element()
		.descendants()
		.filter_map(ElementRef::wrap)
		.filter(|element| is_named(element, "a"))
		.find(|anchor| is_author(anchor) || anchor.ancestors().filter_map(ElementRef::wrap).any(|ancestor| is_author(&ancestor)))
}

/// Absolute author URL, or empty when the link has no usable `href`.
pub fn resolve_author_url(href: Option<&str>, base: Option<&Url>) -> String {
	let Some(href) = href.map(str::trim).filter(|href| !href.is_empty()) else {
		return String::new();
	};
	let resolved = match base {
		Some(base) => base.join(href),
		None => Url::parse(href),
	};
	match resolved {
		Ok(url) => url.to_string(),
		Err(err) => {
			debug!(target = "article2md.metadata", href, error = %err, "author link is not resolvable");
			String::new()
		}
	}
}

#[cfg(test)]
mod tests {
	use chrono::{Duration, TimeZone};

	use super::*;

	fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
		Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
	}

	#[test]
	fn title_prefers_h1_then_title() {
		let document = Html::parse_document("<title> Page </title><h1>  Heading </h1><h1>Second</h1>");
		assert_eq!(extract_title(&document), "Heading");

		let document = Html::parse_document("<title> Page </title><h1>  </h1>");
		assert_eq!(extract_title(&document), "Page");

		assert_eq!(extract_title(&Html::parse_document("<p>x</p>")), "");
	}

	#[test]
	fn parses_common_date_shapes() {
		assert_eq!(parse_date("2020-04-01T15:21:00Z"), Some(utc(2020, 4, 1, 15, 21, 0)));
		assert_eq!(parse_date("2020-04-01T17:21:00+02:00"), Some(utc(2020, 4, 1, 15, 21, 0)));
		assert_eq!(parse_date("Wed, 01 Apr 2020 15:21:00 GMT"), Some(utc(2020, 4, 1, 15, 21, 0)));
		assert_eq!(parse_date("2020-04-01 15:21"), Some(utc(2020, 4, 1, 15, 21, 0)));
		assert_eq!(parse_date("2020-04-01"), Some(utc(2020, 4, 1, 0, 0, 0)));
		assert_eq!(parse_date("April 1, 2020"), Some(utc(2020, 4, 1, 0, 0, 0)));
		assert_eq!(parse_date("1 Apr 2020"), Some(utc(2020, 4, 1, 0, 0, 0)));
		assert_eq!(parse_date("last Tuesday"), None);
		assert_eq!(parse_date(""), None);
	}

	#[test]
	fn datetime_attribute_beats_text() {
		let document = Html::parse_document(r#"<time datetime="2020-04-01T15:21:00Z">2019-01-01</time>"#);
		let fallback = utc(2000, 1, 1, 0, 0, 0);
		assert_eq!(extract_date(time_element(&document).as_ref(), fallback), utc(2020, 4, 1, 15, 21, 0));
	}

	#[test]
	fn text_is_used_when_attribute_is_invalid() {
		let document = Html::parse_document(r#"<span class="post-date" datetime="soon">2019-01-02</span>"#);
		let fallback = utc(2000, 1, 1, 0, 0, 0);
		assert_eq!(extract_date(time_element(&document).as_ref(), fallback), utc(2019, 1, 2, 0, 0, 0));
	}

	#[test]
	fn unparsable_date_falls_back_to_now() {
		let document = Html::parse_document("<article><time>sometime soon</time><p>x</p></article>");
		let before = Utc::now();
		let meta = extract_metadata(&document, None);
		assert!(meta.date >= before - Duration::seconds(1));
		assert!(meta.date <= Utc::now() + Duration::seconds(1));
	}

	#[test]
	fn author_from_class_or_container() {
		let document = Html::parse_document(r#"<a href="/home">Home</a><div class="byline-Author"><a href="/u/jo"> Jo </a></div>"#);
		let base = Url::parse("http://localhost/news/post/").unwrap();
		let meta = extract_metadata_at(&document, Some(&base), Utc::now());
		assert_eq!(meta.author.as_deref(), Some("Jo"));
		assert_eq!(meta.author_url, "http://localhost/u/jo");

		let document = Html::parse_document(r#"<p><a class="author-link" href="https://example.com/me">Me</a></p>"#);
		let meta = extract_metadata_at(&document, None, Utc::now());
		assert_eq!(meta.author.as_deref(), Some("Me"));
		assert_eq!(meta.author_url, "https://example.com/me");
	}

	#[test]
	fn missing_author_yields_empty_fields() {
		let meta = extract_metadata_at(&Html::parse_document("<p>x</p>"), None, Utc::now());
		assert_eq!(meta.author, None);
		assert_eq!(meta.author_url, "");
	}

	#[test]
	fn author_url_is_never_relative() {
		assert_eq!(resolve_author_url(Some("/relative"), None), "");
		assert_eq!(resolve_author_url(Some("  "), None), "");
		assert_eq!(resolve_author_url(None, None), "");
		let base = Url::parse("https://blog.example/posts/1").unwrap();
		assert_eq!(resolve_author_url(Some("../people/ann"), Some(&base)), "https://blog.example/people/ann");
	}
}
