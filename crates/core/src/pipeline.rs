//! Single-document pipeline: metadata, content region and conversion over
//! one parsed tree.

use chrono::{DateTime, Utc};
use scraper::Html;
use tracing::debug;
use url::Url;

use crate::cleaner::parse_selector;
use crate::error::Result;
use crate::markdown::MarkdownConverter;
use crate::metadata::{extract_metadata_at, time_element};
use crate::selector::content_region;
use crate::types::ConversionResult;

/// Convert a full HTML document with the shared article converter.
///
/// `base_url` resolves the author link; `ignore` is a CSS selector whose
/// matches are dropped from the body for this call only. An invalid `ignore`
/// selector is reported before any work is done.
pub fn html_to_markdown(html: &str, base_url: Option<&Url>, ignore: Option<&str>) -> Result<ConversionResult> {
	html_to_markdown_with(MarkdownConverter::shared(), html, base_url, ignore)
}

/// Same as [`html_to_markdown`] with a caller-provided converter.
pub fn html_to_markdown_with(converter: &MarkdownConverter, html: &str, base_url: Option<&Url>, ignore: Option<&str>) -> Result<ConversionResult> {
	run_pipeline(converter, html, base_url, ignore, Utc::now())
}

pub(crate) fn run_pipeline(
	converter: &MarkdownConverter,
	html: &str,
	base_url: Option<&Url>,
	ignore: Option<&str>,
	now: DateTime<Utc>,
) -> Result<ConversionResult> {
	let exclusion = ignore.map(str::trim).filter(|selector| !selector.is_empty()).map(parse_selector).transpose()?;

	let mut document = Html::parse_document(html);
	let meta = extract_metadata_at(&document, base_url, now);

	let time = time_element(&document).map(|time| time.id());
	if let Some(id) = time {
		if let Some(mut node) = document.tree.get_mut(id) {
			node.detach();
		}
	}

	let content = match content_region(&document) {
		Some(region) => converter.convert_with_exclusion(&region.inner_html(), exclusion.as_ref()),
		None => {
			debug!(target = "article2md.pipeline", "no content region; body left empty");
			String::new()
		}
	};

	Ok(ConversionResult { meta, content })
}
