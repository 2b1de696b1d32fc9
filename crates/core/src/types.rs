//! Public types returned by the document pipeline.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Metadata extracted from the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleMetadata {
	pub title: String,
	/// Always present: falls back to the extraction time when the page has
	/// no parsable date.
	#[serde(serialize_with = "serialize_timestamp")]
	pub date: DateTime<Utc>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub author: Option<String>,
	/// Absolute URL of the author page, or empty.
	#[serde(rename = "authorURL")]
	pub author_url: String,
}

impl ArticleMetadata {
	/// `date` as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
	pub fn date_string(&self) -> String {
		format_timestamp(&self.date)
	}
}

/// Result of converting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
	pub meta: ArticleMetadata,
	/// GitHub-Flavored Markdown body; empty when no content region matched.
	pub content: String,
}

pub(crate) fn format_timestamp(date: &DateTime<Utc>) -> String {
	date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.serialize_str(&format_timestamp(date))
}
