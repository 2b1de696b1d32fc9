//! Error type for the conversion core.
//!
//! Heuristic lookups (title, date, author, content region) never fail; only
//! route resolution and caller-supplied selectors surface errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	/// The Markdown snippet contains no anchor with an `href`.
	#[error("no route link found in the supplied markdown")]
	RouteNotFound,

	#[error("route link `{href}` is not an absolute URL: {source}")]
	InvalidRoute {
		href: String,
		#[source]
		source: url::ParseError,
	},

	#[error("invalid ignore selector `{selector}`: {reason}")]
	InvalidSelector { selector: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
