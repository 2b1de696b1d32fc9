use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Core(#[from] article2md::Error),

	/// Raised before any request is made.
	#[error("GitHub token was not found; pass --github-token or set GITHUB_TOKEN")]
	MissingCredential,

	#[error("failed to create HTTP client: {0}")]
	Client(#[source] reqwest::Error),

	#[error("request to {url} failed: {source}")]
	Http {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid JSON in {}: {source}", path.display())]
	Json {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("failed to render output: {0}")]
	Render(#[source] serde_json::Error),

	#[error(transparent)]
	Url(#[from] url::ParseError),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;
