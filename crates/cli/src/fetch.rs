//! Page loading from the web or the local filesystem.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::error::{CliError, Result};

const USER_AGENT: &str = concat!("article2md/", env!("CARGO_PKG_VERSION"));

/// Raw document plus the URL it was served from, if any.
#[derive(Debug)]
pub struct Page {
	pub html: String,
	pub base_url: Option<Url>,
}

pub(crate) fn http_client() -> Result<reqwest::Client> {
	reqwest::Client::builder()
		.timeout(Duration::from_secs(30))
		.user_agent(USER_AGENT)
		.build()
		.map_err(CliError::Client)
}

/// `source` is fetched when it is an http(s) URL and read from disk
/// otherwise.
pub async fn load_page(source: &str) -> Result<Page> {
	match Url::parse(source) {
		Ok(url) if matches!(url.scheme(), "http" | "https") => fetch_page(url).await,
		_ => read_page(Path::new(source)),
	}
}

/// GET `url`; the URL becomes the page's base URL.
pub async fn fetch_page(url: Url) -> Result<Page> {
	info!(target = "article2md.fetch", %url, "fetching page");
	let client = http_client()?;
	let http_error = |source| CliError::Http { url: url.to_string(), source };

	let response = client
		.get(url.clone())
		.send()
		.await
		.and_then(|response| response.error_for_status())
		.map_err(http_error)?;
	let html = response.text().await.map_err(http_error)?;

	debug!(target = "article2md.fetch", bytes = html.len(), "page fetched");
	Ok(Page { html, base_url: Some(url) })
}

pub fn read_page(path: &Path) -> Result<Page> {
	debug!(target = "article2md.fetch", path = %path.display(), "reading page");
	let html = std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
	Ok(Page { html, base_url: None })
}
