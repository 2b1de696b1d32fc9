//! Issue comment posting through the GitHub REST API.

use std::path::Path;

use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CliError, Result};
use crate::fetch::http_client;

/// Issue targeted by a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueContext {
	pub owner: String,
	pub repo: String,
	pub issue_number: u64,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
	issue: Option<IssuePayload>,
	repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
	number: u64,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
	name: String,
	owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
	login: String,
}

impl IssueContext {
	/// Issue and repository from an Actions event payload. `None` when either
	/// is missing, e.g. for push or schedule events.
	pub fn from_event_json(json: &str) -> serde_json::Result<Option<Self>> {
		let payload: EventPayload = serde_json::from_str(json)?;
		Ok(match (payload.issue, payload.repository) {
			(Some(issue), Some(repository)) => Some(Self {
				owner: repository.owner.login,
				repo: repository.name,
				issue_number: issue.number,
			}),
			_ => None,
		})
	}

	pub fn from_event_file(path: &Path) -> Result<Option<Self>> {
		let json = std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
		Self::from_event_json(&json).map_err(|source| CliError::Json { path: path.to_path_buf(), source })
	}
}

/// Posts Markdown bodies as issue comments.
pub struct CommentPoster {
	token: String,
	api_base: Url,
}

impl CommentPoster {
	/// Fails with [`CliError::MissingCredential`] when no usable token is
	/// given, so callers can check before doing any other work.
	pub fn new(token: Option<&str>, api_base: &Url) -> Result<Self> {
		let token = token.map(str::trim).filter(|token| !token.is_empty()).ok_or(CliError::MissingCredential)?;

		let mut api_base = api_base.clone();
		if !api_base.path().ends_with('/') {
			let path = format!("{}/", api_base.path());
			api_base.set_path(&path);
		}
		Ok(Self { token: token.to_string(), api_base })
	}

	pub fn comments_url(&self, context: &IssueContext) -> Result<Url> {
		let path = format!("repos/{}/{}/issues/{}/comments", context.owner, context.repo, context.issue_number);
		Ok(self.api_base.join(&path)?)
	}

	/// Post `body` on the issue named by `context`. Without a context the
	/// comment is skipped and `false` returned.
	pub async fn post(&self, body: &str, context: Option<&IssueContext>) -> Result<bool> {
		let Some(context) = context else {
			warn!(target = "article2md.github", "no issue or repository in the event payload; comment skipped");
			return Ok(false);
		};
		let url = self.comments_url(context)?;
		debug!(target = "article2md.github", %url, bytes = body.len(), "posting comment");

		http_client()?
			.post(url.clone())
			.bearer_auth(&self.token)
			.header(ACCEPT, "application/vnd.github+json")
			.json(&json!({ "body": body }))
			.send()
			.await
			.and_then(|response| response.error_for_status())
			.map_err(|source| CliError::Http { url: url.to_string(), source })?;

		info!(target = "article2md.github", owner = %context.owner, repo = %context.repo, issue = context.issue_number, "comment posted");
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn api() -> Url {
		Url::parse("https://api.github.com").unwrap()
	}

	#[test]
	fn reads_issue_context_from_event() {
		let json = r#"{"action":"opened","issue":{"number":42,"title":"x"},"repository":{"name":"news","owner":{"login":"acme"}}}"#;
		let context = IssueContext::from_event_json(json).unwrap();
		assert_eq!(context, Some(IssueContext { owner: "acme".into(), repo: "news".into(), issue_number: 42 }));
	}

	#[test]
	fn events_without_issue_have_no_context() {
		let json = r#"{"ref":"refs/heads/main","repository":{"name":"news","owner":{"login":"acme"}}}"#;
		assert_eq!(IssueContext::from_event_json(json).unwrap(), None);
	}

	#[test]
	fn missing_token_is_rejected() {
		assert!(matches!(CommentPoster::new(None, &api()), Err(CliError::MissingCredential)));
		assert!(matches!(CommentPoster::new(Some("  "), &api()), Err(CliError::MissingCredential)));
	}

	#[test]
	fn comments_url_keeps_api_prefix() {
		let context = IssueContext { owner: "acme".into(), repo: "news".into(), issue_number: 7 };
		let poster = CommentPoster::new(Some("t"), &api()).unwrap();
		assert_eq!(poster.comments_url(&context).unwrap().as_str(), "https://api.github.com/repos/acme/news/issues/7/comments");

		let enterprise = Url::parse("https://ghe.example/api/v3").unwrap();
		let poster = CommentPoster::new(Some("t"), &enterprise).unwrap();
		assert_eq!(poster.comments_url(&context).unwrap().as_str(), "https://ghe.example/api/v3/repos/acme/news/issues/7/comments");
	}

	#[tokio::test]
	async fn missing_context_skips_the_comment() {
		let poster = CommentPoster::new(Some("t"), &api()).unwrap();
		assert!(!poster.post("body", None).await.unwrap());
	}
}
