use anyhow::{Context, Result};
use article2md::{MarkdownConverter, html_to_markdown_with, route_address};
use tracing::{info, warn};
use url::Url;

use super::{load_converter, read_snippet};
use crate::cli::PublishArgs;
use crate::fetch::fetch_page;
use crate::github::{CommentPoster, IssueContext};
use crate::output::render;

pub async fn execute(args: PublishArgs) -> Result<()> {
	// Credentials are checked before any network traffic.
	let poster = if args.comment { Some(CommentPoster::new(args.github_token.as_deref(), &args.api_url)?) } else { None };

	let custom = load_converter(args.conversion.options.as_deref())?;
	let converter = custom.as_ref().unwrap_or(MarkdownConverter::shared());

	let markdown = read_snippet(&args.route)?;
	let route = route_address(&markdown)?;
	let url = Url::parse(&route)?;
	info!(target = "article2md", %route, "publishing article");

	let page = fetch_page(url).await?;
	let result = html_to_markdown_with(converter, &page.html, page.base_url.as_ref(), args.conversion.ignore.as_deref())
		.with_context(|| format!("failed to convert {route}"))?;
	let rendered = render(&result, args.conversion.format)?;
	print!("{rendered}");

	if let Some(poster) = poster {
		let context = match &args.event_path {
			Some(path) => IssueContext::from_event_file(path)?,
			None => {
				warn!(target = "article2md", "GITHUB_EVENT_PATH is not set");
				None
			}
		};
		poster.post(&rendered, context.as_ref()).await?;
	}
	Ok(())
}
