use anyhow::{Context, Result};
use article2md::{MarkdownConverter, html_to_markdown_with};
use tracing::info;

use super::load_converter;
use crate::cli::ConvertArgs;
use crate::fetch::load_page;
use crate::output::render;

pub async fn execute(args: ConvertArgs) -> Result<()> {
	let custom = load_converter(args.conversion.options.as_deref())?;
	let converter = custom.as_ref().unwrap_or(MarkdownConverter::shared());

	let page = load_page(&args.source).await?;
	let base_url = args.base_url.or(page.base_url);
	info!(target = "article2md", source = %args.source, base_url = ?base_url.as_ref().map(|url| url.as_str()), "converting page");

	let result = html_to_markdown_with(converter, &page.html, base_url.as_ref(), args.conversion.ignore.as_deref())
		.with_context(|| format!("failed to convert {}", args.source))?;

	print!("{}", render(&result, args.conversion.format)?);
	Ok(())
}
