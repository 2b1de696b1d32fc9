use article2md::{ArticleMetadata, ConversionResult};

use crate::cli::OutputFormat;
use crate::error::{CliError, Result};

pub fn render(result: &ConversionResult, format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Markdown => render_markdown(result),
		OutputFormat::Json => serde_json::to_string_pretty(result).map(|json| json + "\n").map_err(CliError::Render),
	}
}

/// Front matter with JSON-quoted values, a blank line, then the body.
pub fn render_markdown(result: &ConversionResult) -> Result<String> {
	let mut output = front_matter(&result.meta)?;
	if !result.content.is_empty() {
		output.push('\n');
		output.push_str(&result.content);
		output.push('\n');
	}
	Ok(output)
}

fn front_matter(meta: &ArticleMetadata) -> Result<String> {
	let date = meta.date_string();
	let mut fields = vec![("title", meta.title.as_str()), ("date", date.as_str())];
	if let Some(author) = &meta.author {
		fields.push(("author", author.as_str()));
	}
	fields.push(("authorURL", meta.author_url.as_str()));

	let mut output = String::from("---\n");
	for (key, value) in fields {
		let quoted = serde_json::to_string(value).map_err(CliError::Render)?;
		output.push_str(&format!("{key}: {quoted}\n"));
	}
	output.push_str("---\n");
	Ok(output)
}
