mod convert;
mod publish;
mod route;

use std::path::Path;

use anyhow::Result;
use article2md::{ConverterOptions, MarkdownConverter};
use tracing::debug;

use crate::cli::{Commands, RouteArgs};
use crate::error::CliError;

pub async fn dispatch(command: Commands) -> Result<()> {
	match command {
		Commands::Route(args) => route::execute(&args),
		Commands::Convert(args) => convert::execute(args).await,
		Commands::Publish(args) => publish::execute(args).await,
	}
}

/// Converter configured from an options file, or `None` for the shared
/// default converter.
pub(crate) fn load_converter(options: Option<&Path>) -> crate::error::Result<Option<MarkdownConverter>> {
	let Some(path) = options else {
		return Ok(None);
	};
	let json = std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
	let options: ConverterOptions = serde_json::from_str(&json).map_err(|source| CliError::Json { path: path.to_path_buf(), source })?;
	debug!(target = "article2md", ?options, "converter options loaded");

	Ok(Some(MarkdownConverter::article_builder().options(options).build()))
}

/// Markdown snippet given inline or through `--file`.
pub(crate) fn read_snippet(args: &RouteArgs) -> crate::error::Result<String> {
	match (&args.markdown, &args.file) {
		(_, Some(path)) => std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.clone(), source }),
		(Some(markdown), None) => Ok(markdown.clone()),
		(None, None) => Ok(String::new()),
	}
}
