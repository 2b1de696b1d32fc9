use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "article2md")]
#[command(about = "Convert web articles to Markdown and share them on GitHub issues")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Print the canonical URL of the first link in a Markdown snippet
	Route(RouteArgs),

	/// Convert an HTML page (URL or local file) to Markdown
	Convert(ConvertArgs),

	/// Resolve the route of a Markdown snippet, convert that page and
	/// optionally post it as an issue comment
	Publish(PublishArgs),
}

/// Markdown snippet holding the source link.
#[derive(Args, Debug)]
pub struct RouteArgs {
	/// Markdown text containing the link
	#[arg(required_unless_present = "file")]
	pub markdown: Option<String>,

	/// Read the Markdown snippet from a file instead
	#[arg(long, value_name = "FILE", conflicts_with = "markdown")]
	pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
	/// http(s) URL or path to a local HTML file
	pub source: String,

	/// Base URL for resolving relative author links (defaults to SOURCE when
	/// it is a URL)
	#[arg(long, value_name = "URL")]
	pub base_url: Option<Url>,

	#[command(flatten)]
	pub conversion: ConversionArgs,
}

#[derive(Args, Debug)]
pub struct PublishArgs {
	#[command(flatten)]
	pub route: RouteArgs,

	#[command(flatten)]
	pub conversion: ConversionArgs,

	/// Post the converted article as a comment on the triggering issue
	#[arg(long)]
	pub comment: bool,

	/// Token used to post the comment
	#[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
	pub github_token: Option<String>,

	/// GitHub event payload naming the issue and repository
	#[arg(long, env = "GITHUB_EVENT_PATH", value_name = "FILE")]
	pub event_path: Option<PathBuf>,

	/// GitHub REST API root
	#[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com", value_name = "URL")]
	pub api_url: Url,
}

/// Options shared by every command that converts a page.
#[derive(Args, Debug)]
pub struct ConversionArgs {
	/// CSS selector for elements to drop from the article body
	#[arg(long, value_name = "SELECTOR")]
	pub ignore: Option<String>,

	/// JSON file with converter options (headingStyle, linkStyle, ...)
	#[arg(long, value_name = "FILE")]
	pub options: Option<PathBuf>,

	/// Output format
	#[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
	pub format: OutputFormat,
}

/// Output format for converted articles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Front matter followed by the Markdown body
	#[default]
	Markdown,
	/// `{"meta": {...}, "content": "..."}`
	Json,
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputFormat::Markdown => write!(f, "markdown"),
			OutputFormat::Json => write!(f, "json"),
		}
	}
}
