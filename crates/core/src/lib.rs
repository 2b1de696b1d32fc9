//! Article extraction from HTML pages into GitHub-Flavored Markdown.
//!
//! The pipeline parses a document once, reads its metadata (title, date,
//! author), picks the region holding the article body and converts that
//! region with an immutable [`MarkdownConverter`]. [`route_address`] resolves
//! the source link of a short Markdown snippet.

mod cleaner;
pub mod config;
mod dom;
pub mod error;
pub mod markdown;
pub mod matcher;
pub mod metadata;
mod pipeline;
mod route;
pub mod selector;
mod srcset;
mod types;

pub use cleaner::parse_selector;
pub use error::{Error, Result};
pub use markdown::MarkdownConverter;
pub use markdown::options::{CodeBlockStyle, ConverterOptions, HeadingStyle, LinkStyle};
pub use pipeline::{html_to_markdown, html_to_markdown_with};
pub use route::route_address;
pub use types::{ArticleMetadata, ConversionResult};
