//! Rendering options for the Markdown converter.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStyle {
	/// `# Title`
	#[default]
	Atx,
	/// Underlined with `=` or `-`; levels 3-6 still use ATX.
	Setext,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeBlockStyle {
	#[default]
	Fenced,
	Indented,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
	/// `[text](href)`
	Inlined,
	/// `[text][1]` with the definitions appended after the body.
	#[default]
	Referenced,
}

/// Converter options. Field names follow the camelCase keys accepted in
/// JSON option files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConverterOptions {
	pub heading_style: HeadingStyle,
	pub hr: String,
	pub bullet_list_marker: String,
	pub code_block_style: CodeBlockStyle,
	pub fence: String,
	pub em_delimiter: String,
	pub strong_delimiter: String,
	/// Emitted before the newline of a `<br>`.
	pub br: String,
	pub link_style: LinkStyle,
}

impl Default for ConverterOptions {
	fn default() -> Self {
		Self {
			heading_style: HeadingStyle::Atx,
			hr: "---".to_string(),
			bullet_list_marker: "-".to_string(),
			code_block_style: CodeBlockStyle::Fenced,
			fence: "```".to_string(),
			em_delimiter: "_".to_string(),
			strong_delimiter: "**".to_string(),
			br: "  ".to_string(),
			link_style: LinkStyle::Referenced,
		}
	}
}
