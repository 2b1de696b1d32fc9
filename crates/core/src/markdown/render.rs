//! Tree walk that applies the converter's rules to one fragment.

use scraper::{ElementRef, Node};
use tracing::debug;

use crate::dom::{is_blank, is_block};
use crate::markdown::MarkdownConverter;
use crate::markdown::options::ConverterOptions;
use crate::markdown::text::{collapse_whitespace, escape_markdown, join};

/// Elements nested deeper than this are flattened to their text.
const MAX_DEPTH: usize = 512;

/// Per-conversion state. Created for a single call and dropped afterwards,
/// so nothing rendered here leaks into later conversions.
pub struct RenderContext<'c> {
	converter: &'c MarkdownConverter,
	references: Vec<String>,
	depth: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Flow {
	Block,
	Inline,
	Ignored,
}

impl Flow {
	fn of(node: &Node) -> Self {
		match node {
			Node::Element(element) if is_block(element.name()) || element.name() == "br" => Flow::Block,
			Node::Element(_) | Node::Text(_) => Flow::Inline,
			_ => Flow::Ignored,
		}
	}
}

impl<'c> RenderContext<'c> {
	pub(crate) fn new(converter: &'c MarkdownConverter) -> Self {
		Self { converter, references: Vec::new(), depth: 0 }
	}

	pub fn options(&self) -> &ConverterOptions {
		&self.converter.options
	}

	/// Register a reference-style link definition and return its number.
	/// `definition` receives the number and returns the full definition line.
	pub fn push_reference(&mut self, definition: impl FnOnce(usize) -> String) -> usize {
		let number = self.references.len() + 1;
		self.references.push(definition(number));
		number
	}

	/// Render the children of `parent`.
	pub fn children(&mut self, parent: ElementRef<'_>) -> String {
		let nodes: Vec<_> = parent.children().collect();
		let flows: Vec<Flow> = nodes.iter().map(|node| Flow::of(node.value())).collect();
		let parent_is_block = is_block(parent.value().name());

		let mut output = String::new();
		for (index, node) in nodes.iter().enumerate() {
			let replacement = match node.value() {
				Node::Text(text) => {
					let before = flows[..index].iter().rev().find(|flow| **flow != Flow::Ignored);
					let after = flows[index + 1..].iter().find(|flow| **flow != Flow::Ignored);
					let boundary_before = before.map_or(parent_is_block, |flow| *flow == Flow::Block);
					let boundary_after = after.map_or(parent_is_block, |flow| *flow == Flow::Block);
					render_text(text, boundary_before, boundary_after)
				}
				Node::Element(_) => ElementRef::wrap(*node).map(|element| self.element(element)).unwrap_or_default(),
				_ => String::new(),
			};
			output = join(&output, &replacement);
		}
		output
	}

	fn element(&mut self, element: ElementRef<'_>) -> String {
		if self.depth >= MAX_DEPTH {
			return flatten(element);
		}
		self.depth += 1;
		let output = self.apply_rules(element);
		self.depth -= 1;
		output
	}

	fn apply_rules(&mut self, element: ElementRef<'_>) -> String {
		let converter = self.converter;
		let block = is_block(element.value().name());

		if is_blank(&element) {
			return if block { "\n\n".to_string() } else { String::new() };
		}
		if let Some(rule) = converter.rules.iter().find(|rule| rule.matches(&element)) {
			return rule.replacement(element, self);
		}
		if converter.keep.iter().any(|keep| keep(&element)) {
			let html = element.html();
			return if block { format!("\n\n{html}\n\n") } else { html };
		}
		if let Some(rule) = converter.baseline.iter().find(|rule| rule.matches(&element)) {
			return rule.replacement(element, self);
		}

		let content = self.children(element);
		if block { format!("\n\n{content}\n\n") } else { content }
	}

	/// Append collected link definitions and trim the surrounding blank
	/// lines.
	pub(crate) fn finish(self, body: String) -> String {
		let output = if self.references.is_empty() {
			body
		} else {
			join(&body, &format!("\n\n{}\n\n", self.references.join("\n")))
		};
		output.trim_start_matches(['\t', '\r', '\n']).trim_end().to_string()
	}
}

fn flatten(element: ElementRef<'_>) -> String {
	debug!(target = "article2md.markdown", tag = element.value().name(), "nesting too deep, flattening to text");
	let text = escape_markdown(collapse_whitespace(&element.text().collect::<String>()).trim());
	if is_block(element.value().name()) { format!("\n\n{text}\n\n") } else { text }
}

fn render_text(text: &str, boundary_before: bool, boundary_after: bool) -> String {
	let collapsed = collapse_whitespace(text);
	let mut trimmed = collapsed.as_str();
	if boundary_before {
		trimmed = trimmed.trim_start();
	}
	if boundary_after {
		trimmed = trimmed.trim_end();
	}
	escape_markdown(trimmed)
}
