//! Baseline GitHub-Flavored Markdown rules.

use std::collections::HashSet;
use std::sync::Arc;

use scraper::ElementRef;

use crate::dom::{is_named, parent_element};
use crate::markdown::options::{CodeBlockStyle, HeadingStyle, LinkStyle};
use crate::markdown::render::RenderContext;
use crate::markdown::rules::{ConversionRule, Rule};
use crate::markdown::text::{collapse_whitespace, wrap_inline};

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

pub(crate) fn baseline() -> Vec<Arc<dyn ConversionRule>> {
	[
		Rule { name: "paragraph", filter: |el| is_named(el, "p"), replacement: paragraph },
		Rule { name: "lineBreak", filter: |el| is_named(el, "br"), replacement: line_break },
		Rule { name: "heading", filter: |el| HEADINGS.contains(&el.value().name()), replacement: heading },
		Rule { name: "blockquote", filter: |el| is_named(el, "blockquote"), replacement: blockquote },
		Rule { name: "list", filter: |el| is_named(el, "ul") || is_named(el, "ol"), replacement: list },
		Rule { name: "listItem", filter: |el| is_named(el, "li"), replacement: list_item },
		Rule { name: "taskListItems", filter: is_task_checkbox, replacement: task_checkbox },
		Rule { name: "codeBlock", filter: |el| is_named(el, "pre"), replacement: code_block },
		Rule { name: "horizontalRule", filter: |el| is_named(el, "hr"), replacement: horizontal_rule },
		Rule { name: "link", filter: |el| is_named(el, "a") && el.value().attr("href").is_some(), replacement: link },
		Rule { name: "emphasis", filter: |el| is_named(el, "em") || is_named(el, "i"), replacement: emphasis },
		Rule { name: "strong", filter: |el| is_named(el, "strong") || is_named(el, "b"), replacement: strong },
		Rule {
			name: "strikethrough",
			filter: |el| is_named(el, "del") || is_named(el, "s") || is_named(el, "strike"),
			replacement: strikethrough,
		},
		Rule { name: "code", filter: |el| is_named(el, "code"), replacement: inline_code },
		Rule { name: "table", filter: |el| is_named(el, "table") && has_heading_row(el), replacement: table },
		Rule { name: "headerlessTable", filter: |el| is_named(el, "table") && !has_heading_row(el), replacement: raw_block },
	]
	.into_iter()
	.map(|rule| Arc::new(rule) as Arc<dyn ConversionRule>)
	.collect()
}

fn paragraph(element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	let content = cx.children(element);
	format!("\n\n{}\n\n", content.trim_matches(' '))
}

fn line_break(_: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	format!("{}\n", cx.options().br)
}

fn heading(element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	let level = element.value().name()[1..].parse::<usize>().unwrap_or(1);
	let content = cx.children(element);
	let content = content.trim();

	if cx.options().heading_style == HeadingStyle::Setext && level < 3 {
		let underline = if level == 1 { "=" } else { "-" };
		format!("\n\n{content}\n{}\n\n", underline.repeat(content.chars().count().max(3)))
	} else {
		format!("\n\n{} {content}\n\n", "#".repeat(level))
	}
}

fn blockquote(element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	let content = cx.children(element);
	let quoted = content
		.trim_matches('\n')
		.lines()
		.map(|line| if line.is_empty() { ">".to_string() } else { format!("> {line}") })
		.collect::<Vec<_>>()
		.join("\n");
	format!("\n\n{quoted}\n\n")
}

fn list(element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	let content = cx.children(element);
	let nested = parent_element(&element).is_some_and(|parent| is_named(&parent, "li"));
	let last_child = element.next_siblings().filter_map(ElementRef::wrap).next().is_none();
	if nested && last_child { format!("\n{content}") } else { format!("\n\n{content}\n\n") }
}

fn list_item(element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	let prefix = match parent_element(&element) {
		Some(parent) if is_named(&parent, "ol") => {
			let start = parent.value().attr("start").and_then(|start| start.trim().parse::<i64>().ok()).unwrap_or(1);
			let index = element.prev_siblings().filter_map(ElementRef::wrap).filter(|sibling| is_named(sibling, "li")).count();
			format!("{}. ", start + index as i64)
		}
		_ => format!("{} ", cx.options().bullet_list_marker),
	};
	let indent = " ".repeat(prefix.len());

	let content = cx.children(element);
	let body = content
		.trim_matches('\n')
		.lines()
		.enumerate()
		.map(|(index, line)| if index == 0 || line.is_empty() { line.to_string() } else { format!("{indent}{line}") })
		.collect::<Vec<_>>()
		.join("\n");
	let has_next = element.next_siblings().filter_map(ElementRef::wrap).next().is_some();

	format!("{prefix}{body}{}", if has_next { "\n" } else { "" })
}

fn is_task_checkbox(element: &ElementRef<'_>) -> bool {
	is_named(element, "input")
		&& element.value().attr("type").is_some_and(|kind| kind.eq_ignore_ascii_case("checkbox"))
		&& parent_element(element).is_some_and(|parent| is_named(&parent, "li"))
}

fn task_checkbox(element: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
	let checked = element.value().attr("checked").is_some();
	(if checked { "[x] " } else { "[ ] " }).to_string()
}

fn code_block(element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	let code = element.children().filter_map(ElementRef::wrap).find(|child| is_named(child, "code"));
	let source = code.unwrap_or(element);
	let text = source.text().collect::<String>();
	let text = text.strip_suffix('\n').unwrap_or(&text);

	match cx.options().code_block_style {
		CodeBlockStyle::Fenced => {
			let language = code.as_ref().and_then(code_language).unwrap_or_default();
			let fence = fence_for(text, &cx.options().fence);
			format!("\n\n{fence}{language}\n{text}\n{fence}\n\n")
		}
		CodeBlockStyle::Indented => {
			let indented = text.lines().map(|line| format!("    {line}")).collect::<Vec<_>>().join("\n");
			format!("\n\n{indented}\n\n")
		}
	}
}

fn code_language<'a>(code: &ElementRef<'a>) -> Option<&'a str> {
	code.value()
		.attr("class")?
		.split_ascii_whitespace()
		.find_map(|class| class.strip_prefix("language-").or_else(|| class.strip_prefix("lang-")))
}

/// Lengthen `fence` until no line of `code` starts with it.
fn fence_for(code: &str, fence: &str) -> String {
	let marker = fence.chars().next().unwrap_or('`');
	let mut fence = fence.to_string();
	while code.lines().any(|line| line.trim_start().starts_with(&fence)) {
		fence.push(marker);
	}
	fence
}

fn horizontal_rule(_: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	format!("\n\n{}\n\n", cx.options().hr)
}

fn link(element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	let content = cx.children(element);
	if content.trim().is_empty() {
		return String::new();
	}
	let href = element.value().attr("href").unwrap_or_default();
	let title = element
		.value()
		.attr("title")
		.filter(|title| !title.is_empty())
		.map(|title| format!(" \"{}\"", title.replace('"', "\\\"")))
		.unwrap_or_default();

	let leading = if content.starts_with(char::is_whitespace) { " " } else { "" };
	let trailing = if content.ends_with(char::is_whitespace) { " " } else { "" };
	let text = content.trim();

	match cx.options().link_style {
		LinkStyle::Inlined => {
			let href = href.replace('(', "\\(").replace(')', "\\)");
			format!("{leading}[{text}]({href}{title}){trailing}")
		}
		LinkStyle::Referenced => {
			let number = cx.push_reference(|number| format!("[{number}]: {href}{title}"));
			format!("{leading}[{text}][{number}]{trailing}")
		}
	}
}

fn emphasis(element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	let content = cx.children(element);
	wrap_inline(&content, &cx.options().em_delimiter)
}

fn strong(element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	let content = cx.children(element);
	wrap_inline(&content, &cx.options().strong_delimiter)
}

fn strikethrough(element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	wrap_inline(&cx.children(element), "~~")
}

fn inline_code(element: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
	let code = collapse_whitespace(&element.text().collect::<String>());
	if code.trim().is_empty() {
		return String::new();
	}

	let runs: HashSet<usize> = code.split(|ch: char| ch != '`').map(str::len).filter(|len| *len > 0).collect();
	let mut ticks = 1;
	while runs.contains(&ticks) {
		ticks += 1;
	}
	let delimiter = "`".repeat(ticks);
	let padding = if code.starts_with('`') || code.ends_with('`') { " " } else { "" };
	format!("{delimiter}{padding}{code}{padding}{delimiter}")
}

/// Rows owned by `table` itself, excluding rows of nested tables.
fn table_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
	table
		.descendants()
		.filter_map(ElementRef::wrap)
		.filter(|row| is_named(row, "tr") && owning_table(row).is_some_and(|owner| owner.id() == table.id()))
		.collect()
}

/// A table converts to GFM only when its first row is a heading row: it
/// sits in `<thead>`, or it opens the table or its first `<tbody>` and holds
/// nothing but `<th>` cells.
fn has_heading_row(table: &ElementRef<'_>) -> bool {
	let Some(first) = table_rows(*table).into_iter().next() else {
		return false;
	};
	let Some(parent) = parent_element(&first) else {
		return false;
	};
	if is_named(&parent, "thead") {
		return true;
	}
	let opens_parent = first.prev_siblings().filter_map(ElementRef::wrap).next().is_none();
	let first_body = is_named(&parent, "tbody")
		&& parent
			.prev_siblings()
			.filter_map(ElementRef::wrap)
			.next()
			.is_none_or(|previous| is_named(&previous, "thead") && previous.text().all(|text| text.trim().is_empty()));
	let mut cells = first.children().filter_map(ElementRef::wrap).peekable();
	let only_headers = cells.peek().is_some() && cells.all(|cell| is_named(&cell, "th"));

	opens_parent && (is_named(&parent, "table") || first_body) && only_headers
}

fn raw_block(element: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
	format!("\n\n{}\n\n", element.html())
}

fn table(element: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	let rows = table_rows(element);

	let mut grid: Vec<Vec<String>> = Vec::with_capacity(rows.len());
	for row in &rows {
		let cells = row
			.children()
			.filter_map(ElementRef::wrap)
			.filter(|cell| is_named(cell, "th") || is_named(cell, "td"))
			.map(|cell| table_cell(cell, cx))
			.collect();
		grid.push(cells);
	}
	let columns = grid.iter().map(Vec::len).max().unwrap_or(0).max(1);

	let alignments: Vec<&str> = (0..columns)
		.map(|column| {
			rows[0]
				.children()
				.filter_map(ElementRef::wrap)
				.filter(|cell| is_named(cell, "th") || is_named(cell, "td"))
				.nth(column)
				.and_then(|cell| cell.value().attr("align"))
				.map(|align| match align.to_ascii_lowercase().as_str() {
					"left" => ":--",
					"right" => "--:",
					"center" => ":-:",
					_ => "---",
				})
				.unwrap_or("---")
		})
		.collect();

	let mut lines = Vec::with_capacity(grid.len() + 1);
	for (index, cells) in grid.iter().enumerate() {
		let padded: Vec<&str> = (0..columns).map(|column| cells.get(column).map_or("", String::as_str)).collect();
		lines.push(format!("| {} |", padded.join(" | ")));
		if index == 0 {
			lines.push(format!("| {} |", alignments.join(" | ")));
		}
	}

	let caption = element
		.children()
		.filter_map(ElementRef::wrap)
		.find(|child| is_named(child, "caption"))
		.map(|caption| cx.children(caption).trim().to_string())
		.filter(|caption| !caption.is_empty())
		.map(|caption| format!("{caption}\n\n"))
		.unwrap_or_default();

	format!("\n\n{caption}{}\n\n", lines.join("\n"))
}

fn owning_table<'a>(row: &ElementRef<'a>) -> Option<ElementRef<'a>> {
	row.ancestors().filter_map(ElementRef::wrap).find(|ancestor| is_named(ancestor, "table"))
}

fn table_cell(cell: ElementRef<'_>, cx: &mut RenderContext<'_>) -> String {
	collapse_whitespace(cx.children(cell).trim()).replace('|', "\\|")
}
