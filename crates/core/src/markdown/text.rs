//! Text-level helpers: whitespace collapsing, escaping and joining of
//! rendered fragments.

/// Collapse runs of ASCII whitespace into a single space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
	let mut collapsed = String::with_capacity(text.len());
	let mut in_space = false;
	for ch in text.chars() {
		if ch.is_ascii_whitespace() {
			if !in_space {
				collapsed.push(' ');
			}
			in_space = true;
		} else {
			collapsed.push(ch);
			in_space = false;
		}
	}
	collapsed
}

/// Escape characters that Markdown would otherwise interpret.
pub(crate) fn escape_markdown(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for ch in text.chars() {
		if matches!(ch, '\\' | '*' | '`' | '[' | ']' | '_') {
			escaped.push('\\');
		}
		escaped.push(ch);
	}
	escape_leading(escaped)
}

fn escape_leading(text: String) -> String {
	let block_marker = text.starts_with('-')
		|| text.starts_with("+ ")
		|| text.starts_with('=')
		|| text.starts_with('>')
		|| text.starts_with("~~~")
		|| is_atx_marker(&text);
	if block_marker {
		return format!("\\{text}");
	}

	let digits = text.bytes().take_while(u8::is_ascii_digit).count();
	if digits > 0 && text[digits..].starts_with(". ") {
		return format!("{}\\{}", &text[..digits], &text[digits..]);
	}
	text
}

fn is_atx_marker(text: &str) -> bool {
	let hashes = text.bytes().take_while(|byte| *byte == b'#').count();
	(1..=6).contains(&hashes) && text[hashes..].starts_with(' ')
}

/// Concatenate two rendered fragments, keeping at most one blank line
/// between them and never doubling a space at the seam.
pub(crate) fn join(output: &str, replacement: &str) -> String {
	let mut head = output.trim_end_matches('\n');
	let mut tail = replacement.trim_start_matches('\n');
	let head_newlines = output.len() - head.len();
	let tail_newlines = replacement.len() - tail.len();
	let newlines = head_newlines.max(tail_newlines).min(2);

	// Spaces never dangle at a line break introduced by the other side.
	if newlines > 0 && head_newlines == 0 {
		head = head.trim_end_matches(' ');
	}
	if newlines > 0 && tail_newlines == 0 {
		tail = tail.trim_start_matches(' ');
	}

	let mut joined = String::with_capacity(head.len() + newlines + tail.len());
	joined.push_str(head);
	if newlines == 0 && head.ends_with(' ') && tail.starts_with(' ') {
		joined.push_str(&tail[1..]);
	} else {
		joined.extend(std::iter::repeat_n('\n', newlines));
		joined.push_str(tail);
	}
	joined
}

/// Wrap inline content in `delimiter`, moving flanking whitespace outside
/// the delimiters. Whitespace-only content renders as nothing.
pub(crate) fn wrap_inline(content: &str, delimiter: &str) -> String {
	let inner = content.trim();
	if inner.is_empty() {
		return String::new();
	}
	let leading = if content.starts_with(char::is_whitespace) { " " } else { "" };
	let trailing = if content.ends_with(char::is_whitespace) { " " } else { "" };
	format!("{leading}{delimiter}{inner}{delimiter}{trailing}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collapses_mixed_whitespace() {
		assert_eq!(collapse_whitespace("a \n\t b"), "a b");
		assert_eq!(collapse_whitespace("\n  "), " ");
	}

	#[test]
	fn escapes_inline_markers() {
		assert_eq!(escape_markdown("snake_case *and* [x]"), r"snake\_case \*and\* \[x\]");
	}

	#[test]
	fn escapes_block_markers_at_start_only() {
		assert_eq!(escape_markdown("- item"), r"\- item");
		assert_eq!(escape_markdown("## not a heading"), r"\## not a heading");
		assert_eq!(escape_markdown("1. first"), r"1\. first");
		assert_eq!(escape_markdown("a - b"), "a - b");
		assert_eq!(escape_markdown("#hashtag"), "#hashtag");
	}

	#[test]
	fn join_keeps_the_widest_separator() {
		assert_eq!(join("a\n", "\n\nb"), "a\n\nb");
		assert_eq!(join("a\n\n\n", "b"), "a\n\nb");
		assert_eq!(join("a", "b"), "ab");
		assert_eq!(join("a ", " b"), "a b");
		assert_eq!(join("a ", "\n\nb"), "a\n\nb");
		assert_eq!(join("a  \n", "b"), "a  \nb");
	}

	#[test]
	fn wrap_inline_moves_flanking_space() {
		assert_eq!(wrap_inline(" bold ", "**"), " **bold** ");
		assert_eq!(wrap_inline("   ", "_"), "");
	}
}
