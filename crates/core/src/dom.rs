//! Element classification shared by the converter and the extractors.

use scraper::ElementRef;

const BLOCK_ELEMENTS: &[&str] = &[
	"address", "article", "aside", "audio", "blockquote", "body", "canvas", "center", "dd", "dir", "div", "dl", "dt", "fieldset", "figcaption",
	"figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
	"nav", "noframes", "noscript", "ol", "output", "p", "pre", "section", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

const MEANINGFUL_WHEN_BLANK: &[&str] = &["a", "table", "thead", "tbody", "tfoot", "th", "td", "iframe", "script", "audio", "video"];

pub(crate) fn is_block(name: &str) -> bool {
	BLOCK_ELEMENTS.contains(&name)
}

pub(crate) fn is_void(name: &str) -> bool {
	VOID_ELEMENTS.contains(&name)
}

/// An element with no text and nothing that renders on its own.
pub(crate) fn is_blank(element: &ElementRef<'_>) -> bool {
	let name = element.value().name();
	if is_void(name) || MEANINGFUL_WHEN_BLANK.contains(&name) {
		return false;
	}
	if !element.text().all(|text| text.trim().is_empty()) {
		return false;
	}
	!element
		.descendants()
		.skip(1)
		.filter_map(ElementRef::wrap)
		.any(|child| is_void(child.value().name()) || MEANINGFUL_WHEN_BLANK.contains(&child.value().name()))
}

pub(crate) fn is_named(element: &ElementRef<'_>, name: &str) -> bool {
	element.value().name() == name
}

pub(crate) fn parent_element<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
	element.parent().and_then(ElementRef::wrap)
}

/// First descendant (excluding `element`) with the given tag name.
pub(crate) fn find_descendant<'a>(element: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
	element.descendants().skip(1).filter_map(ElementRef::wrap).find(|child| is_named(child, name))
}

pub(crate) fn trimmed_text(element: &ElementRef<'_>) -> String {
	element.text().collect::<String>().trim().to_string()
}
