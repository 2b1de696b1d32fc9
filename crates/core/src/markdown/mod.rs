//! HTML to GitHub-Flavored Markdown conversion.
//!
//! A [`MarkdownConverter`] is an immutable rule set: custom rules first, then
//! the removal and preservation predicates, then the baseline GFM rules.
//! Exclusions that only apply to one document are passed to
//! [`MarkdownConverter::convert_with_exclusion`] and never stored.

mod gfm;
pub mod options;
pub mod render;
pub mod rules;
mod text;

use std::fmt;
use std::sync::{Arc, LazyLock};

use scraper::{ElementRef, Html, Selector};
use tracing::trace;

use crate::cleaner::prune;
use crate::config::heuristics;
use crate::matcher::{ElementPredicate, matches_any};
use options::ConverterOptions;
use render::RenderContext;
use rules::ConversionRule;

static SHARED: LazyLock<MarkdownConverter> = LazyLock::new(MarkdownConverter::article);

pub struct MarkdownConverter {
	options: ConverterOptions,
	rules: Vec<Arc<dyn ConversionRule>>,
	baseline: Vec<Arc<dyn ConversionRule>>,
	remove: Vec<ElementPredicate>,
	keep: Vec<ElementPredicate>,
}

impl fmt::Debug for MarkdownConverter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MarkdownConverter")
			.field("options", &self.options)
			.field("rules", &self.rules.iter().map(|rule| rule.name()).collect::<Vec<_>>())
			.field("remove", &self.remove.len())
			.field("keep", &self.keep.len())
			.finish()
	}
}

impl MarkdownConverter {
	pub fn builder() -> MarkdownConverterBuilder {
		MarkdownConverterBuilder::default()
	}

	/// Builder preloaded with the article rules: dead links, images,
	/// `<picture>` sources, noise removal and embed preservation.
	pub fn article_builder() -> MarkdownConverterBuilder {
		let heuristics = heuristics();
		let remove = heuristics.remove.clone();
		let preserve = heuristics.preserve.clone();

		Self::builder()
			.add_rule(rules::dead_link())
			.add_rule(rules::image())
			.add_rule(rules::picture())
			.remove(move |element| matches_any(&remove, element))
			.keep(move |element| matches_any(&preserve, element))
	}

	pub fn article() -> Self {
		Self::article_builder().build()
	}

	/// Process-wide article converter with default options.
	pub fn shared() -> &'static Self {
		&SHARED
	}

	pub fn options(&self) -> &ConverterOptions {
		&self.options
	}

	/// Convert an HTML fragment to Markdown.
	pub fn convert(&self, html: &str) -> String {
		self.convert_with_exclusion(html, None)
	}

	/// Convert an HTML fragment, additionally dropping every element matched
	/// by `exclude` for this call only.
	pub fn convert_with_exclusion(&self, html: &str, exclude: Option<&Selector>) -> String {
		let mut fragment = Html::parse_fragment(html);
		let removed = prune(&mut fragment, &self.remove, exclude);
		trace!(target = "article2md.markdown", removed, "pruned fragment");

		let root = fragment.root_element();
		let mut cx = RenderContext::new(self);
		let body = cx.children(root);
		cx.finish(body)
	}
}

#[derive(Default)]
pub struct MarkdownConverterBuilder {
	options: ConverterOptions,
	rules: Vec<Arc<dyn ConversionRule>>,
	remove: Vec<ElementPredicate>,
	keep: Vec<ElementPredicate>,
}

impl MarkdownConverterBuilder {
	pub fn options(mut self, options: ConverterOptions) -> Self {
		self.options = options;
		self
	}

	/// Register a rule evaluated before the baseline rules. Earlier rules win.
	pub fn add_rule(mut self, rule: impl ConversionRule + 'static) -> Self {
		self.rules.push(Arc::new(rule));
		self
	}

	/// Delete matching elements, with their subtrees, before rendering.
	pub fn remove<P>(mut self, predicate: P) -> Self
	where
		P: Fn(&ElementRef<'_>) -> bool + Send + Sync + 'static,
	{
		self.remove.push(Arc::new(predicate));
		self
	}

	/// Emit matching elements as raw HTML.
	pub fn keep<P>(mut self, predicate: P) -> Self
	where
		P: Fn(&ElementRef<'_>) -> bool + Send + Sync + 'static,
	{
		self.keep.push(Arc::new(predicate));
		self
	}

	pub fn build(self) -> MarkdownConverter {
		MarkdownConverter {
			options: self.options,
			rules: self.rules,
			baseline: gfm::baseline(),
			remove: self.remove,
			keep: self.keep,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::is_named;
	use crate::markdown::options::LinkStyle;
	use crate::markdown::rules::Rule;

	fn inlined() -> MarkdownConverter {
		MarkdownConverter::article_builder()
			.options(ConverterOptions { link_style: LinkStyle::Inlined, ..ConverterOptions::default() })
			.build()
	}

	#[test]
	fn img_srcset_uses_first_candidate() {
		let markdown = MarkdownConverter::shared().convert(r#"<img alt="alt" srcset="a.jpg 480w, b.jpg 800w">"#);
		assert_eq!(markdown, "![alt](a.jpg)");
	}

	#[test]
	fn img_prefers_src_and_quotes_title() {
		let markdown = MarkdownConverter::shared().convert(r#"<img alt="cat" src="c.png" srcset="a.jpg 1x" title="A cat">"#);
		assert_eq!(markdown, r#"![cat](c.png "A cat")"#);
	}

	#[test]
	fn picture_picks_the_widest_source() {
		let html = r#"<picture>
			<source sizes="(max-width: 400px) 400px" srcset="small.jpg 400w">
			<source sizes="(max-width: 800px) 800px" srcset="large.jpg 800w, larger.jpg 1600w">
			<img alt="hero">
		</picture>"#;
		assert_eq!(MarkdownConverter::shared().convert(html), "![hero](large.jpg)");
	}

	#[test]
	fn picture_prefers_direct_img_src() {
		let html = r#"<picture><source sizes="800px" srcset="large.jpg"><img alt="hero" src="direct.jpg"></picture>"#;
		assert_eq!(MarkdownConverter::shared().convert(html), "![hero](direct.jpg)");
	}

	#[test]
	fn dead_links_vanish() {
		let converter = MarkdownConverter::shared();
		assert_eq!(converter.convert(r##"<a href="#">click</a>"##), "");
		assert_eq!(converter.convert(r#"<a href="javascript:void(0)">x</a>"#), "");
		assert_eq!(converter.convert(r#"<p>before <a href="">x</a> after</p>"#), "before after");
	}

	#[test]
	fn real_links_survive() {
		assert_eq!(inlined().convert(r#"<a href="/real">x</a>"#), "[x](/real)");
		assert_eq!(MarkdownConverter::shared().convert(r#"<a href="/real">x</a>"#), "[x][1]\n\n[1]: /real");
	}

	#[test]
	fn references_are_numbered_per_call() {
		let converter = MarkdownConverter::shared();
		let html = r#"<p><a href="/a" title="First">a</a> and <a href="/b">b</a></p>"#;
		let expected = "[a][1] and [b][2]\n\n[1]: /a \"First\"\n[2]: /b";
		assert_eq!(converter.convert(html), expected);
		assert_eq!(converter.convert(html), expected);
	}

	#[test]
	fn anchor_without_href_keeps_text() {
		assert_eq!(MarkdownConverter::shared().convert("<p><a name=\"top\">Top</a></p>"), "Top");
	}

	#[test]
	fn noise_is_removed() {
		let html = r#"<p>keep</p><div class="ad-banner"><p>buy now</p></div><aside>side</aside>
			<script>alert(1)</script><style>p{}</style><form><input></form><div class="sidebar-ADS">x</div>"#;
		assert_eq!(MarkdownConverter::shared().convert(html), "keep");
	}

	#[test]
	fn embeds_are_kept_verbatim() {
		let html = r#"<p>Press <kbd>Ctrl</kbd></p><iframe src="https://example.com/embed"></iframe>"#;
		assert_eq!(
			MarkdownConverter::shared().convert(html),
			"Press <kbd>Ctrl</kbd>\n\n<iframe src=\"https://example.com/embed\"></iframe>"
		);
	}

	#[test]
	fn exclusion_applies_to_one_call_only() {
		let converter = MarkdownConverter::shared();
		let selector = Selector::parse(".skip").unwrap();
		let html = r#"<p>one</p><p class="skip">two</p>"#;
		assert_eq!(converter.convert_with_exclusion(html, Some(&selector)), "one");
		assert_eq!(converter.convert(html), "one\n\ntwo");
	}

	#[test]
	fn baseline_blocks() {
		let html = "<h2>Title</h2><ul><li>one</li><li>two<ol><li>nested</li></ol></li></ul><hr><blockquote><p>quoted</p></blockquote>";
		assert_eq!(
			MarkdownConverter::shared().convert(html),
			"## Title\n\n- one\n- two\n  1. nested\n\n---\n\n> quoted"
		);
	}

	#[test]
	fn inline_formatting() {
		let html = "<p><strong>bold</strong> <em>it</em> <del>gone</del> <code>x_y</code></p>";
		assert_eq!(MarkdownConverter::shared().convert(html), "**bold** _it_ ~~gone~~ `x_y`");
	}

	#[test]
	fn fenced_code_keeps_language() {
		let html = "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>";
		assert_eq!(MarkdownConverter::shared().convert(html), "```rust\nfn main() {}\n```");
	}

	#[test]
	fn tables_get_an_alignment_row() {
		let html = "<table><tr><th>a</th><th align=\"right\">b</th></tr><tr><td>1</td><td>2|3</td></tr></table>";
		assert_eq!(MarkdownConverter::shared().convert(html), "| a | b |\n| --- | --: |\n| 1 | 2\\|3 |");
	}

	#[test]
	fn headerless_tables_stay_html() {
		let html = "<table><tr><td>1</td><td>2</td></tr><tr><td>3</td><td>4</td></tr></table>";
		assert_eq!(
			MarkdownConverter::shared().convert(html),
			"<table><tbody><tr><td>1</td><td>2</td></tr><tr><td>3</td><td>4</td></tr></tbody></table>"
		);
	}

	#[test]
	fn thead_row_is_the_header() {
		let html = "<table><thead><tr><td>a</td></tr></thead><tbody><tr><td>1</td></tr></tbody></table>";
		assert_eq!(MarkdownConverter::shared().convert(html), "| a |\n| --- |\n| 1 |");
	}

	#[test]
	fn task_list_items() {
		let html = "<ul><li><input type=\"checkbox\" checked> done</li><li><input type=\"checkbox\"> todo</li></ul>";
		assert_eq!(MarkdownConverter::shared().convert(html), "- [x] done\n- [ ] todo");
	}

	#[test]
	fn custom_rules_run_before_baseline() {
		let converter = MarkdownConverter::builder()
			.add_rule(Rule { name: "shout", filter: |el| is_named(el, "strong"), replacement: |el, _| el.text().collect::<String>().to_uppercase() })
			.build();
		assert_eq!(converter.convert("<p><strong>hey</strong></p>"), "HEY");
	}
}
