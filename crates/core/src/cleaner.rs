//! Tree pruning ahead of conversion.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};
use crate::matcher::ElementPredicate;

/// Parse a caller-supplied ignore selector.
pub fn parse_selector(selector: &str) -> Result<Selector> {
	Selector::parse(selector).map_err(|err| Error::InvalidSelector {
		selector: selector.to_string(),
		reason: format!("{err:?}"),
	})
}

/// Detach every element below the root matched by one of `remove` or by
/// `exclude`. Returns how many subtrees were detached.
pub(crate) fn prune(html: &mut Html, remove: &[ElementPredicate], exclude: Option<&Selector>) -> usize {
	let root = html.root_element();
	let doomed: Vec<_> = root
		.descendants()
		.skip(1)
		.filter_map(ElementRef::wrap)
		.filter(|element| remove.iter().any(|predicate| predicate(element)) || exclude.is_some_and(|selector| selector.matches(element)))
		.map(|element| element.id())
		.collect();

	for id in &doomed {
		if let Some(mut node) = html.tree.get_mut(*id) {
			node.detach();
		}
	}
	doomed.len()
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;

	#[test]
	fn prune_detaches_matches_and_exclusions() {
		let mut html = Html::parse_fragment(r#"<p>a</p><script>x()</script><div class="skip"><span>b</span></div><p>c</p>"#);
		let remove: Vec<ElementPredicate> = vec![Arc::new(|element: &ElementRef<'_>| element.value().name() == "script")];
		let exclude = parse_selector(".skip").unwrap();

		assert_eq!(prune(&mut html, &remove, Some(&exclude)), 2);
		assert_eq!(html.root_element().inner_html(), "<p>a</p><p>c</p>");
	}

	#[test]
	fn invalid_selector_is_reported() {
		let err = parse_selector("div[").unwrap_err();
		assert!(matches!(err, Error::InvalidSelector { ref selector, .. } if selector == "div["));
	}
}
