//! Read-only view over a fetched HTML page.

use scraper::{ElementRef, Html, Node, Selector};

/// A parsed listing page.
///
/// Wraps the markup tree produced by `scraper`; nothing in this crate mutates
/// it after parsing.
pub struct ListingDocument {
    html: Html,
}

impl ListingDocument {
    /// Parse a full HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Find the element carrying the given `id` attribute
    pub fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(&format!("#{}", id)).ok()?;
        self.html.select(&selector).next()
    }
}

impl std::fmt::Debug for ListingDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingDocument")
            .field("root", &self.html.root_element().value().name())
            .finish()
    }
}

/// Element children of `element`, skipping text and comment nodes
pub(crate) fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// The `n`-th (zero-based) element child of `element`
pub(crate) fn nth_child_element(element: ElementRef<'_>, n: usize) -> Option<ElementRef<'_>> {
    child_elements(element).nth(n)
}

/// Text that precedes the first element child
pub(crate) fn leading_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .take_while(|node| !node.value().is_element())
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        })
        .collect()
}

/// Text between the end of `element` and its next element sibling
pub(crate) fn trailing_text(element: ElementRef<'_>) -> String {
    element
        .next_siblings()
        .take_while(|node| !node.value().is_element())
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        })
        .collect()
}

/// Tag name of `element`
pub(crate) fn tag(element: ElementRef<'_>) -> &str {
    element.value().name()
}
