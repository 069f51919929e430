use scraper::{ElementRef, Selector};

use super::clean::normalize_whitespace;

/// All text nodes below `element`, joined and with whitespace runs collapsed.
pub fn element_text(element: ElementRef<'_>) -> String {
    let joined: String = element.text().collect();
    normalize_whitespace(joined.trim()).into_owned()
}

/// Text of the first element under `element` matching `selector`, if any.
pub fn text_from_selection(selector: &Selector, element: ElementRef<'_>) -> Option<String> {
    element.select(selector).next().map(element_text)
}
