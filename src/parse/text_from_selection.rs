use super::Error;
use scraper::{ElementRef, Selector};

/// First element under `element` matching `selector`, or a `Missing` error
/// naming `label`.
pub fn first_match<'a>(
    selector: &Selector,
    element: ElementRef<'a>,
    label: &str,
) -> Result<ElementRef<'a>, Error> {
    element
        .select(selector)
        .next()
        .ok_or_else(|| Error::missing(label))
}

/// Concatenation of every text node below `element`.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Plain text of the first match, `None` when nothing matches.
pub fn text_from_selection(selector: &Selector, element: ElementRef<'_>) -> Option<String> {
    element.select(selector).next().map(text_of)
}
