/// Declares a lazily compiled `scraper::Selector` static.
///
/// `static_selector!(MAP_SELECTOR <- "#map");`
#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: ::std::sync::LazyLock<::scraper::Selector> =
            ::std::sync::LazyLock::new(|| match ::scraper::Selector::parse($sel) {
                Ok(sel) => sel,
                Err(e) => panic!("Error parsing static selector {}: {:?}", $sel, e),
            });
    };
}
