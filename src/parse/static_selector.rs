use scraper::Selector;

/// Compiles a selector written into the source. Only literals reach this,
/// so a failure is a typo and panics on first use.
pub fn compile(css: &str) -> Selector {
    match Selector::parse(css) {
        Ok(selector) => selector,
        Err(e) => panic!("invalid css selector {css:?}: {e:?}"),
    }
}

/// Declares a `LazyLock<Selector>` static compiled on first use.
#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: ::std::sync::LazyLock<::scraper::Selector> =
            ::std::sync::LazyLock::new(|| $crate::parse::static_selector::compile($sel));
    };
}
