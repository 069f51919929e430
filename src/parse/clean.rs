use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

pub fn normalize_whitespace(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("regex should be valid"));
    re.replace_all(s, " ")
}

/// Drops a trailing portion size such as `150g` from a meal name.
pub fn strip_portion_size(name: &str) -> &str {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\d+g$").expect("regex should be valid"));
    match re.find(name) {
        Some(m) => name[..m.start()].trim(),
        None => name.trim(),
    }
}

/// Finds the first `whole,fraction` amount, e.g. `"85,00 Kč"` -> `("85", "00")`.
pub fn price_parts(text: &str) -> Option<(&str, &str)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(\d+),(\d+)").expect("regex should be valid"));
    let caps = re.captures(text)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("a \n\t b  c"), "a b c");
    }

    #[test]
    fn test_strip_portion_size() {
        assert_eq!(strip_portion_size("Svíčková na smetaně 150g"), "Svíčková na smetaně");
        assert_eq!(strip_portion_size("Pizza 4 sýry"), "Pizza 4 sýry");
        assert_eq!(strip_portion_size("Knedlíky 2ks"), "Knedlíky 2ks");
    }

    #[test]
    fn test_price_parts() {
        assert_eq!(price_parts("Cena: 85,00 Kč"), Some(("85", "00")));
        assert_eq!(price_parts("zdarma"), None);
        assert_eq!(price_parts("85 Kč"), None);
    }
}
