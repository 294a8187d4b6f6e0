//! Available locales.

use serde::Serialize;

/// A locale the client ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocaleInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

pub const DEFAULT_LOCALE: &str = "en";

pub const AVAILABLE_LOCALES: &[LocaleInfo] = &[
    LocaleInfo {
        code: "en",
        name: "English",
        flag: "🇺🇸",
    },
    LocaleInfo {
        code: "vi",
        name: "Tiếng Việt",
        flag: "🇻🇳",
    },
    LocaleInfo {
        code: "ko",
        name: "한국어",
        flag: "🇰🇷",
    },
];

const RTL_LOCALES: &[&str] = &["ar", "he", "fa", "ur"];

pub fn is_available(code: &str) -> bool {
    AVAILABLE_LOCALES.iter().any(|locale| locale.code == code)
}

pub fn locale_info(code: &str) -> Option<&'static LocaleInfo> {
    AVAILABLE_LOCALES.iter().find(|locale| locale.code == code)
}

/// The locale after `code` in cycling order. Unknown codes start the cycle.
pub fn next_locale(code: &str) -> &'static str {
    let index = AVAILABLE_LOCALES
        .iter()
        .position(|locale| locale.code == code)
        .map(|i| i + 1)
        .unwrap_or(0);
    AVAILABLE_LOCALES[index % AVAILABLE_LOCALES.len()].code
}

pub fn is_rtl(code: &str) -> bool {
    RTL_LOCALES.contains(&code)
}

/// `"rtl"` or `"ltr"`.
pub fn direction(code: &str) -> &'static str {
    if is_rtl(code) { "rtl" } else { "ltr" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability() {
        assert!(is_available("en"));
        assert!(is_available("ko"));
        assert!(!is_available("fr"));
        assert_eq!(locale_info("vi").unwrap().name, "Tiếng Việt");
    }

    #[test]
    fn test_next_locale_cycles() {
        assert_eq!(next_locale("en"), "vi");
        assert_eq!(next_locale("vi"), "ko");
        assert_eq!(next_locale("ko"), "en");
        assert_eq!(next_locale("xx"), "en");
    }

    #[test]
    fn test_direction() {
        assert_eq!(direction("en"), "ltr");
        assert_eq!(direction("ar"), "rtl");
        assert!(is_rtl("he"));
    }
}
