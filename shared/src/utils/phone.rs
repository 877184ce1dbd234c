//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

/// Strip common formatting characters, keeping digits and a leading `+`
pub fn strip_formatting(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Normalize a phone number to international format before outbound dispatch.
///
/// The rules, in order:
/// - already starts with `+`: used as-is
/// - exactly 10 digits: the default country code is prepended
/// - 11 digits beginning with the country-code digits: only `+` is prepended
/// - anything else: the default country code is prepended
///
/// `default_country_code` is digits only (e.g. "1").
pub fn normalize_to_e164(phone: &str, default_country_code: &str) -> String {
    let stripped = strip_formatting(phone);

    if stripped.starts_with('+') {
        return stripped;
    }
    if stripped.len() == 10 {
        return format!("+{}{}", default_country_code, stripped);
    }
    if stripped.len() == 11 && stripped.starts_with(default_country_code) {
        return format!("+{}", stripped);
    }
    format!("+{}{}", default_country_code, stripped)
}

/// Check whether a phone number is plausible E.164
pub fn is_valid_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Mask a phone number for logs (e.g. +12****6425)
pub fn mask_phone(phone: &str) -> String {
    let stripped = strip_formatting(phone);
    if stripped.len() >= 7 {
        format!(
            "{}****{}",
            &stripped[0..3],
            &stripped[stripped.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_formatting() {
        assert_eq!(strip_formatting("(214) 957-6425"), "2149576425");
        assert_eq!(strip_formatting("+1 214 957 6425"), "+12149576425");
    }

    #[test]
    fn test_normalize_already_international() {
        assert_eq!(normalize_to_e164("+12149576425", "1"), "+12149576425");
        assert_eq!(normalize_to_e164("+442071838750", "1"), "+442071838750");
    }

    #[test]
    fn test_normalize_ten_digit_national() {
        assert_eq!(normalize_to_e164("2149576425", "1"), "+12149576425");
    }

    #[test]
    fn test_normalize_eleven_digits_with_country_code() {
        assert_eq!(normalize_to_e164("12149576425", "1"), "+12149576425");
    }

    #[test]
    fn test_normalize_fallback_prepends_country_code() {
        // 11 digits not starting with the country-code digit
        assert_eq!(normalize_to_e164("98765432109", "1"), "+198765432109");
        // short number
        assert_eq!(normalize_to_e164("55512", "1"), "+155512");
    }

    #[test]
    fn test_is_valid_e164() {
        assert!(is_valid_e164("+12149576425"));
        assert!(is_valid_e164("+442071838750"));
        assert!(!is_valid_e164("2149576425"));
        assert!(!is_valid_e164("+0123456789"));
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("+12149576425"), "+12****6425");
        assert_eq!(mask_phone("12345"), "****");
    }
}
