//! WhatsApp contact numbers for sellers.
//!
//! Buyers contact sellers through `wa.me` deep links, which only accept the
//! international form of a number without `+` or separators. Sellers usually
//! type the local `08…` form, so numbers are normalised once at the boundary.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Indonesian country calling code.
const COUNTRY_CODE: &str = "62";

/// Minimum number of digits after normalisation.
const MIN_DIGITS: usize = 10;

/// Maximum number of digits after normalisation (E.164 limit).
const MAX_DIGITS: usize = 15;

/// Errors that can occur when parsing a [`WhatsappNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WhatsappError {
    /// The input is empty.
    #[error("whatsapp number cannot be empty")]
    Empty,
    /// The input contains something other than digits and separators.
    #[error("whatsapp number may only contain digits, spaces, '-', '.', '(' and ')'")]
    InvalidCharacter,
    /// The number does not start with `0`, `62`, `+62` or `8`.
    #[error("whatsapp number must be an Indonesian number (08…, 62… or +62…)")]
    UnsupportedPrefix,
    /// The normalised number has the wrong number of digits.
    #[error("whatsapp number must have between {min} and {max} digits")]
    Length {
        /// Minimum digits.
        min: usize,
        /// Maximum digits.
        max: usize,
    },
}

/// A seller's WhatsApp number in international digit form (`628…`).
///
/// ```
/// use kebumify_core::WhatsappNumber;
///
/// let number = WhatsappNumber::parse("0812-3456-7890").unwrap();
/// assert_eq!(number.as_str(), "6281234567890");
/// assert_eq!(number.deep_link(None), "https://wa.me/6281234567890");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WhatsappNumber(String);

impl WhatsappNumber {
    /// Parse and normalise a WhatsApp number.
    ///
    /// # Errors
    ///
    /// Returns a [`WhatsappError`] if the input is not a plausible Indonesian
    /// mobile number.
    pub fn parse(s: &str) -> Result<Self, WhatsappError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(WhatsappError::Empty);
        }

        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let mut digits = String::with_capacity(unsigned.len());
        for c in unsigned.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(WhatsappError::InvalidCharacter),
            }
        }

        let normalised = if let Some(rest) = digits.strip_prefix('0') {
            format!("{COUNTRY_CODE}{rest}")
        } else if digits.starts_with(COUNTRY_CODE) {
            digits
        } else if digits.starts_with('8') {
            format!("{COUNTRY_CODE}{digits}")
        } else {
            return Err(WhatsappError::UnsupportedPrefix);
        };

        if !(MIN_DIGITS..=MAX_DIGITS).contains(&normalised.len()) {
            return Err(WhatsappError::Length {
                min: MIN_DIGITS,
                max: MAX_DIGITS,
            });
        }

        Ok(Self(normalised))
    }

    /// Returns the normalised digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a `wa.me` deep link, optionally pre-filling a chat message.
    #[must_use]
    pub fn deep_link(&self, message: Option<&str>) -> String {
        match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(text) => format!("https://wa.me/{}?text={}", self.0, urlencoding::encode(text)),
            None => format!("https://wa.me/{}", self.0),
        }
    }
}

impl fmt::Display for WhatsappNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.0)
    }
}

impl TryFrom<String> for WhatsappNumber {
    type Error = WhatsappError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WhatsappNumber> for String {
    fn from(number: WhatsappNumber) -> Self {
        number.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_local_prefix_becomes_international() {
        let number = WhatsappNumber::parse("0812 3456 7890").unwrap();
        assert_eq!(number.as_str(), "6281234567890");
    }

    #[test]
    fn test_international_forms_agree() {
        let plus = WhatsappNumber::parse("+62 812-3456-7890").unwrap();
        let bare = WhatsappNumber::parse("6281234567890").unwrap();
        let short = WhatsappNumber::parse("81234567890").unwrap();
        assert_eq!(plus, bare);
        assert_eq!(bare, short);
    }

    #[test]
    fn test_rejects_letters() {
        assert_eq!(
            WhatsappNumber::parse("0812abc"),
            Err(WhatsappError::InvalidCharacter)
        );
    }

    #[test]
    fn test_rejects_foreign_prefix() {
        assert_eq!(
            WhatsappNumber::parse("+1 415 555 0100"),
            Err(WhatsappError::UnsupportedPrefix)
        );
    }

    #[test]
    fn test_rejects_bad_length() {
        assert!(matches!(
            WhatsappNumber::parse("0812"),
            Err(WhatsappError::Length { .. })
        ));
        assert!(matches!(
            WhatsappNumber::parse("08123456789012345"),
            Err(WhatsappError::Length { .. })
        ));
    }

    #[test]
    fn test_deep_link_encodes_message() {
        let number = WhatsappNumber::parse("081234567890").unwrap();
        assert_eq!(
            number.deep_link(Some("Halo, apakah keripik masih ada?")),
            "https://wa.me/6281234567890?text=Halo%2C%20apakah%20keripik%20masih%20ada%3F"
        );
        assert_eq!(number.deep_link(Some("   ")), "https://wa.me/6281234567890");
    }

    #[test]
    fn test_display_has_plus() {
        let number = WhatsappNumber::parse("081234567890").unwrap();
        assert_eq!(number.to_string(), "+6281234567890");
    }
}
