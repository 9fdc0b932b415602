use crate::core::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of supported language codes. Anything persisted or served must
/// belong to this set; absent or invalid values fall back to [`LanguageCode::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    It,
    En,
    De,
    Fr,
    Es,
    Pt,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 6] = [
        LanguageCode::It,
        LanguageCode::En,
        LanguageCode::De,
        LanguageCode::Fr,
        LanguageCode::Es,
        LanguageCode::Pt,
    ];

    pub const DEFAULT: LanguageCode = LanguageCode::It;

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::It => "it",
            LanguageCode::En => "en",
            LanguageCode::De => "de",
            LanguageCode::Fr => "fr",
            LanguageCode::Es => "es",
            LanguageCode::Pt => "pt",
        }
    }

    /// Human-readable name in the language itself, for selector display.
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::It => "Italiano",
            LanguageCode::En => "English",
            LanguageCode::De => "Deutsch",
            LanguageCode::Fr => "Français",
            LanguageCode::Es => "Español",
            LanguageCode::Pt => "Português",
        }
    }

    pub fn parse(code: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.as_str().eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unsupported language: {} (supported: {})",
                    code,
                    Self::supported_codes().join(", ")
                ))
            })
    }

    /// Like [`parse`](Self::parse), but absent or invalid input yields the default.
    pub fn parse_or_default(code: Option<&str>) -> Self {
        code.and_then(|c| Self::parse(c).ok()).unwrap_or(Self::DEFAULT)
    }

    pub fn supported_codes() -> Vec<String> {
        Self::ALL.iter().map(|l| l.as_str().to_string()).collect()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_supported_codes() {
        for lang in LanguageCode::ALL {
            assert_eq!(LanguageCode::parse(lang.as_str()).unwrap(), lang);
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(LanguageCode::parse(" FR ").unwrap(), LanguageCode::Fr);
        assert_eq!(LanguageCode::parse("It").unwrap(), LanguageCode::It);
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!(LanguageCode::parse("xx").is_err());
        assert!(LanguageCode::parse("").is_err());
        assert!(LanguageCode::parse("italian").is_err());
    }

    #[test]
    fn absent_or_invalid_falls_back_to_italian() {
        assert_eq!(LanguageCode::parse_or_default(None), LanguageCode::It);
        assert_eq!(LanguageCode::parse_or_default(Some("zz")), LanguageCode::It);
        assert_eq!(LanguageCode::parse_or_default(Some("de")), LanguageCode::De);
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        let json = serde_json::to_string(&LanguageCode::Pt).unwrap();
        assert_eq!(json, "\"pt\"");
        let back: LanguageCode = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(back, LanguageCode::Es);
    }

    #[test]
    fn display_names_cover_all_languages() {
        for lang in LanguageCode::ALL {
            assert!(!lang.display_name().is_empty());
        }
    }
}
