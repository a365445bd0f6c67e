/// Registry of the languages an article can be compiled in.
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::errors::UnsupportedLanguage;

/// A supported article language. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    /// Russian (`ru`).
    #[serde(rename = "ru")]
    Russian,
    /// English (`en`).
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Every supported language, in registry order.
    pub const ALL: [Self; 2] = [Self::Russian, Self::English];

    /// Two-letter code used on the command line and in source file names.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Russian => "ru",
            Self::English => "en",
        }
    }

    /// Codes of all supported languages, in registry order.
    #[must_use]
    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|lang| lang.code()).collect()
    }

    /// Whether `code` names a supported language.
    #[must_use]
    pub fn is_valid(code: &str) -> bool {
        Self::from_code(code).is_some()
    }

    /// Look up a language by its exact code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnsupportedLanguage {
            code: s.to_owned(),
        })
    }
}
