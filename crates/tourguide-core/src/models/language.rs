use serde::{Deserialize, Serialize};

/// Language code used when nothing else is configured
pub const DEFAULT_LANGUAGE: &str = "en";

/// Languages that have their own text blocks. Every other code reads English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
    French,
    Japanese,
}

impl Language {
    /// Resolve a two-letter code, falling back to English
    pub fn from_code(code: &str) -> Self {
        match normalize_language(code).as_str() {
            "es" => Language::Spanish,
            "fr" => Language::French,
            "ja" => Language::Japanese,
            _ => Language::English,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Japanese => "ja",
        }
    }
}

/// One value per supported language
#[derive(Debug, Clone, Copy)]
pub struct Localized<T> {
    pub en: T,
    pub es: T,
    pub fr: T,
    pub ja: T,
}

impl<T> Localized<T> {
    pub fn get(&self, code: &str) -> &T {
        self.for_language(Language::from_code(code))
    }

    pub fn for_language(&self, language: Language) -> &T {
        match language {
            Language::English => &self.en,
            Language::Spanish => &self.es,
            Language::French => &self.fr,
            Language::Japanese => &self.ja,
        }
    }
}

/// Canonical form of a language code: trimmed and lowercase
pub fn normalize_language(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Map a chat language code to the locale used for speech input and output
pub fn speech_locale(code: &str) -> &'static str {
    match normalize_language(code).as_str() {
        "en" => "en-US",
        "es" => "es-ES",
        "fr" => "fr-FR",
        "ja" => "ja-JP",
        "zh" => "zh-CN",
        _ => "en-US",
    }
}
