//! Locale Resolution
//!
//! The locale of a request is the first segment of its path
//! (`/pl/cms/login` → `pl`). Unknown segments never block a request:
//! they resolve to the default locale.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleConfigError {
    #[error("At least one locale must be configured")]
    Empty,

    #[error("Default locale {0:?} is not among the configured locales")]
    UnknownDefault(String),
}

/// Closed set of supported locale codes plus the fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    locales: Vec<String>,
    default_locale: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_string(), "pl".to_string()],
            default_locale: "en".to_string(),
        }
    }
}

impl LocaleConfig {
    pub fn new<I, S>(locales: I, default_locale: impl Into<String>) -> Result<Self, LocaleConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let locales: Vec<String> = locales.into_iter().map(Into::into).collect();
        let default_locale = default_locale.into();

        if locales.is_empty() {
            return Err(LocaleConfigError::Empty);
        }
        if !locales.contains(&default_locale) {
            return Err(LocaleConfigError::UnknownDefault(default_locale));
        }

        Ok(Self {
            locales,
            default_locale,
        })
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.locales.iter().any(|l| l == code)
    }

    /// Resolve a candidate code, falling back to the default
    pub fn resolve<'a>(&'a self, candidate: Option<&'a str>) -> &'a str {
        match candidate {
            Some(code) if self.is_supported(code) => code,
            _ => &self.default_locale,
        }
    }

    /// Locale for a request path
    pub fn from_path<'a>(&'a self, path: &'a str) -> &'a str {
        self.resolve(first_path_segment(path))
    }
}

/// First non-empty segment of a path, if any
pub fn first_path_segment(path: &str) -> Option<&str> {
    path.split('/').find(|segment| !segment.is_empty())
}

/// Locale attached to a request after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLocale(pub String);

impl RequestLocale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
