//! The injected translation collaborator.
//!
//! The engine never owns translation tables. Operations that show text to a
//! user take a `&dyn Translate` and a locale; when the translator has no
//! entry the key itself is shown.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ConfigError;

/// Looks up the message for `key` in `locale`.
pub trait Translate {
    fn translate(&self, key: &str, locale: &str) -> Option<String>;
}

impl<F> Translate for F
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn translate(&self, key: &str, locale: &str) -> Option<String> {
        self(key, locale)
    }
}

/// A translator with no entries: every key is shown as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate(&self, _key: &str, _locale: &str) -> Option<String> {
        None
    }
}

/// Resolves `key` through `translate`, falling back to the key.
pub fn localize(translate: &dyn Translate, key: &str, locale: &str) -> String {
    translate
        .translate(key, locale)
        .unwrap_or_else(|| key.to_string())
}

/// In-memory message table: `locale -> key -> message`.
///
/// A lookup in `fr-CA` that misses falls back to `fr`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    locales: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a catalog from a JSON object of objects:
    /// `{"fr": {"Wrong format": "Format incorrect"}}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        if let Some((locale, _)) = catalog.locales.iter().find(|(l, _)| l.trim().is_empty()) {
            return Err(ConfigError::InvalidCatalog(format!(
                "locale name must not be blank, got {locale:?}"
            )));
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, locale: &str, key: &str, message: &str) {
        self.locales
            .entry(locale.to_string())
            .or_default()
            .insert(key.to_string(), message.to_string());
    }

    /// Locales present in the catalog, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    fn lookup(&self, key: &str, locale: &str) -> Option<&str> {
        self.locales
            .get(locale)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str, locale: &str) -> Option<String> {
        self.lookup(key, locale)
            .or_else(|| {
                let (language, _) = locale.split_once(['-', '_'])?;
                self.lookup(key, language)
            })
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untranslated_falls_back_to_key() {
        assert_eq!(localize(&Untranslated, "Wrong format", "de"), "Wrong format");
    }

    #[test]
    fn closures_are_translators() {
        let upper = |key: &str, _locale: &str| Some(key.to_uppercase());
        assert_eq!(localize(&upper, "hex", "en"), "HEX");
    }

    #[test]
    fn catalog_resolves_exact_then_language() {
        let mut catalog = Catalog::new();
        catalog.insert("fr", "Wrong format", "Format incorrect");
        catalog.insert("fr-CA", "A", "Alpha (CA)");
        assert_eq!(catalog.translate("A", "fr-CA").as_deref(), Some("Alpha (CA)"));
        assert_eq!(
            catalog.translate("Wrong format", "fr_CA").as_deref(),
            Some("Format incorrect")
        );
        assert_eq!(catalog.translate("Wrong format", "de"), None);
    }

    #[test]
    fn catalog_reads_json() {
        let catalog = Catalog::from_json(r#"{"es": {"R": "Rojo"}, "de": {}}"#).unwrap();
        assert_eq!(catalog.locales(), vec!["de", "es"]);
        assert_eq!(localize(&catalog, "R", "es"), "Rojo");
        assert_eq!(localize(&catalog, "G", "es"), "G");
    }

    #[test]
    fn catalog_rejects_malformed_json() {
        assert!(matches!(
            Catalog::from_json(r#"{"es": ["R"]}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            Catalog::from_json(r#"{" ": {}}"#),
            Err(ConfigError::InvalidCatalog(_))
        ));
    }
}
