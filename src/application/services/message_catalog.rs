//! Localized message catalog.
//!
//! Bundles arrive as `(entry, object)` pairs. An entry named
//! `<namespace>.<locale>` is stored under `messages[locale][namespace]`;
//! an entry without a dot names a locale and is merged into it key by key.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

/// Locale selected when none is configured.
pub const DEFAULT_LOCALE: &str = "uk_UA";
/// Locale consulted when a key is missing from the current one.
pub const FALLBACK_LOCALE: &str = "en";

/// Merged messages per locale plus the active locale.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: BTreeMap<String, Map<String, Value>>,
    locale: String,
    fallback: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageCatalog {
    /// Creates an empty catalog on the default locale.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: BTreeMap::new(),
            locale: DEFAULT_LOCALE.to_string(),
            fallback: FALLBACK_LOCALE.to_string(),
        }
    }

    /// Builds a catalog from bundle entries, in order.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let mut catalog = Self::new();
        for (entry, bundle) in entries {
            catalog.add_bundle(entry.as_ref(), bundle);
        }
        catalog
    }

    /// Merges one bundle entry.
    ///
    /// Non-object bundles are only accepted for namespaced entries, where
    /// they are stored as-is.
    pub fn add_bundle(&mut self, entry: &str, bundle: Value) {
        let mut parts = entry.split('.');
        let head = parts.next().unwrap_or_default();

        match parts.next().filter(|locale| !locale.is_empty()) {
            Some(locale) => {
                debug!(locale, namespace = head, "Registering namespaced bundle");
                self.messages
                    .entry(locale.to_string())
                    .or_default()
                    .insert(head.to_string(), bundle);
            }
            None => {
                debug!(locale = entry, "Merging locale bundle");
                let target = self.messages.entry(entry.to_string()).or_default();
                if let Value::Object(map) = bundle {
                    target.extend(map);
                }
            }
        }
    }

    /// Merges every locale of `other` into this catalog, key by key.
    pub fn merge(&mut self, other: Self) {
        for (locale, map) in other.messages {
            self.messages.entry(locale).or_default().extend(map);
        }
    }

    /// Switches the active locale if it has messages.
    ///
    /// Returns whether the locale changed.
    pub fn set_locale(&mut self, locale: &str) -> bool {
        if self.messages.contains_key(locale) {
            self.locale = locale.to_string();
            true
        } else {
            false
        }
    }

    /// Active locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Locales that have messages, sorted.
    #[must_use]
    pub fn available_locales(&self) -> Vec<&str> {
        self.messages.keys().map(String::as_str).collect()
    }

    /// Returns the merged messages of one locale.
    #[must_use]
    pub fn messages(&self, locale: &str) -> Option<&Map<String, Value>> {
        self.messages.get(locale)
    }

    /// Resolves a dotted key, falling back to the fallback locale and then
    /// to the key itself.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.lookup(&self.locale, key)
            .or_else(|| self.lookup(&self.fallback, key))
            .unwrap_or_else(|| key.to_string())
    }

    /// Like [`MessageCatalog::t`], replacing `{name}` placeholders.
    #[must_use]
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.t(key), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<String> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut node = self.messages.get(locale)?.get(first)?;
        for segment in segments {
            node = node.get(segment)?;
        }
        match node {
            Value::String(text) => Some(text.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_namespaced_entry_nests_under_locale() {
        let catalog = MessageCatalog::from_entries([
            ("auth.uk_UA", json!({"login": "Увійти"})),
            ("auth.en", json!({"login": "Sign in"})),
        ]);

        assert_eq!(catalog.t("auth.login"), "Увійти");
        assert_eq!(
            catalog.messages("en").and_then(|m| m.get("auth")),
            Some(&json!({"login": "Sign in"}))
        );
    }

    #[test]
    fn test_plain_entry_merges_shallowly() {
        let catalog = MessageCatalog::from_entries([
            ("en", json!({"a": "1", "b": "2"})),
            ("en", json!({"b": "3", "c": "4"})),
        ]);

        let en = catalog.messages("en").unwrap();
        assert_eq!(en.get("a"), Some(&json!("1")));
        assert_eq!(en.get("b"), Some(&json!("3")));
        assert_eq!(en.get("c"), Some(&json!("4")));
    }

    #[test]
    fn test_namespaced_entry_replaces_previous_namespace() {
        let catalog = MessageCatalog::from_entries([
            ("auth.en", json!({"login": "Sign in", "logout": "Sign out"})),
            ("auth.en", json!({"login": "Log in"})),
        ]);

        assert_eq!(
            catalog.messages("en").and_then(|m| m.get("auth")),
            Some(&json!({"login": "Log in"}))
        );
    }

    #[test]
    fn test_locale_is_second_segment() {
        let catalog = MessageCatalog::from_entries([("forms.en.extra", json!({"x": "y"}))]);
        assert_eq!(catalog.available_locales(), vec!["en"]);
    }

    #[test]
    fn test_default_locale_and_fallback() {
        let mut catalog = MessageCatalog::from_entries([
            ("uk_UA", json!({"hello": "Привіт"})),
            ("en", json!({"hello": "Hello", "only_en": "English"})),
        ]);

        assert_eq!(catalog.locale(), DEFAULT_LOCALE);
        assert_eq!(catalog.t("hello"), "Привіт");
        assert_eq!(catalog.t("only_en"), "English");
        assert_eq!(catalog.t("missing.key"), "missing.key");

        assert!(catalog.set_locale("en"));
        assert_eq!(catalog.t("hello"), "Hello");
        assert!(!catalog.set_locale("de"));
        assert_eq!(catalog.locale(), "en");
    }

    #[test]
    fn test_placeholder_substitution() {
        let catalog = MessageCatalog::from_entries([(
            "cli.uk_UA",
            json!({"deleted": "Запис {id} видалено з проєкту {project}"}),
        )]);

        assert_eq!(
            catalog.t_with("cli.deleted", &[("id", "7"), ("project", "p1")]),
            "Запис 7 видалено з проєкту p1"
        );
    }

    #[test]
    fn test_merge_overrides_keys() {
        let mut base = MessageCatalog::from_entries([("en", json!({"a": "1", "b": "2"}))]);
        base.merge(MessageCatalog::from_entries([("en", json!({"b": "override"}))]));

        assert_eq!(base.messages("en").and_then(|m| m.get("b")), Some(&json!("override")));
        assert_eq!(base.messages("en").and_then(|m| m.get("a")), Some(&json!("1")));
    }
}
