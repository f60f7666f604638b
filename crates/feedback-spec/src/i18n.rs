use std::collections::BTreeMap;

/// Label of the synthetic "nothing chosen" radio option.
pub const NOT_SELECTED_KEY: &str = "mod_feedback.not_selected";
/// `time` format description used to display response timestamps.
pub const FULL_DATE_KEY: &str = "core.dffulldate";
/// Name of the pseudo-group listing every participant.
pub const ALL_PARTICIPANTS_KEY: &str = "core.allparticipants";

const DEFAULT_FULL_DATE: &str =
    "[weekday repr:long], [day padding:none] [month repr:long] [year], [hour repr:12 padding:none]:[minute] [period case:upper]";

/// Translation lookup injected into parsing and orchestration.
pub trait Localizer: Send + Sync {
    /// Returns the localized text for `key`, or `None` when the key is unknown.
    fn text(&self, key: &str) -> Option<String>;
}

/// Resolves `key`, falling back to the built-in English text and then the key itself.
pub fn localized(localizer: &dyn Localizer, key: &str) -> String {
    localizer
        .text(key)
        .or_else(|| default_text(key).map(str::to_string))
        .unwrap_or_else(|| key.to_string())
}

fn default_text(key: &str) -> Option<&'static str> {
    match key {
        NOT_SELECTED_KEY => Some("Not selected"),
        FULL_DATE_KEY => Some(DEFAULT_FULL_DATE),
        ALL_PARTICIPANTS_KEY => Some("All participants"),
        _ => None,
    }
}

/// Localizer that only knows the built-in English texts.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLocalizer;

impl Localizer for DefaultLocalizer {
    fn text(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Pre-resolved i18n map injected by adapters/callers.
pub type ResolvedI18nMap = BTreeMap<String, String>;

impl Localizer for ResolvedI18nMap {
    fn text(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Message catalog with locale-qualified lookups.
///
/// Keys may be stored bare (`core.allparticipants`) or qualified by locale as
/// `nl:core.allparticipants` or `nl/core.allparticipants`. The requested locale wins over the
/// default locale, which wins over bare keys.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: ResolvedI18nMap,
    locale: Option<String>,
    default_locale: Option<String>,
}

impl MessageCatalog {
    pub fn new(messages: ResolvedI18nMap) -> Self {
        Self {
            messages,
            locale: None,
            default_locale: None,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Adds or overrides messages, typically a locale file layered over English.
    pub fn extend(&mut self, messages: ResolvedI18nMap) {
        self.messages.extend(messages);
    }
}

impl Localizer for MessageCatalog {
    fn text(&self, key: &str) -> Option<String> {
        resolve_by_locale(
            &self.messages,
            key,
            self.locale.as_deref(),
            self.default_locale.as_deref(),
        )
        .map(str::to_string)
    }
}

fn resolve_by_locale<'a>(
    resolved: &'a ResolvedI18nMap,
    key: &str,
    requested_locale: Option<&str>,
    default_locale: Option<&str>,
) -> Option<&'a str> {
    for locale in [requested_locale, default_locale].iter().flatten() {
        if let Some(value) = resolved.get(&format!("{}:{}", locale, key)) {
            return Some(value);
        }
        if let Some(value) = resolved.get(&format!("{}/{}", locale, key)) {
            return Some(value);
        }
    }
    resolved.get(key).map(String::as_str)
}
