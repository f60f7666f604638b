use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use feedback_spec::{MessageCatalog, ResolvedI18nMap};
use thiserror::Error;
use tracing::debug;
use unic_langid::LanguageIdentifier;

const SUPPORTED_LOCALES: &[&str] = &["en", "nl"];

const EN_CATALOG: &str = include_str!("../../i18n/en.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("embedded i18n/en.json is malformed: {0}")]
    Embedded(#[source] serde_json::Error),
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn detect_env_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|key| env::var(key).ok())
        .map(|val| val.trim().to_string())
        .find(|val| !val.is_empty())
}

/// Normalizes POSIX style locale names (`nl_BE.UTF-8@euro`) into BCP 47 tags.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let mut cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }
    if let Some((head, _)) = cleaned.split_once('.') {
        cleaned = head;
    }
    if let Some((head, _)) = cleaned.split_once('@') {
        cleaned = head;
    }
    cleaned
        .replace('_', "-")
        .parse::<LanguageIdentifier>()
        .ok()
        .map(|lid| lid.to_string())
}

pub fn resolve_supported_locale(candidate: &str) -> Option<String> {
    let norm = normalize_locale(candidate)?;
    if SUPPORTED_LOCALES.contains(&norm.as_str()) {
        return Some(norm);
    }
    let base = norm.split('-').next()?.to_ascii_lowercase();
    SUPPORTED_LOCALES
        .contains(&base.as_str())
        .then_some(base)
}

/// Picks the first supported locale among the flag, the environment and the system setting.
pub fn select_locale(cli_locale: Option<&str>) -> String {
    cli_locale
        .and_then(resolve_supported_locale)
        .or_else(|| detect_env_locale().as_deref().and_then(resolve_supported_locale))
        .or_else(|| sys_locale::get_locale().as_deref().and_then(resolve_supported_locale))
        .unwrap_or_else(|| "en".to_string())
}

fn catalog_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("i18n")
}

fn load_messages(locale: &str, dir: &Path) -> Result<ResolvedI18nMap, CatalogError> {
    let mut messages: BTreeMap<String, String> =
        serde_json::from_str(EN_CATALOG).map_err(CatalogError::Embedded)?;
    if locale == "en" {
        return Ok(messages);
    }

    let path = dir.join(format!("{locale}.json"));
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(locale, path = %path.display(), "no catalog for locale, using English");
            return Ok(messages);
        }
        Err(source) => return Err(CatalogError::Read { path, source }),
    };
    let overrides: BTreeMap<String, String> =
        serde_json::from_str(&raw).map_err(|source| CatalogError::Parse { path, source })?;
    messages.extend(overrides);
    Ok(messages)
}

/// English messages layered with the catalog of `locale`, when one ships with the binary.
pub fn catalog(locale: &str) -> Result<MessageCatalog, CatalogError> {
    catalog_from_dir(locale, &catalog_dir())
}

pub fn catalog_from_dir(locale: &str, dir: &Path) -> Result<MessageCatalog, CatalogError> {
    let messages = load_messages(locale, dir)?;
    Ok(MessageCatalog::new(messages)
        .with_locale(locale)
        .with_default_locale("en"))
}
