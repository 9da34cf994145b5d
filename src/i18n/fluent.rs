// SPDX-License-Identifier: MPL-2.0
//! Fluent bundles and locale resolution.

use crate::app::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const DEFAULT_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, None, &Config::default())
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish_non_exhaustive()
    }
}

impl I18n {
    /// Loads the embedded translations, then any `<locale>.ftl` files found
    /// in `i18n_dir`, which replace embedded ones of the same locale.
    #[must_use]
    pub fn new(cli_lang: Option<String>, i18n_dir: Option<&Path>, config: &Config) -> Self {
        let mut sources: Vec<(LanguageIdentifier, String)> = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale) = locale_from_filename(filename) else {
                continue;
            };
            if let Some(content) = Asset::get(filename) {
                sources.push((locale, String::from_utf8_lossy(content.data.as_ref()).into_owned()));
            }
        }

        if let Some(dir) = i18n_dir {
            sources.extend(read_external(dir));
        }

        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();
        for (locale, source) in sources {
            let Some(bundle) = build_bundle(&locale, source) else {
                continue;
            };
            if !available_locales.contains(&locale) {
                available_locales.push(locale.clone());
            }
            bundles.insert(locale, bundle);
        }
        available_locales.sort_by_key(ToString::to_string);

        let current_locale = resolve_locale(cli_lang, config, &available_locales)
            .unwrap_or_else(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    #[must_use]
    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Translates `key`, substituting `{ $name }` placeholders from `args`.
    #[must_use]
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, *value);
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(pattern, args, &mut errors);
                if errors.is_empty() {
                    return value.into_owned();
                }
            }
        }
        format!("MISSING: {key}")
    }
}

fn default_locale() -> LanguageIdentifier {
    LanguageIdentifier::from_bytes(DEFAULT_LOCALE.as_bytes()).unwrap_or_default()
}

fn locale_from_filename(filename: &str) -> Option<LanguageIdentifier> {
    filename
        .strip_suffix(".ftl")
        .and_then(|stem| stem.parse::<LanguageIdentifier>().ok())
}

fn read_external(dir: &Path) -> Vec<(LanguageIdentifier, String)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = ?dir, error = %err, "cannot read translation directory");
            return Vec::new();
        }
    };

    let mut sources = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(locale) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(locale_from_filename)
        else {
            continue;
        };
        match fs::read_to_string(&path) {
            Ok(content) => sources.push((locale, content)),
            Err(err) => warn!(path = ?path, error = %err, "cannot read translation file"),
        }
    }
    sources
}

fn build_bundle(locale: &LanguageIdentifier, source: String) -> Option<FluentBundle<FluentResource>> {
    let resource = match FluentResource::try_new(source) {
        Ok(resource) => resource,
        Err((_, errors)) => {
            warn!(%locale, errors = errors.len(), "skipping unparsable FTL file");
            return None;
        }
    };
    let mut bundle = FluentBundle::new(vec![locale.clone()]);
    // Placeables are not wrapped in bidi isolation marks.
    bundle.set_use_isolating(false);
    if let Err(errors) = bundle.add_resource(resource) {
        warn!(%locale, errors = errors.len(), "duplicate messages in FTL file");
    }
    Some(bundle)
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    let candidates = [
        cli_lang,
        config.general.language.clone(),
        sys_locale::get_locale(),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(|raw| raw.parse::<LanguageIdentifier>().ok())
        .find_map(|lang| match_available(&lang, available))
}

/// Exact match first, then the first available locale with the same
/// language (so `fr-CA` picks `fr`).
fn match_available(
    lang: &LanguageIdentifier,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    if available.contains(lang) {
        return Some(lang.clone());
    }
    available
        .iter()
        .find(|candidate| candidate.language == lang.language)
        .cloned()
}
