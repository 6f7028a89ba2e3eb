// crates/report-page-cli/src/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Unit tests for catalog parity and locale parsing.
// Purpose: Keep the CLI catalogs consistent across supported locales.
// Dependencies: report-page-cli i18n module
// ============================================================================

//! ## Overview
//! Verifies the message catalogs share one key set, templates use well-formed
//! placeholders, and every locale keeps English's placeholder names.

use std::collections::BTreeSet;

use crate::i18n::Locale;
use crate::i18n::MessageArg;
use crate::i18n::SUPPORTED_LOCALES;
use crate::i18n::catalog_entries_for;
use crate::i18n::catalog_for;
use crate::i18n::translate;

/// Extracts `{name}` placeholders, rejecting malformed braces.
fn placeholder_names(template: &str) -> Result<BTreeSet<String>, String> {
    let mut names = BTreeSet::new();
    let mut rest = template;
    while let Some(open) = rest.find(['{', '}']) {
        if rest[open ..].starts_with('}') {
            return Err(format!("unmatched '}}' in {template:?}"));
        }
        let after = &rest[open + 1 ..];
        let close = after.find('}').ok_or_else(|| format!("unclosed '{{' in {template:?}"))?;
        let name = &after[.. close];
        if name.is_empty()
            || !name.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        {
            return Err(format!("bad placeholder {name:?} in {template:?}"));
        }
        names.insert(name.to_string());
        rest = &after[close + 1 ..];
    }
    Ok(names)
}

#[test]
fn catalogs_have_matching_keys() {
    let en_keys: BTreeSet<&str> = catalog_for(Locale::En).keys().copied().collect();
    for locale in SUPPORTED_LOCALES {
        let keys: BTreeSet<&str> = catalog_for(*locale).keys().copied().collect();
        assert_eq!(en_keys, keys, "catalog keys diverge for {locale:?}");
    }
}

#[test]
fn catalogs_have_unique_keys_per_locale() {
    for locale in SUPPORTED_LOCALES {
        let entries = catalog_entries_for(*locale);
        let distinct: BTreeSet<&str> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(distinct.len(), entries.len(), "duplicate catalog keys for {locale:?}");
    }
}

#[test]
fn placeholders_match_english() {
    for (key, english) in catalog_entries_for(Locale::En) {
        let expected = placeholder_names(english).unwrap();
        for locale in SUPPORTED_LOCALES {
            let template = catalog_for(*locale).get(key).copied().unwrap();
            assert_eq!(
                placeholder_names(template).unwrap(),
                expected,
                "placeholder mismatch for {key} in {locale:?}"
            );
        }
    }
}

#[test]
fn catalan_differs_for_sentences() {
    for key in ["config.validate.ok", "validate.valid", "i18n.disclaimer.machine_translated"] {
        assert_ne!(catalog_for(Locale::En).get(key), catalog_for(Locale::Ca).get(key), "{key}");
    }
}

#[test]
fn locale_parse_accepts_region_tags_and_case() {
    assert_eq!(Locale::parse("en"), Some(Locale::En));
    assert_eq!(Locale::parse("EN-us"), Some(Locale::En));
    assert_eq!(Locale::parse("ca_ES"), Some(Locale::Ca));
    assert_eq!(Locale::parse(" ca "), Some(Locale::Ca));
    assert_eq!(Locale::parse(""), None);
    assert_eq!(Locale::parse("fr"), None);
    assert_eq!(Locale::Ca.as_str(), "ca");
}

#[test]
fn translate_substitutes_and_falls_back() {
    let rendered = translate(
        "input.read_too_large",
        vec![
            MessageArg::new("path", "page.json"),
            MessageArg::new("size", "9000"),
            MessageArg::new("limit", "1024"),
        ],
    );
    assert_eq!(rendered, "Refusing to read page.json because it is 9000 bytes (limit 1024).");
    assert_eq!(translate("no.such.key", Vec::new()), "no.such.key");
}
