//! Best-effort principal / contact extraction.
//!
//! Rules are tried in order and the first hit wins:
//! 1. a contact-person tag holding a name (not a URL, e-mail or phone number)
//! 2. a structured e-mail tag
//! 3. an e-mail address inside a description or note
//! 4. the first description clause mentioning the principal

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::keywords::{
    CONTACT_PERSON_KEYS, DESCRIPTION_KEYS, EMAIL_KEYS, PRINCIPAL_KEYWORDS, find_in,
};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s().\-/]{6,}$").expect("valid phone regex"));

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(https?://|www\.)").expect("valid url regex"));

static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?;\n。！？]+").expect("valid sentence regex"));

pub fn extract_contact(tags: &BTreeMap<String, String>) -> String {
    person_from_tags(tags)
        .or_else(|| email_from_tags(tags))
        .or_else(|| email_from_description(tags))
        .or_else(|| principal_clause(tags))
        .unwrap_or_default()
}

fn non_empty<'a>(
    tags: &'a BTreeMap<String, String>,
    keys: &'a [&str],
) -> impl Iterator<Item = &'a str> {
    keys.iter()
        .filter_map(|key| tags.get(*key))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

pub fn looks_like_url(value: &str) -> bool {
    URL_RE.is_match(value)
}

pub fn looks_like_email(value: &str) -> bool {
    value.contains('@')
}

pub fn looks_like_phone(value: &str) -> bool {
    PHONE_RE.is_match(value) && value.chars().filter(char::is_ascii_digit).count() >= 6
}

fn person_from_tags(tags: &BTreeMap<String, String>) -> Option<String> {
    non_empty(tags, CONTACT_PERSON_KEYS)
        .find(|v| !looks_like_url(v) && !looks_like_email(v) && !looks_like_phone(v))
        .map(str::to_owned)
}

fn email_from_tags(tags: &BTreeMap<String, String>) -> Option<String> {
    non_empty(tags, EMAIL_KEYS)
        .find(|v| v.contains('@') && v.contains('.'))
        .map(str::to_owned)
}

fn email_from_description(tags: &BTreeMap<String, String>) -> Option<String> {
    non_empty(tags, DESCRIPTION_KEYS)
        .find_map(|text| EMAIL_RE.find(text))
        .map(|m| m.as_str().to_owned())
}

fn principal_clause(tags: &BTreeMap<String, String>) -> Option<String> {
    non_empty(tags, DESCRIPTION_KEYS)
        .flat_map(|text| SENTENCE_SPLIT_RE.split(text))
        .map(str::trim)
        .find(|clause| find_in(&clause.to_lowercase(), PRINCIPAL_KEYWORDS).is_some())
        .map(str::to_owned)
}
