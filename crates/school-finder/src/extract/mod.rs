//! Turning raw Overpass elements into [`SchoolRecord`]s.
//!
//! Each element goes through three independent decisions: whether it is a primary school at
//! all, how it is classified ([`classify::detect_type`]) and who to contact
//! ([`contact::extract_contact`]). Elements that fail the inclusion filter come back as a
//! [`Rejection`]; malformed tag sets are never an error.

pub mod classify;
pub mod contact;

use std::{collections::BTreeMap, fmt};

use school_finder_sources::{RawElement, SchoolRecord};
use tracing::debug;

pub use classify::detect_type;
pub use contact::extract_contact;

use crate::keywords::{
    HIGHER_EDUCATION_KEYWORDS, NON_PRIMARY_LEVEL_VALUES, find_in, primary_school_keywords,
};

pub const UNNAMED_SCHOOL: &str = "Unnamed School";

const NAME_KEYS: [&str; 3] = ["name", "name:en", "official_name"];
const WEBSITE_KEYS: [&str; 3] = ["website", "contact:website", "url"];

/// Why an element did not become a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No school category tag and no primary-school keyword in the display name.
    NotASchool,
    /// The display name contains a secondary/higher education term.
    HigherEducation { keyword: &'static str },
    /// Level tags place the school outside primary education.
    NotPrimaryLevel { tag: &'static str, value: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotASchool => write!(f, "not tagged or named as a school"),
            Self::HigherEducation { keyword } => write!(f, "higher education term '{keyword}'"),
            Self::NotPrimaryLevel { tag, value } => write!(f, "{tag}={value} is not primary level"),
        }
    }
}

pub fn extract(element: &RawElement) -> Result<SchoolRecord, Rejection> {
    let result = extract_tags(&element.tags);
    if let Err(reason) = &result {
        debug!(id = element.id, kind = ?element.kind, %reason, "Element rejected");
    }
    result
}

pub fn extract_tags(tags: &BTreeMap<String, String>) -> Result<SchoolRecord, Rejection> {
    check_inclusion(tags)?;
    Ok(SchoolRecord::new(
        display_name(tags),
        website(tags),
        detect_type(tags),
        extract_contact(tags),
    ))
}

/// The client-side re-check of the Overpass filters, plus primary-level exclusions.
///
/// Keyword checks run on the same name the record would be shown under, so `name:en` and
/// `official_name` count when `name` is missing.
pub fn check_inclusion(tags: &BTreeMap<String, String>) -> Result<(), Rejection> {
    let name = first_value(tags, &NAME_KEYS)
        .map(|n| n.to_lowercase())
        .unwrap_or_default();

    if !has_school_category(tags) && !matches_primary_keyword(&name) {
        return Err(Rejection::NotASchool);
    }
    if let Some(keyword) = find_in(&name, HIGHER_EDUCATION_KEYWORDS) {
        return Err(Rejection::HigherEducation { keyword });
    }
    if let Some((tag, value)) = non_primary_level(tags) {
        return Err(Rejection::NotPrimaryLevel { tag, value });
    }
    Ok(())
}

pub fn has_school_category(tags: &BTreeMap<String, String>) -> bool {
    tags.get("amenity").is_some_and(|v| v == "school")
        || tags.get("building").is_some_and(|v| v == "school")
        || tags.contains_key("education")
        || tags.contains_key("school")
}

/// `name` must already be lower-case.
pub fn matches_primary_keyword(name: &str) -> bool {
    !name.is_empty() && primary_school_keywords().any(|k| name.contains(k))
}

fn non_primary_level(tags: &BTreeMap<String, String>) -> Option<(&'static str, String)> {
    for tag in ["school", "education"] {
        if let Some(value) = tags.get(tag) {
            let value = value.trim().to_lowercase();
            if value.split(';').any(|v| NON_PRIMARY_LEVEL_VALUES.contains(&v.trim())) {
                return Some((tag, value));
            }
        }
    }
    match (classify::lowest_isced_level(tags), tags.get("isced:level")) {
        (Some(level), Some(value)) if level >= 2 => Some(("isced:level", value.clone())),
        _ => None,
    }
}

fn first_value(tags: &BTreeMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| tags.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_owned)
}

pub fn display_name(tags: &BTreeMap<String, String>) -> String {
    first_value(tags, &NAME_KEYS).unwrap_or_else(|| UNNAMED_SCHOOL.to_owned())
}

pub fn website(tags: &BTreeMap<String, String>) -> String {
    first_value(tags, &WEBSITE_KEYS).unwrap_or_default()
}
