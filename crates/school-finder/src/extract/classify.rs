//! Public / Private / Unknown classification from OSM tags.
//!
//! Precedence, first match wins:
//! 1. structured operator/ownership tag with an exact public value
//! 2. the same tags with an exact private value
//! 3. private hint in name, operator or ownership
//! 4. public hint in name, operator or ownership
//! 5. lowest education tier tag
//! 6. unknown

use std::collections::BTreeMap;

use school_finder_sources::SchoolType;

use crate::keywords::{
    LOWEST_TIER_VALUES, PRIVATE_HINTS, PRIVATE_TAG_VALUES, PUBLIC_HINTS, PUBLIC_TAG_VALUES, find_in,
};

/// Tags whose whole value states who runs the school.
pub const OWNERSHIP_KEYS: [&str; 5] = [
    "operator",
    "operator:type",
    "ownership",
    "school:type",
    "school:ownership",
];

/// Tags searched for free-text hints.
const HINT_KEYS: [&str; 3] = ["name", "operator", "ownership"];

pub fn detect_type(tags: &BTreeMap<String, String>) -> SchoolType {
    if has_structured_value(tags, PUBLIC_TAG_VALUES) {
        return SchoolType::Public;
    }
    if has_structured_value(tags, PRIVATE_TAG_VALUES) {
        return SchoolType::Private;
    }

    let hint_text: Vec<String> = HINT_KEYS
        .iter()
        .filter_map(|key| tags.get(*key))
        .map(|value| value.to_lowercase())
        .collect();
    if hint_text.iter().any(|v| find_in(v, PRIVATE_HINTS).is_some()) {
        return SchoolType::Private;
    }
    if hint_text.iter().any(|v| find_in(v, PUBLIC_HINTS).is_some()) {
        return SchoolType::Public;
    }

    if is_lowest_tier(tags) {
        return SchoolType::Public;
    }
    SchoolType::Unknown
}

/// Any ownership tag (or any item of a `;`-separated list) exactly in `vocabulary`.
fn has_structured_value(tags: &BTreeMap<String, String>, vocabulary: &[&str]) -> bool {
    OWNERSHIP_KEYS
        .iter()
        .filter_map(|key| tags.get(*key))
        .flat_map(|value| value.split(';'))
        .map(|item| item.trim().to_lowercase())
        .any(|item| vocabulary.contains(&item.as_str()))
}

/// `isced:level` starting at 0 or 1, or `school=primary`.
pub fn is_lowest_tier(tags: &BTreeMap<String, String>) -> bool {
    let isced_primary = lowest_isced_level(tags).is_some_and(|level| level <= 1);
    let school_primary = tags
        .get("school")
        .is_some_and(|v| LOWEST_TIER_VALUES.contains(&v.trim().to_lowercase().as_str()));
    isced_primary || school_primary
}

/// Smallest level named by `isced:level`, which may be `1`, `1;2` or `0-2`.
pub fn lowest_isced_level(tags: &BTreeMap<String, String>) -> Option<u8> {
    tags.get("isced:level")?
        .split([';', ',', '-'])
        .filter_map(|part| part.trim().parse::<u8>().ok())
        .min()
}
