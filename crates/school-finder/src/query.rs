//! Overpass QL construction.
//!
//! The query unions two strategies over the search box: category tags (`amenity=school`,
//! `building=school`, any `education` or `school` tag) and a case-insensitive name regex built
//! from [`crate::keywords::PRIMARY_SCHOOL_KEYWORDS`]. Each is applied to nodes, ways and
//! relations, and the output mode returns one center point plus tags per element.

use itertools::Itertools;
use school_finder_sources::BoundingBox;

use crate::keywords::primary_school_keywords;

pub const DEFAULT_OVERPASS_TIMEOUT_SECS: u32 = 60;

const ELEMENT_KINDS: [&str; 3] = ["node", "way", "relation"];

/// Tag filters that mark an element as a school regardless of its name.
pub const CATEGORY_FILTERS: [&str; 4] = [
    r#"["amenity"="school"]"#,
    r#"["building"="school"]"#,
    r#"["education"]"#,
    r#"["school"]"#,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryBuilder {
    timeout_secs: u32,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_OVERPASS_TIMEOUT_SECS)
    }
}

impl QueryBuilder {
    pub fn new(timeout_secs: u32) -> Self {
        Self { timeout_secs }
    }

    pub fn timeout_secs(&self) -> u32 {
        self.timeout_secs
    }

    /// Build the query for `bbox`. Pure: equal boxes give byte-identical text.
    pub fn build(&self, bbox: &BoundingBox) -> String {
        let bbox_filter = bbox.to_overpass();
        let area = bbox_filter.as_str();
        let name_filter = format!(r#"["name"~"{}",i]"#, name_pattern());

        let statements = CATEGORY_FILTERS
            .iter()
            .copied()
            .chain(std::iter::once(name_filter.as_str()))
            .flat_map(|filter| {
                ELEMENT_KINDS
                    .iter()
                    .map(move |kind| format!("  {kind}{filter}({area});"))
            })
            .join("\n");

        format!(
            "[out:json][timeout:{}];\n(\n{statements}\n);\nout center tags qt;\n",
            self.timeout_secs
        )
    }
}

/// Alternation of every primary-school keyword, in table order.
pub fn name_pattern() -> String {
    primary_school_keywords().join("|")
}
