//! Type and name filtering over a result set.
//!
//! Filtering is pure and holds no state, so it can be re-run on every keystroke.

use std::{fmt, str::FromStr};

use school_finder_sources::{SchoolRecord, SchoolType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Public,
    Private,
    Unknown,
}

impl TypeFilter {
    pub fn matches(self, school_type: SchoolType) -> bool {
        match self {
            Self::All => true,
            Self::Public => school_type == SchoolType::Public,
            Self::Private => school_type == SchoolType::Private,
            Self::Unknown => school_type == SchoolType::Unknown,
        }
    }
}

impl From<SchoolType> for TypeFilter {
    fn from(school_type: SchoolType) -> Self {
        match school_type {
            SchoolType::Public => Self::Public,
            SchoolType::Private => Self::Private,
            SchoolType::Unknown => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTypeFilterError(pub String);

impl fmt::Display for ParseTypeFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type filter '{}'", self.0)
    }
}

impl std::error::Error for ParseTypeFilterError {}

impl FromStr for TypeFilter {
    type Err = ParseTypeFilterError;

    /// Accepts the select values of the type dropdown, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<SchoolType>()
            .map(Self::from)
            .map_err(|_| ParseTypeFilterError(s.to_owned()))
    }
}

/// What the user currently wants to see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub type_filter: TypeFilter,
    pub name_query: String,
}

impl FilterCriteria {
    pub fn new(type_filter: TypeFilter, name_query: impl Into<String>) -> Self {
        Self {
            type_filter,
            name_query: name_query.into(),
        }
    }

    pub fn with_type(mut self, type_filter: TypeFilter) -> Self {
        self.type_filter = type_filter;
        self
    }

    pub fn with_name(mut self, name_query: impl Into<String>) -> Self {
        self.name_query = name_query.into();
        self
    }

    pub fn matches(&self, record: &SchoolRecord) -> bool {
        self.type_filter.matches(record.school_type)
            && (self.name_query.is_empty()
                || record
                    .name
                    .to_lowercase()
                    .contains(&self.name_query.to_lowercase()))
    }
}

/// The visible subset of `records`, in input order.
pub fn apply(records: &[SchoolRecord], criteria: &FilterCriteria) -> Vec<SchoolRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// Number of records `apply` would return.
pub fn count(records: &[SchoolRecord], criteria: &FilterCriteria) -> usize {
    records.iter().filter(|record| criteria.matches(record)).count()
}

/// Per-type tallies for legend badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeSummary {
    pub public: usize,
    pub private: usize,
    pub unknown: usize,
}

impl TypeSummary {
    pub fn of(records: &[SchoolRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            match record.school_type {
                SchoolType::Public => summary.public += 1,
                SchoolType::Private => summary.private += 1,
                SchoolType::Unknown => summary.unknown += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.public + self.private + self.unknown
    }
}
