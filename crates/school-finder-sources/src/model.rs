//! Data model shared by the service clients and the extraction pipeline.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Half-width of the search area around a geocoded point, in degrees (roughly 15 km).
pub const BBOX_MARGIN_DEGREES: f64 = 0.15;

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Axis-aligned search rectangle, stored as `(min_lon, min_lat, max_lon, max_lat)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Symmetric box of `margin` degrees around `center`.
    pub fn around(center: Coordinate, margin: f64) -> Self {
        Self {
            min_lon: center.longitude - margin,
            min_lat: center.latitude - margin,
            max_lon: center.longitude + margin,
            max_lat: center.latitude + margin,
        }
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }

    /// Overpass bbox filter order: `south,west,north,east`.
    pub fn to_overpass(&self) -> String {
        format!(
            "{:.6},{:.6},{:.6},{:.6}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

/// Result of geocoding the user's city text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityInfo {
    pub coordinate: Coordinate,
    pub bounding_box: BoundingBox,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// One tagged element from an Overpass `out center tags` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl RawElement {
    /// Build a node element from tag pairs. Mostly useful in tests and fixtures.
    pub fn node<'a>(id: i64, tags: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            kind: ElementKind::Node,
            id,
            lat: None,
            lon: None,
            center: None,
            tags: tags
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Node position, or the center Overpass computed for ways and relations.
    pub fn position(&self) -> Option<Coordinate> {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some(Coordinate::new(lat, lon)),
            (_, _, Some(c)) => Some(Coordinate::new(c.lat, c.lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SchoolType {
    Public,
    Private,
    #[default]
    Unknown,
}

impl SchoolType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SchoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSchoolTypeError(pub String);

impl fmt::Display for ParseSchoolTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown school type '{}'", self.0)
    }
}

impl std::error::Error for ParseSchoolTypeError {}

impl FromStr for SchoolType {
    type Err = ParseSchoolTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParseSchoolTypeError(s.to_owned())),
        }
    }
}

/// A classified school, the unit of every result set.
///
/// Records are never mutated once built. Within a result set they are unique by
/// [`SchoolRecord::dedup_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub name: String,
    pub website: String,
    #[serde(rename = "type")]
    pub school_type: SchoolType,
    pub contact: String,
}

impl SchoolRecord {
    pub fn new(
        name: impl Into<String>,
        website: impl Into<String>,
        school_type: SchoolType,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            website: website.into(),
            school_type,
            contact: contact.into(),
        }
    }

    pub fn dedup_key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_margin_is_symmetric() {
        let bbox = BoundingBox::around(Coordinate::new(59.91, 10.75), BBOX_MARGIN_DEGREES);
        assert!(bbox.min_lon < bbox.max_lon);
        assert!(bbox.min_lat < bbox.max_lat);
        assert!((bbox.max_lat - bbox.min_lat - 0.3).abs() < 1e-9);
        assert!(bbox.contains(&Coordinate::new(59.91, 10.75)));
        assert!(!bbox.contains(&Coordinate::new(60.2, 10.75)));
    }

    #[test]
    fn test_overpass_bbox_order() {
        let bbox = BoundingBox {
            min_lon: 10.0,
            min_lat: 59.0,
            max_lon: 11.0,
            max_lat: 60.0,
        };
        assert_eq!(bbox.to_overpass(), "59.000000,10.000000,60.000000,11.000000");
    }

    #[test]
    fn test_element_deserialization() {
        let json = r#"{
            "type": "way",
            "id": 42,
            "center": {"lat": 59.9, "lon": 10.7},
            "tags": {"amenity": "school", "name": "Majorstuen skole"}
        }"#;
        let element: RawElement = serde_json::from_str(json).unwrap();
        assert_eq!(element.kind, ElementKind::Way);
        assert_eq!(element.tag("name"), Some("Majorstuen skole"));
        assert_eq!(element.position(), Some(Coordinate::new(59.9, 10.7)));
    }

    #[test]
    fn test_element_without_tags() {
        let element: RawElement =
            serde_json::from_str(r#"{"type":"node","id":1,"lat":1.0,"lon":2.0}"#).unwrap();
        assert!(element.tags.is_empty());
        assert_eq!(element.position(), Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn test_school_type_parsing() {
        assert_eq!("PUBLIC".parse::<SchoolType>(), Ok(SchoolType::Public));
        assert_eq!(" private ".parse::<SchoolType>(), Ok(SchoolType::Private));
        assert!("all".parse::<SchoolType>().is_err());
        assert_eq!(SchoolType::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_dedup_key_is_lowercase_name() {
        let record = SchoolRecord::new("OSLO Primary", "", SchoolType::Unknown, "");
        assert_eq!(record.dedup_key(), "oslo primary");
    }
}
