//! Delimited-text export of a (filtered) result set.
//!
//! Every field is wrapped in double quotes, rows are joined with `\n` and there is no
//! trailing newline:
//!
//! ```text
//! "School Name","Website","Type","Principal"
//! "Majorstuen skole","","Unknown",""
//! ```

use std::{fs, path::Path};

use itertools::Itertools;
use school_finder_sources::SchoolRecord;
use tracing::{info, instrument};

use crate::error::Result;

pub const CSV_HEADER: [&str; 4] = ["School Name", "Website", "Type", "Principal"];

/// How embedded double quotes in field values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvQuoting {
    /// Double embedded quotes (RFC 4180).
    #[default]
    Escaped,
    /// Write values untouched. Values containing `"` produce a file most readers reject.
    Verbatim,
}

impl CsvQuoting {
    fn field(self, value: &str) -> String {
        match self {
            Self::Escaped => format!("\"{}\"", value.replace('"', "\"\"")),
            Self::Verbatim => format!("\"{value}\""),
        }
    }

    fn row<'a>(self, fields: impl IntoIterator<Item = &'a str>) -> String {
        fields.into_iter().map(|value| self.field(value)).join(",")
    }
}

pub fn to_delimited_text(records: &[SchoolRecord]) -> String {
    to_delimited_text_with(records, CsvQuoting::default())
}

pub fn to_delimited_text_with(records: &[SchoolRecord], quoting: CsvQuoting) -> String {
    let header = quoting.row(CSV_HEADER);
    let rows = records.iter().map(|record| {
        quoting.row([
            record.name.as_str(),
            record.website.as_str(),
            record.school_type.as_str(),
            record.contact.as_str(),
        ])
    });
    std::iter::once(header).chain(rows).join("\n")
}

/// `<city>_schools.csv`, with every non-ASCII-alphanumeric character of `city` replaced by `_`.
pub fn export_filename(city: &str) -> String {
    let stem: String = city
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}_schools.csv")
}

#[instrument(skip_all, fields(path = %path.as_ref().display(), rows = records.len()))]
pub fn write_csv(
    path: impl AsRef<Path>,
    records: &[SchoolRecord],
    quoting: CsvQuoting,
) -> Result<()> {
    fs::write(path.as_ref(), to_delimited_text_with(records, quoting))?;
    info!("CSV export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use school_finder_sources::SchoolType;

    use super::*;

    #[test]
    fn test_single_record_layout() {
        let records = [SchoolRecord::new("Majorstuen skole", "", SchoolType::Unknown, "")];
        assert_eq!(
            to_delimited_text(&records),
            "\"School Name\",\"Website\",\"Type\",\"Principal\"\n\"Majorstuen skole\",\"\",\"Unknown\",\"\""
        );
    }

    #[test]
    fn test_empty_set_is_header_only() {
        assert_eq!(
            to_delimited_text(&[]),
            "\"School Name\",\"Website\",\"Type\",\"Principal\""
        );
    }

    #[test]
    fn test_rows_follow_input_order() {
        let records = [
            SchoolRecord::new("B", "https://b.example", SchoolType::Public, "Ola"),
            SchoolRecord::new("A", "", SchoolType::Private, "a@b.no"),
        ];
        let text = to_delimited_text(&records);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "\"B\",\"https://b.example\",\"Public\",\"Ola\"");
        assert_eq!(lines[2], "\"A\",\"\",\"Private\",\"a@b.no\"");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_embedded_quotes() {
        let records = [SchoolRecord::new("St. \"Mary\" School", "", SchoolType::Private, "")];
        let escaped = to_delimited_text_with(&records, CsvQuoting::Escaped);
        assert!(escaped.ends_with("\"St. \"\"Mary\"\" School\",\"\",\"Private\",\"\""));

        let verbatim = to_delimited_text_with(&records, CsvQuoting::Verbatim);
        assert!(verbatim.ends_with("\"St. \"Mary\" School\",\"\",\"Private\",\"\""));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Oslo"), "Oslo_schools.csv");
        assert_eq!(export_filename("New York"), "New_York_schools.csv");
        assert_eq!(export_filename("São Paulo"), "S_o_Paulo_schools.csv");
        assert_eq!(export_filename(""), "_schools.csv");
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(export_filename("Oslo"));
        let records = [SchoolRecord::new("Majorstuen skole", "", SchoolType::Unknown, "")];

        write_csv(&path, &records, CsvQuoting::Escaped).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_delimited_text(&records));
    }
}
